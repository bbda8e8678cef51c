//! The extraction engine.
//!
//! Leaves first: [`parsers`] turns a file into a tree, [`collect`] walks it
//! once, [`classify`] judges every text candidate, [`key`] and [`catalog`]
//! turn extracted strings into the persistent catalog, and [`rewrite`]
//! splices lookups back into the source. [`pipeline`] runs all of it over a
//! directory.

pub mod backup;
pub mod catalog;
pub mod classify;
pub mod collect;
pub mod file_scanner;
pub mod key;
pub mod parsers;
pub mod pipeline;
pub mod rewrite;
pub mod scaffold;
