//! Parlai - i18n retrofitting for React and Next.js components
//!
//! Parlai is a CLI tool and library that finds human-readable text hardcoded
//! in JSX/TSX components, assigns each string a stable key in a JSON
//! catalog, and rewrites the components to look the text up through
//! `react-i18next`.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, commands, reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction engine (collect, classify, key, catalog, rewrite, pipeline)
//! - `error`: Typed pipeline errors
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod utils;
