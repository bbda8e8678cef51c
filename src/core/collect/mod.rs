//! Collection: one AST pass per file.
//!
//! Produces the text candidates the classifier judges, plus the structural
//! facts (imports, directives, component bodies, referenced keys) the rewriter
//! and catalog builder need later.

pub mod node;
pub mod visitor;

pub use node::{Ancestor, Candidate, TextNode, TextNodeKind, is_component_name};
pub use visitor::{
    COMPONENT_WRAPPERS, CollectedFile, Collector, ComponentBody, ComponentInfo, ImportInfo,
};

use crate::config::Config;
use crate::core::parsers::jsx::ParsedJSX;

/// Walk a parsed file using the hook and lookup names from `config`.
pub fn collect_file(parsed: &ParsedJSX, config: &Config) -> CollectedFile {
    Collector::new(parsed, &config.hook_name, &config.lookup_function).collect()
}
