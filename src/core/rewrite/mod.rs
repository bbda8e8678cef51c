//! Rewriting of source files to use catalog lookups.
//!
//! The rewriter never regenerates a file from its syntax tree. It computes
//! byte-range [`SourceEdit`]s from node spans, applies them to the original
//! text and re-parses the result, so regions it does not touch stay
//! byte-identical.
//!
//! Per file it works in two passes:
//!
//! 1. Read-only: find candidates whose value is in the catalog lookup and
//!    that the classifier says would be transformed. No match, no change.
//! 2. Edits, in this order: client directive, hook import (and removal of
//!    stale i18n imports), lookup bindings in the affected components, and
//!    finally the replacements themselves.

pub mod edits;
pub mod inspector;

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

pub use edits::{SourceEdit, apply_edits};
pub use inspector::{NextAppRouterInspector, ProjectInspector, directive_required};

use crate::config::Config;
use crate::core::classify::Classifier;
use crate::core::collect::{
    Candidate, CollectedFile, ComponentBody, ComponentInfo, TextNodeKind,
};
use crate::core::parsers::jsx::{ParsedJSX, parse_jsx_source};
use crate::error::PipelineError;
use crate::utils::line_indent;

pub const CLIENT_DIRECTIVE: &str = "use client";
const SERVER_DIRECTIVE: &str = "use server";

/// Result of rewriting one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutcome {
    pub changed: bool,
    /// The rewritten text; equal to the input when nothing changed.
    pub output: String,
    /// Number of text nodes replaced by lookups.
    pub replaced: usize,
}

pub struct Rewriter<'a> {
    lookup: &'a HashMap<String, String>,
    classifier: &'a Classifier,
    config: &'a Config,
}

impl<'a> Rewriter<'a> {
    /// `lookup` maps catalog values to their keys.
    pub fn new(
        lookup: &'a HashMap<String, String>,
        classifier: &'a Classifier,
        config: &'a Config,
    ) -> Self {
        Self {
            lookup,
            classifier,
            config,
        }
    }

    /// The catalog key a candidate would be replaced with, if any.
    fn key_for(&self, candidate: &Candidate) -> Option<&'a str> {
        let key = self.lookup.get(&candidate.node.value)?;
        self.classifier
            .would_transform(candidate)
            .then_some(key.as_str())
    }

    /// First pass: whether any candidate of the file would be replaced.
    pub fn needs_rewrite(&self, collected: &CollectedFile) -> bool {
        collected
            .candidates
            .iter()
            .any(|candidate| self.key_for(candidate).is_some())
    }

    /// Rewrite one file and, unless `dry_run`, write it back. The file on
    /// disk is only replaced after the rewritten text parsed successfully.
    pub fn rewrite_file(
        &self,
        path: &Path,
        parsed: &ParsedJSX,
        collected: &CollectedFile,
        add_directive: bool,
        dry_run: bool,
    ) -> Result<RewriteOutcome, PipelineError> {
        let outcome = self.rewrite(path, parsed, collected, add_directive)?;
        if outcome.changed && !dry_run {
            fs::write(path, &outcome.output).map_err(|e| PipelineError::io(path, e))?;
        }
        Ok(outcome)
    }

    /// Rewrite an already parsed and collected file in memory.
    pub fn rewrite(
        &self,
        path: &Path,
        parsed: &ParsedJSX,
        collected: &CollectedFile,
        add_directive: bool,
    ) -> Result<RewriteOutcome, PipelineError> {
        let source: &str = &parsed.source;
        let print_failure = |message: String| PipelineError::PrintFailure {
            path: path.to_path_buf(),
            message,
        };

        let targets: Vec<(&Candidate, &str)> = collected
            .candidates
            .iter()
            .filter_map(|candidate| self.key_for(candidate).map(|key| (candidate, key)))
            .collect();

        if targets.is_empty() {
            return Ok(RewriteOutcome {
                changed: false,
                output: source.to_string(),
                replaced: 0,
            });
        }

        let mut edits = Vec::new();

        let has_directive = collected.has_directive(CLIENT_DIRECTIVE)
            || collected.has_directive(SERVER_DIRECTIVE);
        if add_directive && !has_directive {
            edits.push(SourceEdit::insert(0, format!("\"{}\";\n\n", CLIENT_DIRECTIVE)));
        }

        edits.extend(self.import_edits(source, collected).map_err(print_failure)?);

        let components: BTreeSet<usize> = targets.iter().filter_map(|(c, _)| c.component).collect();
        for component in components.iter().filter_map(|&i| collected.components.get(i)) {
            if !component.has_binding {
                edits.extend(self.binding_edits(source, component));
            }
        }

        for (candidate, key) in &targets {
            let (start, end) = parsed.range(candidate.node.span);
            let call = format!(
                "{}({})",
                self.config.lookup_function,
                js_string(key).map_err(print_failure)?
            );
            let text = match candidate.node.kind {
                TextNodeKind::StringLiteral => call,
                TextNodeKind::JsxText | TextNodeKind::AttributeValue => format!("{{{}}}", call),
            };
            edits.push(SourceEdit::replace(start, end, text));
        }

        let output = apply_edits(source, edits).map_err(|e| print_failure(e.to_string()))?;

        // The rewritten text must still be a valid module.
        parse_jsx_source(output.clone(), &path.to_string_lossy())
            .map_err(|e| print_failure(format!("rewritten source does not parse: {}", e)))?;

        Ok(RewriteOutcome {
            changed: output != source,
            output,
            replaced: targets.len(),
        })
    }

    fn import_edits(
        &self,
        source: &str,
        collected: &CollectedFile,
    ) -> Result<Vec<SourceEdit>, String> {
        let module = &self.config.translation_module;
        let mut edits = Vec::new();

        let has_hook_import = collected
            .imports
            .iter()
            .any(|import| &import.source == module && import.imports_hook);

        if !has_hook_import {
            let line = format!(
                "import {{ {} }} from {};",
                self.config.hook_name,
                js_string(module)?
            );
            let edit = match (collected.imports.first(), collected.prologue_end) {
                (Some(first), _) => SourceEdit::insert(first.range.0, format!("{}\n", line)),
                (None, Some(end)) => SourceEdit::insert(end, format!("\n\n{}", line)),
                (None, None) => SourceEdit::insert(0, format!("{}\n\n", line)),
            };
            edits.push(edit);
        }

        // Imports of a previous i18n setup go once nothing else uses them. The
        // hook name is provided by the new import either way.
        let hook = &self.config.hook_name;
        for import in &collected.imports {
            if &import.source == module || !import.source.contains("i18n") {
                continue;
            }
            let still_used = import
                .locals
                .iter()
                .any(|local| local != hook && collected.identifiers.contains(local));
            let binds_hook = import.locals.iter().any(|local| local == hook);

            if !still_used {
                let (start, end) = import.range;
                edits.push(SourceEdit::delete(start, end + line_break_len(&source[end..])));
            } else if binds_hook {
                return Err(format!(
                    "import from \"{}\" binds {} next to names still in use",
                    import.source, hook
                ));
            }
        }

        Ok(edits)
    }

    fn binding_edits(&self, source: &str, component: &ComponentInfo) -> Vec<SourceEdit> {
        let binding = format!(
            "const {{ {} }} = {}();",
            self.config.lookup_function, self.config.hook_name
        );

        match component.body {
            ComponentBody::Block { open, first_stmt } => {
                let text = match first_stmt {
                    Some(stmt) if source[open..stmt].contains('\n') => {
                        format!("\n{}{}", line_indent(source, stmt), binding)
                    }
                    Some(_) => format!(" {}", binding),
                    None => format!(" {} ", binding),
                };
                vec![SourceEdit::insert(open + 1, text)]
            }
            ComponentBody::Expr { start, end } => vec![
                SourceEdit::insert(start, format!("{{ {} return ", binding)),
                SourceEdit::insert(end, "; }"),
            ],
        }
    }
}

/// `value` as a double-quoted JS string literal.
fn js_string(value: &str) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

fn line_break_len(rest: &str) -> usize {
    if rest.starts_with("\r\n") {
        2
    } else if rest.starts_with('\n') {
        1
    } else {
        0
    }
}
