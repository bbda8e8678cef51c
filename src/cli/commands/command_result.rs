use std::path::PathBuf;

use crate::core::pipeline::{ExtractReport, TransformReport};

#[derive(Debug)]
pub enum CommandSummary {
    Extract(ExtractSummary),
    Transform(TransformSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ExtractSummary {
    /// Paths in the report are shown relative to this.
    pub root: PathBuf,
    pub cleanup: bool,
    pub report: ExtractReport,
}

#[derive(Debug)]
pub struct TransformSummary {
    pub root: PathBuf,
    pub report: TransformReport,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running parlai commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Files that could not be rewritten. Any failure makes the exit
    /// status non-zero.
    pub failure_count: usize,
}
