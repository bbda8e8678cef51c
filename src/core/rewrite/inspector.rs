use std::path::Path;

use crate::config::{ClientDirective, Config};

/// Answers questions about the project layout the rewriter cannot see from
/// a single file.
pub trait ProjectInspector: Sync {
    /// Whether a rewritten `file` needs a leading client directive so the
    /// translation hook runs outside server rendering.
    fn needs_runtime_directive(&self, file: &Path, project_root: &Path) -> bool;
}

/// Detects Next.js App Router projects, where components are server
/// components unless marked with `"use client"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NextAppRouterInspector;

const NEXT_CONFIG_FILES: &[&str] = &[
    "next.config.js",
    "next.config.mjs",
    "next.config.cjs",
    "next.config.ts",
];

impl ProjectInspector for NextAppRouterInspector {
    fn needs_runtime_directive(&self, _file: &Path, project_root: &Path) -> bool {
        project_root.join("app").is_dir()
            || project_root.join("src").join("app").is_dir()
            || NEXT_CONFIG_FILES
                .iter()
                .any(|name| project_root.join(name).is_file())
    }
}

/// Resolve the configured directive policy for one file.
pub fn directive_required(
    config: &Config,
    inspector: &dyn ProjectInspector,
    file: &Path,
    project_root: &Path,
) -> bool {
    match config.client_directive {
        ClientDirective::Always => true,
        ClientDirective::Never => false,
        ClientDirective::Auto => inspector.needs_runtime_directive(file, project_root),
    }
}
