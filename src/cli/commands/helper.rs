use std::{
    env,
    path::{self, Path, PathBuf},
};

use anyhow::{Context, Result, bail};

use super::super::args::CommonArgs;
use super::{CommandResult, CommandSummary};
use crate::config::{Config, load_config};

/// Project root and effective configuration for one command.
pub struct Project {
    pub root: PathBuf,
    pub config: Config,
}

/// Resolve the project root and load its config, applying CLI overrides.
pub fn load_project(common: &CommonArgs) -> Result<Project> {
    let root = match &common.root {
        Some(root) => absolute(root)?,
        None => env::current_dir().context("Failed to read the current directory")?,
    };
    if !root.is_dir() {
        bail!("Project root {} is not a directory", root.display());
    }

    let mut config = load_config(&root)?.config;
    if let Some(locale) = &common.primary_locale {
        config.primary_locale = locale.clone();
    }
    if let Some(dir) = &common.locales_dir {
        config.locales_dir = dir.clone();
    }
    config.validate()?;

    Ok(Project { root, config })
}

/// The directory to process, as an absolute path.
pub fn source_dir(dir: &Path) -> Result<PathBuf> {
    let dir = absolute(dir)?;
    if !dir.is_dir() {
        bail!("Directory not found: {}", dir.display());
    }
    Ok(dir)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    path::absolute(path).with_context(|| format!("Failed to resolve {}", path.display()))
}

pub fn finish(summary: CommandSummary, failure_count: usize) -> CommandResult {
    CommandResult {
        summary,
        failure_count,
    }
}
