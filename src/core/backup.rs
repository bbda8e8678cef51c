//! Timestamped copies of the source tree and catalog taken before a run
//! mutates anything.

use std::{
    fs,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::{Context, Result};
use walkdir::WalkDir;

pub const BACKUP_DIR_PREFIX: &str = "i18n-backup-";

/// Copy each existing directory of `sources` into
/// `<root>/i18n-backup-<unix-millis>/<dir name>`.
///
/// Missing sources are skipped. Returns the backup directory.
pub fn create_backup(root: &Path, sources: &[&Path]) -> Result<PathBuf> {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("System clock is before the Unix epoch")?
        .as_millis();
    let backup_dir = root.join(format!("{}{}", BACKUP_DIR_PREFIX, millis));
    fs::create_dir_all(&backup_dir)
        .with_context(|| format!("Failed to create {}", backup_dir.display()))?;

    for source in sources {
        if !source.exists() {
            continue;
        }
        let name = source
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "src".into());
        copy_tree(source, &backup_dir.join(name), &backup_dir)?;
    }

    Ok(backup_dir)
}

/// Recursively copy `from` into `to`, never descending into `exclude` (the
/// backup itself may live inside the tree being copied).
fn copy_tree(from: &Path, to: &Path, exclude: &Path) -> Result<()> {
    for entry in WalkDir::new(from)
        .into_iter()
        .filter_entry(|e| !e.path().starts_with(exclude))
    {
        let entry = entry.with_context(|| format!("Failed to walk {}", from.display()))?;
        let relative = entry.path().strip_prefix(from)?;
        let target = to.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create {}", target.display()))?;
        } else if entry.file_type().is_file() {
            fs::copy(entry.path(), &target).with_context(|| {
                format!(
                    "Failed to copy {} to {}",
                    entry.path().display(),
                    target.display()
                )
            })?;
        }
    }
    Ok(())
}
