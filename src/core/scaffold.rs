//! Runtime setup files written next to the source tree when a project has no
//! i18n configuration yet.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::config::Config;

pub const I18N_CONFIG_FILE: &str = "i18n.config.ts";
pub const I18N_FILE: &str = "i18n.ts";

fn i18n_config_template(primary_locale: &str) -> String {
    format!(
        r#"export const defaultNS = 'translation';
export const fallbackLng = '{locale}';

export function getOptions(lng = fallbackLng, ns = defaultNS) {{
  return {{
    supportedLngs: ['{locale}'],
    fallbackLng,
    lng,
    fallbackNS: defaultNS,
    defaultNS,
    ns
  }};
}}
"#,
        locale = primary_locale
    )
}

fn i18n_template(locales_import: &str) -> String {
    format!(
        r#"'use client';

import i18n from 'i18next';
import {{ initReactI18next }} from 'react-i18next';
import resourcesToBackend from 'i18next-resources-to-backend';
import {{ getOptions }} from './i18n.config';

i18n
  .use(initReactI18next)
  .use(resourcesToBackend((language: string) => import(`{locales}/${{language}}.json`)))
  .init(getOptions());

export default i18n;
"#,
        locales = locales_import
    )
}

/// Directory the setup files go to: the parent of the source directory, as
/// long as that is still inside the project.
pub fn scaffold_dir(source_dir: &Path, root: &Path) -> PathBuf {
    match source_dir.parent() {
        Some(parent) if source_dir != root && parent.starts_with(root) => parent.to_path_buf(),
        _ => source_dir.to_path_buf(),
    }
}

/// Create `i18n.config.ts` and `i18n.ts` unless the source directory or the
/// scaffold directory already has them.
///
/// Returns the files that were created, or that would be created when
/// `dry_run` is set.
pub fn ensure_i18n_setup(
    source_dir: &Path,
    root: &Path,
    config: &Config,
    dry_run: bool,
) -> Result<Vec<PathBuf>> {
    let target_dir = scaffold_dir(source_dir, root);
    let exists = |name: &str| source_dir.join(name).exists() || target_dir.join(name).exists();

    let mut created = Vec::new();

    if !exists(I18N_CONFIG_FILE) {
        let path = target_dir.join(I18N_CONFIG_FILE);
        if !dry_run {
            fs::write(&path, i18n_config_template(&config.primary_locale))
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        created.push(path);
    }

    if !exists(I18N_FILE) {
        let path = target_dir.join(I18N_FILE);
        if !dry_run {
            let locales_import = locales_import(&target_dir, &config.locales_path(root));
            fs::write(&path, i18n_template(&locales_import))
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        created.push(path);
    }

    Ok(created)
}

/// Module specifier of the locales directory as seen from `from`.
fn locales_import(from: &Path, locales: &Path) -> String {
    match locales.strip_prefix(from) {
        Ok(rel) => format!("./{}", rel.to_string_lossy().replace('\\', "/")),
        Err(_) => {
            let depth = from
                .strip_prefix(locales.parent().unwrap_or(locales))
                .map(|p| p.components().count())
                .unwrap_or(0);
            let name = locales
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "locales".to_string());
            if depth == 0 {
                format!("./{}", name)
            } else {
                format!("{}{}", "../".repeat(depth), name)
            }
        }
    }
}
