use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".parlairc.json";

pub const TEST_FILE_PATTERNS: &[&str] = &[
    "**/*.test.tsx",
    "**/*.test.jsx",
    "**/*.spec.tsx",
    "**/*.spec.jsx",
    "**/__tests__/**",
];

/// Whether rewritten files get a leading `"use client"` directive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ClientDirective {
    /// Ask the project inspector (Next.js App Router detection).
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    #[serde(default = "default_ignore_test_files")]
    pub ignore_test_files: bool,
    #[serde(default)]
    pub ignore_texts: Vec<String>,
    #[serde(default = "default_locales_dir")]
    pub locales_dir: String,
    #[serde(default = "default_primary_locale")]
    pub primary_locale: String,
    #[serde(default = "default_translatable_attributes")]
    pub translatable_attributes: Vec<String>,
    #[serde(default = "default_content_elements")]
    pub content_elements: Vec<String>,
    #[serde(default = "default_translation_module")]
    pub translation_module: String,
    #[serde(default = "default_hook_name")]
    pub hook_name: String,
    #[serde(default = "default_lookup_function")]
    pub lookup_function: String,
    #[serde(default)]
    pub client_directive: ClientDirective,
}

fn default_ignores() -> Vec<String> {
    vec!["**/node_modules/**".to_string()]
}

fn default_ignore_test_files() -> bool {
    true
}

fn default_locales_dir() -> String {
    "./locales".to_string()
}

fn default_primary_locale() -> String {
    "en".to_string()
}

fn default_translatable_attributes() -> Vec<String> {
    [
        "placeholder",
        "title",
        "alt",
        "label",
        "aria-label",
        "aria-description",
        "description",
        "caption",
        "summary",
        "heading",
        "text",
    ]
    .map(String::from)
    .to_vec()
}

fn default_content_elements() -> Vec<String> {
    [
        "h1", "h2", "h3", "h4", "h5", "h6", "p", "span", "div", "label", "button",
    ]
    .map(String::from)
    .to_vec()
}

fn default_translation_module() -> String {
    "react-i18next".to_string()
}

fn default_hook_name() -> String {
    "useTranslation".to_string()
}

fn default_lookup_function() -> String {
    "t".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignores: default_ignores(),
            ignore_test_files: default_ignore_test_files(),
            ignore_texts: Vec::new(),
            locales_dir: default_locales_dir(),
            primary_locale: default_primary_locale(),
            translatable_attributes: default_translatable_attributes(),
            content_elements: default_content_elements(),
            translation_module: default_translation_module(),
            hook_name: default_hook_name(),
            lookup_function: default_lookup_function(),
            client_directive: ClientDirective::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` is invalid or if one of
    /// the identifiers used for code generation is not a plain JS identifier.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        for (field, value) in [
            ("hookName", &self.hook_name),
            ("lookupFunction", &self.lookup_function),
        ] {
            if !is_identifier(value) {
                bail!("'{}' must be a valid identifier, got \"{}\"", field, value);
            }
        }

        if self.translation_module.trim().is_empty() {
            bail!("'translationModule' must not be empty");
        }

        Ok(())
    }

    /// Path of the catalog document for the primary locale, relative to `root`.
    pub fn catalog_path(&self, root: &Path) -> PathBuf {
        self.locales_path(root)
            .join(format!("{}.json", self.primary_locale))
    }

    /// Path of the locales directory, relative to `root`.
    pub fn locales_path(&self, root: &Path) -> PathBuf {
        let p = Path::new(&self.locales_dir);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            root.join(p.strip_prefix(".").unwrap_or(p))
        }
    }
}

fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
