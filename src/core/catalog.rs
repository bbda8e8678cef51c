//! The translation catalog: a nested JSON document of string leaves.
//!
//! Keys are dot-separated paths (`hero.welcome`). The nested form is what is
//! stored on disk; [`Catalog::flatten_for_lookup`] produces the reverse
//! value-to-key map the rewriter works with.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};

use crate::error::PipelineError;

/// Result of inserting a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// The key already held this exact value.
    Unchanged,
    /// The key held a different value, which was overwritten.
    Collision { previous: String },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    data: Map<String, Value>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog document, failing if it is missing or malformed.
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        Self::load_optional(path)?.ok_or_else(|| PipelineError::CatalogNotFound {
            path: path.to_path_buf(),
        })
    }

    /// Load a catalog document if one exists.
    pub fn load_optional(path: &Path) -> Result<Option<Self>, PipelineError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PipelineError::io(path, e)),
        };

        let invalid = |reason: String| PipelineError::InvalidCatalog {
            path: path.to_path_buf(),
            reason,
        };

        let value: Value = serde_json::from_str(&content).map_err(|e| invalid(e.to_string()))?;
        Self::from_value(value).map(Some).map_err(|e| invalid(e.to_string()))
    }

    /// Build a catalog from a JSON value, checking its shape.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(data) = value else {
            bail!("root must be an object");
        };
        validate(&data, "")?;
        Ok(Self { data })
    }

    /// Insert `value` at the dotted `key`, creating intermediate levels.
    pub fn insert(&mut self, key: &str, value: &str) -> InsertOutcome {
        let parts: Vec<&str> = key.split('.').collect();
        insert_nested(&mut self.data, &parts, value)
    }

    /// All `(key, value)` leaves, depth-first in document order.
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        collect_leaves(&self.data, "", &mut out);
        out
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Whether the catalog holds no string leaves; empty namespaces do not
    /// count.
    pub fn is_empty(&self) -> bool {
        !has_leaves(&self.data)
    }

    /// Reverse map from value to key.
    ///
    /// When several keys hold the same value, the last one in document order
    /// wins.
    pub fn flatten_for_lookup(&self) -> HashMap<String, String> {
        self.entries()
            .into_iter()
            .map(|(key, value)| (value, key))
            .collect()
    }

    /// Keep only the leaves for which `keep` returns true. Namespaces left
    /// empty are removed. Returns the removed keys.
    pub fn retain(&mut self, mut keep: impl FnMut(&str, &str) -> bool) -> Vec<String> {
        let mut removed = Vec::new();
        retain_nested(&mut self.data, "", &mut keep, &mut removed);
        removed
    }

    /// Pretty-printed document with 2-space indentation and a trailing newline.
    pub fn to_json_string(&self) -> Result<String> {
        let content =
            serde_json::to_string_pretty(&self.data).context("Failed to serialize catalog")?;
        Ok(format!("{}\n", content))
    }

    pub fn save(&self, path: &Path) -> Result<(), PipelineError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| PipelineError::io(parent, e))?;
        }
        let content = self.to_json_string().map_err(|e| PipelineError::InvalidCatalog {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        fs::write(path, content).map_err(|e| PipelineError::io(path, e))
    }

    /// A catalog of the same shape with every value translated to `target`.
    pub fn translated(&self, translator: &dyn Translator, target: &str) -> Result<Self> {
        let entries = self.entries();
        let values: Vec<String> = entries.iter().map(|(_, value)| value.clone()).collect();
        let translated = translator
            .translate(&values, target)
            .with_context(|| format!("Failed to translate catalog to {}", target))?;

        if translated.len() != values.len() {
            bail!(
                "translator returned {} values for {} inputs",
                translated.len(),
                values.len()
            );
        }

        let mut out = Catalog::new();
        for ((key, _), value) in entries.iter().zip(&translated) {
            out.insert(key, value);
        }
        Ok(out)
    }
}

/// A service turning catalog values into another language.
///
/// This is the boundary to an external translation provider. The crate ships
/// no implementation; callers supply one and pass it to
/// [`Catalog::translated`].
///
/// Implementations receive the values in catalog order and must return the
/// same number of values in the same order.
pub trait Translator {
    fn translate(&self, values: &[String], target: &str) -> Result<Vec<String>>;
}

fn has_leaves(map: &Map<String, Value>) -> bool {
    map.values().any(|value| match value {
        Value::String(_) => true,
        Value::Object(inner) => has_leaves(inner),
        _ => false,
    })
}

fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn validate(map: &Map<String, Value>, prefix: &str) -> Result<()> {
    for (key, value) in map {
        let path = join_key(prefix, key);
        match value {
            Value::String(_) => {}
            Value::Object(inner) => validate(inner, &path)?,
            other => bail!(
                "\"{}\" must be a string or an object, found {}",
                path,
                json_type(other)
            ),
        }
    }
    Ok(())
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn insert_nested(root: &mut Map<String, Value>, path: &[&str], value: &str) -> InsertOutcome {
    let Some((first, rest)) = path.split_first() else {
        return InsertOutcome::Unchanged;
    };

    if rest.is_empty() {
        let previous = root.insert(first.to_string(), Value::String(value.to_string()));
        return match previous {
            None => InsertOutcome::Inserted,
            Some(Value::String(prev)) if prev == value => InsertOutcome::Unchanged,
            Some(Value::String(prev)) => InsertOutcome::Collision { previous: prev },
            Some(other) => InsertOutcome::Collision {
                previous: other.to_string(),
            },
        };
    }

    let next_level = root
        .entry(first.to_string())
        .or_insert_with(|| Value::Object(Map::new()));

    match next_level {
        Value::Object(inner) => insert_nested(inner, rest, value),
        other => {
            let previous = other.to_string();
            let mut inner = Map::new();
            insert_nested(&mut inner, rest, value);
            *other = Value::Object(inner);
            InsertOutcome::Collision { previous }
        }
    }
}

fn collect_leaves(map: &Map<String, Value>, prefix: &str, out: &mut Vec<(String, String)>) {
    for (key, value) in map {
        let path = join_key(prefix, key);
        match value {
            Value::String(s) => out.push((path, s.clone())),
            Value::Object(inner) => collect_leaves(inner, &path, out),
            _ => {}
        }
    }
}

fn retain_nested(
    map: &mut Map<String, Value>,
    prefix: &str,
    keep: &mut impl FnMut(&str, &str) -> bool,
    removed: &mut Vec<String>,
) {
    map.retain(|key, value| {
        let path = join_key(prefix, key);
        match value {
            Value::String(s) => {
                let kept = keep(&path, s);
                if !kept {
                    removed.push(path);
                }
                kept
            }
            Value::Object(inner) => {
                retain_nested(inner, &path, keep, removed);
                !inner.is_empty()
            }
            _ => true,
        }
    });
}
