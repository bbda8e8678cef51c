//! Byte-range edits over the original source text.

use anyhow::{Result, bail};

/// Replace `start..end` of the source with `text`. An insertion is an edit
/// with an empty range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEdit {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl SourceEdit {
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self {
            start: at,
            end: at,
            text: text.into(),
        }
    }

    pub fn replace(start: usize, end: usize, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    pub fn delete(start: usize, end: usize) -> Self {
        Self::replace(start, end, "")
    }
}

/// Apply `edits` to `source`.
///
/// Edits are ordered by start offset; insertions at the same offset keep the
/// order in which they were given. Overlapping ranges are rejected.
pub fn apply_edits(source: &str, mut edits: Vec<SourceEdit>) -> Result<String> {
    edits.sort_by_key(|edit| edit.start);

    let mut out = String::with_capacity(source.len() + edits.len() * 16);
    let mut cursor = 0;

    for edit in &edits {
        if edit.start < cursor || edit.end < edit.start || edit.end > source.len() {
            bail!("edit {}..{} overlaps a previous edit", edit.start, edit.end);
        }
        if !source.is_char_boundary(edit.start) || !source.is_char_boundary(edit.end) {
            bail!("edit {}..{} splits a character", edit.start, edit.end);
        }
        out.push_str(&source[cursor..edit.start]);
        out.push_str(&edit.text);
        cursor = edit.end;
    }

    out.push_str(&source[cursor..]);
    Ok(out)
}
