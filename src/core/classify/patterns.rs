//! Value shapes that mark a string as code, markup or styling rather than text.

use std::sync::LazyLock;

use regex::Regex;

static SCHEME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9+.-]*:\S").unwrap());

/// File names, domains and dotted catalog keys (`logo.svg`, `hero.title`).
static DOTTED_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z]+\.[a-z]+").unwrap());

static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\$\{.*\}|\{\{.*\}\}|\{[\w.]+\})$").unwrap());

/// At least two capitalised humps, so plain capitalised words stay text.
static PASCAL_CASE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][a-z0-9]+(?:[A-Z][a-z0-9]*)+(?:\.[A-Za-z]+)*$").unwrap()
});

static CAMEL_CASE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]+[A-Z][a-zA-Z]*$").unwrap());

static CONSTANT_CASE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z_]+$").unwrap());

static LITERAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:-?\d+(?:\.\d+)?|true|false|null|undefined|NaN)$").unwrap()
});

static LOCALE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2}(?:-[A-Z]{2})?$").unwrap());

static CSS_LENGTH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?\d*\.?\d+(?:px|r?em|vh|vw|vmin|vmax|%|ch|ex|pt|fr|s|ms|deg)$").unwrap()
});

/// Tailwind utility with a value (`px-4`, `text-lg`, `bg-blue-500/50`).
static UTILITY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^-?(?:bg|text|font|m[xytrbl]?|p[xytrbl]?|w|h|min-w|min-h|max-w|max-h|gap|space-[xy]|flex|grid|col|row|rounded|shadow|border|ring|outline|leading|tracking|items|justify|self|place|content|top|right|bottom|left|inset|z|opacity|overflow|object|from|via|to|duration|ease|delay|animate|transition|translate-[xy]|scale|rotate|order|basis|grow|shrink|line-clamp|aspect|fill|stroke|backdrop|blur|divide|decoration|underline-offset|size|cursor|select|pointer-events|whitespace|break|truncate)-[\w./\[\]#%-]+$",
    )
    .unwrap()
});

/// Standalone utility keywords that carry no value suffix.
const UTILITY_KEYWORDS: &[&str] = &[
    "flex",
    "grid",
    "block",
    "inline",
    "inline-block",
    "inline-flex",
    "hidden",
    "contents",
    "relative",
    "absolute",
    "fixed",
    "sticky",
    "static",
    "container",
    "truncate",
    "italic",
    "underline",
    "uppercase",
    "lowercase",
    "capitalize",
    "antialiased",
    "grow",
    "shrink",
    "border",
    "rounded",
    "shadow",
    "transition",
    "sr-only",
];

/// Responsive and state variants (`md:flex`, `hover:bg-blue-600`).
static VARIANT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[a-z0-9-]+:)+(.+)$").unwrap());

const FONT_KEYWORDS: &[&str] = &[
    "sans",
    "serif",
    "mono",
    "latin",
    "cyrillic",
    "greek",
    "vietnamese",
    "arabic",
    "hebrew",
    "devanagari",
];

/// Longest value without whitespace that is still considered a word.
pub const MAX_TOKEN_LEN: usize = 40;

pub fn is_path_like(value: &str) -> bool {
    value.starts_with("@/") || value.starts_with("./") || value.starts_with("../") || value.contains('/')
}

pub fn is_url_like(value: &str) -> bool {
    SCHEME_REGEX.is_match(value) || DOTTED_REGEX.is_match(value)
}

/// Markup fragments and unfilled template placeholders.
pub fn is_template_like(value: &str) -> bool {
    value.starts_with('<') || value.starts_with('>') || PLACEHOLDER_REGEX.is_match(value)
}

pub fn is_identifier_case(value: &str) -> bool {
    PASCAL_CASE_REGEX.is_match(value)
        || CAMEL_CASE_REGEX.is_match(value)
        || CONSTANT_CASE_REGEX.is_match(value)
}

pub fn is_bare_literal(value: &str) -> bool {
    LITERAL_REGEX.is_match(value)
}

pub fn is_locale_code(value: &str) -> bool {
    LOCALE_REGEX.is_match(value)
}

pub fn is_font_keyword(value: &str) -> bool {
    FONT_KEYWORDS.contains(&value)
}

/// A long unbroken token is a hash, id or encoded blob.
pub fn is_long_token(value: &str) -> bool {
    value.chars().count() > MAX_TOKEN_LEN && !value.contains(char::is_whitespace)
}

fn is_style_token(token: &str) -> bool {
    let token = token.strip_prefix('!').unwrap_or(token);
    let token = match VARIANT_REGEX.captures(token) {
        Some(caps) => caps.get(1).map_or(token, |m| m.as_str()),
        None => token,
    };
    CSS_LENGTH_REGEX.is_match(token)
        || UTILITY_REGEX.is_match(token)
        || UTILITY_KEYWORDS.contains(&token)
}

/// Every whitespace-separated token is a utility class or a CSS length.
pub fn is_style_value(value: &str) -> bool {
    let mut tokens = value.split_whitespace().peekable();
    tokens.peek().is_some() && tokens.all(is_style_token)
}
