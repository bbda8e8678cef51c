//! The ordered rule table. Each rule either decides or passes.

use std::collections::HashSet;

use enum_dispatch::enum_dispatch;

use super::Classification;
use super::patterns;
use crate::core::collect::{Ancestor, COMPONENT_WRAPPERS, Candidate, TextNodeKind};
use crate::utils::contains_alphabetic;

/// Declarator names that mark a configuration object (matched as substrings).
const CONFIG_DECLARATOR_HINTS: &[&str] = &["config", "options", "settings", "meta"];

/// Property keys that mark a configuration object.
const CONFIG_PROPERTY_KEYS: &[&str] = &[
    "subsets", "variable", "metadata", "meta", "config", "options", "settings",
];

/// Callees whose string arguments are code.
const CODE_CALLEES: &[&str] = &[
    "require",
    "import",
    "fetch",
    "Geist",
    "Geist_Mono",
    "Inter",
    "Roboto",
    "createFont",
    "cn",
    "clsx",
    "classNames",
    "cva",
    "twMerge",
];

/// Methods whose string arguments are code, whatever object they are called on.
const CODE_METHODS: &[&str] = &[
    "addEventListener",
    "removeEventListener",
    "dispatchEvent",
    "querySelector",
    "querySelectorAll",
    "getElementById",
    "createElement",
    "getItem",
    "setItem",
    "removeItem",
];

const COMMON_CODE_WORDS: &[&str] = &[
    "props", "state", "ref", "key", "id", "src", "href", "type", "name", "value", "data",
    "style", "class", "true", "false", "null", "undefined", "next", "prev", "default", "primary",
    "secondary", "success", "error", "warning", "info", "latin", "mono", "sans", "serif", "font",
    "layout", "config", "meta", "title", "head", "body", "main", "header", "footer", "nav",
    "section", "article", "aside", "div", "span", "lang", "dir", "role", "aria",
];

/// Property keys that hold UI text when they sit inside an array of objects.
const LIST_TEXT_KEYS: &[&str] = &["title", "description", "text", "label", "heading", "message"];

/// A single rule of the classifier.
#[enum_dispatch]
pub trait ClassifyRule {
    fn name(&self) -> &'static str;

    /// `Some` decides the classification, `None` passes to the next rule.
    fn apply(&self, candidate: &Candidate) -> Option<Classification>;
}

#[enum_dispatch(ClassifyRule)]
#[derive(Debug, Clone)]
pub enum Rule {
    Blank(BlankRule),
    CodeShape(CodeShapeRule),
    CodePosition(CodePositionRule),
    ConfigContext(ConfigContextRule),
    ContentText(ContentTextRule),
    Attribute(AttributeRule),
    UppercaseWord(UppercaseWordRule),
    CodeWord(CodeWordRule),
    Fallback(FallbackRule),
}

fn is_single_word(value: &str) -> bool {
    !value.contains(char::is_whitespace)
}

/// Empty values and texts the project asked to ignore.
#[derive(Debug, Clone, Default)]
pub struct BlankRule {
    pub ignored: HashSet<String>,
}

impl ClassifyRule for BlankRule {
    fn name(&self) -> &'static str {
        "blank"
    }

    fn apply(&self, candidate: &Candidate) -> Option<Classification> {
        let value = candidate.node.value.trim();
        (value.is_empty() || self.ignored.contains(value)).then_some(Classification::Skip)
    }
}

/// Values shaped like paths, URLs, identifiers, styling or data.
#[derive(Debug, Clone, Default)]
pub struct CodeShapeRule;

impl ClassifyRule for CodeShapeRule {
    fn name(&self) -> &'static str {
        "code-shape"
    }

    fn apply(&self, candidate: &Candidate) -> Option<Classification> {
        let value = candidate.node.value.trim();
        let is_code = !contains_alphabetic(value)
            || patterns::is_path_like(value)
            || patterns::is_url_like(value)
            || patterns::is_template_like(value)
            || patterns::is_style_value(value)
            || patterns::is_identifier_case(value)
            || patterns::is_bare_literal(value)
            || patterns::is_locale_code(value)
            || patterns::is_long_token(value)
            || patterns::is_font_keyword(value);
        is_code.then_some(Classification::Skip)
    }
}

/// Arguments of code-level calls and operands of comparisons.
#[derive(Debug, Clone)]
pub struct CodePositionRule {
    pub lookup_function: String,
}

impl CodePositionRule {
    fn is_code_callee(&self, callee: &str) -> bool {
        if callee == self.lookup_function || CODE_CALLEES.contains(&callee) {
            return true;
        }
        if callee.starts_with("console.") {
            return true;
        }
        callee
            .rsplit_once('.')
            .is_some_and(|(_, method)| CODE_METHODS.contains(&method))
    }
}

impl ClassifyRule for CodePositionRule {
    fn name(&self) -> &'static str {
        "code-position"
    }

    fn apply(&self, candidate: &Candidate) -> Option<Classification> {
        if candidate.parent() == Some(&Ancestor::Comparison) {
            return Some(Classification::Skip);
        }

        // Calls count up to the nearest function boundary: a callback passed
        // to a code call has its own context.
        let in_code_call = candidate
            .ancestors
            .iter()
            .rev()
            .take_while(|a| !matches!(a, Ancestor::Function { .. }))
            .any(|a| matches!(a, Ancestor::Call { callee } if self.is_code_callee(callee)));
        in_code_call.then_some(Classification::Skip)
    }
}

/// Values inside configuration-like declarations or objects.
#[derive(Debug, Clone, Default)]
pub struct ConfigContextRule;

impl ClassifyRule for ConfigContextRule {
    fn name(&self) -> &'static str {
        "config-context"
    }

    fn apply(&self, candidate: &Candidate) -> Option<Classification> {
        let ancestors = &candidate.ancestors;
        let in_config = ancestors.iter().enumerate().any(|(i, a)| match a {
            // A declarator binding a function names the function, not data.
            Ancestor::Declarator { name } => {
                let binds_function = matches!(
                    ancestors[i + 1..].iter().find(|a| !is_component_wrapper(a)),
                    Some(Ancestor::Function { .. })
                );
                let name = name.to_lowercase();
                !binds_function && CONFIG_DECLARATOR_HINTS.iter().any(|h| name.contains(h))
            }
            Ancestor::Property { key } => {
                CONFIG_PROPERTY_KEYS.contains(&key.to_lowercase().as_str())
            }
            _ => false,
        });
        in_config.then_some(Classification::Skip)
    }
}

fn is_component_wrapper(ancestor: &Ancestor) -> bool {
    matches!(ancestor, Ancestor::Call { callee } if COMPONENT_WRAPPERS.contains(&callee.as_str()))
}

/// Markup text directly inside a content element is always text.
#[derive(Debug, Clone, Default)]
pub struct ContentTextRule {
    pub elements: HashSet<String>,
}

impl ClassifyRule for ContentTextRule {
    fn name(&self) -> &'static str {
        "content-text"
    }

    fn apply(&self, candidate: &Candidate) -> Option<Classification> {
        if candidate.node.kind != TextNodeKind::JsxText {
            return None;
        }
        candidate
            .enclosing_element()
            .filter(|name| self.elements.contains(*name))
            .map(|_| Classification::ExtractAsText)
    }
}

/// Attribute values are only text for human-facing attributes.
///
/// The allow-list is authoritative: technical prefixes such as `aria-` or
/// `data-` are excluded simply by not being listed, so listed names like
/// `aria-label` stay translatable.
#[derive(Debug, Clone, Default)]
pub struct AttributeRule {
    pub allowed: HashSet<String>,
}

impl ClassifyRule for AttributeRule {
    fn name(&self) -> &'static str {
        "attribute"
    }

    fn apply(&self, candidate: &Candidate) -> Option<Classification> {
        let name = candidate.attribute_name()?;
        (!self.allowed.contains(name)).then_some(Classification::Skip)
    }
}

/// A single word without lowercase letters is a constant or a code.
#[derive(Debug, Clone, Default)]
pub struct UppercaseWordRule;

impl ClassifyRule for UppercaseWordRule {
    fn name(&self) -> &'static str {
        "uppercase-word"
    }

    fn apply(&self, candidate: &Candidate) -> Option<Classification> {
        let value = candidate.node.value.trim();
        let shouting = is_single_word(value)
            && value.chars().any(char::is_uppercase)
            && !value.chars().any(char::is_lowercase);
        shouting.then_some(Classification::Skip)
    }
}

/// Common code words, unless the surrounding structure says they are UI text:
/// markup text, or a text property of an object inside an array.
#[derive(Debug, Clone, Default)]
pub struct CodeWordRule;

impl CodeWordRule {
    fn in_text_context(&self, candidate: &Candidate) -> bool {
        if candidate.node.kind == TextNodeKind::JsxText {
            return true;
        }
        candidate.has_ancestor(|a| matches!(a, Ancestor::Array))
            && candidate.direct_property().is_some_and(|key| LIST_TEXT_KEYS.contains(&key))
    }
}

impl ClassifyRule for CodeWordRule {
    fn name(&self) -> &'static str {
        "code-word"
    }

    fn apply(&self, candidate: &Candidate) -> Option<Classification> {
        let value = candidate.node.value.trim();
        let code_word =
            is_single_word(value) && COMMON_CODE_WORDS.contains(&value.to_lowercase().as_str());
        (code_word && !self.in_text_context(candidate)).then_some(Classification::Skip)
    }
}

/// Everything that survived the table is text.
#[derive(Debug, Clone, Default)]
pub struct FallbackRule;

impl ClassifyRule for FallbackRule {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn apply(&self, candidate: &Candidate) -> Option<Classification> {
        Some(if candidate.attribute_name().is_some() {
            Classification::ExtractAsAttribute
        } else {
            Classification::ExtractAsText
        })
    }
}
