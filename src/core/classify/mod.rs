//! Classification of text candidates.
//!
//! A [`Classifier`] runs an ordered table of rules over a [`Candidate`]; the
//! first rule that decides wins. Rule order:
//!
//! 1. blank or ignored value: skip
//! 2. code-shaped value (paths, URLs, identifiers, styling, literals): skip
//! 3. argument of a code call or operand of a comparison: skip
//! 4. inside a configuration declaration or object: skip
//! 5. markup text directly inside a content element: text
//! 6. attribute not on the allow-list: skip
//! 7. single all-uppercase word: skip
//! 8. common code word outside a text context: skip
//! 9. otherwise text, or attribute text under an attribute

mod patterns;
pub mod rules;

use rules::{
    AttributeRule, BlankRule, ClassifyRule, CodePositionRule, CodeShapeRule, CodeWordRule,
    ConfigContextRule, ContentTextRule, FallbackRule, Rule, UppercaseWordRule,
};

use crate::config::Config;
use crate::core::collect::Candidate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Skip,
    ExtractAsText,
    ExtractAsAttribute,
}

impl Classification {
    pub fn is_extract(self) -> bool {
        self != Classification::Skip
    }
}

/// Object property keys whose string values the rewriter may replace.
const TRANSFORMABLE_PROPERTY_KEYS: &[&str] = &[
    "title",
    "description",
    "label",
    "placeholder",
    "alt",
    "text",
    "message",
    "heading",
];

#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<Rule>,
}

impl Classifier {
    pub fn new(config: &Config) -> Self {
        let rules = vec![
            Rule::from(BlankRule {
                ignored: config.ignore_texts.iter().cloned().collect(),
            }),
            Rule::from(CodeShapeRule),
            Rule::from(CodePositionRule {
                lookup_function: config.lookup_function.clone(),
            }),
            Rule::from(ConfigContextRule),
            Rule::from(ContentTextRule {
                elements: config.content_elements.iter().cloned().collect(),
            }),
            Rule::from(AttributeRule {
                allowed: config.translatable_attributes.iter().cloned().collect(),
            }),
            Rule::from(UppercaseWordRule),
            Rule::from(CodeWordRule),
            Rule::from(FallbackRule),
        ];

        Self { rules }
    }

    pub fn classify(&self, candidate: &Candidate) -> Classification {
        self.decide(candidate).0
    }

    /// Classification together with the name of the rule that decided it.
    pub fn decide(&self, candidate: &Candidate) -> (Classification, &'static str) {
        self.rules
            .iter()
            .find_map(|rule| rule.apply(candidate).map(|c| (c, rule.name())))
            .unwrap_or((Classification::Skip, "none"))
    }

    /// Whether the rewriter would replace this occurrence.
    ///
    /// The lookup binding only exists inside component bodies, and object
    /// properties are only rewritten for a small set of UI-facing keys.
    pub fn would_transform(&self, candidate: &Candidate) -> bool {
        if !self.classify(candidate).is_extract() || candidate.component.is_none() {
            return false;
        }
        candidate
            .direct_property()
            .is_none_or(|key| TRANSFORMABLE_PROPERTY_KEYS.contains(&key))
    }
}
