//! Engine-level view of the syntax tree.
//!
//! Only the node shapes the classifier and rewriter inspect are modelled.
//! Everything else in the swc AST is reduced to an [`Ancestor`] entry on the
//! parent chain or ignored.

use swc_common::Span;

/// Kind of a text-bearing node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextNodeKind {
    /// A string literal in expression position (`"Hello"`).
    StringLiteral,
    /// Markup text between tags (`<h1>Hello</h1>`).
    JsxText,
    /// A string used directly as an attribute value (`title="Hello"`).
    AttributeValue,
}

/// A literal or text node with the value the engine works on.
///
/// For [`TextNodeKind::JsxText`] the value is trimmed with internal
/// whitespace collapsed, and `span` covers exactly the trimmed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextNode {
    pub kind: TextNodeKind,
    pub value: String,
    pub line: usize,
    pub span: Span,
}

/// One structural step on the path from the module root to a text node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ancestor {
    /// A JSX element, with its tag name (`div`, `Card`, `motion.div`).
    Element { name: String },
    /// A JSX attribute, with its name (`placeholder`, `aria-label`).
    Attribute { name: String },
    /// A variable declarator binding an identifier.
    Declarator { name: String },
    /// An object literal property with an identifier or string key.
    Property { key: String },
    /// An array literal.
    Array,
    /// A call expression; `callee` is the identifier or member path called.
    Call { callee: String },
    /// An operand of a comparison (`===`, `!==`, `==`, `!=`).
    Comparison,
    /// A function or arrow function. `component` is set when its binding
    /// name looks like a component or page.
    Function {
        name: Option<String>,
        component: bool,
    },
}

/// A text node together with its ancestry, nearest ancestor last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub node: TextNode,
    pub ancestors: Vec<Ancestor>,
    /// Index into the file's component list of the nearest enclosing
    /// component function, if any.
    pub component: Option<usize>,
}

impl Candidate {
    /// Nearest ancestor, i.e. the structural parent.
    pub fn parent(&self) -> Option<&Ancestor> {
        self.ancestors.last()
    }

    /// The attribute this node belongs to, if the nearest JSX construct above
    /// it is an attribute rather than an element.
    pub fn attribute_name(&self) -> Option<&str> {
        self.ancestors
            .iter()
            .rev()
            .find_map(|a| match a {
                Ancestor::Attribute { name } => Some(Some(name.as_str())),
                Ancestor::Element { .. } => Some(None),
                _ => None,
            })
            .flatten()
    }

    /// Name of the element whose children directly contain this node.
    pub fn enclosing_element(&self) -> Option<&str> {
        match self.ancestors.last() {
            Some(Ancestor::Element { name }) => Some(name.as_str()),
            _ => None,
        }
    }

    /// Key of the object property this node is the direct value of.
    pub fn direct_property(&self) -> Option<&str> {
        match self.ancestors.last() {
            Some(Ancestor::Property { key }) => Some(key.as_str()),
            _ => None,
        }
    }

    pub fn has_ancestor(&self, pred: impl Fn(&Ancestor) -> bool) -> bool {
        self.ancestors.iter().any(pred)
    }
}

/// Whether a binding name looks like a React component or a page.
pub fn is_component_name(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_uppercase()) || name.contains("Page")
}

#[cfg(test)]
mod tests {
    use super::*;
    use swc_common::DUMMY_SP;

    fn candidate(ancestors: Vec<Ancestor>) -> Candidate {
        Candidate {
            node: TextNode {
                kind: TextNodeKind::StringLiteral,
                value: "Hello".to_string(),
                line: 1,
                span: DUMMY_SP,
            },
            ancestors,
            component: None,
        }
    }

    #[test]
    fn test_attribute_name_stops_at_element() {
        let in_attr = candidate(vec![
            Ancestor::Element {
                name: "input".to_string(),
            },
            Ancestor::Attribute {
                name: "placeholder".to_string(),
            },
        ]);
        assert_eq!(in_attr.attribute_name(), Some("placeholder"));

        let element_in_attr = candidate(vec![
            Ancestor::Attribute {
                name: "icon".to_string(),
            },
            Ancestor::Element {
                name: "span".to_string(),
            },
        ]);
        assert_eq!(element_in_attr.attribute_name(), None);
        assert_eq!(element_in_attr.enclosing_element(), Some("span"));
    }

    #[test]
    fn test_direct_property() {
        let direct = candidate(vec![
            Ancestor::Array,
            Ancestor::Property {
                key: "title".to_string(),
            },
        ]);
        assert_eq!(direct.direct_property(), Some("title"));

        let nested = candidate(vec![
            Ancestor::Property {
                key: "title".to_string(),
            },
            Ancestor::Call {
                callee: "format".to_string(),
            },
        ]);
        assert_eq!(nested.direct_property(), None);
    }

    #[test]
    fn test_is_component_name() {
        assert!(is_component_name("Hero"));
        assert!(is_component_name("aboutPage"));
        assert!(!is_component_name("renderItem"));
    }
}
