//! Minimal HTML syntax tree.
//!
//! The tree is plain data: hosts build it (by hand, from JSON, or from a
//! parser of their choosing) and hand it to a transform that edits it in place.
//!
//! # JSON Shape
//!
//! Nodes serialize in the hast layout used by HTML tooling, so trees produced
//! elsewhere can be fed in directly:
//!
//! ```json
//! {
//!   "type": "element",
//!   "tagName": "a",
//!   "properties": { "href": "https://example.com", "rel": ["nofollow"] },
//!   "children": [{ "type": "text", "value": "Example" }]
//! }
//! ```
//!
//! # Modules
//!
//! - `visit`: pre-order element traversal
//! - `html`: HTML serialization

pub mod html;
pub mod visit;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use html::to_html;
pub use visit::{Walk, elements, visit_elements_mut, walk_elements_mut};

/// Attribute names that carry the class token list.
///
/// `class` is the HTML spelling, `className` the hast one.
pub const CLASS_KEYS: [&str; 2] = ["class", "className"];

/// Element attributes in insertion order.
pub type Properties = IndexMap<String, PropValue>;

// =============================================================================
// Nodes
// =============================================================================

/// A node of the syntax tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Root(Root),
    Element(Element),
    Text(Literal),
    Comment(Literal),
    Doctype(Meta),
    /// Pre-rendered markup, emitted without escaping.
    Raw(Literal),
}

impl Node {
    /// Create a text node.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(Literal::new(value))
    }

    /// Create a root node holding `children`.
    pub fn root(children: Vec<Node>) -> Self {
        Self::Root(Root {
            children,
            meta: Meta::default(),
        })
    }

    /// Create an empty element node.
    pub fn element(tag_name: impl Into<String>) -> Self {
        Self::Element(Element::new(tag_name))
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(elem) => Some(elem),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Self::Element(elem) => Some(elem),
            _ => None,
        }
    }

    /// Child list of a parent node (root or element).
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Root(root) => &root.children,
            Self::Element(elem) => &elem.children,
            _ => &[],
        }
    }
}

impl From<Element> for Node {
    fn from(elem: Element) -> Self {
        Self::Element(elem)
    }
}

/// Source position and host data carried by every node.
///
/// Neither is interpreted here; both are kept so trees pass through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Document root.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Root {
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// Text-like payload shared by text, comment and raw nodes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Literal {
    pub value: String,
    #[serde(flatten)]
    pub meta: Meta,
}

impl Literal {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            meta: Meta::default(),
        }
    }
}

// =============================================================================
// Element
// =============================================================================

/// An element with a tag name, attributes and children.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub tag_name: String,
    #[serde(default)]
    pub properties: Properties,
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(flatten)]
    pub meta: Meta,
}

impl Element {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            properties: Properties::new(),
            children: Vec::new(),
            meta: Meta::default(),
        }
    }

    /// Builder: set an attribute.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder: append a child.
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.push(child);
        self
    }

    #[inline]
    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag_name == tag
    }

    #[inline]
    pub fn get_attr(&self, name: &str) -> Option<&PropValue> {
        self.properties.get(name)
    }

    /// Get an attribute only if it holds a string.
    #[inline]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get_attr(name).and_then(PropValue::as_str)
    }

    #[inline]
    pub fn has_attr(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Set an attribute, replacing any previous value in place.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<PropValue>) {
        self.properties.insert(name.into(), value.into());
    }

    /// Remove an attribute, keeping the order of the others.
    pub fn remove_attr(&mut self, name: &str) -> Option<PropValue> {
        self.properties.shift_remove(name)
    }

    /// Check the class token list for `class`, under either spelling.
    pub fn has_class(&self, class: &str) -> bool {
        CLASS_KEYS.iter().any(|key| {
            self.get_attr(key)
                .is_some_and(|value| value.tokens().any(|token| token == class))
        })
    }

    #[inline]
    pub fn push(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    /// Element children only.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        collect_text(&self.children, &mut text);
        text
    }
}

fn collect_text(children: &[Node], out: &mut String) {
    for child in children {
        match child {
            Node::Text(literal) => out.push_str(&literal.value),
            Node::Element(elem) => collect_text(&elem.children, out),
            _ => {}
        }
    }
}

// =============================================================================
// Property Values
// =============================================================================

/// Loosely structured attribute value.
///
/// Token lists (`class`, `rel`) are lists; everything else is usually a
/// string. Booleans follow HTML boolean-attribute semantics when rendered,
/// and `Null` is never rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    List(Vec<PropValue>),
}

impl PropValue {
    /// Build a token list from strings.
    pub fn tokens_of<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(tokens.into_iter().map(|t| Self::String(t.into())).collect())
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Whether the value counts as set: non-empty strings, non-zero numbers,
    /// `true`, and any list.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
            Self::String(s) => !s.is_empty(),
            Self::List(_) => true,
        }
    }

    /// String tokens of the value.
    ///
    /// Strings split on ASCII whitespace; lists yield their string items.
    /// Other values have no tokens.
    pub fn tokens(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self {
            Self::String(s) => Box::new(s.split_ascii_whitespace()),
            Self::List(items) => Box::new(items.iter().filter_map(Self::as_str)),
            _ => Box::new(std::iter::empty()),
        }
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Vec<String>> for PropValue {
    fn from(tokens: Vec<String>) -> Self {
        Self::tokens_of(tokens)
    }
}

impl From<Vec<&str>> for PropValue {
    fn from(tokens: Vec<&str>) -> Self {
        Self::tokens_of(tokens)
    }
}

// =============================================================================
// Tests
// =============================================================================
