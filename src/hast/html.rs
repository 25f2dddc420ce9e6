//! HTML serialization.
//!
//! Renders a tree back to markup:
//! - attribute values are double-quoted and escaped
//! - token lists are space-joined, `className` renders as `class`
//! - `true` booleans render as bare attributes, `false` and `null` are dropped
//! - void elements get no closing tag
//! - `script`/`style` text and `raw` nodes are written verbatim

use std::borrow::Cow;

use super::{Element, Node, PropValue};

/// Render `node` to an HTML string.
pub fn to_html(node: &Node) -> String {
    let mut out = String::new();
    write_node(&mut out, node, false);
    out
}

fn write_node(out: &mut String, node: &Node, raw_text: bool) {
    match node {
        Node::Root(root) => {
            for child in &root.children {
                write_node(out, child, false);
            }
        }
        Node::Element(elem) => write_element(out, elem),
        Node::Text(text) if raw_text => out.push_str(&text.value),
        Node::Text(text) => out.push_str(&escape_text(&text.value)),
        Node::Comment(comment) => {
            out.push_str("<!--");
            out.push_str(&comment.value);
            out.push_str("-->");
        }
        Node::Doctype(_) => out.push_str("<!doctype html>"),
        Node::Raw(raw) => out.push_str(&raw.value),
    }
}

fn write_element(out: &mut String, elem: &Element) {
    out.push('<');
    out.push_str(&elem.tag_name);
    for (name, value) in &elem.properties {
        write_attr(out, name, value);
    }
    out.push('>');

    if is_void_element(&elem.tag_name) {
        return;
    }

    let raw_text = is_raw_text_element(&elem.tag_name);
    for child in &elem.children {
        write_node(out, child, raw_text);
    }

    out.push_str("</");
    out.push_str(&elem.tag_name);
    out.push('>');
}

fn write_attr(out: &mut String, name: &str, value: &PropValue) {
    let name = if name == "className" { "class" } else { name };

    let rendered = match value {
        PropValue::Null | PropValue::Bool(false) => return,
        PropValue::Bool(true) => {
            out.push(' ');
            out.push_str(name);
            return;
        }
        PropValue::Number(n) => n.to_string(),
        PropValue::String(s) => s.clone(),
        PropValue::List(items) => items
            .iter()
            .filter_map(scalar_text)
            .collect::<Vec<_>>()
            .join(" "),
    };

    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_attr(&rendered));
    out.push('"');
}

/// Text of a list item; nested lists and `false` have none.
fn scalar_text(value: &PropValue) -> Option<String> {
    match value {
        PropValue::String(s) => Some(s.clone()),
        PropValue::Number(n) => Some(n.to_string()),
        PropValue::Bool(true) => Some("true".to_owned()),
        PropValue::Null | PropValue::Bool(false) | PropValue::List(_) => None,
    }
}

// =============================================================================
// Escaping
// =============================================================================

/// Escape text content (`&`, `<`, `>`).
pub fn escape_text(s: &str) -> Cow<'_, str> {
    escape_with(s, &['&', '<', '>'])
}

/// Escape a double-quoted attribute value (`&`, `"`).
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    escape_with(s, &['&', '"'])
}

fn escape_with<'a>(s: &'a str, chars: &[char]) -> Cow<'a, str> {
    if !s.contains(chars) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' if chars.contains(&'<') => result.push_str("&lt;"),
            '>' if chars.contains(&'>') => result.push_str("&gt;"),
            '"' if chars.contains(&'"') => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}

// =============================================================================
// Element Classification
// =============================================================================

/// Elements that never have a closing tag.
#[inline]
pub fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Elements whose text content is not escaped.
#[inline]
pub fn is_raw_text_element(tag: &str) -> bool {
    matches!(tag, "script" | "style")
}
