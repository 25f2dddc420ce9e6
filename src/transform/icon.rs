//! Icon normalization and injection.
//!
//! External icons carry the `external-link-icon` class. Internal icons drop
//! the class and carry `data-rehype-icon="true"` instead. Either marker on an
//! existing child element stops a second injection.

use crate::config::{DEFAULT_ICON, ICON_CLASS, IconOption};
use crate::hast::{CLASS_KEYS, Element, Meta, Node, PropValue, Properties};

/// Marker attribute of injected internal-link icons.
pub const ICON_MARKER: &str = "data-rehype-icon";

/// Tag of the injected icon wrapper.
pub const ICON_TAG: &str = "span";

/// Resolve the icon option into injectable content, or `None` if disabled.
///
/// Caller-built nodes pass through unchanged.
pub fn normalize_icon(icon: &IconOption) -> Option<Vec<Node>> {
    match icon {
        IconOption::Toggle(false) => None,
        IconOption::Toggle(true) => Some(vec![Node::text(DEFAULT_ICON)]),
        IconOption::Text(text) => Some(vec![Node::text(text.as_str())]),
        IconOption::Node(node) => Some(vec![node.clone()]),
        IconOption::Nodes(nodes) => Some(nodes.clone()),
    }
}

/// Check whether `elem` already has an injected icon child.
pub fn has_icon(elem: &Element) -> bool {
    elem.child_elements().any(is_icon)
}

/// Check whether `elem` is an icon wrapper, by class or marker.
pub fn is_icon(child: &Element) -> bool {
    child.has_class(ICON_CLASS)
        || matches!(
            child.get_attr(ICON_MARKER),
            Some(PropValue::Bool(true))
        )
        || child.get_str(ICON_MARKER) == Some("true")
}

/// Build a fresh icon wrapper from copies of `content` and `properties`.
pub fn icon_element(content: &[Node], properties: &Properties, is_internal: bool) -> Element {
    let mut icon = Element {
        tag_name: ICON_TAG.to_owned(),
        properties: properties.clone(),
        children: content.to_vec(),
        meta: Meta::default(),
    };

    if is_internal {
        for key in CLASS_KEYS {
            icon.remove_attr(key);
        }
        icon.set_attr(ICON_MARKER, "true");
    }

    icon
}

/// Append an icon to `elem` unless one is already present.
///
/// Returns whether an icon was appended.
pub fn inject_icon(
    elem: &mut Element,
    content: &[Node],
    properties: &Properties,
    is_internal: bool,
) -> bool {
    if has_icon(elem) {
        return false;
    }
    elem.push(icon_element(content, properties, is_internal));
    true
}
