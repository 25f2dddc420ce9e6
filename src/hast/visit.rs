//! Tree traversal.
//!
//! Elements are visited in document pre-order. The callback sees an element
//! before its children. Children the callback appends are not visited.

use super::{Element, Node};

/// What to do after visiting an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    /// Descend into the element's children.
    Continue,
    /// Leave the element's subtree alone.
    Skip,
}

/// Call `f` on every element under `node` (including `node` itself).
pub fn visit_elements_mut<F>(node: &mut Node, mut f: F)
where
    F: FnMut(&mut Element),
{
    walk_mut(node, &mut |elem: &mut Element| {
        f(elem);
        Walk::Continue
    });
}

/// Like [`visit_elements_mut`], but `f` decides whether to descend.
pub fn walk_elements_mut<F>(node: &mut Node, mut f: F)
where
    F: FnMut(&mut Element) -> Walk,
{
    walk_mut(node, &mut f);
}

fn walk_mut<F>(node: &mut Node, f: &mut F)
where
    F: FnMut(&mut Element) -> Walk,
{
    match node {
        Node::Root(root) => {
            for child in &mut root.children {
                walk_mut(child, f);
            }
        }
        Node::Element(elem) => {
            let len = elem.children.len();
            if f(elem) == Walk::Skip {
                return;
            }
            for child in elem.children.iter_mut().take(len) {
                walk_mut(child, f);
            }
        }
        _ => {}
    }
}

/// Collect every element under `node` in pre-order.
pub fn elements(node: &Node) -> Vec<&Element> {
    let mut out = Vec::new();
    collect(node, &mut out);
    out
}

fn collect<'a>(node: &'a Node, out: &mut Vec<&'a Element>) {
    if let Node::Element(elem) = node {
        out.push(elem);
    }
    for child in node.children() {
        collect(child, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node::root(vec![
            Element::new("p")
                .with_child(Element::new("a").with_child(Node::text("one")))
                .with_child(Node::text(" and "))
                .with_child(Element::new("a"))
                .into(),
            Node::element("div"),
        ])
    }

    #[test]
    fn test_visit_order() {
        let mut tree = sample();
        let mut seen = Vec::new();
        visit_elements_mut(&mut tree, |elem| seen.push(elem.tag_name.clone()));
        assert_eq!(seen, ["p", "a", "a", "div"]);
    }

    #[test]
    fn test_visit_skips_appended_children() {
        let mut tree = sample();
        let mut seen = Vec::new();
        visit_elements_mut(&mut tree, |elem| {
            elem.push(Element::new("span"));
            seen.push(elem.tag_name.clone());
        });
        assert_eq!(seen, ["p", "a", "a", "div"]);
        assert_eq!(elements(&tree).len(), 8);
    }

    #[test]
    fn test_walk_skip_subtree() {
        let mut tree = sample();
        let mut seen = Vec::new();
        walk_elements_mut(&mut tree, |elem| {
            seen.push(elem.tag_name.clone());
            if elem.is_tag("p") {
                Walk::Skip
            } else {
                Walk::Continue
            }
        });
        assert_eq!(seen, ["p", "div"]);
    }

    #[test]
    fn test_elements_collects_all() {
        let tree = sample();
        let tags: Vec<_> = elements(&tree).iter().map(|e| e.tag_name.as_str()).collect();
        assert_eq!(tags, ["p", "a", "a", "div"]);
    }

    #[test]
    fn test_visit_on_bare_element() {
        let mut node: Node = Element::new("a").into();
        let mut count = 0;
        visit_elements_mut(&mut node, |_| count += 1);
        assert_eq!(count, 1);
    }
}
