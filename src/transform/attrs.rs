//! Attribute merging for annotated links.
//!
//! Only `target` is forced. `aria-label` is filled in when missing and `rel`
//! is extended, never reduced.

use rustc_hash::FxHashSet;

use crate::config::Options;
use crate::core::LinkClass;
use crate::hast::{Element, PropValue};

pub const TARGET_BLANK: &str = "_blank";

/// Apply the new-tab directive, label and relationship tokens.
///
/// Does nothing unless the link qualifies for annotation.
pub fn merge_attrs(elem: &mut Element, class: LinkClass, options: &Options) {
    if !class.should_annotate {
        return;
    }

    elem.set_attr("target", TARGET_BLANK);

    if let Some(label) = options.aria_label.text()
        && !has_aria_label(elem)
    {
        elem.set_attr("aria-label", label);
    }

    if class.is_external() {
        merge_rel(elem, &options.rel);
    }
}

/// A label counts only if it holds a truthy value.
fn has_aria_label(elem: &Element) -> bool {
    elem.get_attr("aria-label").is_some_and(PropValue::is_truthy)
}

/// Union the existing `rel` tokens with `rel`, keeping first occurrences.
///
/// Existing tokens come first in their original order. The result is always
/// written back as a token list.
pub fn merge_rel(elem: &mut Element, rel: &[String]) {
    let existing: Vec<String> = elem
        .get_attr("rel")
        .map(|value| value.tokens().map(str::to_owned).collect())
        .unwrap_or_default();

    let mut seen = FxHashSet::default();
    let tokens: Vec<String> = existing
        .into_iter()
        .chain(rel.iter().cloned())
        .filter(|token| seen.insert(token.clone()))
        .collect();

    elem.set_attr("rel", tokens);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(href: &str) -> Element {
        Element::new("a").with_attr("href", href)
    }

    fn annotate(elem: &mut Element, options: &Options) {
        let class = LinkClass::classify(elem.get_str("href").unwrap_or_default(), options);
        merge_attrs(elem, class, options);
    }

    fn rel_of(elem: &Element) -> Vec<&str> {
        elem.get_attr("rel").map(|v| v.tokens().collect()).unwrap_or_default()
    }

    #[test]
    fn test_external_link_defaults() {
        let mut elem = link("https://google.com");
        annotate(&mut elem, &Options::default());

        assert_eq!(elem.get_str("target"), Some("_blank"));
        assert_eq!(elem.get_str("aria-label"), Some("Opens in a new tab"));
        assert_eq!(rel_of(&elem), ["noopener", "noreferrer"]);
    }

    #[test]
    fn test_target_is_overwritten() {
        let mut elem = link("https://google.com").with_attr("target", "_self");
        annotate(&mut elem, &Options::default());
        assert_eq!(elem.get_str("target"), Some("_blank"));
    }

    #[test]
    fn test_existing_aria_label_kept() {
        let mut elem = link("https://google.com").with_attr("aria-label", "Search");
        annotate(&mut elem, &Options::default());
        assert_eq!(elem.get_str("aria-label"), Some("Search"));
    }

    #[test]
    fn test_empty_aria_label_replaced() {
        let mut elem = link("https://google.com").with_attr("aria-label", "");
        annotate(&mut elem, &Options::default());
        assert_eq!(elem.get_str("aria-label"), Some("Opens in a new tab"));
    }

    #[test]
    fn test_aria_label_disabled() {
        let mut elem = link("https://google.com");
        annotate(&mut elem, &Options::default().with_aria_label(false));
        assert!(!elem.has_attr("aria-label"));
        assert_eq!(elem.get_str("target"), Some("_blank"));
    }

    #[test]
    fn test_rel_string_is_merged() {
        let mut elem = link("https://google.com").with_attr("rel", "nofollow  noopener");
        annotate(&mut elem, &Options::default());
        assert_eq!(rel_of(&elem), ["nofollow", "noopener", "noreferrer"]);
    }

    #[test]
    fn test_rel_list_is_merged() {
        let mut elem = link("https://google.com").with_attr(
            "rel",
            PropValue::List(vec![
                PropValue::from("external"),
                PropValue::Bool(true),
                PropValue::from("noreferrer"),
            ]),
        );
        annotate(&mut elem, &Options::default());
        assert_eq!(rel_of(&elem), ["external", "noreferrer", "noopener"]);
    }

    #[test]
    fn test_rel_merge_is_idempotent() {
        let mut elem = link("https://google.com");
        let options = Options::default();
        annotate(&mut elem, &options);
        let once = elem.clone();
        annotate(&mut elem, &options);
        assert_eq!(elem, once);
    }

    #[test]
    fn test_internal_link_gets_no_rel() {
        let mut elem = link("https://test.com/about");
        annotate(&mut elem, &Options::default().with_internal_domains(["test.com"]));
        assert_eq!(elem.get_str("target"), Some("_blank"));
        assert_eq!(elem.get_str("aria-label"), Some("Opens in a new tab"));
        assert!(!elem.has_attr("rel"));
    }

    #[test]
    fn test_internal_link_untouched_without_target() {
        let options = Options::default()
            .with_internal_domains(["test.com"])
            .with_add_target_to_internal(false);
        let mut elem = link("https://test.com/about");
        annotate(&mut elem, &options);
        assert_eq!(elem, link("https://test.com/about"));
    }

    #[test]
    fn test_relative_link_untouched() {
        let mut elem = link("/contact");
        annotate(&mut elem, &Options::default());
        assert_eq!(elem, link("/contact"));
    }
}
