//! External-link transform.
//!
//! Annotates `<a href>` elements that point at absolute web links:
//!
//! | Link | `target` | `aria-label` | `rel` | icon |
//! |------|----------|--------------|-------|------|
//! | external | `_blank` | if missing | merged | class marker |
//! | internal, `add_target_to_internal` | `_blank` | if missing | - | attribute marker |
//! | internal, otherwise | - | - | - | - |
//! | relative, fragment, `mailto:` ... | - | - | - | - |
//!
//! # Modules
//!
//! - `attrs`: `target`/`aria-label`/`rel` merging
//! - `icon`: icon normalization, duplicate detection and injection

pub mod attrs;
pub mod icon;

use crate::config::Options;
use crate::core::LinkClass;
use crate::debug;
use crate::hast::{Element, Node, Walk, walk_elements_mut};

pub use attrs::{TARGET_BLANK, merge_attrs, merge_rel};
pub use icon::{ICON_MARKER, has_icon, icon_element, inject_icon, is_icon, normalize_icon};

/// Link annotation transform.
///
/// Built once from [`Options`]; the icon is normalized at construction and
/// copied into every link it is injected into. The transform holds no
/// per-document state, so one instance can process many trees, also from
/// several threads at once.
#[derive(Debug, Clone)]
pub struct ExternalLinks {
    options: Options,
    icon: Option<Vec<Node>>,
}

impl Default for ExternalLinks {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl ExternalLinks {
    pub fn new(options: Options) -> Self {
        let icon = normalize_icon(&options.icon);
        Self { options, icon }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Annotate every qualifying link in `tree`, in place.
    ///
    /// Icon wrappers are not descended into, so links inside icon content
    /// stay as given.
    pub fn transform(&self, tree: &mut Node) {
        walk_elements_mut(tree, |elem| {
            if is_icon(elem) {
                return Walk::Skip;
            }
            self.visit(elem);
            Walk::Continue
        });
    }

    /// Process a single element; anything but `<a>` with a string `href` is skipped.
    pub fn visit(&self, elem: &mut Element) {
        if !elem.is_tag("a") {
            return;
        }
        let Some(href) = elem.get_str("href") else {
            return;
        };

        let class = LinkClass::classify(href, &self.options);
        if !class.should_annotate {
            return;
        }
        debug!("link"; "{} ({})", href, if class.is_internal { "internal" } else { "external" });

        merge_attrs(elem, class, &self.options);

        if let Some(content) = &self.icon {
            inject_icon(elem, content, &self.options.icon_properties, class.is_internal);
        }
    }
}

/// Build the per-document transform function from options.
pub fn external_links(options: Options) -> impl Fn(&mut Node) + Send + Sync {
    let transform = ExternalLinks::new(options);
    move |tree: &mut Node| transform.transform(tree)
}

// =============================================================================
// Tests
// =============================================================================
