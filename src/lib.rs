//! Autoblank - open external links in a new tab, safely.
//!
//! Classifies `<a href>` elements of an HTML syntax tree as external or
//! internal and annotates them in place with `target="_blank"`, defensive
//! `rel` tokens, an `aria-label` and an icon marker.
//!
//! ```
//! use autoblank::{ExternalLinks, Options, hast::{Element, Node, to_html}};
//!
//! let mut tree = Node::root(vec![
//!     Element::new("a")
//!         .with_attr("href", "https://example.org")
//!         .with_child(Node::text("Example"))
//!         .into(),
//! ]);
//!
//! let options = Options::default().with_internal_domains(["example.com"]);
//! ExternalLinks::new(options).transform(&mut tree);
//!
//! assert!(to_html(&tree).contains(r#"rel="noopener noreferrer""#));
//! ```

pub mod config;
pub mod core;
pub mod hast;
pub mod logger;
pub mod transform;

pub use config::{AriaLabel, ConfigError, IconOption, Options};
pub use crate::core::LinkClass;
pub use transform::{ExternalLinks, external_links};
