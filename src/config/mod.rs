//! Transform options and their loading from `autoblank.toml`.
//!
//! # Example
//!
//! ```toml
//! internal_domains = ["example.com"]     # Domains (and subdomains) treated as internal
//! protocols = ["http", "https"]          # Schemes recognized as absolute web links
//! icon = "↗"                             # false | "text" | node | [nodes]
//! add_target_to_internal = true          # Annotate internal links too
//! aria_label = "Opens in a new tab"      # false disables the label
//! rel = ["noopener", "noreferrer"]       # Tokens merged into external links
//!
//! [icon_properties]                      # Attributes of the injected icon span
//! class = ["external-link-icon"]
//! aria-hidden = "true"
//! ```
//!
//! Domains are compared against URL hostnames, which are lower-cased by
//! parsing. Configure domains in lower case.

mod error;

pub use error::ConfigError;

use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::hast::{Node, PropValue, Properties};
use crate::log;

/// Default config file name looked up by the binary.
pub const CONFIG_FILE: &str = "autoblank.toml";

/// Glyph used when no icon is configured.
pub const DEFAULT_ICON: &str = "↗";

pub const DEFAULT_ARIA_LABEL: &str = "Opens in a new tab";

/// Class token marking an injected external-link icon.
pub const ICON_CLASS: &str = "external-link-icon";

// ============================================================================
// Options
// ============================================================================

/// Options for the external-links transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Domains whose links (and subdomains' links) are internal.
    #[serde(alias = "internalDomains")]
    pub internal_domains: Vec<String>,

    /// URL schemes recognized as absolute web links.
    pub protocols: Vec<String>,

    /// Icon appended to annotated links.
    pub icon: IconOption,

    /// Annotate internal links with the new-tab directive and icon.
    #[serde(alias = "addTargetToInternal")]
    pub add_target_to_internal: bool,

    /// Accessibility label for links that have none.
    #[serde(alias = "ariaLabel")]
    pub aria_label: AriaLabel,

    /// Relationship tokens merged into external links.
    pub rel: Vec<String>,

    /// Attributes of the injected icon wrapper.
    #[serde(alias = "iconProperties")]
    pub icon_properties: Properties,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            internal_domains: Vec::new(),
            protocols: vec!["http".to_owned(), "https".to_owned()],
            icon: IconOption::default(),
            add_target_to_internal: true,
            aria_label: AriaLabel::default(),
            rel: vec!["noopener".to_owned(), "noreferrer".to_owned()],
            icon_properties: default_icon_properties(),
        }
    }
}

fn default_icon_properties() -> Properties {
    let mut properties = Properties::new();
    properties.insert("class".to_owned(), PropValue::tokens_of([ICON_CLASS]));
    properties.insert("aria-hidden".to_owned(), PropValue::from("true"));
    properties
}

impl Options {
    pub fn with_internal_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.internal_domains = domains.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_protocols<I, S>(mut self, protocols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.protocols = protocols.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<IconOption>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_add_target_to_internal(mut self, enable: bool) -> Self {
        self.add_target_to_internal = enable;
        self
    }

    pub fn with_aria_label(mut self, label: impl Into<AriaLabel>) -> Self {
        self.aria_label = label.into();
        self
    }

    pub fn with_rel<I, S>(mut self, rel: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rel = rel.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_icon_properties(mut self, properties: Properties) -> Self {
        self.icon_properties = properties;
        self
    }

    /// Load options from a TOML file.
    ///
    /// Unknown keys are reported as warnings and otherwise ignored.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (options, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(options)
    }

    /// Parse options from TOML text, ignoring unknown keys.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(Self::parse_with_ignored(content)?.0)
    }

    /// Parse options from JSON text (camelCase keys accepted).
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let options = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((options, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring: {}", display_path, fields.join(", "));
    }
}

// ============================================================================
// Icon
// ============================================================================

/// Icon setting: disabled, default, text, or caller-built nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IconOption {
    /// `false` disables the icon, `true` selects the default glyph.
    Toggle(bool),
    /// Plain text wrapped in a text node.
    Text(String),
    /// A single node, passed through as-is.
    Node(Node),
    /// Several nodes, passed through as-is.
    Nodes(Vec<Node>),
}

impl Default for IconOption {
    fn default() -> Self {
        Self::Toggle(true)
    }
}

impl From<bool> for IconOption {
    fn from(enable: bool) -> Self {
        Self::Toggle(enable)
    }
}

impl From<&str> for IconOption {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for IconOption {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Node> for IconOption {
    fn from(node: Node) -> Self {
        Self::Node(node)
    }
}

impl From<Vec<Node>> for IconOption {
    fn from(nodes: Vec<Node>) -> Self {
        Self::Nodes(nodes)
    }
}

// ============================================================================
// Aria Label
// ============================================================================

/// Accessibility label setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AriaLabel {
    /// `false` disables the label, `true` selects the default text.
    Toggle(bool),
    Text(String),
}

impl AriaLabel {
    /// Label text to apply, if enabled. An empty string counts as disabled.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Toggle(true) => Some(DEFAULT_ARIA_LABEL),
            Self::Toggle(false) => None,
            Self::Text(text) if text.is_empty() => None,
            Self::Text(text) => Some(text),
        }
    }
}

impl Default for AriaLabel {
    fn default() -> Self {
        Self::Text(DEFAULT_ARIA_LABEL.to_owned())
    }
}

impl From<bool> for AriaLabel {
    fn from(enable: bool) -> Self {
        Self::Toggle(enable)
    }
}

impl From<&str> for AriaLabel {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for AriaLabel {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Option<String>> for AriaLabel {
    fn from(text: Option<String>) -> Self {
        text.map_or(Self::Toggle(false), Self::Text)
    }
}

// ============================================================================
// Tests
// ============================================================================
