//! Link classification.
//!
//! A destination is first checked syntactically (is it an absolute web
//! link?), then, only if it is, parsed as a URL to decide whether its host
//! belongs to one of the internal domains.

use std::sync::OnceLock;

use url::Url;

use crate::config::Options;

/// Classification of a link destination against the configured domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinkClass {
    /// Absolute web link (`<protocol>://` or protocol-relative `//`).
    pub is_http_link: bool,
    /// Host is an internal domain or one of its subdomains.
    pub is_internal: bool,
    /// Link receives the new-tab directive, label and icon.
    pub should_annotate: bool,
}

impl LinkClass {
    /// Classify `href` with the given options.
    pub fn classify(href: &str, options: &Options) -> Self {
        let (is_http_link, is_internal) =
            classify(href, &options.internal_domains, &options.protocols);
        Self {
            is_http_link,
            is_internal,
            should_annotate: is_http_link && (!is_internal || options.add_target_to_internal),
        }
    }

    /// External links get relationship tokens merged in.
    #[inline]
    pub const fn is_external(self) -> bool {
        self.is_http_link && !self.is_internal
    }
}

/// Returns `(is_http_link, is_internal)`.
///
/// Non-web links are never internal.
pub fn classify(href: &str, domains: &[String], protocols: &[String]) -> (bool, bool) {
    if !is_http_link(href, protocols) {
        return (false, false);
    }
    (true, is_internal_link(href, domains))
}

/// Check for `<protocol>://` or a protocol-relative `//` prefix.
///
/// The scheme comparison is exact (case-sensitive).
pub fn is_http_link(href: &str, protocols: &[String]) -> bool {
    href.starts_with("//")
        || protocols.iter().any(|protocol| {
            href.strip_prefix(protocol.as_str())
                .is_some_and(|rest| rest.starts_with("://"))
        })
}

/// Check whether the host of `href` matches an internal domain.
///
/// Unparseable URLs are external.
pub fn is_internal_link(href: &str, domains: &[String]) -> bool {
    if domains.is_empty() {
        return false;
    }

    let Ok(url) = base_url().join(href) else {
        return false;
    };
    let Some(host) = url.host_str() else {
        return false;
    };

    domains.iter().any(|domain| host_matches(host, domain))
}

/// Exact host match or subdomain match (`docs.example.com` for `example.com`).
#[inline]
fn host_matches(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

/// Fixed base so protocol-relative links resolve to a host.
fn base_url() -> &'static Url {
    static BASE: OnceLock<Url> = OnceLock::new();
    BASE.get_or_init(|| Url::parse("http://internal.base").unwrap())
}
