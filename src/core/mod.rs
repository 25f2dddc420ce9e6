//! Core types - pure abstractions shared across the codebase.

mod link;

pub use link::{LinkClass, classify, is_http_link, is_internal_link};
