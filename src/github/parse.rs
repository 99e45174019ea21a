//! # Parse Combinators
//!
//! A parser for `A` is any `Fn(&Value) -> Option<A>`. `None` is the only
//! failure signal: parsers never panic and never say *why* a node was
//! rejected.
//!
//! ```text
//! Value ──object()──► &Map ──string("login")──► String ─┐
//!                          ──url("html_url")──► Url    ─┼─► Some(Entity)
//!                          ──User::parse(...)─► User   ─┘
//!                   any step None  ─────────────────────► None
//! ```
//!
//! Entity parsers are written as a chain of `?` over these helpers, which
//! gives all-or-nothing semantics for free.

use reqwest::Url;
use serde_json::{Map, Value};

/// A shareable, type-erased parser.
pub type Parser<A> = std::sync::Arc<dyn Fn(&Value) -> Option<A> + Send + Sync>;

/// Demands that the node is a JSON object.
pub fn object(node: &Value) -> Option<&Map<String, Value>> {
    node.as_object()
}

/// Demands that `key` is present and holds a JSON string.
pub fn string(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)?.as_str().map(str::to_string)
}

/// Demands that `key` is present and holds a string that parses as an absolute URL.
pub fn url(obj: &Map<String, Value>, key: &str) -> Option<Url> {
    obj.get(key)?.as_str().and_then(|s| Url::parse(s).ok())
}

/// Lifts an element parser to a parser for a JSON array of such elements.
///
/// Strict and atomic: a non-array node, or any single failing element,
/// rejects the whole array. Order and length are preserved otherwise.
pub fn array<A, F>(element: F) -> impl Fn(&Value) -> Option<Vec<A>> + Send + Sync
where
    F: Fn(&Value) -> Option<A> + Send + Sync,
{
    move |node: &Value| node.as_array()?.iter().map(&element).collect()
}
