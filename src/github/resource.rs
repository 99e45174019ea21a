//! # Resource Descriptors
//!
//! A `Resource<A>` says *what* to fetch and *how to read it*, never *how to
//! send it*. Building one performs no I/O, so descriptors can be created,
//! cloned, and inspected freely; only `GithubClient` turns one into a request.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use reqwest::Method;
use serde_json::Value;

use super::parse::Parser;

/// Unencoded path segments. Percent-encoding happens when the client
/// appends them to its base URL, so a segment can never introduce `/`,
/// `?` or `#` into the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePath {
    segments: Vec<String>,
}

impl ResourcePath {
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

/// Splits on `/`, dropping empty segments: `"/user/orgs"` is `["user", "orgs"]`.
impl From<&str> for ResourcePath {
    fn from(path: &str) -> Self {
        Self::from_segments(path.split('/').filter(|s| !s.is_empty()))
    }
}

impl From<String> for ResourcePath {
    fn from(path: String) -> Self {
        Self::from(path.as_str())
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

/// HTTP method + path + query + response parser.
pub struct Resource<A> {
    method: Method,
    path: ResourcePath,
    query: BTreeMap<String, String>,
    parser: Parser<A>,
}

/// Builds a resource whose body is JSON, read by `parser`.
pub fn json_resource<A, F>(
    path: impl Into<ResourcePath>,
    method: Method,
    query: BTreeMap<String, String>,
    parser: F,
) -> Resource<A>
where
    F: Fn(&Value) -> Option<A> + Send + Sync + 'static,
{
    Resource {
        method,
        path: path.into(),
        query,
        parser: Arc::new(parser),
    }
}

impl<A> Resource<A> {
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Path relative to the client's base URL, for display and logs.
    pub fn path(&self) -> String {
        self.path.to_string()
    }

    pub fn segments(&self) -> &[String] {
        self.path.segments()
    }

    pub fn query(&self) -> &BTreeMap<String, String> {
        &self.query
    }

    /// Runs the response parser on an already-decoded JSON body.
    pub fn parse(&self, body: &Value) -> Option<A> {
        (self.parser)(body)
    }
}

// Manual impl: deriving would demand `A: Clone`, but only the parser handle is cloned.
impl<A> Clone for Resource<A> {
    fn clone(&self) -> Self {
        Self {
            method: self.method.clone(),
            path: self.path.clone(),
            query: self.query.clone(),
            parser: Arc::clone(&self.parser),
        }
    }
}

impl<A> fmt::Debug for Resource<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("method", &self.method)
            .field("path", &self.path.to_string())
            .field("query", &self.query)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::parse::array;
    use serde_json::json;

    fn numbers() -> Resource<Vec<u64>> {
        let query = BTreeMap::from([("state".to_string(), "all".to_string())]);
        json_resource("/numbers", Method::GET, query, array(Value::as_u64))
    }

    #[test]
    fn test_json_resource_keeps_request_parts() {
        let resource = numbers();
        assert_eq!(resource.method(), &Method::GET);
        assert_eq!(resource.path(), "/numbers");
        assert_eq!(resource.query().get("state").map(String::as_str), Some("all"));
    }

    #[test]
    fn test_path_from_text_drops_empty_segments() {
        let path = ResourcePath::from("/user//orgs/");
        assert_eq!(path.segments(), ["user", "orgs"]);
        assert_eq!(path.to_string(), "/user/orgs");
    }

    #[test]
    fn test_path_segments_are_kept_verbatim() {
        let path = ResourcePath::from_segments(["users", "a/b?c#d", "repos"]);
        assert_eq!(path.segments().len(), 3);
        assert_eq!(path.segments()[1], "a/b?c#d");
    }

    #[test]
    fn test_parse_delegates_to_parser() {
        let resource = numbers();
        assert_eq!(resource.parse(&json!([1, 2, 3])), Some(vec![1, 2, 3]));
        assert_eq!(resource.parse(&json!([1, "two"])), None);
    }

    #[test]
    fn test_clone_shares_parser() {
        let resource = numbers();
        let cloned = resource.clone();
        assert_eq!(cloned.path(), resource.path());
        assert_eq!(cloned.parse(&json!([7])), resource.parse(&json!([7])));
    }

    #[test]
    fn test_debug_omits_parser() {
        let rendered = format!("{:?}", numbers());
        assert!(rendered.contains("/numbers"));
        assert!(rendered.contains(".."));
    }
}
