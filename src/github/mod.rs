pub mod client;
pub mod endpoints;
pub mod parse;
pub mod resource;
pub mod transport;
pub mod types;

pub use client::{GithubClient, TokenAuth};
pub use endpoints::{organizations, repositories};
pub use resource::{Resource, ResourcePath, json_resource};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, RequestError, Transport};
pub use types::{Issue, IssueState, Milestone, Organization, Repository, User};
