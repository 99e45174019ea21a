//! GitHub REST endpoints, as pure `Resource` constructors.

use std::collections::BTreeMap;

use reqwest::Method;

use super::parse::array;
use super::resource::{Resource, ResourcePath, json_resource};
use super::types::{Issue, Organization, Repository};

/// `GET /user/orgs`: organizations of the authenticated user.
pub fn organizations() -> Resource<Vec<Organization>> {
    json_resource("/user/orgs", Method::GET, BTreeMap::new(), array(Organization::parse))
}

/// `GET /users/{user}/repos`, or `GET /user/repos` for the authenticated user.
pub fn repositories(user: Option<&str>) -> Resource<Vec<Repository>> {
    let path = match user {
        Some(login) => ResourcePath::from_segments(["users", login, "repos"]),
        None => ResourcePath::from("/user/repos"),
    };
    json_resource(path, Method::GET, BTreeMap::new(), array(Repository::parse))
}

impl Repository {
    /// `GET /repos/{owner}/{name}/issues`.
    pub fn issues_resource(&self) -> Resource<Vec<Issue>> {
        let path = ResourcePath::from_segments([
            "repos",
            self.owner.login.as_str(),
            self.name.as_str(),
            "issues",
        ]);
        json_resource(path, Method::GET, BTreeMap::new(), array(Issue::parse))
    }
}

impl Organization {
    /// Follows the organization's `repos_url`, keeping only its path. The
    /// client drops any leading segments the path shares with its base URL.
    pub fn repos_resource(&self) -> Resource<Vec<Repository>> {
        json_resource(
            self.repos_url.path(),
            Method::GET,
            BTreeMap::new(),
            array(Repository::parse),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::types::User;
    use reqwest::Url;
    use serde_json::json;

    fn repository(owner: &str, name: &str) -> Repository {
        Repository {
            name: name.to_string(),
            owner: User {
                login: owner.to_string(),
                avatar_url: None,
            },
            description: String::new(),
            url: Url::parse(&format!("https://github.com/{owner}/{name}")).unwrap(),
        }
    }

    #[test]
    fn test_organizations_resource() {
        let resource = organizations();
        assert_eq!(resource.method(), &Method::GET);
        assert_eq!(resource.path(), "/user/orgs");
        assert!(resource.query().is_empty());
    }

    #[test]
    fn test_repositories_for_named_user() {
        let resource = repositories(Some("octocat"));
        assert_eq!(resource.method(), &Method::GET);
        assert_eq!(resource.path(), "/users/octocat/repos");
    }

    #[test]
    fn test_repositories_for_authenticated_user() {
        assert_eq!(repositories(None).path(), "/user/repos");
    }

    #[test]
    fn test_issues_resource_path() {
        let resource = repository("octocat", "repo").issues_resource();
        assert_eq!(resource.method(), &Method::GET);
        assert_eq!(resource.path(), "/repos/octocat/repo/issues");
    }

    #[test]
    fn test_user_supplied_names_stay_single_segments() {
        let resource = repositories(Some("../../orgs/evil"));
        assert_eq!(resource.segments(), ["users", "../../orgs/evil", "repos"]);

        let resource = repository("a/b", "c?d").issues_resource();
        assert_eq!(resource.segments(), ["repos", "a/b", "c?d", "issues"]);
    }

    #[test]
    fn test_org_repos_resource_uses_path_of_stored_url() {
        let org = Organization {
            login: "rust-lang".to_string(),
            repos_url: Url::parse("https://api.github.com/orgs/rust-lang/repos?per_page=5").unwrap(),
        };
        let resource = org.repos_resource();
        assert_eq!(resource.method(), &Method::GET);
        assert_eq!(resource.path(), "/orgs/rust-lang/repos");
    }

    #[test]
    fn test_endpoint_parsers_read_arrays() {
        let body = json!([{
            "login": "rust-lang",
            "repos_url": "https://api.github.com/orgs/rust-lang/repos",
        }]);
        let orgs = organizations().parse(&body).unwrap();
        assert_eq!(orgs.len(), 1);
        assert_eq!(orgs[0].login, "rust-lang");

        assert!(repositories(None).parse(&json!({"message": "Bad credentials"})).is_none());
    }
}
