//! GitHub domain model.
//!
//! Every type here is only ever built by its `parse` function, which either
//! returns a complete value or `None`. Nothing is mutated after parsing.

use std::fmt;

use reqwest::Url;
use serde_json::Value;

use super::parse::{object, string, url};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub login: String,
    pub avatar_url: Option<Url>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub name: String,
    pub owner: User,
    /// Present but possibly empty. A JSON `null` rejects the repository.
    pub description: String,
    pub url: Url,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    pub login: String,
    pub repos_url: Url,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Milestone {
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueState {
    Open,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub state: IssueState,
    pub title: String,
    pub body: Option<String>,
    pub assignee: Option<User>,
    pub creator: User,
    pub milestone: Option<Milestone>,
}

impl User {
    pub fn parse(node: &Value) -> Option<User> {
        let obj = object(node)?;
        let login = string(obj, "login").filter(|login| !login.is_empty())?;
        // Optional: a missing, null, or malformed avatar is just absent.
        let avatar_url = url(obj, "avatar_url");
        Some(User { login, avatar_url })
    }
}

impl Repository {
    pub fn parse(node: &Value) -> Option<Repository> {
        let obj = object(node)?;
        Some(Repository {
            name: string(obj, "name")?,
            owner: User::parse(obj.get("owner")?)?,
            description: string(obj, "description")?,
            url: url(obj, "html_url")?,
        })
    }

    /// `owner/name`, as GitHub displays it.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner.login, self.name)
    }
}

impl Organization {
    pub fn parse(node: &Value) -> Option<Organization> {
        let obj = object(node)?;
        Some(Organization {
            login: string(obj, "login")?,
            repos_url: url(obj, "repos_url")?,
        })
    }
}

impl Milestone {
    pub fn parse(node: &Value) -> Option<Milestone> {
        let obj = object(node)?;
        Some(Milestone {
            title: string(obj, "title")?,
        })
    }
}

impl IssueState {
    /// Exact, case-sensitive match on GitHub's raw values.
    pub fn parse(raw: &str) -> Option<IssueState> {
        match raw {
            "open" => Some(IssueState::Open),
            "closed" => Some(IssueState::Closed),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IssueState::Open => "open",
            IssueState::Closed => "closed",
        }
    }
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Issue {
    pub fn parse(node: &Value) -> Option<Issue> {
        let obj = object(node)?;
        let title = string(obj, "title")?;
        let state = IssueState::parse(obj.get("state")?.as_str()?)?;
        let creator = User::parse(obj.get("user")?)?;

        // Optional fields never fail the issue.
        let assignee = obj.get("assignee").and_then(User::parse);
        let body = string(obj, "body");
        let milestone = obj.get("milestone").and_then(Milestone::parse);

        Some(Issue {
            state,
            title,
            body,
            assignee,
            creator,
            milestone,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::parse::array;
    use serde_json::json;

    fn user_json() -> Value {
        json!({"login": "octocat", "avatar_url": "https://x/a.png"})
    }

    fn repository_json() -> Value {
        json!({
            "name": "hello-world",
            "owner": user_json(),
            "description": "",
            "html_url": "https://github.com/octocat/hello-world",
        })
    }

    fn issue_json(title: &str) -> Value {
        json!({
            "title": title,
            "state": "open",
            "user": {"login": "hubot"},
            "assignee": user_json(),
            "body": "It broke.",
            "milestone": {"title": "v1.0"},
        })
    }

    /// Removes each listed key in turn and asserts the parser rejects the result.
    fn assert_each_field_required<A: fmt::Debug>(
        full: &Value,
        keys: &[&str],
        parse: impl Fn(&Value) -> Option<A>,
    ) {
        assert!(parse(full).is_some(), "fixture must parse");
        for key in keys {
            let mut node = full.clone();
            node.as_object_mut().unwrap().remove(*key);
            assert!(parse(&node).is_none(), "parsed without required field `{key}`");
        }
    }

    #[test]
    fn test_user_parses_login_and_avatar() {
        let user = User::parse(&user_json()).unwrap();
        assert_eq!(user.login, "octocat");
        assert_eq!(
            user.avatar_url.as_ref().map(Url::as_str),
            Some("https://x/a.png")
        );
    }

    #[test]
    fn test_user_avatar_is_optional() {
        let user = User::parse(&json!({"login": "octocat"})).unwrap();
        assert_eq!(user.avatar_url, None);

        let user = User::parse(&json!({"login": "octocat", "avatar_url": null})).unwrap();
        assert_eq!(user.avatar_url, None);
    }

    #[test]
    fn test_user_rejects_empty_or_missing_login() {
        assert!(User::parse(&json!({"login": ""})).is_none());
        assert!(User::parse(&json!({"avatar_url": "https://x/a.png"})).is_none());
        assert!(User::parse(&json!({"login": 42})).is_none());
        assert!(User::parse(&json!("octocat")).is_none());
    }

    #[test]
    fn test_repository_required_fields() {
        assert_each_field_required(
            &repository_json(),
            &["name", "owner", "description", "html_url"],
            Repository::parse,
        );
    }

    #[test]
    fn test_repository_allows_empty_but_not_null_description() {
        let repo = Repository::parse(&repository_json()).unwrap();
        assert_eq!(repo.description, "");
        assert_eq!(repo.full_name(), "octocat/hello-world");

        let mut node = repository_json();
        node["description"] = Value::Null;
        assert!(Repository::parse(&node).is_none());
    }

    #[test]
    fn test_repository_rejects_invalid_owner() {
        let mut node = repository_json();
        node["owner"] = json!({"login": ""});
        assert!(Repository::parse(&node).is_none());
    }

    #[test]
    fn test_organization_required_fields() {
        let node = json!({
            "login": "rust-lang",
            "repos_url": "https://api.github.com/orgs/rust-lang/repos",
        });
        assert_each_field_required(&node, &["login", "repos_url"], Organization::parse);
    }

    #[test]
    fn test_milestone_requires_title() {
        assert_eq!(
            Milestone::parse(&json!({"title": "v1.0"})),
            Some(Milestone { title: "v1.0".to_string() })
        );
        assert!(Milestone::parse(&json!({})).is_none());
    }

    #[test]
    fn test_issue_state_boundary() {
        assert_eq!(IssueState::parse("open"), Some(IssueState::Open));
        assert_eq!(IssueState::parse("closed"), Some(IssueState::Closed));
        for raw in ["OPEN", "Closed", "re-opened", "", " open"] {
            assert_eq!(IssueState::parse(raw), None, "accepted {raw:?}");
        }
    }

    #[test]
    fn test_issue_with_unknown_state_is_rejected() {
        let mut node = issue_json("Crash");
        node["state"] = json!("re-opened");
        assert!(Issue::parse(&node).is_none());
    }

    #[test]
    fn test_issue_required_fields() {
        assert_each_field_required(&issue_json("Crash"), &["title", "state", "user"], Issue::parse);
    }

    #[test]
    fn test_issue_closed_without_assignee_with_milestone() {
        let node = json!({
            "title": "Crash on start",
            "state": "closed",
            "user": {"login": "hubot"},
            "milestone": {"title": "v2.0"},
        });
        let issue = Issue::parse(&node).unwrap();
        assert_eq!(issue.state, IssueState::Closed);
        assert_eq!(issue.assignee, None);
        assert_eq!(issue.body, None);
        assert_eq!(issue.milestone.map(|m| m.title).as_deref(), Some("v2.0"));
        assert_eq!(issue.creator.login, "hubot");
    }

    #[test]
    fn test_issue_invalid_optionals_are_absent_not_fatal() {
        let mut node = issue_json("Crash");
        node["assignee"] = Value::Null;
        node["milestone"] = json!({"due_on": null});
        node["body"] = json!(17);
        let issue = Issue::parse(&node).unwrap();
        assert_eq!(issue.assignee, None);
        assert_eq!(issue.milestone, None);
        assert_eq!(issue.body, None);
    }

    #[test]
    fn test_issue_array_fails_when_one_issue_is_invalid() {
        let mut second = issue_json("second");
        second.as_object_mut().unwrap().remove("title");
        let node = json!([issue_json("first"), second, issue_json("third")]);
        assert_eq!(array(Issue::parse)(&node), None);
    }

    #[test]
    fn test_issue_array_preserves_order() {
        let node = json!([issue_json("first"), issue_json("second"), issue_json("third")]);
        let titles: Vec<String> = array(Issue::parse)(&node)
            .unwrap()
            .into_iter()
            .map(|issue| issue.title)
            .collect();
        assert_eq!(titles, ["first", "second", "third"]);
    }

    #[test]
    fn test_parsing_is_idempotent() {
        let node = issue_json("Crash");
        assert_eq!(Issue::parse(&node), Issue::parse(&node));
        assert_eq!(Repository::parse(&repository_json()), Repository::parse(&repository_json()));
    }
}
