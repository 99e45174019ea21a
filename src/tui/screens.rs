//! # App Screens
//!
//! Wires GitHub resources into generic screens:
//!
//! ```text
//! Organizations ──► Repositories ──► Issues ──► Issue detail
//!                   (or start here)
//! ```
//!
//! Every selection callback presents the next screen and sends it to the
//! event loop over `Navigation`; the loop owns the stack.

use std::sync::{Arc, mpsc};

use log::{debug, warn};

use crate::github::{GithubClient, Issue, Organization, Repository, Resource, organizations, repositories};
use crate::tui::cell::{standard_cell, subtitle_cell, value1_cell, value2_cell};
use crate::tui::components::ListController;
use crate::tui::screen::{Completion, Screen, async_table_screen, table_screen};

/// Body lines in the issue detail are wrapped to this width.
const BODY_WRAP_WIDTH: usize = 72;

/// Requests from screens to the event loop.
pub enum Navigation {
    Push(ListController),
}

/// A loader that executes a resource on the tokio runtime and completes
/// with its items. Failed requests never complete, so the list keeps loading.
fn resource_loader<I, A, F>(client: Arc<GithubClient>, resource_for: F) -> impl Fn(I, Completion<A>) + 'static
where
    F: Fn(I) -> Resource<Vec<A>> + 'static,
    A: Send + 'static,
{
    move |input: I, done: Completion<A>| {
        let resource = resource_for(input);
        let client = Arc::clone(&client);
        tokio::spawn(async move {
            match client.request(&resource).await {
                Some(items) => done.complete(items),
                None => debug!("No items for {}; list stays loading", resource.path()),
            }
        });
    }
}

#[derive(Clone)]
pub struct Screens {
    client: Arc<GithubClient>,
    tx: mpsc::Sender<Navigation>,
}

impl Screens {
    pub fn new(client: Arc<GithubClient>, tx: mpsc::Sender<Navigation>) -> Self {
        Self { client, tx }
    }

    fn push(&self, list: ListController) {
        if self.tx.send(Navigation::Push(list)).is_err() {
            warn!("Navigation dropped: event loop is gone");
        }
    }

    /// Organizations of the authenticated user.
    pub fn organizations(&self) -> ListController {
        let screen: Screen<(), Organization> = async_table_screen(
            resource_loader(self.client.clone(), |_: ()| organizations()),
            standard_cell(|org: &Organization| org.login.clone()),
        );
        let next = self.clone();
        let mut list = screen.present((), move |org| next.push(next.organization_repositories(org)));
        list.set_title("Organizations");
        list
    }

    /// Repositories of `user`, or of the authenticated user.
    pub fn repositories(&self, user: Option<String>) -> ListController {
        let title = match &user {
            Some(login) => format!("{login} › Repositories"),
            None => "Repositories".to_string(),
        };
        let screen = repository_screen(resource_loader(self.client.clone(), |user: Option<String>| {
            repositories(user.as_deref())
        }));
        let next = self.clone();
        let mut list = screen.present(user, move |repo| next.push(next.issues(repo)));
        list.set_title(title);
        list
    }

    fn organization_repositories(&self, org: Organization) -> ListController {
        let title = format!("{} › Repositories", org.login);
        let screen = repository_screen(resource_loader(self.client.clone(), |org: Organization| {
            org.repos_resource()
        }));
        let next = self.clone();
        let mut list = screen.present(org, move |repo| next.push(next.issues(repo)));
        list.set_title(title);
        list
    }

    pub fn issues(&self, repo: Repository) -> ListController {
        let title = format!("{} › Issues", repo.full_name());
        let screen: Screen<Repository, Issue> = async_table_screen(
            resource_loader(self.client.clone(), |repo: Repository| repo.issues_resource()),
            value1_cell(|issue: &Issue| (issue.title.clone(), issue.state.to_string())),
        );
        let next = self.clone();
        let mut list = screen.present(repo, move |issue| next.push(issue_detail(issue)));
        list.set_title(title);
        list
    }
}

fn repository_screen<I: 'static>(load: impl Fn(I, Completion<Repository>) + 'static) -> Screen<I, Repository> {
    async_table_screen(
        load,
        subtitle_cell(|repo: &Repository| {
            let description = if repo.description.is_empty() {
                "No description".to_string()
            } else {
                repo.description.clone()
            };
            (repo.name.clone(), description)
        }),
    )
}

/// (label, value) rows describing one issue.
pub fn issue_fields(issue: &Issue) -> Vec<(String, String)> {
    let mut fields = vec![
        ("title".to_string(), issue.title.clone()),
        ("state".to_string(), issue.state.to_string()),
        ("author".to_string(), issue.creator.login.clone()),
        (
            "assignee".to_string(),
            issue
                .assignee
                .as_ref()
                .map_or_else(|| "unassigned".to_string(), |user| user.login.clone()),
        ),
        (
            "milestone".to_string(),
            issue
                .milestone
                .as_ref()
                .map_or_else(|| "none".to_string(), |m| m.title.clone()),
        ),
    ];

    if let Some(body) = issue.body.as_deref().filter(|b| !b.trim().is_empty()) {
        for (i, line) in textwrap::wrap(body, BODY_WRAP_WIDTH).into_iter().enumerate() {
            let label = if i == 0 { "body" } else { "" };
            fields.push((label.to_string(), line.into_owned()));
        }
    }
    fields
}

fn issue_detail(issue: Issue) -> ListController {
    let screen = table_screen(value2_cell(|field: &(String, String)| field.clone()));
    let mut list = screen.present(issue_fields(&issue), |_| ());
    list.set_title(issue.title);
    list
}
