//! ghissues library exports for testing

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod core;
pub mod github;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// The list shown when the app starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartScreen {
    /// Repositories of the configured user, or your own.
    #[default]
    Repos,
    /// Organizations you belong to.
    Orgs,
}
