//! Account-type resolution.
//!
//! Selects between the organization and user repository-listing endpoints.
//! Resolution never fails: any error falls back to [`AccountType::User`]
//! with a warning attached.

use crate::client::GitHubClient;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Kind of GitHub account owning a set of repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountType {
    User,
    Organization,
}

impl AccountType {
    /// Returns the listing route for `login`'s repositories, without query.
    #[must_use]
    pub fn repositories_route(&self, login: &str) -> String {
        match self {
            Self::User => format!("/users/{login}/repos"),
            Self::Organization => format!("/orgs/{login}/repos"),
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("User"),
            Self::Organization => f.write_str("Organization"),
        }
    }
}

/// Outcome of an account-type lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountResolution {
    pub account_type: AccountType,
    /// Set when the lookup failed and the user default was applied.
    pub warning: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AccountResponse {
    #[serde(rename = "type")]
    kind: String,
}

/// Resolves whether `login` is a user or an organization.
///
/// Unknown discriminators and failed lookups both resolve to
/// [`AccountType::User`]; a failed lookup also carries a warning.
pub async fn resolve_account_type(client: &GitHubClient, login: &str) -> AccountResolution {
    match client
        .fetch::<AccountResponse>(&format!("/users/{login}"))
        .await
    {
        Ok(response) => {
            let account_type = if response.kind == "Organization" {
                AccountType::Organization
            } else {
                AccountType::User
            };
            debug!(login, %account_type, "Resolved account type");
            AccountResolution {
                account_type,
                warning: None,
            }
        }
        Err(e) => {
            warn!(login, error = %e, "Account type lookup failed, assuming user");
            AccountResolution {
                account_type: AccountType::User,
                warning: Some(format!(
                    "Could not determine account type for {login} ({e}); listing repositories as a user account"
                )),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_per_account_type() {
        assert_eq!(
            AccountType::Organization.repositories_route("acme"),
            "/orgs/acme/repos"
        );
        assert_eq!(AccountType::User.repositories_route("octo"), "/users/octo/repos");
    }

    #[test]
    fn serializes_as_github_discriminator() {
        assert_eq!(
            serde_json::to_string(&AccountType::Organization).unwrap(),
            "\"Organization\""
        );
    }
}
