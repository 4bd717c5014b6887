//! Listed repository information.

use crate::analyzer::RepositoryIdentity;
use serde::{Deserialize, Serialize};

/// Owner entry of a listing response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryOwner {
    pub login: String,
}

/// One repository from a listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListedRepository {
    /// Repository name.
    pub name: String,

    /// Full repository name in "owner/name" format.
    pub full_name: String,

    pub owner: RepositoryOwner,

    #[serde(default)]
    pub fork: bool,
}

impl ListedRepository {
    /// Returns the identity used to analyze this repository.
    #[must_use]
    pub fn identity(&self) -> RepositoryIdentity {
        RepositoryIdentity::new(&self.owner.login, &self.name)
    }
}
