//! Repository discovery through the paginated listing endpoints.

mod error;
mod repository;

pub use error::DiscoveryError;
pub use repository::{ListedRepository, RepositoryOwner};

use crate::account::AccountType;
use crate::client::GitHubClient;
use tracing::{debug, info, info_span, warn, Instrument};

/// Maximum page size accepted by the listing endpoints.
pub const PER_PAGE: usize = 100;

/// Upper bound on pages fetched for one account.
const MAX_PAGES: u32 = 1000;

/// Lists every repository of `login`, most recently updated first.
///
/// Pages are requested in order until one returns fewer than [`PER_PAGE`]
/// entries. The API ordering is preserved.
///
/// # Errors
///
/// Returns [`DiscoveryError`] if any page fails to load.
pub async fn list_repositories(
    client: &GitHubClient,
    login: &str,
    account_type: AccountType,
) -> Result<Vec<ListedRepository>, DiscoveryError> {
    let span = info_span!("discover", login = %login, account_type = %account_type);

    async {
        let route = account_type.repositories_route(login);
        let mut repositories = Vec::new();

        for page in 1..=MAX_PAGES {
            let page_route = listing_page_route(&route, page);
            debug!(page, route = %page_route, "Fetching repository page");

            let entries: Vec<ListedRepository> =
                client
                    .fetch(&page_route)
                    .await
                    .map_err(|source| DiscoveryError::Listing {
                        login: login.to_string(),
                        page,
                        source,
                    })?;

            let count = entries.len();
            repositories.extend(entries);

            if count < PER_PAGE {
                break;
            }
            if page == MAX_PAGES {
                warn!(max = MAX_PAGES, "Reached maximum page limit");
            }
        }

        info!(count = repositories.len(), "Discovery complete");
        Ok(repositories)
    }
    .instrument(span)
    .await
}

/// Builds the route for one listing page.
fn listing_page_route(route: &str, page: u32) -> String {
    format!("{route}?per_page={PER_PAGE}&page={page}&sort=updated&direction=desc")
}

/// Removes forks, preserving order.
#[must_use]
pub fn without_forks(repositories: Vec<ListedRepository>) -> Vec<ListedRepository> {
    repositories.into_iter().filter(|repo| !repo.fork).collect()
}
