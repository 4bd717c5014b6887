//! Composition root: builds the gateway, runs single or batch analysis and
//! orders findings for display.

mod config;
mod error;
mod target;

pub use config::RunnerConfig;
pub use error::RunnerError;
pub use target::Target;

use crate::analyzer::RepositoryAnalyzer;
use crate::batch::BatchOrchestrator;
use crate::client::{ClientConfig, GitHubClient};
use crate::config::{load_priority_config, PriorityConfig};
use crate::summary::{BatchReport, RepositoryOutcome};
use std::sync::atomic::Ordering;
use tracing::{info, warn};

/// Runs one analysis described by a [`RunnerConfig`].
#[derive(Debug)]
pub struct Runner {
    config: RunnerConfig,
    client: GitHubClient,
    priority: Option<PriorityConfig>,
}

impl Runner {
    /// Builds a runner, loading the priority config if one is set.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the config cannot be loaded or the client
    /// cannot be built.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        let priority = load_priority_config(config.priority_config_path())?;

        let mut client_config =
            ClientConfig::new(config.token().map(str::to_string)).with_timeout(config.timeout());
        if let Some(api_base_url) = config.api_base_url() {
            client_config = client_config.with_api_base_url(api_base_url);
        }
        let client = GitHubClient::new(&client_config)?;

        if !client.is_authenticated() {
            warn!("No GitHub token configured; unauthenticated requests are limited to 60 per hour");
        }

        Ok(Self {
            config,
            client,
            priority,
        })
    }

    /// Returns the loaded priority config.
    #[must_use]
    pub fn priority(&self) -> Option<&PriorityConfig> {
        self.priority.as_ref()
    }

    /// Executes the run and returns the prioritized report.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] for a failed single analysis, a failed listing,
    /// a batch where every analysis failed, or a cancelled single run.
    pub async fn run(&self) -> Result<BatchReport, RunnerError> {
        let mut report = match self.config.target() {
            Target::Repository(identity) => {
                if self.is_cancelled() {
                    return Err(RunnerError::Cancelled(self.config.target().clone()));
                }
                info!(repo = %identity, "Analyzing repository");
                let mut analyzer = RepositoryAnalyzer::new(self.client.clone());
                let result = analyzer
                    .analyze_with_progress(identity, &mut |stage| info!("{stage}"))
                    .await?;

                let mut report = BatchReport::new(identity.full_name(), None);
                report.record(RepositoryOutcome::Analyzed(Box::new(result)));
                report
            }
            Target::Account(login) => {
                let mut orchestrator = BatchOrchestrator::new(self.client.clone());
                if let Some(cancellation) = self.config.cancellation() {
                    orchestrator = orchestrator.with_cancellation(cancellation.clone());
                }
                orchestrator
                    .analyze_all_with_progress(
                        login,
                        self.config.skip_forks(),
                        &mut |index, total, identity| {
                            info!("[{}/{}] Analyzing {}", index + 1, total, identity);
                        },
                    )
                    .await?
            }
        };

        report.prioritize(self.priority.as_ref());
        Ok(report)
    }

    fn is_cancelled(&self) -> bool {
        self.config
            .cancellation()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }
}
