#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod account;
pub mod analyzer;
pub mod batch;
pub mod client;
pub mod config;
pub mod discovery;
pub mod findings;
pub mod inheritance;
pub mod oauth;
pub mod rate_limit;
pub mod runner;
pub mod summary;

pub use account::{resolve_account_type, AccountResolution, AccountType};
pub use analyzer::{
    classify, AnalysisError, AnalysisResult, Classification, FileTree, ForkStatus, ForkSyncStatus,
    MaturityLevel, RepositoryAnalyzer, RepositoryIdentity, RepositoryMetadata, RepositoryMetrics,
};
pub use batch::{BatchError, BatchOrchestrator};
pub use client::{ClientConfig, GatewayError, GitHubClient};
pub use config::{load_priority_config, ConfigError, PriorityConfig, PriorityEntry, SortStrategy};
pub use discovery::{list_repositories, DiscoveryError, ListedRepository};
pub use findings::{sort_findings, top_findings, Category, Finding, Severity};
pub use inheritance::{OrgInheritance, OrgInheritanceCache, ProbeKey, ProbeOutcome};
pub use oauth::{AuthState, OAuthConfig, OAuthError, OAuthSession, UserInfo};
pub use rate_limit::RateLimitInfo;
pub use runner::{Runner, RunnerConfig, RunnerError, Target};
pub use summary::{BatchReport, BatchStats, RepositoryFailure, RepositoryOutcome};
