//! CLI for the repository governance analyzer.
//!
//! Analyzes one repository (`owner/name`) or every repository of a user or
//! organization (`owner`) and writes a JSON report.

use clap::Parser;
use repo_governance::{
    top_findings, BatchReport, ClientConfig, GitHubClient, OAuthConfig, OAuthSession,
    PriorityConfig, Runner, RunnerConfig, RunnerError, Target,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use url::Url;

/// Repository Governance Analyzer - Check GitHub repositories against a governance rubric.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Repository (`owner/name`) or user/organization (`owner`) to analyze.
    target: String,

    /// GitHub Personal Access Token.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// GitHub API base URL, for GitHub Enterprise.
    #[arg(long, env = "GITHUB_API_URL")]
    api_url: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = repo_governance::client::DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Skip forked repositories in batch mode.
    #[arg(long)]
    skip_forks: bool,

    /// Path to a TOML priority config.
    #[arg(long)]
    priority_config: Option<PathBuf>,

    /// Write the JSON report to this file instead of stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Log at debug level.
    #[arg(long)]
    debug: bool,

    /// Log in through OAuth before analyzing.
    #[arg(long)]
    login: bool,

    /// OAuth app client id.
    #[arg(long, env = "GITHUB_OAUTH_CLIENT_ID")]
    oauth_client_id: Option<String>,

    /// OAuth redirect URI registered for the app.
    #[arg(long, env = "GITHUB_OAUTH_REDIRECT_URI")]
    oauth_redirect_uri: Option<String>,

    /// Proxy endpoint that exchanges the OAuth code for a token.
    #[arg(long, env = "GITHUB_OAUTH_PROXY_URL")]
    oauth_proxy_url: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.debug);

    match run(args).await {
        Ok(()) => ExitCode::from(0),
        Err(failure) => {
            if let CliFailure::Fatal(e) = &failure {
                error!(error = %e, "Critical failure");
                if let Some(hint) = e.remediation() {
                    eprintln!("Hint: {hint}");
                }
            }
            ExitCode::from(failure.exit_code())
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Logs go to stderr so the JSON report on stdout stays parseable.
/// `RUST_LOG` overrides the default level unless `--debug` is given.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

#[derive(Debug)]
enum CliFailure {
    /// Some repositories failed; the report covers the rest.
    Partial,
    Fatal(RunnerError),
    /// The report could not be serialized or written.
    Output,
}

impl CliFailure {
    fn exit_code(&self) -> u8 {
        match self {
            Self::Partial => 1,
            Self::Fatal(_) | Self::Output => 2,
        }
    }
}

impl From<RunnerError> for CliFailure {
    fn from(e: RunnerError) -> Self {
        Self::Fatal(e)
    }
}

/// Main execution logic.
async fn run(args: Args) -> Result<(), CliFailure> {
    let target = Target::parse(&args.target)?;
    let timeout = Duration::from_secs(args.timeout_secs);

    let session = if args.login {
        Some(login(&args, timeout).await?)
    } else {
        None
    };
    let token = match &session {
        Some(session) => session.credential(args.token.as_deref()),
        None => args.token.as_deref(),
    };

    let cancellation = Arc::new(AtomicBool::new(false));
    watch_ctrl_c(cancellation.clone());

    let mut config = RunnerConfig::new(target, token.map(str::to_string))
        .with_skip_forks(args.skip_forks)
        .with_timeout(timeout)
        .with_cancellation(cancellation);
    if let Some(api_url) = &args.api_url {
        config = config.with_api_base_url(api_url);
    }
    if let Some(path) = &args.priority_config {
        config = config.with_priority_config_path(path.clone());
    }

    let runner = Runner::new(config)?;
    let report = runner.run().await?;

    write_report(&report, args.output.as_deref())?;
    print_summary(&report, runner.priority());

    if report.all_success() {
        Ok(())
    } else {
        Err(CliFailure::Partial)
    }
}

/// Runs the interactive OAuth flow: prints the authorization URL and reads
/// the callback URL the browser was redirected to.
async fn login(args: &Args, timeout: Duration) -> Result<OAuthSession, RunnerError> {
    let mut overrides = OAuthConfig::default();
    if let Some(client_id) = &args.oauth_client_id {
        overrides = OAuthConfig::new(client_id);
    }
    if let Some(redirect_uri) = &args.oauth_redirect_uri {
        overrides = overrides.with_redirect_uri(redirect_uri);
    }
    if let Some(proxy_url) = &args.oauth_proxy_url {
        overrides = overrides.with_proxy_url(proxy_url);
    }

    let mut session = OAuthSession::new(OAuthConfig::from_env().merge(overrides))?;
    let authorize_url = session.login()?;

    eprintln!("Open this URL in your browser to authorize:\n\n  {authorize_url}\n");
    eprintln!("Then paste the URL you were redirected to:");

    let line = BufReader::new(tokio::io::stdin())
        .lines()
        .next_line()
        .await
        .ok()
        .flatten()
        .unwrap_or_default();
    let callback = Url::parse(line.trim()).map_err(repo_governance::OAuthError::from)?;
    if !OAuthSession::is_callback(&callback) {
        warn!("Pasted URL does not look like an OAuth callback");
    }
    session.handle_callback(&callback).await?;

    let mut client_config = ClientConfig::new(None).with_timeout(timeout);
    if let Some(api_url) = &args.api_url {
        client_config = client_config.with_api_base_url(api_url);
    }
    let client = GitHubClient::new(&client_config)?;
    match session.user_info(&client).await? {
        Some(user) => info!(login = %user.login, "Logged in"),
        None => warn!("Login token was rejected; continuing without it"),
    }

    Ok(session)
}

/// Sets `cancellation` on Ctrl-C; the batch stops before the next repository.
fn watch_ctrl_c(cancellation: Arc<AtomicBool>) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, stopping after the current repository");
            cancellation.store(true, Ordering::SeqCst);
        }
    });
}

/// Writes the JSON report to `output`, or stdout when no path is given.
fn write_report(report: &BatchReport, output: Option<&std::path::Path>) -> Result<(), CliFailure> {
    let json = match serde_json::to_string_pretty(report) {
        Ok(json) => json,
        Err(e) => {
            error!(error = %e, "Failed to serialize report");
            return Err(CliFailure::Output);
        }
    };

    match output {
        Some(path) => {
            if let Err(e) = std::fs::write(path, json) {
                error!(path = %path.display(), error = %e, "Failed to write report");
                return Err(CliFailure::Output);
            }
            info!(path = %path.display(), "Report written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Prints the final run summary.
fn print_summary(report: &BatchReport, priority: Option<&PriorityConfig>) {
    eprintln!("\nSummary:");
    eprintln!("  Target: {}", report.target);
    if let Some(account_type) = report.account_type {
        eprintln!("  Account type: {account_type}");
    }
    eprintln!("  Repositories analyzed: {}", report.stats.succeeded);
    eprintln!("  Repositories failed: {}", report.stats.failed);

    for result in &report.results {
        eprintln!(
            "\n  {} [{}] maturity: {}",
            result.repository,
            result.classification,
            result.maturity_level()
        );
        for finding in top_findings(&result.findings, priority) {
            eprintln!("    - ({}) {}", finding.severity, finding.title);
        }
    }

    for failure in &report.failures {
        eprintln!("\n  {} failed: {}", failure.repository, failure.error);
        if let Some(hint) = &failure.remediation {
            eprintln!("    Hint: {hint}");
        }
    }
    for message in report.warnings.iter().chain(&report.notices) {
        eprintln!("\n  Note: {message}");
    }
}
