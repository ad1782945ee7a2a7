//! Sprintlint CLI
//!
//! Audits an agile backlog on a Rally-style tracking service: runs every
//! registered check (or the subset matching `--checks`) and prints one
//! report per check with findings. Connection options fall back to
//! `SPRINTLINT_*` environment variables; scope filters (`--team-members`,
//! `--iteration`, `--features`) are injected into every fetch the checks
//! perform.

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sprintlint_cli::checks::{run_checks, DynTracker};
use sprintlint_client::{
    IterationFilter, ScopeOptions, Tracker, TrackerClient, UnmappedDimension, WsapiClient,
    WsapiConfig,
};

const SPRINTLINT_SERVER_ENV: &str = "SPRINTLINT_SERVER";
const SPRINTLINT_USER_ENV: &str = "SPRINTLINT_USER";
const SPRINTLINT_PASSWORD_ENV: &str = "SPRINTLINT_PASSWORD";
const SPRINTLINT_API_KEY_ENV: &str = "SPRINTLINT_API_KEY";
const SPRINTLINT_PROJECT_ENV: &str = "SPRINTLINT_PROJECT";

#[derive(Parser)]
#[command(name = "sprintlint")]
#[command(author, version, about = "Audit an agile backlog for process violations")]
struct Cli {
    /// Tracking-service base URL, e.g. https://rally1.rallydev.com
    #[arg(long, env = SPRINTLINT_SERVER_ENV)]
    server: String,

    /// Basic-auth user name.
    #[arg(long, env = SPRINTLINT_USER_ENV)]
    user: Option<String>,

    /// Basic-auth password.
    #[arg(long, env = SPRINTLINT_PASSWORD_ENV, hide_env_values = true)]
    password: Option<String>,

    /// API key; takes precedence over basic auth.
    #[arg(long, env = SPRINTLINT_API_KEY_ENV, hide_env_values = true)]
    api_key: Option<String>,

    /// Project to scope all queries to.
    #[arg(long, env = SPRINTLINT_PROJECT_ENV)]
    project: Option<String>,

    /// Restrict every fetch to artifacts owned by these user names.
    #[arg(long = "team-members", num_args = 1.., value_name = "NAME")]
    team_members: Option<Vec<String>>,

    /// Restrict every fetch to an iteration window: `current` or `future`.
    #[arg(long, value_name = "WINDOW")]
    iteration: Option<String>,

    /// Restrict every fetch to these feature identifiers.
    #[arg(long, num_args = 1.., value_name = "ID")]
    features: Option<Vec<String>>,

    /// Only run checks whose name contains this pattern.
    #[arg(long, value_name = "PATTERN")]
    checks: Option<String>,

    /// When a scope filter has no field path for an entity kind: `skip`
    /// that filter, or return the query `unfiltered` (historical behavior).
    #[arg(long = "on-unmapped", default_value = "skip", value_name = "POLICY")]
    on_unmapped: String,

    /// Log at debug level (rendered queries, backend warnings).
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn scope_from_cli(cli: &Cli) -> Result<ScopeOptions> {
    let filter_iteration: Option<IterationFilter> = cli
        .iteration
        .as_deref()
        .map(str::parse)
        .transpose()
        .context("invalid --iteration")?;
    let on_unmapped = match cli.on_unmapped.as_str() {
        "skip" => UnmappedDimension::SkipDimension,
        "unfiltered" => UnmappedDimension::ReturnUnfiltered,
        other => bail!("invalid --on-unmapped {other:?} (expected `skip` or `unfiltered`)"),
    };
    Ok(ScopeOptions {
        filter_owner: cli.team_members.clone(),
        filter_iteration,
        filter_feature: cli.features.clone(),
        on_unmapped,
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let scope = scope_from_cli(&cli)?;
    if cli.api_key.is_none() && cli.user.is_none() {
        bail!(
            "no credentials: pass --api-key or --user/--password \
             (or set {SPRINTLINT_API_KEY_ENV} / {SPRINTLINT_USER_ENV})"
        );
    }

    let mut config = WsapiConfig::new(&cli.server);
    config.username = cli.user.clone();
    config.password = cli.password.clone();
    config.api_key = cli.api_key.clone();
    config.project = cli.project.clone();

    let client = WsapiClient::new(config).context("building tracking-service client")?;
    let tracker: DynTracker = Tracker::new(Box::new(client) as Box<dyn TrackerClient>, scope);

    let ran = run_checks(&tracker, cli.checks.as_deref())?;
    if ran == 0 {
        bail!("no registered check matches pattern {:?}", cli.checks);
    }
    Ok(())
}
