mod commands;
pub mod error;
pub mod utils;



use std::env;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::error::{CliError, CliResult};
use crate::client::{
    ClientConfig, DeepSourceClient, MetricHistoryParams, MetricSettingParams,
    MetricThresholdParams, PaginationParams,
};
use crate::models::{MetricShortcode, ReportType};

/// Environment variable holding the API key when `--api-key` is not given
pub const API_KEY_ENV: &str = "DEEPSOURCE_API_KEY";

/// Environment variable overriding the API endpoint
pub const API_URL_ENV: &str = "DEEPSOURCE_API_URL";

#[derive(Parser)]
#[command(name = "dsq")]
#[command(author, version, about = "Query the DeepSource API", long_about = None)]
pub struct Cli {
    /// DeepSource personal access token (default: DEEPSOURCE_API_KEY env)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Override the GraphQL endpoint (default: DEEPSOURCE_API_URL env or the public API)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Output format (table or json)
    #[arg(long, global = true, default_value = "table")]
    pub format: String,

    #[command(subcommand)]
    command: Commands,
}

/// Relay pagination flags shared by list commands
#[derive(Args, Debug, Default, Clone)]
pub struct PageArgs {
    /// Number of items to fetch going forward
    #[arg(long)]
    pub first: Option<u32>,
    /// Cursor to continue after
    #[arg(long)]
    pub after: Option<String>,
    /// Number of items to fetch going backward
    #[arg(long)]
    pub last: Option<u32>,
    /// Cursor to continue before
    #[arg(long)]
    pub before: Option<String>,
    /// Legacy offset, ignored when a cursor is given
    #[arg(long)]
    pub offset: Option<u32>,
}

impl From<PageArgs> for PaginationParams {
    fn from(args: PageArgs) -> Self {
        PaginationParams {
            offset: args.offset,
            first: args.first,
            after: args.after,
            before: args.before,
            last: args.last,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List projects visible to the API key
    Projects,
    /// List issues on a project's default branch
    Issues {
        /// Project key (repository DSN)
        project_key: String,
        #[command(flatten)]
        page: PageArgs,
    },
    /// List analysis runs
    Runs {
        /// Project key (repository DSN)
        project_key: String,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show a run by run UID or commit SHA
    Run {
        /// Run UID, or a 40-character commit SHA
        identifier: String,
    },
    /// List dependency vulnerabilities
    Vulnerabilities {
        /// Project key (repository DSN)
        project_key: String,
        #[command(flatten)]
        page: PageArgs,
    },
    /// List quality metrics
    Metrics {
        /// Project key (repository DSN)
        project_key: String,
        /// Only these metrics (comma-separated shortcodes, e.g. LCV,BCV)
        #[arg(long, value_delimiter = ',')]
        shortcodes: Vec<MetricShortcode>,
    },
    /// Show the history of one metric
    MetricHistory {
        /// Project key (repository DSN)
        project_key: String,
        /// Metric shortcode, e.g. LCV
        shortcode: MetricShortcode,
        /// Metric key, e.g. AGGREGATE or a language
        #[arg(long, default_value = "AGGREGATE")]
        key: String,
        /// Maximum number of values to fetch
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show a compliance report (OWASP_TOP_10, SANS_TOP_25 or MISRA_C)
    Compliance {
        /// Project key (repository DSN)
        project_key: String,
        /// Report type
        report_type: ReportType,
    },
    /// Set or clear a metric threshold
    SetThreshold {
        /// Project key (repository DSN)
        project_key: String,
        /// Metric shortcode, e.g. LCV
        shortcode: MetricShortcode,
        /// Metric key, e.g. AGGREGATE or a language
        #[arg(long, default_value = "AGGREGATE")]
        key: String,
        /// New threshold; omit to remove the threshold
        #[arg(long)]
        value: Option<f64>,
    },
    /// Change whether a metric is reported and its threshold enforced
    UpdateMetricSetting {
        /// Project key (repository DSN)
        project_key: String,
        /// Metric shortcode, e.g. LCV
        shortcode: MetricShortcode,
        /// Report the metric on the dashboard
        #[arg(long, action = ArgAction::Set)]
        reported: bool,
        /// Fail checks when the threshold is not met
        #[arg(long, action = ArgAction::Set)]
        enforce_threshold: bool,
    },
}

/// Default log filter for a given `-v` count
pub fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "deepsource=warn",
        1 => "deepsource=info",
        2 => "deepsource=debug",
        _ => "deepsource=trace",
    }
}

/// Initialize tracing subscriber with env filter, logging to stderr
fn init_tracing(verbose: u8) {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter(verbose).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Build the client configuration from flags, falling back to the environment
pub(crate) fn client_config(cli: &Cli) -> CliResult<ClientConfig> {
    let api_key = cli
        .api_key
        .clone()
        .or_else(|| env::var(API_KEY_ENV).ok())
        .filter(|key| !key.trim().is_empty())
        .ok_or(CliError::MissingApiKey)?;

    let mut config =
        ClientConfig::new(api_key).with_timeout(Duration::from_secs(cli.timeout_secs.max(1)));
    if let Some(url) = cli.api_url.clone().or_else(|| env::var(API_URL_ENV).ok()) {
        config = config.with_base_url(url);
    }
    Ok(config)
}

async fn execute(client: &DeepSourceClient, command: Commands, format: &str) -> CliResult<String> {
    match command {
        Commands::Projects => commands::project::list_projects(client, format).await,
        Commands::Issues { project_key, page } => {
            commands::issue::list_issues(client, &project_key, &page.into(), format).await
        }
        Commands::Runs { project_key, page } => {
            commands::run::list_runs(client, &project_key, &page.into(), format).await
        }
        Commands::Run { identifier } => commands::run::get_run(client, &identifier, format).await,
        Commands::Vulnerabilities { project_key, page } => {
            commands::vulnerability::list_vulnerabilities(
                client,
                &project_key,
                &page.into(),
                format,
            )
            .await
        }
        Commands::Metrics {
            project_key,
            shortcodes,
        } => commands::metric::list_metrics(client, &project_key, &shortcodes, format).await,
        Commands::MetricHistory {
            project_key,
            shortcode,
            key,
            limit,
        } => {
            let mut params = MetricHistoryParams::new(project_key, shortcode).with_metric_key(key);
            params.limit = limit;
            commands::metric::metric_history(client, &params, format).await
        }
        Commands::Compliance {
            project_key,
            report_type,
        } => commands::report::get_report(client, &project_key, report_type, format).await,
        Commands::SetThreshold {
            project_key,
            shortcode,
            key,
            value,
        } => {
            let params = MetricThresholdParams {
                project_key,
                metric_shortcode: shortcode,
                metric_key: key,
                threshold_value: value,
            };
            commands::metric::set_threshold(client, &params).await
        }
        Commands::UpdateMetricSetting {
            project_key,
            shortcode,
            reported,
            enforce_threshold,
        } => {
            let params = MetricSettingParams {
                project_key,
                metric_shortcode: shortcode,
                is_reported: reported,
                is_threshold_enforced: enforce_threshold,
            };
            commands::metric::update_setting(client, &params).await
        }
    }
}

pub async fn run() -> miette::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = client_config(&cli)?;
    let client = DeepSourceClient::new(config).map_err(CliError::from)?;
    let output = execute(&client, cli.command, &cli.format).await?;
    println!("{}", output);
    Ok(())
}
