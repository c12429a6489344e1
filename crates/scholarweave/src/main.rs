//! ScholarWeave terminal client - Entry Point
//!
//! Runs an interactive session by default; subcommands render a single page.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use scholarweave::app::App;
use scholarweave::components::{HealthIndicator, HealthState, check_health};
use scholarweave::formatters;
use scholarweave::pages::{DetailPage, DetailView, SearchPage};
use scholarweave::{ApiClient, Config, Route};

#[derive(Parser, Debug)]
#[command(name = "scholarweave")]
#[command(about = "Search and discover academic papers through the ScholarWeave API")]
#[command(version)]
struct Cli {
    /// Backend base URL (overrides SCHOLARWEAVE_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Request timeout in seconds (overrides SCHOLARWEAVE_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", env = "RUST_LOG", global = true)]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search papers and print the result grid
    Search {
        /// Query text; multiple words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Print normalized papers as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a single paper
    Paper {
        /// Paper id (OpenAlex work id, URL or DOI)
        id: String,

        /// Print the normalized paper as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check backend health
    Health {
        /// Keep polling at the health interval until Ctrl-C
        #[arg(long)]
        watch: bool,
    },
    /// Render a client route such as `/` or `/papers/W2741809807`
    Open {
        /// Route path
        path: String,
    },
    /// Interactive session (default)
    Interactive,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = Config::from_env()?;

    if let Some(url) = &cli.api_url {
        config = config.with_api_base_url(url)?;
    }
    if let Some(secs) = cli.timeout {
        config.request_timeout = Duration::from_secs(secs);
    }

    Ok(config)
}

fn exit_code(failed: bool) -> ExitCode {
    if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}

async fn run_search(client: &ApiClient, query: &str, json: bool) -> anyhow::Result<ExitCode> {
    let mut page = SearchPage::new();
    page.search_box_mut().set_query(query);

    if !page.submit(client).await {
        eprintln!("Search query must not be empty");
        return Ok(ExitCode::FAILURE);
    }

    if json && page.error().is_none() {
        println!("{}", serde_json::to_string_pretty(&formatters::compact_papers(page.results()))?);
    } else {
        print!("{}", formatters::format_search_view(&page.view()));
    }

    Ok(exit_code(page.error().is_some()))
}

async fn run_paper(client: &ApiClient, id: String, json: bool) -> anyhow::Result<ExitCode> {
    let mut page = DetailPage::new(Some(id));
    page.load(client).await;

    let view = page.view();
    match view {
        DetailView::Paper(paper) if json => {
            println!("{}", serde_json::to_string_pretty(&formatters::compact_paper(paper))?);
        }
        _ => print!("{}", formatters::format_detail_markdown(&view)),
    }

    Ok(exit_code(matches!(view, DetailView::Error(_))))
}

async fn run_health(client: Arc<ApiClient>, config: &Config, watch: bool) -> ExitCode {
    if !watch {
        let state = check_health(&client).await;
        print!("{}", formatters::format_health_markdown(&state));
        return exit_code(matches!(state, HealthState::Error(_)));
    }

    let mut indicator = HealthIndicator::mount(client, config.health_interval);
    loop {
        tokio::select! {
            changed = indicator.changed() => match changed {
                Some(state) if !state.is_loading() => {
                    print!("{}", formatters::format_health_markdown(&state));
                    println!();
                }
                Some(_) => {}
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Received shutdown signal");
                break;
            }
        }
    }

    ExitCode::SUCCESS
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    let config = load_config(&cli)?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        api_url = %config.api_base_url,
        "Starting ScholarWeave client"
    );

    let client = Arc::new(ApiClient::new(&config)?);

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Search { query, json } => run_search(&client, &query.join(" "), json).await,
        Command::Paper { id, json } => run_paper(&client, id, json).await,
        Command::Health { watch } => Ok(run_health(client, &config, watch).await),
        Command::Open { path } => match Route::parse(&path)? {
            Route::Search => {
                let health = check_health(&client).await;
                print!("{}", formatters::format_search_page(&SearchPage::new(), Some(&health)));
                Ok(ExitCode::SUCCESS)
            }
            Route::Paper { id } => run_paper(&client, id, false).await,
        },
        Command::Interactive => {
            let mut app = App::new(client, &config);
            app.run(BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
