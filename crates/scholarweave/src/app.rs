//! Interactive terminal shell.
//!
//! Lines typed at the prompt are search queries; lines starting with `:` are
//! commands. The shell keeps the search page mounted while a detail page is
//! shown so `:back` returns to the same results; `:go /` mounts a fresh one.

use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::client::ApiClient;
use crate::components::HealthIndicator;
use crate::config::Config;
use crate::formatters;
use crate::pages::{DetailPage, SearchPage};
use crate::router::Route;

const PROMPT: &str = "scholarweave> ";

const HELP: &str = "\
Type a query and press Enter to search.

  :open N      open result N
  :go PATH     navigate to a route (/ or /papers/<id>)
  :back        return to the search results
  :health      show backend health
  :help        show this help
  :quit        exit
";

/// A parsed line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit the text to the search box (verbatim).
    Search(String),
    /// Open the N-th result (1-based).
    Open(usize),
    /// Navigate to a route path.
    Go(String),
    /// Return to the search page.
    Back,
    /// Show the health indicator.
    Health,
    /// Show help.
    Help,
    /// Exit.
    Quit,
    /// Unrecognized `:` command or bad argument.
    Invalid(String),
}

impl Command {
    /// Parse one input line (without its line terminator).
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let Some(rest) = line.trim_start().strip_prefix(':') else {
            return Self::Search(line.to_string());
        };

        let mut parts = rest.trim().splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or_default();
        let arg = parts.next().map(str::trim).unwrap_or_default();

        match name {
            "q" | "quit" | "exit" => Self::Quit,
            "h" | "help" => Self::Help,
            "b" | "back" => Self::Back,
            "health" => Self::Health,
            "go" if !arg.is_empty() => Self::Go(arg.to_string()),
            "o" | "open" => match arg.parse::<usize>() {
                Ok(n) if n > 0 => Self::Open(n),
                _ => Self::Invalid(format!("Usage: :open N (got '{arg}')")),
            },
            _ => Self::Invalid(format!("Unknown command ':{rest}'. Type :help for commands.")),
        }
    }
}

/// Which page is on screen.
#[derive(Debug)]
enum Screen {
    Search,
    Detail(DetailPage),
}

/// The interactive application.
#[derive(Debug)]
pub struct App {
    client: Arc<ApiClient>,
    health_interval: Duration,
    settle_timeout: Duration,
    search: SearchPage,
    screen: Screen,
    health: Option<HealthIndicator>,
}

impl App {
    /// Create the app on the search route. Must be called inside a Tokio runtime.
    #[must_use]
    pub fn new(client: Arc<ApiClient>, config: &Config) -> Self {
        let health = HealthIndicator::mount(Arc::clone(&client), config.health_interval);
        Self {
            client,
            health_interval: config.health_interval,
            settle_timeout: config.request_timeout,
            search: SearchPage::new(),
            screen: Screen::Search,
            health: Some(health),
        }
    }

    /// Current route.
    #[must_use]
    pub fn route(&self) -> Route {
        match &self.screen {
            Screen::Search => Route::Search,
            Screen::Detail(page) => Route::paper(page.id().unwrap_or_default()),
        }
    }

    /// The search page.
    #[must_use]
    pub const fn search_page(&self) -> &SearchPage {
        &self.search
    }

    /// Navigate to a route. The search route mounts a fresh search page.
    pub async fn navigate(&mut self, route: Route) {
        tracing::debug!(route = %route, "Navigating");
        match route {
            Route::Search => {
                self.search = SearchPage::new();
                self.show_search();
            }
            Route::Paper { id } => self.show_paper(id).await,
        }
    }

    /// Render the current screen.
    #[must_use]
    pub fn render(&self) -> String {
        match &self.screen {
            Screen::Search => {
                let health = self.health.as_ref().map(HealthIndicator::state);
                formatters::format_search_page(&self.search, health.as_ref())
            }
            Screen::Detail(page) => formatters::format_detail_markdown(&page.view()),
        }
    }

    /// Handle one command, writing any output. Breaks when the user quits.
    ///
    /// # Errors
    ///
    /// Returns error only when writing to `out` fails.
    pub async fn handle<W>(
        &mut self,
        command: Command,
        out: &mut W,
    ) -> anyhow::Result<ControlFlow<()>>
    where
        W: AsyncWrite + Unpin,
    {
        match command {
            Command::Quit => return Ok(ControlFlow::Break(())),
            Command::Help => write(out, HELP).await?,
            Command::Invalid(message) => write(out, &format!("{message}\n")).await?,
            Command::Health => {
                let state = match &self.health {
                    Some(indicator) => indicator.state(),
                    None => crate::components::check_health(&self.client).await,
                };
                write(out, &formatters::format_health_markdown(&state)).await?;
            }
            Command::Back => {
                self.show_search();
                write(out, &self.render()).await?;
            }
            Command::Go(path) => match Route::parse(&path) {
                Ok(route) => {
                    self.navigate(route).await;
                    write(out, &self.render()).await?;
                }
                Err(err) => write(out, &format!("{err}\n")).await?,
            },
            Command::Open(n) => match n.checked_sub(1).and_then(|i| self.search.select(i)) {
                Some(route) => {
                    self.navigate(route).await;
                    write(out, &self.render()).await?;
                }
                None => {
                    let count = self.search.results().len();
                    write(out, &format!("No result {n} (have {count})\n")).await?;
                }
            },
            Command::Search(text) => {
                self.show_search();
                self.search.search_box_mut().set_query(text);

                let Some(query) = self.search.search_box().submit().map(str::to_string) else {
                    return Ok(ControlFlow::Continue(()));
                };

                let ticket = self.search.begin_search(&query);
                write(out, &self.render()).await?;

                let outcome = self.client.search(ticket.query()).await;
                self.search.finish_search(&ticket, outcome);
                write(out, &self.render()).await?;
            }
        }

        Ok(ControlFlow::Continue(()))
    }

    /// Run the read-eval-render loop until EOF or `:quit`.
    ///
    /// # Errors
    ///
    /// Returns error on I/O failure.
    pub async fn run<R, W>(&mut self, input: R, mut out: W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        if let Some(health) = self.health.as_mut() {
            // First paint waits for the initial health check, bounded by the request timeout.
            let _ = tokio::time::timeout(self.settle_timeout, health.settled()).await;
        }

        write(&mut out, &self.render()).await?;
        write(&mut out, PROMPT).await?;

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            let command = Command::parse(line.trim_end_matches('\r'));
            if self.handle(command, &mut out).await?.is_break() {
                break;
            }
            write(&mut out, PROMPT).await?;
        }

        tracing::info!("Interactive session ended");
        Ok(())
    }

    fn show_search(&mut self) {
        if matches!(self.screen, Screen::Search) {
            return;
        }
        self.screen = Screen::Search;
        self.health =
            Some(HealthIndicator::mount(Arc::clone(&self.client), self.health_interval));
    }

    async fn show_paper(&mut self, id: String) {
        // Leaving the search screen unmounts the health indicator.
        self.health = None;

        match &mut self.screen {
            Screen::Detail(page) => page.set_id(&self.client, id).await,
            Screen::Search => {
                let mut page = DetailPage::new(Some(id));
                page.load(&self.client).await;
                self.screen = Screen::Detail(page);
            }
        }
    }
}

async fn write<W: AsyncWrite + Unpin>(out: &mut W, text: &str) -> std::io::Result<()> {
    out.write_all(text.as_bytes()).await?;
    out.flush().await
}
