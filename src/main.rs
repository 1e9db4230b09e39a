mod app;
mod components;
mod config;
mod error;
mod event;
mod handler;
mod logging;
mod nav;
mod scheduler;
mod source;
mod spinner;
mod store;
mod text;
mod theme;
mod tui;
mod ui;
mod viewport;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::app::{App, AppOptions};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::event::{Event, EventHandler};
use crate::handler::Action;
use crate::scheduler::{FetchScheduler, FetchTimer};
use crate::source::{Feed, HnClient};
use crate::tui::{install_panic_hook, Tui};

/// Input poll interval; also paces the loading spinner.
const TICK_RATE: Duration = Duration::from_millis(100);

/// A lazy-loading terminal reader for Hacker News.
#[derive(Parser, Debug)]
#[command(name = "hr", version, about)]
struct Cli {
    /// Ranked list shown at the root
    #[arg(short, long, value_enum)]
    feed: Option<Feed>,

    /// Path to a config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Disable mouse wheel support
    #[arg(long)]
    no_mouse: bool,

    /// Color scheme: dark, light, custom
    #[arg(long)]
    theme: Option<String>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Partial config holding only the flags that were given.
    fn overrides(&self) -> AppConfig {
        let mut overrides = AppConfig::default();
        overrides.general.feed = self
            .feed
            .and_then(|f| f.to_possible_value())
            .map(|v| v.get_name().to_string());
        if self.no_mouse {
            overrides.general.mouse = Some(false);
        }
        overrides.theme.scheme = self.theme.clone();
        overrides.logging.file = self
            .log_file
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned());
        overrides
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref(), Some(&cli.overrides()));

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "exiting with error");
        eprintln!("hr: {e}");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> error::Result<()> {
    logging::init(&config.log_file(), config.log_level())?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        feed = config.feed().label(),
        theme = config.theme_scheme(),
        "starting"
    );

    let timeout = Duration::from_secs(config.timeout_secs());
    let client =
        HnClient::new(config.api_url(), config.feed(), timeout).map_err(AppError::Bootstrap)?;

    install_panic_hook();
    let mut tui = Tui::new(config.mouse_enabled())?;
    let mut app = App::new(AppOptions::from(&config));

    let mut events = EventHandler::new(TICK_RATE);
    let event_tx = events.sender();
    let _timer = FetchTimer::start(
        Duration::from_millis(config.fetch_interval_ms()),
        event_tx.clone(),
    );
    let mut scheduler = FetchScheduler::new(Arc::new(client), event_tx, timeout);
    scheduler.bootstrap();

    let result = event_loop(&mut tui, &mut app, &mut events, &mut scheduler).await;
    tui.restore()?;
    tracing::info!(
        dispatched = scheduler.dispatched(),
        cached = app.store.len(),
        pending = app.store.pending_len(),
        "session finished"
    );
    result
}

async fn event_loop(
    tui: &mut Tui,
    app: &mut App,
    events: &mut EventHandler,
    scheduler: &mut FetchScheduler,
) -> error::Result<()> {
    loop {
        if app.dirty {
            app.prepare_frame(tui.area()?);
            tui.draw(app)?;
            app.dirty = false;
        }

        match events.next().await? {
            Event::Key(key) => handler::handle_key_event(app, key),
            Event::Mouse(mouse) => handler::handle_mouse_event(app, mouse),
            Event::Tick => app.on_tick(),
            Event::Resize(w, h) => app.dispatch(Action::Resize(w, h)),
            Event::FetchTick => {
                scheduler.tick(&mut app.store);
            }
            Event::ItemFetched(id, result) => app.handle_item_fetched(id, result),
            Event::CollectionFetched(result) => app.handle_collection(result)?,
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
