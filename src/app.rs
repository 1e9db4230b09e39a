use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::components::focus::FocusWidget;
use crate::components::help::HelpState;
use crate::config::{AppConfig, DEFAULT_ITEM_URL, DEFAULT_MAX_WIDTH};
use crate::error::{AppError, FetchError, Result};
use crate::handler::{Action, InputMode};
use crate::nav::{Navigator, DEFAULT_PREFETCH};
use crate::source::{Feed, RawItem};
use crate::spinner::Spinner;
use crate::store::{ItemId, NodeStore};
use crate::theme::{dark_theme, resolve_theme, ThemeColors};
use crate::{text, ui};

/// How long a status message stays in the bar.
const STATUS_TTL: Duration = Duration::from_secs(3);

/// Launches an external viewer for a URL.
pub type Opener = Box<dyn FnMut(&str) -> std::io::Result<()> + Send>;

/// Settings the application needs from config.
pub struct AppOptions {
    pub feed: Feed,
    pub prefetch: usize,
    pub max_width: u16,
    pub item_url: String,
    pub mouse: bool,
    pub theme: ThemeColors,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            feed: Feed::Top,
            prefetch: DEFAULT_PREFETCH,
            max_width: DEFAULT_MAX_WIDTH,
            item_url: DEFAULT_ITEM_URL.to_string(),
            mouse: true,
            theme: dark_theme(),
        }
    }
}

impl From<&AppConfig> for AppOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            feed: config.feed(),
            prefetch: config.prefetch(),
            max_width: config.max_width(),
            item_url: config.item_url().to_string(),
            mouse: config.mouse_enabled(),
            theme: resolve_theme(&config.theme),
        }
    }
}

/// Main application state. Owned and mutated only by the update loop.
pub struct App {
    pub store: NodeStore,
    pub nav: Navigator,
    pub theme: ThemeColors,
    pub spinner: Spinner,
    pub feed: Feed,
    pub should_quit: bool,
    /// Something visible changed since the last draw.
    pub dirty: bool,
    /// Message, whether it is an error, and when it was set.
    pub status_message: Option<(String, bool, Instant)>,
    pub help: Option<HelpState>,
    /// Rows of the focus view body, refreshed before every draw.
    pub focus_page: usize,
    pub max_width: u16,
    item_url: String,
    mouse: bool,
    opener: Opener,
}

impl App {
    pub fn new(options: AppOptions) -> Self {
        Self {
            store: NodeStore::new(),
            nav: Navigator::new(options.prefetch),
            theme: options.theme,
            spinner: Spinner::new(),
            feed: options.feed,
            should_quit: false,
            dirty: true,
            status_message: None,
            help: None,
            focus_page: 10,
            max_width: options.max_width,
            item_url: options.item_url,
            mouse: options.mouse,
            opener: Box::new(|url: &str| webbrowser::open(url)),
        }
    }

    /// Replace the browser launcher.
    pub fn with_opener(mut self, opener: Opener) -> Self {
        self.opener = opener;
        self
    }

    pub fn mouse_enabled(&self) -> bool {
        self.mouse
    }

    pub fn input_mode(&self) -> InputMode {
        if self.help.is_some() {
            InputMode::Help
        } else if self.nav.is_focused() {
            InputMode::Focused
        } else {
            InputMode::Browsing
        }
    }

    /// Apply one user action.
    pub fn dispatch(&mut self, action: Action) {
        match (self.input_mode(), action) {
            (_, Action::Quit) => self.quit(),
            (_, Action::Resize(_, _)) => {}
            (_, Action::ToggleHelp) => {
                self.help = match self.help {
                    Some(_) => None,
                    None => Some(HelpState::default()),
                };
            }

            (InputMode::Help, action) => self.dispatch_help(action),
            (InputMode::Focused, action) => self.dispatch_focused(action),
            (InputMode::Browsing, action) => self.dispatch_browsing(action),
        }
        self.dirty = true;
    }

    fn dispatch_help(&mut self, action: Action) {
        let Some(help) = self.help.as_mut() else {
            return;
        };
        match action {
            Action::CursorDown => help.scroll_down(),
            Action::CursorUp => help.scroll_up(),
            _ => {}
        }
    }

    fn dispatch_focused(&mut self, action: Action) {
        let page = self.focus_page.max(1) as isize;
        match action {
            Action::CursorDown => self.nav.scroll_focus(1),
            Action::CursorUp => self.nav.scroll_focus(-1),
            Action::CursorFirst => self.nav.set_focus_scroll(0),
            // Clamped to the text length on the next draw.
            Action::CursorLast => self.nav.set_focus_scroll(usize::MAX),
            Action::PageDown => self.nav.scroll_focus(page),
            Action::PageUp => self.nav.scroll_focus(-page),
            Action::ExitFocus => self.nav.exit_focus(),
            Action::OpenLink => self.open_link(),
            Action::OpenInExternalViewer => self.open_discussion(),
            _ => {}
        }
    }

    fn dispatch_browsing(&mut self, action: Action) {
        let store = &mut self.store;
        match action {
            Action::CursorDown => self.nav.cursor_down(store),
            Action::CursorUp => self.nav.cursor_up(store),
            Action::CursorFirst => self.nav.move_cursor(0, store),
            Action::CursorLast => self.nav.move_cursor(-1, store),
            Action::PageDown => self.nav.page_down(store),
            Action::PageUp => self.nav.page_up(store),
            Action::JumpToDigit(n) => self.nav.move_cursor(n as isize, store),
            Action::Enter => {
                self.nav.enter(store);
            }
            Action::Back => {
                self.nav.back();
            }
            Action::ToggleHidden => {
                self.nav.toggle_hidden(store);
            }
            Action::EnterFocus => {
                self.nav.enter_focus(store);
            }
            Action::CollapseParent => self.nav.toggle_collapse_parent(),
            Action::OpenLink => self.open_link(),
            Action::OpenInExternalViewer => self.open_discussion(),
            _ => {}
        }
    }

    /// Record a finished item fetch.
    pub fn handle_item_fetched(&mut self, id: ItemId, result: std::result::Result<RawItem, FetchError>) {
        self.store.resolve(id, result);
        self.dirty = true;
    }

    /// Record the root collection. Failure is fatal for the session.
    pub fn handle_collection(&mut self, result: std::result::Result<Vec<ItemId>, FetchError>) -> Result<()> {
        let ids = result.map_err(AppError::Bootstrap)?;
        tracing::info!(feed = self.feed.label(), count = ids.len(), "root collection loaded");
        self.store.set_root_children(ids);
        // Request the first entry and look ahead into it.
        self.nav.move_cursor(0, &mut self.store);
        self.dirty = true;
        Ok(())
    }

    /// Layout phase of a frame, run on the update loop before drawing:
    /// request every item the frame will show and fit the focus scroll to
    /// the text.
    pub fn prepare_frame(&mut self, area: Rect) {
        let plan = ui::plan(self, area, text::now_unix());
        for id in plan.visible {
            self.store.get_or_queue(id);
        }
        if let Some(focus) = plan.focus {
            self.focus_page = focus.page;
            self.nav.clamp_focus_scroll(FocusWidget::max_scroll(focus.rows));
        }
    }

    /// Periodic housekeeping: expire messages and animate the spinner while
    /// anything is loading.
    pub fn on_tick(&mut self) {
        if self.clear_expired_status() {
            self.dirty = true;
        }
        let busy = !self.store.is_ready() || self.store.loading_count() > 0;
        if busy && self.spinner.advance() {
            self.dirty = true;
        }
    }

    fn open_link(&mut self) {
        match self.nav.link_target(&self.store) {
            Some(url) => self.open_url(&url),
            None => self.set_status_message("No link to open".to_string()),
        }
    }

    fn open_discussion(&mut self) {
        match self.nav.discussion_target(&self.store) {
            Some(id) => {
                let url = format!("{}{}", self.item_url, id);
                self.open_url(&url);
            }
            None => self.set_status_message("Nothing selected".to_string()),
        }
    }

    fn open_url(&mut self, url: &str) {
        match (self.opener)(url) {
            Ok(()) => {
                tracing::debug!(url, "opened in browser");
                self.set_status_message(format!("Opened {url}"));
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "could not open browser");
                self.set_error_message(format!("Could not open browser: {e}"));
            }
        }
    }

    /// Set a transient status message.
    pub fn set_status_message(&mut self, msg: String) {
        self.status_message = Some((msg, false, Instant::now()));
        self.dirty = true;
    }

    pub fn set_error_message(&mut self, msg: String) {
        self.status_message = Some((msg, true, Instant::now()));
        self.dirty = true;
    }

    /// Clear the status message once it is older than three seconds.
    /// Returns whether a message was removed.
    pub fn clear_expired_status(&mut self) -> bool {
        match self.status_message {
            Some((_, _, created)) if created.elapsed() >= STATUS_TTL => {
                self.status_message = None;
                true
            }
            _ => false,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
