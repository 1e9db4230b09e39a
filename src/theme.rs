//! Theme data model: built-in palettes and resolution from config.
//!
//! The theme system provides two built-in palettes (dark and light) and
//! supports custom color overrides from the config file.

use ratatui::style::Color;

use crate::config::{ThemeColorsConfig, ThemeConfig};

// ── Runtime theme colors ─────────────────────────────────────────────────────

/// All runtime colors used in the UI.
///
/// Constructed from a config-level `ThemeConfig` via `resolve_theme()`.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Title bar
    pub title_bg: Color,
    pub title_fg: Color,

    // Item text
    pub fg: Color,
    pub secondary_fg: Color,
    pub link_fg: Color,
    pub score_fg: Color,

    // List chrome
    pub cursor_fg: Color,
    pub separator_fg: Color,
    pub border_fg: Color,

    // Status bar
    pub status_bg: Color,
    pub status_fg: Color,

    // Semantic
    pub error_fg: Color,
    pub spinner_fg: Color,
    pub accent_fg: Color,
}

// ── Built-in palettes ────────────────────────────────────────────────────────

/// Dark theme on the Dracula palette with the Hacker News orange title bar.
pub fn dark_theme() -> ThemeColors {
    ThemeColors {
        title_bg: Color::Rgb(255, 102, 0), // #ff6600 (hn orange)
        title_fg: Color::Rgb(248, 248, 242), // #f8f8f2 (foreground)

        fg: Color::Rgb(248, 248, 242),
        secondary_fg: Color::Rgb(134, 127, 116), // #867f74
        link_fg: Color::Rgb(134, 127, 116),
        score_fg: Color::Rgb(110, 239, 192), // #6eefc0 (cyan2)

        cursor_fg: Color::Rgb(80, 250, 123), // #50fa7b (green)
        separator_fg: Color::Rgb(248, 248, 242),
        border_fg: Color::Rgb(139, 233, 253), // #8be9fd (cyan)

        status_bg: Color::Rgb(40, 42, 55), // #282a37 (background)
        status_fg: Color::Rgb(248, 248, 242),

        error_fg: Color::Rgb(255, 85, 85),    // #ff5555 (red)
        spinner_fg: Color::Rgb(255, 102, 0),  // #ff6600
        accent_fg: Color::Rgb(189, 147, 249), // #bd93f9 (purple)
    }
}

/// Light palette for bright terminals.
pub fn light_theme() -> ThemeColors {
    ThemeColors {
        title_bg: Color::Rgb(255, 102, 0),
        title_fg: Color::Rgb(34, 34, 34), // #222222

        fg: Color::Rgb(34, 34, 34),
        secondary_fg: Color::Rgb(130, 130, 130), // #828282
        link_fg: Color::Rgb(130, 130, 130),
        score_fg: Color::Rgb(23, 146, 153), // #179299 (teal)

        cursor_fg: Color::Rgb(64, 160, 43), // #40a02b (green)
        separator_fg: Color::Rgb(172, 176, 190), // #acb0be
        border_fg: Color::Rgb(30, 102, 245), // #1e66f5 (blue)

        status_bg: Color::Rgb(246, 246, 239), // #f6f6ef (hn beige)
        status_fg: Color::Rgb(34, 34, 34),

        error_fg: Color::Rgb(210, 15, 57),   // #d20f39 (red)
        spinner_fg: Color::Rgb(255, 102, 0),
        accent_fg: Color::Rgb(136, 57, 239), // #8839ef (mauve)
    }
}

// ── Color parsing ────────────────────────────────────────────────────────────

/// Parse a hex color string like `"#aabbcc"` into a `ratatui::style::Color`.
/// Returns `None` for malformed input.
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

/// Parse a hex color string, falling back to the provided default on error.
fn parse_or(hex: &str, fallback: Color) -> Color {
    parse_hex_color(hex).unwrap_or(fallback)
}

// ── Theme resolution ─────────────────────────────────────────────────────────

/// Resolve the final `ThemeColors` from config.
///
/// - `"dark"` (default): Dracula palette
/// - `"light"`: light palette
/// - `"custom"`: start from dark palette, then override with custom hex values
pub fn resolve_theme(config: &ThemeConfig) -> ThemeColors {
    let scheme = config.scheme.as_deref().unwrap_or("dark");
    match scheme {
        "light" => light_theme(),
        "custom" => {
            let mut theme = dark_theme();
            if let Some(custom) = &config.custom {
                apply_custom_colors(&mut theme, custom);
            }
            theme
        }
        _ => dark_theme(),
    }
}

/// Apply custom hex color overrides on top of an existing theme.
fn apply_custom_colors(theme: &mut ThemeColors, custom: &ThemeColorsConfig) {
    if let Some(ref c) = custom.title_bg {
        theme.title_bg = parse_or(c, theme.title_bg);
    }
    if let Some(ref c) = custom.title_fg {
        theme.title_fg = parse_or(c, theme.title_fg);
    }
    if let Some(ref c) = custom.fg {
        theme.fg = parse_or(c, theme.fg);
    }
    if let Some(ref c) = custom.secondary_fg {
        theme.secondary_fg = parse_or(c, theme.secondary_fg);
    }
    if let Some(ref c) = custom.link_fg {
        theme.link_fg = parse_or(c, theme.link_fg);
    }
    if let Some(ref c) = custom.score_fg {
        theme.score_fg = parse_or(c, theme.score_fg);
    }
    if let Some(ref c) = custom.cursor_fg {
        theme.cursor_fg = parse_or(c, theme.cursor_fg);
    }
    if let Some(ref c) = custom.separator_fg {
        theme.separator_fg = parse_or(c, theme.separator_fg);
    }
    if let Some(ref c) = custom.border_fg {
        theme.border_fg = parse_or(c, theme.border_fg);
    }
    if let Some(ref c) = custom.status_bg {
        theme.status_bg = parse_or(c, theme.status_bg);
    }
    if let Some(ref c) = custom.status_fg {
        theme.status_fg = parse_or(c, theme.status_fg);
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
