use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Widget},
};

use crate::theme::ThemeColors;

/// State for the help overlay.
#[derive(Debug, Default)]
pub struct HelpState {
    /// Scroll offset for the help content.
    pub scroll_offset: usize,
}

impl HelpState {
    pub fn scroll_down(&mut self) {
        let max = HelpOverlay::total_lines().saturating_sub(1);
        self.scroll_offset = (self.scroll_offset + 1).min(max);
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }
}

/// A single keybinding entry for display.
struct KeyEntry {
    key: &'static str,
    description: &'static str,
}

/// A category of keybindings.
struct KeyCategory {
    name: &'static str,
    entries: &'static [KeyEntry],
}

const LIST_KEYS: &[KeyEntry] = &[
    KeyEntry {
        key: "j / ↓ / wheel",
        description: "Next item",
    },
    KeyEntry {
        key: "k / ↑ / wheel",
        description: "Previous item",
    },
    KeyEntry {
        key: "g / Home",
        description: "First item",
    },
    KeyEntry {
        key: "G / End",
        description: "Last item",
    },
    KeyEntry {
        key: "PgUp / PgDn",
        description: "Move ten items",
    },
    KeyEntry {
        key: "0-9",
        description: "Jump to item number",
    },
    KeyEntry {
        key: "Enter / l / →",
        description: "Open replies",
    },
    KeyEntry {
        key: "Esc / h / ← / Bksp",
        description: "Back to parent",
    },
    KeyEntry {
        key: "Space",
        description: "Hide / unhide item",
    },
    KeyEntry {
        key: "F",
        description: "Collapse parent box",
    },
];

const READING_KEYS: &[KeyEntry] = &[
    KeyEntry {
        key: "f",
        description: "Read item in focus / leave focus",
    },
    KeyEntry {
        key: "j / k",
        description: "Scroll focused text",
    },
    KeyEntry {
        key: "PgUp / PgDn",
        description: "Scroll one page",
    },
    KeyEntry {
        key: "o",
        description: "Open story link in browser",
    },
    KeyEntry {
        key: "O",
        description: "Open discussion page in browser",
    },
];

const GENERAL_KEYS: &[KeyEntry] = &[
    KeyEntry {
        key: "?",
        description: "Toggle this help overlay",
    },
    KeyEntry {
        key: "q / Ctrl+C",
        description: "Quit",
    },
];

const CATEGORIES: &[KeyCategory] = &[
    KeyCategory {
        name: "Browsing",
        entries: LIST_KEYS,
    },
    KeyCategory {
        name: "Reading",
        entries: READING_KEYS,
    },
    KeyCategory {
        name: "General",
        entries: GENERAL_KEYS,
    },
];

/// Help overlay widget showing all keybindings.
pub struct HelpOverlay<'a> {
    theme: &'a ThemeColors,
    scroll_offset: usize,
}

impl<'a> HelpOverlay<'a> {
    pub fn new(theme: &'a ThemeColors, scroll_offset: usize) -> Self {
        Self {
            theme,
            scroll_offset,
        }
    }

    fn build_content_lines(&self) -> Vec<Line<'static>> {
        let heading = Style::default()
            .fg(self.theme.accent_fg)
            .add_modifier(Modifier::BOLD);
        let mut lines: Vec<Line<'static>> = Vec::new();

        for category in CATEGORIES {
            lines.push(Line::from(vec![
                Span::styled(format!("── {} ", category.name), heading),
                Span::styled("─".repeat(30), Style::default().fg(self.theme.secondary_fg)),
            ]));

            for entry in category.entries {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  {:<22}", entry.key),
                        Style::default()
                            .fg(self.theme.cursor_fg)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(entry.description, Style::default().fg(self.theme.fg)),
                ]));
            }

            lines.push(Line::from(""));
        }

        lines.push(Line::styled(
            " Press ? or Esc to close ",
            Style::default().fg(self.theme.secondary_fg),
        ));
        lines
    }

    /// Total number of content lines (for scroll bounds).
    pub fn total_lines() -> usize {
        CATEGORIES
            .iter()
            .map(|category| category.entries.len() + 2)
            .sum::<usize>()
            + 1
    }
}

impl<'a> Widget for HelpOverlay<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let overlay_width = (area.width * 7 / 10).clamp(area.width.min(40), 70);
        let overlay_height = (area.height * 8 / 10).min(HelpOverlay::total_lines() as u16 + 2);

        let x = area.x + area.width.saturating_sub(overlay_width) / 2;
        let y = area.y + area.height.saturating_sub(overlay_height) / 2;
        let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

        Clear.render(overlay_area, buf);

        let block = Block::default()
            .title(" Keys ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.theme.border_fg))
            .style(Style::default().bg(self.theme.status_bg));
        let inner = block.inner(overlay_area);
        block.render(overlay_area, buf);

        let content_lines = self.build_content_lines();
        let visible_height = inner.height as usize;

        for (i, line) in content_lines
            .iter()
            .skip(self.scroll_offset)
            .take(visible_height)
            .enumerate()
        {
            buf.set_line(
                inner.x + 1,
                inner.y + i as u16,
                line,
                inner.width.saturating_sub(2),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::dark_theme;

    #[test]
    fn all_categories_have_entries() {
        for cat in CATEGORIES {
            assert!(!cat.entries.is_empty(), "Category '{}' has no entries", cat.name);
        }
    }

    #[test]
    fn content_lines_match_total() {
        let theme = dark_theme();
        let overlay = HelpOverlay::new(&theme, 0);
        assert_eq!(overlay.build_content_lines().len(), HelpOverlay::total_lines());
    }

    #[test]
    fn scroll_stays_in_bounds() {
        let mut state = HelpState::default();
        state.scroll_up();
        assert_eq!(state.scroll_offset, 0);
        for _ in 0..500 {
            state.scroll_down();
        }
        assert_eq!(state.scroll_offset, HelpOverlay::total_lines() - 1);
    }

    #[test]
    fn renders_title_and_first_category() {
        let theme = dark_theme();
        let area = Rect::new(0, 0, 80, 30);
        let mut buf = Buffer::empty(area);
        HelpOverlay::new(&theme, 0).render(area, &mut buf);

        let rows: Vec<String> = (0..30)
            .map(|y| {
                (0..80)
                    .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
                    .collect()
            })
            .collect();
        assert!(rows.iter().any(|r| r.contains("Keys")));
        assert!(rows.iter().any(|r| r.contains("── Browsing")));
        assert!(rows.iter().any(|r| r.contains("Open replies")));
    }

    #[test]
    fn tiny_area_does_not_panic() {
        let theme = dark_theme();
        let area = Rect::new(0, 0, 10, 3);
        let mut buf = Buffer::empty(area);
        HelpOverlay::new(&theme, 3).render(area, &mut buf);
    }
}
