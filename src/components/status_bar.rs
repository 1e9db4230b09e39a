use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::text;
use crate::theme::ThemeColors;

/// Bottom bar: breadcrumb, cursor position, loading count, and key hints or a
/// transient status message.
pub struct StatusBarWidget<'a> {
    breadcrumb: &'a str,
    position: &'a str,
    theme: &'a ThemeColors,
    hints: &'a str,
    status_message: Option<&'a str>,
    is_error: bool,
    loading: Option<(usize, &'a str)>,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(breadcrumb: &'a str, position: &'a str, theme: &'a ThemeColors) -> Self {
        Self {
            breadcrumb,
            position,
            theme,
            hints: "",
            status_message: None,
            is_error: false,
            loading: None,
        }
    }

    pub fn hints(mut self, hints: &'a str) -> Self {
        self.hints = hints;
        self
    }

    pub fn status_message(mut self, msg: &'a str, is_error: bool) -> Self {
        self.status_message = Some(msg);
        self.is_error = is_error;
        self
    }

    /// Show `count` in-flight items next to the spinner frame.
    pub fn loading(mut self, count: usize, spinner: &'a str) -> Self {
        if count > 0 {
            self.loading = Some((count, spinner));
        }
        self
    }
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let width = area.width as usize;
        let base = Style::default().bg(self.theme.status_bg).fg(self.theme.status_fg);
        buf.set_style(area, base);

        // Right side: transient message wins over key hints.
        let (right, right_style) = match self.status_message {
            Some(msg) if self.is_error => (
                format!(" {msg} "),
                base.fg(self.theme.error_fg).add_modifier(Modifier::BOLD),
            ),
            Some(msg) => (format!(" {msg} "), base.fg(self.theme.accent_fg)),
            None => (
                self.hints.to_string(),
                base.fg(self.theme.secondary_fg).add_modifier(Modifier::DIM),
            ),
        };

        let mut left = vec![
            Span::styled(format!(" {} ", self.position), base.add_modifier(Modifier::BOLD)),
            Span::styled(self.breadcrumb.to_string(), base),
        ];
        if let Some((count, frame)) = self.loading {
            left.push(Span::styled(
                format!("  {frame} {count} loading"),
                base.fg(self.theme.spinner_fg),
            ));
        }

        let left_width: usize = left.iter().map(|s| s.width()).sum();
        let right = text::truncate(&right, width.saturating_sub(left_width + 1));
        let right_width = text::display_width(&right);
        let gap = width.saturating_sub(left_width + right_width);

        left.push(Span::styled(" ".repeat(gap), base));
        left.push(Span::styled(right, right_style));
        buf.set_line(area.x, area.y, &Line::from(left), area.width);
    }
}
