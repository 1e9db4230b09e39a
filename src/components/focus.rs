use ratatui::{buffer::Buffer, layout::Rect, style::Style, text::Line, widgets::Widget};

/// Full text of a single item, scrolled independently of the list.
pub struct FocusWidget<'a> {
    lines: &'a [Line<'static>],
    scroll: usize,
    indicator_style: Style,
}

impl<'a> FocusWidget<'a> {
    pub fn new(lines: &'a [Line<'static>], scroll: usize) -> Self {
        Self {
            lines,
            scroll,
            indicator_style: Style::default(),
        }
    }

    pub fn indicator_style(mut self, style: Style) -> Self {
        self.indicator_style = style;
        self
    }

    /// Largest useful scroll offset: the last row stays on screen.
    pub fn max_scroll(line_count: usize) -> usize {
        line_count.saturating_sub(1)
    }
}

impl<'a> Widget for FocusWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let visible = area.height as usize;
        let scroll = self.scroll.min(Self::max_scroll(self.lines.len()));

        for (i, line) in self.lines.iter().skip(scroll).take(visible).enumerate() {
            buf.set_line(area.x, area.y + i as u16, line, area.width);
        }

        // Position marker when the text does not fit.
        if self.lines.len() > visible {
            let marker = format!(" {}/{} ", scroll + 1, self.lines.len());
            let width = marker.chars().count() as u16;
            if width < area.width {
                let x = area.x + area.width - width;
                buf.set_string(x, area.y, marker, self.indicator_style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    fn numbered(n: usize) -> Vec<Line<'static>> {
        (0..n).map(|i| Line::from(format!("line {i}"))).collect()
    }

    #[test]
    fn scroll_skips_leading_rows() {
        let lines = numbered(3);
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        FocusWidget::new(&lines, 1).render(area, &mut buf);
        assert_eq!(row(&buf, 0), "line 1");
        assert_eq!(row(&buf, 1), "line 2");
        assert_eq!(row(&buf, 2), "");
    }

    #[test]
    fn scroll_is_clamped_to_last_row() {
        let lines = numbered(2);
        let area = Rect::new(0, 0, 20, 2);
        let mut buf = Buffer::empty(area);
        FocusWidget::new(&lines, 50).render(area, &mut buf);
        assert_eq!(row(&buf, 0), "line 1");
    }

    #[test]
    fn overflow_shows_position() {
        let lines = numbered(10);
        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);
        FocusWidget::new(&lines, 2).render(area, &mut buf);
        assert!(row(&buf, 0).starts_with("line 2"));
        assert!(row(&buf, 0).ends_with("3/10"));
    }

    #[test]
    fn max_scroll_of_empty_text_is_zero() {
        assert_eq!(FocusWidget::max_scroll(0), 0);
        assert_eq!(FocusWidget::max_scroll(7), 6);
    }
}
