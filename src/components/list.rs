use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use super::item::ItemView;
use crate::store::ItemId;
use crate::viewport::{paginate_with, Viewport};

/// Geometry of the sibling list for one frame.
///
/// Each item takes its content rows plus one separator rule below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListLayout {
    pub viewport: Option<Viewport>,
    /// Columns taken by the cursor marker and index.
    pub gutter: usize,
    /// Columns left for item content.
    pub content_width: usize,
}

impl ListLayout {
    /// Fit a window around `cursor` into `rows`, measuring items lazily.
    pub fn compute(
        view: &ItemView<'_>,
        children: &[ItemId],
        cursor: usize,
        width: usize,
        rows: usize,
    ) -> Self {
        let gutter = gutter_width(children.len());
        let content_width = width.saturating_sub(gutter).max(1);
        let viewport = paginate_with(children.len(), cursor, rows, |i| {
            view.height(children[i], content_width, false) + 1
        });
        Self {
            viewport,
            gutter,
            content_width,
        }
    }
}

/// `>` marker, space, the widest index, `.` and a space.
fn gutter_width(count: usize) -> usize {
    let digits = count.saturating_sub(1).max(1).to_string().len();
    digits + 4
}

/// Paginated list of the open node's children.
pub struct ListWidget<'a> {
    view: &'a ItemView<'a>,
    children: &'a [ItemId],
    cursor: usize,
    layout: ListLayout,
    cursor_style: Style,
    rule_style: Style,
}

impl<'a> ListWidget<'a> {
    pub fn new(
        view: &'a ItemView<'a>,
        children: &'a [ItemId],
        cursor: usize,
        layout: ListLayout,
    ) -> Self {
        Self {
            view,
            children,
            cursor,
            layout,
            cursor_style: Style::default(),
            rule_style: Style::default(),
        }
    }

    /// Style of the cursor marker and the rules around the cursor item.
    pub fn cursor_style(mut self, style: Style) -> Self {
        self.cursor_style = style;
        self
    }

    pub fn rule_style(mut self, style: Style) -> Self {
        self.rule_style = style;
        self
    }

    fn gutter(&self, index: usize, first_row: bool) -> Vec<Span<'static>> {
        let digits = self.layout.gutter - 4;
        if !first_row {
            return vec![Span::raw(" ".repeat(self.layout.gutter))];
        }
        let highlight = index == self.cursor;
        let marker = if highlight {
            Span::styled(">", self.cursor_style.add_modifier(Modifier::BOLD))
        } else {
            Span::raw(" ")
        };
        let number_style = if highlight {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        vec![
            marker,
            Span::styled(format!(" {index:>digits$}. "), number_style),
        ]
    }
}

impl<'a> Widget for ListWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(viewport) = self.layout.viewport else {
            return;
        };
        if area.height == 0 || area.width == 0 {
            return;
        }

        let bottom = area.y + area.height;
        let mut y = area.y;
        for index in viewport.range() {
            if y >= bottom {
                break;
            }
            let Some(&id) = self.children.get(index) else {
                break;
            };
            let highlight = index == self.cursor;
            let rows = self
                .view
                .lines(id, self.layout.content_width, highlight, false);

            for (row_index, row) in rows.into_iter().enumerate() {
                if y >= bottom {
                    return;
                }
                let mut spans = self.gutter(index, row_index == 0);
                spans.extend(row.spans);
                buf.set_line(area.x, y, &Line::from(spans), area.width);
                y += 1;
            }

            if y >= bottom {
                return;
            }
            // Rules touching the cursor item take the cursor color.
            let style = if highlight || index + 1 == self.cursor {
                self.cursor_style
            } else {
                self.rule_style
            };
            let rule = "─".repeat(area.width as usize);
            buf.set_string(area.x, y, rule, style);
            y += 1;
        }
    }
}
