use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::store::{ItemId, Node, NodeKind, NodeState, NodeStore, Payload};
use crate::text;
use crate::theme::ThemeColors;

/// Rows shown for an item whose fetch has not finished.
const LOADING_ROWS: usize = 2;

/// Builds the pre-wrapped rows of a single item.
///
/// Height and rendering come from the same lines, so the paginator and the
/// widgets can never disagree about how tall an item is.
pub struct ItemView<'a> {
    store: &'a NodeStore,
    theme: &'a ThemeColors,
    spinner: &'a str,
    now: i64,
}

impl<'a> ItemView<'a> {
    pub fn new(store: &'a NodeStore, theme: &'a ThemeColors, spinner: &'a str, now: i64) -> Self {
        Self {
            store,
            theme,
            spinner,
            now,
        }
    }

    /// Rows of `id` at `width` columns.
    ///
    /// `highlight` bolds the item under the cursor. `expanded` is set for the
    /// open or focused item: it shows the body and poll options, and ignores
    /// the hidden flag.
    pub fn lines(
        &self,
        id: ItemId,
        width: usize,
        highlight: bool,
        expanded: bool,
    ) -> Vec<Line<'static>> {
        let width = width.max(1);
        let Some(node) = self.store.get(id) else {
            return self.loading_view(width, highlight);
        };

        match (node.state, &node.payload) {
            (NodeState::Unrequested | NodeState::Pending, _) => {
                self.loading_view(width, highlight)
            }
            (NodeState::Failed, _) => self.unavailable_view(width, highlight),
            (NodeState::Loaded, None) => self.unavailable_view(width, highlight),
            (NodeState::Loaded, Some(payload)) if payload.removed => {
                self.deleted_view(payload, width, highlight)
            }
            (NodeState::Loaded, Some(payload)) if node.hidden && !expanded => {
                self.hidden_view(payload, width, highlight)
            }
            (NodeState::Loaded, Some(payload)) => match node.kind {
                NodeKind::Collection => self.collection_view(node, width, highlight),
                NodeKind::Entry | NodeKind::Poll => {
                    self.entry_view(node, payload, width, highlight, expanded)
                }
                NodeKind::Thread => self.thread_view(payload, width, highlight),
                NodeKind::PollOption => self.poll_option_view(payload, width, highlight),
            },
        }
    }

    /// Row count of `id` at `width` columns.
    pub fn height(&self, id: ItemId, width: usize, expanded: bool) -> usize {
        self.lines(id, width, false, expanded).len()
    }

    fn primary(&self, highlight: bool) -> Style {
        bold_if(Style::default().fg(self.theme.fg), highlight)
    }

    fn secondary(&self, highlight: bool) -> Style {
        bold_if(Style::default().fg(self.theme.secondary_fg), highlight)
    }

    fn age(&self, payload: &Payload) -> String {
        text::relative_time(payload.time, self.now)
    }

    fn loading_view(&self, width: usize, highlight: bool) -> Vec<Line<'static>> {
        let label = text::truncate("Loading...", width.saturating_sub(2));
        let mut lines = vec![Line::from(vec![
            Span::styled(self.spinner.to_string(), Style::default().fg(self.theme.spinner_fg)),
            Span::raw(" "),
            Span::styled(label, self.secondary(highlight)),
        ])];
        lines.resize(LOADING_ROWS, Line::styled("...", self.secondary(highlight)));
        lines
    }

    fn unavailable_view(&self, width: usize, highlight: bool) -> Vec<Line<'static>> {
        vec![Line::styled(
            text::truncate("[unavailable]", width),
            self.secondary(highlight),
        )]
    }

    fn deleted_view(&self, payload: &Payload, width: usize, highlight: bool) -> Vec<Line<'static>> {
        let label = format!("[deleted] {}", self.age(payload));
        vec![Line::styled(text::truncate(&label, width), self.secondary(highlight))]
    }

    fn hidden_view(&self, payload: &Payload, width: usize, highlight: bool) -> Vec<Line<'static>> {
        let label = format!("(hidden) {} {}", payload.author, self.age(payload));
        vec![Line::styled(text::truncate(&label, width), self.secondary(highlight))]
    }

    fn collection_view(&self, node: &Node, width: usize, highlight: bool) -> Vec<Line<'static>> {
        let label = format!("{} items", node.child_count());
        vec![Line::styled(text::truncate(&label, width), self.primary(highlight))]
    }

    fn entry_view(
        &self,
        node: &Node,
        payload: &Payload,
        width: usize,
        highlight: bool,
        expanded: bool,
    ) -> Vec<Line<'static>> {
        let mut lines = self.title_lines(payload, width, highlight);

        if expanded {
            lines.extend(
                text::wrap(&payload.body, width)
                    .into_iter()
                    .map(|row| Line::styled(row, self.primary(false))),
            );

            if node.kind == NodeKind::Poll {
                for &option in &payload.poll_options {
                    let rows = self.lines(option, width.saturating_sub(2), false, false);
                    lines.extend(rows.into_iter().map(indent));
                }
            }
        }

        lines.push(self.meta_line(payload, width, highlight));
        lines
    }

    /// Wrapped title with the link domain appended when it fits, or on its
    /// own row when it does not.
    fn title_lines(&self, payload: &Payload, width: usize, highlight: bool) -> Vec<Line<'static>> {
        let mut rows: Vec<Line<'static>> = text::wrap(&payload.title, width)
            .into_iter()
            .map(|row| Line::styled(row, self.primary(highlight)))
            .collect();
        if rows.is_empty() {
            rows.push(Line::default());
        }

        let Some(domain) = &payload.domain else {
            return rows;
        };
        let domain_style = self
            .secondary(highlight)
            .fg(self.theme.link_fg)
            .add_modifier(Modifier::ITALIC);
        let suffix = format!(" ({domain})");

        let last = rows.len() - 1;
        if rows[last].width() + text::display_width(&suffix) <= width {
            rows[last].spans.push(Span::styled(suffix, domain_style));
        } else {
            rows.push(Line::styled(
                text::truncate(&format!("({domain})"), width),
                domain_style,
            ));
        }
        rows
    }

    fn meta_line(&self, payload: &Payload, width: usize, highlight: bool) -> Line<'static> {
        let points = format!("{} points", payload.score);
        let rest = format!(
            " by {} {} | {} comments",
            payload.author,
            self.age(payload),
            payload.descendants
        );

        if text::display_width(&points) + text::display_width(&rest) <= width {
            Line::from(vec![
                Span::styled(
                    points,
                    bold_if(Style::default().fg(self.theme.score_fg), highlight),
                ),
                Span::styled(rest, self.secondary(highlight)),
            ])
        } else {
            Line::styled(
                text::truncate(&format!("{points}{rest}"), width),
                self.secondary(highlight),
            )
        }
    }

    fn thread_view(&self, payload: &Payload, width: usize, highlight: bool) -> Vec<Line<'static>> {
        let header = format!("{} {}", payload.author, self.age(payload));
        let mut lines = vec![Line::styled(
            text::truncate(&header, width),
            self.secondary(highlight),
        )];
        lines.extend(
            text::wrap(&payload.body, width)
                .into_iter()
                .map(|row| Line::styled(row, self.primary(false))),
        );
        lines
    }

    fn poll_option_view(
        &self,
        payload: &Payload,
        width: usize,
        highlight: bool,
    ) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = text::wrap(&payload.body, width)
            .into_iter()
            .map(|row| Line::styled(row, self.primary(highlight)))
            .collect();
        lines.push(Line::styled(
            text::truncate(&format!("{} points", payload.score), width),
            bold_if(Style::default().fg(self.theme.score_fg), highlight),
        ));
        lines
    }
}

fn bold_if(style: Style, on: bool) -> Style {
    if on {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

fn indent(line: Line<'static>) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    spans.extend(line.spans);
    Line::from(spans)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::source::RawItem;
    use crate::store::tests::raw;
    use crate::theme::dark_theme;

    pub(crate) const NOW: i64 = 1_700_000_000;

    pub(crate) fn text_of(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn texts(lines: &[Line<'_>]) -> Vec<String> {
        lines.iter().map(text_of).collect()
    }

    fn insert(store: &mut NodeStore, item: RawItem) {
        let id = item.id;
        store.get_or_queue(id);
        store.resolve(id, Ok(item));
    }

    fn story(id: ItemId) -> RawItem {
        RawItem {
            title: Some("Rust in the kernel".into()),
            url: Some("https://lwn.net/Articles/1".into()),
            score: 42,
            time: NOW - 2 * 3600,
            descendants: 7,
            ..raw(id, "story", &[])
        }
    }

    #[test]
    fn entry_shows_title_domain_and_meta() {
        let mut store = NodeStore::new();
        insert(&mut store, story(1));
        let theme = dark_theme();
        let view = ItemView::new(&store, &theme, "⠋", NOW);

        let lines = texts(&view.lines(1, 60, false, false));
        assert_eq!(
            lines,
            vec![
                "Rust in the kernel (lwn.net)".to_string(),
                "42 points by someone 2 hours ago | 7 comments".to_string(),
            ]
        );
    }

    #[test]
    fn domain_moves_to_own_row_when_narrow() {
        let mut store = NodeStore::new();
        insert(&mut store, story(1));
        let theme = dark_theme();
        let view = ItemView::new(&store, &theme, "⠋", NOW);

        let lines = texts(&view.lines(1, 20, false, false));
        assert_eq!(lines[0], "Rust in the kernel");
        assert_eq!(lines[1], "(lwn.net)");
    }

    #[test]
    fn expanded_entry_includes_body() {
        let mut store = NodeStore::new();
        insert(
            &mut store,
            RawItem {
                text: Some("<p>Hello</p><p>World</p>".into()),
                ..story(1)
            },
        );
        let theme = dark_theme();
        let view = ItemView::new(&store, &theme, "⠋", NOW);

        let collapsed = view.height(1, 60, false);
        let expanded = texts(&view.lines(1, 60, true, true));
        assert_eq!(expanded.len(), collapsed + 3);
        assert_eq!(&expanded[1..4], &["Hello", "", "World"]);
    }

    #[test]
    fn thread_shows_author_then_body() {
        let mut store = NodeStore::new();
        insert(
            &mut store,
            RawItem {
                by: Some("pg".into()),
                time: NOW - 90,
                text: Some("Nice &amp; short".into()),
                ..raw(2, "comment", &[])
            },
        );
        let theme = dark_theme();
        let view = ItemView::new(&store, &theme, "⠋", NOW);

        assert_eq!(
            texts(&view.lines(2, 40, false, false)),
            vec!["pg a minute ago", "Nice & short"]
        );
    }

    #[test]
    fn pending_and_missing_items_show_loading() {
        let mut store = NodeStore::new();
        store.get_or_queue(5);
        let theme = dark_theme();
        let view = ItemView::new(&store, &theme, "⠙", NOW);

        let pending = texts(&view.lines(5, 30, false, false));
        assert_eq!(pending, vec!["⠙ Loading...", "..."]);
        assert_eq!(texts(&view.lines(99, 30, false, false)), pending);
    }

    #[test]
    fn failed_item_is_unavailable() {
        let mut store = NodeStore::new();
        store.get_or_queue(5);
        store.resolve(5, Err(FetchError::Missing(5)));
        let theme = dark_theme();
        let view = ItemView::new(&store, &theme, "⠋", NOW);
        assert_eq!(texts(&view.lines(5, 30, false, false)), vec!["[unavailable]"]);
    }

    #[test]
    fn deleted_item_shows_marker() {
        let mut store = NodeStore::new();
        insert(
            &mut store,
            RawItem {
                deleted: true,
                time: NOW - 3 * 86_400,
                ..raw(3, "comment", &[])
            },
        );
        let theme = dark_theme();
        let view = ItemView::new(&store, &theme, "⠋", NOW);
        assert_eq!(
            texts(&view.lines(3, 30, false, false)),
            vec!["[deleted] 3 days ago"]
        );
    }

    #[test]
    fn hidden_item_collapses_unless_expanded() {
        let mut store = NodeStore::new();
        insert(
            &mut store,
            RawItem {
                text: Some("body".into()),
                time: NOW,
                ..raw(4, "comment", &[])
            },
        );
        store.toggle_hidden(4);
        let theme = dark_theme();
        let view = ItemView::new(&store, &theme, "⠋", NOW);

        assert_eq!(
            texts(&view.lines(4, 40, false, false)),
            vec!["(hidden) someone 0 seconds ago"]
        );
        assert_eq!(view.height(4, 40, true), 2);
    }

    #[test]
    fn poll_expands_options() {
        let mut store = NodeStore::new();
        insert(
            &mut store,
            RawItem {
                parts: vec![11, 12],
                ..raw(10, "poll", &[])
            },
        );
        insert(
            &mut store,
            RawItem {
                text: Some("Yes".into()),
                score: 5,
                ..raw(11, "pollopt", &[])
            },
        );
        let theme = dark_theme();
        let view = ItemView::new(&store, &theme, "⠋", NOW);

        let lines = texts(&view.lines(10, 40, false, true));
        assert_eq!(lines[0], "Item 10");
        assert_eq!(lines[1], "  Yes");
        assert_eq!(lines[2], "  5 points");
        assert_eq!(lines[3], "  ⠋ Loading...");
        assert_eq!(lines[4], "  ...");
        assert!(lines[5].starts_with("0 points by someone"));

        // Collapsed polls list only title and meta.
        assert_eq!(view.height(10, 40, false), 2);
    }

    #[test]
    fn cursor_item_is_bold() {
        let mut store = NodeStore::new();
        insert(&mut store, story(1));
        let theme = dark_theme();
        let view = ItemView::new(&store, &theme, "⠋", NOW);

        let lines = view.lines(1, 60, true, false);
        assert!(lines[0].spans[0]
            .style
            .add_modifier
            .contains(Modifier::BOLD));
        let plain = view.lines(1, 60, false, false);
        assert!(!plain[0].spans[0]
            .style
            .add_modifier
            .contains(Modifier::BOLD));
    }
}
