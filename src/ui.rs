use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::components::focus::FocusWidget;
use crate::components::help::HelpOverlay;
use crate::components::item::ItemView;
use crate::components::list::{ListLayout, ListWidget};
use crate::components::status_bar::StatusBarWidget;
use crate::handler::InputMode;
use crate::nav::Mode;
use crate::store::{ItemId, NodeKind, ROOT_ID};
use crate::text;

const BROWSE_HINTS: &str = "j/k:move enter:open f:read o:link ?:help q:quit";
const FOCUS_HINTS: &str = "j/k:scroll f:back o:link O:discussion ?:help";
const HELP_HINTS: &str = "j/k:scroll ?:close";

/// Longest breadcrumb segment before truncation.
const CRUMB_WIDTH: usize = 24;

/// Children and focus geometry the next frame will show, measured without
/// touching the store.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ViewPlan {
    /// Ids inside the list window, in display order.
    pub visible: Vec<ItemId>,
    pub focus: Option<FocusGeometry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusGeometry {
    /// Body rows available to the text.
    pub page: usize,
    /// Wrapped rows of the focused item.
    pub rows: usize,
}

/// Measure the frame `render` will draw into `area`.
pub fn plan(app: &App, area: Rect, now: i64) -> ViewPlan {
    let mut plan = ViewPlan::default();
    if !app.store.is_ready() {
        return plan;
    }
    let [_, column, _] = regions(area, app.max_width);
    match app.nav.mode() {
        Mode::Focused { id, .. } => {
            plan.focus = Some(FocusGeometry {
                page: (column.height as usize).max(1),
                rows: focus_lines(app, column, id, now).len(),
            });
        }
        Mode::Browsing => {
            let (_, list_area) = browse_areas(app, column, now);
            if let Some((children, layout)) = list_layout(app, list_area, now) {
                if let Some(viewport) = layout.viewport {
                    plan.visible = viewport
                        .range()
                        .filter_map(|index| children.get(index).copied())
                        .collect();
                }
            }
        }
    }
    plan
}

/// Render the application UI. Only reads the app; anything the frame needs
/// loaded was queued by `App::prepare_frame`.
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();
    let [title_area, column, status_area] = regions(area, app.max_width);
    let now = text::now_unix();

    render_title(app, frame, title_area);
    if !app.store.is_ready() {
        render_loading(app, frame, column);
    } else {
        match app.nav.mode() {
            Mode::Focused { id, scroll } => render_focus(app, frame, column, id, scroll, now),
            Mode::Browsing => render_browsing(app, frame, column, now),
        }
    }
    render_status(app, frame, status_area);

    if let Some(help) = &app.help {
        frame.render_widget(HelpOverlay::new(&app.theme, help.scroll_offset), area);
    }
}

/// Title row, content column and status row.
fn regions(area: Rect, max_width: u16) -> [Rect; 3] {
    let [title_area, body_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);
    [title_area, content_column(body_area, max_width), status_area]
}

/// Centered column no wider than `max_width`.
fn content_column(area: Rect, max_width: u16) -> Rect {
    let width = area.width.min(max_width.max(1));
    let x = area.x + (area.width - width) / 2;
    Rect::new(x, area.y, width, area.height)
}

fn render_title(app: &App, frame: &mut Frame, area: Rect) {
    let style = Style::default()
        .bg(app.theme.title_bg)
        .fg(app.theme.title_fg);
    let line = Line::from(vec![
        Span::styled(" HackerReader", style.add_modifier(Modifier::BOLD)),
        Span::styled(format!(" · {}", app.feed.label()), style),
    ]);
    frame.render_widget(Paragraph::new(line).style(style), area);
}

fn render_loading(app: &App, frame: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    let msg = format!("{} Loading {}...", app.spinner.frame(), app.feed.label());
    let y = area.y + area.height / 2;
    let line = Line::styled(msg, Style::default().fg(app.theme.spinner_fg)).centered();
    frame.render_widget(Paragraph::new(line), Rect::new(area.x, y, area.width, 1));
}

/// Open-node box (below the root) and the list area under it.
fn browse_areas(app: &App, area: Rect, now: i64) -> (Option<Rect>, Rect) {
    if app.nav.depth() == 0 {
        return (None, area);
    }
    let [parent_area, list_area] = Layout::vertical([
        Constraint::Length(parent_box_height(app, area, app.nav.current(), now)),
        Constraint::Min(0),
    ])
    .areas(area);
    (Some(parent_area), list_area)
}

/// Children of the open node and their window, or `None` when it has none.
fn list_layout<'a>(app: &'a App, area: Rect, now: i64) -> Option<(&'a [ItemId], ListLayout)> {
    let children = app.store.get(app.nav.current())?.children.as_slice();
    if children.is_empty() {
        return None;
    }
    let view = ItemView::new(&app.store, &app.theme, app.spinner.frame(), now);
    let layout = ListLayout::compute(
        &view,
        children,
        app.nav.cursor(),
        area.width as usize,
        area.height as usize,
    );
    Some((children, layout))
}

fn render_browsing(app: &App, frame: &mut Frame, area: Rect, now: i64) {
    let (parent_area, list_area) = browse_areas(app, area, now);
    if let Some(parent_area) = parent_area {
        render_parent(app, frame, parent_area, app.nav.current(), now);
    }

    let Some((children, layout)) = list_layout(app, list_area, now) else {
        let line = Line::styled("Nothing here", Style::default().fg(app.theme.secondary_fg));
        frame.render_widget(Paragraph::new(line), list_area);
        return;
    };

    let view = ItemView::new(&app.store, &app.theme, app.spinner.frame(), now);
    let list = ListWidget::new(&view, children, app.nav.cursor(), layout)
        .cursor_style(Style::default().fg(app.theme.cursor_fg))
        .rule_style(Style::default().fg(app.theme.separator_fg));
    frame.render_widget(list, list_area);
}

/// Box height for the open node: its expanded rows plus borders, capped at
/// half the body.
fn parent_box_height(app: &App, area: Rect, id: ItemId, now: i64) -> u16 {
    let rows = if app.nav.parent_collapsed() {
        1
    } else {
        let view = ItemView::new(&app.store, &app.theme, app.spinner.frame(), now);
        view.height(id, area.width.saturating_sub(2) as usize, true)
    };
    let cap = (area.height / 2).max(3);
    (rows as u16).saturating_add(2).min(cap)
}

fn render_parent(app: &App, frame: &mut Frame, area: Rect, id: ItemId, now: i64) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(app.theme.border_fg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = if app.nav.parent_collapsed() {
        let label = crumb(app, id);
        vec![Line::styled(
            format!("{label} (collapsed)"),
            Style::default().fg(app.theme.secondary_fg),
        )]
    } else {
        let view = ItemView::new(&app.store, &app.theme, app.spinner.frame(), now);
        view.lines(id, inner.width as usize, false, true)
    };
    frame.render_widget(Paragraph::new(lines), inner);
}

fn focus_lines(app: &App, area: Rect, id: ItemId, now: i64) -> Vec<Line<'static>> {
    ItemView::new(&app.store, &app.theme, app.spinner.frame(), now).lines(
        id,
        area.width as usize,
        false,
        true,
    )
}

fn render_focus(app: &App, frame: &mut Frame, area: Rect, id: ItemId, scroll: usize, now: i64) {
    let lines = focus_lines(app, area, id, now);
    let indicator = Style::default()
        .fg(app.theme.status_fg)
        .bg(app.theme.status_bg);
    frame.render_widget(FocusWidget::new(&lines, scroll).indicator_style(indicator), area);
}

fn render_status(app: &App, frame: &mut Frame, area: Rect) {
    let breadcrumb = app
        .nav
        .path()
        .iter()
        .map(|&id| crumb(app, id))
        .collect::<Vec<_>>()
        .join(" › ");

    let count = app
        .store
        .get(app.nav.current())
        .map_or(0, |node| node.child_count());
    let position = if count == 0 {
        "0/0".to_string()
    } else {
        format!("{}/{}", app.nav.cursor() + 1, count)
    };

    let hints = match app.input_mode() {
        InputMode::Browsing => BROWSE_HINTS,
        InputMode::Focused => FOCUS_HINTS,
        InputMode::Help => HELP_HINTS,
    };

    let mut bar = StatusBarWidget::new(&breadcrumb, &position, &app.theme)
        .hints(hints)
        .loading(app.store.loading_count(), app.spinner.frame());
    if let Some((msg, is_error, _)) = &app.status_message {
        bar = bar.status_message(msg, *is_error);
    }
    frame.render_widget(bar, area);
}

/// Short label of a node for the breadcrumb.
fn crumb(app: &App, id: ItemId) -> String {
    if id == ROOT_ID {
        return app.feed.label().to_string();
    }
    let label = match app.store.get(id) {
        Some(node) => match (&node.payload, node.kind) {
            (Some(p), NodeKind::Thread) => format!("by {}", p.author),
            (Some(p), _) if !p.title.is_empty() => p.title.clone(),
            _ => format!("#{id}"),
        },
        None => format!("#{id}"),
    };
    text::truncate(&label, CRUMB_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppOptions;
    use crate::handler::Action;
    use crate::store::tests::{load, raw};
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn draw(app: &App, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn rows(buf: &Buffer) -> Vec<String> {
        (0..buf.area.height)
            .map(|y| {
                (0..buf.area.width)
                    .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
                    .collect()
            })
            .collect()
    }

    fn ready_app(ids: &[ItemId]) -> App {
        let mut app = App::new(AppOptions::default());
        app.handle_collection(Ok(ids.to_vec())).unwrap();
        app
    }

    #[test]
    fn loading_screen_before_bootstrap() {
        let app = App::new(AppOptions::default());
        let screen = rows(&draw(&app, 60, 10));
        assert!(screen[0].contains("HackerReader"));
        assert!(screen.iter().any(|r| r.contains("Loading Top...")));
    }

    #[test]
    fn visible_items_are_queued_before_draw() {
        let ids: Vec<ItemId> = (1..=50).collect();
        let mut app = ready_app(&ids);
        app.store.drain_pending();

        app.prepare_frame(Rect::new(0, 0, 60, 12));
        let queued = app.store.drain_pending();
        // Loading items take three rows; ten body rows hold three whole
        // items, and the first was already requested by the bootstrap.
        assert_eq!(queued, vec![2, 3]);
    }

    #[test]
    fn drawing_leaves_the_store_untouched() {
        let ids: Vec<ItemId> = (1..=50).collect();
        let mut app = ready_app(&ids);
        app.store.drain_pending();

        draw(&app, 60, 12);
        assert_eq!(app.store.pending_len(), 0);
    }

    #[test]
    fn plan_lists_the_window_in_display_order() {
        let ids: Vec<ItemId> = (1..=50).collect();
        let mut app = ready_app(&ids);
        app.dispatch(Action::CursorLast);

        let plan = plan(&app, Rect::new(0, 0, 60, 12), 0);
        assert_eq!(plan.visible, vec![48, 49, 50]);
        assert_eq!(plan.focus, None);
    }

    #[test]
    fn plan_is_empty_before_bootstrap() {
        let app = App::new(AppOptions::default());
        assert_eq!(plan(&app, Rect::new(0, 0, 60, 12), 0), ViewPlan::default());
    }

    #[test]
    fn loaded_items_and_status_are_drawn() {
        let mut app = ready_app(&[1, 2]);
        load(&mut app.store, 1, "story", &[]);
        load(&mut app.store, 2, "story", &[]);

        let screen = rows(&draw(&app, 60, 10));
        assert!(screen[1].starts_with("> 0. Item 1"));
        assert!(screen.iter().any(|r| r.starts_with("  1. Item 2")));
        assert!(screen[9].starts_with(" 1/2 Top"));
    }

    #[test]
    fn nested_level_shows_open_node_box() {
        let mut app = ready_app(&[1]);
        load(&mut app.store, 1, "story", &[5]);
        load(&mut app.store, 5, "comment", &[]);
        app.dispatch(Action::Enter);

        let buf = draw(&app, 60, 20);
        let screen = rows(&buf);
        assert!(screen[1].starts_with("╔"));
        assert!(screen.iter().any(|r| r.contains("║Item 1")));
        assert!(screen[19].contains("Top › Item 1"));

        app.dispatch(Action::CollapseParent);
        let screen = rows(&draw(&app, 60, 20));
        assert!(screen[2].contains("(collapsed)"));
        assert!(screen[3].starts_with("╚"));
    }

    #[test]
    fn focus_scroll_is_clamped_before_draw() {
        let mut app = ready_app(&[1]);
        let mut story = raw(1, "story", &[]);
        story.text = Some("one<p>two<p>three".into());
        app.store.get_or_queue(1);
        app.store.resolve(1, Ok(story));
        app.dispatch(Action::EnterFocus);
        app.dispatch(Action::CursorLast);

        app.prepare_frame(Rect::new(0, 0, 40, 6));
        let Mode::Focused { scroll, .. } = app.nav.mode() else {
            panic!("expected focus mode");
        };
        assert!(scroll < 20);
        assert_eq!(app.focus_page, 4);

        let plan = plan(&app, Rect::new(0, 0, 40, 6), 0);
        assert_eq!(plan.focus.map(|f| f.page), Some(4));
        assert!(plan.visible.is_empty());
    }

    #[test]
    fn content_is_capped_at_max_width() {
        let mut app = App::new(AppOptions {
            max_width: 20,
            ..AppOptions::default()
        });
        app.handle_collection(Ok(vec![1])).unwrap();
        load(&mut app.store, 1, "story", &[]);

        let screen = rows(&draw(&app, 60, 8));
        assert!(screen[1].starts_with("                    > 0. Item 1"));
    }

    #[test]
    fn help_overlay_is_drawn_on_top() {
        let mut app = ready_app(&[1]);
        app.dispatch(Action::ToggleHelp);
        let screen = rows(&draw(&app, 80, 30));
        assert!(screen.iter().any(|r| r.contains("Keys")));
    }
}
