//! Path and cursor navigation over the partially loaded item tree.
//!
//! The path is a stack of node ids from the synthetic root to the node whose
//! children are listed; a parallel stack remembers the cursor at every level
//! so going back restores it exactly. Requests that cannot be honoured yet
//! (entering an unloaded item, going above the root) are silently ignored.

use crate::store::{ItemId, NodeStore, ROOT_ID};

/// Default number of grandchildren queued ahead when the cursor moves.
pub const DEFAULT_PREFETCH: usize = 2;

/// Items skipped by a page jump in the list.
pub const PAGE_STEP: usize = 10;

/// Interaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Moving through the sibling list of the open node.
    Browsing,
    /// Reading one node's full text with its own scroll offset.
    Focused { id: ItemId, scroll: usize },
}

/// Navigation state: path, cursor stack, current cursor and mode.
pub struct Navigator {
    path: Vec<ItemId>,
    cursors: Vec<usize>,
    cursor: usize,
    mode: Mode,
    prefetch: usize,
    collapse_parent: bool,
}

impl Navigator {
    pub fn new(prefetch: usize) -> Self {
        Self {
            path: vec![ROOT_ID],
            cursors: Vec::new(),
            cursor: 0,
            mode: Mode::Browsing,
            prefetch,
            collapse_parent: false,
        }
    }

    /// Id of the open node (top of the path).
    pub fn current(&self) -> ItemId {
        self.path.last().copied().unwrap_or(ROOT_ID)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Nesting depth below the root.
    pub fn depth(&self) -> usize {
        self.path.len() - 1
    }

    pub fn path(&self) -> &[ItemId] {
        &self.path
    }

    #[cfg(test)]
    pub fn cursor_stack(&self) -> &[usize] {
        &self.cursors
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_focused(&self) -> bool {
        matches!(self.mode, Mode::Focused { .. })
    }

    /// Whether the open node is drawn as a one-line marker.
    pub fn parent_collapsed(&self) -> bool {
        self.collapse_parent
    }

    /// Id of the child under the cursor, if the open node has any.
    pub fn hovered(&self, store: &NodeStore) -> Option<ItemId> {
        store
            .get(self.current())?
            .children
            .get(self.cursor)
            .copied()
    }

    /// Move the cursor to `target`, clamped to the open node's children.
    ///
    /// A negative target selects the last child. The newly hovered child is
    /// requested and its first children are queued ahead.
    pub fn move_cursor(&mut self, target: isize, store: &mut NodeStore) {
        let count = store.get_or_queue(self.current()).child_count();
        if count == 0 {
            self.cursor = 0;
            return;
        }
        let last = count - 1;
        self.cursor = if target < 0 {
            last
        } else {
            (target as usize).min(last)
        };

        if let Some(id) = self.hovered(store) {
            store.get_or_queue(id);
            store.prefetch(id, self.prefetch);
        }
    }

    pub fn cursor_up(&mut self, store: &mut NodeStore) {
        self.move_cursor(self.cursor.saturating_sub(1) as isize, store);
    }

    pub fn cursor_down(&mut self, store: &mut NodeStore) {
        self.move_cursor(self.cursor as isize + 1, store);
    }

    pub fn page_up(&mut self, store: &mut NodeStore) {
        self.move_cursor(self.cursor.saturating_sub(PAGE_STEP) as isize, store);
    }

    pub fn page_down(&mut self, store: &mut NodeStore) {
        self.move_cursor((self.cursor + PAGE_STEP) as isize, store);
    }

    /// Open the hovered child if it is loaded and has children.
    ///
    /// Returns whether the path changed.
    pub fn enter(&mut self, store: &mut NodeStore) -> bool {
        let Some(id) = self.hovered(store) else {
            return false;
        };
        let node = store.get_or_queue(id);
        if !node.is_loaded() || !node.has_children() {
            return false;
        }

        self.cursors.push(self.cursor);
        self.path.push(id);
        self.collapse_parent = false;
        self.move_cursor(0, store);
        tracing::trace!(id, depth = self.depth(), "entered item");
        true
    }

    /// Return to the parent level, restoring its cursor. No-op at the root.
    pub fn back(&mut self) -> bool {
        if self.path.len() <= 1 {
            return false;
        }
        self.path.pop();
        self.cursor = self.cursors.pop().unwrap_or(0);
        self.collapse_parent = false;
        true
    }

    /// Flip the hidden flag of the hovered child only.
    pub fn toggle_hidden(&mut self, store: &mut NodeStore) -> Option<bool> {
        let id = self.hovered(store)?;
        store.toggle_hidden(id)
    }

    pub fn toggle_collapse_parent(&mut self) {
        if self.depth() > 0 {
            self.collapse_parent = !self.collapse_parent;
        }
    }

    /// Switch to reading the hovered child on its own.
    pub fn enter_focus(&mut self, store: &mut NodeStore) -> bool {
        let Some(id) = self.hovered(store) else {
            return false;
        };
        store.get_or_queue(id);
        self.mode = Mode::Focused { id, scroll: 0 };
        true
    }

    pub fn exit_focus(&mut self) {
        self.mode = Mode::Browsing;
    }

    /// Shift the focus view by `delta` rows; never above the first row.
    pub fn scroll_focus(&mut self, delta: isize) {
        if let Mode::Focused { scroll, .. } = &mut self.mode {
            *scroll = scroll.saturating_add_signed(delta);
        }
    }

    /// Jump the focus view to an absolute row.
    pub fn set_focus_scroll(&mut self, row: usize) {
        if let Mode::Focused { scroll, .. } = &mut self.mode {
            *scroll = row;
        }
    }

    /// Keep the focus scroll within `max_scroll` once content height is known.
    pub fn clamp_focus_scroll(&mut self, max_scroll: usize) {
        if let Mode::Focused { scroll, .. } = &mut self.mode {
            *scroll = (*scroll).min(max_scroll);
        }
    }

    /// External link to open: the focused node's, else the open node's when
    /// nested, else the hovered entry's.
    pub fn link_target(&self, store: &NodeStore) -> Option<String> {
        let id = match self.mode {
            Mode::Focused { id, .. } => id,
            Mode::Browsing if self.depth() > 0 => self.current(),
            Mode::Browsing => self.hovered(store)?,
        };
        store.get(id)?.payload.as_ref()?.url.clone()
    }

    /// Item whose discussion page should be opened externally.
    pub fn discussion_target(&self, store: &NodeStore) -> Option<ItemId> {
        match self.mode {
            Mode::Focused { id, .. } => Some(id),
            Mode::Browsing => self
                .hovered(store)
                .or_else(|| (self.depth() > 0).then(|| self.current())),
        }
    }
}
