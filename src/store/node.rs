use crate::source::RawItem;
use crate::text;

/// Identity of a remote item. Globally unique and immutable.
pub type ItemId = u64;

/// Id of the synthetic root collection; never a real remote item.
pub const ROOT_ID: ItemId = 0;

/// Load state of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    Unrequested,
    Pending,
    Loaded,
    Failed,
}

/// What an item is, which decides how it is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// The synthetic root: a ranked list of top-level entries.
    Collection,
    /// A story or job posting.
    Entry,
    /// A comment.
    Thread,
    Poll,
    PollOption,
}

impl NodeKind {
    /// Map the remote `type` field. Unknown kinds are shown as entries.
    pub fn from_remote(kind: Option<&str>) -> Self {
        match kind {
            Some("comment") => NodeKind::Thread,
            Some("poll") => NodeKind::Poll,
            Some("pollopt") => NodeKind::PollOption,
            _ => NodeKind::Entry,
        }
    }
}

/// Content fields, present only once a node is loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload {
    pub title: String,
    /// Body as plain text (already flattened from HTML).
    pub body: String,
    pub author: String,
    pub score: i64,
    /// Creation time, Unix seconds.
    pub time: i64,
    pub url: Option<String>,
    /// Short domain derived from `url`.
    pub domain: Option<String>,
    /// Total comment count for entries and polls.
    pub descendants: u64,
    /// Option ids for polls, in display order.
    pub poll_options: Vec<ItemId>,
    /// Dead or deleted on the remote side.
    pub removed: bool,
}

impl Payload {
    pub fn has_url(&self) -> bool {
        self.url.is_some()
    }
}

/// Cached state of one remote item.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: ItemId,
    pub state: NodeState,
    /// Child ids in ranked display order. Written once, on load.
    pub children: Vec<ItemId>,
    /// Meaningful once loaded; unloaded nodes default to `Entry`.
    pub kind: NodeKind,
    pub payload: Option<Payload>,
    pub hidden: bool,
}

impl Node {
    pub(crate) fn new(id: ItemId) -> Self {
        Self {
            id,
            state: NodeState::Unrequested,
            children: Vec::new(),
            kind: NodeKind::Entry,
            payload: None,
            hidden: false,
        }
    }

    pub(crate) fn root() -> Self {
        Self {
            id: ROOT_ID,
            state: NodeState::Pending,
            children: Vec::new(),
            kind: NodeKind::Collection,
            payload: None,
            hidden: false,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.state == NodeState::Loaded
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, NodeState::Unrequested | NodeState::Pending)
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Move into `Loaded` with fields taken from `raw`.
    pub(crate) fn load(&mut self, raw: RawItem) {
        let url = raw.url.filter(|u| !u.is_empty());
        let domain = url.as_deref().and_then(text::domain_of);
        self.kind = NodeKind::from_remote(raw.kind.as_deref());
        self.children = raw.kids;
        self.payload = Some(Payload {
            title: html_escape::decode_html_entities(&raw.title.unwrap_or_default()).into_owned(),
            body: raw.text.as_deref().map(text::html_to_text).unwrap_or_default(),
            author: raw.by.unwrap_or_default(),
            score: raw.score,
            time: raw.time,
            url,
            domain,
            descendants: raw.descendants,
            poll_options: raw.parts,
            removed: raw.dead || raw.deleted,
        });
        self.state = NodeState::Loaded;
    }
}
