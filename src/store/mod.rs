//! Session cache of remote items plus the set of ids waiting to be fetched.
//!
//! Every node is created through [`NodeStore::get_or_queue`], which also puts
//! the id in the pending set, so nothing referenced can escape the fetch
//! scheduler. Nodes are never evicted.

mod node;

use std::collections::{BTreeSet, HashMap};

pub use node::{ItemId, Node, NodeKind, NodeState, Payload, ROOT_ID};

use crate::error::FetchError;
use crate::source::RawItem;

/// Owner of all node state. Mutated only from the update loop.
pub struct NodeStore {
    nodes: HashMap<ItemId, Node>,
    pending: BTreeSet<ItemId>,
}

impl Default for NodeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeStore {
    /// Create a store holding only the synthetic root.
    ///
    /// The root waits for the one-time collection bootstrap instead of the
    /// pending set.
    pub fn new() -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(ROOT_ID, Node::root());
        Self {
            nodes,
            pending: BTreeSet::new(),
        }
    }

    /// Return the node for `id`, creating and queueing it when unseen.
    pub fn get_or_queue(&mut self, id: ItemId) -> &Node {
        let pending = &mut self.pending;
        let node = self.nodes.entry(id).or_insert_with(|| Node::new(id));
        if node.state == NodeState::Unrequested {
            node.state = NodeState::Pending;
            pending.insert(id);
        }
        node
    }

    /// Read-only lookup; never queues.
    pub fn get(&self, id: ItemId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn root(&self) -> &Node {
        // The root is inserted in `new` and never removed.
        &self.nodes[&ROOT_ID]
    }

    /// Whether the root collection has been bootstrapped.
    pub fn is_ready(&self) -> bool {
        self.root().is_loaded()
    }

    /// Write the root's children from the one-time collection fetch.
    pub fn set_root_children(&mut self, ids: Vec<ItemId>) {
        let Some(root) = self.nodes.get_mut(&ROOT_ID) else {
            return;
        };
        if root.is_loaded() {
            return;
        }
        root.children = ids;
        root.payload = Some(Payload::default());
        root.state = NodeState::Loaded;
    }

    /// Record the outcome of a fetch for `id`.
    ///
    /// Unknown ids and nodes that already settled are left untouched. Loading
    /// a poll queues its options so they can be shown with it.
    pub fn resolve(&mut self, id: ItemId, result: Result<RawItem, FetchError>) {
        let Some(node) = self.nodes.get_mut(&id) else {
            tracing::debug!(id, "resolve for unknown item ignored");
            return;
        };
        if matches!(node.state, NodeState::Loaded | NodeState::Failed) {
            return;
        }

        match result {
            Ok(raw) => {
                node.load(raw);
                let options = match (&node.kind, &node.payload) {
                    (NodeKind::Poll, Some(payload)) => payload.poll_options.clone(),
                    _ => Vec::new(),
                };
                for option in options {
                    self.get_or_queue(option);
                }
            }
            Err(err) => {
                tracing::warn!(id, error = %err, "item fetch failed");
                node.state = NodeState::Failed;
            }
        }
    }

    /// Take every queued id, leaving the pending set empty.
    pub fn drain_pending(&mut self) -> Vec<ItemId> {
        std::mem::take(&mut self.pending).into_iter().collect()
    }

    /// Queue the first `k` children of `id` if it is loaded.
    pub fn prefetch(&mut self, id: ItemId, k: usize) {
        let ahead: Vec<ItemId> = match self.nodes.get(&id) {
            Some(node) if node.is_loaded() => node.children.iter().take(k).copied().collect(),
            _ => return,
        };
        for child in ahead {
            self.get_or_queue(child);
        }
    }

    /// Flip the hidden flag of `id`. Returns the new value.
    pub fn toggle_hidden(&mut self, id: ItemId) -> Option<bool> {
        let node = self.nodes.get_mut(&id)?;
        node.hidden = !node.hidden;
        Some(node.hidden)
    }

    /// Number of ids waiting for dispatch.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Number of item nodes that have been requested but not yet settled.
    pub fn loading_count(&self) -> usize {
        self.nodes
            .values()
            .filter(|n| n.id != ROOT_ID && n.is_loading())
            .count()
    }

    /// Total nodes in the cache, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}
