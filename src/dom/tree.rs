//! Tree operations: create, attach, detach, mount, walk.
//!
//! The arena owns every node. A node is created detached; attaching it to a
//! mounted parent mounts its whole subtree, and removing it from its parent
//! unmounts and then destroys the subtree.

use slotmap::{SecondaryMap, SlotMap};

use super::node::{NodeData, NodeId, NodeState};
use crate::event::handler::{fire, EventCx, EventKind, NodeEvent};
use crate::event::queue::FrameQueue;
use crate::style::parser::StyleSheet;
use crate::style::DeclaredStyle;
use crate::widget::Widget;

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[NodeId] = &[];

/// The node tree, backed by a slotmap arena.
///
/// Parent/child relationships live in secondary maps so that removal is
/// O(subtree size) and lookup is O(1). Child order is insertion order, which
/// is also flow order and paint order.
pub struct Dom {
    pub(crate) nodes: SlotMap<NodeId, NodeData>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
    pub(crate) queue: FrameQueue,
}

impl Dom {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            queue: FrameQueue::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Structure
    // -----------------------------------------------------------------------

    /// Create a detached, unmounted node.
    pub fn create(&mut self, widget: impl Widget + 'static) -> NodeId {
        self.insert(NodeData::new(widget))
    }

    /// Insert prepared node data as a detached node.
    pub fn insert(&mut self, data: NodeData) -> NodeId {
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        id
    }

    /// Append `child` to `parent`'s child list.
    ///
    /// A child attached elsewhere is moved. The child's mount state is brought
    /// in line with the new parent's.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) || parent == child {
            return;
        }
        if self.is_ancestor(child, parent) {
            tracing::warn!(?parent, ?child, "refusing to attach a node below its own descendant");
            return;
        }
        self.detach(child);
        self.parent.insert(child, parent);
        if let Some(kids) = self.children.get_mut(parent) {
            kids.push(child);
        }

        match (self.is_mounted(parent), self.is_mounted(child)) {
            (true, false) => self.mount(child),
            (false, true) => self.unmount(child),
            _ => {}
        }
    }

    /// Remove `child` from `parent`, unmount it and destroy its subtree.
    ///
    /// Returns `false` (and does nothing) if `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if self.parent(child) != Some(parent) {
            return false;
        }
        self.destroy(child);
        true
    }

    /// Remove and destroy every child of `parent`.
    pub fn clear_children(&mut self, parent: NodeId) {
        let kids = self.children(parent).to_vec();
        for child in kids {
            self.remove_child(parent, child);
        }
    }

    /// Unmount (if mounted), detach, and free `id` and all its descendants.
    pub fn destroy(&mut self, id: NodeId) {
        if !self.nodes.contains_key(id) {
            return;
        }
        if self.is_mounted(id) {
            self.unmount(id);
        }
        // Unmount handlers may already have torn the node down.
        if !self.nodes.contains_key(id) {
            return;
        }
        self.detach(id);
        for node in self.walk_depth_first(id) {
            self.children.remove(node);
            self.parent.remove(node);
            self.nodes.remove(node);
        }
    }

    /// Drop `id` from its parent's child list, keeping the subtree alive.
    fn detach(&mut self, id: NodeId) {
        if let Some(old_parent) = self.parent.remove(id) {
            if let Some(siblings) = self.children.get_mut(old_parent) {
                siblings.retain(|&c| c != id);
            }
        }
    }

    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = node;
        while let Some(p) = self.parent(current) {
            if p == ancestor {
                return true;
            }
            current = p;
        }
        false
    }

    /// Get the parent of a node, if it has one.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Get the children of a node. Returns an empty slice if the node has no children
    /// or does not exist.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// The child at `index`, or `None` when out of range.
    pub fn child_at(&self, parent: NodeId, index: usize) -> Option<NodeId> {
        self.children(parent).get(index).copied()
    }

    /// Walk from `id` up to the root, collecting ancestor node ids.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent(current) {
            result.push(p);
            current = p;
        }
        result
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            // Push children in reverse so the first child is visited first.
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    pub fn is_mounted(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(|data| data.state.mounted)
    }

    /// Mount `id` and its subtree, parent first. Already-mounted nodes are skipped.
    pub fn mount(&mut self, id: NodeId) {
        let order = self.walk_depth_first(id);
        tracing::trace!(?id, nodes = order.len(), "mount");
        for node in order {
            match self.nodes.get_mut(node) {
                Some(data) if !data.state.mounted => data.state.mounted = true,
                _ => continue,
            }
            fire(self, node, NodeEvent::Mount);
        }
    }

    /// Unmount `id` and its subtree, parent first.
    pub fn unmount(&mut self, id: NodeId) {
        let order = self.walk_depth_first(id);
        tracing::trace!(?id, nodes = order.len(), "unmount");
        for node in order {
            match self.nodes.get_mut(node) {
                Some(data) if data.state.mounted => data.state.mounted = false,
                _ => continue,
            }
            fire(self, node, NodeEvent::Unmount);
        }
    }

    // -----------------------------------------------------------------------
    // Node access
    // -----------------------------------------------------------------------

    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id)
    }

    pub fn state(&self, id: NodeId) -> Option<&NodeState> {
        self.nodes.get(id).map(|data| &data.state)
    }

    pub fn state_mut(&mut self, id: NodeId) -> Option<&mut NodeState> {
        self.nodes.get_mut(id).map(|data| &mut data.state)
    }

    /// Downcast a node's widget.
    pub fn widget<W: Widget + 'static>(&self, id: NodeId) -> Option<&W> {
        self.nodes.get(id)?.widget::<W>()
    }

    pub fn widget_mut<W: Widget + 'static>(&mut self, id: NodeId) -> Option<&mut W> {
        self.nodes.get_mut(id)?.widget_mut::<W>()
    }

    /// Number of nodes in the arena (attached or not).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    // -----------------------------------------------------------------------
    // Traits and styles
    // -----------------------------------------------------------------------

    pub fn add_trait(&mut self, id: NodeId, name: &str) {
        if let Some(state) = self.state_mut(id) {
            state.traits.add(name);
        }
    }

    pub fn remove_trait(&mut self, id: NodeId, name: &str) {
        if let Some(state) = self.state_mut(id) {
            state.traits.remove(name);
        }
    }

    pub fn toggle_trait(&mut self, id: NodeId, name: &str) {
        if let Some(state) = self.state_mut(id) {
            state.traits.toggle(name);
        }
    }

    pub fn has_trait(&self, id: NodeId, name: &str) -> bool {
        self.state(id).is_some_and(|state| state.traits.has(name))
    }

    /// Store `style` under `selector`, replacing any record already there.
    pub fn set_style(&mut self, id: NodeId, selector: &str, style: DeclaredStyle) {
        if let Some(state) = self.state_mut(id) {
            state.rules.set(selector, style);
        }
    }

    /// The record under `selector`, or an empty record.
    pub fn style(&self, id: NodeId, selector: &str) -> DeclaredStyle {
        self.state(id).map(|state| state.rules.style(selector)).unwrap_or_default()
    }

    /// Store every record of a parsed sheet on `id`.
    pub fn apply_sheet(&mut self, id: NodeId, sheet: &StyleSheet) {
        if let Some(state) = self.state_mut(id) {
            sheet.apply_to(&mut state.rules);
        }
    }

    // -----------------------------------------------------------------------
    // Callbacks
    // -----------------------------------------------------------------------

    /// Register `handler` for `kind` events on `id`.
    pub fn on(
        &mut self,
        id: NodeId,
        kind: EventKind,
        handler: impl FnMut(&mut EventCx<'_>, &NodeEvent) + 'static,
    ) {
        if let Some(data) = self.nodes.get_mut(id) {
            data.handlers.push(kind, Box::new(handler));
        }
    }

    /// Schedule `callback` for the start of the next frame.
    pub fn defer(&mut self, callback: impl FnOnce(&mut Dom) + 'static) {
        self.queue.push(Box::new(callback));
    }

    pub fn queue(&self) -> &FrameQueue {
        &self.queue
    }

    pub fn queue_mut(&mut self) -> &mut FrameQueue {
        &mut self.queue
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}
