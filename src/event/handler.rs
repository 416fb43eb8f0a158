//! Node events, per-node handler registry, and the handler context.
//!
//! Handlers are stored on the node they belong to. While a node's handlers
//! run they are taken out of the node, so a handler gets full mutable access
//! to the tree through [`EventCx`] (including its own node).

use std::fmt;

use crate::dom::node::{NodeId, NodeState};
use crate::dom::tree::Dom;
use crate::event::input::{KeyCode, MouseButton, ScrollDirection};
use crate::geometry::Point;
use crate::widget::WidgetCx;

// ---------------------------------------------------------------------------
// NodeEvent
// ---------------------------------------------------------------------------

/// An event delivered to a single node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeEvent {
    Mount,
    Unmount,
    /// Once per frame, before the cascade.
    Animate { frame: u64 },
    Focus,
    Unfocus,
    MouseEnter,
    MouseLeave,
    MouseMove(Point),
    MousePress(MouseButton),
    MouseRelease(MouseButton),
    Scroll(ScrollDirection),
    KeyDown(KeyCode),
    KeyUp(KeyCode),
}

impl NodeEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            NodeEvent::Mount => EventKind::Mount,
            NodeEvent::Unmount => EventKind::Unmount,
            NodeEvent::Animate { .. } => EventKind::Animate,
            NodeEvent::Focus => EventKind::Focus,
            NodeEvent::Unfocus => EventKind::Unfocus,
            NodeEvent::MouseEnter => EventKind::MouseEnter,
            NodeEvent::MouseLeave => EventKind::MouseLeave,
            NodeEvent::MouseMove(_) => EventKind::MouseMove,
            NodeEvent::MousePress(_) => EventKind::MousePress,
            NodeEvent::MouseRelease(_) => EventKind::MouseRelease,
            NodeEvent::Scroll(_) => EventKind::Scroll,
            NodeEvent::KeyDown(_) => EventKind::KeyDown,
            NodeEvent::KeyUp(_) => EventKind::KeyUp,
        }
    }
}

/// Discriminant of [`NodeEvent`], used to register handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Mount,
    Unmount,
    Animate,
    Focus,
    Unfocus,
    MouseEnter,
    MouseLeave,
    MouseMove,
    MousePress,
    MouseRelease,
    Scroll,
    KeyDown,
    KeyUp,
}

// ---------------------------------------------------------------------------
// EventCx
// ---------------------------------------------------------------------------

/// Context passed to handlers: the tree and the node being notified.
pub struct EventCx<'a> {
    pub dom: &'a mut Dom,
    node: NodeId,
}

impl<'a> EventCx<'a> {
    pub fn new(dom: &'a mut Dom, node: NodeId) -> Self {
        Self { dom, node }
    }

    /// The node the event was delivered to.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// State of the current node. `None` once the node has been destroyed.
    pub fn state(&self) -> Option<&NodeState> {
        self.dom.state(self.node)
    }

    pub fn state_mut(&mut self) -> Option<&mut NodeState> {
        self.dom.state_mut(self.node)
    }

    /// Run `callback` at the start of the next frame.
    pub fn defer(&mut self, callback: impl FnOnce(&mut Dom) + 'static) {
        self.dom.defer(callback);
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// A boxed event callback.
pub type Handler = Box<dyn FnMut(&mut EventCx<'_>, &NodeEvent)>;

/// Handlers registered on one node, in registration order.
#[derive(Default)]
pub struct Handlers {
    entries: Vec<(EventKind, Handler)>,
}

impl Handlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: EventKind, handler: Handler) {
        self.entries.push((kind, handler));
    }

    /// Whether any handler listens for `kind`.
    pub fn listens(&self, kind: EventKind) -> bool {
        self.entries.iter().any(|(k, _)| *k == kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Invoke every handler registered for `event`'s kind.
    pub fn invoke(&mut self, cx: &mut EventCx<'_>, event: &NodeEvent) {
        let kind = event.kind();
        for (_, handler) in self.entries.iter_mut().filter(|(k, _)| *k == kind) {
            handler(cx, event);
        }
    }

    /// Append handlers registered while these were taken out of the node.
    pub fn append(&mut self, mut other: Handlers) {
        self.entries.append(&mut other.entries);
    }
}

impl fmt::Debug for Handlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.iter().map(|(kind, _)| kind)).finish()
    }
}

/// Deliver `event` to `node`: the widget's own hook first, then the node's
/// registered handlers. A destroyed node is skipped.
pub fn fire(dom: &mut Dom, node: NodeId, event: NodeEvent) {
    let Dom { nodes, queue, .. } = dom;
    let Some(data) = nodes.get_mut(node) else {
        return;
    };
    let mut wcx = WidgetCx::new(node, &mut data.state, queue);
    data.widget.on_event(&mut wcx, &event);

    if !data.handlers.listens(event.kind()) {
        return;
    }
    let mut handlers = std::mem::take(&mut data.handlers);
    handlers.invoke(&mut EventCx::new(dom, node), &event);

    // Restore, keeping anything registered during the call.
    if let Some(data) = dom.get_mut(node) {
        let added = std::mem::replace(&mut data.handlers, handlers);
        data.handlers.append(added);
    }
}

// ===========================================================================
// Tests
// ===========================================================================
