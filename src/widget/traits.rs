//! Widget trait: per-type measure, paint, and event hooks.
//!
//! The engine drives layout, cascade and dispatch for every node the same
//! way; a widget only supplies what differs per type. Every hook has a
//! default, so a plain container implements nothing but its type name.

use std::any::Any;

use crate::dom::node::{NodeId, NodeState};
use crate::dom::tree::Dom;
use crate::event::handler::NodeEvent;
use crate::event::queue::FrameQueue;
use crate::geometry::Size;
use crate::render::command::DrawSink;

// ---------------------------------------------------------------------------
// WidgetCx
// ---------------------------------------------------------------------------

/// What a widget's event hook may touch: its own node state, plus the
/// next-frame queue for anything that reaches beyond the node.
pub struct WidgetCx<'a> {
    node: NodeId,
    pub state: &'a mut NodeState,
    queue: &'a mut FrameQueue,
}

impl<'a> WidgetCx<'a> {
    pub fn new(node: NodeId, state: &'a mut NodeState, queue: &'a mut FrameQueue) -> Self {
        Self { node, state, queue }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Run `callback` against the whole tree at the start of the next frame.
    pub fn defer(&mut self, callback: impl FnOnce(&mut Dom) + 'static) {
        self.queue.push(Box::new(callback));
    }
}

// ---------------------------------------------------------------------------
// Widget trait
// ---------------------------------------------------------------------------

/// Core trait implemented by all widgets.
///
/// Object-safe: nodes hold a `Box<dyn Widget>`.
pub trait Widget {
    /// Type name (e.g. "Button", "Panel"), used by type queries.
    fn widget_type(&self) -> &str;

    /// Seed a freshly created node: default traits and style records.
    fn init(&self, _state: &mut NodeState) {}

    /// Intrinsic content size, used for Fit axes (padding excluded).
    ///
    /// Children's flow content is measured by the layout engine; this is
    /// only for what the widget draws itself.
    fn measure(&self, _state: &NodeState) -> Size {
        Size::ZERO
    }

    /// Emit the widget's own content, between background and border.
    fn paint(&self, _state: &NodeState, _sink: &mut dyn DrawSink) {}

    /// React to an event delivered to this node, before its handlers run.
    fn on_event(&mut self, _cx: &mut WidgetCx<'_>, _event: &NodeEvent) {}

    /// Downcast to `&dyn Any` for runtime type inspection.
    fn as_any(&self) -> &dyn Any;

    /// Downcast to `&mut dyn Any` for mutable runtime type inspection.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

// ===========================================================================
// Tests
// ===========================================================================
