//! The root context: owns the tree and device state, and runs frames.
//!
//! A frame is always, in this order: next-frame queue drain, animate,
//! cascade (with forced interaction termination), layout, paint.
//! Input is dispatched immediately as it arrives, between frames, against
//! the geometry of the last completed layout.

use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::event::dispatch::{dispatch, terminate_if_disabled};
use crate::event::handler::{fire, NodeEvent};
use crate::event::input::{InputSample, KeyCode, MouseButton};
use crate::event::queue;
use crate::geometry::{Point, Size};
use crate::layout;
use crate::render::command::DrawSink;
use crate::render::paint::paint;
use crate::style::{cascade, ComputedStyle};
use crate::widgets::Panel;

// ---------------------------------------------------------------------------
// Frame phases
// ---------------------------------------------------------------------------

/// Fire `Animate` on every node under `root`, parent first. Returns the
/// number of nodes visited.
pub fn animate(dom: &mut Dom, root: NodeId, frame: u64) -> usize {
    let order = dom.walk_depth_first(root);
    for &id in &order {
        fire(dom, id, NodeEvent::Animate { frame });
    }
    order.len()
}

/// Recompute every computed style under `root`, parent first, then end any
/// hover/press on nodes that just became non-interactive. Returns the
/// number of nodes styled.
pub fn restyle(dom: &mut Dom, root: NodeId) -> usize {
    let order = dom.walk_depth_first(root);
    let mut styled = 0;
    for &id in &order {
        let parent = match dom.parent(id) {
            Some(parent) if id != root => dom.state(parent).map(|s| s.computed.clone()).unwrap_or_default(),
            _ => ComputedStyle::default(),
        };
        let Some(state) = dom.state_mut(id) else {
            continue;
        };
        state.computed = cascade(&state.rules, &parent, &state.traits, state.interaction);
        styled += 1;
        terminate_if_disabled(dom, id);
    }
    styled
}

// ---------------------------------------------------------------------------
// Root
// ---------------------------------------------------------------------------

/// Owns the tree, the root node, the viewport and pointer/keyboard state.
pub struct Root {
    dom: Dom,
    root: NodeId,
    viewport: Size,
    pointer: Point,
    buttons: Vec<MouseButton>,
    keys: Vec<KeyCode>,
    frame: u64,
}

impl Root {
    /// A mounted root [`Panel`] with a zero-sized viewport.
    pub fn new() -> Self {
        let mut dom = Dom::new();
        let root = dom.create(Panel::new());
        dom.mount(root);
        Self {
            dom,
            root,
            viewport: Size::ZERO,
            pointer: Point::ZERO,
            buttons: Vec::new(),
            keys: Vec::new(),
            frame: 0,
        }
    }

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut Dom {
        &mut self.dom
    }

    /// The root node id.
    pub fn id(&self) -> NodeId {
        self.root
    }

    /// Create a node and attach it under `parent`, mounting it.
    pub fn spawn(&mut self, parent: NodeId, widget: impl crate::widget::Widget + 'static) -> NodeId {
        let id = self.dom.create(widget);
        self.dom.add_child(parent, id);
        id
    }

    /// Set the root's size for the next layout.
    pub fn resize(&mut self, width: i32, height: i32) {
        self.viewport = Size::new(width.max(0), height.max(0));
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Last known pointer position.
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons.contains(&button)
    }

    pub fn is_key_down(&self, code: KeyCode) -> bool {
        self.keys.contains(&code)
    }

    /// Frames run so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Record device state and dispatch `sample` through the tree.
    pub fn handle_input(&mut self, sample: InputSample) {
        match sample {
            InputSample::PointerMove(point) => self.pointer = point,
            InputSample::PointerDown(button) => {
                if !self.buttons.contains(&button) {
                    self.buttons.push(button);
                }
            }
            InputSample::PointerUp(button) => self.buttons.retain(|&b| b != button),
            InputSample::KeyDown(code) => {
                if !self.keys.contains(&code) {
                    self.keys.push(code);
                }
            }
            InputSample::KeyUp(code) => self.keys.retain(|&k| k != code),
            InputSample::Scroll(_) => {}
        }
        dispatch(&mut self.dom, self.root, sample);
    }

    /// Run one frame and emit its draw commands into `sink`.
    pub fn run_frame(&mut self, sink: &mut dyn DrawSink) {
        self.frame += 1;
        let span = tracing::debug_span!("frame", frame = self.frame);
        let _enter = span.enter();

        let ran = queue::drain(&mut self.dom);
        tracing::trace!(callbacks = ran, "drained next-frame queue");

        let animated = animate(&mut self.dom, self.root, self.frame);
        tracing::trace!(nodes = animated, "animated");

        let styled = restyle(&mut self.dom, self.root);
        tracing::trace!(nodes = styled, "cascaded");

        layout::layout(&mut self.dom, self.root, self.viewport);
        tracing::trace!(width = self.viewport.width, height = self.viewport.height, "laid out");

        let commands = paint(&mut self.dom, self.root, sink);
        tracing::trace!(commands, "painted");
    }
}

impl Default for Root {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
