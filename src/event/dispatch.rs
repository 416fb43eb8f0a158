//! Interaction state machine: raw samples -> per-node events.
//!
//! Every sample visits every node under the root in pre-order (a node
//! before its children, children in order). There is no spatial pruning.
//! Hit tests use the bounds from the last completed layout.

use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::event::handler::{fire, NodeEvent};
use crate::event::input::{InputSample, MouseButton};
use crate::geometry::Point;

/// Deliver one input sample to every node under `root`.
pub fn dispatch(dom: &mut Dom, root: NodeId, sample: InputSample) {
    // Nodes attached while dispatching wait for the next sample.
    for id in dom.walk_depth_first(root) {
        if !dom.contains(id) {
            continue;
        }
        match sample {
            InputSample::PointerMove(point) => pointer_move(dom, id, point),
            InputSample::PointerDown(button) => pointer_down(dom, id, button),
            InputSample::PointerUp(button) => pointer_up(dom, id, button),
            InputSample::Scroll(direction) => {
                if interactive(dom, id) && hovered(dom, id) {
                    fire(dom, id, NodeEvent::Scroll(direction));
                }
            }
            InputSample::KeyDown(code) => {
                if focused(dom, id) {
                    fire(dom, id, NodeEvent::KeyDown(code));
                }
            }
            InputSample::KeyUp(code) => {
                if focused(dom, id) {
                    fire(dom, id, NodeEvent::KeyUp(code));
                }
            }
        }
    }
}

fn interactive(dom: &Dom, id: NodeId) -> bool {
    dom.state(id).is_some_and(|state| state.computed.is_interactive())
}

fn hovered(dom: &Dom, id: NodeId) -> bool {
    dom.state(id).is_some_and(|state| state.interaction.hovered)
}

fn focused(dom: &Dom, id: NodeId) -> bool {
    dom.state(id).is_some_and(|state| state.interaction.focused)
}

fn pointer_move(dom: &mut Dom, id: NodeId, point: Point) {
    let Some(state) = dom.state_mut(id) else {
        return;
    };
    if !state.computed.is_interactive() {
        return;
    }
    let inside = state.bounds().contains(point);
    let was_hovered = state.interaction.hovered;
    let pressed = state.interaction.pressed;

    if inside {
        if !was_hovered {
            state.interaction.hovered = true;
            fire(dom, id, NodeEvent::MouseEnter);
        }
        fire(dom, id, NodeEvent::MouseMove(point));
        return;
    }

    // Dragging past the edge keeps the pressed node informed.
    if pressed {
        fire(dom, id, NodeEvent::MouseMove(point));
    }
    if was_hovered {
        if let Some(state) = dom.state_mut(id) {
            state.interaction.hovered = false;
        }
        fire(dom, id, NodeEvent::MouseLeave);
    }
}

fn pointer_down(dom: &mut Dom, id: NodeId, button: MouseButton) {
    let Some(state) = dom.state_mut(id) else {
        return;
    };
    if !state.computed.is_interactive() {
        return;
    }

    if !state.interaction.hovered {
        if state.interaction.focused {
            state.interaction.focused = false;
            fire(dom, id, NodeEvent::Unfocus);
        }
        return;
    }

    if !state.interaction.focused {
        state.interaction.focused = true;
        fire(dom, id, NodeEvent::Focus);
    }
    if button == MouseButton::Left {
        if let Some(state) = dom.state_mut(id) {
            state.interaction.pressed = true;
        }
        fire(dom, id, NodeEvent::MousePress(button));
    }
}

fn pointer_up(dom: &mut Dom, id: NodeId, button: MouseButton) {
    let Some(state) = dom.state_mut(id) else {
        return;
    };
    if !state.computed.is_interactive() {
        return;
    }
    if state.interaction.pressed && button == MouseButton::Left {
        state.interaction.pressed = false;
        fire(dom, id, NodeEvent::MouseRelease(button));
    }
}

/// Clear hover/press on a node whose pointer events just resolved to
/// disabled, synthesizing the matching leave and release. Returns whether
/// anything was cleared.
pub fn terminate_if_disabled(dom: &mut Dom, id: NodeId) -> bool {
    let Some(state) = dom.state_mut(id) else {
        return false;
    };
    if state.computed.is_interactive() {
        return false;
    }
    let was_hovered = std::mem::take(&mut state.interaction.hovered);
    let was_pressed = std::mem::take(&mut state.interaction.pressed);
    if !was_hovered && !was_pressed {
        return false;
    }

    tracing::debug!(?id, was_hovered, was_pressed, "pointer events disabled, ending interaction");
    if was_hovered {
        fire(dom, id, NodeEvent::MouseLeave);
    }
    if was_pressed {
        fire(dom, id, NodeEvent::MouseRelease(MouseButton::Left));
    }
    true
}

// ===========================================================================
// Tests
// ===========================================================================
