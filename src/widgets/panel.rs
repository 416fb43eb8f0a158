//! Panel widget: a plain container with no content of its own.

use std::any::Any;

use crate::dom::node::NodeState;
use crate::widget::traits::Widget;

/// A container that only lays out and paints its children.
///
/// Background and border come from the node's style, like every node.
#[derive(Debug, Default)]
pub struct Panel;

impl Panel {
    pub fn new() -> Self {
        Self
    }
}

impl Widget for Panel {
    fn widget_type(&self) -> &str {
        "Panel"
    }

    fn init(&self, state: &mut NodeState) {
        state.traits.add("panel");
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
