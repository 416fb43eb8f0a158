//! Node types: NodeId, NodeState, NodeData.

use std::fmt;

use slotmap::new_key_type;

use crate::event::handler::Handlers;
use crate::geometry::{Point, Rect, Size};
use crate::render::pixels::PixelBuffer;
use crate::style::{ComputedStyle, Interaction, StyleRules, TraitSet};
use crate::widget::Widget;

new_key_type! {
    /// Unique identifier for a node. Copy, lightweight (u64).
    pub struct NodeId;
}

/// Per-node engine state shared by every widget type.
#[derive(Debug, Clone, Default)]
pub struct NodeState {
    /// Named boolean flags used as selector keys.
    pub traits: TraitSet,
    /// Declared style records, unique by selector.
    pub rules: StyleRules,
    /// Resolved style; rebuilt every frame by the cascade.
    pub computed: ComputedStyle,
    /// Resolved size, in root coordinates.
    pub size: Size,
    /// Resolved absolute position, in root coordinates.
    pub position: Point,
    /// Hovered / pressed / focused, owned by event dispatch.
    pub interaction: Interaction,
    pub mounted: bool,
}

impl NodeState {
    /// Bounds from the last completed layout.
    pub fn bounds(&self) -> Rect {
        Rect::from_parts(self.position, self.size)
    }
}

/// Everything the arena stores for one node.
pub struct NodeData {
    pub widget: Box<dyn Widget>,
    pub state: NodeState,
    pub(crate) handlers: Handlers,
    /// Resample target for image backgrounds.
    pub(crate) scratch: PixelBuffer,
}

impl NodeData {
    pub fn new(widget: impl Widget + 'static) -> Self {
        Self::from_boxed(Box::new(widget))
    }

    pub fn from_boxed(widget: Box<dyn Widget>) -> Self {
        let mut state = NodeState::default();
        widget.init(&mut state);
        Self { widget, state, handlers: Handlers::new(), scratch: PixelBuffer::default() }
    }

    /// The widget's type name.
    pub fn widget_type(&self) -> &str {
        self.widget.widget_type()
    }

    /// Downcast the widget to a concrete type.
    pub fn widget<W: Widget + 'static>(&self) -> Option<&W> {
        self.widget.as_any().downcast_ref::<W>()
    }

    pub fn widget_mut<W: Widget + 'static>(&mut self) -> Option<&mut W> {
        self.widget.as_any_mut().downcast_mut::<W>()
    }
}

impl fmt::Debug for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeData")
            .field("widget_type", &self.widget_type())
            .field("state", &self.state)
            .field("handlers", &self.handlers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{DeclaredStyle, Sizing};
    use crate::widgets::{Label, Panel};

    #[test]
    fn new_defaults() {
        let data = NodeData::new(Panel::new());
        assert_eq!(data.widget_type(), "Panel");
        assert_eq!(data.state.traits.iter().collect::<Vec<_>>(), vec!["panel"]);
        assert!(!data.state.mounted);
        assert_eq!(data.state.interaction, Interaction::default());
        assert!(data.handlers.is_empty());
    }

    #[test]
    fn widget_init_seeds_state() {
        let data = NodeData::new(Label::new("hi"));
        assert!(data.state.traits.has("label"));
    }

    #[test]
    fn downcast() {
        let mut data = NodeData::new(Label::new("hi"));
        assert!(data.widget::<Panel>().is_none());
        data.widget_mut::<Label>().unwrap().set_text("bye");
        assert_eq!(data.widget::<Label>().unwrap().text(), "bye");
    }

    #[test]
    fn bounds_from_geometry() {
        let mut state = NodeState::default();
        state.rules.set("", DeclaredStyle::new().with_width(Sizing::Fill));
        state.position = Point::new(3, 4);
        state.size = Size::new(10, 20);
        assert_eq!(state.bounds(), Rect::new(3, 4, 10, 20));
    }
}
