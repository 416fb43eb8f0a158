//! Checkbox widget: toggles the `checked` trait on click.
//!
//! The checked look is entirely style-driven: put records under `checked`
//! (or `checked:hover`) on the node to restyle it.

use std::any::Any;

use crate::dom::node::NodeState;
use crate::event::handler::NodeEvent;
use crate::event::input::MouseButton;
use crate::render::command::{DrawCommand, DrawSink};
use crate::style::DeclaredStyle;
use crate::widget::traits::{Widget, WidgetCx};

/// Trait toggled by clicking.
pub const CHECKED: &str = "checked";

/// Default edge length, in pixels.
pub const CHECKBOX_SIZE: i32 = 3;

/// A two-state toggle.
pub struct Checkbox {
    on_change: Option<Box<dyn FnMut(&mut WidgetCx<'_>, bool)>>,
    initially_checked: bool,
}

impl Checkbox {
    pub fn new() -> Self {
        Self { on_change: None, initially_checked: false }
    }

    /// Start checked (builder).
    pub fn checked(mut self, checked: bool) -> Self {
        self.initially_checked = checked;
        self
    }

    /// Called with the new state after every toggle (builder).
    pub fn on_change(mut self, handler: impl FnMut(&mut WidgetCx<'_>, bool) + 'static) -> Self {
        self.on_change = Some(Box::new(handler));
        self
    }
}

impl Default for Checkbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Checkbox {
    fn widget_type(&self) -> &str {
        "Checkbox"
    }

    fn init(&self, state: &mut NodeState) {
        state.traits.add("checkbox");
        state.traits.set(CHECKED, self.initially_checked);
        state.rules.set("", DeclaredStyle::new().with_size(CHECKBOX_SIZE, CHECKBOX_SIZE));
    }

    /// A filled mark inset by one pixel while checked.
    fn paint(&self, state: &NodeState, sink: &mut dyn DrawSink) {
        if !state.traits.has(CHECKED) {
            return;
        }
        let width = state.size.width - 2;
        let height = state.size.height - 2;
        if width <= 0 || height <= 0 {
            return;
        }
        sink.submit(DrawCommand::set_color(state.computed.foreground));
        sink.submit(DrawCommand::FillRectangle {
            x: state.position.x + 1,
            y: state.position.y + 1,
            width,
            height,
        });
    }

    fn on_event(&mut self, cx: &mut WidgetCx<'_>, event: &NodeEvent) {
        if let NodeEvent::MouseRelease(MouseButton::Left) = event {
            if cx.state.interaction.hovered {
                cx.state.traits.toggle(CHECKED);
                let checked = cx.state.traits.has(CHECKED);
                if let Some(handler) = self.on_change.as_mut() {
                    handler(cx, checked);
                }
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::tree::Dom;
    use crate::event::handler::fire;
    use crate::geometry::{Point, Size};
    use crate::render::command::CommandList;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn click_toggles_checked() {
        let mut dom = Dom::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        let id = dom.create(Checkbox::new().on_change(move |_, checked| s.borrow_mut().push(checked)));
        dom.state_mut(id).unwrap().interaction.hovered = true;

        fire(&mut dom, id, NodeEvent::MouseRelease(MouseButton::Left));
        assert!(dom.has_trait(id, CHECKED));
        fire(&mut dom, id, NodeEvent::MouseRelease(MouseButton::Left));
        assert!(!dom.has_trait(id, CHECKED));
        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    #[test]
    fn initial_state_and_size() {
        let mut dom = Dom::new();
        let id = dom.create(Checkbox::new().checked(true));
        assert!(dom.has_trait(id, CHECKED));
        assert_eq!(dom.style(id, "").width, Some(crate::style::Sizing::Fixed(CHECKBOX_SIZE)));
    }

    #[test]
    fn paints_mark_only_when_checked() {
        let mut state = NodeState::default();
        state.position = Point::new(5, 5);
        state.size = Size::new(4, 4);

        let mut sink = CommandList::new();
        Checkbox::new().paint(&state, &mut sink);
        assert!(sink.is_empty());

        state.traits.add(CHECKED);
        Checkbox::new().paint(&state, &mut sink);
        assert_eq!(
            sink.commands()[1],
            DrawCommand::FillRectangle { x: 6, y: 6, width: 2, height: 2 }
        );
    }
}
