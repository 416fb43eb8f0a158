//! Button widget: a container that reports clicks.
//!
//! A click is a left-button release while the pointer is still over the
//! button. Releasing after dragging off the button is not a click.

use std::any::Any;

use crate::dom::node::NodeState;
use crate::event::handler::NodeEvent;
use crate::event::input::MouseButton;
use crate::geometry::Spacing;
use crate::style::DeclaredStyle;
use crate::widget::traits::{Widget, WidgetCx};

/// Click callback.
pub type ClickHandler = Box<dyn FnMut(&mut WidgetCx<'_>)>;

/// An interactive container. Put a [`Label`](super::Label) inside for text.
pub struct Button {
    on_click: Option<ClickHandler>,
    clicks: u32,
}

impl Button {
    pub fn new() -> Self {
        Self { on_click: None, clicks: 0 }
    }

    /// Set the click callback (builder).
    pub fn on_click(mut self, handler: impl FnMut(&mut WidgetCx<'_>) + 'static) -> Self {
        self.on_click = Some(Box::new(handler));
        self
    }

    /// Number of clicks seen so far.
    pub fn clicks(&self) -> u32 {
        self.clicks
    }
}

impl Default for Button {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Button {
    fn widget_type(&self) -> &str {
        "Button"
    }

    fn init(&self, state: &mut NodeState) {
        state.traits.add("button");
        state.rules.set("", DeclaredStyle::new().with_padding(Spacing::symmetric(0, 1)));
    }

    fn on_event(&mut self, cx: &mut WidgetCx<'_>, event: &NodeEvent) {
        if let NodeEvent::MouseRelease(MouseButton::Left) = event {
            if cx.state.interaction.hovered {
                self.clicks += 1;
                if let Some(handler) = self.on_click.as_mut() {
                    handler(cx);
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
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn release_while_hovered_clicks() {
        let mut dom = Dom::new();
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let id = dom.create(Button::new().on_click(move |_| c.set(c.get() + 1)));

        dom.state_mut(id).unwrap().interaction.hovered = true;
        fire(&mut dom, id, NodeEvent::MouseRelease(MouseButton::Left));
        assert_eq!(count.get(), 1);
        assert_eq!(dom.widget::<Button>(id).unwrap().clicks(), 1);
    }

    #[test]
    fn release_elsewhere_or_other_button_is_ignored() {
        let mut dom = Dom::new();
        let id = dom.create(Button::new());

        fire(&mut dom, id, NodeEvent::MouseRelease(MouseButton::Left));
        dom.state_mut(id).unwrap().interaction.hovered = true;
        fire(&mut dom, id, NodeEvent::MouseRelease(MouseButton::Right));
        assert_eq!(dom.widget::<Button>(id).unwrap().clicks(), 0);
    }

    #[test]
    fn click_can_defer_tree_changes() {
        let mut dom = Dom::new();
        let id = dom.create(Button::new().on_click(|cx| {
            let node = cx.node();
            cx.defer(move |dom| dom.add_trait(node, "clicked"));
        }));
        dom.state_mut(id).unwrap().interaction.hovered = true;

        fire(&mut dom, id, NodeEvent::MouseRelease(MouseButton::Left));
        assert_eq!(dom.queue().pending(), 1);
        crate::event::queue::drain(&mut dom);
        assert!(dom.has_trait(id, "clicked"));
    }

    #[test]
    fn default_padding() {
        let mut dom = Dom::new();
        let id = dom.create(Button::new());
        assert_eq!(dom.style(id, "").padding, Some(Spacing::symmetric(0, 1)));
    }
}
