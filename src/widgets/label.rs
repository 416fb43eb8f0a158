//! Label widget: fixed-width text.
//!
//! Text measurement is a stub: every character occupies a
//! [`GLYPH_WIDTH`] x [`GLYPH_HEIGHT`] cell and lines split on `'\n'`.

use std::any::Any;

use crate::dom::node::NodeState;
use crate::geometry::Size;
use crate::render::command::{DrawCommand, DrawSink};
use crate::widget::traits::Widget;

/// Width of one character cell, in pixels.
pub const GLYPH_WIDTH: i32 = 1;
/// Height of one text line, in pixels.
pub const GLYPH_HEIGHT: i32 = 1;

/// Non-interactive text drawn in the node's foreground color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    text: String,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text. Takes effect on the next layout.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Size of `text` under the fixed-width stub.
    pub fn text_size(text: &str) -> Size {
        if text.is_empty() {
            return Size::ZERO;
        }
        let lines = text.split('\n');
        let (count, widest) = lines.fold((0, 0), |(count, widest), line| {
            (count + 1, widest.max(line.chars().count() as i32))
        });
        Size::new(widest * GLYPH_WIDTH, count * GLYPH_HEIGHT)
    }
}

impl Widget for Label {
    fn widget_type(&self) -> &str {
        "Label"
    }

    fn init(&self, state: &mut NodeState) {
        state.traits.add("label");
    }

    fn measure(&self, _state: &NodeState) -> Size {
        Self::text_size(&self.text)
    }

    fn paint(&self, state: &NodeState, sink: &mut dyn DrawSink) {
        if self.text.is_empty() {
            return;
        }
        let padding = state.computed.padding;
        let x = state.position.x + padding.left;
        let y = state.position.y + padding.top;

        sink.submit(DrawCommand::set_color(state.computed.foreground));
        for (row, line) in self.text.split('\n').enumerate() {
            if line.is_empty() {
                continue;
            }
            sink.submit(DrawCommand::DrawText {
                x,
                y: y + row as i32 * GLYPH_HEIGHT,
                text: line.to_owned(),
            });
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
