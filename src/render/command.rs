//! Draw command stream: the boundary between the engine and a backend.
//!
//! Commands are replayed once, in order. Color is state: every fill, stroke
//! and text command uses the most recent [`DrawCommand::SetColor`].

use std::fmt;

use crate::style::Color;

/// One abstract drawing instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    SetColor { r: u8, g: u8, b: u8 },
    FillPoint { x: i32, y: i32 },
    FillRectangle { x: i32, y: i32, width: i32, height: i32 },
    StrokeRectangle { x: i32, y: i32, width: i32, height: i32, stroke: i32 },
    BeginPolygon,
    Vertex { x: i32, y: i32 },
    StrokePolygon,
    FillPolygon,
    DrawText { x: i32, y: i32, text: String },
}

impl DrawCommand {
    /// `SetColor` for an opaque color; alpha is dropped.
    pub fn set_color(color: Color) -> Self {
        let (r, g, b) = color.to_rgb8();
        DrawCommand::SetColor { r, g, b }
    }
}

impl fmt::Display for DrawCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawCommand::SetColor { r, g, b } => write!(f, "color #{r:02x}{g:02x}{b:02x}"),
            DrawCommand::FillPoint { x, y } => write!(f, "point {x},{y}"),
            DrawCommand::FillRectangle { x, y, width, height } => {
                write!(f, "fill {x},{y} {width}x{height}")
            }
            DrawCommand::StrokeRectangle { x, y, width, height, stroke } => {
                write!(f, "stroke {x},{y} {width}x{height} w{stroke}")
            }
            DrawCommand::BeginPolygon => f.write_str("polygon"),
            DrawCommand::Vertex { x, y } => write!(f, "  vertex {x},{y}"),
            DrawCommand::StrokePolygon => f.write_str("stroke polygon"),
            DrawCommand::FillPolygon => f.write_str("fill polygon"),
            DrawCommand::DrawText { x, y, text } => write!(f, "text {x},{y} {text:?}"),
        }
    }
}

/// A consumer of draw commands. Backends never feed back into layout.
pub trait DrawSink {
    fn submit(&mut self, command: DrawCommand);
}

/// Records commands for later replay or inspection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandList {
    commands: Vec<DrawCommand>,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Feed every recorded command to `sink`, in order.
    pub fn replay(&self, sink: &mut dyn DrawSink) {
        for command in &self.commands {
            sink.submit(command.clone());
        }
    }

    /// One command per line, for snapshots and debugging.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for command in &self.commands {
            out.push_str(&command.to_string());
            out.push('\n');
        }
        out
    }
}

impl DrawSink for CommandList {
    fn submit(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

impl IntoIterator for CommandList {
    type Item = DrawCommand;
    type IntoIter = std::vec::IntoIter<DrawCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.into_iter()
    }
}
