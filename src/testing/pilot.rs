//! Pilot: programmatic interaction with a headless App.
//!
//! The `Pilot` wraps an [`App`](crate::app::App) in headless mode and provides
//! methods to simulate pointer and keyboard input, run frames, and inspect
//! each frame's draw commands or rasterized output.

use crate::app::{App, AppConfig};
use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::event::input::{InputSample, KeyCode, MouseButton, ScrollDirection};
use crate::geometry::Point;
use crate::render::command::CommandList;
use crate::style::ParseError;
use crate::widget::Widget;

use super::snapshot::canvas_to_string;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless app driver for testing.
///
/// # Examples
///
/// ```ignore
/// use flowbox::testing::Pilot;
/// use flowbox::widgets::Button;
///
/// let mut pilot = Pilot::new(20, 5);
/// let button = pilot.spawn(pilot.root_id(), Button::new());
/// pilot.frame();
/// pilot.click(1, 0);
/// ```
pub struct Pilot {
    app: App,
    last: CommandList,
}

impl Pilot {
    /// Create a headless app with the given viewport size.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            app: App::new_headless(width, height),
            last: CommandList::new(),
        }
    }

    /// Create a Pilot from an [`AppConfig`], forcing headless mode.
    pub fn with_config(config: AppConfig, width: i32, height: i32) -> Result<Self, ParseError> {
        Ok(Self {
            app: App::with_config(config, width, height)?,
            last: CommandList::new(),
        })
    }

    /// Create a Pilot whose root carries the given style sheet.
    pub fn with_sheet(width: i32, height: i32, sheet: &str) -> Result<Self, ParseError> {
        Self::with_config(AppConfig::new().with_sheet(sheet), width, height)
    }

    // ── Tree access ──────────────────────────────────────────────────

    pub fn root_id(&self) -> NodeId {
        self.app.root.id()
    }

    pub fn dom(&self) -> &Dom {
        self.app.root.dom()
    }

    pub fn dom_mut(&mut self) -> &mut Dom {
        self.app.root.dom_mut()
    }

    /// Create a node under `parent`.
    pub fn spawn(&mut self, parent: NodeId, widget: impl Widget + 'static) -> NodeId {
        self.app.root.spawn(parent, widget)
    }

    // ── Input ────────────────────────────────────────────────────────

    /// Dispatch one raw sample immediately.
    pub fn input(&mut self, sample: InputSample) {
        self.app.root.handle_input(sample);
    }

    pub fn move_to(&mut self, x: i32, y: i32) {
        self.input(InputSample::PointerMove(Point::new(x, y)));
    }

    pub fn press(&mut self, button: MouseButton) {
        self.input(InputSample::PointerDown(button));
    }

    pub fn release(&mut self, button: MouseButton) {
        self.input(InputSample::PointerUp(button));
    }

    /// Move to `(x, y)`, then press and release the left button.
    pub fn click(&mut self, x: i32, y: i32) {
        self.move_to(x, y);
        self.press(MouseButton::Left);
        self.release(MouseButton::Left);
    }

    /// Key down followed by key up.
    pub fn key(&mut self, code: KeyCode) {
        self.input(InputSample::KeyDown(code));
        self.input(InputSample::KeyUp(code));
    }

    pub fn scroll(&mut self, direction: ScrollDirection) {
        self.input(InputSample::Scroll(direction));
    }

    pub fn resize(&mut self, width: i32, height: i32) {
        self.app.resize(width, height);
    }

    // ── Frames ───────────────────────────────────────────────────────

    /// Run one frame. Returns its draw commands; they are also rasterized
    /// into the app canvas.
    pub fn frame(&mut self) -> &CommandList {
        let mut commands = CommandList::new();
        self.app.root.run_frame(&mut commands);
        self.app.canvas.clear(self.app.config.clear_color);
        commands.replay(&mut self.app.canvas);
        self.last = commands;
        &self.last
    }

    /// Run `count` frames, keeping only the last one's commands.
    pub fn frames(&mut self, count: usize) -> &CommandList {
        for _ in 0..count {
            self.frame();
        }
        &self.last
    }

    /// The commands of the most recent frame.
    pub fn last_frame(&self) -> &CommandList {
        &self.last
    }

    /// The rasterized last frame as text (see [`canvas_to_string`]).
    pub fn screen(&self) -> String {
        canvas_to_string(&self.app.canvas, self.app.config.clear_color.to_rgb8())
    }

    // ── App access ───────────────────────────────────────────────────

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

// ===========================================================================
// Tests
// ===========================================================================
