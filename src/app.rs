//! App struct: configuration, frame stepping and the terminal event loop.
//!
//! [`App`] ties together the [`Root`], a raster [`Canvas`] and the optional
//! crossterm [`Driver`]. The `new_headless` constructor allows testing
//! without a real terminal.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event;

use crate::event::input::{InputBatch, InputSample, KEY_ESCAPE};
use crate::render::canvas::Canvas;
use crate::render::driver::Driver;
use crate::root::Root;
use crate::style::{parse_sheet, Color, ParseError, TransparencyReference};

// ---------------------------------------------------------------------------
// AppConfig
// ---------------------------------------------------------------------------

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Optional window/app title.
    pub title: Option<String>,
    /// Target frames per second for the render loop.
    pub fps: u32,
    /// Color the canvas is cleared to before each frame.
    pub clear_color: Color,
    /// Checkerboard tile size for the root's image transparency reference.
    /// Zero leaves the reference unset.
    pub checker_tile: i32,
    /// Optional style sheet applied to the root node.
    pub sheet: Option<String>,
    /// Stop the app when Escape goes down, after the tree has seen it.
    pub quit_on_escape: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: None,
            fps: 60,
            clear_color: Color::BLACK,
            checker_tile: 0,
            sheet: None,
            quit_on_escape: true,
        }
    }
}

impl AppConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title (builder).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the target FPS (builder).
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Set the clear color (builder).
    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    /// Set the checkerboard tile size (builder).
    pub fn with_checker_tile(mut self, tile: i32) -> Self {
        self.checker_tile = tile;
        self
    }

    /// Set the style sheet text (builder).
    pub fn with_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = Some(sheet.into());
        self
    }

    /// Enable or disable quitting on Escape (builder).
    pub fn with_quit_on_escape(mut self, quit: bool) -> Self {
        self.quit_on_escape = quit;
        self
    }

    /// Time budget for one frame. A zero fps means no pacing.
    pub fn frame_interval(&self) -> Duration {
        if self.fps == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs(1) / self.fps
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// The main application struct.
///
/// Owns the root context, the canvas, the driver and the config.
/// The driver is optional to support headless testing.
pub struct App {
    /// The root context (tree, viewport, device state).
    pub root: Root,
    /// Raster target presented to the driver each frame.
    pub canvas: Canvas,
    /// Terminal output driver. `None` in headless mode.
    pub driver: Option<Driver>,
    /// Application configuration.
    pub config: AppConfig,
    /// Whether the app is still running.
    running: bool,
}

impl App {
    /// Create a new app with a real terminal driver.
    ///
    /// Queries the terminal size to set the initial viewport.
    pub fn new(config: AppConfig) -> io::Result<Self> {
        let (width, height) = Driver::terminal_size()?;
        let mut app = Self::with_config(config, width as i32, height as i32)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
        app.driver = Some(Driver::new()?);
        Ok(app)
    }

    /// Create a headless app for testing (no terminal driver).
    pub fn new_headless(width: i32, height: i32) -> Self {
        let config = AppConfig::default();
        let canvas = Canvas::new(width, height, config.clear_color);
        let mut root = Root::new();
        root.resize(width, height);
        Self {
            root,
            canvas,
            driver: None,
            config,
            running: true,
        }
    }

    /// Create a headless app from a config, applying its style sheet.
    pub fn with_config(config: AppConfig, width: i32, height: i32) -> Result<Self, ParseError> {
        let mut app = Self::new_headless(width, height);
        app.canvas.clear(config.clear_color);
        let id = app.root.id();

        if config.checker_tile > 0 {
            let reference = TransparencyReference::checkerboard(config.checker_tile);
            let style = app.root.dom().style(id, "").with_background_reference(reference);
            app.root.dom_mut().set_style(id, "", style);
        }
        if let Some(text) = &config.sheet {
            let sheet = parse_sheet(text)?;
            tracing::debug!(rules = sheet.len(), "applying root style sheet");
            app.root.dom_mut().apply_sheet(id, &sheet);
        }

        app.config = config;
        Ok(app)
    }

    /// Feed one terminal event: resize the viewport or dispatch its samples.
    /// Escape requests quit when the config allows it.
    pub fn handle_event(&mut self, event: event::Event) {
        if let event::Event::Resize(width, height) = event {
            self.resize(width as i32, height as i32);
            return;
        }
        let key_releases = self.driver.as_ref().is_some_and(Driver::reports_key_releases);
        for sample in InputBatch::from_event(event, key_releases) {
            self.root.handle_input(sample);
            if self.config.quit_on_escape && sample == InputSample::KeyDown(KEY_ESCAPE) {
                self.request_quit();
            }
        }
    }

    /// Resize the viewport and the canvas.
    pub fn resize(&mut self, width: i32, height: i32) {
        self.root.resize(width, height);
        self.canvas.resize(width, height, self.config.clear_color);
    }

    /// Run one frame into the canvas and present it if a driver is attached.
    pub fn step(&mut self) -> io::Result<()> {
        self.canvas.clear(self.config.clear_color);
        self.root.run_frame(&mut self.canvas);
        if let Some(driver) = self.driver.as_mut() {
            driver.present(&self.canvas)?;
            driver.flush()?;
        }
        Ok(())
    }

    /// Enter the terminal and run until quit, pacing frames to the config's fps.
    pub fn run(&mut self) -> io::Result<()> {
        if let Some(driver) = self.driver.as_mut() {
            driver.enter_alt_screen()?;
        }
        tracing::info!(title = ?self.config.title, fps = self.config.fps, "app started");

        let result = self.event_loop();

        if let Some(driver) = self.driver.as_mut() {
            driver.leave_alt_screen()?;
        }
        tracing::info!(frames = self.root.frame(), "app stopped");
        result
    }

    fn event_loop(&mut self) -> io::Result<()> {
        let interval = self.config.frame_interval();
        while self.running {
            let started = Instant::now();
            self.step()?;
            loop {
                let remaining = interval.saturating_sub(started.elapsed());
                if !event::poll(remaining)? {
                    break;
                }
                self.handle_event(event::read()?);
                if !self.running {
                    break;
                }
            }
        }
        Ok(())
    }

    /// Whether the app should quit.
    pub fn should_quit(&self) -> bool {
        !self.running
    }

    /// Request the app to quit.
    pub fn request_quit(&mut self) {
        self.running = false;
    }

    /// Whether the app has a terminal driver (not headless).
    pub fn has_driver(&self) -> bool {
        self.driver.is_some()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::handler::{EventKind, NodeEvent};
    use crate::style::{Background, DeclaredStyle, Sizing};
    use crate::widgets::Panel;
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

    fn headless_app() -> App {
        App::new_headless(20, 10)
    }

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn headless_app_no_driver() {
        let app = headless_app();
        assert!(!app.has_driver());
        assert!(!app.should_quit());
        assert_eq!(app.root.viewport().width, 20);
        assert_eq!((app.canvas.width(), app.canvas.height()), (20, 10));
    }

    #[test]
    fn config_sheet_is_applied_to_root() {
        let config = AppConfig::new().with_sheet("* { background: #ff0000; gap: 2; }");
        let app = App::with_config(config, 4, 4).unwrap();
        let style = app.root.dom().style(app.root.id(), "");
        assert_eq!(style.gap, Some(2));
        assert_eq!(style.background, Some(Background::Solid(Color::from_rgb8(255, 0, 0))));
    }

    #[test]
    fn config_sheet_structural_error() {
        let config = AppConfig::new().with_sheet("* { gap: 2;");
        assert!(App::with_config(config, 4, 4).is_err());
    }

    #[test]
    fn config_checker_tile_sets_reference() {
        let config = AppConfig::new().with_checker_tile(4);
        let app = App::with_config(config, 4, 4).unwrap();
        let style = app.root.dom().style(app.root.id(), "");
        assert_eq!(style.background_reference, Some(TransparencyReference::checkerboard(4)));
    }

    // ── step ─────────────────────────────────────────────────────────

    #[test]
    fn step_rasterizes_into_canvas() {
        let config = AppConfig::new().with_clear_color(Color::WHITE);
        let mut app = App::with_config(config, 4, 2).unwrap();
        let root = app.root.id();
        let child = app.root.spawn(root, Panel::new());
        app.root.dom_mut().set_style(
            child,
            "",
            DeclaredStyle::new()
                .with_size(2, 1)
                .with_background(Background::Solid(Color::BLACK)),
        );

        app.step().unwrap();
        assert_eq!(app.canvas.color_at(0, 0), Some((0, 0, 0)));
        assert_eq!(app.canvas.color_at(2, 0), Some((255, 255, 255)));
        assert_eq!(app.root.frame(), 1);
    }

    #[test]
    fn resize_updates_viewport_and_canvas() {
        let mut app = headless_app();
        app.handle_event(Event::Resize(30, 12));
        assert_eq!(app.root.viewport().width, 30);
        assert_eq!(app.canvas.height(), 12);

        let root = app.root.id();
        app.root.dom_mut().set_style(root, "", DeclaredStyle::new().with_width(Sizing::Fit));
        app.step().unwrap();
        // The root always takes the viewport size.
        assert_eq!(app.root.dom().state(root).unwrap().size.width, 30);
    }

    // ── request_quit / should_quit ───────────────────────────────────

    #[test]
    fn request_quit() {
        let mut app = headless_app();
        assert!(!app.should_quit());
        app.request_quit();
        assert!(app.should_quit());
    }

    #[test]
    fn escape_requests_quit() {
        let mut app = headless_app();
        app.handle_event(Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(!app.should_quit());
        app.handle_event(Event::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(app.should_quit());
    }

    #[test]
    fn escape_reaches_the_tree_and_quit_is_optional() {
        let config = AppConfig::new().with_quit_on_escape(false);
        let mut app = App::with_config(config, 10, 10).unwrap();
        let root = app.root.id();
        app.step().unwrap();
        app.handle_event(Event::Mouse(crossterm::event::MouseEvent {
            kind: crossterm::event::MouseEventKind::Down(crossterm::event::MouseButton::Left),
            column: 1,
            row: 1,
            modifiers: KeyModifiers::NONE,
        }));

        let seen = std::rc::Rc::new(std::cell::Cell::new(false));
        let s = seen.clone();
        app.root.dom_mut().on(root, EventKind::KeyDown, move |_, event| {
            if *event == NodeEvent::KeyDown(KEY_ESCAPE) {
                s.set(true);
            }
        });

        app.handle_event(Event::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(seen.get());
        assert!(!app.should_quit());
    }

    #[test]
    fn headless_key_press_is_not_left_held() {
        let mut app = headless_app();
        app.handle_event(Event::Key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE)));
        assert!(!app.root.is_key_down('a' as u32));
    }

    // ── AppConfig builder ────────────────────────────────────────────

    #[test]
    fn config_builder() {
        let config = AppConfig::new()
            .with_title("demo")
            .with_fps(30)
            .with_clear_color(Color::WHITE)
            .with_checker_tile(8);
        assert_eq!(config.title.as_deref(), Some("demo"));
        assert_eq!(config.fps, 30);
        assert_eq!(config.clear_color, Color::WHITE);
        assert_eq!(config.checker_tile, 8);
        assert!(config.sheet.is_none());
        assert!(config.quit_on_escape);
        assert!(!config.with_quit_on_escape(false).quit_on_escape);
    }

    #[test]
    fn frame_interval() {
        assert_eq!(AppConfig::new().with_fps(10).frame_interval(), Duration::from_millis(100));
        assert_eq!(AppConfig::new().with_fps(0).frame_interval(), Duration::ZERO);
    }
}
