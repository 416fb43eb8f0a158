//! Crossterm terminal output backend.
//!
//! The `Driver` wraps a writer (buffered stdout by default) and provides methods for
//! entering/leaving the alternate screen with mouse capture and key release
//! reporting, and presenting a [`Canvas`]. Each canvas cell becomes one terminal cell: the fill
//! color is the cell background, a glyph is printed in its own foreground color.

use std::io::{self, BufWriter, Stdout, Write};

use crossterm::{
    cursor,
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};

use super::canvas::{Canvas, Rgb};

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Terminal output backend using crossterm.
///
/// The driver does NOT automatically enter the alternate screen on creation:
/// call `enter_alt_screen` explicitly.
pub struct Driver<W: Write = BufWriter<Stdout>> {
    writer: W,
    raw: bool,
    key_releases: bool,
}

impl Driver {
    /// Create a new driver wrapping stdout.
    pub fn new() -> io::Result<Self> {
        Ok(Self::with_writer(BufWriter::new(io::stdout())))
    }

    /// Get the terminal size (columns, rows) via crossterm.
    pub fn terminal_size() -> io::Result<(u16, u16)> {
        terminal::size()
    }
}

impl<W: Write> Driver<W> {
    /// Create a driver over an arbitrary writer.
    pub fn with_writer(writer: W) -> Self {
        Self { writer, raw: false, key_releases: false }
    }

    /// Enter the alternate screen, capture the mouse, and enable raw mode.
    ///
    /// Key release reporting is requested when the terminal supports the
    /// keyboard enhancement protocol.
    pub fn enter_alt_screen(&mut self) -> io::Result<()> {
        execute!(self.writer, EnterAlternateScreen, EnableMouseCapture, cursor::Hide)?;
        terminal::enable_raw_mode()?;
        self.raw = true;

        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                self.writer,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            self.key_releases = true;
        }
        tracing::debug!(key_releases = self.key_releases, "entered alternate screen");
        Ok(())
    }

    /// Whether the terminal delivers key release events.
    pub fn reports_key_releases(&self) -> bool {
        self.key_releases
    }

    /// Leave the alternate screen and restore the terminal.
    pub fn leave_alt_screen(&mut self) -> io::Result<()> {
        if self.key_releases {
            execute!(self.writer, PopKeyboardEnhancementFlags)?;
            self.key_releases = false;
        }
        if self.raw {
            terminal::disable_raw_mode()?;
            self.raw = false;
        }
        execute!(self.writer, cursor::Show, DisableMouseCapture, LeaveAlternateScreen)?;
        Ok(())
    }

    /// Queue the whole canvas. Colors are only re-sent when they change.
    ///
    /// Call `flush()` afterward to send to the terminal.
    pub fn present(&mut self, canvas: &Canvas) -> io::Result<()> {
        let mut background: Option<Rgb> = None;
        let mut foreground: Option<Rgb> = None;

        for (y, row) in canvas.rows().enumerate() {
            queue!(self.writer, cursor::MoveTo(0, clamp_u16(y)))?;
            for cell in row {
                if background != Some(cell.color) {
                    queue!(self.writer, SetBackgroundColor(to_color(cell.color)))?;
                    background = Some(cell.color);
                }
                match cell.glyph {
                    Some((ch, color)) => {
                        if foreground != Some(color) {
                            queue!(self.writer, SetForegroundColor(to_color(color)))?;
                            foreground = Some(color);
                        }
                        queue!(self.writer, Print(ch))?;
                    }
                    None => queue!(self.writer, Print(' '))?,
                }
            }
        }
        queue!(self.writer, ResetColor)?;
        Ok(())
    }

    /// Flush the internal write buffer to the terminal.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// The wrapped writer.
    pub fn writer(&self) -> &W {
        &self.writer
    }
}

impl<W: Write> Drop for Driver<W> {
    fn drop(&mut self) {
        if self.raw {
            let _ = self.leave_alt_screen();
        }
    }
}

fn to_color((r, g, b): Rgb) -> Color {
    Color::Rgb { r, g, b }
}

fn clamp_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::command::{DrawCommand, DrawSink};
    use crate::style::Color as StyleColor;

    fn output(canvas: &Canvas) -> String {
        let mut driver = Driver::with_writer(Vec::new());
        driver.present(canvas).unwrap();
        driver.flush().unwrap();
        String::from_utf8(driver.writer().clone()).unwrap()
    }

    #[test]
    fn present_sends_background_once_per_run() {
        let canvas = Canvas::new(3, 1, StyleColor::WHITE);
        let out = output(&canvas);
        assert_eq!(out.matches("48;2;255;255;255").count(), 1);
        assert_eq!(out.matches(' ').count(), 3);
    }

    #[test]
    fn present_prints_glyphs_in_their_color() {
        let mut canvas = Canvas::new(2, 1, StyleColor::BLACK);
        canvas.submit(DrawCommand::SetColor { r: 10, g: 20, b: 30 });
        canvas.submit(DrawCommand::DrawText { x: 0, y: 0, text: "hi".into() });
        let out = output(&canvas);
        assert!(out.contains("38;2;10;20;30"));
        assert!(out.contains('h'));
        assert!(out.contains('i'));
        assert_eq!(out.matches("38;2;10;20;30").count(), 1);
    }

    #[test]
    fn present_moves_to_each_row() {
        let canvas = Canvas::new(1, 2, StyleColor::BLACK);
        let out = output(&canvas);
        // MoveTo is 1-based on the wire.
        assert!(out.contains("\x1b[1;1H"));
        assert!(out.contains("\x1b[2;1H"));
    }

    #[test]
    fn new_driver_assumes_press_only_keys() {
        let driver = Driver::with_writer(Vec::new());
        assert!(!driver.reports_key_releases());
    }

    #[test]
    fn color_conversion() {
        assert_eq!(to_color((1, 2, 3)), Color::Rgb { r: 1, g: 2, b: 3 });
        assert_eq!(clamp_u16(70_000), u16::MAX);
    }
}
