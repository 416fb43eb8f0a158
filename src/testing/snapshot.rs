//! Snapshot rendering helpers.
//!
//! Functions for converting recorded frames (draw-command lists, rasterized
//! canvases) into plain-text strings suitable for snapshot testing and
//! assertions.

use crate::render::canvas::{Canvas, Rgb};
use crate::render::command::CommandList;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// One command per line, in submission order.
pub fn commands_to_string(commands: &CommandList) -> String {
    commands.to_text()
}

/// Render a canvas as text, one line per row.
///
/// Glyph cells print their character. Other cells print `.` when they still
/// have the `background` color and `#` otherwise. Rows are right-trimmed of
/// `.` so trailing background does not churn snapshots.
///
/// # Examples
///
/// ```ignore
/// use flowbox::testing::canvas_to_string;
///
/// let text = canvas_to_string(&canvas, (0, 0, 0));
/// assert_eq!(text, "##\n#");
/// ```
pub fn canvas_to_string(canvas: &Canvas, background: Rgb) -> String {
    canvas
        .rows()
        .take(canvas.height().max(0) as usize)
        .map(|row| {
            let line: String = row
                .iter()
                .map(|cell| match cell.glyph {
                    Some((ch, _)) => ch,
                    None if cell.color == background => '.',
                    None => '#',
                })
                .collect();
            line.trim_end_matches('.').to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Replay `commands` onto a fresh canvas cleared to `background` and render
/// it with [`canvas_to_string`].
pub fn rasterize(commands: &CommandList, width: i32, height: i32, background: Rgb) -> String {
    let (r, g, b) = background;
    let mut canvas = Canvas::new(width, height, crate::style::Color::from_rgb8(r, g, b));
    commands.replay(&mut canvas);
    canvas_to_string(&canvas, background)
}

// ===========================================================================
// Tests
// ===========================================================================
