//! Software raster backend: executes draw commands into a grid of cells.
//!
//! One cell per pixel. A cell has a fill color plus an optional glyph (drawn
//! by `DrawText`) in its own color; fills clear glyphs underneath them.
//! Everything is clipped to the canvas.

use crate::render::command::{DrawCommand, DrawSink};
use crate::render::pixels::{pixel_count, MAX_PIXELS};
use crate::style::Color;
use crate::widgets::{GLYPH_HEIGHT, GLYPH_WIDTH};

/// 8-bit RGB triple.
pub type Rgb = (u8, u8, u8);

/// One pixel of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub color: Rgb,
    pub glyph: Option<(char, Rgb)>,
}

impl Cell {
    fn filled(color: Rgb) -> Self {
        Self { color, glyph: None }
    }
}

/// A fixed-size raster target.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
    color: Rgb,
    polygon: Vec<(i32, i32)>,
}

impl Canvas {
    /// A canvas filled with `background`. Negative sides clamp to zero; a
    /// size over [`MAX_PIXELS`] yields an empty canvas.
    pub fn new(width: i32, height: i32, background: Color) -> Self {
        let (mut width, mut height) = (width.max(0), height.max(0));
        let count = match pixel_count(width, height) {
            Some(count) => count,
            None => {
                tracing::warn!(width, height, "canvas too large, left empty");
                (width, height) = (0, 0);
                0
            }
        };
        let fill = Cell::filled(background.to_rgb8());
        Self {
            width,
            height,
            cells: vec![fill; count],
            color: (0, 0, 0),
            polygon: Vec::new(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Resize and clear to `background`.
    pub fn resize(&mut self, width: i32, height: i32, background: Color) {
        *self = Self::new(width, height, background);
    }

    /// Fill every cell with `background`, dropping glyphs.
    pub fn clear(&mut self, background: Color) {
        let fill = Cell::filled(background.to_rgb8());
        self.cells.iter_mut().for_each(|cell| *cell = fill);
        self.polygon.clear();
    }

    pub fn cell(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn color_at(&self, x: i32, y: i32) -> Option<Rgb> {
        self.cell(x, y).map(|cell| cell.color)
    }

    pub fn glyph_at(&self, x: i32, y: i32) -> Option<char> {
        self.cell(x, y).and_then(|cell| cell.glyph.map(|(ch, _)| ch))
    }

    /// Rows of cells, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1) as usize)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            None
        } else {
            Some((y * self.width + x) as usize)
        }
    }

    fn plot(&mut self, x: i32, y: i32) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = Cell::filled(self.color);
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + width).min(self.width);
        let y1 = (y + height).min(self.height);
        for py in y0..y1 {
            for px in x0..x1 {
                self.plot(px, py);
            }
        }
    }

    /// Outline drawn inward from the rectangle's edge.
    fn stroke_rect(&mut self, x: i32, y: i32, width: i32, height: i32, stroke: i32) {
        let stroke = stroke.min(width.min(height).div_euclid(2).max(1));
        for inset in 0..stroke.max(0) {
            let (x, y) = (x + inset, y + inset);
            let (w, h) = (width - 2 * inset, height - 2 * inset);
            if w <= 0 || h <= 0 {
                break;
            }
            self.fill_rect(x, y, w, 1);
            self.fill_rect(x, y + h - 1, w, 1);
            self.fill_rect(x, y, 1, h);
            self.fill_rect(x + w - 1, y, 1, h);
        }
    }

    /// Bresenham line, both endpoints inclusive.
    fn line(&mut self, (mut x0, mut y0): (i32, i32), (x1, y1): (i32, i32)) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.plot(x0, y0);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn stroke_polygon(&mut self) {
        let points = std::mem::take(&mut self.polygon);
        for (i, &start) in points.iter().enumerate() {
            let end = points[(i + 1) % points.len()];
            self.line(start, end);
        }
    }

    /// Even-odd scanline fill, sampling at pixel centers.
    fn fill_polygon(&mut self) {
        let points = std::mem::take(&mut self.polygon);
        if points.len() < 3 {
            return;
        }
        let top = points.iter().map(|p| p.1).min().unwrap_or(0).max(0);
        let bottom = points.iter().map(|p| p.1).max().unwrap_or(0).min(self.height - 1);

        for y in top..=bottom {
            let sample = y as f32 + 0.5;
            let mut crossings: Vec<f32> = Vec::new();
            for (i, &(ax, ay)) in points.iter().enumerate() {
                let (bx, by) = points[(i + 1) % points.len()];
                let (ay, by) = (ay as f32, by as f32);
                if (ay <= sample && by > sample) || (by <= sample && ay > sample) {
                    let t = (sample - ay) / (by - ay);
                    crossings.push(ax as f32 + t * (bx - ax) as f32);
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));
            for span in crossings.chunks_exact(2) {
                let start = (span[0] - 0.5).ceil() as i32;
                let end = (span[1] - 0.5).ceil() as i32;
                for x in start..end {
                    self.plot(x, y);
                }
            }
        }
    }

    /// Fixed-width text: one glyph per character cell.
    fn text(&mut self, x: i32, y: i32, text: &str) {
        for (i, ch) in text.chars().enumerate() {
            let cx = x + i as i32 * GLYPH_WIDTH;
            for gy in 0..GLYPH_HEIGHT {
                for gx in 0..GLYPH_WIDTH {
                    if let Some(index) = self.index(cx + gx, y + gy) {
                        self.cells[index].glyph = Some((ch, self.color));
                    }
                }
            }
        }
    }
}

impl DrawSink for Canvas {
    fn submit(&mut self, command: DrawCommand) {
        match command {
            DrawCommand::SetColor { r, g, b } => self.color = (r, g, b),
            DrawCommand::FillPoint { x, y } => self.plot(x, y),
            DrawCommand::FillRectangle { x, y, width, height } => self.fill_rect(x, y, width, height),
            DrawCommand::StrokeRectangle { x, y, width, height, stroke } => {
                self.stroke_rect(x, y, width, height, stroke)
            }
            DrawCommand::BeginPolygon => self.polygon.clear(),
            DrawCommand::Vertex { x, y } => self.polygon.push((x, y)),
            DrawCommand::StrokePolygon => self.stroke_polygon(),
            DrawCommand::FillPolygon => self.fill_polygon(),
            DrawCommand::DrawText { x, y, text } => self.text(x, y, &text),
        }
    }
}
