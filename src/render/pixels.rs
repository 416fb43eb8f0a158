//! Pixel buffers shared with external collaborators.
//!
//! A [`PixelBuffer`] is a grid of normalized RGBA pixels. The engine only
//! reads shared buffers during paint; it owns one scratch buffer per image
//! background which it reallocates and rewrites when resampling.
//!
//! Nodes reference shared buffers through an [`ImageHandle`], a weak
//! reference whose target lifetime is managed by whoever created the `Rc`.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::geometry::Size;
use crate::style::Color;

/// Errors reported by pixel buffer operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PixelError {
    #[error("invalid buffer size {width}x{height}")]
    InvalidSize { width: i32, height: i32 },
    #[error("pixel ({x}, {y}) is outside a {width}x{height} buffer")]
    OutOfBounds { x: i32, y: i32, width: i32, height: i32 },
}

/// Largest pixel count a buffer or canvas may hold (4096 x 4096).
pub const MAX_PIXELS: usize = 1 << 24;

/// `width * height` as a length, or `None` when either side is negative or
/// the product exceeds [`MAX_PIXELS`].
pub fn pixel_count(width: i32, height: i32) -> Option<usize> {
    let width = usize::try_from(width).ok()?;
    let height = usize::try_from(height).ok()?;
    width.checked_mul(height).filter(|&count| count <= MAX_PIXELS)
}

/// A 2D grid of RGBA pixels, row-major.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PixelBuffer {
    width: i32,
    height: i32,
    pixels: Vec<Color>,
}

impl PixelBuffer {
    /// Create a fully transparent buffer. Negative dimensions are clamped to
    /// zero; a size over [`MAX_PIXELS`] yields an empty buffer.
    pub fn new(width: i32, height: i32) -> Self {
        let mut buffer = Self::default();
        if let Err(err) = buffer.reallocate(width.max(0), height.max(0)) {
            tracing::warn!(%err, "pixel buffer too large, left empty");
        }
        buffer
    }

    /// Create a buffer whose pixels are produced by `f(x, y)`.
    pub fn from_fn(width: i32, height: i32, mut f: impl FnMut(i32, i32) -> Color) -> Self {
        let mut buffer = Self::new(width, height);
        for y in 0..buffer.height {
            for x in 0..buffer.width {
                buffer.pixels[(y * buffer.width + x) as usize] = f(x, y);
            }
        }
        buffer
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            None
        } else {
            Some((y * self.width + x) as usize)
        }
    }

    /// Read a pixel. `None` when `(x, y)` is outside the buffer.
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Write a pixel.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) -> Result<(), PixelError> {
        let i = self.index(x, y).ok_or(PixelError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        })?;
        self.pixels[i] = color;
        Ok(())
    }

    /// Resize the buffer, discarding its contents (all pixels become transparent).
    pub fn reallocate(&mut self, width: i32, height: i32) -> Result<(), PixelError> {
        let Some(count) = pixel_count(width, height) else {
            return Err(PixelError::InvalidSize { width, height });
        };
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(count, Color::TRANSPARENT);
        Ok(())
    }

    /// Nearest-neighbour resample of `self` into `target` at `size`.
    ///
    /// `target` is reallocated first. An empty source leaves `target` transparent.
    pub fn resample_into(&self, target: &mut PixelBuffer, size: Size) -> Result<(), PixelError> {
        target.reallocate(size.width, size.height)?;
        if self.width == 0 || self.height == 0 {
            return Ok(());
        }
        for y in 0..size.height {
            let sy = (i64::from(y) * i64::from(self.height) / i64::from(size.height)) as i32;
            for x in 0..size.width {
                let sx = (i64::from(x) * i64::from(self.width) / i64::from(size.width)) as i32;
                let i = (y * size.width + x) as usize;
                target.pixels[i] = self.pixels[(sy * self.width + sx) as usize];
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ImageHandle
// ---------------------------------------------------------------------------

/// Non-owning reference to a shared pixel buffer.
///
/// Equality is identity: two handles are equal when they point at the same
/// allocation.
#[derive(Clone)]
pub struct ImageHandle(Weak<RefCell<PixelBuffer>>);

impl ImageHandle {
    /// Reference a buffer owned elsewhere.
    pub fn new(buffer: &Rc<RefCell<PixelBuffer>>) -> Self {
        Self(Rc::downgrade(buffer))
    }

    /// The buffer, if its owner still holds it.
    pub fn upgrade(&self) -> Option<Rc<RefCell<PixelBuffer>>> {
        self.0.upgrade()
    }
}

impl PartialEq for ImageHandle {
    fn eq(&self, other: &Self) -> bool {
        Weak::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageHandle")
            .field("alive", &(self.0.strong_count() > 0))
            .finish()
    }
}
