//! Rendering pipeline: node paint, draw commands, raster canvas, terminal driver.

pub mod canvas;
pub mod command;
pub mod driver;
pub mod paint;
pub mod pixels;

pub use canvas::{Canvas, Cell, Rgb};
pub use command::{CommandList, DrawCommand, DrawSink};
pub use driver::Driver;
pub use paint::{paint, paint_background, paint_border, target_origin, target_size};
pub use pixels::{ImageHandle, PixelBuffer, PixelError};
