//! Typed style property values.

use crate::geometry::{Axis, Point};
use crate::render::pixels::ImageHandle;
use crate::style::color::Color;

/// Whether a node (and, by inheritance, its subtree) is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

/// Whether a node takes part in pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerEvents {
    #[default]
    Enabled,
    Disabled,
}

/// Sizing rule for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sizing {
    /// A literal size in pixels.
    Fixed(i32),
    /// Intrinsic size: content plus padding.
    #[default]
    Fit,
    /// An equal share of the parent's remaining space.
    Fill,
}

/// How a node takes part in its parent's flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionMode {
    /// In flow, consumes space on the parent's primary axis.
    #[default]
    Static,
    /// Out of flow, offset from the parent's position.
    Relative,
    /// Out of flow, offset from the root origin.
    Absolute,
}

/// Position mode plus the explicit offset used by out-of-flow modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Placement {
    pub mode: PositionMode,
    pub offset: Point,
}

impl Placement {
    pub const STATIC: Placement = Placement { mode: PositionMode::Static, offset: Point::ZERO };

    pub const fn relative(x: i32, y: i32) -> Self {
        Self { mode: PositionMode::Relative, offset: Point::new(x, y) }
    }

    pub const fn absolute(x: i32, y: i32) -> Self {
        Self { mode: PositionMode::Absolute, offset: Point::new(x, y) }
    }

    pub const fn is_static(&self) -> bool {
        matches!(self.mode, PositionMode::Static)
    }
}

/// Flow direction of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Row,
    Column,
}

impl Direction {
    /// The flow axis.
    pub const fn primary_axis(self) -> Axis {
        match self {
            Direction::Row => Axis::Horizontal,
            Direction::Column => Axis::Vertical,
        }
    }
}

/// Alignment of content along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Start,
    Center,
    End,
}

/// What fills a node's rectangle behind its content.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Background {
    #[default]
    None,
    Solid(Color),
    Image(ImageHandle),
}

/// What translucent image pixels are composited against.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TransparencyReference {
    /// Pixels are drawn with their own color; fully transparent ones are skipped.
    #[default]
    None,
    /// The target rectangle is flooded with this color first.
    Static(Color),
    /// Each pixel is composited over a checkerboard tile color.
    Checkerboard { tile: i32, light: Color, dark: Color },
}

impl TransparencyReference {
    /// The conventional light/dark grey checkerboard.
    pub fn checkerboard(tile: i32) -> Self {
        TransparencyReference::Checkerboard {
            tile,
            light: Color::from_rgb8(204, 204, 204),
            dark: Color::from_rgb8(153, 153, 153),
        }
    }
}

/// How an image background is sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackgroundSize {
    /// Stretch to the node's own size.
    #[default]
    Fixed,
    /// Largest size that fits inside the node while preserving aspect ratio.
    Contain,
}

/// Where an image background is placed inside the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundPosition {
    /// Offset from the node's position.
    Fixed(Point),
    /// Centered inside the node.
    Center,
}

impl Default for BackgroundPosition {
    fn default() -> Self {
        BackgroundPosition::Fixed(Point::ZERO)
    }
}

/// Rectangle outline.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Border {
    #[default]
    None,
    Solid { width: i32, color: Color },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        assert_eq!(Visibility::default(), Visibility::Visible);
        assert_eq!(PointerEvents::default(), PointerEvents::Enabled);
        assert_eq!(Sizing::default(), Sizing::Fit);
        assert_eq!(Placement::default(), Placement::STATIC);
        assert_eq!(Direction::default(), Direction::Row);
        assert_eq!(Background::default(), Background::None);
        assert_eq!(Border::default(), Border::None);
    }

    #[test]
    fn direction_axes() {
        assert_eq!(Direction::Row.primary_axis(), Axis::Horizontal);
        assert_eq!(Direction::Column.primary_axis(), Axis::Vertical);
    }

    #[test]
    fn placement_constructors() {
        assert!(Placement::STATIC.is_static());
        assert!(!Placement::relative(1, 2).is_static());
        assert_eq!(Placement::absolute(3, 4).offset, Point::new(3, 4));
    }
}
