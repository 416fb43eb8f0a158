//! Fully resolved styles, rebuilt from scratch every frame.

use crate::geometry::{Axis, Spacing};
use crate::style::color::Color;
use crate::style::values::*;

/// Every property with a concrete value.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedStyle {
    pub visibility: Visibility,
    pub pointer_events: PointerEvents,
    pub width: Sizing,
    pub height: Sizing,
    pub placement: Placement,
    pub foreground: Color,
    pub background: Background,
    pub background_reference: TransparencyReference,
    pub background_size: BackgroundSize,
    pub background_position: BackgroundPosition,
    pub border: Border,
    pub direction: Direction,
    pub align_x: Alignment,
    pub align_y: Alignment,
    pub padding: Spacing,
    pub gap: i32,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            visibility: Visibility::Visible,
            pointer_events: PointerEvents::Enabled,
            width: Sizing::Fit,
            height: Sizing::Fit,
            placement: Placement::STATIC,
            foreground: Color::BLACK,
            background: Background::None,
            background_reference: TransparencyReference::None,
            background_size: BackgroundSize::Fixed,
            background_position: BackgroundPosition::default(),
            border: Border::None,
            direction: Direction::Row,
            align_x: Alignment::Start,
            align_y: Alignment::Start,
            padding: Spacing::ZERO,
            gap: 0,
        }
    }
}

impl ComputedStyle {
    /// Defaults plus the inherited subset of `parent`: pointer events,
    /// visibility and foreground color. Layout properties are never inherited.
    pub fn inherited_from(parent: &ComputedStyle) -> Self {
        Self {
            visibility: parent.visibility,
            pointer_events: parent.pointer_events,
            foreground: parent.foreground,
            ..Self::default()
        }
    }

    /// Sizing rule along `axis`.
    pub fn sizing(&self, axis: Axis) -> Sizing {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Alignment along `axis`.
    pub fn align(&self, axis: Axis) -> Alignment {
        match axis {
            Axis::Horizontal => self.align_x,
            Axis::Vertical => self.align_y,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    pub fn is_interactive(&self) -> bool {
        self.pointer_events == PointerEvents::Enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    #[test]
    fn defaults_match_flow_layout_conventions() {
        let style = ComputedStyle::default();
        assert!(style.is_visible());
        assert!(style.is_interactive());
        assert_eq!(style.width, Sizing::Fit);
        assert_eq!(style.placement, Placement::STATIC);
        assert_eq!(style.direction, Direction::Row);
        assert_eq!(style.padding, Spacing::ZERO);
        assert_eq!(style.gap, 0);
        assert_eq!(style.border, Border::None);
    }

    #[test]
    fn inheritance_is_narrow() {
        let parent = ComputedStyle {
            visibility: Visibility::Hidden,
            pointer_events: PointerEvents::Disabled,
            foreground: Color::WHITE,
            width: Sizing::Fixed(300),
            direction: Direction::Column,
            padding: Spacing::all(5),
            gap: 3,
            placement: Placement::absolute(1, 1),
            ..ComputedStyle::default()
        };
        let child = ComputedStyle::inherited_from(&parent);
        assert_eq!(child.visibility, Visibility::Hidden);
        assert_eq!(child.pointer_events, PointerEvents::Disabled);
        assert_eq!(child.foreground, Color::WHITE);
        assert_eq!(child.width, Sizing::Fit);
        assert_eq!(child.direction, Direction::Row);
        assert_eq!(child.padding, Spacing::ZERO);
        assert_eq!(child.gap, 0);
        assert_eq!(child.placement.offset, Point::ZERO);
    }

    #[test]
    fn axis_accessors() {
        let style = ComputedStyle {
            width: Sizing::Fixed(4),
            height: Sizing::Fill,
            align_x: Alignment::End,
            ..ComputedStyle::default()
        };
        assert_eq!(style.sizing(Axis::Horizontal), Sizing::Fixed(4));
        assert_eq!(style.sizing(Axis::Vertical), Sizing::Fill);
        assert_eq!(style.align(Axis::Horizontal), Alignment::End);
        assert_eq!(style.align(Axis::Vertical), Alignment::Start);
    }
}
