//! Declared style records: every property is an independent `Option<T>`.
//!
//! `None` means the record does not mention the property at all. An unset
//! field never influences the cascade, so it is absence rather than a default.

use crate::geometry::Spacing;
use crate::style::color::Color;
use crate::style::computed::ComputedStyle;
use crate::style::values::*;

/// A sparse set of style properties attached to a node under one selector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeclaredStyle {
    pub visibility: Option<Visibility>,
    pub pointer_events: Option<PointerEvents>,

    pub width: Option<Sizing>,
    pub height: Option<Sizing>,
    pub placement: Option<Placement>,

    pub foreground: Option<Color>,
    pub background: Option<Background>,
    pub background_reference: Option<TransparencyReference>,
    pub background_size: Option<BackgroundSize>,
    pub background_position: Option<BackgroundPosition>,
    pub border: Option<Border>,

    pub direction: Option<Direction>,
    pub align_x: Option<Alignment>,
    pub align_y: Option<Alignment>,
    pub padding: Option<Spacing>,
    pub gap: Option<i32>,
}

/// Overwrite `target` when `value` is set.
fn put<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(v) = value {
        *target = v.clone();
    }
}

impl DeclaredStyle {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite every property of `computed` that this record sets.
    pub fn apply_to(&self, computed: &mut ComputedStyle) {
        put(&mut computed.visibility, &self.visibility);
        put(&mut computed.pointer_events, &self.pointer_events);
        put(&mut computed.width, &self.width);
        put(&mut computed.height, &self.height);
        put(&mut computed.placement, &self.placement);
        put(&mut computed.foreground, &self.foreground);
        put(&mut computed.background, &self.background);
        put(&mut computed.background_reference, &self.background_reference);
        put(&mut computed.background_size, &self.background_size);
        put(&mut computed.background_position, &self.background_position);
        put(&mut computed.border, &self.border);
        put(&mut computed.direction, &self.direction);
        put(&mut computed.align_x, &self.align_x);
        put(&mut computed.align_y, &self.align_y);
        put(&mut computed.padding, &self.padding);
        put(&mut computed.gap, &self.gap);
    }

    /// Merge `other` on top of `self`: fields set in `other` win.
    pub fn merge(&self, other: &DeclaredStyle) -> DeclaredStyle {
        fn pick<T: Clone>(base: &Option<T>, other: &Option<T>) -> Option<T> {
            other.clone().or_else(|| base.clone())
        }

        DeclaredStyle {
            visibility: pick(&self.visibility, &other.visibility),
            pointer_events: pick(&self.pointer_events, &other.pointer_events),
            width: pick(&self.width, &other.width),
            height: pick(&self.height, &other.height),
            placement: pick(&self.placement, &other.placement),
            foreground: pick(&self.foreground, &other.foreground),
            background: pick(&self.background, &other.background),
            background_reference: pick(&self.background_reference, &other.background_reference),
            background_size: pick(&self.background_size, &other.background_size),
            background_position: pick(&self.background_position, &other.background_position),
            border: pick(&self.border, &other.border),
            direction: pick(&self.direction, &other.direction),
            align_x: pick(&self.align_x, &other.align_x),
            align_y: pick(&self.align_y, &other.align_y),
            padding: pick(&self.padding, &other.padding),
            gap: pick(&self.gap, &other.gap),
        }
    }

    /// Returns `true` if no property is set.
    pub fn is_empty(&self) -> bool {
        *self == DeclaredStyle::default()
    }

    // ── Builders ─────────────────────────────────────────────────────

    pub fn with_visibility(mut self, value: Visibility) -> Self {
        self.visibility = Some(value);
        self
    }

    pub fn with_pointer_events(mut self, value: PointerEvents) -> Self {
        self.pointer_events = Some(value);
        self
    }

    pub fn with_width(mut self, value: Sizing) -> Self {
        self.width = Some(value);
        self
    }

    pub fn with_height(mut self, value: Sizing) -> Self {
        self.height = Some(value);
        self
    }

    /// Set both axes to `Fixed`.
    pub fn with_size(self, width: i32, height: i32) -> Self {
        self.with_width(Sizing::Fixed(width)).with_height(Sizing::Fixed(height))
    }

    pub fn with_placement(mut self, value: Placement) -> Self {
        self.placement = Some(value);
        self
    }

    pub fn with_foreground(mut self, value: Color) -> Self {
        self.foreground = Some(value);
        self
    }

    pub fn with_background(mut self, value: Background) -> Self {
        self.background = Some(value);
        self
    }

    pub fn with_background_reference(mut self, value: TransparencyReference) -> Self {
        self.background_reference = Some(value);
        self
    }

    pub fn with_background_size(mut self, value: BackgroundSize) -> Self {
        self.background_size = Some(value);
        self
    }

    pub fn with_background_position(mut self, value: BackgroundPosition) -> Self {
        self.background_position = Some(value);
        self
    }

    pub fn with_border(mut self, value: Border) -> Self {
        self.border = Some(value);
        self
    }

    pub fn with_direction(mut self, value: Direction) -> Self {
        self.direction = Some(value);
        self
    }

    pub fn with_align_x(mut self, value: Alignment) -> Self {
        self.align_x = Some(value);
        self
    }

    pub fn with_align_y(mut self, value: Alignment) -> Self {
        self.align_y = Some(value);
        self
    }

    pub fn with_padding(mut self, value: Spacing) -> Self {
        self.padding = Some(value);
        self
    }

    pub fn with_gap(mut self, value: i32) -> Self {
        self.gap = Some(value);
        self
    }
}
