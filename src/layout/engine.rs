//! Three-pass flow layout.
//!
//! 1. [`measure`] (post-order): Fixed and Fit sizes, bottom-up.
//! 2. [`resolve`] (pre-order): Fill sizes from the parent's final size.
//! 3. [`place`] (pre-order): absolute positions from the parent's position.
//!
//! Each container lays its static children out along one primary axis
//! (its direction); the secondary axis only aligns them. Relative and
//! absolute children are out of flow and take no space.
//!
//! Layout reads computed styles, so the cascade must have run first.

use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::geometry::{Axis, Point, Size};
use crate::style::{Alignment, ComputedStyle, PositionMode, Sizing};

const AXES: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];

/// Lay out the tree under `root`, giving the root `viewport` as its size and
/// the origin as its position.
pub fn layout(dom: &mut Dom, root: NodeId, viewport: Size) {
    measure(dom, root);
    if let Some(state) = dom.state_mut(root) {
        state.size = viewport;
        state.position = Point::ZERO;
    }
    resolve(dom, root);
    place(dom, root);
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn style_of(dom: &Dom, id: NodeId) -> ComputedStyle {
    dom.state(id).map(|state| state.computed.clone()).unwrap_or_default()
}

fn size_of(dom: &Dom, id: NodeId) -> Size {
    dom.state(id).map(|state| state.size).unwrap_or_default()
}

fn is_static(dom: &Dom, id: NodeId) -> bool {
    dom.state(id).is_some_and(|state| state.computed.placement.is_static())
}

/// Children that take part in flow.
fn static_children(dom: &Dom, children: &[NodeId]) -> Vec<NodeId> {
    children.iter().copied().filter(|&c| is_static(dom, c)).collect()
}

/// Size of the flow content: summed (plus gaps) on `primary`, max on the
/// other axis.
fn flow_content(dom: &Dom, statics: &[NodeId], primary: Axis, gap: i32) -> Size {
    let secondary = primary.cross();
    let mut content = Size::ZERO;
    let mut along = 0;
    let mut across = 0;
    for &child in statics {
        let size = size_of(dom, child);
        along += size.along(primary);
        across = across.max(size.along(secondary));
    }
    if !statics.is_empty() {
        along += gap * (statics.len() as i32 - 1);
    }
    content.set_along(primary, along);
    content.set_along(secondary, across);
    content
}

/// Offset of content of size `content` inside `available` space.
fn align_offset(alignment: Alignment, available: i32, content: i32) -> i32 {
    let free = available - content;
    match alignment {
        Alignment::Start => 0,
        // Content larger than the space starts at the leading edge.
        Alignment::Center => free.max(0) / 2,
        Alignment::End => free,
    }
}

// ---------------------------------------------------------------------------
// Pass 1: independent dimensions
// ---------------------------------------------------------------------------

/// Resolve Fixed and Fit axes for `id` and its subtree, leaves first.
/// Fill axes get a zero placeholder.
pub fn measure(dom: &mut Dom, id: NodeId) {
    let children = dom.children(id).to_vec();
    for &child in &children {
        measure(dom, child);
    }

    let Some(data) = dom.get(id) else {
        return;
    };
    let style = &data.state.computed;
    let primary = style.direction.primary_axis();
    let statics = static_children(dom, &children);
    let flow = flow_content(dom, &statics, primary, style.gap);
    let own = data.widget.measure(&data.state);

    let mut size = Size::ZERO;
    for axis in AXES {
        let value = match style.sizing(axis) {
            Sizing::Fixed(k) => k,
            Sizing::Fit => flow.along(axis).max(own.along(axis)) + style.padding.along(axis),
            Sizing::Fill => 0,
        };
        size.set_along(axis, value);
    }

    if let Some(state) = dom.state_mut(id) {
        state.size = size;
    }
}

// ---------------------------------------------------------------------------
// Pass 2: responsive dimensions
// ---------------------------------------------------------------------------

/// Give Fill children of `id` their share of its final size, then recurse.
pub fn resolve(dom: &mut Dom, id: NodeId) {
    let children = dom.children(id).to_vec();
    if children.is_empty() {
        return;
    }
    let style = style_of(dom, id);
    let own = size_of(dom, id);
    let primary = style.direction.primary_axis();
    let secondary = primary.cross();

    let statics = static_children(dom, &children);
    let used = flow_content(dom, &statics, primary, style.gap).along(primary);
    let remaining = own.along(primary) - style.padding.along(primary) - used;
    let fillable = statics
        .iter()
        .filter(|&&c| style_of(dom, c).sizing(primary) == Sizing::Fill)
        .count() as i32;
    // No fillable children: the leftover space stays unused.
    let share = if fillable > 0 { (remaining / fillable).max(0) } else { 0 };
    let cross_space = (own.along(secondary) - style.padding.along(secondary)).max(0);

    for child in children {
        let child_style = style_of(dom, child);
        if let Some(state) = dom.state_mut(child) {
            if child_style.placement.is_static() {
                if child_style.sizing(primary) == Sizing::Fill {
                    state.size.set_along(primary, share);
                }
                if child_style.sizing(secondary) == Sizing::Fill {
                    state.size.set_along(secondary, cross_space);
                }
            } else {
                // Out of flow: size against the container itself.
                for axis in AXES {
                    if child_style.sizing(axis) == Sizing::Fill {
                        state.size.set_along(axis, own.along(axis));
                    }
                }
            }
        }
        resolve(dom, child);
    }
}

// ---------------------------------------------------------------------------
// Pass 3: positions
// ---------------------------------------------------------------------------

/// Position the children of `id` (whose own position is final), then recurse.
pub fn place(dom: &mut Dom, id: NodeId) {
    let children = dom.children(id).to_vec();
    if children.is_empty() {
        return;
    }
    let style = style_of(dom, id);
    let (own, origin) = match dom.state(id) {
        Some(state) => (state.size, state.position),
        None => return,
    };
    let primary = style.direction.primary_axis();
    let secondary = primary.cross();
    let padding = style.padding;

    let statics = static_children(dom, &children);
    let content = flow_content(dom, &statics, primary, style.gap).along(primary);
    let inner = own.along(primary) - padding.along(primary);
    let mut cursor =
        origin.along(primary) + padding.start(primary) + align_offset(style.align(primary), inner, content);
    let cross_inner = own.along(secondary) - padding.along(secondary);

    for child in children {
        let placement = style_of(dom, child).placement;
        let size = size_of(dom, child);
        let position = match placement.mode {
            PositionMode::Static => {
                let mut p = Point::ZERO;
                p.set_along(primary, cursor);
                cursor += size.along(primary) + style.gap;
                p.set_along(
                    secondary,
                    origin.along(secondary)
                        + padding.start(secondary)
                        + align_offset(style.align(secondary), cross_inner, size.along(secondary)),
                );
                p
            }
            PositionMode::Relative => origin + placement.offset,
            PositionMode::Absolute => placement.offset,
        };
        if let Some(state) = dom.state_mut(child) {
            state.position = position;
        }
        place(dom, child);
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Spacing;
    use crate::root::restyle;
    use crate::style::{DeclaredStyle, Direction, Placement};
    use crate::widgets::{Label, Panel, GLYPH_HEIGHT, GLYPH_WIDTH};
    use pretty_assertions::assert_eq;

    fn node(dom: &mut Dom, parent: Option<NodeId>, style: DeclaredStyle) -> NodeId {
        let id = dom.create(Panel::new());
        dom.set_style(id, "", style);
        if let Some(parent) = parent {
            dom.add_child(parent, id);
        }
        id
    }

    fn run(dom: &mut Dom, root: NodeId, viewport: Size) {
        restyle(dom, root);
        layout(dom, root, viewport);
    }

    fn rect(dom: &Dom, id: NodeId) -> (i32, i32, i32, i32) {
        let s = dom.state(id).unwrap();
        (s.position.x, s.position.y, s.size.width, s.size.height)
    }

    #[test]
    fn fixed_leaf_ignores_parent() {
        let mut dom = Dom::new();
        let root = node(&mut dom, None, DeclaredStyle::new());
        let leaf = node(&mut dom, Some(root), DeclaredStyle::new().with_size(7, 9));
        run(&mut dom, root, Size::new(3, 3));
        assert_eq!(size_of(&dom, leaf), Size::new(7, 9));
    }

    #[test]
    fn fit_row_sums_children_gaps_and_padding() {
        let mut dom = Dom::new();
        let root = node(&mut dom, None, DeclaredStyle::new());
        let row = node(
            &mut dom,
            Some(root),
            DeclaredStyle::new().with_gap(3).with_padding(Spacing::new(0, 5, 0, 2)),
        );
        for (w, h) in [(10, 4), (20, 8), (30, 6)] {
            node(&mut dom, Some(row), DeclaredStyle::new().with_size(w, h));
        }
        run(&mut dom, root, Size::new(500, 500));
        assert_eq!(size_of(&dom, row), Size::new(10 + 20 + 30 + 2 * 3 + 2 + 5, 8));
    }

    #[test]
    fn fit_column_uses_vertical_axis() {
        let mut dom = Dom::new();
        let root = node(&mut dom, None, DeclaredStyle::new());
        let column = node(
            &mut dom,
            Some(root),
            DeclaredStyle::new().with_direction(Direction::Column).with_gap(1).with_padding(Spacing::all(1)),
        );
        node(&mut dom, Some(column), DeclaredStyle::new().with_size(4, 2));
        node(&mut dom, Some(column), DeclaredStyle::new().with_size(6, 3));
        run(&mut dom, root, Size::new(100, 100));
        assert_eq!(size_of(&dom, column), Size::new(8, 8));
    }

    #[test]
    fn fill_children_share_remaining_space() {
        let mut dom = Dom::new();
        let root = node(&mut dom, None, DeclaredStyle::new());
        let row = node(&mut dom, Some(root), DeclaredStyle::new().with_size(250, 10));
        let fixed = node(&mut dom, Some(row), DeclaredStyle::new().with_size(50, 10));
        let fill = DeclaredStyle::new().with_width(Sizing::Fill).with_height(Sizing::Fixed(10));
        let a = node(&mut dom, Some(row), fill.clone());
        let b = node(&mut dom, Some(row), fill);
        run(&mut dom, root, Size::new(400, 400));

        assert_eq!(size_of(&dom, a).width, 100);
        assert_eq!(size_of(&dom, b).width, 100);
        assert_eq!(rect(&dom, fixed).0, 0);
        assert_eq!(rect(&dom, a).0, 50);
        assert_eq!(rect(&dom, b).0, 150);
    }

    #[test]
    fn fill_on_secondary_axis_takes_inner_size() {
        let mut dom = Dom::new();
        let root = node(&mut dom, None, DeclaredStyle::new().with_padding(Spacing::all(4)));
        let child = node(
            &mut dom,
            Some(root),
            DeclaredStyle::new().with_width(Sizing::Fixed(10)).with_height(Sizing::Fill),
        );
        run(&mut dom, root, Size::new(100, 60));
        assert_eq!(rect(&dom, child), (4, 4, 10, 52));
    }

    #[test]
    fn no_fillable_children_leaves_space_unused() {
        let mut dom = Dom::new();
        let root = node(&mut dom, None, DeclaredStyle::new());
        let a = node(&mut dom, Some(root), DeclaredStyle::new().with_size(10, 10));
        let floating = node(
            &mut dom,
            Some(root),
            DeclaredStyle::new()
                .with_width(Sizing::Fill)
                .with_height(Sizing::Fixed(5))
                .with_placement(Placement::relative(0, 0)),
        );
        run(&mut dom, root, Size::new(100, 100));
        assert_eq!(size_of(&dom, a), Size::new(10, 10));
        // Out-of-flow Fill copies the container's raw size.
        assert_eq!(size_of(&dom, floating), Size::new(100, 5));
    }

    #[test]
    fn alignment_center_and_end() {
        let mut dom = Dom::new();
        let root = node(&mut dom, None, DeclaredStyle::new());
        let centered = node(
            &mut dom,
            Some(root),
            DeclaredStyle::new()
                .with_size(101, 50)
                .with_align_x(Alignment::Center)
                .with_align_y(Alignment::End),
        );
        let child = node(&mut dom, Some(centered), DeclaredStyle::new().with_size(20, 10));
        run(&mut dom, root, Size::new(200, 200));
        // floor((101 - 20) / 2) = 40, 50 - 10 = 40.
        assert_eq!(rect(&dom, child), (40, 40, 20, 10));
    }

    #[test]
    fn center_with_padding_uses_inner_space() {
        let mut dom = Dom::new();
        let root = node(
            &mut dom,
            None,
            DeclaredStyle::new()
                .with_padding(Spacing::new(0, 0, 0, 10))
                .with_align_x(Alignment::Center),
        );
        let child = node(&mut dom, Some(root), DeclaredStyle::new().with_size(30, 1));
        run(&mut dom, root, Size::new(100, 10));
        assert_eq!(rect(&dom, child).0, 10 + (90 - 30) / 2);
    }

    #[test]
    fn end_alignment_with_padding() {
        let mut dom = Dom::new();
        let root = node(
            &mut dom,
            None,
            DeclaredStyle::new()
                .with_padding(Spacing::new(0, 7, 0, 3))
                .with_gap(2)
                .with_align_x(Alignment::End),
        );
        let a = node(&mut dom, Some(root), DeclaredStyle::new().with_size(10, 1));
        let b = node(&mut dom, Some(root), DeclaredStyle::new().with_size(10, 1));
        run(&mut dom, root, Size::new(100, 10));
        // position + own - content - padding end
        assert_eq!(rect(&dom, a).0, 100 - 22 - 7);
        assert_eq!(rect(&dom, b).0, 100 - 10 - 7);
    }

    #[test]
    fn oversized_content_centers_at_start() {
        let mut dom = Dom::new();
        let root = node(&mut dom, None, DeclaredStyle::new().with_align_x(Alignment::Center));
        let child = node(&mut dom, Some(root), DeclaredStyle::new().with_size(50, 1));
        run(&mut dom, root, Size::new(20, 10));
        assert_eq!(rect(&dom, child).0, 0);
    }

    #[test]
    fn relative_and_absolute_children() {
        let mut dom = Dom::new();
        let root = node(&mut dom, None, DeclaredStyle::new());
        let spacer = node(&mut dom, Some(root), DeclaredStyle::new().with_size(30, 30));
        let container = node(
            &mut dom,
            Some(root),
            DeclaredStyle::new().with_size(50, 50).with_padding(Spacing::all(5)),
        );
        let relative = node(
            &mut dom,
            Some(container),
            DeclaredStyle::new().with_size(5, 5).with_placement(Placement::relative(2, 3)),
        );
        let absolute = node(
            &mut dom,
            Some(container),
            DeclaredStyle::new().with_size(5, 5).with_placement(Placement::absolute(2, 3)),
        );
        let flow = node(&mut dom, Some(container), DeclaredStyle::new().with_size(5, 5));
        run(&mut dom, root, Size::new(200, 200));

        assert_eq!(rect(&dom, spacer).0, 0);
        assert_eq!(rect(&dom, container), (30, 0, 50, 50));
        assert_eq!(rect(&dom, relative), (32, 3, 5, 5));
        assert_eq!(rect(&dom, absolute), (2, 3, 5, 5));
        // Out-of-flow siblings do not push the cursor.
        assert_eq!(rect(&dom, flow), (35, 5, 5, 5));
    }

    #[test]
    fn out_of_flow_children_do_not_count_toward_fit() {
        let mut dom = Dom::new();
        let root = node(&mut dom, None, DeclaredStyle::new());
        let fit = node(&mut dom, Some(root), DeclaredStyle::new());
        node(&mut dom, Some(fit), DeclaredStyle::new().with_size(10, 10));
        node(
            &mut dom,
            Some(fit),
            DeclaredStyle::new().with_size(99, 99).with_placement(Placement::absolute(0, 0)),
        );
        run(&mut dom, root, Size::new(200, 200));
        assert_eq!(size_of(&dom, fit), Size::new(10, 10));
    }

    #[test]
    fn label_self_measures_fit_axes() {
        let mut dom = Dom::new();
        let root = node(&mut dom, None, DeclaredStyle::new());
        let label = dom.create(Label::new("hello"));
        dom.set_style(label, "", DeclaredStyle::new().with_padding(Spacing::all(1)));
        dom.add_child(root, label);
        run(&mut dom, root, Size::new(100, 100));
        assert_eq!(size_of(&dom, label), Size::new(5 * GLYPH_WIDTH + 2, GLYPH_HEIGHT + 2));
    }

    #[test]
    fn nested_fill_resolves_top_down() {
        let mut dom = Dom::new();
        let root = node(&mut dom, None, DeclaredStyle::new().with_direction(Direction::Column));
        let body = node(
            &mut dom,
            Some(root),
            DeclaredStyle::new().with_width(Sizing::Fill).with_height(Sizing::Fill),
        );
        let inner = node(
            &mut dom,
            Some(body),
            DeclaredStyle::new().with_width(Sizing::Fill).with_height(Sizing::Fill),
        );
        run(&mut dom, root, Size::new(80, 24));
        assert_eq!(size_of(&dom, body), Size::new(80, 24));
        assert_eq!(size_of(&dom, inner), Size::new(80, 24));
    }
}
