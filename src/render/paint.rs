//! Paint traversal: tree -> draw commands.
//!
//! Pre-order. Per node: background, widget content, border, then children,
//! so later siblings land on top. A hidden node and its whole subtree emit
//! nothing (they still take up layout space).

use crate::dom::node::{NodeId, NodeState};
use crate::dom::tree::Dom;
use crate::geometry::{Point, Rect, Size};
use crate::render::command::{DrawCommand, DrawSink};
use crate::render::pixels::{ImageHandle, PixelBuffer};
use crate::style::{Background, BackgroundPosition, BackgroundSize, Border, Color, TransparencyReference};

/// Counts what passes through to the real sink.
struct Counting<'a> {
    inner: &'a mut dyn DrawSink,
    count: usize,
}

impl DrawSink for Counting<'_> {
    fn submit(&mut self, command: DrawCommand) {
        self.count += 1;
        self.inner.submit(command);
    }
}

/// Emit draw commands for the tree under `root`. Returns the command count.
pub fn paint(dom: &mut Dom, root: NodeId, sink: &mut dyn DrawSink) -> usize {
    let mut counting = Counting { inner: sink, count: 0 };
    paint_node(dom, root, &mut counting);
    counting.count
}

fn paint_node(dom: &mut Dom, id: NodeId, sink: &mut dyn DrawSink) {
    let Some(data) = dom.nodes.get_mut(id) else {
        return;
    };
    if !data.state.computed.is_visible() {
        return;
    }
    paint_background(&data.state, &mut data.scratch, sink);
    data.widget.paint(&data.state, sink);
    paint_border(&data.state, sink);

    for child in dom.children(id).to_vec() {
        paint_node(dom, child, sink);
    }
}

// ---------------------------------------------------------------------------
// Background
// ---------------------------------------------------------------------------

/// Emit the node's background. Image backgrounds are resampled into `scratch`.
pub fn paint_background(state: &NodeState, scratch: &mut PixelBuffer, sink: &mut dyn DrawSink) {
    let bounds = state.bounds();
    if bounds.size().is_empty() {
        return;
    }
    match &state.computed.background {
        Background::None => {}
        Background::Solid(color) => {
            sink.submit(DrawCommand::set_color(*color));
            sink.submit(DrawCommand::FillRectangle {
                x: bounds.x,
                y: bounds.y,
                width: bounds.width,
                height: bounds.height,
            });
        }
        Background::Image(handle) => paint_image(state, handle, scratch, sink),
    }
}

/// Size of an image of `source` size drawn inside `own` under `mode`.
pub fn target_size(mode: BackgroundSize, own: Size, source: Size) -> Size {
    match mode {
        BackgroundSize::Fixed => own,
        BackgroundSize::Contain => {
            if source.is_empty() {
                return Size::ZERO;
            }
            let (sw, sh) = (i64::from(source.width), i64::from(source.height));
            let (ow, oh) = (i64::from(own.width), i64::from(own.height));
            if sw * oh >= sh * ow {
                // Relatively wider than the node: width-constrained.
                Size::new(own.width, (sh * ow / sw) as i32)
            } else {
                Size::new((sw * oh / sh) as i32, own.height)
            }
        }
    }
}

/// Top-left corner of the image target inside the node.
pub fn target_origin(position: BackgroundPosition, bounds: Rect, target: Size) -> Point {
    match position {
        BackgroundPosition::Fixed(offset) => bounds.origin() + offset,
        BackgroundPosition::Center => Point::new(
            bounds.x + (bounds.width - target.width).div_euclid(2),
            bounds.y + (bounds.height - target.height).div_euclid(2),
        ),
    }
}

/// Skips redundant `SetColor`s between consecutive points.
struct Pen<'a> {
    sink: &'a mut dyn DrawSink,
    current: Option<(u8, u8, u8)>,
}

impl Pen<'_> {
    fn color(&mut self, color: Color) {
        let rgb = color.to_rgb8();
        if self.current != Some(rgb) {
            self.current = Some(rgb);
            self.sink.submit(DrawCommand::SetColor { r: rgb.0, g: rgb.1, b: rgb.2 });
        }
    }

    fn point(&mut self, x: i32, y: i32) {
        self.sink.submit(DrawCommand::FillPoint { x, y });
    }
}

fn paint_image(state: &NodeState, handle: &ImageHandle, scratch: &mut PixelBuffer, sink: &mut dyn DrawSink) {
    // A dropped image paints nothing.
    let Some(image) = handle.upgrade() else {
        return;
    };
    let Ok(image) = image.try_borrow() else {
        return;
    };
    let style = &state.computed;
    let bounds = state.bounds();

    let target = target_size(style.background_size, bounds.size(), image.size());
    if target.is_empty() {
        return;
    }
    let origin = target_origin(style.background_position, bounds, target);
    if let Err(err) = image.resample_into(scratch, target) {
        tracing::debug!(%err, "image background resample failed");
        return;
    }

    let mut pen = Pen { sink, current: None };
    let pixels = (0..target.height).flat_map(|y| (0..target.width).map(move |x| (x, y)));

    match style.background_reference {
        TransparencyReference::Static(reference) => {
            pen.color(reference);
            pen.sink.submit(DrawCommand::FillRectangle {
                x: origin.x,
                y: origin.y,
                width: target.width,
                height: target.height,
            });
            for (x, y) in pixels {
                let Some(pixel) = scratch.get_pixel(x, y) else { continue };
                if pixel.a > 0.0 {
                    pen.color(pixel.over(reference));
                    pen.point(origin.x + x, origin.y + y);
                }
            }
        }
        TransparencyReference::Checkerboard { tile, light, dark } if tile > 0 => {
            for (x, y) in pixels {
                let Some(pixel) = scratch.get_pixel(x, y) else { continue };
                let backdrop = if (x / tile + y / tile) % 2 == 0 { light } else { dark };
                pen.color(pixel.over(backdrop));
                pen.point(origin.x + x, origin.y + y);
            }
        }
        // No usable reference: opaque-ish pixels in their own color.
        TransparencyReference::Checkerboard { .. } | TransparencyReference::None => {
            for (x, y) in pixels {
                let Some(pixel) = scratch.get_pixel(x, y) else { continue };
                if pixel.a > 0.0 {
                    pen.color(pixel);
                    pen.point(origin.x + x, origin.y + y);
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Border
// ---------------------------------------------------------------------------

/// Emit the node's border over its final bounds.
pub fn paint_border(state: &NodeState, sink: &mut dyn DrawSink) {
    let Border::Solid { width, color } = state.computed.border else {
        return;
    };
    let bounds = state.bounds();
    if width <= 0 || bounds.size().is_empty() {
        return;
    }
    sink.submit(DrawCommand::set_color(color));
    sink.submit(DrawCommand::StrokeRectangle {
        x: bounds.x,
        y: bounds.y,
        width: bounds.width,
        height: bounds.height,
        stroke: width,
    });
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::command::CommandList;
    use crate::style::Visibility;
    use crate::widgets::{Label, Panel};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn state(x: i32, y: i32, w: i32, h: i32) -> NodeState {
        let mut state = NodeState::default();
        state.position = Point::new(x, y);
        state.size = Size::new(w, h);
        state
    }

    fn shared(buffer: PixelBuffer) -> Rc<RefCell<PixelBuffer>> {
        Rc::new(RefCell::new(buffer))
    }

    fn record(state: &NodeState) -> Vec<DrawCommand> {
        let mut sink = CommandList::new();
        paint_background(state, &mut PixelBuffer::default(), &mut sink);
        sink.into_iter().collect()
    }

    #[test]
    fn solid_background_is_one_rectangle() {
        let mut s = state(1, 2, 3, 4);
        s.computed.background = Background::Solid(Color::WHITE);
        assert_eq!(
            record(&s),
            vec![
                DrawCommand::SetColor { r: 255, g: 255, b: 255 },
                DrawCommand::FillRectangle { x: 1, y: 2, width: 3, height: 4 },
            ]
        );
    }

    #[test]
    fn empty_node_paints_no_background() {
        let mut s = state(0, 0, 0, 4);
        s.computed.background = Background::Solid(Color::WHITE);
        assert!(record(&s).is_empty());
    }

    #[test]
    fn contain_picks_constraining_axis() {
        let own = Size::new(100, 50);
        assert_eq!(target_size(BackgroundSize::Contain, own, Size::new(40, 10)), Size::new(100, 25));
        assert_eq!(target_size(BackgroundSize::Contain, own, Size::new(10, 40)), Size::new(12, 50));
        assert_eq!(target_size(BackgroundSize::Fixed, own, Size::new(10, 40)), own);
    }

    #[test]
    fn center_origin_floors() {
        let bounds = Rect::new(10, 10, 11, 10);
        assert_eq!(
            target_origin(BackgroundPosition::Center, bounds, Size::new(4, 10)),
            Point::new(13, 10)
        );
        assert_eq!(
            target_origin(BackgroundPosition::Fixed(Point::new(2, 1)), bounds, Size::new(4, 4)),
            Point::new(12, 11)
        );
    }

    #[test]
    fn image_over_static_reference_skips_transparent_pixels() {
        let red = Color::rgb(1.0, 0.0, 0.0);
        let image = shared(PixelBuffer::from_fn(2, 1, |x, _| if x == 0 { red } else { Color::TRANSPARENT }));
        let mut s = state(5, 5, 2, 1);
        s.computed.background = Background::Image(ImageHandle::new(&image));
        s.computed.background_reference = TransparencyReference::Static(Color::WHITE);

        assert_eq!(
            record(&s),
            vec![
                DrawCommand::SetColor { r: 255, g: 255, b: 255 },
                DrawCommand::FillRectangle { x: 5, y: 5, width: 2, height: 1 },
                DrawCommand::SetColor { r: 255, g: 0, b: 0 },
                DrawCommand::FillPoint { x: 5, y: 5 },
            ]
        );
    }

    #[test]
    fn image_over_checkerboard_covers_every_pixel() {
        let image = shared(PixelBuffer::new(1, 1));
        let mut s = state(0, 0, 4, 2);
        s.computed.background = Background::Image(ImageHandle::new(&image));
        s.computed.background_reference =
            TransparencyReference::Checkerboard { tile: 2, light: Color::WHITE, dark: Color::BLACK };

        let commands = record(&s);
        let points = commands.iter().filter(|c| matches!(c, DrawCommand::FillPoint { .. })).count();
        assert_eq!(points, 8);
        insta::assert_snapshot!(CommandListText(&commands).to_string(), @r###"
        color #ffffff
        point 0,0
        point 1,0
        color #000000
        point 2,0
        point 3,0
        color #ffffff
        point 0,1
        point 1,1
        color #000000
        point 2,1
        point 3,1
        "###);
    }

    #[test]
    fn zero_tile_checkerboard_falls_back_to_plain_pixels() {
        let image = shared(PixelBuffer::from_fn(1, 1, |_, _| Color::BLACK));
        let mut s = state(0, 0, 1, 1);
        s.computed.background = Background::Image(ImageHandle::new(&image));
        s.computed.background_reference = TransparencyReference::checkerboard(0);
        assert_eq!(
            record(&s),
            vec![DrawCommand::SetColor { r: 0, g: 0, b: 0 }, DrawCommand::FillPoint { x: 0, y: 0 }]
        );
    }

    #[test]
    fn image_resamples_into_scratch() {
        let image = shared(PixelBuffer::from_fn(2, 2, |_, _| Color::WHITE));
        let mut s = state(0, 0, 4, 3);
        s.computed.background = Background::Image(ImageHandle::new(&image));

        let mut scratch = PixelBuffer::default();
        paint_background(&s, &mut scratch, &mut CommandList::new());
        assert_eq!(scratch.size(), Size::new(4, 3));
        // The shared buffer is untouched.
        assert_eq!(image.borrow().size(), Size::new(2, 2));
    }

    #[test]
    fn oversized_image_target_is_skipped() {
        let image = shared(PixelBuffer::from_fn(2, 2, |_, _| Color::WHITE));
        let mut s = state(0, 0, 50_000, 50_000);
        s.computed.background = Background::Image(ImageHandle::new(&image));

        let mut scratch = PixelBuffer::default();
        let mut sink = CommandList::new();
        paint_background(&s, &mut scratch, &mut sink);
        assert!(sink.is_empty());
        assert_eq!(scratch.size(), Size::ZERO);
    }

    #[test]
    fn dropped_image_paints_nothing() {
        let image = shared(PixelBuffer::from_fn(1, 1, |_, _| Color::WHITE));
        let mut s = state(0, 0, 3, 3);
        s.computed.background = Background::Image(ImageHandle::new(&image));
        drop(image);
        assert!(record(&s).is_empty());
    }

    #[test]
    fn border_strokes_final_bounds() {
        let mut s = state(2, 3, 10, 5);
        s.computed.border = Border::Solid { width: 2, color: Color::BLACK };
        let mut sink = CommandList::new();
        paint_border(&s, &mut sink);
        assert_eq!(
            sink.commands(),
            &[
                DrawCommand::SetColor { r: 0, g: 0, b: 0 },
                DrawCommand::StrokeRectangle { x: 2, y: 3, width: 10, height: 5, stroke: 2 },
            ]
        );
    }

    #[test]
    fn traversal_order_and_hidden_subtrees() {
        let mut dom = Dom::new();
        let root = dom.create(Panel::new());
        let label = dom.create(Label::new("a"));
        let hidden = dom.create(Panel::new());
        let hidden_child = dom.create(Panel::new());
        dom.add_child(root, label);
        dom.add_child(root, hidden);
        dom.add_child(hidden, hidden_child);

        for id in [root, label, hidden, hidden_child] {
            let s = dom.state_mut(id).unwrap();
            s.size = Size::new(4, 4);
            s.computed.background = Background::Solid(Color::WHITE);
            s.computed.border = Border::Solid { width: 1, color: Color::BLACK };
        }
        dom.state_mut(hidden).unwrap().computed.visibility = Visibility::Hidden;

        let mut sink = CommandList::new();
        let count = paint(&mut dom, root, &mut sink);
        assert_eq!(count, sink.len());
        insta::assert_snapshot!(sink.to_text(), @r###"
        color #ffffff
        fill 0,0 4x4
        color #000000
        stroke 0,0 4x4 w1
        color #ffffff
        fill 0,0 4x4
        color #000000
        text 0,0 "a"
        color #000000
        stroke 0,0 4x4 w1
        "###);
    }

    /// Renders a command slice like [`CommandList::to_text`].
    struct CommandListText<'a>(&'a [DrawCommand]);

    impl std::fmt::Display for CommandListText<'_> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            for command in self.0 {
                writeln!(f, "{command}")?;
            }
            Ok(())
        }
    }
}
