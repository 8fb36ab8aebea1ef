//! Property-based invariant tests for resolution and alignment.
//!
//! 1. Resolving a fractional coordinate twice against the same extent yields
//!    the same pixel value.
//! 2. The start edge sits half the size before the center and the end edge
//!    exactly `size` past the start, matching the bounds rectangle.
//! 3. After `align_left_to(x)` then `align_right_to(y)` the right edge is
//!    `y`, and the superseded left target no longer matters.
//! 4. Moving the head of a left-to-right chain shifts every follower by the
//!    same amount.
//! 5. A centered child at half the container size stays proportional across
//!    resizes.

use proptest::prelude::*;
use stagekit_core::reactive::Observable;
use stagekit_layout::{Axis, AxisAlignment, Coordinate, Edge, Extent, LayoutNode};

fn fraction_strategy() -> impl Strategy<Value = f64> {
    -2.0f64..=3.0
}

fn node_with_size(width: i32, height: i32) -> LayoutNode {
    LayoutNode::with_size(Coordinate::Absolute(width), Coordinate::Absolute(height))
        .expect("non-negative size")
}

proptest! {
    #[test]
    fn fractional_resolution_is_idempotent(f in fraction_strategy(), extent in 0i32..=10_000) {
        let c = Coordinate::Fraction(f);
        prop_assert_eq!(c.resolve(extent), c.resolve(extent));
    }

    #[test]
    fn edges_bracket_center(
        width in 0i32..=1000,
        height in 0i32..=1000,
        x in -2000i32..=2000,
        y in -2000i32..=2000,
    ) {
        let node = node_with_size(width, height);
        node.move_to(Coordinate::Absolute(x), Coordinate::Absolute(y));
        prop_assert_eq!(node.left(), x - width / 2);
        prop_assert_eq!(node.right(), node.left() + width);
        prop_assert_eq!(node.top(), y - height / 2);
        prop_assert_eq!(node.bottom(), node.top() + height);
        prop_assert_eq!(node.bounds().right(), node.right());
    }

    #[test]
    fn right_alignment_supersedes_left(
        width in 0i32..=400,
        x in -500i32..=500,
        y in -500i32..=500,
        shift in 1i32..=100,
    ) {
        let (cw, ch) = (Observable::new(1000), Observable::new(1000));
        let source = node_with_size(10, 10);
        let node = node_with_size(width, 10);
        node.attach(Extent::new(&cw, &ch));

        node.align_left_to_left(&source, x).expect("acyclic");
        node.align_right_to(Coordinate::Absolute(y));
        prop_assert_eq!(node.right(), y);
        let center = node.center_x();

        source.move_by(shift, 0);
        prop_assert_eq!(node.center_x(), center);
        prop_assert_eq!(node.right(), y);
        let is_right_pin = matches!(
            node.alignment(Axis::Horizontal),
            AxisAlignment::AlignedToCoordinate { edge: Edge::End, .. }
        );
        prop_assert!(is_right_pin);
    }

    #[test]
    fn chain_moves_together(
        len in 2usize..=12,
        delta in -20i32..=20,
        dx in -300i32..=300,
    ) {
        let nodes: Vec<LayoutNode> = (0..len).map(|_| node_with_size(30, 10)).collect();
        nodes[0].move_to(Coordinate::Absolute(0), Coordinate::Absolute(0));
        for pair in nodes.windows(2) {
            pair[1].align_left_to_right(&pair[0], delta).expect("acyclic");
        }
        let before: Vec<i32> = nodes.iter().map(LayoutNode::center_x).collect();
        nodes[0].move_by(dx, 0);
        for (node, old) in nodes.iter().zip(before) {
            prop_assert_eq!(node.center_x(), old + dx);
        }
    }

    #[test]
    fn centered_half_size_child_scales(w in 2i32..=2000, h in 2i32..=2000, k in 1i32..=4) {
        let (cw, ch) = (Observable::new(w), Observable::new(h));
        let child = LayoutNode::new();
        child.set_width(Coordinate::Fraction(0.5)).expect("size");
        child.set_height(Coordinate::Fraction(0.5)).expect("size");
        child.move_to(Coordinate::Fraction(0.5), Coordinate::Fraction(0.5));
        child.attach(Extent::new(&cw, &ch));

        cw.set(w * k);
        ch.set(h * k);
        child.resolve_relative_coordinates();
        child.resolve_relative_alignment();

        prop_assert_eq!(child.center_x(), (w * k) / 2);
        prop_assert_eq!(child.center_y(), (h * k) / 2);
        prop_assert_eq!(child.width(), (w * k) / 2);
        prop_assert_eq!(child.height(), (h * k) / 2);
    }
}
