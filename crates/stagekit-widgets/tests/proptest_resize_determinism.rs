//! Property tests for container resize and pointer routing.
//!
//! 1. The layout after any sequence of resizes equals the layout obtained by
//!    resizing directly to the final size.
//! 2. Every fractional child is re-resolved against the new size before
//!    `resize` returns.
//! 3. A press and release at the same point inside a child produce exactly
//!    one click on that child.

use std::cell::Cell;
use std::rc::Rc;

use proptest::prelude::*;
use stagekit_core::event::{MouseButton, PointerEvent, PointerKind};
use stagekit_core::geometry::{Point, Rect};
use stagekit_layout::Coordinate;
use stagekit_widgets::{Container, Displayer, Entity};

/// A scene mixing fractional placement and an edge-aligned chain.
fn build_scene() -> (Rc<Container>, Vec<Rc<Entity>>) {
    let root = Container::new();

    let banner = Rc::new(Entity::new());
    banner.node().set_width(Coordinate::Fraction(0.8)).expect("size");
    banner.node().set_height(Coordinate::Absolute(40)).expect("size");
    banner
        .node()
        .move_to(Coordinate::Fraction(0.5), Coordinate::Fraction(0.1));

    let sidebar = Rc::new(Entity::new());
    sidebar.node().set_width(Coordinate::Fraction(0.25)).expect("size");
    sidebar.node().set_height(Coordinate::Fraction(0.5)).expect("size");
    sidebar.node().align_left_to(Coordinate::Absolute(0));
    sidebar.node().align_top_to_bottom(banner.node(), 4).expect("acyclic");

    let content = Rc::new(Entity::new());
    content.node().set_width(Coordinate::Fraction(0.33)).expect("size");
    content.node().set_height(Coordinate::Absolute(20)).expect("size");
    content.node().align_left_to_right(sidebar.node(), 10).expect("acyclic");
    content.node().align_top_to_top(sidebar.node(), 0).expect("acyclic");

    // Added follower-first so phase two sees stale targets.
    for child in [&content, &sidebar, &banner] {
        root.add(Rc::clone(child) as Rc<dyn Displayer>).expect("add");
    }
    (root, vec![banner, sidebar, content])
}

fn snapshot(children: &[Rc<Entity>]) -> Vec<Rect> {
    children.iter().map(|c| c.node().bounds()).collect()
}

proptest! {
    #[test]
    fn resize_sequence_is_path_independent(
        steps in prop::collection::vec((0i32..=2000, 0i32..=2000), 0..6),
        last in (0i32..=2000, 0i32..=2000),
    ) {
        let (walked, walked_children) = build_scene();
        for (w, h) in &steps {
            walked.resize(*w, *h).expect("resize");
        }
        walked.resize(last.0, last.1).expect("resize");

        let (direct, direct_children) = build_scene();
        direct.resize(last.0, last.1).expect("resize");

        prop_assert_eq!(snapshot(&walked_children), snapshot(&direct_children));
    }

    #[test]
    fn fractional_children_resolve_before_resize_returns(w in 0i32..=4000, h in 0i32..=4000) {
        let (root, children) = build_scene();
        root.resize(w, h).expect("resize");
        let banner = &children[0];
        let sidebar = &children[1];
        let content = &children[2];
        prop_assert_eq!(banner.node().width(), Coordinate::Fraction(0.8).resolve(w));
        prop_assert_eq!(sidebar.node().height(), Coordinate::Fraction(0.5).resolve(h));
        prop_assert_eq!(sidebar.node().top(), banner.node().bottom() + 4);
        prop_assert_eq!(content.node().left(), sidebar.node().right() + 10);
        prop_assert_eq!(content.node().top(), sidebar.node().top());
    }

    #[test]
    fn press_release_inside_child_clicks_once(
        size in 2i32..=50,
        cx in 50i32..=150,
        cy in 50i32..=150,
        dx in 0i32..=49,
        dy in 0i32..=49,
    ) {
        let root = Container::new();
        root.resize(300, 300).expect("resize");
        let target = Rc::new(Entity::with_size(size.into(), size.into()).expect("size"));
        target.node().move_to(cx.into(), cy.into());
        root.add(Rc::clone(&target) as Rc<dyn Displayer>).expect("add");

        let clicks = Rc::new(Cell::new(0u32));
        let c = Rc::clone(&clicks);
        target.on_click(move |_, _| c.set(c.get() + 1));

        let bounds = target.node().bounds();
        let at = Point::new(bounds.x + dx % bounds.width, bounds.y + dy % bounds.height);
        root.dispatch_pointer(&PointerEvent::new(PointerKind::Down(MouseButton::Left), at));
        root.dispatch_pointer(&PointerEvent::new(PointerKind::Up(MouseButton::Left), at));
        prop_assert_eq!(clicks.get(), 1);
    }
}
