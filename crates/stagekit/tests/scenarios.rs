//! End-to-end scenarios across layout, widgets, and runtime.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use stagekit::prelude::*;

fn sized(width: i32, height: i32) -> Rc<Entity> {
    Rc::new(Entity::with_size(width.into(), height.into()).expect("size"))
}

#[test]
fn basic_alignment_chain() {
    let root = Container::new();
    root.resize(400, 300).expect("resize");

    let a = sized(50, 20);
    a.node().move_to(100.into(), 100.into());
    let b = sized(50, 20);
    b.node().align_left_to_right(a.node(), 10).expect("acyclic");
    root.add(a.clone()).expect("add");
    root.add(b.clone()).expect("add");

    assert_eq!(a.node().right(), 125);
    assert_eq!(b.node().left(), 135);
    assert_eq!(b.node().center_x(), 160);

    a.node().move_to(200.into(), 100.into());
    assert_eq!(b.node().center_x(), 260);
}

#[test]
fn scene_transition_ordering() {
    let saved_x = Rc::new(Cell::new(false));
    let seen_in_load = Rc::new(Cell::new(None));

    let flag = Rc::clone(&saved_x);
    let scene_x = Rc::new(Scene::new("x").on_save(move |_| {
        flag.set(true);
        Ok(())
    }));
    let flag = Rc::clone(&saved_x);
    let seen = Rc::clone(&seen_in_load);
    let scene_y = Rc::new(Scene::new("y").on_load(move |_| {
        seen.set(Some(flag.get()));
        Ok(())
    }));

    let mut stage = Stage::new(StageConfig::default(), scene_x).expect("stage");
    assert_eq!(seen_in_load.get(), None);
    stage.set_scene(scene_y).expect("transition");
    assert_eq!(seen_in_load.get(), Some(true));
}

#[test]
fn resize_determinism() {
    let root = Container::new();
    root.resize(300, 200).expect("resize");
    let child = Rc::new(Entity::new());
    child.node().set_width(Coordinate::Fraction(0.5)).expect("size");
    child.node().set_height(Coordinate::Fraction(0.5)).expect("size");
    child
        .node()
        .move_to(Coordinate::Fraction(0.5), Coordinate::Fraction(0.5));
    root.add(child.clone()).expect("add");
    assert_eq!((child.node().center_x(), child.node().center_y()), (150, 100));

    root.resize(600, 400).expect("resize");
    assert_eq!((child.node().center_x(), child.node().center_y()), (300, 200));
    assert_eq!((child.node().width(), child.node().height()), (300, 200));
}

#[test]
fn propagation_completeness() {
    let a = LayoutNode::with_size(40.into(), 10.into()).expect("size");
    a.move_to(20.into(), 0.into());
    let b = LayoutNode::with_size(30.into(), 10.into()).expect("size");
    b.align_left_to_right(&a, 5).expect("acyclic");
    let c = LayoutNode::with_size(20.into(), 10.into()).expect("size");
    c.align_left_to_right(&b, 5).expect("acyclic");

    let (b0, c0) = (b.center_x(), c.center_x());
    let observed = Rc::new(RefCell::new(Vec::new()));
    let (bw, cw, log) = (b.downgrade(), c.downgrade(), Rc::clone(&observed));
    a.center_observable(Axis::Horizontal).add_listener(
        ListenerKey::unique("observer"),
        move || {
            if let (Some(b), Some(c)) = (bw.upgrade(), cw.upgrade()) {
                log.borrow_mut().push((b.center_x(), c.center_x()));
            }
        },
    );

    a.move_by(17, 0);
    assert_eq!(b.center_x(), b0 + 17);
    assert_eq!(c.center_x(), c0 + 17);
    assert_eq!(*observed.borrow(), [(b0 + 17, c0 + 17)]);
}

#[test]
fn alignment_exclusivity() {
    let source = LayoutNode::with_size(10.into(), 10.into()).expect("size");
    let node = LayoutNode::with_size(40.into(), 10.into()).expect("size");
    node.align_left_to_left(&source, 0).expect("acyclic");
    node.align_right_to(Coordinate::Absolute(300));
    assert_eq!(node.center_x(), 300 - 20);

    source.move_by(55, 0);
    assert_eq!(node.center_x(), 280);
    assert_eq!(
        node.alignment(Axis::Horizontal),
        AxisAlignment::AlignedToCoordinate {
            edge: Edge::End,
            target: Coordinate::Absolute(300)
        }
    );
}

#[test]
fn stage_routes_clicks_into_nested_scene() {
    let scene = Rc::new(Scene::new("menu"));
    let panel = Container::new();
    panel.entity().node().set_width(Coordinate::Fraction(0.5)).expect("size");
    panel.entity().node().set_height(Coordinate::Fraction(0.5)).expect("size");
    panel
        .entity()
        .node()
        .move_to(Coordinate::Fraction(0.5), Coordinate::Fraction(0.5));
    let button = sized(40, 20);
    button
        .node()
        .move_to(Coordinate::Fraction(0.5), Coordinate::Fraction(0.5));
    panel.add(button.clone()).expect("add");
    scene.root().add(panel.clone()).expect("add");

    let clicks = Rc::new(Cell::new(0));
    let c = Rc::clone(&clicks);
    button.on_click(move |_, _| c.set(c.get() + 1));

    let mut stage = Stage::new(StageConfig::default(), Rc::clone(&scene)).expect("stage");
    // Window center is the button center at any size.
    let (w, h) = stage.window();
    let at = Point::new(w / 2, h / 2);
    for kind in [PointerKind::Down(MouseButton::Left), PointerKind::Up(MouseButton::Left)] {
        stage
            .handle_event(Event::Pointer(PointerEvent::new(kind, at)))
            .expect("pointer");
    }
    assert_eq!(clicks.get(), 1);

    let mut surface = RecordingSurface::new();
    button.add_background("fill", |p, w, h| p.fill_rect(Rect::from_size(w, h), Color::WHITE));
    stage.paint(&mut surface);
    assert_eq!(
        surface.primitives(),
        &[Primitive::Rect {
            bounds: Rect::new(380, 290, 40, 20),
            fill: Color::WHITE
        }]
    );
}

#[test]
fn label_width_drives_neighbour_through_scene_resize() {
    let root = Container::new();
    root.resize(200, 100).expect("resize");
    let title = Rc::new(Label::new("score", 8));
    title.node().align_left_to(Coordinate::Fraction(0.1));
    let value = sized(30, 16);
    value.node().align_left_to_right(title.node(), 4).expect("acyclic");
    root.add(title.clone()).expect("add");
    root.add(value.clone()).expect("add");
    assert_eq!(title.node().left(), 20);
    assert_eq!(value.node().left(), 20 + 40 + 4);

    root.resize(400, 100).expect("resize");
    assert_eq!(value.node().left(), 40 + 40 + 4);
    title.set_text("hi");
    assert_eq!(value.node().left(), 40 + 16 + 4);
}
