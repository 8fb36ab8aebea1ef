#![forbid(unsafe_code)]

//! Entity base shared by every displayer.
//!
//! An [`Entity`] couples a [`LayoutNode`] with:
//! - an insertion-ordered background list (key to draw function),
//! - an optional render callback,
//! - pointer handlers gated by [`PointerInterest`],
//! - a visibility flag.
//!
//! All callbacks are cloned out of their `RefCell` before being invoked so a
//! callback may freely add or remove callbacks on the same entity.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use bitflags::bitflags;
use stagekit_core::event::{MouseButton, PointerEvent, PointerKind};
use stagekit_core::{NodeId, Result};
use stagekit_layout::{Coordinate, LayoutNode};

use crate::draw::Painter;

/// Draw callback receiving the painter (local frame) and the current
/// resolved width and height.
pub type DrawFn = dyn Fn(&mut Painter<'_>, i32, i32);

type PointerFn = dyn Fn(&PointerEvent);

bitflags! {
    /// Pointer event classes an entity handles.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PointerInterest: u8 {
        const PRESS   = 1 << 0;
        const RELEASE = 1 << 1;
        const CLICK   = 1 << 2;
        const MOVE    = 1 << 3;
        const DRAG    = 1 << 4;
        const HOVER   = 1 << 5;
        const WHEEL   = 1 << 6;
    }
}

impl PointerInterest {
    /// The interest class an event kind belongs to.
    #[must_use]
    pub const fn of(kind: PointerKind) -> Self {
        match kind {
            PointerKind::Down(_) => Self::PRESS,
            PointerKind::Up(_) => Self::RELEASE,
            PointerKind::Click(_) => Self::CLICK,
            PointerKind::Move => Self::MOVE,
            PointerKind::Drag(_) => Self::DRAG,
            PointerKind::Enter | PointerKind::Exit => Self::HOVER,
            PointerKind::Wheel { .. } => Self::WHEEL,
        }
    }
}

struct Handler {
    interest: PointerInterest,
    callback: Rc<PointerFn>,
}

/// Geometry plus drawing and input hooks of one displayer.
pub struct Entity {
    node: LayoutNode,
    backgrounds: RefCell<Vec<(String, Rc<DrawFn>)>>,
    render: RefCell<Option<Rc<DrawFn>>>,
    handlers: RefCell<Vec<Handler>>,
    visible: Cell<bool>,
}

impl Entity {
    /// A visible, detached, zero-sized entity.
    #[must_use]
    pub fn new() -> Self {
        Self::from_node(LayoutNode::new())
    }

    /// # Errors
    ///
    /// Returns [`LayoutError::NegativeSize`](stagekit_core::LayoutError) for
    /// negative sizes.
    pub fn with_size(width: Coordinate, height: Coordinate) -> Result<Self> {
        Ok(Self::from_node(LayoutNode::with_size(width, height)?))
    }

    #[must_use]
    pub fn from_node(node: LayoutNode) -> Self {
        Self {
            node,
            backgrounds: RefCell::new(Vec::new()),
            render: RefCell::new(None),
            handlers: RefCell::new(Vec::new()),
            visible: Cell::new(true),
        }
    }

    #[inline]
    #[must_use]
    pub fn node(&self) -> &LayoutNode {
        &self.node
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.node.id()
    }

    // ── Visibility ───────────────────────────────────────────────────────

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    pub fn set_visible(&self, visible: bool) {
        self.visible.set(visible);
    }

    // ── Backgrounds ──────────────────────────────────────────────────────

    /// Add a background drawer. Re-adding an existing key replaces the
    /// drawer in place, keeping its position in the paint order.
    pub fn add_background(
        &self,
        key: impl Into<String>,
        draw: impl Fn(&mut Painter<'_>, i32, i32) + 'static,
    ) {
        let key = key.into();
        let draw: Rc<DrawFn> = Rc::new(draw);
        let mut backgrounds = self.backgrounds.borrow_mut();
        if let Some(slot) = backgrounds.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = draw;
        } else {
            backgrounds.push((key, draw));
        }
    }

    pub fn remove_background(&self, key: &str) -> bool {
        let mut backgrounds = self.backgrounds.borrow_mut();
        let before = backgrounds.len();
        backgrounds.retain(|(k, _)| k != key);
        backgrounds.len() != before
    }

    /// Background keys in paint order.
    #[must_use]
    pub fn background_keys(&self) -> Vec<String> {
        self.backgrounds
            .borrow()
            .iter()
            .map(|(k, _)| k.clone())
            .collect()
    }

    pub fn draw_backgrounds(&self, painter: &mut Painter<'_>) {
        let drawers: Vec<Rc<DrawFn>> = self
            .backgrounds
            .borrow()
            .iter()
            .map(|(_, d)| Rc::clone(d))
            .collect();
        let (width, height) = (self.node.width(), self.node.height());
        for draw in drawers {
            draw(painter, width, height);
        }
    }

    // ── Render callback ──────────────────────────────────────────────────

    pub fn set_render(&self, draw: impl Fn(&mut Painter<'_>, i32, i32) + 'static) {
        *self.render.borrow_mut() = Some(Rc::new(draw));
    }

    pub fn clear_render(&self) {
        self.render.borrow_mut().take();
    }

    /// Invoke the render callback, if any.
    pub fn render(&self, painter: &mut Painter<'_>) {
        let draw = self.render.borrow().clone();
        if let Some(draw) = draw {
            draw(painter, self.node.width(), self.node.height());
        }
    }

    // ── Pointer handlers ─────────────────────────────────────────────────

    /// Register a handler for every event kind in `interest`.
    pub fn on_pointer(&self, interest: PointerInterest, handler: impl Fn(&PointerEvent) + 'static) {
        self.handlers.borrow_mut().push(Handler {
            interest,
            callback: Rc::new(handler),
        });
    }

    pub fn on_click(&self, handler: impl Fn(MouseButton, &PointerEvent) + 'static) {
        self.on_pointer(PointerInterest::CLICK, move |ev| {
            if let PointerKind::Click(button) = ev.kind {
                handler(button, ev);
            }
        });
    }

    pub fn on_press(&self, handler: impl Fn(MouseButton, &PointerEvent) + 'static) {
        self.on_pointer(PointerInterest::PRESS, move |ev| {
            if let PointerKind::Down(button) = ev.kind {
                handler(button, ev);
            }
        });
    }

    pub fn on_release(&self, handler: impl Fn(MouseButton, &PointerEvent) + 'static) {
        self.on_pointer(PointerInterest::RELEASE, move |ev| {
            if let PointerKind::Up(button) = ev.kind {
                handler(button, ev);
            }
        });
    }

    pub fn on_drag(&self, handler: impl Fn(MouseButton, &PointerEvent) + 'static) {
        self.on_pointer(PointerInterest::DRAG, move |ev| {
            if let PointerKind::Drag(button) = ev.kind {
                handler(button, ev);
            }
        });
    }

    pub fn on_move(&self, handler: impl Fn(&PointerEvent) + 'static) {
        self.on_pointer(PointerInterest::MOVE, handler);
    }

    /// `true` on enter, `false` on exit.
    pub fn on_hover(&self, handler: impl Fn(bool) + 'static) {
        self.on_pointer(PointerInterest::HOVER, move |ev| {
            handler(matches!(ev.kind, PointerKind::Enter));
        });
    }

    pub fn on_wheel(&self, handler: impl Fn(i32) + 'static) {
        self.on_pointer(PointerInterest::WHEEL, move |ev| {
            if let PointerKind::Wheel { delta } = ev.kind {
                handler(delta);
            }
        });
    }

    /// Union of all registered interests.
    #[must_use]
    pub fn interest(&self) -> PointerInterest {
        self.handlers
            .borrow()
            .iter()
            .fold(PointerInterest::empty(), |acc, h| acc | h.interest)
    }

    /// Invoke every handler interested in `event`. Returns `true` if any ran.
    pub fn dispatch_pointer(&self, event: &PointerEvent) -> bool {
        let class = PointerInterest::of(event.kind);
        let matching: Vec<Rc<PointerFn>> = self
            .handlers
            .borrow()
            .iter()
            .filter(|h| h.interest.intersects(class))
            .map(|h| Rc::clone(&h.callback))
            .collect();
        for callback in &matching {
            callback(event);
        }
        !matching.is_empty()
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("node", &self.node)
            .field("visible", &self.is_visible())
            .field("backgrounds", &self.background_keys())
            .field("interest", &self.interest())
            .finish()
    }
}
