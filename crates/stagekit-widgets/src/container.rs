#![forbid(unsafe_code)]

//! Containers: entities that own children and define their coordinate frame.
//!
//! # Invariants
//!
//! 1. Whenever the container's width or height changes, every child's
//!    relative coordinates and then relative alignments are re-resolved
//!    before control returns, and so before any paint.
//! 2. Within one resize, phase one (coordinates) runs for all children
//!    before phase two (alignment) runs for any.
//! 3. A child appears at most once, and in at most one container.
//! 4. A nested container whose own size is fractional lays out its children
//!    once per parent pass, after both of its dimensions are resolved.
//!
//! # Pointer routing
//!
//! Events arrive in the container's local frame. Children are hit-tested
//! topmost-first (last added wins), the event is translated into the hit
//! child's frame and handed to [`Displayer::handle_pointer`], which recurses
//! into nested containers. Enter/exit and click are synthesised here and are
//! never forwarded further, so each level reports them exactly once.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use ahash::AHashSet;
use stagekit_core::event::{PointerEvent, PointerKind};
use stagekit_core::geometry::Point;
use stagekit_core::{LayoutError, ListenerKey, NodeId, Result};
use stagekit_layout::{Axis, Coordinate, Extent, LayoutNode};

use crate::Displayer;
use crate::draw::Painter;
use crate::entity::Entity;

/// Restores the resize flag on every exit path.
struct ResizeGuard<'a> {
    flag: &'a Cell<bool>,
    previous: bool,
}

impl<'a> ResizeGuard<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        let previous = flag.replace(true);
        Self { flag, previous }
    }
}

impl Drop for ResizeGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(self.previous);
    }
}

/// An entity that owns an ordered list of child displayers.
pub struct Container {
    entity: Entity,
    children: RefCell<Vec<Rc<dyn Displayer>>>,
    members: RefCell<AHashSet<NodeId>>,
    resizing: Cell<bool>,
    /// A size changed while `resizing` was set; a relayout is owed.
    pending: Cell<bool>,
    hovered: Cell<Option<NodeId>>,
    pressed: Cell<Option<NodeId>>,
}

impl Container {
    /// An empty 0×0 container.
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new_cyclic(|this: &Weak<Self>| {
            let entity = Entity::new();
            for axis in Axis::ALL {
                let weak = this.clone();
                entity.node().size_observable(axis).add_listener(
                    ListenerKey::new(entity.id(), axis.pick("relayout.width", "relayout.height")),
                    move || {
                        let Some(container) = weak.upgrade() else {
                            return;
                        };
                        if container.resizing.get() {
                            container.pending.set(true);
                        } else {
                            container.relayout();
                        }
                    },
                );
            }
            Self {
                entity,
                children: RefCell::new(Vec::new()),
                members: RefCell::new(AHashSet::new()),
                resizing: Cell::new(false),
                pending: Cell::new(false),
                hovered: Cell::new(None),
                pressed: Cell::new(None),
            }
        })
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.entity.id()
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        self.entity.node().width()
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        self.entity.node().height()
    }

    /// Extent children resolve fractional coordinates against.
    #[must_use]
    pub fn extent(&self) -> Extent {
        let node = self.entity.node();
        Extent::new(
            node.size_observable(Axis::Horizontal),
            node.size_observable(Axis::Vertical),
        )
        .owned_by(self.id())
    }

    /// Run `update` on this container's own node with child relayout held
    /// back. Returns whether a size changed meanwhile.
    fn deferring_relayout(&self, update: impl FnOnce(&LayoutNode)) -> bool {
        {
            let _guard = ResizeGuard::enter(&self.resizing);
            update(self.entity.node());
        }
        self.pending.replace(false)
    }

    // ── Membership ───────────────────────────────────────────────────────

    /// Append `child`, bind it to this container's extent, and resolve it
    /// against the current dimensions.
    ///
    /// Returns `Ok(false)` (and changes nothing) if the child is already
    /// present.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::AlreadyParented`] if the child belongs to
    /// another container; remove it from there first.
    pub fn add(&self, child: Rc<dyn Displayer>) -> Result<bool> {
        let id = child.node().id();
        if let Some(owner) = child.node().owner()
            && owner != self.id()
        {
            return Err(LayoutError::AlreadyParented { child: id, owner });
        }
        if !self.members.borrow_mut().insert(id) {
            return Ok(false);
        }
        self.children.borrow_mut().push(Rc::clone(&child));
        let extent = self.extent();
        match child.as_container() {
            Some(nested) => {
                if nested.deferring_relayout(|node| node.attach(extent)) {
                    nested.relayout();
                }
            }
            None => child.node().attach(extent),
        }
        child.node().mark_needs_layout();
        tracing::debug!(
            container = %self.id(),
            child = %id,
            bounds = ?child.node().bounds(),
            "container.add"
        );
        Ok(true)
    }

    /// Detach and return the child with `id`.
    ///
    /// Its alignment constraints are kept; links to other entities are
    /// suspended until it is added to a container again.
    pub fn remove(&self, id: NodeId) -> Option<Rc<dyn Displayer>> {
        if !self.members.borrow_mut().remove(&id) {
            return None;
        }
        let removed = {
            let mut children = self.children.borrow_mut();
            let index = children.iter().position(|c| c.node().id() == id)?;
            children.remove(index)
        };
        if removed.node().owner() == Some(self.id()) {
            removed.node().detach();
        }
        if self.hovered.get() == Some(id) {
            self.hovered.set(None);
        }
        if self.pressed.get() == Some(id) {
            self.pressed.set(None);
        }
        tracing::debug!(container = %self.id(), child = %id, "container.remove");
        Some(removed)
    }

    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.members.borrow().contains(&id)
    }

    #[must_use]
    pub fn child(&self, id: NodeId) -> Option<Rc<dyn Displayer>> {
        self.children
            .borrow()
            .iter()
            .find(|c| c.node().id() == id)
            .cloned()
    }

    /// Snapshot of the children in paint order.
    #[must_use]
    pub fn children(&self) -> Vec<Rc<dyn Displayer>> {
        self.children.borrow().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.children.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.borrow().is_empty()
    }

    // ── Resize ───────────────────────────────────────────────────────────

    /// Set the container's size and re-resolve every child.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::NegativeSize`] for negative dimensions; the
    /// container is left unchanged.
    pub fn resize(&self, width: i32, height: i32) -> Result<()> {
        if width < 0 {
            return Err(LayoutError::negative("width", width));
        }
        if height < 0 {
            return Err(LayoutError::negative("height", height));
        }
        {
            let _guard = ResizeGuard::enter(&self.resizing);
            let node = self.entity.node();
            node.set_width(Coordinate::Absolute(width))?;
            node.set_height(Coordinate::Absolute(height))?;
        }
        self.pending.set(false);
        tracing::debug!(container = %self.id(), width, height, "container.resize");
        self.relayout();
        Ok(())
    }

    /// Two-phase re-resolution of all children against the current extent.
    ///
    /// Nested containers resolve both of their own dimensions in phase one
    /// and lay out their children once, before phase two starts here.
    pub fn relayout(&self) {
        let children = self.children();
        let mut resized = Vec::new();
        for child in &children {
            match child.as_container() {
                Some(nested) => {
                    if nested.deferring_relayout(LayoutNode::resolve_relative_coordinates) {
                        resized.push(child);
                    }
                }
                None => child.node().resolve_relative_coordinates(),
            }
        }
        for child in resized {
            if let Some(nested) = child.as_container() {
                nested.relayout();
            }
        }
        for child in &children {
            child.node().resolve_relative_alignment();
        }
    }

    /// Mark every descendant for full parameter recomputation before the
    /// next paint.
    pub fn initialization(&self) {
        for child in self.children() {
            child.node().mark_needs_layout();
            if let Some(container) = child.as_container() {
                container.initialization();
            }
        }
    }

    // ── Paint ────────────────────────────────────────────────────────────

    /// Paint this container as a root: its own backgrounds, then contents.
    pub fn paint(&self, painter: &mut Painter<'_>) {
        if !self.entity.is_visible() {
            return;
        }
        self.entity.draw_backgrounds(painter);
        self.draw_displayer(painter);
    }

    fn paint_children(&self, painter: &mut Painter<'_>) {
        for child in self.children() {
            if !child.entity().is_visible() {
                continue;
            }
            if child.node().take_needs_layout() {
                child.initialize();
            }
            let origin = child.node().bounds().origin();
            painter.with_origin(origin, |p| {
                child.entity().draw_backgrounds(p);
                child.draw_displayer(p);
            });
        }
    }

    // ── Hit testing ──────────────────────────────────────────────────────

    /// Topmost visible direct child whose bounds contain `point`.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<Rc<dyn Displayer>> {
        self.children
            .borrow()
            .iter()
            .rev()
            .find(|c| c.entity().is_visible() && c.node().bounds().contains(point))
            .cloned()
    }

    /// Deepest displayer under `point`, with `point` in its local frame.
    #[must_use]
    pub fn hit_test_deep(&self, point: Point) -> Option<(Rc<dyn Displayer>, Point)> {
        let child = self.hit_test(point)?;
        let local = point.relative_to(child.node().bounds().origin());
        if let Some(container) = child.as_container()
            && let Some(deeper) = container.hit_test_deep(local)
        {
            return Some(deeper);
        }
        Some((child, local))
    }

    // ── Pointer routing ──────────────────────────────────────────────────

    fn forward(child: &Rc<dyn Displayer>, event: PointerEvent) -> bool {
        let local = event.relative_to(child.node().bounds().origin());
        child.handle_pointer(&local)
    }

    fn set_hover(&self, event: PointerEvent, target: Option<&Rc<dyn Displayer>>) -> bool {
        let next = target.map(|c| c.node().id());
        let previous = self.hovered.get();
        if previous == next {
            return false;
        }
        self.hovered.set(next);
        tracing::debug!(
            container = %self.id(),
            from = ?previous,
            to = ?next,
            "container.hover"
        );
        let mut handled = false;
        if let Some(old) = previous.and_then(|id| self.child(id)) {
            handled |= Self::forward(&old, event.with_kind(PointerKind::Exit));
        }
        if let Some(new) = target {
            handled |= Self::forward(new, event.with_kind(PointerKind::Enter));
        }
        handled
    }

    /// Route a pointer event given in this container's local frame.
    ///
    /// Returns `true` if some handler ran.
    pub fn dispatch_pointer(&self, event: &PointerEvent) -> bool {
        let event = *event;
        let handled = match event.kind {
            PointerKind::Click(_) | PointerKind::Enter => false,
            PointerKind::Exit => self.set_hover(event, None),
            PointerKind::Move => {
                let hit = self.hit_test(event.position);
                let mut handled = self.set_hover(event, hit.as_ref());
                if let Some(child) = &hit {
                    handled |= Self::forward(child, event);
                }
                handled
            }
            PointerKind::Down(_) => {
                let hit = self.hit_test(event.position);
                self.pressed.set(hit.as_ref().map(|c| c.node().id()));
                hit.is_some_and(|child| Self::forward(&child, event))
            }
            PointerKind::Drag(_) => {
                let target = self
                    .pressed
                    .get()
                    .and_then(|id| self.child(id))
                    .or_else(|| self.hit_test(event.position));
                target.is_some_and(|child| Self::forward(&child, event))
            }
            PointerKind::Up(button) => {
                let pressed = self.pressed.take().and_then(|id| self.child(id));
                let hit = self.hit_test(event.position);
                match (pressed, hit) {
                    (Some(pressed), hit) => {
                        let mut handled = Self::forward(&pressed, event);
                        let same = hit.is_some_and(|h| h.node().id() == pressed.node().id());
                        if same {
                            handled |=
                                Self::forward(&pressed, event.with_kind(PointerKind::Click(button)));
                        }
                        handled
                    }
                    (None, Some(hit)) => Self::forward(&hit, event),
                    (None, None) => false,
                }
            }
            PointerKind::Wheel { .. } => self
                .hit_test(event.position)
                .is_some_and(|child| Self::forward(&child, event)),
        };
        handled || self.entity.dispatch_pointer(&event)
    }

    // ── Ticks ────────────────────────────────────────────────────────────

    /// Deliver a timer tick to every descendant.
    pub fn tick_children(&self) {
        for child in self.children() {
            child.tick();
        }
    }
}

impl Displayer for Container {
    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn draw_displayer(&self, painter: &mut Painter<'_>) {
        self.entity.render(painter);
        self.paint_children(painter);
    }

    fn tick(&self) {
        self.tick_children();
    }

    fn as_container(&self) -> Option<&Container> {
        Some(self)
    }

    fn handle_pointer(&self, event: &PointerEvent) -> bool {
        self.dispatch_pointer(event)
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("id", &self.id())
            .field("size", &(self.width(), self.height()))
            .field("children", &self.len())
            .finish()
    }
}
