//! Per-entity geometry: observable center, size, and edges on both axes.
//!
//! # Invariants
//!
//! 1. `start = center - size/2` and `end = start + size` on every axis,
//!    whenever no notification is in flight.
//! 2. Sizes are never negative.
//! 3. Exactly one constraint decides an axis' center at any instant.
//! 4. A node never holds a strong reference to another node or to its
//!    container; every cross-node link is weak.
//!
//! # Failure Modes
//!
//! - **Detached fractional coordinate**: stays pending; the pixel value is
//!   computed when the node is attached.
//! - **Aligned-to node dropped**: the link goes inert and the node keeps its
//!   last position.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use stagekit_core::geometry::Rect;
use stagekit_core::reactive::Observable;
use stagekit_core::{ListenerKey, NodeId, Result};

use crate::align::{AxisAlignment, Constraint};
use crate::axis::{Axis, Edge};
use crate::coordinate::Coordinate;
use crate::extent::Extent;

pub(crate) struct AxisState {
    pub(crate) center: Observable<i32>,
    pub(crate) size: Observable<i32>,
    pub(crate) start: Observable<i32>,
    pub(crate) end: Observable<i32>,
    pub(crate) size_spec: Cell<Coordinate>,
    pub(crate) constraint: RefCell<Constraint>,
}

impl AxisState {
    fn new() -> Self {
        Self {
            center: Observable::new(0),
            size: Observable::new(0),
            start: Observable::new(0),
            end: Observable::new(0),
            size_spec: Cell::new(Coordinate::Absolute(0)),
            constraint: RefCell::new(Constraint::Free(Coordinate::Absolute(0))),
        }
    }

    #[inline]
    pub(crate) fn edge(&self, edge: Edge) -> &Observable<i32> {
        match edge {
            Edge::Start => &self.start,
            Edge::End => &self.end,
        }
    }
}

pub(crate) struct NodeInner {
    pub(crate) id: NodeId,
    axes: [AxisState; 2],
    extent: RefCell<Option<Extent>>,
    /// Set while removed from a container: entity-to-entity links are
    /// unsubscribed but remembered.
    pub(crate) suspended: Cell<bool>,
    needs_layout: Cell<bool>,
}

impl NodeInner {
    #[inline]
    pub(crate) fn axis(&self, axis: Axis) -> &AxisState {
        &self.axes[axis.index()]
    }

    fn extent_along(&self, axis: Axis) -> Option<i32> {
        self.extent.borrow().as_ref().and_then(|e| e.along(axis))
    }

    /// Pixel value of `coord` on `axis`, if it can be resolved now.
    pub(crate) fn resolve(&self, axis: Axis, coord: Coordinate) -> Option<i32> {
        match coord {
            Coordinate::Absolute(px) => Some(px),
            Coordinate::Fraction(_) => self.extent_along(axis).map(|e| coord.resolve(e)),
        }
    }

    fn sync_edges(&self, axis: Axis) {
        let state = self.axis(axis);
        let center = state.center.get();
        let size = state.size.get();
        state.start.set(Edge::Start.position_from(center, size));
        state.end.set(Edge::End.position_from(center, size));
    }

    /// Re-pin the center from the active edge constraint, if any.
    pub(crate) fn repin(&self, axis: Axis) {
        let state = self.axis(axis);
        let pinned = {
            let constraint = state.constraint.borrow();
            constraint.pinned_edge(self, axis)
        };
        if let Some((edge, position)) = pinned {
            let center = edge.center_from(position, state.size.get());
            tracing::trace!(
                node = %self.id,
                axis = ?axis,
                edge = edge.name(axis),
                position,
                center,
                "layout.repin"
            );
            state.center.set(center);
        }
    }

    fn resolve_size(&self, axis: Axis) {
        let state = self.axis(axis);
        if let Some(px) = self.resolve(axis, state.size_spec.get()) {
            state.size.set(px.max(0));
        }
    }

    fn resolve_free_center(&self, axis: Axis) {
        let state = self.axis(axis);
        let coord = match *state.constraint.borrow() {
            Constraint::Free(coord) => coord,
            _ => return,
        };
        if let Some(px) = self.resolve(axis, coord) {
            state.center.set(px);
        }
    }
}

impl Drop for NodeInner {
    fn drop(&mut self) {
        for axis in Axis::ALL {
            if let Constraint::Tracking(link) = self.axes[axis.index()].constraint.get_mut() {
                link.unsubscribe(self.id, axis);
            }
        }
    }
}

/// Geometry and alignment state of one entity.
///
/// Cloning a `LayoutNode` creates a new handle to the **same** node.
#[derive(Clone)]
pub struct LayoutNode {
    pub(crate) inner: Rc<NodeInner>,
}

impl LayoutNode {
    /// A detached node at the origin with zero size.
    #[must_use]
    pub fn new() -> Self {
        let inner = Rc::new(NodeInner {
            id: NodeId::next(),
            axes: [AxisState::new(), AxisState::new()],
            extent: RefCell::new(None),
            suspended: Cell::new(false),
            needs_layout: Cell::new(true),
        });
        for axis in Axis::ALL {
            Self::wire_axis(&inner, axis);
        }
        Self { inner }
    }

    /// A detached node with the given size.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::NegativeSize`](stagekit_core::LayoutError) for
    /// negative sizes.
    pub fn with_size(width: Coordinate, height: Coordinate) -> Result<Self> {
        let node = Self::new();
        node.set_width(width)?;
        node.set_height(height)?;
        Ok(node)
    }

    fn wire_axis(inner: &Rc<NodeInner>, axis: Axis) {
        let state = inner.axis(axis);

        let weak = Rc::downgrade(inner);
        state.center.add_listener(
            ListenerKey::new(inner.id, axis.pick("edges.x", "edges.y")),
            move || {
                if let Some(node) = weak.upgrade() {
                    node.sync_edges(axis);
                }
            },
        );

        // Re-pin before syncing edges so a pinned edge never drifts, even
        // transiently, when the size changes.
        let weak = Rc::downgrade(inner);
        state.size.add_listener(
            ListenerKey::new(inner.id, axis.pick("size.width", "size.height")),
            move || {
                if let Some(node) = weak.upgrade() {
                    node.repin(axis);
                    node.sync_edges(axis);
                }
            },
        );
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.inner.id
    }

    #[must_use]
    pub fn downgrade(&self) -> WeakLayoutNode {
        WeakLayoutNode {
            inner: Rc::downgrade(&self.inner),
        }
    }

    // ── Reads ────────────────────────────────────────────────────────────

    #[must_use]
    pub fn center(&self, axis: Axis) -> i32 {
        self.inner.axis(axis).center.get()
    }

    #[must_use]
    pub fn size(&self, axis: Axis) -> i32 {
        self.inner.axis(axis).size.get()
    }

    #[must_use]
    pub fn edge(&self, axis: Axis, edge: Edge) -> i32 {
        self.inner.axis(axis).edge(edge).get()
    }

    #[must_use]
    pub fn center_x(&self) -> i32 {
        self.center(Axis::Horizontal)
    }

    #[must_use]
    pub fn center_y(&self) -> i32 {
        self.center(Axis::Vertical)
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        self.size(Axis::Horizontal)
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        self.size(Axis::Vertical)
    }

    #[must_use]
    pub fn left(&self) -> i32 {
        self.edge(Axis::Horizontal, Edge::Start)
    }

    #[must_use]
    pub fn right(&self) -> i32 {
        self.edge(Axis::Horizontal, Edge::End)
    }

    #[must_use]
    pub fn top(&self) -> i32 {
        self.edge(Axis::Vertical, Edge::Start)
    }

    #[must_use]
    pub fn bottom(&self) -> i32 {
        self.edge(Axis::Vertical, Edge::End)
    }

    /// Bounds in the container's frame.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.left(), self.top(), self.width(), self.height())
    }

    /// Observable center along `axis`. Only this node writes it.
    #[must_use]
    pub fn center_observable(&self, axis: Axis) -> &Observable<i32> {
        &self.inner.axis(axis).center
    }

    /// Observable size along `axis`. Only this node writes it.
    #[must_use]
    pub fn size_observable(&self, axis: Axis) -> &Observable<i32> {
        &self.inner.axis(axis).size
    }

    /// Observable edge position. Only this node writes it.
    #[must_use]
    pub fn edge_observable(&self, axis: Axis, edge: Edge) -> &Observable<i32> {
        self.inner.axis(axis).edge(edge)
    }

    #[must_use]
    pub fn size_spec(&self, axis: Axis) -> Coordinate {
        self.inner.axis(axis).size_spec.get()
    }

    /// Active constraint on `axis`.
    #[must_use]
    pub fn alignment(&self, axis: Axis) -> AxisAlignment {
        self.inner.axis(axis).constraint.borrow().describe()
    }

    // ── Size ─────────────────────────────────────────────────────────────

    /// Set the size along `axis`.
    ///
    /// A fractional size is kept and re-resolved on every container resize
    /// until replaced. Edge-aligned axes keep their pinned edge in place.
    ///
    /// # Errors
    ///
    /// Negative or non-finite sizes are rejected and leave the node
    /// unchanged.
    pub fn set_size(&self, axis: Axis, spec: Coordinate) -> Result<()> {
        let spec = spec.as_size(axis.size_name())?;
        self.inner.axis(axis).size_spec.set(spec);
        self.inner.resolve_size(axis);
        Ok(())
    }

    /// # Errors
    ///
    /// See [`LayoutNode::set_size`].
    pub fn set_width(&self, spec: Coordinate) -> Result<()> {
        self.set_size(Axis::Horizontal, spec)
    }

    /// # Errors
    ///
    /// See [`LayoutNode::set_size`].
    pub fn set_height(&self, spec: Coordinate) -> Result<()> {
        self.set_size(Axis::Vertical, spec)
    }

    /// Set a measured pixel size along `axis`; cannot be negative.
    pub fn set_size_px(&self, axis: Axis, px: u32) {
        let px = i32::try_from(px).unwrap_or(i32::MAX);
        self.inner.axis(axis).size_spec.set(Coordinate::Absolute(px));
        self.inner.resolve_size(axis);
    }

    // ── Position ─────────────────────────────────────────────────────────

    /// Place the center along `axis`.
    ///
    /// An active alignment on the axis is dropped only if the resolved value
    /// differs from the current center. A free axis always takes the new
    /// specification.
    pub fn set_center(&self, axis: Axis, coord: Coordinate) {
        let state = self.inner.axis(axis);
        let resolved = self.inner.resolve(axis, coord);
        let is_free = matches!(*state.constraint.borrow(), Constraint::Free(_));
        if !is_free && resolved == Some(state.center.get()) {
            return;
        }
        self.replace_constraint(axis, Constraint::Free(coord));
        if let Some(px) = resolved {
            state.center.set(px);
        }
    }

    pub fn set_center_x(&self, x: Coordinate) {
        self.set_center(Axis::Horizontal, x);
    }

    pub fn set_center_y(&self, y: Coordinate) {
        self.set_center(Axis::Vertical, y);
    }

    pub fn move_to(&self, x: Coordinate, y: Coordinate) {
        self.set_center_x(x);
        self.set_center_y(y);
    }

    /// Shift the center by a pixel offset; the result is absolute.
    pub fn move_by(&self, dx: i32, dy: i32) {
        for (axis, delta) in [(Axis::Horizontal, dx), (Axis::Vertical, dy)] {
            if delta != 0 {
                let target = self.center(axis).saturating_add(delta);
                self.set_center(axis, Coordinate::Absolute(target));
            }
        }
    }

    // ── Container membership ─────────────────────────────────────────────

    /// Bind this node to a container extent and resolve it immediately.
    ///
    /// Links to other nodes suspended by [`LayoutNode::detach`] are
    /// re-established.
    pub fn attach(&self, extent: Extent) {
        *self.inner.extent.borrow_mut() = Some(extent);
        if self.inner.suspended.replace(false) {
            self.resume_links();
        }
        self.resolve_relative_coordinates();
        self.resolve_relative_alignment();
    }

    /// Stop following the container extent and any aligned-to node.
    ///
    /// Constraints are kept as they are; only their subscriptions are
    /// dropped.
    pub fn detach(&self) {
        *self.inner.extent.borrow_mut() = None;
        if !self.inner.suspended.replace(true) {
            self.suspend_links();
        }
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.inner.extent.borrow().is_some()
    }

    /// Live container this node is attached to, if its extent was tagged.
    #[must_use]
    pub fn owner(&self) -> Option<NodeId> {
        self.inner
            .extent
            .borrow()
            .as_ref()
            .filter(|e| e.along(Axis::Horizontal).is_some())
            .and_then(Extent::owner)
    }

    /// Phase one of a container resize: fractional sizes on both axes, then
    /// fractional free centers.
    pub fn resolve_relative_coordinates(&self) {
        for axis in Axis::ALL {
            if self.size_spec(axis).is_relative() {
                self.inner.resolve_size(axis);
            }
        }
        for axis in Axis::ALL {
            self.inner.resolve_free_center(axis);
        }
    }

    /// Phase two of a container resize: edge constraints.
    pub fn resolve_relative_alignment(&self) {
        for axis in Axis::ALL {
            self.inner.repin(axis);
        }
    }

    // ── Re-layout flag ───────────────────────────────────────────────────

    #[must_use]
    pub fn needs_layout(&self) -> bool {
        self.inner.needs_layout.get()
    }

    pub fn mark_needs_layout(&self) {
        self.inner.needs_layout.set(true);
    }

    /// Clear the flag, returning whether it was set.
    pub fn take_needs_layout(&self) -> bool {
        self.inner.needs_layout.replace(false)
    }
}

impl Default for LayoutNode {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LayoutNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutNode")
            .field("id", &self.id())
            .field("bounds", &self.bounds())
            .field("horizontal", &self.alignment(Axis::Horizontal))
            .field("vertical", &self.alignment(Axis::Vertical))
            .finish()
    }
}

/// Non-owning handle to a [`LayoutNode`].
#[derive(Clone)]
pub struct WeakLayoutNode {
    pub(crate) inner: Weak<NodeInner>,
}

impl WeakLayoutNode {
    #[must_use]
    pub fn upgrade(&self) -> Option<LayoutNode> {
        self.inner.upgrade().map(|inner| LayoutNode { inner })
    }
}

impl fmt::Debug for WeakLayoutNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.upgrade() {
            Some(inner) => write!(f, "WeakLayoutNode({})", inner.id),
            None => f.write_str("WeakLayoutNode(dropped)"),
        }
    }
}
