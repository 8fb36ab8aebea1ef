//! Alignment engine: per-axis constraint state machine.
//!
//! Each axis of a [`LayoutNode`] is in exactly one state:
//!
//! ```text
//!            set_center (value differs)
//!   ┌──────────────────────────────────────────────┐
//!   ▼                                              │
//! Free ──align_*_to(coord)──▶ AlignedToCoordinate ─┤
//!   │                                              │
//!   └──align_*_to_*(node)───▶ AlignedToEntity ─────┘
//! ```
//!
//! Every transition tears down the subscription held by the state it leaves.
//! `AlignedToEntity` listens to the target's edge observable and re-pins on
//! each change as `target edge + delta`; both edge-bound states also re-pin
//! when the node's own size changes, keeping the pinned edge in place.
//!
//! # Cycles
//!
//! Linking a node to a target whose same-axis tracking chain leads back to
//! the node is rejected with [`LayoutError::AlignmentCycle`]. Only alignment
//! links are checked; listeners added by user code are not.

use std::rc::{Rc, Weak};

use stagekit_core::{LayoutError, ListenerKey, NodeId, Result};

use crate::axis::{Axis, Edge};
use crate::coordinate::Coordinate;
use crate::node::{LayoutNode, NodeInner};

/// Observable description of an axis constraint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisAlignment {
    /// Center is explicit or fractional.
    Free(Coordinate),
    /// `edge` is pinned to a container coordinate.
    AlignedToCoordinate { edge: Edge, target: Coordinate },
    /// `edge` tracks `target_edge` of node `target`, plus `delta` pixels.
    AlignedToEntity {
        edge: Edge,
        target: NodeId,
        target_edge: Edge,
        delta: i32,
    },
}

pub(crate) enum Constraint {
    Free(Coordinate),
    Pinned { edge: Edge, target: Coordinate },
    Tracking(Link),
}

pub(crate) struct Link {
    edge: Edge,
    target: Weak<NodeInner>,
    target_id: NodeId,
    target_edge: Edge,
    delta: i32,
}

fn link_key(owner: NodeId, axis: Axis) -> ListenerKey {
    ListenerKey::new(owner, axis.pick("align.x", "align.y"))
}

impl Link {
    fn target_position(&self, axis: Axis) -> Option<i32> {
        let target = self.target.upgrade()?;
        Some(target.axis(axis).edge(self.target_edge).get() + self.delta)
    }

    fn subscribe(&self, owner: &Rc<NodeInner>, axis: Axis) {
        let Some(target) = self.target.upgrade() else {
            return;
        };
        let weak = Rc::downgrade(owner);
        target
            .axis(axis)
            .edge(self.target_edge)
            .add_listener(link_key(owner.id, axis), move || {
                if let Some(node) = weak.upgrade() {
                    node.repin(axis);
                }
            });
    }

    pub(crate) fn unsubscribe(&self, owner: NodeId, axis: Axis) {
        if let Some(target) = self.target.upgrade() {
            target
                .axis(axis)
                .edge(self.target_edge)
                .remove_listener(link_key(owner, axis));
        }
    }
}

impl Constraint {
    /// Edge and its target position for edge-bound states.
    pub(crate) fn pinned_edge(&self, node: &NodeInner, axis: Axis) -> Option<(Edge, i32)> {
        match self {
            Self::Free(_) => None,
            Self::Pinned { edge, target } => Some((*edge, node.resolve(axis, *target)?)),
            Self::Tracking(link) => Some((link.edge, link.target_position(axis)?)),
        }
    }

    pub(crate) fn describe(&self) -> AxisAlignment {
        match self {
            Self::Free(coord) => AxisAlignment::Free(*coord),
            Self::Pinned { edge, target } => AxisAlignment::AlignedToCoordinate {
                edge: *edge,
                target: *target,
            },
            Self::Tracking(link) => AxisAlignment::AlignedToEntity {
                edge: link.edge,
                target: link.target_id,
                target_edge: link.target_edge,
                delta: link.delta,
            },
        }
    }
}

impl LayoutNode {
    /// Install `next` on `axis`, tearing down the previous state's
    /// subscription.
    pub(crate) fn replace_constraint(&self, axis: Axis, next: Constraint) {
        let previous = self.inner.axis(axis).constraint.replace(next);
        if let Constraint::Tracking(link) = previous {
            link.unsubscribe(self.inner.id, axis);
        }
    }

    pub(crate) fn suspend_links(&self) {
        for axis in Axis::ALL {
            if let Constraint::Tracking(link) = &*self.inner.axis(axis).constraint.borrow() {
                link.unsubscribe(self.inner.id, axis);
            }
        }
    }

    pub(crate) fn resume_links(&self) {
        for axis in Axis::ALL {
            if let Constraint::Tracking(link) = &*self.inner.axis(axis).constraint.borrow() {
                link.subscribe(&self.inner, axis);
            }
        }
    }

    /// Pin `edge` to a container coordinate.
    pub fn align_edge_to(&self, axis: Axis, edge: Edge, target: Coordinate) {
        self.replace_constraint(axis, Constraint::Pinned { edge, target });
        tracing::trace!(
            node = %self.id(),
            edge = edge.name(axis),
            target = ?target,
            "align.to_coordinate"
        );
        self.inner.repin(axis);
    }

    /// Make `edge` track `other_edge` of `other`, offset by `delta` pixels.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::AlignmentCycle`] if `other` already depends on
    /// this node along `axis` (or is this node). The current constraint is
    /// left untouched in that case.
    pub fn align_edge_to_edge(
        &self,
        axis: Axis,
        edge: Edge,
        other: &LayoutNode,
        other_edge: Edge,
        delta: i32,
    ) -> Result<()> {
        if self.is_upstream_of(axis, other) {
            return Err(LayoutError::AlignmentCycle { node: self.id() });
        }
        let link = Link {
            edge,
            target: Rc::downgrade(&other.inner),
            target_id: other.id(),
            target_edge: other_edge,
            delta,
        };
        if !self.inner.suspended.get() {
            link.subscribe(&self.inner, axis);
        }
        // Same source edge: the new registration already replaced the old one.
        let previous = self
            .inner
            .axis(axis)
            .constraint
            .replace(Constraint::Tracking(link));
        if let Constraint::Tracking(old) = previous {
            let same_source =
                Weak::ptr_eq(&old.target, &Rc::downgrade(&other.inner)) && old.target_edge == other_edge;
            if !same_source {
                old.unsubscribe(self.inner.id, axis);
            }
        }
        tracing::trace!(
            node = %self.id(),
            edge = edge.name(axis),
            target = %other.id(),
            target_edge = other_edge.name(axis),
            delta,
            "align.to_entity"
        );
        self.inner.repin(axis);
        Ok(())
    }

    /// Whether `other`'s tracking chain along `axis` reaches this node.
    fn is_upstream_of(&self, axis: Axis, other: &LayoutNode) -> bool {
        let mut cursor = Some(Rc::clone(&other.inner));
        while let Some(node) = cursor {
            if node.id == self.inner.id {
                return true;
            }
            cursor = match &*node.axis(axis).constraint.borrow() {
                Constraint::Tracking(link) => link.target.upgrade(),
                _ => None,
            };
        }
        false
    }

    /// Return `axis` to free placement at its current center.
    pub fn clear_alignment(&self, axis: Axis) {
        let center = self.center(axis);
        self.replace_constraint(axis, Constraint::Free(Coordinate::Absolute(center)));
    }

    // ── Named forms ──────────────────────────────────────────────────────

    pub fn align_left_to(&self, x: Coordinate) {
        self.align_edge_to(Axis::Horizontal, Edge::Start, x);
    }

    pub fn align_right_to(&self, x: Coordinate) {
        self.align_edge_to(Axis::Horizontal, Edge::End, x);
    }

    pub fn align_top_to(&self, y: Coordinate) {
        self.align_edge_to(Axis::Vertical, Edge::Start, y);
    }

    pub fn align_bottom_to(&self, y: Coordinate) {
        self.align_edge_to(Axis::Vertical, Edge::End, y);
    }

    /// # Errors
    ///
    /// See [`LayoutNode::align_edge_to_edge`].
    pub fn align_left_to_left(&self, other: &LayoutNode, delta: i32) -> Result<()> {
        self.align_edge_to_edge(Axis::Horizontal, Edge::Start, other, Edge::Start, delta)
    }

    /// # Errors
    ///
    /// See [`LayoutNode::align_edge_to_edge`].
    pub fn align_left_to_right(&self, other: &LayoutNode, delta: i32) -> Result<()> {
        self.align_edge_to_edge(Axis::Horizontal, Edge::Start, other, Edge::End, delta)
    }

    /// # Errors
    ///
    /// See [`LayoutNode::align_edge_to_edge`].
    pub fn align_right_to_left(&self, other: &LayoutNode, delta: i32) -> Result<()> {
        self.align_edge_to_edge(Axis::Horizontal, Edge::End, other, Edge::Start, delta)
    }

    /// # Errors
    ///
    /// See [`LayoutNode::align_edge_to_edge`].
    pub fn align_right_to_right(&self, other: &LayoutNode, delta: i32) -> Result<()> {
        self.align_edge_to_edge(Axis::Horizontal, Edge::End, other, Edge::End, delta)
    }

    /// # Errors
    ///
    /// See [`LayoutNode::align_edge_to_edge`].
    pub fn align_top_to_top(&self, other: &LayoutNode, delta: i32) -> Result<()> {
        self.align_edge_to_edge(Axis::Vertical, Edge::Start, other, Edge::Start, delta)
    }

    /// # Errors
    ///
    /// See [`LayoutNode::align_edge_to_edge`].
    pub fn align_top_to_bottom(&self, other: &LayoutNode, delta: i32) -> Result<()> {
        self.align_edge_to_edge(Axis::Vertical, Edge::Start, other, Edge::End, delta)
    }

    /// # Errors
    ///
    /// See [`LayoutNode::align_edge_to_edge`].
    pub fn align_bottom_to_top(&self, other: &LayoutNode, delta: i32) -> Result<()> {
        self.align_edge_to_edge(Axis::Vertical, Edge::End, other, Edge::Start, delta)
    }

    /// # Errors
    ///
    /// See [`LayoutNode::align_edge_to_edge`].
    pub fn align_bottom_to_bottom(&self, other: &LayoutNode, delta: i32) -> Result<()> {
        self.align_edge_to_edge(Axis::Vertical, Edge::End, other, Edge::End, delta)
    }
}
