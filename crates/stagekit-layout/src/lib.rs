#![forbid(unsafe_code)]

//! Reactive layout and alignment engine.
//!
//! A [`LayoutNode`] carries the geometry of one entity: per axis a center,
//! a size, and the two derived edges, each an
//! [`Observable`](stagekit_core::reactive::Observable). Positions and sizes
//! are given as [`Coordinate`]s, either absolute pixels or fractions of the
//! containing [`Extent`], and each axis can be pinned by an alignment
//! constraint:
//!
//! - free: the center is explicit or fractional,
//! - aligned to a coordinate: one edge is pinned to a container coordinate,
//! - aligned to an entity: one edge tracks another node's edge plus an offset.
//!
//! Changes propagate synchronously through listener chains, depth-first,
//! before control returns to the writer.
//!
//! # Resolution order
//!
//! When the containing extent changes, a node re-resolves in two phases,
//! driven by its container for all children at once:
//!
//! 1. [`LayoutNode::resolve_relative_coordinates`]: fractional sizes, then
//!    fractional centers.
//! 2. [`LayoutNode::resolve_relative_alignment`]: edge constraints, using the
//!    sizes from phase 1.

pub mod align;
pub mod axis;
pub mod coordinate;
pub mod extent;
pub mod node;

pub use align::AxisAlignment;
pub use axis::{Axis, Edge};
pub use coordinate::Coordinate;
pub use extent::Extent;
pub use node::{LayoutNode, WeakLayoutNode};
