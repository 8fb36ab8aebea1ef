#![forbid(unsafe_code)]

//! Displayers: positionable, sizeable, drawable units.
//!
//! Every displayer wraps an [`Entity`], which couples a
//! [`LayoutNode`](stagekit_layout::LayoutNode) with background drawers, an
//! optional render callback, and pointer handlers. [`Container`] owns
//! children and re-lays them out when its own size changes; [`Canvas`],
//! [`Label`], and [`Selector`] are leaf displayers.
//!
//! Painting goes through a [`Painter`] that wraps the host's [`Surface`];
//! the toolkit never rasterises anything itself.

pub mod canvas;
pub mod container;
pub mod draw;
pub mod entity;
pub mod label;
pub mod selector;

pub use canvas::{Canvas, Shape};
pub use container::Container;
pub use draw::{Color, Painter, Primitive, RecordingSurface, Surface};
pub use entity::{Entity, PointerInterest};
pub use label::Label;
pub use selector::Selector;

use stagekit_core::event::PointerEvent;
use stagekit_layout::LayoutNode;

/// A unit the host paint cycle draws and the pointer router can target.
///
/// Only [`Displayer::entity`] is required; the rest have defaults suitable
/// for a leaf that draws through its entity's render callback.
pub trait Displayer {
    fn entity(&self) -> &Entity;

    fn node(&self) -> &LayoutNode {
        self.entity().node()
    }

    /// Draw in the displayer's local frame (origin at its top-left corner).
    /// Backgrounds have already been drawn.
    fn draw_displayer(&self, painter: &mut Painter<'_>) {
        self.entity().render(painter);
    }

    /// Recompute parameters that depend on a live drawing surface, such as
    /// text metrics. Runs before the next paint after the flag is raised.
    fn initialize(&self) {}

    /// Periodic timer tick.
    fn tick(&self) {}

    fn as_container(&self) -> Option<&Container> {
        None
    }

    /// Handle a pointer event in the local frame. Returns `true` if handled.
    fn handle_pointer(&self, event: &PointerEvent) -> bool {
        self.entity().dispatch_pointer(event)
    }
}

impl Displayer for Entity {
    fn entity(&self) -> &Entity {
        self
    }
}
