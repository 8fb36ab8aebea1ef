#![forbid(unsafe_code)]

//! stagekit public facade crate.
//!
//! Re-exports the member crates and a prelude with the types most
//! applications touch.

pub use stagekit_core as core;
pub use stagekit_layout as layout;
#[cfg(feature = "runtime")]
pub use stagekit_runtime as runtime;
pub use stagekit_widgets as widgets;

pub mod prelude {
    pub use stagekit_core::event::{Event, KeyCode, KeyEvent, MouseButton, PointerEvent, PointerKind};
    pub use stagekit_core::geometry::{Point, Rect};
    pub use stagekit_core::reactive::{Observable, Subscription};
    pub use stagekit_core::{LayoutError, ListenerKey, NodeId};
    pub use stagekit_layout::{Axis, AxisAlignment, Coordinate, Edge, LayoutNode};
    #[cfg(feature = "runtime")]
    pub use stagekit_runtime::{Scene, Stage, StageConfig, StageError, Ticker};
    pub use stagekit_widgets::{
        Canvas, Color, Container, Displayer, Entity, Label, Painter, PointerInterest, Primitive,
        RecordingSurface, Selector, Shape, Surface,
    };
}
