#![forbid(unsafe_code)]

//! Core: geometry, identity, input events, errors, and reactive cells.

pub mod error;
pub mod event;
pub mod geometry;
pub mod id;
pub mod reactive;

pub use error::{LayoutError, Result};
pub use id::{ListenerKey, NodeId};
