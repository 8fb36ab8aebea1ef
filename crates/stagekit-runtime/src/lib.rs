#![forbid(unsafe_code)]

//! Scene lifecycle and host integration for stagekit.
//!
//! A [`Stage`] owns the active [`Scene`], sizes it to the host window,
//! routes host [`Event`](stagekit_core::event::Event)s into it, and drives
//! periodic ticks through a [`Ticker`]. Settings come from [`StageConfig`].

pub mod config;
pub mod error;
pub mod logging;
pub mod scene;
pub mod stage;
pub mod ticker;

pub use config::StageConfig;
pub use error::{HookError, HookPhase, Result, StageError};
pub use scene::Scene;
pub use stage::Stage;
pub use ticker::Ticker;
