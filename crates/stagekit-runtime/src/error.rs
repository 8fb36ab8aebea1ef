use std::fmt;

use stagekit_core::LayoutError;
use thiserror::Error;

/// Error type returned by scene hooks.
pub type HookError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, StageError>;

/// Which scene hook failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookPhase {
    Save,
    Load,
    Tick,
    Key,
}

impl fmt::Display for HookPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Save => "save",
            Self::Load => "load",
            Self::Tick => "tick",
            Self::Key => "key",
        })
    }
}

#[derive(Debug, Error)]
pub enum StageError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("{phase} hook of scene {scene:?} failed: {source}")]
    Hook {
        scene: String,
        phase: HookPhase,
        #[source]
        source: HookError,
    },

    #[error("tick period must be positive, got {period_ms} ms")]
    InvalidTickPeriod { period_ms: u64 },

    #[error("invalid config field {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
