//! Stage configuration.
//!
//! Values come from, in increasing precedence: [`StageConfig::default`], a
//! JSON document ([`StageConfig::from_json`]), then `STAGEKIT_*` environment
//! variables ([`StageConfig::apply_env`]). Unparseable environment values
//! are ignored.

use std::env;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StageError};

/// Window and timer settings for a [`Stage`](crate::Stage).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Window title reported to the host.
    pub title: String,
    /// Initial window width in pixels.
    pub width: u32,
    /// Initial window height in pixels.
    pub height: u32,
    /// Timer period in milliseconds. Must be positive.
    pub tick_period_ms: u64,
    /// Pixels per display column for labels built by the stage.
    pub glyph_advance: u32,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            title: "stagekit".into(),
            width: 800,
            height: 600,
            tick_period_ms: 16,
            glyph_advance: 8,
        }
    }
}

impl StageConfig {
    /// Parse a (possibly partial) JSON document; missing fields keep their
    /// defaults.
    ///
    /// # Errors
    ///
    /// [`StageError::ConfigParse`] for malformed JSON, or any error from
    /// [`StageConfig::validate`].
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Apply `STAGEKIT_*` overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_vars(|name| env::var(name).ok());
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("STAGEKIT_TITLE") {
            self.title = val;
        }
        if let Some(val) = var("STAGEKIT_WIDTH")
            && let Ok(n) = val.trim().parse()
        {
            self.width = n;
        }
        if let Some(val) = var("STAGEKIT_HEIGHT")
            && let Ok(n) = val.trim().parse()
        {
            self.height = n;
        }
        if let Some(val) = var("STAGEKIT_TICK_MS")
            && let Ok(n) = val.trim().parse()
        {
            self.tick_period_ms = n;
        }
        if let Some(val) = var("STAGEKIT_GLYPH_ADVANCE")
            && let Ok(n) = val.trim().parse()
        {
            self.glyph_advance = n;
        }
    }

    /// # Errors
    ///
    /// [`StageError::InvalidTickPeriod`] for a zero period,
    /// [`StageError::InvalidConfig`] for window dimensions that do not fit
    /// the pixel coordinate range or a zero glyph advance.
    pub fn validate(&self) -> Result<()> {
        if self.tick_period_ms == 0 {
            return Err(StageError::InvalidTickPeriod { period_ms: 0 });
        }
        for (field, value) in [("width", self.width), ("height", self.height)] {
            if i32::try_from(value).is_err() {
                return Err(StageError::InvalidConfig {
                    field,
                    reason: format!("{value} exceeds {}", i32::MAX),
                });
            }
        }
        if self.glyph_advance == 0 {
            return Err(StageError::InvalidConfig {
                field: "glyph_advance",
                reason: "must be positive".into(),
            });
        }
        Ok(())
    }

    /// Window size in pixel coordinates. Call after [`StageConfig::validate`].
    #[must_use]
    pub fn window(&self) -> (i32, i32) {
        (
            i32::try_from(self.width).unwrap_or(i32::MAX),
            i32::try_from(self.height).unwrap_or(i32::MAX),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_are_valid() {
        let config = StageConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.window(), (800, 600));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = StageConfig::from_json(r#"{"title":"puzzle","width":400}"#).expect("parse");
        assert_eq!(config.title, "puzzle");
        assert_eq!(config.width, 400);
        assert_eq!(config.height, 600);
        assert_eq!(config.tick_period_ms, 16);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = StageConfig::from_json("{width:").expect_err("malformed");
        assert!(matches!(err, StageError::ConfigParse(_)));
    }

    #[test]
    fn zero_tick_period_is_rejected() {
        let err = StageConfig::from_json(r#"{"tick_period_ms":0}"#).expect_err("zero period");
        assert!(matches!(err, StageError::InvalidTickPeriod { period_ms: 0 }));
    }

    #[test]
    fn oversized_window_is_rejected() {
        let config = StageConfig {
            width: u32::MAX,
            ..StageConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(StageError::InvalidConfig { field: "width", .. })
        ));
    }

    #[test]
    fn env_overrides_apply_and_garbage_is_ignored() {
        let mut config = StageConfig::default();
        config.apply_vars(lookup(&[
            ("STAGEKIT_TITLE", "demo"),
            ("STAGEKIT_WIDTH", " 1024 "),
            ("STAGEKIT_HEIGHT", "tall"),
            ("STAGEKIT_TICK_MS", "33"),
            ("STAGEKIT_GLYPH_ADVANCE", "12"),
        ]));
        assert_eq!(config.title, "demo");
        assert_eq!(config.width, 1024);
        assert_eq!(config.height, 600);
        assert_eq!(config.tick_period_ms, 33);
        assert_eq!(config.glyph_advance, 12);
    }

    #[test]
    fn zero_glyph_advance_is_rejected() {
        let err = StageConfig::from_json(r#"{"glyph_advance":0}"#).expect_err("zero advance");
        assert!(matches!(
            err,
            StageError::InvalidConfig { field: "glyph_advance", .. }
        ));
    }
}
