//! Periodic timer driven by a caller-supplied clock.
//!
//! The host calls [`Ticker::poll`] from its event loop with the current
//! instant and delivers one tick per returned count. Missed periods are
//! reported together rather than dropped; pausing discards the time spent
//! paused.

use std::time::Duration;

use web_time::Instant;

use crate::error::{Result, StageError};

#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    last: Option<Instant>,
    paused: bool,
    ticks: u64,
}

impl Ticker {
    /// # Errors
    ///
    /// [`StageError::InvalidTickPeriod`] when `period_ms` is zero.
    pub fn new(period_ms: u64) -> Result<Self> {
        Ok(Self {
            period: Self::checked_period(period_ms)?,
            last: None,
            paused: false,
            ticks: 0,
        })
    }

    fn checked_period(period_ms: u64) -> Result<Duration> {
        if period_ms == 0 {
            return Err(StageError::InvalidTickPeriod { period_ms });
        }
        Ok(Duration::from_millis(period_ms))
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Change the period; the phase restarts at the next poll.
    ///
    /// # Errors
    ///
    /// [`StageError::InvalidTickPeriod`] when `period_ms` is zero; the
    /// current period is kept.
    pub fn set_period(&mut self, period_ms: u64) -> Result<()> {
        self.period = Self::checked_period(period_ms)?;
        self.last = None;
        Ok(())
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            self.last = None;
        }
    }

    /// Total ticks reported so far.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Number of periods elapsed since the last poll. The first poll after
    /// construction, [`Ticker::resume`] or [`Ticker::set_period`] only
    /// anchors the phase and returns zero.
    pub fn poll(&mut self, now: Instant) -> u32 {
        if self.paused {
            return 0;
        }
        let Some(last) = self.last else {
            self.last = Some(now);
            return 0;
        };
        let elapsed = now.saturating_duration_since(last);
        let due = elapsed.as_nanos() / self.period.as_nanos();
        let due = u32::try_from(due).unwrap_or(u32::MAX);
        if due > 0 {
            self.last = Some(last + self.period * due);
            self.ticks += u64::from(due);
        }
        due
    }
}
