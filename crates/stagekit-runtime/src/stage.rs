//! Scene lifecycle manager and host entry point.
//!
//! # Invariants
//!
//! 1. Exactly one scene is active.
//! 2. [`Stage::set_scene`] runs, strictly in order: the outgoing save hook,
//!    the swap, sizing the incoming root to the window, the incoming load
//!    hook, then initialization of the incoming scene's children.
//!
//! # Failure Modes
//!
//! - **Save hook fails**: nothing is swapped; the error is returned.
//! - **Load hook fails**: the swap has already happened and is not rolled
//!   back; the new scene stays active without its initialization pass.

use std::rc::Rc;

use stagekit_core::event::Event;
use stagekit_widgets::{Label, Painter, Selector, Surface};
use web_time::Instant;

use crate::config::StageConfig;
use crate::error::Result;
use crate::scene::Scene;
use crate::ticker::Ticker;

/// Owns the active scene and routes host events to it.
#[derive(Debug)]
pub struct Stage {
    config: StageConfig,
    window: (i32, i32),
    active: Rc<Scene>,
    ticker: Ticker,
}

impl Stage {
    /// Activate `initial` in a window described by `config`.
    ///
    /// # Errors
    ///
    /// Invalid configuration, or a failing load hook of `initial`.
    pub fn new(config: StageConfig, initial: Rc<Scene>) -> Result<Self> {
        config.validate()?;
        let ticker = Ticker::new(config.tick_period_ms)?;
        let window = config.window();
        let stage = Self {
            config,
            window,
            active: initial,
            ticker,
        };
        let _span = tracing::info_span!("stage.activate", scene = %stage.active.name()).entered();
        stage.enter_active()?;
        Ok(stage)
    }

    /// Steps three to five of a transition.
    fn enter_active(&self) -> Result<()> {
        let (width, height) = self.window;
        self.active.root().resize(width, height)?;
        self.active.load()?;
        self.active.root().initialization();
        Ok(())
    }

    /// Replace the active scene, returning the previous one.
    ///
    /// # Errors
    ///
    /// A failing save hook aborts before the swap. A failing load hook is
    /// returned after the swap; see the module docs.
    pub fn set_scene(&mut self, next: Rc<Scene>) -> Result<Rc<Scene>> {
        let _span = tracing::info_span!(
            "stage.set_scene",
            from = %self.active.name(),
            to = %next.name()
        )
        .entered();
        self.active.save()?;
        let previous = std::mem::replace(&mut self.active, next);
        self.enter_active()?;
        tracing::info!(scene = %self.active.name(), "stage.scene_active");
        Ok(previous)
    }

    #[must_use]
    pub fn active(&self) -> &Rc<Scene> {
        &self.active
    }

    #[must_use]
    pub fn window(&self) -> (i32, i32) {
        self.window
    }

    #[must_use]
    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    /// Pixels per display column used by [`Stage::label`] and
    /// [`Stage::selector`].
    #[must_use]
    pub fn glyph_advance(&self) -> u32 {
        self.config.glyph_advance
    }

    /// A label measured with the configured glyph advance.
    #[must_use]
    pub fn label(&self, text: impl Into<String>) -> Rc<Label> {
        Rc::new(Label::new(text, self.glyph_advance()))
    }

    /// A selector measured with the configured glyph advance.
    ///
    /// # Errors
    ///
    /// [`LayoutError::LengthMismatch`](stagekit_core::LayoutError) when the
    /// lists differ in length.
    pub fn selector<V: Clone + 'static>(
        &self,
        keys: Vec<String>,
        values: Vec<V>,
    ) -> Result<Rc<Selector<V>>> {
        Ok(Selector::new(keys, values, self.glyph_advance())?)
    }

    #[must_use]
    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn ticker_mut(&mut self) -> &mut Ticker {
        &mut self.ticker
    }

    /// Resize the window and the active scene with it.
    ///
    /// # Errors
    ///
    /// [`LayoutError::NegativeSize`](stagekit_core::LayoutError) for negative
    /// dimensions; the window keeps its previous size.
    pub fn resize_window(&mut self, width: i32, height: i32) -> Result<()> {
        self.active.root().resize(width, height)?;
        self.window = (width, height);
        Ok(())
    }

    /// Deliver one host event. Returns whether anything handled it.
    ///
    /// # Errors
    ///
    /// Resize faults and hook failures.
    pub fn handle_event(&mut self, event: Event) -> Result<bool> {
        match event {
            Event::Resize { width, height } => {
                self.resize_window(width, height)?;
                Ok(true)
            }
            Event::Pointer(pointer) => Ok(self.active.root().dispatch_pointer(&pointer)),
            Event::Key(key) => {
                self.active.key(&key)?;
                Ok(true)
            }
            Event::Tick => {
                self.tick()?;
                Ok(true)
            }
        }
    }

    /// Deliver one timer tick to the active scene's entities, then its hook.
    ///
    /// # Errors
    ///
    /// A failing tick hook.
    pub fn tick(&self) -> Result<()> {
        self.active.root().tick_children();
        self.active.tick()
    }

    /// Poll the timer and deliver every tick that is due.
    ///
    /// # Errors
    ///
    /// The first failing tick hook; remaining due ticks are skipped.
    pub fn poll_timer(&mut self, now: Instant) -> Result<u32> {
        let due = self.ticker.poll(now);
        for _ in 0..due {
            self.tick()?;
        }
        Ok(due)
    }

    /// Paint the active scene onto the host surface.
    pub fn paint(&self, surface: &mut dyn Surface) {
        let mut painter = Painter::new(surface);
        self.active.root().paint(&mut painter);
    }
}
