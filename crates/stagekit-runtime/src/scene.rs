//! Scenes: a named root container plus lifecycle hooks.

use std::fmt;
use std::rc::Rc;

use stagekit_core::event::KeyEvent;
use stagekit_widgets::Container;

use crate::error::{HookError, HookPhase, Result, StageError};

type Hook = Box<dyn Fn(&Container) -> std::result::Result<(), HookError>>;
type KeyHook = Box<dyn Fn(&Container, &KeyEvent) -> std::result::Result<(), HookError>>;

/// One screen of an application.
///
/// The stage calls `save` when the scene is about to be replaced and `load`
/// after it has been sized to the window. Hooks receive the root container.
pub struct Scene {
    name: String,
    root: Rc<Container>,
    save: Option<Hook>,
    load: Option<Hook>,
    tick: Option<Hook>,
    key: Option<KeyHook>,
}

impl Scene {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_root(name, Container::new())
    }

    #[must_use]
    pub fn with_root(name: impl Into<String>, root: Rc<Container>) -> Self {
        Self {
            name: name.into(),
            root,
            save: None,
            load: None,
            tick: None,
            key: None,
        }
    }

    #[must_use]
    pub fn on_save(
        mut self,
        hook: impl Fn(&Container) -> std::result::Result<(), HookError> + 'static,
    ) -> Self {
        self.save = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn on_load(
        mut self,
        hook: impl Fn(&Container) -> std::result::Result<(), HookError> + 'static,
    ) -> Self {
        self.load = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn on_tick(
        mut self,
        hook: impl Fn(&Container) -> std::result::Result<(), HookError> + 'static,
    ) -> Self {
        self.tick = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn on_key(
        mut self,
        hook: impl Fn(&Container, &KeyEvent) -> std::result::Result<(), HookError> + 'static,
    ) -> Self {
        self.key = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn root(&self) -> &Rc<Container> {
        &self.root
    }

    fn run(&self, phase: HookPhase, outcome: std::result::Result<(), HookError>) -> Result<()> {
        outcome.map_err(|source| {
            tracing::warn!(scene = %self.name, %phase, error = %source, "scene.hook_failed");
            StageError::Hook {
                scene: self.name.clone(),
                phase,
                source,
            }
        })
    }

    pub(crate) fn save(&self) -> Result<()> {
        match &self.save {
            Some(hook) => self.run(HookPhase::Save, hook(&self.root)),
            None => Ok(()),
        }
    }

    pub(crate) fn load(&self) -> Result<()> {
        match &self.load {
            Some(hook) => self.run(HookPhase::Load, hook(&self.root)),
            None => Ok(()),
        }
    }

    pub(crate) fn tick(&self) -> Result<()> {
        match &self.tick {
            Some(hook) => self.run(HookPhase::Tick, hook(&self.root)),
            None => Ok(()),
        }
    }

    pub(crate) fn key(&self, event: &KeyEvent) -> Result<()> {
        match &self.key {
            Some(hook) => self.run(HookPhase::Key, hook(&self.root, event)),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("name", &self.name)
            .field("root", &self.root)
            .field("save", &self.save.is_some())
            .field("load", &self.load.is_some())
            .field("tick", &self.tick.is_some())
            .field("key", &self.key.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stagekit_core::event::KeyCode;

    #[test]
    fn missing_hooks_succeed() {
        let scene = Scene::new("empty");
        assert!(scene.save().is_ok());
        assert!(scene.load().is_ok());
        assert!(scene.tick().is_ok());
        assert!(scene.key(&KeyEvent::new(KeyCode::Enter)).is_ok());
    }

    #[test]
    fn failing_hook_names_scene_and_phase() {
        let scene = Scene::new("board").on_load(|_| Err("no save file".into()));
        let err = scene.load().expect_err("load fails");
        match err {
            StageError::Hook { scene, phase, .. } => {
                assert_eq!(scene, "board");
                assert_eq!(phase, HookPhase::Load);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn key_hook_sees_event() {
        let scene = Scene::new("input").on_key(|_, ev| {
            if ev.code == KeyCode::Escape {
                Err("escape".into())
            } else {
                Ok(())
            }
        });
        assert!(scene.key(&KeyEvent::new(KeyCode::Char('a'))).is_ok());
        assert!(scene.key(&KeyEvent::new(KeyCode::Escape)).is_err());
    }
}
