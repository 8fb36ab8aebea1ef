#![forbid(unsafe_code)]

//! Key/value selector whose width follows the selected key.

use std::rc::{Rc, Weak};

use stagekit_core::reactive::Observable;
use stagekit_core::{LayoutError, Result};

use crate::Displayer;
use crate::draw::Painter;
use crate::entity::Entity;
use crate::label::Label;

/// Cycles through labelled values on click.
///
/// The displayed key's width changes with the selection, so edge alignments
/// on the selector (and on anything aligned to it) re-pin on every change.
#[derive(Debug)]
pub struct Selector<V> {
    label: Label,
    keys: Vec<String>,
    values: Vec<V>,
    selected: Observable<usize>,
}

impl<V: Clone + 'static> Selector<V> {
    /// # Errors
    ///
    /// Returns [`LayoutError::LengthMismatch`] if `keys` and `values` differ
    /// in length.
    pub fn new(keys: Vec<String>, values: Vec<V>, advance: u32) -> Result<Rc<Self>> {
        if keys.len() != values.len() {
            return Err(LayoutError::LengthMismatch {
                keys: keys.len(),
                values: values.len(),
            });
        }
        let first = keys.first().cloned().unwrap_or_default();
        Ok(Rc::new_cyclic(|this: &Weak<Self>| {
            let label = Label::new(first, advance);
            let weak = this.clone();
            label.entity().on_click(move |_, _| {
                if let Some(selector) = weak.upgrade() {
                    selector.advance();
                }
            });
            Self {
                label,
                keys,
                values,
                selected: Observable::new(0),
            }
        }))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.selected.get()
    }

    #[must_use]
    pub fn selected_key(&self) -> Option<&str> {
        self.keys.get(self.selected.get()).map(String::as_str)
    }

    #[must_use]
    pub fn selected_value(&self) -> Option<V> {
        self.values.get(self.selected.get()).cloned()
    }

    /// Observable selection index.
    #[must_use]
    pub fn selection(&self) -> &Observable<usize> {
        &self.selected
    }

    /// Select `index`; out-of-range indices are ignored.
    pub fn select(&self, index: usize) -> bool {
        let Some(key) = self.keys.get(index) else {
            return false;
        };
        self.label.set_text(key.as_str());
        self.selected.set(index);
        true
    }

    /// Move to the next entry, wrapping around.
    pub fn advance(&self) {
        if !self.keys.is_empty() {
            self.select((self.selected.get() + 1) % self.keys.len());
        }
    }
}

impl<V> Displayer for Selector<V> {
    fn entity(&self) -> &Entity {
        self.label.entity()
    }

    fn draw_displayer(&self, painter: &mut Painter<'_>) {
        self.label.draw_displayer(painter);
    }

    fn initialize(&self) {
        self.label.initialize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stagekit_core::event::{MouseButton, PointerEvent, PointerKind};
    use stagekit_core::geometry::Point;
    use stagekit_layout::Coordinate;
    use std::cell::Cell;

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let err = Selector::new(keys(&["a", "b"]), vec![1], 8)
            .err()
            .expect("mismatch");
        assert_eq!(err, LayoutError::LengthMismatch { keys: 2, values: 1 });
    }

    #[test]
    fn click_cycles_and_width_follows_key() {
        let selector =
            Selector::new(keys(&["easy", "medium", "hard"]), vec![3, 4, 5], 10).expect("selector");
        selector.node().align_right_to(Coordinate::Absolute(200));
        assert_eq!(selector.node().width(), 40);
        assert_eq!(selector.selected_value(), Some(3));

        let fired = Rc::new(Cell::new(0));
        let f = Rc::clone(&fired);
        let _sub = selector.selection().subscribe(move |_| f.set(f.get() + 1));

        let click = PointerEvent::new(PointerKind::Click(MouseButton::Left), Point::default());
        assert!(selector.handle_pointer(&click));
        assert_eq!(selector.selected_key(), Some("medium"));
        assert_eq!(selector.node().width(), 60);
        assert_eq!(selector.node().right(), 200);

        selector.handle_pointer(&click);
        selector.handle_pointer(&click);
        assert_eq!(selector.selected_index(), 0);
        assert_eq!(fired.get(), 3);
    }

    #[test]
    fn out_of_range_select_is_ignored() {
        let selector = Selector::new(keys(&["on"]), vec![true], 8).expect("selector");
        assert!(!selector.select(4));
        assert_eq!(selector.selected_index(), 0);
    }
}
