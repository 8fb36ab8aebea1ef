//! Property-based invariant tests for observable cells.
//!
//! 1. A listener fires iff the newly set value differs from the prior value.
//! 2. The version counter equals the number of effective changes.
//! 3. Replacing a listener key never duplicates notifications.

use std::cell::Cell;
use std::rc::Rc;

use proptest::prelude::*;
use stagekit_core::ListenerKey;
use stagekit_core::reactive::Observable;

proptest! {
    #[test]
    fn listener_fires_iff_value_changes(
        initial in -5i32..=5,
        writes in proptest::collection::vec(-5i32..=5, 0..64),
    ) {
        let obs = Observable::new(initial);
        let fired = Rc::new(Cell::new(0u64));
        let f = Rc::clone(&fired);
        obs.add_listener(ListenerKey::unique("count"), move || f.set(f.get() + 1));

        let mut prior = initial;
        let mut expected = 0u64;
        for value in writes {
            let before = fired.get();
            obs.set(value);
            let delta = fired.get() - before;
            if value != prior {
                prop_assert_eq!(delta, 1);
                expected += 1;
            } else {
                prop_assert_eq!(delta, 0);
            }
            prior = value;
        }
        prop_assert_eq!(fired.get(), expected);
        prop_assert_eq!(obs.version(), expected);
    }

    #[test]
    fn replaced_keys_fire_once(replacements in 1usize..16, value in 1i32..100) {
        let obs = Observable::new(0);
        let key = ListenerKey::unique("replaced");
        let fired = Rc::new(Cell::new(0u32));
        for _ in 0..replacements {
            let f = Rc::clone(&fired);
            obs.add_listener(key, move || f.set(f.get() + 1));
        }
        obs.set(value);
        prop_assert_eq!(obs.listener_count(), 1);
        prop_assert_eq!(fired.get(), 1);
    }
}
