#![forbid(unsafe_code)]

//! Keyed, version-tracked observable cells.
//!
//! # Design
//!
//! [`Observable<T>`] wraps its value, a version counter, and an ordered list
//! of listeners in shared, reference-counted storage. Cloning a handle shares
//! the cell. Listeners are plain `Fn()` callbacks registered under a
//! [`ListenerKey`]; they read whatever they need from the cells they close
//! over.
//!
//! # Reentrancy
//!
//! `set` stores the new value and releases the borrow before any listener
//! runs. Listeners may read this cell, write other cells, or write this cell
//! again (which starts a nested, fully drained notification pass). The
//! outer pass resumes afterwards with the listeners that are still
//! registered.
//!
//! # Failure Modes
//!
//! - **Listener cycle**: two cells whose listeners keep writing each other
//!   different values recurse without bound. The alignment engine rejects
//!   such graphs before they are built; arbitrary user listeners are not
//!   checked.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::id::ListenerKey;

type Callback = Rc<dyn Fn()>;

struct Listener {
    key: ListenerKey,
    /// Registration serial, so a replaced callback is told apart from the
    /// one it replaced.
    serial: u64,
    callback: Callback,
}

struct ObservableInner<T> {
    value: T,
    version: u64,
    next_serial: u64,
    listeners: Vec<Listener>,
}

/// A shared value cell that notifies keyed listeners when it changes.
///
/// # Invariants
///
/// 1. Listeners run only when the stored value actually changes.
/// 2. Each listener runs at most once per `set`.
/// 3. Registration order is notification order; replacing a key keeps its
///    original position.
pub struct Observable<T> {
    inner: Rc<RefCell<ObservableInner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Create a cell holding `value`, with no listeners.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ObservableInner {
                value,
                version: 0,
                next_serial: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Current value (cloned).
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Borrow the current value.
    ///
    /// Do not call `set` on this cell from inside `f`.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Store `value` and notify listeners if it differs from the current one.
    pub fn set(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return;
            }
            inner.value = value;
            inner.version += 1;
        }
        self.notify();
    }

    /// Mutate the value in place, notifying only if the result differs.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let mut next = self.get();
        f(&mut next);
        self.set(next);
    }

    /// Number of effective changes since creation.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Register `callback` under `key`.
    ///
    /// An existing registration with the same key is replaced in place.
    pub fn add_listener(&self, key: ListenerKey, callback: impl Fn() + 'static) {
        let mut inner = self.inner.borrow_mut();
        let serial = inner.next_serial;
        inner.next_serial += 1;
        let callback: Callback = Rc::new(callback);
        if let Some(existing) = inner.listeners.iter_mut().find(|l| l.key == key) {
            existing.serial = serial;
            existing.callback = callback;
        } else {
            inner.listeners.push(Listener {
                key,
                serial,
                callback,
            });
        }
    }

    /// Remove the listener registered under `key`. Returns `true` if found.
    pub fn remove_listener(&self, key: ListenerKey) -> bool {
        let mut inner = self.inner.borrow_mut();
        let len_before = inner.listeners.len();
        inner.listeners.retain(|l| l.key != key);
        inner.listeners.len() < len_before
    }

    #[must_use]
    pub fn has_listener(&self, key: ListenerKey) -> bool {
        self.inner.borrow().listeners.iter().any(|l| l.key == key)
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Register a value-receiving callback under a fresh key.
    ///
    /// The listener stays registered until the returned guard is dropped.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let key = ListenerKey::unique("subscription");
        let weak = Rc::downgrade(&self.inner);
        self.add_listener(key, move || {
            let Some(strong) = weak.upgrade() else {
                return;
            };
            let value = strong.borrow().value.clone();
            callback(&value);
        });

        let weak = Rc::downgrade(&self.inner);
        Subscription {
            key,
            detach: Some(Box::new(move |key| {
                if let Some(strong) = weak.upgrade() {
                    strong.borrow_mut().listeners.retain(|l| l.key != key);
                }
            })),
        }
    }

    /// Non-owning handle to this cell.
    #[must_use]
    pub fn downgrade(&self) -> WeakObservable<T> {
        WeakObservable {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Whether both handles share the same cell.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn notify(&self) {
        let pending: Vec<(ListenerKey, u64, Callback)> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|l| (l.key, l.serial, Rc::clone(&l.callback)))
            .collect();

        for (key, serial, callback) in pending {
            let still_registered = self
                .inner
                .borrow()
                .listeners
                .iter()
                .any(|l| l.key == key && l.serial == serial);
            if still_registered {
                callback();
            }
        }
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Non-owning handle to an [`Observable`].
pub struct WeakObservable<T> {
    inner: Weak<RefCell<ObservableInner<T>>>,
}

impl<T> Clone for WeakObservable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for WeakObservable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakObservable")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> WeakObservable<T> {
    /// Strong handle, if the cell is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<Observable<T>> {
        self.inner.upgrade().map(|inner| Observable { inner })
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

/// RAII guard returned by [`Observable::subscribe`].
///
/// Dropping it removes the listener. Dropping after the observable itself is
/// gone is a no-op.
pub struct Subscription {
    key: ListenerKey,
    detach: Option<Box<dyn FnOnce(ListenerKey)>>,
}

impl Subscription {
    #[must_use]
    pub fn key(&self) -> ListenerKey {
        self.key
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("key", &self.key).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach(self.key);
        }
    }
}
