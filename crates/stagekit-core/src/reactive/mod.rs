#![forbid(unsafe_code)]

//! Reactive value cells for the layout engine.
//!
//! - [`Observable`]: a shared, version-tracked value with keyed change
//!   listeners.
//! - [`WeakObservable`]: non-owning handle, used for every link that must not
//!   keep its source alive (entity→container, entity→aligned-to entity).
//! - [`Subscription`]: RAII guard that removes its listener on drop.
//!
//! # Architecture
//!
//! `Observable<T>` uses `Rc<RefCell<..>>` for single-threaded shared ownership.
//! Listeners are stored in registration order under an explicit
//! [`ListenerKey`](crate::ListenerKey).
//!
//! # Invariants
//!
//! 1. Version increments exactly once per mutation that changes the value.
//! 2. Listeners are notified in registration order, synchronously, on the
//!    caller's thread.
//! 3. Setting a value equal to the current value is a no-op (no version bump,
//!    no notifications).
//! 4. The new value is stored before any listener runs, so reentrant reads
//!    always see it.
//! 5. A listener removed during a notification pass is not invoked later in
//!    that pass.

pub mod observable;

pub use observable::{Observable, Subscription, WeakObservable};
