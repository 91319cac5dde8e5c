#![forbid(unsafe_code)]

//! Reactive state for showif.
//!
//! - [`Observable`]: shared, version-tracked value that notifies subscribers
//!   when it changes.
//! - [`Subscription`]: RAII guard; dropping it unsubscribes.
//! - [`Computed`]: memoized value derived from one or more observables.
//!
//! # Architecture
//!
//! Everything here is single-threaded (`Rc<RefCell<..>>`). Subscribers are
//! held weakly by the observable and strongly by their [`Subscription`], so
//! a dropped guard is skipped and pruned on the next notification.
//!
//! # Invariants
//!
//! 1. Version increments exactly once per mutation that changes the value.
//! 2. Subscribers are notified in registration order.
//! 3. Setting a value equal to the current one is a no-op (no version bump,
//!    no notifications).
//! 4. Subscribers run after the observable's borrow is released, so they may
//!    read it (or any [`Computed`] derived from it).

pub mod computed;
pub mod observable;

pub use computed::Computed;
pub use observable::{Observable, Subscription};
