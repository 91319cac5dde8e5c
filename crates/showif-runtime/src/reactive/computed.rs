#![forbid(unsafe_code)]

//! Memoized values derived from [`Observable`] sources.
//!
//! A [`Computed<T>`] caches the result of a compute function. A change in any
//! source marks it dirty; the next [`get()`](Computed::get) recomputes.
//!
//! # Invariants
//!
//! 1. `get()` never returns a value older than the last completed source
//!    mutation, provided the `Computed` subscribed before any subscriber that
//!    reads it (notification runs in registration order).
//! 2. The compute function runs at most once per dirty cycle.
//! 3. `version` increments by exactly 1 per recomputation.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use super::observable::{Observable, Subscription};

struct ComputedInner<T> {
    compute: Box<dyn Fn() -> T>,
    cached: Option<T>,
    dirty: Cell<bool>,
    version: u64,
    // Kept alive so the sources keep marking us dirty.
    _subscriptions: Vec<Subscription>,
}

/// A lazily evaluated, memoized value.
///
/// Cloning a `Computed` creates a new handle to the **same** cache.
pub struct Computed<T> {
    inner: Rc<RefCell<ComputedInner<T>>>,
}

impl<T> Clone for Computed<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Computed<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Computed")
            .field("cached", &inner.cached)
            .field("dirty", &inner.dirty.get())
            .field("version", &inner.version)
            .finish()
    }
}

impl<T: Clone + 'static> Computed<T> {
    fn with_compute(compute: Box<dyn Fn() -> T>) -> Rc<RefCell<ComputedInner<T>>> {
        Rc::new(RefCell::new(ComputedInner {
            compute,
            cached: None,
            dirty: Cell::new(true),
            version: 0,
            _subscriptions: Vec::new(),
        }))
    }

    fn watch<S: Clone + PartialEq + 'static>(
        inner: &Rc<RefCell<ComputedInner<T>>>,
        source: &Observable<S>,
    ) {
        let weak: Weak<RefCell<ComputedInner<T>>> = Rc::downgrade(inner);
        let sub = source.subscribe(move |_| {
            if let Some(strong) = weak.upgrade() {
                strong.borrow().dirty.set(true);
            }
        });
        inner.borrow_mut()._subscriptions.push(sub);
    }

    /// Derive a value from one observable.
    pub fn from_observable<S: Clone + PartialEq + 'static>(
        source: &Observable<S>,
        map: impl Fn(&S) -> T + 'static,
    ) -> Self {
        let source_clone = source.clone();
        let inner = Self::with_compute(Box::new(move || source_clone.with(|v| map(v))));
        Self::watch(&inner, source);
        Self { inner }
    }

    /// Derive a value from two observables.
    pub fn from2<S1, S2>(
        s1: &Observable<S1>,
        s2: &Observable<S2>,
        map: impl Fn(&S1, &S2) -> T + 'static,
    ) -> Self
    where
        S1: Clone + PartialEq + 'static,
        S2: Clone + PartialEq + 'static,
    {
        let s1_clone = s1.clone();
        let s2_clone = s2.clone();
        let inner = Self::with_compute(Box::new(move || {
            s1_clone.with(|v1| s2_clone.with(|v2| map(v1, v2)))
        }));
        Self::watch(&inner, s1);
        Self::watch(&inner, s2);
        Self { inner }
    }

    fn refresh(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.dirty.get() || inner.cached.is_none() {
            let value = (inner.compute)();
            inner.cached = Some(value);
            inner.dirty.set(false);
            inner.version += 1;
        }
    }

    /// Current value, recomputed first if any source changed.
    #[must_use]
    pub fn get(&self) -> T {
        self.with(T::clone)
    }

    /// Borrow the current value, recomputing first if dirty.
    ///
    /// # Panics
    ///
    /// Panics if `f` re-enters this `Computed`.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.refresh();
        let inner = self.inner.borrow();
        match inner.cached.as_ref() {
            Some(value) => f(value),
            None => unreachable!("refresh always fills the cache"),
        }
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.inner.borrow().dirty.get()
    }

    /// Force the next `get()` to recompute.
    pub fn invalidate(&self) {
        self.inner.borrow().dirty.set(true);
    }

    /// Number of recomputations so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }
}
