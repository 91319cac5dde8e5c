#![forbid(unsafe_code)]

//! Conditional view directive.
//!
//! A [`ConditionalView`] ties one [`Fragment`] to one [`RenderSurface`] and
//! keeps the fragment attached exactly while its condition is `true`.
//!
//! # State machine
//!
//! ```text
//!            set_condition(true) / attach
//!   Detached ───────────────────────────▶ Attached
//!      ▲                                     │
//!      └──────────────────────────────────────┘
//!            set_condition(false) / detach
//! ```
//!
//! Every other assignment is a self-loop with no surface call.
//!
//! # Invariants
//!
//! 1. `is_attached()` is true iff the fragment was attached and not yet
//!    detached.
//! 2. Each assignment makes at most one surface call.
//! 3. Redundant assignments make no surface call.
//!
//! # Example
//!
//! ```
//! use showif_core::{Fragment, FragmentId};
//! use showif_runtime::directive::{ConditionalView, Transition};
//!
//! let fragment = Fragment::text(FragmentId::new(0), "hello");
//! let mut view = ConditionalView::new(fragment, Vec::<Fragment>::new());
//!
//! assert_eq!(view.set_condition(true), Transition::Attached);
//! assert_eq!(view.set_condition(true), Transition::Unchanged);
//! assert_eq!(view.surface().len(), 1);
//! assert_eq!(view.set_condition(false), Transition::Detached);
//! assert!(view.surface().is_empty());
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use showif_core::{Fragment, RenderSurface};
use tracing::{debug, trace};

use crate::reactive::{Observable, Subscription};

/// Attachment state of a [`ConditionalView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewState {
    #[default]
    Detached,
    Attached,
}

impl ViewState {
    #[must_use]
    pub const fn is_attached(self) -> bool {
        matches!(self, Self::Attached)
    }
}

/// What one condition assignment did to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// The fragment was attached.
    Attached,
    /// The surface was cleared.
    Detached,
    /// No surface call was made.
    Unchanged,
}

impl Transition {
    #[must_use]
    pub const fn is_change(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Shows a fragment on a surface while a boolean condition holds.
#[derive(Debug)]
pub struct ConditionalView<S> {
    fragment: Fragment,
    surface: S,
    attached: bool,
}

impl<S: RenderSurface> ConditionalView<S> {
    /// Create a detached view. The surface is not touched.
    #[must_use]
    pub fn new(fragment: Fragment, surface: S) -> Self {
        Self {
            fragment,
            surface,
            attached: false,
        }
    }

    /// Apply a new condition value.
    pub fn set_condition(&mut self, condition: bool) -> Transition {
        match (condition, self.attached) {
            (true, false) => {
                self.surface.attach(&self.fragment);
                self.attached = true;
                debug!(fragment = %self.fragment.id(), "attach");
                Transition::Attached
            }
            (false, true) => {
                self.surface.detach();
                self.attached = false;
                debug!(fragment = %self.fragment.id(), "detach");
                Transition::Detached
            }
            _ => {
                trace!(fragment = %self.fragment.id(), condition, "unchanged");
                Transition::Unchanged
            }
        }
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    #[must_use]
    pub fn state(&self) -> ViewState {
        if self.attached {
            ViewState::Attached
        } else {
            ViewState::Detached
        }
    }

    #[must_use]
    pub fn fragment(&self) -> &Fragment {
        &self.fragment
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface.
    ///
    /// Attaching or detaching through this handle bypasses the view's
    /// bookkeeping.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Consume the view and hand the surface back. Attached content stays.
    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }
}

impl<S: RenderSurface + 'static> ConditionalView<S> {
    /// Drive a shared view from an observable condition.
    ///
    /// The current value is applied immediately, then every change is
    /// applied as it happens. Dropping the returned guard stops updates; the
    /// view keeps its last state.
    #[must_use = "dropping the Subscription unbinds the view"]
    pub fn bind(view: &Rc<RefCell<Self>>, condition: &Observable<bool>) -> Subscription {
        view.borrow_mut().set_condition(condition.get());
        let weak = Rc::downgrade(view);
        condition.subscribe(move |value| {
            if let Some(view) = weak.upgrade() {
                view.borrow_mut().set_condition(*value);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showif_core::FragmentId;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing::Level;
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    #[derive(Debug, Default)]
    struct CountingSurface {
        attaches: usize,
        detaches: usize,
        rows: usize,
    }

    impl RenderSurface for CountingSurface {
        fn attach(&mut self, fragment: &Fragment) {
            self.attaches += 1;
            self.rows += fragment.height();
        }

        fn detach(&mut self) {
            self.detaches += 1;
            self.rows = 0;
        }

        fn is_empty(&self) -> bool {
            self.rows == 0
        }
    }

    fn view() -> ConditionalView<CountingSurface> {
        ConditionalView::new(
            Fragment::text(FragmentId::new(0), "secret"),
            CountingSurface::default(),
        )
    }

    #[test]
    fn starts_detached_without_touching_surface() {
        let v = view();
        assert_eq!(v.state(), ViewState::Detached);
        assert_eq!(v.surface().attaches, 0);
        assert_eq!(v.surface().detaches, 0);
    }

    #[test]
    fn false_while_detached_is_noop() {
        let mut v = view();
        assert_eq!(v.set_condition(false), Transition::Unchanged);
        assert_eq!(v.surface().detaches, 0);
    }

    #[test]
    fn attach_then_detach() {
        let mut v = view();
        assert_eq!(v.set_condition(true), Transition::Attached);
        assert!(v.is_attached());
        assert!(!v.surface().is_empty());

        assert_eq!(v.set_condition(false), Transition::Detached);
        assert!(!v.is_attached());
        assert!(v.surface().is_empty());
        assert_eq!((v.surface().attaches, v.surface().detaches), (1, 1));
    }

    #[test]
    fn repeated_true_attaches_once() {
        let mut v = view();
        for _ in 0..5 {
            v.set_condition(true);
        }
        assert_eq!(v.surface().attaches, 1);
        assert_eq!(v.surface().rows, 1);
    }

    #[test]
    fn into_surface_keeps_content() {
        let mut v = view();
        v.set_condition(true);
        let surface = v.into_surface();
        assert_eq!(surface.rows, 1);
    }

    #[test]
    fn bind_applies_current_value_and_changes() {
        let flag = Observable::new(true);
        let shared = Rc::new(RefCell::new(view()));
        let sub = ConditionalView::bind(&shared, &flag);
        assert!(shared.borrow().is_attached());

        flag.set(false);
        assert!(!shared.borrow().is_attached());
        flag.set(true);
        assert!(shared.borrow().is_attached());

        drop(sub);
        flag.set(false);
        assert!(shared.borrow().is_attached());
        assert_eq!(shared.borrow().surface().attaches, 2);
    }

    struct DebugCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for DebugCounter {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == Level::DEBUG {
                self.0.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    #[test]
    fn logs_one_debug_event_per_transition() {
        let count = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(DebugCounter(Arc::clone(&count)));

        tracing::subscriber::with_default(subscriber, || {
            let mut v = view();
            v.set_condition(true);
            v.set_condition(true);
            v.set_condition(false);
            v.set_condition(false);
        });

        assert_eq!(count.load(Ordering::Relaxed), 2);
    }
}
