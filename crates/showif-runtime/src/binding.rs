#![forbid(unsafe_code)]

//! Transactional evaluation of several conditional views.
//!
//! Views placed in one [`BindingGroup`] are re-evaluated together by
//! [`settle()`](BindingGroup::settle): every condition is read first, then
//! every detach is applied, then every attach. Views with complementary
//! conditions are therefore never attached at the same time, and exactly one
//! of them is attached when `settle()` returns.

use showif_core::RenderSurface;
use tracing::debug_span;

use crate::directive::{ConditionalView, Transition};

/// Counts of the surface calls made by one [`BindingGroup::settle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SettleReport {
    pub attached: usize,
    pub detached: usize,
    pub unchanged: usize,
}

impl SettleReport {
    /// Whether any surface call was made.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.attached + self.detached > 0
    }

    fn record(&mut self, transition: Transition) {
        match transition {
            Transition::Attached => self.attached += 1,
            Transition::Detached => self.detached += 1,
            Transition::Unchanged => self.unchanged += 1,
        }
    }
}

struct Binding<S> {
    condition: Box<dyn Fn() -> bool>,
    view: ConditionalView<S>,
}

/// Conditional views that settle as one unit.
pub struct BindingGroup<S> {
    bindings: Vec<Binding<S>>,
}

impl<S> Default for BindingGroup<S> {
    fn default() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }
}

impl<S> std::fmt::Debug for BindingGroup<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingGroup")
            .field("bindings", &self.bindings.len())
            .finish()
    }
}

impl<S: RenderSurface> BindingGroup<S> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a view driven by `condition`. Returns its index.
    ///
    /// The view is not evaluated until the next [`settle()`](Self::settle).
    pub fn push(
        &mut self,
        condition: impl Fn() -> bool + 'static,
        view: ConditionalView<S>,
    ) -> usize {
        self.bindings.push(Binding {
            condition: Box::new(condition),
            view,
        });
        self.bindings.len() - 1
    }

    /// Re-evaluate every condition and apply the result, detaches first.
    pub fn settle(&mut self) -> SettleReport {
        let span = debug_span!("settle", bindings = self.bindings.len());
        let _guard = span.enter();

        let wanted: Vec<bool> = self.bindings.iter().map(|b| (b.condition)()).collect();
        let mut report = SettleReport::default();

        for (binding, _) in self.bindings.iter_mut().zip(&wanted).filter(|(_, w)| !**w) {
            report.record(binding.view.set_condition(false));
        }
        for (binding, _) in self.bindings.iter_mut().zip(&wanted).filter(|(_, w)| **w) {
            report.record(binding.view.set_condition(true));
        }
        report
    }

    #[must_use]
    pub fn view(&self, index: usize) -> Option<&ConditionalView<S>> {
        self.bindings.get(index).map(|b| &b.view)
    }

    /// Views in insertion order.
    pub fn views(&self) -> impl Iterator<Item = &ConditionalView<S>> {
        self.bindings.iter().map(|b| &b.view)
    }

    /// Number of views currently attached.
    #[must_use]
    pub fn attached_count(&self) -> usize {
        self.views().filter(|v| v.is_attached()).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
