#![forbid(unsafe_code)]

//! Access-gate host component.
//!
//! [`AccessGate`] owns one boolean flag and a `toggle()` command. It declares
//! two conditional views with complementary conditions:
//!
//! | branch  | condition | default text |
//! |---------|-----------|--------------|
//! | granted | `flag`    | [`GRANTED_TEXT`] |
//! | denied  | `!flag`   | [`DENIED_TEXT`] |
//!
//! The flag is a plain boolean; it carries no security meaning.
//!
//! # Invariants
//!
//! 1. Exactly one branch is attached whenever no `toggle()` is in progress.
//! 2. The two branches are never attached at the same time (detaches are
//!    applied before attaches, see [`BindingGroup`]).
//! 3. Each toggle makes exactly one detach and one attach.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use showif_core::{CommandId, Event, Fragment, FragmentId, RenderSurface};
use tracing::info;

use crate::binding::{BindingGroup, SettleReport};
use crate::directive::ConditionalView;
use crate::reactive::{Computed, Observable, Subscription};

pub const GRANTED_TEXT: &str = "You have access to privileged information.";
pub const DENIED_TEXT: &str = "Access denied. Please log in.";

pub const GRANTED_FRAGMENT: FragmentId = FragmentId::new(0);
pub const DENIED_FRAGMENT: FragmentId = FragmentId::new(1);

const GRANTED_INDEX: usize = 0;
const DENIED_INDEX: usize = 1;

/// Construction options for [`AccessGate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    pub granted_text: String,
    pub denied_text: String,
    pub initially_granted: bool,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            granted_text: GRANTED_TEXT.to_string(),
            denied_text: DENIED_TEXT.to_string(),
            initially_granted: false,
        }
    }
}

impl GateConfig {
    #[must_use]
    pub fn with_granted_text(mut self, text: impl Into<String>) -> Self {
        self.granted_text = text.into();
        self
    }

    #[must_use]
    pub fn with_denied_text(mut self, text: impl Into<String>) -> Self {
        self.denied_text = text.into();
        self
    }

    #[must_use]
    pub fn with_initially_granted(mut self, granted: bool) -> Self {
        self.initially_granted = granted;
        self
    }

    /// The two branch fragments: granted, then denied.
    #[must_use]
    pub fn fragments(&self) -> (Fragment, Fragment) {
        (
            Fragment::text(GRANTED_FRAGMENT, self.granted_text.clone()),
            Fragment::text(DENIED_FRAGMENT, self.denied_text.clone()),
        )
    }
}

/// Result of feeding an [`Event`] to the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// The event ran a command; carries what the settle pass did.
    Handled(SettleReport),
    /// The gate has nothing to do with this event.
    Ignored,
    /// The event asks the caller to stop.
    Quit,
}

/// Host component toggling between a granted and a denied fragment.
pub struct AccessGate<S> {
    flag: Observable<bool>,
    denied: Computed<bool>,
    bindings: Rc<RefCell<BindingGroup<S>>>,
    last_settle: Rc<Cell<SettleReport>>,
    toggles: u64,
    _sync: Subscription,
}

impl<S> std::fmt::Debug for AccessGate<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGate")
            .field("flag", &self.flag.get())
            .field("toggles", &self.toggles)
            .field("last_settle", &self.last_settle.get())
            .finish()
    }
}

impl<S: RenderSurface + 'static> AccessGate<S> {
    /// Build the gate over two surfaces and settle the initial state.
    pub fn new(config: GateConfig, granted_surface: S, denied_surface: S) -> Self {
        let flag = Observable::new(config.initially_granted);
        // Created before the sync subscription so it is dirtied first.
        let denied = Computed::from_observable(&flag, |granted| !granted);

        let (granted_fragment, denied_fragment) = config.fragments();
        let mut group = BindingGroup::new();
        let granted_flag = flag.clone();
        let granted_index = group.push(
            move || granted_flag.get(),
            ConditionalView::new(granted_fragment, granted_surface),
        );
        let denied_condition = denied.clone();
        let denied_index = group.push(
            move || denied_condition.get(),
            ConditionalView::new(denied_fragment, denied_surface),
        );
        debug_assert_eq!((granted_index, denied_index), (GRANTED_INDEX, DENIED_INDEX));

        let last_settle = Rc::new(Cell::new(group.settle()));
        let bindings = Rc::new(RefCell::new(group));

        let weak_bindings = Rc::downgrade(&bindings);
        let report_sink = Rc::clone(&last_settle);
        let sync = flag.subscribe(move |_| {
            if let Some(bindings) = weak_bindings.upgrade() {
                report_sink.set(bindings.borrow_mut().settle());
            }
        });

        Self {
            flag,
            denied,
            bindings,
            last_settle,
            toggles: 0,
            _sync: sync,
        }
    }

    /// Flip the flag and settle both views.
    pub fn toggle(&mut self) -> SettleReport {
        self.flag.update(|granted| *granted = !*granted);
        self.toggles += 1;
        let report = self.last_settle.get();
        info!(
            granted = self.flag.get(),
            toggles = self.toggles,
            attached = report.attached,
            detached = report.detached,
            "toggle"
        );
        report
    }

    /// Route an input event to the matching command.
    pub fn on_event(&mut self, event: &Event) -> EventOutcome {
        match event {
            Event::Click(CommandId::Toggle) => EventOutcome::Handled(self.toggle()),
            Event::Quit => EventOutcome::Quit,
            Event::Tick => EventOutcome::Ignored,
        }
    }

    #[must_use]
    pub fn is_granted(&self) -> bool {
        self.flag.get()
    }

    /// Condition of the denied branch (`!flag`).
    #[must_use]
    pub fn is_denied(&self) -> bool {
        self.denied.get()
    }

    /// A handle to the flag, for observers outside the gate.
    #[must_use]
    pub fn flag(&self) -> &Observable<bool> {
        &self.flag
    }

    #[must_use]
    pub fn granted_attached(&self) -> bool {
        self.attached(GRANTED_INDEX)
    }

    #[must_use]
    pub fn denied_attached(&self) -> bool {
        self.attached(DENIED_INDEX)
    }

    /// The fragment currently attached, if exactly one is.
    #[must_use]
    pub fn visible_fragment(&self) -> Option<FragmentId> {
        match (self.granted_attached(), self.denied_attached()) {
            (true, false) => Some(GRANTED_FRAGMENT),
            (false, true) => Some(DENIED_FRAGMENT),
            _ => None,
        }
    }

    #[must_use]
    pub fn toggle_count(&self) -> u64 {
        self.toggles
    }

    /// What the most recent settle pass did.
    #[must_use]
    pub fn last_settle(&self) -> SettleReport {
        self.last_settle.get()
    }

    fn attached(&self, index: usize) -> bool {
        self.bindings
            .borrow()
            .view(index)
            .is_some_and(ConditionalView::is_attached)
    }
}
