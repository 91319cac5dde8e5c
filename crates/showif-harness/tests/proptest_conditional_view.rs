//! Property-based invariant tests for `ConditionalView`.
//!
//! 1. Attachment state equals the last assigned condition
//! 2. Attach count equals the number of false→true edges
//! 3. Detach count equals the number of true→false edges
//! 4. Surface emptiness always mirrors the attachment state
//! 5. Each assignment makes at most one surface call

use proptest::prelude::*;
use showif_core::{Fragment, FragmentId, RenderSurface};
use showif_harness::SurfaceLog;
use showif_runtime::{ConditionalView, Transition};

// ── Helpers ──────────────────────────────────────────────────────────

fn edges(conditions: &[bool]) -> (usize, usize) {
    let mut prev = false;
    let mut rises = 0;
    let mut falls = 0;
    for &c in conditions {
        match (prev, c) {
            (false, true) => rises += 1,
            (true, false) => falls += 1,
            _ => {}
        }
        prev = c;
    }
    (rises, falls)
}

fn arb_conditions() -> impl Strategy<Value = Vec<bool>> {
    proptest::collection::vec(any::<bool>(), 0..=64)
}

// ═════════════════════════════════════════════════════════════════════════
// 1-3. Final state and call counts
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn final_state_and_counts(conditions in arb_conditions()) {
        let log = SurfaceLog::new();
        let mut view = ConditionalView::new(
            Fragment::text(FragmentId::new(0), "payload"),
            log.surface("s"),
        );
        for &c in &conditions {
            view.set_condition(c);
        }

        let last = conditions.last().copied().unwrap_or(false);
        prop_assert_eq!(view.is_attached(), last);

        let (rises, falls) = edges(&conditions);
        prop_assert_eq!(log.attach_count("s"), rises);
        prop_assert_eq!(log.detach_count("s"), falls);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4-5. Per-step surface consistency
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn every_step_is_consistent(conditions in arb_conditions()) {
        let log = SurfaceLog::new();
        let mut view = ConditionalView::new(
            Fragment::text(FragmentId::new(0), "payload"),
            log.surface("s"),
        );
        for &c in &conditions {
            let before = log.len();
            let transition = view.set_condition(c);
            let calls = log.len() - before;

            prop_assert_eq!(calls, usize::from(transition.is_change()));
            prop_assert_eq!(view.surface().is_empty(), !view.is_attached());
            prop_assert!(view.surface().attached().len() <= 1);
            if transition == Transition::Attached {
                prop_assert!(c);
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// Idempotence: repeating the last value changes nothing
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn repeated_assignment_is_idempotent(
        conditions in arb_conditions(),
        repeats in 1usize..8,
    ) {
        let log = SurfaceLog::new();
        let mut view = ConditionalView::new(
            Fragment::text(FragmentId::new(0), "payload"),
            log.surface("s"),
        );
        for &c in &conditions {
            view.set_condition(c);
        }
        let settled = log.len();
        let value = view.is_attached();

        for _ in 0..repeats {
            prop_assert_eq!(view.set_condition(value), Transition::Unchanged);
        }
        prop_assert_eq!(log.len(), settled);
    }
}
