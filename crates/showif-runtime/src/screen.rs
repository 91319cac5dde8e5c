#![forbid(unsafe_code)]

//! Line-oriented text screen built from ordered slots.
//!
//! Each slot handed out by [`Screen::add_slot`] is a [`RenderSurface`]. The
//! screen's output is the attached fragments of every slot, top to bottom in
//! slot order.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use showif_core::{Fragment, FragmentId, RenderSurface};

#[derive(Debug, Default)]
struct ScreenInner {
    slots: Vec<Vec<Fragment>>,
}

/// A text screen. Cloning shares the same slots.
#[derive(Debug, Clone, Default)]
pub struct Screen {
    inner: Rc<RefCell<ScreenInner>>,
}

impl Screen {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an empty slot below the existing ones.
    #[must_use]
    pub fn add_slot(&self) -> SlotSurface {
        let mut inner = self.inner.borrow_mut();
        inner.slots.push(Vec::new());
        SlotSurface {
            screen: Rc::clone(&self.inner),
            index: inner.slots.len() - 1,
        }
    }

    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.inner.borrow().slots.len()
    }

    /// Ids of attached fragments in display order.
    #[must_use]
    pub fn attached_ids(&self) -> Vec<FragmentId> {
        self.inner
            .borrow()
            .slots
            .iter()
            .flatten()
            .map(Fragment::id)
            .collect()
    }

    /// Visible lines in display order.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.inner
            .borrow()
            .slots
            .iter()
            .flatten()
            .flat_map(|frag| frag.lines().iter().cloned())
            .collect()
    }

    /// Write every visible line, newline-terminated.
    pub fn render_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for line in self.lines() {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }
}

/// One slot of a [`Screen`].
#[derive(Debug)]
pub struct SlotSurface {
    screen: Rc<RefCell<ScreenInner>>,
    index: usize,
}

impl SlotSurface {
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl RenderSurface for SlotSurface {
    fn attach(&mut self, fragment: &Fragment) {
        self.screen.borrow_mut().slots[self.index].push(fragment.clone());
    }

    fn detach(&mut self) {
        self.screen.borrow_mut().slots[self.index].clear();
    }

    fn is_empty(&self) -> bool {
        self.screen.borrow().slots[self.index].is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_render_in_order() {
        let screen = Screen::new();
        let mut top = screen.add_slot();
        let mut bottom = screen.add_slot();

        bottom.attach(&Fragment::text(FragmentId::new(1), "second"));
        top.attach(&Fragment::new(FragmentId::new(0), ["first", "line two"]));

        assert_eq!(screen.lines(), vec!["first", "line two", "second"]);
        assert_eq!(
            screen.attached_ids(),
            vec![FragmentId::new(0), FragmentId::new(1)]
        );
    }

    #[test]
    fn detach_clears_only_its_slot() {
        let screen = Screen::new();
        let mut a = screen.add_slot();
        let mut b = screen.add_slot();
        a.attach(&Fragment::text(FragmentId::new(0), "a"));
        b.attach(&Fragment::text(FragmentId::new(1), "b"));

        a.detach();
        assert!(a.is_empty());
        assert!(!b.is_empty());
        assert_eq!(screen.lines(), vec!["b"]);
    }

    #[test]
    fn render_to_writes_lines() {
        let screen = Screen::new();
        let mut slot = screen.add_slot();
        slot.attach(&Fragment::text(FragmentId::new(0), "hi"));

        let mut out = Vec::new();
        screen.render_to(&mut out).unwrap();
        assert_eq!(out, b"hi\n");
    }

    #[test]
    fn empty_screen_has_no_lines() {
        let screen = Screen::new();
        let _slot = screen.add_slot();
        assert_eq!(screen.slot_count(), 1);
        assert!(screen.lines().is_empty());
    }
}
