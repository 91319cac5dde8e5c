#![forbid(unsafe_code)]

//! Inert template fragments.
//!
//! A [`Fragment`] is a reusable description of some output lines. Directives
//! ask a [`RenderSurface`](crate::RenderSurface) to attach or detach it but
//! never mutate it. Cloning shares the line storage.

use std::fmt;
use std::sync::Arc;

/// Stable identifier for a fragment within one view description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FragmentId(pub u32);

impl FragmentId {
    /// Create a fragment ID from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for FragmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fragment#{}", self.0)
    }
}

/// An immutable template: an id plus the ordered lines it renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    id: FragmentId,
    lines: Arc<[String]>,
}

impl Fragment {
    /// Build a fragment from any iterator of lines.
    #[must_use]
    pub fn new<I, S>(id: FragmentId, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id,
            lines: lines.into_iter().map(Into::<String>::into).collect(),
        }
    }

    /// Single-line fragment, the common case for text payloads.
    #[must_use]
    pub fn text(id: FragmentId, text: impl Into<String>) -> Self {
        let text: String = text.into();
        Self::new(id, [text])
    }

    #[must_use]
    pub fn id(&self) -> FragmentId {
        self.id
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of rows this fragment occupies when attached.
    #[must_use]
    pub fn height(&self) -> usize {
        self.lines.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_fragment_has_one_line() {
        let frag = Fragment::text(FragmentId::new(3), "hello");
        assert_eq!(frag.id().raw(), 3);
        assert_eq!(frag.lines(), ["hello".to_string()]);
        assert_eq!(frag.height(), 1);
    }

    #[test]
    fn clone_shares_lines() {
        let frag = Fragment::new(FragmentId::new(1), ["a", "b"]);
        let copy = frag.clone();
        assert!(Arc::ptr_eq(&frag.lines, &copy.lines));
        assert_eq!(copy, frag);
    }

    #[test]
    fn display_id() {
        assert_eq!(FragmentId::new(7).to_string(), "fragment#7");
    }
}
