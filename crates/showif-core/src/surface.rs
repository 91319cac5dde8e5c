#![forbid(unsafe_code)]

//! Render surface contract.
//!
//! A [`RenderSurface`] is an ordered insertion point in some visible output.
//! It owns whatever is currently attached; callers only ask it to attach a
//! fragment or to detach everything.
//!
//! # Invariants
//!
//! 1. `attach` appends the fragment after anything already attached.
//! 2. `detach` clears the surface completely.
//! 3. Neither operation can fail; structural problems belong to the
//!    surface owner.

use crate::fragment::Fragment;

/// An insertion point that fragments can be attached to and detached from.
pub trait RenderSurface {
    /// Attach `fragment` at the end of this surface.
    fn attach(&mut self, fragment: &Fragment);

    /// Detach every fragment from this surface.
    fn detach(&mut self);

    /// Whether nothing is currently attached.
    ///
    /// Surfaces that cannot answer cheaply may keep the default, which
    /// reports `false`.
    fn is_empty(&self) -> bool {
        false
    }
}

impl<S: RenderSurface + ?Sized> RenderSurface for Box<S> {
    fn attach(&mut self, fragment: &Fragment) {
        (**self).attach(fragment);
    }

    fn detach(&mut self) {
        (**self).detach();
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }
}

impl<S: RenderSurface + ?Sized> RenderSurface for &mut S {
    fn attach(&mut self, fragment: &Fragment) {
        (**self).attach(fragment);
    }

    fn detach(&mut self) {
        (**self).detach();
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }
}

/// Plain in-memory surface: the attached fragments, in order.
impl RenderSurface for Vec<Fragment> {
    fn attach(&mut self, fragment: &Fragment) {
        self.push(fragment.clone());
    }

    fn detach(&mut self) {
        self.clear();
    }

    fn is_empty(&self) -> bool {
        Vec::is_empty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::FragmentId;

    #[test]
    fn vec_surface_attach_appends() {
        let mut surface: Vec<Fragment> = Vec::new();
        assert!(RenderSurface::is_empty(&surface));
        surface.attach(&Fragment::text(FragmentId::new(0), "a"));
        surface.attach(&Fragment::text(FragmentId::new(1), "b"));
        let ids: Vec<u32> = surface.iter().map(|f| f.id().raw()).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn vec_surface_detach_clears_all() {
        let mut surface = vec![
            Fragment::text(FragmentId::new(0), "a"),
            Fragment::text(FragmentId::new(1), "b"),
        ];
        surface.detach();
        assert!(RenderSurface::is_empty(&surface));
    }

    #[test]
    fn boxed_surface_forwards() {
        let mut boxed: Box<dyn RenderSurface> = Box::new(Vec::<Fragment>::new());
        boxed.attach(&Fragment::text(FragmentId::new(2), "x"));
        assert!(!boxed.is_empty());
        boxed.detach();
        assert!(boxed.is_empty());
    }
}
