//! Axis-aligned bounding boxes
//!
//! Every entity and the playing field itself is an integer AABB. Overlap is
//! tested with the Minkowski difference: `A - B` contains the origin exactly
//! when `A` and `B` overlap.

use std::ops::Sub;

use glam::IVec2;

/// An edge of an AABB
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    None,
    Left,
    Top,
    Right,
    Bottom,
}

/// Integer axis-aligned box; `(x, y)` is the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    /// Negative sizes are clamped to zero.
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            x,
            y,
            w: if w < 0 { 0 } else { w },
            h: if h < 0 { 0 } else { h },
        }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Top-left corner
    pub fn position(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    pub fn center(&self) -> IVec2 {
        IVec2::new(self.x + self.w / 2, self.y + self.h / 2)
    }

    /// `self - other`, the box of all offsets `a - b` between the two boxes
    pub fn minkowski_difference(&self, other: &Rect) -> Rect {
        Rect {
            x: self.x - (other.x + other.w),
            y: self.y - (other.y + other.h),
            w: self.w + other.w,
            h: self.h + other.h,
        }
    }

    /// Strict containment: points on the boundary are outside.
    pub fn has_point(&self, x: i32, y: i32) -> bool {
        x > self.x && x < self.x + self.w && y > self.y && y < self.y + self.h
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.minkowski_difference(other).has_point(0, 0)
    }

    /// Edge of `self` most overlapped by `other`, `Edge::None` without overlap.
    ///
    /// Picks the smallest of the four origin offsets inside the Minkowski
    /// difference. This is a closest-edge estimate, not a penetration depth.
    /// Ties resolve in the order left, right, top, bottom.
    pub fn intersecting_edge(&self, other: &Rect) -> Edge {
        let d = self.minkowski_difference(other);
        if !d.has_point(0, 0) {
            return Edge::None;
        }

        let candidates = [
            (d.x.abs(), Edge::Left),
            ((d.x + d.w).abs(), Edge::Right),
            (d.y.abs(), Edge::Top),
            ((d.y + d.h).abs(), Edge::Bottom),
        ];

        let mut best = candidates[0];
        for candidate in &candidates[1..] {
            if candidate.0 < best.0 {
                best = *candidate;
            }
        }
        best.1
    }
}

impl Sub for Rect {
    type Output = Rect;

    fn sub(self, rhs: Rect) -> Rect {
        self.minkowski_difference(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_has_point_is_strict() {
        let rect = Rect::new(0, 0, 10, 10);
        assert!(!rect.has_point(0, 0));
        assert!(rect.has_point(5, 5));
        assert!(!rect.has_point(10, 10));
        assert!(!rect.has_point(0, 5));
        assert!(!rect.has_point(5, 10));
    }

    #[test]
    fn test_minkowski_difference_layout() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert_eq!(a - b, Rect::new(-15, -15, 20, 20));
    }

    #[test]
    fn test_overlap() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(a.overlaps(&Rect::new(5, 5, 10, 10)));
        assert!(!a.overlaps(&Rect::new(20, 20, 10, 10)));
        // Touching edges do not overlap
        assert!(!a.overlaps(&Rect::new(10, 0, 10, 10)));
    }

    #[test]
    fn test_negative_size_clamped() {
        let r = Rect::new(3, 4, -2, -9);
        assert_eq!((r.w, r.h), (0, 0));
    }

    #[test]
    fn test_intersecting_edge() {
        let paddle = Rect::new(0, 0, 10, 100);

        // Poking in from the left side
        assert_eq!(paddle.intersecting_edge(&Rect::new(-8, 40, 10, 10)), Edge::Left);
        // Poking in from the right side
        assert_eq!(paddle.intersecting_edge(&Rect::new(8, 40, 10, 10)), Edge::Right);

        let wide = Rect::new(0, 0, 100, 10);
        assert_eq!(wide.intersecting_edge(&Rect::new(40, -8, 10, 10)), Edge::Top);
        assert_eq!(wide.intersecting_edge(&Rect::new(40, 8, 10, 10)), Edge::Bottom);

        assert_eq!(paddle.intersecting_edge(&Rect::new(50, 50, 10, 10)), Edge::None);
    }

    #[test]
    fn test_intersecting_edge_tie_prefers_left() {
        // Concentric equal boxes: all four offsets are equal
        let a = Rect::new(0, 0, 10, 10);
        assert_eq!(a.intersecting_edge(&a), Edge::Left);
    }

    #[test]
    fn test_center() {
        assert_eq!(Rect::new(0, 0, 256, 256).center(), IVec2::new(128, 128));
        assert_eq!(Rect::new(10, 20, 8, 64).center(), IVec2::new(14, 52));
    }

    proptest! {
        #[test]
        fn prop_boundary_never_contained(x in -500i32..500, y in -500i32..500, w in 0i32..200, h in 0i32..200, t in 0i32..200) {
            let r = Rect::new(x, y, w, h);
            let along_x = x + t.min(w);
            let along_y = y + t.min(h);
            prop_assert!(!r.has_point(x, along_y));
            prop_assert!(!r.has_point(x + w, along_y));
            prop_assert!(!r.has_point(along_x, y));
            prop_assert!(!r.has_point(along_x, y + h));
        }

        #[test]
        fn prop_overlap_is_symmetric(
            ax in -200i32..200, ay in -200i32..200, aw in 0i32..100, ah in 0i32..100,
            bx in -200i32..200, by in -200i32..200, bw in 0i32..100, bh in 0i32..100,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn prop_overlap_matches_interval_test(
            ax in -200i32..200, ay in -200i32..200, aw in 0i32..100, ah in 0i32..100,
            bx in -200i32..200, by in -200i32..200, bw in 0i32..100, bh in 0i32..100,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            let intervals = a.left() < b.right() && b.left() < a.right()
                && a.top() < b.bottom() && b.top() < a.bottom();
            prop_assert_eq!(a.overlaps(&b), intervals);
        }
    }
}
