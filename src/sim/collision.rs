//! Axis-aligned rectangle overlap
//!
//! Every game resolves its hits through the same test so edge-touching
//! behaves identically everywhere: rectangles that only share an edge do
//! not collide.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn at(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// The unit square covering a grid cell
    pub fn cell(cell: IVec2) -> Self {
        Self::at(cell.as_vec2(), Vec2::ONE)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// True when `other` lies entirely inside `self`
    pub fn contains(&self, other: &Rect) -> bool {
        other.pos.x >= self.pos.x
            && other.pos.y >= self.pos.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Half-open interval overlap on both axes.
///
/// Zero or negative sizes never overlap anything.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    if a.size.cmple(Vec2::ZERO).any() || b.size.cmple(Vec2::ZERO).any() {
        return false;
    }
    a.pos.x < b.right() && a.right() > b.pos.x && a.pos.y < b.bottom() && a.bottom() > b.pos.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap_interior() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(overlaps(&a, &b));
        assert!(overlaps(&b, &a));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        let corner = Rect::new(10.0, 10.0, 1.0, 1.0);
        assert!(!overlaps(&a, &right));
        assert!(!overlaps(&a, &below));
        assert!(!overlaps(&a, &corner));
    }

    #[test]
    fn test_degenerate_sizes() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!overlaps(&a, &Rect::new(5.0, 5.0, 0.0, 0.0)));
        assert!(!overlaps(&a, &Rect::new(5.0, 5.0, -3.0, 4.0)));
    }

    #[test]
    fn test_grid_cells() {
        let head = Rect::cell(IVec2::new(3, 4));
        assert!(overlaps(&head, &Rect::cell(IVec2::new(3, 4))));
        assert!(!overlaps(&head, &Rect::cell(IVec2::new(4, 4))));
        let field = Rect::new(0.0, 0.0, 20.0, 20.0);
        assert!(field.contains(&Rect::cell(IVec2::new(19, 0))));
        assert!(!field.contains(&Rect::cell(IVec2::new(20, 0))));
        assert!(!field.contains(&Rect::cell(IVec2::new(0, -1))));
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            ax in -50i32..50, ay in -50i32..50, aw in -5i32..30, ah in -5i32..30,
            bx in -50i32..50, by in -50i32..50, bw in -5i32..30, bh in -5i32..30,
        ) {
            let a = Rect::new(ax as f32, ay as f32, aw as f32, ah as f32);
            let b = Rect::new(bx as f32, by as f32, bw as f32, bh as f32);
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }

        #[test]
        fn adjacent_rects_never_collide(
            x in -50i32..50, y in -50i32..50, w in 1i32..30, h in 1i32..30, other_w in 1i32..30,
        ) {
            let a = Rect::new(x as f32, y as f32, w as f32, h as f32);
            let b = Rect::new((x + w) as f32, y as f32, other_w as f32, h as f32);
            prop_assert!(!overlaps(&a, &b));
        }
    }
}
