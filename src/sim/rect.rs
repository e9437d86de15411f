//! Axis-aligned rectangle geometry for bricks, paddle, ball and pickups
//!
//! Screen space: x grows right, y grows down, origin at the play-field's
//! top-left corner. A rectangle is stored as its top-left corner plus size.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in play-field pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Build a rectangle of the given size centered on `center`
    pub fn from_center(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.h / 2.0
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.center_x(), self.center_y())
    }

    /// Strict overlap test: rectangles that only share an edge do not overlap
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Grow by `dw` total width and `dh` total height, keeping the center fixed
    pub fn inflate(&self, dw: f32, dh: f32) -> Rect {
        Rect::new(self.x - dw / 2.0, self.y - dh / 2.0, self.w + dw, self.h + dh)
    }

    /// Overlap depth along each axis as `(overlap_x, overlap_y)`
    ///
    /// Each component is the smaller of the two edge-pair penetrations, so a
    /// small value means the rectangles only just crossed on that axis.
    pub fn overlap(&self, other: &Rect) -> (f32, f32) {
        let overlap_x = (self.right() - other.left()).min(other.right() - self.left());
        let overlap_y = (self.bottom() - other.top()).min(other.bottom() - self.top());
        (overlap_x, overlap_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center(), Vec2::new(25.0, 40.0));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));

        let c = Rect::new(9.5, 9.5, 10.0, 10.0);
        assert!(a.intersects(&c));
        assert!(c.intersects(&a));
    }

    #[test]
    fn test_inflate_keeps_center() {
        let r = Rect::new(100.0, 50.0, 55.0, 20.0);
        let big = r.inflate(65.0, 30.0);
        assert_eq!(big.center(), r.center());
        assert_eq!(big.w, 120.0);
        assert_eq!(big.h, 50.0);
    }

    #[test]
    fn test_overlap_picks_shallow_side() {
        let brick = Rect::new(0.0, 0.0, 50.0, 20.0);
        // Ball poking 3px into the bottom of the brick
        let ball = Rect::new(10.0, 17.0, 30.0, 30.0);
        let (ox, oy) = ball.overlap(&brick);
        assert_eq!(oy, 3.0);
        assert!(ox > oy);
    }
}
