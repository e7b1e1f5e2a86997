//! Geometry value types.
//!
//! `Size`, `Extents`, and `BBox` are the currency of the layout engine:
//! measurement produces sizes, arrangement produces boxes, and renderers
//! consume boxes (plus the `CoordinateMapper` views) to place pixels.

use serde::{Deserialize, Serialize};

/// A 2D extent. Infinite axes encode an unconstrained viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self { width: 0.0, height: 0.0 };

    /// Viewport with no constraint on either axis.
    pub const UNBOUNDED: Self = Self {
        width: f32::INFINITY,
        height: f32::INFINITY,
    };

    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Replace non-finite axes with zero. Degenerate measurements (a hidden
    /// panel, a widget before first paint) degrade to an empty size instead
    /// of poisoning the pass.
    #[inline]
    pub fn sanitized(self) -> Self {
        let fix = |v: f32| if v.is_finite() { v } else { 0.0 };
        Self { width: fix(self.width), height: fix(self.height) }
    }
}

impl From<(f32, f32)> for Size {
    fn from((width, height): (f32, f32)) -> Self {
        Self { width, height }
    }
}

/// Per-edge distances: margins, paddings, and content-box insets.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Extents {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Extents {
    pub const ZERO: Self = Self { left: 0.0, top: 0.0, right: 0.0, bottom: 0.0 };

    #[inline]
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Uniform extent on all edges.
    #[inline]
    pub const fn all(value: f32) -> Self {
        Self { left: value, top: value, right: value, bottom: value }
    }

    /// Symmetric extent (horizontal, vertical).
    #[inline]
    pub const fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self {
            left: horizontal,
            top: vertical,
            right: horizontal,
            bottom: vertical,
        }
    }

    /// Total horizontal extent.
    #[inline]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Total vertical extent.
    #[inline]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// Horizontal placement of a box: which x reference is pinned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HPosition {
    Left(f32),
    Right(f32),
    HCenter(f32),
}

/// Vertical placement of a box: which y reference is pinned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VPosition {
    Top(f32),
    Bottom(f32),
    VCenter(f32),
}

/// A concrete screen rectangle.
///
/// Boxes are produced by the arrange pass and read by everything downstream:
/// glyph renderers, hit-testers, DOM styling. Fields are private so a box is
/// only ever written by the layout node that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BBox {
    left: f32,
    top: f32,
    width: f32,
    height: f32,
}

impl BBox {
    pub const ZERO: Self = Self { left: 0.0, top: 0.0, width: 0.0, height: 0.0 };

    /// Create a box from its top-left corner and size. Negative dimensions
    /// are corrected to zero (empty box), not an error.
    #[inline]
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// A box of the given size at the origin.
    #[inline]
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Create a box from edges. Swapped edges are normalized.
    #[inline]
    pub fn from_lrtb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        let (l, r) = if left <= right { (left, right) } else { (right, left) };
        let (t, b) = if top <= bottom { (top, bottom) } else { (bottom, top) };
        Self { left: l, top: t, width: r - l, height: b - t }
    }

    /// Create a box of `size` pinned at the given horizontal and vertical
    /// references. This is how anchor layouts place overlays: pin whichever
    /// edge or center the anchor names and let the size extend from there.
    pub fn from_position(h: HPosition, v: VPosition, size: Size) -> Self {
        let left = match h {
            HPosition::Left(left) => left,
            HPosition::Right(right) => right - size.width,
            HPosition::HCenter(hcenter) => hcenter - size.width / 2.0,
        };
        let top = match v {
            VPosition::Top(top) => top,
            VPosition::Bottom(bottom) => bottom - size.height,
            VPosition::VCenter(vcenter) => vcenter - size.height / 2.0,
        };
        Self::new(left, top, size.width, size.height)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.left
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.top
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    #[inline]
    pub fn hcenter(&self) -> f32 {
        self.left + self.width / 2.0
    }

    #[inline]
    pub fn vcenter(&self) -> f32 {
        self.top + self.height / 2.0
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Shrink the box inward by per-edge extents. Over-shrinking collapses
    /// the affected axis to empty instead of inverting it.
    pub fn shrink_by(&self, extents: &Extents) -> Self {
        Self::new(
            self.left + extents.left,
            self.top + extents.top,
            self.width - extents.horizontal(),
            self.height - extents.vertical(),
        )
    }

    /// Grow the box outward by a uniform amount.
    pub fn grow_by(&self, amount: f32) -> Self {
        Self::new(
            self.left - amount,
            self.top - amount,
            self.width + 2.0 * amount,
            self.height + 2.0 * amount,
        )
    }

    /// The same box translated to the origin.
    #[inline]
    pub fn relative(&self) -> Self {
        Self { left: 0.0, top: 0.0, ..*self }
    }

    /// The box translated by an offset.
    #[inline]
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self {
            left: self.left + dx,
            top: self.top + dy,
            ..*self
        }
    }

    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.left <= x && x <= self.right() && self.top <= y && y <= self.bottom()
    }

    /// Mapper from box-local x offsets to screen x coordinates.
    #[inline]
    pub fn xview(&self) -> CoordinateMapper {
        CoordinateMapper { origin: self.left, flipped: false }
    }

    /// Mapper from box-local y offsets to screen y coordinates. Flipped:
    /// local y grows upward from the bottom edge, screen y grows downward.
    #[inline]
    pub fn yview(&self) -> CoordinateMapper {
        CoordinateMapper { origin: self.bottom(), flipped: true }
    }
}

/// A 1D offset transform between box-local values and screen coordinates.
///
/// Renderers drive these to map resolved data-space offsets to pixels; the
/// layout engine itself never interprets the values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    origin: f32,
    flipped: bool,
}

impl CoordinateMapper {
    /// Map a box-local value to a screen coordinate.
    #[inline]
    pub fn compute(&self, v: f32) -> f32 {
        if self.flipped { self.origin - v } else { self.origin + v }
    }

    /// Map a screen coordinate back to a box-local value.
    #[inline]
    pub fn invert(&self, sv: f32) -> f32 {
        if self.flipped { self.origin - sv } else { sv - self.origin }
    }

    /// Vectorized [`compute`](Self::compute).
    pub fn v_compute(&self, vs: &[f32]) -> Vec<f32> {
        vs.iter().map(|&v| self.compute(v)).collect()
    }

    /// Vectorized [`invert`](Self::invert).
    pub fn v_invert(&self, svs: &[f32]) -> Vec<f32> {
        svs.iter().map(|&sv| self.invert(sv)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Size
    // =========================================================================

    #[test]
    fn size_unbounded_is_infinite() {
        assert!(Size::UNBOUNDED.width.is_infinite());
        assert!(Size::UNBOUNDED.height.is_infinite());
    }

    #[test]
    fn size_sanitized_zeroes_non_finite() {
        let s = Size::new(f32::NAN, f32::INFINITY).sanitized();
        assert_eq!(s, Size::ZERO);

        let ok = Size::new(10.0, 20.0).sanitized();
        assert_eq!(ok, Size::new(10.0, 20.0));
    }

    // =========================================================================
    // Extents
    // =========================================================================

    #[test]
    fn extents_all_and_symmetric() {
        let a = Extents::all(5.0);
        assert_eq!(a.horizontal(), 10.0);
        assert_eq!(a.vertical(), 10.0);

        let s = Extents::symmetric(3.0, 7.0);
        assert_eq!(s.left, 3.0);
        assert_eq!(s.right, 3.0);
        assert_eq!(s.top, 7.0);
        assert_eq!(s.bottom, 7.0);
    }

    // =========================================================================
    // BBox construction
    // =========================================================================

    #[test]
    fn bbox_accessors() {
        let b = BBox::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(b.right(), 110.0);
        assert_eq!(b.bottom(), 70.0);
        assert_eq!(b.hcenter(), 60.0);
        assert_eq!(b.vcenter(), 45.0);
        assert_eq!(b.size(), Size::new(100.0, 50.0));
    }

    #[test]
    fn bbox_negative_dimensions_collapse_to_empty() {
        let b = BBox::new(10.0, 20.0, -5.0, -5.0);
        assert_eq!(b.width(), 0.0);
        assert_eq!(b.height(), 0.0);
    }

    #[test]
    fn bbox_from_lrtb_normalizes() {
        let b = BBox::from_lrtb(110.0, 70.0, 10.0, 20.0);
        assert_eq!(b.left(), 10.0);
        assert_eq!(b.top(), 20.0);
        assert_eq!(b.width(), 100.0);
        assert_eq!(b.height(), 50.0);
    }

    #[test]
    fn bbox_from_position_pins_references() {
        let size = Size::new(40.0, 20.0);

        let b = BBox::from_position(HPosition::Left(10.0), VPosition::Top(5.0), size);
        assert_eq!((b.left(), b.top()), (10.0, 5.0));

        let b = BBox::from_position(HPosition::Right(100.0), VPosition::Bottom(50.0), size);
        assert_eq!((b.left(), b.top()), (60.0, 30.0));
        assert_eq!((b.right(), b.bottom()), (100.0, 50.0));

        let b = BBox::from_position(HPosition::HCenter(50.0), VPosition::VCenter(25.0), size);
        assert_eq!(b.hcenter(), 50.0);
        assert_eq!(b.vcenter(), 25.0);
    }

    #[test]
    fn bbox_shrink_by_corrects_overshoot() {
        let b = BBox::new(0.0, 0.0, 10.0, 10.0);
        let shrunk = b.shrink_by(&Extents::all(2.0));
        assert_eq!(shrunk, BBox::new(2.0, 2.0, 6.0, 6.0));

        let collapsed = b.shrink_by(&Extents::all(8.0));
        assert_eq!(collapsed.width(), 0.0);
        assert_eq!(collapsed.height(), 0.0);
    }

    #[test]
    fn bbox_relative_and_translate() {
        let b = BBox::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(b.relative(), BBox::new(0.0, 0.0, 30.0, 40.0));
        assert_eq!(b.translate(5.0, -10.0), BBox::new(15.0, 10.0, 30.0, 40.0));
    }

    #[test]
    fn bbox_contains_edges_inclusive() {
        let b = BBox::new(0.0, 0.0, 10.0, 10.0);
        assert!(b.contains(0.0, 0.0));
        assert!(b.contains(10.0, 10.0));
        assert!(!b.contains(10.1, 5.0));
    }

    // =========================================================================
    // Coordinate mappers
    // =========================================================================

    #[test]
    fn xview_offsets_from_left() {
        let b = BBox::new(100.0, 50.0, 200.0, 80.0);
        let xv = b.xview();
        assert_eq!(xv.compute(0.0), 100.0);
        assert_eq!(xv.compute(25.0), 125.0);
        assert_eq!(xv.invert(125.0), 25.0);
    }

    #[test]
    fn yview_flips_from_bottom() {
        let b = BBox::new(100.0, 50.0, 200.0, 80.0);
        let yv = b.yview();
        // Local y = 0 is the bottom edge; y grows upward.
        assert_eq!(yv.compute(0.0), 130.0);
        assert_eq!(yv.compute(80.0), 50.0);
        assert_eq!(yv.invert(50.0), 80.0);
    }

    #[test]
    fn mapper_vectorized_round_trip() {
        let b = BBox::new(10.0, 0.0, 100.0, 100.0);
        let xv = b.xview();
        let screen = xv.v_compute(&[0.0, 50.0, 100.0]);
        assert_eq!(screen, vec![10.0, 60.0, 110.0]);
        assert_eq!(xv.v_invert(&screen), vec![0.0, 50.0, 100.0]);
    }
}
