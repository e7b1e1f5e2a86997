//! The layout node contract.
//!
//! Every node in the layout tree implements [`Layoutable`]: it stores a
//! sizing configuration, answers `measure` queries bottom-up, and assigns
//! geometry top-down. The algorithm is strictly two-pass — measurement never
//! touches geometry, arrangement never re-measures against a new viewport —
//! so a layout pass is a pure function of the sizing tree and the viewport.
//!
//! Implementors provide three hooks:
//! - [`measure_content`](Layoutable::measure_content) — content measurement
//!   against a margin-adjusted viewport,
//! - [`rebuild`](Layoutable::rebuild) — recompute derived structures when
//!   configuration changes (a grid's track matrix),
//! - [`arrange`](Layoutable::arrange) — position children from this node's
//!   own resolved boxes.
//!
//! Everything else (clipping, fixed-axis pinning, aspect resolution, the
//! viewport defaulting rules of `compute`) is provided here.

use crate::geometry::{BBox, CoordinateMapper, Size};
use crate::sizing::{BoxSizing, ExtBoxSizing, SizeHint, SizingPolicy};

/// Per-node layout storage: the assigned sizing plus the two geometry boxes
/// written once per arrange pass.
#[derive(Debug, Clone, Default)]
pub struct LayoutState {
    pub(crate) sizing: ExtBoxSizing,
    pub(crate) bbox: BBox,
    pub(crate) inner_bbox: BBox,
}

/// A node in the layout tree.
pub trait Layoutable {
    fn state(&self) -> &LayoutState;

    fn state_mut(&mut self) -> &mut LayoutState;

    /// Measure content against a viewport that has already been shrunk by
    /// this node's margin and pinned on fixed axes. Must not mutate geometry
    /// and must be repeatable for the same viewport.
    fn measure_content(&self, viewport: Size) -> SizeHint;

    /// Recompute derived structures after a configuration change. Called by
    /// [`set_sizing`](Self::set_sizing); containers also call it when their
    /// children change.
    fn rebuild(&mut self) {}

    /// Position children from this node's resolved outer and inner boxes.
    /// Children may be re-measured against sizes derived from those boxes,
    /// never against a fresh viewport.
    fn arrange(&mut self, outer: BBox, inner: BBox) {
        let _ = (outer, inner);
    }

    // =========================================================================
    // Provided: accessors
    // =========================================================================

    #[inline]
    fn sizing(&self) -> &ExtBoxSizing {
        &self.state().sizing
    }

    /// Outer box assigned by the last arrange pass.
    #[inline]
    fn bbox(&self) -> BBox {
        self.state().bbox
    }

    /// Inner (content) box assigned by the last arrange pass. Defaults to
    /// the outer box for nodes without decorative bands.
    #[inline]
    fn inner_bbox(&self) -> BBox {
        self.state().inner_bbox
    }

    /// Box-local → screen x transform for renderers.
    #[inline]
    fn xview(&self) -> CoordinateMapper {
        self.bbox().xview()
    }

    /// Box-local → screen y transform for renderers (bottom-up).
    #[inline]
    fn yview(&self) -> CoordinateMapper {
        self.bbox().yview()
    }

    // =========================================================================
    // Provided: configuration
    // =========================================================================

    /// Assign sizing configuration and rebuild derived state. Idempotent for
    /// identical input.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is inconsistent (aspect ratio with both
    /// axes fixed) — an authoring bug, reported at the offending call.
    fn set_sizing(&mut self, sizing: BoxSizing) {
        if let Err(err) = sizing.validate() {
            panic!("invalid sizing: {err}");
        }
        self.state_mut().sizing = ExtBoxSizing::new(sizing);
        self.rebuild();
    }

    /// Whether this node wants to grow horizontally. Containers may widen
    /// this (a grid with a flex column is expanding regardless of policy).
    fn is_width_expanding(&self) -> bool {
        self.sizing().sizing.width_policy == SizingPolicy::Max
    }

    fn is_height_expanding(&self) -> bool {
        self.sizing().sizing.height_policy == SizingPolicy::Max
    }

    // =========================================================================
    // Provided: clipping and aspect
    // =========================================================================

    #[inline]
    fn clip_width(&self, width: f32) -> f32 {
        let ext = self.sizing();
        width.clamp(ext.min_size.width, ext.max_size.width)
    }

    #[inline]
    fn clip_height(&self, height: f32) -> f32 {
        let ext = self.sizing();
        height.clamp(ext.min_size.height, ext.max_size.height)
    }

    #[inline]
    fn clip_size(&self, size: Size) -> Size {
        Size::new(self.clip_width(size.width), self.clip_height(size.height))
    }

    /// Resolve the configured aspect ratio against a measured size.
    ///
    /// With one fixed axis the other is derived from the ratio. With neither
    /// fixed, the width-driven and height-driven candidates compete on total
    /// absolute deviation from the viewport, width-driven winning ties.
    fn apply_aspect(&self, viewport: Size, size: Size) -> Size {
        let sizing = &self.sizing().sizing;
        let Some(aspect) = sizing.aspect else {
            return size;
        };

        let width_fixed = sizing.width_policy == SizingPolicy::Fixed;
        let height_fixed = sizing.height_policy == SizingPolicy::Fixed;

        if width_fixed {
            Size::new(size.width, size.width / aspect)
        } else if height_fixed {
            Size::new(size.height * aspect, size.height)
        } else {
            let width_driven = Size::new(size.width, size.width / aspect);
            let height_driven = Size::new(size.height * aspect, size.height);

            let deviation = |candidate: Size| {
                (viewport.width - candidate.width).abs()
                    + (viewport.height - candidate.height).abs()
            };

            if deviation(width_driven) <= deviation(height_driven) {
                width_driven
            } else {
                height_driven
            }
        }
    }

    // =========================================================================
    // Provided: the measure/compute/set-geometry contract
    // =========================================================================

    /// Measure this node against a viewport.
    ///
    /// Shrinks the viewport by the margin, pins fixed axes to their
    /// configured size, measures content, sanitizes and clips the result,
    /// re-pins fixed axes (a fixed axis always reports its clipped
    /// configured size, viewport notwithstanding), and resolves aspect.
    /// Pure: repeated calls with the same viewport return the same hint.
    fn measure(&self, viewport: Size) -> SizeHint {
        let sizing = self.sizing().sizing.clone();

        let mut vp = Size::new(
            (viewport.width - sizing.margin.horizontal()).max(0.0),
            (viewport.height - sizing.margin.vertical()).max(0.0),
        );
        if sizing.width_policy == SizingPolicy::Fixed {
            vp.width = sizing.width.unwrap_or(0.0);
        }
        if sizing.height_policy == SizingPolicy::Fixed {
            vp.height = sizing.height.unwrap_or(0.0);
        }

        let hint = self.measure_content(vp);

        let mut size = self.clip_size(hint.size.sanitized());
        if sizing.width_policy == SizingPolicy::Fixed {
            size.width = self.clip_width(sizing.width.unwrap_or(0.0));
        }
        if sizing.height_policy == SizingPolicy::Fixed {
            size.height = self.clip_height(sizing.height.unwrap_or(0.0));
        }
        size = self.apply_aspect(vp, size);

        SizeHint { size, inner: hint.inner, align: hint.align }
    }

    /// Run a full layout pass with no outer constraint (the node hugs its
    /// content unless fixed).
    fn compute(&mut self) {
        self.compute_within(Size::UNBOUNDED);
    }

    /// Run a full layout pass within a host viewport.
    ///
    /// A supplied axis only constrains the node when that axis is expanding
    /// and the value is finite; otherwise the axis measures unconstrained.
    /// Builds the outer box at the origin and assigns geometry through the
    /// whole subtree.
    fn compute_within(&mut self, viewport: Size) {
        let width = if viewport.width.is_finite() && self.is_width_expanding() {
            viewport.width
        } else {
            f32::INFINITY
        };
        let height = if viewport.height.is_finite() && self.is_height_expanding() {
            viewport.height
        } else {
            f32::INFINITY
        };

        let hint = self.measure(Size::new(width, height));
        tracing::debug!(
            width = hint.size.width,
            height = hint.size.height,
            "layout pass resolved root size"
        );

        let outer = BBox::from_size(hint.size);
        match hint.inner {
            Some(inner) => {
                let inner_box = BBox::from_lrtb(
                    inner.left,
                    inner.top,
                    outer.width() - inner.right,
                    outer.height() - inner.bottom,
                );
                self.set_geometry(outer, inner_box);
            }
            None => self.set_outer_geometry(outer),
        }
    }

    /// Assign outer and inner boxes, then arrange children. Both boxes are
    /// always written; the arrange hook runs exactly once per pass.
    fn set_geometry(&mut self, outer: BBox, inner: BBox) {
        {
            let state = self.state_mut();
            state.bbox = outer;
            state.inner_bbox = inner;
        }
        self.arrange(outer, inner);
    }

    /// [`set_geometry`](Self::set_geometry) with the inner box defaulting to
    /// the outer box.
    fn set_outer_geometry(&mut self, outer: BBox) {
        self.set_geometry(outer, outer);
    }
}
