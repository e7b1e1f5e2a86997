//! Five-region frame layout.
//!
//! A [`BorderLayout`] frames a center panel with optional top/bottom/left/
//! right bands — the shape of a plot: axes and toolbars around a data frame.
//! Band thickness comes from each band's own measurement, clamped below by
//! `min_border` and padded outward by `padding`. The resulting insets are
//! reported as the hint's `inner` so an enclosing grid can align frames of
//! neighboring plots even when their band thicknesses differ.

use crate::geometry::{BBox, Extents, Size};
use crate::layoutable::{LayoutState, Layoutable};
use crate::sizing::{SizeHint, SizingPolicy};

type Panel = Option<Box<dyn Layoutable>>;

/// Center panel with four optional surrounding bands.
pub struct BorderLayout {
    state: LayoutState,
    center: Box<dyn Layoutable>,
    top: Panel,
    bottom: Panel,
    left: Panel,
    right: Panel,
    min_border: Extents,
    padding: Extents,
}

impl BorderLayout {
    pub fn new(center: impl Layoutable + 'static) -> Self {
        Self {
            state: LayoutState::default(),
            center: Box::new(center),
            top: None,
            bottom: None,
            left: None,
            right: None,
            min_border: Extents::ZERO,
            padding: Extents::ZERO,
        }
    }

    pub fn top(mut self, panel: impl Layoutable + 'static) -> Self {
        self.top = Some(Box::new(panel));
        self
    }

    pub fn bottom(mut self, panel: impl Layoutable + 'static) -> Self {
        self.bottom = Some(Box::new(panel));
        self
    }

    pub fn left(mut self, panel: impl Layoutable + 'static) -> Self {
        self.left = Some(Box::new(panel));
        self
    }

    pub fn right(mut self, panel: impl Layoutable + 'static) -> Self {
        self.right = Some(Box::new(panel));
        self
    }

    /// Lower bound on each band inset, applied whether or not a band panel
    /// exists on that edge.
    pub fn min_border(mut self, min_border: Extents) -> Self {
        self.min_border = min_border;
        self
    }

    /// Extra inset added outside each band.
    pub fn padding(mut self, padding: Extents) -> Self {
        self.padding = padding;
        self
    }

    pub fn center_panel(&self) -> &dyn Layoutable {
        self.center.as_ref()
    }

    pub fn top_panel(&self) -> Option<&dyn Layoutable> {
        self.top.as_deref()
    }

    pub fn bottom_panel(&self) -> Option<&dyn Layoutable> {
        self.bottom.as_deref()
    }

    pub fn left_panel(&self) -> Option<&dyn Layoutable> {
        self.left.as_deref()
    }

    pub fn right_panel(&self) -> Option<&dyn Layoutable> {
        self.right.as_deref()
    }

    /// Band insets for a given frame extent: measured thickness clamped to
    /// `min_border`, plus `padding`.
    fn band_insets(&self, frame: Size) -> Extents {
        let width_of = |panel: &Panel| {
            panel
                .as_ref()
                .map_or(0.0, |p| p.measure(Size::new(0.0, frame.height)).size.width)
        };
        let height_of = |panel: &Panel| {
            panel
                .as_ref()
                .map_or(0.0, |p| p.measure(Size::new(frame.width, 0.0)).size.height)
        };

        Extents {
            left: width_of(&self.left).max(self.min_border.left) + self.padding.left,
            right: width_of(&self.right).max(self.min_border.right) + self.padding.right,
            top: height_of(&self.top).max(self.min_border.top) + self.padding.top,
            bottom: height_of(&self.bottom).max(self.min_border.bottom) + self.padding.bottom,
        }
    }
}

impl Layoutable for BorderLayout {
    fn state(&self) -> &LayoutState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut LayoutState {
        &mut self.state
    }

    fn measure_content(&self, viewport: Size) -> SizeHint {
        // An unconstrained axis falls back to the configured preferred size
        // when one exists, so bands measure against a realistic frame.
        let (width, height) = self.sizing().size();
        let frame = Size::new(
            if viewport.width.is_finite() {
                viewport.width
            } else {
                width.unwrap_or(f32::INFINITY)
            },
            if viewport.height.is_finite() {
                viewport.height
            } else {
                height.unwrap_or(f32::INFINITY)
            },
        );

        let insets = self.band_insets(frame);
        let center_viewport = Size::new(
            (frame.width - insets.horizontal()).max(0.0),
            (frame.height - insets.vertical()).max(0.0),
        );
        let center = self.center.measure(center_viewport);

        // A frame with a fixed center is rigid; only flexible centers take
        // part in cross-cell inner alignment.
        let center_sizing = &self.center.sizing().sizing;
        let align = center_sizing.width_policy != SizingPolicy::Fixed
            && center_sizing.height_policy != SizingPolicy::Fixed;

        SizeHint {
            size: Size::new(
                insets.left + center.size.width + insets.right,
                insets.top + center.size.height + insets.bottom,
            ),
            inner: Some(insets),
            align,
        }
    }

    fn arrange(&mut self, outer: BBox, inner: BBox) {
        // The center receives the inner box exactly. Band thickness is
        // re-resolved against the final outer extent.
        self.center.set_outer_geometry(inner);

        if let Some(top) = &mut self.top {
            let h = top.measure(Size::new(outer.width(), 0.0)).size.height;
            top.set_outer_geometry(BBox::from_lrtb(
                outer.left(),
                inner.top() - h,
                outer.right(),
                inner.top(),
            ));
        }
        if let Some(bottom) = &mut self.bottom {
            let h = bottom.measure(Size::new(outer.width(), 0.0)).size.height;
            bottom.set_outer_geometry(BBox::from_lrtb(
                outer.left(),
                inner.bottom(),
                outer.right(),
                inner.bottom() + h,
            ));
        }
        if let Some(left) = &mut self.left {
            let w = left.measure(Size::new(0.0, outer.height())).size.width;
            left.set_outer_geometry(BBox::from_lrtb(
                inner.left() - w,
                inner.top(),
                inner.left(),
                inner.bottom(),
            ));
        }
        if let Some(right) = &mut self.right {
            let w = right.measure(Size::new(0.0, outer.height())).size.width;
            right.set_outer_geometry(BBox::from_lrtb(
                inner.right(),
                inner.top(),
                inner.right() + w,
                inner.bottom(),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::LayoutItem;
    use crate::sizing::BoxSizing;

    fn framed() -> BorderLayout {
        let mut layout = BorderLayout::new(LayoutItem::fixed(100.0, 50.0))
            .top(LayoutItem::fixed(0.0, 10.0))
            .bottom(LayoutItem::fixed(0.0, 15.0))
            .left(LayoutItem::fixed(20.0, 0.0))
            .right(LayoutItem::fixed(30.0, 0.0));
        layout.set_sizing(BoxSizing::default());
        layout
    }

    #[test]
    fn measure_sums_bands_and_center() {
        let layout = framed();
        let hint = layout.measure(Size::UNBOUNDED);
        assert_eq!(hint.size, Size::new(150.0, 75.0));
        assert_eq!(hint.inner, Some(Extents::new(20.0, 10.0, 30.0, 15.0)));
    }

    #[test]
    fn align_requires_flexible_center() {
        let fixed_center = framed();
        assert!(!fixed_center.measure(Size::UNBOUNDED).align);

        let mut flexible = BorderLayout::new(LayoutItem::stretch());
        flexible.set_sizing(BoxSizing::default());
        assert!(flexible.measure(Size::UNBOUNDED).align);
    }

    #[test]
    fn min_border_clamps_thin_bands() {
        let mut layout = BorderLayout::new(LayoutItem::fixed(100.0, 50.0))
            .left(LayoutItem::fixed(20.0, 0.0))
            .min_border(Extents::new(25.0, 8.0, 0.0, 0.0));
        layout.set_sizing(BoxSizing::default());

        let hint = layout.measure(Size::UNBOUNDED);
        let inner = hint.inner.unwrap();
        // Measured 20 clamps up to 25; the bare top edge still gets 8.
        assert_eq!(inner.left, 25.0);
        assert_eq!(inner.top, 8.0);
        assert_eq!(hint.size.width, 125.0);
    }

    #[test]
    fn padding_adds_outside_bands() {
        let mut layout = BorderLayout::new(LayoutItem::fixed(100.0, 50.0))
            .left(LayoutItem::fixed(20.0, 0.0))
            .padding(Extents::all(4.0));
        layout.set_sizing(BoxSizing::default());

        let inner = layout.measure(Size::UNBOUNDED).inner.unwrap();
        assert_eq!(inner, Extents::new(24.0, 4.0, 4.0, 4.0));
    }

    #[test]
    fn arrange_places_center_and_bands() {
        let mut layout = framed();
        layout.compute();

        assert_eq!(layout.bbox(), BBox::new(0.0, 0.0, 150.0, 75.0));
        assert_eq!(layout.inner_bbox(), BBox::new(20.0, 10.0, 100.0, 50.0));
        assert_eq!(layout.center_panel().bbox(), BBox::new(20.0, 10.0, 100.0, 50.0));

        // Bands: top/bottom span the outer width, left/right the inner height.
        assert_eq!(layout.top_panel().unwrap().bbox(), BBox::new(0.0, 0.0, 150.0, 10.0));
        assert_eq!(layout.bottom_panel().unwrap().bbox(), BBox::new(0.0, 60.0, 150.0, 15.0));
        assert_eq!(layout.left_panel().unwrap().bbox(), BBox::new(0.0, 10.0, 20.0, 50.0));
        assert_eq!(layout.right_panel().unwrap().bbox(), BBox::new(120.0, 10.0, 30.0, 50.0));
    }

    #[test]
    fn inner_offsets_equal_band_widths() {
        let mut layout = framed();
        layout.compute();

        let outer = layout.bbox();
        let inner = layout.inner_bbox();
        let left_width = layout.left_panel().unwrap().bbox().width();
        let right_width = layout.right_panel().unwrap().bbox().width();
        assert_eq!(
            (inner.left() - outer.left()) + (outer.right() - inner.right()),
            left_width + right_width
        );
    }

    #[test]
    fn expanding_center_fills_finite_frame() {
        let mut layout = BorderLayout::new(LayoutItem::stretch())
            .left(LayoutItem::fixed(20.0, 0.0))
            .top(LayoutItem::fixed(0.0, 10.0));
        layout.set_sizing(BoxSizing::stretch());
        layout.compute_within(Size::new(200.0, 100.0));

        assert_eq!(layout.bbox().size(), Size::new(200.0, 100.0));
        assert_eq!(layout.center_panel().bbox(), BBox::new(20.0, 10.0, 180.0, 90.0));
    }
}
