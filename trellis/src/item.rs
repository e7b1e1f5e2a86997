//! Terminal layout leaves.
//!
//! [`LayoutItem`] resolves size purely from its sizing policy and the
//! viewport — the workhorse leaf for toolbars, spacers, and fixed panels.
//! [`ContentItem`] wraps externally drawn content (an axis label block, a
//! rendered legend) behind the [`ContentSize`] capability so it can sit in
//! the tree like any other node.

use crate::geometry::Size;
use crate::layoutable::{LayoutState, Layoutable};
use crate::sizing::{BoxSizing, SizeHint, SizingPolicy};

/// Resolve one axis from (policy, configured value, viewport value).
///
/// An infinite viewport means "intrinsic size requested": the item reports
/// its configured value, or nothing.
fn resolve_axis(policy: SizingPolicy, value: Option<f32>, viewport: f32) -> f32 {
    if !viewport.is_finite() {
        return value.unwrap_or(0.0);
    }
    match policy {
        SizingPolicy::Fixed => value.unwrap_or(0.0),
        SizingPolicy::Min => value.map_or(0.0, |v| viewport.min(v)),
        SizingPolicy::Fit => value.map_or(viewport, |v| viewport.min(v)),
        SizingPolicy::Max => value.map_or(viewport, |v| viewport.max(v)),
    }
}

/// A leaf node with no children and no content: size comes from policy and
/// viewport alone.
#[derive(Debug, Default)]
pub struct LayoutItem {
    state: LayoutState,
}

impl LayoutItem {
    pub fn new() -> Self {
        Self::default()
    }

    /// A leaf pre-configured with a fixed size on both axes.
    pub fn fixed(width: f32, height: f32) -> Self {
        let mut item = Self::new();
        item.set_sizing(BoxSizing::fixed(width, height));
        item
    }

    /// A leaf pre-configured to grow into all available space.
    pub fn stretch() -> Self {
        let mut item = Self::new();
        item.set_sizing(BoxSizing::stretch());
        item
    }
}

impl Layoutable for LayoutItem {
    fn state(&self) -> &LayoutState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut LayoutState {
        &mut self.state
    }

    fn measure_content(&self, viewport: Size) -> SizeHint {
        let sizing = &self.sizing().sizing;
        SizeHint::exact(Size::new(
            resolve_axis(sizing.width_policy, sizing.width, viewport.width),
            resolve_axis(sizing.height_policy, sizing.height, viewport.height),
        ))
    }
}

/// Capability for non-layout content that knows its own drawn extent.
pub trait ContentSize {
    fn size(&self) -> Size;
}

impl ContentSize for Size {
    fn size(&self) -> Size {
        *self
    }
}

/// A leaf wrapping drawn content. The content's extent acts as the
/// preferred size on each axis, with the sizing policy deciding how it
/// trades against the viewport.
pub struct ContentItem {
    state: LayoutState,
    content: Box<dyn ContentSize>,
}

impl ContentItem {
    pub fn new(content: Box<dyn ContentSize>) -> Self {
        Self { state: LayoutState::default(), content }
    }
}

impl Layoutable for ContentItem {
    fn state(&self) -> &LayoutState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut LayoutState {
        &mut self.state
    }

    fn measure_content(&self, viewport: Size) -> SizeHint {
        let sizing = &self.sizing().sizing;
        let content = self.content.size().sanitized();

        let width = sizing.width.or(Some(content.width));
        let height = sizing.height.or(Some(content.height));
        SizeHint::exact(Size::new(
            resolve_axis(sizing.width_policy, width, viewport.width),
            resolve_axis(sizing.height_policy, height, viewport.height),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BBox;

    fn item_with(policy: SizingPolicy, value: Option<f32>) -> LayoutItem {
        let mut item = LayoutItem::new();
        item.set_sizing(BoxSizing {
            width_policy: policy,
            width: value,
            ..BoxSizing::default()
        });
        item
    }

    fn measured_width(item: &LayoutItem, viewport_width: f32) -> f32 {
        item.measure(Size::new(viewport_width, f32::INFINITY)).size.width
    }

    // =========================================================================
    // Axis resolution table
    // =========================================================================

    #[test]
    fn infinite_viewport_reports_value_or_zero() {
        for policy in [SizingPolicy::Min, SizingPolicy::Fit, SizingPolicy::Max] {
            assert_eq!(measured_width(&item_with(policy, Some(70.0)), f32::INFINITY), 70.0);
            assert_eq!(measured_width(&item_with(policy, None), f32::INFINITY), 0.0);
        }
    }

    #[test]
    fn fixed_ignores_viewport() {
        let item = item_with(SizingPolicy::Fixed, Some(70.0));
        assert_eq!(measured_width(&item, 30.0), 70.0);
        assert_eq!(measured_width(&item, 300.0), 70.0);

        let bare = item_with(SizingPolicy::Fixed, None);
        assert_eq!(measured_width(&bare, 300.0), 0.0);
    }

    #[test]
    fn min_takes_smaller_of_viewport_and_value() {
        let item = item_with(SizingPolicy::Min, Some(70.0));
        assert_eq!(measured_width(&item, 30.0), 30.0);
        assert_eq!(measured_width(&item, 300.0), 70.0);

        let bare = item_with(SizingPolicy::Min, None);
        assert_eq!(measured_width(&bare, 300.0), 0.0);
    }

    #[test]
    fn fit_prefers_value_but_yields_to_viewport() {
        let item = item_with(SizingPolicy::Fit, Some(70.0));
        assert_eq!(measured_width(&item, 30.0), 30.0);
        assert_eq!(measured_width(&item, 300.0), 70.0);

        let bare = item_with(SizingPolicy::Fit, None);
        assert_eq!(measured_width(&bare, 300.0), 300.0);
    }

    #[test]
    fn max_takes_larger_of_viewport_and_value() {
        let item = item_with(SizingPolicy::Max, Some(70.0));
        assert_eq!(measured_width(&item, 30.0), 70.0);
        assert_eq!(measured_width(&item, 300.0), 300.0);

        let bare = item_with(SizingPolicy::Max, None);
        assert_eq!(measured_width(&bare, 300.0), 300.0);
    }

    // =========================================================================
    // Constructors and compute
    // =========================================================================

    #[test]
    fn fixed_item_computes_to_configured_box() {
        let mut item = LayoutItem::fixed(100.0, 50.0);
        item.compute();
        assert_eq!(item.bbox(), BBox::new(0.0, 0.0, 100.0, 50.0));
    }

    #[test]
    fn stretch_item_fills_finite_viewport() {
        let mut item = LayoutItem::stretch();
        item.compute_within(Size::new(640.0, 480.0));
        assert_eq!(item.bbox().size(), Size::new(640.0, 480.0));
    }

    #[test]
    fn stretch_item_collapses_without_viewport() {
        let mut item = LayoutItem::stretch();
        item.compute();
        assert_eq!(item.bbox().size(), Size::ZERO);
    }

    // =========================================================================
    // ContentItem
    // =========================================================================

    #[test]
    fn content_item_reports_content_size() {
        let mut item = ContentItem::new(Box::new(Size::new(37.0, 14.0)));
        item.set_sizing(BoxSizing::default());

        assert_eq!(item.measure(Size::UNBOUNDED).size, Size::new(37.0, 14.0));
        // Fit yields to a tighter viewport.
        assert_eq!(item.measure(Size::new(20.0, 10.0)).size, Size::new(20.0, 10.0));
    }

    #[test]
    fn content_item_explicit_size_overrides_content() {
        let mut item = ContentItem::new(Box::new(Size::new(37.0, 14.0)));
        item.set_sizing(BoxSizing {
            width: Some(50.0),
            ..BoxSizing::default()
        });
        assert_eq!(item.measure(Size::UNBOUNDED).size, Size::new(50.0, 14.0));
    }
}
