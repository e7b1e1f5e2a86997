//! 1D sequential composition.
//!
//! A [`Stack`] lays children edge-to-edge along one axis, each at its own
//! intrinsic size. There is no growth, shrink, or wrapping; for distribution
//! use a grid with flex tracks instead. Stacks exist for simple strips such
//! as a toolbar row of fixed-size buttons.

use crate::geometry::{BBox, Size};
use crate::layoutable::{LayoutState, Layoutable};
use crate::sizing::SizeHint;

/// Main axis of a [`Stack`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A sequential strip of children along one axis.
pub struct Stack {
    state: LayoutState,
    orientation: Orientation,
    children: Vec<Box<dyn Layoutable>>,
}

impl Stack {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            state: LayoutState::default(),
            orientation,
            children: Vec::new(),
        }
    }

    /// A left-to-right strip.
    pub fn horizontal() -> Self {
        Self::new(Orientation::Horizontal)
    }

    /// A top-to-bottom strip.
    pub fn vertical() -> Self {
        Self::new(Orientation::Vertical)
    }

    /// Append a child at the trailing end.
    pub fn child(mut self, child: impl Layoutable + 'static) -> Self {
        self.children.push(Box::new(child));
        self
    }

    pub fn push(&mut self, child: Box<dyn Layoutable>) {
        self.children.push(child);
    }

    pub fn children(&self) -> &[Box<dyn Layoutable>] {
        &self.children
    }
}

impl Layoutable for Stack {
    fn state(&self) -> &LayoutState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut LayoutState {
        &mut self.state
    }

    /// Sum of intrinsic sizes along the main axis, max across the cross axis.
    fn measure_content(&self, _viewport: Size) -> SizeHint {
        let mut width = 0.0f32;
        let mut height = 0.0f32;
        for child in &self.children {
            let size = child.measure(Size::ZERO).size;
            match self.orientation {
                Orientation::Horizontal => {
                    width += size.width;
                    height = height.max(size.height);
                }
                Orientation::Vertical => {
                    width = width.max(size.width);
                    height += size.height;
                }
            }
        }
        SizeHint::exact(Size::new(width, height))
    }

    fn arrange(&mut self, outer: BBox, _inner: BBox) {
        let orientation = self.orientation;
        let mut offset = match orientation {
            Orientation::Horizontal => outer.left(),
            Orientation::Vertical => outer.top(),
        };
        for child in &mut self.children {
            let size = child.measure(Size::ZERO).size;
            let bbox = match orientation {
                // Children span the full cross extent of the strip.
                Orientation::Horizontal => {
                    BBox::from_lrtb(offset, outer.top(), offset + size.width, outer.bottom())
                }
                Orientation::Vertical => {
                    BBox::from_lrtb(outer.left(), offset, outer.right(), offset + size.height)
                }
            };
            child.set_outer_geometry(bbox);
            offset += match orientation {
                Orientation::Horizontal => size.width,
                Orientation::Vertical => size.height,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::LayoutItem;

    #[test]
    fn horizontal_sums_widths_and_maxes_heights() {
        let mut stack = Stack::horizontal()
            .child(LayoutItem::fixed(30.0, 20.0))
            .child(LayoutItem::fixed(50.0, 40.0))
            .child(LayoutItem::fixed(20.0, 10.0));
        stack.set_sizing(Default::default());

        assert_eq!(stack.measure(Size::UNBOUNDED).size, Size::new(100.0, 40.0));
    }

    #[test]
    fn vertical_sums_heights_and_maxes_widths() {
        let mut stack = Stack::vertical()
            .child(LayoutItem::fixed(30.0, 20.0))
            .child(LayoutItem::fixed(50.0, 40.0));
        stack.set_sizing(Default::default());

        assert_eq!(stack.measure(Size::UNBOUNDED).size, Size::new(50.0, 60.0));
    }

    #[test]
    fn horizontal_places_children_edge_to_edge() {
        let mut stack = Stack::horizontal()
            .child(LayoutItem::fixed(30.0, 20.0))
            .child(LayoutItem::fixed(50.0, 40.0));
        stack.set_sizing(Default::default());
        stack.compute();

        let children = stack.children();
        assert_eq!(children[0].bbox(), BBox::new(0.0, 0.0, 30.0, 40.0));
        assert_eq!(children[1].bbox(), BBox::new(30.0, 0.0, 50.0, 40.0));
    }

    #[test]
    fn vertical_places_children_edge_to_edge() {
        let mut stack = Stack::vertical()
            .child(LayoutItem::fixed(30.0, 20.0))
            .child(LayoutItem::fixed(50.0, 40.0));
        stack.set_sizing(Default::default());
        stack.compute();

        let children = stack.children();
        assert_eq!(children[0].bbox(), BBox::new(0.0, 0.0, 50.0, 20.0));
        assert_eq!(children[1].bbox(), BBox::new(0.0, 20.0, 50.0, 40.0));
    }

    #[test]
    fn empty_stack_measures_zero() {
        let mut stack = Stack::horizontal();
        stack.set_sizing(Default::default());
        assert_eq!(stack.measure(Size::UNBOUNDED).size, Size::ZERO);
    }

    #[test]
    fn arrange_offsets_follow_outer_origin() {
        let mut stack = Stack::horizontal()
            .child(LayoutItem::fixed(30.0, 20.0))
            .child(LayoutItem::fixed(50.0, 20.0));
        stack.set_sizing(Default::default());

        let hint = stack.measure(Size::UNBOUNDED);
        stack.set_outer_geometry(BBox::new(10.0, 5.0, hint.size.width, hint.size.height));

        let children = stack.children();
        assert_eq!(children[0].bbox(), BBox::new(10.0, 5.0, 30.0, 20.0));
        assert_eq!(children[1].bbox(), BBox::new(40.0, 5.0, 50.0, 20.0));
    }
}
