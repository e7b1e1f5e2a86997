//! Overlay positioning at canonical anchors.
//!
//! An [`AnchorLayout`] superimposes children over one shared box: a legend
//! pinned to a corner of the plot frame, a "loading" badge in the center.
//! Children overlap rather than flow, so the layout's own size is the
//! bounding max of its children.

use serde::{Deserialize, Serialize};

use crate::geometry::{BBox, Extents, HPosition, Size, VPosition};
use crate::layoutable::{LayoutState, Layoutable};
use crate::sizing::SizeHint;

/// One of the nine canonical positions inside a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    #[default]
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Anchor {
    /// The box of `size` pinned at this anchor inside `outer`, with the
    /// margin pushing inward from whichever edges the anchor references.
    fn place(self, outer: &BBox, margin: &Extents, size: Size) -> BBox {
        use Anchor::*;

        let h = match self {
            TopLeft | CenterLeft | BottomLeft => HPosition::Left(outer.left() + margin.left),
            TopCenter | Center | BottomCenter => HPosition::HCenter(outer.hcenter()),
            TopRight | CenterRight | BottomRight => HPosition::Right(outer.right() - margin.right),
        };
        let v = match self {
            TopLeft | TopCenter | TopRight => VPosition::Top(outer.top() + margin.top),
            CenterLeft | Center | CenterRight => VPosition::VCenter(outer.vcenter()),
            BottomLeft | BottomCenter | BottomRight => {
                VPosition::Bottom(outer.bottom() - margin.bottom)
            }
        };
        BBox::from_position(h, v, size)
    }
}

/// A child of an [`AnchorLayout`]: what to place, where, and how far in
/// from the referenced edges.
pub struct AnchorItem {
    pub layout: Box<dyn Layoutable>,
    pub anchor: Anchor,
    pub margin: Extents,
}

/// Overlay container placing each child at a fixed anchor of the outer box.
#[derive(Default)]
pub struct AnchorLayout {
    state: LayoutState,
    children: Vec<AnchorItem>,
}

impl AnchorLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn child(
        mut self,
        layout: impl Layoutable + 'static,
        anchor: Anchor,
        margin: Extents,
    ) -> Self {
        self.children.push(AnchorItem {
            layout: Box::new(layout),
            anchor,
            margin,
        });
        self
    }

    pub fn children(&self) -> &[AnchorItem] {
        &self.children
    }
}

impl Layoutable for AnchorLayout {
    fn state(&self) -> &LayoutState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut LayoutState {
        &mut self.state
    }

    /// Bounding max over children. Overlapping children do not add.
    fn measure_content(&self, _viewport: Size) -> SizeHint {
        let mut width = 0.0f32;
        let mut height = 0.0f32;
        for item in &self.children {
            let size = item.layout.measure(Size::ZERO).size;
            width = width.max(size.width);
            height = height.max(size.height);
        }
        SizeHint::exact(Size::new(width, height))
    }

    fn arrange(&mut self, outer: BBox, _inner: BBox) {
        for item in &mut self.children {
            // Final size resolves against the actual box, so expanding
            // overlays can fill it.
            let size = item.layout.measure(outer.size()).size;
            let bbox = item.anchor.place(&outer, &item.margin, size);
            item.layout.set_outer_geometry(bbox);
        }
    }
}
