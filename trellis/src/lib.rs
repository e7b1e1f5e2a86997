//! Trellis: Constraint Layout Engine for Plot Panels
//!
//! Trellis computes sizes and positions for nested visual regions — plot
//! frames, axes, toolbars, titles — under a constrained 2D box model with
//! fixed, shrink-to-fit, grow-to-fill, and proportional sizing.
//!
//! # Architecture
//!
//! Every node implements [`Layoutable`] and a pass is strictly two-phase:
//! `measure` resolves sizes bottom-up against a viewport, then geometry is
//! assigned top-down with no feedback loop. Containers compose:
//!
//! - [`LayoutItem`] / [`ContentItem`] — terminal leaves
//! - [`Stack`] — 1D sequential strips
//! - [`AnchorLayout`] — overlays pinned at nine canonical anchors
//! - [`BorderLayout`] — a center framed by top/bottom/left/right bands
//! - [`Grid`] — track-based 2D layout with flex distribution and
//!   cross-cell inner alignment
//!
//! The engine produces [`BBox`] geometry and coordinate transforms; it does
//! not render, own canvas state, or handle input.
//!
//! # Usage
//!
//! ```
//! use trellis::{BoxSizing, Grid, GridItem, LayoutItem, Layoutable, Size};
//!
//! let mut grid = Grid::new(vec![
//!     GridItem::new(LayoutItem::fixed(100.0, 50.0), 0, 0),
//!     GridItem::new(LayoutItem::stretch(), 0, 1),
//! ]);
//! grid.set_sizing(BoxSizing::default());
//! grid.compute_within(Size::new(640.0, 480.0));
//!
//! assert_eq!(grid.bbox().width(), 640.0);
//! ```

// Value types
pub mod error;
pub mod geometry;
pub mod sizing;

// The node contract
pub mod layoutable;

// Leaves and containers
pub mod anchor;
pub mod border;
pub mod grid;
pub mod item;
pub mod stack;

pub use anchor::{Anchor, AnchorItem, AnchorLayout};
pub use border::BorderLayout;
pub use error::LayoutError;
pub use geometry::{BBox, CoordinateMapper, Extents, HPosition, Size, VPosition};
pub use grid::{Grid, GridItem, Spacing, TrackPolicy, TrackSizing, Tracks};
pub use item::{ContentItem, ContentSize, LayoutItem};
pub use layoutable::{LayoutState, Layoutable};
pub use sizing::{BoxSizing, ExtBoxSizing, SizeHint, SizingPolicy, TrackAlign};
pub use stack::{Orientation, Stack};
