//! Track-based 2D layout.
//!
//! A [`Grid`] places items into rows and columns of tracks. Each track
//! resolves to one of four behaviors: a fixed size, shrink-to-fit, fit with
//! content-driven promotion, or a flex share of leftover space. Sizing is
//! two-pass: a preferred pass measures everything unconstrained, leftover
//! space is distributed across flex tracks, then a final pass re-measures
//! against the resolved track budgets and only ever widens a track.
//!
//! This is the container that arranges plot figures: a grid of subplots with
//! shared toolbars, where neighboring frames align their inner gutters even
//! when axis decorations differ in thickness ([`SizeHint::inner`]).

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::geometry::{BBox, Size};
use crate::layoutable::{LayoutState, Layoutable};
use crate::sizing::{SizeHint, SizingPolicy, TrackAlign};

// =========================================================================
// Track configuration
// =========================================================================

/// Declared sizing behavior of a grid track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackPolicy {
    /// Explicit size, content-independent.
    Fixed,
    /// Shrink to fit content.
    Min,
    /// Shrink to fit, unless an item in the track wants to grow — then the
    /// track is promoted to a unit flex share.
    #[default]
    Fit,
    /// Greedy: a unit flex share of leftover space.
    Max,
    /// A proportional flex share of leftover space.
    Flex,
}

impl FromStr for TrackPolicy {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed" => Ok(Self::Fixed),
            "min" => Ok(Self::Min),
            "fit" => Ok(Self::Fit),
            "max" => Ok(Self::Max),
            "flex" => Ok(Self::Flex),
            other => Err(LayoutError::UnknownTrackPolicy(other.to_owned())),
        }
    }
}

/// Full declaration for one track: policy plus its policy-specific knobs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackSizing {
    pub policy: TrackPolicy,
    /// Track extent, required when `policy` is `fixed`.
    pub size: Option<f32>,
    /// Flex share, defaults to 1 for `flex` tracks.
    pub factor: Option<f32>,
    pub align: TrackAlign,
}

impl Default for TrackSizing {
    fn default() -> Self {
        Self {
            policy: TrackPolicy::default(),
            size: None,
            factor: None,
            align: TrackAlign::default(),
        }
    }
}

impl TrackSizing {
    pub fn policy(policy: TrackPolicy) -> Self {
        Self { policy, ..Self::default() }
    }

    pub fn fixed(size: f32) -> Self {
        Self {
            policy: TrackPolicy::Fixed,
            size: Some(size),
            ..Self::default()
        }
    }

    pub fn flex(factor: f32) -> Self {
        Self {
            policy: TrackPolicy::Flex,
            factor: Some(factor),
            ..Self::default()
        }
    }

    pub fn align(mut self, align: TrackAlign) -> Self {
        self.align = align;
        self
    }
}

/// Track declarations for one axis: a single policy applied uniformly, or a
/// per-index map with a `"*"` wildcard default.
///
/// A per-index map without a wildcard declares the exact track count; items
/// placed beyond it are a configuration bug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tracks {
    Uniform(TrackPolicy),
    PerIndex(BTreeMap<String, TrackSizing>),
}

impl Default for Tracks {
    fn default() -> Self {
        Self::Uniform(TrackPolicy::Fit)
    }
}

impl Tracks {
    pub fn uniform(policy: TrackPolicy) -> Self {
        Self::Uniform(policy)
    }

    pub fn per_index() -> Self {
        Self::PerIndex(BTreeMap::new())
    }

    /// Declare the track at `index`.
    pub fn with(mut self, index: usize, sizing: TrackSizing) -> Self {
        self.entry(index.to_string(), sizing);
        self
    }

    /// Declare the `"*"` wildcard applied to any undeclared track.
    pub fn with_default(mut self, sizing: TrackSizing) -> Self {
        self.entry("*".to_owned(), sizing);
        self
    }

    fn entry(&mut self, key: String, sizing: TrackSizing) {
        match self {
            Self::PerIndex(map) => {
                map.insert(key, sizing);
            }
            Self::Uniform(_) => {
                let mut map = BTreeMap::new();
                map.insert(key, sizing);
                *self = Self::PerIndex(map);
            }
        }
    }

    fn sizing_for(&self, index: usize) -> TrackSizing {
        match self {
            Self::Uniform(policy) => TrackSizing::policy(*policy),
            Self::PerIndex(map) => map
                .get(&index.to_string())
                .or_else(|| map.get("*"))
                .copied()
                .unwrap_or_default(),
        }
    }

    /// Every key of a per-index map must be a track index or the `"*"`
    /// wildcard. A typo would otherwise silently fall back to the default
    /// declaration.
    fn validate(&self) -> Result<(), LayoutError> {
        if let Self::PerIndex(map) = self {
            for key in map.keys() {
                if key != "*" && key.parse::<usize>().is_err() {
                    return Err(LayoutError::InvalidTrackKey(key.clone()));
                }
            }
        }
        Ok(())
    }

    /// The exact track count this declaration pins down, if any.
    fn declared_len(&self) -> Option<usize> {
        match self {
            Self::Uniform(_) => None,
            Self::PerIndex(map) => {
                if map.contains_key("*") {
                    return None;
                }
                map.keys()
                    .filter_map(|k| k.parse::<usize>().ok())
                    .max()
                    .map(|max| max + 1)
            }
        }
    }
}

/// Spacing between adjacent tracks: uniform, or `[horizontal, vertical]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Spacing {
    Uniform(f32),
    Axes(f32, f32),
}

impl Default for Spacing {
    fn default() -> Self {
        Self::Uniform(0.0)
    }
}

impl Spacing {
    fn resolve(self) -> (f32, f32) {
        match self {
            Self::Uniform(s) => (s, s),
            Self::Axes(h, v) => (h, v),
        }
    }
}

// =========================================================================
// Derived track state
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum TrackKind {
    Fixed(f32),
    Min,
    Fit,
    Flex(f32),
}

impl TrackKind {
    fn flex_factor(self) -> Option<f32> {
        match self {
            Self::Flex(factor) => Some(factor),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ResolvedTrack {
    kind: TrackKind,
    align: TrackAlign,
}

/// Derived grid structure, rebuilt from (items, rows, cols) alone — never
/// from a viewport.
#[derive(Debug, Default)]
struct GridState {
    nrows: usize,
    ncols: usize,
    rows: Vec<ResolvedTrack>,
    cols: Vec<ResolvedTrack>,
}

/// One sizing resolution of the grid: track extents and per-item hints from
/// the final measurement pass.
#[derive(Clone)]
struct GridSizing {
    size: Size,
    rows: Vec<f32>,
    cols: Vec<f32>,
    hints: Vec<SizeHint>,
}

// =========================================================================
// Grid
// =========================================================================

/// An item and the cell it occupies. Cells may hold several stacked items.
pub struct GridItem {
    pub layout: Box<dyn Layoutable>,
    pub row: usize,
    pub col: usize,
}

impl GridItem {
    pub fn new(layout: impl Layoutable + 'static, row: usize, col: usize) -> Self {
        Self { layout: Box::new(layout), row, col }
    }
}

/// Track-based 2D container.
pub struct Grid {
    state: LayoutState,
    items: Vec<GridItem>,
    rows: Tracks,
    cols: Tracks,
    spacing: Spacing,
    absolute: bool,
    grid: GridState,
    // Track resolution from the latest measurement. Arrangement reuses it so
    // placement never re-measures against the assigned box.
    resolved: RefCell<Option<GridSizing>>,
}

impl Grid {
    pub fn new(items: Vec<GridItem>) -> Self {
        let mut grid = Self {
            state: LayoutState::default(),
            items,
            rows: Tracks::default(),
            cols: Tracks::default(),
            spacing: Spacing::default(),
            absolute: false,
            grid: GridState::default(),
            resolved: RefCell::new(None),
        };
        grid.rebuild();
        grid
    }

    /// A single-row grid of fit tracks.
    pub fn from_row(children: Vec<Box<dyn Layoutable>>) -> Self {
        Self::new(
            children
                .into_iter()
                .enumerate()
                .map(|(col, layout)| GridItem { layout, row: 0, col })
                .collect(),
        )
    }

    /// A single-column grid of fit tracks.
    pub fn from_column(children: Vec<Box<dyn Layoutable>>) -> Self {
        Self::new(
            children
                .into_iter()
                .enumerate()
                .map(|(row, layout)| GridItem { layout, row, col: 0 })
                .collect(),
        )
    }

    pub fn rows(mut self, rows: Tracks) -> Self {
        self.rows = rows;
        self.rebuild();
        self
    }

    pub fn cols(mut self, cols: Tracks) -> Self {
        self.cols = cols;
        self.rebuild();
        self
    }

    pub fn spacing(mut self, spacing: Spacing) -> Self {
        self.spacing = spacing;
        self
    }

    /// Offset tracks from the outer box's own origin instead of (0, 0).
    /// Needed when the grid drives screen coordinates directly rather than
    /// being nested inside another layout.
    pub fn absolute(mut self, absolute: bool) -> Self {
        self.absolute = absolute;
        self
    }

    pub fn items(&self) -> &[GridItem] {
        &self.items
    }

    pub fn nrows(&self) -> usize {
        self.grid.nrows
    }

    pub fn ncols(&self) -> usize {
        self.grid.ncols
    }

    fn build_state(&self) -> Result<GridState, LayoutError> {
        self.rows.validate()?;
        self.cols.validate()?;

        let mut nrows = self.items.iter().map(|i| i.row + 1).max().unwrap_or(0);
        let mut ncols = self.items.iter().map(|i| i.col + 1).max().unwrap_or(0);

        let declared_rows = self.rows.declared_len();
        let declared_cols = self.cols.declared_len();
        for item in &self.items {
            if declared_rows.is_some_and(|n| item.row >= n)
                || declared_cols.is_some_and(|n| item.col >= n)
            {
                return Err(LayoutError::ItemOutOfBounds {
                    row: item.row,
                    col: item.col,
                    nrows: declared_rows.unwrap_or(nrows),
                    ncols: declared_cols.unwrap_or(ncols),
                });
            }
        }
        nrows = nrows.max(declared_rows.unwrap_or(0)).max(1);
        ncols = ncols.max(declared_cols.unwrap_or(0)).max(1);

        let rows = self.resolve_tracks(
            &self.rows,
            nrows,
            |item| item.row,
            |item| item.layout.is_height_expanding(),
        )?;
        let cols = self.resolve_tracks(
            &self.cols,
            ncols,
            |item| item.col,
            |item| item.layout.is_width_expanding(),
        )?;

        Ok(GridState { nrows, ncols, rows, cols })
    }

    fn resolve_tracks(
        &self,
        tracks: &Tracks,
        count: usize,
        index_of: impl Fn(&GridItem) -> usize,
        expanding: impl Fn(&GridItem) -> bool,
    ) -> Result<Vec<ResolvedTrack>, LayoutError> {
        (0..count)
            .map(|index| {
                let declared = tracks.sizing_for(index);
                let kind = match declared.policy {
                    TrackPolicy::Fixed => TrackKind::Fixed(
                        declared.size
                            .ok_or(LayoutError::FixedTrackWithoutSize(index))?,
                    ),
                    TrackPolicy::Min => TrackKind::Min,
                    TrackPolicy::Fit => {
                        let promoted = self
                            .items
                            .iter()
                            .any(|item| index_of(item) == index && expanding(item));
                        if promoted { TrackKind::Flex(1.0) } else { TrackKind::Fit }
                    }
                    TrackPolicy::Max => TrackKind::Flex(1.0),
                    TrackPolicy::Flex => TrackKind::Flex(declared.factor.unwrap_or(1.0)),
                };
                Ok(ResolvedTrack { kind, align: declared.align })
            })
            .collect()
    }

    /// Resolve track extents and item hints for a given viewport. The result
    /// is also recorded so the arrangement that follows a measurement places
    /// items against the exact same track sizes.
    fn size_grid(&self, viewport: Size) -> GridSizing {
        let (hspacing, vspacing) = self.spacing.resolve();
        let GridState { rows, cols, .. } = &self.grid;

        // Preferred pass: unconstrained except for fixed tracks.
        let track_base = |track: &ResolvedTrack| match track.kind {
            TrackKind::Fixed(size) => size,
            _ => 0.0,
        };
        let mut row_pref: Vec<f32> = rows.iter().map(track_base).collect();
        let mut col_pref: Vec<f32> = cols.iter().map(track_base).collect();

        let cell_viewport = |col: &ResolvedTrack, row: &ResolvedTrack| {
            Size::new(
                match col.kind {
                    TrackKind::Fixed(w) => w,
                    _ => f32::INFINITY,
                },
                match row.kind {
                    TrackKind::Fixed(h) => h,
                    _ => f32::INFINITY,
                },
            )
        };

        for item in &self.items {
            let hint = item
                .layout
                .measure(cell_viewport(&cols[item.col], &rows[item.row]));
            let margin = &item.layout.sizing().sizing.margin;
            if !matches!(rows[item.row].kind, TrackKind::Fixed(_)) {
                row_pref[item.row] =
                    row_pref[item.row].max(hint.size.height + margin.vertical());
            }
            if !matches!(cols[item.col].kind, TrackKind::Fixed(_)) {
                col_pref[item.col] =
                    col_pref[item.col].max(hint.size.width + margin.horizontal());
            }
        }

        let total = |sizes: &[f32], spacing: f32| {
            sizes.iter().sum::<f32>() + spacing * sizes.len().saturating_sub(1) as f32
        };
        let preferred = Size::new(total(&col_pref, hspacing), total(&row_pref, vspacing));

        // Available size: own fixed size, else the viewport when expanding,
        // else hug the preferred total.
        let sizing = &self.sizing().sizing;
        let axis_available = |policy, configured: Option<f32>, supplied: f32, expanding, pref| {
            if policy == SizingPolicy::Fixed {
                if let Some(value) = configured {
                    return value;
                }
            }
            if supplied.is_finite() && expanding { supplied } else { pref }
        };
        let available = Size::new(
            axis_available(
                sizing.width_policy,
                sizing.width,
                viewport.width,
                self.is_width_expanding(),
                preferred.width,
            ),
            axis_available(
                sizing.height_policy,
                sizing.height,
                viewport.height,
                self.is_height_expanding(),
                preferred.height,
            ),
        );

        // Flex distribution over the leftover.
        let mut row_sizes = row_pref.clone();
        let mut col_sizes = col_pref.clone();
        distribute_flex(rows, &mut row_sizes, available.height, vspacing);
        distribute_flex(cols, &mut col_sizes, available.width, hspacing);

        // Final pass: re-measure against resolved budgets; tracks only widen.
        let mut hints = Vec::with_capacity(self.items.len());
        for item in &self.items {
            let hint = item
                .layout
                .measure(Size::new(col_sizes[item.col], row_sizes[item.row]));
            let margin = &item.layout.sizing().sizing.margin;
            row_sizes[item.row] =
                row_sizes[item.row].max(hint.size.height + margin.vertical());
            col_sizes[item.col] =
                col_sizes[item.col].max(hint.size.width + margin.horizontal());
            hints.push(hint);
        }
        for (size, pref) in row_sizes.iter_mut().zip(&row_pref) {
            *size = size.max(*pref);
        }
        for (size, pref) in col_sizes.iter_mut().zip(&col_pref) {
            *size = size.max(*pref);
        }

        let size = Size::new(total(&col_sizes, hspacing), total(&row_sizes, vspacing));
        tracing::trace!(
            preferred_width = preferred.width,
            preferred_height = preferred.height,
            width = size.width,
            height = size.height,
            "grid tracks resolved"
        );

        let sized = GridSizing { size, rows: row_sizes, cols: col_sizes, hints };
        *self.resolved.borrow_mut() = Some(sized.clone());
        sized
    }
}

/// Sequential running-remainder distribution of leftover space.
///
/// Each flex track takes `round(leftover_remaining x factor / factor_remaining)`,
/// decrementing both remainders, which bounds the total rounding error to
/// under one unit per track. Shares clamp to `[0, leftover_remaining]`: a
/// negative leftover allocates nothing, and rounding up against a fractional
/// remainder never hands out more than is actually left.
fn distribute_flex(tracks: &[ResolvedTrack], sizes: &mut [f32], available: f32, spacing: f32) {
    let mut factor_remaining: f32 = tracks
        .iter()
        .filter_map(|t| t.kind.flex_factor())
        .sum();
    if factor_remaining == 0.0 {
        return;
    }

    let non_flex: f32 = tracks
        .iter()
        .zip(sizes.iter())
        .filter(|(t, _)| t.kind.flex_factor().is_none())
        .map(|(_, size)| *size)
        .sum();
    let gaps = spacing * tracks.len().saturating_sub(1) as f32;
    let mut leftover = available - non_flex - gaps;

    for (track, size) in tracks.iter().zip(sizes.iter_mut()) {
        if let Some(factor) = track.kind.flex_factor() {
            let share = (leftover * factor / factor_remaining)
                .round()
                .clamp(0.0, leftover.max(0.0));
            *size = share;
            leftover -= share;
            factor_remaining -= factor;
        }
    }
}

impl Layoutable for Grid {
    fn state(&self) -> &LayoutState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut LayoutState {
        &mut self.state
    }

    /// # Panics
    ///
    /// Panics on a misconfigured grid (item outside declared tracks, fixed
    /// track without a size, unparseable track key) — an authoring bug,
    /// reported at the offending call.
    fn rebuild(&mut self) {
        match self.build_state() {
            Ok(state) => self.grid = state,
            Err(err) => panic!("invalid grid configuration: {err}"),
        }
        *self.resolved.get_mut() = None;
    }

    /// A grid with a flex column wants to grow regardless of its own policy,
    /// unless that policy is fixed.
    fn is_width_expanding(&self) -> bool {
        let policy = self.sizing().sizing.width_policy;
        if policy == SizingPolicy::Fixed {
            return false;
        }
        policy == SizingPolicy::Max
            || self.grid.cols.iter().any(|c| c.kind.flex_factor().is_some())
    }

    fn is_height_expanding(&self) -> bool {
        let policy = self.sizing().sizing.height_policy;
        if policy == SizingPolicy::Fixed {
            return false;
        }
        policy == SizingPolicy::Max
            || self.grid.rows.iter().any(|r| r.kind.flex_factor().is_some())
    }

    fn measure_content(&self, viewport: Size) -> SizeHint {
        SizeHint::exact(self.size_grid(viewport).size)
    }

    fn arrange(&mut self, outer: BBox, _inner: BBox) {
        // Place against the track resolution of the measurement that
        // produced this box. Re-deriving tracks from the outer size would
        // hand space gained by track widening back to the flex tracks and
        // overflow the box.
        let recorded = self.resolved.borrow().clone();
        let sized = match recorded {
            Some(sized) if sized.size == outer.size() => sized,
            _ => self.size_grid(outer.size()),
        };
        let (hspacing, vspacing) = self.spacing.resolve();

        let offsets = |sizes: &[f32], origin: f32, spacing: f32| {
            let mut acc = origin;
            sizes
                .iter()
                .map(|size| {
                    let offset = acc;
                    acc += size + spacing;
                    offset
                })
                .collect::<Vec<f32>>()
        };
        let x0 = if self.absolute { outer.left() } else { 0.0 };
        let y0 = if self.absolute { outer.top() } else { 0.0 };
        let col_offsets = offsets(&sized.cols, x0, hspacing);
        let row_offsets = offsets(&sized.rows, y0, vspacing);

        // First pass: place outer boxes and record edge attachment, unioning
        // inner insets per track edge for aligning items.
        struct Placed {
            bbox: BBox,
            // left, right, top, bottom
            attached: [bool; 4],
        }
        let mut placed = Vec::with_capacity(self.items.len());
        let mut col_insets = vec![(0.0f32, 0.0f32); sized.cols.len()];
        let mut row_insets = vec![(0.0f32, 0.0f32); sized.rows.len()];

        for (item, hint) in self.items.iter().zip(&sized.hints) {
            let margin = item.layout.sizing().sizing.margin;
            let col = &self.grid.cols[item.col];
            let row = &self.grid.rows[item.row];

            let (left, attach_left, attach_right) = place_axis(
                col.align,
                col_offsets[item.col],
                sized.cols[item.col],
                hint.size.width,
                margin.left,
                margin.right,
            );
            let (top, attach_top, attach_bottom) = place_axis(
                row.align,
                row_offsets[item.row],
                sized.rows[item.row],
                hint.size.height,
                margin.top,
                margin.bottom,
            );
            let bbox = BBox::new(left, top, hint.size.width, hint.size.height);

            if hint.align {
                if let Some(inner) = hint.inner {
                    let (cl, cr) = &mut col_insets[item.col];
                    if attach_left {
                        *cl = cl.max(inner.left);
                    }
                    if attach_right {
                        *cr = cr.max(inner.right);
                    }
                    let (rt, rb) = &mut row_insets[item.row];
                    if attach_top {
                        *rt = rt.max(inner.top);
                    }
                    if attach_bottom {
                        *rb = rb.max(inner.bottom);
                    }
                }
            }
            placed.push(Placed {
                bbox,
                attached: [attach_left, attach_right, attach_top, attach_bottom],
            });
        }

        // Second pass: assign geometry, widening attached insets to the
        // track-wide union so neighboring frames share a common gutter.
        for (i, item) in self.items.iter_mut().enumerate() {
            let hint = &sized.hints[i];
            let Placed { bbox, attached } = &placed[i];
            match hint.inner {
                Some(mut inner) => {
                    if hint.align {
                        let (cl, cr) = col_insets[item.col];
                        let (rt, rb) = row_insets[item.row];
                        if attached[0] {
                            inner.left = cl;
                        }
                        if attached[1] {
                            inner.right = cr;
                        }
                        if attached[2] {
                            inner.top = rt;
                        }
                        if attached[3] {
                            inner.bottom = rb;
                        }
                    }
                    let inner_bbox = BBox::from_lrtb(
                        bbox.left() + inner.left,
                        bbox.top() + inner.top,
                        bbox.right() - inner.right,
                        bbox.bottom() - inner.bottom,
                    );
                    item.layout.set_geometry(*bbox, inner_bbox);
                }
                None => item.layout.set_outer_geometry(*bbox),
            }
        }
    }
}

/// Position one axis of an item inside its track. Returns the leading
/// coordinate plus whether the item is attached to the leading and trailing
/// track edges: an exact fill attaches both, otherwise the track alignment
/// pins exactly one.
fn place_axis(
    align: TrackAlign,
    track_offset: f32,
    track_extent: f32,
    size: f32,
    lead_margin: f32,
    trail_margin: f32,
) -> (f32, bool, bool) {
    let fills = size + lead_margin + trail_margin == track_extent;
    let offset = match align {
        TrackAlign::Start => track_offset + lead_margin,
        TrackAlign::End => track_offset + track_extent - trail_margin - size,
        TrackAlign::Center => {
            let free = track_extent - size - lead_margin - trail_margin;
            // Round, not floor: splitting an odd remainder must not drift
            // all slack to one side.
            track_offset + lead_margin + (free / 2.0).round()
        }
    };
    (
        offset,
        fills || align == TrackAlign::Start,
        fills || align == TrackAlign::End,
    )
}
