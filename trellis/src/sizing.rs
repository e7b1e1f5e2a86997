//! Sizing policies and box-model configuration.
//!
//! The host document hands each layout node a [`BoxSizing`]: per-axis
//! policies, optional preferred sizes, min/max clamps, an optional aspect
//! ratio, and an outer margin. Defaults are filled in once when the sizing
//! is assigned ([`ExtBoxSizing`]), never re-derived per measurement.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::geometry::{Extents, Size};

/// How a box resolves one axis against the available viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizingPolicy {
    /// Exactly the configured size, viewport ignored.
    Fixed,
    /// Shrink to fit content.
    Min,
    /// Use the preferred size when it fits, otherwise shrink.
    #[default]
    Fit,
    /// Grow to fill the available viewport.
    Max,
}

impl FromStr for SizingPolicy {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed" => Ok(Self::Fixed),
            "min" => Ok(Self::Min),
            "fit" => Ok(Self::Fit),
            "max" => Ok(Self::Max),
            other => Err(LayoutError::UnknownSizingPolicy(other.to_owned())),
        }
    }
}

/// Alignment of an item inside a grid track that is wider than the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackAlign {
    #[default]
    Start,
    Center,
    End,
}

fn infinity() -> f32 {
    f32::INFINITY
}

/// Declarative sizing configuration for one layout node.
///
/// Every field has the defaulting the measurement contract expects, for both
/// `Default` and deserialization: policies default to `fit`, minimums to 0,
/// maximums to infinity, margin to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxSizing {
    pub width_policy: SizingPolicy,
    pub height_policy: SizingPolicy,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub min_width: f32,
    pub min_height: f32,
    #[serde(skip_serializing_if = "is_infinite")]
    pub max_width: f32,
    #[serde(skip_serializing_if = "is_infinite")]
    pub max_height: f32,
    /// Width/height ratio to maintain when neither axis pins it.
    pub aspect: Option<f32>,
    pub margin: Extents,
}

fn is_infinite(v: &f32) -> bool {
    v.is_infinite()
}

impl Default for BoxSizing {
    fn default() -> Self {
        Self {
            width_policy: SizingPolicy::default(),
            height_policy: SizingPolicy::default(),
            width: None,
            height: None,
            min_width: 0.0,
            min_height: 0.0,
            max_width: infinity(),
            max_height: infinity(),
            aspect: None,
            margin: Extents::ZERO,
        }
    }
}

impl BoxSizing {
    /// Fixed size on both axes.
    pub fn fixed(width: f32, height: f32) -> Self {
        Self {
            width_policy: SizingPolicy::Fixed,
            height_policy: SizingPolicy::Fixed,
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    /// Grow-to-fill on both axes.
    pub fn stretch() -> Self {
        Self {
            width_policy: SizingPolicy::Max,
            height_policy: SizingPolicy::Max,
            ..Self::default()
        }
    }

    /// Check configuration consistency.
    ///
    /// An aspect ratio with both axes fixed over-determines the box; that is
    /// an authoring bug, reported rather than silently resolved.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.aspect.is_some()
            && self.width_policy == SizingPolicy::Fixed
            && self.height_policy == SizingPolicy::Fixed
        {
            return Err(LayoutError::FixedAspect);
        }
        Ok(())
    }
}

/// [`BoxSizing`] with derived clamp sizes, computed once per assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtBoxSizing {
    pub sizing: BoxSizing,
    pub min_size: Size,
    pub max_size: Size,
}

impl ExtBoxSizing {
    pub fn new(sizing: BoxSizing) -> Self {
        let min_size = Size::new(sizing.min_width, sizing.min_height);
        let max_size = Size::new(sizing.max_width, sizing.max_height);
        Self { sizing, min_size, max_size }
    }

    /// The configured preferred size pair, axes independently optional.
    #[inline]
    pub fn size(&self) -> (Option<f32>, Option<f32>) {
        (self.sizing.width, self.sizing.height)
    }
}

impl Default for ExtBoxSizing {
    fn default() -> Self {
        Self::new(BoxSizing::default())
    }
}

/// A component's requested size for a given viewport.
///
/// `inner` is a content-box inset relative to the hint's own outer box; it
/// only exists for nodes with decorative bands around a center (a plot frame
/// with axes). `align` marks the hint as participating in cross-cell
/// alignment inside an enclosing grid.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizeHint {
    pub size: Size,
    pub inner: Option<Extents>,
    pub align: bool,
}

impl SizeHint {
    #[inline]
    pub fn exact(size: Size) -> Self {
        Self { size, inner: None, align: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Policy parsing
    // =========================================================================

    #[test]
    fn policy_from_str() {
        assert_eq!("fixed".parse::<SizingPolicy>().unwrap(), SizingPolicy::Fixed);
        assert_eq!("min".parse::<SizingPolicy>().unwrap(), SizingPolicy::Min);
        assert_eq!("fit".parse::<SizingPolicy>().unwrap(), SizingPolicy::Fit);
        assert_eq!("max".parse::<SizingPolicy>().unwrap(), SizingPolicy::Max);
    }

    #[test]
    fn policy_from_str_rejects_unknown() {
        let err = "grow".parse::<SizingPolicy>().unwrap_err();
        assert_eq!(err, LayoutError::UnknownSizingPolicy("grow".to_owned()));
    }

    // =========================================================================
    // BoxSizing defaults and validation
    // =========================================================================

    #[test]
    fn box_sizing_defaults() {
        let s = BoxSizing::default();
        assert_eq!(s.width_policy, SizingPolicy::Fit);
        assert_eq!(s.height_policy, SizingPolicy::Fit);
        assert_eq!(s.width, None);
        assert_eq!(s.min_width, 0.0);
        assert!(s.max_width.is_infinite());
        assert_eq!(s.margin, Extents::ZERO);
    }

    #[test]
    fn box_sizing_validate_rejects_fixed_aspect() {
        let mut s = BoxSizing::fixed(100.0, 50.0);
        s.aspect = Some(2.0);
        assert_eq!(s.validate(), Err(LayoutError::FixedAspect));
    }

    #[test]
    fn box_sizing_validate_allows_aspect_with_one_fixed_axis() {
        let s = BoxSizing {
            width_policy: SizingPolicy::Fixed,
            width: Some(100.0),
            aspect: Some(2.0),
            ..BoxSizing::default()
        };
        assert!(s.validate().is_ok());
    }

    // =========================================================================
    // Deserialization
    // =========================================================================

    #[test]
    fn box_sizing_deserializes_with_defaults() {
        let s: BoxSizing = serde_json::from_str(
            r#"{"width_policy": "fixed", "width": 300, "margin": {"left": 5, "right": 5}}"#,
        )
        .unwrap();
        assert_eq!(s.width_policy, SizingPolicy::Fixed);
        assert_eq!(s.width, Some(300.0));
        assert_eq!(s.height_policy, SizingPolicy::Fit);
        assert_eq!(s.margin.horizontal(), 10.0);
        assert_eq!(s.margin.vertical(), 0.0);
        assert!(s.max_height.is_infinite());
    }

    #[test]
    fn track_align_deserializes_snake_case() {
        let a: TrackAlign = serde_json::from_str(r#""center""#).unwrap();
        assert_eq!(a, TrackAlign::Center);
    }

    // =========================================================================
    // ExtBoxSizing
    // =========================================================================

    #[test]
    fn ext_box_sizing_derives_clamps_once() {
        let ext = ExtBoxSizing::new(BoxSizing {
            min_width: 10.0,
            min_height: 20.0,
            max_width: 100.0,
            max_height: 200.0,
            ..BoxSizing::default()
        });
        assert_eq!(ext.min_size, Size::new(10.0, 20.0));
        assert_eq!(ext.max_size, Size::new(100.0, 200.0));
        assert_eq!(ext.size(), (None, None));
    }
}
