// Copyright 2025 the APLOSE Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The mapping contract shared by every scale, and the scale enum used by axis owners.
//!
//! Positions are pixel offsets measured from the pixel of the lowest domain value. A horizontal
//! time axis uses them as-is; a vertical frequency axis flips them against the canvas height
//! (see [`freq_time`](crate::freq_time)).

use crate::error::InvalidScaleConfiguration;
use crate::linear::{LinearScale, LinearScaleSpec};
use crate::multi_linear::{MultiLinearScale, MultiLinearScaleSpec};

/// Value ↔ position mapping implemented by every scale.
///
/// Implementations are immutable: a scale is rebuilt whenever its pixel extent or its domain
/// changes, and every method is a pure function of its arguments.
pub trait ScaleMapping {
    /// Maps a domain value to a pixel offset. Values outside the domain extrapolate.
    fn value_to_position(&self, value: f64) -> f64;

    /// Pixel span covered by the value interval `[min, max]`, in either argument order.
    fn values_to_position_range(&self, min: f64, max: f64) -> f64;

    /// Maps a pixel offset back to a domain value.
    fn position_to_value(&self, position: f64) -> f64;

    /// Domain span covered by the pixel interval `[min, max]`, in either argument order.
    fn positions_to_range(&self, min: f64, max: f64) -> f64;

    /// Returns `true` if `[min, max]` can be drawn as one uninterrupted band on this scale.
    fn is_range_continuously_on_scale(&self, min: f64, max: f64) -> bool;

    /// Lowest value of the configured domain.
    fn domain_min(&self) -> f64;

    /// Highest value of the configured domain.
    fn domain_max(&self) -> f64;

    /// Number of pixels the scale spans.
    fn extent(&self) -> f64;
}

/// A concrete scale instance.
#[derive(Clone, Debug, PartialEq)]
pub enum Scale {
    /// Uniform linear scale.
    Linear(LinearScale),
    /// Piecewise linear scale.
    MultiLinear(MultiLinearScale),
}

impl From<LinearScale> for Scale {
    fn from(value: LinearScale) -> Self {
        Self::Linear(value)
    }
}

impl From<MultiLinearScale> for Scale {
    fn from(value: MultiLinearScale) -> Self {
        Self::MultiLinear(value)
    }
}

impl ScaleMapping for Scale {
    fn value_to_position(&self, value: f64) -> f64 {
        match self {
            Self::Linear(s) => s.value_to_position(value),
            Self::MultiLinear(s) => s.value_to_position(value),
        }
    }

    fn values_to_position_range(&self, min: f64, max: f64) -> f64 {
        match self {
            Self::Linear(s) => s.values_to_position_range(min, max),
            Self::MultiLinear(s) => s.values_to_position_range(min, max),
        }
    }

    fn position_to_value(&self, position: f64) -> f64 {
        match self {
            Self::Linear(s) => s.position_to_value(position),
            Self::MultiLinear(s) => s.position_to_value(position),
        }
    }

    fn positions_to_range(&self, min: f64, max: f64) -> f64 {
        match self {
            Self::Linear(s) => s.positions_to_range(min, max),
            Self::MultiLinear(s) => s.positions_to_range(min, max),
        }
    }

    fn is_range_continuously_on_scale(&self, min: f64, max: f64) -> bool {
        match self {
            Self::Linear(s) => s.is_range_continuously_on_scale(min, max),
            Self::MultiLinear(s) => s.is_range_continuously_on_scale(min, max),
        }
    }

    fn domain_min(&self) -> f64 {
        match self {
            Self::Linear(s) => s.domain_min(),
            Self::MultiLinear(s) => s.domain_min(),
        }
    }

    fn domain_max(&self) -> f64 {
        match self {
            Self::Linear(s) => s.domain_max(),
            Self::MultiLinear(s) => s.domain_max(),
        }
    }

    fn extent(&self) -> f64 {
        match self {
            Self::Linear(s) => s.extent(),
            Self::MultiLinear(s) => s.extent(),
        }
    }
}

/// A scale configuration (domain + ratios, no pixel extent yet).
///
/// With the `serde` feature this is internally tagged:
/// `{"type": "linear", "min_value": 0, "max_value": 60}` or
/// `{"type": "multi_linear", "segments": [...]}`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum ScaleSpec {
    /// Uniform linear scale.
    Linear(LinearScaleSpec),
    /// Piecewise linear scale.
    MultiLinear(MultiLinearScaleSpec),
}

impl From<LinearScaleSpec> for ScaleSpec {
    fn from(value: LinearScaleSpec) -> Self {
        Self::Linear(value)
    }
}

impl From<MultiLinearScaleSpec> for ScaleSpec {
    fn from(value: MultiLinearScaleSpec) -> Self {
        Self::MultiLinear(value)
    }
}

impl ScaleSpec {
    /// Instantiates a concrete scale spanning `total_extent` pixels.
    pub fn instantiate(&self, total_extent: f64) -> Result<Scale, InvalidScaleConfiguration> {
        match self {
            Self::Linear(s) => s.instantiate(total_extent).map(Scale::Linear),
            Self::MultiLinear(s) => s.instantiate(total_extent).map(Scale::MultiLinear),
        }
    }
}
