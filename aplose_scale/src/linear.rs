// Copyright 2025 the APLOSE Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform linear scales.

use crate::error::InvalidScaleConfiguration;
use crate::scale::ScaleMapping;

/// An affine mapping between a closed value interval and a pixel extent.
///
/// Positions are pixel offsets from the start of the scale (the pixel of `min_value`). When the
/// scale is one segment of a [`MultiLinearScale`](crate::MultiLinearScale), it only receives
/// `ratio` of the total extent.
///
/// Values outside `[min_value, max_value]` are not clamped: they extrapolate along the same line,
/// which is what interactive drags slightly past the canvas edge rely on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    min_value: f64,
    max_value: f64,
    ratio: f64,
    pixel_extent: f64,
    scale_factor: f64,
}

impl LinearScale {
    /// Creates a standalone scale (ratio 1) mapping `[min_value, max_value]` onto
    /// `[0, total_extent]`.
    pub fn new(
        min_value: f64,
        max_value: f64,
        total_extent: f64,
    ) -> Result<Self, InvalidScaleConfiguration> {
        Self::with_ratio(min_value, max_value, 1.0, total_extent)
    }

    /// Creates a scale occupying `ratio` of `total_extent`.
    pub fn with_ratio(
        min_value: f64,
        max_value: f64,
        ratio: f64,
        total_extent: f64,
    ) -> Result<Self, InvalidScaleConfiguration> {
        if !min_value.is_finite() || !max_value.is_finite() {
            return Err(InvalidScaleConfiguration::NonFinite);
        }
        if max_value <= min_value {
            return Err(InvalidScaleConfiguration::EmptyDomain {
                min: min_value,
                max: max_value,
            });
        }
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(InvalidScaleConfiguration::Ratio(ratio));
        }
        if !(total_extent.is_finite() && total_extent > 0.0) {
            return Err(InvalidScaleConfiguration::Extent(total_extent));
        }
        let pixel_extent = total_extent * ratio;
        Ok(Self {
            min_value,
            max_value,
            ratio,
            pixel_extent,
            scale_factor: pixel_extent / (max_value - min_value),
        })
    }

    /// Lower domain bound.
    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    /// Upper domain bound.
    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    /// Fraction of the total extent this scale occupies.
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Pixels covered by this scale (`total_extent * ratio`).
    pub fn pixel_extent(&self) -> f64 {
        self.pixel_extent
    }

    /// Pixels per domain unit.
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Returns `true` if `value` lies within the closed domain.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min_value && value <= self.max_value
    }
}

impl ScaleMapping for LinearScale {
    fn value_to_position(&self, value: f64) -> f64 {
        (value - self.min_value) * self.scale_factor
    }

    fn values_to_position_range(&self, min: f64, max: f64) -> f64 {
        (self.value_to_position(max) - self.value_to_position(min)).abs()
    }

    fn position_to_value(&self, position: f64) -> f64 {
        position / self.scale_factor + self.min_value
    }

    fn positions_to_range(&self, min: f64, max: f64) -> f64 {
        (self.position_to_value(max) - self.position_to_value(min)).abs()
    }

    fn is_range_continuously_on_scale(&self, _min: f64, _max: f64) -> bool {
        true
    }

    fn domain_min(&self) -> f64 {
        self.min_value
    }

    fn domain_max(&self) -> f64 {
        self.max_value
    }

    fn extent(&self) -> f64 {
        self.pixel_extent
    }
}

/// Configuration for a linear scale (domain + ratio, no pixel extent yet).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct LinearScaleSpec {
    /// Lower domain bound.
    pub min_value: f64,
    /// Upper domain bound.
    pub max_value: f64,
    /// Fraction of the total extent, `1.0` for a standalone scale.
    #[cfg_attr(feature = "serde", serde(default = "default_ratio"))]
    pub ratio: f64,
}

#[cfg(feature = "serde")]
fn default_ratio() -> f64 {
    1.0
}

impl LinearScaleSpec {
    /// Creates a standalone spec over `[min_value, max_value]`.
    pub fn new(min_value: f64, max_value: f64) -> Self {
        Self {
            min_value,
            max_value,
            ratio: 1.0,
        }
    }

    /// Sets the fraction of the total extent this scale occupies.
    pub fn with_ratio(mut self, ratio: f64) -> Self {
        self.ratio = ratio;
        self
    }

    /// Instantiates a concrete scale for a given total pixel extent.
    pub fn instantiate(&self, total_extent: f64) -> Result<LinearScale, InvalidScaleConfiguration> {
        let scale =
            LinearScale::with_ratio(self.min_value, self.max_value, self.ratio, total_extent)
                .inspect_err(|err| {
                    tracing::warn!(
                        min = self.min_value,
                        max = self.max_value,
                        ratio = self.ratio,
                        "rejected linear scale: {err}"
                    );
                })?;
        tracing::debug!(
            min = scale.min_value,
            max = scale.max_value,
            extent = scale.pixel_extent,
            "built linear scale"
        );
        Ok(scale)
    }
}
