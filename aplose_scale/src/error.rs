// Copyright 2025 the APLOSE Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration errors raised when a scale is constructed.

use core::fmt;

/// A scale (or step cadence) was configured with values that cannot produce a usable mapping.
///
/// These are raised at construction time only. Once a scale exists, every mapping operation on
/// it is total, so callers handle this error once, where the axis is built, and should show a
/// diagnostic instead of falling back to some default scale.
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum InvalidScaleConfiguration {
    /// `max_value` is not strictly greater than `min_value`.
    EmptyDomain {
        /// The configured lower bound.
        min: f64,
        /// The configured upper bound.
        max: f64,
    },
    /// A domain bound is NaN or infinite.
    NonFinite,
    /// A segment ratio is outside `(0, 1]`.
    Ratio(f64),
    /// The total pixel extent is not a finite, strictly positive number.
    Extent(f64),
    /// A multi-linear scale was configured without any segment.
    NoSegments,
    /// Segment ratios of a multi-linear scale do not sum to 1.
    RatioSum(f64),
    /// Segment `index` starts below the end of the segment before it.
    UnorderedSegments {
        /// Index of the offending segment.
        index: usize,
    },
    /// A time axis zoom factor is below 1 or not finite.
    Zoom(f64),
    /// A step cadence is not made of two finite, strictly positive values.
    Cadence {
        /// The configured minor step.
        step: f64,
        /// The configured major step.
        big_step: f64,
    },
}

impl fmt::Display for InvalidScaleConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDomain { min, max } => {
                write!(f, "scale domain is empty: max ({max}) must exceed min ({min})")
            }
            Self::NonFinite => write!(f, "scale domain bounds must be finite"),
            Self::Ratio(ratio) => write!(f, "segment ratio {ratio} is outside (0, 1]"),
            Self::Extent(extent) => write!(f, "pixel extent {extent} must be finite and positive"),
            Self::NoSegments => write!(f, "multi-linear scale has no segment"),
            Self::RatioSum(sum) => write!(f, "segment ratios sum to {sum}, expected 1"),
            Self::UnorderedSegments { index } => {
                write!(f, "segment {index} overlaps or precedes the previous segment")
            }
            Self::Zoom(zoom) => write!(f, "zoom factor {zoom} must be finite and at least 1"),
            Self::Cadence { step, big_step } => {
                write!(f, "step cadence ({step}, {big_step}) must be finite and positive")
            }
        }
    }
}

impl core::error::Error for InvalidScaleConfiguration {}
