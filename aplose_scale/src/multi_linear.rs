// Copyright 2025 the APLOSE Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Piecewise ("multi-linear") scales.
//!
//! A multi-linear frequency axis gives a band of interest more pixels per Hz than the rest of the
//! spectrum. Each segment is a [`LinearScale`] over its own value range and its own share of the
//! pixel extent. Pixel space is contiguous; value ranges may leave gaps between segments.

extern crate alloc;

use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::error::InvalidScaleConfiguration;
use crate::linear::{LinearScale, LinearScaleSpec};
use crate::scale::ScaleMapping;

/// Allowed drift of the segment ratio sum away from 1.
///
/// Accepted ratios are divided by their sum, so the segments always fill the whole extent.
pub const RATIO_SUM_TOLERANCE: f64 = 1e-6;

/// A composite scale stitching ordered [`LinearScale`] segments into one pixel mapping.
///
/// Boundary policy: a value shared by two adjacent segments (the upper bound of one and the lower
/// bound of the next) resolves to the **later** segment, both when mapping values and when a
/// position falls exactly on a seam. When the segments share the boundary value both choices
/// land on the same pixel; when a value gap separates them the seam pixel reads back as the lower
/// bound of the later segment.
#[derive(Clone, Debug, PartialEq)]
pub struct MultiLinearScale {
    scales: SmallVec<[LinearScale; 4]>,
    /// Pixel offset where each segment starts.
    offsets: SmallVec<[f64; 4]>,
    /// Sum of the ratios of the segments before each segment.
    start_ratios: SmallVec<[f64; 4]>,
    extent: f64,
}

impl MultiLinearScale {
    /// Builds a scale from ordered segment specs over `total_extent` pixels.
    pub fn new(
        segments: &[LinearScaleSpec],
        total_extent: f64,
    ) -> Result<Self, InvalidScaleConfiguration> {
        if segments.is_empty() {
            return Err(InvalidScaleConfiguration::NoSegments);
        }

        let mut ratio_sum = 0.0;
        let mut prev_max: Option<f64> = None;
        for (index, spec) in segments.iter().enumerate() {
            let scale = LinearScale::with_ratio(
                spec.min_value,
                spec.max_value,
                spec.ratio,
                total_extent,
            )?;
            if prev_max.is_some_and(|max| scale.min_value() < max) {
                return Err(InvalidScaleConfiguration::UnorderedSegments { index });
            }
            prev_max = Some(scale.max_value());
            ratio_sum += scale.ratio();
        }
        if (ratio_sum - 1.0).abs() > RATIO_SUM_TOLERANCE {
            return Err(InvalidScaleConfiguration::RatioSum(ratio_sum));
        }

        // Ratios are rescaled by their sum so the last segment ends on `total_extent`.
        let mut scales = SmallVec::<[LinearScale; 4]>::with_capacity(segments.len());
        let mut offsets = SmallVec::<[f64; 4]>::with_capacity(segments.len());
        let mut start_ratios = SmallVec::<[f64; 4]>::with_capacity(segments.len());
        let mut offset = 0.0;
        let mut start_ratio = 0.0;
        for spec in segments {
            let scale = LinearScale::with_ratio(
                spec.min_value,
                spec.max_value,
                spec.ratio / ratio_sum,
                total_extent,
            )?;
            offsets.push(offset);
            start_ratios.push(start_ratio);
            offset += scale.pixel_extent();
            start_ratio += scale.ratio();
            scales.push(scale);
        }

        Ok(Self {
            scales,
            offsets,
            start_ratios,
            extent: total_extent,
        })
    }

    /// The segments, in pixel order.
    pub fn segments(&self) -> &[LinearScale] {
        &self.scales
    }

    /// Pixel offset where segment `index` starts.
    pub fn segment_offset(&self, index: usize) -> Option<f64> {
        self.offsets.get(index).copied()
    }

    /// Sum of the ratios of all segments before segment `index`.
    pub fn segment_start_ratio(&self, index: usize) -> Option<f64> {
        self.start_ratios.get(index).copied()
    }

    /// Index of the segment whose closed value range contains `value`.
    ///
    /// On a boundary shared by two segments this returns the later one. Values in a gap or
    /// outside the union of all segments return `None`.
    pub fn segment_for_value(&self, value: f64) -> Option<usize> {
        self.scales.iter().rposition(|s| s.contains(value))
    }

    /// Index of the segment covering pixel `position`.
    ///
    /// A seam position belongs to the later segment. Positions before the start use the first
    /// segment, positions at or past the end use the last one.
    pub fn segment_for_position(&self, position: f64) -> usize {
        for (index, (scale, offset)) in self.scales.iter().zip(&self.offsets).enumerate() {
            if position < offset + scale.pixel_extent() {
                return index;
            }
        }
        self.scales.len() - 1
    }

    fn last_index(&self) -> usize {
        self.scales.len() - 1
    }
}

impl ScaleMapping for MultiLinearScale {
    fn value_to_position(&self, value: f64) -> f64 {
        if value.is_nan() {
            return value;
        }
        if let Some(index) = self.segment_for_value(value) {
            return self.offsets[index] + self.scales[index].value_to_position(value);
        }

        let first = &self.scales[0];
        if value < first.min_value() {
            return first.value_to_position(value);
        }
        let last = self.last_index();
        if value > self.scales[last].max_value() {
            return self.offsets[last] + self.scales[last].value_to_position(value);
        }

        // Inside a value gap: every such value sits on the seam before the next segment.
        let next = self
            .scales
            .iter()
            .position(|s| s.min_value() > value)
            .unwrap_or(last);
        self.offsets[next]
    }

    fn values_to_position_range(&self, min: f64, max: f64) -> f64 {
        (self.value_to_position(max) - self.value_to_position(min)).abs()
    }

    fn position_to_value(&self, position: f64) -> f64 {
        let index = self.segment_for_position(position);
        self.scales[index].position_to_value(position - self.offsets[index])
    }

    fn positions_to_range(&self, min: f64, max: f64) -> f64 {
        (self.position_to_value(max) - self.position_to_value(min)).abs()
    }

    fn is_range_continuously_on_scale(&self, min: f64, max: f64) -> bool {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let (Some(lo), Some(hi)) = (self.segment_for_value(min), self.segment_for_value(max))
        else {
            return false;
        };
        if hi <= lo + 1 {
            return true;
        }
        self.scales[lo + 1..hi]
            .iter()
            .all(|s| s.min_value() >= min && s.max_value() <= max)
    }

    fn domain_min(&self) -> f64 {
        self.scales[0].min_value()
    }

    fn domain_max(&self) -> f64 {
        self.scales[self.last_index()].max_value()
    }

    fn extent(&self) -> f64 {
        self.extent
    }
}

/// Configuration for a multi-linear scale (ordered segments, no pixel extent yet).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct MultiLinearScaleSpec {
    /// Segments in ascending value order; their ratios must sum to 1.
    pub segments: Vec<LinearScaleSpec>,
}

impl MultiLinearScaleSpec {
    /// Creates a spec from ordered segments.
    pub fn new(segments: impl Into<Vec<LinearScaleSpec>>) -> Self {
        Self {
            segments: segments.into(),
        }
    }

    /// Appends a segment covering `[min_value, max_value]` with the given ratio.
    pub fn with_segment(mut self, min_value: f64, max_value: f64, ratio: f64) -> Self {
        self.segments
            .push(LinearScaleSpec::new(min_value, max_value).with_ratio(ratio));
        self
    }

    /// Instantiates a concrete scale for a given total pixel extent.
    pub fn instantiate(
        &self,
        total_extent: f64,
    ) -> Result<MultiLinearScale, InvalidScaleConfiguration> {
        let scale = MultiLinearScale::new(&self.segments, total_extent).inspect_err(|err| {
            tracing::warn!(
                segments = self.segments.len(),
                extent = total_extent,
                "rejected multi-linear scale: {err}"
            );
        })?;
        tracing::debug!(
            segments = scale.scales.len(),
            min = scale.domain_min(),
            max = scale.domain_max(),
            extent = total_extent,
            "built multi-linear scale"
        );
        Ok(scale)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn assert_close(got: f64, expected: f64) {
        assert!(
            (got - expected).abs() <= 1e-9 * expected.abs().max(1.0),
            "{got} != {expected}"
        );
    }

    fn two_bands() -> MultiLinearScale {
        MultiLinearScaleSpec::default()
            .with_segment(0.0, 1000.0, 0.5)
            .with_segment(1000.0, 16000.0, 0.5)
            .instantiate(400.0)
            .unwrap()
    }

    fn gapped() -> MultiLinearScale {
        MultiLinearScaleSpec::default()
            .with_segment(0.0, 100.0, 0.5)
            .with_segment(1000.0, 2000.0, 0.5)
            .instantiate(200.0)
            .unwrap()
    }

    #[test]
    fn maps_each_band_into_its_half() {
        let s = two_bands();
        assert_close(s.value_to_position(0.0), 0.0);
        assert_close(s.value_to_position(500.0), 100.0);
        assert_close(s.value_to_position(8500.0), 300.0);
        assert_close(s.value_to_position(16000.0), 400.0);
    }

    #[test]
    fn shared_boundary_resolves_to_later_segment() {
        let s = two_bands();
        assert_eq!(s.segment_for_value(1000.0), Some(1));
        assert_close(s.value_to_position(1000.0), 200.0);
        assert_eq!(s.segment_for_position(200.0), 1);
        assert_close(s.position_to_value(200.0), 1000.0);
    }

    #[test]
    fn inverse_walks_segments_by_cumulative_extent() {
        let s = two_bands();
        assert_close(s.position_to_value(100.0), 500.0);
        assert_close(s.position_to_value(300.0), 8500.0);
        assert_eq!(s.segment_for_position(199.999), 0);
    }

    #[test]
    fn values_outside_the_union_extrapolate_from_the_edge_segments() {
        let s = two_bands();
        assert_close(s.value_to_position(-100.0), -20.0);
        assert_close(s.value_to_position(17500.0), 420.0);
        assert_close(s.position_to_value(-20.0), -100.0);
        assert_close(s.position_to_value(420.0), 17500.0);
    }

    #[test]
    fn gap_values_collapse_onto_the_seam() {
        let s = gapped();
        assert_close(s.value_to_position(100.0), 100.0);
        assert_close(s.value_to_position(500.0), 100.0);
        assert_close(s.value_to_position(1000.0), 100.0);
        assert_close(s.position_to_value(100.0), 1000.0);
    }

    #[test]
    fn ranges_span_whole_intermediate_segments() {
        let s = gapped();
        // 50 -> 50 px, 1500 -> 150 px: the gap contributes no pixels.
        assert_close(s.values_to_position_range(50.0, 1500.0), 100.0);
        assert_close(s.values_to_position_range(1500.0, 50.0), 100.0);
        assert_close(s.positions_to_range(50.0, 150.0), 1450.0);
    }

    #[test]
    fn continuity_requires_both_ends_on_a_segment() {
        let s = gapped();
        assert!(s.is_range_continuously_on_scale(50.0, 1500.0));
        assert!(s.is_range_continuously_on_scale(1500.0, 50.0));
        assert!(s.is_range_continuously_on_scale(50.0, 50.0));
        assert!(!s.is_range_continuously_on_scale(50.0, 500.0));
        assert!(!s.is_range_continuously_on_scale(50.0, 3000.0));
        assert!(!s.is_range_continuously_on_scale(-1.0, 50.0));
    }

    #[test]
    fn continuity_across_three_segments() {
        let s = MultiLinearScaleSpec::default()
            .with_segment(0.0, 10.0, 0.25)
            .with_segment(20.0, 30.0, 0.25)
            .with_segment(40.0, 50.0, 0.5)
            .instantiate(100.0)
            .unwrap();
        assert!(s.is_range_continuously_on_scale(5.0, 45.0));
        assert!(!s.is_range_continuously_on_scale(5.0, 35.0));
        assert_eq!(s.segment_start_ratio(2), Some(0.5));
        assert_eq!(s.segment_offset(2), Some(50.0));
    }

    #[test]
    fn reports_the_union_as_domain() {
        let s = gapped();
        assert_eq!(s.domain_min(), 0.0);
        assert_eq!(s.domain_max(), 2000.0);
        assert_eq!(s.extent(), 200.0);
        assert_eq!(s.segments().len(), 2);
    }

    #[test]
    fn rejects_bad_partitions() {
        assert_eq!(
            MultiLinearScale::new(&[], 100.0),
            Err(InvalidScaleConfiguration::NoSegments)
        );
        let uneven = MultiLinearScaleSpec::default()
            .with_segment(0.0, 1.0, 0.5)
            .with_segment(1.0, 2.0, 0.4)
            .instantiate(100.0);
        assert!(matches!(uneven, Err(InvalidScaleConfiguration::RatioSum(_))));
        let overlapping = MultiLinearScaleSpec::default()
            .with_segment(0.0, 10.0, 0.5)
            .with_segment(5.0, 20.0, 0.5)
            .instantiate(100.0);
        assert_eq!(
            overlapping,
            Err(InvalidScaleConfiguration::UnorderedSegments { index: 1 })
        );
        let empty_segment = MultiLinearScaleSpec::default()
            .with_segment(0.0, 10.0, 0.5)
            .with_segment(10.0, 10.0, 0.5)
            .instantiate(100.0);
        assert!(matches!(
            empty_segment,
            Err(InvalidScaleConfiguration::EmptyDomain { .. })
        ));
    }
}
