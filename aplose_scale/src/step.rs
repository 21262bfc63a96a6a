// Copyright 2025 the APLOSE Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis step (tick) generation.
//!
//! Steps are generated per segment at a caller-chosen [`Cadence`]: every multiple of `step`
//! inside the segment's domain becomes a tick, and multiples of `big_step` are major ticks. On a
//! multi-linear scale, ticks from two segments that land on the same pixel (typically the seam)
//! are merged into one step carrying both values, so labels never overlap there.

extern crate alloc;

use alloc::vec::Vec;

use smallvec::SmallVec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::error::InvalidScaleConfiguration;
use crate::linear::LinearScale;
use crate::multi_linear::MultiLinearScale;
use crate::scale::{Scale, ScaleMapping};

/// Steps closer than this many pixels are considered coincident by default.
pub const DEFAULT_COINCIDENCE_EPSILON: f64 = 0.5;

/// Upper bound on the ticks generated for a single segment; denser cadences are coarsened.
pub const MAX_STEPS_PER_SEGMENT: usize = 10_000;

/// Tolerance (in cadence units) when snapping segment bounds to cadence multiples.
const INDEX_EPSILON: f64 = 1e-9;

/// Tick weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StepImportance {
    /// A minor, unlabeled tick.
    Small,
    /// A major, labeled tick.
    Big,
}

/// A tick on an axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    /// Pixel offset of the tick, measured like [`ScaleMapping::value_to_position`].
    pub position: f64,
    /// Tick weight.
    pub importance: StepImportance,
    /// Domain value at this tick.
    pub value: f64,
    /// Value of a coincident tick from the previous segment, merged into this one.
    pub additional_value: Option<f64>,
    /// Cumulative ratio of the segments before the segment that produced this step.
    ///
    /// `None` for steps of a plain linear scale.
    pub corresponding_ratio: Option<f64>,
}

/// Minor/major tick spacing, in domain units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cadence {
    step: f64,
    big_step: f64,
}

impl Cadence {
    /// Creates a cadence with a tick every `step` and a major tick every `big_step`.
    pub fn new(step: f64, big_step: f64) -> Result<Self, InvalidScaleConfiguration> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(step) || !valid(big_step) {
            return Err(InvalidScaleConfiguration::Cadence { step, big_step });
        }
        Ok(Self { step, big_step })
    }

    /// Minor tick spacing.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Major tick spacing.
    pub fn big_step(&self) -> f64 {
        self.big_step
    }

    /// Time-axis cadence for a file lasting `seconds`.
    ///
    /// Short files tick every second with a major tick every five; longer files space ticks out
    /// up to quarter-hours with hourly majors.
    pub fn for_duration(seconds: f64) -> Self {
        // (longest duration, step, big step), in seconds.
        const DURATION_CADENCES: &[(f64, f64, f64)] = &[
            (2.0, 0.1, 0.5),
            (10.0, 0.5, 1.0),
            (60.0, 1.0, 5.0),
            (300.0, 5.0, 30.0),
            (900.0, 30.0, 120.0),
            (3600.0, 60.0, 600.0),
            (4.0 * 3600.0, 5.0 * 60.0, 30.0 * 60.0),
        ];

        for &(longest, step, big_step) in DURATION_CADENCES {
            if seconds <= longest {
                return Self { step, big_step };
            }
        }
        Self {
            step: 15.0 * 60.0,
            big_step: 3600.0,
        }
    }

    /// A 1/2/5 cadence giving roughly `target_count` ticks over `span`.
    ///
    /// Major ticks fall on the next round magnitude: `1 → 5`, `2 → 10`, `5 → 10`. A degenerate
    /// span or a zero count yields a unit cadence.
    pub fn for_span(span: f64, target_count: usize) -> Self {
        let raw = span.abs() / target_count as f64;
        if !raw.is_finite() || raw <= 0.0 {
            return Self {
                step: 1.0,
                big_step: 5.0,
            };
        }
        let base = 10_f64.powf(raw.log10().floor());
        let error = raw / base;
        let (step, big_step) = if error >= 7.5 {
            (10.0, 50.0)
        } else if error >= 3.5 {
            (5.0, 10.0)
        } else if error >= 1.5 {
            (2.0, 10.0)
        } else {
            (1.0, 5.0)
        };
        Self {
            step: step * base,
            big_step: big_step * base,
        }
    }

    /// Scales both spacings by the smallest 1/2/5 multiple of a power of ten not below `factor`.
    fn coarsened(self, factor: f64) -> Self {
        let base = 10_f64.powf(factor.log10().floor());
        let nice = [1.0, 2.0, 5.0, 10.0]
            .into_iter()
            .find(|m| m * base >= factor)
            .unwrap_or(10.0)
            * base;
        Self {
            step: self.step * nice,
            big_step: self.big_step * nice,
        }
    }
}

/// Generates axis steps for a scale.
#[derive(Clone, Debug, PartialEq)]
pub struct StepGenerator {
    cadence: Cadence,
    segment_cadences: SmallVec<[Cadence; 4]>,
    coincidence_epsilon: f64,
}

impl StepGenerator {
    /// Creates a generator using `cadence` for every segment.
    pub fn new(cadence: Cadence) -> Self {
        Self {
            cadence,
            segment_cadences: SmallVec::new(),
            coincidence_epsilon: DEFAULT_COINCIDENCE_EPSILON,
        }
    }

    /// Overrides the cadence of the first segments of a multi-linear scale, in segment order.
    ///
    /// Segments past the end of `cadences` use the default cadence.
    pub fn with_segment_cadences(mut self, cadences: impl IntoIterator<Item = Cadence>) -> Self {
        self.segment_cadences = cadences.into_iter().collect();
        self
    }

    /// Sets the pixel distance under which ticks of adjacent segments are merged.
    pub fn with_coincidence_epsilon(mut self, epsilon: f64) -> Self {
        self.coincidence_epsilon = epsilon.max(0.0);
        self
    }

    /// The default cadence.
    pub fn cadence(&self) -> Cadence {
        self.cadence
    }

    /// Generates steps for either scale variant.
    pub fn steps(&self, scale: &Scale) -> Vec<Step> {
        match scale {
            Scale::Linear(s) => self.linear_steps(s),
            Scale::MultiLinear(s) => self.multi_linear_steps(s),
        }
    }

    /// Generates steps for a linear scale, ordered by position.
    pub fn linear_steps(&self, scale: &LinearScale) -> Vec<Step> {
        let mut out = Vec::new();
        segment_steps(scale, self.cadence, 0.0, None, &mut out);
        out
    }

    /// Generates steps for a multi-linear scale, merging ticks that coincide across segments.
    ///
    /// The result is ordered by `corresponding_ratio`, then by position.
    pub fn multi_linear_steps(&self, scale: &MultiLinearScale) -> Vec<Step> {
        let mut raw = Vec::new();
        for (index, segment) in scale.segments().iter().enumerate() {
            let cadence = self
                .segment_cadences
                .get(index)
                .copied()
                .unwrap_or(self.cadence);
            segment_steps(
                segment,
                cadence,
                scale.segment_offset(index).unwrap_or(0.0),
                scale.segment_start_ratio(index),
                &mut raw,
            );
        }

        let mut out: Vec<Step> = Vec::with_capacity(raw.len());
        for step in raw {
            if let Some(prev) = out.last_mut()
                && prev.corresponding_ratio != step.corresponding_ratio
                && (prev.position - step.position).abs() <= self.coincidence_epsilon
            {
                *prev = merge_coincident(*prev, step);
                continue;
            }
            out.push(step);
        }

        out.sort_by(|a, b| {
            let ra = a.corresponding_ratio.unwrap_or(f64::NEG_INFINITY);
            let rb = b.corresponding_ratio.unwrap_or(f64::NEG_INFINITY);
            ra.total_cmp(&rb).then(a.position.total_cmp(&b.position))
        });
        out
    }
}

/// Pushes the ticks of one segment, in ascending value order.
///
/// A cadence that would exceed [`MAX_STEPS_PER_SEGMENT`] ticks is coarsened so the whole segment
/// stays covered. A segment holding no cadence multiple emits its two bounds as big steps; when
/// such a bound is merged into a seam step, the seam step is big whatever the other segment says.
fn segment_steps(
    segment: &LinearScale,
    cadence: Cadence,
    offset: f64,
    corresponding_ratio: Option<f64>,
    out: &mut Vec<Step>,
) {
    let min = segment.min_value();
    let max = segment.max_value();
    let step = cadence.step();

    let first = (min / step - INDEX_EPSILON).ceil();
    let last = (max / step + INDEX_EPSILON).floor();
    let n_f = last - first + 1.0;
    if n_f.is_finite() && n_f > MAX_STEPS_PER_SEGMENT as f64 {
        let coarse = cadence.coarsened(n_f / MAX_STEPS_PER_SEGMENT as f64);
        tracing::warn!(
            step,
            coarse_step = coarse.step(),
            min,
            max,
            "cadence too dense for segment, coarsening"
        );
        if coarse.step().is_finite() && coarse.step() > step {
            segment_steps(segment, coarse, offset, corresponding_ratio, out);
            return;
        }
    }
    let n = if n_f.is_finite() && n_f >= 1.0 {
        let n_f = n_f.min(MAX_STEPS_PER_SEGMENT as f64);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "guarded by finite/positive checks and capped at MAX_STEPS_PER_SEGMENT"
        )]
        {
            n_f as u64
        }
    } else {
        0
    };

    let push = |out: &mut Vec<Step>, value: f64, importance| {
        out.push(Step {
            position: offset + segment.value_to_position(value),
            importance,
            value,
            additional_value: None,
            corresponding_ratio,
        });
    };

    if n == 0 {
        // Never leave an axis segment bare: fall back to its bounds.
        push(out, min, StepImportance::Big);
        push(out, max, StepImportance::Big);
        return;
    }

    for i in 0..n {
        let value = ((first + i as f64) * step).clamp(min, max);
        let importance = if is_multiple_of(value, cadence.big_step()) {
            StepImportance::Big
        } else {
            StepImportance::Small
        };
        push(out, value, importance);
    }
}

/// Merges `later` (from the following segment) into `earlier`.
fn merge_coincident(earlier: Step, later: Step) -> Step {
    Step {
        position: later.position,
        importance: earlier.importance.max(later.importance),
        value: later.value,
        additional_value: (earlier.value != later.value).then_some(earlier.value),
        corresponding_ratio: later.corresponding_ratio,
    }
}

fn is_multiple_of(value: f64, of: f64) -> bool {
    let q = value / of;
    (q - q.round()).abs() <= INDEX_EPSILON * q.abs().max(1.0)
}
