// Copyright 2025 the APLOSE Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis tick geometry.
//!
//! The spectrogram view has a time axis along the bottom edge of the canvas and a frequency axis
//! along its left edge. [`AxisTicks`] turns generated [`Step`]s into tick lines and label anchors
//! in axis-local coordinates; drawing them is left to the renderer.
//!
//! Axis-local coordinates put the axis line on `y = 0` (bottom axis, ticks grow downward) or
//! `x = 0` (left axis, ticks grow leftward). The left axis is flipped so that the highest value
//! sits on row 0, matching the canvas.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use kurbo::{Line, Point};

use crate::format::format_frequency;
use crate::step::{Step, StepImportance};
use crate::time::format_time_seconds;

/// Which canvas edge an axis is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// Horizontal axis below the canvas (time).
    Bottom,
    /// Vertical axis left of the canvas (frequency).
    Left,
}

/// One laid-out tick.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisTick {
    /// Tick line in axis-local coordinates.
    pub line: Line,
    /// Tick weight.
    pub importance: StepImportance,
    /// Label for the tick value; only major ticks are labeled.
    pub label: Option<String>,
    /// Label for a merged value from the previous segment.
    pub additional_label: Option<String>,
    /// Where the label should be anchored (past the outer end of the tick).
    pub label_anchor: Point,
}

/// Tick layout settings for one axis.
#[derive(Clone)]
pub struct AxisTicks {
    /// Edge the axis is attached to.
    pub orient: AxisOrient,
    /// Axis length in pixels (canvas width or height).
    pub extent: f64,
    /// Length of major ticks.
    pub big_tick_size: f64,
    /// Length of minor ticks.
    pub small_tick_size: f64,
    /// Gap between the end of a tick and its label anchor.
    pub label_padding: f64,
    /// Step passed to the label formatter, used to pick decimals.
    pub label_step: f64,
    /// Optional label formatter, called with `(value, label_step)`.
    ///
    /// Without one, bottom axes format seconds and left axes format frequencies.
    pub tick_formatter: Option<Arc<dyn Fn(f64, f64) -> String>>,
}

impl core::fmt::Debug for AxisTicks {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AxisTicks")
            .field("orient", &self.orient)
            .field("extent", &self.extent)
            .field("big_tick_size", &self.big_tick_size)
            .field("small_tick_size", &self.small_tick_size)
            .field("label_padding", &self.label_padding)
            .field("label_step", &self.label_step)
            .field("tick_formatter", &self.tick_formatter.is_some())
            .finish()
    }
}

impl AxisTicks {
    /// Creates tick settings with `big_tick_size = 10`, `small_tick_size = 5`,
    /// `label_padding = 3` and `label_step = 1`.
    pub fn new(orient: AxisOrient, extent: f64) -> Self {
        Self {
            orient,
            extent,
            big_tick_size: 10.0,
            small_tick_size: 5.0,
            label_padding: 3.0,
            label_step: 1.0,
            tick_formatter: None,
        }
    }

    /// Convenience constructor for the time axis.
    pub fn bottom(extent: f64) -> Self {
        Self::new(AxisOrient::Bottom, extent)
    }

    /// Convenience constructor for the frequency axis.
    pub fn left(extent: f64) -> Self {
        Self::new(AxisOrient::Left, extent)
    }

    /// Set major and minor tick lengths.
    pub fn with_tick_sizes(mut self, big: f64, small: f64) -> Self {
        self.big_tick_size = big;
        self.small_tick_size = small;
        self
    }

    /// Set the gap between tick end and label anchor.
    pub fn with_label_padding(mut self, label_padding: f64) -> Self {
        self.label_padding = label_padding;
        self
    }

    /// Set the step handed to the label formatter.
    pub fn with_label_step(mut self, label_step: f64) -> Self {
        self.label_step = label_step;
        self
    }

    /// Set a custom tick label formatter.
    pub fn with_tick_formatter(mut self, f: impl Fn(f64, f64) -> String + 'static) -> Self {
        self.tick_formatter = Some(Arc::new(f));
        self
    }

    /// Lays out `steps`, skipping any that fall outside `[0, extent]`.
    pub fn layout(&self, steps: &[Step]) -> Vec<AxisTick> {
        let mut out = Vec::with_capacity(steps.len());
        for step in steps {
            if step.position < -1.0e-9 || step.position > self.extent + 1.0e-9 {
                continue;
            }
            let size = match step.importance {
                StepImportance::Big => self.big_tick_size.abs(),
                StepImportance::Small => self.small_tick_size.abs(),
            };
            let reach = size + self.label_padding.max(0.0);
            let (line, label_anchor) = match self.orient {
                AxisOrient::Bottom => {
                    let x = step.position;
                    (Line::new((x, 0.0), (x, size)), Point::new(x, reach))
                }
                AxisOrient::Left => {
                    let y = self.extent - step.position;
                    (Line::new((0.0, y), (-size, y)), Point::new(-reach, y))
                }
            };
            let labeled = step.importance == StepImportance::Big;
            out.push(AxisTick {
                line,
                importance: step.importance,
                label: labeled.then(|| self.format_tick(step.value)),
                additional_label: step
                    .additional_value
                    .filter(|_| labeled)
                    .map(|v| self.format_tick(v)),
                label_anchor,
            });
        }
        out
    }

    fn format_tick(&self, v: f64) -> String {
        match &self.tick_formatter {
            Some(f) => (f)(v, self.label_step),
            None => match self.orient {
                AxisOrient::Bottom => format_time_seconds(v, self.label_step),
                AxisOrient::Left => format_frequency(v),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::vec;

    use super::*;
    use crate::linear::LinearScale;
    use crate::multi_linear::MultiLinearScaleSpec;
    use crate::step::{Cadence, StepGenerator};

    fn time_steps() -> Vec<Step> {
        let scale = LinearScale::new(0.0, 12.0, 120.0).unwrap();
        StepGenerator::new(Cadence::new(1.0, 5.0).unwrap()).linear_steps(&scale)
    }

    #[test]
    fn bottom_axis_labels_only_big_ticks() {
        let ticks = AxisTicks::bottom(120.0).layout(&time_steps());
        assert_eq!(ticks.len(), 13);
        let labels: Vec<&str> = ticks.iter().filter_map(|t| t.label.as_deref()).collect();
        assert_eq!(labels, vec!["0", "5", "10"]);

        let five = &ticks[5];
        assert_eq!(five.line, Line::new((50.0, 0.0), (50.0, 10.0)));
        assert_eq!(five.label_anchor, Point::new(50.0, 13.0));
        let one = &ticks[1];
        assert_eq!(one.line.p1, Point::new(10.0, 5.0));
        assert_eq!(one.label, None);
    }

    #[test]
    fn left_axis_puts_high_values_on_top() {
        let scale = LinearScale::new(0.0, 10.0, 100.0).unwrap();
        let steps = StepGenerator::new(Cadence::new(5.0, 5.0).unwrap()).linear_steps(&scale);
        let ticks = AxisTicks::left(100.0)
            .with_tick_sizes(8.0, 4.0)
            .layout(&steps);
        assert_eq!(ticks[0].line, Line::new((0.0, 100.0), (-8.0, 100.0)));
        assert_eq!(ticks[2].line, Line::new((0.0, 0.0), (-8.0, 0.0)));
        assert_eq!(ticks[2].label_anchor, Point::new(-11.0, 0.0));
    }

    #[test]
    fn merged_seam_step_carries_both_labels() {
        let scale = MultiLinearScaleSpec::default()
            .with_segment(0.0, 100.0, 0.5)
            .with_segment(1000.0, 2000.0, 0.5)
            .instantiate(200.0)
            .unwrap();
        let steps =
            StepGenerator::new(Cadence::new(100.0, 100.0).unwrap()).multi_linear_steps(&scale);
        let ticks = AxisTicks::left(200.0).layout(&steps);
        let seam = ticks
            .iter()
            .find(|t| t.additional_label.is_some())
            .unwrap();
        assert_eq!(seam.label.as_deref(), Some("1k"));
        assert_eq!(seam.additional_label.as_deref(), Some("100"));
        assert_eq!(seam.line.p0, Point::new(0.0, 100.0));
    }

    #[test]
    fn custom_formatter_receives_label_step() {
        let ticks = AxisTicks::bottom(120.0)
            .with_label_step(5.0)
            .with_tick_formatter(|v, step| std::format!("{v}/{step}"))
            .layout(&time_steps());
        assert_eq!(ticks[5].label.as_deref(), Some("5/5"));
    }

    #[test]
    fn steps_outside_the_axis_are_skipped() {
        let scale = LinearScale::new(0.0, 12.0, 120.0).unwrap();
        let steps = StepGenerator::new(Cadence::new(1.0, 5.0).unwrap()).linear_steps(&scale);
        let ticks = AxisTicks::bottom(60.0).layout(&steps);
        assert_eq!(ticks.len(), 7);
    }
}
