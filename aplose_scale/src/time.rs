// Copyright 2025 the APLOSE Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time axis configuration and label formatting.
//!
//! Time is a numeric value in **seconds** from the start of the spectrogram. The time axis is a
//! plain [`LinearScale`] whose pixel extent grows with the zoom level: at zoom `z` the canvas is
//! `z` times as wide as its container and the user scrolls horizontally.

extern crate alloc;

use alloc::string::String;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::error::InvalidScaleConfiguration;
use crate::format::step_decimals;
use crate::linear::LinearScale;
use crate::step::Cadence;

/// Configuration for a zoomable time axis (duration + zoom, no pixel width yet).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct TimeAxisSpec {
    /// Duration of the displayed file, in seconds.
    pub duration: f64,
    /// Zoom factor, at least 1.
    #[cfg_attr(feature = "serde", serde(default = "default_zoom"))]
    pub zoom: f64,
}

#[cfg(feature = "serde")]
fn default_zoom() -> f64 {
    1.0
}

impl TimeAxisSpec {
    /// Creates an unzoomed time axis over `[0, duration]`.
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            zoom: 1.0,
        }
    }

    /// Sets the zoom factor.
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    /// Instantiates the time scale for a container `container_width` pixels wide.
    pub fn instantiate(
        &self,
        container_width: f64,
    ) -> Result<LinearScale, InvalidScaleConfiguration> {
        if !(self.zoom.is_finite() && self.zoom >= 1.0) {
            tracing::warn!(zoom = self.zoom, "rejected time axis zoom");
            return Err(InvalidScaleConfiguration::Zoom(self.zoom));
        }
        let scale = LinearScale::new(0.0, self.duration, container_width * self.zoom)?;
        tracing::debug!(
            duration = self.duration,
            zoom = self.zoom,
            extent = scale.pixel_extent(),
            "built time scale"
        );
        Ok(scale)
    }

    /// Tick cadence for the duration visible in one container width at this zoom.
    pub fn cadence(&self) -> Cadence {
        Cadence::for_duration(self.duration / self.zoom.max(1.0))
    }
}

/// Formats a tick value (seconds) given the tick step (seconds).
///
/// Whole-second steps print `5`, `1:05` or `1:02:03`; sub-second steps keep as many decimals as
/// the step needs (`0.5`, `1:05.5`).
pub fn format_time_seconds(v: f64, step: f64) -> String {
    if !v.is_finite() {
        return alloc::format!("{v}");
    }

    let sign = if v < 0.0 { "-" } else { "" };
    let decimals = step_decimals(step.abs());
    let scale = [1.0, 10.0, 100.0, 1000.0][decimals];
    let rounded = (v.abs() * scale).round() / scale;
    let secs = {
        let secs_f = rounded.floor().clamp(0.0, i64::MAX as f64);
        #[allow(clippy::cast_possible_truncation, reason = "clamped to the i64 range")]
        {
            secs_f as i64
        }
    };
    let step = step.abs();

    let h = secs / 3600;
    let m = (secs / 60) % 60;
    let s = (secs % 60) as f64 + (rounded - rounded.floor());
    let width = if decimals == 0 { 2 } else { 3 + decimals };

    if step >= 3600.0 || h > 0 {
        alloc::format!("{sign}{h}:{m:02}:{s:0width$.decimals$}")
    } else if step >= 60.0 || m > 0 {
        alloc::format!("{sign}{m}:{s:0width$.decimals$}")
    } else {
        alloc::format!("{sign}{s:.decimals$}")
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::scale::ScaleMapping;

    #[test]
    fn time_format_seconds_minutes_hours() {
        assert_eq!(format_time_seconds(5.0, 1.0), "5");
        assert_eq!(format_time_seconds(65.0, 1.0), "1:05");
        assert_eq!(format_time_seconds(3723.0, 60.0), "1:02:03");
        assert_eq!(format_time_seconds(120.0, 60.0), "2:00");
        assert_eq!(format_time_seconds(-5.0, 1.0), "-5");
    }

    #[test]
    fn time_format_keeps_sub_second_precision() {
        assert_eq!(format_time_seconds(0.5, 0.1), "0.5");
        assert_eq!(format_time_seconds(65.5, 0.5), "1:05.5");
        assert_eq!(format_time_seconds(1.25, 0.25), "1.25");
        assert_eq!(format_time_seconds(59.96, 0.1), "1:00.0");
    }

    #[test]
    fn zoom_widens_the_time_scale() {
        let spec = TimeAxisSpec::new(60.0).with_zoom(4.0);
        let scale = spec.instantiate(600.0).unwrap();
        assert_eq!(scale.extent(), 2400.0);
        assert_eq!(scale.value_to_position(30.0), 1200.0);
        assert_eq!(scale.position_to_value(600.0), 15.0);
    }

    #[test]
    fn cadence_follows_the_visible_duration() {
        let unzoomed = TimeAxisSpec::new(600.0).cadence();
        assert_eq!((unzoomed.step(), unzoomed.big_step()), (30.0, 120.0));
        let zoomed = TimeAxisSpec::new(600.0).with_zoom(10.0).cadence();
        assert_eq!((zoomed.step(), zoomed.big_step()), (1.0, 5.0));
    }

    #[test]
    fn rejects_zoom_below_one() {
        assert_eq!(
            TimeAxisSpec::new(60.0).with_zoom(0.5).instantiate(600.0),
            Err(InvalidScaleConfiguration::Zoom(0.5))
        );
        assert!(TimeAxisSpec::new(0.0).instantiate(600.0).is_err());
    }
}
