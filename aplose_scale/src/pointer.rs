// Copyright 2025 the APLOSE Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer projection between the spectrogram canvas and signal coordinates.
//!
//! Pointer events arrive in viewport coordinates. The canvas bounds (also in viewport
//! coordinates) turn them into canvas-local pixels, and the two axis scales turn those into a
//! time (x axis, left to right) and a frequency (y axis, bottom to top: pixel row 0 is the
//! highest frequency).
//!
//! Everything here is a pure function of its inputs; callers own the scales and rebuild them
//! when the canvas is resized or zoomed.

use kurbo::{Point, Rect, Size};

use crate::scale::ScaleMapping;

/// A point in signal coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FreqTime {
    /// Seconds from the start of the file.
    pub time: f64,
    /// Frequency in Hz.
    pub frequency: f64,
}

/// Returns the pointer position relative to the canvas top-left corner.
///
/// `None` when the pointer is outside the canvas (edges included in the canvas).
pub fn canvas_coords(pointer: Point, canvas: Rect) -> Option<Point> {
    let local = Point::new(pointer.x - canvas.x0, pointer.y - canvas.y0);
    if (0.0..=canvas.width()).contains(&local.x) && (0.0..=canvas.height()).contains(&local.y) {
        Some(local)
    } else {
        None
    }
}

/// Projects a viewport pointer position onto the time and frequency axes.
///
/// `None` when the pointer is outside the canvas.
pub fn freq_time(
    pointer: Point,
    canvas: Rect,
    x_axis: &(impl ScaleMapping + ?Sized),
    y_axis: &(impl ScaleMapping + ?Sized),
) -> Option<FreqTime> {
    let local = canvas_coords(pointer, canvas)?;
    Some(project(local, canvas.height(), x_axis, y_axis))
}

/// Like [`freq_time`], but extrapolates when the pointer has left the canvas.
///
/// Drags that overshoot the canvas edge keep tracking the pointer; callers clamp the result to
/// the file bounds once the gesture ends.
pub fn freq_time_unbounded(
    pointer: Point,
    canvas: Rect,
    x_axis: &(impl ScaleMapping + ?Sized),
    y_axis: &(impl ScaleMapping + ?Sized),
) -> FreqTime {
    let local = Point::new(pointer.x - canvas.x0, pointer.y - canvas.y0);
    project(local, canvas.height(), x_axis, y_axis)
}

fn project(
    local: Point,
    canvas_height: f64,
    x_axis: &(impl ScaleMapping + ?Sized),
    y_axis: &(impl ScaleMapping + ?Sized),
) -> FreqTime {
    FreqTime {
        time: x_axis.position_to_value(local.x),
        frequency: y_axis.position_to_value(canvas_height - local.y),
    }
}

/// The time/frequency box of an annotation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnnotationBounds {
    /// Start time, in seconds.
    pub start_time: f64,
    /// End time, in seconds.
    pub end_time: f64,
    /// Lowest frequency, in Hz.
    pub start_frequency: f64,
    /// Highest frequency, in Hz.
    pub end_frequency: f64,
}

impl AnnotationBounds {
    /// Builds bounds from the two corners of a drag gesture, in any order.
    pub fn from_drag(a: FreqTime, b: FreqTime) -> Self {
        Self {
            start_time: a.time.min(b.time),
            end_time: a.time.max(b.time),
            start_frequency: a.frequency.min(b.frequency),
            end_frequency: a.frequency.max(b.frequency),
        }
    }

    /// Duration of the box, in seconds.
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Frequency span of the box, in Hz.
    pub fn bandwidth(&self) -> f64 {
        self.end_frequency - self.start_frequency
    }
}

/// Returns the canvas-local pixel rectangle of an annotation box.
///
/// `None` when the frequency range is not continuously on the y scale: such a box cannot be
/// drawn as a single rectangle.
pub fn annotation_rect(
    bounds: &AnnotationBounds,
    canvas: Size,
    x_axis: &(impl ScaleMapping + ?Sized),
    y_axis: &(impl ScaleMapping + ?Sized),
) -> Option<Rect> {
    if !y_axis.is_range_continuously_on_scale(bounds.start_frequency, bounds.end_frequency) {
        return None;
    }
    let x0 = x_axis.value_to_position(bounds.start_time);
    let width = x_axis.values_to_position_range(bounds.start_time, bounds.end_time);
    let bottom = canvas.height - y_axis.value_to_position(bounds.start_frequency);
    let height = y_axis.values_to_position_range(bounds.start_frequency, bounds.end_frequency);
    Some(Rect::new(x0, bottom - height, x0 + width, bottom))
}
