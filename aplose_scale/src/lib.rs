// Copyright 2025 the APLOSE Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value-to-pixel scales for spectrogram annotation views.
//!
//! This crate is the geometry layer under an annotation canvas:
//! - **Scales** map signal values (seconds, Hz) to pixel offsets and back. A
//!   [`MultiLinearScale`] stitches several linear bands side by side, each taking a fixed share
//!   of the pixel extent, so a frequency axis can give more room to the band of interest.
//! - **Steps** are the ticks of an axis, merged across band seams.
//! - **Pointer projection** turns viewport pointer positions into time and frequency, and
//!   annotation boxes back into canvas rectangles.
//!
//! Rendering, hit testing and persistence are out of scope; callers feed pixel sizes in and get
//! plain values and [`kurbo`] geometry out.
//!
//! ```
//! use aplose_scale::{MultiLinearScaleSpec, ScaleMapping};
//!
//! let frequency = MultiLinearScaleSpec::default()
//!     .with_segment(0.0, 1000.0, 0.5)
//!     .with_segment(1000.0, 16000.0, 0.5)
//!     .instantiate(400.0)
//!     .unwrap();
//! assert!((frequency.value_to_position(500.0) - 100.0).abs() < 1e-9);
//! assert!((frequency.value_to_position(8500.0) - 300.0).abs() < 1e-9);
//! ```

#![no_std]

extern crate alloc;

mod axis;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod linear;
mod multi_linear;
mod pointer;
mod scale;
mod step;
mod time;

pub use axis::{AxisOrient, AxisTick, AxisTicks};
pub use error::InvalidScaleConfiguration;
pub use format::{format_frequency, format_tick_with_step};
pub use linear::{LinearScale, LinearScaleSpec};
pub use multi_linear::{MultiLinearScale, MultiLinearScaleSpec, RATIO_SUM_TOLERANCE};
pub use pointer::{
    AnnotationBounds, FreqTime, annotation_rect, canvas_coords, freq_time, freq_time_unbounded,
};
pub use scale::{Scale, ScaleMapping, ScaleSpec};
pub use step::{
    Cadence, DEFAULT_COINCIDENCE_EPSILON, MAX_STEPS_PER_SEGMENT, Step, StepGenerator,
    StepImportance,
};
pub use time::{TimeAxisSpec, format_time_seconds};
