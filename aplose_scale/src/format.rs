// Copyright 2025 the APLOSE Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick label formatting for frequency and generic numeric axes.

extern crate alloc;

use alloc::string::String;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Formats a frequency in Hz, switching to kHz from 1000 Hz up.
///
/// At most one decimal is kept and a trailing `.0` is dropped: `500`, `12.5`, `1.5k`, `16k`.
pub fn format_frequency(hz: f64) -> String {
    if !hz.is_finite() {
        return alloc::format!("{hz}");
    }
    if hz.abs() >= 1000.0 {
        let mut out = trim_one_decimal(hz / 1000.0);
        out.push('k');
        out
    } else {
        trim_one_decimal(hz)
    }
}

/// Formats a tick value with as many decimals as multiples of `step` need.
pub fn format_tick_with_step(v: f64, step: f64) -> String {
    if !v.is_finite() {
        return alloc::format!("{v}");
    }
    let decimals = step_decimals(step.abs());
    let v = if v == 0.0 { 0.0 } else { v };
    alloc::format!("{v:.decimals$}")
}

/// Smallest number of decimals (up to 3) that represents multiples of `step` exactly.
pub(crate) fn step_decimals(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 {
        return 0;
    }
    let mut scaled = step;
    for decimals in 0..3 {
        if (scaled - scaled.round()).abs() <= 1e-9 * scaled.max(1.0) {
            return decimals;
        }
        scaled *= 10.0;
    }
    3
}

fn trim_one_decimal(v: f64) -> String {
    let rounded = (v * 10.0).round() / 10.0;
    // Avoid printing `-0`.
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let mut out = alloc::format!("{rounded:.1}");
    if out.ends_with(".0") {
        out.truncate(out.len() - 2);
    }
    out
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn frequencies_switch_to_khz() {
        assert_eq!(format_frequency(0.0), "0");
        assert_eq!(format_frequency(500.0), "500");
        assert_eq!(format_frequency(12.5), "12.5");
        assert_eq!(format_frequency(1000.0), "1k");
        assert_eq!(format_frequency(1500.0), "1.5k");
        assert_eq!(format_frequency(16000.0), "16k");
        assert_eq!(format_frequency(44100.0), "44.1k");
    }

    #[test]
    fn tick_decimals_follow_the_step() {
        assert_eq!(format_tick_with_step(3.0, 1.0), "3");
        assert_eq!(format_tick_with_step(0.30000000000000004, 0.1), "0.3");
        assert_eq!(format_tick_with_step(2.5, 0.25), "2.50");
        assert_eq!(format_tick_with_step(-0.0, 1.0), "0");
    }
}
