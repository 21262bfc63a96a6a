// Copyright 2025 the APLOSE Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Example binary for `aplose_scale`.
//!
//! Builds a spectrogram view (time axis plus a frequency axis read from JSON), prints its axis
//! ticks, then projects a drag gesture into an annotation box and back.
//!
//! Usage: `aplose_examples [frequency-scale.json]`. Set `RUST_LOG=debug` to see scale
//! construction.

use std::error::Error;

use aplose_scale::{
    AnnotationBounds, AxisTick, AxisTicks, Cadence, ScaleMapping, ScaleSpec, StepGenerator,
    TimeAxisSpec, annotation_rect, freq_time, freq_time_unbounded,
};
use kurbo::{Point, Rect};
use tracing_subscriber::EnvFilter;

const DEFAULT_FREQUENCY_SCALE: &str = r#"{
    "type": "multi_linear",
    "segments": [
        {"min_value": 0, "max_value": 1000, "ratio": 0.5},
        {"min_value": 1000, "max_value": 16000, "ratio": 0.5}
    ]
}"#;

const FILE_DURATION: f64 = 600.0;
const ZOOM: f64 = 4.0;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let json = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => DEFAULT_FREQUENCY_SCALE.to_owned(),
    };
    let frequency_spec: ScaleSpec = serde_json::from_str(&json)?;

    // The canvas sits 40 px right of and 10 px below the viewport origin.
    let canvas = Rect::new(40.0, 10.0, 640.0, 410.0);

    let time_spec = TimeAxisSpec::new(FILE_DURATION).with_zoom(ZOOM);
    let time = time_spec.instantiate(canvas.width())?;
    let frequency = frequency_spec.instantiate(canvas.height())?;
    tracing::info!(
        time_extent = time.extent(),
        frequency_extent = frequency.extent(),
        "spectrogram scales ready"
    );

    let time_cadence = time_spec.cadence();
    let time_steps = StepGenerator::new(time_cadence).linear_steps(&time);
    let time_ticks = AxisTicks::bottom(canvas.width())
        .with_label_step(time_cadence.step())
        .layout(&time_steps);
    println!("time axis ({} ticks in view):", time_ticks.len());
    print_labels(&time_ticks);

    let frequency_cadence = Cadence::for_span(frequency.domain_max() - frequency.domain_min(), 8);
    let frequency_steps = StepGenerator::new(frequency_cadence)
        .with_segment_cadences([Cadence::new(100.0, 500.0)?])
        .steps(&frequency);
    let frequency_ticks = AxisTicks::left(canvas.height()).layout(&frequency_steps);
    println!("frequency axis ({} ticks):", frequency_ticks.len());
    print_labels(&frequency_ticks);

    let start = Point::new(190.0, 300.0);
    let end = Point::new(700.0, 120.0);
    let Some(a) = freq_time(start, canvas, &time, &frequency) else {
        return Err("drag started outside the canvas".into());
    };
    let b = freq_time_unbounded(end, canvas, &time, &frequency);
    let mut bounds = AnnotationBounds::from_drag(a, b);
    bounds.end_time = bounds.end_time.min(FILE_DURATION);
    println!(
        "annotation: {:.2}s..{:.2}s, {:.0}Hz..{:.0}Hz",
        bounds.start_time, bounds.end_time, bounds.start_frequency, bounds.end_frequency
    );

    match annotation_rect(&bounds, canvas.size(), &time, &frequency) {
        Some(rect) => println!(
            "drawn at x {:.1}..{:.1}, y {:.1}..{:.1}",
            rect.x0, rect.x1, rect.y0, rect.y1
        ),
        None => println!("annotation spans a frequency gap and cannot be drawn"),
    }
    Ok(())
}

fn print_labels(ticks: &[AxisTick]) {
    for tick in ticks {
        let Some(label) = &tick.label else {
            continue;
        };
        match &tick.additional_label {
            Some(extra) => println!(
                "  {extra}|{label} at ({:.1}, {:.1})",
                tick.label_anchor.x, tick.label_anchor.y
            ),
            None => println!(
                "  {label} at ({:.1}, {:.1})",
                tick.label_anchor.x, tick.label_anchor.y
            ),
        }
    }
}
