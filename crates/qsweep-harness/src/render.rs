//! SVG plot rendering.
//!
//! The comparison plot is a hand-built SVG line chart: qubit count on a
//! linear x-axis, mean duration on a log-scale y-axis spanning whole
//! decades, one series per backend. Failed rows are omitted from the lines
//! (they truncate a series, which is exactly the visual the sweep policy
//! produces). No plotting library is involved, so the artifact is fully
//! deterministic for a given table.

use std::fmt::Write;

use crate::error::{HarnessError, HarnessResult};
use crate::report::SerializedTable;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 500.0;
const LEFT: f64 = 70.0;
const RIGHT: f64 = 760.0;
const TOP: f64 = 50.0;
const BOTTOM: f64 = 440.0;

/// One fixed color per series, assigned in table order.
const PALETTE: &[&str] = &["#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd"];

struct Series<'a> {
    label: &'a str,
    color: &'static str,
    points: Vec<(f64, f64)>,
}

/// Render the comparison plot for a report document.
///
/// A table with no successful rows at all still renders: the frame is
/// drawn with a centered note instead of data, so a completely failed run
/// leaves a legible placeholder artifact rather than nothing. Tables the
/// sweep itself produced always carry finite durations; a deserialized
/// document with a NaN or infinite duration is unrenderable and errors
/// with [`HarnessError::Render`].
pub fn render_svg(table: &SerializedTable) -> HarnessResult<String> {
    let mut series: Vec<Series<'_>> = Vec::new();
    for (idx, s) in table.series.iter().enumerate() {
        let mut points = Vec::new();
        for row in &s.rows {
            if let Some(ms) = row.duration_ms {
                if !ms.is_finite() {
                    return Err(HarnessError::Render(format!(
                        "non-finite duration for {} at {} qubits",
                        s.backend, row.qubits
                    )));
                }
                points.push((f64::from(row.qubits), ms.max(1e-6)));
            }
        }
        if !points.is_empty() {
            series.push(Series {
                label: s.label.as_str(),
                color: PALETTE[idx % PALETTE.len()],
                points,
            });
        }
    }

    let mut svg = String::new();
    let _ = writeln!(svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">"#
    );
    let _ = writeln!(svg, r##"  <rect width="100%" height="100%" fill="#ffffff"/>"##);
    let _ = writeln!(
        svg,
        r#"  <text x="{x}" y="28" text-anchor="middle" font-family="sans-serif" font-size="18" font-weight="bold">QFT</text>"#,
        x = (LEFT + RIGHT) / 2.0
    );
    let _ = writeln!(
        svg,
        r##"  <rect x="{LEFT}" y="{TOP}" width="{w}" height="{h}" fill="none" stroke="#333333"/>"##,
        w = RIGHT - LEFT,
        h = BOTTOM - TOP
    );

    if series.is_empty() {
        let _ = writeln!(
            svg,
            r##"  <text x="{x}" y="{y}" text-anchor="middle" font-family="sans-serif" font-size="14" fill="#666666">no successful samples</text>"##,
            x = (LEFT + RIGHT) / 2.0,
            y = (TOP + BOTTOM) / 2.0
        );
        let _ = writeln!(svg, "</svg>");
        return Ok(svg);
    }

    // Linear x over the qubit counts that actually produced data.
    let mut x_min = f64::MAX;
    let mut x_max = f64::MIN;
    let mut y_min = f64::MAX;
    let mut y_max = f64::MIN;
    for s in &series {
        for &(x, y) in &s.points {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
    }
    // Ticks start on the smallest qubit count that has data, so the axis
    // never labels a count the sweep could not have run.
    let tick_start = x_min as u32;
    if x_min == x_max {
        // Single-point sweep still deserves a sensible axis.
        x_min -= 1.0;
        x_max += 1.0;
    }

    // Log y spanning whole decades around the data.
    let mut dec_lo = y_min.log10().floor() as i32;
    let mut dec_hi = y_max.log10().ceil() as i32;
    if dec_lo == dec_hi {
        dec_hi += 1;
    }

    let sx = |q: f64| LEFT + (q - x_min) / (x_max - x_min) * (RIGHT - LEFT);
    let sy = |ms: f64| {
        BOTTOM
            - (ms.log10() - f64::from(dec_lo)) / f64::from(dec_hi - dec_lo) * (BOTTOM - TOP)
    };

    // Decade gridlines and y labels.
    for dec in dec_lo..=dec_hi {
        let y = sy(10f64.powi(dec));
        if dec > dec_lo && dec < dec_hi {
            let _ = writeln!(
                svg,
                r##"  <line x1="{LEFT}" y1="{y:.1}" x2="{RIGHT}" y2="{y:.1}" stroke="#dddddd"/>"##
            );
        }
        let _ = writeln!(
            svg,
            r#"  <text x="{x}" y="{ly:.1}" text-anchor="end" font-family="sans-serif" font-size="12">{label}</text>"#,
            x = LEFT - 8.0,
            ly = y + 4.0,
            label = decade_label(dec)
        );
    }

    // X ticks every two qubits.
    let mut tick = tick_start;
    while f64::from(tick) <= x_max {
        let x = sx(f64::from(tick));
        let _ = writeln!(
            svg,
            r##"  <line x1="{x:.1}" y1="{BOTTOM}" x2="{x:.1}" y2="{y2}" stroke="#333333"/>"##,
            y2 = BOTTOM + 5.0
        );
        let _ = writeln!(
            svg,
            r#"  <text x="{x:.1}" y="{y}" text-anchor="middle" font-family="sans-serif" font-size="12">{tick}</text>"#,
            y = BOTTOM + 20.0
        );
        tick += 2;
    }

    // Axis labels.
    let _ = writeln!(
        svg,
        r#"  <text x="{x}" y="{y}" text-anchor="middle" font-family="sans-serif" font-size="14">Qubits</text>"#,
        x = (LEFT + RIGHT) / 2.0,
        y = HEIGHT - 12.0
    );
    let _ = writeln!(
        svg,
        r#"  <text x="18" y="{y}" text-anchor="middle" font-family="sans-serif" font-size="14" transform="rotate(-90 18 {y})">Time (ms)</text>"#,
        y = (TOP + BOTTOM) / 2.0
    );

    // One polyline plus point markers per series.
    for s in &series {
        if s.points.len() > 1 {
            let path: Vec<String> = s
                .points
                .iter()
                .map(|&(x, y)| format!("{:.1},{:.1}", sx(x), sy(y)))
                .collect();
            let _ = writeln!(
                svg,
                r#"  <polyline points="{points}" fill="none" stroke="{color}" stroke-width="2"/>"#,
                points = path.join(" "),
                color = s.color
            );
        }
        for &(x, y) in &s.points {
            let _ = writeln!(
                svg,
                r#"  <circle cx="{cx:.1}" cy="{cy:.1}" r="3" fill="{color}"/>"#,
                cx = sx(x),
                cy = sy(y),
                color = s.color
            );
        }
    }

    // Legend, upper left inside the frame.
    for (idx, s) in series.iter().enumerate() {
        let y = TOP + 18.0 + idx as f64 * 18.0;
        let _ = writeln!(
            svg,
            r#"  <line x1="{x1}" y1="{y:.1}" x2="{x2}" y2="{y:.1}" stroke="{color}" stroke-width="2"/>"#,
            x1 = LEFT + 12.0,
            x2 = LEFT + 36.0,
            color = s.color
        );
        let _ = writeln!(
            svg,
            r#"  <text x="{x}" y="{ty:.1}" font-family="sans-serif" font-size="12">{label}</text>"#,
            x = LEFT + 42.0,
            ty = y + 4.0,
            label = s.label
        );
    }

    // The small print the timed intervals demand.
    let _ = writeln!(
        svg,
        r##"  <text x="{LEFT}" y="{y}" font-family="sans-serif" font-size="10" fill="#666666">timed intervals differ per backend; see results.json</text>"##,
        y = HEIGHT - 30.0
    );

    let _ = writeln!(svg, "</svg>");
    Ok(svg)
}

fn decade_label(dec: i32) -> String {
    if dec >= 0 {
        format!("{}", 10f64.powi(dec) as u64)
    } else {
        format!("{:.*}", dec.unsigned_abs() as usize, 10f64.powi(dec))
    }
}
