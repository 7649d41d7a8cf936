// File: crates/hydroplot-core/src/grid.rs
// Summary: Tick layout helpers (linear, log decades, category and time labels).

use chrono::DateTime;

use crate::axis::{Axis, ScaleKind, TickMarker};

/// A tick position with its rendered label.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

/// Round step (1, 2 or 5 times a power of ten) giving roughly `target` ticks.
pub fn nice_step(span: f64, target: usize) -> f64 {
    let raw = span.abs() / target.max(1) as f64;
    if raw <= 0.0 || !raw.is_finite() { return 1.0; }
    let mag = 10f64.powf(raw.log10().floor());
    let norm = raw / mag;
    let nice = if norm < 1.5 { 1.0 } else if norm < 3.0 { 2.0 } else if norm < 7.0 { 5.0 } else { 10.0 };
    nice * mag
}

/// Multiples of a nice step inside `[min, max]`.
pub fn linear_ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    let step = nice_step(max - min, target);
    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

/// Powers of ten inside `[min, max]`; falls back to the endpoints when the
/// range does not span a full decade.
pub fn log_ticks(min: f64, max: f64) -> Vec<f64> {
    let lo = min.max(1e-12).log10().ceil() as i32;
    let hi = max.max(1e-12).log10().floor() as i32;
    if hi < lo {
        return vec![min, max];
    }
    (lo..=hi).map(|e| 10f64.powi(e)).collect()
}

/// Numeric label with as many decimals as the tick step needs.
pub fn format_number(v: f64, step: f64) -> String {
    if v == 0.0 { return "0".to_string(); }
    let a = v.abs();
    if !(1e-4..1e7).contains(&a) {
        return format!("{v:e}");
    }
    let decimals = if step >= 1.0 || step <= 0.0 { 0 } else { (-step.log10().floor()) as usize };
    format!("{v:.decimals$}")
}

/// Ticks for `axis` across its current range.
pub fn ticks_for(axis: &Axis, target: usize) -> Vec<Tick> {
    match &axis.ticks {
        TickMarker::Nominal(labels) => labels
            .iter()
            .enumerate()
            .map(|(i, l)| Tick { value: i as f64, label: l.clone() })
            .collect(),
        TickMarker::Time { format } => linear_ticks(axis.min, axis.max, target)
            .into_iter()
            .map(|v| {
                let label = DateTime::from_timestamp(v as i64, 0)
                    .map(|d| d.format(format).to_string())
                    .unwrap_or_default();
                Tick { value: v, label }
            })
            .collect(),
        TickMarker::Auto => match axis.kind {
            ScaleKind::Linear => {
                let step = nice_step(axis.max - axis.min, target);
                linear_ticks(axis.min, axis.max, target)
                    .into_iter()
                    .map(|v| Tick { value: v, label: format_number(v, step) })
                    .collect()
            }
            ScaleKind::Log10 => log_ticks(axis.min, axis.max)
                .into_iter()
                .map(|v| Tick { value: v, label: format_number(v, v) })
                .collect(),
        },
    }
}
