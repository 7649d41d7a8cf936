// File: crates/hydroplot-core/src/histogram.rs
// Summary: Equal-width histogram binning with area normalisation.

use crate::error::{PlotError, Result};

/// One histogram bin covering `[min, max)`; the last bin also holds the maximum.
/// Upper bound on a requested bin count.
pub const MAX_BINS: usize = 1_000_000;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bin {
    pub min: f64,
    pub max: f64,
    pub weight: f64,
}

#[derive(Clone, Debug)]
pub struct Histogram {
    pub bins: Vec<Bin>,
    pub width: f64,
}

impl Histogram {
    /// Bin `values` into `bins` equal-width bins.
    ///
    /// `bins == 0` picks `ceil(sqrt(values.len()))`. Non-finite values are
    /// rejected because they have no bin.
    pub fn new(values: &[f64], bins: usize) -> Result<Self> {
        if values.is_empty() {
            return Err(PlotError::EmptySeries("histogram"));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(PlotError::Render(format!("histogram value {bad} is not finite")));
        }

        if bins > MAX_BINS {
            return Err(PlotError::Render(format!("invalid bin count {bins}")));
        }
        let n = if bins == 0 { ((values.len() as f64).sqrt().ceil() as usize).max(1) } else { bins };
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mut max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if max == min {
            max += 1.0;
        }
        let width = (max - min) / n as f64;

        let mut out: Vec<Bin> = (0..n)
            .map(|i| Bin { min: min + width * i as f64, max: min + width * (i + 1) as f64, weight: 0.0 })
            .collect();
        for &v in values {
            let idx = (((v - min) / width) as usize).min(n - 1);
            out[idx].weight += 1.0;
        }
        Ok(Self { bins: out, width })
    }

    /// Scale weights so the histogram area equals `sum`.
    pub fn normalize(&mut self, sum: f64) {
        let mass: f64 = self.bins.iter().map(|b| b.weight).sum();
        if mass == 0.0 {
            return;
        }
        let k = sum / (self.width * mass);
        for b in &mut self.bins {
            b.weight *= k;
        }
    }

    pub fn area(&self) -> f64 {
        self.bins.iter().map(|b| b.weight * self.width).sum()
    }
}
