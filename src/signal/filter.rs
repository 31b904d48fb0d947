//! Low-Pass Filter Module
//! Butterworth low-pass as a cascade of second-order sections applied
//! zero-phase (forward-backward), plus a moving-average alternative.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterError {
    #[error("filter order must be at least 1")]
    ZeroOrder,
    #[error("cutoff frequency must lie strictly between 0 and Nyquist")]
    BadCutoff,
}

/// Selectable filter family in the Signal Lab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterKind {
    Butterworth,
    MovingAverage,
}

impl FilterKind {
    pub const ALL: [FilterKind; 2] = [FilterKind::Butterworth, FilterKind::MovingAverage];

    pub fn label(self) -> &'static str {
        match self {
            FilterKind::Butterworth => "Butterworth",
            FilterKind::MovingAverage => "Moving average",
        }
    }
}

/// One second-order section with `a0` normalized to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Biquad {
    pub b: [f64; 3],
    pub a: [f64; 3],
}

/// Design an order-N Butterworth low-pass as cascaded biquads via the
/// bilinear transform with frequency prewarping. Odd orders carry one
/// first-order section (its `b[2]`/`a[2]` are zero).
pub fn butterworth_lowpass(
    order: usize,
    cutoff_hz: f64,
    sample_rate: f64,
) -> Result<Vec<Biquad>, FilterError> {
    if order == 0 {
        return Err(FilterError::ZeroOrder);
    }
    let nyquist = sample_rate / 2.0;
    if !(cutoff_hz > 0.0 && cutoff_hz < nyquist) {
        return Err(FilterError::BadCutoff);
    }

    let k = (std::f64::consts::PI * cutoff_hz / sample_rate).tan();
    let k2 = k * k;
    let mut sections = Vec::with_capacity(order.div_ceil(2));

    // Conjugate pole pairs of the analog prototype.
    for i in 0..order / 2 {
        let theta = std::f64::consts::PI * (2 * i + 1) as f64 / (2.0 * order as f64);
        let q = 2.0 * theta.sin();
        let norm = 1.0 / (1.0 + q * k + k2);
        sections.push(Biquad {
            b: [k2 * norm, 2.0 * k2 * norm, k2 * norm],
            a: [1.0, 2.0 * (k2 - 1.0) * norm, (1.0 - q * k + k2) * norm],
        });
    }

    // Real pole for odd orders.
    if order % 2 == 1 {
        let norm = 1.0 / (1.0 + k);
        sections.push(Biquad {
            b: [k * norm, k * norm, 0.0],
            a: [1.0, (k - 1.0) * norm, 0.0],
        });
    }

    Ok(sections)
}

/// Zero-phase filtering: each section runs forward and backward over an
/// odd-reflection padded copy of the signal, so the output has no group
/// delay. Signals too short for the edge padding are returned unchanged.
pub fn filtfilt(sections: &[Biquad], x: &[f64]) -> Vec<f64> {
    if sections.is_empty() {
        return x.to_vec();
    }

    let edge = 6 * sections.len();
    let n = x.len();
    if n <= edge {
        return x.to_vec();
    }

    let mut ext = Vec::with_capacity(n + 2 * edge);
    for i in (1..=edge).rev() {
        ext.push(2.0 * x[0] - x[i]);
    }
    ext.extend_from_slice(x);
    for i in 1..=edge {
        ext.push(2.0 * x[n - 1] - x[n - 1 - i]);
    }

    let mut y = ext;
    for section in sections {
        y = run_biquad(section, &y);
        y.reverse();
        y = run_biquad(section, &y);
        y.reverse();
    }

    y[edge..edge + n].to_vec()
}

/// Direct form II transposed.
fn run_biquad(s: &Biquad, x: &[f64]) -> Vec<f64> {
    let mut z1 = 0.0;
    let mut z2 = 0.0;
    x.iter()
        .map(|&xi| {
            let y = s.b[0] * xi + z1;
            z1 = s.b[1] * xi - s.a[1] * y + z2;
            z2 = s.b[2] * xi - s.a[2] * y;
            y
        })
        .collect()
}

/// Centered moving average, matching "same"-mode box convolution: edge
/// outputs still divide by the full window. Windows below 2 are identity.
pub fn moving_average(x: &[f64], window: usize) -> Vec<f64> {
    if window < 2 || x.is_empty() {
        return x.to_vec();
    }

    let n = x.len();
    let offset = (window - 1) / 2;
    (0..n)
        .map(|i| {
            let k = i + offset;
            let lo = k.saturating_sub(window - 1);
            let hi = (k + 1).min(n);
            let sum: f64 = x[lo..hi].iter().sum();
            sum / window as f64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq: f64, sample_rate: f64, n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| (std::f64::consts::TAU * freq * i as f64 / sample_rate).sin())
            .collect()
    }

    fn rms(x: &[f64]) -> f64 {
        (x.iter().map(|v| v * v).sum::<f64>() / x.len() as f64).sqrt()
    }

    #[test]
    fn section_count_matches_order() {
        assert_eq!(butterworth_lowpass(1, 1.0, 100.0).unwrap().len(), 1);
        assert_eq!(butterworth_lowpass(4, 1.0, 100.0).unwrap().len(), 2);
        assert_eq!(butterworth_lowpass(5, 1.0, 100.0).unwrap().len(), 3);
    }

    #[test]
    fn invalid_designs_are_rejected() {
        assert_eq!(
            butterworth_lowpass(0, 1.0, 100.0),
            Err(FilterError::ZeroOrder)
        );
        assert_eq!(
            butterworth_lowpass(5, 50.0, 100.0),
            Err(FilterError::BadCutoff)
        );
        assert_eq!(
            butterworth_lowpass(5, 0.0, 100.0),
            Err(FilterError::BadCutoff)
        );
    }

    #[test]
    fn sections_have_unit_dc_gain() {
        for section in butterworth_lowpass(5, 1.0, 100.0).unwrap() {
            let num: f64 = section.b.iter().sum();
            let den: f64 = section.a.iter().sum();
            assert!((num / den - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn constant_signal_passes_unchanged() {
        let sections = butterworth_lowpass(5, 1.0, 100.0).unwrap();
        let x = vec![3.5; 500];
        let y = filtfilt(&sections, &x);
        assert_eq!(y.len(), x.len());
        for v in y {
            assert!((v - 3.5).abs() < 1e-6);
        }
    }

    #[test]
    fn passband_kept_stopband_attenuated() {
        let sections = butterworth_lowpass(5, 1.0, 100.0).unwrap();

        let low = sine(0.2, 100.0, 1000);
        let low_out = filtfilt(&sections, &low);
        assert!(rms(&low_out) > 0.9 * rms(&low));

        let high = sine(20.0, 100.0, 1000);
        let high_out = filtfilt(&sections, &high);
        assert!(rms(&high_out) < 0.05 * rms(&high));
    }

    #[test]
    fn short_signal_is_returned_unfiltered() {
        let sections = butterworth_lowpass(5, 1.0, 100.0).unwrap();
        let x = vec![1.0, 2.0, 3.0];
        assert_eq!(filtfilt(&sections, &x), x);
    }

    #[test]
    fn moving_average_window_one_is_identity() {
        let x = vec![1.0, 5.0, 9.0];
        assert_eq!(moving_average(&x, 1), x);
    }

    #[test]
    fn moving_average_interior_is_flat_for_constant() {
        let x = vec![2.0; 20];
        let y = moving_average(&x, 5);
        assert_eq!(y.len(), x.len());
        // Interior samples see the full window; edges taper toward zero.
        for v in &y[2..18] {
            assert!((v - 2.0).abs() < 1e-12);
        }
        assert!(y[0] < 2.0);
    }

    #[test]
    fn moving_average_smooths_alternation() {
        let x: Vec<f64> = (0..40).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let y = moving_average(&x, 4);
        assert!(rms(&y[4..36]) < 0.3 * rms(&x));
    }
}
