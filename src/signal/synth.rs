//! Signal Synthesis Module
//! Pure generation of the harmonic, noise and filtered traces shown in the
//! Signal Lab. No UI types leak in here; the panel only calls [`render`].

use rand::thread_rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use super::filter::{self, FilterKind};

/// Sampling rate of the demo time base.
pub const SAMPLE_RATE_HZ: f64 = 100.0;
/// Length of the demo time base in seconds.
pub const DURATION_SECS: f64 = 10.0;

/// All tunable parameters of the Signal Lab.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalParams {
    pub amplitude: f64,
    pub frequency: f64,
    pub phase: f64,
    pub noise_mean: f64,
    pub noise_variance: f64,
    pub show_noise: bool,
    pub cutoff_hz: f64,
    pub filter_order: usize,
    pub ma_window: usize,
    pub filter_kind: FilterKind,
}

impl Default for SignalParams {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            frequency: 1.0,
            phase: 0.0,
            noise_mean: 0.0,
            noise_variance: 0.1,
            show_noise: true,
            cutoff_hz: 1.0,
            filter_order: 5,
            ma_window: 10,
            filter_kind: FilterKind::Butterworth,
        }
    }
}

impl SignalParams {
    /// Whether a change requires drawing a fresh noise sequence.
    pub fn noise_differs(&self, other: &SignalParams) -> bool {
        self.noise_mean != other.noise_mean || self.noise_variance != other.noise_variance
    }
}

/// Evenly spaced sample times over `[0, duration)`.
pub fn time_axis(duration: f64, sample_rate: f64) -> Vec<f64> {
    let n = (duration * sample_rate) as usize;
    (0..n).map(|i| i as f64 / sample_rate).collect()
}

/// `A * sin(2*pi*f*t + phi)` over the given time base.
pub fn harmonic(t: &[f64], amplitude: f64, frequency: f64, phase: f64) -> Vec<f64> {
    t.iter()
        .map(|&ti| amplitude * (std::f64::consts::TAU * frequency * ti + phase).sin())
        .collect()
}

/// Gaussian noise samples with the given mean and variance.
/// Non-positive variance degenerates to a constant `mean` sequence.
pub fn gaussian_noise(len: usize, mean: f64, variance: f64) -> Vec<f64> {
    if variance <= 0.0 {
        return vec![mean; len];
    }
    match Normal::new(mean, variance.sqrt()) {
        Ok(normal) => {
            let mut rng = thread_rng();
            (0..len).map(|_| normal.sample(&mut rng)).collect()
        }
        Err(_) => vec![mean; len],
    }
}

/// The three traces drawn by the Signal Lab.
#[derive(Debug, Clone)]
pub struct SignalTraces {
    pub clean: Vec<f64>,
    pub noisy: Vec<f64>,
    pub filtered: Vec<f64>,
}

/// Pure render step: parameters plus a cached noise sequence in, plot data
/// out. The filter input is the noisy trace while noise is shown, the clean
/// one otherwise. An unrealizable filter design falls back to the input.
pub fn render(t: &[f64], params: &SignalParams, noise: &[f64]) -> SignalTraces {
    let clean = harmonic(t, params.amplitude, params.frequency, params.phase);
    let noisy: Vec<f64> = clean.iter().zip(noise).map(|(c, n)| c + n).collect();

    let input = if params.show_noise { &noisy } else { &clean };
    let filtered = match params.filter_kind {
        FilterKind::Butterworth => {
            match filter::butterworth_lowpass(params.filter_order, params.cutoff_hz, SAMPLE_RATE_HZ)
            {
                Ok(sections) => filter::filtfilt(&sections, input),
                Err(_) => input.clone(),
            }
        }
        FilterKind::MovingAverage => filter::moving_average(input, params.ma_window),
    };

    SignalTraces {
        clean,
        noisy,
        filtered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_axis_shape() {
        let t = time_axis(DURATION_SECS, SAMPLE_RATE_HZ);
        assert_eq!(t.len(), 1000);
        assert_eq!(t[0], 0.0);
        assert!((t[1] - 0.01).abs() < 1e-12);
        assert!(t[999] < DURATION_SECS);
    }

    #[test]
    fn harmonic_respects_amplitude_and_phase() {
        let t = time_axis(1.0, 100.0);
        let y = harmonic(&t, 2.5, 1.0, 0.0);
        assert_eq!(y[0], 0.0);
        assert!(y.iter().all(|v| v.abs() <= 2.5 + 1e-12));

        let shifted = harmonic(&t, 1.0, 1.0, std::f64::consts::FRAC_PI_2);
        assert!((shifted[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_variance_noise_is_constant() {
        let noise = gaussian_noise(100, 0.3, 0.0);
        assert!(noise.iter().all(|&v| v == 0.3));
    }

    #[test]
    fn noise_has_requested_moments() {
        let noise = gaussian_noise(20_000, 0.5, 0.1);
        let mean = noise.iter().sum::<f64>() / noise.len() as f64;
        let var = noise.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / noise.len() as f64;
        assert!((mean - 0.5).abs() < 0.02);
        assert!((var - 0.1).abs() < 0.02);
    }

    #[test]
    fn render_without_noise_filters_the_clean_trace() {
        let t = time_axis(DURATION_SECS, SAMPLE_RATE_HZ);
        let params = SignalParams {
            show_noise: false,
            ..Default::default()
        };
        let noise = gaussian_noise(t.len(), 10.0, 0.0);

        let traces = render(&t, &params, &noise);
        assert_eq!(traces.filtered.len(), t.len());
        // The constant-10 offset only reaches the noisy trace.
        assert!(traces.noisy[0] - traces.clean[0] > 9.0);
        assert!(traces.filtered.iter().all(|v| v.abs() < 2.0));
    }

    #[test]
    fn noise_differs_tracks_noise_parameters_only() {
        let a = SignalParams::default();
        let mut b = a;
        b.amplitude = 5.0;
        assert!(!a.noise_differs(&b));
        b.noise_variance = 0.5;
        assert!(a.noise_differs(&b));
    }
}
