//! Signal module - harmonic synthesis, noise and low-pass filtering

mod filter;
mod synth;

pub use filter::{butterworth_lowpass, filtfilt, moving_average, FilterError, FilterKind};
pub use synth::{
    gaussian_noise, harmonic, render, time_axis, SignalParams, SignalTraces, DURATION_SECS,
    SAMPLE_RATE_HZ,
};
