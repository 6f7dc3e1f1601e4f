//! Windowed-FFT spectrogram (§4.4).
//!
//! Produces one spectrogram row per symbol period: a Hann-windowed FFT of
//! `nsps` samples, hopped by `nsps` samples, yielding `nsps/2` power bins.
//! Sample rate is fixed at 12 kHz throughout both codecs; tone spacing for a
//! given frame is `12000.0 / nsps`.

use once_cell::sync::Lazy;
use rustfft::{num_complex::Complex32, Fft, FftPlanner};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const SAMPLE_RATE: f32 = 12_000.0;

/// Small floor added to every power bin so `log(power)` never sees zero.
const EPSILON: f32 = 1e-12;

static FFT_CACHE: Lazy<Mutex<HashMap<usize, Arc<dyn Fft<f32>>>>> = Lazy::new(|| Mutex::new(HashMap::new()));

fn forward_plan(n: usize) -> Arc<dyn Fft<f32>> {
    let mut cache = FFT_CACHE.lock().unwrap();
    if let Some(plan) = cache.get(&n) {
        return Arc::clone(plan);
    }
    let plan = FftPlanner::new().plan_fft_forward(n);
    cache.insert(n, Arc::clone(&plan));
    plan
}

/// A magnitude-power spectrogram: one row per symbol period, one column per
/// FFT bin (`[0, nsps/2)`).
#[derive(Debug, Clone)]
pub struct Spectrogram {
    pub rows: Vec<Vec<f32>>,
    pub nsps: usize,
    pub bins: usize,
}

impl Spectrogram {
    pub fn tone_spacing_hz(&self) -> f32 {
        SAMPLE_RATE / self.nsps as f32
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }
}

fn hann_window(n: usize) -> Vec<f32> {
    if n == 1 {
        return vec![1.0];
    }
    (0..n)
        .map(|i| 0.5 - 0.5 * (2.0 * std::f32::consts::PI * i as f32 / (n - 1) as f32).cos())
        .collect()
}

/// Builds a spectrogram by sliding a Hann window of `nsps` samples over
/// `signal`, hopping by `nsps` samples (one row per symbol period).
pub fn spectrogram(signal: &[f32], nsps: usize) -> Spectrogram {
    assert!(nsps > 0);
    let window = hann_window(nsps);
    let fft = forward_plan(nsps);
    let bins = nsps / 2;

    let num_rows = if signal.len() >= nsps { (signal.len() - nsps) / nsps + 1 } else { 0 };
    let mut rows = Vec::with_capacity(num_rows);

    let mut hop = 0usize;
    while hop + nsps <= signal.len() {
        let mut buf: Vec<Complex32> = (0..nsps)
            .map(|i| Complex32::new(signal[hop + i] * window[i], 0.0))
            .collect();
        fft.process(&mut buf);
        let row: Vec<f32> = buf[..bins].iter().map(|c| c.norm_sqr() + EPSILON).collect();
        rows.push(row);
        hop += nsps;
    }

    Spectrogram { rows, nsps, bins }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_count_matches_symbol_count() {
        let nsps = 1920;
        let signal = vec![0.0f32; nsps * 10];
        let spec = spectrogram(&signal, nsps);
        assert_eq!(spec.num_rows(), 10);
        assert_eq!(spec.bins, nsps / 2);
    }

    #[test]
    fn pure_tone_peaks_at_expected_bin() {
        let nsps = 1920;
        let tone_spacing = SAMPLE_RATE / nsps as f32;
        let target_bin = 20;
        let freq = target_bin as f32 * tone_spacing;
        let signal: Vec<f32> = (0..nsps)
            .map(|i| (2.0 * std::f32::consts::PI * freq * i as f32 / SAMPLE_RATE).sin())
            .collect();
        let spec = spectrogram(&signal, nsps);
        let row = &spec.rows[0];
        let (peak_bin, _) = row
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .unwrap();
        assert_eq!(peak_bin, target_bin);
    }

    #[test]
    fn short_signal_yields_no_rows() {
        let spec = spectrogram(&[0.0f32; 10], 1920);
        assert_eq!(spec.num_rows(), 0);
    }
}
