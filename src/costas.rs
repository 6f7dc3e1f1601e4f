//! Costas-array sync search, fine-frequency refinement, and soft-symbol
//! (LLR) extraction (§4.5, §4.6 RX path).

use crate::spectral::Spectrogram;
use crate::tones::{costas_positions, data_positions, COSTAS, GRAY_INV};
use std::collections::HashMap;

/// A candidate frame start proposed by Costas correlation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyncCandidate {
    /// Spectrogram row index of the frame's first symbol.
    pub time_row: usize,
    /// Base frequency bin of the frame's lowest tone.
    pub freq_bin: usize,
    /// Parabolically-refined center frequency, in Hz.
    pub refined_freq_hz: f32,
    /// Normalized sync correlation score.
    pub score: f32,
    /// Mean background (non-signal tone) power at the sync positions, used
    /// as the noise reference for the SNR estimate.
    pub mean_background: f32,
}

impl SyncCandidate {
    /// Frame start, in seconds, relative to the start of the spectrogram.
    pub fn time_offset_seconds(&self, nsps: usize) -> f32 {
        (self.time_row * nsps) as f32 / crate::spectral::SAMPLE_RATE
    }
}

/// Searches `spectrogram` for Costas sync candidates whose base frequency
/// falls within `[freq_min_hz, freq_max_hz)`.
///
/// `score` above `threshold` are kept; the result is sorted descending by
/// score and truncated to `max_candidates`, with duplicate `(time_row,
/// freq_bin)` pairs collapsed to their single occurrence.
pub fn search(
    spectrogram: &Spectrogram,
    freq_min_hz: f32,
    freq_max_hz: f32,
    threshold: f32,
    max_candidates: usize,
) -> Vec<SyncCandidate> {
    const EPS: f32 = 1e-12;
    let nsps = spectrogram.nsps;
    let tone_spacing = spectrogram.tone_spacing_hz();
    let positions = costas_positions();

    let min_bin = (freq_min_hz / tone_spacing).floor().max(0.0) as usize;
    let max_bin = (freq_max_hz / tone_spacing).ceil() as usize;

    let frame_len = crate::tones::NN;
    if spectrogram.num_rows() < frame_len {
        return Vec::new();
    }
    let last_t = spectrogram.num_rows() - frame_len;

    let mut found: HashMap<(usize, usize), (f32, f32)> = HashMap::new();

    for t0 in 0..=last_t {
        for bin0 in min_bin..max_bin {
            if bin0 + 7 >= spectrogram.bins {
                continue;
            }
            let mut signal = 0.0f32;
            let mut background = 0.0f32;
            for (i, &pos) in positions.iter().enumerate() {
                let row = &spectrogram.rows[t0 + pos];
                let sync_tone = COSTAS[i % 7] as usize;
                signal += row[bin0 + sync_tone];
                for tone in 0..8usize {
                    if tone != sync_tone {
                        background += row[bin0 + tone];
                    }
                }
            }
            let mean_background = background / (positions.len() as f32 * 7.0);
            let score = signal / (mean_background + EPS);
            if tracing::enabled!(tracing::Level::TRACE) {
                tracing::trace!(t0, bin0, score = %score, background = %mean_background, "costas candidate score");
            }
            if score > threshold {
                found.insert((t0, bin0), (score, mean_background));
            } else if tracing::enabled!(tracing::Level::TRACE) {
                tracing::trace!(t0, bin0, score = %score, threshold = %threshold, "candidate dropped below sync threshold");
            }
        }
    }

    let mut candidates: Vec<SyncCandidate> = found
        .into_iter()
        .map(|((t0, bin0), (score, mean_background))| {
            let refined_freq_hz = refine_frequency(spectrogram, t0, bin0, tone_spacing);
            SyncCandidate { time_row: t0, freq_bin: bin0, refined_freq_hz, score, mean_background }
        })
        .collect();

    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap());
    candidates.truncate(max_candidates);
    tracing::debug!(found = candidates.len(), max_candidates, "costas search complete");
    candidates
}

fn refine_frequency(spectrogram: &Spectrogram, t0: usize, bin0: usize, tone_spacing: f32) -> f32 {
    let positions = costas_positions();
    let mut total_offset = 0.0f32;
    let mut count = 0usize;

    for (i, &pos) in positions.iter().enumerate() {
        let row = &spectrogram.rows[t0 + pos];
        let sync_tone = COSTAS[i % 7] as usize;
        let bin = bin0 + sync_tone;
        if bin == 0 || bin + 1 >= row.len() {
            continue;
        }
        let left = row[bin - 1];
        let center = row[bin];
        let right = row[bin + 1];
        let denom = left - 2.0 * center + right;
        if denom.abs() > 1e-9 {
            total_offset += 0.5 * (left - right) / denom;
            count += 1;
        }
    }

    let avg_offset = if count > 0 { total_offset / count as f32 } else { 0.0 };
    (bin0 as f32 + avg_offset) * tone_spacing
}

/// Extracts 174 LLRs (positive = bit more likely 0) for the 58 data symbols
/// of `candidate` within `spectrogram`.
pub fn extract_llrs(spectrogram: &Spectrogram, candidate: &SyncCandidate) -> Option<[f32; 174]> {
    let mut llrs = [0.0f32; 174];
    let bin0 = candidate.freq_bin;
    if bin0 + 7 >= spectrogram.bins {
        return None;
    }

    for (d, &pos) in data_positions().iter().enumerate() {
        let row_idx = candidate.time_row + pos;
        if row_idx >= spectrogram.num_rows() {
            return None;
        }
        let row = &spectrogram.rows[row_idx];
        let mut power = [0.0f32; 8];
        for tone in 0..8 {
            power[tone] = row[bin0 + tone];
        }

        for bit in 0..3 {
            let mut zero_sum = 0.0f32;
            let mut one_sum = 0.0f32;
            for tone in 0..8usize {
                let group = GRAY_INV[tone];
                let bit_val = (group >> (2 - bit)) & 1;
                if bit_val == 0 {
                    zero_sum += power[tone];
                } else {
                    one_sum += power[tone];
                }
            }
            llrs[3 * d + bit] = zero_sum.ln() - one_sum.ln();
        }
    }

    Some(llrs)
}

/// SNR estimate (§4.6): `10·log10(signal/noise) − 10·log10(2500/tone_spacing)`.
pub fn snr_db(signal_power: f32, noise_power: f32, tone_spacing: f32) -> f32 {
    10.0 * (signal_power / noise_power.max(1e-30)).log10() - 10.0 * (2500.0 / tone_spacing).log10()
}
