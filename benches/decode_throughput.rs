//! Decode-throughput benchmark: mixes several synthesized FT8 frames at
//! different frequencies, adds noise, and times a full decode pass.
//!
//! Run with `cargo bench --bench decode_throughput` (manual timing, no
//! external harness).

use rand_distr::{Distribution, Normal};
use rustydigi::ft8::{self, Message};
use std::time::Instant;

const SAMPLE_RATE: f32 = 12_000.0;
const FRAME_SAMPLES: usize = (ft8::SLOT_SECONDS * SAMPLE_RATE) as usize;

const CALLS: &[(&str, &str)] = &[
    ("W1ABC", "FN42"), ("VE3XYZ", "FN03"), ("DL1ABC", "JO31"), ("JA1XYZ", "PM95"),
    ("VK3ABC", "QF22"), ("ZL1ABC", "RF70"), ("G4ABC", "IO91"), ("PA3XYZ", "JO21"),
];

fn mixed_signal(num_signals: usize, snr_db: f32) -> Vec<f32> {
    let mut mixed = vec![0.0f32; FRAME_SAMPLES];
    let freq_spacing = if num_signals > 20 { 50.0 } else { 150.0 };
    for i in 0..num_signals {
        let (call, grid) = CALLS[i % CALLS.len()];
        let message = Message::Cq { call: call.to_string(), grid: Some(grid.to_string()) };
        let freq = 600.0 + i as f32 * freq_spacing;
        let frame = ft8::modulate_payload(&message, freq).unwrap();
        for (sample, &value) in mixed.iter_mut().zip(frame.iter()) {
            *sample += value;
        }
    }

    let bandwidth_ratio = 2500.0 / (SAMPLE_RATE / 2.0);
    let sig_scale = (2.0 * bandwidth_ratio).sqrt() * 10f32.powf(0.05 * snr_db);
    for s in mixed.iter_mut() {
        *s *= sig_scale;
    }
    let normal = Normal::new(0.0f32, 1.0).unwrap();
    let mut rng = rand::rng();
    for s in mixed.iter_mut() {
        *s += normal.sample(&mut rng);
    }
    mixed
}

fn main() {
    let configs = [("sparse band", 4usize, -10.0f32), ("crowded band", 30, -12.0)];

    for (name, num_signals, snr_db) in configs {
        println!("{name}: {num_signals} signals, {snr_db} dB SNR");
        let signal = mixed_signal(num_signals, snr_db);

        let freq_max = 600.0 + num_signals as f32 * 150.0 + 200.0;
        let start = Instant::now();
        let decoded = ft8::decode(&signal, 400.0, freq_max, 1.5, 60);
        let elapsed = start.elapsed();

        println!("  decoded {} of {num_signals} in {elapsed:.2?}", decoded.len());
        println!("  throughput: {:.1} decodes/sec", decoded.len() as f64 / elapsed.as_secs_f64());
    }
}
