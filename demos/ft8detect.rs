//! FT8 signal detector: reads a WAV file and prints every frame that
//! synchronizes, decodes, and passes CRC.
//!
//! Usage: ft8detect <input.wav> [freq_min_hz] [freq_max_hz]

use rustydigi::ft8;

fn main() -> Result<(), String> {
    rustydigi::telemetry::init();
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        return Err(format!("usage: {} <input.wav> [freq_min_hz] [freq_max_hz]", args[0]));
    }
    let freq_min_hz: f32 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(200.0);
    let freq_max_hz: f32 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(3000.0);

    let mut reader = hound::WavReader::open(&args[1]).map_err(|e| e.to_string())?;
    let bits = reader.spec().bits_per_sample;
    let full_scale = ((1i64 << (bits - 1)) - 1) as f32;
    let samples: Vec<f32> = reader
        .samples::<i32>()
        .map(|s| s.map(|v| (v as f32 / full_scale).clamp(-1.0, 1.0)))
        .collect::<Result<_, _>>()
        .map_err(|e| e.to_string())?;

    let decoded = ft8::decode(&samples, freq_min_hz, freq_max_hz, 1.0, 50);
    println!("Found {} frame(s):", decoded.len());
    for frame in &decoded {
        println!(
            "  {:7.1} Hz  {:6.2} s  {:6.1} dB  {:?}",
            frame.freq_hz, frame.time_offset_seconds, frame.snr_db, frame.message
        );
    }
    Ok(())
}
