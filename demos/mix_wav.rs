//! Mixes two WAV files by summing their samples, clipped to 16-bit range.
//!
//! Usage: mix_wav <input1.wav> <input2.wav> <output.wav>

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    rustydigi::telemetry::init();
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 4 {
        eprintln!("usage: {} <input1.wav> <input2.wav> <output.wav>", args[0]);
        std::process::exit(1);
    }

    let mut reader1 = WavReader::open(&args[1])?;
    let spec1 = reader1.spec();
    let samples1: Vec<i16> = reader1.samples::<i16>().collect::<Result<Vec<_>, _>>()?;

    let mut reader2 = WavReader::open(&args[2])?;
    let spec2 = reader2.spec();
    let samples2: Vec<i16> = reader2.samples::<i16>().collect::<Result<Vec<_>, _>>()?;

    if spec1.sample_rate != spec2.sample_rate {
        eprintln!("sample rates don't match: {} vs {}", spec1.sample_rate, spec2.sample_rate);
        std::process::exit(1);
    }

    let max_len = samples1.len().max(samples2.len());
    let mut mixed = Vec::with_capacity(max_len);
    for i in 0..max_len {
        let s1 = samples1.get(i).copied().unwrap_or(0) as i32;
        let s2 = samples2.get(i).copied().unwrap_or(0) as i32;
        mixed.push((s1 + s2).clamp(i16::MIN as i32, i16::MAX as i32) as i16);
    }

    let spec = WavSpec { channels: 1, sample_rate: spec1.sample_rate, bits_per_sample: 16, sample_format: SampleFormat::Int };
    let mut writer = WavWriter::create(&args[3], spec)?;
    for sample in mixed {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    println!("Mixed {} + {} -> {}", args[1], args[2], args[3]);
    Ok(())
}
