//! FT8 signal simulator: encodes a message, synthesizes the waveform, and
//! writes it to a WAV file, with optional additive noise and delay.
//!
//! Usage:
//!   ft8sim [OPTIONS] <message> <output.wav>
//!
//! Options:
//!   -s, --snr <dB>     Signal-to-noise ratio in dB (default: no noise)
//!   -f, --freq <Hz>    Base frequency in Hz (default: 1500)
//!   -d, --delay <sec>  Silence prepended before the frame (default: 0.0)
//!
//! Message forms:
//!   "CQ <call> [<grid>]"
//!   "<call_to> <call_from> <report|RRR|RR73|73>"
//!   anything else is sent as free text

use rand_distr::{Distribution, Normal};
use rustydigi::ft8::{self, Message};

struct Args {
    message: String,
    output_path: String,
    snr_db: Option<f32>,
    base_freq: f32,
    delay_sec: f32,
}

fn parse_args() -> Result<Args, String> {
    let raw: Vec<String> = std::env::args().collect();
    let mut snr_db = None;
    let mut base_freq = 1500.0;
    let mut delay_sec = 0.0;
    let mut positional = Vec::new();

    let mut i = 1;
    while i < raw.len() {
        match raw[i].as_str() {
            "-s" | "--snr" => {
                i += 1;
                snr_db = Some(raw.get(i).ok_or("missing value for --snr")?.parse().map_err(|_| "invalid --snr")?);
            }
            "-f" | "--freq" => {
                i += 1;
                base_freq = raw.get(i).ok_or("missing value for --freq")?.parse().map_err(|_| "invalid --freq")?;
            }
            "-d" | "--delay" => {
                i += 1;
                delay_sec = raw.get(i).ok_or("missing value for --delay")?.parse().map_err(|_| "invalid --delay")?;
            }
            other => positional.push(other.to_string()),
        }
        i += 1;
    }

    if positional.len() != 2 {
        return Err(format!("usage: {} [OPTIONS] <message> <output.wav>", raw[0]));
    }
    Ok(Args { message: positional[0].clone(), output_path: positional[1].clone(), snr_db, base_freq, delay_sec })
}

fn parse_message(text: &str) -> Message {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    match tokens.as_slice() {
        ["CQ", call] => Message::Cq { call: call.to_string(), grid: None },
        ["CQ", call, grid] => Message::Cq { call: call.to_string(), grid: Some(grid.to_string()) },
        [to, from, report] => {
            let ack = matches!(*report, "RRR" | "RR73" | "73");
            Message::Standard { call_to: to.to_string(), call_from: from.to_string(), ack, report: report.to_string() }
        }
        _ => Message::FreeText(text.to_string()),
    }
}

fn add_noise(signal: &mut [f32], snr_db: f32) {
    let bandwidth_ratio = 2500.0 / (crate_sample_rate() / 2.0);
    let sig_scale = (2.0 * bandwidth_ratio).sqrt() * 10f32.powf(0.05 * snr_db);
    for s in signal.iter_mut() {
        *s *= sig_scale;
    }
    let normal = Normal::new(0.0f32, 1.0).unwrap();
    let mut rng = rand::rng();
    for s in signal.iter_mut() {
        *s += normal.sample(&mut rng);
    }
}

fn crate_sample_rate() -> f32 {
    12_000.0
}

fn main() -> Result<(), String> {
    rustydigi::telemetry::init();
    let args = parse_args()?;
    let message = parse_message(&args.message);

    println!("Encoding: {:?}", message);
    let mut signal = ft8::modulate_payload(&message, args.base_freq).map_err(|e| e.to_string())?;

    if let Some(snr_db) = args.snr_db {
        add_noise(&mut signal, snr_db);
    }

    if args.delay_sec > 0.0 {
        let delay_samples = (args.delay_sec * crate_sample_rate()) as usize;
        let mut delayed = vec![0.0f32; delay_samples + signal.len()];
        delayed[delay_samples..].copy_from_slice(&signal);
        signal = delayed;
    }

    let target_samples = (ft8::SLOT_SECONDS * crate_sample_rate()) as usize;
    signal.resize(target_samples, 0.0);

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: crate_sample_rate() as u32,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&args.output_path, spec).map_err(|e| e.to_string())?;
    for sample in &signal {
        writer.write_sample((sample.clamp(-1.0, 1.0) * 32767.0) as i16).map_err(|e| e.to_string())?;
    }
    writer.finalize().map_err(|e| e.to_string())?;

    println!("Wrote {} samples to {}", signal.len(), args.output_path);
    Ok(())
}
