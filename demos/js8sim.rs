//! JS8 signal simulator: encodes free text at a chosen speed and writes a
//! WAV file.
//!
//! Usage: js8sim [-f <Hz>] [-r <speed>] <text> <output.wav>
//! speed one of: ultra, slow, normal, fast, turbo (default: normal)

use rustydigi::js8::{self, Speed};

fn parse_speed(name: &str) -> Result<Speed, String> {
    match name.to_lowercase().as_str() {
        "ultra" => Ok(Speed::Ultra),
        "slow" => Ok(Speed::Slow),
        "normal" => Ok(Speed::Normal),
        "fast" => Ok(Speed::Fast),
        "turbo" => Ok(Speed::Turbo),
        other => Err(format!("unknown speed '{other}'")),
    }
}

fn main() -> Result<(), String> {
    rustydigi::telemetry::init();
    let raw: Vec<String> = std::env::args().collect();
    let mut base_freq = 1500.0;
    let mut speed = Speed::Normal;
    let mut positional = Vec::new();

    let mut i = 1;
    while i < raw.len() {
        match raw[i].as_str() {
            "-f" => {
                i += 1;
                base_freq = raw.get(i).ok_or("missing value for -f")?.parse().map_err(|_| "invalid -f")?;
            }
            "-r" => {
                i += 1;
                speed = parse_speed(raw.get(i).ok_or("missing value for -r")?)?;
            }
            other => positional.push(other.to_string()),
        }
        i += 1;
    }
    if positional.len() != 2 {
        return Err(format!("usage: {} [-f Hz] [-r speed] <text> <output.wav>", raw[0]));
    }

    let signal = js8::modulate_text(&positional[0], speed, base_freq).map_err(|e| e.to_string())?;

    let spec = hound::WavSpec { channels: 1, sample_rate: 12_000, bits_per_sample: 16, sample_format: hound::SampleFormat::Int };
    let mut writer = hound::WavWriter::create(&positional[1], spec).map_err(|e| e.to_string())?;
    for sample in &signal {
        writer.write_sample((sample.clamp(-1.0, 1.0) * 32767.0) as i16).map_err(|e| e.to_string())?;
    }
    writer.finalize().map_err(|e| e.to_string())?;

    println!("Wrote {} samples ({:.1} s) at {:?} speed to {}", signal.len(), signal.len() as f32 / 12_000.0, speed, positional[1]);
    Ok(())
}
