//! Pipes stdin bytes through the streaming-radio demuxer and reports what
//! came out: audio sample count and every complete CAT response line.
//!
//! Usage: cat capture.bin | streamdemux

use rustydigi::stream::StreamDemux;
use std::io::Read;

fn main() -> std::io::Result<()> {
    rustydigi::telemetry::init();
    let mut input = Vec::new();
    std::io::stdin().read_to_end(&mut input)?;

    let mut demux = StreamDemux::new();
    let emissions = demux.feed(&input);

    println!("audio samples: {}", emissions.audio.len());
    for response in &emissions.cat_responses {
        println!("cat: {response}");
    }
    Ok(())
}
