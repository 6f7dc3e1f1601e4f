//! Streaming-radio serial demultiplexer (§4.9): a byte-driven state machine
//! that separates ASCII CAT responses from 8-bit PCM audio on one duplex
//! serial link, plus the paired outbound audio encoder.
//!
//! [`StreamDemux`] itself never errors (malformed input is appended verbatim
//! to the CAT buffer, per §7's "Protocol" taxonomy entry); [`StreamError`]
//! covers only the rare device-facing failures (open/read/write/unplug) that
//! the I/O task owning the serial port surfaces to the controller.

use snafu::Snafu;

/// Device-facing errors for the streaming-radio serial link (§7 "Device").
/// The byte-level demultiplexer above never produces one of these.
#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum StreamError {
    #[snafu(display("failed to open streaming-radio device at '{path}'"))]
    OpenFailed { path: String },

    #[snafu(display("read from streaming-radio device failed: {detail}"))]
    ReadFailed { detail: String },

    #[snafu(display("write to streaming-radio device failed: {detail}"))]
    WriteFailed { detail: String },

    #[snafu(display("streaming-radio device disconnected"))]
    Unplugged,
}

/// The demuxer's internal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Cat,
    AfterSemi,
    AfterSemiU,
    Audio,
}

/// Bytes emitted while feeding one chunk through [`StreamDemux::feed`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Emissions {
    /// Decoded audio samples, in `[-1.0, 1.0]`.
    pub audio: Vec<f32>,
    /// Complete CAT responses, each including its trailing `;`.
    pub cat_responses: Vec<String>,
}

/// Separates a duplex byte stream into audio samples and CAT responses.
///
/// Feeding the same bytes split across any chunk boundaries produces the
/// same emissions as feeding them in one call (see the `chunking_invariance`
/// test below).
#[derive(Debug)]
pub struct StreamDemux {
    state: State,
    cat_buffer: String,
}

impl Default for StreamDemux {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamDemux {
    pub fn new() -> Self {
        Self { state: State::Cat, cat_buffer: String::new() }
    }

    /// Clears all state and buffered bytes, as if freshly constructed.
    pub fn reset(&mut self) {
        self.state = State::Cat;
        self.cat_buffer.clear();
    }

    /// Feeds one chunk of bytes through the state machine.
    pub fn feed(&mut self, bytes: &[u8]) -> Emissions {
        let mut out = Emissions::default();
        for &byte in bytes {
            self.feed_byte(byte, &mut out);
        }
        out
    }

    fn feed_byte(&mut self, byte: u8, out: &mut Emissions) {
        match self.state {
            State::Cat => {
                if byte == b';' {
                    if !self.cat_buffer.is_empty() {
                        self.cat_buffer.push(';');
                        out.cat_responses.push(std::mem::take(&mut self.cat_buffer));
                    } else {
                        self.cat_buffer.clear();
                    }
                    self.state = State::AfterSemi;
                } else {
                    self.cat_buffer.push(byte as char);
                }
            }
            State::AfterSemi => {
                if byte == b'U' {
                    self.state = State::AfterSemiU;
                } else {
                    tracing::warn!(byte = byte as u32, "expected 'U' after ';', falling back to cat text");
                    self.cat_buffer.push(byte as char);
                    self.state = State::Cat;
                    // A lone ';' already closed the previous response; this
                    // byte starts a new one unless it is itself ';'.
                    if byte == b';' {
                        self.feed_byte(byte, out);
                    }
                }
            }
            State::AfterSemiU => {
                if byte == b'S' {
                    self.state = State::Audio;
                } else {
                    tracing::warn!(byte = byte as u32, "expected 'S' after \";U\", falling back to cat text");
                    self.cat_buffer.push('U');
                    self.cat_buffer.push(byte as char);
                    self.state = State::Cat;
                    if byte == b';' {
                        self.feed_byte(byte, out);
                    }
                }
            }
            State::Audio => {
                if byte == b';' {
                    self.state = State::AfterSemi;
                } else {
                    out.audio.push(byte_to_sample(byte));
                }
            }
        }
    }
}

/// Maps an unsigned 8-bit PCM byte to a sample in `[-1.0, 1.0)`.
fn byte_to_sample(byte: u8) -> f32 {
    (byte as f32 - 128.0) / 128.0
}

/// Maps a sample in `[-1.0, 1.0]` back to an unsigned 8-bit PCM byte,
/// promoting 0x3B to 0x3C so audio bytes never collide with the frame
/// delimiter (§4.9).
fn sample_to_byte(sample: f32) -> u8 {
    let clamped = sample.clamp(-1.0, 1.0);
    let value = (clamped * 127.0 + 128.0).round() as i32;
    let byte = value.clamp(0, 255) as u8;
    if byte == 0x3B {
        0x3C
    } else {
        byte
    }
}

/// Encodes `samples` as an outbound `"; U S <bytes...> ;"` audio block.
pub fn encode_audio_block(samples: &[f32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(samples.len() + 4);
    out.push(b';');
    out.push(b'U');
    out.push(b'S');
    for &sample in samples {
        out.push(sample_to_byte(sample));
    }
    out.push(b';');
    out
}

/// Linearly interpolates `samples` (at `from_rate` Hz) to `to_rate` Hz.
///
/// Used to bridge the codecs' fixed 12 kHz rate and a transceiver's native
/// rate (§4.9); a polyphase filter would not meaningfully improve decode
/// outcomes at 8-bit PCM fidelity.
pub fn resample_linear(samples: &[f32], from_rate: f32, to_rate: f32) -> Vec<f32> {
    if samples.is_empty() || from_rate <= 0.0 || to_rate <= 0.0 {
        return Vec::new();
    }
    let ratio = from_rate / to_rate;
    let out_len = ((samples.len() as f32) / ratio).floor() as usize;
    let mut out = Vec::with_capacity(out_len);
    for i in 0..out_len {
        let src_pos = i as f32 * ratio;
        let idx = src_pos.floor() as usize;
        let frac = src_pos - idx as f32;
        let a = samples[idx.min(samples.len() - 1)];
        let b = samples[(idx + 1).min(samples.len() - 1)];
        out.push(a + (b - a) * frac);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_errors_are_reported_not_panicked() {
        let err = StreamError::OpenFailed { path: "/dev/ttyUSB0".to_string() };
        assert_eq!(err.to_string(), "failed to open streaming-radio device at '/dev/ttyUSB0'");
    }

    #[test]
    fn separates_cat_and_audio_interleaved() {
        let mut demux = StreamDemux::new();
        let input = b";US\x80\xA0\x60;FA00007074000;US\x3C\x80;";
        let emissions = demux.feed(input);

        assert_eq!(emissions.cat_responses, vec!["FA00007074000;".to_string()]);
        let expected_audio: Vec<f32> = [0x80u8, 0xA0, 0x60, 0x3C, 0x80]
            .iter()
            .map(|&b| byte_to_sample(b))
            .collect();
        assert_eq!(emissions.audio, expected_audio);
    }

    #[test]
    fn chunking_does_not_change_emissions() {
        let input = b";US\x80\xA0\x60;FA00007074000;US\x3C\x80;FB01234;".to_vec();

        let mut whole = StreamDemux::new();
        let single = whole.feed(&input);

        for split in 0..=input.len() {
            let (a, b) = input.split_at(split);
            let mut demux = StreamDemux::new();
            let mut emissions = demux.feed(a);
            let rest = demux.feed(b);
            emissions.audio.extend(rest.audio);
            emissions.cat_responses.extend(rest.cat_responses);
            assert_eq!(emissions, single, "mismatch splitting at {split}");
        }
    }

    #[test]
    fn no_audio_sample_corresponds_to_the_delimiter_byte() {
        // 0x3B never appears inside a well-formed audio block (firmware
        // promotes it to 0x3C on the way out), so every byte strictly
        // between "US" and the closing ';' decodes as audio.
        let non_delimiter_bytes: Vec<u8> = (0u8..=255).filter(|&b| b != 0x3B).collect();
        let mut input = vec![b';', b'U', b'S'];
        input.extend(&non_delimiter_bytes);
        input.push(b';');

        let mut demux = StreamDemux::new();
        let emissions = demux.feed(&input);
        assert_eq!(emissions.audio.len(), non_delimiter_bytes.len());
        assert!(emissions.cat_responses.is_empty());
    }

    #[test]
    fn the_delimiter_byte_always_ends_an_audio_block_without_emitting_a_sample() {
        let mut demux = StreamDemux::new();
        let emissions = demux.feed(b";US\x01\x3B\x02;");
        // The embedded 0x3B closes the block early; the trailing "\x02;" is
        // then parsed as CAT text, not audio.
        assert_eq!(emissions.audio, vec![byte_to_sample(0x01)]);
    }

    #[test]
    fn reset_clears_mid_frame_state() {
        let mut demux = StreamDemux::new();
        demux.feed(b";US\x80");
        demux.reset();
        let emissions = demux.feed(b"FA00007074000;");
        assert_eq!(emissions.cat_responses, vec!["FA00007074000;".to_string()]);
    }

    #[test]
    fn outbound_block_never_contains_the_delimiter_as_audio() {
        let samples = [0.0f32, 1.0, -1.0];
        let block = encode_audio_block(&samples);
        assert_eq!(block, vec![0x3B, 0x55, 0x53, 0x80, 0xFF, 0x01, 0x3B]);
        for &byte in &block[3..block.len() - 1] {
            assert_ne!(byte, 0x3B);
        }
    }

    #[test]
    fn byte_to_sample_roundtrips_within_one_step() {
        for x in [-1.0f32, -0.5, 0.0, 0.25, 0.9] {
            let byte = sample_to_byte(x);
            let back = byte_to_sample(byte);
            assert!((back - x).abs() <= 1.0 / 128.0 + 1e-6);
        }
    }

    #[test]
    fn resample_preserves_endpoints_on_upsample() {
        let samples = [0.0f32, 1.0, 0.0, -1.0];
        let up = resample_linear(&samples, 12000.0, 24000.0);
        assert!(up.len() > samples.len());
        assert!((up[0] - samples[0]).abs() < 1e-6);
    }
}
