//! FT8 codec (§4.6): 15-second-cadence 8-FSK frames of 79 symbols.

mod callsign;
mod codec;
mod error;
mod grid;
mod message;
mod report;

pub use codec::{decode, modulate_payload, DecodedFrame};
pub use error::MessageError;
pub use message::{pack, unpack, Message, CQ_TOKEN};

/// Samples per symbol at FT8's fixed 6.25 Hz tone spacing.
pub const NSPS: usize = 1920;
/// Tone spacing in Hz.
pub const TONE_SPACING_HZ: f32 = 6.25;
/// Full-frame duration in seconds (79 symbols at 1920 samples/symbol, 12 kHz).
pub const SLOT_SECONDS: f32 = 15.0;
