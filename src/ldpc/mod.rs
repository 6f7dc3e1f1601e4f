//! LDPC(174,91) systematic encoder and min-sum belief-propagation decoder.
//!
//! Shared verbatim between the FT8 and JS8 codecs: both frame a 91-bit
//! message (77 payload bits + 14-bit CRC) into a 174-bit codeword the same
//! way, and both decode received LLRs back to that 91-bit message the same
//! way.

mod constants;
mod decode;
mod encode;

pub use constants::{K, M, N};
pub use decode::{decode, decode_with_ap};
pub use encode::encode;
