//! CRC-14 shared by the FT8 and JS8 codecs.
//!
//! Polynomial 0x2757. Reference: WSJT-X `packjt77.f90`, and the FT4/FT8 QEX
//! article page 8 ("The CRC is calculated on the source-encoded message,
//! zero-extended from 77 to 82 bits").

use bitvec::prelude::*;
use crc::{Algorithm, Crc};

const CRC_POLYNOMIAL: u16 = 0x2757;

const CRC_FT8: Algorithm<u16> = Algorithm {
    width: 14,
    poly: CRC_POLYNOMIAL,
    init: 0x0,
    refin: false,
    refout: false,
    xorout: 0x0,
    check: 0x0,
    residue: 0x0,
};

const FT8_CRC: Crc<u16> = Crc::<u16>::new(&CRC_FT8);

/// Computes the 14-bit CRC of a 77-bit payload.
///
/// The payload is zero-extended to 82 bits (5 zero bits appended) before
/// checksumming, per the WSJT-X convention both FT8 and JS8 share.
pub fn compute(payload: &BitSlice<u8, Msb0>) -> u16 {
    assert_eq!(payload.len(), 77, "compute: payload must be 77 bits");

    let mut msg: u128 = 0;
    for (i, bit) in payload.iter().enumerate() {
        if *bit {
            msg |= 1u128 << (76 - i);
        }
    }
    let padded = msg << 5; // zero-extend 77 -> 82 bits
    let bytes = padded.to_be_bytes();
    let trimmed = &bytes[bytes.len() - 11..]; // last 88 bits, 82 of which are meaningful

    FT8_CRC.checksum(trimmed)
}

/// Appends the 14-bit CRC of `payload` (77 bits) to produce a 91-bit message.
pub fn append(payload: &BitSlice<u8, Msb0>) -> BitVec<u8, Msb0> {
    assert_eq!(payload.len(), 77, "append: payload must be 77 bits");
    let crc = compute(payload);
    let mut out = BitVec::<u8, Msb0>::with_capacity(91);
    out.extend_from_bitslice(payload);
    for i in (0..14).rev() {
        out.push((crc >> i) & 1 != 0);
    }
    out
}

/// Validates a 91-bit message (77-bit payload + 14-bit CRC).
pub fn validate(message: &BitSlice<u8, Msb0>) -> bool {
    assert_eq!(message.len(), 91, "validate: message must be 91 bits");
    let expected = compute(&message[..77]);
    let mut received: u16 = 0;
    for bit in &message[77..91] {
        received = (received << 1) | (*bit as u16);
    }
    expected == received
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_message_gives_zero_crc() {
        let bits = bitvec![u8, Msb0; 0; 77];
        assert_eq!(compute(&bits), 0);
    }

    #[test]
    fn append_then_validate_roundtrip() {
        let mut bits = bitvec![u8, Msb0; 0; 77];
        bits.set(0, true);
        bits.set(10, true);
        bits.set(76, true);
        let message = append(&bits);
        assert!(validate(&message));
    }

    #[test]
    fn single_bit_flip_breaks_validation() {
        let bits = bitvec![u8, Msb0; 0; 77];
        let mut message = append(&bits);
        let flip_at = 3;
        let was = message[flip_at];
        message.set(flip_at, !was);
        assert!(!validate(&message));
    }

    #[test]
    fn known_wsjtx_vector() {
        // "CQ SOTA N0YPR/R DM42" source-encoded message from ft8code.
        let msg_str = "00000000010111100101100110000000010100100110110011100110110001100111110010001";
        let mut bits = bitvec![u8, Msb0; 0; 77];
        for (i, c) in msg_str.chars().enumerate() {
            bits.set(i, c == '1');
        }
        assert_eq!(compute(&bits), 0b0000_1001_1001_01);
    }
}
