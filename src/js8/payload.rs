//! JS8 free-text payload packing (§4.7): 13 characters over a 43-symbol
//! alphabet, packed by repeated multiply-and-add into a single big integer
//! and extracted as 77 bits MSB-first.

use super::error::Js8Error;
use crate::bitpack::BigRadix;
use bitvec::prelude::*;

const ALPHABET: &[u8] = b" 0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ+-./?@";
const TEXT_LEN: usize = 13;
const PAYLOAD_BITS: u32 = 77;

/// Packs up to 13 characters of free text into a 77-bit payload.
pub fn pack(text: &str) -> Result<BitVec<u8, Msb0>, Js8Error> {
    let upper = text.trim().to_uppercase();
    if upper.chars().count() > TEXT_LEN {
        return Err(Js8Error::TextTooLong);
    }
    let mut padded = upper;
    while padded.chars().count() < TEXT_LEN {
        padded.push(' ');
    }

    let radix = ALPHABET.len() as u64;
    let mut value = BigRadix::zero();
    for ch in padded.chars() {
        let idx = ALPHABET
            .iter()
            .position(|&c| c == ch as u8)
            .ok_or_else(|| Js8Error::InvalidChar { text: text.to_string() })?;
        value.mul_add(radix, idx as u64);
    }

    let mut bits = BitVec::<u8, Msb0>::with_capacity(PAYLOAD_BITS as usize);
    for i in 0..PAYLOAD_BITS {
        bits.push(value.extract_msb(PAYLOAD_BITS, i, 1) != 0);
    }
    Ok(bits)
}

/// Unpacks a 77-bit payload back into trimmed, upper-cased free text.
pub fn unpack(bits: &BitSlice<u8, Msb0>) -> Result<String, Js8Error> {
    assert_eq!(bits.len(), PAYLOAD_BITS as usize, "unpack: payload must be 77 bits");

    let mut value: u128 = 0;
    for bit in bits {
        value = (value << 1) | (*bit as u128);
    }

    let radix = ALPHABET.len() as u128;
    let mut chars = vec![' '; TEXT_LEN];
    for slot in chars.iter_mut().rev() {
        let digit = (value % radix) as usize;
        value /= radix;
        *slot = ALPHABET[digit] as char;
    }
    Ok(chars.into_iter().collect::<String>().trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_free_text() {
        let bits = pack("HELLO WORLD").unwrap();
        assert_eq!(bits.len(), 77);
        assert_eq!(unpack(&bits).unwrap(), "HELLO WORLD");
    }

    #[test]
    fn roundtrips_text_using_the_at_sign() {
        let bits = pack("N0YPR@HOME").unwrap();
        assert_eq!(unpack(&bits).unwrap(), "N0YPR@HOME");
    }

    #[test]
    fn rejects_text_over_13_characters() {
        assert!(matches!(pack("THIS IS WAY TOO LONG"), Err(Js8Error::TextTooLong)));
    }
}
