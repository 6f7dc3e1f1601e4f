//! FT8 message variants (§4.6): CQ, Standard (i3=1), and FreeText (i3=0).

use super::error::MessageError;
use super::{callsign, grid, report};
use crate::bitpack::{BigRadix, BitWriter};
use bitvec::prelude::*;

/// CQ token: 2^28 - 2 (§4.6).
pub const CQ_TOKEN: u32 = (1u32 << 28) - 2;

/// Free-text alphabet for the FT8 13-character payload (§4.6): no '@'.
const FREETEXT_ALPHABET: &[u8] = b" 0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ+-./?";
const FREETEXT_LEN: usize = 13;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Cq { call: String, grid: Option<String> },
    Standard { call_to: String, call_from: String, ack: bool, report: String },
    FreeText(String),
}

/// Packs a [`Message`] into its 77-bit payload.
pub fn pack(message: &Message) -> Result<BitVec<u8, Msb0>, MessageError> {
    let mut w = BitWriter::with_capacity(77);
    match message {
        Message::Cq { call, grid: grid_opt } => {
            w.append(CQ_TOKEN as u64, 28);
            w.append(callsign::pack(call)? as u64, 28);
            w.append(0, 1);
            w.append(grid::pack(grid_opt.as_deref().unwrap_or(""))? as u64, 15);
            w.append(0, 5);
        }
        Message::Standard { call_to, call_from, ack, report: report_token } => {
            w.append(callsign::pack(call_to)? as u64, 28);
            w.append(callsign::pack(call_from)? as u64, 28);
            w.append(*ack as u64, 1);
            w.append(report::pack(report_token)? as u64, 15);
            w.append(0, 2);
            w.append(1, 3); // i3 = 1
        }
        Message::FreeText(text) => {
            // Layout: text(71) || n3(3) || i3(3).
            let packed = pack_freetext(text)?;
            let high = packed.extract_msb(71, 0, 7) as u64;
            let low = packed.extract_msb(71, 7, 64) as u64;
            w.append(high, 7);
            w.append(low, 64);
            w.append(0, 3); // n3 = 0
            w.append(0, 3); // i3 = 0
        }
    }
    Ok(w.into_bitvec())
}

/// Unpacks a 77-bit payload into a [`Message`].
pub fn unpack(bits: &BitSlice<u8, Msb0>) -> Result<Message, MessageError> {
    assert_eq!(bits.len(), 77, "unpack: payload must be 77 bits");

    let call1 = crate::bitpack::extract(bits, 0, 28) as u32;
    if call1 >= CQ_TOKEN - 3 {
        let call = callsign::unpack(crate::bitpack::extract(bits, 28, 28) as u32)?;
        let grid_value = crate::bitpack::extract(bits, 57, 15) as u16;
        return Ok(Message::Cq { call, grid: grid::unpack(grid_value)? });
    }

    let i3 = crate::bitpack::extract(bits, 74, 3);
    if i3 == 1 {
        let call_to = callsign::unpack(call1)?;
        let call_from = callsign::unpack(crate::bitpack::extract(bits, 28, 28) as u32)?;
        let ack = crate::bitpack::extract(bits, 56, 1) != 0;
        let report_value = crate::bitpack::extract(bits, 57, 15) as u16;
        return Ok(Message::Standard {
            call_to,
            call_from,
            ack,
            report: report::unpack(report_value)?,
        });
    }

    let text = unpack_freetext(&bits[0..71])?;
    Ok(Message::FreeText(text))
}

fn pack_freetext(text: &str) -> Result<BigRadix, MessageError> {
    let padded = pad_freetext(text)?;
    let radix = FREETEXT_ALPHABET.len() as u64;
    let mut value = BigRadix::zero();
    for ch in padded.chars() {
        let idx = FREETEXT_ALPHABET
            .iter()
            .position(|&c| c == ch as u8)
            .ok_or_else(|| MessageError::InvalidFreeTextChar { text: text.to_string() })?;
        value.mul_add(radix, idx as u64);
    }
    Ok(value)
}

fn pad_freetext(text: &str) -> Result<String, MessageError> {
    let upper = text.trim().to_uppercase();
    if upper.chars().count() > FREETEXT_LEN {
        return Err(MessageError::FreeTextTooLong);
    }
    let mut padded = upper;
    while padded.chars().count() < FREETEXT_LEN {
        padded.push(' ');
    }
    Ok(padded)
}

fn unpack_freetext(bits: &BitSlice<u8, Msb0>) -> Result<String, MessageError> {
    let mut value: u128 = 0;
    for bit in bits {
        value = (value << 1) | (*bit as u128);
    }
    let radix = FREETEXT_ALPHABET.len() as u128;
    let mut chars = vec![' '; FREETEXT_LEN];
    for slot in chars.iter_mut().rev() {
        let digit = (value % radix) as usize;
        value /= radix;
        *slot = FREETEXT_ALPHABET[digit] as char;
    }
    Ok(chars.into_iter().collect::<String>().trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cq_roundtrips_with_grid() {
        let msg = Message::Cq { call: "DL1ABC".to_string(), grid: Some("JO31".to_string()) };
        let bits = pack(&msg).unwrap();
        let decoded = unpack(&bits).unwrap();
        assert_eq!(decoded, Message::Cq { call: "DL1ABC".to_string(), grid: Some("JO31".to_string()) });
    }

    #[test]
    fn standard_roundtrips() {
        let msg = Message::Standard {
            call_to: "N0YPR".to_string(),
            call_from: "DL1ABC".to_string(),
            ack: true,
            report: "-12".to_string(),
        };
        let bits = pack(&msg).unwrap();
        let decoded = unpack(&bits).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn freetext_roundtrips_trimmed_and_uppercased() {
        let msg = Message::FreeText("hello world".to_string());
        let bits = pack(&msg).unwrap();
        match unpack(&bits).unwrap() {
            Message::FreeText(text) => assert_eq!(text, "HELLO WORLD"),
            other => panic!("expected FreeText, got {other:?}"),
        }
    }
}
