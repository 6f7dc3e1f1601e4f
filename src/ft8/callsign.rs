//! Callsign packing (§4.6): align the first digit to position 2, then
//! combine six position-specific alphabets into a 28-bit integer.

use super::error::MessageError;

const ALPHA_0: &str = " ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const ALPHA_1: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ALPHA_2: &str = "0123456789";
const ALPHA_3: &str = " ABCDEFGHIJKLMNOPQRSTUVWXYZ";

fn alphabet_for(position: usize) -> &'static str {
    match position {
        0 => ALPHA_0,
        1 => ALPHA_1,
        2 => ALPHA_2,
        _ => ALPHA_3,
    }
}

fn aligned_chars(call: &str) -> Result<[char; 6], MessageError> {
    let upper = call.trim().to_uppercase();
    let digit_pos = upper
        .chars()
        .position(|c| c.is_ascii_digit())
        .ok_or_else(|| MessageError::CallsignNoDigit { call: call.to_string() })?;

    if digit_pos > 2 {
        return Err(MessageError::CallsignDigitTooFar { call: call.to_string() });
    }

    let mut padded: String = " ".repeat(2 - digit_pos);
    padded.push_str(&upper);
    if padded.len() > 6 {
        return Err(MessageError::CallsignTooLong { call: call.to_string() });
    }
    while padded.len() < 6 {
        padded.push(' ');
    }

    let chars: Vec<char> = padded.chars().collect();
    Ok([chars[0], chars[1], chars[2], chars[3], chars[4], chars[5]])
}

/// Packs a callsign into a 28-bit integer.
pub fn pack(call: &str) -> Result<u32, MessageError> {
    let chars = aligned_chars(call)?;
    let mut indices = [0u32; 6];
    for (i, &ch) in chars.iter().enumerate() {
        let alphabet = alphabet_for(i);
        let idx = alphabet
            .chars()
            .position(|a| a == ch)
            .ok_or(MessageError::CallsignInvalidChar { ch, position: i })?;
        indices[i] = idx as u32;
    }

    let [c0, c1, c2, c3, c4, c5] = indices;
    Ok((((((c0 * 36 + c1) * 10 + c2) * 27 + c3) * 27 + c4) * 27 + c5))
}

/// Unpacks a 28-bit integer into a trimmed callsign string.
pub fn unpack(value: u32) -> Result<String, MessageError> {
    let max = ALPHA_0.len() as u32 * ALPHA_1.len() as u32 * ALPHA_2.len() as u32
        * ALPHA_3.len() as u32 * ALPHA_3.len() as u32 * ALPHA_3.len() as u32;
    if value >= max {
        return Err(MessageError::CallsignOutOfRange { value });
    }

    let mut remaining = value;
    let c5 = remaining % 27;
    remaining /= 27;
    let c4 = remaining % 27;
    remaining /= 27;
    let c3 = remaining % 27;
    remaining /= 27;
    let c2 = remaining % 10;
    remaining /= 10;
    let c1 = remaining % 36;
    remaining /= 36;
    let c0 = remaining;

    let indices = [c0, c1, c2, c3, c4, c5];
    let mut out = String::with_capacity(6);
    for (i, &idx) in indices.iter().enumerate() {
        let alphabet = alphabet_for(i);
        let ch = alphabet
            .chars()
            .nth(idx as usize)
            .ok_or(MessageError::CallsignOutOfRange { value })?;
        out.push(ch);
    }

    Ok(out.trim().to_string())
}
