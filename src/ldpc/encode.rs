//! LDPC(174,91) systematic encoder.
//!
//! Each parity bit is a direct XOR of a fixed subset of the 91 message bits
//! (§4.3): there is no back-substitution chain between parity bits, so
//! encoding is a single pass over [`H_ROWS`](super::constants::H_ROWS).

use super::constants::{H_ROWS, K, N};
use bitvec::prelude::*;

/// Encodes a 91-bit message into a 174-bit systematic codeword.
pub fn encode(message: &BitSlice<u8, Msb0>, codeword: &mut BitSlice<u8, Msb0>) {
    assert_eq!(message.len(), K, "message must be {K} bits");
    assert_eq!(codeword.len(), N, "codeword must be {N} bits");

    codeword[..K].copy_from_bitslice(message);

    for (m, row) in H_ROWS.iter().enumerate() {
        let mut parity = false;
        for &col in row.iter() {
            parity ^= message[col as usize];
        }
        codeword.set(K + m, parity);
    }
}
