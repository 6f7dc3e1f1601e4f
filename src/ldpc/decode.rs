//! Min-sum belief-propagation decoder for LDPC(174,91).
//!
//! Check-to-variable and variable-to-check message arrays are walked via
//! the `NM`/`MN` adjacency tables, with a hard-decision parity check each
//! iteration and CRC as the final acceptance gate. The per-check update
//! rule is the scaled min-sum approximation (§4.3).

use super::constants::{K, MAX_NRW, MN, N, NCW, NM, NRW};
use crate::crc14;
use bitvec::prelude::*;

/// Scaling factor applied to min-sum check-to-variable messages.
const MIN_SUM_SCALE: f32 = 0.8;

/// Decodes 174 channel LLRs to a 91-bit message, or returns `None` if BP
/// does not converge to a CRC-valid codeword within `max_iterations`.
///
/// Positive LLR means the bit is more likely 0.
pub fn decode(llr: &[f32], max_iterations: usize) -> Option<BitVec<u8, Msb0>> {
    decode_with_ap(llr, None, max_iterations).map(|(msg, _)| msg)
}

/// Min-sum decode with optional a-priori bit hints.
///
/// `ap_mask`, if present, must be `N` entries long. Wherever it is `Some(sign)`,
/// that bit's LLR is held fixed at `sign` (a large-magnitude hint, positive
/// for an expected 0, negative for an expected 1) for every iteration instead
/// of being updated from incoming check messages.
///
/// Returns the decoded 91-bit message and the number of BP iterations used.
pub fn decode_with_ap(
    llr: &[f32],
    ap_mask: Option<&[Option<f32>]>,
    max_iterations: usize,
) -> Option<(BitVec<u8, Msb0>, usize)> {
    if llr.len() != N {
        return None;
    }
    if let Some(mask) = ap_mask {
        if mask.len() != N {
            return None;
        }
    }
    // An all-zero channel LLR vector carries no information: every posterior
    // would start at exactly 0.0, the hard decision ties to the all-zero
    // codeword, and that codeword is always parity- and CRC-valid for this H
    // matrix. With no AP hints to break the tie, treat it as a decode
    // failure rather than accept the trivial all-zero solution (§4.3's
    // tie-break rule).
    let has_ap_hint = ap_mask.is_some_and(|mask| mask.iter().any(|h| h.is_some()));
    if !has_ap_hint && llr.iter().all(|&x| x == 0.0) {
        tracing::debug!("rejecting all-zero channel LLR vector before BP");
        return None;
    }

    // messages check -> variable, indexed [check][slot within NM[check]]
    let mut to_var = vec![vec![0.0f32; MAX_NRW]; NM.len()];
    // messages variable -> check, indexed [variable][slot within MN[variable]]
    let mut to_check = vec![vec![0.0f32; NCW]; N];
    let mut posterior = vec![0.0f32; N];

    for iter in 0..=max_iterations {
        for v in 0..N {
            posterior[v] = match ap_mask.and_then(|m| m[v]) {
                Some(hint) => hint,
                None => llr[v] + to_check[v].iter().sum::<f32>(),
            };
        }

        let mut codeword = bitvec![u8, Msb0; 0; N];
        for v in 0..N {
            codeword.set(v, posterior[v] < 0.0);
        }

        if all_checks_satisfied(&codeword) {
            let message = &codeword[..K];
            if crc14::validate(message) {
                tracing::debug!(iter, "ldpc converged and passed crc");
                return Some((message.to_bitvec(), iter));
            }
            if tracing::enabled!(tracing::Level::TRACE) {
                tracing::trace!(iter, "parity satisfied but crc failed, continuing bp");
            }
        }

        if iter == max_iterations {
            tracing::debug!(iter, "ldpc gave up without a crc-valid codeword");
            break;
        }

        // variable -> check: posterior minus this check's own prior contribution
        for v in 0..N {
            for (slot, &check) in MN[v].iter().enumerate() {
                let row_slot = NM[check].iter().position(|&c| c == v).unwrap();
                to_check[v][slot] = posterior[v] - to_var[check][row_slot];
            }
        }

        // check -> variable: scaled min-sum over the other incident variables
        for (check, row) in NM.iter().enumerate() {
            for i in 0..NRW[check] {
                let mut sign = 1.0f32;
                let mut min_abs = f32::INFINITY;
                for (j, &other_var) in row.iter().enumerate() {
                    if j == i {
                        continue;
                    }
                    let slot = MN[other_var].iter().position(|&c| c == check).unwrap();
                    let msg = to_check[other_var][slot];
                    sign *= if msg < 0.0 { -1.0 } else { 1.0 };
                    min_abs = min_abs.min(msg.abs());
                }
                to_var[check][i] = MIN_SUM_SCALE * sign * min_abs;
            }
        }
    }

    None
}

fn all_checks_satisfied(codeword: &BitSlice<u8, Msb0>) -> bool {
    for row in NM.iter() {
        let mut parity = false;
        for &v in row {
            parity ^= codeword[v];
        }
        if parity {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ldpc::encode;

    fn to_llrs(codeword: &BitSlice<u8, Msb0>, magnitude: f32) -> Vec<f32> {
        codeword.iter().map(|b| if *b { -magnitude } else { magnitude }).collect()
    }

    #[test]
    fn noise_free_roundtrip() {
        let mut message = bitvec![u8, Msb0; 0; 77];
        message.set(1, true);
        message.set(5, true);
        message.set(40, true);
        let with_crc = crc14::append(&message);

        let mut codeword = bitvec![u8, Msb0; 0; N];
        encode(&with_crc, &mut codeword);

        let llrs = to_llrs(&codeword, 10.0);
        let decoded = decode(&llrs, 50).expect("should converge");
        assert_eq!(decoded, with_crc);
    }

    #[test]
    fn all_zero_llrs_fail_to_decode() {
        let llrs = vec![0.0f32; N];
        assert!(decode(&llrs, 50).is_none());
    }

    #[test]
    fn ap_hint_fixes_bit_through_iterations() {
        let mut message = bitvec![u8, Msb0; 0; 77];
        message.set(2, true);
        let with_crc = crc14::append(&message);
        let mut codeword = bitvec![u8, Msb0; 0; N];
        encode(&with_crc, &mut codeword);

        let mut llrs = to_llrs(&codeword, 8.0);
        // Corrupt one bit's channel LLR, but supply the correct value as an AP hint.
        let corrupt_at = 3;
        llrs[corrupt_at] = -llrs[corrupt_at];
        let mut mask = vec![None; N];
        mask[corrupt_at] = Some(if codeword[corrupt_at] { -8.0 } else { 8.0 });

        let (decoded, _) = decode_with_ap(&llrs, Some(&mask), 50).expect("should converge with hint");
        assert_eq!(decoded, with_crc);
    }

    #[test]
    fn wrong_length_llrs_returns_none() {
        let llrs = vec![0.0f32; N - 1];
        assert!(decode(&llrs, 10).is_none());
    }
}
