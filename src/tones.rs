//! Shared 8-FSK framing constants: the Costas sync array, its placement in
//! the 79-symbol frame, and the Gray code mapping between 3-bit codeword
//! groups and tones.
//!
//! FT8 and JS8 share this layout exactly (§4.5); only the sample rate per
//! symbol (`nsps`) and tone spacing differ between the two codecs and their
//! speed profiles.

/// The 7-tone Costas array used for synchronization.
pub const COSTAS: [u8; 7] = [3, 1, 4, 0, 6, 5, 2];

/// Gray code: 3-bit codeword group -> tone (0..8).
pub const GRAY: [u8; 8] = [0, 1, 3, 2, 6, 7, 5, 4];

/// Inverse Gray code: tone -> 3-bit codeword group.
pub const GRAY_INV: [u8; 8] = [0, 1, 3, 2, 7, 6, 4, 5];

/// Total symbols in a frame.
pub const NN: usize = 79;
/// Data symbols (3 bits of codeword each => 174 bits).
pub const ND: usize = 58;
/// Sync symbols (3 Costas groups of 7).
pub const NS: usize = 21;

/// Symbol indices, in frame order, occupied by the three Costas groups.
pub fn costas_positions() -> [usize; 21] {
    let mut out = [0usize; 21];
    let mut idx = 0;
    for &base in &[0usize, 36, 72] {
        for k in 0..7 {
            out[idx] = base + k;
            idx += 1;
        }
    }
    out
}

/// Symbol indices, in frame order, occupied by the 58 data symbols.
pub fn data_positions() -> [usize; ND] {
    let mut out = [0usize; ND];
    let mut idx = 0;
    for pos in 0..NN {
        if !(0..7).contains(&pos) && !(36..43).contains(&pos) && !(72..79).contains(&pos) {
            out[idx] = pos;
            idx += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_and_inverse_are_mutually_consistent() {
        for bits in 0u8..8 {
            let tone = GRAY[bits as usize];
            assert_eq!(GRAY_INV[tone as usize], bits);
        }
    }

    #[test]
    fn costas_and_data_positions_partition_the_frame() {
        let costas = costas_positions();
        let data = data_positions();
        assert_eq!(costas.len() + data.len(), NN);
        let mut seen = [false; NN];
        for &p in costas.iter().chain(data.iter()) {
            assert!(!seen[p], "position {p} covered twice");
            seen[p] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
