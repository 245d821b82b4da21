// Bit helpers, direction tables and precomputed leaper targets for move generation.
// Indexing follows board.rs: bit = row * 8 + col, row 0 at the top.

use std::sync::OnceLock;

// Sliding directions as (d_row, d_col)
pub const ROOK_DIRS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
pub const BISHOP_DIRS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
pub const QUEEN_DIRS: [(i32, i32); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

pub const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub const KING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

// Bit operations
#[inline]
pub fn pop_lsb(bb: &mut u64) -> Option<usize> {
    if *bb == 0 {
        return None;
    }
    let lsb = bb.trailing_zeros() as usize;
    *bb &= *bb - 1;
    Some(lsb)
}

#[inline]
pub fn count_bits(bb: u64) -> u32 {
    bb.count_ones()
}

pub struct BitIter {
    bb: u64,
}

impl Iterator for BitIter {
    type Item = usize;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        pop_lsb(&mut self.bb)
    }
}

#[inline]
pub fn iter_bits(bb: u64) -> BitIter {
    BitIter { bb }
}

static KNIGHT_TARGETS: OnceLock<[u64; 64]> = OnceLock::new();
static KING_TARGETS: OnceLock<[u64; 64]> = OnceLock::new();

/// On-board targets of `offsets` from every square; edges clip the set.
fn leaper_table(offsets: &[(i32, i32)]) -> [u64; 64] {
    let mut table = [0u64; 64];
    for (idx, entry) in table.iter_mut().enumerate() {
        let row = (idx / 8) as i32;
        let col = (idx % 8) as i32;
        let mut mask = 0u64;
        for &(d_row, d_col) in offsets {
            let r = row + d_row;
            let c = col + d_col;
            if (0..8).contains(&r) && (0..8).contains(&c) {
                mask |= 1u64 << (r * 8 + c);
            }
        }
        *entry = mask;
    }
    table
}

pub fn init_attack_tables() {
    KNIGHT_TARGETS.get_or_init(|| leaper_table(&KNIGHT_OFFSETS));
    KING_TARGETS.get_or_init(|| leaper_table(&KING_OFFSETS));
}

#[inline]
pub fn knight_targets(idx: usize) -> u64 {
    KNIGHT_TARGETS.get_or_init(|| leaper_table(&KNIGHT_OFFSETS))[idx]
}

#[inline]
pub fn king_targets(idx: usize) -> u64 {
    KING_TARGETS.get_or_init(|| leaper_table(&KING_OFFSETS))[idx]
}
