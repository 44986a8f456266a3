//! Bit-level primitives over 64-bit words.
//!
//! Every set in this crate stores membership in `u64` words. This module contains the
//! handful of word operations that cardinality and iteration are built on, plus the
//! addressing helpers that map an ordinal to its word and bit.

/// Number of bits per storage word.
pub const BITS_PER_WORD: usize = 64;

/// Counts set bits using the parallel reduction: pairs, nibbles, bytes, then one multiply
/// folds all byte counts into the top byte.
#[inline]
pub const fn popcount(word: u64) -> u32 {
    let mut v = word;
    v -= (v >> 1) & 0x5555_5555_5555_5555;
    v = (v & 0x3333_3333_3333_3333) + ((v >> 2) & 0x3333_3333_3333_3333);
    v = (v + (v >> 4)) & 0x0F0F_0F0F_0F0F_0F0F;
    (v.wrapping_mul(0x0101_0101_0101_0101) >> 56) as u32
}

/// Index of the lowest set bit, found by halving the search window (32, 16, 8, 4, 2, 1).
///
/// # Panics
///
/// Debug builds panic if `word == 0`; the result is meaningless in that case.
#[inline]
pub const fn trailing_zero_index(word: u64) -> u32 {
    debug_assert!(word != 0, "trailing_zero_index of an empty word");

    let mut n = 1;
    let mut y = word as u32;
    if y == 0 {
        n += 32;
        y = (word >> 32) as u32;
    }
    if y & 0x0000_FFFF == 0 {
        n += 16;
        y >>= 16;
    }
    if y & 0x0000_00FF == 0 {
        n += 8;
        y >>= 8;
    }
    if y & 0x0000_000F == 0 {
        n += 4;
        y >>= 4;
    }
    if y & 0x0000_0003 == 0 {
        n += 2;
        y >>= 2;
    }
    n - (y & 1)
}

/// Isolates the lowest set bit of `word` (zero stays zero).
#[inline]
pub const fn lowest_bit(word: u64) -> u64 {
    word & word.wrapping_neg()
}

/// Gets the word index and bit position for a given ordinal.
#[inline]
pub const fn word_and_bit(ordinal: usize) -> (usize, u32) {
    (ordinal >> 6, (ordinal & 63) as u32)
}

/// Number of words needed to hold `bits` bits.
#[inline]
pub const fn word_count(bits: usize) -> usize {
    bits.div_ceil(BITS_PER_WORD)
}

/// Mask of the bits in use in the last word of a `bits`-bit array.
///
/// A full last word yields all ones; an empty array yields zero.
#[inline]
pub const fn last_word_mask(bits: usize) -> u64 {
    match bits % BITS_PER_WORD {
        0 if bits == 0 => 0,
        0 => u64::MAX,
        rem => u64::MAX >> (BITS_PER_WORD - rem),
    }
}

/// Total number of set bits across `words`.
#[inline]
pub fn count_words(words: &[u64]) -> usize {
    words.iter().map(|&w| popcount(w) as usize).sum()
}
