//! # Fisher–Yates Shuffle
//!
//! In-place uniform shuffle. Walks from the last index down to 1 and swaps
//! each element with a uniformly chosen element at or before its position,
//! so every permutation is equally likely given a uniform `rng`.

use rand::Rng;

/// Shuffle `items` in place.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}
