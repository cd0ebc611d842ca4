//! RNG module - 7-bag random piece generation
//!
//! Implements the "7-bag" randomization algorithm: each bag contains one of each kind,
//! shuffled with Fisher-Yates. The bag is refilled as soon as its last kind is drawn, so
//! it is never observed empty.
//!
//! Also provides a simple LCG so whole games are reproducible from a seed.

use crate::types::{PieceKind, BAG_SIZE};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Uniform index into a slice of length `len` (`len` must be non-zero)
    pub fn next_index(&mut self, len: usize) -> usize {
        self.next_range(len as u32) as usize
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Current internal state (reseeding with it continues the same sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct Bag {
    /// Current bag of pieces
    kinds: [PieceKind; BAG_SIZE],
    /// Index into current bag
    index: usize,
    /// Number of bags generated so far
    refills: u64,
    rng: SimpleRng,
}

impl Bag {
    /// Create a new bag with the given seed
    pub fn new(seed: u32) -> Self {
        let mut bag = Self {
            kinds: PieceKind::ALL,
            index: 0,
            refills: 0,
            rng: SimpleRng::new(seed),
        };
        bag.refill();
        bag
    }

    /// Generate a new shuffled bag
    fn refill(&mut self) {
        self.kinds = PieceKind::ALL;
        self.rng.shuffle(&mut self.kinds);
        self.index = 0;
        self.refills += 1;
    }

    /// Draw the next kind, refilling right away if that emptied the bag
    pub fn draw(&mut self) -> PieceKind {
        let kind = self.kinds[self.index];
        self.index += 1;
        if self.index >= BAG_SIZE {
            self.refill();
        }
        kind
    }

    /// Peek at the next kind without removing it
    pub fn peek(&self) -> PieceKind {
        self.kinds[self.index]
    }

    /// Kinds left in the current bag, in draw order
    pub fn remaining(&self) -> &[PieceKind] {
        &self.kinds[self.index..]
    }

    pub fn refills(&self) -> u64 {
        self.refills
    }

    /// Get the current RNG state (for restarting with a fresh but reproducible sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for Bag {
    fn default() -> Self {
        Self::new(1)
    }
}
