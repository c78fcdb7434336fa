//! Shape generation - the seam between the core and the piece catalog
//!
//! The controller only ever asks a [`ShapeGenerator`] for the next shape. The
//! stock implementation is [`PieceQueue`], a seedable 7-bag over the classic
//! catalog: every bag holds one of each kind, shuffled, so runs are fair and
//! reproducible from the seed alone.

use crate::catalog::standard_shape;
use crate::shape::Shape;
use crate::types::PieceKind;

/// Source of new pieces
pub trait ShapeGenerator {
    /// Produce the next shape in spawn orientation
    fn next_shape(&mut self) -> Shape;
}

impl<G: ShapeGenerator + ?Sized> ShapeGenerator for Box<G> {
    fn next_shape(&mut self) -> Shape {
        (**self).next_shape()
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// 7-bag piece generator over the standard catalog
#[derive(Debug, Clone)]
pub struct PieceQueue {
    seed: u32,
    bag: [PieceKind; 7],
    /// Index of the next kind to hand out
    bag_index: usize,
    rng: SimpleRng,
}

impl PieceQueue {
    /// Create a new piece queue with the given seed
    pub fn new(seed: u32) -> Self {
        let mut queue = Self {
            seed,
            bag: PieceKind::ALL,
            bag_index: 0,
            rng: SimpleRng::new(seed),
        };
        queue.refill_bag();
        queue
    }

    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Kind the next draw will return
    pub fn peek(&self) -> PieceKind {
        if self.bag_index < self.bag.len() {
            self.bag[self.bag_index]
        } else {
            let mut preview = self.clone();
            preview.draw()
        }
    }

    /// Draw the next kind from the bag
    pub fn draw(&mut self) -> PieceKind {
        if self.bag_index >= self.bag.len() {
            self.refill_bag();
        }
        let kind = self.bag[self.bag_index];
        self.bag_index += 1;
        kind
    }

    /// Seed this queue was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ShapeGenerator for PieceQueue {
    fn next_shape(&mut self) -> Shape {
        standard_shape(self.draw())
    }
}
