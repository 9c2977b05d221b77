use std::collections::VecDeque;

use blockfall_core::PieceKind;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Seeded 7-bag piece queue. A freshly shuffled bag of all seven kinds is
/// appended whenever `REFILL_THRESHOLD` or fewer pieces remain.
#[derive(Clone, Debug)]
pub struct SevenBag {
    rng: Pcg32,
    pieces: VecDeque<PieceKind>,
}

impl SevenBag {
    pub const REFILL_THRESHOLD: usize = 5;

    pub fn new(seed: u64) -> Self {
        let mut bag = Self {
            rng: Pcg32::seed_from_u64(seed),
            pieces: VecDeque::with_capacity(PieceKind::ALL.len() * 2),
        };
        bag.refill();
        bag
    }

    fn shuffled(&mut self) -> [PieceKind; 7] {
        let mut bag = PieceKind::ALL;
        bag.shuffle(&mut self.rng);
        bag
    }

    fn refill(&mut self) {
        while self.pieces.len() <= Self::REFILL_THRESHOLD {
            let bag = self.shuffled();
            self.pieces.extend(bag);
        }
    }

    pub fn next_piece(&mut self) -> PieceKind {
        let piece = match self.pieces.pop_front() {
            Some(piece) => piece,
            // only reachable if the queue was drained without a refill
            None => {
                let [first, rest @ ..] = self.shuffled();
                self.pieces.extend(rest);
                first
            }
        };
        self.refill();
        piece
    }

    pub fn peek(&self) -> Option<PieceKind> {
        self.pieces.front().copied()
    }

    /// Upcoming kinds in draw order.
    pub fn preview(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.pieces.iter().copied()
    }

    pub fn remaining(&self) -> usize {
        self.pieces.len()
    }
}
