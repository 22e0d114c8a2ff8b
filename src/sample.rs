use crate::game::{outcome, Move, MovePair, N, OUTCOME_SIZE};

/// Width of an encoded sample.
pub const INPUT_SIZE: usize = 2 * N;

/// One training or evaluation sample derived from an ordered pair of moves.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub pair: MovePair,
    pub input: Vec<f32>,
    pub target: [f32; OUTCOME_SIZE],
}

impl Sample {
    pub fn new(pair: MovePair) -> Self {
        Self {
            pair,
            input: encode(pair.a, pair.b),
            target: outcome(pair.a, pair.b),
        }
    }
}

/// One-hot encodes `a` in the first half of the input and `b` in the second.
pub fn encode(a: Move, b: Move) -> Vec<f32> {
    let mut input = vec![0.0; INPUT_SIZE];
    input[a.index()] = 1.0;
    input[N + b.index()] = 1.0;
    input
}

/// All `N * N` samples, in the order of `MovePair::all`.
pub fn samples() -> impl Iterator<Item = Sample> {
    MovePair::all().map(Sample::new)
}
