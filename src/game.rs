use std::fmt;

/// Number of moves in the game.
pub const N: usize = 3;

/// Width of the outcome vector: `[a wins, b wins]`.
pub const OUTCOME_SIZE: usize = 2;

/// One of the three choices of Rock-Paper-Scissors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    /// Every move, sorted by index.
    pub const ALL: [Move; N] = [Move::Rock, Move::Paper, Move::Scissors];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Move::Rock => "Rock",
            Move::Paper => "Paper",
            Move::Scissors => "Scissors",
        }
    }

    /// The move this one defeats.
    pub fn beaten(self) -> Move {
        match self {
            Move::Rock => Move::Scissors,
            Move::Paper => Move::Rock,
            Move::Scissors => Move::Paper,
        }
    }

    /// Returns whether `self` defeats `other`.
    pub fn beats(self, other: Move) -> bool {
        self.beaten() == other
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// An ordered pair of moves, `a` against `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MovePair {
    pub a: Move,
    pub b: Move,
}

impl MovePair {
    pub fn new(a: Move, b: Move) -> Self {
        Self { a, b }
    }

    /// Every ordered pair, outer loop over `a` and inner loop over `b`, both ascending.
    pub fn all() -> impl Iterator<Item = MovePair> {
        Move::ALL
            .into_iter()
            .flat_map(|a| Move::ALL.into_iter().map(move |b| MovePair::new(a, b)))
    }
}

/// Returns `[1, 0]` if `a` beats `b`, `[0, 1]` if `b` beats `a` and `[0, 0]` otherwise.
pub fn outcome(a: Move, b: Move) -> [f32; OUTCOME_SIZE] {
    if a.beats(b) {
        [1.0, 0.0]
    } else if b.beats(a) {
        [0.0, 1.0]
    } else {
        [0.0, 0.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Move::*;

    #[test]
    fn test_outcome_follows_the_rules() {
        assert_eq!(outcome(Paper, Rock), [1.0, 0.0]);
        assert_eq!(outcome(Rock, Paper), [0.0, 1.0]);
        assert_eq!(outcome(Rock, Scissors), [1.0, 0.0]);
        assert_eq!(outcome(Scissors, Rock), [0.0, 1.0]);
        assert_eq!(outcome(Scissors, Paper), [1.0, 0.0]);
        assert_eq!(outcome(Paper, Scissors), [0.0, 1.0]);
    }

    #[test]
    fn test_outcome_of_a_draw_is_zero() {
        for m in Move::ALL {
            assert_eq!(outcome(m, m), [0.0, 0.0]);
        }
    }

    #[test]
    fn test_outcome_sums_to_at_most_one() {
        for pair in MovePair::all() {
            let o = outcome(pair.a, pair.b);
            assert!(o.iter().sum::<f32>() <= 1.0);
            assert!(o.iter().all(|&v| v == 0.0 || v == 1.0));
        }
    }

    #[test]
    fn test_pairs_are_sorted() {
        let pairs: Vec<_> = MovePair::all()
            .map(|p| (p.a.index(), p.b.index()))
            .collect();

        assert_eq!(pairs.len(), N * N);
        assert_eq!(pairs[0], (0, 0));
        assert_eq!(pairs[1], (0, 1));
        assert_eq!(pairs[3], (1, 0));
        assert_eq!(pairs[8], (2, 2));
        assert!(pairs.windows(2).all(|w| w[0] < w[1]), "{pairs:?}");
    }

    #[test]
    fn test_every_move_beats_exactly_one() {
        for m in Move::ALL {
            let beaten: Vec<_> = Move::ALL.into_iter().filter(|&o| m.beats(o)).collect();
            assert_eq!(beaten, vec![m.beaten()]);
            assert!(!m.beaten().beats(m));
        }
    }

    #[test]
    fn test_display_pads_names() {
        assert_eq!(format!("{:<10}|", Rock), "Rock      |");
    }
}
