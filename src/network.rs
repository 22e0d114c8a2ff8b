use std::{
    error::Error,
    fmt,
    io::{Read, Write},
};

use machine_learning::{
    arch::{loss::Mse, Sequential},
    optimization::GradientDescent,
    MlErr,
};
use ndarray::ArrayView2;
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{game::OUTCOME_SIZE, sample::INPUT_SIZE, Result, RpsErr};

/// The width of every layer of a feed-forward network, input layer first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Topology(Vec<usize>);

impl Topology {
    pub fn new(widths: Vec<usize>) -> Self {
        Self(widths)
    }

    pub fn widths(&self) -> &[usize] {
        &self.0
    }

    /// Checks that a network of this shape can be trained on the game: at least two layers,
    /// no empty layer, one input per one-hot entry and one output per player.
    ///
    /// # Errors
    /// `RpsErr::InvalidTopology` describing the first violation found.
    pub fn validate(&self) -> Result<()> {
        let widths = &self.0;

        if widths.len() < 2 {
            return Err(RpsErr::InvalidTopology(format!(
                "at least two layers are needed, got {}",
                widths.len()
            )));
        }

        if let Some(i) = widths.iter().position(|&w| w == 0) {
            return Err(RpsErr::InvalidTopology(format!("layer {i} has zero width")));
        }

        if widths[0] != INPUT_SIZE {
            return Err(RpsErr::InvalidTopology(format!(
                "the input layer must have {INPUT_SIZE} units, got {}",
                widths[0]
            )));
        }

        let last = widths[widths.len() - 1];
        if last != OUTCOME_SIZE {
            return Err(RpsErr::InvalidTopology(format!(
                "the output layer must have {OUTCOME_SIZE} units, got {last}"
            )));
        }

        Ok(())
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self(vec![INPUT_SIZE, 30, 12, OUTCOME_SIZE])
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// The capabilities the trainer, the evaluator and the persistence driver need from a network
/// engine.
pub trait Network: Sized {
    type Error: Error + Send + Sync + 'static;

    /// Creates a network of the given shape. The same `seed` yields the same initial parameters.
    fn create(topology: &Topology, seed: Option<u64>) -> std::result::Result<Self, Self::Error>;

    /// Computes the output for a single input vector.
    fn predict(&self, input: &[f32]) -> std::result::Result<Vec<f32>, Self::Error>;

    /// Makes one online update towards `target` and returns the error of the sample.
    fn train(
        &mut self,
        input: &[f32],
        target: &[f32],
        learning_rate: f32,
    ) -> std::result::Result<f32, Self::Error>;

    fn save<W: Write>(&self, writer: W) -> std::result::Result<(), Self::Error>;

    fn load<R: Read>(reader: R) -> std::result::Result<Self, Self::Error>;

    fn topology(&self) -> Topology;
}

impl Network for Sequential {
    type Error = MlErr;

    fn create(topology: &Topology, seed: Option<u64>) -> machine_learning::Result<Self> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Sequential::from_topology(topology.widths(), &mut rng)
    }

    fn predict(&self, input: &[f32]) -> machine_learning::Result<Vec<f32>> {
        let x = ArrayView2::from_shape((1, input.len()), input)?;
        let y_pred = Sequential::predict(self, x)?;
        Ok(y_pred.iter().copied().collect())
    }

    fn train(
        &mut self,
        input: &[f32],
        target: &[f32],
        learning_rate: f32,
    ) -> machine_learning::Result<f32> {
        let mut optimizer = GradientDescent::checked(learning_rate)?;
        let x = ArrayView2::from_shape((1, input.len()), input)?;
        let y = ArrayView2::from_shape((1, target.len()), target)?;
        self.train_step(x, y, &Mse, &mut optimizer)
    }

    fn save<W: Write>(&self, writer: W) -> machine_learning::Result<()> {
        Sequential::save(self, writer)
    }

    fn load<R: Read>(reader: R) -> machine_learning::Result<Self> {
        Sequential::load(reader)
    }

    fn topology(&self) -> Topology {
        Topology::new(Sequential::topology(self))
    }
}
