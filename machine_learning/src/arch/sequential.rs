use ndarray::{Array2, ArrayView2};
use rand::Rng;
use rand_distr::{Distribution, Uniform};

use super::{activations::ActFn, layers::Layer, loss::LossFn};
use crate::{MlErr, Result, optimization::Optimizer};

/// A sequential model: information flows forward when computing an output and backward when
/// computing the *deltas* of its layers.
///
/// The model owns its parameters as a single contiguous buffer, each layer reading the chunk
/// that corresponds to it in order.
#[derive(Clone, Debug)]
pub struct Sequential {
    layers: Vec<Layer>,
    params: Vec<f32>,
    grad: Vec<f32>,
}

impl Sequential {
    /// Creates a new `Sequential`.
    ///
    /// # Arguments
    /// * `layers` - The layers the sequential is composed of.
    /// * `params` - The parameters of every layer, concatenated in layer order.
    ///
    /// # Returns
    /// A new `Sequential` instance or an error if the layers don't chain or the amount of
    /// parameters doesn't match them.
    pub fn new<I>(layers: I, params: Vec<f32>) -> Result<Self>
    where
        I: IntoIterator<Item = Layer>,
    {
        let layers: Vec<_> = layers.into_iter().collect();

        if layers.is_empty() {
            return Err(MlErr::InvalidTopology(
                "a model must have at least one layer".into(),
            ));
        }

        if let Some(i) = layers
            .iter()
            .position(|layer| layer.dim().0 == 0 || layer.dim().1 == 0)
        {
            return Err(MlErr::InvalidTopology(format!("layer {i} has zero width")));
        }

        for (i, pair) in layers.windows(2).enumerate() {
            let (_, prev_out) = pair[0].dim();
            let (next_in, _) = pair[1].dim();

            if prev_out != next_in {
                return Err(MlErr::InvalidTopology(format!(
                    "layer {}: input size ({next_in}) does not match previous layer output size ({prev_out})",
                    i + 1
                )));
            }
        }

        let size: usize = layers.iter().map(|layer| layer.size()).sum();
        if params.len() != size {
            return Err(MlErr::SizeMismatch {
                a: "params",
                b: "layers",
                got: params.len(),
                expected: size,
            });
        }

        Ok(Self {
            layers,
            grad: vec![0.0; size],
            params,
        })
    }

    /// Creates a fully connected network with a sigmoid after every layer.
    ///
    /// Weights are drawn from a Xavier uniform distribution, biases start at zero.
    ///
    /// # Arguments
    /// * `widths` - The width of every layer, input included.
    /// * `rng` - The random number generator used for the weights.
    pub fn from_topology<R: Rng>(widths: &[usize], rng: &mut R) -> Result<Self> {
        if widths.len() < 2 {
            return Err(MlErr::InvalidTopology(format!(
                "at least two layer widths are needed, got {}",
                widths.len()
            )));
        }

        if let Some(i) = widths.iter().position(|&w| w == 0) {
            return Err(MlErr::InvalidTopology(format!("layer {i} has zero width")));
        }

        let mut layers = Vec::with_capacity(widths.len() - 1);
        let mut params = Vec::new();

        for dim in widths.windows(2).map(|w| (w[0], w[1])) {
            let range = (6. / (dim.0 + dim.1) as f32).sqrt();
            let uniform = Uniform::new(-range, range)?;

            params.extend(uniform.sample_iter(&mut *rng).take(dim.0 * dim.1));
            params.extend(std::iter::repeat_n(0.0, dim.1));
            layers.push(Layer::dense(dim, Some(ActFn::sigmoid(1.0))));
        }

        Self::new(layers, params)
    }

    /// Returns the amount of parameters in the model.
    pub fn size(&self) -> usize {
        self.params.len()
    }

    pub fn params(&self) -> &[f32] {
        &self.params
    }

    pub(super) fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Returns the width of every layer, input included.
    pub fn topology(&self) -> Vec<usize> {
        let mut widths = Vec::with_capacity(self.layers.len() + 1);
        widths.push(self.layers[0].dim().0);
        widths.extend(self.layers.iter().map(|layer| layer.dim().1));
        widths
    }

    pub fn input_size(&self) -> usize {
        self.layers[0].dim().0
    }

    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1].dim().1
    }

    /// Computes the model's prediction for every row of `x`, leaving the model untouched.
    ///
    /// # Arguments
    /// * `x` - The input data, one sample per row.
    ///
    /// # Returns
    /// The prediction for the given input or an error if occurred.
    pub fn predict(&self, x: ArrayView2<f32>) -> Result<Array2<f32>> {
        self.check_cols("input", x.ncols(), self.input_size())?;

        let mut offset = 0;
        let mut a = x.to_owned();

        for layer in &self.layers {
            let size = layer.size();
            a = layer.infer(&self.params[offset..offset + size], a.view())?;
            offset += size;
        }

        Ok(a)
    }

    /// Makes a forward and a backward pass over one batch and updates the parameters with
    /// `optimizer`.
    ///
    /// # Arguments
    /// * `x` - The input data, one sample per row.
    /// * `y` - The expected output, one sample per row.
    /// * `loss_fn` - The loss function.
    /// * `optimizer` - The optimizer that dictates how to update the parameters.
    ///
    /// # Returns
    /// The loss of the batch, as measured before the update.
    pub fn train_step<L, O>(
        &mut self,
        x: ArrayView2<f32>,
        y: ArrayView2<f32>,
        loss_fn: &L,
        optimizer: &mut O,
    ) -> Result<f32>
    where
        L: LossFn,
        O: Optimizer,
    {
        self.check_cols("input", x.ncols(), self.input_size())?;
        self.check_cols("target", y.ncols(), self.output_size())?;

        if x.nrows() != y.nrows() {
            return Err(MlErr::SizeMismatch {
                a: "input rows",
                b: "target rows",
                got: y.nrows(),
                expected: x.nrows(),
            });
        }

        let y_pred = self.forward(x)?;
        let loss = loss_fn.loss(y_pred.view(), y);
        if !loss.is_finite() {
            return Err(MlErr::NonFiniteLoss);
        }

        let mut d = loss_fn.loss_prime(y_pred.view(), y);
        let mut end = self.params.len();

        for layer in self.layers.iter().rev() {
            let start = end - layer.size();
            d = layer.backward(&self.params[start..end], &mut self.grad[start..end], d)?;
            end = start;
        }

        optimizer.update_params(&mut self.params, &self.grad);
        Ok(loss)
    }

    fn forward(&mut self, x: ArrayView2<f32>) -> Result<Array2<f32>> {
        let mut offset = 0;
        let mut a = x.to_owned();

        for layer in self.layers.iter_mut() {
            let size = layer.size();
            a = layer.forward(&self.params[offset..offset + size], a.view())?;
            offset += size;
        }

        Ok(a)
    }

    fn check_cols(&self, what: &'static str, got: usize, expected: usize) -> Result<()> {
        if got != expected {
            return Err(MlErr::SizeMismatch {
                a: what,
                b: "model",
                got,
                expected,
            });
        }

        Ok(())
    }
}
