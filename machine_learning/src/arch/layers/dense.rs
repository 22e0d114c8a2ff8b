use ndarray::prelude::*;

use crate::{MlErr, Result, arch::activations::ActFn};

/// A fully connected layer. Its parameters live outside of it, in a contiguous slice laid out
/// as the `dim.0 x dim.1` weights (row major) followed by the `dim.1` biases.
#[derive(Clone, Debug)]
pub struct Dense {
    dim: (usize, usize),
    act_fn: Option<ActFn>,
    size: usize,

    // Forward metadata
    x: Array2<f32>,
    z: Array2<f32>,
}

impl Dense {
    /// Creates a new `Dense` layer.
    ///
    /// # Arguments
    /// * `dim` - The input and output widths of the layer.
    /// * `act_fn` - The activation applied to the weighted sums, if any.
    pub fn new(dim: (usize, usize), act_fn: Option<ActFn>) -> Self {
        let zeros = Array2::zeros((1, 1));

        Self {
            dim,
            size: (dim.0 + 1) * dim.1,
            act_fn,
            x: zeros.clone(),
            z: zeros,
        }
    }

    /// Returns the size of this layer.
    ///
    /// # Returns
    /// The amount of parameters this layer has.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn dim(&self) -> (usize, usize) {
        self.dim
    }

    pub fn act_fn(&self) -> Option<ActFn> {
        self.act_fn
    }

    /// Computes the layer's output without keeping any metadata for a later backward pass.
    pub fn infer(&self, params: &[f32], x: ArrayView2<f32>) -> Result<Array2<f32>> {
        let (w, b) = self.view_params(params)?;
        let mut a = x.dot(&w) + &b;

        if let Some(act_fn) = &self.act_fn {
            a.mapv_inplace(|z| act_fn.f(z));
        }

        Ok(a)
    }

    /// Computes the layer's output, keeping its input and weighted sums for `backward`.
    pub fn forward(&mut self, params: &[f32], x: ArrayView2<f32>) -> Result<Array2<f32>> {
        let (w, b) = self.view_params(params)?;

        self.x = x.to_owned();
        self.z = x.dot(&w) + &b;

        let Some(act_fn) = &self.act_fn else {
            return Ok(self.z.clone());
        };

        Ok(self.z.mapv(|z| act_fn.f(z)))
    }

    /// Writes this layer's gradient into `grad` given the delta of its output, and returns the
    /// delta of its input.
    pub fn backward(
        &self,
        params: &[f32],
        grad: &mut [f32],
        mut d: Array2<f32>,
    ) -> Result<Array2<f32>> {
        if let Some(act_fn) = &self.act_fn {
            d.zip_mut_with(&self.z, |d, &z| *d *= act_fn.df(z));
        }

        let (mut dw, mut db) = self.view_grad(grad)?;
        dw.assign(&self.x.t().dot(&d));
        db.assign(&d.sum_axis(Axis(0)));

        let (w, _) = self.view_params(params)?;
        Ok(d.dot(&w.t()))
    }

    /// Gives a view of the raw gradient slice as the delta weights and delta biases of this layer.
    ///
    /// # Arguments
    /// * `grad` - A gradient slice.
    ///
    /// # Returns
    /// A tuple containing the delta weights and delta biases.
    fn view_grad<'a>(
        &self,
        grad: &'a mut [f32],
    ) -> Result<(ArrayViewMut2<'a, f32>, ArrayViewMut1<'a, f32>)> {
        self.check_len("gradient", grad.len())?;

        let w_size = self.size - self.dim.1;
        let (dw_raw, db_raw) = grad.split_at_mut(w_size);
        let dw = ArrayViewMut2::from_shape(self.dim, dw_raw)?;
        let db = ArrayViewMut1::from_shape(self.dim.1, db_raw)?;
        Ok((dw, db))
    }

    /// Gives a view of the raw parameter slice as the weights and biases of this layer.
    ///
    /// # Arguments
    /// * `params` - A slice of parameters.
    ///
    /// # Returns
    /// A tuple containing the weights and biases.
    fn view_params<'a>(
        &self,
        params: &'a [f32],
    ) -> Result<(ArrayView2<'a, f32>, ArrayView1<'a, f32>)> {
        self.check_len("parameters", params.len())?;

        let w_size = self.size - self.dim.1;
        let (w_raw, b_raw) = params.split_at(w_size);
        let weights = ArrayView2::from_shape(self.dim, w_raw)?;
        let biases = ArrayView1::from_shape(self.dim.1, b_raw)?;
        Ok((weights, biases))
    }

    fn check_len(&self, what: &'static str, len: usize) -> Result<()> {
        if len != self.size {
            return Err(MlErr::SizeMismatch {
                a: what,
                b: "dense layer",
                got: len,
                expected: self.size,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dense_size_counts_biases() {
        let dense = Dense::new((6, 30), None);
        assert_eq!(dense.size(), 6 * 30 + 30);
    }

    #[test]
    fn test_infer_is_an_affine_map_without_act_fn() {
        // w = [[1, 2], [3, 4]], b = [0.5, -0.5]
        let params = [1., 2., 3., 4., 0.5, -0.5];
        let dense = Dense::new((2, 2), None);
        let x = array![[1., 1.]];

        let y = dense.infer(&params, x.view()).unwrap();
        assert_eq!(y, array![[4.5, 5.5]]);
    }

    #[test]
    fn test_forward_matches_infer() {
        let params = [0.1, -0.2, 0.3, 0.4, 0.0, 0.1];
        let mut dense = Dense::new((2, 2), Some(ActFn::sigmoid(1.)));
        let x = array![[1., 0.]];

        let inferred = dense.infer(&params, x.view()).unwrap();
        let forwarded = dense.forward(&params, x.view()).unwrap();
        assert_eq!(inferred, forwarded);
    }

    #[test]
    fn test_backward_without_act_fn() {
        let params = [1., 2., 3., 4., 0., 0.];
        let mut grad = [0.; 6];
        let mut dense = Dense::new((2, 2), None);
        let x = array![[1., 2.]];

        let d = array![[1., -1.]];
        dense.forward(&params, x.view()).unwrap();
        let d_in = dense.backward(&params, &mut grad, d).unwrap();

        // dw = x^T d, db = d, d_in = d w^T
        assert_eq!(grad, [1., -1., 2., -2., 1., -1.]);
        assert_eq!(d_in, array![[-1., -1.]]);
    }

    #[test]
    fn test_short_params_are_an_error() {
        let dense = Dense::new((2, 2), None);
        let x = array![[1., 1.]];

        // shorter than the weights alone
        for params in [&[0.; 5][..], &[0.; 3][..], &[][..]] {
            assert!(matches!(
                dense.infer(params, x.view()),
                Err(MlErr::SizeMismatch { expected: 6, .. })
            ));
        }
    }

    #[test]
    fn test_short_grad_is_an_error() {
        let params = [0.; 6];
        let mut grad = [0.; 2];
        let mut dense = Dense::new((2, 2), None);
        let x = array![[1., 1.]];
        let d = array![[1., 1.]];

        dense.forward(&params, x.view()).unwrap();
        assert!(matches!(
            dense.backward(&params, &mut grad, d),
            Err(MlErr::SizeMismatch { got: 2, .. })
        ));
    }
}
