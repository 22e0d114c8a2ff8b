use serde::{Deserialize, Serialize};

/// The logistic function scaled by an amplitude, its image is `(0, amp)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Sigmoid {
    amp: f32,
}

impl Sigmoid {
    pub fn new(amp: f32) -> Self {
        Self { amp }
    }

    pub fn amp(&self) -> f32 {
        self.amp
    }

    pub fn f(&self, z: f32) -> f32 {
        self.amp / (1. + (-z).exp())
    }

    pub fn df(&self, z: f32) -> f32 {
        // s * (1 - s) stays finite where e^-z overflows
        let s = 1. / (1. + (-z).exp());
        self.amp * s * (1. - s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigmoid_is_centered_on_half_amplitude() {
        let sigmoid = Sigmoid::new(2.);
        assert_eq!(sigmoid.f(0.), 1.);
        assert_eq!(sigmoid.df(0.), 0.5);
    }

    #[test]
    fn test_sigmoid_prime_is_finite_on_large_inputs() {
        let sigmoid = Sigmoid::new(1.);
        assert!(sigmoid.df(-200.).is_finite());
        assert!(sigmoid.df(200.).is_finite());
        assert!(sigmoid.f(-200.) >= 0.);
    }
}
