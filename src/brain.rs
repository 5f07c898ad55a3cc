//! Two-layer perceptron controlling each agent.

use anyhow::{Result, bail};
use ndarray::{Array1, Array2};
use rand::prelude::*;
use rand_distr::Uniform;

/// An agent brain: two weight matrices, no biases.
///
/// The forward pass is a pure function; identical weights and input
/// always yield an identical output.
#[derive(Debug, Clone)]
pub struct Brain {
    /// Hidden layer weights (`hidden x input`).
    w1: Array2<f64>,
    /// Output layer weights (`output x hidden`).
    w2: Array2<f64>,
}

impl Brain {
    /// Create a brain with weights drawn uniformly from `[-0.5, 0.5)`.
    pub fn seeded<R: Rng>(
        inputs: usize,
        hidden: usize,
        outputs: usize,
        rng: &mut R,
    ) -> Result<Self> {
        let weight_dist = Uniform::new(-0.5, 0.5)?;

        let w1 = Array2::from_shape_fn((hidden, inputs), |_| weight_dist.sample(rng));
        let w2 = Array2::from_shape_fn((outputs, hidden), |_| weight_dist.sample(rng));

        Self::from_weights(w1, w2)
    }

    /// Assemble a brain from explicit weight matrices.
    ///
    /// # Errors
    /// Returns an error if the inner dimensions do not line up or a layer is empty.
    pub fn from_weights(w1: Array2<f64>, w2: Array2<f64>) -> Result<Self> {
        if w1.nrows() == 0 || w1.ncols() == 0 || w2.nrows() == 0 {
            bail!("weight matrices must be non-empty");
        }
        if w2.ncols() != w1.nrows() {
            bail!(
                "output layer expects {} hidden units, but the hidden layer has {}",
                w2.ncols(),
                w1.nrows()
            );
        }

        Ok(Self { w1, w2 })
    }

    /// Map a sensor vector to an action vector.
    ///
    /// The input length must equal the hidden layer's column count; a mismatch
    /// is a contract violation and panics.
    pub fn think(&self, input: &Array1<f64>) -> Array1<f64> {
        let hidden = self.w1.dot(input).mapv(sigmoid);
        self.w2.dot(&hidden).mapv(sigmoid)
    }

    /// Number of sensor inputs this brain expects.
    pub fn inputs(&self) -> usize {
        self.w1.ncols()
    }

    pub fn w1(&self) -> &Array2<f64> {
        &self.w1
    }

    pub fn w2(&self) -> &Array2<f64> {
        &self.w2
    }
}

fn sigmoid(val: f64) -> f64 {
    1.0 / (1.0 + (-val).exp())
}
