//! Streaming fitness statistics for round summaries.

/// Welford accumulator for a stream of values.
pub struct Accumulator {
    n_vals: usize,
    mean: f64,
    diff_2_sum: f64,
    max: f64,
}

impl Accumulator {
    pub fn new() -> Self {
        Self {
            n_vals: 0,
            mean: 0.0,
            diff_2_sum: 0.0,
            max: f64::NEG_INFINITY,
        }
    }

    pub fn add(&mut self, val: f64) {
        self.n_vals += 1;

        let diff_a = val - self.mean;
        self.mean += diff_a / self.n_vals as f64;

        let diff_b = val - self.mean;
        self.diff_2_sum += diff_a * diff_b;

        self.max = self.max.max(val);
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std_dev(&self) -> f64 {
        if self.n_vals > 1 {
            (self.diff_2_sum / (self.n_vals as f64 - 1.0)).sqrt()
        } else {
            f64::NAN
        }
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::new()
    }
}
