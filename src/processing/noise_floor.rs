// NOISE FLOOR COMPONENT --------------------------------------------------------

/// Noise statistics of one completed ring traversal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseFloor {
    /// Mean power over the traversal.
    pub rms2: f64,
    pub rms: f64,
}

impl NoiseFloor {
    pub fn from_sum_of_squares(sum_of_squares: f64, samples: usize) -> Self {
        let rms2 = sum_of_squares / samples as f64;
        Self {
            rms2,
            rms: rms2.sqrt(),
        }
    }

    /// Power threshold for an amplitude of `n_sigma` standard deviations.
    pub fn threshold2(&self, n_sigma: f32) -> f64 {
        let n_sigma = n_sigma as f64;
        n_sigma * n_sigma * self.rms2
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EstimatorPhase {
    /// No traversal has completed yet.
    Accumulating,
    /// Statistics of the most recent completed traversal.
    Closed(NoiseFloor),
}

/// Block-wise estimator: statistics change only when a traversal closes and
/// then hold for the whole following traversal.
pub struct NoiseFloorEstimator {
    samples_per_pass: usize,
    phase: EstimatorPhase,
    passes: u64,
}

impl NoiseFloorEstimator {
    pub fn new(samples_per_pass: usize) -> Self {
        Self {
            samples_per_pass,
            phase: EstimatorPhase::Accumulating,
            passes: 0,
        }
    }

    pub fn close_pass(&mut self, sum_of_squares: f64) -> NoiseFloor {
        let floor = NoiseFloor::from_sum_of_squares(sum_of_squares, self.samples_per_pass);
        self.phase = EstimatorPhase::Closed(floor);
        self.passes += 1;
        floor
    }

    pub fn phase(&self) -> EstimatorPhase {
        self.phase
    }

    pub fn current(&self) -> Option<NoiseFloor> {
        match self.phase {
            EstimatorPhase::Accumulating => None,
            EstimatorPhase::Closed(floor) => Some(floor),
        }
    }

    pub fn passes(&self) -> u64 {
        self.passes
    }
}
