//! Seeded synthetic sample streams for driving a detector without hardware.

use num_complex::Complex32;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoiseKind {
    /// Constant magnitude, uniformly random phase.
    Phasor,
    /// Circular complex Gaussian.
    Gaussian,
}

pub struct NoiseSource {
    rng: StdRng,
    kind: NoiseKind,
    amplitude: f32,
}

impl NoiseSource {
    /// `amplitude` is the RMS amplitude of the generated samples, so the mean
    /// power is `amplitude²`.
    pub fn new(kind: NoiseKind, amplitude: f32, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            kind,
            amplitude,
        }
    }

    pub fn next_sample(&mut self) -> Complex32 {
        match self.kind {
            NoiseKind::Phasor => {
                let phase = self.rng.gen_range(0.0..std::f32::consts::TAU);
                Complex32::from_polar(self.amplitude, phase)
            }
            NoiseKind::Gaussian => {
                // Box-Muller, each component with variance amplitude² / 2
                let u1: f32 = self.rng.gen_range(f32::MIN_POSITIVE..1.0);
                let u2: f32 = self.rng.gen();
                let radius = self.amplitude * (-u1.ln()).sqrt();
                Complex32::from_polar(radius, std::f32::consts::TAU * u2)
            }
        }
    }

    pub fn fill(&mut self, out: &mut [Complex32]) {
        for sample in out.iter_mut() {
            *sample = self.next_sample();
        }
    }

    pub fn vector(&mut self, len: usize) -> Vec<Complex32> {
        let mut out = vec![Complex32::new(0.0, 0.0); len];
        self.fill(&mut out);
        out
    }
}

/// Overwrites one sample with a real-valued spike of the given magnitude.
pub fn inject_spike(samples: &mut [Complex32], index: usize, magnitude: f32) {
    if let Some(sample) = samples.get_mut(index) {
        *sample = Complex32::new(magnitude, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::ring::sample_power;

    #[test]
    fn test_phasor_has_constant_power() {
        let mut source = NoiseSource::new(NoiseKind::Phasor, 2.0, 7);
        for _ in 0..256 {
            assert!((sample_power(source.next_sample()) - 4.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_gaussian_mean_power() {
        let mut source = NoiseSource::new(NoiseKind::Gaussian, 1.0, 11);
        let samples = source.vector(20000);
        let mean = samples.iter().map(|&s| sample_power(s)).sum::<f64>() / samples.len() as f64;
        assert!((mean - 1.0).abs() < 0.05, "mean power {}", mean);
    }

    #[test]
    fn test_same_seed_same_stream() {
        let a = NoiseSource::new(NoiseKind::Gaussian, 1.0, 3).vector(32);
        let b = NoiseSource::new(NoiseKind::Gaussian, 1.0, 3).vector(32);
        assert_eq!(a, b);
    }

    #[test]
    fn test_inject_spike() {
        let mut samples = vec![Complex32::new(0.0, 0.0); 4];
        inject_spike(&mut samples, 2, 50.0);
        inject_spike(&mut samples, 9, 50.0);
        assert_eq!(samples[2], Complex32::new(50.0, 0.0));
        assert_eq!(samples.iter().filter(|s| s.re != 0.0).count(), 1);
    }
}
