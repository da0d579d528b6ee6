use log::{debug, info};
use num_complex::Complex32;

use super::{CaptureOutcome, Detection, DetectionRecord, LatchState};
use crate::config::{Config, ConfigError, DetectorConfig, Mode};
use crate::processing::noise_floor::{NoiseFloor, NoiseFloorEstimator};
use crate::processing::ring::RingAccumulator;
use crate::utils::log::Diagnostics;
use crate::utils::mjd::{MjdClock, SystemClock};

/// Streaming N-sigma event detector.
///
/// Each input vector is written sample by sample into the ring. Whenever the
/// ring wraps, the noise floor of the completed traversal becomes the
/// reference for the next one and the latch re-arms. The first sample above
/// `n_sigma` standard deviations in a traversal produces one detection and a
/// capture of the samples centred on it. Every output vector is the current
/// capture, not the input.
pub struct EventDetector {
    config: DetectorConfig,
    ring: RingAccumulator,
    estimator: NoiseFloorEstimator,
    threshold2: f64,
    latch: LatchState,
    capture: Vec<Complex32>,
    initialized: bool,
    vectors_processed: u64,
    clock: Box<dyn MjdClock>,
    diagnostics: Diagnostics,
}

impl EventDetector {
    pub fn new(config: DetectorConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, Box::new(SystemClock))
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let mut detector = Self::new(config.detector.clone())?;
        detector.diagnostics = Diagnostics::new(config.processor.verbose);
        Ok(detector)
    }

    pub fn with_clock(
        config: DetectorConfig,
        clock: Box<dyn MjdClock>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            "Detector: vector_length={} n_sigma={:.1} frequency={} MHz bandwidth={} MHz t_int={} s mode={} ring_capacity={}",
            config.vector_length,
            config.n_sigma,
            config.frequency_mhz,
            config.bandwidth_mhz,
            config.integration_time_s,
            config.mode.label(),
            config.ring_capacity,
        );
        Ok(Self {
            ring: RingAccumulator::new(config.ring_capacity, config.effective_scan_lag()),
            estimator: NoiseFloorEstimator::new(config.ring_capacity),
            threshold2: 0.0,
            latch: LatchState::Priming,
            capture: vec![Complex32::new(0.0, 0.0); config.vector_length],
            initialized: false,
            vectors_processed: 0,
            clock,
            diagnostics: Diagnostics::default(),
            config,
        })
    }

    pub fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Processes as many whole vectors as both slices hold and returns that
    /// count. Detections found along the way are appended to `detections`.
    pub fn process_vectors(
        &mut self,
        input: &[Complex32],
        output: &mut [Complex32],
        detections: &mut Vec<Detection>,
    ) -> usize {
        let vector_length = self.config.vector_length;
        let mut processed = 0;
        for (input_vector, output_vector) in input
            .chunks_exact(vector_length)
            .zip(output.chunks_exact_mut(vector_length))
        {
            for &sample in input_vector {
                if let Some(detection) = self.process_sample(sample) {
                    detections.push(detection);
                }
            }
            self.present(input_vector, output_vector);
            self.vectors_processed += 1;
            processed += 1;
        }
        processed
    }

    fn process_sample(&mut self, sample: Complex32) -> Option<Detection> {
        if let Some(sum_of_squares) = self.ring.write(sample) {
            let floor = self.estimator.close_pass(sum_of_squares);
            self.threshold2 = floor.threshold2(self.config.n_sigma);
            self.latch.rearm();
        }
        self.ring.advance_scan();

        if !self.latch.is_armed() {
            return None;
        }
        let power = self.ring.scan_power();
        if power <= self.threshold2 {
            return None;
        }
        let floor = self.estimator.current()?;

        let capture = self.extract_snapshot();
        let record = DetectionRecord {
            peak: power.sqrt(),
            rms: floor.rms,
            mjd: self.clock.now_mjd(),
        };
        self.latch.latch();
        self.diagnostics.detection(&record);

        Some(Detection {
            offset: self.vectors_processed,
            record,
            capture,
        })
    }

    /// Copies the vector-length window centred on the scanned sample into the
    /// capture buffer, provided the whole window lies within the ring's
    /// valid samples.
    fn extract_snapshot(&mut self) -> CaptureOutcome {
        let vector_length = self.capture.len();
        let half = vector_length / 2;
        let capacity = self.ring.capacity();
        let scan_lag = self.ring.scan_lag();

        // Logical index of the peak: 0 is the oldest retained sample
        let peak = capacity - 1 - scan_lag;
        let inside = peak >= half && peak - half + vector_length <= capacity;

        if inside && self.ring.copy_run(scan_lag + half, &mut self.capture) {
            self.initialized = true;
            CaptureOutcome::Captured
        } else {
            debug!(
                "Peak at logical index {} too close to ring boundary, capture kept",
                peak
            );
            CaptureOutcome::SkippedNearBoundary
        }
    }

    fn present(&mut self, input: &[Complex32], output: &mut [Complex32]) {
        if !self.initialized {
            self.capture.copy_from_slice(input);
            self.initialized = true;
            debug!("Capture bootstrapped from input vector {}", self.vectors_processed);
        }
        output.copy_from_slice(&self.capture);
    }

    // SETTERS -----------------------------------------------------------------

    pub fn set_n_sigma(&mut self, n_sigma: f32) {
        self.config.n_sigma = n_sigma;
        if let Some(floor) = self.estimator.current() {
            self.threshold2 = floor.threshold2(n_sigma);
        }
        self.diagnostics.n_sigma(n_sigma);
    }

    pub fn set_bandwidth(&mut self, bandwidth_mhz: f32) {
        self.config.bandwidth_mhz = bandwidth_mhz;
        self.diagnostics.bandwidth(bandwidth_mhz);
    }

    pub fn set_frequency(&mut self, frequency_mhz: f32) {
        self.config.frequency_mhz = frequency_mhz;
        self.diagnostics.frequency(frequency_mhz);
    }

    pub fn set_mode(&mut self, mode: impl Into<Mode>) {
        let mode = mode.into();
        self.config.mode = mode;
        self.diagnostics.mode(mode);
    }

    /// Changes the vector length. The ring and noise floor carry over; the
    /// capture is re-bootstrapped from the next input vector.
    pub fn set_vector_length(&mut self, vector_length: usize) -> Result<(), ConfigError> {
        let candidate = DetectorConfig {
            vector_length,
            ..self.config.clone()
        };
        candidate.validate()?;

        self.ring.set_scan_lag(candidate.effective_scan_lag());
        self.capture = vec![Complex32::new(0.0, 0.0); vector_length];
        self.initialized = false;
        self.config = candidate;
        self.diagnostics.vector_length(vector_length);
        Ok(())
    }

    // ACCESSORS ---------------------------------------------------------------

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn noise_floor(&self) -> Option<NoiseFloor> {
        self.estimator.current()
    }

    /// Power threshold in force, once a traversal has closed.
    pub fn threshold2(&self) -> Option<f64> {
        self.estimator.current().map(|_| self.threshold2)
    }

    pub fn latch_state(&self) -> LatchState {
        self.latch
    }

    pub fn capture(&self) -> &[Complex32] {
        &self.capture
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn vectors_processed(&self) -> u64 {
        self.vectors_processed
    }
}
