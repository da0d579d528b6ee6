use num_complex::Complex32;

/// Instantaneous power of one sample, accumulated in double precision.
#[inline]
pub fn sample_power(sample: Complex32) -> f64 {
    let re = sample.re as f64;
    let im = sample.im as f64;
    re * re + im * im
}

// RING ACCUMULATOR COMPONENT ---------------------------------------------------

/// Two parallel circular buffers (samples and their power) with a write
/// cursor, a trailing scan cursor and the running sum of squares for the
/// pass currently being written.
///
/// Positions are addressed either physically (the slot index) or by age,
/// where age 0 is the most recently written sample. All wrap arithmetic
/// lives here.
pub struct RingAccumulator {
    samples: Vec<Complex32>,
    power: Vec<f64>,
    capacity: usize,
    write: usize,
    scan: usize,
    scan_lag: usize,
    sum_of_squares: f64,
}

impl RingAccumulator {
    /// `scan_lag` must be less than `capacity`; callers validate this through
    /// `DetectorConfig::validate`.
    pub fn new(capacity: usize, scan_lag: usize) -> Self {
        debug_assert!(scan_lag < capacity);
        let mut ring = Self {
            samples: vec![Complex32::new(0.0, 0.0); capacity],
            power: vec![0.0; capacity],
            capacity,
            write: 0,
            scan: 0,
            scan_lag,
            sum_of_squares: 0.0,
        };
        ring.scan = ring.position_of_age(scan_lag);
        ring
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn scan_lag(&self) -> usize {
        self.scan_lag
    }

    pub fn write_position(&self) -> usize {
        self.write
    }

    pub fn scan_position(&self) -> usize {
        self.scan
    }

    /// Sum of squares accumulated since the last wrap.
    pub fn sum_of_squares(&self) -> f64 {
        self.sum_of_squares
    }

    /// Stores one sample and its power at the write cursor and advances it.
    ///
    /// When the cursor wraps, the pass is closed: the accumulated sum of
    /// squares for exactly `capacity` samples is returned and the running sum
    /// restarts at zero.
    pub fn write(&mut self, sample: Complex32) -> Option<f64> {
        let power = sample_power(sample);
        self.samples[self.write] = sample;
        self.power[self.write] = power;
        self.sum_of_squares += power;

        self.write += 1;
        if self.write >= self.capacity {
            self.write = 0;
            let closed = self.sum_of_squares;
            self.sum_of_squares = 0.0;
            return Some(closed);
        }
        None
    }

    /// Moves the scan cursor forward one slot, independently of the write
    /// cursor's wrap.
    pub fn advance_scan(&mut self) {
        self.scan += 1;
        if self.scan >= self.capacity {
            self.scan = 0;
        }
    }

    pub fn scan_power(&self) -> f64 {
        self.power[self.scan]
    }

    pub fn scan_sample(&self) -> Complex32 {
        self.samples[self.scan]
    }

    /// Re-points the scan cursor at `scan_lag` samples behind the newest one.
    pub fn set_scan_lag(&mut self, scan_lag: usize) {
        debug_assert!(scan_lag < self.capacity);
        self.scan_lag = scan_lag;
        self.scan = self.position_of_age(scan_lag);
    }

    /// Sample written `age` samples ago, `None` once it has been overwritten.
    pub fn peek_at(&self, age: usize) -> Option<Complex32> {
        (age < self.capacity).then(|| self.samples[self.position_of_age(age)])
    }

    pub fn power_at(&self, age: usize) -> Option<f64> {
        (age < self.capacity).then(|| self.power[self.position_of_age(age)])
    }

    /// Copies `out.len()` consecutive samples, oldest first, starting at the
    /// sample of age `oldest_age`. Returns false and leaves `out` untouched
    /// when the run would reach past the oldest retained or newest written
    /// sample.
    pub fn copy_run(&self, oldest_age: usize, out: &mut [Complex32]) -> bool {
        let len = out.len();
        if oldest_age >= self.capacity || oldest_age + 1 < len {
            return false;
        }
        let start = self.position_of_age(oldest_age);
        let first = len.min(self.capacity - start);
        out[..first].copy_from_slice(&self.samples[start..start + first]);
        out[first..].copy_from_slice(&self.samples[..len - first]);
        true
    }

    fn position_of_age(&self, age: usize) -> usize {
        (self.write + 2 * self.capacity - 1 - age) % self.capacity
    }
}
