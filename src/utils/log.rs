use colored::Colorize;
use log::info;

use crate::config::Mode;
use crate::processing::detectors::DetectionRecord;

/// Console reporting for a detector.
///
/// Every line goes to the `log` facade; with `verbose` set it is also
/// printed to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct Diagnostics {
    pub verbose: bool,
}

impl Diagnostics {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn detection(&self, record: &DetectionRecord) {
        let line = detection_line(record);
        info!("{}", line);
        if self.verbose {
            println!("{}", line.red());
        }
    }

    pub fn n_sigma(&self, n_sigma: f32) {
        self.setting(format!("Input N Sigma: {:7.1}", n_sigma));
    }

    pub fn bandwidth(&self, bandwidth_mhz: f32) {
        self.setting(format!("Input Bandwidth: {:7.1} (MHz)", bandwidth_mhz));
    }

    pub fn frequency(&self, frequency_mhz: f32) {
        self.setting(format!("Input Frequency: {:7.1} (MHz)", frequency_mhz));
    }

    pub fn mode(&self, mode: Mode) {
        self.setting(format!("Input Mode: {}", mode.label()));
    }

    pub fn vector_length(&self, vector_length: usize) {
        self.setting(format!("Input Vector Length: {}", vector_length));
    }

    fn setting(&self, line: String) {
        info!("{}", line);
        if self.verbose {
            println!("{}", line.cyan());
        }
    }
}

pub fn detection_line(record: &DetectionRecord) -> String {
    format!(
        "Event MJD: {:15.6}; Peak={:8.4}+/-{:6.4}",
        record.mjd, record.peak, record.rms
    )
}
