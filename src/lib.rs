pub mod config;
pub mod processing;
pub mod utils;

pub use config::{load_config, save_config, Config, ConfigError, DetectorConfig, Mode};
pub use processing::detectors::event::EventDetector;
pub use processing::detectors::{
    CaptureOutcome, Detection, DetectionRecord, LatchState, StreamTag, TagKey,
};
pub use processing::noise_floor::NoiseFloor;
