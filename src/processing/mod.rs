pub mod detectors;
pub mod noise_floor;
pub mod ring;
