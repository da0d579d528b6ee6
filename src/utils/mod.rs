pub mod log;
pub mod mjd;
pub mod synthetic;
