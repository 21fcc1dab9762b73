//! Data models

pub mod predict;
pub mod log_record;

pub use predict::*;
pub use log_record::*;
