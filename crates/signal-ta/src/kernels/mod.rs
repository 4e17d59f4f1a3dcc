//! Streaming kernels shared by the indicators.
//!
//! - [`rolling_mean`]: fixed-window running average with an explicit warm-up
//!   and exact zeros for windows that contain only zeros

pub mod rolling_mean;

pub use rolling_mean::RollingMean;
