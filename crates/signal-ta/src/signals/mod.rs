//! Discrete trading signals derived from indicator output.
//!
//! - [`crossover`]: MACD line / signal line crossings as Buy and Sell events

pub mod crossover;

pub use crossover::{detect_crossovers, CrossoverDetector, SignalEvent, SignalKind};
