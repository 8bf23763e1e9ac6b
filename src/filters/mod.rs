//! FIR filter design.
//!
//! This module provides:
//! - `FilterId`, `BandType` and `Band` describing the six filters of the bank
//! - `DesignParams` holding the fixed design constants
//! - `FirCoefficients` for windowed-sinc coefficient design
//! - `FilterBank` computing all six coefficient sets at once

mod bank;
mod fir;
mod spec;

pub use bank::FilterBank;
pub use fir::FirCoefficients;
pub use spec::{Band, BandType, DesignParams, FilterId, FilterSpec, Passband};
