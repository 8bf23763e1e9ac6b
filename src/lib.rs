//! Firbank - windowed-sinc FIR filter bank design and offline filtering
//!
//! This library designs a fixed bank of six linear-phase FIR filters
//! (low-pass, band-pass and high-pass, each with a Hamming and a Blackman
//! window) and applies them to a mono audio signal by direct-form convolution.

pub mod error;
pub mod filters;
pub mod processor;
pub mod session;
pub mod signal;
pub mod windows;

/// Sample rate in Hz that the default filter bank is designed for.
pub const SAMPLE_RATE: u32 = 8000;

// Re-export commonly used types at the crate root
pub use error::{FirError, Result};
pub use filters::{Band, BandType, DesignParams, FilterBank, FilterId, FilterSpec, FirCoefficients};
pub use processor::{FilteredResult, SignalProcessor, lfilter};
pub use session::{ORIGINAL_SIGNAL, Session, SignalSelection, SignalSummary};
pub use signal::Signal;
pub use windows::Window;
