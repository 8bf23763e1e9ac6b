//! Error type shared by filter design, filtering and loading.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FirError {
    /// A design parameter violates the Nyquist, ordering or parity constraints.
    #[error("Invalid filter specification: {0}")]
    InvalidSpec(String),

    #[error("Signal contains no samples")]
    EmptySignal,

    #[error("Unknown filter: {0}")]
    UnknownFilter(String),

    #[cfg(feature = "resampling")]
    #[error("Resampling error: {0}")]
    Resample(String),

    #[cfg(feature = "audio-loader")]
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file could not be probed or decoded as audio.
    #[cfg(feature = "audio-loader")]
    #[error("Decode error: {0}")]
    Decode(String),

    #[cfg(feature = "audio-loader")]
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),
}

pub type Result<T> = std::result::Result<T, FirError>;
