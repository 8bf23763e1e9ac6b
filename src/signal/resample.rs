//! Sample rate conversion for loaded audio and playback.

use crate::{FirError, Result};
use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};

/// Number of input frames handed to the resampler per call.
const CHUNK_SIZE: usize = 1024;

/// Band-limited sinc interpolation settings.
///
/// The cutoff sits at 95% of the lower Nyquist frequency of the two rates, so
/// the same filter removes aliases when downsampling and images when
/// upsampling.
fn sinc_parameters() -> SincInterpolationParameters {
    SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Cubic,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    }
}

/// Converts `samples` from `from_rate` to `to_rate` Hz.
///
/// Uses `rubato`'s sinc resampler. The resampler's delay is removed, so the
/// output is time-aligned with the input and has
/// `round(len * to_rate / from_rate)` samples.
///
/// # Examples
///
/// ```
/// use firbank::signal::resample;
///
/// let input = vec![0.0; 44100];
/// let output = resample(&input, 44100, 8000).unwrap();
/// assert_eq!(output.len(), 8000);
/// ```
pub fn resample(samples: &[f64], from_rate: u32, to_rate: u32) -> Result<Vec<f64>> {
    if from_rate == 0 || to_rate == 0 {
        return Err(FirError::Resample(format!(
            "cannot resample from {} Hz to {} Hz",
            from_rate, to_rate
        )));
    }
    if from_rate == to_rate || samples.is_empty() {
        return Ok(samples.to_vec());
    }

    let ratio = to_rate as f64 / from_rate as f64;
    let mut resampler = SincFixedIn::<f64>::new(ratio, 1.0, sinc_parameters(), CHUNK_SIZE, 1)
        .map_err(|e| FirError::Resample(e.to_string()))?;

    let delay = resampler.output_delay();
    let expected = (samples.len() as f64 * ratio).round() as usize;
    let mut output = Vec::with_capacity(delay + expected + CHUNK_SIZE);

    let mut position = 0;
    while position < samples.len() {
        let needed = resampler.input_frames_next();
        let end = (position + needed).min(samples.len());
        let chunk = [&samples[position..end]];

        let frames = if end - position == needed {
            resampler.process(&chunk[..], None)
        } else {
            resampler.process_partial(Some(&chunk[..]), None)
        }
        .map_err(|e| FirError::Resample(e.to_string()))?;

        output.extend_from_slice(&frames[0]);
        position = end;
    }

    // Flush the samples still held back by the filter delay
    while output.len() < delay + expected {
        let frames = resampler
            .process_partial(None::<&[Vec<f64>]>, None)
            .map_err(|e| FirError::Resample(e.to_string()))?;
        output.extend_from_slice(&frames[0]);
    }

    output.drain(..delay);
    output.truncate(expected);
    Ok(output)
}
