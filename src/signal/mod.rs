//! Sampled mono signals.
//!
//! A `Signal` owns its samples and carries its sample rate at the type level,
//! like the filter bank, so filters designed for one rate cannot be applied to
//! audio at another.

#[cfg(feature = "audio-loader")]
mod decode;
#[cfg(feature = "resampling")]
mod resample;
#[cfg(feature = "audio-loader")]
mod wav;

#[cfg(feature = "resampling")]
pub use resample::resample;

/// A mono signal sampled at `SAMPLE_RATE` Hz.
///
/// Signals are never mutated after construction; filtering produces new
/// signals of the same length.
///
/// # Examples
///
/// ```
/// use firbank::Signal;
///
/// let signal = Signal::<8000>::new(vec![0.0, 0.5, 1.0, 0.5]);
/// assert_eq!(signal.len(), 4);
/// assert_eq!(signal.time_axis(), vec![0.0, 0.000125, 0.00025, 0.000375]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Signal<const SAMPLE_RATE: u32> {
    samples: Vec<f64>,
}

impl<const SAMPLE_RATE: u32> Signal<SAMPLE_RATE> {
    pub fn new(samples: Vec<f64>) -> Self {
        Self { samples }
    }

    /// Creates a signal of `len` samples all equal to `value`.
    pub fn constant(value: f64, len: usize) -> Self {
        Self::new(vec![value; len])
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn sample_rate(&self) -> f64 {
        SAMPLE_RATE as f64
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        self.len() as f64 / self.sample_rate()
    }

    /// Time in seconds of every sample (`index / sample_rate`).
    pub fn time_axis(&self) -> Vec<f64> {
        let sample_rate = self.sample_rate();
        (0..self.len()).map(|i| i as f64 / sample_rate).collect()
    }

    /// Largest absolute sample value, 0.0 for an empty signal.
    pub fn peak(&self) -> f64 {
        self.samples.iter().fold(0.0_f64, |peak, s| peak.max(s.abs()))
    }

    /// Root mean square level, 0.0 for an empty signal.
    pub fn rms(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let energy: f64 = self.samples.iter().map(|s| s * s).sum();
        (energy / self.len() as f64).sqrt()
    }

    /// Peak absolute value of each of `buckets` equally long stretches of the
    /// signal, in time order. Used to draw a time-domain overview.
    ///
    /// Returns fewer than `buckets` values only when the signal is empty.
    pub fn envelope(&self, buckets: usize) -> Vec<f64> {
        if buckets == 0 || self.is_empty() {
            return Vec::new();
        }
        let len = self.len();
        (0..buckets)
            .map(|b| {
                let start = b * len / buckets;
                let end = ((b + 1) * len / buckets).clamp(start + 1, len);
                self.samples[start..end]
                    .iter()
                    .fold(0.0_f64, |peak, s| peak.max(s.abs()))
            })
            .collect()
    }

    /// Builds a signal from decoded interleaved frames: downmixes to mono by
    /// averaging the channels, then resamples to `SAMPLE_RATE`.
    #[cfg(feature = "audio-loader")]
    pub(crate) fn from_interleaved(
        samples: &[f64],
        channels: usize,
        sample_rate: u32,
    ) -> crate::Result<Self> {
        let channels = channels.max(1);
        let mono: Vec<f64> = samples
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f64>() / channels as f64)
            .collect();

        if mono.is_empty() {
            return Err(crate::FirError::EmptySignal);
        }

        let mono = if sample_rate != SAMPLE_RATE {
            log::debug!(
                "Resampling {} frames from {} Hz to {} Hz",
                mono.len(),
                sample_rate,
                SAMPLE_RATE
            );
            resample(&mono, sample_rate, SAMPLE_RATE)?
        } else {
            mono
        };

        Ok(Self::new(mono))
    }
}

impl<const SAMPLE_RATE: u32> From<Vec<f64>> for Signal<SAMPLE_RATE> {
    fn from(samples: Vec<f64>) -> Self {
        Self::new(samples)
    }
}
