//! WAV file loading and export.

use super::Signal;
use crate::Result;
use std::path::Path;

impl<const SAMPLE_RATE: u32> Signal<SAMPLE_RATE> {
    /// Loads a WAV file with `hound` as a mono signal at `SAMPLE_RATE`.
    ///
    /// # Notes
    ///
    /// - Integer PCM is scaled to the range [-1.0, 1.0]
    /// - Multi-channel files are downmixed by averaging the channels
    /// - Files recorded at another rate are resampled to `SAMPLE_RATE`
    ///
    /// # Examples
    ///
    /// ```ignore
    /// use firbank::{Signal, SAMPLE_RATE};
    ///
    /// let signal = Signal::<SAMPLE_RATE>::from_wav_file("speech.wav")?;
    /// ```
    pub fn from_wav_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = hound::WavReader::open(path)?;
        let spec = reader.spec();

        let samples: std::result::Result<Vec<f64>, _> = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .samples::<f32>()
                .map(|s| s.map(|v| v as f64))
                .collect(),
            hound::SampleFormat::Int => {
                let max_value = (1_i64 << (spec.bits_per_sample - 1)) as f64;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f64 / max_value))
                    .collect()
            }
        };
        let samples = samples?;

        log::info!(
            "Loaded {}: {} samples, {} channel(s) at {} Hz",
            path.display(),
            samples.len(),
            spec.channels,
            spec.sample_rate
        );

        Self::from_interleaved(&samples, spec.channels as usize, spec.sample_rate)
    }

    /// Writes the signal as a mono 32-bit float WAV file.
    ///
    /// Samples are written unclipped, so filtered outputs exceeding
    /// [-1.0, 1.0] survive the round trip.
    pub fn write_wav<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: SAMPLE_RATE,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };

        let mut writer = hound::WavWriter::create(path.as_ref(), spec)?;
        for &sample in self.samples() {
            writer.write_sample(sample as f32)?;
        }
        writer.finalize()?;

        log::debug!(
            "Wrote {} samples to {}",
            self.len(),
            path.as_ref().display()
        );
        Ok(())
    }
}
