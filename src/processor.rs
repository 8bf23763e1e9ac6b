//! Offline FIR filtering of whole signals.

use crate::{FilterBank, FilterId, FirError, Result, Signal};

/// Applies FIR `taps` to `samples` by causal direct-form convolution.
///
/// `y[i] = Σ h[k]·x[i-k]` for `k` in `0..=min(i, M-1)`, with the input taken
/// as zero before its first sample. The output has the input's length and is
/// never clipped or normalized.
///
/// # Examples
///
/// ```
/// use firbank::lfilter;
///
/// let y = lfilter(&[0.5, 0.5], &[1.0, 1.0, 0.0]);
/// assert_eq!(y, vec![0.5, 1.0, 0.5]);
/// ```
pub fn lfilter(taps: &[f64], samples: &[f64]) -> Vec<f64> {
    (0..samples.len())
        .map(|i| {
            taps.iter()
                .take(i + 1)
                .enumerate()
                .map(|(k, h)| h * samples[i - k])
                .sum::<f64>()
        })
        .collect()
}

/// The six filtered versions of one signal.
///
/// Always holds every `FilterId`; iteration follows the canonical order.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredResult<const SAMPLE_RATE: u32> {
    // Indexed by canonical `FilterId` order
    outputs: Vec<Signal<SAMPLE_RATE>>,
}

impl<const SAMPLE_RATE: u32> FilteredResult<SAMPLE_RATE> {
    pub fn get(&self, id: FilterId) -> &Signal<SAMPLE_RATE> {
        &self.outputs[id as usize]
    }

    /// Looks up a filtered signal by its canonical name, e.g. `Band_Blackman`.
    pub fn by_name(&self, name: &str) -> Result<&Signal<SAMPLE_RATE>> {
        let id: FilterId = name.parse()?;
        Ok(self.get(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilterId, &Signal<SAMPLE_RATE>)> {
        FilterId::ALL.into_iter().zip(self.outputs.iter())
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

/// Runs every filter of a bank over a signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalProcessor;

impl SignalProcessor {
    /// Filters `signal` with each filter of `bank`.
    ///
    /// Fails with `EmptySignal` before doing any work if the signal has no
    /// samples. The same inputs always give bit-identical outputs.
    ///
    /// # Examples
    ///
    /// ```
    /// use firbank::{FilterBank, FilterId, Signal, SignalProcessor, SAMPLE_RATE};
    ///
    /// let bank = FilterBank::<SAMPLE_RATE>::design().unwrap();
    /// let signal = Signal::<SAMPLE_RATE>::constant(1.0, 1000);
    /// let result = SignalProcessor::apply(&signal, &bank).unwrap();
    ///
    /// let low = result.get(FilterId::LowHamming);
    /// assert_eq!(low.len(), 1000);
    /// assert!((low.samples()[600] - 1.0).abs() < 1e-3);
    /// ```
    pub fn apply<const SAMPLE_RATE: u32>(
        signal: &Signal<SAMPLE_RATE>,
        bank: &FilterBank<SAMPLE_RATE>,
    ) -> Result<FilteredResult<SAMPLE_RATE>> {
        if signal.is_empty() {
            return Err(FirError::EmptySignal);
        }

        let outputs = bank
            .iter()
            .map(|(_, fir)| Signal::new(lfilter(fir.taps(), signal.samples())))
            .collect();

        Ok(FilteredResult { outputs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SAMPLE_RATE;

    #[test]
    fn test_lfilter_impulse_returns_taps() {
        let taps = [0.1, 0.2, 0.3];
        let y = lfilter(&taps, &[1.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(y, vec![0.1, 0.2, 0.3, 0.0, 0.0]);
    }

    #[test]
    fn test_lfilter_truncates_to_input_length() {
        // Signal shorter than the filter: only the causal head is produced
        let y = lfilter(&[1.0, 1.0, 1.0, 1.0], &[1.0, 2.0]);
        assert_eq!(y, vec![1.0, 3.0]);
    }

    #[test]
    fn test_lfilter_zero_padding_not_circular() {
        let y = lfilter(&[0.0, 1.0], &[5.0, 6.0, 7.0]);
        // A one-sample delay; the last input must not wrap around
        assert_eq!(y, vec![0.0, 5.0, 6.0]);
    }

    #[test]
    fn test_apply_empty_signal() {
        let bank = FilterBank::<SAMPLE_RATE>::design().unwrap();
        let signal = Signal::<SAMPLE_RATE>::new(Vec::new());
        let result = SignalProcessor::apply(&signal, &bank);
        assert!(matches!(result, Err(FirError::EmptySignal)));
    }

    #[test]
    fn test_apply_output_per_filter() {
        let bank = FilterBank::<SAMPLE_RATE>::design().unwrap();
        let signal = Signal::<SAMPLE_RATE>::new(vec![1.0, 0.0, 0.0]);
        let result = SignalProcessor::apply(&signal, &bank).unwrap();

        assert_eq!(result.len(), 6);
        for (id, output) in result.iter() {
            assert_eq!(output.len(), 3);
            // An impulse reproduces the first taps of the filter
            assert_eq!(output.samples(), &bank.coefficients(id).taps()[..3]);
        }
    }

    #[test]
    fn test_by_name() {
        let bank = FilterBank::<SAMPLE_RATE>::design().unwrap();
        let signal = Signal::<SAMPLE_RATE>::constant(0.5, 16);
        let result = SignalProcessor::apply(&signal, &bank).unwrap();

        let by_name = result.by_name("High_Blackman").unwrap();
        assert_eq!(by_name, result.get(FilterId::HighBlackman));

        let err = result.by_name("Original Signal").unwrap_err();
        assert!(matches!(err, FirError::UnknownFilter(_)));
    }
}
