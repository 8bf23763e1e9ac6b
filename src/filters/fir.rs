//! Windowed-sinc FIR coefficient design.
//!
//! The ideal (infinite) impulse response of a passband is the difference of
//! two low-pass sinc responses centred on the middle tap. It is truncated to
//! the filter length, tapered with a window and finally scaled so the gain at
//! the passband's reference frequency is exactly one.

use super::spec::{FilterSpec, Passband};
use crate::{FirError, Result, Window};
use std::f64::consts::PI;

/// Normalized sinc: `sin(πx) / (πx)`, 1 at the origin.
fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        let px = PI * x;
        px.sin() / px
    }
}

/// Ideal low-pass impulse response at offset `m` from the centre tap, for a
/// cutoff `f` normalized to Nyquist.
///
/// A cutoff at Nyquist passes everything, so on integer offsets it is the
/// identity impulse exactly (spectral inversion for high-pass designs).
fn ideal_lowpass(f: f64, m: f64) -> f64 {
    if f == 0.0 {
        0.0
    } else if f == 1.0 && m.fract() == 0.0 {
        if m == 0.0 { 1.0 } else { 0.0 }
    } else {
        f * sinc(f * m)
    }
}

/// The taps of one designed FIR filter.
///
/// Always holds at least one tap, and the taps are symmetric around the
/// centre (linear phase).
#[derive(Debug, Clone, PartialEq)]
pub struct FirCoefficients {
    taps: Vec<f64>,
}

impl FirCoefficients {
    /// Designs the filter described by `spec` with `order + 1` taps.
    pub fn design(spec: &FilterSpec, order: usize, sample_rate: f64) -> Result<Self> {
        let passband = spec.band.passband(sample_rate)?;
        Self::firwin(order + 1, passband, spec.window)
    }

    /// Windowed-sinc design over a normalized passband.
    ///
    /// # Arguments
    ///
    /// * `numtaps` - Filter length, at least 1
    /// * `passband` - Band edges normalized to Nyquist (1.0)
    /// * `window` - Tapering window
    ///
    /// # Examples
    ///
    /// ```
    /// use firbank::{FirCoefficients, Window, filters::Passband};
    ///
    /// let lowpass = Passband { left: 0.0, right: 0.25 };
    /// let fir = FirCoefficients::firwin(101, lowpass, Window::Hamming).unwrap();
    /// assert_eq!(fir.len(), 101);
    /// assert!((fir.taps().iter().sum::<f64>() - 1.0).abs() < 1e-12);
    /// ```
    pub fn firwin(numtaps: usize, passband: Passband, window: Window) -> Result<Self> {
        if numtaps == 0 {
            return Err(FirError::InvalidSpec(
                "filter must have at least one tap".to_string(),
            ));
        }
        let Passband { left, right } = passband;
        if !(0.0..1.0).contains(&left) || !(right > left && right <= 1.0) {
            return Err(FirError::InvalidSpec(format!(
                "normalized passband [{}, {}] must satisfy 0 <= left < right <= 1",
                left, right
            )));
        }
        // An even-length filter has a forced zero at Nyquist
        if right == 1.0 && numtaps % 2 == 0 {
            return Err(FirError::InvalidSpec(format!(
                "a filter passing Nyquist needs an odd number of taps, got {}",
                numtaps
            )));
        }

        let alpha = (numtaps - 1) as f64 / 2.0;
        let mut taps = vec![0.0; numtaps];

        // Compute the first half and mirror it so the taps are exactly symmetric
        for n in 0..numtaps.div_ceil(2) {
            let m = n as f64 - alpha;
            let ideal = ideal_lowpass(right, m) - ideal_lowpass(left, m);
            let tap = ideal * window.value(n, numtaps);
            taps[n] = tap;
            taps[numtaps - 1 - n] = tap;
        }

        let reference = passband.reference_frequency();
        let gain: f64 = taps
            .iter()
            .enumerate()
            .map(|(n, h)| h * (PI * (n as f64 - alpha) * reference).cos())
            .sum();
        if !gain.is_finite() || gain == 0.0 {
            return Err(FirError::InvalidSpec(format!(
                "filter has no gain at its reference frequency {}",
                reference
            )));
        }

        for tap in &mut taps {
            *tap /= gain;
        }

        Ok(Self { taps })
    }

    pub fn taps(&self) -> &[f64] {
        &self.taps
    }

    /// Number of taps (order + 1).
    pub fn len(&self) -> usize {
        self.taps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    /// Filter order, one less than the number of taps.
    pub fn order(&self) -> usize {
        self.taps.len() - 1
    }

    /// Magnitude of the frequency response at `frequency`, normalized to
    /// Nyquist (0.0 is DC, 1.0 is Nyquist).
    pub fn frequency_response(&self, frequency: f64) -> f64 {
        let omega = PI * frequency;
        let (re, im) = self
            .taps
            .iter()
            .enumerate()
            .fold((0.0, 0.0), |(re, im), (n, h)| {
                let phase = omega * n as f64;
                (re + h * phase.cos(), im - h * phase.sin())
            });
        re.hypot(im)
    }
}
