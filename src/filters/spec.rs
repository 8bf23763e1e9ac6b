//! Filter identities and design parameters.

use crate::{FirError, Result, Window};
use std::fmt;
use std::str::FromStr;

/// The frequency band a filter passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BandType {
    /// Low-pass filter - passes frequencies below the cutoff
    Lowpass,
    /// Band-pass filter - passes frequencies between two cutoffs
    Bandpass,
    /// High-pass filter - passes frequencies above the cutoff
    Highpass,
}

impl BandType {
    /// All band types used by the filter bank, in canonical order.
    pub const ALL: [BandType; 3] = [BandType::Lowpass, BandType::Bandpass, BandType::Highpass];

    /// Short name used in filter identifiers.
    pub const fn name(self) -> &'static str {
        match self {
            BandType::Lowpass => "Low",
            BandType::Bandpass => "Band",
            BandType::Highpass => "High",
        }
    }
}

/// One of the six filters in the bank.
///
/// Declaration order is the canonical order in which filters are designed,
/// applied and listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterId {
    LowHamming,
    BandHamming,
    HighHamming,
    LowBlackman,
    BandBlackman,
    HighBlackman,
}

impl FilterId {
    /// Every filter identity, in canonical order.
    pub const ALL: [FilterId; 6] = [
        FilterId::LowHamming,
        FilterId::BandHamming,
        FilterId::HighHamming,
        FilterId::LowBlackman,
        FilterId::BandBlackman,
        FilterId::HighBlackman,
    ];

    /// Combines a band type and a window into a filter identity.
    pub const fn new(band_type: BandType, window: Window) -> Self {
        match (band_type, window) {
            (BandType::Lowpass, Window::Hamming) => FilterId::LowHamming,
            (BandType::Bandpass, Window::Hamming) => FilterId::BandHamming,
            (BandType::Highpass, Window::Hamming) => FilterId::HighHamming,
            (BandType::Lowpass, Window::Blackman) => FilterId::LowBlackman,
            (BandType::Bandpass, Window::Blackman) => FilterId::BandBlackman,
            (BandType::Highpass, Window::Blackman) => FilterId::HighBlackman,
        }
    }

    pub const fn band_type(self) -> BandType {
        match self {
            FilterId::LowHamming | FilterId::LowBlackman => BandType::Lowpass,
            FilterId::BandHamming | FilterId::BandBlackman => BandType::Bandpass,
            FilterId::HighHamming | FilterId::HighBlackman => BandType::Highpass,
        }
    }

    pub const fn window(self) -> Window {
        match self {
            FilterId::LowHamming | FilterId::BandHamming | FilterId::HighHamming => {
                Window::Hamming
            }
            FilterId::LowBlackman | FilterId::BandBlackman | FilterId::HighBlackman => {
                Window::Blackman
            }
        }
    }

    /// Canonical name, e.g. `Low_Hamming`.
    pub const fn name(self) -> &'static str {
        match self {
            FilterId::LowHamming => "Low_Hamming",
            FilterId::BandHamming => "Band_Hamming",
            FilterId::HighHamming => "High_Hamming",
            FilterId::LowBlackman => "Low_Blackman",
            FilterId::BandBlackman => "Band_Blackman",
            FilterId::HighBlackman => "High_Blackman",
        }
    }
}

impl fmt::Display for FilterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterId {
    type Err = FirError;

    fn from_str(s: &str) -> Result<Self> {
        FilterId::ALL
            .into_iter()
            .find(|id| id.name() == s)
            .ok_or_else(|| FirError::UnknownFilter(s.to_string()))
    }
}

/// A band type together with its cutoff frequencies in Hz.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Band {
    Lowpass { cutoff: f64 },
    Bandpass { low: f64, high: f64 },
    Highpass { cutoff: f64 },
}

impl Band {
    pub const fn band_type(&self) -> BandType {
        match self {
            Band::Lowpass { .. } => BandType::Lowpass,
            Band::Bandpass { .. } => BandType::Bandpass,
            Band::Highpass { .. } => BandType::Highpass,
        }
    }

    /// Converts the cutoffs into a passband normalized by the Nyquist frequency.
    ///
    /// Every cutoff must lie strictly between 0 Hz and Nyquist, and band-pass
    /// cutoffs must be strictly increasing.
    pub fn passband(&self, sample_rate: f64) -> Result<Passband> {
        let nyquist = sample_rate / 2.0;
        let normalize = |hz: f64| -> Result<f64> {
            if hz.is_finite() && hz > 0.0 && hz < nyquist {
                Ok(hz / nyquist)
            } else {
                Err(FirError::InvalidSpec(format!(
                    "cutoff {} Hz must lie strictly between 0 Hz and the Nyquist frequency {} Hz",
                    hz, nyquist
                )))
            }
        };

        match *self {
            Band::Lowpass { cutoff } => Ok(Passband {
                left: 0.0,
                right: normalize(cutoff)?,
            }),
            Band::Bandpass { low, high } => {
                let left = normalize(low)?;
                let right = normalize(high)?;
                if left >= right {
                    return Err(FirError::InvalidSpec(format!(
                        "band-pass cutoffs must be strictly increasing, got [{}, {}] Hz",
                        low, high
                    )));
                }
                Ok(Passband { left, right })
            }
            Band::Highpass { cutoff } => Ok(Passband {
                left: normalize(cutoff)?,
                right: 1.0,
            }),
        }
    }
}

/// A single passband with edges normalized to the Nyquist frequency (1.0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Passband {
    pub left: f64,
    pub right: f64,
}

impl Passband {
    /// Frequency at which the designed filter is scaled to unity gain:
    /// DC for low-pass, Nyquist for high-pass, band centre otherwise.
    pub fn reference_frequency(&self) -> f64 {
        if self.left == 0.0 {
            0.0
        } else if self.right == 1.0 {
            1.0
        } else {
            0.5 * (self.left + self.right)
        }
    }
}

/// Full description of one filter in the bank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSpec {
    pub id: FilterId,
    pub band: Band,
    pub window: Window,
}

/// Fixed design constants of the filter bank.
///
/// The defaults are the values the bank is built with: order 512, a 1 kHz
/// low-pass, a 1-2 kHz band-pass and a 2 kHz high-pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DesignParams {
    /// Filter order; every filter has `order + 1` taps.
    pub order: usize,
    pub lowpass_cutoff: f64,
    pub bandpass_cutoffs: [f64; 2],
    pub highpass_cutoff: f64,
}

impl Default for DesignParams {
    fn default() -> Self {
        Self {
            order: 512,
            lowpass_cutoff: 1000.0,
            bandpass_cutoffs: [1000.0, 2000.0],
            highpass_cutoff: 2000.0,
        }
    }
}

impl DesignParams {
    /// Builds the specification of one filter from these parameters.
    pub fn spec(&self, id: FilterId) -> FilterSpec {
        let band = match id.band_type() {
            BandType::Lowpass => Band::Lowpass {
                cutoff: self.lowpass_cutoff,
            },
            BandType::Bandpass => Band::Bandpass {
                low: self.bandpass_cutoffs[0],
                high: self.bandpass_cutoffs[1],
            },
            BandType::Highpass => Band::Highpass {
                cutoff: self.highpass_cutoff,
            },
        };

        FilterSpec {
            id,
            band,
            window: id.window(),
        }
    }

    /// Specifications of all six filters, in canonical order.
    pub fn specs(&self) -> [FilterSpec; 6] {
        FilterId::ALL.map(|id| self.spec(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_id_cross_product_is_exhaustive() {
        let mut ids = Vec::new();
        for window in Window::ALL {
            for band_type in BandType::ALL {
                let id = FilterId::new(band_type, window);
                assert_eq!(id.band_type(), band_type);
                assert_eq!(id.window(), window);
                ids.push(id);
            }
        }
        assert_eq!(ids, FilterId::ALL.to_vec());
    }

    #[test]
    fn test_filter_id_names() {
        let names: Vec<_> = FilterId::ALL.iter().map(|id| id.name()).collect();
        assert_eq!(
            names,
            vec![
                "Low_Hamming",
                "Band_Hamming",
                "High_Hamming",
                "Low_Blackman",
                "Band_Blackman",
                "High_Blackman",
            ]
        );
        for id in FilterId::ALL {
            assert_eq!(
                id.name(),
                format!("{}_{}", id.band_type().name(), id.window())
            );
        }
    }

    #[test]
    fn test_filter_id_parse() {
        for id in FilterId::ALL {
            assert_eq!(id.name().parse::<FilterId>().unwrap(), id);
        }
        let err = "Notch_Hamming".parse::<FilterId>().unwrap_err();
        assert!(matches!(err, FirError::UnknownFilter(name) if name == "Notch_Hamming"));
    }

    #[test]
    fn test_passband_normalization() {
        let band = Band::Bandpass {
            low: 1000.0,
            high: 2000.0,
        };
        let passband = band.passband(8000.0).unwrap();
        assert_eq!(passband.left, 0.25);
        assert_eq!(passband.right, 0.5);
        assert_eq!(passband.reference_frequency(), 0.375);
    }

    #[test]
    fn test_reference_frequencies() {
        let low = Band::Lowpass { cutoff: 1000.0 }.passband(8000.0).unwrap();
        let high = Band::Highpass { cutoff: 2000.0 }.passband(8000.0).unwrap();
        assert_eq!(low.reference_frequency(), 0.0);
        assert_eq!(high.reference_frequency(), 1.0);
    }

    #[test]
    fn test_cutoff_out_of_range() {
        for cutoff in [0.0, -10.0, 4000.0, 5000.0, f64::NAN] {
            let result = Band::Lowpass { cutoff }.passband(8000.0);
            assert!(matches!(result, Err(FirError::InvalidSpec(_))), "{}", cutoff);
        }
    }

    #[test]
    fn test_reversed_bandpass_rejected() {
        let result = Band::Bandpass {
            low: 2000.0,
            high: 1000.0,
        }
        .passband(8000.0);
        assert!(matches!(result, Err(FirError::InvalidSpec(_))));

        let equal = Band::Bandpass {
            low: 1000.0,
            high: 1000.0,
        }
        .passband(8000.0);
        assert!(matches!(equal, Err(FirError::InvalidSpec(_))));
    }

    #[test]
    fn test_default_specs() {
        let specs = DesignParams::default().specs();
        assert_eq!(specs[0].band, Band::Lowpass { cutoff: 1000.0 });
        assert_eq!(
            specs[4].band,
            Band::Bandpass {
                low: 1000.0,
                high: 2000.0
            }
        );
        assert_eq!(specs[5].band, Band::Highpass { cutoff: 2000.0 });
        assert_eq!(specs[5].window, Window::Blackman);
    }
}
