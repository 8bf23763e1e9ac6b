//! The fixed bank of six FIR filters.

use super::{DesignParams, FilterId, FilterSpec, FirCoefficients};
use crate::Result;

/// Six designed FIR filters sharing one sample rate and order.
///
/// The sample rate is part of the type, so a bank can only be applied to
/// signals recorded at the rate it was designed for.
///
/// # Type Parameters
///
/// * `SAMPLE_RATE` - Sample rate in Hz the cutoffs are normalized against
///
/// # Examples
///
/// ```
/// use firbank::{FilterBank, FilterId, SAMPLE_RATE};
///
/// let bank = FilterBank::<SAMPLE_RATE>::design().unwrap();
/// assert_eq!(bank.coefficients(FilterId::LowHamming).len(), 513);
/// ```
#[derive(Debug, Clone)]
pub struct FilterBank<const SAMPLE_RATE: u32> {
    params: DesignParams,
    // Indexed by canonical `FilterId` order
    filters: Vec<(FilterSpec, FirCoefficients)>,
}

impl<const SAMPLE_RATE: u32> FilterBank<SAMPLE_RATE> {
    /// Designs the bank from the default design constants.
    pub fn design() -> Result<Self> {
        Self::with_params(DesignParams::default())
    }

    /// Designs the bank from explicit parameters.
    ///
    /// Fails with `InvalidSpec` if any filter cannot be designed; no partial
    /// bank is returned.
    pub fn with_params(params: DesignParams) -> Result<Self> {
        let sample_rate = SAMPLE_RATE as f64;
        let filters = params
            .specs()
            .into_iter()
            .map(|spec| {
                let coefficients = FirCoefficients::design(&spec, params.order, sample_rate)?;
                Ok((spec, coefficients))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { params, filters })
    }

    pub fn coefficients(&self, id: FilterId) -> &FirCoefficients {
        &self.filters[id as usize].1
    }

    pub fn spec(&self, id: FilterId) -> &FilterSpec {
        &self.filters[id as usize].0
    }

    /// Iterates over all filters in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (FilterId, &FirCoefficients)> {
        self.filters.iter().map(|(spec, fir)| (spec.id, fir))
    }

    pub fn params(&self) -> &DesignParams {
        &self.params
    }

    pub fn order(&self) -> usize {
        self.params.order
    }

    pub fn sample_rate(&self) -> f64 {
        SAMPLE_RATE as f64
    }
}
