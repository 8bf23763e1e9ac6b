//! A loaded signal together with its filtered versions.
//!
//! `Session` is the state a front end keeps between user actions: the
//! currently loaded signal and the result of filtering it. Loading a new
//! signal builds a new session; nothing is updated in place.

use crate::{FilterBank, FilterId, FilteredResult, FirError, Result, Signal, SignalProcessor};
use std::fmt;
use std::str::FromStr;

/// Playback name of the unfiltered signal.
pub const ORIGINAL_SIGNAL: &str = "Original Signal";

/// Which signal of a session to play or display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalSelection {
    Original,
    Filtered(FilterId),
}

impl SignalSelection {
    /// Every selectable signal: the original first, then the filters in
    /// canonical order.
    pub fn all() -> impl Iterator<Item = SignalSelection> {
        std::iter::once(SignalSelection::Original)
            .chain(FilterId::ALL.into_iter().map(SignalSelection::Filtered))
    }

    pub const fn name(&self) -> &'static str {
        match self {
            SignalSelection::Original => ORIGINAL_SIGNAL,
            SignalSelection::Filtered(id) => id.name(),
        }
    }
}

impl fmt::Display for SignalSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SignalSelection {
    type Err = FirError;

    fn from_str(s: &str) -> Result<Self> {
        if s == ORIGINAL_SIGNAL {
            Ok(SignalSelection::Original)
        } else {
            s.parse().map(SignalSelection::Filtered)
        }
    }
}

/// Level statistics of one selectable signal, for display.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalSummary {
    pub selection: SignalSelection,
    pub duration: f64,
    pub peak: f64,
    pub rms: f64,
}

/// The loaded signal and its six filtered versions.
#[derive(Debug, Clone)]
pub struct Session<const SAMPLE_RATE: u32> {
    original: Signal<SAMPLE_RATE>,
    filtered: FilteredResult<SAMPLE_RATE>,
}

impl<const SAMPLE_RATE: u32> Session<SAMPLE_RATE> {
    /// Filters `signal` with every filter of `bank` and keeps both.
    pub fn load(signal: Signal<SAMPLE_RATE>, bank: &FilterBank<SAMPLE_RATE>) -> Result<Self> {
        log::debug!(
            "Filtering {} samples ({:.2} s) with {} filters of order {}",
            signal.len(),
            signal.duration(),
            FilterId::ALL.len(),
            bank.order()
        );

        let filtered = SignalProcessor::apply(&signal, bank)?;

        log::info!("Filtering complete: {:.2} s of audio", signal.duration());
        Ok(Self {
            original: signal,
            filtered,
        })
    }

    pub fn original(&self) -> &Signal<SAMPLE_RATE> {
        &self.original
    }

    pub fn filtered(&self) -> &FilteredResult<SAMPLE_RATE> {
        &self.filtered
    }

    pub fn get(&self, selection: SignalSelection) -> &Signal<SAMPLE_RATE> {
        match selection {
            SignalSelection::Original => &self.original,
            SignalSelection::Filtered(id) => self.filtered.get(id),
        }
    }

    /// Resolves a playback name to its signal.
    ///
    /// Accepts `"Original Signal"` and the six canonical filter names; any
    /// other name fails with `UnknownFilter`.
    pub fn select(&self, name: &str) -> Result<(SignalSelection, &Signal<SAMPLE_RATE>)> {
        let selection = name.parse::<SignalSelection>().inspect_err(|_| {
            log::warn!("Invalid selection: {}", name);
        })?;
        log::debug!("Selected {}", selection);
        Ok((selection, self.get(selection)))
    }

    /// Playback names in display order.
    pub fn choices() -> Vec<&'static str> {
        SignalSelection::all().map(|s| s.name()).collect()
    }

    /// Duration and levels of every selectable signal.
    pub fn summaries(&self) -> Vec<SignalSummary> {
        SignalSelection::all()
            .map(|selection| {
                let signal = self.get(selection);
                SignalSummary {
                    selection,
                    duration: signal.duration(),
                    peak: signal.peak(),
                    rms: signal.rms(),
                }
            })
            .collect()
    }
}
