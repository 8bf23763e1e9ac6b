//! Tapering windows for windowed-sinc filter design.
//!
//! Both windows are generalized cosine windows evaluated symmetrically over
//! the full filter length, so the designed filters keep linear phase.

use std::f64::consts::PI;
use std::fmt;

/// A window function applied to the truncated ideal impulse response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Window {
    /// Hamming window: `0.54 - 0.46 cos(2πn/(M-1))`
    Hamming,
    /// Blackman window: `0.42 - 0.5 cos(2πn/(M-1)) + 0.08 cos(4πn/(M-1))`
    Blackman,
}

impl Window {
    /// All windows used by the filter bank, in canonical order.
    pub const ALL: [Window; 2] = [Window::Hamming, Window::Blackman];

    /// Cosine-series coefficients `[a0, a1, a2]` of the window.
    const fn cosine_terms(self) -> [f64; 3] {
        match self {
            Window::Hamming => [0.54, 0.46, 0.0],
            Window::Blackman => [0.42, 0.5, 0.08],
        }
    }

    /// Evaluates the window at index `n` of a window `len` samples long.
    ///
    /// A single-sample window is 1.0.
    pub fn value(self, n: usize, len: usize) -> f64 {
        if len <= 1 {
            return 1.0;
        }

        let [a0, a1, a2] = self.cosine_terms();
        let phase = 2.0 * PI * n as f64 / (len - 1) as f64;
        a0 - a1 * phase.cos() + a2 * (2.0 * phase).cos()
    }

    /// Generates the whole window of `len` samples.
    ///
    /// # Examples
    ///
    /// ```
    /// use firbank::Window;
    ///
    /// let w = Window::Hamming.coefficients(5);
    /// assert!((w[0] - 0.08).abs() < 1e-12);
    /// assert!((w[2] - 1.0).abs() < 1e-12);
    /// ```
    pub fn coefficients(self, len: usize) -> Vec<f64> {
        (0..len).map(|n| self.value(n, len)).collect()
    }

    /// Short name used in filter identifiers.
    pub const fn name(self) -> &'static str {
        match self {
            Window::Hamming => "Hamming",
            Window::Blackman => "Blackman",
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
