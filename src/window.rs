//! Analysis window functions.
//!
//! A [`WindowFunction`] is a length-`N` coefficient sequence whose non-zero part
//! (the *support*) is centred at `N/2`. The sum of the coefficients (the window
//! *area*) is used by [`crate::FftPlan`] to normalize transform output so that
//! different window shapes give comparable levels. The area is a normalization
//! divisor only; it does not compensate for the spectral leakage of a shape.

use crate::{SpectralError, SpectralResult};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Window functions for spectral analysis.
///
/// The declaration order matches the selector indices used by the viewer's
/// window combo box (see [`WindowType::from_index`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WindowType {
    /// Gaussian window - tapers smoothly over the full frame, width set by the support.
    #[default]
    Gaussian,
    /// Hann window - good general-purpose window, reaches zero at the support edges.
    Hann,
    /// Hamming window - like Hann with a raised pedestal and a lower first sidelobe.
    Hamming,
    /// Rectangular window - best frequency resolution but high leakage.
    Rect,
}

impl WindowType {
    /// All supported window types in selector order.
    pub const ALL: [WindowType; 4] = [
        WindowType::Gaussian,
        WindowType::Hann,
        WindowType::Hamming,
        WindowType::Rect,
    ];

    /// Looks up a window type by its selector index.
    ///
    /// # Errors
    /// Returns [`SpectralError::InvalidWindowType`] for indices outside `0..4`.
    pub fn from_index(index: i64) -> SpectralResult<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| SpectralError::invalid_window_type(index.to_string()))
    }

    /// Selector index of this window type.
    pub const fn index(self) -> usize {
        match self {
            WindowType::Gaussian => 0,
            WindowType::Hann => 1,
            WindowType::Hamming => 2,
            WindowType::Rect => 3,
        }
    }

    /// Human readable name, also accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            WindowType::Gaussian => "Gaussian",
            WindowType::Hann => "Hann",
            WindowType::Hamming => "Hamming",
            WindowType::Rect => "Rect",
        }
    }
}

impl fmt::Display for WindowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WindowType {
    type Err = SpectralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gaussian" | "gauss" => Ok(WindowType::Gaussian),
            "hann" | "hanning" => Ok(WindowType::Hann),
            "hamming" => Ok(WindowType::Hamming),
            "rect" | "rectangular" | "boxcar" => Ok(WindowType::Rect),
            _ => Err(SpectralError::invalid_window_type(s)),
        }
    }
}

/// Outcome of resolving an external window selector.
///
/// An unknown selector is not silently mapped to a valid request: it resolves
/// to [`WindowSelection::Fallback`], which still carries the rejected selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowSelection {
    /// The selector named a supported window.
    Requested(WindowType),
    /// The selector was not recognized; the rectangular window is used instead.
    Fallback {
        /// The selector as it was received.
        requested: String,
    },
}

impl WindowSelection {
    /// Resolves a selector name, falling back to [`WindowType::Rect`] when it is unknown.
    pub fn resolve(selector: &str) -> Self {
        match selector.parse::<WindowType>() {
            Ok(window_type) => WindowSelection::Requested(window_type),
            Err(err) => Self::fallback(selector, &err),
        }
    }

    /// Resolves a selector index, falling back to [`WindowType::Rect`] when it is out of range.
    pub fn resolve_index(index: i64) -> Self {
        match WindowType::from_index(index) {
            Ok(window_type) => WindowSelection::Requested(window_type),
            Err(err) => Self::fallback(&index.to_string(), &err),
        }
    }

    fn fallback(selector: &str, err: &SpectralError) -> Self {
        tracing::warn!(selector, error = %err, "unsupported window type, using Rect");
        WindowSelection::Fallback {
            requested: selector.to_string(),
        }
    }

    /// The window type to actually build.
    pub const fn window_type(&self) -> WindowType {
        match self {
            WindowSelection::Requested(window_type) => *window_type,
            WindowSelection::Fallback { .. } => WindowType::Rect,
        }
    }

    /// Returns true when the selector was rejected and the fallback applies.
    pub const fn is_fallback(&self) -> bool {
        matches!(self, WindowSelection::Fallback { .. })
    }

    /// Converts the selection back into a typed failure, for callers that
    /// prefer to refuse unknown selectors instead of falling back.
    pub fn into_result(self) -> SpectralResult<WindowType> {
        match self {
            WindowSelection::Requested(window_type) => Ok(window_type),
            WindowSelection::Fallback { requested } => {
                Err(SpectralError::invalid_window_type(requested))
            }
        }
    }
}

/// Immutable window coefficients for one `(type, length, support)` triple.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowFunction {
    window_type: WindowType,
    support: usize,
    samples: Vec<f64>,
    area: f64,
}

impl WindowFunction {
    /// Generates a window of length `len` whose support is `support` samples
    /// centred on `len / 2`.
    ///
    /// # Arguments
    /// * `window_type` - Shape of the window
    /// * `len` - Total number of coefficients (the FFT size)
    /// * `support` - Width of the non-zero region; for Gaussian it sets the
    ///   taper width instead
    ///
    /// # Errors
    /// [`SpectralError::InvalidWindowSupport`] if `len == 0`, `support == 0`
    /// or `support > len`.
    pub fn new(window_type: WindowType, len: usize, support: usize) -> SpectralResult<Self> {
        if len == 0 || support == 0 || support > len {
            return Err(SpectralError::InvalidWindowSupport { support, len });
        }

        let samples = match window_type {
            WindowType::Gaussian => gaussian(len, support),
            WindowType::Hamming => raised_cosine(len, support, 0.54, 0.46),
            WindowType::Hann => raised_cosine(len, support, 0.5, 0.5),
            WindowType::Rect => supported(len, support, |_| 1.0),
        };
        let area = samples.iter().sum();

        tracing::debug!(%window_type, len, support, area, "generated window");

        Ok(Self {
            window_type,
            support,
            samples,
            area,
        })
    }

    /// Builds a window from an external selector, applying the Rect fallback.
    ///
    /// The returned [`WindowSelection`] tells the caller whether the fallback was used.
    pub fn from_selector(
        selector: &str,
        len: usize,
        support: usize,
    ) -> SpectralResult<(Self, WindowSelection)> {
        let selection = WindowSelection::resolve(selector);
        let window = Self::new(selection.window_type(), len, support)?;
        Ok((window, selection))
    }

    /// Window shape.
    pub const fn window_type(&self) -> WindowType {
        self.window_type
    }

    /// Number of coefficients.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; a window has at least one coefficient.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Width of the non-zero region.
    pub const fn support(&self) -> usize {
        self.support
    }

    /// The coefficients.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Sum of all coefficients.
    pub const fn area(&self) -> f64 {
        self.area
    }

    /// Multiplies `frame` by the window coefficients into `out`.
    ///
    /// # Errors
    /// [`SpectralError::DimensionMismatch`] if either slice length differs from the window length.
    pub fn apply(&self, frame: &[f64], out: &mut [f64]) -> SpectralResult<()> {
        if frame.len() != self.len() {
            return Err(SpectralError::dimension_mismatch(
                "frame length",
                self.len(),
                frame.len(),
            ));
        }
        if out.len() != self.len() {
            return Err(SpectralError::dimension_mismatch(
                "output length",
                self.len(),
                out.len(),
            ));
        }
        for ((o, &x), &w) in out.iter_mut().zip(frame).zip(&self.samples) {
            *o = x * w;
        }
        Ok(())
    }
}

/// Index range `[len/2 - support/2, len/2 + support/2)` holding the non-zero coefficients.
fn support_range(len: usize, support: usize) -> std::ops::Range<usize> {
    let centre = len / 2;
    let half = support / 2;
    (centre - half)..(centre + half)
}

fn supported(len: usize, support: usize, f: impl Fn(usize) -> f64) -> Vec<f64> {
    let mut samples = vec![0.0; len];
    for i in support_range(len, support) {
        samples[i] = f(i);
    }
    samples
}

fn raised_cosine(len: usize, support: usize, a0: f64, a1: f64) -> Vec<f64> {
    let offset = (len / 2 + support / 2) as f64;
    let width = support as f64;
    supported(len, support, |i| {
        a0 - a1 * (2.0 * PI * (i as f64 - offset) / width).cos()
    })
}

fn gaussian(len: usize, support: usize) -> Vec<f64> {
    let centre = len as f64 / 2.0;
    let half_width = support as f64 / 2.0;
    (0..len)
        .map(|i| (-(3.0 * (centre - i as f64) / half_width).powi(2)).exp())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx_eq::assert_approx_eq;

    #[test]
    fn test_rect_area_equals_length() {
        for &n in &[2usize, 8, 256, 2048] {
            let window = WindowFunction::new(WindowType::Rect, n, n).unwrap();
            assert_eq!(window.area(), n as f64);
            assert!(window.samples().iter().all(|&w| w == 1.0));
        }
    }

    #[test]
    fn test_hann_and_hamming_area_strictly_inside() {
        for window_type in [WindowType::Hann, WindowType::Hamming] {
            for &n in &[4usize, 64, 1024] {
                let window = WindowFunction::new(window_type, n, n).unwrap();
                assert!(window.area() > 0.0, "{window_type} area must be positive");
                assert!(window.area() < n as f64, "{window_type} area must be < N");
            }
        }

        // Full-support Hann sums to N/2, Hamming to 0.54 * N
        let hann = WindowFunction::new(WindowType::Hann, 1024, 1024).unwrap();
        assert_approx_eq!(hann.area(), 512.0, 1e-9);
        let hamming = WindowFunction::new(WindowType::Hamming, 1024, 1024).unwrap();
        assert_approx_eq!(hamming.area(), 0.54 * 1024.0, 1e-9);
    }

    #[test]
    fn test_zero_outside_support() {
        let n = 64;
        let support = 16;
        for window_type in [WindowType::Hann, WindowType::Hamming, WindowType::Rect] {
            let window = WindowFunction::new(window_type, n, support).unwrap();
            for (i, &w) in window.samples().iter().enumerate() {
                if !(24..40).contains(&i) {
                    assert_eq!(w, 0.0, "{window_type} sample {i} should be zero");
                }
            }
            assert!(window.samples()[32] > 0.0);
        }
    }

    #[test]
    fn test_hann_shape() {
        let window = WindowFunction::new(WindowType::Hann, 8, 8).unwrap();
        let samples = window.samples();
        assert!(samples[0].abs() < 1e-12);
        assert_approx_eq!(samples[4], 1.0, 1e-12);
        // Symmetric around the centre
        for k in 1..4 {
            assert!((samples[4 - k] - samples[4 + k]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_gaussian_tapers_over_full_range() {
        let window = WindowFunction::new(WindowType::Gaussian, 256, 128).unwrap();
        let samples = window.samples();
        assert_approx_eq!(samples[128], 1.0, 1e-12);
        assert!(samples.iter().all(|&w| w > 0.0));
        assert!(samples[0] < samples[64]);
        assert!(samples[64] < samples[128]);
        // exp(-9) at the support edge
        assert_approx_eq!(samples[64], (-9.0f64).exp(), 1e-9);
    }

    #[test]
    fn test_invalid_support() {
        assert!(matches!(
            WindowFunction::new(WindowType::Hann, 64, 128),
            Err(SpectralError::InvalidWindowSupport { support: 128, len: 64 })
        ));
        assert!(WindowFunction::new(WindowType::Hann, 0, 0).is_err());
        assert!(WindowFunction::new(WindowType::Rect, 64, 0).is_err());
    }

    #[test]
    fn test_window_type_parsing() {
        assert_eq!("hann".parse::<WindowType>().unwrap(), WindowType::Hann);
        assert_eq!("Hanning".parse::<WindowType>().unwrap(), WindowType::Hann);
        assert_eq!(" RECT ".parse::<WindowType>().unwrap(), WindowType::Rect);
        assert!(matches!(
            "blackman".parse::<WindowType>(),
            Err(SpectralError::InvalidWindowType { .. })
        ));

        for window_type in WindowType::ALL {
            assert_eq!(WindowType::from_index(window_type.index() as i64).unwrap(), window_type);
            assert_eq!(window_type.name().parse::<WindowType>().unwrap(), window_type);
        }
        assert!(WindowType::from_index(4).is_err());
        assert!(WindowType::from_index(-1).is_err());
    }

    #[test]
    fn test_fallback_is_observable() {
        let selection = WindowSelection::resolve("blackman");
        assert!(selection.is_fallback());
        assert_eq!(selection.window_type(), WindowType::Rect);
        assert_ne!(selection, WindowSelection::Requested(WindowType::Rect));
        assert!(matches!(
            selection.into_result(),
            Err(SpectralError::InvalidWindowType { selector }) if selector == "blackman"
        ));

        let selection = WindowSelection::resolve_index(7);
        assert!(selection.is_fallback());

        let (window, selection) = WindowFunction::from_selector("hamming", 32, 32).unwrap();
        assert!(!selection.is_fallback());
        assert_eq!(window.window_type(), WindowType::Hamming);

        let (window, selection) = WindowFunction::from_selector("kaiser", 32, 32).unwrap();
        assert!(selection.is_fallback());
        assert_eq!(window.window_type(), WindowType::Rect);
        assert_eq!(window.area(), 32.0);
    }

    #[test]
    fn test_apply() {
        let window = WindowFunction::new(WindowType::Rect, 8, 4).unwrap();
        let frame = [1.0; 8];
        let mut out = [0.0; 8];
        window.apply(&frame, &mut out).unwrap();
        assert_eq!(out, [0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0]);

        let mut short = [0.0; 4];
        assert!(matches!(
            window.apply(&frame, &mut short),
            Err(SpectralError::DimensionMismatch(_))
        ));
    }
}
