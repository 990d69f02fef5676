//! Capability traits implemented by signal types.

use crate::config::{AnalysisParams, DisplayParams};
use crate::scale::FrequencyAxisTable;
use crate::spectrogram::Spectrogram;
use crate::SpectralResult;

/// Spectral analysis operations for a loaded signal.
///
/// Implemented for [`crate::Waveform`]. Every call computes from scratch;
/// [`crate::AnalysisSession`] caches the results between parameter changes.
///
/// # Examples
/// ```rust
/// use audio_spectrogram::{AnalysisParams, SpectralAnalysis, Waveform, WindowType};
///
/// let tone: Vec<f64> = (0..8000)
///     .map(|i| (2.0 * std::f64::consts::PI * 1000.0 * i as f64 / 8000.0).sin())
///     .collect();
/// let waveform = Waveform::from_samples(&tone, 8000, 512).unwrap();
/// let spectrogram = waveform
///     .spectrogram(&AnalysisParams::new(WindowType::Hann, 1024, 256))
///     .unwrap();
/// assert_eq!(spectrogram.peak_bin(10), Some(128));
/// ```
pub trait SpectralAnalysis {
    /// Runs the STFT with the given parameters.
    ///
    /// # Errors
    /// Parameter validation errors, or [`crate::SpectralError::InsufficientMargin`]
    /// when the signal padding is narrower than half the FFT size.
    fn spectrogram(&self, params: &AnalysisParams) -> SpectralResult<Spectrogram>;

    /// Builds the row → bin table for the display, using the signal's Nyquist frequency.
    fn axis_table(
        &self,
        params: &AnalysisParams,
        display: &DisplayParams,
    ) -> SpectralResult<FrequencyAxisTable>;

    /// Number of frames a hop of `hop_size` produces; 0 for a zero hop.
    fn frame_count(&self, hop_size: usize) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waveform::Waveform;
    use crate::window::WindowType;

    fn summary<A: SpectralAnalysis>(
        signal: &A,
        params: &AnalysisParams,
        display: &DisplayParams,
    ) -> SpectralResult<(usize, usize, usize)> {
        let spectrogram = signal.spectrogram(params)?;
        let table = signal.axis_table(params, display)?;
        Ok((spectrogram.frame_count(), spectrogram.bin_count(), table.height()))
    }

    #[test]
    fn test_waveform_through_trait_bound() {
        let waveform = Waveform::from_samples(&[0.25; 8000], 8000, 512).unwrap();
        let params = AnalysisParams::new(WindowType::Hann, 1024, 256);
        let display = DisplayParams {
            height: 64,
            ..DisplayParams::default()
        };

        let (frames, bins, rows) = summary(&waveform, &params, &display).unwrap();
        assert_eq!(frames, SpectralAnalysis::frame_count(&waveform, 256));
        assert_eq!(frames, 8000 / 256);
        assert_eq!(bins, 512);
        assert_eq!(rows, 64);
        assert_eq!(SpectralAnalysis::frame_count(&waveform, 0), 0);
    }

    #[test]
    fn test_narrow_margin_is_reported() {
        let waveform = Waveform::from_samples(&[0.25; 8000], 8000, 16).unwrap();
        let params = AnalysisParams::new(WindowType::Hann, 1024, 256);
        assert!(matches!(
            waveform.spectrogram(&params),
            Err(crate::SpectralError::InsufficientMargin { .. })
        ));
    }
}
