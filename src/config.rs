//! Analysis and display configuration.
//!
//! [`AnalysisParams`] holds everything that changes the computed spectrogram;
//! [`DisplayParams`] holds everything that only changes how it is mapped onto
//! the screen. Keeping them apart is what lets the session skip a full STFT
//! when only the frequency axis or the colour floor changes.

use crate::render::DbFloor;
use crate::scale::{FrequencyRange, FrequencyScale};
use crate::window::WindowType;
use crate::{SpectralError, SpectralResult};
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Parameters of the short-time Fourier transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisParams {
    /// Analysis window shape.
    pub window_type: WindowType,
    /// Width of the window's non-zero region; `None` uses the full FFT size.
    pub window_support: Option<usize>,
    /// FFT size, a power of two ≥ 2.
    pub fft_size: usize,
    /// Samples between successive frame centres.
    pub hop_size: usize,
}

impl AnalysisParams {
    /// Creates parameters with a full-width window.
    pub const fn new(window_type: WindowType, fft_size: usize, hop_size: usize) -> Self {
        Self {
            window_type,
            window_support: None,
            fft_size,
            hop_size,
        }
    }

    /// Sets an explicit window support.
    pub const fn with_support(mut self, support: usize) -> Self {
        self.window_support = Some(support);
        self
    }

    /// Short frames for speech: 512-point Hann, 75% overlap.
    pub const fn speech() -> Self {
        Self::new(WindowType::Hann, 512, 128)
    }

    /// General music analysis: 4096-point Hann, 75% overlap.
    pub const fn music() -> Self {
        Self::new(WindowType::Hann, 4096, 1024)
    }

    /// Fine frequency resolution: 8192-point Gaussian with a dense hop.
    pub const fn high_resolution() -> Self {
        Self::new(WindowType::Gaussian, 8192, 256)
    }

    /// Resolved window support.
    pub fn support(&self) -> usize {
        self.window_support.unwrap_or(self.fft_size)
    }

    /// Padding a waveform needs for these parameters, `fft_size / 2`.
    pub const fn required_margin(&self) -> usize {
        self.fft_size / 2
    }

    /// Hop size that yields about one frame per display column.
    ///
    /// # Errors
    /// [`SpectralError::InvalidParameter`] when `width == 0`.
    pub fn hop_for_width(sample_count: usize, width: usize) -> SpectralResult<usize> {
        if width == 0 {
            return Err(SpectralError::invalid_parameter("width", "must be > 0"));
        }
        Ok((sample_count / width).max(1))
    }

    /// Validates the parameters.
    ///
    /// # Errors
    /// * [`SpectralError::InvalidSize`] for a bad FFT size
    /// * [`SpectralError::InvalidParameter`] for a zero hop
    /// * [`SpectralError::InvalidWindowSupport`] for a support of 0 or wider than the FFT
    pub fn validate(&self) -> SpectralResult<()> {
        if self.fft_size < 2 || !self.fft_size.is_power_of_two() {
            return Err(SpectralError::invalid_size(self.fft_size));
        }
        if self.hop_size == 0 {
            return Err(SpectralError::invalid_parameter("hop_size", "must be > 0"));
        }
        let support = self.support();
        if support == 0 || support > self.fft_size {
            return Err(SpectralError::InvalidWindowSupport {
                support,
                len: self.fft_size,
            });
        }
        Ok(())
    }
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self::new(WindowType::Gaussian, 2048, 512)
    }
}

/// How the spectrogram is laid out and coloured on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayParams {
    /// Frequency axis warping.
    pub scale: FrequencyScale,
    /// Display height in rows.
    pub height: usize,
    /// Displayed band; `None` shows DC to Nyquist.
    pub range: Option<FrequencyRange>,
    /// Lower end of the colour ramp.
    pub floor: DbFloor,
}

impl DisplayParams {
    /// Validates the parameters that do not depend on the loaded waveform.
    ///
    /// The frequency range is checked against the Nyquist frequency when the
    /// axis table is built.
    pub fn validate(&self) -> SpectralResult<()> {
        if self.height == 0 {
            return Err(SpectralError::invalid_parameter("height", "must be > 0"));
        }
        self.floor.validate()
    }
}

impl Default for DisplayParams {
    fn default() -> Self {
        Self {
            scale: FrequencyScale::Linear,
            height: 1024,
            range: None,
            floor: DbFloor::default(),
        }
    }
}

/// Complete viewer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// STFT parameters.
    pub analysis: AnalysisParams,
    /// Axis and colour parameters.
    pub display: DisplayParams,
}

impl ViewerConfig {
    /// Validates both parameter groups.
    pub fn validate(&self) -> SpectralResult<()> {
        self.analysis.validate()?;
        self.display.validate()
    }

    /// Parses and validates a JSON configuration. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> SpectralResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON configuration from a reader.
    pub fn from_json_reader<R: Read>(reader: R) -> SpectralResult<Self> {
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json_string(&self) -> SpectralResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
