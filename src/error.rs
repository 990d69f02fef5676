//! Error types and result utilities for spectral analysis operations.

use thiserror::Error;

/// Convenience type alias for results that may contain SpectralError
pub type SpectralResult<T> = Result<T, SpectralError>;

/// Error types that can occur while building windows, FFT plans, spectrograms
/// and frequency axis tables.
#[derive(Error, Debug)]
pub enum SpectralError {
    /// An FFT plan was requested for a size that is not a power of two ≥ 2.
    #[error("Invalid FFT size: {size} is not a power of two >= 2")]
    InvalidSize {
        /// The rejected size.
        size: usize,
    },

    /// A window selector did not name a known window function.
    ///
    /// Callers that go through [`crate::WindowSelection::resolve`] recover from
    /// this by falling back to the rectangular window.
    #[error("Invalid window type: {selector:?}")]
    InvalidWindowType {
        /// The selector as received.
        selector: String,
    },

    /// The window support is zero or wider than the window length.
    #[error("Invalid window support: support {support} must be in 1..={len}")]
    InvalidWindowSupport {
        /// Requested support.
        support: usize,
        /// Window length.
        len: usize,
    },

    /// The waveform padding is too small for the requested FFT size.
    #[error("Insufficient margin: {margin} samples of padding, at least {required} required")]
    InsufficientMargin {
        /// Padding present on each side.
        margin: usize,
        /// Padding needed, `fft_size / 2`.
        required: usize,
    },

    /// The waveform handed to the analysis is empty or inconsistent.
    #[error("Empty or malformed waveform: {0}")]
    EmptyOrMalformedWaveform(String),

    /// Error that occurs when invalid parameters are provided to an operation.
    #[error("Invalid parameter error: {0}")]
    InvalidParameter(String),

    /// Error that occurs when buffer lengths don't match expected values.
    #[error("Dimension mismatch error: {0}")]
    DimensionMismatch(String),

    /// Audio source format the engine cannot ingest (e.g. multi-channel WAV).
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Underlying I/O failure while reading an audio source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// WAV decoding failure.
    #[cfg(feature = "wav")]
    #[error("WAV decoding error: {0}")]
    Wav(#[from] hound::Error),

    /// Configuration could not be (de)serialized.
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

impl SpectralError {
    /// Create an invalid FFT size error
    pub const fn invalid_size(size: usize) -> Self {
        Self::InvalidSize { size }
    }

    /// Create an invalid window type error
    pub fn invalid_window_type(selector: impl Into<String>) -> Self {
        Self::InvalidWindowType {
            selector: selector.into(),
        }
    }

    /// Create an insufficient margin error for the given FFT size
    pub const fn insufficient_margin(margin: usize, fft_size: usize) -> Self {
        Self::InsufficientMargin {
            margin,
            required: fft_size / 2,
        }
    }

    /// Create an empty or malformed waveform error
    pub fn malformed_waveform(details: impl Into<String>) -> Self {
        Self::EmptyOrMalformedWaveform(details.into())
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(param: &str, reason: impl AsRef<str>) -> Self {
        Self::InvalidParameter(format!("{param}: {}", reason.as_ref()))
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch(what: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch(format!("{what}: expected {expected}, got {actual}"))
    }

    /// Check if this error has a local recovery policy.
    ///
    /// Only an unknown window selector is recoverable (by falling back to the
    /// rectangular window); everything else is a deterministic input failure.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidWindowType { .. })
    }

    /// Check if this error came from validating caller input rather than I/O
    pub const fn is_validation_error(&self) -> bool {
        match self {
            Self::InvalidSize { .. }
            | Self::InvalidWindowType { .. }
            | Self::InvalidWindowSupport { .. }
            | Self::InsufficientMargin { .. }
            | Self::EmptyOrMalformedWaveform(_)
            | Self::InvalidParameter(_)
            | Self::DimensionMismatch(_) => true,
            Self::UnsupportedFormat(_) | Self::Io(_) | Self::Config(_) => false,
            #[cfg(feature = "wav")]
            Self::Wav(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SpectralError::invalid_size(1000);
        assert!(err.to_string().contains("1000"));

        let err = SpectralError::insufficient_margin(100, 2048);
        match &err {
            SpectralError::InsufficientMargin { margin, required } => {
                assert_eq!(*margin, 100);
                assert_eq!(*required, 1024);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("1024"));
    }

    #[test]
    fn test_error_classification() {
        assert!(SpectralError::invalid_window_type("Blackman").is_recoverable());
        assert!(!SpectralError::invalid_size(3).is_recoverable());
        assert!(!SpectralError::malformed_waveform("empty").is_recoverable());

        assert!(SpectralError::invalid_size(3).is_validation_error());
        assert!(SpectralError::invalid_parameter("hop_size", "must be > 0").is_validation_error());

        let io = SpectralError::from(std::io::Error::other("disk"));
        assert!(!io.is_validation_error());
    }

    #[test]
    fn test_invalid_parameter_formatting() {
        let err = SpectralError::invalid_parameter("hop_size", "must be > 0");
        assert_eq!(
            err.to_string(),
            "Invalid parameter error: hop_size: must be > 0"
        );
    }
}
