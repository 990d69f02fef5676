// Correctness and logic
#![warn(clippy::unit_cmp)] // Detects comparing unit types
#![warn(clippy::match_same_arms)]
// Duplicate match arms

// Performance-focused
#![warn(clippy::inefficient_to_string)] // `format!("{}", x)` vs `x.to_string()`
#![warn(clippy::map_clone)] // Cloning inside `map()` unnecessarily
#![warn(clippy::unnecessary_to_owned)] // Detects redundant `.to_owned()` or `.clone()`
#![warn(clippy::large_stack_arrays)] // Helps avoid stack overflows
#![warn(clippy::needless_collect)] // Avoids `.collect().iter()` chains

// Style and idiomatic Rust
#![warn(clippy::redundant_clone)] // Detects unnecessary `.clone()`
#![warn(clippy::identity_op)] // e.g., `x + 0`, `x * 1`
#![warn(clippy::needless_return)] // Avoids `return` at the end of functions
#![warn(clippy::manual_map)] // Use `.map()` instead of manual `match`
#![warn(clippy::unwrap_used)] // Avoids using `unwrap()`

// Maintainability
#![warn(clippy::missing_panics_doc)] // Docs for functions that might panic
#![warn(clippy::missing_const_for_fn)] // Suggests making eligible functions `const`
#![deny(missing_docs)] // Documentation is a must for release

//! # audio_spectrogram
//!
//! The spectral analysis engine of an audio spectrogram viewer: analysis
//! windows, a radix-2 FFT, short-time Fourier framing with magnitude bounds,
//! and the perceptual frequency scales used to lay the result out on screen.
//!
//! ## Installation
//!
//! ```toml
//! [dependencies]
//! audio_spectrogram = "0.1.0"
//! ```
//!
//! WAV loading through `hound` is enabled by the default `wav` feature. Build
//! with `default-features = false` to analyse in-memory samples only.
//!
//! ## Pipeline
//!
//! 1. [`Waveform`] holds mono samples in `[-1, 1]` with zero padding of
//!    `margin` samples on each side.
//! 2. [`SpectrogramBuilder`] windows frames centred every `hop_size` samples,
//!    transforms them with an [`FftPlan`] and keeps the `fft_size / 2` bins.
//! 3. [`FrequencyAxisTable`] maps each display row to a spectrogram bin for a
//!    [`FrequencyScale`] (linear, log, ERB, Bark or Mel) and places axis ticks.
//! 4. [`render_rgb`] converts magnitudes to dB and colours each pixel.
//!
//! [`AnalysisSession`] ties these together and only recomputes what a
//! parameter change actually affects.
//!
//! ## Quick Start
//!
//! ```rust
//! use audio_spectrogram::{
//!     AnalysisParams, FrequencyAxisTable, FrequencyScale, SpectrogramBuilder, Waveform,
//!     WindowType,
//! };
//!
//! let tone: Vec<f64> = (0..44100)
//!     .map(|i| (2.0 * std::f64::consts::PI * 440.0 * i as f64 / 44100.0).sin())
//!     .collect();
//! let params = AnalysisParams::new(WindowType::Hann, 2048, 512);
//! let waveform = Waveform::from_samples(&tone, 44100, params.required_margin()).unwrap();
//!
//! let spectrogram = SpectrogramBuilder::from_params(&params)
//!     .unwrap()
//!     .analyze_waveform(&waveform)
//!     .unwrap();
//! assert_eq!(spectrogram.frame_count(), 44100 / 512);
//!
//! let table = FrequencyAxisTable::build(FrequencyScale::Mel, 512, 2048, 44100.0).unwrap();
//! assert_eq!(table.bin_for_row(0), Some(1023));
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`SpectralResult`]. Parameters are checked
//! when an operation starts, so a failure never leaves a partial result behind.
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events: `debug` for window, plan, table and
//! spectrogram construction, `warn` when an unknown window selector falls back
//! to the rectangular window, `trace` for session cache transitions. Install
//! a subscriber in the application to see them.

pub mod config;
pub mod error;
pub mod fft;
pub mod render;
pub mod scale;
pub mod session;
pub mod spectrogram;
pub mod traits;
pub mod waveform;
pub mod window;

pub use config::{AnalysisParams, DisplayParams, ViewerConfig};
pub use error::{SpectralError, SpectralResult};
pub use fft::FftPlan;
pub use render::{
    DEFAULT_FLOOR_DB, DbFloor, RgbImage, magnitude_to_db, normalize_db, ramp, render_rgb,
};
pub use scale::{
    AxisTick, FrequencyAxisTable, FrequencyRange, FrequencyScale, ScaleContext, axis_ticks,
    bark_to_hz, bin_to_hz, erb_to_hz, frequency_label, hz_to_bark, hz_to_bin, hz_to_erb,
    hz_to_log_position, hz_to_mel, log_position_to_hz, mel_to_hz,
};
pub use session::{AnalysisSession, Freshness, Readout};
pub use spectrogram::{Spectrogram, SpectrogramBuilder};
pub use traits::SpectralAnalysis;
pub use waveform::{DEFAULT_MARGIN, Waveform, sample_to_pcm16};
pub use window::{WindowFunction, WindowSelection, WindowType};
