//! Short-time Fourier analysis of a margin-padded waveform.
//!
//! Frame `f` is centred on sample `f * hop` of the signal, i.e. padded
//! position `f * hop + margin`, and spans `fft_size` samples. The padding on
//! both sides must be at least `fft_size / 2` so that every frame stays
//! inside the buffer. Only the `fft_size / 2` non-redundant bins are kept.

use crate::config::{AnalysisParams, DisplayParams};
use crate::fft::FftPlan;
use crate::render::magnitude_to_db;
use crate::scale::{FrequencyAxisTable, FrequencyRange};
use crate::traits::SpectralAnalysis;
use crate::waveform::Waveform;
use crate::window::{WindowFunction, WindowType};
use crate::{SpectralError, SpectralResult};
use ndarray::{Array2, ArrayView1};
use num_complex::Complex;

/// Complex STFT of a whole waveform with its magnitude bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrogram {
    bins: Array2<Complex<f64>>,
    mag_max: f64,
    mag_min: f64,
    fft_size: usize,
    hop_size: usize,
    sample_rate: u32,
    window_type: WindowType,
}

impl Spectrogram {
    /// Number of analysis frames.
    pub fn frame_count(&self) -> usize {
        self.bins.nrows()
    }

    /// Number of frequency bins per frame, `fft_size / 2`.
    pub fn bin_count(&self) -> usize {
        self.bins.ncols()
    }

    /// The `frames × bins` matrix.
    pub const fn bins(&self) -> &Array2<Complex<f64>> {
        &self.bins
    }

    /// Complex bins of one frame.
    pub fn frame(&self, frame: usize) -> Option<ArrayView1<'_, Complex<f64>>> {
        (frame < self.frame_count()).then(|| self.bins.row(frame))
    }

    /// `|X[frame][bin]|`.
    ///
    /// # Panics
    /// If `frame` or `bin` is out of range.
    pub fn magnitude(&self, frame: usize, bin: usize) -> f64 {
        self.bins[[frame, bin]].norm()
    }

    /// `20·log10|X[frame][bin]|`.
    ///
    /// # Panics
    /// If `frame` or `bin` is out of range.
    pub fn magnitude_db(&self, frame: usize, bin: usize) -> f64 {
        magnitude_to_db(self.magnitude(frame, bin))
    }

    /// Magnitudes of every bin in one frame.
    pub fn frame_magnitudes(&self, frame: usize) -> Option<Vec<f64>> {
        self.frame(frame)
            .map(|row| row.iter().map(|c| c.norm()).collect())
    }

    /// Bin with the largest magnitude in one frame.
    pub fn peak_bin(&self, frame: usize) -> Option<usize> {
        self.frame(frame)?
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.norm().total_cmp(&b.1.norm()))
            .map(|(bin, _)| bin)
    }

    /// Largest magnitude over the whole matrix.
    pub const fn mag_max(&self) -> f64 {
        self.mag_max
    }

    /// Smallest magnitude over the whole matrix.
    pub const fn mag_min(&self) -> f64 {
        self.mag_min
    }

    /// `mag_max` in dB; the top of the colour ramp.
    pub fn max_db(&self) -> f64 {
        magnitude_to_db(self.mag_max)
    }

    /// FFT size used for the analysis.
    pub const fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Hop between frames in samples.
    pub const fn hop_size(&self) -> usize {
        self.hop_size
    }

    /// Sample rate of the analysed waveform.
    pub const fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Window the frames were weighted with.
    pub const fn window_type(&self) -> WindowType {
        self.window_type
    }

    /// Time of the frame centre in seconds.
    pub fn frame_time(&self, frame: usize) -> f64 {
        (frame * self.hop_size) as f64 / f64::from(self.sample_rate)
    }

    /// Centre frequency of `bin` in Hz.
    pub fn bin_frequency(&self, bin: usize) -> f64 {
        bin as f64 * f64::from(self.sample_rate) / self.fft_size as f64
    }
}

/// Reusable STFT configuration: one FFT plan and one window.
#[derive(Debug, Clone)]
pub struct SpectrogramBuilder {
    plan: FftPlan,
    window: WindowFunction,
    hop_size: usize,
}

impl SpectrogramBuilder {
    /// Creates a builder.
    ///
    /// # Arguments
    /// * `fft_size` - Transform size, a power of two ≥ 2
    /// * `window_type` - Analysis window
    /// * `window_support` - Non-zero width of the window, ≤ `fft_size`
    /// * `hop_size` - Samples between frame centres, checked by [`SpectrogramBuilder::analyze`]
    ///
    /// # Errors
    /// [`SpectralError::InvalidSize`] or [`SpectralError::InvalidWindowSupport`].
    pub fn new(
        fft_size: usize,
        window_type: WindowType,
        window_support: usize,
        hop_size: usize,
    ) -> SpectralResult<Self> {
        let plan = FftPlan::new(fft_size)?;
        let window = WindowFunction::new(window_type, fft_size, window_support)?;
        Ok(Self {
            plan,
            window,
            hop_size,
        })
    }

    /// Creates a builder from validated analysis parameters.
    pub fn from_params(params: &AnalysisParams) -> SpectralResult<Self> {
        params.validate()?;
        Self::new(
            params.fft_size,
            params.window_type,
            params.support(),
            params.hop_size,
        )
    }

    /// FFT plan in use.
    pub const fn plan(&self) -> &FftPlan {
        &self.plan
    }

    /// Analysis window in use.
    pub const fn window(&self) -> &WindowFunction {
        &self.window
    }

    /// Hop size in samples.
    pub const fn hop_size(&self) -> usize {
        self.hop_size
    }

    /// Computes the spectrogram of a padded sample buffer.
    ///
    /// # Arguments
    /// * `samples` - `sample_count + 2 * margin` samples, signal in the middle
    /// * `sample_count` - Number of signal samples
    /// * `margin` - Zero padding on each side, at least `fft_size / 2`
    /// * `sample_rate` - Sample rate in Hz
    ///
    /// # Errors
    /// Checked in order:
    /// * [`SpectralError::InvalidParameter`] for a zero hop size
    /// * [`SpectralError::EmptyOrMalformedWaveform`] for an empty signal, a
    ///   buffer length that does not match `sample_count + 2 * margin`, or a
    ///   NaN or infinite sample
    /// * [`SpectralError::InsufficientMargin`] when `margin < fft_size / 2`
    /// * [`SpectralError::EmptyOrMalformedWaveform`] when the signal is shorter than one hop
    /// * [`SpectralError::InvalidParameter`] for a zero sample rate
    pub fn analyze(
        &self,
        samples: &[f64],
        sample_count: usize,
        margin: usize,
        sample_rate: u32,
    ) -> SpectralResult<Spectrogram> {
        let fft_size = self.plan.size();
        let half = fft_size / 2;

        if self.hop_size == 0 {
            return Err(SpectralError::invalid_parameter("hop_size", "must be > 0"));
        }
        if sample_count == 0 {
            return Err(SpectralError::malformed_waveform("no samples"));
        }
        let expected = sample_count + 2 * margin;
        if samples.len() != expected {
            return Err(SpectralError::malformed_waveform(format!(
                "expected {expected} padded samples, got {}",
                samples.len()
            )));
        }
        if let Some(i) = samples.iter().position(|x| !x.is_finite()) {
            return Err(SpectralError::malformed_waveform(format!(
                "padded sample {i} is not a finite number"
            )));
        }
        if margin < half {
            return Err(SpectralError::insufficient_margin(margin, fft_size));
        }
        let frame_count = sample_count / self.hop_size;
        if frame_count == 0 {
            return Err(SpectralError::malformed_waveform(format!(
                "{sample_count} samples is shorter than one hop of {}",
                self.hop_size
            )));
        }
        if sample_rate == 0 {
            return Err(SpectralError::invalid_parameter("sample_rate", "must be > 0"));
        }

        let mut bins = Array2::zeros((frame_count, half));
        let mut work = vec![Complex::new(0.0, 0.0); fft_size];
        let mut spectrum = vec![Complex::new(0.0, 0.0); fft_size];
        let mut mag_max = 0.0_f64;
        let mut mag_min = f64::INFINITY;

        for (frame, mut row) in bins.rows_mut().into_iter().enumerate() {
            let start = frame * self.hop_size + margin - half;
            let frame_samples = &samples[start..start + fft_size];
            for ((slot, &x), &w) in work
                .iter_mut()
                .zip(frame_samples)
                .zip(self.window.samples())
            {
                *slot = Complex::new(x * w, 0.0);
            }
            self.plan
                .execute_complex(&mut work, self.window.area(), &mut spectrum)?;

            for (slot, &value) in row.iter_mut().zip(&spectrum[..half]) {
                *slot = value;
                let magnitude = value.norm();
                mag_max = mag_max.max(magnitude);
                mag_min = mag_min.min(magnitude);
            }
        }

        tracing::debug!(
            frames = frame_count,
            bins = half,
            hop = self.hop_size,
            mag_max,
            mag_min,
            "computed spectrogram"
        );

        Ok(Spectrogram {
            bins,
            mag_max,
            mag_min,
            fft_size,
            hop_size: self.hop_size,
            sample_rate,
            window_type: self.window.window_type(),
        })
    }

    /// Computes the spectrogram of a [`Waveform`].
    pub fn analyze_waveform(&self, waveform: &Waveform) -> SpectralResult<Spectrogram> {
        self.analyze(
            waveform.padded(),
            waveform.sample_count(),
            waveform.margin(),
            waveform.sample_rate(),
        )
    }
}

impl SpectralAnalysis for Waveform {
    fn spectrogram(&self, params: &AnalysisParams) -> SpectralResult<Spectrogram> {
        SpectrogramBuilder::from_params(params)?.analyze_waveform(self)
    }

    fn axis_table(
        &self,
        params: &AnalysisParams,
        display: &DisplayParams,
    ) -> SpectralResult<FrequencyAxisTable> {
        let sample_rate = f64::from(self.sample_rate());
        FrequencyAxisTable::build_with_range(
            display.scale,
            display.height,
            params.fft_size,
            sample_rate,
            display
                .range
                .unwrap_or_else(|| FrequencyRange::full(sample_rate)),
        )
    }

    fn frame_count(&self, hop_size: usize) -> usize {
        self.sample_count().checked_div(hop_size).unwrap_or(0)
    }
}
