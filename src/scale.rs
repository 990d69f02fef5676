//! Perceptual frequency axes.
//!
//! Each [`FrequencyScale`] has a forward (Hz → scale value) and inverse
//! (scale value → Hz) conversion. A [`FrequencyAxisTable`] spaces display rows
//! evenly in the scale domain and maps each row back to the FFT bin that
//! should be drawn there. Tick placement reuses the forward conversions.
//!
//! Row 0 is the top of the display and therefore the highest frequency.

use crate::{SpectralError, SpectralResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// SCALE CONVERSIONS
// =============================================================================

/// Converts frequency in Hz to the ERB-rate scale.
///
/// `erb = 21.3 * log10(1 + 0.00437 * f)`
pub fn hz_to_erb(freq_hz: f64) -> f64 {
    21.3 * (1.0 + 0.00437 * freq_hz).log10()
}

/// Inverse of [`hz_to_erb`]: `f = (10^(erb / 21.3) - 1) / 0.00437`
pub fn erb_to_hz(erb: f64) -> f64 {
    (10.0_f64.powf(erb / 21.3) - 1.0) / 0.00437
}

/// Converts frequency in Hz to the Bark scale (Traunmüller).
///
/// The base formula `26.81 * f / (1960 + f) - 0.53` is corrected below 2 Bark
/// and above 20.1 Bark, which keeps [`bark_to_hz`] an exact inverse.
/// Results in those two regions therefore differ from the bare formula.
pub fn hz_to_bark(freq_hz: f64) -> f64 {
    let bark = 26.81 * freq_hz / (1960.0 + freq_hz) - 0.53;
    if bark < 2.0 {
        bark + 0.15 * (2.0 - bark)
    } else if bark > 20.1 {
        bark + 0.22 * (bark - 20.1)
    } else {
        bark
    }
}

/// Inverse of [`hz_to_bark`], one branch per correction region.
pub fn bark_to_hz(bark: f64) -> f64 {
    let uncorrected = if bark < 2.0 {
        (bark - 0.3) / 0.85
    } else if bark > 20.1 {
        (bark + 4.422) / 1.22
    } else {
        bark
    };
    1960.0 * (uncorrected + 0.53) / (26.28 - uncorrected)
}

/// Converts frequency in Hz to mel scale: `mel = 2595 * log10(1 + f / 700)`
pub fn hz_to_mel(freq_hz: f64) -> f64 {
    2595.0 * (1.0 + freq_hz / 700.0).log10()
}

/// Inverse of [`hz_to_mel`]: `f = 700 * (10^(mel / 2595) - 1)`
pub fn mel_to_hz(mel: f64) -> f64 {
    700.0 * (10.0_f64.powf(mel / 2595.0) - 1.0)
}

/// Fractional FFT bin index of a frequency, `f / fs * N`.
pub fn hz_to_bin(freq_hz: f64, fft_size: usize, sample_rate: f64) -> f64 {
    freq_hz / sample_rate * fft_size as f64
}

/// Frequency of a (fractional) FFT bin index, `k * fs / N`.
pub fn bin_to_hz(bin: f64, fft_size: usize, sample_rate: f64) -> f64 {
    bin * sample_rate / fft_size as f64
}

/// Logarithmic display position of a frequency: `ln(k + 1) / ln(N / 2)` with
/// `k` the fractional bin index. Requires `fft_size >= 4`.
pub fn hz_to_log_position(freq_hz: f64, fft_size: usize, sample_rate: f64) -> f64 {
    let bin = hz_to_bin(freq_hz, fft_size, sample_rate);
    (bin + 1.0).ln() / half_size_ln(fft_size)
}

/// Inverse of [`hz_to_log_position`].
pub fn log_position_to_hz(position: f64, fft_size: usize, sample_rate: f64) -> f64 {
    let bin = (position * half_size_ln(fft_size)).exp() - 1.0;
    bin_to_hz(bin, fft_size, sample_rate)
}

fn half_size_ln(fft_size: usize) -> f64 {
    (fft_size as f64 / 2.0).ln()
}

// =============================================================================
// SCALE SELECTION
// =============================================================================

/// Frequency axis warping used for display rows and tick placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FrequencyScale {
    /// Linear in Hz, normalized to the Nyquist frequency.
    #[default]
    Linear,
    /// Logarithmic in FFT bin index.
    Log,
    /// Equivalent rectangular bandwidth rate.
    Erb,
    /// Bark critical-band rate.
    Bark,
    /// Mel scale.
    Mel,
}

impl FrequencyScale {
    /// All scales in selector order.
    pub const ALL: [FrequencyScale; 5] = [
        FrequencyScale::Linear,
        FrequencyScale::Log,
        FrequencyScale::Erb,
        FrequencyScale::Bark,
        FrequencyScale::Mel,
    ];

    /// Human readable name, also accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            FrequencyScale::Linear => "Linear",
            FrequencyScale::Log => "Log",
            FrequencyScale::Erb => "ERB",
            FrequencyScale::Bark => "Bark",
            FrequencyScale::Mel => "Mel",
        }
    }

    /// Forward conversion from Hz to this scale.
    pub fn to_scale(self, freq_hz: f64, ctx: ScaleContext) -> f64 {
        match self {
            FrequencyScale::Linear => freq_hz / ctx.nyquist(),
            FrequencyScale::Log => hz_to_log_position(freq_hz, ctx.fft_size, ctx.sample_rate),
            FrequencyScale::Erb => hz_to_erb(freq_hz),
            FrequencyScale::Bark => hz_to_bark(freq_hz),
            FrequencyScale::Mel => hz_to_mel(freq_hz),
        }
    }

    /// Inverse conversion from this scale back to Hz.
    pub fn to_hz(self, value: f64, ctx: ScaleContext) -> f64 {
        match self {
            FrequencyScale::Linear => value * ctx.nyquist(),
            FrequencyScale::Log => log_position_to_hz(value, ctx.fft_size, ctx.sample_rate),
            FrequencyScale::Erb => erb_to_hz(value),
            FrequencyScale::Bark => bark_to_hz(value),
            FrequencyScale::Mel => mel_to_hz(value),
        }
    }

    /// Round-number frequencies worth labelling on this scale, in ascending order.
    ///
    /// Linear axes get a label every 5 kHz, log axes one per decade and the
    /// perceptual scales the 1-2-5 sequence of every decade.
    fn tick_candidates(self, high_hz: f64) -> Vec<f64> {
        match self {
            FrequencyScale::Linear => (0u32..)
                .map(|i| f64::from(i) * 5000.0)
                .take_while(|&hz| hz <= high_hz)
                .collect(),
            FrequencyScale::Log => decades()
                .take_while(|&hz| hz <= high_hz)
                .collect(),
            FrequencyScale::Erb | FrequencyScale::Bark | FrequencyScale::Mel => decades()
                .flat_map(|decade| [decade, 2.0 * decade, 5.0 * decade])
                .take_while(|&hz| hz <= high_hz)
                .collect(),
        }
    }
}

/// 10 Hz, 100 Hz, 1 kHz, ... up to 100 kHz.
fn decades() -> impl Iterator<Item = f64> {
    (1..=5).map(|exp| 10.0_f64.powi(exp))
}

impl fmt::Display for FrequencyScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FrequencyScale {
    type Err = SpectralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" | "lin" => Ok(FrequencyScale::Linear),
            "log" | "logarithmic" => Ok(FrequencyScale::Log),
            "erb" => Ok(FrequencyScale::Erb),
            "bark" => Ok(FrequencyScale::Bark),
            "mel" => Ok(FrequencyScale::Mel),
            _ => Err(SpectralError::invalid_parameter(
                "frequency scale",
                format!("unknown scale {s:?}"),
            )),
        }
    }
}

/// Transform parameters some scales depend on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleContext {
    /// FFT size `N`.
    pub fft_size: usize,
    /// Sample rate in Hz.
    pub sample_rate: f64,
}

impl ScaleContext {
    /// Creates a context for the given transform.
    pub const fn new(fft_size: usize, sample_rate: f64) -> Self {
        Self {
            fft_size,
            sample_rate,
        }
    }

    /// Half the sample rate.
    pub fn nyquist(&self) -> f64 {
        self.sample_rate / 2.0
    }
}

/// Frequency band shown on the axis, in Hz.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyRange {
    /// Lowest displayed frequency.
    pub low_hz: f64,
    /// Highest displayed frequency.
    pub high_hz: f64,
}

impl FrequencyRange {
    /// Creates a range; see [`FrequencyRange::validate`].
    pub const fn new(low_hz: f64, high_hz: f64) -> Self {
        Self { low_hz, high_hz }
    }

    /// The whole band from DC to the Nyquist frequency of `sample_rate`.
    pub fn full(sample_rate: f64) -> Self {
        Self::new(0.0, sample_rate / 2.0)
    }

    /// Checks `0 <= low < high <= nyquist`.
    pub fn validate(&self, nyquist: f64) -> SpectralResult<()> {
        let ordered = self.low_hz >= 0.0 && self.low_hz < self.high_hz;
        if !ordered || self.high_hz > nyquist {
            return Err(SpectralError::invalid_parameter(
                "frequency range",
                format!(
                    "{}..{} Hz must satisfy 0 <= low < high <= {nyquist}",
                    self.low_hz, self.high_hz
                ),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// ROW TABLE
// =============================================================================

/// A round-number frequency label positioned in row coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    /// Labelled frequency.
    pub hz: f64,
    /// Fractional row, 0 at the top.
    pub row: f64,
    /// Display text such as `"500"` or `"2k"`.
    pub label: String,
}

/// Display row → spectrogram bin mapping for one scale and display height.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyAxisTable {
    scale: FrequencyScale,
    ctx: ScaleContext,
    range: FrequencyRange,
    scale_low: f64,
    scale_high: f64,
    row_to_bin: Vec<usize>,
}

impl FrequencyAxisTable {
    /// Builds the table covering DC to the Nyquist frequency.
    ///
    /// # Errors
    /// See [`FrequencyAxisTable::build_with_range`].
    pub fn build(
        scale: FrequencyScale,
        height: usize,
        fft_size: usize,
        sample_rate: f64,
    ) -> SpectralResult<Self> {
        Self::build_with_range(
            scale,
            height,
            fft_size,
            sample_rate,
            FrequencyRange::full(sample_rate),
        )
    }

    /// Builds the table for a sub-band of `[0, fs/2]`.
    ///
    /// Row `r` sits at fraction `(H-1-r)/(H-1)` of the scale-domain range,
    /// is converted back to Hz and rounded to the nearest bin, clamped to
    /// `[0, N/2-1]`.
    ///
    /// # Errors
    /// * [`SpectralError::InvalidSize`] if `fft_size` is not a power of two ≥ 2
    /// * [`SpectralError::InvalidParameter`] for a zero height, a non-positive
    ///   sample rate, a range outside `[0, fs/2]`, or the log scale with `fft_size < 4`
    pub fn build_with_range(
        scale: FrequencyScale,
        height: usize,
        fft_size: usize,
        sample_rate: f64,
        range: FrequencyRange,
    ) -> SpectralResult<Self> {
        if height == 0 {
            return Err(SpectralError::invalid_parameter("height", "must be > 0"));
        }
        if fft_size < 2 || !fft_size.is_power_of_two() {
            return Err(SpectralError::invalid_size(fft_size));
        }
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(SpectralError::invalid_parameter(
                "sample_rate",
                format!("must be finite and > 0, got {sample_rate}"),
            ));
        }
        if scale == FrequencyScale::Log && fft_size < 4 {
            return Err(SpectralError::invalid_parameter(
                "fft_size",
                "log scale needs at least 4 points",
            ));
        }
        let ctx = ScaleContext::new(fft_size, sample_rate);
        range.validate(ctx.nyquist())?;

        let scale_low = scale.to_scale(range.low_hz, ctx);
        let scale_high = scale.to_scale(range.high_hz, ctx);
        let max_bin = (fft_size / 2 - 1) as f64;

        let row_to_bin = (0..height)
            .map(|row| {
                let value = lerp(scale_low, scale_high, row_fraction(row, height));
                let bin = hz_to_bin(scale.to_hz(value, ctx), fft_size, sample_rate).round();
                bin.clamp(0.0, max_bin) as usize
            })
            .collect();

        tracing::debug!(%scale, height, fft_size, sample_rate, "built frequency axis table");

        Ok(Self {
            scale,
            ctx,
            range,
            scale_low,
            scale_high,
            row_to_bin,
        })
    }

    /// Scale this table was built for.
    pub const fn scale(&self) -> FrequencyScale {
        self.scale
    }

    /// Number of display rows.
    pub fn height(&self) -> usize {
        self.row_to_bin.len()
    }

    /// FFT size the bins refer to.
    pub const fn fft_size(&self) -> usize {
        self.ctx.fft_size
    }

    /// Sample rate the table was built for.
    pub const fn sample_rate(&self) -> f64 {
        self.ctx.sample_rate
    }

    /// Displayed band.
    pub const fn range(&self) -> FrequencyRange {
        self.range
    }

    /// Bin index for every row, top to bottom.
    pub fn row_to_bin(&self) -> &[usize] {
        &self.row_to_bin
    }

    /// Bin index drawn at `row`.
    pub fn bin_for_row(&self, row: usize) -> Option<usize> {
        self.row_to_bin.get(row).copied()
    }

    /// Frequency in Hz at the centre of `row`, before rounding to a bin.
    pub fn row_to_hz(&self, row: usize) -> Option<f64> {
        let height = self.height();
        (row < height).then(|| {
            let value = lerp(self.scale_low, self.scale_high, row_fraction(row, height));
            self.scale.to_hz(value, self.ctx)
        })
    }

    /// Fractional row at which `freq_hz` is drawn, or `None` outside the range.
    pub fn hz_to_row(&self, freq_hz: f64) -> Option<f64> {
        if freq_hz < self.range.low_hz || freq_hz > self.range.high_hz {
            return None;
        }
        let span = self.scale_high - self.scale_low;
        let fraction = (self.scale.to_scale(freq_hz, self.ctx) - self.scale_low) / span;
        Some((1.0 - fraction) * (self.height() - 1) as f64)
    }

    /// Axis labels for this table's scale, top to bottom.
    pub fn ticks(&self) -> Vec<AxisTick> {
        let mut ticks: Vec<AxisTick> = self
            .scale
            .tick_candidates(self.range.high_hz)
            .into_iter()
            .filter_map(|hz| {
                self.hz_to_row(hz).map(|row| AxisTick {
                    hz,
                    row,
                    label: frequency_label(hz),
                })
            })
            .collect();
        ticks.reverse();
        ticks
    }
}

/// Convenience wrapper: builds a full-range table and returns its ticks.
pub fn axis_ticks(
    scale: FrequencyScale,
    height: usize,
    fft_size: usize,
    sample_rate: f64,
) -> SpectralResult<Vec<AxisTick>> {
    Ok(FrequencyAxisTable::build(scale, height, fft_size, sample_rate)?.ticks())
}

/// Fraction of the range measured from the bottom row.
fn row_fraction(row: usize, height: usize) -> f64 {
    if height <= 1 {
        0.0
    } else {
        (height - 1 - row) as f64 / (height - 1) as f64
    }
}

fn lerp(low: f64, high: f64, t: f64) -> f64 {
    low + t * (high - low)
}

/// Formats a frequency as `"500"`, `"2k"` or `"2.5k"`.
pub fn frequency_label(freq_hz: f64) -> String {
    if freq_hz >= 1000.0 {
        let khz = freq_hz / 1000.0;
        if khz.fract() == 0.0 {
            format!("{khz:.0}k")
        } else {
            format!("{khz:.1}k")
        }
    } else {
        format!("{freq_hz:.0}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx_eq::assert_approx_eq;

    fn test_frequencies() -> impl Iterator<Item = f64> {
        (0..=60).map(|i| 20.0 * 1000.0_f64.powf(i as f64 / 60.0))
    }

    #[test]
    fn test_erb_round_trip() {
        for f in test_frequencies() {
            assert_approx_eq!(erb_to_hz(hz_to_erb(f)), f, 1e-9);
        }
        assert_eq!(hz_to_erb(0.0), 0.0);
    }

    #[test]
    fn test_mel_round_trip() {
        for f in test_frequencies() {
            assert_approx_eq!(mel_to_hz(hz_to_mel(f)), f, 1e-9);
        }
        // 1000 Hz is close to 1000 mel by construction
        assert!((hz_to_mel(1000.0) - 1000.0).abs() < 0.1);
    }

    #[test]
    fn test_bark_round_trip_all_branches() {
        // 100 Hz is below 2 Bark, 1 kHz in the middle, 15 kHz above 20.1 Bark
        assert!(hz_to_bark(100.0) < 2.0);
        assert!((2.0..=20.1).contains(&hz_to_bark(1000.0)));
        assert!(hz_to_bark(15000.0) > 20.1);

        let bare = |f: f64| 26.81 * f / (1960.0 + f) - 0.53;
        assert_approx_eq!(hz_to_bark(1000.0), bare(1000.0), 1e-12);
        assert!(hz_to_bark(100.0) > bare(100.0));
        assert!(hz_to_bark(15000.0) > bare(15000.0));
        for f in test_frequencies() {
            assert_approx_eq!(bark_to_hz(hz_to_bark(f)), f, 1e-9);
        }
    }

    #[test]
    fn test_scales_are_monotonic() {
        let ctx = ScaleContext::new(2048, 44100.0);
        for scale in FrequencyScale::ALL {
            let values: Vec<f64> = test_frequencies().map(|f| scale.to_scale(f, ctx)).collect();
            assert!(values.windows(2).all(|w| w[0] < w[1]), "{scale} not increasing");
            for f in test_frequencies() {
                let back = scale.to_hz(scale.to_scale(f, ctx), ctx);
                assert!((back - f).abs() / f < 1e-9, "{scale}: {f} -> {back}");
            }
        }
    }

    #[test]
    fn test_log_position_endpoints() {
        // DC sits at 0, the last bin N/2 - 1 at 1
        assert_eq!(hz_to_log_position(0.0, 1024, 48000.0), 0.0);
        let last_bin_hz = bin_to_hz(511.0, 1024, 48000.0);
        assert!((hz_to_log_position(last_bin_hz, 1024, 48000.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_linear_table_endpoints_and_monotonic() {
        for &(height, fft_size) in &[(1024usize, 2048usize), (100, 512), (7, 4096), (2, 4)] {
            let table =
                FrequencyAxisTable::build(FrequencyScale::Linear, height, fft_size, 44100.0)
                    .unwrap();
            let bins = table.row_to_bin();
            assert_eq!(bins.len(), height);
            assert_eq!(bins[0], fft_size / 2 - 1);
            assert_eq!(bins[height - 1], 0);
            assert!(bins.windows(2).all(|w| w[0] >= w[1]));
        }
    }

    #[test]
    fn test_every_scale_spans_the_full_band() {
        for scale in FrequencyScale::ALL {
            let table = FrequencyAxisTable::build(scale, 512, 2048, 44100.0).unwrap();
            let bins = table.row_to_bin();
            assert_eq!(bins[0], 1023, "{scale}");
            assert_eq!(bins[511], 0, "{scale}");
            assert!(bins.windows(2).all(|w| w[0] >= w[1]), "{scale}");
        }
    }

    #[test]
    fn test_perceptual_scales_expand_low_frequencies() {
        let linear = FrequencyAxisTable::build(FrequencyScale::Linear, 400, 2048, 44100.0).unwrap();
        let mel = FrequencyAxisTable::build(FrequencyScale::Mel, 400, 2048, 44100.0).unwrap();
        // Halfway down a mel axis is a much lower frequency than halfway down a linear one
        assert!(mel.row_to_bin()[200] < linear.row_to_bin()[200] / 2);
    }

    #[test]
    fn test_table_tracks_sample_rate() {
        let table = FrequencyAxisTable::build(FrequencyScale::Erb, 256, 1024, 16000.0).unwrap();
        assert_eq!(table.row_to_bin()[0], 511);
        assert!((table.row_to_hz(0).unwrap() - 8000.0).abs() < 1e-6);
        assert!(table.row_to_hz(256).is_none());
    }

    #[test]
    fn test_sub_band_range() {
        let range = FrequencyRange::new(1000.0, 4000.0);
        let table =
            FrequencyAxisTable::build_with_range(FrequencyScale::Linear, 100, 1024, 8000.0, range)
                .unwrap();
        // 1 kHz is bin 128, 4 kHz bin 512 (clamped to 511)
        assert_eq!(table.bin_for_row(99), Some(128));
        assert_eq!(table.bin_for_row(0), Some(511));

        let too_high = FrequencyRange::new(0.0, 5000.0);
        assert!(matches!(
            FrequencyAxisTable::build_with_range(FrequencyScale::Mel, 10, 1024, 8000.0, too_high),
            Err(SpectralError::InvalidParameter(_))
        ));
        let inverted = FrequencyRange::new(3000.0, 1000.0);
        assert!(inverted.validate(4000.0).is_err());
    }

    #[test]
    fn test_single_row_table() {
        let table = FrequencyAxisTable::build(FrequencyScale::Bark, 1, 256, 44100.0).unwrap();
        assert_eq!(table.row_to_bin(), &[0]);
    }

    #[test]
    fn test_invalid_table_parameters() {
        assert!(matches!(
            FrequencyAxisTable::build(FrequencyScale::Linear, 0, 1024, 44100.0),
            Err(SpectralError::InvalidParameter(_))
        ));
        assert!(matches!(
            FrequencyAxisTable::build(FrequencyScale::Linear, 10, 1000, 44100.0),
            Err(SpectralError::InvalidSize { size: 1000 })
        ));
        assert!(FrequencyAxisTable::build(FrequencyScale::Linear, 10, 1024, 0.0).is_err());
        assert!(FrequencyAxisTable::build(FrequencyScale::Log, 10, 2, 44100.0).is_err());
        assert!(FrequencyAxisTable::build(FrequencyScale::Linear, 10, 2, 44100.0).is_ok());
    }

    #[test]
    fn test_linear_ticks_every_5khz() {
        let ticks = axis_ticks(FrequencyScale::Linear, 1001, 2048, 44100.0).unwrap();
        let labels: Vec<&str> = ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["20k", "15k", "10k", "5k", "0"]);
        // 0 Hz is the bottom row, 10 kHz sits at 1 - 10000/22050 of the height
        let bottom = ticks.last().unwrap();
        assert!((bottom.row - 1000.0).abs() < 1e-9);
        let ten_k = &ticks[2];
        assert!((ten_k.row - (1.0 - 10000.0 / 22050.0) * 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_log_ticks_are_decades() {
        let ticks = axis_ticks(FrequencyScale::Log, 500, 4096, 48000.0).unwrap();
        let hz: Vec<f64> = ticks.iter().map(|t| t.hz).collect();
        assert_eq!(hz, vec![10000.0, 1000.0, 100.0, 10.0]);
        assert!(ticks.windows(2).all(|w| w[0].row < w[1].row));
    }

    #[test]
    fn test_perceptual_ticks() {
        let table = FrequencyAxisTable::build(FrequencyScale::Mel, 300, 2048, 44100.0).unwrap();
        let ticks = table.ticks();
        let labels: Vec<&str> = ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["20k", "10k", "5k", "2k", "1k", "500", "200", "100", "50", "20", "10"]
        );
        assert!(ticks.iter().all(|t| (0.0..=299.0).contains(&t.row)));
        assert!(ticks.windows(2).all(|w| w[0].row < w[1].row));
    }

    #[test]
    fn test_frequency_labels() {
        assert_eq!(frequency_label(0.0), "0");
        assert_eq!(frequency_label(500.0), "500");
        assert_eq!(frequency_label(2000.0), "2k");
        assert_eq!(frequency_label(2500.0), "2.5k");
        assert_eq!(frequency_label(20000.0), "20k");
    }

    #[test]
    fn test_scale_parsing() {
        for scale in FrequencyScale::ALL {
            assert_eq!(scale.name().parse::<FrequencyScale>().unwrap(), scale);
        }
        assert!("octave".parse::<FrequencyScale>().is_err());
    }
}
