//! Cached analysis state for one loaded waveform.
//!
//! An [`AnalysisSession`] owns the waveform, the current [`ViewerConfig`] and
//! the two derived structures, the [`Spectrogram`] and the
//! [`FrequencyAxisTable`]. Each derived structure carries its own
//! [`Freshness`]; setters mark only the structures they affect as stale and
//! reads recompute synchronously when needed.
//!
//! | change | spectrogram | axis table |
//! |---|---|---|
//! | window type / support, hop size | stale | - |
//! | FFT size | stale | stale |
//! | scale, height, frequency range | - | stale |
//! | dB floor | - | - |
//! | [`AnalysisSession::reload`] | stale | stale |

use crate::config::{AnalysisParams, DisplayParams, ViewerConfig};
use crate::render::{DbFloor, RgbImage, render_rgb};
use crate::scale::{AxisTick, FrequencyAxisTable, FrequencyRange, FrequencyScale};
use crate::spectrogram::{Spectrogram, SpectrogramBuilder};
use crate::traits::SpectralAnalysis;
use crate::waveform::Waveform;
use crate::window::{WindowSelection, WindowType};
use crate::{SpectralError, SpectralResult};

/// Whether a derived structure matches the current parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Parameters changed since the last computation, or it failed
    Stale,
    /// Being recomputed
    Recomputing,
    /// Up to date
    Fresh,
}

impl Freshness {
    /// Check if the structure can be read without recomputing
    pub fn is_fresh(self) -> bool {
        matches!(self, Self::Fresh)
    }
}

/// A lazily recomputed value. `Fresh` always has a value; a failed
/// computation leaves `Stale` with none.
#[derive(Debug, Clone)]
struct Derived<T> {
    name: &'static str,
    state: Freshness,
    value: Option<T>,
}

impl<T> Derived<T> {
    const fn stale(name: &'static str) -> Self {
        Self {
            name,
            state: Freshness::Stale,
            value: None,
        }
    }

    fn invalidate(&mut self) {
        if self.state != Freshness::Stale {
            tracing::trace!(structure = self.name, "invalidated");
        }
        self.state = Freshness::Stale;
        self.value = None;
    }

    fn get_or_compute(
        &mut self,
        compute: impl FnOnce() -> SpectralResult<T>,
    ) -> SpectralResult<&T> {
        let value = match self.value.take() {
            Some(value) if self.state.is_fresh() => value,
            _ => {
                self.state = Freshness::Recomputing;
                tracing::trace!(structure = self.name, "recomputing");
                match compute() {
                    Ok(value) => value,
                    Err(e) => {
                        self.state = Freshness::Stale;
                        tracing::trace!(structure = self.name, error = %e, "recompute failed");
                        return Err(e);
                    }
                }
            }
        };
        self.state = Freshness::Fresh;
        Ok(self.value.insert(value))
    }
}

/// Cursor readout at one spectrogram pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Readout {
    /// Frame index (image column).
    pub frame: usize,
    /// Display row.
    pub row: usize,
    /// Time of the frame centre in seconds.
    pub time: f64,
    /// Frequency at the row centre in Hz.
    pub row_hz: f64,
    /// Spectrogram bin drawn at the row.
    pub bin: usize,
    /// Centre frequency of that bin in Hz.
    pub bin_hz: f64,
    /// Level of that bin in dB.
    pub db: f64,
}

/// One waveform plus its cached spectrogram and axis table.
#[derive(Debug, Clone)]
pub struct AnalysisSession {
    waveform: Waveform,
    analysis: AnalysisParams,
    display: DisplayParams,
    window_selection: WindowSelection,
    spectrogram: Derived<Spectrogram>,
    axis_table: Derived<FrequencyAxisTable>,
}

impl AnalysisSession {
    /// Creates a session. Nothing is computed until first read.
    ///
    /// The waveform is re-padded if its margin is narrower than half the FFT size.
    ///
    /// # Errors
    /// Any [`ViewerConfig::validate`] error, or an invalid frequency range for
    /// the waveform's Nyquist frequency.
    pub fn new(waveform: Waveform, config: ViewerConfig) -> SpectralResult<Self> {
        config.validate()?;
        if let Some(range) = config.display.range {
            range.validate(waveform.nyquist())?;
        }
        let mut session = Self {
            waveform,
            analysis: config.analysis,
            display: config.display,
            window_selection: WindowSelection::Requested(config.analysis.window_type),
            spectrogram: Derived::stale("spectrogram"),
            axis_table: Derived::stale("axis table"),
        };
        session.ensure_margin();
        Ok(session)
    }

    /// Creates a session with the default configuration.
    pub fn with_defaults(waveform: Waveform) -> SpectralResult<Self> {
        Self::new(waveform, ViewerConfig::default())
    }

    /// The loaded waveform.
    pub const fn waveform(&self) -> &Waveform {
        &self.waveform
    }

    /// Current analysis parameters.
    pub const fn analysis(&self) -> &AnalysisParams {
        &self.analysis
    }

    /// Current display parameters.
    pub const fn display(&self) -> &DisplayParams {
        &self.display
    }

    /// Snapshot of the whole configuration.
    pub const fn config(&self) -> ViewerConfig {
        ViewerConfig {
            analysis: self.analysis,
            display: self.display,
        }
    }

    /// How the current window was selected.
    pub const fn window_selection(&self) -> &WindowSelection {
        &self.window_selection
    }

    /// Freshness of the spectrogram.
    pub const fn spectrogram_state(&self) -> Freshness {
        self.spectrogram.state
    }

    /// Freshness of the axis table.
    pub const fn axis_table_state(&self) -> Freshness {
        self.axis_table.state
    }

    /// True when any derived structure needs recomputing.
    pub fn is_modified(&self) -> bool {
        !(self.spectrogram.state.is_fresh() && self.axis_table.state.is_fresh())
    }

    /// Replaces the waveform and invalidates everything.
    ///
    /// # Errors
    /// [`SpectralError::InvalidParameter`] when the current frequency range
    /// exceeds the new waveform's Nyquist frequency. The session is left
    /// unchanged.
    pub fn reload(&mut self, waveform: Waveform) -> SpectralResult<()> {
        if let Some(range) = self.display.range {
            range.validate(waveform.nyquist())?;
        }
        tracing::debug!(
            sample_rate = waveform.sample_rate(),
            samples = waveform.sample_count(),
            "reloaded waveform"
        );
        self.waveform = waveform;
        self.ensure_margin();
        self.spectrogram.invalidate();
        self.axis_table.invalidate();
        Ok(())
    }

    /// Sets the analysis window.
    pub fn set_window_type(&mut self, window_type: WindowType) {
        self.window_selection = WindowSelection::Requested(window_type);
        if self.analysis.window_type != window_type {
            self.analysis.window_type = window_type;
            self.spectrogram.invalidate();
        }
    }

    /// Selects the window by name, falling back to Rect for unknown names.
    pub fn select_window(&mut self, selector: &str) -> &WindowSelection {
        self.apply_selection(WindowSelection::resolve(selector))
    }

    /// Selects the window by list position, falling back to Rect out of range.
    pub fn select_window_index(&mut self, index: i64) -> &WindowSelection {
        self.apply_selection(WindowSelection::resolve_index(index))
    }

    fn apply_selection(&mut self, selection: WindowSelection) -> &WindowSelection {
        let window_type = selection.window_type();
        self.set_window_type(window_type);
        self.window_selection = selection;
        &self.window_selection
    }

    /// Sets the window support; `None` uses the full FFT size.
    ///
    /// # Errors
    /// [`SpectralError::InvalidWindowSupport`] for 0 or a support wider than the FFT.
    pub fn set_window_support(&mut self, support: Option<usize>) -> SpectralResult<()> {
        self.update_analysis(AnalysisParams {
            window_support: support,
            ..self.analysis
        })
    }

    /// Sets the FFT size, re-padding the waveform if needed.
    ///
    /// # Errors
    /// [`SpectralError::InvalidSize`], or [`SpectralError::InvalidWindowSupport`]
    /// when an explicit support no longer fits.
    pub fn set_fft_size(&mut self, fft_size: usize) -> SpectralResult<()> {
        self.update_analysis(AnalysisParams {
            fft_size,
            ..self.analysis
        })
    }

    /// Sets the hop size.
    pub fn set_hop_size(&mut self, hop_size: usize) -> SpectralResult<()> {
        self.update_analysis(AnalysisParams {
            hop_size,
            ..self.analysis
        })
    }

    /// Picks the hop so the image is about `width` columns wide, and returns it.
    pub fn fit_hop_to_width(&mut self, width: usize) -> SpectralResult<usize> {
        let hop_size = AnalysisParams::hop_for_width(self.waveform.sample_count(), width)?;
        self.set_hop_size(hop_size)?;
        Ok(hop_size)
    }

    /// Replaces all analysis parameters at once.
    pub fn set_analysis(&mut self, params: AnalysisParams) -> SpectralResult<()> {
        self.update_analysis(params)?;
        self.window_selection = WindowSelection::Requested(params.window_type);
        Ok(())
    }

    fn update_analysis(&mut self, params: AnalysisParams) -> SpectralResult<()> {
        params.validate()?;
        if params == self.analysis {
            return Ok(());
        }
        let fft_changed = params.fft_size != self.analysis.fft_size;
        self.analysis = params;
        self.spectrogram.invalidate();
        if fft_changed {
            self.ensure_margin();
            self.axis_table.invalidate();
        }
        Ok(())
    }

    /// Sets the frequency scale.
    pub fn set_scale(&mut self, scale: FrequencyScale) {
        if self.display.scale != scale {
            self.display.scale = scale;
            self.axis_table.invalidate();
        }
    }

    /// Sets the display height in rows.
    pub fn set_height(&mut self, height: usize) -> SpectralResult<()> {
        if height == 0 {
            return Err(SpectralError::invalid_parameter("height", "must be > 0"));
        }
        if self.display.height != height {
            self.display.height = height;
            self.axis_table.invalidate();
        }
        Ok(())
    }

    /// Narrows the displayed band; `None` shows DC to Nyquist.
    ///
    /// # Errors
    /// [`SpectralError::InvalidParameter`] for a range outside `[0, fs/2]`.
    pub fn set_range(&mut self, range: Option<FrequencyRange>) -> SpectralResult<()> {
        if let Some(range) = range {
            range.validate(self.waveform.nyquist())?;
        }
        if self.display.range != range {
            self.display.range = range;
            self.axis_table.invalidate();
        }
        Ok(())
    }

    /// Sets the colour floor. Affects rendering only.
    pub fn set_floor(&mut self, floor: DbFloor) -> SpectralResult<()> {
        floor.validate()?;
        self.display.floor = floor;
        Ok(())
    }

    fn ensure_margin(&mut self) {
        let required = self.analysis.required_margin();
        if self.waveform.margin() < required {
            tracing::debug!(
                margin = self.waveform.margin(),
                required,
                "re-padding waveform"
            );
            self.waveform = self.waveform.with_margin(required);
        }
    }

    /// The spectrogram, recomputed if stale.
    pub fn spectrogram(&mut self) -> SpectralResult<&Spectrogram> {
        self.spectrogram.get_or_compute(|| {
            SpectrogramBuilder::from_params(&self.analysis)?.analyze_waveform(&self.waveform)
        })
    }

    /// The row → bin table, rebuilt if stale.
    pub fn axis_table(&mut self) -> SpectralResult<&FrequencyAxisTable> {
        self.axis_table
            .get_or_compute(|| self.waveform.axis_table(&self.analysis, &self.display))
    }

    /// Recomputes whatever is stale.
    pub fn refresh(&mut self) -> SpectralResult<()> {
        self.spectrogram()?;
        self.axis_table()?;
        Ok(())
    }

    /// Axis ticks for the current scale and height.
    pub fn ticks(&mut self) -> SpectralResult<Vec<AxisTick>> {
        Ok(self.axis_table()?.ticks())
    }

    /// Renders the current spectrogram as an RGB image.
    pub fn render(&mut self) -> SpectralResult<RgbImage> {
        let spectrogram = self.spectrogram.get_or_compute(|| {
            SpectrogramBuilder::from_params(&self.analysis)?.analyze_waveform(&self.waveform)
        })?;
        let table = self
            .axis_table
            .get_or_compute(|| self.waveform.axis_table(&self.analysis, &self.display))?;
        render_rgb(spectrogram, table, self.display.floor)
    }

    /// Values under the cursor at image column `frame` and row `row`.
    ///
    /// # Errors
    /// [`SpectralError::InvalidParameter`] when the position is outside the image.
    pub fn readout(&mut self, frame: usize, row: usize) -> SpectralResult<Readout> {
        let (bin, row_hz) = {
            let table = self.axis_table()?;
            match (table.bin_for_row(row), table.row_to_hz(row)) {
                (Some(bin), Some(hz)) => (bin, hz),
                _ => {
                    return Err(SpectralError::invalid_parameter(
                        "row",
                        format!("{row} is outside the {}-row display", table.height()),
                    ));
                }
            }
        };

        let spectrogram = self.spectrogram()?;
        if frame >= spectrogram.frame_count() {
            return Err(SpectralError::invalid_parameter(
                "frame",
                format!("{frame} is outside {} frames", spectrogram.frame_count()),
            ));
        }

        Ok(Readout {
            frame,
            row,
            time: spectrogram.frame_time(frame),
            row_hz,
            bin,
            bin_hz: spectrogram.bin_frequency(bin),
            db: spectrogram.magnitude_db(frame, bin),
        })
    }
}
