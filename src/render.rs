//! Magnitude to colour conversion for the spectrogram image.
//!
//! Pixels are computed as `ramp(normalize_db(20·log10|X|, upper, lower))`
//! where `upper` is the spectrogram's peak level and `lower` comes from a
//! [`DbFloor`].

use crate::scale::FrequencyAxisTable;
use crate::spectrogram::Spectrogram;
use crate::{SpectralError, SpectralResult};
use serde::{Deserialize, Serialize};

/// Default lower end of the colour ramp in dB.
pub const DEFAULT_FLOOR_DB: f64 = -100.0;

/// Lower end of the dB range mapped onto the colour ramp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DbFloor {
    /// Fixed level in dB, independent of the signal.
    Absolute {
        /// Floor level in dB.
        db: f64,
    },
    /// Level `db` decibels below the spectrogram peak.
    BelowPeak {
        /// Dynamic range in dB, > 0.
        db: f64,
    },
}

impl DbFloor {
    /// Resolves the floor against the spectrogram's peak level.
    pub fn resolve(self, upper_db: f64) -> f64 {
        match self {
            DbFloor::Absolute { db } => db,
            DbFloor::BelowPeak { db } => upper_db - db,
        }
    }

    /// Checks that the level is finite, and positive for [`DbFloor::BelowPeak`].
    pub fn validate(&self) -> SpectralResult<()> {
        match *self {
            DbFloor::Absolute { db } if db.is_finite() => Ok(()),
            DbFloor::BelowPeak { db } if db.is_finite() && db > 0.0 => Ok(()),
            DbFloor::Absolute { db } | DbFloor::BelowPeak { db } => Err(
                SpectralError::invalid_parameter("floor", format!("invalid dB level {db}")),
            ),
        }
    }
}

impl Default for DbFloor {
    fn default() -> Self {
        DbFloor::Absolute {
            db: DEFAULT_FLOOR_DB,
        }
    }
}

/// `20·log10(magnitude)`; `-inf` for zero.
pub fn magnitude_to_db(magnitude: f64) -> f64 {
    20.0 * magnitude.log10()
}

/// Maps `db` linearly from `[lower, upper]` onto `[0, 1]`, clamping outside.
///
/// Returns 0 when the range is empty or `db` is NaN.
pub fn normalize_db(db: f64, upper: f64, lower: f64) -> f64 {
    if db.is_nan() || upper.is_nan() || lower.is_nan() || upper <= lower {
        return 0.0;
    }
    ((db - lower) / (upper - lower)).clamp(0.0, 1.0)
}

/// Seven-segment colour ramp: black, blue, cyan, green-yellow, red, magenta, white.
///
/// Input is clamped to `[0, 1]`.
pub fn ramp(x: f64) -> [u8; 3] {
    let x = if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) };
    let seg = |k: f64| k / 7.0;
    // Linear ramp from 0 at `from` to 255 at `to`
    let rise = |from: f64, to: f64| 255.0 * (x - from) / (to - from);

    let r = if x < seg(3.0) {
        0.0
    } else if x < seg(4.0) {
        rise(seg(3.0), seg(4.0))
    } else {
        255.0
    };

    let g = if x < seg(1.0) {
        0.0
    } else if x < seg(2.0) {
        rise(seg(1.0), seg(2.0))
    } else if x < seg(4.0) {
        255.0
    } else if x < seg(5.0) {
        rise(seg(5.0), seg(4.0))
    } else if x < seg(6.0) {
        0.0
    } else {
        rise(seg(6.0), seg(7.0))
    };

    let b = if x < seg(1.0) {
        rise(0.0, seg(1.0))
    } else if x < seg(2.0) {
        255.0
    } else if x < seg(3.0) {
        rise(seg(3.0), seg(2.0))
    } else if x < seg(5.0) {
        0.0
    } else if x < seg(6.0) {
        rise(seg(5.0), seg(6.0))
    } else {
        255.0
    };

    [to_channel(r), to_channel(g), to_channel(b)]
}

fn to_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Row-major RGB raster, 3 bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    /// Width in pixels, one column per frame.
    pub width: usize,
    /// Height in pixels, one row per display row.
    pub height: usize,
    /// `width * height * 3` bytes, top row first.
    pub data: Vec<u8>,
}

impl RgbImage {
    /// Colour at column `x`, row `y`.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 3;
        Some([self.data[i], self.data[i + 1], self.data[i + 2]])
    }
}

/// Renders the spectrogram through the row table: column `f` is frame `f`,
/// row `r` shows bin `table.row_to_bin()[r]`.
///
/// # Errors
/// [`SpectralError::DimensionMismatch`] when the table was built for a different FFT size.
pub fn render_rgb(
    spectrogram: &Spectrogram,
    table: &FrequencyAxisTable,
    floor: DbFloor,
) -> SpectralResult<RgbImage> {
    if table.fft_size() != spectrogram.fft_size() {
        return Err(SpectralError::dimension_mismatch(
            "axis table FFT size",
            spectrogram.fft_size(),
            table.fft_size(),
        ));
    }
    floor.validate()?;

    let upper = spectrogram.max_db();
    let lower = floor.resolve(upper);
    let width = spectrogram.frame_count();
    let height = table.height();

    let mut data = vec![0u8; width * height * 3];
    for (row, &bin) in table.row_to_bin().iter().enumerate() {
        for frame in 0..width {
            let db = magnitude_to_db(spectrogram.magnitude(frame, bin));
            let rgb = ramp(normalize_db(db, upper, lower));
            let i = (row * width + frame) * 3;
            data[i..i + 3].copy_from_slice(&rgb);
        }
    }

    tracing::debug!(width, height, upper, lower, "rendered spectrogram image");

    Ok(RgbImage {
        width,
        height,
        data,
    })
}
