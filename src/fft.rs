//! Fixed-size radix-2 FFT.
//!
//! An [`FftPlan`] precomputes everything that depends only on the transform
//! size: the bit-reversal permutation and the `N/2` twiddle factors. Executing
//! a plan runs `log2(N)` in-place butterfly stages over the natural-order input
//! and then scatters the result through the bit-reversal table, dividing every
//! output bin by the analysis window's area.
//!
//! Sizes are validated when the plan is built, never when it is executed.

use crate::{SpectralError, SpectralResult};
use num_complex::Complex;
use std::f64::consts::PI;

/// Precomputed tables for one power-of-two transform size.
#[derive(Debug, Clone, PartialEq)]
pub struct FftPlan {
    size: usize,
    log2_size: u32,
    bit_reversal: Vec<usize>,
    twiddles: Vec<Complex<f64>>,
}

impl FftPlan {
    /// Builds a plan for an `size`-point transform.
    ///
    /// # Errors
    /// [`SpectralError::InvalidSize`] unless `size` is a power of two and at least 2.
    pub fn new(size: usize) -> SpectralResult<Self> {
        if size < 2 || !size.is_power_of_two() {
            return Err(SpectralError::invalid_size(size));
        }
        let log2_size = size.trailing_zeros();

        let plan = Self {
            size,
            log2_size,
            bit_reversal: bit_reversal_table(size, log2_size),
            twiddles: twiddle_table(size),
        };
        tracing::debug!(size, stages = log2_size, "built FFT plan");
        Ok(plan)
    }

    /// Transform size `N`.
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Number of butterfly stages, `log2(N)`.
    pub const fn stages(&self) -> u32 {
        self.log2_size
    }

    /// Number of non-redundant output bins for real input, `N/2`.
    pub const fn bin_count(&self) -> usize {
        self.size / 2
    }

    /// Bit-reversal permutation of `[0, N)`.
    pub fn bit_reversal_table(&self) -> &[usize] {
        &self.bit_reversal
    }

    /// Twiddle factors `exp(-2πi·k/N)` for `k ∈ [0, N/2)`.
    pub fn twiddles(&self) -> &[Complex<f64>] {
        &self.twiddles
    }

    /// Centre frequency of bin `k` in Hz, `k·fs/N`.
    pub fn bin_frequency(&self, bin: usize, sample_rate: f64) -> f64 {
        bin as f64 * sample_rate / self.size as f64
    }

    /// Transforms already-windowed real samples into `out`.
    ///
    /// Every output bin is divided by `window_area`.
    ///
    /// # Arguments
    /// * `windowed` - `N` real samples, already multiplied by the analysis window
    /// * `window_area` - Sum of the window coefficients
    /// * `out` - Destination for the `N` complex bins in natural frequency order
    ///
    /// # Errors
    /// [`SpectralError::DimensionMismatch`] when a buffer is not `N` long,
    /// [`SpectralError::InvalidParameter`] when the area is not finite and positive.
    pub fn execute(
        &self,
        windowed: &[f64],
        window_area: f64,
        out: &mut [Complex<f64>],
    ) -> SpectralResult<()> {
        if windowed.len() != self.size {
            return Err(SpectralError::dimension_mismatch(
                "FFT input length",
                self.size,
                windowed.len(),
            ));
        }
        let mut work: Vec<Complex<f64>> = windowed.iter().map(|&x| Complex::new(x, 0.0)).collect();
        self.execute_complex(&mut work, window_area, out)
    }

    /// Complex-input variant of [`FftPlan::execute`]; `work` is used as scratch.
    pub fn execute_complex(
        &self,
        work: &mut [Complex<f64>],
        window_area: f64,
        out: &mut [Complex<f64>],
    ) -> SpectralResult<()> {
        if work.len() != self.size {
            return Err(SpectralError::dimension_mismatch(
                "FFT input length",
                self.size,
                work.len(),
            ));
        }
        if out.len() != self.size {
            return Err(SpectralError::dimension_mismatch(
                "FFT output length",
                self.size,
                out.len(),
            ));
        }
        if !(window_area.is_finite() && window_area > 0.0) {
            return Err(SpectralError::invalid_parameter(
                "window_area",
                format!("must be finite and > 0, got {window_area}"),
            ));
        }

        self.butterflies(work);

        for (&value, &target) in work.iter().zip(&self.bit_reversal) {
            out[target] = value / window_area;
        }
        Ok(())
    }

    /// Allocating convenience wrapper around [`FftPlan::execute`].
    pub fn transform(&self, windowed: &[f64], window_area: f64) -> SpectralResult<Vec<Complex<f64>>> {
        let mut out = vec![Complex::new(0.0, 0.0); self.size];
        self.execute(windowed, window_area, &mut out)?;
        Ok(out)
    }

    /// In-place decimation-in-frequency passes; leaves `work` in bit-reversed order.
    fn butterflies(&self, work: &mut [Complex<f64>]) {
        for stage in 0..self.log2_size {
            let groups = 1usize << stage;
            let span = self.size >> (stage + 1);
            for group in 0..groups {
                let base = group * 2 * span;
                for k in 0..span {
                    let a = base + k;
                    let b = a + span;
                    let first = work[a];
                    work[a] = first + work[b];
                    work[b] = (first - work[b]) * self.twiddles[k * groups];
                }
            }
        }
    }
}

/// Reverses the low `bits` bits of every index in `[0, size)`.
fn bit_reversal_table(size: usize, bits: u32) -> Vec<usize> {
    (0..size)
        .map(|i| i.reverse_bits() >> (usize::BITS - bits))
        .collect()
}

fn twiddle_table(size: usize) -> Vec<Complex<f64>> {
    (0..size / 2)
        .map(|k| Complex::from_polar(1.0, -2.0 * PI * k as f64 / size as f64))
        .collect()
}
