//! Margin-padded mono waveforms.
//!
//! The analysis reads frames centred on every hop position, including the very
//! first and last samples. [`Waveform`] therefore stores `margin` zero samples
//! before and after the signal; as long as `margin >= fft_size / 2`, frame
//! extraction never leaves the buffer.

use crate::{SpectralError, SpectralResult};
use num_traits::ToPrimitive;
#[cfg(feature = "wav")]
use std::path::Path;

/// Default padding, enough for FFT sizes up to 2048.
pub const DEFAULT_MARGIN: usize = 1024;

/// A normalized mono signal with zero padding on both ends.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    sample_rate: u32,
    sample_count: usize,
    margin: usize,
    samples: Vec<f64>,
}

impl Waveform {
    /// Creates a waveform from unpadded samples in `[-1, 1]`.
    ///
    /// # Arguments
    /// * `samples` - Signal samples, any numeric type convertible to `f64`
    /// * `sample_rate` - Sample rate in Hz
    /// * `margin` - Number of zero samples to add on each side
    ///
    /// # Errors
    /// [`SpectralError::EmptyOrMalformedWaveform`] for an empty or non-finite signal,
    /// [`SpectralError::InvalidParameter`] for a zero sample rate.
    pub fn from_samples<T: ToPrimitive>(
        samples: &[T],
        sample_rate: u32,
        margin: usize,
    ) -> SpectralResult<Self> {
        if samples.is_empty() {
            return Err(SpectralError::malformed_waveform("no samples"));
        }
        validate_sample_rate(sample_rate)?;

        let mut padded = vec![0.0; samples.len() + 2 * margin];
        for (i, (slot, sample)) in padded[margin..].iter_mut().zip(samples).enumerate() {
            *slot = sample
                .to_f64()
                .filter(|x| x.is_finite())
                .ok_or_else(|| SpectralError::malformed_waveform(format!("sample {i} is not a finite number")))?;
        }

        Ok(Self {
            sample_rate,
            sample_count: samples.len(),
            margin,
            samples: padded,
        })
    }

    /// Wraps an already padded buffer of `sample_count + 2 * margin` samples.
    ///
    /// # Errors
    /// [`SpectralError::EmptyOrMalformedWaveform`] when the buffer leaves no
    /// signal between the margins, the padding is not zero, or a sample is
    /// NaN or infinite.
    pub fn from_padded(padded: Vec<f64>, sample_rate: u32, margin: usize) -> SpectralResult<Self> {
        validate_sample_rate(sample_rate)?;
        let sample_count = padded
            .len()
            .checked_sub(2 * margin)
            .filter(|&n| n > 0)
            .ok_or_else(|| {
                SpectralError::malformed_waveform(format!(
                    "{} samples cannot hold a margin of {margin} on each side",
                    padded.len()
                ))
            })?;
        let padding_is_zero = padded[..margin]
            .iter()
            .chain(&padded[margin + sample_count..])
            .all(|&x| x == 0.0);
        if !padding_is_zero {
            return Err(SpectralError::malformed_waveform("margin samples must be zero"));
        }
        if let Some(i) = padded.iter().position(|x| !x.is_finite()) {
            return Err(SpectralError::malformed_waveform(format!(
                "sample {} is not a finite number",
                i - margin
            )));
        }

        Ok(Self {
            sample_rate,
            sample_count,
            margin,
            samples: padded,
        })
    }

    /// Decodes a mono WAV file and pads it with `margin` zeros on each side.
    ///
    /// Integer samples of `b` bits are normalized as `(s + 0.5) / 2^(b-1)`,
    /// which keeps the signal symmetric around zero; float samples are used as-is.
    ///
    /// # Errors
    /// [`SpectralError::UnsupportedFormat`] for multi-channel files,
    /// [`SpectralError::Wav`] for decoding failures.
    #[cfg(feature = "wav")]
    pub fn from_wav(path: impl AsRef<Path>, margin: usize) -> SpectralResult<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), margin, "reading WAV file");
        let reader = hound::WavReader::open(path)?;
        Self::from_wav_reader(reader, margin)
    }

    /// Decodes a mono WAV stream; see [`Waveform::from_wav`].
    #[cfg(feature = "wav")]
    pub fn from_wav_reader<R: std::io::Read>(
        reader: hound::WavReader<R>,
        margin: usize,
    ) -> SpectralResult<Self> {
        let spec = reader.spec();
        if spec.channels != 1 {
            return Err(SpectralError::UnsupportedFormat(format!(
                "expected mono audio, got {} channels",
                spec.channels
            )));
        }

        let samples: Vec<f64> = match spec.sample_format {
            hound::SampleFormat::Int => {
                let full_scale = f64::from(1u32 << (spec.bits_per_sample - 1));
                reader
                    .into_samples::<i32>()
                    .map(|s| s.map(|s| (f64::from(s) + 0.5) / full_scale))
                    .collect::<Result<_, _>>()?
            }
            hound::SampleFormat::Float => reader
                .into_samples::<f32>()
                .map(|s| s.map(f64::from))
                .collect::<Result<_, _>>()?,
        };

        tracing::debug!(
            sample_rate = spec.sample_rate,
            samples = samples.len(),
            bits = spec.bits_per_sample,
            "decoded WAV"
        );
        Self::from_samples(&samples, spec.sample_rate, margin)
    }

    /// Returns a copy padded with a different margin.
    pub fn with_margin(&self, margin: usize) -> Self {
        let mut samples = vec![0.0; self.sample_count + 2 * margin];
        samples[margin..margin + self.sample_count].copy_from_slice(self.signal());
        Self {
            sample_rate: self.sample_rate,
            sample_count: self.sample_count,
            margin,
            samples,
        }
    }

    /// Sample rate in Hz.
    pub const fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of signal samples, excluding padding.
    pub const fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Zero samples on each side of the signal.
    pub const fn margin(&self) -> usize {
        self.margin
    }

    /// Duration of the signal in seconds.
    pub fn duration(&self) -> f64 {
        self.sample_count as f64 / f64::from(self.sample_rate)
    }

    /// Nyquist frequency in Hz.
    pub fn nyquist(&self) -> f64 {
        f64::from(self.sample_rate) / 2.0
    }

    /// The whole padded buffer.
    pub fn padded(&self) -> &[f64] {
        &self.samples
    }

    /// The signal without padding.
    pub fn signal(&self) -> &[f64] {
        &self.samples[self.margin..self.margin + self.sample_count]
    }

    /// Converts the signal to 16-bit PCM for playback.
    ///
    /// Each sample maps to `floor(x * 32767 + 0.5)`, clamped to the `i16` range.
    pub fn to_pcm16(&self) -> Vec<i16> {
        self.signal().iter().map(|&x| sample_to_pcm16(x)).collect()
    }

    /// Little-endian byte stream of [`Waveform::to_pcm16`], as audio sinks expect it.
    pub fn to_pcm16_le_bytes(&self) -> Vec<u8> {
        self.to_pcm16()
            .into_iter()
            .flat_map(i16::to_le_bytes)
            .collect()
    }

    /// Per-column `(min, max)` pairs for drawing the waveform strip.
    ///
    /// Column `i` covers samples `[i·n/columns, (i+1)·n/columns)`; when there
    /// are more columns than samples each column covers at least one sample.
    ///
    /// # Errors
    /// [`SpectralError::InvalidParameter`] when `columns == 0`.
    pub fn envelope(&self, columns: usize) -> SpectralResult<Vec<(f64, f64)>> {
        if columns == 0 {
            return Err(SpectralError::invalid_parameter("columns", "must be > 0"));
        }
        let signal = self.signal();
        let n = signal.len();
        let bound = |i: usize| (i as u128 * n as u128 / columns as u128) as usize;

        Ok((0..columns)
            .map(|i| {
                let start = bound(i).min(n - 1);
                let end = bound(i + 1).clamp(start + 1, n);
                signal[start..end]
                    .iter()
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
                        (lo.min(x), hi.max(x))
                    })
            })
            .collect())
    }
}

fn validate_sample_rate(sample_rate: u32) -> SpectralResult<()> {
    if sample_rate == 0 {
        return Err(SpectralError::invalid_parameter("sample_rate", "must be > 0"));
    }
    Ok(())
}

/// Converts one normalized sample to 16-bit PCM with clamping.
pub fn sample_to_pcm16(x: f64) -> i16 {
    let scaled = (x * f64::from(i16::MAX) + 0.5).floor();
    scaled.clamp(f64::from(i16::MIN), f64::from(i16::MAX)) as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_samples_pads_both_sides() {
        let waveform = Waveform::from_samples(&[0.5f32, -0.5, 0.25], 8000, 4).unwrap();
        assert_eq!(waveform.sample_count(), 3);
        assert_eq!(waveform.margin(), 4);
        assert_eq!(waveform.padded().len(), 11);
        assert_eq!(waveform.signal(), &[0.5, -0.5, 0.25]);
        assert!(waveform.padded()[..4].iter().all(|&x| x == 0.0));
        assert!(waveform.padded()[7..].iter().all(|&x| x == 0.0));
        assert_eq!(waveform.nyquist(), 4000.0);
    }

    #[test]
    fn test_from_samples_accepts_integer_types() {
        let waveform = Waveform::from_samples(&[1i16, -2, 3], 100, 0).unwrap();
        assert_eq!(waveform.signal(), &[1.0, -2.0, 3.0]);
        assert!((waveform.duration() - 0.03).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_malformed_input() {
        let empty: [f64; 0] = [];
        assert!(matches!(
            Waveform::from_samples(&empty, 44100, 16),
            Err(SpectralError::EmptyOrMalformedWaveform(_))
        ));
        assert!(matches!(
            Waveform::from_samples(&[0.0, f64::NAN], 44100, 16),
            Err(SpectralError::EmptyOrMalformedWaveform(_))
        ));
        assert!(matches!(
            Waveform::from_samples(&[0.0], 0, 16),
            Err(SpectralError::InvalidParameter(_))
        ));
        assert!(Waveform::from_padded(vec![0.0; 8], 44100, 4).is_err());
        assert!(Waveform::from_padded(vec![1.0, 0.0, 0.5, 0.0], 44100, 1).is_err());
    }

    #[test]
    fn test_from_padded_rejects_non_finite_samples() {
        let mut padded = vec![0.0; 640 + 64];
        padded[32 + 100] = f64::NAN;
        assert!(matches!(
            Waveform::from_padded(padded, 8000, 32),
            Err(SpectralError::EmptyOrMalformedWaveform(_))
        ));
        assert!(matches!(
            Waveform::from_padded(vec![0.0, f64::INFINITY, 0.0], 8000, 1),
            Err(SpectralError::EmptyOrMalformedWaveform(_))
        ));
    }

    #[test]
    fn test_from_padded_and_with_margin() {
        let waveform = Waveform::from_padded(vec![0.0, 0.3, 0.4, 0.0], 100, 1).unwrap();
        assert_eq!(waveform.sample_count(), 2);

        let wider = waveform.with_margin(3);
        assert_eq!(wider.padded().len(), 8);
        assert_eq!(wider.signal(), waveform.signal());
    }

    #[test]
    fn test_pcm16_conversion_clamps() {
        assert_eq!(sample_to_pcm16(0.0), 0);
        assert_eq!(sample_to_pcm16(1.0), 32767);
        assert_eq!(sample_to_pcm16(-1.0), -32767);
        assert_eq!(sample_to_pcm16(2.0), i16::MAX);
        assert_eq!(sample_to_pcm16(-2.0), i16::MIN);
        assert_eq!(sample_to_pcm16(0.5), 16384);

        let waveform = Waveform::from_samples(&[1.0, -1.0], 100, 2).unwrap();
        assert_eq!(waveform.to_pcm16(), vec![32767, -32767]);
        assert_eq!(waveform.to_pcm16_le_bytes(), vec![0xff, 0x7f, 0x01, 0x80]);
    }

    #[test]
    fn test_envelope() {
        let waveform = Waveform::from_samples(&[0.1, -0.2, 0.5, 0.3, -0.9, 0.0], 100, 8).unwrap();
        let env = waveform.envelope(3).unwrap();
        assert_eq!(env, vec![(-0.2, 0.1), (0.3, 0.5), (-0.9, 0.0)]);

        let fine = waveform.envelope(12).unwrap();
        assert_eq!(fine.len(), 12);
        assert!(fine.iter().all(|(lo, hi)| lo <= hi && lo.is_finite()));

        assert!(waveform.envelope(0).is_err());
    }

    #[cfg(feature = "wav")]
    #[test]
    fn test_wav_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 22050,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for s in [0i16, 16384, -16384, 32767, -32768] {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();

        let waveform = Waveform::from_wav(&path, 32).unwrap();
        assert_eq!(waveform.sample_rate(), 22050);
        assert_eq!(waveform.sample_count(), 5);
        assert_eq!(waveform.margin(), 32);
        let expected = [0.5, 16384.5, -16383.5, 32767.5, -32767.5].map(|s| s / 32768.0);
        for (got, want) in waveform.signal().iter().zip(expected) {
            assert!((got - want).abs() < 1e-12, "{got} vs {want}");
        }
    }

    #[cfg(feature = "wav")]
    #[test]
    fn test_wav_rejects_stereo() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        writer.write_sample(0i16).unwrap();
        writer.write_sample(0i16).unwrap();
        writer.finalize().unwrap();

        assert!(matches!(
            Waveform::from_wav(&path, 16),
            Err(SpectralError::UnsupportedFormat(_))
        ));
    }
}
