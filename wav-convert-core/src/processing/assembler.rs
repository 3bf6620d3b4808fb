//! Assembly of captured chunks into a fixed-length sample buffer.
//!
//! Chunks are copied in arrival order until the buffer is full. A short
//! capture is padded with silence and an over-long one is truncated; the
//! cadence mismatch is never absorbed by stretching or resampling.

use log::{debug, warn};

use crate::models::error::ConversionError;
use crate::models::sample_buffer::SampleBuffer;
use crate::models::sample_chunk::{u8_to_float, SampleChunk};

/// Longest mono buffer whose 16-bit PCM payload still fits a RIFF file.
pub const MAX_FRAME_COUNT: usize = (u32::MAX as usize - 36) / 2;

/// Diagnostics describing how a chunk stream was fitted to the frame count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AssemblyReport {
    pub frame_count: usize,
    pub chunk_count: usize,
    pub samples_received: usize,
    pub samples_copied: usize,
    /// Samples beyond the frame count that were dropped.
    pub samples_discarded: usize,
    /// Trailing frames filled with silence.
    pub frames_padded: usize,
}

impl AssemblyReport {
    /// Fraction of the buffer that is padding.
    pub fn padding_ratio(&self) -> f64 {
        if self.frame_count == 0 {
            return 0.0;
        }
        self.frames_padded as f64 / self.frame_count as f64
    }

    /// Fraction of the received samples that were discarded.
    pub fn truncation_ratio(&self) -> f64 {
        if self.samples_received == 0 {
            return 0.0;
        }
        self.samples_discarded as f64 / self.samples_received as f64
    }
}

/// Maps an ordered chunk stream onto a single-channel [`SampleBuffer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleAssembler {
    warning_threshold: Option<f64>,
}

impl SampleAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log a warning when padding or truncation exceeds `threshold`.
    ///
    /// The threshold is clamped to [0, 1]; NaN disables the warning.
    pub fn with_warning_threshold(threshold: f64) -> Self {
        Self {
            warning_threshold: (!threshold.is_nan()).then(|| threshold.clamp(0.0, 1.0)),
        }
    }

    pub fn warning_threshold(&self) -> Option<f64> {
        self.warning_threshold
    }

    /// `floor(duration_secs * sample_rate)`, rejecting non-positive inputs.
    pub fn frame_count(sample_rate: u32, duration_secs: f64) -> Result<usize, ConversionError> {
        if sample_rate == 0 {
            return Err(ConversionError::InvalidFormat("sample rate must be positive".into()));
        }
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(ConversionError::InvalidFormat(format!(
                "duration must be positive, got {}",
                duration_secs
            )));
        }
        let frames = (duration_secs * sample_rate as f64).floor();
        if frames > MAX_FRAME_COUNT as f64 {
            return Err(ConversionError::InvalidFormat(format!(
                "{}s at {} Hz exceeds the maximum WAV length",
                duration_secs, sample_rate
            )));
        }
        Ok(frames as usize)
    }

    /// Assemble `chunks` into a buffer of exactly `floor(duration_secs * sample_rate)` frames.
    pub fn assemble(
        &self,
        chunks: &[SampleChunk],
        sample_rate: u32,
        duration_secs: f64,
    ) -> Result<(SampleBuffer, AssemblyReport), ConversionError> {
        let frame_count = Self::frame_count(sample_rate, duration_secs)?;
        let (buffer, report) = self.fill(frame_count, chunks.iter().map(|chunk| chunk.samples()));
        Ok((buffer, report))
    }

    /// Same as [`assemble`](Self::assemble) for raw unsigned 8-bit chunks.
    pub fn assemble_bytes<C: AsRef<[u8]>>(
        &self,
        chunks: &[C],
        sample_rate: u32,
        duration_secs: f64,
    ) -> Result<(SampleBuffer, AssemblyReport), ConversionError> {
        let frame_count = Self::frame_count(sample_rate, duration_secs)?;
        let chunks = chunks.iter().map(|chunk| chunk.as_ref().iter().map(|&s| u8_to_float(s)));
        Ok(self.fill(frame_count, chunks))
    }

    fn fill<I, S>(&self, frame_count: usize, chunks: I) -> (SampleBuffer, AssemblyReport)
    where
        I: IntoIterator<Item = S>,
        S: ExactSizeIterator<Item = f32>,
    {
        let mut buffer = SampleBuffer::silent(1, frame_count);
        let mut report = AssemblyReport {
            frame_count,
            ..Default::default()
        };

        if let Some(target) = buffer.channel_mut(0) {
            let mut written = 0;
            for chunk in chunks {
                let len = chunk.len();
                let room = frame_count - written;
                report.chunk_count += 1;
                report.samples_received += len;

                for (slot, sample) in target[written..].iter_mut().zip(chunk) {
                    *slot = sample;
                }
                written += len.min(room);
            }
            target[written..].fill(0.0);
            report.samples_copied = written;
        }

        report.frames_padded = frame_count - report.samples_copied;
        report.samples_discarded = report.samples_received - report.samples_copied;
        self.log_report(&report);
        (buffer, report)
    }

    fn log_report(&self, report: &AssemblyReport) {
        debug!(
            "Assembled {} chunks into {} frames ({} received, {} padded, {} discarded)",
            report.chunk_count,
            report.frame_count,
            report.samples_received,
            report.frames_padded,
            report.samples_discarded
        );

        let Some(threshold) = self.warning_threshold else {
            return;
        };
        if report.padding_ratio() > threshold {
            warn!(
                "Capture ended short: {} of {} frames padded with silence",
                report.frames_padded, report.frame_count
            );
        }
        if report.truncation_ratio() > threshold {
            warn!(
                "Capture overran: {} of {} samples discarded",
                report.samples_discarded, report.samples_received
            );
        }
    }
}

/// Assemble raw unsigned 8-bit chunks into a mono buffer of
/// `floor(duration_secs * sample_rate)` frames.
pub fn assemble<C: AsRef<[u8]>>(
    chunks: &[C],
    sample_rate: u32,
    duration_secs: f64,
) -> Result<SampleBuffer, ConversionError> {
    SampleAssembler::new()
        .assemble_bytes(chunks, sample_rate, duration_secs)
        .map(|(buffer, _)| buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const NO_CHUNKS: &[Vec<u8>] = &[];

    fn samples(buffer: &SampleBuffer) -> &[f32] {
        buffer.channel(0).unwrap()
    }

    #[test]
    fn no_chunks_yields_silence() {
        for (rate, duration) in [(16000, 0.01), (8000, 1.0), (44100, 0.5), (3, 0.9)] {
            let buffer = assemble(NO_CHUNKS, rate, duration).unwrap();
            let expected = (rate as f64 * duration).floor() as usize;
            assert_eq!(buffer.channel_count(), 1);
            assert_eq!(buffer.frame_count(), expected);
            assert!(samples(&buffer).iter().all(|&s| s == 0.0));
        }
    }

    #[test]
    fn centered_bytes_scenario() {
        let chunks = vec![vec![128u8; 50]];

        let (buffer, report) = SampleAssembler::new().assemble_bytes(&chunks, 16000, 0.01).unwrap();

        assert_eq!(buffer.frame_count(), 160);
        assert!(samples(&buffer).iter().all(|&s| s == 0.0));
        assert_eq!(report.samples_copied, 50);
        assert_eq!(report.frames_padded, 110);
        assert_eq!(report.samples_discarded, 0);
    }

    #[test]
    fn short_stream_is_zero_padded() {
        let chunks = vec![vec![255u8, 0, 192], vec![64u8]];

        let buffer = assemble(&chunks, 10, 1.0).unwrap();
        let s = samples(&buffer);

        assert_eq!(s.len(), 10);
        assert_relative_eq!(s[0], 127.0 / 128.0);
        assert_eq!(s[1], -1.0);
        assert_eq!(s[2], 0.5);
        assert_eq!(s[3], -0.5);
        assert!(s[4..].iter().all(|&x| x == 0.0));
    }

    #[test]
    fn long_stream_is_truncated_in_order() {
        let chunks: Vec<Vec<u8>> = vec![(0..4).collect(), (4..7).collect(), (7..12).collect()];
        let concatenated: Vec<f32> = (0u8..12).map(u8_to_float).collect();

        let (buffer, report) = SampleAssembler::new().assemble_bytes(&chunks, 8, 1.0).unwrap();

        assert_eq!(samples(&buffer), &concatenated[..8]);
        assert_eq!(report.chunk_count, 3);
        assert_eq!(report.samples_received, 12);
        assert_eq!(report.samples_discarded, 4);
        assert_eq!(report.frames_padded, 0);
    }

    #[test]
    fn ragged_final_chunk_is_cut_at_frame_count() {
        let chunks = vec![vec![200u8; 4], vec![100u8; 4]];

        let (buffer, report) = SampleAssembler::new().assemble_bytes(&chunks, 6, 1.0).unwrap();

        let s = samples(&buffer);
        assert!(s[..4].iter().all(|&x| x == u8_to_float(200)));
        assert!(s[4..].iter().all(|&x| x == u8_to_float(100)));
        assert_eq!(report.samples_discarded, 2);
    }

    #[test]
    fn exact_fit_has_no_padding_or_discard() {
        let chunks = vec![vec![130u8; 5], vec![126u8; 5]];

        let (_, report) = SampleAssembler::new().assemble_bytes(&chunks, 10, 1.0).unwrap();

        assert_eq!(report.frames_padded, 0);
        assert_eq!(report.samples_discarded, 0);
        assert_eq!(report.padding_ratio(), 0.0);
        assert_eq!(report.truncation_ratio(), 0.0);
    }

    #[test]
    fn float_chunks_are_clamped() {
        let chunks = vec![SampleChunk::from(vec![0.5f32, 1.5]), SampleChunk::from(vec![-3.0f32])];

        let (buffer, _) = SampleAssembler::new().assemble(&chunks, 4, 1.0).unwrap();

        assert_eq!(samples(&buffer), &[0.5, 1.0, -1.0, 0.0]);
    }

    #[test]
    fn mixed_chunk_kinds_keep_order() {
        let chunks = vec![
            SampleChunk::from(vec![0u8]),
            SampleChunk::from(vec![0.25f32]),
            SampleChunk::from(vec![192u8]),
        ];

        let (buffer, report) = SampleAssembler::new().assemble(&chunks, 3, 1.0).unwrap();

        assert_eq!(samples(&buffer), &[-1.0, 0.25, 0.5]);
        assert_eq!(report.chunk_count, 3);
    }

    #[test]
    fn frame_count_is_floored() {
        assert_eq!(SampleAssembler::frame_count(16000, 0.01).unwrap(), 160);
        assert_eq!(SampleAssembler::frame_count(10, 0.99).unwrap(), 9);
        assert_eq!(SampleAssembler::frame_count(10, 0.05).unwrap(), 0);
    }

    #[test]
    fn invalid_duration_or_rate_fails() {
        for duration in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                assemble(NO_CHUNKS, 16000, duration),
                Err(ConversionError::InvalidFormat(_))
            ));
        }
        assert!(matches!(assemble(NO_CHUNKS, 0, 1.0), Err(ConversionError::InvalidFormat(_))));
    }

    #[test]
    fn oversized_duration_fails() {
        assert!(SampleAssembler::frame_count(48000, 1.0e9).is_err());
    }

    #[test]
    fn ratios_reflect_padding_and_truncation() {
        let short = vec![vec![128u8; 25]];
        let (_, report) = SampleAssembler::with_warning_threshold(0.1)
            .assemble_bytes(&short, 100, 1.0)
            .unwrap();
        assert_relative_eq!(report.padding_ratio(), 0.75);

        let long = vec![vec![128u8; 200]];
        let (_, report) = SampleAssembler::new().assemble_bytes(&long, 100, 1.0).unwrap();
        assert_relative_eq!(report.truncation_ratio(), 0.5);
    }

    #[test]
    fn warning_threshold_is_sanitized() {
        assert_eq!(SampleAssembler::with_warning_threshold(0.25).warning_threshold(), Some(0.25));
        assert_eq!(SampleAssembler::with_warning_threshold(1.5).warning_threshold(), Some(1.0));
        assert_eq!(SampleAssembler::with_warning_threshold(-0.5).warning_threshold(), Some(0.0));
        assert_eq!(SampleAssembler::with_warning_threshold(f64::NAN).warning_threshold(), None);
        assert_eq!(SampleAssembler::new().warning_threshold(), None);
    }
}
