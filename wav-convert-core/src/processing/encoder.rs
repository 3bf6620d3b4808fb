use log::debug;

use super::wav_format::{self, WavHeader, WAV_HEADER_SIZE, WAV_MIME_TYPE};
use crate::models::audio_format::AudioFormat;
use crate::models::error::ConversionError;
use crate::models::sample_buffer::SampleBuffer;
use crate::models::sample_chunk::clamp_unit;

/// Largest PCM payload whose RIFF chunk size (`36 + data_size`) still fits in 32 bits.
const MAX_DATA_SIZE: usize = (u32::MAX - 36) as usize;

/// An encoded WAVE file: 44-byte header followed by 16-bit PCM data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaveContainer {
    bytes: Vec<u8>,
}

impl WaveContainer {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn mime_type(&self) -> &'static str {
        WAV_MIME_TYPE
    }

    /// Parse this container's header.
    pub fn header(&self) -> Result<WavHeader, ConversionError> {
        WavHeader::parse(&self.bytes)
    }

    /// The PCM payload following the header.
    pub fn pcm_data(&self) -> &[u8] {
        &self.bytes[WAV_HEADER_SIZE.min(self.bytes.len())..]
    }
}

impl AsRef<[u8]> for WaveContainer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Stateless 16-bit PCM WAVE encoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct WavEncoder;

impl WavEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Serialize `buffer` as a canonical WAVE file.
    ///
    /// Frames are interleaved channel-major: for each frame, channel 0's
    /// sample, then channel 1's, and so on. Every channel must hold exactly
    /// the same number of frames and the buffer must have
    /// `format.channel_count` channels. Nothing is produced on failure.
    pub fn encode(&self, buffer: &SampleBuffer, format: &AudioFormat) -> Result<WaveContainer, ConversionError> {
        format.validate()?;

        let channel_count = format.channel_count as usize;
        if buffer.channel_count() != channel_count {
            return Err(ConversionError::InvalidFormat(format!(
                "buffer has {} channels, format declares {}",
                buffer.channel_count(),
                channel_count
            )));
        }

        let frame_count = buffer.frame_count();
        let channels = buffer.channels();
        if let Some((index, channel)) = channels.iter().enumerate().find(|(_, ch)| ch.len() != frame_count) {
            return Err(ConversionError::InvalidFormat(format!(
                "channel {} has {} samples, expected {}",
                index,
                channel.len(),
                frame_count
            )));
        }

        let data_size = frame_count
            .checked_mul(format.block_align() as usize)
            .filter(|&size| size <= MAX_DATA_SIZE)
            .ok_or_else(|| {
                ConversionError::InvalidFormat(format!("{} frames exceed the 4 GiB RIFF limit", frame_count))
            })?;

        let mut bytes = Vec::with_capacity(WAV_HEADER_SIZE + data_size);
        bytes.extend_from_slice(&wav_format::generate_wav_header(
            format.sample_rate,
            format.bit_depth,
            format.channel_count,
            data_size as u32,
        ));
        for frame in 0..frame_count {
            for channel in channels {
                bytes.extend_from_slice(&float_to_pcm16(channel[frame]).to_le_bytes());
            }
        }

        debug!(
            "Encoded {} frames x {} channels at {} Hz ({} bytes)",
            frame_count,
            channel_count,
            format.sample_rate,
            bytes.len()
        );
        Ok(WaveContainer { bytes })
    }
}

/// Encode `buffer` with a fresh [`WavEncoder`].
pub fn encode(buffer: &SampleBuffer, format: &AudioFormat) -> Result<WaveContainer, ConversionError> {
    WavEncoder::new().encode(buffer, format)
}

/// Convert one float sample to 16-bit PCM.
///
/// Clamps to [-1.0, 1.0] first, so the result is always in
/// `-32767..=32767`. NaN encodes as silence.
pub fn float_to_pcm16(sample: f32) -> i16 {
    (clamp_unit(sample) * i16::MAX as f32).round() as i16
}
