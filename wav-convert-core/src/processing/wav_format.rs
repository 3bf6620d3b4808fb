//! Canonical WAVE (RIFF) header codec.
//!
//! Produces and reads the 44-byte PCM header with no extension chunks.

use crate::models::error::ConversionError;

/// Size of the canonical WAV RIFF header in bytes.
pub const WAV_HEADER_SIZE: usize = 44;

/// MIME type of the encoded container.
pub const WAV_MIME_TYPE: &str = "audio/wav";

const PCM_FORMAT_CODE: u16 = 1;
const PCM_FMT_CHUNK_SIZE: u32 = 16;

/// Generate a 44-byte WAV RIFF header.
///
/// Format: PCM (format code 1), little-endian.
///
/// Layout:
/// ```text
/// [0-3]    "RIFF"
/// [4-7]    36 + data_size
/// [8-11]   "WAVE"
/// [12-15]  "fmt "
/// [16-19]  16 (PCM format chunk size)
/// [20-21]  1 (PCM format code)
/// [22-23]  channels
/// [24-27]  sample_rate
/// [28-31]  byte_rate = sample_rate * channels * bit_depth / 8
/// [32-33]  block_align = channels * bit_depth / 8
/// [34-35]  bit_depth
/// [36-39]  "data"
/// [40-43]  data_size
/// ```
pub fn generate_wav_header(sample_rate: u32, bit_depth: u16, channels: u16, data_size: u32) -> [u8; WAV_HEADER_SIZE] {
    let block_align = channels as u32 * bit_depth as u32 / 8;
    let byte_rate = (sample_rate as u64 * block_align as u64) as u32;
    let block_align = block_align as u16;
    let chunk_size = 36 + data_size;

    let mut header = [0u8; WAV_HEADER_SIZE];

    // RIFF chunk descriptor
    header[0..4].copy_from_slice(b"RIFF");
    header[4..8].copy_from_slice(&chunk_size.to_le_bytes());
    header[8..12].copy_from_slice(b"WAVE");

    // fmt sub-chunk
    header[12..16].copy_from_slice(b"fmt ");
    header[16..20].copy_from_slice(&PCM_FMT_CHUNK_SIZE.to_le_bytes());
    header[20..22].copy_from_slice(&PCM_FORMAT_CODE.to_le_bytes());
    header[22..24].copy_from_slice(&channels.to_le_bytes());
    header[24..28].copy_from_slice(&sample_rate.to_le_bytes());
    header[28..32].copy_from_slice(&byte_rate.to_le_bytes());
    header[32..34].copy_from_slice(&block_align.to_le_bytes());
    header[34..36].copy_from_slice(&bit_depth.to_le_bytes());

    // data sub-chunk
    header[36..40].copy_from_slice(b"data");
    header[40..44].copy_from_slice(&data_size.to_le_bytes());

    header
}

/// Fields of a parsed canonical WAV header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    pub chunk_size: u32,
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
    pub data_size: u32,
}

impl WavHeader {
    /// Parse the first 44 bytes of `bytes` as a canonical PCM header.
    pub fn parse(bytes: &[u8]) -> Result<Self, ConversionError> {
        if bytes.len() < WAV_HEADER_SIZE {
            return Err(ConversionError::InvalidFormat(format!(
                "header too short: {} bytes",
                bytes.len()
            )));
        }
        if &bytes[0..4] != b"RIFF" || &bytes[8..12] != b"WAVE" {
            return Err(ConversionError::InvalidFormat("missing RIFF/WAVE magic".into()));
        }
        if &bytes[12..16] != b"fmt " || &bytes[36..40] != b"data" {
            return Err(ConversionError::InvalidFormat("not a canonical 44-byte header".into()));
        }
        let fmt_size = read_u32(bytes, 16);
        if fmt_size != PCM_FMT_CHUNK_SIZE {
            return Err(ConversionError::InvalidFormat(format!("unexpected fmt chunk size: {}", fmt_size)));
        }
        let format_code = read_u16(bytes, 20);
        if format_code != PCM_FORMAT_CODE {
            return Err(ConversionError::InvalidFormat(format!("not PCM: format code {}", format_code)));
        }

        Ok(Self {
            chunk_size: read_u32(bytes, 4),
            channels: read_u16(bytes, 22),
            sample_rate: read_u32(bytes, 24),
            byte_rate: read_u32(bytes, 28),
            block_align: read_u16(bytes, 32),
            bits_per_sample: read_u16(bytes, 34),
            data_size: read_u32(bytes, 40),
        })
    }

    /// Number of frames described by `data_size`.
    pub fn frame_count(&self) -> u32 {
        if self.block_align == 0 {
            return 0;
        }
        self.data_size / self.block_align as u32
    }
}

fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([bytes[offset], bytes[offset + 1], bytes[offset + 2], bytes[offset + 3]])
}
