use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::audio_format::AudioFormat;
use crate::processing::assembler::AssemblyReport;
use crate::processing::encoder::WaveContainer;

/// Result returned when a conversion job completes successfully.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    pub container: WaveContainer,
    pub report: AssemblyReport,
    pub metadata: ConversionMetadata,
    /// Where the container was written, if it was saved.
    pub file_path: Option<PathBuf>,
}

/// Metadata describing a converted file.
///
/// Serializable for JSON export alongside the WAV file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionMetadata {
    pub id: String,
    pub source_name: String,
    pub output_name: String,
    pub duration_secs: f64,
    pub sample_rate: u32,
    pub channel_count: u16,
    pub bits_per_sample: u16,
    pub frame_count: u64,
    pub size_bytes: u64,
    pub source_size_bytes: Option<u64>,
    /// Percentage of the source size saved by the WAV output. Negative when
    /// the WAV file is larger than the source.
    pub compression_ratio: Option<f64>,
    /// SHA-256 hex digest, set once the file is saved.
    pub checksum: Option<String>,
    pub created_at: String,
}

impl ConversionMetadata {
    pub fn new(
        source_name: &str,
        output_name: &str,
        format: &AudioFormat,
        frame_count: usize,
        size_bytes: usize,
        source_size_bytes: Option<u64>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            source_name: source_name.to_string(),
            output_name: output_name.to_string(),
            duration_secs: frame_count as f64 / format.sample_rate as f64,
            sample_rate: format.sample_rate,
            channel_count: format.channel_count,
            bits_per_sample: format.bit_depth,
            frame_count: frame_count as u64,
            size_bytes: size_bytes as u64,
            source_size_bytes,
            compression_ratio: source_size_bytes.and_then(|src| compression_ratio(src, size_bytes as u64)),
            checksum: None,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// `(source - output) / source * 100`, or `None` for an empty source.
pub fn compression_ratio(source_size: u64, output_size: u64) -> Option<f64> {
    if source_size == 0 {
        return None;
    }
    Some((source_size as f64 - output_size as f64) / source_size as f64 * 100.0)
}
