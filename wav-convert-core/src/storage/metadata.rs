use std::fs;
use std::path::{Path, PathBuf};

use crate::models::conversion_result::ConversionMetadata;
use crate::models::error::ConversionError;

/// Sidecar path for `wav_path`: `{stem}.metadata.json` in the same directory.
pub fn metadata_path(wav_path: &Path) -> PathBuf {
    wav_path.with_extension("metadata.json")
}

/// Write conversion metadata as a JSON sidecar file.
pub fn write_metadata(metadata: &ConversionMetadata, wav_path: &Path) -> Result<(), ConversionError> {
    let json = serde_json::to_string_pretty(metadata)
        .map_err(|e| ConversionError::StorageError(format!("failed to serialize metadata: {}", e)))?;
    fs::write(metadata_path(wav_path), json)
        .map_err(|e| ConversionError::StorageError(format!("failed to write metadata: {}", e)))?;
    Ok(())
}

/// Read conversion metadata from a JSON sidecar file.
pub fn read_metadata(wav_path: &Path) -> Result<ConversionMetadata, ConversionError> {
    let json = fs::read_to_string(metadata_path(wav_path))
        .map_err(|e| ConversionError::StorageError(format!("failed to read metadata: {}", e)))?;
    let metadata: ConversionMetadata = serde_json::from_str(&json)
        .map_err(|e| ConversionError::StorageError(format!("failed to parse metadata: {}", e)))?;
    Ok(metadata)
}
