use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::models::error::ConversionError;
use crate::processing::encoder::WaveContainer;

/// Write `container` to `path`, creating parent directories as needed.
///
/// Returns the SHA-256 hex digest of the written file.
pub fn save_container(container: &WaveContainer, path: &Path) -> Result<String, ConversionError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| ConversionError::StorageError(format!("failed to create directory: {}", e)))?;
    }

    let mut file =
        File::create(path).map_err(|e| ConversionError::StorageError(format!("failed to create file: {}", e)))?;
    file.write_all(container.as_bytes())
        .map_err(|e| ConversionError::StorageError(format!("write failed: {}", e)))?;
    file.flush().map_err(|e| ConversionError::StorageError(e.to_string()))?;
    drop(file);

    log::info!("Saved {} bytes to {}", container.len(), path.display());
    sha256_file(path)
}

/// Output file name for `source_name`: its extension replaced by `.wav`.
pub fn wav_file_name(source_name: &str) -> String {
    let file_name = Path::new(source_name)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = match file_name.rfind('.') {
        Some(index) if index > 0 => &file_name[..index],
        _ => file_name.as_str(),
    };
    if stem.is_empty() {
        return "audio.wav".to_string();
    }
    format!("{}.wav", stem)
}

/// Compute SHA-256 hex digest of a file.
pub fn sha256_file(path: &Path) -> Result<String, ConversionError> {
    let data = fs::read(path)
        .map_err(|e| ConversionError::StorageError(format!("failed to read file for checksum: {}", e)))?;
    Ok(sha256_hex(&data))
}

/// SHA-256 hex digest of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    hex_encode(&digest)
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::audio_format::AudioFormat;
    use crate::models::sample_buffer::SampleBuffer;
    use crate::processing::encoder::encode;

    fn temp_file_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("wav_convert_test_{}", name))
    }

    #[test]
    fn save_writes_exact_bytes() {
        let path = temp_file_path("saved.wav");
        let container = encode(&SampleBuffer::mono(vec![0.0, 0.5, -0.5]), &AudioFormat::mono(16000).unwrap()).unwrap();

        let checksum = save_container(&container, &path).unwrap();

        let file_data = fs::read(&path).unwrap();
        assert_eq!(file_data, container.as_bytes());
        assert_eq!(checksum, sha256_hex(container.as_bytes()));
        assert_eq!(checksum.len(), 64);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn save_creates_missing_directories() {
        let dir = temp_file_path("nested_dir");
        let path = dir.join("inner").join("out.wav");
        let container = encode(&SampleBuffer::silent(1, 4), &AudioFormat::mono(8000).unwrap()).unwrap();

        save_container(&container, &path).unwrap();

        assert!(path.exists());
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn sha256_of_empty_input() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn wav_file_name_replaces_extension() {
        assert_eq!(wav_file_name("lecture.mp4"), "lecture.wav");
        assert_eq!(wav_file_name("my.talk.webm"), "my.talk.wav");
        assert_eq!(wav_file_name("/tmp/videos/clip.MOV"), "clip.wav");
        assert_eq!(wav_file_name("noext"), "noext.wav");
        assert_eq!(wav_file_name(".hidden"), ".hidden.wav");
        assert_eq!(wav_file_name(""), "audio.wav");
    }
}
