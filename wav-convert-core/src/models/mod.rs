pub mod audio_format;
pub mod config;
pub mod conversion_result;
pub mod error;
pub mod sample_buffer;
pub mod sample_chunk;
pub mod state;
