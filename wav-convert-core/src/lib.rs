//! # wav-convert-core
//!
//! Turns a captured stream of audio sample chunks into a canonical
//! 16-bit PCM WAVE file.
//!
//! Capture itself (timers, playback callbacks, decoding) lives outside this
//! crate. Callers hand over already-decoded chunks and receive an encoded
//! byte buffer back.
//!
//! ## Architecture
//!
//! ```text
//! wav-convert-core (this crate)
//! ├── models/       ← SampleChunk, SampleBuffer, AudioFormat, ConversionError, JobState, etc.
//! ├── processing/   ← SampleAssembler, WavEncoder, WAV header codec
//! ├── session/      ← ChunkCollector, ConversionJob
//! ├── storage/      ← file output with checksum, metadata sidecar
//! └── traits/       ← ConversionDelegate
//! ```
//!
//! ## Example
//!
//! ```
//! use wav_convert_core::{assemble, encode, AudioFormat};
//!
//! let chunks = vec![vec![128u8; 50]];
//! let buffer = assemble(&chunks, 16000, 0.01).unwrap();
//! let wav = encode(&buffer, &AudioFormat::mono(16000).unwrap()).unwrap();
//! assert_eq!(wav.len(), 44 + 160 * 2);
//! ```

pub mod models;
pub mod processing;
pub mod session;
pub mod storage;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use models::audio_format::{AudioFormat, BITS_PER_SAMPLE};
pub use models::config::ConversionConfiguration;
pub use models::conversion_result::{ConversionMetadata, ConversionResult};
pub use models::error::ConversionError;
pub use models::sample_buffer::SampleBuffer;
pub use models::sample_chunk::SampleChunk;
pub use models::state::JobState;
pub use processing::assembler::{assemble, AssemblyReport, SampleAssembler};
pub use processing::encoder::{encode, float_to_pcm16, WavEncoder, WaveContainer};
pub use processing::wav_format::{WavHeader, WAV_HEADER_SIZE};
pub use session::collector::ChunkCollector;
pub use session::job::ConversionJob;
pub use traits::conversion_delegate::ConversionDelegate;
