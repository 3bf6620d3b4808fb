use std::sync::Arc;

use log::{debug, error, info};

use super::collector::ChunkCollector;
use crate::models::audio_format::AudioFormat;
use crate::models::config::ConversionConfiguration;
use crate::models::conversion_result::{ConversionMetadata, ConversionResult};
use crate::models::error::ConversionError;
use crate::models::sample_buffer::SampleBuffer;
use crate::models::state::JobState;
use crate::processing::assembler::SampleAssembler;
use crate::processing::encoder::WavEncoder;
use crate::storage::{metadata, wav_writer};
use crate::traits::conversion_delegate::ConversionDelegate;

/// One capture-to-WAV conversion.
///
/// The capture side pushes chunks through the [`ChunkCollector`] returned by
/// [`start`](Self::start); once capture is complete the owner calls
/// [`finish`](Self::finish), which assembles and encodes in a single
/// synchronous step.
///
/// ```text
/// [capture callback] → [ChunkCollector] → [SampleAssembler] → [WavEncoder] → [WaveContainer]
/// ```
pub struct ConversionJob {
    config: ConversionConfiguration,
    format: AudioFormat,
    duration_secs: f64,
    frame_count: usize,
    source_name: String,
    source_size_bytes: Option<u64>,
    collector: ChunkCollector,
    state: JobState,
    delegate: Option<Arc<dyn ConversionDelegate>>,
}

impl ConversionJob {
    /// Create a job for `duration_secs` of audio. Fails fast on invalid parameters.
    pub fn new(
        config: ConversionConfiguration,
        duration_secs: f64,
        source_name: impl Into<String>,
    ) -> Result<Self, ConversionError> {
        config.validate().map_err(ConversionError::InvalidFormat)?;
        let format = AudioFormat::new(config.sample_rate, config.channels)?;
        let frame_count = SampleAssembler::frame_count(config.sample_rate, duration_secs)?;

        Ok(Self {
            config,
            format,
            duration_secs,
            frame_count,
            source_name: source_name.into(),
            source_size_bytes: None,
            collector: ChunkCollector::new(),
            state: JobState::Idle,
            delegate: None,
        })
    }

    /// Record the size of the source media, used for the compression ratio.
    pub fn with_source_size(mut self, bytes: u64) -> Self {
        self.source_size_bytes = Some(bytes);
        self
    }

    pub fn set_delegate(&mut self, delegate: Arc<dyn ConversionDelegate>) {
        self.delegate = Some(delegate);
    }

    pub fn state(&self) -> JobState {
        self.state.clone()
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// Handle for pushing chunks. Clones share the job's storage.
    pub fn collector(&self) -> ChunkCollector {
        self.collector.clone()
    }

    /// Begin collecting. Transitions: idle → collecting.
    pub fn start(&mut self) -> Result<ChunkCollector, ConversionError> {
        if !self.state.is_idle() {
            return Err(ConversionError::InvalidState("can only start from idle state".into()));
        }
        self.set_state(JobState::Collecting);
        Ok(self.collector())
    }

    /// Fraction of the declared frames collected so far, capped at 1.0.
    ///
    /// Keeps its final value after the job finishes; a cancelled job reports 0.0.
    pub fn progress(&self) -> f32 {
        if self.frame_count == 0 {
            return 1.0;
        }
        (self.collector.sample_count() as f64 / self.frame_count as f64).min(1.0) as f32
    }

    /// Compute progress and forward it to the delegate.
    pub fn poll_progress(&self) -> f32 {
        let progress = self.progress();
        if let Some(ref delegate) = self.delegate {
            delegate.on_progress(progress);
        }
        progress
    }

    /// Abandon the job. Collected chunks are dropped without being assembled.
    /// Transitions: idle/collecting → cancelled.
    pub fn cancel(&mut self) -> Result<(), ConversionError> {
        if self.state.is_terminal() {
            return Err(ConversionError::InvalidState("job already finished".into()));
        }
        let dropped = self.collector.discard();
        info!("Conversion of {} cancelled, {} chunks dropped", self.source_name, dropped);
        self.set_state(JobState::Cancelled);
        Ok(())
    }

    /// Assemble and encode everything collected.
    /// Transitions: collecting → assembling → encoding → completed/failed.
    pub fn finish(&mut self) -> Result<ConversionResult, ConversionError> {
        let result = self.complete()?;
        self.succeed(&result);
        Ok(result)
    }

    /// [`finish`](Self::finish), then write the container (and its metadata
    /// sidecar, if configured) into the output directory. The job only
    /// reaches `Completed` once the files are written.
    pub fn finish_and_save(&mut self) -> Result<ConversionResult, ConversionError> {
        let mut result = self.complete()?;

        let file_path = self.config.output_directory.join(&result.metadata.output_name);
        let checksum = wav_writer::save_container(&result.container, &file_path).map_err(|e| self.fail(e))?;
        result.metadata.checksum = Some(checksum);
        if self.config.write_metadata {
            metadata::write_metadata(&result.metadata, &file_path).map_err(|e| self.fail(e))?;
        }
        result.file_path = Some(file_path);

        self.succeed(&result);
        Ok(result)
    }

    // --- Internal helpers ---

    /// Assemble and encode, leaving the job in `Encoding` on success.
    fn complete(&mut self) -> Result<ConversionResult, ConversionError> {
        if !self.state.is_collecting() {
            return Err(ConversionError::InvalidState("can only finish while collecting".into()));
        }

        let chunks = self.collector.take();
        self.set_state(JobState::Assembling);

        let assembler = match self.config.warning_threshold {
            Some(threshold) => SampleAssembler::with_warning_threshold(threshold),
            None => SampleAssembler::new(),
        };
        let (mono, report) = assembler
            .assemble(&chunks, self.format.sample_rate, self.duration_secs)
            .map_err(|e| self.fail(e))?;
        drop(chunks);

        self.set_state(JobState::Encoding);
        debug!("Peak level of {}: {:.3}", self.source_name, mono.peak_level());
        let buffer = spread_to_channels(mono, self.format.channel_count as usize);
        let container = WavEncoder::new()
            .encode(&buffer, &self.format)
            .map_err(|e| self.fail(e))?;

        let metadata = ConversionMetadata::new(
            &self.source_name,
            &wav_writer::wav_file_name(&self.source_name),
            &self.format,
            report.frame_count,
            container.len(),
            self.source_size_bytes,
        );

        Ok(ConversionResult {
            container,
            report,
            metadata,
            file_path: None,
        })
    }

    fn set_state(&mut self, new_state: JobState) {
        self.state = new_state;
        if let Some(ref delegate) = self.delegate {
            delegate.on_state_changed(&self.state);
        }
    }

    fn fail(&mut self, err: ConversionError) -> ConversionError {
        error!("Conversion of {} failed: {}", self.source_name, err);
        self.set_state(JobState::Failed(err.clone()));
        if let Some(ref delegate) = self.delegate {
            delegate.on_error(&err);
        }
        err
    }

    fn succeed(&mut self, result: &ConversionResult) {
        self.set_state(JobState::Completed);
        info!(
            "Converted {} to {} ({} frames, {} bytes)",
            self.source_name,
            result.metadata.output_name,
            result.report.frame_count,
            result.container.len()
        );
        if let Some(ref delegate) = self.delegate {
            delegate.on_conversion_finished(result);
        }
    }
}

/// Copy a mono buffer into `channel_count` identical channels.
fn spread_to_channels(mono: SampleBuffer, channel_count: usize) -> SampleBuffer {
    if channel_count <= 1 {
        return mono;
    }
    let samples = mono.into_channels().into_iter().next().unwrap_or_default();
    SampleBuffer::from_channels(vec![samples; channel_count])
}
