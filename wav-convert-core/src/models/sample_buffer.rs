/// Per-channel float sample storage.
///
/// Channels are kept as separate vectors. After assembly every channel has
/// exactly the declared frame count and every sample lies in [-1.0, 1.0];
/// buffers built by hand are only checked when encoded.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SampleBuffer {
    channels: Vec<Vec<f32>>,
}

impl SampleBuffer {
    /// All-silence buffer.
    pub fn silent(channel_count: usize, frame_count: usize) -> Self {
        Self {
            channels: vec![vec![0.0; frame_count]; channel_count],
        }
    }

    /// Single-channel buffer.
    pub fn mono(samples: Vec<f32>) -> Self {
        Self {
            channels: vec![samples],
        }
    }

    /// Wrap per-channel vectors as-is. Lengths are not checked here.
    pub fn from_channels(channels: Vec<Vec<f32>>) -> Self {
        Self { channels }
    }

    /// De-interleave `[c0, c1, .., c0, c1, ..]` samples.
    ///
    /// A ragged trailing frame is dropped.
    pub fn from_interleaved(samples: &[f32], channel_count: usize) -> Self {
        if channel_count == 0 {
            return Self::default();
        }
        let frame_count = samples.len() / channel_count;
        let mut channels = vec![Vec::with_capacity(frame_count); channel_count];
        for frame in samples.chunks_exact(channel_count) {
            for (ch, &sample) in frame.iter().enumerate() {
                channels[ch].push(sample);
            }
        }
        Self { channels }
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Length of the first channel, or 0 for a buffer without channels.
    pub fn frame_count(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    pub(crate) fn channel_mut(&mut self, index: usize) -> Option<&mut [f32]> {
        self.channels.get_mut(index).map(Vec::as_mut_slice)
    }

    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    pub fn into_channels(self) -> Vec<Vec<f32>> {
        self.channels
    }

    /// Playback length at `sample_rate`.
    pub fn duration_secs(&self, sample_rate: u32) -> f64 {
        if sample_rate == 0 {
            return 0.0;
        }
        self.frame_count() as f64 / sample_rate as f64
    }

    /// Peak absolute amplitude across all channels.
    pub fn peak_level(&self) -> f32 {
        self.channels
            .iter()
            .flat_map(|ch| ch.iter())
            .map(|s| s.abs())
            .fold(0.0f32, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_has_declared_shape() {
        let buffer = SampleBuffer::silent(2, 160);
        assert_eq!(buffer.channel_count(), 2);
        assert_eq!(buffer.frame_count(), 160);
        assert!(buffer.channels().iter().all(|ch| ch.iter().all(|&s| s == 0.0)));
    }

    #[test]
    fn from_interleaved_splits_channels() {
        let buffer = SampleBuffer::from_interleaved(&[1.0, 4.0, 2.0, 5.0, 3.0, 6.0], 2);
        assert_eq!(buffer.channel(0), Some(&[1.0, 2.0, 3.0][..]));
        assert_eq!(buffer.channel(1), Some(&[4.0, 5.0, 6.0][..]));
    }

    #[test]
    fn from_interleaved_drops_ragged_frame() {
        let buffer = SampleBuffer::from_interleaved(&[1.0, 2.0, 3.0], 2);
        assert_eq!(buffer.frame_count(), 1);
    }

    #[test]
    fn duration_from_frames() {
        let buffer = SampleBuffer::silent(1, 8000);
        assert_eq!(buffer.duration_secs(16000), 0.5);
        assert_eq!(buffer.duration_secs(0), 0.0);
    }

    #[test]
    fn peak_level_spans_channels() {
        let buffer = SampleBuffer::from_channels(vec![vec![0.1, -0.2], vec![0.3, -0.7]]);
        assert_eq!(buffer.peak_level(), 0.7);
    }

    #[test]
    fn empty_buffer_has_no_frames() {
        let buffer = SampleBuffer::default();
        assert_eq!(buffer.frame_count(), 0);
        assert_eq!(buffer.channel_count(), 0);
    }
}
