/// Raw value of an unsigned 8-bit time-domain sample at zero amplitude.
pub const U8_CENTER: u8 = 128;

/// One slice of captured audio, in capture order.
///
/// Capture pipelines deliver either unsigned 8-bit time-domain bytes
/// (128 = silence) or already-normalized float amplitudes.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleChunk {
    Unsigned8(Vec<u8>),
    Float(Vec<f32>),
}

impl SampleChunk {
    /// Number of samples in this chunk.
    pub fn len(&self) -> usize {
        match self {
            Self::Unsigned8(bytes) => bytes.len(),
            Self::Float(samples) => samples.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Normalized amplitude of the sample at `index`, always within [-1.0, 1.0].
    ///
    /// Panics if `index` is out of bounds.
    pub fn sample(&self, index: usize) -> f32 {
        match self {
            Self::Unsigned8(bytes) => u8_to_float(bytes[index]),
            Self::Float(samples) => clamp_unit(samples[index]),
        }
    }

    /// Iterate over the normalized amplitudes of this chunk.
    pub fn samples(&self) -> impl ExactSizeIterator<Item = f32> + '_ {
        (0..self.len()).map(move |i| self.sample(i))
    }
}

impl From<Vec<u8>> for SampleChunk {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Unsigned8(bytes)
    }
}

impl From<&[u8]> for SampleChunk {
    fn from(bytes: &[u8]) -> Self {
        Self::Unsigned8(bytes.to_vec())
    }
}

impl From<Vec<f32>> for SampleChunk {
    fn from(samples: Vec<f32>) -> Self {
        Self::Float(samples)
    }
}

/// Map an unsigned 8-bit sample onto [-1.0, 1.0): 0 → -1.0, 128 → 0.0, 255 → ~0.992.
pub fn u8_to_float(sample: u8) -> f32 {
    (sample as f32 - U8_CENTER as f32) / 128.0
}

/// Clamp to [-1.0, 1.0]; NaN becomes silence.
pub fn clamp_unit(sample: f32) -> f32 {
    if sample.is_nan() {
        0.0
    } else {
        sample.clamp(-1.0, 1.0)
    }
}
