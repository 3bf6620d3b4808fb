use super::error::ConversionError;

/// The only PCM bit depth this crate produces.
pub const BITS_PER_SAMPLE: u16 = 16;

/// Bytes occupied by one 16-bit sample.
pub const BYTES_PER_SAMPLE: u16 = BITS_PER_SAMPLE / 8;

/// Immutable output format of one conversion job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AudioFormat {
    pub sample_rate: u32,
    pub channel_count: u16,
    pub bit_depth: u16,
}

impl AudioFormat {
    /// Build a 16-bit PCM format, rejecting a zero sample rate or channel count.
    pub fn new(sample_rate: u32, channel_count: u16) -> Result<Self, ConversionError> {
        let format = Self {
            sample_rate,
            channel_count,
            bit_depth: BITS_PER_SAMPLE,
        };
        format.validate()?;
        Ok(format)
    }

    /// Mono 16-bit PCM at `sample_rate`.
    pub fn mono(sample_rate: u32) -> Result<Self, ConversionError> {
        Self::new(sample_rate, 1)
    }

    pub fn validate(&self) -> Result<(), ConversionError> {
        if self.sample_rate < 1 {
            return Err(ConversionError::InvalidFormat("sample rate must be positive".into()));
        }
        if self.channel_count < 1 {
            return Err(ConversionError::InvalidFormat("channel count must be at least 1".into()));
        }
        if self.bit_depth != BITS_PER_SAMPLE {
            return Err(ConversionError::InvalidFormat(format!(
                "unsupported bit depth: {}",
                self.bit_depth
            )));
        }
        let block_align = self.channel_count as u32 * self.bit_depth as u32 / 8;
        if block_align > u16::MAX as u32 {
            return Err(ConversionError::InvalidFormat(format!(
                "too many channels: {}",
                self.channel_count
            )));
        }
        if self.sample_rate as u64 * block_align as u64 > u32::MAX as u64 {
            return Err(ConversionError::InvalidFormat(format!(
                "byte rate overflows 32 bits at {} Hz",
                self.sample_rate
            )));
        }
        Ok(())
    }

    /// Bytes per frame (all channels of one sample instant).
    pub fn block_align(&self) -> u16 {
        (self.channel_count as u32 * self.bit_depth as u32 / 8) as u16
    }

    /// Bytes per second of audio.
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * self.block_align() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_fixes_bit_depth_at_16() {
        let format = AudioFormat::new(16000, 1).unwrap();
        assert_eq!(format.bit_depth, 16);
        assert_eq!(format.block_align(), 2);
        assert_eq!(format.byte_rate(), 32000);
    }

    #[test]
    fn stereo_derived_fields() {
        let format = AudioFormat::new(48000, 2).unwrap();
        assert_eq!(format.block_align(), 4);
        assert_eq!(format.byte_rate(), 192000);
    }

    #[test]
    fn rejects_zero_sample_rate() {
        assert!(matches!(AudioFormat::new(0, 1), Err(ConversionError::InvalidFormat(_))));
    }

    #[test]
    fn rejects_zero_channels() {
        assert!(matches!(AudioFormat::new(8000, 0), Err(ConversionError::InvalidFormat(_))));
    }

    #[test]
    fn rejects_byte_rate_overflow() {
        assert!(AudioFormat::new(u32::MAX, 2).is_err());
        assert!(AudioFormat::new(48000, u16::MAX).is_err());
    }

    #[test]
    fn validate_rejects_other_bit_depths() {
        let format = AudioFormat {
            sample_rate: 8000,
            channel_count: 1,
            bit_depth: 24,
        };
        assert!(format.validate().is_err());
    }
}
