use std::path::PathBuf;

/// Configuration for a conversion job.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionConfiguration {
    /// Output sample rate in Hz (default: 16000).
    pub sample_rate: u32,

    /// Number of output channels (default: 1).
    pub channels: u16,

    /// Directory where converted files are written.
    pub output_directory: PathBuf,

    /// Fraction of frames padded or discarded above which assembly logs a
    /// warning (default: 0.1). `None` disables the warning.
    pub warning_threshold: Option<f64>,

    /// Write a `.metadata.json` sidecar next to saved files (default: true).
    pub write_metadata: bool,
}

impl ConversionConfiguration {
    pub fn validate(&self) -> Result<(), String> {
        if self.sample_rate == 0 {
            return Err("sample rate must be positive".into());
        }
        if self.channels == 0 {
            return Err("channel count must be at least 1".into());
        }
        if let Some(threshold) = self.warning_threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(format!("warning threshold out of range: {}", threshold));
            }
        }
        Ok(())
    }
}

impl Default for ConversionConfiguration {
    fn default() -> Self {
        Self {
            sample_rate: 16000,
            channels: 1,
            output_directory: PathBuf::from("."),
            warning_threshold: Some(0.1),
            write_metadata: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_16khz_mono() {
        let config = ConversionConfiguration::default();
        assert_eq!(config.sample_rate, 16000);
        assert_eq!(config.channels, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_zero_rate_and_channels() {
        let config = ConversionConfiguration {
            sample_rate: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ConversionConfiguration {
            channels: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_threshold_out_of_range() {
        let config = ConversionConfiguration {
            warning_threshold: Some(1.5),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ConversionConfiguration {
            warning_threshold: None,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
