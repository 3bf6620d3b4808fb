use super::error::ConversionError;

/// Conversion job state machine.
///
/// State transitions:
/// ```text
/// idle → collecting → assembling → encoding → completed
///            ↓             ↓           ↓
///        cancelled       failed      failed
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum JobState {
    Idle,
    Collecting,
    Assembling,
    Encoding,
    Completed,
    Failed(ConversionError),
    Cancelled,
}

impl JobState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_collecting(&self) -> bool {
        matches!(self, Self::Collecting)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed(_) | Self::Cancelled)
    }
}
