use crate::models::conversion_result::ConversionResult;
use crate::models::error::ConversionError;
use crate::models::state::JobState;

/// Event delegate for conversion job notifications.
///
/// All methods are called synchronously on the thread driving the job.
/// Implementations should marshal to a UI thread if needed.
pub trait ConversionDelegate: Send + Sync {
    /// Called when the job state changes.
    fn on_state_changed(&self, state: &JobState);

    /// Called with the fraction (0.0–1.0) of the declared frames collected so far.
    fn on_progress(&self, fraction: f32);

    /// Called when the job fails.
    fn on_error(&self, error: &ConversionError);

    /// Called once the WAV container is ready (and saved, when saving was requested).
    fn on_conversion_finished(&self, result: &ConversionResult);
}
