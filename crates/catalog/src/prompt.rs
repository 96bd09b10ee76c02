//! Blocking user dialogs (confirm / alert).

/// Yes/no confirmation and acknowledge-only alerts.
///
/// The browser build maps these onto `window.confirm` and `window.alert`.
pub trait Prompt {
    fn confirm(&self, message: &str) -> bool;
    fn alert(&self, message: &str);
}

/// Headless prompt: confirms everything and sends alerts to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogPrompt;

impl Prompt for LogPrompt {
    fn confirm(&self, message: &str) -> bool {
        tracing::debug!(message, "auto-confirming prompt");
        true
    }

    fn alert(&self, message: &str) {
        tracing::info!(message, "alert");
    }
}
