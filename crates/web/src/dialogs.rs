//! `window.confirm` / `window.alert` bindings.

use stockdesk_catalog::Prompt;

#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserPrompt;

impl Prompt for BrowserPrompt {
    fn confirm(&self, message: &str) -> bool {
        // No window means nobody can answer; treat as "no".
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    fn alert(&self, message: &str) {
        if let Some(w) = web_sys::window() {
            let _ = w.alert_with_message(message);
        }
    }
}
