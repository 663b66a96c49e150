//! Browser Dialogs
//!
//! Blocking `window.confirm` / `alert` / `prompt`, plugged into the
//! controllers' confirmation policy.

use ringlist_core::{Confirm, Confirmation, DomainResult, Outcome};

/// Confirmation policy backed by `window.confirm`
pub struct BrowserConfirm;

impl Confirm for BrowserConfirm {
    fn confirm(&self, request: &Confirmation) -> bool {
        confirm(request.message())
    }
}

pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

pub fn alert(message: &str) {
    if let Some(w) = web_sys::window() {
        let _ = w.alert_with_message(message);
    }
}

/// `None` when the user cancels
pub fn prompt(message: &str) -> Option<String> {
    web_sys::window()?.prompt_with_message(message).ok().flatten()
}

/// Show the notice of an applied action, log a failed one
pub fn report(action: &str, result: DomainResult<Outcome>) {
    match result {
        Ok(outcome) => {
            if let Some(notice) = outcome.notice() {
                alert(&notice.message());
            }
        }
        Err(e) => log::error!("{} failed: {}", action, e),
    }
}
