//! Blocking browser dialogs.

pub fn alert(message: &str) {
    let Some(window) = web_sys::window() else {
        log::warn!("alert without window: {message}");
        return;
    };
    if window.alert_with_message(message).is_err() {
        log::warn!("alert suppressed: {message}");
    }
}

/// Ask the user to confirm; anything but an explicit OK counts as a no.
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}
