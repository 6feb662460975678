//! Sanitizing error messages before they leave the service.
//!
//! Upstream errors can carry control characters (from server banners or
//! decoded bodies) and can be arbitrarily long; both are cleaned up before a
//! message is placed in a JSON error response.

use crate::config::MAX_ERROR_MESSAGE_LENGTH;

/// Sanitizes an error message by removing control characters.
///
/// Keeps printable characters, newline, tab and carriage return.
pub fn sanitize_error_message(message: &str) -> String {
    message
        .chars()
        .filter(|c| {
            let code = *c as u32;
            code >= 0x20 // Printable ASCII starts at 0x20 (space)
                || code == 0x09 // Tab
                || code == 0x0A // Newline
                || code == 0x0D // Carriage return
        })
        .filter(|c| *c != '\u{7f}')
        .collect()
}

/// Sanitizes and truncates an error message to `MAX_ERROR_MESSAGE_LENGTH` characters.
///
/// Truncated messages end with a note about the original length.
pub fn sanitize_and_truncate_error_message(message: &str) -> String {
    let sanitized = sanitize_error_message(message);
    let length = sanitized.chars().count();

    if length > MAX_ERROR_MESSAGE_LENGTH {
        // Leave room for the truncation note
        let keep = MAX_ERROR_MESSAGE_LENGTH.saturating_sub(50);
        let truncated: String = sanitized.chars().take(keep).collect();
        format!(
            "{}... (truncated, original length: {} chars)",
            truncated, length
        )
    } else {
        sanitized
    }
}
