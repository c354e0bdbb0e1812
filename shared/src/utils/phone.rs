//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Anything that is not an ASCII digit or a leading plus sign
static FORMATTING_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9+]").unwrap());

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    FORMATTING_CHARS.replace_all(phone.trim(), "").into_owned()
}

/// Mask a phone number for logs, keeping only the last 4 digits visible
///
/// ```
/// use pv_shared::utils::phone::mask_phone_number;
///
/// assert_eq!(mask_phone_number("+919876543210"), "+********3210");
/// assert_eq!(mask_phone_number("9876543210"), "******3210");
/// ```
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    let len = normalized.chars().count();
    if len <= 4 {
        return "*".repeat(len);
    }

    let visible: String = normalized.chars().skip(len - 4).collect();
    if normalized.starts_with('+') {
        format!("+{}{}", "*".repeat(len - 5), visible)
    } else {
        format!("{}{}", "*".repeat(len - 4), visible)
    }
}
