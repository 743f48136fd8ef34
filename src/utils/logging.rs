// Logging utilities
// Structured logging with JSON and human-readable formats, plus masking for
// lead contact data so submissions can be logged without leaking PII.

use log::Level;
use serde_json::json;

/// Mask an email address: keep the first character of the local part and the
/// full domain, which is enough for support to correlate a lead.
pub fn mask_email(email: &str) -> String {
    let s = email.trim();
    if s.is_empty() {
        return String::new();
    }
    let Some((local, domain)) = s.split_once('@') else {
        return "***".to_string();
    };
    let first = local.chars().next().map(String::from).unwrap_or_default();
    format!("{}***@{}", first, domain)
}

/// Mask a phone number: keep the last four digits only.
pub fn mask_phone(phone: &str) -> String {
    let digits: Vec<char> = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return String::new();
    }
    if digits.len() <= 4 {
        return "***".to_string();
    }
    let tail: String = digits[digits.len() - 4..].iter().collect();
    format!("***{}", tail)
}

/// Format log entry as JSON for structured parsing
pub fn format_json_log(timestamp: &str, level: Level, target: &str, message: &str) -> String {
    let log_entry = json!({
        "timestamp": timestamp,
        "level": level.as_str(),
        "target": target,
        "message": message,
    });
    serde_json::to_string(&log_entry).unwrap_or_else(|_| "{}".to_string())
}

/// Format log entry as human-readable text
pub fn format_human_readable_log(
    timestamp: &str,
    level: Level,
    target: &str,
    message: &str,
) -> String {
    format!("[{}] [{}] [{}] {}", timestamp, level.as_str(), target, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_email_keeps_domain_only() {
        let masked = mask_email("jane.doe@example.com");
        assert_eq!(masked, "j***@example.com");
        assert!(!masked.contains("jane.doe"));
    }

    #[test]
    fn mask_email_handles_degenerate_input() {
        assert_eq!(mask_email(""), "");
        assert_eq!(mask_email("no-at-sign"), "***");
    }

    #[test]
    fn mask_phone_keeps_last_four_digits() {
        assert_eq!(mask_phone("(303) 555-1234"), "***1234");
        assert_eq!(mask_phone("3035551234"), "***1234");
    }

    #[test]
    fn mask_phone_handles_short_input() {
        assert_eq!(mask_phone(""), "");
        assert_eq!(mask_phone("911"), "***");
    }

    #[test]
    fn json_log_line_is_valid_json() {
        let line = format_json_log("2026-08-24T12:00:00Z", Level::Info, "lead_wizard", "hello");
        let v: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(v["level"], "INFO");
        assert_eq!(v["message"], "hello");
    }

    #[test]
    fn human_readable_line_contains_all_parts() {
        let line = format_human_readable_log("ts", Level::Warn, "lead_wizard", "careful");
        assert_eq!(line, "[ts] [WARN] [lead_wizard] careful");
    }
}
