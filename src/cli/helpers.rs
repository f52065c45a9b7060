//! Shared helper functions for CLI commands

use crate::core::identity::EntityId;

/// Format an EntityId for display, truncating if too long
///
/// IDs longer than 16 characters are truncated to 13 chars with "..." suffix.
pub fn format_short_id(id: &EntityId) -> String {
    format_short_id_str(&id.to_string())
}

/// Same behavior as format_short_id but works with &str
pub fn format_short_id_str(id: &str) -> String {
    if id.len() > 16 {
        format!("{}...", &id[..13])
    } else {
        id.to_string()
    }
}

/// Truncate a string to max_len, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

/// Format an optional money amount with two decimals, "-" when unset
pub fn format_money(amount: Option<f64>) -> String {
    match amount {
        Some(v) => format!("{:.2}", v),
        None => "-".to_string(),
    }
}

/// Format a signed money amount with an explicit sign for positives
pub fn format_signed_money(amount: f64) -> String {
    if amount > 0.0 {
        format!("+{:.2}", amount)
    } else {
        format!("{:.2}", amount)
    }
}
