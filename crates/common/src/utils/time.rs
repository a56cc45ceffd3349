//! Timestamp helpers shared with the downstream services.
//!
//! Timestamps travel as UTC strings in `YYYY-MM-DD HH:MM:SS.ffffff` form,
//! which sort lexicographically in time order.

use chrono::Utc;

/// Timestamp carried by resources that have not been deleted.
pub const DEFAULT_TIMESTAMP: &str = "9999-01-01 00:00:00.000000";

/// `chrono` format string for the wire timestamp.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Current UTC time in wire format.
///
/// ```
/// let now = common::utils::time::cur_time();
/// assert_eq!(now.len(), "2006-01-02 15:04:05.000000".len());
/// ```
pub fn cur_time() -> String {
    Utc::now().format(TIME_FORMAT).to_string()
}

/// Whether a soft-delete timestamp marks the resource as deleted.
///
/// `None` and the empty string mean the field was never set. Anything that
/// sorts before [`DEFAULT_TIMESTAMP`] is a real deletion time.
pub fn is_deleted(tm_delete: Option<&str>) -> bool {
    match tm_delete {
        Some(ts) if !ts.is_empty() => ts < DEFAULT_TIMESTAMP,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    #[test]
    fn cur_time_parses_back() {
        let now = cur_time();
        assert!(
            NaiveDateTime::parse_from_str(&now, TIME_FORMAT).is_ok(),
            "unexpected format: {now}"
        );
    }

    #[test]
    fn sentinel_is_not_deleted() {
        assert!(!is_deleted(Some(DEFAULT_TIMESTAMP)));
        assert!(!is_deleted(None));
        assert!(!is_deleted(Some("")));
    }

    #[test]
    fn past_timestamp_is_deleted() {
        assert!(is_deleted(Some("2021-03-02 01:00:00.995000")));
    }
}
