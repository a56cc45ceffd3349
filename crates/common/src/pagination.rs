//! Pagination utilities for list operations
//!
//! Downstream lists are ordered by creation time, newest first, and paged by
//! a timestamp watermark. An empty token means "start from now".

use crate::utils::time::cur_time;

/// Largest page a caller may request.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Pagination parameters
#[derive(Clone, Debug, Default)]
pub struct Pagination {
    /// items per page
    pub size: u64,
    /// timestamp watermark; empty for the first page
    pub token: String,
}

impl Pagination {
    pub fn new(size: u64, token: &str) -> Self { Self { size, token: token.to_string() } }

    /// Fill the token with the current time and clamp the size to `1..=100`.
    /// Returns `(token, size)` ready for the downstream list RPC.
    pub fn normalize(self) -> (String, u64) {
        let token = if self.token.is_empty() { cur_time() } else { self.token };
        let size = if self
            .size == 0 || self
            .size > MAX_PAGE_SIZE { MAX_PAGE_SIZE } else { self.size };
        (token, size)
    }
}

#[cfg(test)]
mod tests {
    use super::Pagination;

    #[test]
    fn empty_token_defaults_to_now() {
        let (token, size) = Pagination::new(10, "").normalize();
        assert!(!token.is_empty());
        assert!(token.starts_with("20"));
        assert_eq!(size, 10);
    }

    #[test]
    fn token_is_kept() {
        let (token, _) = Pagination::new(10, "2021-03-02 01:00:00.995000").normalize();
        assert_eq!(token, "2021-03-02 01:00:00.995000");
    }

    #[test]
    fn size_clamps_to_max() {
        assert_eq!(Pagination::new(0, "t").normalize().1, 100);
        assert_eq!(Pagination::new(1000, "t").normalize().1, 100);
        assert_eq!(Pagination::default().normalize().1, 100);
    }
}
