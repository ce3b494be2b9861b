//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// Skip/limit parameters for paginated list queries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ListParams {
    /// Number of items to skip.
    #[serde(default)]
    pub skip: u64,
    /// Maximum number of items to return.
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    200
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
        }
    }
}

impl ListParams {
    /// Clamps the limit to the given maximum.
    #[must_use]
    pub fn clamped(self, max_limit: u64) -> Self {
        Self {
            skip: self.skip,
            limit: self.limit.min(max_limit),
        }
    }
}

/// Response wrapper for paginated data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The items in the current page.
    pub data: Vec<T>,
    /// Number of items skipped.
    pub skip: u64,
    /// Limit applied to this page.
    pub limit: u64,
    /// Total number of items across all pages.
    pub total: u64,
}

impl<T> PageResponse<T> {
    /// Creates a new paginated response.
    #[must_use]
    pub fn new(data: Vec<T>, params: ListParams, total: u64) -> Self {
        Self {
            data,
            skip: params.skip,
            limit: params.limit,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = ListParams::default();
        assert_eq!(params.skip, 0);
        assert_eq!(params.limit, 200);
    }

    #[test]
    fn test_clamped_limit() {
        let params = ListParams {
            skip: 10,
            limit: 5000,
        };
        let clamped = params.clamped(500);
        assert_eq!(clamped.skip, 10);
        assert_eq!(clamped.limit, 500);
    }

    #[test]
    fn test_clamped_keeps_small_limit() {
        let params = ListParams { skip: 0, limit: 20 };
        assert_eq!(params.clamped(500).limit, 20);
    }

    #[test]
    fn test_page_response() {
        let params = ListParams { skip: 5, limit: 10 };
        let page = PageResponse::new(vec![1, 2, 3], params, 42);
        assert_eq!(page.data.len(), 3);
        assert_eq!(page.skip, 5);
        assert_eq!(page.limit, 10);
        assert_eq!(page.total, 42);
    }
}
