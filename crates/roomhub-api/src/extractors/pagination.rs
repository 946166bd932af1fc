//! Pagination query parameter extractor.

use serde::{Deserialize, Serialize};

use roomhub_core::types::pagination::PageRequest;

/// Query parameters for paginated endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-based, default: 1).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Items per page (default: 20, max: 100).
    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

fn default_page() -> u64 {
    1
}

fn default_per_page() -> u64 {
    20
}

impl PaginationParams {
    /// Converts to a `PageRequest`, clamping out-of-range values.
    pub fn into_page_request(self) -> PageRequest {
        PageRequest::new(self.page, self.per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_per_page_is_clamped() {
        let params = PaginationParams {
            page: 2,
            per_page: 5000,
        };
        let req = params.into_page_request();
        assert_eq!(req.page, 2);
        assert_eq!(req.page_size, 100);
    }
}
