//! Pagination types and utilities for consistent pagination across all endpoints

use crate::error::{api_success_with_meta, ApiResponse, PaginationInfo, ResponseMetadata};
use audit_engine::DEFAULT_PER_PAGE;
use serde::Deserialize;
use utoipa::IntoParams;

/// Standard pagination parameters for list endpoints
///
/// Values arrive as raw strings so that a malformed number falls back to the
/// default instead of rejecting the whole request.
#[derive(Debug, Deserialize, IntoParams, Clone, Default)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// 1-based page; 0 or unparsable reads as 1
    #[param(value_type = Option<u32>, example = 1, minimum = 1)]
    pub page: Option<String>,

    /// Page size; 0 or unparsable reads as 10
    #[param(value_type = Option<u32>, example = 10, minimum = 1)]
    pub per_page: Option<String>,
}

impl PaginationParams {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: Some(page.to_string()),
            per_page: Some(per_page.to_string()),
        }
    }

    /// The page as sent, when it parses as a number
    pub fn requested_page(&self) -> Option<u32> {
        self.page.as_deref().and_then(|p| p.trim().parse().ok())
    }

    pub fn requested_per_page(&self) -> Option<u32> {
        self.per_page.as_deref().and_then(|p| p.trim().parse().ok())
    }

    /// Get the page number (defaults to 1, minimum 1)
    pub fn page(&self) -> u32 {
        self.requested_page().unwrap_or(1).max(1)
    }

    /// Get the page size (defaults to 10, 0 reads as the default)
    pub fn per_page(&self) -> u32 {
        self.requested_per_page()
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_PER_PAGE)
    }

    pub fn offset(&self) -> usize {
        let offset = u64::from(self.page() - 1) * u64::from(self.per_page());
        usize::try_from(offset).unwrap_or(usize::MAX)
    }

    /// Calculate total pages given a total count
    pub fn total_pages(&self, total_count: usize) -> u32 {
        if total_count == 0 {
            return 1;
        }
        let per_page = self.per_page() as usize;
        u32::try_from(total_count.div_ceil(per_page)).unwrap_or(u32::MAX)
    }

    /// Create response metadata with pagination info
    pub fn to_metadata(&self, total_count: usize) -> ResponseMetadata {
        let total_pages = self.total_pages(total_count);

        ResponseMetadata {
            pagination: Some(PaginationInfo {
                page: self.page(),
                per_page: self.per_page(),
                total_pages,
                has_next: self.page() < total_pages,
                has_previous: self.page() > 1,
            }),
            total_count: Some(u64::try_from(total_count).unwrap_or(u64::MAX)),
        }
    }

    /// Cut the current page out of an already filtered list
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset())
            .take(self.per_page() as usize)
            .collect()
    }

    /// Wrap data with pagination metadata
    pub fn wrap_response<T>(&self, data: T, total_count: usize) -> ApiResponse<T> {
        api_success_with_meta(data, self.to_metadata(total_count))
    }
}
