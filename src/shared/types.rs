use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::shared::constants::DEFAULT_PAGE_SIZE;

/// Validation messages keyed by field name
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Error body returned by the JSON API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub errors: Option<FieldErrors>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: None,
        }
    }

    pub fn with_errors(message: impl Into<String>, errors: FieldErrors) -> Self {
        Self {
            message: message.into(),
            errors: Some(errors),
        }
    }
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Highest page whose offset still fits in an `i64`
const MAX_PAGE: i64 = i64::MAX / DEFAULT_PAGE_SIZE;

/// Page query parameter for paginated listings.
///
/// Kept as raw text so `?page=abc` falls back to the first page instead of
/// rejecting the request.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct PaginationQuery {
    /// Page number (1-indexed, default: 1)
    #[serde(default)]
    #[param(value_type = Option<i64>, minimum = 1)]
    pub page: Option<String>,
}

impl PaginationQuery {
    pub fn new(page: i64) -> Self {
        Self {
            page: Some(page.to_string()),
        }
    }

    /// Requested page, clamped to `1..=MAX_PAGE`; unparsable input is page 1
    pub fn page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .unwrap_or(1)
            .clamp(1, MAX_PAGE)
    }

    /// Calculate the row offset from the page number
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.limit())
    }

    pub fn limit(&self) -> i64 {
        DEFAULT_PAGE_SIZE
    }

    /// Same query with the page capped at the last page of `total` rows
    pub fn within(&self, total: i64) -> Self {
        Self::new(self.page().min(last_page(total, self.limit())))
    }
}

fn last_page(total: i64, per_page: i64) -> i64 {
    (total.max(0) / per_page + i64::from(total % per_page > 0)).max(1)
}

/// One page of a listing together with the numbers a pager needs.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub last_page: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, query: &PaginationQuery, total: i64) -> Self {
        let per_page = query.limit();
        Self {
            items,
            page: query.page(),
            per_page,
            total,
            last_page: last_page(total, per_page),
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.last_page
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            last_page: self.last_page,
        }
    }
}
