//! Request parameter parsing
//!
//! One policy for every endpoint: a missing or blank `month` falls back to
//! the configured default month (only `/piechart` insists on it), a month
//! that does not resolve yields empty results, and a `page`/`perPage` that
//! is not a positive integer falls back to its default.

use salesboard_config::Config;
use salesboard_core::{build_filter, MonthFilter, Pagination, SaleFilter};
use serde::Deserialize;

use crate::error::ApiError;

/// Query string as sent by clients; every field stays text until validated
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawParams {
    pub month: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
    pub per_page: Option<String>,
}

impl RawParams {
    fn month_name(&self) -> Option<&str> {
        self.month.as_deref().map(str::trim).filter(|m| !m.is_empty())
    }

    /// Requested month name, falling back to the configured default month
    fn month_name_or_default<'a>(&'a self, config: &'a Config) -> &'a str {
        self.month_name().unwrap_or(config.query.default_month.as_str())
    }

    /// Month filter, falling back to the configured default month
    pub fn month_or_default(&self, config: &Config) -> MonthFilter {
        MonthFilter::from_name(self.month_name_or_default(config))
    }

    /// Month filter for endpoints that require the month
    pub fn required_month(&self) -> Result<MonthFilter, ApiError> {
        self.month_name()
            .map(MonthFilter::from_name)
            .ok_or_else(|| ApiError::bad_request("Month is required"))
    }

    pub fn pagination(&self, config: &Config) -> Pagination {
        let page = positive(self.page.as_deref()).unwrap_or(1);
        let per_page = positive(self.per_page.as_deref())
            .unwrap_or(config.pagination.default_per_page)
            .min(config.pagination.max_per_page);
        Pagination::new(page, per_page)
    }
}

fn positive(value: Option<&str>) -> Option<usize> {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|n| *n >= 1)
}

/// Validated parameters of the transaction listing
#[derive(Debug, Clone, PartialEq)]
pub struct ListParams {
    pub filter: SaleFilter,
    pub pagination: Pagination,
}

impl ListParams {
    pub fn from_raw(raw: &RawParams, config: &Config) -> Self {
        Self {
            filter: build_filter(raw.month_name_or_default(config), raw.search.as_deref()),
            pagination: raw.pagination(config),
        }
    }
}
