//! Response structures shared by the core and the API

use serde::{Deserialize, Serialize};

use super::models::StoredRecord;

/// One page of the transaction listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsPage {
    pub transactions: Vec<StoredRecord>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
}

/// Sold/unsold totals for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesStatistics {
    pub total_sale_amount: f64,
    pub total_sold_items: usize,
    pub total_not_sold_items: usize,
}

/// Bar chart entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRangeCount {
    pub range: String,
    pub count: usize,
}

/// Pie chart entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub category: String,
    pub item_count: usize,
}

/// Everything the dashboard shows for one month
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedReport {
    pub transactions: TransactionsPage,
    pub statistics: SalesStatistics,
    pub bar_chart_data: Vec<PriceRangeCount>,
    pub pie_chart_data: Vec<CategoryCount>,
}

/// Outcome of a seed run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedReport {
    pub inserted: usize,
}
