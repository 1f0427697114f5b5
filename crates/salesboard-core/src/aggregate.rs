//! Monthly aggregates: sale totals, price histogram and category breakdown

use std::sync::Arc;
use tokio::task::JoinSet;

use crate::buckets::{BUCKET_COUNT, PRICE_BUCKETS};
use crate::error::{CoreError, CoreResult};
use crate::month::MonthFilter;
use crate::query::SaleFilter;
use crate::reports::{CategoryCount, PriceRangeCount, SalesStatistics};
use crate::store::StoreRef;

/// Read-only aggregate queries over a record store
#[derive(Clone)]
pub struct Aggregator {
    store: StoreRef,
}

impl Aggregator {
    pub fn new(store: StoreRef) -> Self {
        Self { store }
    }

    /// Total sold amount and sold/unsold counts for the month
    pub async fn statistics(&self, month: MonthFilter) -> CoreResult<SalesStatistics> {
        let sold = SaleFilter::for_month(month).sold(true);
        let not_sold = SaleFilter::for_month(month).sold(false);

        let (total_sale_amount, total_sold_items, total_not_sold_items) = tokio::try_join!(
            self.store.sum_price(&sold),
            self.store.count(&sold),
            self.store.count(&not_sold),
        )?;

        Ok(SalesStatistics {
            total_sale_amount,
            total_sold_items,
            total_not_sold_items,
        })
    }

    /// One count per price bucket, in bucket order, zero counts included.
    ///
    /// The ten counts run as independent tasks; any failure fails the whole
    /// histogram.
    pub async fn price_histogram(&self, month: MonthFilter) -> CoreResult<Vec<PriceRangeCount>> {
        let mut tasks = JoinSet::new();
        for (index, bucket) in PRICE_BUCKETS.iter().enumerate() {
            let store = Arc::clone(&self.store);
            let filter = SaleFilter::for_month(month).within(bucket.range);
            tasks.spawn(async move { (index, store.count(&filter).await) });
        }

        let mut counts = [0usize; BUCKET_COUNT];
        while let Some(joined) = tasks.join_next().await {
            let (index, count) = joined.map_err(|e| CoreError::Internal {
                message: format!("price bucket task failed: {}", e),
            })?;
            counts[index] = count?;
        }

        Ok(PRICE_BUCKETS
            .iter()
            .zip(counts)
            .map(|(bucket, count)| PriceRangeCount {
                range: bucket.label.to_string(),
                count,
            })
            .collect())
    }

    /// Item count per category, categories compared case-insensitively
    pub async fn category_breakdown(&self, month: MonthFilter) -> CoreResult<Vec<CategoryCount>> {
        let groups = self.store.count_by_category(&SaleFilter::for_month(month)).await?;
        Ok(groups
            .into_iter()
            .map(|(category, item_count)| CategoryCount {
                category: capitalize_label(&category),
                item_count,
            })
            .collect())
    }
}

/// First character uppercased, the rest lowercased
pub fn capitalize_label(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
