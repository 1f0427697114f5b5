//! Query building: month, search, sold and price predicates plus pagination

use crate::models::SaleRecord;
use crate::month::MonthFilter;
use crate::reports::TransactionsPage;
use crate::store::RecordStore;
use crate::error::CoreResult;

/// Free-text search over title, description and exact price
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTerm {
    needle: String,
    number: Option<f64>,
}

impl SearchTerm {
    /// Returns `None` for an empty or whitespace-only term.
    ///
    /// Surrounding whitespace stays part of the text needle.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            needle: input.to_lowercase(),
            number: trimmed.parse::<f64>().ok().filter(|n| n.is_finite()),
        })
    }

    /// Numeric value of the term, when it is one
    pub fn number(&self) -> Option<f64> {
        self.number
    }

    pub fn matches(&self, record: &SaleRecord) -> bool {
        record.title.to_lowercase().contains(&self.needle)
            || record.description.to_lowercase().contains(&self.needle)
            || self.number.map_or(false, |n| record.price == n)
    }
}

/// Half-open price interval `[min, max)`; no `max` means unbounded above
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: Option<f64>,
}

impl PriceRange {
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && self.max.map_or(true, |max| price < max)
    }
}

/// Conjunction of the predicates a request can place on sale records
#[derive(Debug, Clone, PartialEq)]
pub struct SaleFilter {
    pub month: MonthFilter,
    pub search: Option<SearchTerm>,
    pub sold: Option<bool>,
    pub price: Option<PriceRange>,
}

impl SaleFilter {
    pub fn for_month(month: MonthFilter) -> Self {
        Self {
            month,
            search: None,
            sold: None,
            price: None,
        }
    }

    pub fn with_search(mut self, search: Option<SearchTerm>) -> Self {
        self.search = search;
        self
    }

    pub fn sold(mut self, sold: bool) -> Self {
        self.sold = Some(sold);
        self
    }

    pub fn within(mut self, range: PriceRange) -> Self {
        self.price = Some(range);
        self
    }

    pub fn matches(&self, record: &SaleRecord) -> bool {
        self.month.matches(&record.date_of_sale)
            && self.search.as_ref().map_or(true, |s| s.matches(record))
            && self.sold.map_or(true, |sold| record.sold == Some(sold))
            && self.price.map_or(true, |range| range.contains(record.price))
    }
}

/// Build the listing filter for a month name and optional search text
pub fn build_filter(month: &str, search: Option<&str>) -> SaleFilter {
    SaleFilter::for_month(MonthFilter::from_name(month))
        .with_search(search.and_then(SearchTerm::parse))
}

/// 1-based page window over a filtered result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, per_page: 10 }
    }
}

impl Pagination {
    /// Zero values are raised to 1
    pub fn new(page: usize, per_page: usize) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// Number of matching records before this page
    pub fn skip(&self) -> usize {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

/// One page of matching records plus the total match count
pub async fn list_transactions(
    store: &dyn RecordStore,
    filter: &SaleFilter,
    pagination: Pagination,
) -> CoreResult<TransactionsPage> {
    let transactions = store.find(filter, pagination).await?;
    let total = store.count(filter).await?;
    log::debug!(
        "Listed {} of {} transactions ({}, search={:?}, page={})",
        transactions.len(),
        total,
        filter.month,
        filter.search.is_some(),
        pagination.page
    );
    Ok(TransactionsPage {
        transactions,
        total,
        page: pagination.page,
        per_page: pagination.per_page,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::record;
    use crate::store::MemoryStore;

    #[test]
    fn test_search_term_parsing() {
        assert!(SearchTerm::parse("").is_none());
        assert!(SearchTerm::parse("   ").is_none());

        let term = SearchTerm::parse(" 25 ").unwrap();
        assert_eq!(term.number(), Some(25.0));

        let term = SearchTerm::parse("shirt").unwrap();
        assert_eq!(term.number(), None);

        assert_eq!(SearchTerm::parse("NaN").unwrap().number(), None);
        assert_eq!(SearchTerm::parse("inf").unwrap().number(), None);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let jacket = record("Mens Cotton Jacket", 55.99, "men's clothing", "2022-03-01", true);
        assert!(SearchTerm::parse("cotton").unwrap().matches(&jacket));
        assert!(SearchTerm::parse("JACK").unwrap().matches(&jacket));
        // description is "<title> description"
        assert!(SearchTerm::parse("DESCRIPT").unwrap().matches(&jacket));
        assert!(!SearchTerm::parse("silver").unwrap().matches(&jacket));
    }

    #[test]
    fn test_search_keeps_surrounding_whitespace() {
        let shirts = record("Cotton Shirts", 30.0, "men's clothing", "2022-03-01", true);
        let teeshirt = record("Teeshirt", 12.0, "men's clothing", "2022-03-01", true);

        assert!(!SearchTerm::parse("shirt ").unwrap().matches(&shirts));
        assert!(SearchTerm::parse("shirts").unwrap().matches(&shirts));
        assert!(!SearchTerm::parse(" tee").unwrap().matches(&teeshirt));
        assert!(SearchTerm::parse("tee").unwrap().matches(&teeshirt));
    }

    #[test]
    fn test_numeric_search_matches_price_exactly() {
        let cheap = record("Plain Tee", 25.0, "men's clothing", "2022-03-01", true);
        let labelled = record("Pack of 25 pens", 4.5, "stationery", "2022-03-01", false);
        let other = record("Ring", 25.5, "jewelery", "2022-03-01", false);

        let term = SearchTerm::parse("25").unwrap();
        assert!(term.matches(&cheap));
        assert!(term.matches(&labelled));
        assert!(!term.matches(&other));
    }

    #[test]
    fn test_non_numeric_search_never_matches_price() {
        let tee = record("Plain Tee", 25.0, "men's clothing", "2022-03-01", true);
        assert!(!SearchTerm::parse("25x").unwrap().matches(&tee));
    }

    #[test]
    fn test_price_range_is_half_open() {
        let range = PriceRange { min: 100.0, max: Some(200.0) };
        assert!(range.contains(100.0));
        assert!(range.contains(199.99));
        assert!(!range.contains(200.0));
        assert!(!range.contains(99.99));

        let open = PriceRange { min: 900.0, max: None };
        assert!(open.contains(900.0));
        assert!(open.contains(1e9));
    }

    #[test]
    fn test_filter_combines_month_and_search() {
        let filter = build_filter("March", Some("tee"));
        let march_tee = record("Plain Tee", 25.0, "clothing", "2021-03-15", true);
        let april_tee = record("Plain Tee", 25.0, "clothing", "2021-04-15", true);
        let march_mug = record("Mug", 8.0, "kitchen", "2022-03-02", true);

        assert!(filter.matches(&march_tee));
        assert!(!filter.matches(&april_tee));
        assert!(!filter.matches(&march_mug));

        let no_search = build_filter("March", Some("  "));
        assert!(no_search.search.is_none());
        assert!(no_search.matches(&march_mug));
    }

    #[test]
    fn test_filter_sold_and_price() {
        let sold = record("A", 150.0, "x", "2021-03-01", true);
        let unsold = record("B", 150.0, "x", "2021-03-01", false);
        let month = MonthFilter::from_name("March");

        let filter = SaleFilter::for_month(month).sold(true);
        assert!(filter.matches(&sold));
        assert!(!filter.matches(&unsold));

        let filter = SaleFilter::for_month(month).within(PriceRange { min: 0.0, max: Some(100.0) });
        assert!(!filter.matches(&sold));
    }

    #[test]
    fn test_unresolved_month_matches_nothing() {
        let filter = build_filter("Nonuary", None);
        assert!(!filter.matches(&record("A", 1.0, "x", "2021-03-01", true)));
    }

    #[test]
    fn test_pagination() {
        assert_eq!(Pagination::default().skip(), 0);
        assert_eq!(Pagination::new(3, 10).skip(), 20);
        assert_eq!(Pagination::new(0, 0), Pagination { page: 1, per_page: 1 });
        assert_eq!(Pagination::new(usize::MAX, usize::MAX).skip(), usize::MAX);
    }

    #[tokio::test]
    async fn test_list_transactions_pages_and_counts() {
        let store = MemoryStore::new();
        let mut records = Vec::new();
        for i in 0..25 {
            records.push(record(&format!("Item {}", i), i as f64, "misc", "2022-03-05", i % 2 == 0));
        }
        records.push(record("Item april", 1.0, "misc", "2022-04-05", true));
        store.replace_all(records).await.unwrap();

        let filter = build_filter("March", None);
        let page = list_transactions(&store, &filter, Pagination::new(3, 10)).await.unwrap();
        assert_eq!(page.total, 25);
        assert_eq!(page.page, 3);
        assert_eq!(page.per_page, 10);
        assert_eq!(page.transactions.len(), 5);
        assert_eq!(page.transactions[0].record.title, "Item 20");

        let again = list_transactions(&store, &filter, Pagination::new(3, 10)).await.unwrap();
        assert_eq!(again.transactions, page.transactions);

        let beyond = list_transactions(&store, &filter, Pagination::new(9, 10)).await.unwrap();
        assert!(beyond.transactions.is_empty());
        assert_eq!(beyond.total, 25);
    }
}
