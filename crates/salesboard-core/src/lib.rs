//! Core sale-record processing
//!
//! - models: sale records as seeded and as stored
//! - month: month-name resolution and the month predicate
//! - query: search/sold/price predicates, pagination, transaction listing
//! - buckets: fixed price buckets for the bar chart
//! - store: the record store trait and its in-memory implementation
//! - aggregate: statistics, price histogram, category breakdown
//! - seed: fetching upstream records and replacing the store contents

pub mod aggregate;
pub mod buckets;
pub mod error;
pub mod models;
pub mod month;
pub mod query;
pub mod reports;
pub mod seed;
pub mod store;

pub use aggregate::{capitalize_label, Aggregator};
pub use buckets::{PriceBucket, PRICE_BUCKETS};
pub use error::{CoreError, CoreResult, DefaultErrorLogger, ErrorCode, ErrorContext, ErrorLogger, ErrorSeverity};
pub use models::{SaleRecord, StoredRecord};
pub use month::{month_name_to_index, MonthFilter};
pub use query::{build_filter, list_transactions, Pagination, PriceRange, SaleFilter, SearchTerm};
pub use reports::{CategoryCount, CombinedReport, PriceRangeCount, SalesStatistics, SeedReport, TransactionsPage};
pub use seed::{HttpSeedSource, SeedLoader, SeedSource, SeedSourceRef, StaticSeedSource};
pub use store::{MemoryStore, RecordStore, StoreRef};
