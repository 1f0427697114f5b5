//! Route modules for the API server
//!
//! - seed: replace the record store with upstream data
//! - transactions: filtered, paginated transaction listing
//! - charts: monthly statistics, price histogram, category breakdown
//! - combined: all of the above in one response
//!
//! Handlers only parse parameters, call the core and serialize; every core
//! failure is logged and answered with a generic 500.

pub mod charts;
pub mod combined;
pub mod seed;
pub mod transactions;

pub use charts::{api_barchart, api_piechart, api_statistics};
pub use combined::api_combined;
pub use seed::api_seed;
pub use transactions::api_transactions;
