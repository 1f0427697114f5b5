//! Fixed price buckets for the bar chart

use crate::query::PriceRange;

/// A labelled price interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBucket {
    pub label: &'static str,
    pub range: PriceRange,
}

const fn bucket(label: &'static str, min: f64, max: Option<f64>) -> PriceBucket {
    PriceBucket {
        label,
        range: PriceRange { min, max },
    }
}

/// Number of histogram buckets
pub const BUCKET_COUNT: usize = 10;

/// Contiguous `[0,100), [100,200), ... [900, inf)` in chart order.
///
/// Labels keep the published `101-200` style even though the lower bound is
/// inclusive at the hundred, so no price falls between buckets.
pub static PRICE_BUCKETS: [PriceBucket; BUCKET_COUNT] = [
    bucket("0-100", 0.0, Some(100.0)),
    bucket("101-200", 100.0, Some(200.0)),
    bucket("201-300", 200.0, Some(300.0)),
    bucket("301-400", 300.0, Some(400.0)),
    bucket("401-500", 400.0, Some(500.0)),
    bucket("501-600", 500.0, Some(600.0)),
    bucket("601-700", 600.0, Some(700.0)),
    bucket("701-800", 700.0, Some(800.0)),
    bucket("801-900", 800.0, Some(900.0)),
    bucket("901-above", 900.0, None),
];
