//! Core data models for sale records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A single sale as delivered by the seed source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    #[serde(default, deserialize_with = "text_or_empty")]
    pub title: String,
    pub price: f64,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub category: String,
    /// Product image URL
    #[serde(default, deserialize_with = "text_or_empty")]
    pub image: String,
    /// Instant of sale; month filtering uses its UTC calendar month
    pub date_of_sale: DateTime<Utc>,
    /// `None` when upstream left it out or sent `null`; such records are
    /// neither sold nor unsold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sold: Option<bool>,
}

/// Missing and `null` text both decode as the empty string
fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A sale record together with its store-assigned id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: u64,
    #[serde(flatten)]
    pub record: SaleRecord,
}
