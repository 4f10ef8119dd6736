use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::DEFAULT_UNIT;
use crate::marketplace::timestamp::parse_timestamp;
use crate::traits::Document;

/// A time-bounded sale listing as stored in the `auctions` collection.
///
/// Fields keep the store's camelCase names so the record can be handed to
/// the bid view unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Store document id
    pub id: String,

    /// Store-assigned auction number shown on the card badge
    pub auction_id: String,

    pub item_name: String,

    /// Empty when the stored value is missing or not a string
    pub location: String,

    pub quantity: f64,

    pub price_per_unit: f64,

    /// Unit label; `None` falls back to `QT` for display
    pub unit: Option<String>,

    /// Raw stored start date
    pub auction_start_date: String,

    /// Raw stored end date, parsed on demand
    pub auction_end_date: String,

    pub image_url: String,

    pub seller_email: String,

    pub seller_name: Option<String>,
}

impl Listing {
    /// Normalize a raw store document into a listing.
    ///
    /// Never fails: missing or mistyped fields take neutral defaults and an
    /// unparsable end date simply makes the listing inactive.
    pub fn from_document(doc: &Document) -> Self {
        Self {
            id: doc.id.clone(),
            auction_id: text_field(doc, "auctionId"),
            item_name: text_field(doc, "itemName"),
            location: doc.get_str("location").unwrap_or_default().to_string(),
            quantity: number_field(doc, "quantity"),
            price_per_unit: number_field(doc, "pricePerUnit"),
            unit: optional_text_field(doc, "unit"),
            auction_start_date: date_field(doc, "auctionStartDate"),
            auction_end_date: date_field(doc, "auctionEndDate"),
            image_url: text_field(doc, "imageUrl"),
            seller_email: text_field(doc, "sellerEmail"),
            seller_name: optional_text_field(doc, "sellerName"),
        }
    }

    /// Parsed end instant, or `None` if the stored value is invalid.
    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.auction_end_date)
    }

    /// Check if the auction is still active at `now` (end time not passed).
    ///
    /// Listings with an invalid end time are never active.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.end_time().is_some_and(|end| end >= now)
    }

    /// Unit label for display.
    pub fn unit_label(&self) -> &str {
        self.unit
            .as_deref()
            .filter(|unit| !unit.is_empty())
            .unwrap_or(DEFAULT_UNIT)
    }
}

fn text_field(doc: &Document, field: &str) -> String {
    doc.get_str(field).unwrap_or_default().to_string()
}

fn optional_text_field(doc: &Document, field: &str) -> Option<String> {
    doc.get_str(field).map(str::to_string)
}

fn number_field(doc: &Document, field: &str) -> f64 {
    match doc.get(field) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Stored dates are text; a JSON number is epoch milliseconds and is
/// rewritten as an RFC 3339 UTC string.
fn date_field(doc: &Document, field: &str) -> String {
    match doc.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
            .unwrap_or_default(),
        _ => String::new(),
    }
}
