//! Bookings
//!
//! A booking is an immutable snapshot of a submitted cart plus the customer
//! details captured at submission time. Once persisted it is never updated
//! in place; the ledger only ever appends or removes whole records.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    cart::{Cart, LineItem},
    money::Rupees,
};

/// Customer details captured once at submission time.
///
/// `name`, `email`, `phone` and `address` are required; the pickup slot and
/// note may be empty. Serializes with the persisted ledger's field names
/// (`date`, `time`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Full name.
    #[serde(default)]
    pub name: String,

    /// Contact email.
    #[serde(default)]
    pub email: String,

    /// Contact phone number.
    #[serde(default)]
    pub phone: String,

    /// Pickup address.
    #[serde(default)]
    pub address: String,

    /// Requested pickup date; may be empty.
    #[serde(rename = "date", default)]
    pub pickup_date: String,

    /// Requested pickup time; may be empty.
    #[serde(rename = "time", default)]
    pub pickup_time: String,

    /// Free-form note; may be empty.
    #[serde(default)]
    pub note: String,
}

impl Customer {
    /// The first required field that is blank or whitespace-only, if any.
    #[must_use]
    pub fn missing_required_field(&self) -> Option<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("address", &self.address),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }
}

/// A persisted booking record.
///
/// Deserialization normalizes legacy records that predate the `total`
/// field by falling back to `subtotal`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Unique id derived from the creation time, e.g. `bk_1700000000000`.
    pub id: String,

    /// Creation timestamp, persisted as ISO-8601 with milliseconds.
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,

    /// Customer details captured at submission time.
    pub customer: Customer,

    /// Snapshot of the cart lines, detached from the live cart.
    pub items: Vec<LineItem>,

    /// Sum of all line totals at creation time.
    pub subtotal: Rupees,

    /// Tax, fixed at zero.
    pub tax: Rupees,

    /// `subtotal + tax` at creation time; never recomputed afterwards.
    pub total: Rupees,
}

impl Booking {
    /// Materialize a booking from the current cart contents.
    ///
    /// The items are a deep copy: mutating the cart afterwards cannot affect
    /// the record.
    #[must_use]
    pub fn new(customer: Customer, cart: &Cart, created_at: DateTime<Utc>) -> Self {
        Booking {
            id: format!("bk_{}", created_at.timestamp_millis()),
            created_at,
            customer,
            items: cart.snapshot(),
            subtotal: cart.subtotal(),
            tax: cart.tax(),
            total: cart.total(),
        }
    }

    /// The creation timestamp as ISO-8601 with milliseconds.
    #[must_use]
    pub fn created_at_iso(&self) -> String {
        self.created_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// One human-readable line per item, for notification messages.
    ///
    /// Format: `Wash & Fold - Shirt × 2 = ₹40`.
    #[must_use]
    pub fn items_summary(&self) -> String {
        self.items
            .iter()
            .map(|item| {
                format!(
                    "{} - {} × {} = ₹{}",
                    item.service_name,
                    item.cloth,
                    item.qty,
                    item.line_total.value()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<'de> Deserialize<'de> for Booking {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawBooking::deserialize(deserializer)?;

        Ok(Booking {
            id: raw.id,
            created_at: raw.created_at,
            customer: raw.customer,
            items: raw.items,
            subtotal: raw.subtotal,
            tax: raw.tax,
            total: raw.total.unwrap_or(raw.subtotal),
        })
    }
}

/// Wire shape tolerating records written before `total` existed.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBooking {
    id: String,

    #[serde(deserialize_with = "iso_millis::deserialize")]
    created_at: DateTime<Utc>,

    #[serde(default)]
    customer: Customer,

    #[serde(default)]
    items: Vec<LineItem>,

    #[serde(default)]
    subtotal: Rupees,

    #[serde(default)]
    tax: Rupees,

    total: Option<Rupees>,
}

/// ISO-8601 timestamps pinned to millisecond precision, matching the
/// persisted layout (`2024-01-01T00:00:00.000Z`).
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;

        DateTime::parse_from_rfc3339(&raw)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(de::Error::custom)
    }
}
