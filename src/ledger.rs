//! Booking ledger
//!
//! The repository over the persisted booking sequence: the sole gateway to
//! the stored value, so every read-modify-write cycle goes through one
//! place.
//!
//! Access is read-modify-write over a single key with no locking. Two
//! sessions sharing one store can lose updates: both read the old array and
//! the second write silently overwrites the first. The engine assumes a
//! single active session per store.

use tracing::warn;

use crate::{
    booking::Booking,
    store::{KeyValueStore, StorageError},
};

/// Key under which the serialized booking array is persisted.
pub const BOOKINGS_KEY: &str = "lm_bookings";

/// Repository over the persisted booking ledger.
#[derive(Debug)]
pub struct Ledger<S> {
    store: S,
}

impl<S: KeyValueStore> Ledger<S> {
    /// Creates a ledger over the given store.
    #[must_use]
    pub fn new(store: S) -> Self {
        Ledger { store }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load every booking, oldest first.
    ///
    /// Never fails: an unreadable store or malformed persisted value is
    /// logged and treated as an empty ledger.
    #[must_use]
    pub fn load(&self) -> Vec<Booking> {
        let raw = match self.store.get(BOOKINGS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(error) => {
                warn!(%error, "failed to read the booking ledger, treating it as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(bookings) => bookings,
            Err(error) => {
                warn!(%error, "failed to parse the booking ledger, treating it as empty");
                Vec::new()
            }
        }
    }

    /// Append one booking to the ledger.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the write-back fails; the stored value is
    /// left untouched in that case.
    pub fn append(&mut self, booking: Booking) -> Result<(), StorageError> {
        let mut bookings = self.load();

        bookings.push(booking);

        self.persist(&bookings)
    }

    /// Remove the first booking with the given id.
    ///
    /// Returns whether a booking was removed. When the id is not found the
    /// stored value is not rewritten at all.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the write-back fails.
    pub fn remove(&mut self, id: &str) -> Result<bool, StorageError> {
        let mut bookings = self.load();

        let Some(position) = bookings.iter().position(|booking| booking.id == id) else {
            return Ok(false);
        };

        bookings.remove(position);

        self.persist(&bookings)?;

        Ok(true)
    }

    /// Delete the entire ledger. Irreversible.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the store rejects the deletion.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.store.remove(BOOKINGS_KEY)
    }

    fn persist(&mut self, bookings: &[Booking]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(bookings).map_err(|error| StorageError::Write {
            key: BOOKINGS_KEY.to_string(),
            source: std::io::Error::other(error),
        })?;

        self.store.set(BOOKINGS_KEY, raw)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use testresult::TestResult;

    use crate::{
        booking::Customer,
        cart::{Cart, LineItem},
        money::Rupees,
        store::MemoryStore,
    };

    use super::*;

    fn booking(minute: u32) -> Booking {
        let mut cart = Cart::new();

        cart.add(LineItem::new(
            "washfold",
            "Wash & Fold",
            "Shirt",
            2,
            Rupees::new(20),
        ));

        let created_at = Utc
            .with_ymd_and_hms(2024, 1, 1, 0, minute, 0)
            .single()
            .unwrap_or_default();

        Booking::new(
            Customer {
                name: "Asha Rao".to_string(),
                email: "asha@example.com".to_string(),
                phone: "9876543210".to_string(),
                address: "12 MG Road".to_string(),
                ..Customer::default()
            },
            &cart,
            created_at,
        )
    }

    #[test]
    fn load_on_a_fresh_store_is_empty() {
        let ledger = Ledger::new(MemoryStore::new());

        assert!(ledger.load().is_empty());
    }

    #[test]
    fn load_recovers_from_malformed_data() -> TestResult {
        let mut store = MemoryStore::new();
        store.set(BOOKINGS_KEY, "not json at all".to_string())?;

        let ledger = Ledger::new(store);

        assert!(ledger.load().is_empty());

        Ok(())
    }

    #[test]
    fn append_then_load_round_trips() -> TestResult {
        let mut ledger = Ledger::new(MemoryStore::new());
        let booking = booking(0);

        ledger.append(booking.clone())?;

        assert_eq!(ledger.load(), vec![booking]);

        Ok(())
    }

    #[test]
    fn append_preserves_insertion_order() -> TestResult {
        let mut ledger = Ledger::new(MemoryStore::new());

        ledger.append(booking(0))?;
        ledger.append(booking(1))?;

        let ids: Vec<String> = ledger.load().into_iter().map(|b| b.id).collect();

        assert_eq!(ids.len(), 2);
        assert!(ids.first() < ids.get(1), "older booking should come first");

        Ok(())
    }

    #[test]
    fn remove_deletes_matching_booking() -> TestResult {
        let mut ledger = Ledger::new(MemoryStore::new());
        let booking = booking(0);
        let id = booking.id.clone();

        ledger.append(booking)?;

        assert!(ledger.remove(&id)?);
        assert!(ledger.load().is_empty());

        Ok(())
    }

    #[test]
    fn remove_unknown_id_leaves_stored_value_untouched() -> TestResult {
        let mut ledger = Ledger::new(MemoryStore::new());

        ledger.append(booking(0))?;

        let before = ledger.store().get(BOOKINGS_KEY)?;

        assert!(!ledger.remove("bk_missing")?);

        let after = ledger.store().get(BOOKINGS_KEY)?;

        assert_eq!(before, after, "stored bytes should be identical");

        Ok(())
    }

    #[test]
    fn clear_removes_the_key() -> TestResult {
        let mut ledger = Ledger::new(MemoryStore::new());

        ledger.append(booking(0))?;
        ledger.clear()?;

        assert_eq!(ledger.store().get(BOOKINGS_KEY)?, None);
        assert!(ledger.load().is_empty());

        Ok(())
    }

    #[test]
    fn legacy_array_without_totals_loads_normalized() -> TestResult {
        let mut store = MemoryStore::new();

        store.set(
            BOOKINGS_KEY,
            r#"[{
                "id": "bk_1",
                "createdAt": "2023-06-01T10:00:00.000Z",
                "customer": { "name": "Old", "email": "old@example.com", "phone": "1", "address": "x" },
                "items": [],
                "subtotal": 75
            }]"#
            .to_string(),
        )?;

        let ledger = Ledger::new(store);
        let bookings = ledger.load();

        let first = bookings.first().ok_or("booking should load")?;

        assert_eq!(first.total, Rupees::new(75));

        Ok(())
    }
}
