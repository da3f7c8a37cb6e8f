//! Ledger viewer
//!
//! Pure read-side operations over a loaded ledger: aggregate statistics,
//! text search and the dashboard sort orders. None of these touch the
//! store; callers load once and derive views as needed.

use clap::ValueEnum;
use rustc_hash::FxHashSet;

use crate::{booking::Booking, money::Rupees};

/// Aggregate statistics over the booking ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerStats {
    /// Number of bookings.
    pub count: usize,

    /// Sum of all booking totals.
    pub total_revenue: Rupees,

    /// Distinct customers by best-available contact identifier.
    pub unique_customers: usize,

    /// Id of the most recently appended booking, `None` when empty.
    pub most_recent_id: Option<String>,
}

/// Compute the dashboard statistics for a loaded ledger.
///
/// Customers are deduplicated by phone, falling back to email, falling back
/// to the booking's own id when both are absent.
#[must_use]
pub fn compute_stats(bookings: &[Booking]) -> LedgerStats {
    let contacts: FxHashSet<&str> = bookings.iter().map(best_contact_key).collect();

    LedgerStats {
        count: bookings.len(),
        total_revenue: bookings.iter().map(|booking| booking.total).sum(),
        unique_customers: contacts.len(),
        most_recent_id: bookings.last().map(|booking| booking.id.clone()),
    }
}

/// Best-available contact identifier: phone, then email, then the booking id.
fn best_contact_key(booking: &Booking) -> &str {
    [
        booking.customer.phone.as_str(),
        booking.customer.email.as_str(),
    ]
    .into_iter()
    .find(|value| !value.is_empty())
    .unwrap_or(booking.id.as_str())
}

/// Case-insensitive substring search over id, customer name, phone, email
/// and all item names and cloth types. An empty query matches everything.
#[must_use]
pub fn filter(bookings: &[Booking], query: &str) -> Vec<Booking> {
    let query = query.trim().to_lowercase();

    if query.is_empty() {
        return bookings.to_vec();
    }

    bookings
        .iter()
        .filter(|booking| search_haystack(booking).contains(&query))
        .cloned()
        .collect()
}

fn search_haystack(booking: &Booking) -> String {
    let item_names = booking
        .items
        .iter()
        .map(|item| item.service_name.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    let cloths = booking
        .items
        .iter()
        .map(|item| item.cloth.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    [
        booking.id.as_str(),
        booking.customer.name.as_str(),
        booking.customer.phone.as_str(),
        booking.customer.email.as_str(),
        item_names.as_str(),
        cloths.as_str(),
    ]
    .join(" ")
    .to_lowercase()
}

/// The orderings offered by the dashboard sort control.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum SortMode {
    /// Most recent first (by creation time).
    #[default]
    Newest,

    /// Oldest first (by creation time).
    Oldest,

    /// Largest total first.
    AmountDesc,

    /// Smallest total first.
    AmountAsc,
}

/// Sort bookings in place. The sort is stable: ties keep their original
/// relative order.
pub fn sort(bookings: &mut [Booking], mode: SortMode) {
    match mode {
        SortMode::Newest => bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortMode::Oldest => bookings.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortMode::AmountDesc => bookings.sort_by(|a, b| b.total.cmp(&a.total)),
        SortMode::AmountAsc => bookings.sort_by(|a, b| a.total.cmp(&b.total)),
    }
}
