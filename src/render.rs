//! Dashboard rendering
//!
//! Console views over the booking ledger: the statistics strip, the booking
//! table and the single-booking detail card. Everything writes to an
//! injected sink so the views stay testable.

use std::io;

use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{booking::Booking, viewer::LedgerStats};

/// Errors that can occur while rendering a view.
#[derive(Debug, Error)]
pub enum RenderError {
    /// IO error
    #[error("IO error")]
    IO,
}

/// Writes the dashboard statistics strip.
///
/// # Errors
///
/// Returns a [`RenderError`] if the sink rejects the write.
pub fn write_stats(mut out: impl io::Write, stats: &LedgerStats) -> Result<(), RenderError> {
    writeln!(
        out,
        "Bookings: {}   Revenue: {}   Customers: {}   Most recent: {}",
        stats.count,
        stats.total_revenue,
        stats.unique_customers,
        stats.most_recent_id.as_deref().unwrap_or("—"),
    )
    .map_err(|_err| RenderError::IO)
}

/// Writes the booking list as a table, one row per booking.
///
/// # Errors
///
/// Returns a [`RenderError`] if the sink rejects the write.
pub fn write_bookings_table(
    mut out: impl io::Write,
    bookings: &[Booking],
) -> Result<(), RenderError> {
    let mut builder = Builder::default();

    builder.push_record(["ID", "Customer", "Contact", "Services", "Pickup", "Total"]);

    for booking in bookings {
        builder.push_record([
            booking.id.clone(),
            display_or_dash(&booking.customer.name),
            contact(booking),
            services(booking),
            pickup(booking),
            booking.total.to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::last(), Alignment::right());

    writeln!(out, "{table}").map_err(|_err| RenderError::IO)
}

/// Writes the detail card for a single booking.
///
/// # Errors
///
/// Returns a [`RenderError`] if the sink rejects the write.
pub fn write_booking_detail(
    mut out: impl io::Write,
    booking: &Booking,
) -> Result<(), RenderError> {
    let mut builder = Builder::default();

    builder.push_record(["Booking", &booking.id]);
    builder.push_record(["Created", &booking.created_at_iso()]);
    builder.push_record(["Customer", &display_or_dash(&booking.customer.name)]);
    builder.push_record(["Email", &display_or_dash(&booking.customer.email)]);
    builder.push_record(["Phone", &display_or_dash(&booking.customer.phone)]);
    builder.push_record(["Address", &display_or_dash(&booking.customer.address)]);
    builder.push_record(["Pickup", &pickup(booking)]);
    builder.push_record(["Items", &booking.items_summary()]);
    builder.push_record(["Subtotal", &booking.subtotal.to_string()]);
    builder.push_record(["Total", &booking.total.to_string()]);

    if !booking.customer.note.is_empty() {
        builder.push_record(["Note", &booking.customer.note]);
    }

    let mut table = builder.build();

    table.with(Style::blank());

    writeln!(out, "{table}").map_err(|_err| RenderError::IO)
}

fn display_or_dash(value: &str) -> String {
    if value.trim().is_empty() {
        "—".to_string()
    } else {
        value.to_string()
    }
}

fn contact(booking: &Booking) -> String {
    [
        booking.customer.phone.as_str(),
        booking.customer.email.as_str(),
    ]
    .into_iter()
    .find(|value| !value.is_empty())
    .map_or_else(|| "—".to_string(), ToString::to_string)
}

fn services(booking: &Booking) -> String {
    if booking.items.is_empty() {
        return "—".to_string();
    }

    booking
        .items
        .iter()
        .map(|item| format!("{} ({}) × {}", item.service_name, item.cloth, item.qty))
        .collect::<Vec<_>>()
        .join("\n")
}

fn pickup(booking: &Booking) -> String {
    let date = booking.customer.pickup_date.trim();
    let time = booking.customer.pickup_time.trim();

    match (date.is_empty(), time.is_empty()) {
        (true, true) => "—".to_string(),
        (false, true) => date.to_string(),
        (true, false) => time.to_string(),
        (false, false) => format!("{date} {time}"),
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
        viewer::compute_stats,
    };

    use super::*;

    fn sample_booking() -> Result<Booking, String> {
        let mut cart = Cart::new();

        cart.add(LineItem::new(
            "washfold",
            "Wash & Fold",
            "Shirt",
            2,
            Rupees::new(20),
        ));

        let created_at = Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .ok_or("valid date")?;

        Ok(Booking::new(
            Customer {
                name: "Asha Rao".to_string(),
                email: "asha@example.com".to_string(),
                phone: "9876543210".to_string(),
                address: "12 MG Road".to_string(),
                pickup_date: "2024-01-02".to_string(),
                pickup_time: "10:30".to_string(),
                note: "Ring twice".to_string(),
            },
            &cart,
            created_at,
        ))
    }

    fn render_to_string(
        render: impl FnOnce(&mut Vec<u8>) -> Result<(), RenderError>,
    ) -> Result<String, Box<dyn std::error::Error>> {
        let mut out = Vec::new();

        render(&mut out)?;

        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn stats_strip_shows_all_four_figures() -> TestResult {
        let bookings = vec![sample_booking()?];
        let stats = compute_stats(&bookings);

        let text = render_to_string(|out| write_stats(out, &stats))?;

        assert!(text.contains("Bookings: 1"));
        assert!(text.contains("Revenue: ₹40"));
        assert!(text.contains("Customers: 1"));
        assert!(text.contains("Most recent: bk_"));

        Ok(())
    }

    #[test]
    fn empty_stats_strip_uses_a_dash_for_most_recent() -> TestResult {
        let stats = compute_stats(&[]);

        let text = render_to_string(|out| write_stats(out, &stats))?;

        assert!(text.contains("Most recent: —"));

        Ok(())
    }

    #[test]
    fn table_lists_each_booking_with_contact_and_pickup() -> TestResult {
        let bookings = vec![sample_booking()?];

        let text = render_to_string(|out| write_bookings_table(out, &bookings))?;

        assert!(text.contains("Asha Rao"));
        assert!(text.contains("9876543210"));
        assert!(text.contains("Wash & Fold (Shirt) × 2"));
        assert!(text.contains("2024-01-02 10:30"));
        assert!(text.contains("₹40"));

        Ok(())
    }

    #[test]
    fn detail_card_includes_the_note_when_present() -> TestResult {
        let booking = sample_booking()?;

        let text = render_to_string(|out| write_booking_detail(out, &booking))?;

        assert!(text.contains(&booking.id));
        assert!(text.contains("2024-01-01T00:00:00.000Z"));
        assert!(text.contains("Ring twice"));
        assert!(text.contains("Wash & Fold - Shirt × 2 = ₹40"));

        Ok(())
    }

    #[test]
    fn detail_card_omits_an_empty_note() -> TestResult {
        let mut booking = sample_booking()?;
        booking.customer.note = String::new();

        let text = render_to_string(|out| write_booking_detail(out, &booking))?;

        assert!(!text.contains("Note"));

        Ok(())
    }
}
