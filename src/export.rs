//! CSV export
//!
//! Renders the booking ledger as a CSV document for download or piping into
//! a spreadsheet. The layout is fixed: an unquoted header row, then one row
//! per booking with every cell quoted and embedded quotes doubled, rows
//! joined by LF with no trailing newline.

use std::io;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use thiserror::Error;

use crate::booking::Booking;

/// Suggested filename for the exported document.
pub const EXPORT_FILE_NAME: &str = "bookings_export.csv";

/// MIME type of the exported document.
pub const EXPORT_MIME: &str = "text/csv;charset=utf-8;";

const HEADER: &str = "id,createdAt,name,email,phone,address,date,time,items,subtotal,total,note";

/// Errors raised while exporting the ledger.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The ledger has no bookings to export.
    #[error("No bookings available")]
    EmptyLedger,

    /// The CSV writer rejected a record.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Flushing the underlying buffer failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Render the ledger as a CSV document.
///
/// # Errors
///
/// Returns `ExportError::EmptyLedger` when there is nothing to export, or a
/// CSV/IO error if serialization fails.
pub fn export_csv(bookings: &[Booking]) -> Result<String, ExportError> {
    if bookings.is_empty() {
        return Err(ExportError::EmptyLedger);
    }

    let mut body = Vec::new();

    {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .terminator(Terminator::Any(b'\n'))
            .has_headers(false)
            .from_writer(&mut body);

        for booking in bookings {
            writer.write_record(booking_record(booking))?;
        }

        writer.flush()?;
    }

    // The writer terminates every record; the document carries no trailing
    // newline.
    if body.last() == Some(&b'\n') {
        body.pop();
    }

    let rows = String::from_utf8_lossy(&body);

    Ok(format!("{HEADER}\n{rows}"))
}

fn booking_record(booking: &Booking) -> [String; 12] {
    let items = booking
        .items
        .iter()
        .map(|item| {
            format!(
                "{} ({}) x{} = ₹{}",
                item.service_name,
                item.cloth,
                item.qty,
                item.line_total.value()
            )
        })
        .collect::<Vec<_>>()
        .join("; ");

    [
        booking.id.clone(),
        booking.created_at_iso(),
        booking.customer.name.clone(),
        booking.customer.email.clone(),
        booking.customer.phone.clone(),
        booking.customer.address.clone(),
        booking.customer.pickup_date.clone(),
        booking.customer.pickup_time.clone(),
        items,
        booking.subtotal.value().to_string(),
        booking.total.value().to_string(),
        booking.customer.note.clone(),
    ]
}
