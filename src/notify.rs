//! Booking notifications
//!
//! After a booking is persisted, two messages go out: one to the business
//! owner and one to the customer. Delivery is an injected capability and is
//! strictly fire-and-forget: the builder logs failures and moves on, so no
//! implementation may be relied on for booking persistence.

use thiserror::Error;
use tracing::info;

use crate::{booking::Booking, money::Rupees};

/// Error returned by a notification backend.
#[derive(Debug, Error)]
#[error("Notification dispatch failed: {0}")]
pub struct NotifyError(pub String);

/// Payload handed to the notification capability for one booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingNotice {
    /// Id of the persisted booking.
    pub booking_id: String,

    /// Customer name.
    pub customer_name: String,

    /// Customer email.
    pub customer_email: String,

    /// Customer phone number.
    pub customer_phone: String,

    /// One human-readable line per booked item.
    pub items_summary: String,

    /// Booking total.
    pub total: Rupees,
}

impl BookingNotice {
    /// Builds the notice for a freshly persisted booking.
    #[must_use]
    pub fn for_booking(booking: &Booking) -> Self {
        BookingNotice {
            booking_id: booking.id.clone(),
            customer_name: booking.customer.name.clone(),
            customer_email: booking.customer.email.clone(),
            customer_phone: booking.customer.phone.clone(),
            items_summary: booking.items_summary(),
            total: booking.total,
        }
    }
}

/// Outbound notification capability.
pub trait Notifier {
    /// Deliver the owner-facing and customer-facing messages for one
    /// booking.
    ///
    /// # Errors
    ///
    /// Returns a `NotifyError` if delivery fails. Callers swallow the error.
    fn send(&self, notice: &BookingNotice) -> Result<(), NotifyError>;
}

/// Notifier for environments without a delivery capability.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn send(&self, _notice: &BookingNotice) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// Notifier that writes both messages to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send(&self, notice: &BookingNotice) -> Result<(), NotifyError> {
        info!(
            booking_id = %notice.booking_id,
            customer = %notice.customer_name,
            phone = %notice.customer_phone,
            total = %notice.total,
            "new booking:\n{}",
            notice.items_summary,
        );

        info!(
            booking_id = %notice.booking_id,
            email = %notice.customer_email,
            total = %notice.total,
            "booking confirmation for customer:\n{}",
            notice.items_summary,
        );

        Ok(())
    }
}
