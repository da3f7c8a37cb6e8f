//! Dhobi prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    booking::{Booking, Customer},
    cart::{Cart, CartError, LineItem, QuantityDelta},
    catalog::{CatalogError, Selection, Service, ServiceCatalog},
    export::{EXPORT_FILE_NAME, EXPORT_MIME, ExportError, export_csv},
    ledger::{BOOKINGS_KEY, Ledger},
    money::Rupees,
    notify::{BookingNotice, LogNotifier, NoopNotifier, Notifier, NotifyError},
    render::{RenderError, write_booking_detail, write_bookings_table, write_stats},
    store::{FileStore, KeyValueStore, MemoryStore, StorageError},
    viewer::{LedgerStats, SortMode, compute_stats, filter, sort},
    wizard::{BookingWizard, Step, WizardError},
};
