//! Dhobi
//!
//! Dhobi is a booking engine for a small laundry and dry-cleaning service: a service
//! catalog, a cart with merge-and-total arithmetic, a four-step booking wizard, and a
//! persisted booking ledger with statistics, search, sorting and CSV export.

pub mod booking;
pub mod cart;
pub mod catalog;
pub mod export;
pub mod ledger;
pub mod money;
pub mod notify;
pub mod prelude;
pub mod render;
pub mod store;
pub mod viewer;
pub mod wizard;
