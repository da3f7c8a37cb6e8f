//! Booking wizard
//!
//! The four-step session that owns the working cart: pick services, review
//! the cart, enter customer details, confirmation. The session holds no
//! reference to rendering; every operation takes explicit inputs and
//! returns explicit results so the flow is testable without a UI.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::warn;

use crate::{
    booking::{Booking, Customer},
    cart::{Cart, CartError, LineItem, QuantityDelta},
    catalog::{CatalogError, ServiceCatalog},
    ledger::Ledger,
    notify::{BookingNotice, Notifier},
    store::{KeyValueStore, StorageError},
};

/// The sequential steps a booking session passes through.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Step {
    /// Picking services into the cart.
    #[default]
    SelectServices,

    /// Reviewing cart lines and totals.
    ReviewCart,

    /// Entering customer details before submission.
    CustomerDetails,

    /// The booking has been recorded.
    Confirmation,
}

/// Errors surfaced by wizard operations.
///
/// All of these are recoverable: they are reported to the user and the
/// session stays open with its state intact.
#[derive(Debug, Error)]
pub enum WizardError {
    /// Advancing past service selection requires at least one line item.
    #[error("Add at least one service")]
    EmptyCart,

    /// A required customer field is blank or whitespace-only.
    #[error("Required field {0:?} is missing")]
    MissingRequiredField(&'static str),

    /// Submission is only possible from the customer-details step.
    #[error("The booking form is not open")]
    NotAtCustomerDetails,

    /// The selection does not resolve against the catalog.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// A cart line index was invalid.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The booking could not be saved; the cart is left intact for a retry.
    #[error("Booking could not be saved: {0}")]
    Storage(#[from] StorageError),
}

/// One booking session: the working cart plus the current wizard step.
#[derive(Debug, Default)]
pub struct BookingWizard {
    cart: Cart,
    step: Step,
    confirmation: Option<String>,
}

impl BookingWizard {
    /// Opens a fresh session at the service-selection step.
    #[must_use]
    pub fn new() -> Self {
        BookingWizard::default()
    }

    /// The working cart.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The current step.
    #[must_use]
    pub fn step(&self) -> Step {
        self.step
    }

    /// The confirmation message, present once a booking has been recorded.
    #[must_use]
    pub fn confirmation(&self) -> Option<&str> {
        self.confirmation.as_deref()
    }

    /// Add a catalog selection to the cart, merging into an existing line
    /// when the `(service, cloth)` pair matches.
    ///
    /// Non-positive or out-of-range quantities are coerced to one.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidSelection` if the service id or cloth
    /// type does not resolve.
    pub fn add_selection(
        &mut self,
        catalog: &ServiceCatalog,
        service_id: &str,
        cloth: Option<&str>,
        quantity: i64,
    ) -> Result<(), CatalogError> {
        let selection = catalog.resolve(service_id, cloth)?;

        self.cart.add(LineItem::new(
            selection.service.id.clone(),
            selection.service.name.clone(),
            selection.cloth,
            coerce_quantity(quantity),
            selection.service.unit_price,
        ));

        Ok(())
    }

    /// Adjust one cart line's quantity by a single step (floor of one).
    ///
    /// # Errors
    ///
    /// Returns `CartError::IndexOutOfRange` on an invalid line index.
    pub fn adjust_quantity(&mut self, index: usize, delta: QuantityDelta) -> Result<(), CartError> {
        self.cart.adjust_quantity(index, delta)
    }

    /// Remove one cart line.
    ///
    /// # Errors
    ///
    /// Returns `CartError::IndexOutOfRange` on an invalid line index.
    pub fn remove_line(&mut self, index: usize) -> Result<LineItem, CartError> {
        self.cart.remove_line(index)
    }

    /// Advance to the next step.
    ///
    /// Customer details are left via [`BookingWizard::submit`] and the
    /// confirmation via [`BookingWizard::close`], so advancing from those
    /// steps is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `WizardError::EmptyCart` when leaving service selection with
    /// an empty cart.
    pub fn advance(&mut self) -> Result<Step, WizardError> {
        self.step = match self.step {
            Step::SelectServices if self.cart.is_empty() => return Err(WizardError::EmptyCart),
            Step::SelectServices => Step::ReviewCart,
            Step::ReviewCart => Step::CustomerDetails,
            step @ (Step::CustomerDetails | Step::Confirmation) => step,
        };

        Ok(self.step)
    }

    /// Retreat to the previous step. A no-op at service selection and at the
    /// confirmation.
    pub fn retreat(&mut self) -> Step {
        self.step = match self.step {
            Step::ReviewCart => Step::SelectServices,
            Step::CustomerDetails => Step::ReviewCart,
            step @ (Step::SelectServices | Step::Confirmation) => step,
        };

        self.step
    }

    /// Submit the booking with the current wall-clock time.
    ///
    /// # Errors
    ///
    /// See [`BookingWizard::submit_at`].
    pub fn submit<S: KeyValueStore, N: Notifier>(
        &mut self,
        customer: Customer,
        ledger: &mut Ledger<S>,
        notifier: &N,
    ) -> Result<Booking, WizardError> {
        self.submit_at(customer, Utc::now(), ledger, notifier)
    }

    /// Submit the booking with an explicit creation time.
    ///
    /// On success the booking is appended to the ledger, the notification is
    /// dispatched fire-and-forget, the cart is cleared and the session moves
    /// to the confirmation step. On failure nothing is cleared, so the
    /// user's cart and details survive for a retry.
    ///
    /// # Errors
    ///
    /// Returns `WizardError::NotAtCustomerDetails` outside the details step,
    /// `WizardError::EmptyCart` for an empty cart,
    /// `WizardError::MissingRequiredField` when name, email, phone or
    /// address is blank, and `WizardError::Storage` when the ledger
    /// write-back fails.
    pub fn submit_at<S: KeyValueStore, N: Notifier>(
        &mut self,
        customer: Customer,
        now: DateTime<Utc>,
        ledger: &mut Ledger<S>,
        notifier: &N,
    ) -> Result<Booking, WizardError> {
        if self.step != Step::CustomerDetails {
            return Err(WizardError::NotAtCustomerDetails);
        }

        if self.cart.is_empty() {
            return Err(WizardError::EmptyCart);
        }

        if let Some(field) = customer.missing_required_field() {
            return Err(WizardError::MissingRequiredField(field));
        }

        let booking = Booking::new(customer, &self.cart, now);

        // Persistence comes first; notification failures never roll it back.
        ledger.append(booking.clone())?;

        if let Err(error) = notifier.send(&BookingNotice::for_booking(&booking)) {
            warn!(%error, booking_id = %booking.id, "notification dispatch failed");
        }

        self.cart = Cart::new();
        self.confirmation = Some(format!(
            "Thank you {}! Your booking ({}) has been recorded.",
            booking.customer.name, booking.id
        ));
        self.step = Step::Confirmation;

        Ok(booking)
    }

    /// Close the wizard: the cart is emptied and the session returns to
    /// service selection.
    pub fn close(&mut self) {
        *self = BookingWizard::default();
    }
}

/// Coerce raw quantity input to an integer of at least one.
fn coerce_quantity(quantity: i64) -> u32 {
    u32::try_from(quantity).ok().filter(|qty| *qty >= 1).unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use testresult::TestResult;

    use crate::{
        ledger::BOOKINGS_KEY,
        notify::{NoopNotifier, NotifyError},
        store::MemoryStore,
    };

    use super::*;

    fn test_customer() -> Customer {
        Customer {
            name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9876543210".to_string(),
            address: "12 MG Road".to_string(),
            ..Customer::default()
        }
    }

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .unwrap_or_default()
    }

    fn wizard_at_details() -> Result<BookingWizard, WizardError> {
        let catalog = ServiceCatalog::standard();
        let mut wizard = BookingWizard::new();

        wizard.add_selection(&catalog, "washfold", Some("Shirt"), 2)?;
        wizard.advance()?;
        wizard.advance()?;

        Ok(wizard)
    }

    /// Store that rejects every write, standing in for an exhausted quota.
    #[derive(Debug, Default)]
    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&mut self, key: &str, _value: String) -> Result<(), StorageError> {
            Err(StorageError::Write {
                key: key.to_string(),
                source: std::io::Error::other("quota exceeded"),
            })
        }

        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    /// Notifier that always fails, to prove dispatch is fire-and-forget.
    #[derive(Debug, Default)]
    struct FailingNotifier;

    impl Notifier for FailingNotifier {
        fn send(&self, _notice: &BookingNotice) -> Result<(), NotifyError> {
            Err(NotifyError("smtp unreachable".to_string()))
        }
    }

    #[test]
    fn opens_at_service_selection() {
        let wizard = BookingWizard::new();

        assert_eq!(wizard.step(), Step::SelectServices);
        assert!(wizard.cart().is_empty());
        assert_eq!(wizard.confirmation(), None);
    }

    #[test]
    fn advance_with_empty_cart_errors() {
        let mut wizard = BookingWizard::new();

        let result = wizard.advance();

        assert!(
            matches!(result, Err(WizardError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );
        assert_eq!(wizard.step(), Step::SelectServices);
    }

    #[test]
    fn advance_and_retreat_walk_the_steps() -> TestResult {
        let catalog = ServiceCatalog::standard();
        let mut wizard = BookingWizard::new();

        wizard.add_selection(&catalog, "ironing", Some("Shirt"), 1)?;

        assert_eq!(wizard.advance()?, Step::ReviewCart);
        assert_eq!(wizard.retreat(), Step::SelectServices);
        assert_eq!(wizard.advance()?, Step::ReviewCart);
        assert_eq!(wizard.advance()?, Step::CustomerDetails);
        assert_eq!(wizard.retreat(), Step::ReviewCart);

        Ok(())
    }

    #[test]
    fn advance_at_customer_details_is_a_no_op() -> TestResult {
        let mut wizard = wizard_at_details()?;

        assert_eq!(wizard.advance()?, Step::CustomerDetails);

        Ok(())
    }

    #[test]
    fn retreat_at_service_selection_is_a_no_op() {
        let mut wizard = BookingWizard::new();

        assert_eq!(wizard.retreat(), Step::SelectServices);
    }

    #[test]
    fn add_selection_merges_repeated_pairs() -> TestResult {
        let catalog = ServiceCatalog::standard();
        let mut wizard = BookingWizard::new();

        wizard.add_selection(&catalog, "washfold", Some("Shirt"), 1)?;
        wizard.add_selection(&catalog, "washfold", Some("Shirt"), 2)?;
        wizard.add_selection(&catalog, "dryclean", Some("Shirt"), 1)?;

        assert_eq!(wizard.cart().len(), 2);
        assert_eq!(wizard.cart().subtotal(), crate::money::Rupees::new(100));

        Ok(())
    }

    #[test]
    fn add_selection_coerces_bad_quantities_to_one() -> TestResult {
        let catalog = ServiceCatalog::standard();
        let mut wizard = BookingWizard::new();

        wizard.add_selection(&catalog, "ironing", Some("Pant"), 0)?;
        wizard.add_selection(&catalog, "stain", None, -3)?;

        let quantities: Vec<u32> = wizard.cart().iter().map(|line| line.qty).collect();

        assert_eq!(quantities, vec![1, 1]);

        Ok(())
    }

    #[test]
    fn add_selection_unknown_service_errors() {
        let catalog = ServiceCatalog::standard();
        let mut wizard = BookingWizard::new();

        let result = wizard.add_selection(&catalog, "carwash", None, 1);

        assert!(
            matches!(result, Err(CatalogError::InvalidSelection { .. })),
            "expected InvalidSelection, got {result:?}"
        );
    }

    #[test]
    fn submit_records_booking_and_moves_to_confirmation() -> TestResult {
        let mut wizard = wizard_at_details()?;
        let mut ledger = Ledger::new(MemoryStore::new());

        let booking = wizard.submit_at(test_customer(), test_time(), &mut ledger, &NoopNotifier)?;

        assert_eq!(wizard.step(), Step::Confirmation);
        assert!(wizard.cart().is_empty());
        assert_eq!(
            wizard.confirmation(),
            Some(format!("Thank you Asha Rao! Your booking ({}) has been recorded.", booking.id).as_str())
        );
        assert_eq!(ledger.load(), vec![booking]);

        Ok(())
    }

    #[test]
    fn submit_outside_details_step_errors() {
        let mut wizard = BookingWizard::new();
        let mut ledger = Ledger::new(MemoryStore::new());

        let result = wizard.submit_at(test_customer(), test_time(), &mut ledger, &NoopNotifier);

        assert!(
            matches!(result, Err(WizardError::NotAtCustomerDetails)),
            "expected NotAtCustomerDetails, got {result:?}"
        );
    }

    #[test]
    fn submit_with_blank_required_field_errors_and_keeps_state() -> TestResult {
        let mut wizard = wizard_at_details()?;
        let mut ledger = Ledger::new(MemoryStore::new());

        let customer = Customer {
            email: "  ".to_string(),
            ..test_customer()
        };

        let result = wizard.submit_at(customer, test_time(), &mut ledger, &NoopNotifier);

        assert!(
            matches!(result, Err(WizardError::MissingRequiredField("email"))),
            "expected MissingRequiredField(email), got {result:?}"
        );
        assert_eq!(wizard.step(), Step::CustomerDetails);
        assert_eq!(wizard.cart().len(), 1);
        assert!(ledger.load().is_empty());

        Ok(())
    }

    #[test]
    fn submit_survives_notifier_failure() -> TestResult {
        let mut wizard = wizard_at_details()?;
        let mut ledger = Ledger::new(MemoryStore::new());

        let booking =
            wizard.submit_at(test_customer(), test_time(), &mut ledger, &FailingNotifier)?;

        assert_eq!(wizard.step(), Step::Confirmation);
        assert_eq!(ledger.load(), vec![booking]);

        Ok(())
    }

    #[test]
    fn submit_storage_failure_keeps_cart_for_retry() -> TestResult {
        let mut wizard = wizard_at_details()?;
        let mut ledger = Ledger::new(FailingStore);

        let result = wizard.submit_at(test_customer(), test_time(), &mut ledger, &NoopNotifier);

        assert!(
            matches!(result, Err(WizardError::Storage(_))),
            "expected Storage error, got {result:?}"
        );
        assert_eq!(wizard.step(), Step::CustomerDetails);
        assert_eq!(wizard.cart().len(), 1, "cart should survive the failure");
        assert_eq!(wizard.confirmation(), None);

        Ok(())
    }

    #[test]
    fn persisted_items_are_frozen_against_later_cart_mutation() -> TestResult {
        let catalog = ServiceCatalog::standard();
        let mut wizard = BookingWizard::new();
        let mut ledger = Ledger::new(MemoryStore::new());

        wizard.add_selection(&catalog, "washfold", Some("Shirt"), 1)?;
        wizard.advance()?;
        wizard.advance()?;
        wizard.submit_at(test_customer(), test_time(), &mut ledger, &NoopNotifier)?;

        // A new session mutating its own cart must not touch the record.
        wizard.close();
        wizard.add_selection(&catalog, "washfold", Some("Shirt"), 5)?;

        let bookings = ledger.load();
        let recorded = bookings
            .first()
            .and_then(|booking| booking.items.first())
            .ok_or("persisted item should exist")?;

        assert_eq!(recorded.qty, 1);

        Ok(())
    }

    #[test]
    fn close_resets_the_session() -> TestResult {
        let mut wizard = wizard_at_details()?;
        let mut ledger = Ledger::new(MemoryStore::new());

        wizard.submit_at(test_customer(), test_time(), &mut ledger, &NoopNotifier)?;
        wizard.close();

        assert_eq!(wizard.step(), Step::SelectServices);
        assert!(wizard.cart().is_empty());
        assert_eq!(wizard.confirmation(), None);

        // The ledger is untouched by closing the wizard.
        assert_eq!(ledger.load().len(), 1);
        assert!(ledger.store().get(BOOKINGS_KEY)?.is_some());

        Ok(())
    }
}
