//! Money
//!
//! All amounts are whole-rupee integers; there is no paise handling anywhere
//! in the booking flow.

use std::{fmt, iter::Sum};

use serde::{Deserialize, Serialize};

/// A whole-rupee amount.
///
/// Displays with the `₹` symbol and en-IN digit grouping (a final group of
/// three digits, then groups of two), e.g. `₹12,34,567`.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Rupees(u64);

impl Rupees {
    /// Creates a new amount.
    #[must_use]
    pub fn new(value: u64) -> Self {
        Rupees(value)
    }

    /// The raw whole-rupee value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }

    /// Multiply by a quantity, saturating at the numeric bound.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Rupees(self.0.saturating_mul(u64::from(quantity)))
    }

    /// Add another amount, saturating at the numeric bound.
    #[must_use]
    pub fn plus(self, other: Self) -> Self {
        Rupees(self.0.saturating_add(other.0))
    }
}

impl Sum for Rupees {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Rupees(0), Rupees::plus)
    }
}

impl fmt::Display for Rupees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{}", group_digits(self.0))
    }
}

/// Groups digits en-IN style: the last three together, then pairs.
fn group_digits(value: u64) -> String {
    let digits = value.to_string().into_bytes();
    let mut grouped = Vec::with_capacity(digits.len() + digits.len() / 2);

    for (idx, byte) in digits.iter().rev().enumerate() {
        if idx == 3 || (idx > 3 && (idx - 3) % 2 == 0) {
            grouped.push(b',');
        }

        grouped.push(*byte);
    }

    grouped.reverse();

    String::from_utf8(grouped).unwrap_or_default()
}
