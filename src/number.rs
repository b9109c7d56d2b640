//! Arbitrary-precision arithmetic for the form's numeric fields.
//!
//! Field text is digits only, so every value is a non-negative integer.
//! Division produces a fixed-scale [`Decimal`] rounded half-to-even.

use std::cmp::Ordering;
use std::fmt;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};

/// Fractional digits kept by [`divide`] for the form's result label.
pub const RESULT_SCALE: u32 = 3;

/// A non-negative decimal stored as `unscaled / 10^scale`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decimal {
    unscaled: BigUint,
    scale: u32,
}

impl Decimal {
    pub fn new(unscaled: BigUint, scale: u32) -> Self {
        Self { unscaled, scale }
    }

    pub fn from_integer(value: BigUint) -> Self {
        Self::new(value, 0)
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn integer_part(&self) -> BigUint {
        &self.unscaled / pow10(self.scale)
    }

    /// Fractional digits, zero-padded to exactly `scale` characters.
    pub fn fraction_digits(&self) -> String {
        if self.scale == 0 {
            return String::new();
        }
        let digits = (&self.unscaled % pow10(self.scale)).to_string();
        let width = self.scale as usize;
        format!("{}{}", "0".repeat(width - digits.len()), digits)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scale == 0 {
            write!(f, "{}", self.unscaled)
        } else {
            write!(f, "{}.{}", self.integer_part(), self.fraction_digits())
        }
    }
}

fn pow10(exp: u32) -> BigUint {
    BigUint::from(10u32).pow(exp)
}

/// Parse a digits-only string. `None` for empty or non-digit input.
pub fn parse_digits(text: &str) -> Option<BigUint> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    BigUint::parse_bytes(text.as_bytes(), 10)
}

/// Day count for the date-offset field: empty means zero, values past `u64` are `None`.
pub fn parse_day_count(text: &str) -> Option<u64> {
    if text.is_empty() {
        return Some(0);
    }
    parse_digits(text)?.to_u64()
}

/// `dividend / divisor` to `scale` fractional digits, ties to even.
///
/// Returns `None` when the divisor is zero.
pub fn divide(dividend: &BigUint, divisor: &BigUint, scale: u32) -> Option<Decimal> {
    if divisor.is_zero() {
        return None;
    }

    let (quotient, remainder) = (dividend * pow10(scale)).div_rem(divisor);
    let round_up = match (remainder * 2u32).cmp(divisor) {
        Ordering::Greater => true,
        Ordering::Equal => quotient.is_odd(),
        Ordering::Less => false,
    };
    let unscaled = if round_up { quotient + 1u32 } else { quotient };
    Some(Decimal::new(unscaled, scale))
}
