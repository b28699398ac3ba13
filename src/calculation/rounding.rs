//! Yen rounding helpers.
//!
//! Premiums and monthly tax amounts round half up; levies and bracket
//! results floor. Income tax truncates its taxable base to a unit.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to whole yen, halves away from zero.
pub fn round_yen(amount: Decimal) -> Decimal {
    amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}

/// Floors to whole yen.
pub fn floor_yen(amount: Decimal) -> Decimal {
    amount.floor().normalize()
}

/// Truncates a non-negative amount down to a multiple of `unit`.
///
/// A non-positive `unit` leaves the amount floored to whole yen.
pub fn truncate_to_unit(amount: Decimal, unit: Decimal) -> Decimal {
    if unit <= Decimal::ZERO {
        return floor_yen(amount);
    }
    ((amount / unit).floor() * unit).normalize()
}

/// Clamps an amount at zero.
pub fn non_negative(amount: Decimal) -> Decimal {
    amount.max(Decimal::ZERO)
}
