use crate::error::{RemitError, Result};
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a monetary value to 2 decimal places, half-up.
///
/// Every derived figure on a remittance (fee, received amount) is settled
/// at this precision before it is stored or compared.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Validates that a send amount is strictly positive.
pub fn require_positive_amount(value: Decimal) -> Result<Decimal> {
    if value > Decimal::ZERO {
        Ok(value)
    } else {
        Err(RemitError::InvalidAmount(format!(
            "amount must be positive, got {value}"
        )))
    }
}

/// Validates that an exchange rate is strictly positive.
pub fn require_positive_rate(value: Decimal) -> Result<Decimal> {
    if value > Decimal::ZERO {
        Ok(value)
    } else {
        Err(RemitError::InvalidRate(format!(
            "exchange rate must be positive, got {value}"
        )))
    }
}

/// Whether a value carries at most 2 decimal places of precision.
pub fn is_two_dp(value: Decimal) -> bool {
    round2(value) == value
}
