use crate::domain::money::{require_positive_amount, round2};
use crate::domain::remittance::TransferMethod;
use crate::error::Result;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Floor applied to every fee after the surcharge is added.
pub const MIN_FEE: Decimal = dec!(4.99);

/// Ceiling applied to every fee after the surcharge is added.
pub const MAX_FEE: Decimal = dec!(50.00);

/// Ad-valorem portion of the fee: 2% of the amount sent.
pub const AD_VALOREM_RATE: Decimal = dec!(0.02);

/// Flat surcharge charged per delivery channel.
pub fn surcharge(method: TransferMethod) -> Decimal {
    match method {
        TransferMethod::BankTransfer => dec!(1.50),
        TransferMethod::CashPickup => dec!(3.00),
        TransferMethod::MobileWallet => dec!(0.50),
        TransferMethod::HomeDelivery => dec!(8.00),
    }
}

/// Computes the fee for sending `amount` over `method`.
///
/// The ad-valorem portion and the channel surcharge are summed, rounded
/// to 2 dp half-up, then clamped into `[MIN_FEE, MAX_FEE]`. The clamp is
/// applied to the sum, so a cheap channel on a small amount still pays
/// the floor.
pub fn compute(amount: Decimal, method: TransferMethod) -> Result<Decimal> {
    let amount = require_positive_amount(amount)?;
    let raw = round2(amount * AD_VALOREM_RATE + surcharge(method));
    Ok(raw.clamp(MIN_FEE, MAX_FEE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RemitError;
    use rust_decimal_macros::dec;

    #[test]
    fn test_tiny_transfer_pays_the_floor() {
        // 1 * 0.02 + 3.00 = 3.02, clamped up.
        assert_eq!(compute(dec!(1), TransferMethod::CashPickup).unwrap(), MIN_FEE);
    }

    #[test]
    fn test_small_wallet_transfer_hits_floor() {
        // 100 * 0.02 + 0.50 = 2.50, the cheapest channel still clamps up.
        assert_eq!(
            compute(dec!(100), TransferMethod::MobileWallet).unwrap(),
            MIN_FEE
        );
    }

    #[test]
    fn test_large_transfer_caps_out() {
        // 10000 * 0.02 + 8.00 = 208.00, clamped down.
        assert_eq!(
            compute(dec!(10000), TransferMethod::HomeDelivery).unwrap(),
            MAX_FEE
        );
    }

    #[test]
    fn test_in_range_fees_are_exact() {
        assert_eq!(
            compute(dec!(500), TransferMethod::MobileWallet).unwrap(),
            dec!(10.50)
        );
        assert_eq!(
            compute(dec!(100), TransferMethod::CashPickup).unwrap(),
            dec!(5.00)
        );
        assert_eq!(
            compute(dec!(200), TransferMethod::BankTransfer).unwrap(),
            dec!(5.50)
        );
        assert_eq!(
            compute(dec!(100), TransferMethod::HomeDelivery).unwrap(),
            dec!(10.00)
        );
    }

    #[test]
    fn test_fee_stays_within_bounds_for_all_methods() {
        let amounts = [
            dec!(0.01),
            dec!(1),
            dec!(50),
            dec!(249.50),
            dec!(1000),
            dec!(2099.99),
            dec!(10000),
        ];
        for amount in amounts {
            for method in TransferMethod::ALL {
                let fee = compute(amount, method).unwrap();
                assert!(fee >= MIN_FEE, "{amount} over {method} fell below floor");
                assert!(fee <= MAX_FEE, "{amount} over {method} broke the cap");
                assert_eq!(fee, crate::domain::money::round2(fee));
            }
        }
    }

    #[test]
    fn test_non_positive_amount_is_rejected() {
        assert!(matches!(
            compute(dec!(0), TransferMethod::BankTransfer),
            Err(RemitError::InvalidAmount(_))
        ));
        assert!(matches!(
            compute(dec!(-10), TransferMethod::CashPickup),
            Err(RemitError::InvalidAmount(_))
        ));
    }
}
