use crate::domain::remittance::{Currency, Remittance};
use crate::error::{RemitError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound on a corridor's catalogue fee percentage.
pub const MAX_BASE_FEE_PERCENTAGE: Decimal = dec!(15);

/// Corridor key: two-letter origin, hyphen, two-letter destination, as in
/// `US-MX`. Unique per catalogue and immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorridorCode(String);

impl CorridorCode {
    pub fn parse(value: &str) -> Result<Self> {
        let bytes = value.as_bytes();
        let well_formed = bytes.len() == 5
            && bytes[2] == b'-'
            && [bytes[0], bytes[1], bytes[3], bytes[4]]
                .iter()
                .all(u8::is_ascii_uppercase);
        if well_formed {
            Ok(Self(value.to_string()))
        } else {
            Err(RemitError::Validation(format!(
                "corridor code must look like US-MX, got {value:?}"
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CorridorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A send route between two countries and the currency pair it covers.
///
/// The catalogue is descriptive. Fees always come from the fee schedule,
/// and transfer creation never consults corridor state; the link between a
/// corridor and a remittance is derived by matching currency pairs.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Corridor {
    pub code: CorridorCode,
    pub name: String,
    pub origin_country: String,
    pub destination_country: String,
    pub currency_sent: Currency,
    pub currency_received: Currency,
    /// Catalogue figure in percent, within `(0, 15]`.
    pub base_fee_percentage: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Corridor {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        code: CorridorCode,
        name: impl Into<String>,
        origin_country: impl Into<String>,
        destination_country: impl Into<String>,
        currency_sent: Currency,
        currency_received: Currency,
        base_fee_percentage: Decimal,
    ) -> Self {
        Self {
            code,
            name: name.into(),
            origin_country: origin_country.into(),
            destination_country: destination_country.into(),
            currency_sent,
            currency_received,
            base_fee_percentage,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Whether this corridor's currency pair matches the remittance's.
    pub fn covers(&self, remittance: &Remittance) -> bool {
        self.currency_sent == remittance.currency_sent
            && self.currency_received == remittance.currency_received
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::factory::{NewRemittance, RemittanceFactory};
    use crate::domain::ids::{RecipientId, SenderId};
    use crate::domain::remittance::TransferMethod;
    use std::collections::HashSet;

    fn corridor(sent: Currency, received: Currency) -> Corridor {
        Corridor::new(
            CorridorCode::parse("US-MX").unwrap(),
            "United States to Mexico",
            "United States",
            "Mexico",
            sent,
            received,
            dec!(3.5),
        )
    }

    #[test]
    fn test_code_parse_accepts_valid() {
        assert!(CorridorCode::parse("US-MX").is_ok());
        assert!(CorridorCode::parse("GB-CO").is_ok());
    }

    #[test]
    fn test_code_parse_rejects_malformed() {
        assert!(CorridorCode::parse("us-mx").is_err());
        assert!(CorridorCode::parse("USMX").is_err());
        assert!(CorridorCode::parse("USA-MX").is_err());
        assert!(CorridorCode::parse("U1-MX").is_err());
        assert!(CorridorCode::parse("").is_err());
    }

    #[test]
    fn test_new_corridor_starts_active() {
        let corridor = corridor(Currency::Usd, Currency::Mxn);
        assert!(corridor.is_active);
        assert_eq!(corridor.code.as_str(), "US-MX");
    }

    #[test]
    fn test_covers_matches_on_currency_pair() {
        let factory = RemittanceFactory::new();
        let remittance = factory
            .create(
                NewRemittance {
                    sender_id: SenderId::new("snd-1"),
                    recipient_id: RecipientId::new("rcp-1"),
                    amount_sent: dec!(500),
                    currency_sent: Currency::Usd,
                    currency_received: Currency::Mxn,
                    exchange_rate: dec!(17.25),
                    method: TransferMethod::CashPickup,
                },
                &HashSet::new(),
            )
            .unwrap();

        assert!(corridor(Currency::Usd, Currency::Mxn).covers(&remittance));
        assert!(!corridor(Currency::Usd, Currency::Cop).covers(&remittance));
        assert!(!corridor(Currency::Eur, Currency::Mxn).covers(&remittance));
    }
}
