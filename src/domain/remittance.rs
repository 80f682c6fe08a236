use crate::domain::ids::{RecipientId, ReferenceCode, SenderId, TransactionId};
use crate::error::RemitError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currencies the platform moves money between.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Cop,
    Mxn,
    Brl,
    Pen,
}

impl Currency {
    /// ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Cop => "COP",
            Currency::Mxn => "MXN",
            Currency::Brl => "BRL",
            Currency::Pen => "PEN",
        }
    }
}

impl FromStr for Currency {
    type Err = RemitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            "COP" => Ok(Currency::Cop),
            "MXN" => Ok(Currency::Mxn),
            "BRL" => Ok(Currency::Brl),
            "PEN" => Ok(Currency::Pen),
            other => Err(RemitError::Validation(format!(
                "unsupported currency: {other}"
            ))),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// How the funds reach the recipient.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum TransferMethod {
    BankTransfer,
    CashPickup,
    MobileWallet,
    HomeDelivery,
}

impl TransferMethod {
    pub const ALL: [TransferMethod; 4] = [
        TransferMethod::BankTransfer,
        TransferMethod::CashPickup,
        TransferMethod::MobileWallet,
        TransferMethod::HomeDelivery,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransferMethod::BankTransfer => "bank_transfer",
            TransferMethod::CashPickup => "cash_pickup",
            TransferMethod::MobileWallet => "mobile_wallet",
            TransferMethod::HomeDelivery => "home_delivery",
        }
    }
}

impl FromStr for TransferMethod {
    type Err = RemitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bank_transfer" => Ok(TransferMethod::BankTransfer),
            "cash_pickup" => Ok(TransferMethod::CashPickup),
            "mobile_wallet" => Ok(TransferMethod::MobileWallet),
            "home_delivery" => Ok(TransferMethod::HomeDelivery),
            other => Err(RemitError::UnsupportedMethod(other.to_string())),
        }
    }
}

impl fmt::Display for TransferMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle state of a remittance.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum RemittanceStatus {
    Pending,
    Processing,
    Completed,
    Cancelled,
    Failed,
}

impl RemittanceStatus {
    pub const ALL: [RemittanceStatus; 5] = [
        RemittanceStatus::Pending,
        RemittanceStatus::Processing,
        RemittanceStatus::Completed,
        RemittanceStatus::Cancelled,
        RemittanceStatus::Failed,
    ];

    /// Terminal states accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RemittanceStatus::Completed | RemittanceStatus::Cancelled | RemittanceStatus::Failed
        )
    }

    /// Void states represent money that never moved; they are excluded
    /// from sent-amount aggregation.
    pub fn is_void(&self) -> bool {
        matches!(
            self,
            RemittanceStatus::Cancelled | RemittanceStatus::Failed
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RemittanceStatus::Pending => "pending",
            RemittanceStatus::Processing => "processing",
            RemittanceStatus::Completed => "completed",
            RemittanceStatus::Cancelled => "cancelled",
            RemittanceStatus::Failed => "failed",
        }
    }
}

impl FromStr for RemittanceStatus {
    type Err = RemitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RemittanceStatus::Pending),
            "processing" => Ok(RemittanceStatus::Processing),
            "completed" => Ok(RemittanceStatus::Completed),
            "cancelled" => Ok(RemittanceStatus::Cancelled),
            "failed" => Ok(RemittanceStatus::Failed),
            other => Err(RemitError::Validation(format!("unknown status: {other}"))),
        }
    }
}

impl fmt::Display for RemittanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single money transfer record.
///
/// Monetary fields are `Decimal` throughout; `amount_received`, `fee` and
/// `total_cost` are derived at creation and only ever rewritten by the
/// same derivation. `status` is mutated exclusively through
/// [`crate::domain::lifecycle::transition`].
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Remittance {
    pub id: TransactionId,
    /// Customer-facing tracking code, unique within a collection.
    pub reference_code: ReferenceCode,
    pub sender_id: SenderId,
    pub recipient_id: RecipientId,
    pub amount_sent: Decimal,
    pub currency_sent: Currency,
    /// `amount_sent * exchange_rate`, rounded to 2 dp half-up.
    pub amount_received: Decimal,
    pub currency_received: Currency,
    pub exchange_rate: Decimal,
    pub fee: Decimal,
    /// `amount_sent + fee`, the figure charged to the sender.
    pub total_cost: Decimal,
    pub method: TransferMethod,
    pub status: RemittanceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Set exactly once, when the transfer reaches `Completed`.
    pub completed_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_round_trips_through_code() {
        for code in ["USD", "EUR", "GBP", "COP", "MXN", "BRL", "PEN"] {
            let currency: Currency = code.parse().unwrap();
            assert_eq!(currency.code(), code);
        }
    }

    #[test]
    fn test_currency_rejects_unknown_code() {
        assert!(matches!(
            "XTS".parse::<Currency>(),
            Err(RemitError::Validation(_))
        ));
    }

    #[test]
    fn test_method_parse_rejects_unknown() {
        assert!(matches!(
            "carrier_pigeon".parse::<TransferMethod>(),
            Err(RemitError::UnsupportedMethod(_))
        ));
        // Parsing is strict about case, unlike currency codes.
        assert!("BANK_TRANSFER".parse::<TransferMethod>().is_err());
    }

    #[test]
    fn test_method_serde_uses_snake_case() {
        let json = serde_json::to_string(&TransferMethod::MobileWallet).unwrap();
        assert_eq!(json, "\"mobile_wallet\"");
    }

    #[test]
    fn test_status_terminal_and_void_sets() {
        assert!(!RemittanceStatus::Pending.is_terminal());
        assert!(!RemittanceStatus::Processing.is_terminal());
        assert!(RemittanceStatus::Completed.is_terminal());
        assert!(RemittanceStatus::Cancelled.is_terminal());
        assert!(RemittanceStatus::Failed.is_terminal());

        assert!(RemittanceStatus::Cancelled.is_void());
        assert!(RemittanceStatus::Failed.is_void());
        assert!(!RemittanceStatus::Completed.is_void());
        assert!(!RemittanceStatus::Pending.is_void());
    }

    #[test]
    fn test_status_serde_is_lowercase() {
        let json = serde_json::to_string(&RemittanceStatus::Processing).unwrap();
        assert_eq!(json, "\"processing\"");
        let back: RemittanceStatus = serde_json::from_str("\"failed\"").unwrap();
        assert_eq!(back, RemittanceStatus::Failed);
    }
}
