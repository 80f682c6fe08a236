use crate::domain::ids::{RecipientId, SenderId};
use crate::domain::remittance::TransferMethod;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identity document kinds accepted at registration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum IdDocumentType {
    Passport,
    NationalId,
    DriversLicense,
    ResidenceCard,
}

/// KYC verification state. Carried on every sender but never used to gate
/// transfers here; enforcement belongs to a compliance layer.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Pending,
    Verified,
    Rejected,
}

/// Contact and identity fields shared by senders and recipients.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub document_type: IdDocumentType,
    pub document_number: String,
}

impl Person {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A registered sender: a person plus the sending-side account state.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Sender {
    pub id: SenderId,
    pub person: Person,
    pub registered_at: DateTime<Utc>,
    pub verification: VerificationStatus,
    /// Ceiling on the amount this sender may move per month.
    pub monthly_limit: Decimal,
    /// Snapshot figure carried from registration data. Allowance checks
    /// always aggregate the live collection instead of trusting this.
    pub sent_this_month: Decimal,
}

impl Sender {
    pub fn new(id: SenderId, person: Person, monthly_limit: Decimal) -> Self {
        Self {
            id,
            person,
            registered_at: Utc::now(),
            verification: VerificationStatus::Pending,
            monthly_limit,
            sent_this_month: Decimal::ZERO,
        }
    }
}

/// Channel-specific delivery details. At most one detail set applies;
/// cash pickup and home delivery need none.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PayoutDetails {
    BankAccount {
        account_number: String,
        bank_name: String,
        swift_bic: Option<String>,
    },
    MobileWallet {
        wallet_id: String,
    },
}

/// A registered recipient: a person plus how money reaches them.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Recipient {
    pub id: RecipientId,
    pub person: Person,
    pub preferred_method: TransferMethod,
    pub payout: Option<PayoutDetails>,
}

impl Recipient {
    pub fn new(
        id: RecipientId,
        person: Person,
        preferred_method: TransferMethod,
        payout: Option<PayoutDetails>,
    ) -> Self {
        Self {
            id,
            person,
            preferred_method,
            payout,
        }
    }

    /// Whether this recipient can be paid out over the given method.
    /// Bank transfers need bank details, wallet transfers a wallet id;
    /// the physical channels work with contact details alone.
    pub fn supports(&self, method: TransferMethod) -> bool {
        match method {
            TransferMethod::BankTransfer => {
                matches!(self.payout, Some(PayoutDetails::BankAccount { .. }))
            }
            TransferMethod::MobileWallet => {
                matches!(self.payout, Some(PayoutDetails::MobileWallet { .. }))
            }
            TransferMethod::CashPickup | TransferMethod::HomeDelivery => true,
        }
    }
}
