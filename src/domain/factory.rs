use crate::domain::fee;
use crate::domain::ids::{
    IdGenerator, RandomIdGenerator, RecipientId, ReferenceCode, SenderId,
};
use crate::domain::money::{require_positive_amount, require_positive_rate, round2};
use crate::domain::remittance::{Currency, Remittance, RemittanceStatus, TransferMethod};
use crate::error::{RemitError, Result};
use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::HashSet;

/// How many reference codes the factory will draw before giving up.
pub const MAX_CODE_ATTEMPTS: usize = 32;

/// Caller-supplied inputs for a new transfer. Everything else on the
/// record is derived or generated.
#[derive(Debug, Clone)]
pub struct NewRemittance {
    pub sender_id: SenderId,
    pub recipient_id: RecipientId,
    pub amount_sent: Decimal,
    pub currency_sent: Currency,
    pub currency_received: Currency,
    pub exchange_rate: Decimal,
    pub method: TransferMethod,
}

/// Builds fully-formed remittance records.
///
/// The factory owns the id source so creation is deterministic under
/// test; uniqueness of the reference code is checked against the taken
/// set the caller snapshots from its collection.
pub struct RemittanceFactory {
    generator: Box<dyn IdGenerator>,
}

impl Default for RemittanceFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl RemittanceFactory {
    pub fn new() -> Self {
        Self {
            generator: Box::new(RandomIdGenerator),
        }
    }

    pub fn with_generator(generator: Box<dyn IdGenerator>) -> Self {
        Self { generator }
    }

    /// Validates the request and assembles a `Pending` record.
    ///
    /// Derived fields are settled here and nowhere else: the fee comes
    /// from the fee schedule, `amount_received` is the converted amount
    /// rounded to 2 dp half-up, and `total_cost` is exactly
    /// `amount_sent + fee`.
    pub fn create(
        &self,
        request: NewRemittance,
        taken: &HashSet<ReferenceCode>,
    ) -> Result<Remittance> {
        let amount_sent = require_positive_amount(request.amount_sent)?;
        let exchange_rate = require_positive_rate(request.exchange_rate)?;
        let fee = fee::compute(amount_sent, request.method)?;
        let amount_received = round2(amount_sent * exchange_rate);
        let total_cost = amount_sent + fee;
        let reference_code = self.fresh_code(taken)?;

        let now = Utc::now();
        Ok(Remittance {
            id: self.generator.transaction_id(),
            reference_code,
            sender_id: request.sender_id,
            recipient_id: request.recipient_id,
            amount_sent,
            currency_sent: request.currency_sent,
            amount_received,
            currency_received: request.currency_received,
            exchange_rate,
            fee,
            total_cost,
            method: request.method,
            status: RemittanceStatus::Pending,
            created_at: now,
            updated_at: now,
            completed_at: None,
        })
    }

    fn fresh_code(&self, taken: &HashSet<ReferenceCode>) -> Result<ReferenceCode> {
        for _ in 0..MAX_CODE_ATTEMPTS {
            let candidate = self.generator.reference_code();
            if !taken.contains(&candidate) {
                return Ok(candidate);
            }
        }
        Err(RemitError::CodeSpaceExhausted(MAX_CODE_ATTEMPTS))
    }
}
