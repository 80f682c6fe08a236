use crate::domain::ids::{ReferenceCode, SenderId};
use crate::domain::remittance::{Remittance, RemittanceStatus, TransferMethod};
use rust_decimal::Decimal;

/// All transfers in the given status, in the order they appear.
pub fn filter_by_status(
    remittances: &[Remittance],
    status: RemittanceStatus,
) -> Vec<&Remittance> {
    remittances.iter().filter(|r| r.status == status).collect()
}

/// All transfers over the given delivery method, in the order they appear.
pub fn filter_by_method(
    remittances: &[Remittance],
    method: TransferMethod,
) -> Vec<&Remittance> {
    remittances.iter().filter(|r| r.method == method).collect()
}

/// Looks a transfer up by its customer-facing code. Codes are unique, so
/// the first hit is the only hit; a miss is a plain `None`, not an error.
pub fn find_by_reference_code<'a>(
    remittances: &'a [Remittance],
    code: &ReferenceCode,
) -> Option<&'a Remittance> {
    remittances.iter().find(|r| &r.reference_code == code)
}

/// Sum of `amount_sent` across a sender's transfers, excluding void
/// states. Cancelled and failed transfers never moved money, so they
/// must not eat into the sender's allowance.
pub fn total_sent_by_sender(remittances: &[Remittance], sender: &SenderId) -> Decimal {
    remittances
        .iter()
        .filter(|r| &r.sender_id == sender && !r.status.is_void())
        .map(|r| r.amount_sent)
        .sum()
}
