use crate::domain::remittance::{Remittance, RemittanceStatus};
use crate::error::{RemitError, Result};
use chrono::Utc;

/// Whether the lifecycle graph has an edge `from -> to`.
///
/// Terminal states have no outgoing edges. A pending transfer may settle
/// directly, skipping `Processing`.
pub fn permitted(from: RemittanceStatus, to: RemittanceStatus) -> bool {
    use RemittanceStatus::*;
    matches!(
        (from, to),
        (Pending, Processing)
            | (Pending, Completed)
            | (Pending, Cancelled)
            | (Pending, Failed)
            | (Processing, Completed)
            | (Processing, Failed)
    )
}

/// Applies a status change, returning the updated copy of the record.
///
/// `updated_at` is stamped monotonically (never moves backwards even if
/// the wall clock does). `completed_at` is set when the transfer reaches
/// `Completed` and is never cleared by later calls, which cannot happen
/// anyway since `Completed` is terminal.
pub fn transition(remittance: &Remittance, next: RemittanceStatus) -> Result<Remittance> {
    if !permitted(remittance.status, next) {
        return Err(RemitError::InvalidTransition(format!(
            "{} -> {}",
            remittance.status, next
        )));
    }

    let stamp = Utc::now().max(remittance.updated_at);
    let mut updated = remittance.clone();
    updated.status = next;
    updated.updated_at = stamp;
    if next == RemittanceStatus::Completed {
        updated.completed_at = Some(stamp);
    }
    Ok(updated)
}
