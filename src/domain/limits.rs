use crate::domain::person::Sender;
use crate::domain::query;
use crate::domain::remittance::Remittance;
use rust_decimal::Decimal;

/// Outcome of an advisory limit check. The core only reports; whether an
/// exceeded limit blocks the transfer is the caller's policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LimitDecision {
    Within { remaining: Decimal },
    Exceeded { remaining: Decimal },
}

impl LimitDecision {
    pub fn remaining(&self) -> Decimal {
        match self {
            LimitDecision::Within { remaining } | LimitDecision::Exceeded { remaining } => {
                *remaining
            }
        }
    }
}

/// How much the sender may still move this month: the ceiling minus the
/// live aggregate of non-void transfers. Goes negative if the collection
/// already holds more than the ceiling allows.
pub fn remaining_allowance(sender: &Sender, remittances: &[Remittance]) -> Decimal {
    sender.monthly_limit - query::total_sent_by_sender(remittances, &sender.id)
}

/// Checks a proposed send amount against the remaining allowance. An
/// amount that lands exactly on the ceiling is still within it.
pub fn check(sender: &Sender, remittances: &[Remittance], proposed: Decimal) -> LimitDecision {
    let remaining = remaining_allowance(sender, remittances);
    if proposed > remaining {
        LimitDecision::Exceeded { remaining }
    } else {
        LimitDecision::Within { remaining }
    }
}
