use crate::domain::corridor::{Corridor, CorridorCode, MAX_BASE_FEE_PERCENTAGE};
use crate::domain::factory::{NewRemittance, RemittanceFactory, MAX_CODE_ATTEMPTS};
use crate::domain::ids::{RecipientId, ReferenceCode, SenderId, TransactionId};
use crate::domain::lifecycle;
use crate::domain::limits::{self, LimitDecision};
use crate::domain::money;
use crate::domain::person::{Recipient, Sender};
use crate::domain::ports::{
    CorridorStoreBox, RecipientStoreBox, RemittanceStoreBox, SenderStoreBox,
};
use crate::domain::query;
use crate::domain::remittance::{Currency, Remittance, RemittanceStatus, TransferMethod};
use crate::domain::fee;
use crate::error::{RemitError, Result};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Listing window, 1-based. The original API served at most 100 records
/// per page and defaulted to 10.
pub const DEFAULT_PER_PAGE: usize = 10;
pub const MAX_PER_PAGE: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    page: usize,
    per_page: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl Page {
    pub fn new(page: usize, per_page: usize) -> Result<Self> {
        if page < 1 {
            return Err(RemitError::Validation("page starts at 1".to_string()));
        }
        if per_page < 1 || per_page > MAX_PER_PAGE {
            return Err(RemitError::Validation(format!(
                "per_page must be between 1 and {MAX_PER_PAGE}"
            )));
        }
        Ok(Self { page, per_page })
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }
}

/// One page of results plus the window arithmetic the caller needs to
/// fetch the rest.
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

fn window<T>(items: Vec<T>, page: Page) -> Paginated<T> {
    let total = items.len();
    // An empty match set still reports one page; a window past the end
    // slices to empty.
    let pages = total.div_ceil(page.per_page).max(1);
    let items = items
        .into_iter()
        .skip(page.page.saturating_sub(1).saturating_mul(page.per_page))
        .take(page.per_page)
        .collect();

    Paginated {
        items,
        total,
        page: page.page,
        per_page: page.per_page,
        pages,
        has_next: page.page < pages,
        has_prev: page.page > 1,
    }
}

/// Composite listing filter; unset fields match everything.
#[derive(Debug, Default, Clone)]
pub struct RemittanceFilter {
    pub status: Option<RemittanceStatus>,
    /// Matches transfers that involve the currency on either side.
    pub currency: Option<Currency>,
    pub method: Option<TransferMethod>,
    pub sender_id: Option<SenderId>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
}

impl RemittanceFilter {
    fn matches(&self, remittance: &Remittance) -> bool {
        if let Some(status) = self.status
            && remittance.status != status
        {
            return false;
        }
        if let Some(currency) = self.currency
            && remittance.currency_sent != currency
            && remittance.currency_received != currency
        {
            return false;
        }
        if let Some(method) = self.method
            && remittance.method != method
        {
            return false;
        }
        if let Some(sender_id) = &self.sender_id
            && &remittance.sender_id != sender_id
        {
            return false;
        }
        if let Some(min) = self.min_amount
            && remittance.amount_sent < min
        {
            return false;
        }
        if let Some(max) = self.max_amount
            && remittance.amount_sent > max
        {
            return false;
        }
        true
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Amount,
    Fee,
    #[default]
    CreatedAt,
}

impl FromStr for SortField {
    type Err = RemitError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "amount" => Ok(SortField::Amount),
            "fee" => Ok(SortField::Fee),
            "created_at" => Ok(SortField::CreatedAt),
            other => Err(RemitError::Validation(format!(
                "cannot sort by {other:?}, expected amount, fee or created_at"
            ))),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortOrder {
    type Err = RemitError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(RemitError::Validation(format!(
                "sort order must be asc or desc, got {other:?}"
            ))),
        }
    }
}

/// Sort specification for listings. Defaults to newest-first.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub order: SortOrder,
}

impl Sort {
    fn apply(&self, items: &mut [Remittance]) {
        let field = self.field;
        let order = self.order;
        items.sort_by(|a, b| {
            let ordering = match field {
                SortField::Amount => a.amount_sent.cmp(&b.amount_sent),
                SortField::Fee => a.fee.cmp(&b.fee),
                SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            };
            match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
    }
}

/// Partial update of a pending transfer. Derived fields are never
/// accepted from outside; changing any input re-runs the derivation.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RemittancePatch {
    pub amount_sent: Option<Decimal>,
    pub exchange_rate: Option<Decimal>,
    pub currency_sent: Option<Currency>,
    pub currency_received: Option<Currency>,
    pub method: Option<TransferMethod>,
}

impl RemittancePatch {
    pub fn is_empty(&self) -> bool {
        self.amount_sent.is_none()
            && self.exchange_rate.is_none()
            && self.currency_sent.is_none()
            && self.currency_received.is_none()
            && self.method.is_none()
    }
}

/// Collection-wide summary figures.
#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub total_remittances: usize,
    pub total_sent: Decimal,
    pub total_fees: Decimal,
    pub average_amount: Decimal,
    pub by_status: BTreeMap<String, usize>,
}

/// Partial update of a catalogue corridor. The code is its key and
/// cannot change.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CorridorPatch {
    pub name: Option<String>,
    pub origin_country: Option<String>,
    pub destination_country: Option<String>,
    pub currency_sent: Option<Currency>,
    pub currency_received: Option<Currency>,
    pub base_fee_percentage: Option<Decimal>,
    pub is_active: Option<bool>,
}

impl CorridorPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.origin_country.is_none()
            && self.destination_country.is_none()
            && self.currency_sent.is_none()
            && self.currency_received.is_none()
            && self.base_fee_percentage.is_none()
            && self.is_active.is_none()
    }
}

/// Traffic summary for one corridor, over the remittances whose currency
/// pair it covers.
#[derive(Debug, Clone, Serialize)]
pub struct CorridorStats {
    pub code: CorridorCode,
    pub name: String,
    pub is_active: bool,
    pub total_remittances: usize,
    pub total_amount: Decimal,
    pub total_fees: Decimal,
    pub average_amount: Decimal,
}

/// The orchestration layer over the remittance core.
///
/// Owns the store ports and the record factory. All status changes go
/// through the lifecycle rules and every monetary field is derived by
/// the core math; this service adds the policies the core deliberately
/// leaves to its caller (limit enforcement, update and delete rules).
pub struct RemittanceService {
    remittances: RemittanceStoreBox,
    senders: SenderStoreBox,
    recipients: RecipientStoreBox,
    corridors: CorridorStoreBox,
    factory: RemittanceFactory,
}

impl RemittanceService {
    pub fn new(
        remittances: RemittanceStoreBox,
        senders: SenderStoreBox,
        recipients: RecipientStoreBox,
        corridors: CorridorStoreBox,
    ) -> Self {
        Self::with_factory(
            remittances,
            senders,
            recipients,
            corridors,
            RemittanceFactory::new(),
        )
    }

    /// Builds the service around a custom factory, letting tests inject a
    /// deterministic id source.
    pub fn with_factory(
        remittances: RemittanceStoreBox,
        senders: SenderStoreBox,
        recipients: RecipientStoreBox,
        corridors: CorridorStoreBox,
        factory: RemittanceFactory,
    ) -> Self {
        Self {
            remittances,
            senders,
            recipients,
            corridors,
            factory,
        }
    }

    /// Registers a sender. Ids are caller-chosen and must be unused.
    pub async fn register_sender(&self, sender: Sender) -> Result<()> {
        tracing::debug!(sender = %sender.id, "registering sender");
        self.senders.insert(sender).await
    }

    /// Registers a recipient. Ids are caller-chosen and must be unused.
    pub async fn register_recipient(&self, recipient: Recipient) -> Result<()> {
        tracing::debug!(recipient = %recipient.id, "registering recipient");
        self.recipients.insert(recipient).await
    }

    pub async fn sender(&self, id: &SenderId) -> Result<Sender> {
        self.senders
            .get(id)
            .await?
            .ok_or_else(|| RemitError::NotFound(format!("sender {id}")))
    }

    pub async fn recipient(&self, id: &RecipientId) -> Result<Recipient> {
        self.recipients
            .get(id)
            .await?
            .ok_or_else(|| RemitError::NotFound(format!("recipient {id}")))
    }

    /// Creates a transfer: both parties must be registered, the recipient
    /// must be payable over the chosen method, and the amount must fit
    /// the sender's remaining monthly allowance. The core's advisory
    /// limit check becomes a hard rule at this layer.
    pub async fn create(&self, request: NewRemittance) -> Result<Remittance> {
        let amount_sent = money::require_positive_amount(request.amount_sent)?;
        let sender = self.sender(&request.sender_id).await?;
        let recipient = self.recipient(&request.recipient_id).await?;

        if !recipient.supports(request.method) {
            return Err(RemitError::Validation(format!(
                "recipient {} has no payout details for {}",
                recipient.id, request.method
            )));
        }

        let all = self.remittances.all().await?;
        if let LimitDecision::Exceeded { remaining } = limits::check(&sender, &all, amount_sent) {
            return Err(RemitError::LimitExceeded(format!(
                "sender {} may send at most {} more this month",
                sender.id,
                remaining.max(Decimal::ZERO)
            )));
        }

        // The factory retries against a snapshot of taken codes; if a
        // concurrent creation wins the same code at the store, draw again.
        let mut attempts = 0;
        loop {
            let taken = self.remittances.reference_codes().await?;
            let remittance = self.factory.create(request.clone(), &taken)?;
            match self.remittances.insert(remittance.clone()).await {
                Ok(()) => {
                    tracing::info!(
                        remittance = %remittance.id,
                        reference = %remittance.reference_code,
                        amount = %remittance.amount_sent,
                        method = %remittance.method,
                        "created remittance"
                    );
                    return Ok(remittance);
                }
                Err(RemitError::DuplicateReference(_)) if attempts + 1 < MAX_CODE_ATTEMPTS => {
                    attempts += 1;
                }
                Err(RemitError::DuplicateReference(_)) => {
                    return Err(RemitError::CodeSpaceExhausted(MAX_CODE_ATTEMPTS));
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Lists transfers matching `filter`, sorted then windowed.
    pub async fn list(
        &self,
        filter: &RemittanceFilter,
        sort: Sort,
        page: Page,
    ) -> Result<Paginated<Remittance>> {
        let all = self.remittances.all().await?;
        let mut matching: Vec<Remittance> =
            all.into_iter().filter(|r| filter.matches(r)).collect();
        sort.apply(&mut matching);

        Ok(window(matching, page))
    }

    /// All transfers in `status`, in insertion order.
    pub async fn by_status(&self, status: RemittanceStatus) -> Result<Vec<Remittance>> {
        let all = self.remittances.all().await?;
        Ok(query::filter_by_status(&all, status)
            .into_iter()
            .cloned()
            .collect())
    }

    /// All transfers over `method`, in insertion order.
    pub async fn by_method(&self, method: TransferMethod) -> Result<Vec<Remittance>> {
        let all = self.remittances.all().await?;
        Ok(query::filter_by_method(&all, method)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn get(&self, id: &TransactionId) -> Result<Remittance> {
        self.remittances
            .get(id)
            .await?
            .ok_or_else(|| RemitError::NotFound(format!("remittance {id}")))
    }

    pub async fn get_by_reference(&self, code: &ReferenceCode) -> Result<Remittance> {
        let all = self.remittances.all().await?;
        query::find_by_reference_code(&all, code)
            .cloned()
            .ok_or_else(|| RemitError::NotFound(format!("remittance {code}")))
    }

    /// Applies a partial update to a pending transfer and re-derives the
    /// dependent fields. A raised amount re-clears the sender's monthly
    /// ceiling. Reference code and status are never touched.
    pub async fn update(&self, id: &TransactionId, patch: RemittancePatch) -> Result<Remittance> {
        if patch.is_empty() {
            return Err(RemitError::Validation("no fields to update".to_string()));
        }

        let current = self.get(id).await?;
        if current.status != RemittanceStatus::Pending {
            return Err(RemitError::Validation(format!(
                "only pending remittances can be updated, {id} is {}",
                current.status
            )));
        }

        let amount_sent =
            money::require_positive_amount(patch.amount_sent.unwrap_or(current.amount_sent))?;
        let exchange_rate =
            money::require_positive_rate(patch.exchange_rate.unwrap_or(current.exchange_rate))?;
        let method = patch.method.unwrap_or(current.method);

        // The ceiling applies to the patched amount too; the record
        // under edit is excluded so its old amount does not count
        // against itself.
        if amount_sent > current.amount_sent {
            let sender = self.sender(&current.sender_id).await?;
            let others: Vec<Remittance> = self
                .remittances
                .all()
                .await?
                .into_iter()
                .filter(|r| r.id != current.id)
                .collect();
            if let LimitDecision::Exceeded { remaining } =
                limits::check(&sender, &others, amount_sent)
            {
                return Err(RemitError::LimitExceeded(format!(
                    "sender {} may send at most {} more this month",
                    sender.id,
                    remaining.max(Decimal::ZERO)
                )));
            }
        }

        let fee = fee::compute(amount_sent, method)?;

        let mut updated = current.clone();
        updated.amount_sent = amount_sent;
        updated.exchange_rate = exchange_rate;
        updated.currency_sent = patch.currency_sent.unwrap_or(current.currency_sent);
        updated.currency_received = patch.currency_received.unwrap_or(current.currency_received);
        updated.method = method;
        updated.amount_received = money::round2(amount_sent * exchange_rate);
        updated.fee = fee;
        updated.total_cost = amount_sent + fee;
        updated.updated_at = Utc::now().max(current.updated_at);

        self.remittances.update(updated.clone()).await?;
        Ok(updated)
    }

    /// Moves a transfer to `next` through the lifecycle rules and
    /// persists the returned copy.
    pub async fn transition(
        &self,
        id: &TransactionId,
        next: RemittanceStatus,
    ) -> Result<Remittance> {
        let current = self.get(id).await?;
        let updated = lifecycle::transition(&current, next)?;
        self.remittances.update(updated.clone()).await?;
        tracing::info!(
            remittance = %id,
            from = %current.status,
            to = %next,
            "status change"
        );
        Ok(updated)
    }

    pub async fn process(&self, id: &TransactionId) -> Result<Remittance> {
        self.transition(id, RemittanceStatus::Processing).await
    }

    pub async fn complete(&self, id: &TransactionId) -> Result<Remittance> {
        self.transition(id, RemittanceStatus::Completed).await
    }

    pub async fn cancel(&self, id: &TransactionId) -> Result<Remittance> {
        self.transition(id, RemittanceStatus::Cancelled).await
    }

    pub async fn fail(&self, id: &TransactionId) -> Result<Remittance> {
        self.transition(id, RemittanceStatus::Failed).await
    }

    /// Removes a transfer that never entered processing: only pending and
    /// cancelled records may be deleted.
    pub async fn delete(&self, id: &TransactionId) -> Result<Remittance> {
        let current = self.get(id).await?;
        if !matches!(
            current.status,
            RemittanceStatus::Pending | RemittanceStatus::Cancelled
        ) {
            return Err(RemitError::Validation(format!(
                "only pending or cancelled remittances can be deleted, {id} is {}",
                current.status
            )));
        }

        match self.remittances.remove(id).await? {
            Some(removed) => {
                tracing::info!(remittance = %id, "deleted remittance");
                Ok(removed)
            }
            None => Err(RemitError::NotFound(format!("remittance {id}"))),
        }
    }

    /// Live aggregate of a sender's non-void transfers. Senders with no
    /// transfers (registered or not) sum to zero.
    pub async fn total_sent(&self, sender_id: &SenderId) -> Result<Decimal> {
        let all = self.remittances.all().await?;
        Ok(query::total_sent_by_sender(&all, sender_id))
    }

    /// Remaining monthly allowance for a registered sender.
    pub async fn allowance(&self, sender_id: &SenderId) -> Result<Decimal> {
        let sender = self.sender(sender_id).await?;
        let all = self.remittances.all().await?;
        Ok(limits::remaining_allowance(&sender, &all))
    }

    /// Advisory limit check for a proposed amount, without creating
    /// anything.
    pub async fn check_limit(
        &self,
        sender_id: &SenderId,
        proposed: Decimal,
    ) -> Result<LimitDecision> {
        let sender = self.sender(sender_id).await?;
        let all = self.remittances.all().await?;
        Ok(limits::check(&sender, &all, proposed))
    }

    /// Collection-wide summary: counts and sums over every record,
    /// whatever its status.
    pub async fn stats(&self) -> Result<Stats> {
        let all = self.remittances.all().await?;
        let total_remittances = all.len();
        let total_sent: Decimal = all.iter().map(|r| r.amount_sent).sum();
        let total_fees: Decimal = all.iter().map(|r| r.fee).sum();
        let average_amount = if total_remittances == 0 {
            Decimal::ZERO
        } else {
            money::round2(total_sent / Decimal::from(total_remittances))
        };

        let mut by_status = BTreeMap::new();
        for status in RemittanceStatus::ALL {
            by_status.insert(status.as_str().to_string(), 0);
        }
        for remittance in &all {
            *by_status
                .entry(remittance.status.as_str().to_string())
                .or_insert(0) += 1;
        }

        Ok(Stats {
            total_remittances,
            total_sent,
            total_fees,
            average_amount,
            by_status,
        })
    }

    /// Adds a corridor to the catalogue. Codes are caller-chosen and must
    /// be unused; the base fee percentage must sit in `(0, 15]`.
    pub async fn register_corridor(&self, corridor: Corridor) -> Result<()> {
        require_base_fee_in_range(corridor.base_fee_percentage)?;
        tracing::debug!(corridor = %corridor.code, "registering corridor");
        self.corridors.insert(corridor).await
    }

    /// The catalogue in registration order. `is_active` narrows to
    /// corridors in that activation state; `None` returns everything.
    pub async fn corridors(&self, is_active: Option<bool>) -> Result<Vec<Corridor>> {
        let mut all = self.corridors.all().await?;
        if let Some(want) = is_active {
            all.retain(|c| c.is_active == want);
        }
        Ok(all)
    }

    pub async fn corridor(&self, code: &CorridorCode) -> Result<Corridor> {
        self.corridors
            .get(code)
            .await?
            .ok_or_else(|| RemitError::NotFound(format!("corridor {code}")))
    }

    /// Applies a partial update to a corridor. The code is immutable.
    pub async fn update_corridor(
        &self,
        code: &CorridorCode,
        patch: CorridorPatch,
    ) -> Result<Corridor> {
        if patch.is_empty() {
            return Err(RemitError::Validation("no fields to update".to_string()));
        }
        if let Some(base_fee) = patch.base_fee_percentage {
            require_base_fee_in_range(base_fee)?;
        }

        let current = self.corridor(code).await?;
        let mut updated = current.clone();
        updated.name = patch.name.unwrap_or(current.name);
        updated.origin_country = patch.origin_country.unwrap_or(current.origin_country);
        updated.destination_country = patch
            .destination_country
            .unwrap_or(current.destination_country);
        updated.currency_sent = patch.currency_sent.unwrap_or(current.currency_sent);
        updated.currency_received = patch.currency_received.unwrap_or(current.currency_received);
        updated.base_fee_percentage = patch
            .base_fee_percentage
            .unwrap_or(current.base_fee_percentage);
        updated.is_active = patch.is_active.unwrap_or(current.is_active);

        self.corridors.update(updated.clone()).await?;
        Ok(updated)
    }

    /// Removes a corridor, refused while any remittance in the collection
    /// is covered by it.
    pub async fn remove_corridor(&self, code: &CorridorCode) -> Result<Corridor> {
        let corridor = self.corridor(code).await?;
        let all = self.remittances.all().await?;
        let covered = all.iter().filter(|r| corridor.covers(r)).count();
        if covered > 0 {
            return Err(RemitError::Validation(format!(
                "corridor {code} still covers {covered} remittance(s)"
            )));
        }

        match self.corridors.remove(code).await? {
            Some(removed) => {
                tracing::info!(corridor = %code, "removed corridor");
                Ok(removed)
            }
            None => Err(RemitError::NotFound(format!("corridor {code}"))),
        }
    }

    /// Remittances whose currency pair the corridor covers, windowed, in
    /// insertion order.
    pub async fn corridor_remittances(
        &self,
        code: &CorridorCode,
        page: Page,
    ) -> Result<Paginated<Remittance>> {
        let corridor = self.corridor(code).await?;
        let all = self.remittances.all().await?;
        let covered: Vec<Remittance> =
            all.into_iter().filter(|r| corridor.covers(r)).collect();
        Ok(window(covered, page))
    }

    /// Per-corridor traffic totals, in catalogue order.
    pub async fn corridor_stats(&self) -> Result<Vec<CorridorStats>> {
        let corridors = self.corridors.all().await?;
        let all = self.remittances.all().await?;

        Ok(corridors
            .into_iter()
            .map(|corridor| {
                let covered: Vec<&Remittance> =
                    all.iter().filter(|r| corridor.covers(r)).collect();
                let total_amount: Decimal = covered.iter().map(|r| r.amount_sent).sum();
                let total_fees: Decimal = covered.iter().map(|r| r.fee).sum();
                let average_amount = if covered.is_empty() {
                    Decimal::ZERO
                } else {
                    money::round2(total_amount / Decimal::from(covered.len()))
                };

                CorridorStats {
                    code: corridor.code,
                    name: corridor.name,
                    is_active: corridor.is_active,
                    total_remittances: covered.len(),
                    total_amount,
                    total_fees,
                    average_amount,
                }
            })
            .collect())
    }
}

fn require_base_fee_in_range(base_fee: Decimal) -> Result<()> {
    if base_fee <= Decimal::ZERO || base_fee > MAX_BASE_FEE_PERCENTAGE {
        return Err(RemitError::Validation(format!(
            "base fee percentage must be positive and at most {MAX_BASE_FEE_PERCENTAGE}, got {base_fee}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::person::{IdDocumentType, PayoutDetails, Person};
    use crate::infrastructure::in_memory::{
        InMemoryCorridorStore, InMemoryRecipientStore, InMemoryRemittanceStore,
        InMemorySenderStore,
    };
    use rust_decimal_macros::dec;

    fn person(first: &str, last: &str) -> Person {
        Person {
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: format!("{}@example.com", first.to_lowercase()),
            phone: "+57 300 111 2233".to_string(),
            country: "Colombia".to_string(),
            document_type: IdDocumentType::Passport,
            document_number: "PA9988776".to_string(),
        }
    }

    async fn service() -> RemittanceService {
        let service = RemittanceService::new(
            Box::new(InMemoryRemittanceStore::new()),
            Box::new(InMemorySenderStore::new()),
            Box::new(InMemoryRecipientStore::new()),
            Box::new(InMemoryCorridorStore::new()),
        );
        service
            .register_sender(Sender::new(
                SenderId::new("maria"),
                person("Maria", "Gomez"),
                dec!(3000),
            ))
            .await
            .unwrap();
        service
            .register_recipient(Recipient::new(
                RecipientId::new("lucia"),
                person("Lucia", "Torres"),
                TransferMethod::CashPickup,
                None,
            ))
            .await
            .unwrap();
        service
    }

    fn request(amount: Decimal) -> NewRemittance {
        NewRemittance {
            sender_id: SenderId::new("maria"),
            recipient_id: RecipientId::new("lucia"),
            amount_sent: amount,
            currency_sent: Currency::Usd,
            currency_received: Currency::Cop,
            exchange_rate: dec!(17.25),
            method: TransferMethod::CashPickup,
        }
    }

    #[tokio::test]
    async fn test_create_persists_a_derived_record() {
        let service = service().await;
        let created = service.create(request(dec!(500))).await.unwrap();

        let fetched = service.get(&created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.amount_received, dec!(8625.00));
        assert_eq!(fetched.total_cost, fetched.amount_sent + fetched.fee);
        assert_eq!(fetched.status, RemittanceStatus::Pending);
    }

    #[tokio::test]
    async fn test_create_requires_registered_parties() {
        let service = service().await;

        let mut unknown_sender = request(dec!(100));
        unknown_sender.sender_id = SenderId::new("ghost");
        assert!(matches!(
            service.create(unknown_sender).await,
            Err(RemitError::NotFound(_))
        ));

        let mut unknown_recipient = request(dec!(100));
        unknown_recipient.recipient_id = RecipientId::new("ghost");
        assert!(matches!(
            service.create(unknown_recipient).await,
            Err(RemitError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_create_checks_payout_channel() {
        let service = service().await;
        // Lucia has no bank details on file.
        let mut bank = request(dec!(100));
        bank.method = TransferMethod::BankTransfer;
        assert!(matches!(
            service.create(bank).await,
            Err(RemitError::Validation(_))
        ));

        service
            .register_recipient(Recipient::new(
                RecipientId::new("pedro"),
                person("Pedro", "Ruiz"),
                TransferMethod::BankTransfer,
                Some(PayoutDetails::BankAccount {
                    account_number: "0011223344".to_string(),
                    bank_name: "Bancolombia".to_string(),
                    swift_bic: None,
                }),
            ))
            .await
            .unwrap();
        let mut bank = request(dec!(100));
        bank.recipient_id = RecipientId::new("pedro");
        bank.method = TransferMethod::BankTransfer;
        assert!(service.create(bank).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_rederives_dependent_fields() {
        let service = service().await;
        let created = service.create(request(dec!(500))).await.unwrap();

        let patch = RemittancePatch {
            amount_sent: Some(dec!(1000)),
            ..Default::default()
        };
        let updated = service.update(&created.id, patch).await.unwrap();

        assert_eq!(updated.amount_sent, dec!(1000));
        // 1000 * 0.02 + 3.00 = 23.00
        assert_eq!(updated.fee, dec!(23.00));
        assert_eq!(updated.total_cost, dec!(1023.00));
        assert_eq!(updated.amount_received, dec!(17250.00));
        assert_eq!(updated.reference_code, created.reference_code);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_rejects_empty_patch() {
        let service = service().await;
        let created = service.create(request(dec!(500))).await.unwrap();

        let result = service.update(&created.id, RemittancePatch::default()).await;
        assert!(matches!(result, Err(RemitError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_only_touches_pending_records() {
        let service = service().await;
        let created = service.create(request(dec!(500))).await.unwrap();
        service.process(&created.id).await.unwrap();

        let patch = RemittancePatch {
            amount_sent: Some(dec!(200)),
            ..Default::default()
        };
        assert!(matches!(
            service.update(&created.id, patch).await,
            Err(RemitError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_page_bounds_are_validated() {
        let page = Page::new(2, 50).unwrap();
        assert_eq!(page.page(), 2);
        assert_eq!(page.per_page(), 50);

        assert!(Page::new(0, 10).is_err());
        assert!(Page::new(1, 0).is_err());
        assert!(Page::new(1, MAX_PER_PAGE + 1).is_err());
    }

    fn corridor(code: &str, sent: Currency, received: Currency) -> Corridor {
        Corridor::new(
            CorridorCode::parse(code).unwrap(),
            format!("{sent} to {received}"),
            "United States",
            "Colombia",
            sent,
            received,
            dec!(3.5),
        )
    }

    #[tokio::test]
    async fn test_register_corridor_validates_base_fee() {
        let service = service().await;

        let mut too_high = corridor("US-CO", Currency::Usd, Currency::Cop);
        too_high.base_fee_percentage = dec!(15.5);
        assert!(matches!(
            service.register_corridor(too_high).await,
            Err(RemitError::Validation(_))
        ));

        let mut zero = corridor("US-CO", Currency::Usd, Currency::Cop);
        zero.base_fee_percentage = dec!(0);
        assert!(matches!(
            service.register_corridor(zero).await,
            Err(RemitError::Validation(_))
        ));

        assert!(service
            .register_corridor(corridor("US-CO", Currency::Usd, Currency::Cop))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_corridor_listing_honours_active_filter() {
        let service = service().await;
        service
            .register_corridor(corridor("US-CO", Currency::Usd, Currency::Cop))
            .await
            .unwrap();
        service
            .register_corridor(corridor("US-MX", Currency::Usd, Currency::Mxn))
            .await
            .unwrap();

        let patch = CorridorPatch {
            is_active: Some(false),
            ..Default::default()
        };
        let updated = service
            .update_corridor(&CorridorCode::parse("US-MX").unwrap(), patch)
            .await
            .unwrap();
        assert!(!updated.is_active);

        assert_eq!(service.corridors(None).await.unwrap().len(), 2);
        let active = service.corridors(Some(true)).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].code.as_str(), "US-CO");
        let inactive = service.corridors(Some(false)).await.unwrap();
        assert_eq!(inactive.len(), 1);
        assert_eq!(inactive[0].code.as_str(), "US-MX");
    }

    #[tokio::test]
    async fn test_remove_corridor_refused_while_covered() {
        let service = service().await;
        let code = CorridorCode::parse("US-CO").unwrap();
        service
            .register_corridor(corridor("US-CO", Currency::Usd, Currency::Cop))
            .await
            .unwrap();

        // request() sends USD -> COP, which this corridor covers.
        let created = service.create(request(dec!(100))).await.unwrap();
        assert!(matches!(
            service.remove_corridor(&code).await,
            Err(RemitError::Validation(_))
        ));

        service.delete(&created.id).await.unwrap();
        assert!(service.remove_corridor(&code).await.is_ok());
        assert!(matches!(
            service.corridor(&code).await,
            Err(RemitError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_corridor_remittances_and_stats_track_coverage() {
        let service = service().await;
        service
            .register_corridor(corridor("US-CO", Currency::Usd, Currency::Cop))
            .await
            .unwrap();
        service
            .register_corridor(corridor("US-MX", Currency::Usd, Currency::Mxn))
            .await
            .unwrap();

        service.create(request(dec!(100))).await.unwrap();
        service.create(request(dec!(200))).await.unwrap();

        let covered = service
            .corridor_remittances(&CorridorCode::parse("US-CO").unwrap(), Page::default())
            .await
            .unwrap();
        assert_eq!(covered.total, 2);

        let stats = service.corridor_stats().await.unwrap();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].total_remittances, 2);
        assert_eq!(stats[0].total_amount, dec!(300));
        assert_eq!(stats[0].average_amount, dec!(150.00));
        assert_eq!(stats[1].total_remittances, 0);
        assert_eq!(stats[1].average_amount, dec!(0));
    }
}
