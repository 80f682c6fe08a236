use super::corridor::{Corridor, CorridorCode};
use super::ids::{RecipientId, ReferenceCode, SenderId, TransactionId};
use super::person::{Recipient, Sender};
use super::remittance::Remittance;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashSet;

#[async_trait]
pub trait RemittanceStore: Send + Sync {
    /// Appends a record. Fails with `DuplicateReference` if the code is
    /// already present; this check under the store's own write lock is
    /// what serialises concurrent creations.
    async fn insert(&self, remittance: Remittance) -> Result<()>;
    async fn get(&self, id: &TransactionId) -> Result<Option<Remittance>>;
    /// Replaces the record carrying the same id. `NotFound` if absent.
    async fn update(&self, remittance: Remittance) -> Result<()>;
    async fn remove(&self, id: &TransactionId) -> Result<Option<Remittance>>;
    /// Snapshot of the whole collection in insertion order.
    async fn all(&self) -> Result<Vec<Remittance>>;
    /// The reference codes currently in use.
    async fn reference_codes(&self) -> Result<HashSet<ReferenceCode>>;
}

#[async_trait]
pub trait SenderStore: Send + Sync {
    /// Registers a sender. Fails with `AlreadyRegistered` on id reuse.
    async fn insert(&self, sender: Sender) -> Result<()>;
    async fn get(&self, id: &SenderId) -> Result<Option<Sender>>;
}

#[async_trait]
pub trait RecipientStore: Send + Sync {
    /// Registers a recipient. Fails with `AlreadyRegistered` on id reuse.
    async fn insert(&self, recipient: Recipient) -> Result<()>;
    async fn get(&self, id: &RecipientId) -> Result<Option<Recipient>>;
}

#[async_trait]
pub trait CorridorStore: Send + Sync {
    /// Registers a corridor. Fails with `AlreadyRegistered` on code reuse.
    async fn insert(&self, corridor: Corridor) -> Result<()>;
    async fn get(&self, code: &CorridorCode) -> Result<Option<Corridor>>;
    /// Replaces the corridor carrying the same code. `NotFound` if absent.
    async fn update(&self, corridor: Corridor) -> Result<()>;
    async fn remove(&self, code: &CorridorCode) -> Result<Option<Corridor>>;
    /// Snapshot of the catalogue in registration order.
    async fn all(&self) -> Result<Vec<Corridor>>;
}

pub type RemittanceStoreBox = Box<dyn RemittanceStore>;
pub type SenderStoreBox = Box<dyn SenderStore>;
pub type RecipientStoreBox = Box<dyn RecipientStore>;
pub type CorridorStoreBox = Box<dyn CorridorStore>;
