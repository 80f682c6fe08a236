use crate::domain::corridor::{Corridor, CorridorCode};
use crate::domain::ids::{RecipientId, ReferenceCode, SenderId, TransactionId};
use crate::domain::person::{Recipient, Sender};
use crate::domain::ports::{CorridorStore, RecipientStore, RemittanceStore, SenderStore};
use crate::domain::remittance::Remittance;
use crate::error::{RemitError, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for remittance records.
///
/// Backed by `Arc<RwLock<Vec<Remittance>>>` so the collection keeps its
/// insertion order, which the read-side filters rely on. The write lock
/// doubles as the serialisation point for reference-code uniqueness.
#[derive(Default, Clone)]
pub struct InMemoryRemittanceStore {
    remittances: Arc<RwLock<Vec<Remittance>>>,
}

impl InMemoryRemittanceStore {
    /// Creates a new, empty in-memory remittance store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RemittanceStore for InMemoryRemittanceStore {
    async fn insert(&self, remittance: Remittance) -> Result<()> {
        let mut remittances = self.remittances.write().await;
        if remittances
            .iter()
            .any(|r| r.reference_code == remittance.reference_code)
        {
            return Err(RemitError::DuplicateReference(
                remittance.reference_code.to_string(),
            ));
        }
        remittances.push(remittance);
        Ok(())
    }

    async fn get(&self, id: &TransactionId) -> Result<Option<Remittance>> {
        let remittances = self.remittances.read().await;
        Ok(remittances.iter().find(|r| &r.id == id).cloned())
    }

    async fn update(&self, remittance: Remittance) -> Result<()> {
        let mut remittances = self.remittances.write().await;
        match remittances.iter_mut().find(|r| r.id == remittance.id) {
            Some(slot) => {
                *slot = remittance;
                Ok(())
            }
            None => Err(RemitError::NotFound(format!(
                "remittance {}",
                remittance.id
            ))),
        }
    }

    async fn remove(&self, id: &TransactionId) -> Result<Option<Remittance>> {
        let mut remittances = self.remittances.write().await;
        match remittances.iter().position(|r| &r.id == id) {
            Some(index) => Ok(Some(remittances.remove(index))),
            None => Ok(None),
        }
    }

    async fn all(&self) -> Result<Vec<Remittance>> {
        let remittances = self.remittances.read().await;
        Ok(remittances.clone())
    }

    async fn reference_codes(&self) -> Result<HashSet<ReferenceCode>> {
        let remittances = self.remittances.read().await;
        Ok(remittances
            .iter()
            .map(|r| r.reference_code.clone())
            .collect())
    }
}

/// A thread-safe in-memory sender registry.
#[derive(Default, Clone)]
pub struct InMemorySenderStore {
    senders: Arc<RwLock<HashMap<SenderId, Sender>>>,
}

impl InMemorySenderStore {
    /// Creates a new, empty in-memory sender store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SenderStore for InMemorySenderStore {
    async fn insert(&self, sender: Sender) -> Result<()> {
        let mut senders = self.senders.write().await;
        if senders.contains_key(&sender.id) {
            return Err(RemitError::AlreadyRegistered(format!(
                "sender {}",
                sender.id
            )));
        }
        senders.insert(sender.id.clone(), sender);
        Ok(())
    }

    async fn get(&self, id: &SenderId) -> Result<Option<Sender>> {
        let senders = self.senders.read().await;
        Ok(senders.get(id).cloned())
    }
}

/// A thread-safe in-memory recipient registry.
#[derive(Default, Clone)]
pub struct InMemoryRecipientStore {
    recipients: Arc<RwLock<HashMap<RecipientId, Recipient>>>,
}

impl InMemoryRecipientStore {
    /// Creates a new, empty in-memory recipient store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecipientStore for InMemoryRecipientStore {
    async fn insert(&self, recipient: Recipient) -> Result<()> {
        let mut recipients = self.recipients.write().await;
        if recipients.contains_key(&recipient.id) {
            return Err(RemitError::AlreadyRegistered(format!(
                "recipient {}",
                recipient.id
            )));
        }
        recipients.insert(recipient.id.clone(), recipient);
        Ok(())
    }

    async fn get(&self, id: &RecipientId) -> Result<Option<Recipient>> {
        let recipients = self.recipients.read().await;
        Ok(recipients.get(id).cloned())
    }
}

/// A thread-safe in-memory corridor catalogue, kept in registration order.
#[derive(Default, Clone)]
pub struct InMemoryCorridorStore {
    corridors: Arc<RwLock<Vec<Corridor>>>,
}

impl InMemoryCorridorStore {
    /// Creates a new, empty in-memory corridor store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CorridorStore for InMemoryCorridorStore {
    async fn insert(&self, corridor: Corridor) -> Result<()> {
        let mut corridors = self.corridors.write().await;
        if corridors.iter().any(|c| c.code == corridor.code) {
            return Err(RemitError::AlreadyRegistered(format!(
                "corridor {}",
                corridor.code
            )));
        }
        corridors.push(corridor);
        Ok(())
    }

    async fn get(&self, code: &CorridorCode) -> Result<Option<Corridor>> {
        let corridors = self.corridors.read().await;
        Ok(corridors.iter().find(|c| &c.code == code).cloned())
    }

    async fn update(&self, corridor: Corridor) -> Result<()> {
        let mut corridors = self.corridors.write().await;
        match corridors.iter_mut().find(|c| c.code == corridor.code) {
            Some(slot) => {
                *slot = corridor;
                Ok(())
            }
            None => Err(RemitError::NotFound(format!("corridor {}", corridor.code))),
        }
    }

    async fn remove(&self, code: &CorridorCode) -> Result<Option<Corridor>> {
        let mut corridors = self.corridors.write().await;
        match corridors.iter().position(|c| &c.code == code) {
            Some(index) => Ok(Some(corridors.remove(index))),
            None => Ok(None),
        }
    }

    async fn all(&self) -> Result<Vec<Corridor>> {
        let corridors = self.corridors.read().await;
        Ok(corridors.clone())
    }
}
