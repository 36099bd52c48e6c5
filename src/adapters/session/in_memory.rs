//! In-Memory Conversation Registry
//!
//! Keeps every live conversation in process memory. Each manager sits behind
//! its own async mutex so turns on one conversation run strictly one after
//! another while different conversations proceed independently.
//!
//! A conversation nobody has touched for the idle TTL counts as abandoned
//! and is dropped the next time a conversation is created or a sweep runs.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};

use crate::application::{AgentManager, Collaborators, PipelineSettings};
use crate::domain::foundation::ConversationId;

/// Idle time before an abandoned conversation is discarded.
pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(30 * 60);

/// A manager shared between request handlers.
pub type SharedManager = Arc<Mutex<AgentManager>>;

/// Errors from registry lookups.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum RegistryError {
    #[error("Conversation not found: {0}")]
    NotFound(ConversationId),
}

struct Entry {
    manager: SharedManager,
    last_active: Instant,
}

type Conversations = HashMap<ConversationId, Entry>;

/// Process-local conversation store
#[derive(Clone)]
pub struct InMemoryConversationRegistry {
    collaborators: Collaborators,
    settings: PipelineSettings,
    idle_ttl: Duration,
    conversations: Arc<RwLock<Conversations>>,
}

impl InMemoryConversationRegistry {
    pub fn new(collaborators: Collaborators, settings: PipelineSettings) -> Self {
        Self {
            collaborators,
            settings,
            idle_ttl: DEFAULT_IDLE_TTL,
            conversations: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn with_idle_ttl(mut self, idle_ttl: Duration) -> Self {
        self.idle_ttl = idle_ttl;
        self
    }

    pub fn idle_ttl(&self) -> Duration {
        self.idle_ttl
    }

    /// Starts a conversation with an empty context, dropping idle ones first.
    pub async fn create(&self) -> (ConversationId, SharedManager) {
        let id = ConversationId::new();
        let manager = Arc::new(Mutex::new(AgentManager::new(
            id,
            &self.collaborators,
            self.settings,
        )));

        let mut conversations = self.conversations.write().await;
        let now = Instant::now();
        sweep(&mut conversations, now, self.idle_ttl);
        conversations.insert(
            id,
            Entry {
                manager: manager.clone(),
                last_active: now,
            },
        );
        tracing::info!(conversation_id = %id, live = conversations.len(), "Conversation started");

        (id, manager)
    }

    /// Returns the conversation and marks it active.
    pub async fn get(&self, id: ConversationId) -> Result<SharedManager, RegistryError> {
        let mut conversations = self.conversations.write().await;
        let entry = conversations
            .get_mut(&id)
            .ok_or(RegistryError::NotFound(id))?;
        entry.last_active = Instant::now();
        Ok(entry.manager.clone())
    }

    /// Returns the conversation, creating one when `id` is absent.
    pub async fn get_or_create(
        &self,
        id: Option<ConversationId>,
    ) -> Result<(ConversationId, SharedManager), RegistryError> {
        match id {
            Some(id) => Ok((id, self.get(id).await?)),
            None => Ok(self.create().await),
        }
    }

    /// Ends a conversation and discards its context.
    pub async fn remove(&self, id: ConversationId) -> Result<(), RegistryError> {
        self.conversations
            .write()
            .await
            .remove(&id)
            .map(|_| tracing::info!(conversation_id = %id, "Conversation ended"))
            .ok_or(RegistryError::NotFound(id))
    }

    /// Discards every conversation idle for at least the TTL.
    ///
    /// Returns how many were dropped.
    pub async fn evict_idle(&self) -> usize {
        self.evict_idle_at(Instant::now()).await
    }

    async fn evict_idle_at(&self, now: Instant) -> usize {
        let mut conversations = self.conversations.write().await;
        sweep(&mut conversations, now, self.idle_ttl)
    }

    pub async fn len(&self) -> usize {
        self.conversations.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.conversations.read().await.is_empty()
    }
}

/// Drops entries idle for at least `ttl` as of `now`.
fn sweep(conversations: &mut Conversations, now: Instant, ttl: Duration) -> usize {
    let before = conversations.len();
    conversations.retain(|id, entry| {
        let active = now.saturating_duration_since(entry.last_active) < ttl;
        if !active {
            tracing::info!(conversation_id = %id, "Conversation expired");
        }
        active
    });
    let evicted = before - conversations.len();
    if evicted > 0 {
        tracing::debug!(evicted, live = conversations.len(), "Idle conversations swept");
    }
    evicted
}

impl Default for InMemoryConversationRegistry {
    fn default() -> Self {
        Self::new(Collaborators::demo(), PipelineSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_then_get_returns_same_manager() {
        let registry = InMemoryConversationRegistry::default();

        let (id, created) = registry.create().await;
        let fetched = registry.get(id).await.unwrap();

        assert!(Arc::ptr_eq(&created, &fetched));
        assert_eq!(fetched.lock().await.id(), id);
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let registry = InMemoryConversationRegistry::default();
        let id = ConversationId::new();

        let err = registry.get(id).await.err().unwrap();

        assert_eq!(err, RegistryError::NotFound(id));
    }

    #[tokio::test]
    async fn get_or_create_without_id_creates() {
        let registry = InMemoryConversationRegistry::default();

        let (id, _) = registry.get_or_create(None).await.unwrap();

        assert!(registry.get(id).await.is_ok());
    }

    #[tokio::test]
    async fn get_or_create_with_unknown_id_fails() {
        let registry = InMemoryConversationRegistry::default();

        assert!(registry
            .get_or_create(Some(ConversationId::new()))
            .await
            .is_err());
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn remove_discards_conversation() {
        let registry = InMemoryConversationRegistry::default();
        let (id, _) = registry.create().await;

        registry.remove(id).await.unwrap();

        assert!(registry.get(id).await.is_err());
        assert_eq!(registry.remove(id).await, Err(RegistryError::NotFound(id)));
    }

    #[tokio::test]
    async fn idle_conversations_are_evicted_after_the_ttl() {
        let registry = InMemoryConversationRegistry::default();
        let (first, _) = registry.create().await;
        let (second, _) = registry.create().await;

        assert_eq!(registry.evict_idle().await, 0);

        let later = Instant::now() + DEFAULT_IDLE_TTL;
        assert_eq!(registry.evict_idle_at(later).await, 2);
        assert!(registry.get(first).await.is_err());
        assert!(registry.get(second).await.is_err());
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn touched_conversation_survives_the_sweep() {
        let registry =
            InMemoryConversationRegistry::default().with_idle_ttl(Duration::from_millis(200));
        let (idle, _) = registry.create().await;
        let (active, _) = registry.create().await;

        tokio::time::sleep(Duration::from_millis(250)).await;
        registry.get(active).await.unwrap();
        let evicted = registry.evict_idle().await;

        assert_eq!(evicted, 1);
        assert_eq!(registry.get(idle).await.err(), Some(RegistryError::NotFound(idle)));
        assert!(registry.get(active).await.is_ok());
    }

    #[tokio::test]
    async fn create_sweeps_abandoned_conversations() {
        let registry = InMemoryConversationRegistry::default().with_idle_ttl(Duration::ZERO);

        for _ in 0..20 {
            registry.create().await;
        }

        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn evicted_manager_still_finishes_its_turn() {
        let registry = InMemoryConversationRegistry::default().with_idle_ttl(Duration::ZERO);
        let (_, held) = registry.create().await;

        registry.evict_idle().await;
        let outcome = held.lock().await.process_user_message("toux").await;

        assert!(registry.is_empty().await);
        assert!(!outcome.response.is_empty());
    }

    #[tokio::test]
    async fn conversations_are_isolated() {
        let registry = InMemoryConversationRegistry::default();
        let (_, first) = registry.create().await;
        let (_, second) = registry.create().await;

        first.lock().await.process_user_message("maux de tête").await;

        assert_eq!(first.lock().await.context().messages.len(), 2);
        assert!(second.lock().await.context().messages.is_empty());
    }
}
