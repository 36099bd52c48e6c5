//! Conversation session adapters.
//!
//! - `InMemoryConversationRegistry` - One `AgentManager` per conversation, process-local, idle sessions evicted after a TTL

mod in_memory;

pub use in_memory::{InMemoryConversationRegistry, RegistryError, SharedManager, DEFAULT_IDLE_TTL};
