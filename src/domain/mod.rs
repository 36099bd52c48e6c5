//! Domain layer containing the triage model.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (identifiers)
//! - `triage` - Conversation context, agent messages, routing and errors

pub mod foundation;
pub mod triage;
