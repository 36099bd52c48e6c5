//! HealthiNet - Conversational medical triage
//!
//! A pipeline of cooperating agents turns a free-text symptom description
//! into possible conditions, a specialist recommendation, an urgency level
//! and nearby facilities, while keeping a per-conversation context.

pub mod adapters;
pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
