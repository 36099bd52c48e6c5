//! HTTP adapters - REST API implementations.

pub mod triage;

pub use triage::{triage_routes, TriageHandlers};
