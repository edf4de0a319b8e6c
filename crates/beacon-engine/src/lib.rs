//! Alias resolution and request routing for Beacon.
//!
//! This crate provides:
//! - The omnibox matching algorithm (exact match, prefix completions,
//!   best-alias disambiguation)
//! - The controller: the single mutation path over the alias collection,
//!   enforcing validation and uniqueness
//! - The client request/response protocol
//! - The worker harness that sequences controller calls with commits
//! - Debounced batching of partial updates

mod controller;
mod debounce;
mod error;
mod omnibox;
mod protocol;
mod resolver;
mod tabs;
mod worker;

pub use controller::Controller;
pub use debounce::UpdateDebouncer;
pub use error::EngineError;
pub use omnibox::{Disposition, OmniboxEvent, OmniboxOutcome, Suggestion};
pub use protocol::{ClientRequest, ControllerResponse};
pub use resolver::{best_alias, completions, exact_match};
pub use tabs::Tabs;
pub use worker::Worker;
