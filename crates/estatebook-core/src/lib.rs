//! Estatebook Core - client and listing relationship engine
//!
//! This crate keeps buyers, sellers and property listings consistent under
//! user-issued commands:
//! - Entity store with uniqueness and reference checks on insert
//! - Name resolution with "did you mean" suggestions for near misses
//! - Referential integrity on client deletion, with a confirmation gate and
//!   role-specific cascades
//! - Atomic command execution scoped to the visible client list
//! - Snapshots, digests and an invariant checker for persistence and tests

pub mod commands;
pub mod config;
pub mod confirmation;
pub mod errors;
pub mod executor;
pub mod integrity;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod resolver;
pub mod rules;
pub mod snapshot;

#[doc(hidden)]
pub use estatebook_core_types as core_types;

// Re-export commonly used types
pub use commands::Command;
pub use config::EngineConfig;
pub use confirmation::{AutoConfirm, AutoDecline, ConfirmationGate, ConfirmationPrompt, FnGate};
pub use errors::{EstateError, ExError, ExErrorKind, Result};
pub use executor::{execute, CommandContext, CommandResult};
pub use integrity::{DeletionOutcome, DeletionRequest, DeletionState};
pub use model::{Client, Listing, Name, Role};
pub use ops::{Store, StoreEvent, StoreObserver, VisibleClients};
pub use resolver::Resolution;
pub use snapshot::StoreSnapshot;
