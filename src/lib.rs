//! # Orientbot - orientation actions for a university chatbot
//!
//! Given an action name picked by an external dialogue framework, plus the
//! entities and remembered slots of the current turn, Orientbot queries a
//! SQLite catalog of programs ("filières") and institutions and renders a
//! French text reply.
//!
//! Orientbot provides:
//! - Typed catalog records (institutions, programs, enrollment steps, ...)
//! - SQLite-backed storage with idempotent seeding
//! - A responder mapping each action to a handler
//! - An HTTP action webhook for the dialogue framework

pub mod model;
pub mod storage;
pub mod responder;
pub mod server;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use model::{Institution, InstitutionKind, Program, ProgramCategory, ProgramDetail};
pub use storage::SqliteStore;
pub use responder::{Action, ActionResponse, Responder, SlotSet, Tracker};
pub use config::UniversityInfo;

/// Result type alias for Orientbot operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Orientbot operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown program category: {0}")]
    UnknownCategory(String),

    #[error("Unknown institution kind: {0}")]
    UnknownInstitutionKind(String),

    #[error("No registered action found for name '{0}'")]
    UnknownAction(String),

    #[error("Storage lock poisoned")]
    LockPoisoned,
}
