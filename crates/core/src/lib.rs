//! Core types and shared functionality for stanza.
//!
//! This crate provides:
//! - The poem source catalog
//! - Answer state tracking with JSON persistence
//! - Unified error types
//! - Configuration structures

pub mod answers;
pub mod catalog;
pub mod config;
pub mod error;

pub use answers::{AnswerState, AnswerStore, JsonFileStore, Status};
pub use catalog::{PoemEntry, SourceCatalog};
pub use config::{AppConfig, ConfigError};
pub use error::{Error, ExtractStage};
