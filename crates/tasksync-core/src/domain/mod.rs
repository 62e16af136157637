//! Domain entities
//!
//! This module contains the core domain types for TaskSync:
//! - Newtypes for type-safe identifiers
//! - List items, partial updates and the optimistic placeholder
//! - View filters
//! - User-facing error kinds and their fixed messages
//! - Domain-specific error types

pub mod errors;
pub mod filter;
pub mod item;
pub mod messages;
pub mod newtypes;

// Re-export commonly used types
pub use errors::DomainError;
pub use filter::Filter;
pub use item::{Item, ItemPatch, ListEntry, PendingItem};
pub use messages::ErrorKind;
pub use newtypes::{ItemId, OwnerId};
