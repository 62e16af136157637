//! Port definitions (hexagonal architecture interfaces)
//!
//! Ports are interfaces that the synchronization engine depends on, but
//! whose implementations live in adapter crates.
//!
//! ## Ports Overview
//!
//! - [`IRemoteStore`] - The remote list store (REST service in production,
//!   in-memory fakes in tests)

pub mod remote_store;

pub use remote_store::IRemoteStore;
