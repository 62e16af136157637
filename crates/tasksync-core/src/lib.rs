//! TaskSync Core - Domain types, ports and configuration
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain types** - `Item`, `ItemPatch`, `PendingItem`, `ListEntry`, `Filter`
//! - **Port definitions** - `IRemoteStore`, the interface to the remote list store
//! - **Configuration** - YAML-backed settings with validation and a builder
//!
//! # Architecture
//!
//! The domain module is pure data with no I/O. Ports define the trait
//! interfaces that adapter crates implement (`tasksync-http`), and the
//! synchronization engine (`tasksync-sync`) drives the domain through them.

pub mod config;
pub mod domain;
pub mod ports;
