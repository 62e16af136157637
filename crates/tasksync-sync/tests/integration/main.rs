//! Integration tests for tasksync-sync
//!
//! Drives the SyncEngine against a scripted in-memory store that can fail
//! selected ids, override echoes, and hold calls open until released.

mod common;
