//! Domain newtypes with validation
//!
//! This module provides strongly-typed wrappers for domain identifiers.
//! Both identifiers are assigned by the remote store and are never zero;
//! a value that has not been confirmed by the store has no id at all
//! (see [`PendingItem`](super::item::PendingItem)).

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

// ============================================================================
// ItemId
// ============================================================================

/// Identifier of a list item, assigned by the remote store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct ItemId(u64);

impl ItemId {
    /// Create a new ItemId, rejecting the reserved value `0`
    ///
    /// # Errors
    /// Returns `DomainError::InvalidId` if `id` is zero
    pub fn new(id: u64) -> Result<Self, DomainError> {
        if id == 0 {
            return Err(DomainError::InvalidId(
                "item id 0 is reserved for unconfirmed items".to_string(),
            ));
        }
        Ok(Self(id))
    }

    /// Get the inner u64 value
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .trim()
            .parse::<u64>()
            .map_err(|e| DomainError::InvalidId(format!("Invalid ItemId: {e}")))?;
        Self::new(raw)
    }
}

impl TryFrom<u64> for ItemId {
    type Error = DomainError;

    fn try_from(id: u64) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<ItemId> for u64 {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

// ============================================================================
// OwnerId
// ============================================================================

/// Identifier of the user owning the whole collection
///
/// Constant for a session; every list and create call is scoped to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct OwnerId(u64);

impl OwnerId {
    /// Create a new OwnerId, rejecting `0` (no user configured)
    ///
    /// # Errors
    /// Returns `DomainError::InvalidId` if `id` is zero
    pub fn new(id: u64) -> Result<Self, DomainError> {
        if id == 0 {
            return Err(DomainError::InvalidId(
                "owner id must be greater than 0".to_string(),
            ));
        }
        Ok(Self(id))
    }

    /// Get the inner u64 value
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Display for OwnerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OwnerId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .trim()
            .parse::<u64>()
            .map_err(|e| DomainError::InvalidId(format!("Invalid OwnerId: {e}")))?;
        Self::new(raw)
    }
}

impl TryFrom<u64> for OwnerId {
    type Error = DomainError;

    fn try_from(id: u64) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<OwnerId> for u64 {
    fn from(id: OwnerId) -> Self {
        id.0
    }
}
