//! User-facing failure kinds
//!
//! Every failure surfaced to the user maps to one fixed message keyed by
//! the kind of operation that failed. Transport details never reach the
//! message; they are logged instead.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Kind of failure shown in the notification area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Initial list fetch failed
    Load,
    /// Create was submitted with a blank title
    EmptyTitle,
    /// Remote create failed
    Add,
    /// Remote delete failed (single, rename-to-empty or bulk)
    Delete,
    /// Remote update failed (toggle, rename or toggle-all)
    Update,
}

impl ErrorKind {
    /// The fixed message shown to the user
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorKind::Load => "Unable to load todos",
            ErrorKind::EmptyTitle => "Title should not be empty",
            ErrorKind::Add => "Unable to add a todo",
            ErrorKind::Delete => "Unable to delete a todo",
            ErrorKind::Update => "Unable to update a todo",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
