use std::fmt;

use crate::errors::{Error, Result};

/// Field of a platform a mutation writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationField {
    Enabled,
    Secret,
}

/// Identity of an optimistic write: one platform, one field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MutationKey {
    pub platform_id: String,
    pub field: MutationField,
}

impl MutationKey {
    pub fn enabled(platform_id: &str) -> Self {
        Self {
            platform_id: platform_id.to_string(),
            field: MutationField::Enabled,
        }
    }

    pub fn secret(platform_id: &str) -> Self {
        Self {
            platform_id: platform_id.to_string(),
            field: MutationField::Secret,
        }
    }
}

impl fmt::Display for MutationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:?}", self.platform_id, self.field)
    }
}

/// Lifecycle of a single optimistic mutation.
///
/// `Idle -> Pending { snapshot } -> Committed | RolledBack`. The snapshot is
/// the rollback point captured before the optimistic write.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MutationState<S> {
    #[default]
    Idle,
    Pending {
        snapshot: S,
    },
    Committed,
    RolledBack,
}

impl<S> MutationState<S> {
    pub fn begin(self, snapshot: S) -> Result<Self> {
        match self {
            MutationState::Idle => Ok(MutationState::Pending { snapshot }),
            other => Err(invalid_transition(other.name(), "Pending")),
        }
    }

    pub fn commit(self) -> Result<Self> {
        match self {
            MutationState::Pending { .. } => Ok(MutationState::Committed),
            other => Err(invalid_transition(other.name(), "Committed")),
        }
    }

    /// Moves to `RolledBack`, handing back the snapshot to restore.
    pub fn rollback(self) -> Result<(Self, S)> {
        match self {
            MutationState::Pending { snapshot } => Ok((MutationState::RolledBack, snapshot)),
            other => Err(invalid_transition(other.name(), "RolledBack")),
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, MutationState::Committed | MutationState::RolledBack)
    }

    fn name(&self) -> &'static str {
        match self {
            MutationState::Idle => "Idle",
            MutationState::Pending { .. } => "Pending",
            MutationState::Committed => "Committed",
            MutationState::RolledBack => "RolledBack",
        }
    }
}

fn invalid_transition(from: &str, to: &str) -> Error {
    Error::Unexpected(format!("Invalid mutation transition {} -> {}", from, to))
}

/// How a mutation settled.
///
/// Failures are already reported to the user when the outcome is returned;
/// callers only inspect it.
#[derive(Debug)]
pub enum MutationOutcome<T> {
    /// The host accepted the change.
    Committed(T),
    /// The host rejected the change. `restored` is false when there was
    /// nothing to restore or a newer mutation on the same key took over.
    RolledBack { error: Error, restored: bool },
    /// A call with no optimistic write failed.
    Failed(Error),
}

impl<T> MutationOutcome<T> {
    pub fn is_committed(&self) -> bool {
        matches!(self, MutationOutcome::Committed(_))
    }

    pub fn error(&self) -> Option<&Error> {
        match self {
            MutationOutcome::Committed(_) => None,
            MutationOutcome::RolledBack { error, .. } | MutationOutcome::Failed(error) => {
                Some(error)
            }
        }
    }

    pub fn into_result(self) -> Result<T> {
        match self {
            MutationOutcome::Committed(v) => Ok(v),
            MutationOutcome::RolledBack { error, .. } | MutationOutcome::Failed(error) => {
                Err(error)
            }
        }
    }
}
