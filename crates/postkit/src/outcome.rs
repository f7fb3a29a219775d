//! Structured results of update and delete operations.

use crate::diff::diff;
use crate::error::Error;
use crate::types::{FieldChange, Post};
use std::fmt;

/// The step of a mutation at which it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Reading the current record (existence check).
    Fetch,
    /// Writing or deleting the record.
    Write,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch => write!(f, "fetch"),
            Self::Write => write!(f, "write"),
        }
    }
}

/// Why a mutation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCause {
    /// The target id was absent at the existence check.
    NotFound,
    /// Network fault, decode failure or non-success status.
    Transport,
}

/// A mutation that did not complete.
#[derive(Debug)]
pub struct MutationFailure {
    /// Id the mutation was addressed to.
    pub target: u64,
    /// Where the operation stopped.
    pub phase: Phase,
    /// Record read before the failure, if the fetch succeeded.
    pub baseline: Option<Post>,
    /// Underlying error.
    pub error: Error,
}

impl MutationFailure {
    pub(crate) fn at_fetch(target: u64, error: Error) -> Self {
        Self {
            target,
            phase: Phase::Fetch,
            baseline: None,
            error,
        }
    }

    pub(crate) fn at_write(target: u64, baseline: Post, error: Error) -> Self {
        Self {
            target,
            phase: Phase::Write,
            baseline: Some(baseline),
            error,
        }
    }

    /// Classify the failure.
    ///
    /// Only the existence check can report a missing record; anything that
    /// goes wrong once the record was read is a transport failure.
    #[must_use]
    pub fn cause(&self) -> FailureCause {
        match self.phase {
            Phase::Fetch if self.error.is_not_found() => FailureCause::NotFound,
            _ => FailureCause::Transport,
        }
    }
}

impl fmt::Display for MutationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.phase, &self.baseline) {
            (Phase::Write, Some(_)) => write!(
                f,
                "fetched post {} but the write failed: {}",
                self.target, self.error
            ),
            _ => write!(f, "{} failed: {}", self.phase, self.error),
        }
    }
}

impl std::error::Error for MutationFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Tagged result of an update or delete.
#[derive(Debug)]
pub enum MutationOutcome<T> {
    /// The mutation was acknowledged by the service.
    Success(T),
    /// The mutation stopped early. See [`MutationFailure::phase`].
    Failure(MutationFailure),
}

impl<T> MutationOutcome<T> {
    /// Check if the outcome is a success.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The failure, if any.
    pub fn failure(&self) -> Option<&MutationFailure> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(failure),
        }
    }

    /// Convert into a standard `Result`.
    pub fn into_result(self) -> Result<T, MutationFailure> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(failure) => Err(failure),
        }
    }
}

/// Payload of a successful update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Updated {
    /// Record as fetched before the write.
    pub baseline: Post,
    /// Record returned by the write.
    pub record: Post,
}

impl Updated {
    /// Fields that differ between the baseline and the written record.
    #[must_use]
    pub fn changes(&self) -> Vec<FieldChange> {
        diff(&self.baseline, &self.record)
    }
}

/// Payload of a successful delete.
///
/// The service returns no body on deletion, so this carries the record as it
/// was read just before.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deleted {
    /// Record as fetched before the delete.
    pub snapshot: Post,
}
