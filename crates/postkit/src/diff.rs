//! Field-level comparison of two versions of a post.

use crate::types::{FieldChange, Post, PostField};

/// List the fields that differ between `before` and `after`.
///
/// Fields are compared in the order title, body, userId, exactly (no
/// whitespace or case folding). The id is never compared. An empty result
/// means nothing changed.
#[must_use]
pub fn diff(before: &Post, after: &Post) -> Vec<FieldChange> {
    PostField::ALL
        .into_iter()
        .filter_map(|field| {
            let old = field.value_of(before);
            let new = field.value_of(after);
            (old != new).then_some(FieldChange { field, old, new })
        })
        .collect()
}

/// Summary counts for a list of changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffSummary {
    /// Number of fields that changed.
    pub changed: usize,
    /// Number of fields that stayed the same.
    pub unchanged: usize,
}

impl DiffSummary {
    /// Create a summary from a list of changes.
    #[must_use]
    pub fn from_changes(changes: &[FieldChange]) -> Self {
        Self {
            changed: changes.len(),
            unchanged: PostField::ALL.len().saturating_sub(changes.len()),
        }
    }

    /// Check if there are any changes.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.changed > 0
    }
}
