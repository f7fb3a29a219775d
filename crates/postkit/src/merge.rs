//! Merging a partial update onto a fetched baseline.

use crate::types::{Post, PostPatch};

/// Apply `overrides` on top of `baseline`, addressed at `target_id`.
///
/// Fields marked [`Field::Keep`](crate::Field::Keep) take the baseline value.
/// The result's id is always `target_id`, even if the baseline carries a
/// different one.
#[must_use]
pub fn merge(baseline: &Post, overrides: &PostPatch, target_id: u64) -> Post {
    Post {
        id: target_id,
        user_id: *overrides.user_id.resolve_ref(&baseline.user_id),
        title: overrides.title.resolve_ref(&baseline.title).clone(),
        body: overrides.body.resolve_ref(&baseline.body).clone(),
    }
}
