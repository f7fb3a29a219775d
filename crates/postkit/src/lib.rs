//! # postkit
//!
//! Pure Rust client for REST post resources.
//!
//! This crate provides functionality for:
//! - Reading posts and todos from a JSONPlaceholder-style service
//! - Patch-style updates: fetch, merge overrides, full-replace write
//! - Verified deletes: fetch, confirm existence, delete
//! - Field-level diffs between two versions of a post
//!
//! ## Example
//!
//! ```
//! use postkit::{Client, MockBackend, MutationOutcome, Post, PostPatch};
//!
//! let mock = MockBackend::new();
//! mock.insert(Post::new(1, 1, "A", "B"));
//! let client = Client::with_backend(Box::new(mock));
//!
//! match client.update(1, PostPatch::new().title("Z")) {
//!     MutationOutcome::Success(updated) => {
//!         assert_eq!(updated.record, Post::new(1, 1, "Z", "B"));
//!         assert_eq!(updated.changes().len(), 1);
//!     }
//!     MutationOutcome::Failure(failure) => panic!("{failure}"),
//! }
//! ```
//!
//! ## Failure Reporting
//!
//! [`Client::update`] and [`Client::delete`] never return `Err`. They return
//! a [`MutationOutcome`] whose failure side records the [`Phase`] that
//! failed and, when the fetch succeeded, the baseline that was read. A caller
//! can tell "post never existed" from "post existed but the write failed".
//!
//! ## Concurrency
//!
//! The fetch and the write are two independent round trips with no version
//! check in between. Concurrent writers race and the last write wins.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod diff;
pub mod error;
pub mod merge;
pub mod outcome;
pub mod retry;
pub mod types;

pub use backend::MockBackend;
pub use diff::{DiffSummary, diff};
pub use error::{Error, ErrorCategory, Result};
pub use merge::merge;
pub use outcome::{Deleted, FailureCause, MutationFailure, MutationOutcome, Phase, Updated};
pub use retry::RetryConfig;
pub use types::{Field, FieldChange, NewPost, Post, PostField, PostPatch, Todo};

use backend::Backend;
use backend::http::HttpBackend;

/// High-level client for post operations.
///
/// The client owns its transport and holds no other state; every call
/// round-trips to the backend.
pub struct Client {
    backend: Box<dyn Backend>,
}

impl Client {
    /// Create a new Client for the public JSONPlaceholder service.
    #[must_use]
    pub fn new() -> Self {
        Self {
            backend: Box::new(HttpBackend::new()),
        }
    }

    /// Create a client with a custom backend (useful for testing).
    #[must_use]
    pub fn with_backend(backend: Box<dyn Backend>) -> Self {
        Self { backend }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Update a post with the fields set in `overrides`.
    ///
    /// Fetches the current post, merges the overrides onto it, and writes the
    /// result back with a full replace. Fields left as [`Field::Keep`] take
    /// the fetched value. The written id is always `id`.
    ///
    /// A failed fetch stops the operation before any write. A failed write
    /// still reports the fetched baseline.
    pub fn update(&self, id: u64, overrides: PostPatch) -> MutationOutcome<Updated> {
        log::debug!("update post {}: fetching baseline", id);
        let baseline = match self.backend.get_post(id) {
            Ok(post) => post,
            Err(e) => {
                log::warn!("update post {}: fetch failed: {}", id, e);
                return MutationOutcome::Failure(MutationFailure::at_fetch(id, e));
            }
        };

        let candidate = merge(&baseline, &overrides, id);
        log::debug!("update post {}: writing merged record", id);

        match self.backend.put_post(id, &candidate) {
            Ok(record) => MutationOutcome::Success(Updated { baseline, record }),
            Err(e) => {
                log::warn!("update post {}: write failed: {}", id, e);
                MutationOutcome::Failure(MutationFailure::at_write(id, baseline, e))
            }
        }
    }

    /// Delete a post after confirming it exists.
    ///
    /// On success the outcome carries the post as it was read just before
    /// the delete. A missing post is reported as not found and no delete is
    /// issued.
    ///
    /// If another writer removes the post between the check and the delete,
    /// the service may still acknowledge the delete; that is reported as a
    /// success.
    pub fn delete(&self, id: u64) -> MutationOutcome<Deleted> {
        log::debug!("delete post {}: verifying existence", id);
        let snapshot = match self.backend.get_post(id) {
            Ok(post) => post,
            Err(e) => {
                log::warn!("delete post {}: fetch failed: {}", id, e);
                return MutationOutcome::Failure(MutationFailure::at_fetch(id, e));
            }
        };

        log::debug!("delete post {}: issuing delete", id);
        match self.backend.delete_post(id) {
            Ok(()) => MutationOutcome::Success(Deleted { snapshot }),
            Err(e) => {
                log::warn!("delete post {}: delete failed: {}", id, e);
                MutationOutcome::Failure(MutationFailure::at_write(id, snapshot, e))
            }
        }
    }

    // =========================================================================
    // Passthrough
    // =========================================================================

    /// Fetch one post.
    pub fn post(&self, id: u64) -> Result<Post> {
        self.backend.get_post(id)
    }

    /// Fetch every post.
    pub fn posts(&self) -> Result<Vec<Post>> {
        self.backend.list_posts()
    }

    /// Create a post.
    pub fn create(&self, post: &NewPost) -> Result<Post> {
        self.backend.create_post(post)
    }

    /// Fetch one todo item.
    pub fn todo(&self, id: u64) -> Result<Todo> {
        self.backend.get_todo(id)
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}
