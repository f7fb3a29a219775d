//! Transport traits and implementations for the posts service.
//!
//! This module provides the [`Backend`] trait and implementations for
//! reaching a posts service. The primary implementation is
//! [`http::HttpBackend`], which talks to a JSONPlaceholder-style REST API.
//!
//! # Testing
//!
//! Use [`MockBackend`] for testing without network access. Unlike the public
//! mock API it actually persists writes, so update and delete logic can be
//! observed end to end:
//!
//! ```
//! use postkit::backend::{Backend, MockBackend};
//! use postkit::Post;
//!
//! let mock = MockBackend::new();
//! mock.insert(Post::new(1, 1, "A", "B"));
//!
//! let post = mock.get_post(1).unwrap();
//! assert_eq!(post.title, "A");
//! assert_eq!(mock.calls().get, 1);
//! ```

pub mod http;

use crate::error::{Error, Result};
use crate::types::{NewPost, Post, Todo};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Transport for the posts collection.
///
/// Every method is a single blocking round trip. Implementations report a
/// missing record on [`Backend::get_post`] as [`Error::NotFound`]; any other
/// failure, including a 404 on write paths, is a transport error.
pub trait Backend: Send + Sync {
    /// Fetch one post.
    fn get_post(&self, id: u64) -> Result<Post>;

    /// Fetch every post.
    fn list_posts(&self) -> Result<Vec<Post>>;

    /// Create a post. The service assigns the id.
    fn create_post(&self, post: &NewPost) -> Result<Post>;

    /// Replace the post at `id` with `post` (full-replace write).
    fn put_post(&self, id: u64, post: &Post) -> Result<Post>;

    /// Delete the post at `id`. Success carries no payload.
    fn delete_post(&self, id: u64) -> Result<()>;

    /// Fetch one todo item.
    fn get_todo(&self, id: u64) -> Result<Todo>;
}

/// Number of calls a [`MockBackend`] has served, per method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    /// `get_post` calls.
    pub get: usize,
    /// `list_posts` calls.
    pub list: usize,
    /// `create_post` calls.
    pub create: usize,
    /// `put_post` calls.
    pub put: usize,
    /// `delete_post` calls.
    pub delete: usize,
    /// `get_todo` calls.
    pub todo: usize,
}

impl CallCounts {
    /// Calls that wrote to the store.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.create + self.put + self.delete
    }
}

#[derive(Debug, Default)]
struct MockState {
    posts: BTreeMap<u64, Post>,
    todos: BTreeMap<u64, Todo>,
    calls: CallCounts,
    last_put: Option<(u64, Post)>,
    fail_get: Option<u16>,
    fail_put: Option<u16>,
    fail_delete: Option<u16>,
}

/// In-memory backend for testing without network access.
///
/// Writes persist, calls are counted, and individual methods can be made to
/// fail with an HTTP status. Clones share the same store.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

impl MockBackend {
    /// Create a new empty mock backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock backend pre-loaded with a few posts and a todo.
    #[must_use]
    pub fn with_sample_posts() -> Self {
        let mock = Self::new();
        mock.insert(Post::new(
            1,
            1,
            "sunt aut facere repellat provident",
            "quia et suscipit\nsuscipit recusandae consequuntur",
        ));
        mock.insert(Post::new(
            2,
            1,
            "qui est esse",
            "est rerum tempore vitae\nsequi sint nihil",
        ));
        mock.insert(Post::new(
            3,
            2,
            "ea molestias quasi",
            "et iusto sed quo iure\nvoluptatem occaecati",
        ));
        mock.insert_todo(Todo {
            id: 1,
            user_id: 1,
            title: "delectus aut autem".to_string(),
            completed: false,
        });
        mock
    }

    /// Store a post, replacing any post with the same id.
    pub fn insert(&self, post: Post) {
        self.lock().posts.insert(post.id, post);
    }

    /// Store a todo.
    pub fn insert_todo(&self, todo: Todo) {
        self.lock().todos.insert(todo.id, todo);
    }

    /// Remove a post behind the client's back.
    pub fn remove(&self, id: u64) -> Option<Post> {
        self.lock().posts.remove(&id)
    }

    /// Current stored state of a post, without counting a call.
    #[must_use]
    pub fn stored(&self, id: u64) -> Option<Post> {
        self.lock().posts.get(&id).cloned()
    }

    /// Address and body of the most recent `put_post`, exactly as sent.
    #[must_use]
    pub fn last_put(&self) -> Option<(u64, Post)> {
        self.lock().last_put.clone()
    }

    /// Calls served so far.
    #[must_use]
    pub fn calls(&self) -> CallCounts {
        self.lock().calls
    }

    /// Make `get_post` fail with `status`.
    pub fn fail_get(&self, status: u16) {
        self.lock().fail_get = Some(status);
    }

    /// Make `put_post` fail with `status`.
    pub fn fail_put(&self, status: u16) {
        self.lock().fail_put = Some(status);
    }

    /// Make `delete_post` fail with `status`.
    pub fn fail_delete(&self, status: u16) {
        self.lock().fail_delete = Some(status);
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn injected(status: Option<u16>) -> Result<()> {
    match status {
        Some(code) => Err(Error::http(format!("HTTP {}", code), Some(code))),
        None => Ok(()),
    }
}

impl Backend for MockBackend {
    fn get_post(&self, id: u64) -> Result<Post> {
        let mut state = self.lock();
        state.calls.get += 1;
        injected(state.fail_get)?;
        state
            .posts
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::post_not_found(id))
    }

    fn list_posts(&self) -> Result<Vec<Post>> {
        let mut state = self.lock();
        state.calls.list += 1;
        injected(state.fail_get)?;
        Ok(state.posts.values().cloned().collect())
    }

    fn create_post(&self, post: &NewPost) -> Result<Post> {
        let mut state = self.lock();
        state.calls.create += 1;
        let id = state.posts.keys().next_back().map_or(1, |last| last + 1);
        let created = post.clone().with_id(id);
        state.posts.insert(id, created.clone());
        Ok(created)
    }

    fn put_post(&self, id: u64, post: &Post) -> Result<Post> {
        let mut state = self.lock();
        state.calls.put += 1;
        state.last_put = Some((id, post.clone()));
        injected(state.fail_put)?;
        let stored = Post {
            id,
            ..post.clone()
        };
        state.posts.insert(id, stored.clone());
        Ok(stored)
    }

    fn delete_post(&self, id: u64) -> Result<()> {
        let mut state = self.lock();
        state.calls.delete += 1;
        injected(state.fail_delete)?;
        // idempotent, like the public service
        state.posts.remove(&id);
        Ok(())
    }

    fn get_todo(&self, id: u64) -> Result<Todo> {
        let mut state = self.lock();
        state.calls.todo += 1;
        injected(state.fail_get)?;
        state.todos.get(&id).cloned().ok_or(Error::NotFound {
            resource: "todo",
            id,
        })
    }
}
