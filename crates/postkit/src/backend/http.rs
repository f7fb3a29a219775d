//! HTTP backend for JSONPlaceholder-style REST services.
//!
//! Resources live at `{base}/posts`, `{base}/posts/{id}` and
//! `{base}/todos/{id}`. The default base is the public JSONPlaceholder
//! service, which acknowledges writes without persisting them.

use crate::backend::Backend;
use crate::error::{Error, Result};
use crate::types::{NewPost, Post, Todo};
use std::time::Duration;

/// Default service base URL.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Default User-Agent header.
pub const DEFAULT_USER_AGENT: &str = concat!("postkit/", env!("CARGO_PKG_VERSION"));

/// Default global request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// ureq-backed transport.
///
/// # Example
///
/// ```no_run
/// use postkit::backend::http::HttpBackend;
/// use postkit::backend::Backend;
///
/// let backend = HttpBackend::new();
/// let post = backend.get_post(1).unwrap();
/// println!("{}", post.title);
/// ```
pub struct HttpBackend {
    /// HTTP agent for requests.
    agent: ureq::Agent,
    /// Service base URL, without a trailing slash.
    base_url: String,
    /// User-Agent header value.
    user_agent: String,
}

impl HttpBackend {
    /// Create a backend for the public JSONPlaceholder service.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(DEFAULT_BASE_URL, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a backend with a custom base URL.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::with_options(base_url, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a backend with every option spelled out.
    #[must_use]
    pub fn with_options(
        base_url: impl Into<String>,
        timeout: Duration,
        user_agent: impl Into<String>,
    ) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        let base_url: String = base_url.into();
        Self {
            agent: config.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent: user_agent.into(),
        }
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the URL for the posts collection.
    fn posts_url(&self) -> String {
        format!("{}/posts", self.base_url)
    }

    /// Build the URL for one post.
    fn post_url(&self, id: u64) -> String {
        format!("{}/posts/{}", self.base_url, id)
    }

    /// Build the URL for one todo.
    fn todo_url(&self, id: u64) -> String {
        format!("{}/todos/{}", self.base_url, id)
    }
}

impl Default for HttpBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a 404 on a read to [`Error::NotFound`]; everything else stays a
/// transport error.
fn read_error(resource: &'static str, id: u64) -> impl FnOnce(ureq::Error) -> Error {
    move |err| match err {
        ureq::Error::StatusCode(404) => Error::NotFound { resource, id },
        other => other.into(),
    }
}

impl Backend for HttpBackend {
    fn get_post(&self, id: u64) -> Result<Post> {
        let url = self.post_url(id);
        log::debug!("GET {}", url);

        let post: Post = self
            .agent
            .get(&url)
            .header("Accept", "application/json")
            .header("User-Agent", self.user_agent.as_str())
            .call()
            .map_err(read_error("post", id))?
            .body_mut()
            .read_json()?;

        Ok(post)
    }

    fn list_posts(&self) -> Result<Vec<Post>> {
        let url = self.posts_url();
        log::debug!("GET {}", url);

        let posts: Vec<Post> = self
            .agent
            .get(&url)
            .header("Accept", "application/json")
            .header("User-Agent", self.user_agent.as_str())
            .call()?
            .body_mut()
            .read_json()?;

        log::trace!("received {} posts", posts.len());
        Ok(posts)
    }

    fn create_post(&self, post: &NewPost) -> Result<Post> {
        let url = self.posts_url();
        log::debug!("POST {}", url);

        let created: Post = self
            .agent
            .post(&url)
            .header("Accept", "application/json")
            .header("User-Agent", self.user_agent.as_str())
            .send_json(post)?
            .body_mut()
            .read_json()?;

        Ok(created)
    }

    fn put_post(&self, id: u64, post: &Post) -> Result<Post> {
        let url = self.post_url(id);
        log::debug!("PUT {}", url);

        let written: Post = self
            .agent
            .put(&url)
            .header("Accept", "application/json")
            .header("User-Agent", self.user_agent.as_str())
            .send_json(post)?
            .body_mut()
            .read_json()?;

        Ok(written)
    }

    fn delete_post(&self, id: u64) -> Result<()> {
        let url = self.post_url(id);
        log::debug!("DELETE {}", url);

        let response = self
            .agent
            .delete(&url)
            .header("User-Agent", self.user_agent.as_str())
            .call()?;

        log::trace!("DELETE {} -> {}", url, response.status());
        Ok(())
    }

    fn get_todo(&self, id: u64) -> Result<Todo> {
        let url = self.todo_url(id);
        log::debug!("GET {}", url);

        let todo: Todo = self
            .agent
            .get(&url)
            .header("Accept", "application/json")
            .header("User-Agent", self.user_agent.as_str())
            .call()
            .map_err(read_error("todo", id))?
            .body_mut()
            .read_json()?;

        Ok(todo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posts_url() {
        let backend = HttpBackend::new();
        assert_eq!(
            backend.posts_url(),
            "https://jsonplaceholder.typicode.com/posts"
        );
    }

    #[test]
    fn test_post_url() {
        let backend = HttpBackend::new();
        assert_eq!(
            backend.post_url(42),
            "https://jsonplaceholder.typicode.com/posts/42"
        );
    }

    #[test]
    fn test_todo_url() {
        let backend = HttpBackend::new();
        assert_eq!(
            backend.todo_url(1),
            "https://jsonplaceholder.typicode.com/todos/1"
        );
    }

    #[test]
    fn test_custom_base_url_trailing_slash() {
        let backend = HttpBackend::with_base_url("http://localhost:3000/");
        assert_eq!(backend.base_url(), "http://localhost:3000");
        assert_eq!(backend.post_url(1), "http://localhost:3000/posts/1");
    }

    #[test]
    fn test_default_impl() {
        let backend = HttpBackend::default();
        assert_eq!(backend.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_read_error_maps_404() {
        let err = read_error("post", 7)(ureq::Error::StatusCode(404));
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "post 7 not found");
    }

    #[test]
    fn test_read_error_keeps_other_statuses() {
        let err = read_error("post", 7)(ureq::Error::StatusCode(500));
        assert!(!err.is_not_found());
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_unreachable_host_is_transport_error() {
        // port 9 (discard) on localhost is closed in test environments
        let backend = HttpBackend::with_options(
            "http://127.0.0.1:9",
            Duration::from_secs(2),
            DEFAULT_USER_AGENT,
        );
        let err = backend.get_post(1).unwrap_err();
        assert!(!err.is_not_found());
        assert!(err.is_retryable());
    }
}
