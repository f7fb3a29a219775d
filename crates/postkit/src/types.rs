//! Core types for post operations.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Records
// =============================================================================

/// A post as stored by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Identity assigned by the service. Never changed by the client.
    pub id: u64,
    /// Owning user. Any integer is accepted.
    pub user_id: u64,
    /// Post title.
    pub title: String,
    /// Post body.
    pub body: String,
}

impl Post {
    /// Create a post.
    pub fn new(id: u64, user_id: u64, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            user_id,
            title: title.into(),
            body: body.into(),
        }
    }

    /// The create payload for this post (everything except the id).
    #[must_use]
    pub fn to_new_post(&self) -> NewPost {
        NewPost {
            user_id: self.user_id,
            title: self.title.clone(),
            body: self.body.clone(),
        }
    }
}

/// Payload for creating a post. The service assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    /// Owning user.
    pub user_id: u64,
    /// Post title.
    pub title: String,
    /// Post body.
    pub body: String,
}

impl NewPost {
    /// Create a payload owned by user 1.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            user_id: 1,
            title: title.into(),
            body: body.into(),
        }
    }

    /// Set the owning user.
    pub fn user_id(mut self, user_id: u64) -> Self {
        self.user_id = user_id;
        self
    }

    /// Attach an id, producing a full post.
    #[must_use]
    pub fn with_id(self, id: u64) -> Post {
        Post {
            id,
            user_id: self.user_id,
            title: self.title,
            body: self.body,
        }
    }
}

/// A todo item. Read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Todo id.
    pub id: u64,
    /// Owning user.
    pub user_id: u64,
    /// Todo title.
    pub title: String,
    /// Whether the todo is done.
    pub completed: bool,
}

// =============================================================================
// Overrides
// =============================================================================

/// One field of a partial update.
///
/// `Keep` and `Set(String::new())` are different: the first leaves the
/// current value alone, the second clears it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Field<T> {
    /// Leave the current value as it is.
    #[default]
    Keep,
    /// Replace the current value.
    Set(T),
}

impl<T> Field<T> {
    /// Whether a replacement value was supplied.
    pub fn is_set(&self) -> bool {
        matches!(self, Self::Set(_))
    }

    /// Pick the replacement value, or fall back to `current`.
    pub fn resolve(self, current: T) -> T {
        match self {
            Self::Keep => current,
            Self::Set(value) => value,
        }
    }

    /// Borrowing form of [`Field::resolve`].
    pub fn resolve_ref<'a>(&'a self, current: &'a T) -> &'a T {
        match self {
            Self::Keep => current,
            Self::Set(value) => value,
        }
    }

    /// View as an `Option`, `None` meaning keep.
    pub fn as_option(&self) -> Option<&T> {
        match self {
            Self::Keep => None,
            Self::Set(value) => Some(value),
        }
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Keep, Self::Set)
    }
}

/// Caller intent for an update. Every field defaults to [`Field::Keep`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostPatch {
    /// New title.
    pub title: Field<String>,
    /// New body.
    pub body: Field<String>,
    /// New owning user.
    pub user_id: Field<u64>,
}

impl PostPatch {
    /// An empty patch that keeps every field.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Field::Set(title.into());
        self
    }

    /// Replace the body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Field::Set(body.into());
        self
    }

    /// Replace the owning user.
    pub fn user_id(mut self, user_id: u64) -> Self {
        self.user_id = Field::Set(user_id);
        self
    }

    /// Whether no field is being replaced.
    pub fn is_empty(&self) -> bool {
        !self.title.is_set() && !self.body.is_set() && !self.user_id.is_set()
    }
}

// =============================================================================
// Diff
// =============================================================================

/// A comparable field of a post. `id` is deliberately absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PostField {
    /// `title`
    Title,
    /// `body`
    Body,
    /// `userId`
    UserId,
}

impl PostField {
    /// Fields in comparison order.
    pub const ALL: [PostField; 3] = [Self::Title, Self::Body, Self::UserId];

    /// Name of the field on the wire.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Body => "body",
            Self::UserId => "userId",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Body => "Body",
            Self::UserId => "User ID",
        }
    }

    /// Render this field's value on `post`.
    #[must_use]
    pub fn value_of(&self, post: &Post) -> String {
        match self {
            Self::Title => post.title.clone(),
            Self::Body => post.body.clone(),
            Self::UserId => post.user_id.to_string(),
        }
    }
}

impl fmt::Display for PostField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One field that differs between two versions of a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange {
    /// Which field changed.
    pub field: PostField,
    /// Value before.
    pub old: String,
    /// Value after.
    pub new: String,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_wire_format() {
        let post = Post::new(1, 2, "title", "body");
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["userId"], 2);
        assert_eq!(json["title"], "title");
        assert_eq!(json["body"], "body");
    }

    #[test]
    fn test_post_from_service_json() {
        let json = r#"{"userId": 1, "id": 1, "title": "sunt aut", "body": "quia et\nsuscipit"}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post, Post::new(1, 1, "sunt aut", "quia et\nsuscipit"));
    }

    #[test]
    fn test_new_post_has_no_id() {
        let json = serde_json::to_value(NewPost::new("t", "b").user_id(3)).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["userId"], 3);
    }

    #[test]
    fn test_new_post_defaults_to_user_one() {
        assert_eq!(NewPost::new("t", "b").user_id, 1);
    }

    #[test]
    fn test_new_post_with_id() {
        let post = NewPost::new("t", "b").with_id(101);
        assert_eq!(post.id, 101);
        assert_eq!(post.to_new_post(), NewPost::new("t", "b"));
    }

    #[test]
    fn test_todo_from_service_json() {
        let json = r#"{"userId": 1, "id": 1, "title": "delectus aut autem", "completed": false}"#;
        let todo: Todo = serde_json::from_str(json).unwrap();
        assert_eq!(todo.id, 1);
        assert!(!todo.completed);
    }

    #[test]
    fn test_field_keep_vs_empty() {
        let keep: Field<String> = Field::Keep;
        let clear = Field::Set(String::new());
        assert_eq!(keep.resolve("old".to_string()), "old");
        assert_eq!(clear.resolve("old".to_string()), "");
    }

    #[test]
    fn test_field_from_option() {
        assert_eq!(Field::from(Some(5)), Field::Set(5));
        assert_eq!(Field::<u64>::from(None), Field::Keep);
    }

    #[test]
    fn test_field_resolve_ref() {
        let current = 1;
        assert_eq!(*Field::Set(2).resolve_ref(&current), 2);
        assert_eq!(*Field::Keep.resolve_ref(&current), 1);
        assert_eq!(Field::Set(2).as_option(), Some(&2));
    }

    #[test]
    fn test_patch_builder() {
        let patch = PostPatch::new().title("t").user_id(4);
        assert_eq!(patch.title, Field::Set("t".to_string()));
        assert_eq!(patch.body, Field::Keep);
        assert_eq!(patch.user_id, Field::Set(4));
        assert!(!patch.is_empty());
        assert!(PostPatch::new().is_empty());
        assert!(!PostPatch::new().body("").is_empty());
    }

    #[test]
    fn test_post_field_names() {
        let names: Vec<_> = PostField::ALL.iter().map(PostField::name).collect();
        assert_eq!(names, ["title", "body", "userId"]);
        assert_eq!(PostField::UserId.label(), "User ID");
        assert_eq!(PostField::UserId.to_string(), "userId");
    }

    #[test]
    fn test_post_field_value_of() {
        let post = Post::new(1, 9, "t", "b");
        assert_eq!(PostField::Title.value_of(&post), "t");
        assert_eq!(PostField::Body.value_of(&post), "b");
        assert_eq!(PostField::UserId.value_of(&post), "9");
    }
}
