use anyhow::{Context as _, Result, bail};
use dialoguer::{Confirm, Input};
use postkit::retry::{LogCallback, RetryCallback, with_retry};
use postkit::{NewPost, Post, PostField, PostPatch};

use crate::Context;
use crate::cli::{CreateArgs, DeleteArgs, ListArgs, ShowArgs, TodoArgs, UpdateArgs};
use crate::progress;
use crate::render;
use crate::ui;

// ============================================================================
// Reads
// ============================================================================

/// Run a read under a spinner, retrying transient failures
fn read<T>(ctx: &Context, msg: &str, op: impl FnMut() -> postkit::Result<T>) -> Result<T> {
    let retry = ctx.config.retry_config();
    let callback: &dyn RetryCallback = &LogCallback;
    let value = progress::with_spinner(msg, ctx.quiet, || {
        with_retry(&retry, Some(callback), op)
    })?;
    Ok(value)
}

pub fn todo(ctx: &Context, args: TodoArgs) -> Result<()> {
    let todo = read(ctx, &format!("Fetching todo {}...", args.id), || {
        ctx.client.todo(args.id)
    })?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&todo)?);
        return Ok(());
    }
    render::todo(&todo)
}

pub fn list(ctx: &Context, args: ListArgs) -> Result<()> {
    let posts = read(ctx, "Fetching posts...", || ctx.client.posts())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&posts)?);
        return Ok(());
    }
    render::posts(&posts);
    Ok(())
}

pub fn show(ctx: &Context, args: ShowArgs) -> Result<()> {
    let post = read(ctx, &format!("Fetching post {}...", args.id), || {
        ctx.client.post(args.id)
    })?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&post)?);
        return Ok(());
    }
    render::post_details(&post);
    Ok(())
}

// ============================================================================
// Writes
// ============================================================================

pub fn create(ctx: &Context, args: CreateArgs) -> Result<()> {
    let title = match args.title {
        Some(title) => title,
        None => Input::new()
            .with_prompt("Title")
            .allow_empty(true)
            .interact_text()
            .context("Failed to read title")?,
    };
    let body = match args.body {
        Some(body) => body,
        None => Input::new()
            .with_prompt("Body")
            .allow_empty(true)
            .interact_text()
            .context("Failed to read body")?,
    };

    let draft = NewPost::new(title, body).user_id(args.user_id);
    let created = progress::with_spinner("Creating post...", ctx.quiet, || {
        ctx.client.create(&draft)
    })?;

    render::created(&created);
    if ctx.config.is_mock_service() {
        render::persistence_note("new posts");
    }
    Ok(())
}

pub fn update(ctx: &Context, args: UpdateArgs) -> Result<()> {
    let id = args.id;
    let patch = if args.has_overrides() || args.no_input {
        patch_from_args(args)
    } else {
        let current = current_post(ctx, id)?;
        prompt_patch(&current)?
    };

    if patch.is_empty() {
        ui::info("No fields given; the post will be written back unchanged");
    }

    let outcome = progress::with_spinner(&format!("Updating post {}...", id), ctx.quiet, || {
        ctx.client.update(id, patch)
    });

    match outcome.into_result() {
        Ok(updated) => {
            render::updated(&updated);
            if ctx.config.is_mock_service() {
                render::persistence_note("updates");
            }
            Ok(())
        }
        Err(failure) => {
            render::failure("updated", &failure);
            Err(failure.into())
        }
    }
}

pub fn delete(ctx: &Context, args: DeleteArgs) -> Result<()> {
    let id = args.id;
    if !args.yes
        && !Confirm::new()
            .with_prompt(format!("Delete post {}?", id))
            .default(false)
            .interact()
            .context("Failed to read user input")?
    {
        ui::info("Aborted. No changes made.");
        return Ok(());
    }

    let outcome = progress::with_spinner(&format!("Deleting post {}...", id), ctx.quiet, || {
        ctx.client.delete(id)
    });

    match outcome.into_result() {
        Ok(deleted) => {
            render::deleted(&deleted);
            ui::success(&format!("Post {} deleted", id));
            if ctx.config.is_mock_service() {
                render::persistence_note("deletes");
            }
            Ok(())
        }
        Err(failure) => {
            render::failure("deleted", &failure);
            Err(failure.into())
        }
    }
}

// ============================================================================
// Overrides
// ============================================================================

/// Overrides from command-line flags; an empty string is a real value
fn patch_from_args(args: UpdateArgs) -> PostPatch {
    PostPatch {
        title: args.title.into(),
        body: args.body.into(),
        user_id: args.user_id.into(),
    }
}

/// Fetch and show the post an interactive update starts from
fn current_post(ctx: &Context, id: u64) -> Result<Post> {
    let post = read(ctx, &format!("Fetching post {}...", id), || {
        ctx.client.post(id)
    })
    .with_context(|| format!("Could not load post {} for editing", id))?;

    ui::section("Current post details");
    render::post(&post);
    println!();
    Ok(post)
}

/// Ask for each field, leaving it unchanged when the answer is empty
fn prompt_patch(current: &Post) -> Result<PostPatch> {
    ui::info("Enter new values (leave empty to keep the current value)");

    let mut answers = Vec::with_capacity(3);
    for field in PostField::ALL {
        let label = field.label();
        let shown = ui::truncate(&field.value_of(current), 40);
        let answer: String = Input::new()
            .with_prompt(format!("  {} [{}]", label, shown))
            .allow_empty(true)
            .interact_text()
            .with_context(|| format!("Failed to read {}", label.to_lowercase()))?;
        answers.push(answer);
    }

    patch_from_answers(&answers[0], &answers[1], &answers[2])
}

/// Build a patch from interactive answers
fn patch_from_answers(title: &str, body: &str, user_id: &str) -> Result<PostPatch> {
    let mut patch = PostPatch::new();
    if !title.is_empty() {
        patch = patch.title(title);
    }
    if !body.is_empty() {
        patch = patch.body(body);
    }

    let user_id = user_id.trim();
    if !user_id.is_empty() {
        let parsed: u64 = user_id
            .parse()
            .with_context(|| format!("User ID must be a positive integer (got '{}')", user_id))?;
        if parsed == 0 {
            bail!("User ID must be a positive integer (got '0')");
        }
        patch = patch.user_id(parsed);
    }
    Ok(patch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use postkit::{Client, Field, MockBackend, MutationFailure, Phase};

    fn context(backend: &MockBackend) -> Context {
        Context {
            quiet: true,
            config: Config::default().with_overrides(Some("http://localhost:3000"), None),
            client: Client::with_backend(Box::new(backend.clone())),
        }
    }

    fn update_args(id: u64) -> UpdateArgs {
        UpdateArgs {
            id,
            title: None,
            body: None,
            user_id: None,
            no_input: true,
        }
    }

    #[test]
    fn test_patch_from_answers_empty_keeps() {
        let patch = patch_from_answers("", "", "").unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn test_patch_from_answers_sets_values() {
        let patch = patch_from_answers("New", "", " 4 ").unwrap();
        assert_eq!(patch.title, Field::Set("New".to_string()));
        assert_eq!(patch.body, Field::Keep);
        assert_eq!(patch.user_id, Field::Set(4));
    }

    #[test]
    fn test_patch_from_answers_rejects_bad_user_id() {
        assert!(patch_from_answers("", "", "abc").is_err());
        assert!(patch_from_answers("", "", "0").is_err());
        assert!(patch_from_answers("", "", "-2").is_err());
    }

    #[test]
    fn test_patch_from_args_empty_string_clears() {
        let mut args = update_args(1);
        args.title = Some(String::new());
        let patch = patch_from_args(args);
        assert_eq!(patch.title, Field::Set(String::new()));
        assert_eq!(patch.body, Field::Keep);
    }

    #[test]
    fn test_current_post_loads_record() {
        let backend = MockBackend::with_sample_posts();
        let ctx = context(&backend);

        let post = current_post(&ctx, 2).unwrap();
        assert_eq!(post, backend.stored(2).unwrap());
        assert_eq!(backend.calls().get, 1);
        assert_eq!(backend.calls().writes(), 0);
    }

    #[test]
    fn test_current_post_missing_stops_before_prompting() {
        let backend = MockBackend::with_sample_posts();
        let ctx = context(&backend);

        let err = current_post(&ctx, 42).unwrap_err();
        assert!(err.to_string().contains("post 42"));
        assert_eq!(backend.calls().writes(), 0);
    }

    #[test]
    fn test_update_command_writes_merge() {
        let backend = MockBackend::with_sample_posts();
        let ctx = context(&backend);
        let mut args = update_args(1);
        args.title = Some("Renamed".to_string());

        update(&ctx, args).unwrap();

        let stored = backend.stored(1).unwrap();
        assert_eq!(stored.title, "Renamed");
        assert_eq!(backend.calls().put, 1);
    }

    #[test]
    fn test_update_command_missing_post() {
        let backend = MockBackend::with_sample_posts();
        let ctx = context(&backend);

        let err = update(&ctx, update_args(99)).unwrap_err();
        let failure = err.downcast_ref::<MutationFailure>().unwrap();
        assert_eq!(failure.phase, Phase::Fetch);
        assert_eq!(backend.calls().writes(), 0);
    }

    #[test]
    fn test_delete_command_with_yes() {
        let backend = MockBackend::with_sample_posts();
        let ctx = context(&backend);

        delete(&ctx, DeleteArgs { id: 2, yes: true }).unwrap();
        assert!(backend.stored(2).is_none());

        let err = delete(&ctx, DeleteArgs { id: 2, yes: true }).unwrap_err();
        assert!(err.to_string().contains("not found"));
        assert_eq!(backend.calls().delete, 1);
    }

    #[test]
    fn test_create_command_with_flags() {
        let backend = MockBackend::new();
        let ctx = context(&backend);

        create(
            &ctx,
            CreateArgs {
                title: Some("t".to_string()),
                body: Some("b".to_string()),
                user_id: 2,
            },
        )
        .unwrap();
        assert_eq!(backend.calls().create, 1);
    }

    #[test]
    fn test_read_retries_transient_failures() {
        let backend = MockBackend::with_sample_posts();
        let mut ctx = context(&backend);
        ctx.config.retry.base_delay_ms = 1;
        ctx.config.retry.backoff_factor = 1.0;
        backend.fail_get(503);

        let err = show(&ctx, ShowArgs { id: 1, json: true }).unwrap_err();
        assert!(err.to_string().contains("503"));
        assert_eq!(backend.calls().get, 3);
    }
}
