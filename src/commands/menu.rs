use anyhow::{Context as _, Result};
use dialoguer::{Input, Select};

use crate::Context;
use crate::cli::{CreateArgs, DeleteArgs, ListArgs, TodoArgs, UpdateArgs};
use crate::commands::posts;

const ACTIONS: [&str; 5] = [
    "Single todo",
    "All posts",
    "Create new post",
    "Update post",
    "Delete post",
];

pub fn run(ctx: &Context) -> Result<()> {
    let choice = Select::new()
        .with_prompt("What would you like to do?")
        .items(&ACTIONS)
        .default(0)
        .interact()
        .context("Failed to read menu selection")?;

    match choice {
        0 => posts::todo(ctx, TodoArgs { id: 1, json: false }),
        1 => posts::list(ctx, ListArgs { json: false }),
        2 => {
            let title: String = Input::new()
                .with_prompt("Post title")
                .allow_empty(true)
                .interact_text()
                .context("Failed to read title")?;
            let body: String = Input::new()
                .with_prompt("Post body")
                .allow_empty(true)
                .interact_text()
                .context("Failed to read body")?;
            let user_id = prompt_id("User ID", Some(1))?;
            posts::create(
                ctx,
                CreateArgs {
                    title: Some(title),
                    body: Some(body),
                    user_id,
                },
            )
        }
        3 => {
            let id = prompt_id("Post ID to update", None)?;
            posts::update(
                ctx,
                UpdateArgs {
                    id,
                    title: None,
                    body: None,
                    user_id: None,
                    no_input: false,
                },
            )
        }
        _ => {
            let id = prompt_id("Post ID to delete", None)?;
            posts::delete(ctx, DeleteArgs { id, yes: false })
        }
    }
}

/// Ask for a positive id, re-prompting on invalid input
fn prompt_id(prompt: &str, default: Option<u64>) -> Result<u64> {
    let mut input: Input<u64> = Input::new()
        .with_prompt(prompt)
        .validate_with(|id: &u64| {
            if *id == 0 {
                Err("must be a positive integer")
            } else {
                Ok(())
            }
        });
    if let Some(default) = default {
        input = input.default(default);
    }
    input
        .interact_text()
        .with_context(|| format!("Failed to read {}", prompt.to_lowercase()))
}
