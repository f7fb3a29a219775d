//! Human-readable output for posts, todos and mutation outcomes.

use colored::Colorize;
use postkit::{
    Deleted, DiffSummary, FailureCause, FieldChange, MutationFailure, Phase, Post, PostField,
    Todo, Updated,
};
use similar::{ChangeTag, TextDiff};

use crate::ui;

/// One rendered line of a field change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffLine {
    Removed(String),
    Added(String),
}

/// Lines describing one field change.
///
/// Multi-line bodies are diffed line by line so only the edited lines show;
/// everything else is shown as a whole old/new pair.
pub fn change_lines(change: &FieldChange) -> Vec<DiffLine> {
    let multi_line = change.old.contains('\n') || change.new.contains('\n');
    if change.field != PostField::Body || !multi_line {
        return vec![
            DiffLine::Removed(change.old.clone()),
            DiffLine::Added(change.new.clone()),
        ];
    }

    TextDiff::from_lines(&change.old, &change.new)
        .iter_all_changes()
        .filter_map(|c| {
            let line = c.value().trim_end_matches('\n').to_string();
            match c.tag() {
                ChangeTag::Delete => Some(DiffLine::Removed(line)),
                ChangeTag::Insert => Some(DiffLine::Added(line)),
                ChangeTag::Equal => None,
            }
        })
        .collect()
}

/// Print one post's fields
pub fn post(post: &Post) {
    ui::kv("Post ID", &post.id.to_string());
    ui::kv("User ID", &post.user_id.to_string());
    ui::kv("Title", &post.title);
    ui::kv_block("Body", &post.body);
}

/// Print a single post under a header
pub fn post_details(p: &Post) {
    ui::header(&format!("Post #{}", p.id));
    post(p);
}

/// Print a todo item followed by its raw JSON
pub fn todo(todo: &Todo) -> anyhow::Result<()> {
    ui::header("Todo Item");
    ui::kv("User ID", &todo.user_id.to_string());
    ui::kv("Todo ID", &todo.id.to_string());
    ui::kv("Title", &todo.title);
    let status = if todo.completed {
        "yes".green()
    } else {
        "no".yellow()
    };
    ui::kv("Completed", &status.to_string());

    ui::section("Raw JSON");
    println!("{}", serde_json::to_string_pretty(todo)?);
    Ok(())
}

/// Print every post
pub fn posts(posts: &[Post]) {
    if posts.is_empty() {
        ui::info("No posts to display");
        return;
    }

    ui::header(&format!("All Posts ({})", posts.len()));
    for p in posts {
        println!();
        println!(
            "{} {}",
            format!("#{}", p.id).cyan().bold(),
            format!("(user {})", p.user_id).dimmed()
        );
        ui::kv("Title", &p.title);
        ui::kv("Body", &ui::truncate(&p.body, 72));
    }
}

/// Print a newly created post
pub fn created(p: &Post) {
    ui::header("Created Post");
    post(p);
}

/// Print the before/after summary of an update
pub fn updated(updated: &Updated) {
    ui::header("Post Update Summary");
    ui::kv("Post ID", &updated.record.id.to_string());

    let changes = updated.changes();
    let summary = DiffSummary::from_changes(&changes);
    ui::section("Changes");
    if !summary.has_changes() {
        println!("  {} No changes", "✓".green());
        return;
    }

    for change in &changes {
        println!("  {}", change.field.label().bold());
        for line in change_lines(change) {
            match line {
                DiffLine::Removed(text) => println!("    {}", format!("- {}", text).red()),
                DiffLine::Added(text) => println!("    {}", format!("+ {}", text).green()),
            }
        }
    }
    ui::dim(&format!(
        "{} changed, {} unchanged",
        summary.changed, summary.unchanged
    ));
}

/// Print the record that was removed
pub fn deleted(deleted: &Deleted) {
    ui::header("Post Deleted");
    ui::kv("Post ID", &deleted.snapshot.id.to_string());
    ui::kv("Title", &deleted.snapshot.title);
    ui::kv("User ID", &deleted.snapshot.user_id.to_string());
}

/// Print what is known about a failed mutation.
///
/// The error itself is left for the caller to report.
pub fn failure(action: &str, failure: &MutationFailure) {
    let id = failure.target;
    match (failure.phase, failure.cause()) {
        (Phase::Fetch, FailureCause::NotFound) => {
            ui::warn(&format!("Post {} does not exist; nothing was {}", id, action));
        }
        (Phase::Fetch, FailureCause::Transport) => {
            ui::warn(&format!(
                "Could not fetch post {}; nothing was {}",
                id, action
            ));
        }
        (Phase::Write, _) => {
            ui::warn(&format!(
                "Fetched post {} but it could not be {}",
                id, action
            ));
            if let Some(baseline) = &failure.baseline {
                ui::section("Last known state");
                post(baseline);
            }
        }
    }
    ui::dim(failure.error.category().advice());
}

/// Remind the user that the public mock service drops writes
pub fn persistence_note(kind: &str) {
    ui::dim(&format!(
        "Note: JSONPlaceholder acknowledges {} but does not persist them.",
        kind
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(field: PostField, old: &str, new: &str) -> FieldChange {
        FieldChange {
            field,
            old: old.to_string(),
            new: new.to_string(),
        }
    }

    #[test]
    fn test_change_lines_single_line() {
        let lines = change_lines(&change(PostField::Title, "A", "Z"));
        assert_eq!(
            lines,
            vec![
                DiffLine::Removed("A".to_string()),
                DiffLine::Added("Z".to_string())
            ]
        );
    }

    #[test]
    fn test_change_lines_body_only_edited_lines() {
        let lines = change_lines(&change(
            PostField::Body,
            "first\nsecond\nthird",
            "first\nSECOND\nthird",
        ));
        assert_eq!(
            lines,
            vec![
                DiffLine::Removed("second".to_string()),
                DiffLine::Added("SECOND".to_string())
            ]
        );
    }

    #[test]
    fn test_change_lines_body_cleared() {
        let lines = change_lines(&change(PostField::Body, "one\ntwo", ""));
        assert_eq!(
            lines,
            vec![
                DiffLine::Removed("one".to_string()),
                DiffLine::Removed("two".to_string())
            ]
        );
    }

    #[test]
    fn test_change_lines_user_id() {
        let lines = change_lines(&change(PostField::UserId, "1", "2"));
        assert_eq!(lines.len(), 2);
    }
}
