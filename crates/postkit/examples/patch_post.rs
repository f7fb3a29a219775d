//! Example: Patch a post and delete another
//!
//! Run with: cargo run -p postkit --example patch_post

use postkit::{Client, MockBackend, MutationOutcome, PostPatch};

fn main() {
    println!("Patch Post");
    println!("==========\n");

    let mock = MockBackend::with_sample_posts();
    let client = Client::with_backend(Box::new(mock.clone()));

    // Replace the title, keep body and owner
    let patch = PostPatch::new().title("a brand new title");

    match client.update(1, patch) {
        MutationOutcome::Success(updated) => {
            println!("Updated post {}", updated.record.id);
            let changes = updated.changes();
            if changes.is_empty() {
                println!("  (no changes)");
            }
            for change in changes {
                println!("  {}: {:?} -> {:?}", change.field.label(), change.old, change.new);
            }
        }
        MutationOutcome::Failure(failure) => {
            eprintln!("Update failed: {}", failure);
            std::process::exit(1);
        }
    }

    println!("\nDeleting post 2...");
    match client.delete(2) {
        MutationOutcome::Success(deleted) => {
            println!("Deleted post {}: {}", deleted.snapshot.id, deleted.snapshot.title);
        }
        MutationOutcome::Failure(failure) => {
            eprintln!("Delete failed ({:?}): {}", failure.cause(), failure);
        }
    }

    // Deleting again fails the existence check
    if let MutationOutcome::Failure(failure) = client.delete(2) {
        println!("Second delete: {}", failure);
    }

    let calls = mock.calls();
    println!(
        "\nCalls: {} get, {} put, {} delete",
        calls.get, calls.put, calls.delete
    );
}
