use colored::Colorize;

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", "ℹ".blue(), msg);
}

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a warning message
pub fn warn(msg: &str) {
    println!("{} {}", "⚠".yellow(), msg);
}

/// Print a dim/muted message
pub fn dim(msg: &str) {
    println!("  {}", msg.dimmed());
}

/// Print a header/title
pub fn header(title: &str) {
    println!();
    println!("{}", title.bold());
    println!("{}", "─".repeat(title.chars().count()).dimmed());
}

/// Print a section header
pub fn section(title: &str) {
    println!();
    println!("{}", title.cyan().bold());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("  {}: {}", key.dimmed(), value);
}

/// Print a key and a possibly multi-line value, continuation lines indented
pub fn kv_block(key: &str, value: &str) {
    let mut lines = value.lines();
    match lines.next() {
        Some(first) => println!("  {}: {}", key.dimmed(), first),
        None => println!("  {}: {}", key.dimmed(), "(empty)".dimmed()),
    }
    let indent = " ".repeat(key.chars().count() + 4);
    for line in lines {
        println!("{}{}", indent, line);
    }
}

// ============================================================================
// Text Formatting
// ============================================================================

/// Collapse a value onto one line and cut it to `max_chars`, marking the cut
pub fn truncate(text: &str, max_chars: usize) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= max_chars {
        single_line
    } else if max_chars <= 3 {
        "...".to_string()
    } else {
        let kept: String = single_line.chars().take(max_chars - 3).collect();
        format!("{}...", kept)
    }
}

// ============================================================================
// Tests
// ============================================================================
