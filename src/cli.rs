use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "postctl")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(about = "Read, create, patch and delete posts on a REST API", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Base URL of the posts service (overrides config file)
    #[arg(long, env = "POSTCTL_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds (overrides config file)
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch a single todo item
    Todo(TodoArgs),

    /// List all posts
    List(ListArgs),

    /// Show a single post
    Show(ShowArgs),

    /// Create a new post
    Create(CreateArgs),

    /// Update a post, keeping fields you don't specify
    Update(UpdateArgs),

    /// Delete a post after confirming it exists
    Delete(DeleteArgs),

    /// Pick an action from an interactive menu
    Menu,

    /// Manage the configuration file
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

// ============================================================================
// Post Commands
// ============================================================================

#[derive(Parser)]
pub struct TodoArgs {
    /// Todo id
    #[arg(default_value = "1", value_parser = clap::value_parser!(u64).range(1..))]
    pub id: u64,

    /// Print raw JSON only
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct ListArgs {
    /// Print raw JSON only
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct ShowArgs {
    /// Post id
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    pub id: u64,

    /// Print raw JSON only
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct CreateArgs {
    /// Post title (prompted if omitted)
    #[arg(short, long)]
    pub title: Option<String>,

    /// Post body (prompted if omitted)
    #[arg(short, long)]
    pub body: Option<String>,

    /// Owning user id
    #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u64).range(1..))]
    pub user_id: u64,
}

#[derive(Parser)]
pub struct UpdateArgs {
    /// Post id
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    pub id: u64,

    /// New title (an empty string clears it)
    #[arg(short, long)]
    pub title: Option<String>,

    /// New body (an empty string clears it)
    #[arg(short, long)]
    pub body: Option<String>,

    /// New owning user id
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub user_id: Option<u64>,

    /// Never prompt; with no field flags, write the post back unchanged
    #[arg(long)]
    pub no_input: bool,
}

impl UpdateArgs {
    /// Whether any field was given on the command line
    pub fn has_overrides(&self) -> bool {
        self.title.is_some() || self.body.is_some() || self.user_id.is_some()
    }
}

#[derive(Parser)]
pub struct DeleteArgs {
    /// Post id
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    pub id: u64,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

// ============================================================================
// Config Commands
// ============================================================================

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Print the config file path
    Path,

    /// Write a config file with default values
    Init,
}
