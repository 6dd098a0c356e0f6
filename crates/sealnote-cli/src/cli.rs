use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;

use sealnote_core::VERSION;

/// SealNote - password-protected encrypted notes in a single local file
#[derive(Parser)]
#[command(name = "sealnote")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the store file
    #[arg(short, long, global = true, env = "SEALNOTE_PATH")]
    pub store: Option<String>,

    /// Path to the config file
    #[arg(long, global = true, env = "SEALNOTE_CONFIG")]
    pub config: Option<String>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Note number as shown by `list` (starting at 1)
    #[arg(value_name = "N")]
    pub number: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Note title
    #[arg(long)]
    pub title: Option<String>,

    /// Note body (overrides stdin/editor)
    #[arg(long)]
    pub body: Option<String>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `edit` command
#[derive(Args)]
pub struct EditArgs {
    /// Note number as shown by `list` (starting at 1)
    #[arg(value_name = "N")]
    pub number: usize,

    /// New title (keeps the current one if omitted with --no-input)
    #[arg(long)]
    pub title: Option<String>,

    /// New body (keeps the current one if omitted with --no-input)
    #[arg(long)]
    pub body: Option<String>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `remove` command
#[derive(Args)]
pub struct RemoveArgs {
    /// Note number as shown by `list` (starting at 1)
    #[arg(value_name = "N")]
    pub number: usize,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `passwd` command
#[derive(Args)]
pub struct PasswdArgs {
    /// Disable interactive prompts (reads SEALNOTE_NEW_PASSPHRASE)
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `info` command
#[derive(Args)]
pub struct InfoArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List notes
    List(ListArgs),

    /// Show a note
    Show(ShowArgs),

    /// Add a note (creates the store on first use)
    Add(AddArgs),

    /// Replace the title and body of a note
    Edit(EditArgs),

    /// Delete a note
    Remove(RemoveArgs),

    /// Change the store password (re-encrypts with a new salt)
    Passwd(PasswdArgs),

    /// Show store file details without unlocking it
    Info(InfoArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
