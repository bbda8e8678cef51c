//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Extract strings into the catalog and rewrite components
//! - `transform`: Rewrite components against an existing catalog
//! - `init`: Initialize parlai configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(cmd)) => cmd.common.verbose,
            Some(Command::Transform(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by extract and transform.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root; the catalog and setup files are resolved from here
    /// (defaults to the current directory)
    #[arg(long, env = "PARLAI_ROOT")]
    pub root: Option<PathBuf>,

    /// Primary locale (overrides config file)
    #[arg(long)]
    pub primary_locale: Option<String>,

    /// Locales directory path (overrides config file)
    #[arg(long)]
    pub locales_dir: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    /// Directory containing the components to process
    pub dir: PathBuf,

    /// Show what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Copy sources and catalog to a timestamped directory first
    #[arg(long)]
    pub backup: bool,

    /// Only keep strings that are rewritten, and drop unreferenced keys
    #[arg(long)]
    pub cleanup: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct TransformCommand {
    /// Directory containing the components to process
    pub dir: PathBuf,

    /// Show what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract translatable strings to the catalog and rewrite components
    Extract(ExtractCommand),
    /// Replace strings already in the catalog with lookups
    Transform(TransformCommand),
    /// Initialize a new .parlairc.json configuration file
    Init,
}
