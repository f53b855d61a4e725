//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// linkdash - a small URL shortener with a web dashboard
#[derive(Parser, Debug)]
#[command(name = "linkdash")]
#[command(version)]
#[command(about = "A small URL shortener with a web dashboard", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP server (default when no command is given)
    Serve,

    /// Add a short link
    Add {
        /// Target URL (http:// or https://)
        url: String,

        /// Custom code, 6-8 letters or digits; random when omitted
        #[arg(long, short = 'c')]
        code: Option<String>,
    },

    /// List all short links, newest first
    List,

    /// Show details and click statistics of one link
    Info {
        /// Short code
        code: String,
    },

    /// Remove a short link
    Remove {
        /// Short code
        code: String,
    },

    /// Generate a sample configuration file
    ConfigGen {
        /// Output path (default: config.toml)
        output_path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// The command to run; `serve` when none was given
    pub fn command_or_serve(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}
