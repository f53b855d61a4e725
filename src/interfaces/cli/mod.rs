//! CLI interface module
//!
//! Link commands open the store directly and go through [`LinkService`], the
//! same facade the HTTP handlers use.

pub mod commands;

use std::fmt;

use crate::cli::Commands;
use crate::config::get_config;
use crate::errors::LinkdashError;
use crate::services::LinkService;
use crate::storage::StorageFactory;
use commands::{add_link, generate_config, link_info, list_links, remove_link};

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<LinkdashError> for CliError {
    fn from(err: LinkdashError) -> Self {
        match err {
            LinkdashError::Store(_)
            | LinkdashError::DatabaseConfig(_)
            | LinkdashError::DatabaseConnection(_) => CliError::StorageError(err.to_string()),
            _ => CliError::CommandError(err.to_string()),
        }
    }
}

/// Base URL used when printing short URLs
pub(crate) fn display_base_url() -> String {
    let config = get_config();
    match config.links.public_base_url.as_deref() {
        Some(base) if !base.is_empty() => base.trim_end_matches('/').to_string(),
        _ => format!("http://{}:{}", config.server.host, config.server.port),
    }
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(cmd: Commands) -> Result<(), CliError> {
    // config-gen 不需要数据库连接
    if let Commands::ConfigGen { output_path, force } = cmd {
        return generate_config(output_path, force);
    }

    let storage = StorageFactory::create(&get_config().database).await?;
    let service = LinkService::new(storage);

    match cmd {
        Commands::Add { url, code } => add_link(&service, url, code).await,
        Commands::List => list_links(&service).await,
        Commands::Info { code } => link_info(&service, &code).await,
        Commands::Remove { code } => remove_link(&service, &code).await,
        Commands::Serve | Commands::ConfigGen { .. } => Err(CliError::CommandError(
            "command is not handled by the CLI runner".to_string(),
        )),
    }
}
