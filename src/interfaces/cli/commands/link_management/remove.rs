//! Remove link command

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::LinkService;

pub async fn remove_link(service: &LinkService, code: &str) -> Result<(), CliError> {
    service.delete_link(code).await?;

    println!(
        "{} Deleted short link: {}",
        "✓".bold().green(),
        code.cyan()
    );

    Ok(())
}
