//! Add link command

use colored::Colorize;

use crate::interfaces::cli::{CliError, display_base_url};
use crate::services::{CreateLinkRequest, LinkService};

pub async fn add_link(
    service: &LinkService,
    url: String,
    code: Option<String>,
) -> Result<(), CliError> {
    let result = service
        .create_link(CreateLinkRequest::new(url, code))
        .await?;

    if result.generated_code {
        println!(
            "{} Generated random code: {}",
            "ℹ".bold().blue(),
            result.link.code.magenta()
        );
    }

    println!(
        "{} Added short link: {} -> {}",
        "✓".bold().green(),
        result.link.short_url(&display_base_url()).cyan(),
        result.link.url.blue().underline()
    );

    Ok(())
}
