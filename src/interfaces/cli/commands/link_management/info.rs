//! Link details command

use colored::Colorize;

use crate::interfaces::cli::{CliError, display_base_url};
use crate::services::LinkService;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

pub async fn link_info(service: &LinkService, code: &str) -> Result<(), CliError> {
    let link = service.get_link(code).await?;

    println!("{}", format!("Link {}", link.code).bold().green());
    println!(
        "  {}:    {}",
        "Short URL".cyan(),
        link.short_url(&display_base_url())
    );
    println!("  {}:       {}", "Target".cyan(), link.url.blue().underline());
    println!("  {}:       {}", "Clicks".cyan(), link.total_clicks);
    println!(
        "  {}: {}",
        "Last clicked".cyan(),
        link.last_clicked
            .map(|t| t.format(TIME_FORMAT).to_string())
            .unwrap_or_else(|| "never".dimmed().to_string())
    );
    println!(
        "  {}:      {}",
        "Created".cyan(),
        link.created_at.format(TIME_FORMAT)
    );

    Ok(())
}
