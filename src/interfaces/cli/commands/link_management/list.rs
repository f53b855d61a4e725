//! List links command

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::LinkService;

pub async fn list_links(service: &LinkService) -> Result<(), CliError> {
    let links = service.list_links().await?;

    if links.is_empty() {
        println!("{} No short links found", "ℹ".bold().blue());
        return Ok(());
    }

    println!("{}", "Short link list:".bold().green());
    println!();
    for link in &links {
        let mut info_parts = vec![format!(
            "{} -> {}",
            link.code.cyan(),
            link.url.blue().underline()
        )];

        if link.total_clicks > 0 {
            info_parts.push(
                format!("(clicks: {})", link.total_clicks)
                    .dimmed()
                    .cyan()
                    .to_string(),
            );
        }

        println!("  {}", info_parts.join(" "));
    }
    println!();
    println!(
        "{} Total {} short links",
        "ℹ".bold().blue(),
        links.len().to_string().green()
    );
    Ok(())
}
