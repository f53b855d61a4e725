use clap::Parser;

use linkdash::cli::Cli;
use linkdash::config::{get_config, init_config};
use linkdash::runtime::modes::{self, Mode};
use linkdash::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command_or_serve();

    // .env 优先于配置加载
    dotenvy::dotenv().ok();
    init_config();

    match modes::detect_mode(&command) {
        Mode::Server => {
            let config = get_config();
            let _guard = init_logging(&config.logging)?;
            modes::run_server().await
        }
        Mode::Cli => {
            if let Err(e) = modes::run_cli(command).await {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
