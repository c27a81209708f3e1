// Entrypoint for the CLI application.
// - Keeps `main` small: load config, then hand over to the UI flow.
// - API failures are printed by the UI and still exit 0.

use std::io::{self, Write};

use clap::Parser;
use vkcc_cli::{cli::Cli, config::Config, error::ConfigError, logging, ui};

fn main() -> anyhow::Result<()> {
    // A missing .env is fine; VK_TOKEN may come from the real environment.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let config = match Config::from_env().and_then(|cfg| cli.apply(cfg)) {
        Ok(config) => config,
        Err(ConfigError::MissingToken) => {
            let _ = writeln!(io::stdout(), "Ошибка: переменная VK_TOKEN не найдена.");
            return Ok(());
        }
        Err(err) => {
            let _ = writeln!(io::stdout(), "Ошибка конфигурации: {}", err);
            return Ok(());
        }
    };

    ui::run(&config, cli.url)
}
