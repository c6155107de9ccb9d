use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use clap::Args;

#[derive(Args)]
pub struct ConfigCommand {}

impl ConfigCommand {
    pub fn run(&self) -> AppResult<()> {
        let app_config = AppConfig::get_defaults();
        let rendered = toml::to_string_pretty(&app_config)
            .map_err(|e| AppError::Config(format!("Failed to render configuration: {}", e)))?;
        print!("{}", rendered);
        Ok(())
    }
}
