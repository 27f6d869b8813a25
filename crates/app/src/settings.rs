//! Handles settings for the application.
//!
//! Settings are read from a TOML file (`config/budget_bot.toml` unless
//! `--config` says otherwise) and then from `BUDGET_BOT__*` environment
//! variables, e.g. `BUDGET_BOT__TELEGRAM__TOKEN`.

use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "config/budget_bot.toml";

#[derive(Debug, Parser)]
#[command(name = "budget_bot", about = "Personal finance Telegram bot")]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct Telegram {
    pub token: String,
    /// IANA name used for day boundaries in statistics.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Telegram user ids allowed to talk to the bot. Empty allows everyone.
    #[serde(default)]
    pub allowed_users: Vec<u64>,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    pub database: Database,
    pub telegram: Telegram,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let args = Args::parse();
        let path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);

        Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("BUDGET_BOT")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("telegram.allowed_users")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
