use clap::Parser;
use serde::Deserialize;

use crate::{
    entries::{form::UpdateFailureReport, schema::FormVariant},
    error::Result,
};

const DEFAULT_CONFIG_PATH: &str = "config/tui.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    /// Path prefix of the REST resources (`{base_url}/{api_prefix}/entries`).
    pub api_prefix: String,
    pub log_level: String,
    pub log_file: String,
    pub toast_ttl_ms: u64,
    pub form_variant: FormVariant,
    pub update_failure_report: UpdateFailureReport,
    pub start_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            api_prefix: "api".to_string(),
            log_level: "info".to_string(),
            log_file: "financas_tui.log".to_string(),
            toast_ttl_ms: 3_000,
            form_variant: FormVariant::Rich,
            update_failure_report: UpdateFailureReport::LocalEntry,
            start_path: "entries".to_string(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "financas_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:3000).
    #[arg(long)]
    base_url: Option<String>,
    /// Override the REST path prefix.
    #[arg(long)]
    api_prefix: Option<String>,
    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
    /// Override log file path.
    #[arg(long)]
    log_file: Option<String>,
    /// Initial route, e.g. `entries/new` or `entries/7/edit`.
    #[arg(long)]
    start_path: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    load_with(Args::parse())
}

fn load_with(args: Args) -> Result<AppConfig> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("FINANCAS_TUI"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(api_prefix) = args.api_prefix {
        settings.api_prefix = api_prefix;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = log_file;
    }
    if let Some(start_path) = args.start_path {
        settings.start_path = start_path;
    }

    Ok(settings)
}
