//! Effective configuration command.

use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::output::Formatter;

/// Execute the show-config command.
pub fn execute_show_config(config: &Config, formatter: &Formatter) -> Result<()> {
    let rendered = match formatter.format() {
        OutputFormat::Json => serde_json::to_string_pretty(config)?,
        OutputFormat::Table => config.to_toml()?,
    };
    println!("{}", rendered);
    Ok(())
}
