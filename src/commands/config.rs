//! Configuration commands.

use crate::config::Config;
use crate::error::Result;

/// Show current configuration
pub fn cmd_config_show() -> Result<()> {
    let config = Config::load()?;

    println!("Configuration ({})", Config::config_path()?.display());
    println!("  base_url:        {}", config.base_url);
    println!("  request_timeout: {}s", config.request_timeout);
    println!(
        "  theme:           {}",
        config
            .preferences
            .theme
            .as_deref()
            .unwrap_or("not configured")
    );
    println!(
        "  language:        {}",
        config
            .preferences
            .language
            .as_deref()
            .unwrap_or("not configured")
    );
    Ok(())
}

/// Get a configuration value
pub fn cmd_config_get(key: &str) -> Result<()> {
    let config = Config::load()?;
    println!("{}", config.get(key)?);
    Ok(())
}

/// Set a configuration value
pub fn cmd_config_set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;
    println!("Set {}", key);
    Ok(())
}
