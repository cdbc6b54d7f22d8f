//! Configuration validation module

use super::Settings;
use crate::utils::errors::{DiceBuddyError, Result};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_database_config(&settings.database)?;
    validate_scheduler_config(&settings.scheduler)?;
    validate_logging_config(&settings.logging)?;
    Ok(())
}

fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(DiceBuddyError::Config("Bot token is required".to_string()));
    }

    if config.admin_ids.is_empty() {
        return Err(DiceBuddyError::Config(
            "At least one admin ID must be configured".to_string(),
        ));
    }

    Ok(())
}

fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(DiceBuddyError::Config("Database URL is required".to_string()));
    }

    if config.max_connections == 0 {
        return Err(DiceBuddyError::Config(
            "Max connections must be greater than 0".to_string(),
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(DiceBuddyError::Config(
            "Min connections cannot be greater than max connections".to_string(),
        ));
    }

    Ok(())
}

fn validate_scheduler_config(config: &super::SchedulerConfig) -> Result<()> {
    if config.interval_secs == 0 {
        return Err(DiceBuddyError::Config(
            "Scheduler interval must be greater than 0".to_string(),
        ));
    }

    // The delivery window is one hour wide; a longer tick interval would
    // silently skip thresholds that fall between two ticks.
    if config.interval_secs >= 3600 {
        return Err(DiceBuddyError::Config(
            "Scheduler interval must be shorter than the one hour reminder window".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(DiceBuddyError::Config("Log level is required".to_string()));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(DiceBuddyError::Config(format!(
            "Invalid log level: {}. Valid levels: {:?}",
            config.level, valid_levels
        )));
    }

    Ok(())
}
