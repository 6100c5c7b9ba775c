use super::app::AppConfig;

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid daylight window: {start_hour}..{end_hour} (start must be before end, end at most 24)")]
    DaylightWindow { start_hour: u32, end_hour: u32 },
    #[error("Invalid recheck_interval_secs: {configured} (min: {min_limit}, max: {max_limit})")]
    RecheckInterval {
        configured: u64,
        min_limit: u64,
        max_limit: u64,
    },
    #[error("Invalid storage prefix: {configured:?}")]
    StoragePrefix { configured: String },
}

impl ConfigValidationError {
    pub fn user_message(&self) -> String {
        match self {
            ConfigValidationError::DaylightWindow {
                start_hour,
                end_hour,
            } => {
                format!(
                    "Daylight window is empty or out of range!\n\n\
                    Your configured window: {start_hour}:00 - {end_hour}:00\n\n\
                    Please set schedule.day_start_hour below schedule.day_end_hour, with the end no later than 24."
                )
            }
            ConfigValidationError::RecheckInterval {
                configured,
                min_limit,
                max_limit,
            } => {
                format!(
                    "Theme re-check interval out of range!\n\n\
                    Your configured value: {configured} seconds\n\
                    Valid range: {min_limit} - {max_limit} seconds\n\n\
                    Please update schedule.recheck_interval_secs in config.toml."
                )
            }
            ConfigValidationError::StoragePrefix { configured } => {
                format!(
                    "Invalid storage prefix: '{configured}'\n\n\
                    The prefix must be non-empty and contain only alphanumerics, hyphens and underscores.\n\n\
                    Please update storage.prefix in config.toml."
                )
            }
        }
    }
}

/// Configuration loading result
pub enum ConfigLoadResult {
    Success(Box<AppConfig>),
    LoadError(String),
    DeserializeError(String),
}

impl ConfigLoadResult {
    pub fn config(&self) -> Result<&AppConfig, &str> {
        match self {
            ConfigLoadResult::Success(config) => Ok(config),
            ConfigLoadResult::LoadError(e) | ConfigLoadResult::DeserializeError(e) => Err(e),
        }
    }
}
