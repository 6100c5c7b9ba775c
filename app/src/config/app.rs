use super::{LoggingConfig, limits::*, validation::ConfigValidationError};
use engine::ports::storage::DEFAULT_KEY_PREFIX;
use engine::theme::DaylightWindow;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    storage: StorageConfig,
    #[serde(default)]
    surface: SurfaceConfig,
    #[serde(default)]
    schedule: ScheduleConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

/// Where the theme preference is persisted
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StorageConfig {
    enabled: Option<bool>,
    prefix: Option<String>,
    path: Option<String>,
}

/// Where the applied theme is published for the renderer
#[derive(Debug, Default, Clone, Deserialize)]
pub struct SurfaceConfig {
    path: Option<String>,
}

/// Auto-mode timing
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ScheduleConfig {
    recheck_interval_secs: Option<u64>,
    day_start_hour: Option<u32>,
    day_end_hour: Option<u32>,
}

impl AppConfig {
    /// Validate the configuration against defined limits
    pub fn validate(&self) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        let (start_hour, end_hour) = self.schedule.window_hours();
        if DaylightWindow::new(start_hour, end_hour).is_none() {
            errors.push(ConfigValidationError::DaylightWindow {
                start_hour,
                end_hour,
            });
        }

        let interval = self.schedule.recheck_interval_secs();
        if !(MIN_RECHECK_INTERVAL_SECS..=MAX_RECHECK_INTERVAL_SECS).contains(&interval) {
            errors.push(ConfigValidationError::RecheckInterval {
                configured: interval,
                min_limit: MIN_RECHECK_INTERVAL_SECS,
                max_limit: MAX_RECHECK_INTERVAL_SECS,
            });
        }

        let prefix = self.storage.prefix();
        if prefix.is_empty()
            || !prefix
                .chars()
                .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        {
            errors.push(ConfigValidationError::StoragePrefix {
                configured: prefix.to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }

    pub fn surface(&self) -> &SurfaceConfig {
        &self.surface
    }

    pub fn schedule(&self) -> &ScheduleConfig {
        &self.schedule
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }
}

impl StorageConfig {
    /// When disabled, preferences are not persisted at all
    pub fn enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn prefix(&self) -> &str {
        self.prefix.as_deref().unwrap_or(DEFAULT_KEY_PREFIX)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref().map(Path::new)
    }
}

impl SurfaceConfig {
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref().map(Path::new)
    }
}

impl ScheduleConfig {
    pub fn recheck_interval_secs(&self) -> u64 {
        self.recheck_interval_secs
            .unwrap_or(DEFAULT_RECHECK_INTERVAL_SECS)
    }

    pub fn recheck_interval(&self) -> Duration {
        Duration::from_secs(self.recheck_interval_secs())
    }

    fn window_hours(&self) -> (u32, u32) {
        (
            self.day_start_hour
                .unwrap_or(DaylightWindow::DEFAULT_START_HOUR),
            self.day_end_hour.unwrap_or(DaylightWindow::DEFAULT_END_HOUR),
        )
    }

    /// Configured daylight window; invalid values fall back to the default
    pub fn daylight_window(&self) -> DaylightWindow {
        let (start_hour, end_hour) = self.window_hours();
        DaylightWindow::new(start_hour, end_hour).unwrap_or_else(|| {
            log::warn!(
                "Ignoring invalid daylight window {start_hour}..{end_hour}, using default"
            );
            DaylightWindow::default()
        })
    }
}
