use crate::config::AppConfig;
use engine::ports::{
    BroadcastBus, FileStore, FileSurface, InertStore, InertSurface, PreferenceStore, ThemeSurface,
};
use engine::theme::ThemeController;
use std::sync::Arc;

/// Directory name used under the platform config directory
pub const APP_NAME: &str = "daylight";

fn build_store(config: &AppConfig) -> Arc<dyn PreferenceStore> {
    let storage = config.storage();
    if !storage.enabled() {
        log::info!("Preference storage disabled, theme choices will not persist");
        return Arc::new(InertStore);
    }

    let path = storage
        .path()
        .map(|path| path.to_path_buf())
        .or_else(|| FileStore::default_path(APP_NAME));

    match path {
        Some(path) => {
            log::info!("Using preference file {}", path.display());
            Arc::new(FileStore::open(path))
        }
        None => {
            log::warn!("Could not determine a preference file location, theme choices will not persist");
            Arc::new(InertStore)
        }
    }
}

fn build_surface(config: &AppConfig) -> Arc<dyn ThemeSurface> {
    match config.surface().path() {
        Some(path) => Arc::new(FileSurface::new(path)),
        None => Arc::new(InertSurface),
    }
}

/// Wire a controller from configuration without applying anything yet
pub fn build_controller(config: &AppConfig) -> ThemeController {
    ThemeController::builder()
        .store(build_store(config))
        .surface(build_surface(config))
        .event_bus(BroadcastBus::default())
        .key_prefix(config.storage().prefix())
        .daylight_window(config.schedule().daylight_window())
        .recheck_interval(config.schedule().recheck_interval())
        .build()
}

/// Build the controller and apply the persisted theme.
///
/// A failure to apply is logged and startup continues with whatever the
/// presentation layer currently shows.
pub fn start(config: &AppConfig) -> ThemeController {
    let controller = build_controller(config);
    if let Err(e) = controller.initialize() {
        log::error!("Failed to initialize theme: {e}");
    }
    controller
}
