use thiserror::Error;

/// Errors raised by the theme controller.
///
/// Most failure modes of the controller degrade silently: absent storage reads
/// as defaults and a missing presentation surface is inert. Only two things are
/// reported back to callers:
///
/// - [`InvalidTheme`] - a theme identifier that is neither a concrete theme nor `auto`
/// - [`Surface`] - the presentation surface refused the applied theme
///
/// # Examples
///
/// ```no_run
/// use engine::error::ThemeError;
///
/// fn report(error: ThemeError) {
///     match error {
///         ThemeError::InvalidTheme(name) => log::warn!("Ignoring unknown theme '{name}'"),
///         ThemeError::Surface(e) => log::error!("Failed to apply theme: {e}"),
///     }
/// }
/// ```
///
/// [`InvalidTheme`]: ThemeError::InvalidTheme
/// [`Surface`]: ThemeError::Surface
#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("Invalid theme: {0}")]
    InvalidTheme(String),

    #[error("Presentation surface error: {0}")]
    Surface(#[from] SurfaceError),
}

/// Failures of the presentation surface port.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Failed to write theme attribute to '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Presentation surface unavailable: {0}")]
    Unavailable(String),
}

/// Failures of the preference storage port.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Preference file I/O failed for '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse preference file '{path}': {reason}")]
    Parse { path: String, reason: String },

    #[error("Failed to serialize preferences: {0}")]
    Serialize(String),
}

/// Result type alias for controller operations
pub type ThemeResult<T> = Result<T, ThemeError>;
