use crate::error::SurfaceError;
use crate::theme::types::ConcreteTheme;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// The presentation layer's single "current theme" attribute.
///
/// The controller is the only writer; renderers read whatever was last applied.
pub trait ThemeSurface: Send + Sync {
    fn apply(&self, theme: ConcreteTheme) -> Result<(), SurfaceError>;
}

/// No presentation layer attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct InertSurface;

impl ThemeSurface for InertSurface {
    fn apply(&self, _theme: ConcreteTheme) -> Result<(), SurfaceError> {
        Ok(())
    }
}

#[derive(Debug, Default)]
struct Recorded {
    current: Option<ConcreteTheme>,
    writes: usize,
}

/// Keeps the last applied theme in memory and counts writes.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    state: Mutex<Recorded>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<ConcreteTheme> {
        self.state.lock().map(|s| s.current).unwrap_or_default()
    }

    pub fn writes(&self) -> usize {
        self.state.lock().map(|s| s.writes).unwrap_or_default()
    }
}

impl ThemeSurface for RecordingSurface {
    fn apply(&self, theme: ConcreteTheme) -> Result<(), SurfaceError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| SurfaceError::Unavailable("recording surface poisoned".to_string()))?;
        state.current = Some(theme);
        state.writes += 1;
        Ok(())
    }
}

/// Writes the applied theme identifier to a file for an external renderer.
#[derive(Debug, Clone)]
pub struct FileSurface {
    path: PathBuf,
}

impl FileSurface {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Theme currently written to the file, if any.
    pub fn read_current(&self) -> Option<ConcreteTheme> {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|content| content.trim().parse().ok())
    }
}

impl ThemeSurface for FileSurface {
    fn apply(&self, theme: ConcreteTheme) -> Result<(), SurfaceError> {
        fs::write(&self.path, format!("{theme}\n")).map_err(|source| SurfaceError::Io {
            path: self.path.display().to_string(),
            source,
        })
    }
}
