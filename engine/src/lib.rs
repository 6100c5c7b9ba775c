//! # Daylight Engine Library
//!
//! Core library for selecting, persisting and applying the application theme,
//! with an optional auto mode that follows the local time of day.
//!
//! ## Modules
//!
//! - [`theme`] - Theme identifiers, catalog, resolution and the controller
//! - [`ports`] - Storage, presentation surface, event and clock capabilities
//! - [`scheduler`] - Cancellable periodic re-check task
//! - [`error`] - Error types shared by the controller and its ports

pub mod error;
pub mod ports;
pub mod scheduler;
pub mod theme;

pub use error::{ThemeError, ThemeResult};
pub use theme::{ConcreteTheme, ThemeChange, ThemeController, ThemeName};
