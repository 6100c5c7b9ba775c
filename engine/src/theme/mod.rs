//! # Theme Module
//!
//! Theme preference state machine with optional time-of-day auto mode.
//!
//! ## Architecture
//!
//! - **[`ThemeController`]** - owns the preference, the applied theme and the re-check
//! - **[`ThemeName`] / [`ConcreteTheme`]** - preference vs. renderable theme identifiers
//! - **[`DaylightWindow`]** - maps the local hour to the auto-mode theme
//! - **Catalog** - ordered list of selectable themes with display labels
//!
//! ## Preference vs. applied theme
//!
//! The preference is what the user chose and is persisted: a concrete theme or
//! `auto`. The applied theme is always concrete. With `auto`, the applied theme
//! is `minimal-white` during the daylight window (06:00-18:00 by default) and
//! `dark-night` otherwise, re-evaluated on a fixed interval.
//!
//! ## Basic Usage
//!
//! ```no_run
//! use engine::ports::{BroadcastBus, FileStore};
//! use engine::theme::{ThemeController, ThemeName};
//! use std::sync::Arc;
//!
//! let controller = ThemeController::builder()
//!     .store(Arc::new(FileStore::open("preferences.toml")))
//!     .event_bus(BroadcastBus::default())
//!     .build();
//!
//! controller.initialize()?;
//! controller.set_theme(ThemeName::Auto)?;
//! ```
//!
//! ## Notifications
//!
//! Every explicit `set_theme` or `set_auto_enabled(true)` publishes a
//! [`ThemeChange`], even when the applied theme did not change. The periodic
//! re-check publishes only when the auto theme actually flips.

pub mod catalog;
pub mod controller;
pub mod resolver;
pub mod types;

pub use catalog::{ThemeOption, label_for, theme_list};
pub use controller::{ThemeController, ThemeControllerBuilder};
pub use resolver::DaylightWindow;
pub use types::{ConcreteTheme, ThemeChange, ThemeName};
