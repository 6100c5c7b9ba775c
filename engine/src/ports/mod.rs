//! Capabilities the theme controller depends on.
//!
//! Each port has an inert implementation used when the capability is absent,
//! so the controller runs the same logic with or without a real environment.

pub mod clock;
pub mod events;
pub mod storage;
pub mod surface;

pub use clock::{Clock, FixedClock, SystemClock};
pub use events::{BroadcastBus, EventSink, InertSink};
pub use storage::{FileStore, InertStore, MemoryStore, PreferenceKeys, PreferenceStore};
pub use surface::{FileSurface, InertSurface, RecordingSurface, ThemeSurface};
