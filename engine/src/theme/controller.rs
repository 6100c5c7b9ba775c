use crate::error::ThemeResult;
use crate::ports::{
    BroadcastBus, Clock, EventSink, InertSink, InertStore, InertSurface, PreferenceKeys,
    PreferenceStore, SystemClock, ThemeSurface,
};
use crate::scheduler::{DEFAULT_RECHECK_INTERVAL, RecheckScheduler};
use crate::theme::resolver::DaylightWindow;
use crate::theme::types::{ConcreteTheme, ThemeChange, ThemeName};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::broadcast;

struct Inner {
    store: Arc<dyn PreferenceStore>,
    surface: Arc<dyn ThemeSurface>,
    events: Arc<dyn EventSink>,
    clock: Arc<dyn Clock>,
    bus: Option<BroadcastBus>,
    keys: PreferenceKeys,
    window: DaylightWindow,
    /// Held across preference writes and surface writes so the persisted
    /// preference and the applied theme change together.
    applied: Mutex<Option<ConcreteTheme>>,
    scheduler: RecheckScheduler,
}

/// Owns the theme preference, the applied theme and the auto-mode re-check.
///
/// The handle is cheap to clone; every clone drives the same state. The
/// re-check task only holds a weak reference, so dropping the last handle
/// stops it.
#[derive(Clone)]
pub struct ThemeController {
    inner: Arc<Inner>,
}

impl ThemeController {
    pub fn builder() -> ThemeControllerBuilder {
        ThemeControllerBuilder::default()
    }

    /// Whether auto mode is persisted as enabled. Absent storage reads as off.
    pub fn is_auto_enabled(&self) -> bool {
        self.inner
            .store
            .get(self.inner.keys.auto_enabled())
            .is_some_and(|value| value == "true")
    }

    /// Persist the auto-mode flag.
    ///
    /// Enabling applies the time-derived theme right away, notifies, and arms
    /// the periodic re-check. Disabling only cancels the re-check; the applied
    /// theme stays until a concrete theme is set.
    pub fn set_auto_enabled(&self, enabled: bool) -> ThemeResult<()> {
        let mut applied = self.applied();
        let value = if enabled { "true" } else { "false" };
        self.persist(&[(self.inner.keys.auto_enabled(), value)]);

        if enabled {
            self.arm_recheck();
            self.apply(&mut applied, self.auto_theme(), true)
        } else {
            self.inner.scheduler.cancel();
            Ok(())
        }
    }

    /// The user's preference: `auto` or the persisted concrete theme.
    pub fn current_theme(&self) -> ThemeName {
        if self.is_auto_enabled() {
            return ThemeName::Auto;
        }
        self.stored_theme().map(ThemeName::Concrete).unwrap_or_default()
    }

    /// The renderable theme the preference resolves to right now.
    pub fn actual_theme(&self) -> ConcreteTheme {
        if self.is_auto_enabled() {
            return self.auto_theme();
        }
        self.stored_theme().unwrap_or_default()
    }

    /// Theme last written to the presentation surface.
    pub fn applied_theme(&self) -> Option<ConcreteTheme> {
        *self.applied()
    }

    pub fn set_theme(&self, theme: ThemeName) -> ThemeResult<()> {
        let mut applied = self.applied();
        match theme {
            ThemeName::Auto => {
                self.persist_preference(ThemeName::Auto.id(), true);
                self.arm_recheck();
                self.apply(&mut applied, self.auto_theme(), true)
            }
            ThemeName::Concrete(concrete) => {
                self.inner.scheduler.cancel();
                self.persist_preference(concrete.id(), false);
                self.apply(&mut applied, concrete, false)
            }
        }
    }

    /// Set a theme from its identifier.
    ///
    /// Unknown identifiers are logged and rejected without touching the
    /// preference or the applied theme.
    pub fn set_theme_named(&self, name: &str) -> ThemeResult<()> {
        match name.parse::<ThemeName>() {
            Ok(theme) => self.set_theme(theme),
            Err(e) => {
                log::warn!("Invalid theme: {name}");
                Err(e)
            }
        }
    }

    /// Apply the persisted preference at startup.
    pub fn initialize(&self) -> ThemeResult<()> {
        let preference = self.current_theme();
        log::info!("Initializing theme from preference '{preference}'");
        self.set_theme(preference)?;

        if self.is_auto_enabled() {
            self.periodic_recheck()?;
            self.arm_recheck();
        }
        Ok(())
    }

    /// Re-resolve the auto theme and apply it if it changed.
    ///
    /// Returns whether anything was applied. Unlike [`set_theme`], an unchanged
    /// value produces no surface write and no notification.
    ///
    /// [`set_theme`]: ThemeController::set_theme
    pub fn periodic_recheck(&self) -> ThemeResult<bool> {
        let mut applied = self.applied();
        if !self.is_auto_enabled() {
            return Ok(false);
        }

        let theme = self.auto_theme();
        if *applied == Some(theme) {
            return Ok(false);
        }

        self.inner.surface.apply(theme)?;
        *applied = Some(theme);

        log::info!("Auto theme switched to {theme}");
        self.inner.events.publish(ThemeChange::new(theme, true));
        Ok(true)
    }

    /// Listen for theme changes when the controller publishes on a [`BroadcastBus`].
    pub fn subscribe(&self) -> Option<broadcast::Receiver<ThemeChange>> {
        self.inner.bus.as_ref().map(BroadcastBus::subscribe)
    }

    pub fn is_recheck_armed(&self) -> bool {
        self.inner.scheduler.is_armed()
    }

    pub fn daylight_window(&self) -> DaylightWindow {
        self.inner.window
    }

    fn auto_theme(&self) -> ConcreteTheme {
        self.inner
            .window
            .theme_for_hour(self.inner.clock.local_hour())
    }

    fn stored_theme(&self) -> Option<ConcreteTheme> {
        self.inner
            .store
            .get(self.inner.keys.selected_theme())
            .and_then(|raw| raw.parse().ok())
    }

    fn applied(&self) -> MutexGuard<'_, Option<ConcreteTheme>> {
        self.inner.applied.lock().unwrap_or_else(|poisoned| {
            log::warn!("Applied theme lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Write both preference slots as one store update.
    fn persist_preference(&self, theme_id: &str, auto: bool) {
        let flag = if auto { "true" } else { "false" };
        self.persist(&[
            (self.inner.keys.auto_enabled(), flag),
            (self.inner.keys.selected_theme(), theme_id),
        ]);
    }

    fn persist(&self, entries: &[(&str, &str)]) {
        if let Err(e) = self.inner.store.set_entries(entries) {
            log::warn!("Failed to persist theme preference: {e}");
        }
    }

    /// Caller holds the `applied` guard for the whole preference update.
    fn apply(
        &self,
        applied: &mut MutexGuard<'_, Option<ConcreteTheme>>,
        theme: ConcreteTheme,
        is_auto: bool,
    ) -> ThemeResult<()> {
        self.inner.surface.apply(theme)?;
        **applied = Some(theme);

        log::info!("Applied theme {theme} (auto: {is_auto})");
        self.inner.events.publish(ThemeChange::new(theme, is_auto));
        Ok(())
    }

    fn arm_recheck(&self) {
        let weak = Arc::downgrade(&self.inner);
        self.inner.scheduler.arm(move || {
            let Some(inner) = weak.upgrade() else {
                return false;
            };
            let controller = ThemeController { inner };
            if let Err(e) = controller.periodic_recheck() {
                log::error!("Theme re-check failed: {e}");
            }
            true
        });
    }
}

impl std::fmt::Debug for ThemeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeController")
            .field("keys", &self.inner.keys)
            .field("window", &self.inner.window)
            .field("applied", &self.applied_theme())
            .field("recheck_armed", &self.is_recheck_armed())
            .finish()
    }
}

/// Wires the controller's ports; anything left unset is inert.
pub struct ThemeControllerBuilder {
    store: Arc<dyn PreferenceStore>,
    surface: Arc<dyn ThemeSurface>,
    events: Arc<dyn EventSink>,
    clock: Arc<dyn Clock>,
    bus: Option<BroadcastBus>,
    keys: PreferenceKeys,
    window: DaylightWindow,
    recheck_interval: Duration,
}

impl Default for ThemeControllerBuilder {
    fn default() -> Self {
        Self {
            store: Arc::new(InertStore),
            surface: Arc::new(InertSurface),
            events: Arc::new(InertSink),
            clock: Arc::new(SystemClock),
            bus: None,
            keys: PreferenceKeys::default(),
            window: DaylightWindow::default(),
            recheck_interval: DEFAULT_RECHECK_INTERVAL,
        }
    }
}

impl ThemeControllerBuilder {
    pub fn store(mut self, store: Arc<dyn PreferenceStore>) -> Self {
        self.store = store;
        self
    }

    pub fn surface(mut self, surface: Arc<dyn ThemeSurface>) -> Self {
        self.surface = surface;
        self
    }

    pub fn events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self.bus = None;
        self
    }

    /// Publish on a broadcast bus and expose it through [`ThemeController::subscribe`].
    pub fn event_bus(mut self, bus: BroadcastBus) -> Self {
        self.events = Arc::new(bus.clone());
        self.bus = Some(bus);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn key_prefix(mut self, prefix: &str) -> Self {
        self.keys = PreferenceKeys::with_prefix(prefix);
        self
    }

    pub fn daylight_window(mut self, window: DaylightWindow) -> Self {
        self.window = window;
        self
    }

    pub fn recheck_interval(mut self, interval: Duration) -> Self {
        self.recheck_interval = interval;
        self
    }

    pub fn build(self) -> ThemeController {
        ThemeController {
            inner: Arc::new(Inner {
                store: self.store,
                surface: self.surface,
                events: self.events,
                clock: self.clock,
                bus: self.bus,
                keys: self.keys,
                window: self.window,
                applied: Mutex::new(None),
                scheduler: RecheckScheduler::new(self.recheck_interval),
            }),
        }
    }
}
