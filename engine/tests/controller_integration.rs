use claims::*;
use engine::ports::{
    BroadcastBus, FileStore, FixedClock, MemoryStore, PreferenceStore, RecordingSurface,
};
use engine::theme::{ConcreteTheme, ThemeChange, ThemeController, ThemeName};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

const THEME_KEY: &str = "download-manager-theme";
const AUTO_KEY: &str = "download-manager-auto-theme-enabled";

mod helpers {
    use super::*;

    pub struct Harness {
        pub controller: ThemeController,
        pub store: Arc<MemoryStore>,
        pub surface: Arc<RecordingSurface>,
        pub clock: Arc<FixedClock>,
        pub events: broadcast::Receiver<ThemeChange>,
    }

    pub fn harness(store: MemoryStore, hour: u32) -> Harness {
        harness_with_interval(store, hour, Duration::from_secs(60))
    }

    pub fn harness_with_interval(store: MemoryStore, hour: u32, interval: Duration) -> Harness {
        let store = Arc::new(store);
        let surface = Arc::new(RecordingSurface::new());
        let clock = Arc::new(FixedClock::new(hour));
        let controller = ThemeController::builder()
            .store(store.clone())
            .surface(surface.clone())
            .clock(clock.clone())
            .event_bus(BroadcastBus::default())
            .recheck_interval(interval)
            .build();
        let events = controller.subscribe().expect("broadcast bus configured");

        Harness {
            controller,
            store,
            surface,
            clock,
            events,
        }
    }

    pub fn drain(events: &mut broadcast::Receiver<ThemeChange>) -> Vec<ThemeChange> {
        let mut received = Vec::new();
        while let Ok(change) = events.try_recv() {
            received.push(change);
        }
        received
    }
}

use helpers::*;

#[test]
fn test_default_fallback_with_empty_storage() {
    let h = harness(MemoryStore::new(), 10);
    assert_eq!(
        h.controller.current_theme(),
        ThemeName::Concrete(ConcreteTheme::MinimalWhite)
    );
    assert!(!h.controller.is_auto_enabled());
}

#[test]
fn test_concrete_round_trip() {
    let h = harness(MemoryStore::new(), 10);
    for theme in ConcreteTheme::ALL {
        assert_ok!(h.controller.set_theme(theme.into()));
        assert_eq!(h.controller.current_theme(), ThemeName::Concrete(theme));
        assert_eq!(h.controller.actual_theme(), theme);
        assert!(!h.controller.is_auto_enabled());
    }
}

#[test]
fn test_auto_round_trip() {
    let h = harness(MemoryStore::new(), 10);
    assert_ok!(h.controller.set_theme(ThemeName::Auto));
    assert_eq!(h.controller.current_theme(), ThemeName::Auto);
    assert!(h.controller.is_auto_enabled());
}

#[test]
fn test_concrete_after_auto_disables_auto() {
    let h = harness(MemoryStore::new(), 10);
    assert_ok!(h.controller.set_theme(ThemeName::Auto));
    assert_ok!(h.controller.set_theme(ConcreteTheme::DeepSpace.into()));

    assert!(!h.controller.is_auto_enabled());
    assert_eq!(assert_some!(h.store.get(THEME_KEY)), "deep-space");
    assert_eq!(assert_some!(h.store.get(AUTO_KEY)), "false");
}

#[test]
fn test_time_resolution_for_every_hour() {
    let h = harness(MemoryStore::new(), 0);
    assert_ok!(h.controller.set_theme(ThemeName::Auto));

    for hour in 0..24 {
        h.clock.set_hour(hour);
        let expected = if (6..18).contains(&hour) {
            ConcreteTheme::MinimalWhite
        } else {
            ConcreteTheme::DarkNight
        };
        assert_eq!(h.controller.actual_theme(), expected, "hour {hour}");
    }
}

#[test]
fn test_applied_state_matches_notification() {
    let mut h = harness(MemoryStore::new(), 21);
    for name in [
        ThemeName::Concrete(ConcreteTheme::TechBlue),
        ThemeName::Auto,
        ThemeName::Concrete(ConcreteTheme::WarmOrange),
    ] {
        assert_ok!(h.controller.set_theme(name));
        let events = drain(&mut h.events);
        let last = *assert_some!(events.last());
        assert_eq!(Some(last.theme), h.controller.applied_theme());
        assert_eq!(Some(last.theme), h.surface.current());
        assert_eq!(last.is_auto, name.is_auto());
    }
}

#[test]
fn test_recheck_idempotence() {
    let mut h = harness(MemoryStore::new(), 5);
    assert_ok!(h.controller.set_theme(ThemeName::Auto));
    drain(&mut h.events);

    h.clock.set_hour(6);
    let writes = h.surface.writes();
    assert!(assert_ok!(h.controller.periodic_recheck()));
    assert!(!assert_ok!(h.controller.periodic_recheck()));

    assert_eq!(h.surface.writes(), writes + 1);
    assert_eq!(
        drain(&mut h.events),
        vec![ThemeChange::new(ConcreteTheme::MinimalWhite, true)]
    );
}

// Explicit calls notify even when nothing changed; the re-check does not.
#[test]
fn test_notification_asymmetry() {
    let mut h = harness(MemoryStore::new(), 12);
    assert_ok!(h.controller.set_auto_enabled(true));
    assert_ok!(h.controller.set_auto_enabled(true));
    assert_ok!(h.controller.periodic_recheck());

    assert_eq!(
        drain(&mut h.events),
        vec![
            ThemeChange::new(ConcreteTheme::MinimalWhite, true),
            ThemeChange::new(ConcreteTheme::MinimalWhite, true),
        ]
    );
}

#[test]
fn test_initialize_concrete_preference() {
    let store = MemoryStore::with_entries([(THEME_KEY, "tech-blue"), (AUTO_KEY, "false")]);
    let mut h = harness(store, 10);

    assert_ok!(h.controller.initialize());

    assert_eq!(h.controller.applied_theme(), Some(ConcreteTheme::TechBlue));
    assert_eq!(
        drain(&mut h.events),
        vec![ThemeChange::new(ConcreteTheme::TechBlue, false)]
    );
    assert!(!h.controller.is_recheck_armed());
}

#[tokio::test(start_paused = true)]
async fn test_initialize_auto_preference_arms_recheck() {
    let store = MemoryStore::with_entries([(AUTO_KEY, "true")]);
    let mut h = harness(store, 20);

    assert_ok!(h.controller.initialize());

    assert_eq!(h.controller.applied_theme(), Some(ConcreteTheme::DarkNight));
    assert_eq!(
        drain(&mut h.events),
        vec![ThemeChange::new(ConcreteTheme::DarkNight, true)]
    );
    assert!(h.controller.is_recheck_armed());
    assert_eq!(assert_some!(h.store.get(THEME_KEY)), "auto");
}

#[test]
fn test_initialize_with_invalid_stored_theme() {
    let store = MemoryStore::with_entries([(THEME_KEY, "neon-green")]);
    let h = harness(store, 10);

    assert_ok!(h.controller.initialize());
    assert_eq!(h.controller.applied_theme(), Some(ConcreteTheme::MinimalWhite));
    assert_eq!(assert_some!(h.store.get(THEME_KEY)), "minimal-white");
}

#[tokio::test(start_paused = true)]
async fn test_hour_boundary_detected_within_one_interval() {
    let store = MemoryStore::with_entries([(AUTO_KEY, "true")]);
    let mut h = harness(store, 5);
    assert_ok!(h.controller.initialize());
    drain(&mut h.events);
    assert_eq!(h.controller.applied_theme(), Some(ConcreteTheme::DarkNight));

    // 05:59 -> 06:00
    h.clock.set_hour(6);
    tokio::time::sleep(Duration::from_secs(61)).await;

    assert_eq!(h.controller.applied_theme(), Some(ConcreteTheme::MinimalWhite));
    assert_eq!(
        drain(&mut h.events),
        vec![ThemeChange::new(ConcreteTheme::MinimalWhite, true)]
    );

    // Further ticks without a time change stay quiet
    tokio::time::sleep(Duration::from_secs(600)).await;
    assert!(drain(&mut h.events).is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_choosing_concrete_theme_cancels_recheck() {
    let mut h = harness(MemoryStore::new(), 17);
    assert_ok!(h.controller.set_theme(ThemeName::Auto));
    assert!(h.controller.is_recheck_armed());

    assert_ok!(h.controller.set_theme(ConcreteTheme::CyberPurple.into()));
    assert!(!h.controller.is_recheck_armed());
    drain(&mut h.events);

    h.clock.set_hour(19);
    tokio::time::sleep(Duration::from_secs(300)).await;

    assert_eq!(h.controller.applied_theme(), Some(ConcreteTheme::CyberPurple));
    assert!(drain(&mut h.events).is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_disabling_auto_cancels_recheck() {
    let h = harness(MemoryStore::new(), 9);
    assert_ok!(h.controller.set_auto_enabled(true));
    assert!(h.controller.is_recheck_armed());

    assert_ok!(h.controller.set_auto_enabled(false));
    assert!(!h.controller.is_recheck_armed());
}

#[tokio::test(start_paused = true)]
async fn test_dropping_controller_stops_recheck() {
    let h = harness_with_interval(MemoryStore::new(), 9, Duration::from_secs(10));
    assert_ok!(h.controller.set_theme(ThemeName::Auto));
    let writes = h.surface.writes();
    let surface = h.surface.clone();
    let clock = h.clock.clone();
    drop(h);

    clock.set_hour(23);
    tokio::time::sleep(Duration::from_secs(100)).await;
    assert_eq!(surface.writes(), writes);
}

#[test]
fn test_preference_survives_restart() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("preferences.toml");

    {
        let controller = ThemeController::builder()
            .store(Arc::new(FileStore::open(&path)))
            .build();
        assert_ok!(controller.set_theme(ConcreteTheme::WarmOrange.into()));
    }

    let surface = Arc::new(RecordingSurface::new());
    let controller = ThemeController::builder()
        .store(Arc::new(FileStore::open(&path)))
        .surface(surface.clone())
        .build();
    assert_ok!(controller.initialize());

    assert_eq!(
        controller.current_theme(),
        ThemeName::Concrete(ConcreteTheme::WarmOrange)
    );
    assert_eq!(surface.current(), Some(ConcreteTheme::WarmOrange));
}

mod validity {
    use super::*;
    use proptest::prelude::*;

    fn is_known(name: &str) -> bool {
        name == "auto" || ConcreteTheme::ALL.iter().any(|theme| theme.id() == name)
    }

    proptest! {
        #[test]
        fn unknown_names_change_nothing(name in "\\PC{0,24}") {
            prop_assume!(!is_known(&name));

            let mut h = harness(MemoryStore::new(), 14);
            h.controller.set_theme(ConcreteTheme::TechBlue.into()).unwrap();
            drain(&mut h.events);
            let writes = h.surface.writes();

            prop_assert!(h.controller.set_theme_named(&name).is_err());

            prop_assert_eq!(h.controller.applied_theme(), Some(ConcreteTheme::TechBlue));
            prop_assert_eq!(h.surface.writes(), writes);
            let stored_theme = h.store.get(THEME_KEY);
            let stored_flag = h.store.get(AUTO_KEY);
            prop_assert_eq!(stored_theme.as_deref(), Some("tech-blue"));
            prop_assert_eq!(stored_flag.as_deref(), Some("false"));
            prop_assert!(drain(&mut h.events).is_empty());
        }

        #[test]
        fn known_names_are_accepted(index in 0usize..7) {
            let names = [
                "auto",
                "tech-blue",
                "cyber-purple",
                "dark-night",
                "minimal-white",
                "warm-orange",
                "deep-space",
            ];
            let h = harness(MemoryStore::new(), 14);
            prop_assert!(h.controller.set_theme_named(names[index]).is_ok());
            prop_assert_eq!(h.controller.current_theme().id(), names[index]);
        }
    }
}
