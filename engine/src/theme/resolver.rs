use super::types::ConcreteTheme;

/// Theme used while the local hour is inside the daylight window.
pub const DAY_THEME: ConcreteTheme = ConcreteTheme::MinimalWhite;

/// Theme used outside the daylight window.
pub const NIGHT_THEME: ConcreteTheme = ConcreteTheme::DarkNight;

/// Half-open range of local hours `[start_hour, end_hour)` treated as daytime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaylightWindow {
    start_hour: u32,
    end_hour: u32,
}

impl DaylightWindow {
    pub const DEFAULT_START_HOUR: u32 = 6;
    pub const DEFAULT_END_HOUR: u32 = 18;

    /// Build a window; `None` unless `start_hour < end_hour <= 24`.
    pub fn new(start_hour: u32, end_hour: u32) -> Option<Self> {
        (start_hour < end_hour && end_hour <= 24).then_some(Self {
            start_hour,
            end_hour,
        })
    }

    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }

    pub fn is_daytime(&self, hour: u32) -> bool {
        (self.start_hour..self.end_hour).contains(&hour)
    }

    /// Theme auto mode selects at the given local hour.
    pub fn theme_for_hour(&self, hour: u32) -> ConcreteTheme {
        if self.is_daytime(hour) {
            DAY_THEME
        } else {
            NIGHT_THEME
        }
    }
}

impl Default for DaylightWindow {
    fn default() -> Self {
        Self {
            start_hour: Self::DEFAULT_START_HOUR,
            end_hour: Self::DEFAULT_END_HOUR,
        }
    }
}
