use crate::error::ThemeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of the `auto` mode selector.
pub const AUTO_THEME_ID: &str = "auto";

/// A theme that can actually be rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConcreteTheme {
    TechBlue,
    CyberPurple,
    DarkNight,
    #[default]
    MinimalWhite,
    WarmOrange,
    DeepSpace,
}

impl ConcreteTheme {
    /// Every renderable theme, in declaration order.
    pub const ALL: [ConcreteTheme; 6] = [
        ConcreteTheme::TechBlue,
        ConcreteTheme::CyberPurple,
        ConcreteTheme::DarkNight,
        ConcreteTheme::MinimalWhite,
        ConcreteTheme::WarmOrange,
        ConcreteTheme::DeepSpace,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ConcreteTheme::TechBlue => "tech-blue",
            ConcreteTheme::CyberPurple => "cyber-purple",
            ConcreteTheme::DarkNight => "dark-night",
            ConcreteTheme::MinimalWhite => "minimal-white",
            ConcreteTheme::WarmOrange => "warm-orange",
            ConcreteTheme::DeepSpace => "deep-space",
        }
    }
}

impl fmt::Display for ConcreteTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ConcreteTheme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConcreteTheme::ALL
            .into_iter()
            .find(|theme| theme.id() == s)
            .ok_or_else(|| ThemeError::InvalidTheme(s.to_string()))
    }
}

/// A theme preference: either a concrete theme or the `auto` selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeName {
    Auto,
    Concrete(ConcreteTheme),
}

impl ThemeName {
    pub fn id(&self) -> &'static str {
        match self {
            ThemeName::Auto => AUTO_THEME_ID,
            ThemeName::Concrete(theme) => theme.id(),
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, ThemeName::Auto)
    }

    /// The concrete theme, if this is not the `auto` selector.
    pub fn concrete(&self) -> Option<ConcreteTheme> {
        match self {
            ThemeName::Auto => None,
            ThemeName::Concrete(theme) => Some(*theme),
        }
    }
}

impl Default for ThemeName {
    fn default() -> Self {
        ThemeName::Concrete(ConcreteTheme::default())
    }
}

impl From<ConcreteTheme> for ThemeName {
    fn from(theme: ConcreteTheme) -> Self {
        ThemeName::Concrete(theme)
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ThemeName {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == AUTO_THEME_ID {
            return Ok(ThemeName::Auto);
        }
        s.parse::<ConcreteTheme>().map(ThemeName::Concrete)
    }
}

impl Serialize for ThemeName {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

impl<'de> Deserialize<'de> for ThemeName {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Event broadcast every time a theme is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeChange {
    pub theme: ConcreteTheme,
    pub is_auto: bool,
}

impl ThemeChange {
    pub fn new(theme: ConcreteTheme, is_auto: bool) -> Self {
        Self { theme, is_auto }
    }
}
