use super::types::{ConcreteTheme, ThemeName};

/// An entry of the theme picker: identifier plus human-readable label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeOption {
    pub name: ThemeName,
    pub label: &'static str,
}

const fn option(name: ThemeName, label: &'static str) -> ThemeOption {
    ThemeOption { name, label }
}

static THEME_CATALOG: [ThemeOption; 7] = [
    option(ThemeName::Auto, "Auto"),
    option(ThemeName::Concrete(ConcreteTheme::MinimalWhite), "Bright Modern"),
    option(ThemeName::Concrete(ConcreteTheme::TechBlue), "Tech Blue"),
    option(ThemeName::Concrete(ConcreteTheme::CyberPurple), "Digital Lavender"),
    option(ThemeName::Concrete(ConcreteTheme::WarmOrange), "Warm Orange"),
    option(ThemeName::Concrete(ConcreteTheme::DarkNight), "Soft Dark"),
    option(ThemeName::Concrete(ConcreteTheme::DeepSpace), "Deep Space"),
];

/// Ordered list of selectable themes, `auto` first.
pub fn theme_list() -> &'static [ThemeOption] {
    &THEME_CATALOG
}

/// Label shown for a theme.
pub fn label_for(name: ThemeName) -> &'static str {
    THEME_CATALOG
        .iter()
        .find(|entry| entry.name == name)
        .map(|entry| entry.label)
        .unwrap_or_else(|| name.id())
}
