use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TrackerError;

/// Map themes offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MapTheme {
    Satellite,
    Dark,
    Light,
    Outdoors,
    #[default]
    Streets,
}

impl MapTheme {
    /// Every theme, in button order
    pub const ALL: [MapTheme; 5] = [
        MapTheme::Satellite,
        MapTheme::Dark,
        MapTheme::Light,
        MapTheme::Outdoors,
        MapTheme::Streets,
    ];

    /// Theme used for any name that doesn't match
    pub const FALLBACK: MapTheme = MapTheme::Streets;

    /// Button label for this theme
    pub fn label(&self) -> &'static str {
        match self {
            Self::Satellite => "Satellite",
            Self::Dark => "Dark",
            Self::Light => "Light",
            Self::Outdoors => "Outdoors",
            Self::Streets => "Streets",
        }
    }

    /// Case-insensitive lookup, `None` when nothing matches
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|theme| theme.label().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for MapTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MapTheme {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| TrackerError::UnknownTheme(s.to_string()))
    }
}

/// Opaque reference to a renderer style
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StyleRef(String);

impl StyleRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StyleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fixed mapping from theme to style reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleCatalog {
    pub satellite: StyleRef,
    pub dark: StyleRef,
    pub light: StyleRef,
    pub outdoors: StyleRef,
    pub streets: StyleRef,
}

impl StyleCatalog {
    pub fn style(&self, theme: MapTheme) -> &StyleRef {
        match theme {
            MapTheme::Satellite => &self.satellite,
            MapTheme::Dark => &self.dark,
            MapTheme::Light => &self.light,
            MapTheme::Outdoors => &self.outdoors,
            MapTheme::Streets => &self.streets,
        }
    }
}

impl Default for StyleCatalog {
    fn default() -> Self {
        Self {
            satellite: StyleRef::new("mapbox://styles/mapbox/satellite-v9"),
            dark: StyleRef::new("mapbox://styles/mapbox/dark-v9"),
            light: StyleRef::new("mapbox://styles/mapbox/light-v9"),
            outdoors: StyleRef::new("mapbox://styles/mapbox/outdoors-v10"),
            streets: StyleRef::new("mapbox://styles/mapbox/streets-v10"),
        }
    }
}

/// Resolves free-form theme names to style references.
///
/// Resolution never fails: unknown names, including the empty string, map to
/// the streets style.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemeSelector {
    catalog: StyleCatalog,
}

impl ThemeSelector {
    pub fn new(catalog: StyleCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &StyleCatalog {
        &self.catalog
    }

    /// Theme a name selects, falling back to streets
    pub fn theme_for(&self, name: &str) -> MapTheme {
        MapTheme::from_name(name).unwrap_or(MapTheme::FALLBACK)
    }

    pub fn resolve(&self, name: &str) -> StyleRef {
        self.catalog.style(self.theme_for(name)).clone()
    }
}
