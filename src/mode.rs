use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const HOME_ROUTE: &str = "/";
pub const GHOST_ROUTE: &str = "/tunic";

/// Which variant of the garment is on display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Normal,
    Ghost,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 2] = [DisplayMode::Normal, DisplayMode::Ghost];

    /// Mode shown at `path`, or `None` when no model is routed there
    pub fn from_route(path: &str) -> Option<Self> {
        match normalize_route(path).as_str() {
            HOME_ROUTE => Some(DisplayMode::Normal),
            GHOST_ROUTE => Some(DisplayMode::Ghost),
            _ => None,
        }
    }

    pub const fn route(self) -> &'static str {
        match self {
            DisplayMode::Normal => HOME_ROUTE,
            DisplayMode::Ghost => GHOST_ROUTE,
        }
    }

    /// Navigation link text
    pub const fn label(self) -> &'static str {
        match self {
            DisplayMode::Normal => "Tunic",
            DisplayMode::Ghost => "Ghost Tunic",
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            DisplayMode::Normal => DisplayMode::Ghost,
            DisplayMode::Ghost => DisplayMode::Normal,
        }
    }

    /// Stable slot for per-variant state
    pub const fn index(self) -> usize {
        match self {
            DisplayMode::Normal => 0,
            DisplayMode::Ghost => 1,
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DisplayMode {
    type Err = String;

    /// Accepts `normal`/`ghost` or one of the two routes
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(DisplayMode::Normal),
            "ghost" => Ok(DisplayMode::Ghost),
            other => DisplayMode::from_route(other)
                .ok_or_else(|| format!("unknown display mode '{other}'")),
        }
    }
}

/// Leading slash enforced, trailing slash dropped (except for the root)
pub fn normalize_route(path: &str) -> String {
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        HOME_ROUTE.to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Current location; the only writer of the display mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    location: String,
}

impl Navigator {
    pub fn new(initial: &str) -> Self {
        Self {
            location: normalize_route(initial),
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn is_home(&self) -> bool {
        self.location == HOME_ROUTE
    }

    pub fn mode(&self) -> Option<DisplayMode> {
        DisplayMode::from_route(&self.location)
    }

    /// Returns whether the location changed
    pub fn navigate(&mut self, path: &str) -> bool {
        let next = normalize_route(path);
        if next == self.location {
            return false;
        }
        log::debug!("navigate {} -> {}", self.location, next);
        self.location = next;
        true
    }

    /// Flips between the two model routes; from an unrouted location goes home
    pub fn toggle(&mut self) -> bool {
        let next = match self.mode() {
            Some(mode) => mode.toggled(),
            None => DisplayMode::Normal,
        };
        self.navigate(next.route())
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(HOME_ROUTE)
    }
}
