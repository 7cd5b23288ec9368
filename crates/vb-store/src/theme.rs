//! Persisted theme preference.
//!
//! Stored separately from the board under [`THEME_KEY`] as a bare lowercase
//! word (`light`, `dark`, `system`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::backend::StorageBackend;
use crate::error::StorageError;

/// Storage key of the theme preference.
pub const THEME_KEY: &str = "ui-theme-mode";

/// User-selected appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
    /// Follow the operating system.
    System,
}

impl ThemeMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    /// Resolve `System` against the platform's current scheme.
    #[must_use]
    pub fn effective(self, system_is_dark: bool) -> ThemeMode {
        match self {
            Self::System if system_is_dark => Self::Dark,
            Self::System => Self::Light,
            mode => mode,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" => Ok(Self::System),
            other => Err(format!("unknown theme mode: {other}")),
        }
    }
}

/// Stored preference, or the default when nothing usable is stored.
pub fn load_theme(backend: &dyn StorageBackend) -> ThemeMode {
    match backend.read(THEME_KEY) {
        Ok(Some(raw)) => raw.parse().unwrap_or_else(|e| {
            tracing::warn!("Ignoring stored theme preference: {}", e);
            ThemeMode::default()
        }),
        Ok(None) => ThemeMode::default(),
        Err(e) => {
            tracing::warn!("Failed to read theme preference: {}, using default", e);
            ThemeMode::default()
        }
    }
}

/// Persist the preference.
pub fn save_theme(backend: &dyn StorageBackend, mode: ThemeMode) -> Result<(), StorageError> {
    backend.write(THEME_KEY, mode.as_str())?;
    tracing::info!("Saved theme preference: {}", mode);
    Ok(())
}
