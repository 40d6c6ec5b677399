use std::{fs, io, path::Path, time::Duration};

/// Smallest accepted `max_visible`
pub const MIN_VISIBLE: u32 = 1;

/// Largest `max_visible` accepted from a config file
pub const MAX_VISIBLE: u32 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to access config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct ToastsConfig {
    /// The maximum number of toasts that can be displayed at once.
    #[serde(default = "default_max_visible")]
    pub max_visible: u32,
    /// Whether an identical toast inside the deduplication window refreshes the existing one.
    #[serde(default = "default_true")]
    pub deduplication_enabled: bool,
    /// Window in milliseconds during which an identical toast is treated as a duplicate.
    #[serde(default = "default_dedup_window_ms")]
    pub dedup_window_ms: u64,
    /// Time in milliseconds a toast stays on screen.
    #[serde(default = "default_auto_dismiss_ms")]
    pub auto_dismiss_ms: u64,
    /// Grace period in milliseconds for the exit transition before the slot is reclaimed.
    #[serde(default = "default_exit_animation_ms")]
    pub exit_animation_ms: u64,
    /// Override for the system reduced-motion preference (`None` follows the system).
    #[serde(default)]
    pub reduced_motion: Option<bool>,
}

impl Default for ToastsConfig {
    fn default() -> Self {
        Self {
            max_visible: default_max_visible(),
            deduplication_enabled: default_true(),
            dedup_window_ms: default_dedup_window_ms(),
            auto_dismiss_ms: default_auto_dismiss_ms(),
            exit_animation_ms: default_exit_animation_ms(),
            reduced_motion: None,
        }
    }
}

impl ToastsConfig {
    /// Load a config file, clamping `max_visible` into the accepted range
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;

        let clamped = clamp_max_visible(config.max_visible);
        if clamped != config.max_visible {
            tracing::warn!(
                "max_visible {} out of range, using {}",
                config.max_visible,
                clamped
            );
            config.max_visible = clamped;
        }
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let io_err = |source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        };
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, json).map_err(io_err)
    }

    pub fn dedup_window(&self) -> Duration {
        Duration::from_millis(self.dedup_window_ms)
    }

    /// Full delay from admission to removal: visible time plus the exit transition
    pub fn dismiss_delay(&self) -> Duration {
        Duration::from_millis(self.auto_dismiss_ms.saturating_add(self.exit_animation_ms))
    }

    pub fn effective_reduced_motion(&self, system_prefers: bool) -> bool {
        self.reduced_motion.unwrap_or(system_prefers)
    }

    pub fn apply(&mut self, update: &ConfigUpdate) {
        if let Some(max_visible) = update.max_visible {
            self.max_visible = max_visible.max(MIN_VISIBLE);
        }
        if let Some(enabled) = update.deduplication_enabled {
            self.deduplication_enabled = enabled;
        }
    }
}

/// Runtime change to the live-mutable settings
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ConfigUpdate {
    #[serde(default)]
    pub max_visible: Option<u32>,
    #[serde(default)]
    pub deduplication_enabled: Option<bool>,
}

impl ConfigUpdate {
    pub fn max_visible(max_visible: u32) -> Self {
        Self {
            max_visible: Some(max_visible),
            ..Self::default()
        }
    }

    pub fn deduplication(enabled: bool) -> Self {
        Self {
            deduplication_enabled: Some(enabled),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.max_visible.is_none() && self.deduplication_enabled.is_none()
    }
}

pub fn clamp_max_visible(value: u32) -> u32 {
    value.clamp(MIN_VISIBLE, MAX_VISIBLE)
}

// Default value helpers for serde
const fn default_true() -> bool {
    true
}

const fn default_max_visible() -> u32 {
    3
}

const fn default_dedup_window_ms() -> u64 {
    3000
}

const fn default_auto_dismiss_ms() -> u64 {
    3000
}

const fn default_exit_animation_ms() -> u64 {
    200
}
