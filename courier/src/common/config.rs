/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

use std::path::Path;
use std::time::Duration;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// Configuration for the Courier runtime.
///
/// Loaded from `config.toml` in the XDG configuration directory for the `courier`
/// prefix. Every field has a default, so a file only needs to name what it changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourierConfig {
    /// Timeout configuration
    pub timeouts: TimeoutConfig,
    /// Capacity configuration
    pub limits: LimitsConfig,
    /// Default values configuration
    pub defaults: DefaultsConfig,
}

/// Timeout-related configuration values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// How long `ActorHandle::stop` waits for an actor's run-loop to finish, in milliseconds
    pub actor_shutdown_ms: u64,
    /// How long `ActorRuntime::shutdown_all` waits for all actors, in milliseconds
    pub system_shutdown_ms: u64,
}

/// Capacity configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Mailbox backlog past which a warning is logged. Mailboxes are unbounded; this
    /// only flags actors falling behind.
    pub mailbox_high_water_mark: usize,
}

/// Default values configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Name given to actors created without one
    pub actor_name: String,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            actor_shutdown_ms: 10_000,
            system_shutdown_ms: 30_000,
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            mailbox_high_water_mark: 1024,
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            actor_name: "actor".to_string(),
        }
    }
}

impl CourierConfig {
    /// Actor shutdown timeout as a `Duration`.
    pub const fn actor_shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.timeouts.actor_shutdown_ms)
    }

    /// System shutdown timeout as a `Duration`.
    pub const fn system_shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.timeouts.system_shutdown_ms)
    }

    /// Loads configuration from XDG-compliant locations.
    ///
    /// Looks for `courier/config.toml` under `$XDG_CONFIG_HOME` (then the XDG config
    /// search path). A missing file yields the defaults; an unreadable or malformed
    /// file is logged and also yields the defaults.
    pub fn load() -> Self {
        let xdg_dirs = match xdg::BaseDirectories::with_prefix("courier") {
            Ok(dirs) => dirs,
            Err(e) => {
                error!("Failed to initialize XDG directories: {}", e);
                return Self::default();
            }
        };

        match xdg_dirs.find_config_file("config.toml") {
            Some(path) => Self::load_from(&path),
            None => {
                info!("No configuration file found, using defaults");
                Self::default()
            }
        }
    }

    /// Loads configuration from an explicit file, falling back to the defaults on any
    /// read or parse failure.
    pub fn load_from(path: &Path) -> Self {
        info!("Loading configuration from: {}", path.display());
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                error!("Failed to read configuration file {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match toml::from_str::<Self>(&contents) {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to parse configuration file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

lazy_static! {
    /// Process-wide configuration loaded from XDG-compliant locations on first use.
    pub static ref CONFIG: CourierConfig = CourierConfig::load();
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::CourierConfig;

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[timeouts]\nactor_shutdown_ms = 250").unwrap();

        let config = CourierConfig::load_from(file.path());
        assert_eq!(config.timeouts.actor_shutdown_ms, 250);
        assert_eq!(config.timeouts.system_shutdown_ms, 30_000);
        assert_eq!(config.limits.mailbox_high_water_mark, 1024);
        assert_eq!(config.defaults.actor_name, "actor");
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[timeouts\nactor_shutdown_ms = ").unwrap();

        assert_eq!(CourierConfig::load_from(file.path()), CourierConfig::default());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CourierConfig::load_from(&dir.path().join("absent.toml"));
        assert_eq!(config, CourierConfig::default());
    }
}
