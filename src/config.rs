// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::error::{LocatorError, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.toml";
const HOME_ENV: &str = "JVM_LOCATOR_HOME";
const ENV_PREFIX: &str = "JVM_LOCATOR";
const DEFAULT_HOME_DIR: &str = ".jvm-locator";

const DEFAULT_LINUX_ROOTS: [&str; 1] = ["/usr/lib/jvm"];
const DEFAULT_ALTERNATIVES_LINK: &str = "/etc/alternatives/java";
const DEFAULT_MACOS_ROOTS: [&str; 2] = [
    "/Library/Java/JavaVirtualMachines",
    "/System/Library/Java/JavaVirtualMachines",
];

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LocatorConfig {
    #[serde(default)]
    pub linux: LinuxConfig,

    #[serde(default)]
    pub macos: MacOsConfig,

    #[serde(default)]
    pub windows: WindowsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinuxConfig {
    #[serde(default = "default_linux_roots")]
    pub roots: Vec<PathBuf>,

    #[serde(default = "default_alternatives_link")]
    pub alternatives_link: PathBuf,
}

impl Default for LinuxConfig {
    fn default() -> Self {
        Self {
            roots: default_linux_roots(),
            alternatives_link: default_alternatives_link(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacOsConfig {
    #[serde(default = "default_macos_roots")]
    pub roots: Vec<PathBuf>,

    #[serde(default = "default_true")]
    pub include_user_bundles: bool,
}

impl Default for MacOsConfig {
    fn default() -> Self {
        Self {
            roots: default_macos_roots(),
            include_user_bundles: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowsConfig {
    #[serde(default = "default_true")]
    pub include_jre: bool,
}

impl Default for WindowsConfig {
    fn default() -> Self {
        Self { include_jre: true }
    }
}

fn default_linux_roots() -> Vec<PathBuf> {
    DEFAULT_LINUX_ROOTS.iter().map(PathBuf::from).collect()
}

fn default_alternatives_link() -> PathBuf {
    PathBuf::from(DEFAULT_ALTERNATIVES_LINK)
}

fn default_macos_roots() -> Vec<PathBuf> {
    DEFAULT_MACOS_ROOTS.iter().map(PathBuf::from).collect()
}

fn default_true() -> bool {
    true
}

/// Load the configuration from `$JVM_LOCATOR_HOME` (default `~/.jvm-locator`).
pub fn new_locator_config() -> Result<LocatorConfig> {
    LocatorConfig::load(&locator_home()?)
}

fn locator_home() -> Result<PathBuf> {
    if let Some(home) = env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }

    dirs::home_dir()
        .map(|home| home.join(DEFAULT_HOME_DIR))
        .ok_or_else(|| {
            LocatorError::ConfigError(format!(
                "Cannot determine the home directory; set {HOME_ENV}"
            ))
        })
}

impl LocatorConfig {
    /// Defaults, overlaid by `<home>/config.toml`, overlaid by
    /// `JVM_LOCATOR_*` environment variables.
    pub fn load(home: &Path) -> Result<Self> {
        let config_path = home.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            log::debug!("Loading config from {config_path:?}");
        } else {
            log::debug!("Config file not found at {config_path:?}, using defaults");
        }

        let settings = Config::builder()
            .add_source(
                File::from(config_path.as_path())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("linux.roots")
                    .with_list_parse_key("macos.roots")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| LocatorError::ConfigError(format!("Failed to load config: {e}")))?;

        settings
            .try_deserialize()
            .map_err(|e| LocatorError::ConfigError(format!("Failed to parse config: {e}")))
    }
}
