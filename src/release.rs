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

//! Reader for the `release` file found at the root of every JDK and JRE.
//!
//! The file is a list of `KEY="value"` lines, for example:
//!
//! ```text
//! IMPLEMENTOR="Eclipse Adoptium"
//! JAVA_VERSION="17.0.2"
//! JAVA_RUNTIME_VERSION="17.0.2+8"
//! OS_ARCH="x86_64"
//! ```

use crate::error::Result;
use crate::models::Architecture;
use crate::version::JavaVersion;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

pub const RELEASE_FILE_NAME: &str = "release";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseInfo {
    pub java_version: Option<String>,
    pub runtime_version: Option<String>,
    pub implementor: Option<String>,
    pub os_arch: Option<String>,
}

impl ReleaseInfo {
    /// Reads `<java_home>/release`. Returns `Ok(None)` when the file is absent.
    pub fn read(java_home: &Path) -> Result<Option<Self>> {
        let path = java_home.join(RELEASE_FILE_NAME);
        if !path.is_file() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)?;
        log::trace!("Read release file {}", path.display());
        Ok(Some(Self::parse(&contents)))
    }

    pub fn parse(contents: &str) -> Self {
        let values: HashMap<&str, String> = contents
            .lines()
            .filter_map(|line| {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    return None;
                }
                let (key, value) = line.split_once('=')?;
                let value = value.trim().trim_matches('"').to_string();
                Some((key.trim(), value))
            })
            .collect();

        let take = |key: &str| values.get(key).filter(|v| !v.is_empty()).cloned();

        ReleaseInfo {
            java_version: take("JAVA_VERSION"),
            runtime_version: take("JAVA_RUNTIME_VERSION"),
            implementor: take("IMPLEMENTOR"),
            os_arch: take("OS_ARCH"),
        }
    }

    /// The most specific version string available.
    pub fn display_version(&self) -> Option<&str> {
        self.runtime_version
            .as_deref()
            .or(self.java_version.as_deref())
    }

    pub fn version(&self) -> Option<JavaVersion> {
        // JAVA_RUNTIME_VERSION can carry vendor suffixes that do not parse
        [self.runtime_version.as_deref(), self.java_version.as_deref()]
            .into_iter()
            .flatten()
            .find_map(|s| JavaVersion::from_str(s).ok())
    }

    pub fn architecture(&self) -> Architecture {
        self.os_arch
            .as_deref()
            .map(Architecture::from_arch_name)
            .unwrap_or(Architecture::Unknown)
    }
}
