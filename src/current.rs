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

//! The JVM the calling process is configured to run with.
//!
//! A native process has no JVM of its own, so the "current" JVM is the one
//! a Java launch from this process would pick up: `JAVA_HOME` when it is
//! set, otherwise the `java` launcher found on `PATH`.

use crate::error::{LocatorError, Result};
use crate::platform::{canonical_home, java_executable_name};
use crate::release::{RELEASE_FILE_NAME, ReleaseInfo};
use crate::version::JavaVersion;
use log::debug;
use std::env;
use std::path::{Path, PathBuf};

const JAVA_HOME_ENV: &str = "JAVA_HOME";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentJvm {
    pub java_home: PathBuf,
    pub version: JavaVersion,
    pub version_string: String,
}

pub trait CurrentJvmProvider: Send + Sync {
    fn current_jvm(&self) -> Result<CurrentJvm>;
}

/// Resolves the current JVM from `JAVA_HOME` or `PATH` on every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvironmentCurrentJvm;

impl EnvironmentCurrentJvm {
    pub fn new() -> Self {
        Self
    }

    fn locate_home(&self) -> Result<PathBuf> {
        if let Some(java_home) = env::var_os(JAVA_HOME_ENV).filter(|v| !v.is_empty()) {
            let java_home = PathBuf::from(java_home);
            if !java_home.is_dir() {
                return Err(LocatorError::CurrentJvmUnavailable(format!(
                    "JAVA_HOME points to '{}', which is not a directory",
                    java_home.display()
                )));
            }
            debug!("Current JVM from JAVA_HOME: {}", java_home.display());
            return Ok(java_home);
        }

        let launcher = which::which("java").map_err(|e| {
            LocatorError::CurrentJvmUnavailable(format!(
                "JAVA_HOME is not set and no java launcher was found on PATH: {e}"
            ))
        })?;
        debug!("Current JVM from PATH: {}", launcher.display());
        home_of_launcher(&launcher)
    }
}

impl CurrentJvmProvider for EnvironmentCurrentJvm {
    fn current_jvm(&self) -> Result<CurrentJvm> {
        let home = self.locate_home()?;
        describe_home(&home)
    }
}

/// `<home>/bin/java` -> `<home>`, following symlinks such as
/// `/usr/bin/java -> /etc/alternatives/java -> /usr/lib/jvm/.../bin/java`.
pub fn home_of_launcher(launcher: &Path) -> Result<PathBuf> {
    let resolved = canonical_home(launcher);
    resolved
        .parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .ok_or_else(|| {
            LocatorError::CurrentJvmUnavailable(format!(
                "cannot derive a JVM home from launcher '{}'",
                resolved.display()
            ))
        })
}

/// A `jre` directory nested in an installation (`<home>/jre`) is reported as
/// the installation itself when `<home>` has a release file or `bin/java`.
pub fn normalize_jre_home(home: &Path) -> PathBuf {
    let is_jre_dir = home
        .file_name()
        .is_some_and(|name| name.eq_ignore_ascii_case("jre"));

    if is_jre_dir
        && let Some(parent) = home.parent()
        && (parent.join(RELEASE_FILE_NAME).is_file()
            || parent.join("bin").join(java_executable_name()).is_file())
    {
        return parent.to_path_buf();
    }

    home.to_path_buf()
}

/// Read identity and version facts for a JVM home without running it.
pub fn describe_home(home: &Path) -> Result<CurrentJvm> {
    let java_home = normalize_jre_home(&canonical_home(home));

    let release = ReleaseInfo::read(&java_home)
        .map_err(|e| {
            LocatorError::CurrentJvmUnavailable(format!(
                "failed to read release file in '{}': {e}",
                java_home.display()
            ))
        })?
        .ok_or_else(|| {
            LocatorError::CurrentJvmUnavailable(format!(
                "'{}' has no release file; is it a JDK or JRE?",
                java_home.display()
            ))
        })?;

    let version_string = release.display_version().map(str::to_string).ok_or_else(|| {
        LocatorError::CurrentJvmUnavailable(format!(
            "release file in '{}' does not declare a Java version",
            java_home.display()
        ))
    })?;

    let version = release.version().ok_or_else(|| {
        LocatorError::CurrentJvmUnavailable(format!(
            "cannot parse Java version '{version_string}' of '{}'",
            java_home.display()
        ))
    })?;

    Ok(CurrentJvm {
        java_home,
        version,
        version_string,
    })
}
