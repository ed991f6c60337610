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

use crate::config::LinuxConfig;
use crate::current::{home_of_launcher, normalize_jre_home};
use crate::error::Result;
use crate::models::{Architecture, JvmInstallation, ProbeSource};
use crate::platform::{canonical_home, has_java_launcher};
use crate::probe::{JvmProbe, architecture_from_dir_name, child_directories, version_from_dir_name};
use crate::release::ReleaseInfo;
use log::debug;
use std::path::{Path, PathBuf};

const DEFAULT_JAVA_LINK: &str = "default-java";

/// Finds JVMs installed by distribution packages under `/usr/lib/jvm`.
pub struct LinuxProbe {
    roots: Vec<PathBuf>,
    alternatives_link: PathBuf,
}

impl LinuxProbe {
    pub fn new(roots: Vec<PathBuf>, alternatives_link: PathBuf) -> Self {
        Self {
            roots,
            alternatives_link,
        }
    }

    pub fn from_config(config: &LinuxConfig) -> Self {
        Self::new(config.roots.clone(), config.alternatives_link.clone())
    }

    /// Home selected by Debian's `default-java` link, else by the `java`
    /// alternative.
    fn default_home(&self) -> Option<PathBuf> {
        for root in &self.roots {
            let link = root.join(DEFAULT_JAVA_LINK);
            if link.exists() {
                let home = canonical_home(&link);
                debug!("Default JVM from {}: {}", link.display(), home.display());
                return Some(home);
            }
        }

        if !self.alternatives_link.exists() {
            return None;
        }
        // JRE-only packages register <home>/jre/bin/java
        let home = normalize_jre_home(&home_of_launcher(&self.alternatives_link).ok()?);
        debug!(
            "Default JVM from {}: {}",
            self.alternatives_link.display(),
            home.display()
        );
        Some(home)
    }

    fn inspect(&self, dir: &Path, default_home: Option<&Path>) -> Option<JvmInstallation> {
        if !has_java_launcher(dir) {
            debug!("Skipping {}: no java launcher", dir.display());
            return None;
        }

        let dir_name = dir.file_name()?.to_string_lossy().into_owned();
        let java_home = canonical_home(dir);

        let release = ReleaseInfo::read(&java_home).unwrap_or_else(|e| {
            debug!("Ignoring unreadable release file in {}: {e}", java_home.display());
            None
        });

        let from_release = release
            .as_ref()
            .and_then(|r| Some((r.display_version()?.to_string(), r.version()?)));
        let Some((runtime_version, version)) =
            from_release.or_else(|| version_from_dir_name(&dir_name))
        else {
            debug!("Skipping {}: cannot determine version", dir.display());
            return None;
        };

        let architecture = match release.as_ref().map(ReleaseInfo::architecture) {
            Some(arch) if arch != Architecture::Unknown => arch,
            _ => architecture_from_dir_name(&dir_name),
        };

        let is_default = default_home == Some(java_home.as_path());
        let implementor = release.and_then(|r| r.implementor);

        Some(
            JvmInstallation::new(
                java_home,
                runtime_version,
                version,
                is_default,
                architecture,
                ProbeSource::Linux,
            )
            .with_implementor(implementor),
        )
    }
}

impl JvmProbe for LinuxProbe {
    fn name(&self) -> &'static str {
        "linux"
    }

    fn find_candidates(&self) -> Result<Vec<JvmInstallation>> {
        let default_home = self.default_home();

        let candidates: Vec<JvmInstallation> = self
            .roots
            .iter()
            .flat_map(|root| child_directories(root))
            .filter_map(|dir| self.inspect(&dir, default_home.as_deref()))
            .collect();

        debug!("Linux probe found {} candidate(s)", candidates.len());
        Ok(candidates)
    }
}
