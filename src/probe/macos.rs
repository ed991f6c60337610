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

use crate::config::MacOsConfig;
use crate::error::Result;
use crate::models::{Architecture, JvmInstallation, ProbeSource};
use crate::platform::{canonical_home, has_java_launcher};
use crate::probe::{JvmProbe, child_directories, version_from_dir_name};
use crate::release::ReleaseInfo;
use crate::version::JavaVersion;
use log::debug;
use std::path::{Path, PathBuf};

const USER_BUNDLE_ROOT: &str = "Library/Java/JavaVirtualMachines";

/// Finds `.jdk` and `.jre` bundles in the JavaVirtualMachines folders.
pub struct MacOsProbe {
    roots: Vec<PathBuf>,
}

struct Bundle {
    java_home: PathBuf,
    runtime_version: String,
    version: JavaVersion,
    architecture: Architecture,
    implementor: Option<String>,
}

impl MacOsProbe {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// Configured roots plus `~/Library/Java/JavaVirtualMachines` when enabled.
    pub fn from_config(config: &MacOsConfig) -> Self {
        let mut roots = config.roots.clone();
        if config.include_user_bundles
            && let Some(home) = dirs::home_dir()
        {
            roots.push(home.join(USER_BUNDLE_ROOT));
        }
        Self::new(roots)
    }

    fn inspect(bundle: &Path) -> Option<Bundle> {
        let home = bundle.join("Contents").join("Home");
        if !has_java_launcher(&home) {
            debug!("Skipping {}: no Contents/Home/bin/java", bundle.display());
            return None;
        }

        let java_home = canonical_home(&home);
        let release = ReleaseInfo::read(&java_home).unwrap_or_else(|e| {
            debug!("Ignoring unreadable release file in {}: {e}", java_home.display());
            None
        });

        // "jdk1.8.0_311.jdk" -> "jdk1.8.0_311"
        let bundle_name = bundle.file_stem()?.to_string_lossy().into_owned();
        let from_release = release
            .as_ref()
            .and_then(|r| Some((r.display_version()?.to_string(), r.version()?)));
        let Some((runtime_version, version)) =
            from_release.or_else(|| version_from_dir_name(&bundle_name))
        else {
            debug!("Skipping {}: cannot determine version", bundle.display());
            return None;
        };

        Some(Bundle {
            java_home,
            runtime_version,
            version,
            architecture: release
                .as_ref()
                .map(ReleaseInfo::architecture)
                .unwrap_or(Architecture::Unknown),
            implementor: release.and_then(|r| r.implementor),
        })
    }
}

impl JvmProbe for MacOsProbe {
    fn name(&self) -> &'static str {
        "macos"
    }

    fn find_candidates(&self) -> Result<Vec<JvmInstallation>> {
        let bundles: Vec<Bundle> = self
            .roots
            .iter()
            .flat_map(|root| child_directories(root))
            .filter_map(|bundle| Self::inspect(&bundle))
            .collect();

        // Without a user preference the OS picks the newest installed JVM
        let default_index = bundles
            .iter()
            .enumerate()
            .rev()
            .max_by(|(_, a), (_, b)| a.version.cmp(&b.version))
            .map(|(index, _)| index);

        let candidates: Vec<JvmInstallation> = bundles
            .into_iter()
            .enumerate()
            .map(|(index, bundle)| {
                JvmInstallation::new(
                    bundle.java_home,
                    bundle.runtime_version,
                    bundle.version,
                    Some(index) == default_index,
                    bundle.architecture,
                    ProbeSource::MacOs,
                )
                .with_implementor(bundle.implementor)
            })
            .collect();

        debug!("macOS probe found {} candidate(s)", candidates.len());
        Ok(candidates)
    }
}
