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

//! Merges what the platform probe reports with the JVM of the current
//! process into one deduplicated, version-sorted list.

use crate::config::LocatorConfig;
use crate::current::{CurrentJvmProvider, EnvironmentCurrentJvm};
use crate::error::Result;
use crate::models::{Architecture, JvmInstallation, OsFamily, ProbeSource};
use crate::platform::{SysinfoSystemInfo, current_os_family, default_registry};
use crate::probe::{JvmProbe, LinuxProbe, MacOsProbe, WindowsProbe};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::PathBuf;
use std::sync::Arc;

/// One optional probe per supported OS family.
#[derive(Default)]
pub struct PlatformProbes {
    pub macos: Option<Box<dyn JvmProbe>>,
    pub windows: Option<Box<dyn JvmProbe>>,
    pub linux: Option<Box<dyn JvmProbe>>,
}

impl PlatformProbes {
    pub fn from_config(config: &LocatorConfig) -> Self {
        Self {
            macos: Some(Box::new(MacOsProbe::from_config(&config.macos))),
            windows: Some(Box::new(WindowsProbe::new(
                default_registry(),
                Arc::new(SysinfoSystemInfo),
                config.windows.include_jre,
            ))),
            linux: Some(Box::new(LinuxProbe::from_config(&config.linux))),
        }
    }

    fn probe_for(&self, os_family: OsFamily) -> Option<&dyn JvmProbe> {
        match os_family {
            OsFamily::MacOs => self.macos.as_deref(),
            OsFamily::Windows => self.windows.as_deref(),
            OsFamily::Linux => self.linux.as_deref(),
            OsFamily::Other => None,
        }
    }
}

pub struct JvmLocator {
    os_family: OsFamily,
    probes: PlatformProbes,
    current: Box<dyn CurrentJvmProvider>,
}

impl JvmLocator {
    pub fn new(
        os_family: OsFamily,
        probes: PlatformProbes,
        current: Box<dyn CurrentJvmProvider>,
    ) -> Self {
        Self {
            os_family,
            probes,
            current,
        }
    }

    /// Locator for the running OS with probes configured from `config`.
    pub fn from_config(config: &LocatorConfig) -> Self {
        Self::new(
            current_os_family(),
            PlatformProbes::from_config(config),
            Box::new(EnvironmentCurrentJvm::new()),
        )
    }

    pub fn os_family(&self) -> OsFamily {
        self.os_family
    }

    /// Find every JVM installed on this machine.
    ///
    /// The result holds one entry per JVM home, always includes the JVM of
    /// the current process and is sorted newest version first, with equal
    /// versions ordered by home path.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::LocatorError::CurrentJvmUnavailable`] when the
    /// current JVM cannot be determined. Probe failures are not errors.
    pub fn discover(&self) -> Result<Vec<JvmInstallation>> {
        let candidates = self.probe_candidates();

        let mut by_home: HashMap<PathBuf, JvmInstallation> = HashMap::new();
        for candidate in candidates {
            match by_home.entry(candidate.java_home().to_path_buf()) {
                Entry::Occupied(existing) => {
                    debug!(
                        "Ignoring duplicate {} ({}); already found as {}",
                        existing.key().display(),
                        candidate.runtime_version(),
                        existing.get().runtime_version()
                    );
                }
                Entry::Vacant(slot) => {
                    slot.insert(candidate);
                }
            }
        }

        let current = self.current.current_jvm()?;
        match by_home.entry(current.java_home.clone()) {
            Entry::Occupied(_) => {
                debug!("Current JVM {} was found by the probe", current.java_home.display());
            }
            Entry::Vacant(slot) => {
                debug!("Adding current JVM {}", current.java_home.display());
                slot.insert(JvmInstallation::new(
                    current.java_home,
                    current.version_string,
                    current.version,
                    false,
                    Architecture::Unknown,
                    ProbeSource::CurrentProcess,
                ));
            }
        }

        let mut installations: Vec<JvmInstallation> = by_home.into_values().collect();
        installations.sort_by(|a, b| {
            b.version()
                .cmp(a.version())
                .then_with(|| a.java_home().cmp(b.java_home()))
        });

        info!("Discovered {} JVM installation(s)", installations.len());
        Ok(installations)
    }

    fn probe_candidates(&self) -> Vec<JvmInstallation> {
        let Some(probe) = self.probes.probe_for(self.os_family) else {
            info!("No JVM probe for OS family {}", self.os_family);
            return Vec::new();
        };

        match probe.find_candidates() {
            Ok(candidates) => {
                debug!("{} probe returned {} candidate(s)", probe.name(), candidates.len());
                candidates
            }
            Err(e) => {
                warn!("{} probe failed, continuing without its results: {e}", probe.name());
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::current::CurrentJvm;
    use crate::error::LocatorError;
    use crate::version::JavaVersion;
    use mockall::mock;
    use std::collections::HashSet;
    use std::str::FromStr;

    mock! {
        Probe {}
        impl JvmProbe for Probe {
            fn name(&self) -> &'static str;
            fn find_candidates(&self) -> Result<Vec<JvmInstallation>>;
        }
    }

    mock! {
        Current {}
        impl CurrentJvmProvider for Current {
            fn current_jvm(&self) -> Result<CurrentJvm>;
        }
    }

    fn installation(home: &str, version: &str) -> JvmInstallation {
        JvmInstallation::new(
            PathBuf::from(home),
            version.to_string(),
            JavaVersion::from_str(version).unwrap(),
            false,
            Architecture::X64,
            ProbeSource::Linux,
        )
    }

    fn probe_returning(candidates: Vec<JvmInstallation>) -> Box<dyn JvmProbe> {
        let mut probe = MockProbe::new();
        probe.expect_name().return_const("mock");
        probe
            .expect_find_candidates()
            .times(1)
            .returning(move || Ok(candidates.clone()));
        Box::new(probe)
    }

    fn failing_probe() -> Box<dyn JvmProbe> {
        let mut probe = MockProbe::new();
        probe.expect_name().return_const("mock");
        probe.expect_find_candidates().times(1).returning(|| {
            Err(LocatorError::RegistryUnavailable(
                "no registry in tests".to_string(),
            ))
        });
        Box::new(probe)
    }

    fn unused_probe() -> Box<dyn JvmProbe> {
        let mut probe = MockProbe::new();
        probe.expect_name().return_const("unused");
        probe.expect_find_candidates().never();
        Box::new(probe)
    }

    fn current_at(home: &str, version: &str) -> Box<dyn CurrentJvmProvider> {
        let current = CurrentJvm {
            java_home: PathBuf::from(home),
            version: JavaVersion::from_str(version).unwrap(),
            version_string: version.to_string(),
        };
        let mut provider = MockCurrent::new();
        provider
            .expect_current_jvm()
            .times(1)
            .returning(move || Ok(current.clone()));
        Box::new(provider)
    }

    fn linux_locator(
        candidates: Vec<JvmInstallation>,
        current: Box<dyn CurrentJvmProvider>,
    ) -> JvmLocator {
        JvmLocator::new(
            OsFamily::Linux,
            PlatformProbes {
                linux: Some(probe_returning(candidates)),
                ..Default::default()
            },
            current,
        )
    }

    fn homes(jvms: &[JvmInstallation]) -> Vec<PathBuf> {
        jvms.iter().map(|j| j.java_home().to_path_buf()).collect()
    }

    fn assert_sorted_and_unique(jvms: &[JvmInstallation]) {
        assert!(!jvms.is_empty());
        for pair in jvms.windows(2) {
            assert!(pair[0].version() >= pair[1].version());
        }
        let unique: HashSet<_> = jvms.iter().map(|j| j.java_home()).collect();
        assert_eq!(unique.len(), jvms.len());
    }

    #[test]
    fn test_other_os_returns_only_current_jvm() {
        let locator = JvmLocator::new(
            OsFamily::Other,
            PlatformProbes {
                macos: Some(unused_probe()),
                windows: Some(unused_probe()),
                linux: Some(unused_probe()),
            },
            current_at("/opt/jdk17", "17.0.2"),
        );

        let jvms = locator.discover().unwrap();
        assert_eq!(jvms.len(), 1);
        assert_eq!(jvms[0].java_home(), PathBuf::from("/opt/jdk17"));
        assert_eq!(jvms[0].version(), &JavaVersion::new(17, 0, 2));
        assert_eq!(jvms[0].runtime_version(), "17.0.2");
        assert_eq!(jvms[0].architecture(), Architecture::Unknown);
        assert!(!jvms[0].is_system_default());
        assert_eq!(jvms[0].source(), ProbeSource::CurrentProcess);
    }

    #[test]
    fn test_probe_selected_by_os_family() {
        let locator = JvmLocator::new(
            OsFamily::MacOs,
            PlatformProbes {
                macos: Some(probe_returning(vec![installation(
                    "/Library/Java/JavaVirtualMachines/jdk-21.jdk/Contents/Home",
                    "21.0.1",
                )])),
                windows: Some(unused_probe()),
                linux: Some(unused_probe()),
            },
            current_at("/opt/jdk17", "17.0.2"),
        );

        let jvms = locator.discover().unwrap();
        assert_eq!(jvms.len(), 2);
        assert_eq!(jvms[0].version().major(), 21);
    }

    #[test]
    fn test_missing_probe_for_family_is_empty() {
        let locator = JvmLocator::new(
            OsFamily::Windows,
            PlatformProbes::default(),
            current_at(r"C:\Java\jdk17", "17"),
        );

        let jvms = locator.discover().unwrap();
        assert_eq!(homes(&jvms), vec![PathBuf::from(r"C:\Java\jdk17")]);
    }

    #[test]
    fn test_empty_probe_synthesizes_current_jvm() {
        let locator = linux_locator(Vec::new(), current_at("/opt/jdk11", "11.0.20"));

        let jvms = locator.discover().unwrap();
        assert_eq!(jvms.len(), 1);
        assert_eq!(jvms[0].architecture(), Architecture::Unknown);
        assert!(!jvms[0].is_system_default());
    }

    #[test]
    fn test_current_jvm_folded_into_probe_entry() {
        let jdk17 = JvmInstallation::new(
            PathBuf::from("/usr/lib/jvm/java-17"),
            "17.0.1".to_string(),
            JavaVersion::new(17, 0, 1),
            true,
            Architecture::X64,
            ProbeSource::Linux,
        );
        let locator = linux_locator(
            vec![installation("/usr/lib/jvm/java-8", "8u311"), jdk17],
            current_at("/usr/lib/jvm/java-17", "17.0.1"),
        );

        let jvms = locator.discover().unwrap();
        assert_eq!(
            homes(&jvms),
            vec![
                PathBuf::from("/usr/lib/jvm/java-17"),
                PathBuf::from("/usr/lib/jvm/java-8"),
            ]
        );
        assert!(jvms[0].is_system_default());
        assert_eq!(jvms[0].architecture(), Architecture::X64);
        assert_eq!(jvms[0].source(), ProbeSource::Linux);
        assert_eq!(jvms[1].runtime_version(), "8u311");
    }

    #[test]
    fn test_duplicate_homes_keep_first_candidate() {
        let locator = linux_locator(
            vec![
                installation(r"C:\Java\jdk21", "21.0.0"),
                installation(r"C:\Java\jdk21", "21"),
            ],
            current_at(r"C:\Java\jdk17", "17"),
        );

        let jvms = locator.discover().unwrap();
        assert_eq!(jvms.len(), 2);
        let jdk21: Vec<_> = jvms
            .iter()
            .filter(|j| j.java_home() == PathBuf::from(r"C:\Java\jdk21"))
            .collect();
        assert_eq!(jdk21.len(), 1);
        assert_eq!(jdk21[0].runtime_version(), "21.0.0");
    }

    #[test]
    fn test_sorted_newest_first() {
        let locator = linux_locator(
            vec![
                installation("/jvm/8", "1.8.0_311"),
                installation("/jvm/21", "21.0.1"),
                installation("/jvm/11", "11.0.20"),
                installation("/jvm/21-ea", "21-ea"),
                installation("/jvm/17", "17.0.9+9"),
            ],
            current_at("/jvm/17", "17.0.9+9"),
        );

        let jvms = locator.discover().unwrap();
        assert_sorted_and_unique(&jvms);
        assert_eq!(
            homes(&jvms),
            ["/jvm/21", "/jvm/21-ea", "/jvm/17", "/jvm/11", "/jvm/8"]
                .iter()
                .map(PathBuf::from)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_equal_versions_ordered_by_home() {
        let locator = linux_locator(
            vec![
                installation("/jvm/zulu-17", "17.0.2"),
                installation("/jvm/temurin-17", "17.0.2"),
            ],
            current_at("/jvm/corretto-17", "17.0.2"),
        );

        let jvms = locator.discover().unwrap();
        assert_eq!(
            homes(&jvms),
            vec![
                PathBuf::from("/jvm/corretto-17"),
                PathBuf::from("/jvm/temurin-17"),
                PathBuf::from("/jvm/zulu-17"),
            ]
        );
    }

    #[test]
    fn test_probe_failure_degrades_to_empty() {
        let locator = JvmLocator::new(
            OsFamily::Windows,
            PlatformProbes {
                windows: Some(failing_probe()),
                ..Default::default()
            },
            current_at(r"C:\Java\jdk17", "17"),
        );

        let jvms = locator.discover().unwrap();
        assert_eq!(jvms.len(), 1);
        assert_eq!(jvms[0].source(), ProbeSource::CurrentProcess);
    }

    #[test]
    fn test_current_jvm_failure_is_fatal() {
        let mut provider = MockCurrent::new();
        provider.expect_current_jvm().times(1).returning(|| {
            Err(LocatorError::CurrentJvmUnavailable(
                "JAVA_HOME is not set".to_string(),
            ))
        });
        let locator = linux_locator(
            vec![installation("/usr/lib/jvm/java-17", "17.0.1")],
            Box::new(provider),
        );

        assert!(matches!(
            locator.discover(),
            Err(LocatorError::CurrentJvmUnavailable(_))
        ));
    }

    #[test]
    fn test_current_jvm_present_exactly_once() {
        let locator = linux_locator(
            vec![
                installation("/jvm/a", "11"),
                installation("/jvm/b", "17"),
                installation("/jvm/a", "12"),
            ],
            current_at("/jvm/b", "17"),
        );

        let jvms = locator.discover().unwrap();
        assert_sorted_and_unique(&jvms);
        assert_eq!(
            jvms.iter()
                .filter(|j| j.java_home() == PathBuf::from("/jvm/b"))
                .count(),
            1
        );
    }

    #[test]
    fn test_linux_probe_end_to_end() {
        use crate::platform::{canonical_home, java_executable_name};
        use std::fs;
        use tempfile::TempDir;

        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        for (name, version) in [
            ("java-11-openjdk-amd64", "11.0.20"),
            ("java-17-openjdk-amd64", "17.0.8"),
        ] {
            let home = root.join(name);
            fs::create_dir_all(home.join("bin")).unwrap();
            fs::write(home.join("bin").join(java_executable_name()), "").unwrap();
            fs::write(home.join("release"), format!("JAVA_VERSION=\"{version}\"\n")).unwrap();
        }

        let current_home = canonical_home(&root.join("java-17-openjdk-amd64"));
        let locator = JvmLocator::new(
            OsFamily::Linux,
            PlatformProbes {
                linux: Some(Box::new(LinuxProbe::new(
                    vec![root.to_path_buf()],
                    root.join("no-alternatives"),
                ))),
                ..Default::default()
            },
            current_at(current_home.to_str().unwrap(), "17.0.8"),
        );

        let jvms = locator.discover().unwrap();
        assert_eq!(jvms.len(), 2);
        assert_eq!(jvms[0].java_home(), current_home);
        assert_eq!(jvms[0].source(), ProbeSource::Linux);
        assert_eq!(jvms[0].architecture(), Architecture::X64);
        assert_eq!(jvms[1].version().major(), 11);
    }

    #[cfg(unix)]
    #[test]
    #[serial_test::serial]
    fn test_jre_only_current_jvm_on_path_matches_probe_entry() {
        use crate::platform::canonical_home;
        use std::env;
        use std::ffi::OsString;
        use std::fs;
        use std::os::unix::fs::PermissionsExt;
        use tempfile::TempDir;

        struct RestoreEnv(Vec<(&'static str, Option<OsString>)>);

        impl Drop for RestoreEnv {
            fn drop(&mut self) {
                for (key, value) in &self.0 {
                    unsafe {
                        match value {
                            Some(value) => env::set_var(key, value),
                            None => env::remove_var(key),
                        }
                    }
                }
            }
        }

        let _restore = RestoreEnv(
            ["JAVA_HOME", "PATH"]
                .into_iter()
                .map(|key| (key, env::var_os(key)))
                .collect(),
        );

        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("jvm");
        let package = root.join("java-8-openjdk-amd64");
        let launcher = package.join("jre").join("bin").join("java");
        fs::create_dir_all(launcher.parent().unwrap()).unwrap();
        fs::write(&launcher, "").unwrap();
        fs::set_permissions(&launcher, fs::Permissions::from_mode(0o755)).unwrap();
        fs::write(package.join("release"), "JAVA_VERSION=\"1.8.0_392\"\n").unwrap();

        let path_dir = temp_dir.path().join("path-bin");
        fs::create_dir_all(&path_dir).unwrap();
        std::os::unix::fs::symlink(&launcher, path_dir.join("java")).unwrap();

        unsafe {
            env::remove_var("JAVA_HOME");
            env::set_var("PATH", &path_dir);
        }

        let locator = JvmLocator::new(
            OsFamily::Linux,
            PlatformProbes {
                linux: Some(Box::new(LinuxProbe::new(
                    vec![root.clone()],
                    temp_dir.path().join("no-alternatives"),
                ))),
                ..Default::default()
            },
            Box::new(EnvironmentCurrentJvm::new()),
        );

        let jvms = locator.discover().unwrap();
        assert_eq!(jvms.len(), 1);
        assert_eq!(jvms[0].java_home(), canonical_home(&package));
        assert_eq!(jvms[0].source(), ProbeSource::Linux);
        assert_eq!(jvms[0].version().major(), 8);
    }
}
