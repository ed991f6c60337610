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

//! Platform specific strategies for enumerating JVM installations.
//!
//! A probe never runs a discovered JVM. Everything it reports is read from
//! the filesystem or the registry.

pub mod linux;
pub mod macos;
pub mod windows;

use crate::error::Result;
use crate::models::{Architecture, JvmInstallation};
use crate::version::JavaVersion;
use log::debug;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use walkdir::WalkDir;

pub use linux::LinuxProbe;
pub use macos::MacOsProbe;
pub use windows::WindowsProbe;

pub trait JvmProbe: Send + Sync {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Enumerate candidate installations. A missing root yields an empty
    /// list; a lookup mechanism that cannot be used at all is an error.
    fn find_candidates(&self) -> Result<Vec<JvmInstallation>>;
}

/// Direct child directories of `root`, skipping hidden entries and symlinks.
pub(crate) fn child_directories(root: &Path) -> Vec<PathBuf> {
    if !root.is_dir() {
        debug!("Skipping missing JVM root {}", root.display());
        return Vec::new();
    }

    let mut dirs = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Skipping unreadable entry under {}: {e}", root.display());
                continue;
            }
        };

        let hidden = entry
            .file_name()
            .to_str()
            .map(|n| n.starts_with('.'))
            .unwrap_or(false);
        if hidden || entry.path_is_symlink() || !entry.file_type().is_dir() {
            continue;
        }

        dirs.push(entry.into_path());
    }
    dirs
}

/// Extract a version from an installation directory name such as
/// `java-17-openjdk-amd64`, `jdk-21.0.1`, `jdk1.8.0_311` or `temurin-17`.
///
/// Returns the matched text alongside the parsed version.
pub fn version_from_dir_name(name: &str) -> Option<(String, JavaVersion)> {
    name.split('-').find_map(|token| {
        let candidate = ["jdk", "jre"]
            .iter()
            .find_map(|prefix| token.strip_prefix(prefix))
            .unwrap_or(token);

        if !candidate.starts_with(|c: char| c.is_ascii_digit()) {
            return None;
        }

        JavaVersion::from_str(candidate)
            .ok()
            .map(|version| (candidate.to_string(), version))
    })
}

/// Architecture suffix of a directory name, e.g. `java-11-openjdk-i386`.
pub fn architecture_from_dir_name(name: &str) -> Architecture {
    name.split(['-', '.'])
        .map(Architecture::from_arch_name)
        .find(|arch| *arch != Architecture::Unknown)
        .unwrap_or(Architecture::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_version_from_dir_name() {
        let cases = [
            ("java-17-openjdk-amd64", "17", 17),
            ("jdk-21.0.1", "21.0.1", 21),
            ("java-1.8.0-openjdk-amd64", "1.8.0", 8),
            ("jdk1.8.0_311", "1.8.0_311", 8),
            ("temurin-17", "17", 17),
            ("openjdk-11", "11", 11),
            ("1.6.0", "1.6.0", 6),
        ];

        for (name, text, major) in cases {
            let (found, version) = version_from_dir_name(name).unwrap();
            assert_eq!(found, text, "{name}");
            assert_eq!(version.major(), major, "{name}");
        }

        assert!(version_from_dir_name("default-java").is_none());
        assert!(version_from_dir_name("java-openjdk-amd64").is_none());
    }

    #[test]
    fn test_architecture_from_dir_name() {
        assert_eq!(
            architecture_from_dir_name("java-17-openjdk-amd64"),
            Architecture::X64
        );
        assert_eq!(
            architecture_from_dir_name("java-11-openjdk-i386"),
            Architecture::X86
        );
        assert_eq!(
            architecture_from_dir_name("java-1.8.0-openjdk-1.8.0.312.b07-2.el8.x86_64"),
            Architecture::X64
        );
        assert_eq!(architecture_from_dir_name("jdk-21"), Architecture::Unknown);
    }

    #[test]
    fn test_child_directories_skips_files_and_hidden() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("jdk-21")).unwrap();
        fs::create_dir_all(root.join(".hidden")).unwrap();
        fs::write(root.join("README"), "").unwrap();

        let dirs = child_directories(root);
        assert_eq!(dirs, vec![root.join("jdk-21")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_child_directories_skips_symlinks() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("java-17-openjdk-amd64")).unwrap();
        std::os::unix::fs::symlink(
            root.join("java-17-openjdk-amd64"),
            root.join("default-java"),
        )
        .unwrap();

        let dirs = child_directories(root);
        assert_eq!(dirs, vec![root.join("java-17-openjdk-amd64")]);
    }

    #[test]
    fn test_child_directories_missing_root() {
        assert!(child_directories(Path::new("/no/such/root")).is_empty());
    }
}
