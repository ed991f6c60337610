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

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated environment for running the binary: an empty config home, empty
/// JVM roots and no JVM on PATH unless a test adds one.
pub struct TestEnv {
    pub home: TempDir,
    pub jvm_root: TempDir,
    pub empty_path: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            home: TempDir::new().expect("Failed to create config home"),
            jvm_root: TempDir::new().expect("Failed to create JVM root"),
            empty_path: TempDir::new().expect("Failed to create PATH directory"),
        }
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("jvm-locator").unwrap();
        cmd.env("JVM_LOCATOR_HOME", self.home.path())
            .env("JVM_LOCATOR_LINUX__ROOTS", self.jvm_root.path())
            .env(
                "JVM_LOCATOR_LINUX__ALTERNATIVES_LINK",
                self.home.path().join("no-alternatives"),
            )
            .env("JVM_LOCATOR_MACOS__ROOTS", self.jvm_root.path())
            .env("JVM_LOCATOR_MACOS__INCLUDE_USER_BUNDLES", "false")
            .env("PATH", self.empty_path.path())
            .env_remove("JAVA_HOME")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Fake JDK directly under the JVM root.
    pub fn add_jdk(&self, name: &str, release: &str) -> PathBuf {
        create_jdk(self.jvm_root.path(), name, release)
    }
}

pub fn create_jdk(root: &Path, name: &str, release: &str) -> PathBuf {
    let home = root.join(name);
    let launcher = if cfg!(windows) { "java.exe" } else { "java" };
    fs::create_dir_all(home.join("bin")).expect("Failed to create bin directory");
    fs::write(home.join("bin").join(launcher), "").expect("Failed to create launcher");
    fs::write(home.join("release"), release).expect("Failed to write release file");
    home
}

/// Path as the binary reports it.
pub fn reported(path: &Path) -> String {
    let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    let text = canonical.display().to_string();
    text.strip_prefix(r"\?\").map(str::to_string).unwrap_or(text)
}
