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

use crate::models::platform::Architecture;
use crate::version::JavaVersion;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Where a [`JvmInstallation`] record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProbeSource {
    Linux,
    MacOs,
    WindowsRegistry,
    CurrentProcess,
}

impl std::fmt::Display for ProbeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let source = match self {
            ProbeSource::Linux => "linux",
            ProbeSource::MacOs => "macos",
            ProbeSource::WindowsRegistry => "registry",
            ProbeSource::CurrentProcess => "current",
        };
        write!(f, "{source}")
    }
}

/// One discovered JVM, identified by its home directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JvmInstallation {
    java_home: PathBuf,
    runtime_version: String,
    version: JavaVersion,
    is_system_default: bool,
    architecture: Architecture,
    #[serde(skip_serializing_if = "Option::is_none")]
    implementor: Option<String>,
    source: ProbeSource,
}

impl JvmInstallation {
    pub fn new(
        java_home: PathBuf,
        runtime_version: String,
        version: JavaVersion,
        is_system_default: bool,
        architecture: Architecture,
        source: ProbeSource,
    ) -> Self {
        Self {
            java_home,
            runtime_version,
            version,
            is_system_default,
            architecture,
            implementor: None,
            source,
        }
    }

    pub fn with_implementor(mut self, implementor: Option<String>) -> Self {
        self.implementor = implementor;
        self
    }

    pub fn java_home(&self) -> &Path {
        &self.java_home
    }

    pub fn runtime_version(&self) -> &str {
        &self.runtime_version
    }

    pub fn version(&self) -> &JavaVersion {
        &self.version
    }

    pub fn is_system_default(&self) -> bool {
        self.is_system_default
    }

    pub fn architecture(&self) -> Architecture {
        self.architecture
    }

    pub fn implementor(&self) -> Option<&str> {
        self.implementor.as_deref()
    }

    pub fn source(&self) -> ProbeSource {
        self.source
    }
}

impl std::fmt::Display for JvmInstallation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}, {}) {}",
            self.runtime_version,
            self.version,
            self.architecture,
            self.java_home.display()
        )
    }
}
