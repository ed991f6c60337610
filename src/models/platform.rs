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

use serde::{Deserialize, Serialize};

/// Pointer width of a JVM installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
    /// Any 32-bit architecture, including 32-bit ARM. Only the pointer
    /// width is tracked, not the instruction set.
    X86,
    /// 64-bit
    X64,
    Unknown,
}

impl Architecture {
    /// Maps the architecture names used by release files, Debian package
    /// suffixes and `sysinfo` onto a pointer width.
    pub fn from_arch_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "x64" | "amd64" | "x86_64" | "aarch64" | "arm64" | "ppc64" | "ppc64le" | "ppc64el"
            | "s390x" | "sparcv9" | "riscv64" => Architecture::X64,
            "x86" | "i386" | "i486" | "i586" | "i686" | "arm" | "arm32" | "armhf" | "armel" => {
                Architecture::X86
            }
            _ => Architecture::Unknown,
        }
    }

    pub fn is_64_bit(&self) -> bool {
        matches!(self, Architecture::X64)
    }
}

impl std::fmt::Display for Architecture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arch = match self {
            Architecture::X86 => "32-bit",
            Architecture::X64 => "64-bit",
            Architecture::Unknown => "unknown",
        };
        write!(f, "{arch}")
    }
}

/// Operating system families that have a dedicated discovery strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
    MacOs,
    Windows,
    Linux,
    Other,
}

impl std::fmt::Display for OsFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let os = match self {
            OsFamily::MacOs => "macos",
            OsFamily::Windows => "windows",
            OsFamily::Linux => "linux",
            OsFamily::Other => "other",
        };
        write!(f, "{os}")
    }
}
