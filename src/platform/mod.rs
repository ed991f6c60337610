//! Platform facts for the entire application.
//!
//! This module answers which operating system family the process runs on,
//! how wide the OS architecture is, and how filesystem paths are normalized
//! before they are used as installation identities.

pub mod registry;

use crate::models::{Architecture, OsFamily};
use log::debug;
use std::path::{Path, PathBuf};

pub use registry::{RegistryReader, RegistryView, default_registry};

/// Detect the operating system family this binary was built for.
pub fn current_os_family() -> OsFamily {
    if cfg!(target_os = "macos") {
        OsFamily::MacOs
    } else if cfg!(target_os = "windows") {
        OsFamily::Windows
    } else if cfg!(target_os = "linux") {
        OsFamily::Linux
    } else {
        OsFamily::Other
    }
}

/// Reports the architecture of the operating system.
pub trait SystemInfo: Send + Sync {
    fn architecture(&self) -> Architecture;
}

/// [`SystemInfo`] backed by the `sysinfo` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct SysinfoSystemInfo;

impl SystemInfo for SysinfoSystemInfo {
    fn architecture(&self) -> Architecture {
        match sysinfo::System::cpu_arch() {
            Some(arch) => {
                let architecture = Architecture::from_arch_name(&arch);
                debug!("System architecture {arch} maps to {architecture}");
                architecture
            }
            None => {
                debug!("System architecture could not be determined");
                Architecture::Unknown
            }
        }
    }
}

/// Canonicalize a JVM home so that it can serve as an identity key.
///
/// Falls back to the path as given when it cannot be resolved. On Windows
/// the verbatim `\\?\` prefix added by canonicalization is removed so that
/// registry paths and filesystem paths compare equal.
pub fn canonical_home(path: &Path) -> PathBuf {
    let resolved = match path.canonicalize() {
        Ok(canonical) => canonical,
        Err(err) => {
            debug!(
                "Falling back to non-canonical path {} due to error: {}",
                path.display(),
                err
            );
            path.to_path_buf()
        }
    };
    strip_verbatim_prefix(resolved)
}

fn strip_verbatim_prefix(path: PathBuf) -> PathBuf {
    #[cfg(windows)]
    {
        let text = path.to_string_lossy();
        if let Some(stripped) = text.strip_prefix(r"\\?\")
            && !stripped.starts_with("UNC\\")
        {
            return PathBuf::from(stripped);
        }
        path
    }

    #[cfg(not(windows))]
    {
        path
    }
}

/// File name of the `java` launcher on this platform.
pub fn java_executable_name() -> &'static str {
    if cfg!(windows) { "java.exe" } else { "java" }
}

/// Whether `home` looks like a JVM home: it has `bin/java`, or a `jre/bin/java`
/// for old JDK layouts.
pub fn has_java_launcher(home: &Path) -> bool {
    let exe = java_executable_name();
    home.join("bin").join(exe).is_file() || home.join("jre").join("bin").join(exe).is_file()
}
