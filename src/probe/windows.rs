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

//! Discovery through the `HKLM\SOFTWARE\JavaSoft` registry keys written by
//! JDK and JRE installers.

use crate::error::Result;
use crate::models::{Architecture, JvmInstallation, ProbeSource};
use crate::platform::{RegistryReader, RegistryView, SystemInfo, canonical_home};
use crate::probe::JvmProbe;
use crate::version::JavaVersion;
use log::{debug, warn};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

const JAVASOFT_KEY: &str = r"SOFTWARE\JavaSoft";
const JDK_PRODUCTS: [&str; 2] = ["Java Development Kit", "JDK"];
const JRE_PRODUCTS: [&str; 2] = ["Java Runtime Environment", "JRE"];
const CURRENT_VERSION_VALUE: &str = "CurrentVersion";
const JAVA_HOME_VALUE: &str = "JavaHome";

pub struct WindowsProbe {
    registry: Arc<dyn RegistryReader>,
    system_info: Arc<dyn SystemInfo>,
    include_jre: bool,
}

impl WindowsProbe {
    pub fn new(
        registry: Arc<dyn RegistryReader>,
        system_info: Arc<dyn SystemInfo>,
        include_jre: bool,
    ) -> Self {
        Self {
            registry,
            system_info,
            include_jre,
        }
    }

    /// Registry views to read, native view first, with the architecture of
    /// the JVMs registered in each.
    fn views(&self) -> Vec<(RegistryView, Architecture)> {
        let os_arch = self.system_info.architecture();
        if os_arch.is_64_bit() {
            vec![
                (RegistryView::Registry64, Architecture::X64),
                (RegistryView::Registry32, Architecture::X86),
            ]
        } else {
            vec![(RegistryView::Registry32, os_arch)]
        }
    }

    fn products(&self) -> Vec<&'static str> {
        let mut products = JDK_PRODUCTS.to_vec();
        if self.include_jre {
            products.extend(JRE_PRODUCTS);
        }
        products
    }

    fn read_product(
        &self,
        view: RegistryView,
        architecture: Architecture,
        is_native_view: bool,
        product: &str,
    ) -> Result<Vec<JvmInstallation>> {
        let product_key = format!(r"{JAVASOFT_KEY}\{product}");
        let subkeys = self.registry.subkeys(view, &product_key)?;
        if subkeys.is_empty() {
            return Ok(Vec::new());
        }

        let current_version = if is_native_view {
            self.registry
                .string_value(view, &product_key, CURRENT_VERSION_VALUE)
                .unwrap_or_else(|e| {
                    warn!("Cannot read HKLM\\{product_key}\\{CURRENT_VERSION_VALUE}: {e}");
                    None
                })
        } else {
            None
        };

        let mut found = Vec::new();
        for version_key in subkeys {
            let key = format!(r"{product_key}\{version_key}");
            let java_home = match self.registry.string_value(view, &key, JAVA_HOME_VALUE) {
                Ok(Some(java_home)) => java_home,
                Ok(None) => {
                    debug!("Skipping HKLM\\{key}: no {JAVA_HOME_VALUE} value");
                    continue;
                }
                Err(e) => {
                    warn!("Skipping HKLM\\{key}: {e}");
                    continue;
                }
            };

            let version = match JavaVersion::from_str(&version_key) {
                Ok(version) => version,
                Err(e) => {
                    debug!("Skipping HKLM\\{key}: {e}");
                    continue;
                }
            };

            let is_default = current_version.as_deref() == Some(version_key.as_str());
            found.push(JvmInstallation::new(
                canonical_home(Path::new(&java_home)),
                version_key,
                version,
                is_default,
                architecture,
                ProbeSource::WindowsRegistry,
            ));
        }

        Ok(found)
    }
}

impl JvmProbe for WindowsProbe {
    fn name(&self) -> &'static str {
        "windows-registry"
    }

    /// A product key that cannot be read is skipped. The registry counts as
    /// unavailable only when no product key can be read at all.
    fn find_candidates(&self) -> Result<Vec<JvmInstallation>> {
        let mut candidates = Vec::new();
        let mut any_readable = false;
        let mut first_error = None;

        for (index, (view, architecture)) in self.views().into_iter().enumerate() {
            for product in self.products() {
                match self.read_product(view, architecture, index == 0, product) {
                    Ok(found) => {
                        any_readable = true;
                        candidates.extend(found);
                    }
                    Err(e) => {
                        warn!("Skipping {product} in the {view:?} registry view: {e}");
                        first_error.get_or_insert(e);
                    }
                }
            }
        }

        if !any_readable && let Some(error) = first_error {
            return Err(error);
        }

        debug!("Registry probe found {} candidate(s)", candidates.len());
        Ok(candidates)
    }
}
