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

use crate::config::LocatorConfig;
use crate::error::Result;
use crate::locator::JvmLocator;
use crate::models::JvmInstallation;
use colored::Colorize;
use comfy_table::{Cell, Table};
use log::debug;

pub struct ListCommand {
    locator: JvmLocator,
}

impl ListCommand {
    pub fn new(config: &LocatorConfig) -> Result<Self> {
        Ok(Self::with_locator(JvmLocator::from_config(config)))
    }

    pub fn with_locator(locator: JvmLocator) -> Self {
        Self { locator }
    }

    pub fn execute(&self, json: bool) -> Result<()> {
        debug!("Listing JVMs for OS family {}", self.locator.os_family());
        let installations = self.locator.discover()?;

        if json {
            println!("{}", serde_json::to_string_pretty(&installations)?);
        } else {
            println!("{}", render_table(&installations));
            println!(
                "\n{} JVM{} found",
                installations.len(),
                if installations.len() == 1 { "" } else { "s" }
            );
        }

        Ok(())
    }
}

fn render_table(installations: &[JvmInstallation]) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_BORDERS_ONLY);
    table.set_header(vec![
        Cell::new("Version"),
        Cell::new("Runtime"),
        Cell::new("Arch"),
        Cell::new("Default"),
        Cell::new("Source"),
        Cell::new("Home"),
    ]);

    for jvm in installations {
        let default_marker = if jvm.is_system_default() {
            "*".green().bold().to_string()
        } else {
            String::new()
        };

        table.add_row(vec![
            Cell::new(jvm.version()),
            Cell::new(jvm.runtime_version()),
            Cell::new(jvm.architecture()),
            Cell::new(default_marker),
            Cell::new(jvm.source()),
            Cell::new(jvm.java_home().display()),
        ]);
    }

    table
}
