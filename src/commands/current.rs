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

use crate::current::{CurrentJvm, CurrentJvmProvider, EnvironmentCurrentJvm};
use crate::error::Result;
use serde::Serialize;

#[derive(Serialize)]
struct CurrentOutput {
    java_home: String,
    version: String,
    runtime_version: String,
}

impl From<&CurrentJvm> for CurrentOutput {
    fn from(current: &CurrentJvm) -> Self {
        Self {
            java_home: current.java_home.display().to_string(),
            version: current.version.to_string(),
            runtime_version: current.version_string.clone(),
        }
    }
}

pub struct CurrentCommand {
    provider: Box<dyn CurrentJvmProvider>,
}

impl CurrentCommand {
    pub fn new() -> Result<Self> {
        Ok(Self::with_provider(Box::new(EnvironmentCurrentJvm::new())))
    }

    pub fn with_provider(provider: Box<dyn CurrentJvmProvider>) -> Self {
        Self { provider }
    }

    pub fn execute(&self, quiet: bool, json: bool) -> Result<()> {
        let current = self.provider.current_jvm()?;

        if json {
            let output = CurrentOutput::from(&current);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else if quiet {
            println!("{}", current.version_string);
        } else {
            println!(
                "{} ({})",
                current.version_string,
                current.java_home.display()
            );
        }

        Ok(())
    }
}
