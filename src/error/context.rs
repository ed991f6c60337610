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

use crate::error::LocatorError;
use std::fmt;

pub struct ErrorContext<'a> {
    pub error: &'a LocatorError,
    pub suggestion: Option<String>,
    pub details: Option<String>,
}

impl<'a> ErrorContext<'a> {
    pub fn new(error: &'a LocatorError) -> Self {
        let (suggestion, details) = match error {
            LocatorError::CurrentJvmUnavailable(msg) => {
                let suggestion = if cfg!(windows) {
                    Some(
                        "Set JAVA_HOME to a JDK directory (set JAVA_HOME=C:\\path\\to\\jdk) or \
                         add its bin directory to PATH."
                            .to_string(),
                    )
                } else {
                    Some(
                        "Set JAVA_HOME to a JDK directory (export JAVA_HOME=/path/to/jdk) or add \
                         its bin directory to PATH."
                            .to_string(),
                    )
                };
                let details = Some(msg.clone());
                (suggestion, details)
            }
            LocatorError::InvalidVersionFormat(msg) => {
                let suggestion = Some(
                    "Java versions look like '17', '17.0.2', '17.0.2+8', '1.8.0_311' or \
                     '8u311'."
                        .to_string(),
                );
                let details = Some(format!("Invalid format: {msg}"));
                (suggestion, details)
            }
            LocatorError::ConfigError(msg) => {
                let suggestion = Some(
                    "Check ~/.jvm-locator/config.toml and any JVM_LOCATOR_* environment \
                     variables."
                        .to_string(),
                );
                let details = Some(msg.clone());
                (suggestion, details)
            }
            LocatorError::Io(io_err) => {
                let suggestion = match io_err.kind() {
                    std::io::ErrorKind::PermissionDenied => {
                        if cfg!(unix) {
                            Some("Check read permissions on the JVM directories.".to_string())
                        } else {
                            Some("Run as Administrator or check file permissions.".to_string())
                        }
                    }
                    std::io::ErrorKind::NotFound => Some(
                        "Ensure the file or directory exists and the path is correct.".to_string(),
                    ),
                    _ => None,
                };
                let details = Some(format!("I/O error: {io_err}"));
                (suggestion, details)
            }
            _ => (None, None),
        };

        ErrorContext {
            error,
            suggestion,
            details,
        }
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    pub fn with_details(mut self, details: String) -> Self {
        self.details = Some(details);
        self
    }
}

impl<'a> fmt::Display for ErrorContext<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\n\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}
