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

use crate::error::{LocatorError, Result};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::str::FromStr;

/// A comparable Java version.
///
/// Legacy `1.x` version strings are normalized so that `1.8.0_311`,
/// `8u311` and `8.0.0+311` all describe the same release.
#[derive(Debug, Clone)]
pub struct JavaVersion {
    pub components: Vec<u32>,
    pub update: Option<u32>,
    pub pre_release: Option<String>,
}

impl JavaVersion {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            components: vec![major, minor, patch],
            update: None,
            pre_release: None,
        }
    }

    pub fn major(&self) -> u32 {
        self.components.first().copied().unwrap_or(0)
    }

    fn component(&self, index: usize) -> u32 {
        self.components.get(index).copied().unwrap_or(0)
    }
}

#[cfg(test)]
impl JavaVersion {
    pub fn from_major(major: u32) -> Self {
        Self {
            components: vec![major],
            update: None,
            pre_release: None,
        }
    }

    pub fn with_update(mut self, update: u32) -> Self {
        self.update = Some(update);
        self
    }

    pub fn with_pre_release(mut self, pre_release: impl Into<String>) -> Self {
        self.pre_release = Some(pre_release.into());
        self
    }
}

impl Ord for JavaVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        for i in 0..len {
            match self.component(i).cmp(&other.component(i)) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }

        // A release sorts after every pre-release of the same numbers
        let pre = match (&self.pre_release, &other.pre_release) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => a.cmp(b),
        };
        if pre != Ordering::Equal {
            return pre;
        }

        self.update.unwrap_or(0).cmp(&other.update.unwrap_or(0))
    }
}

impl PartialOrd for JavaVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for JavaVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for JavaVersion {}

fn parse_number(s: &str, original: &str) -> Result<u32> {
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return Err(LocatorError::InvalidVersionFormat(original.to_string()));
    }
    s.parse::<u32>()
        .map_err(|_| LocatorError::InvalidVersionFormat(original.to_string()))
}

/// Leading digits of a build tag such as `8-LTS` or `b11`.
fn leading_number(s: &str) -> Option<u32> {
    let digits: String = s
        .trim_start_matches('b')
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

fn is_build_tag(s: &str) -> bool {
    s.strip_prefix('b')
        .map(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or(false)
}

impl FromStr for JavaVersion {
    type Err = LocatorError;

    fn from_str(s: &str) -> Result<Self> {
        let original = s;
        let s = s.trim();
        if s.is_empty() {
            return Err(LocatorError::InvalidVersionFormat(original.to_string()));
        }

        let mut update = None;
        let mut pre_release = None;

        // "+8", "+8-LTS"
        let (rest, build) = match s.split_once('+') {
            Some((rest, build)) => (rest, Some(build)),
            None => (s, None),
        };
        if let Some(build) = build {
            update = leading_number(build);
        }

        // "-ea", "-b11"
        let (rest, suffix) = match rest.split_once('-') {
            Some((rest, suffix)) => (rest, Some(suffix)),
            None => (rest, None),
        };
        match suffix {
            Some("") => return Err(LocatorError::InvalidVersionFormat(original.to_string())),
            Some(tag) if is_build_tag(tag) => {
                if update.is_none() {
                    update = leading_number(tag);
                }
            }
            Some(tag) => pre_release = Some(tag.to_string()),
            None => {}
        }

        // "1.8.0_311" and "8u311"
        let numbers = if let Some((numbers, legacy_update)) = rest.split_once('_') {
            update = Some(parse_number(legacy_update, original)?);
            numbers
        } else if let Some((numbers, legacy_update)) = rest.split_once('u') {
            update = Some(parse_number(legacy_update, original)?);
            numbers
        } else {
            rest
        };

        let mut components = numbers
            .split('.')
            .map(|part| parse_number(part, original))
            .collect::<Result<Vec<u32>>>()?;

        if components.len() > 1 && components[0] == 1 {
            components.remove(0);
        }

        Ok(JavaVersion {
            components,
            update,
            pre_release,
        })
    }
}

impl std::fmt::Display for JavaVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let numbers = self
            .components
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(".");
        write!(f, "{numbers}")?;

        if let Some(pre) = &self.pre_release {
            write!(f, "-{pre}")?;
        }
        if let Some(update) = self.update {
            write!(f, "+{update}")?;
        }
        Ok(())
    }
}

impl Serialize for JavaVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
