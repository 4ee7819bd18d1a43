// Copyright 2025 Fernando Borretti
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

use std::collections::BTreeMap;
use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::level::Level;

/// The name of the optional configuration file in a collection directory.
pub const CONFIG_FILE: &str = "flashcards.toml";

#[derive(Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Path of the progress database, relative to the collection directory.
    pub database: String,
    /// Number of answers between quick quizzes. Zero disables them.
    pub quiz_every: usize,
    /// Cards at or above this level count as mastered.
    pub mastered_level: Level,
    /// Display overrides, keyed by category id.
    pub categories: BTreeMap<String, CategoryConfig>,
}

#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryConfig {
    pub name: Option<String>,
    pub icon: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: "flashcards.db".to_string(),
            quiz_every: 10,
            mastered_level: Level::new(4).unwrap_or(Level::MAX),
            categories: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Loads the configuration of a collection directory, falling back to
    /// the defaults if there is no configuration file.
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILE);
        if !path.exists() {
            log::debug!("No {CONFIG_FILE}; using defaults.");
            return Ok(Self::default());
        }
        let content = read_to_string(&path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Fallible<Self> {
        let config: Config = toml::from_str(content)?;
        if config.database.trim().is_empty() {
            return fail("invalid configuration: database path is empty");
        }
        Ok(config)
    }
}
