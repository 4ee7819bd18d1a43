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

use std::env::current_dir;
use std::path::PathBuf;
use std::time::Instant;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::db::Database;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::store::ProgressStore;

/// A collection directory: its configuration, decks, and saved progress.
pub struct Collection {
    pub directory: PathBuf,
    pub config: Config,
    pub store: ProgressStore<Database>,
    pub catalog: Catalog,
}

impl Collection {
    pub fn new(directory: Option<String>) -> Fallible<Self> {
        let directory: PathBuf = match directory {
            Some(dir) => PathBuf::from(dir),
            None => current_dir()?,
        };
        let directory = if directory.exists() {
            directory.canonicalize()?
        } else {
            return fail("directory does not exist.");
        };

        let config = Config::load(&directory)?;

        let db_path: PathBuf = directory.join(&config.database);
        let db_path: &str = db_path
            .to_str()
            .ok_or_else(|| ErrorReport::new("invalid path"))?;
        let store = ProgressStore::new(Database::new(db_path)?);

        let catalog = {
            log::debug!("Loading decks...");
            let start = Instant::now();
            let catalog = Catalog::load(&directory, &config)?;
            let duration = start.elapsed().as_millis();
            log::debug!("Loaded {} cards in {duration}ms.", catalog.len());
            catalog
        };

        Ok(Self {
            directory,
            config,
            store,
            catalog,
        })
    }
}
