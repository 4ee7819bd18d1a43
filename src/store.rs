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

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::types::progress::ProgressState;

/// The name of the slot the progress snapshot is stored under.
pub const SLOT: &str = "flashcard_app";

/// A durable store of named string slots.
pub trait Storage {
    fn read(&self, key: &str) -> Fallible<Option<String>>;
    fn write(&self, key: &str, value: &str) -> Fallible<()>;
    fn remove(&self, key: &str) -> Fallible<()>;
}

/// Storage that lives in memory. Nothing survives the process.
#[derive(Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn acquire(&self) -> Fallible<MutexGuard<'_, HashMap<String, String>>> {
        self.slots
            .lock()
            .map_err(|_| ErrorReport::new("memory storage lock poisoned"))
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Fallible<Option<String>> {
        Ok(self.acquire()?.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Fallible<()> {
        self.acquire()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Fallible<()> {
        self.acquire()?.remove(key);
        Ok(())
    }
}

/// The durable boundary for [`ProgressState`]. The whole snapshot lives in a
/// single slot and every save replaces it.
pub struct ProgressStore<S> {
    storage: S,
}

impl<S: Storage> ProgressStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// The persisted state. Anything missing, unreadable, or of the wrong
    /// shape yields the empty state.
    pub fn get_state(&self) -> ProgressState {
        let raw = match self.storage.read(SLOT) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                log::debug!("No saved progress; starting fresh.");
                return ProgressState::default();
            }
            Err(e) => {
                log::warn!("Failed to read saved progress: {e}");
                return ProgressState::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(e) => {
                log::warn!("Discarding unreadable progress: {e}");
                ProgressState::default()
            }
        }
    }

    pub fn save_state(&self, state: &ProgressState) -> Fallible<()> {
        let json = serde_json::to_string(state)?;
        self.storage.write(SLOT, &json)
    }

    /// Overwrites the saved state with the empty state.
    pub fn reset_progress(&self) -> Fallible<()> {
        log::debug!("Resetting progress.");
        self.save_state(&ProgressState::default())
    }

    /// Deletes the slot altogether.
    pub fn purge(&self) -> Fallible<()> {
        log::debug!("Purging progress slot.");
        self.storage.remove(SLOT)
    }
}
