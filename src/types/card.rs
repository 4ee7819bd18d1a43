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

use serde::Serialize;

/// Identifies a card by its position in the catalog. Reordering the catalog
/// invalidates every persisted identifier.
pub type CardId = usize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Card {
    /// The prompt side.
    front: String,
    /// The answer side.
    back: String,
    /// The id of the category (deck) this card belongs to.
    category: String,
}

impl Card {
    pub fn new(
        front: impl Into<String>,
        back: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            front: front.into().trim().to_string(),
            back: back.into().trim().to_string(),
            category: category.into(),
        }
    }

    pub fn front(&self) -> &str {
        &self.front
    }

    pub fn back(&self) -> &str {
        &self.back
    }

    pub fn category(&self) -> &str {
        &self.category
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
}
