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

use std::collections::BTreeSet;
use std::fs::read_to_string;
use std::path::Path;

use walkdir::WalkDir;

use crate::config::Config;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::card::Card;
use crate::types::card::CardId;
use crate::types::card::Category;

const DEFAULT_ICON: &str = "📚";

/// The ordered card catalog. A card's position is its identifier.
pub struct Catalog {
    cards: Vec<Card>,
    categories: Vec<Category>,
}

impl Catalog {
    pub fn new(cards: Vec<Card>, categories: Vec<Category>) -> Self {
        Self { cards, categories }
    }

    /// Loads every deck file (`*.md`) under `directory`, in file name order.
    /// Each deck file is a category named after its stem.
    pub fn load(directory: &Path, config: &Config) -> Fallible<Self> {
        let mut cards = Vec::new();
        let mut categories: Vec<Category> = Vec::new();
        for entry in WalkDir::new(directory).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() || path.extension().is_none_or(|ext| ext != "md") {
                continue;
            }
            let id = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .ok_or_else(|| ErrorReport::new(format!("invalid deck file name: {path:?}")))?
                .to_string();
            let content = read_to_string(path)?;
            let deck = parse_cards(&content, &id);
            log::debug!("Loaded {} cards from {path:?}.", deck.len());
            cards.extend(deck);
            if !categories.iter().any(|c| c.id == id) {
                let overrides = config.categories.get(&id);
                categories.push(Category {
                    name: overrides
                        .and_then(|o| o.name.clone())
                        .unwrap_or_else(|| id.clone()),
                    icon: overrides
                        .and_then(|o| o.icon.clone())
                        .unwrap_or_else(|| DEFAULT_ICON.to_string()),
                    id,
                });
            }
        }
        Ok(Self { cards, categories })
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// The indices of the cards in scope: one category, or the whole catalog.
    pub fn scope(&self, category: Option<&str>) -> Fallible<BTreeSet<CardId>> {
        match category {
            None => Ok((0..self.cards.len()).collect()),
            Some(id) => {
                if self.category(id).is_none() {
                    return fail(format!("no such category: {id}"));
                }
                Ok(self
                    .cards
                    .iter()
                    .enumerate()
                    .filter(|(_, card)| card.category() == id)
                    .map(|(index, _)| index)
                    .collect())
            }
        }
    }
}

/// Parses a deck file. Cards are separated by blank lines and written as
/// `front / back`. Blocks that aren't cards are ignored.
pub fn parse_cards(content: &str, category: &str) -> Vec<Card> {
    // Whitespace-only lines separate cards just like empty ones.
    let content = content
        .lines()
        .map(|line| if line.trim().is_empty() { "" } else { line })
        .collect::<Vec<&str>>()
        .join("\n");
    content
        .split("\n\n")
        .map(|block| block.trim())
        .filter(|block| !block.is_empty())
        .filter_map(|block| {
            let (front, back) = block.split_once(" / ")?;
            let (front, back) = (front.trim(), back.trim());
            if front.is_empty() || back.is_empty() {
                None
            } else {
                Some(Card::new(front, back, category))
            }
        })
        .collect()
}
