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

//! Leveled spaced repetition. Every transition borrows a snapshot and returns
//! a new one; none of them can fail.

use std::collections::BTreeSet;

use chrono::TimeDelta;

use crate::history::add_to_history;
use crate::types::card::Card;
use crate::types::card::CardId;
use crate::types::level::Level;
use crate::types::progress::CardProgress;
use crate::types::progress::ProgressState;
use crate::types::progress::Tally;
use crate::types::timestamp::Timestamp;

/// How long a forgotten card waits before it is due again, in milliseconds.
/// Short enough that it resurfaces within the same session.
pub const RETRY_DELAY_MS: i64 = 60_000;

/// A card that is due, together with its catalog index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DueCard<'a> {
    pub index: CardId,
    pub card: &'a Card,
}

/// The card's progress, or the default (level 0, due at the epoch) if it was
/// never reviewed.
pub fn get_card_progress(state: &ProgressState, card: CardId) -> CardProgress {
    state.cards.get(&card).copied().unwrap_or_default()
}

/// The user remembered the card: move it one level up.
pub fn mark_known(state: &ProgressState, card: CardId, now: Timestamp) -> ProgressState {
    let level = get_card_progress(state, card).level.promote();
    let progress = CardProgress {
        level,
        next_review: now.plus(level.interval()),
        last_review: now,
    };
    let mut next = record_review(state, Tally::CORRECT, now);
    next.cards.insert(card, progress);
    next
}

/// The user forgot the card: back to level 0, retry shortly.
pub fn mark_unknown(state: &ProgressState, card: CardId, now: Timestamp) -> ProgressState {
    let progress = CardProgress {
        level: Level::ZERO,
        next_review: now.plus(TimeDelta::milliseconds(RETRY_DELAY_MS)),
        last_review: now,
    };
    let mut next = record_review(state, Tally::INCORRECT, now);
    next.cards.insert(card, progress);
    next
}

/// Remove the card from scheduling for good. Archiving counts as a correct
/// review in the daily history.
pub fn archive_card(state: &ProgressState, card: CardId, now: Timestamp) -> ProgressState {
    let mut next = record_review(state, Tally::CORRECT, now);
    next.archived.insert(card);
    next
}

/// The cards that are due at `now`, in catalog order. If `valid` is given,
/// only those indices are considered. Archived cards are never due.
pub fn get_due_cards<'a>(
    state: &ProgressState,
    cards: &'a [Card],
    valid: Option<&BTreeSet<CardId>>,
    now: Timestamp,
) -> Vec<DueCard<'a>> {
    cards
        .iter()
        .enumerate()
        .filter(|(index, _)| valid.is_none_or(|valid| valid.contains(index)))
        .filter(|(index, _)| !state.archived.contains(index))
        .filter(|(index, _)| get_card_progress(state, *index).next_review <= now)
        .map(|(index, card)| DueCard { index, card })
        .collect()
}

fn record_review(state: &ProgressState, tally: Tally, now: Timestamp) -> ProgressState {
    let mut next = state.clone();
    next.total_reviewed = state.total_reviewed.saturating_add(1);
    next.history = add_to_history(&state.history, tally, now);
    next
}
