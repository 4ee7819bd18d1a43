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

use serde::Serialize;

use crate::achievements::ACHIEVEMENTS;
use crate::history::get_streak;
use crate::history::get_today_stats;
use crate::scheduler::get_due_cards;
use crate::types::card::Card;
use crate::types::card::CardId;
use crate::types::level::Level;
use crate::types::progress::ProgressState;
use crate::types::timestamp::Timestamp;

/// Dashboard figures for the cards in scope.
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub card_count: usize,
    pub due_count: usize,
    pub today_reviewed: u32,
    pub today_correct: u32,
    pub mastered_count: usize,
    pub archived_count: usize,
    /// Cards in scope that are not archived.
    pub remaining_active: usize,
    pub total_reviewed: u64,
    pub streak: u32,
    pub achievements_unlocked: usize,
    pub achievements_total: usize,
}

pub fn summarize(
    state: &ProgressState,
    cards: &[Card],
    scope: &BTreeSet<CardId>,
    now: Timestamp,
    mastered_level: Level,
) -> Summary {
    let today = get_today_stats(state, now);
    let archived_count = state.archived.intersection(scope).count();
    let mastered_count = state
        .cards
        .iter()
        .filter(|(id, progress)| scope.contains(*id) && progress.level >= mastered_level)
        .count();
    Summary {
        card_count: scope.len(),
        due_count: get_due_cards(state, cards, Some(scope), now).len(),
        today_reviewed: today.reviewed(),
        today_correct: today.correct(),
        mastered_count,
        archived_count,
        remaining_active: scope.len().saturating_sub(archived_count),
        total_reviewed: state.total_reviewed,
        streak: get_streak(state, now),
        achievements_unlocked: state.achievements.len(),
        achievements_total: ACHIEVEMENTS.len(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;
    use crate::achievements::check_achievements;
    use crate::scheduler::archive_card;
    use crate::scheduler::mark_known;
    use crate::scheduler::mark_unknown;

    fn now() -> Timestamp {
        Timestamp::new(Utc.with_ymd_and_hms(2025, 3, 12, 10, 0, 0).unwrap())
    }

    #[test]
    fn test_summary() {
        let cards: Vec<Card> = (0..6)
            .map(|i| Card::new(format!("Q{i}"), format!("A{i}"), "default"))
            .collect();
        let mut state = ProgressState::default();
        for _ in 0..4 {
            state = mark_known(&state, 0, now());
        }
        state = mark_unknown(&state, 1, now());
        state = archive_card(&state, 2, now());
        state = archive_card(&state, 5, now());
        state = check_achievements(&state, now()).state;

        let scope: BTreeSet<CardId> = [0, 1, 2, 3].into_iter().collect();
        let summary = summarize(&state, &cards, &scope, now(), Level::new(4).unwrap());
        assert_eq!(
            summary,
            Summary {
                card_count: 4,
                due_count: 1,
                today_reviewed: 7,
                today_correct: 6,
                mastered_count: 1,
                archived_count: 1,
                remaining_active: 3,
                total_reviewed: 7,
                streak: 1,
                achievements_unlocked: 1,
                achievements_total: 9,
            }
        );
    }
}
