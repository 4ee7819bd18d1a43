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
use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::card::CardId;
use crate::types::date::Date;
use crate::types::level::Level;
use crate::types::timestamp::Timestamp;

/// Daily activity ledger.
pub type History = BTreeMap<Date, DayStat>;

/// The single persisted aggregate. Transitions never modify a snapshot in
/// place: they borrow one and return a new one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressState {
    pub cards: BTreeMap<CardId, CardProgress>,
    pub archived: BTreeSet<CardId>,
    pub history: History,
    pub total_reviewed: u64,
    /// Achievement id to unlock time. Entries are never removed.
    pub achievements: BTreeMap<String, Timestamp>,
}

/// Scheduling data for a single card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardProgress {
    pub level: Level,
    /// The card is due once this instant has passed.
    pub next_review: Timestamp,
    pub last_review: Timestamp,
}

/// One day of activity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawDayStat")]
pub struct DayStat {
    reviewed: u32,
    correct: u32,
    started_at: Timestamp,
}

impl DayStat {
    /// An empty day whose first activity happened at `started_at`.
    pub fn started(started_at: Timestamp) -> Self {
        Self {
            reviewed: 0,
            correct: 0,
            started_at,
        }
    }

    pub fn reviewed(&self) -> u32 {
        self.reviewed
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    /// Adds a tally onto this day. Since every tally has `correct <=
    /// reviewed`, so does the sum.
    pub fn add(self, tally: Tally) -> Self {
        Self {
            reviewed: self.reviewed.saturating_add(tally.reviewed),
            correct: self.correct.saturating_add(tally.correct),
            started_at: self.started_at,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDayStat {
    reviewed: u32,
    correct: u32,
    started_at: Timestamp,
}

impl From<RawDayStat> for DayStat {
    fn from(raw: RawDayStat) -> Self {
        let correct = if raw.correct > raw.reviewed {
            log::warn!(
                "Day stat has more correct ({}) than reviewed ({}) cards; clamping.",
                raw.correct,
                raw.reviewed
            );
            raw.reviewed
        } else {
            raw.correct
        };
        Self {
            reviewed: raw.reviewed,
            correct,
            started_at: raw.started_at,
        }
    }
}

/// An increment to the daily history. Cannot have more correct answers than
/// reviews.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tally {
    reviewed: u32,
    correct: u32,
}

impl Tally {
    pub const CORRECT: Self = Self {
        reviewed: 1,
        correct: 1,
    };

    pub const INCORRECT: Self = Self {
        reviewed: 1,
        correct: 0,
    };

    pub fn new(reviewed: u32, correct: u32) -> Fallible<Self> {
        if correct > reviewed {
            return fail(format!(
                "tally has more correct ({correct}) than reviewed ({reviewed}) cards"
            ));
        }
        Ok(Self { reviewed, correct })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_shape() -> Fallible<()> {
        let json = serde_json::to_string(&ProgressState::default())?;
        assert_eq!(
            json,
            r#"{"cards":{},"archived":[],"history":{},"totalReviewed":0,"achievements":{}}"#
        );
        Ok(())
    }

    #[test]
    fn test_parse_persisted_shape() -> Fallible<()> {
        let json = r#"{
            "cards": {"5": {"level": 2, "nextReview": 1741910400000, "lastReview": 1741651200000}},
            "archived": [3, 5],
            "history": {"2025-03-11": {"reviewed": 3, "correct": 2, "startedAt": 1741651200000}},
            "totalReviewed": 3,
            "achievements": {"first": 1741651200000}
        }"#;
        let state: ProgressState = serde_json::from_str(json)?;
        assert_eq!(state.cards[&5].level.value(), 2);
        assert_eq!(state.archived.len(), 2);
        let day = state.history[&"2025-03-11".parse::<Date>()?];
        assert_eq!(day.reviewed(), 3);
        assert_eq!(day.correct(), 2);
        assert_eq!(state.total_reviewed, 3);
        assert!(state.achievements.contains_key("first"));
        Ok(())
    }

    #[test]
    fn test_day_stat_clamps_correct() -> Fallible<()> {
        let day: DayStat = serde_json::from_str(r#"{"reviewed":1,"correct":4,"startedAt":0}"#)?;
        assert_eq!(day.reviewed(), 1);
        assert_eq!(day.correct(), 1);
        Ok(())
    }

    #[test]
    fn test_tally_validation() {
        assert!(Tally::new(2, 3).is_err());
        assert!(Tally::new(3, 3).is_ok());
        assert!(Tally::new(0, 0).is_ok());
    }

    #[test]
    fn test_day_stat_add() {
        let day = DayStat::started(Timestamp::EPOCH)
            .add(Tally::CORRECT)
            .add(Tally::INCORRECT);
        assert_eq!(day.reviewed(), 2);
        assert_eq!(day.correct(), 1);
    }
}
