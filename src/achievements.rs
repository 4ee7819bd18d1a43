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

use crate::history::get_streak;
use crate::types::progress::ProgressState;
use crate::types::timestamp::Timestamp;

/// What an achievement's threshold is compared against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementKind {
    /// The all-time number of reviews.
    Total,
    /// The current streak in days.
    Streak,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct AchievementDef {
    pub id: &'static str,
    pub label: &'static str,
    pub desc: &'static str,
    pub threshold: u64,
    #[serde(rename = "type")]
    pub kind: AchievementKind,
}

pub static ACHIEVEMENTS: [AchievementDef; 9] = [
    total("first", "First step", "Review your first card", 1),
    total("ten", "Warm-up", "Review 10 cards", 10),
    total("fifty", "Half a hundred", "Review 50 cards", 50),
    total("hundred", "A hundred!", "Review 100 cards", 100),
    total("twofifty", "Machine", "Review 250 cards", 250),
    total("fivehundred", "Flashcard master", "Review 500 cards", 500),
    streak("streak3", "3 days in a row", "Study 3 days in a row", 3),
    streak("streak7", "A week!", "Study 7 days in a row", 7),
    streak("streak30", "A month!", "Study 30 days in a row", 30),
];

const fn total(
    id: &'static str,
    label: &'static str,
    desc: &'static str,
    threshold: u64,
) -> AchievementDef {
    AchievementDef {
        id,
        label,
        desc,
        threshold,
        kind: AchievementKind::Total,
    }
}

const fn streak(
    id: &'static str,
    label: &'static str,
    desc: &'static str,
    threshold: u64,
) -> AchievementDef {
    AchievementDef {
        id,
        label,
        desc,
        threshold,
        kind: AchievementKind::Streak,
    }
}

pub struct AchievementCheck {
    pub state: ProgressState,
    /// Newly unlocked achievements, in catalog order.
    pub unlocked: Vec<&'static AchievementDef>,
}

/// Unlocks every achievement whose threshold has been reached. Unlocks are
/// permanent: already-unlocked achievements are skipped.
pub fn check_achievements(state: &ProgressState, now: Timestamp) -> AchievementCheck {
    let streak = u64::from(get_streak(state, now));
    let mut next = state.clone();
    let mut unlocked = Vec::new();
    for def in ACHIEVEMENTS.iter() {
        if state.achievements.contains_key(def.id) {
            continue;
        }
        let value = match def.kind {
            AchievementKind::Total => state.total_reviewed,
            AchievementKind::Streak => streak,
        };
        if value >= def.threshold {
            log::debug!("Unlocked achievement: {}", def.id);
            next.achievements.insert(def.id.to_string(), now);
            unlocked.push(def);
        }
    }
    AchievementCheck {
        state: next,
        unlocked,
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;
    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;
    use crate::types::progress::DayStat;
    use crate::types::progress::Tally;

    fn now() -> Timestamp {
        Timestamp::new(Utc.with_ymd_and_hms(2025, 3, 12, 10, 0, 0).unwrap())
    }

    fn ids(defs: &[&AchievementDef]) -> Vec<&'static str> {
        defs.iter().map(|d| d.id).collect()
    }

    #[test]
    fn test_catalog() {
        assert_eq!(ACHIEVEMENTS.len(), 9);
        let streaks = ACHIEVEMENTS
            .iter()
            .filter(|d| d.kind == AchievementKind::Streak)
            .count();
        assert_eq!(streaks, 3);
    }

    #[test]
    fn test_ten_reviews() {
        let state = ProgressState {
            total_reviewed: 10,
            ..ProgressState::default()
        };
        let check = check_achievements(&state, now());
        assert_eq!(ids(&check.unlocked), vec!["first", "ten"]);
        assert_eq!(check.state.achievements["first"], now());
        assert_eq!(check.state.achievements.len(), 2);

        let again = check_achievements(&check.state, now().plus(TimeDelta::hours(1)));
        assert!(again.unlocked.is_empty());
        assert_eq!(again.state, check.state);
    }

    #[test]
    fn test_nothing_to_unlock() {
        let check = check_achievements(&ProgressState::default(), now());
        assert!(check.unlocked.is_empty());
        assert!(check.state.achievements.is_empty());
    }

    #[test]
    fn test_unlocks_are_permanent() {
        let mut state = ProgressState::default();
        state
            .achievements
            .insert("hundred".to_string(), Timestamp::EPOCH);
        state.total_reviewed = 100;
        let check = check_achievements(&state, now());
        assert_eq!(ids(&check.unlocked), vec!["first", "ten", "fifty"]);
        assert_eq!(check.state.achievements["hundred"], Timestamp::EPOCH);
    }

    #[test]
    fn test_streak_achievement() {
        let mut state = ProgressState::default();
        for offset in 0..3 {
            let day = now().plus(TimeDelta::days(-offset));
            state
                .history
                .insert(day.date(), DayStat::started(day).add(Tally::CORRECT));
        }
        state.total_reviewed = 3;
        let check = check_achievements(&state, now());
        assert_eq!(ids(&check.unlocked), vec!["first", "streak3"]);
    }
}
