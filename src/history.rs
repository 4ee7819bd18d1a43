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

use crate::types::progress::DayStat;
use crate::types::progress::History;
use crate::types::progress::ProgressState;
use crate::types::progress::Tally;
use crate::types::timestamp::Timestamp;

/// How far back the streak is computed. Longer streaks are displayed as this.
pub const STREAK_WINDOW_DAYS: u32 = 365;

/// Adds a tally to today's entry, creating it if this is the first activity
/// of the day.
pub fn add_to_history(history: &History, tally: Tally, now: Timestamp) -> History {
    let today = now.date();
    let day = history
        .get(&today)
        .copied()
        .unwrap_or_else(|| DayStat::started(now));
    let mut next = history.clone();
    next.insert(today, day.add(tally));
    next
}

/// Today's activity, or an empty day if nothing was reviewed yet.
pub fn get_today_stats(state: &ProgressState, now: Timestamp) -> DayStat {
    state
        .history
        .get(&now.date())
        .copied()
        .unwrap_or_default()
}

/// The number of consecutive days with at least one review, ending today. If
/// nothing was reviewed today yet, the streak ending yesterday still counts.
pub fn get_streak(state: &ProgressState, now: Timestamp) -> u32 {
    let mut streak = 0;
    let mut day = now.date();
    for offset in 0..STREAK_WINDOW_DAYS {
        let active = state
            .history
            .get(&day)
            .is_some_and(|stat| stat.reviewed() > 0);
        if active {
            streak += 1;
        } else if offset > 0 {
            break;
        }
        day = day.pred();
    }
    streak
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;
    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;

    fn now() -> Timestamp {
        Timestamp::new(Utc.with_ymd_and_hms(2025, 3, 12, 10, 0, 0).unwrap())
    }

    fn days_ago(n: i64) -> Timestamp {
        now().plus(TimeDelta::days(-n))
    }

    /// A state with `reviewed` reviews on each of the given days back.
    fn with_activity(days: &[(i64, u32)]) -> ProgressState {
        let mut state = ProgressState::default();
        for (offset, reviewed) in days {
            let stat = DayStat::started(days_ago(*offset)).add(Tally::new(*reviewed, 0).unwrap());
            state.history.insert(days_ago(*offset).date(), stat);
        }
        state
    }

    #[test]
    fn test_add_creates_day() {
        let history = History::new();
        let history = add_to_history(&history, Tally::CORRECT, now());
        let day = history[&now().date()];
        assert_eq!(day.reviewed(), 1);
        assert_eq!(day.correct(), 1);
        assert_eq!(day.started_at(), now());
    }

    #[test]
    fn test_add_accumulates_and_keeps_start() {
        let later = now().plus(TimeDelta::hours(3));
        let history = add_to_history(&History::new(), Tally::CORRECT, now());
        let history = add_to_history(&history, Tally::INCORRECT, later);
        let history = add_to_history(&history, Tally::new(3, 2).unwrap(), later);
        let day = history[&now().date()];
        assert_eq!(day.reviewed(), 5);
        assert_eq!(day.correct(), 3);
        assert_eq!(day.started_at(), now());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_add_does_not_touch_input() {
        let history = History::new();
        let _ = add_to_history(&history, Tally::CORRECT, now());
        assert!(history.is_empty());
    }

    #[test]
    fn test_today_stats_empty() {
        let state = ProgressState::default();
        let today = get_today_stats(&state, now());
        assert_eq!(today.reviewed(), 0);
        assert_eq!(today.correct(), 0);
    }

    #[test]
    fn test_streak_today_not_started() {
        let state = with_activity(&[(1, 2), (2, 0)]);
        assert_eq!(get_streak(&state, now()), 1);
    }

    #[test]
    fn test_streak_including_today() {
        let state = with_activity(&[(0, 1), (1, 1), (2, 1)]);
        assert_eq!(get_streak(&state, now()), 3);
    }

    #[test]
    fn test_streak_empty() {
        assert_eq!(get_streak(&ProgressState::default(), now()), 0);
    }

    #[test]
    fn test_streak_stops_at_gap() {
        let state = with_activity(&[(0, 4), (1, 1), (3, 9), (4, 9)]);
        assert_eq!(get_streak(&state, now()), 2);
    }

    #[test]
    fn test_streak_capped() {
        let days: Vec<(i64, u32)> = (0..400).map(|d| (d, 1)).collect();
        let state = with_activity(&days);
        assert_eq!(get_streak(&state, now()), STREAK_WINDOW_DAYS);
    }
}
