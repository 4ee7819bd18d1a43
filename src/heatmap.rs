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

use chrono::Weekday;
use serde::Serialize;

use crate::types::date::Date;
use crate::types::progress::History;
use crate::types::timestamp::Timestamp;

/// The length of the trailing activity window, today included.
pub const HEATMAP_DAYS: usize = 91;

/// The number of intensity tiers, including the empty tier.
pub const TIERS: u8 = 5;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Heatmap {
    /// Week columns, oldest first. Each column starts on a Monday, except
    /// possibly the first.
    pub weeks: Vec<Vec<HeatCell>>,
    /// The busiest day in the window, and at least 1.
    pub max_reviewed: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct HeatCell {
    pub date: Date,
    pub reviewed: u32,
    pub tier: u8,
}

pub fn heatmap(history: &History, now: Timestamp) -> Heatmap {
    let mut days: Vec<(Date, u32)> = Vec::with_capacity(HEATMAP_DAYS);
    let mut day = now.date();
    for _ in 0..HEATMAP_DAYS {
        let reviewed = history.get(&day).map(|stat| stat.reviewed()).unwrap_or(0);
        days.push((day, reviewed));
        day = day.pred();
    }
    days.reverse();

    let max_reviewed = days
        .iter()
        .map(|(_, reviewed)| *reviewed)
        .max()
        .unwrap_or(0)
        .max(1);

    let mut weeks: Vec<Vec<HeatCell>> = Vec::new();
    let mut week: Vec<HeatCell> = Vec::new();
    for (date, reviewed) in days {
        if date.weekday() == Weekday::Mon && !week.is_empty() {
            weeks.push(std::mem::take(&mut week));
        }
        week.push(HeatCell {
            date,
            reviewed,
            tier: tier(reviewed, max_reviewed),
        });
    }
    if !week.is_empty() {
        weeks.push(week);
    }

    Heatmap {
        weeks,
        max_reviewed,
    }
}

/// Buckets a day by its share of the busiest day: 0 for no activity, then
/// quarters of the maximum.
pub fn tier(reviewed: u32, max_reviewed: u32) -> u8 {
    if reviewed == 0 {
        return 0;
    }
    let scaled = 4 * u64::from(reviewed);
    let max = u64::from(max_reviewed.max(1));
    if scaled < max {
        1
    } else if scaled < 2 * max {
        2
    } else if scaled < 3 * max {
        3
    } else {
        TIERS - 1
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
        // A Wednesday.
        Timestamp::new(Utc.with_ymd_and_hms(2025, 3, 12, 10, 0, 0).unwrap())
    }

    #[test]
    fn test_tiers() {
        assert_eq!(tier(0, 8), 0);
        assert_eq!(tier(1, 8), 1);
        assert_eq!(tier(2, 8), 2);
        assert_eq!(tier(3, 8), 2);
        assert_eq!(tier(4, 8), 3);
        assert_eq!(tier(6, 8), 4);
        assert_eq!(tier(8, 8), 4);
    }

    #[test]
    fn test_empty_history() {
        let map = heatmap(&History::new(), now());
        assert_eq!(map.max_reviewed, 1);
        let cells: Vec<&HeatCell> = map.weeks.iter().flatten().collect();
        assert_eq!(cells.len(), HEATMAP_DAYS);
        assert!(cells.iter().all(|c| c.tier == 0));
    }

    #[test]
    fn test_week_columns() {
        let map = heatmap(&History::new(), now());
        // 2024-12-12 (Thursday) through 2025-03-12 (Wednesday).
        assert_eq!(map.weeks.len(), 14);
        assert_eq!(map.weeks[0].len(), 4);
        assert_eq!(map.weeks[0][0].date.to_string(), "2024-12-12");
        assert_eq!(map.weeks[13].len(), 3);
        assert_eq!(map.weeks[13][2].date, now().date());
        for week in &map.weeks[1..] {
            assert_eq!(week[0].date.weekday(), Weekday::Mon);
        }
    }

    #[test]
    fn test_activity_tiers() {
        let mut history = History::new();
        let busy = now().plus(TimeDelta::days(-2));
        history.insert(
            busy.date(),
            DayStat::started(busy).add(Tally::new(8, 8).unwrap()),
        );
        history.insert(
            now().date(),
            DayStat::started(now()).add(Tally::new(1, 0).unwrap()),
        );
        // Outside the window: ignored.
        let old = now().plus(TimeDelta::days(-200));
        history.insert(
            old.date(),
            DayStat::started(old).add(Tally::new(100, 0).unwrap()),
        );
        let map = heatmap(&history, now());
        assert_eq!(map.max_reviewed, 8);
        let cells: Vec<&HeatCell> = map.weeks.iter().flatten().collect();
        let last = cells[cells.len() - 1];
        assert_eq!(last.reviewed, 1);
        assert_eq!(last.tier, 1);
        let busy_cell = cells[cells.len() - 3];
        assert_eq!(busy_cell.date, busy.date());
        assert_eq!(busy_cell.tier, 4);
    }
}
