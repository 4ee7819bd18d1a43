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

use std::fmt::Display;
use std::fmt::Formatter;
use std::io::Write;
use std::io::stdout;

use clap::ValueEnum;
use serde::Serialize;

use crate::achievements::ACHIEVEMENTS;
use crate::collection::Collection;
use crate::error::Fallible;
use crate::heatmap::HEATMAP_DAYS;
use crate::heatmap::Heatmap;
use crate::heatmap::heatmap;
use crate::stats::Summary;
use crate::stats::summarize;
use crate::types::timestamp::Timestamp;

/// One glyph per heatmap tier, from no activity to the busiest days.
const GLYPHS: [char; 5] = [' ', '░', '▒', '▓', '█'];

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[derive(ValueEnum, Clone)]
pub enum StatsFormat {
    /// Human-readable output.
    Text,
    /// JSON output.
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Text => write!(f, "text"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    summary: Summary,
    heatmap: Heatmap,
    achievements: Vec<AchievementStatus>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AchievementStatus {
    id: &'static str,
    label: &'static str,
    desc: &'static str,
    unlocked_at: Option<Timestamp>,
}

pub fn print_stats(
    directory: Option<String>,
    category: Option<String>,
    format: StatsFormat,
) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    let stats = collect_stats(&coll, category.as_deref(), Timestamp::now())?;
    let mut output = stdout().lock();
    match format {
        StatsFormat::Text => render_text(&stats, &mut output)?,
        StatsFormat::Json => {
            let stats_json = serde_json::to_string_pretty(&stats)?;
            writeln!(output, "{}", stats_json)?;
        }
    }
    Ok(())
}

pub fn collect_stats(coll: &Collection, category: Option<&str>, now: Timestamp) -> Fallible<Stats> {
    let scope = coll.catalog.scope(category)?;
    let state = coll.store.get_state();
    let summary = summarize(
        &state,
        coll.catalog.cards(),
        &scope,
        now,
        coll.config.mastered_level,
    );
    let achievements = ACHIEVEMENTS
        .iter()
        .map(|def| AchievementStatus {
            id: def.id,
            label: def.label,
            desc: def.desc,
            unlocked_at: state.achievements.get(def.id).copied(),
        })
        .collect();
    Ok(Stats {
        summary,
        heatmap: heatmap(&state.history, now),
        achievements,
    })
}

pub fn render_text<W: Write>(stats: &Stats, output: &mut W) -> Fallible<()> {
    let s = &stats.summary;
    writeln!(output, "Cards:        {} ({} due)", s.card_count, s.due_count)?;
    writeln!(
        output,
        "Today:        {} reviewed, {} correct",
        s.today_reviewed, s.today_correct
    )?;
    writeln!(output, "Mastered:     {}", s.mastered_count)?;
    writeln!(
        output,
        "Archived:     {} ({} active)",
        s.archived_count, s.remaining_active
    )?;
    writeln!(output, "Total:        {} reviewed", s.total_reviewed)?;
    writeln!(output, "Streak:       {} days", s.streak)?;
    writeln!(
        output,
        "Achievements: {}/{}",
        s.achievements_unlocked, s.achievements_total
    )?;
    for status in &stats.achievements {
        let mark = if status.unlocked_at.is_some() { 'x' } else { ' ' };
        writeln!(output, "  [{mark}] {}: {}", status.label, status.desc)?;
    }

    writeln!(output)?;
    writeln!(output, "Activity, last {HEATMAP_DAYS} days:")?;
    for (row, name) in WEEKDAYS.iter().enumerate() {
        let mut line = String::new();
        for week in &stats.heatmap.weeks {
            let cell = week
                .iter()
                .find(|cell| cell.date.weekday().num_days_from_monday() as usize == row);
            line.push(match cell {
                Some(cell) => GLYPHS[usize::from(cell.tier).min(GLYPHS.len() - 1)],
                None => ' ',
            });
        }
        writeln!(output, "  {name} {}", line.trim_end())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use chrono::TimeZone;
    use chrono::Utc;
    use tempfile::TempDir;
    use tempfile::tempdir;

    use super::*;
    use crate::scheduler::mark_known;
    use crate::scheduler::mark_unknown;
    use crate::types::progress::ProgressState;

    fn now() -> Timestamp {
        Timestamp::new(Utc.with_ymd_and_hms(2025, 3, 12, 10, 0, 0).unwrap())
    }

    fn collection() -> Fallible<(TempDir, Collection)> {
        let dir = tempdir()?;
        write(dir.path().join("sql.md"), "SELECT? / Query\n\nJOIN? / Combine")?;
        write(dir.path().join("git.md"), "Commit? / Snapshot")?;
        let coll = Collection::new(Some(dir.path().display().to_string()))?;
        let state = mark_known(&ProgressState::default(), 2, now());
        let state = mark_unknown(&state, 0, now());
        coll.store.save_state(&state)?;
        Ok((dir, coll))
    }

    #[test]
    fn test_collect_stats() -> Fallible<()> {
        let (_dir, coll) = collection()?;
        let stats = collect_stats(&coll, None, now())?;
        assert_eq!(stats.summary.card_count, 3);
        assert_eq!(stats.summary.today_reviewed, 2);
        assert_eq!(stats.summary.today_correct, 1);
        assert_eq!(stats.achievements.len(), ACHIEVEMENTS.len());

        let scoped = collect_stats(&coll, Some("git"), now())?;
        assert_eq!(scoped.summary.card_count, 1);
        Ok(())
    }

    #[test]
    fn test_render_text() -> Fallible<()> {
        let (_dir, coll) = collection()?;
        let stats = collect_stats(&coll, None, now())?;
        let mut output = Vec::new();
        render_text(&stats, &mut output)?;
        let text = String::from_utf8_lossy(&output);
        assert!(text.contains("Cards:        3 (1 due)"));
        assert!(text.contains("Today:        2 reviewed, 1 correct"));
        assert!(text.contains("  [ ] First step: Review your first card"));
        // 2025-03-12 is a Wednesday and the only active day.
        assert!(text.contains(&format!("  Wed {}█\n", " ".repeat(13))));
        Ok(())
    }

    #[test]
    fn test_json() -> Fallible<()> {
        let (_dir, coll) = collection()?;
        let stats = collect_stats(&coll, None, now())?;
        let json: serde_json::Value = serde_json::to_value(&stats)?;
        assert_eq!(json["summary"]["totalReviewed"], 2);
        assert_eq!(json["achievements"][0]["unlockedAt"], serde_json::Value::Null);
        assert_eq!(json["heatmap"]["maxReviewed"], 2);
        Ok(())
    }
}
