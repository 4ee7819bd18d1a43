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

use std::io::BufRead;
use std::io::Write;
use std::io::stdin;
use std::io::stdout;

use rand::Rng;
use rand::thread_rng;

use crate::cmd::prompt;
use crate::collection::Collection;
use crate::error::Fallible;
use crate::error::fail;
use crate::history::get_streak;
use crate::history::get_today_stats;
use crate::quiz::QuickQuiz;
use crate::quiz::option_label;
use crate::quiz::parse_choices;
use crate::session::Answer;
use crate::session::Session;
use crate::types::timestamp::Timestamp;

pub fn study(directory: Option<String>, category: Option<String>) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    let stdin = stdin();
    let mut input = stdin.lock();
    let mut output = stdout().lock();
    let mut rng = thread_rng();
    run_study(
        &coll,
        category.as_deref(),
        &mut input,
        &mut output,
        &mut rng,
        Timestamp::now,
    )
}

pub fn run_study<R, W, G, C>(
    coll: &Collection,
    category: Option<&str>,
    input: &mut R,
    output: &mut W,
    rng: &mut G,
    clock: C,
) -> Fallible<()>
where
    R: BufRead,
    W: Write,
    G: Rng,
    C: Fn() -> Timestamp,
{
    if coll.catalog.is_empty() {
        return fail("no cards found.");
    }
    let scope = coll.catalog.scope(category)?;
    let mut session = Session::start(
        coll.store.get_state(),
        coll.catalog.cards(),
        scope,
        coll.config.quiz_every,
        clock(),
        rng,
    );
    if session.is_finished() {
        writeln!(output, "No cards to study.")?;
        return Ok(());
    }
    if session.is_review_all() {
        writeln!(
            output,
            "Nothing is due. Reviewing all {} cards.",
            session.remaining()
        )?;
    } else {
        writeln!(output, "{} cards due.", session.remaining())?;
    }

    'cards: while let Some(due) = session.current() {
        let label = match coll.catalog.category(due.card.category()) {
            Some(category) => format!("{} {}", category.icon, category.name),
            None => due.card.category().to_string(),
        };
        writeln!(output)?;
        writeln!(output, "[{label}] {} left", session.remaining())?;
        writeln!(output, "Q: {}", due.card.front())?;
        match prompt(input, output, "Press Enter to reveal, q to quit. ")?.as_deref() {
            None | Some("q") => break,
            _ => {}
        }
        writeln!(output, "A: {}", due.card.back())?;
        let answer = loop {
            match prompt(input, output, "[k]nown, [u]nknown, [a]rchive, [q]uit: ")?.as_deref() {
                None | Some("q") => break 'cards,
                Some("k") => break Answer::Known,
                Some("u") => break Answer::Unknown,
                Some("a") => break Answer::Archive,
                Some(other) => writeln!(output, "Unknown key: {other}")?,
            }
        };

        let outcome = session.answer(&coll.store, answer, clock())?;
        for def in outcome.unlocked {
            writeln!(output, "Achievement unlocked: {} ({})", def.label, def.desc)?;
        }
        if outcome.quiz_due {
            if let Some(quiz) = session.quick_quiz(rng) {
                if !run_quick_quiz(&quiz, input, output)? {
                    break;
                }
            }
        }
    }

    let now = clock();
    let today = get_today_stats(session.state(), now);
    writeln!(output)?;
    writeln!(output, "Answered {} cards.", session.answered())?;
    writeln!(
        output,
        "Today: {} reviewed, {} correct. Streak: {} days.",
        today.reviewed(),
        today.correct(),
        get_streak(session.state(), now)
    )?;
    Ok(())
}

/// Asks a quick quiz question. Returns `false` if the input ended.
fn run_quick_quiz<R: BufRead, W: Write>(
    quiz: &QuickQuiz,
    input: &mut R,
    output: &mut W,
) -> Fallible<bool> {
    writeln!(output)?;
    writeln!(output, "Quick quiz! {}", quiz.question)?;
    for (i, option) in quiz.options.iter().enumerate() {
        writeln!(output, "  {}) {}", option_label(i), option.text)?;
    }
    let choice = loop {
        let Some(line) = prompt(input, output, "Your answer: ")? else {
            return Ok(false);
        };
        match parse_choices(&line, quiz.options.len()) {
            Ok(choices) if choices.len() == 1 => {
                if let Some(choice) = choices.first() {
                    break *choice;
                }
            }
            Ok(_) => writeln!(output, "Pick exactly one option.")?,
            Err(e) => writeln!(output, "{e}")?,
        }
    };
    if quiz.is_correct(choice) {
        writeln!(output, "Correct!")?;
    } else if let Some(answer) = quiz.options.iter().find(|o| o.is_correct) {
        writeln!(output, "Wrong. The answer was: {}", answer.text)?;
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use chrono::TimeZone;
    use chrono::Utc;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tempfile::tempdir;

    use super::*;
    use crate::config::CONFIG_FILE;

    const DECK: &str = "SELECT? / Query\n\nJOIN? / Combine\n\nINDEX? / Lookup\n\nVIEW? / Stored query";

    fn now() -> Timestamp {
        Timestamp::new(Utc.with_ymd_and_hms(2025, 3, 12, 10, 0, 0).unwrap())
    }

    fn run(coll: &Collection, category: Option<&str>, input: &str) -> Fallible<String> {
        let mut input = input.as_bytes();
        let mut output = Vec::new();
        let mut rng = StdRng::seed_from_u64(11);
        run_study(coll, category, &mut input, &mut output, &mut rng, now)?;
        Ok(String::from_utf8_lossy(&output).into_owned())
    }

    #[test]
    fn test_study_session() -> Fallible<()> {
        let dir = tempdir()?;
        write(dir.path().join("sql.md"), DECK)?;
        write(dir.path().join(CONFIG_FILE), "quiz_every = 2")?;
        let coll = Collection::new(Some(dir.path().display().to_string()))?;

        let input = "\nk\n\nx\nk\na\n\na\nq\n";
        let output = run(&coll, None, input)?;
        assert!(output.contains("4 cards due."));
        assert!(output.contains("Achievement unlocked: First step"));
        assert!(output.contains("Unknown key: x"));
        assert!(output.contains("Quick quiz!"));
        assert!(output.contains("Answered 3 cards."));
        assert!(output.contains("Today: 3 reviewed, 3 correct. Streak: 1 days."));

        let state = coll.store.get_state();
        assert_eq!(state.total_reviewed, 3);
        assert_eq!(state.archived.len(), 1);
        assert!(state.achievements.contains_key("first"));
        Ok(())
    }

    #[test]
    fn test_end_of_input_stops() -> Fallible<()> {
        let dir = tempdir()?;
        write(dir.path().join("sql.md"), DECK)?;
        let coll = Collection::new(Some(dir.path().display().to_string()))?;
        let output = run(&coll, None, "\nu\n")?;
        assert!(output.contains("Answered 1 cards."));
        let state = coll.store.get_state();
        assert_eq!(state.total_reviewed, 1);
        assert_eq!(state.history[&now().date()].correct(), 0);
        Ok(())
    }

    #[test]
    fn test_review_all_when_nothing_due() -> Fallible<()> {
        let dir = tempdir()?;
        write(dir.path().join("sql.md"), DECK)?;
        write(dir.path().join("git.md"), "Commit? / Snapshot")?;
        let coll = Collection::new(Some(dir.path().display().to_string()))?;
        run(&coll, Some("git"), "\nk\n")?;
        let output = run(&coll, Some("git"), "q\n")?;
        assert!(output.contains("Nothing is due. Reviewing all 1 cards."));
        assert!(output.contains("[📚 git]"));
        Ok(())
    }

    #[test]
    fn test_unknown_category() -> Fallible<()> {
        let dir = tempdir()?;
        write(dir.path().join("sql.md"), DECK)?;
        let coll = Collection::new(Some(dir.path().display().to_string()))?;
        assert!(run(&coll, Some("nope"), "").is_err());
        Ok(())
    }

    #[test]
    fn test_empty_collection() -> Fallible<()> {
        let dir = tempdir()?;
        let coll = Collection::new(Some(dir.path().display().to_string()))?;
        assert_eq!(
            run(&coll, None, "").err().map(|e| e.to_string()),
            Some("error: no cards found.".to_string())
        );
        Ok(())
    }

    #[test]
    fn test_everything_archived() -> Fallible<()> {
        let dir = tempdir()?;
        write(dir.path().join("git.md"), "Commit? / Snapshot")?;
        let coll = Collection::new(Some(dir.path().display().to_string()))?;
        run(&coll, None, "\na\n")?;
        assert_eq!(run(&coll, None, "")?, "No cards to study.\n");
        Ok(())
    }
}
