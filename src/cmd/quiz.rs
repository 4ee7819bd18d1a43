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
use std::io::BufRead;
use std::io::Write;
use std::io::stdin;
use std::io::stdout;
use std::path::PathBuf;

use rand::Rng;
use rand::thread_rng;

use crate::cmd::prompt;
use crate::error::Fallible;
use crate::quiz::QuestionBank;
use crate::quiz::QuizResults;
use crate::quiz::Verdict;
use crate::quiz::option_label;
use crate::quiz::parse_choices;
use crate::quiz::score;

/// Questions per quiz when no count is given.
pub const DEFAULT_COUNT: usize = 10;

pub fn take_quiz(bank: PathBuf, count: Option<usize>) -> Fallible<()> {
    let bank = QuestionBank::load(&bank)?;
    let count = count.unwrap_or(bank.len().min(DEFAULT_COUNT));
    let stdin = stdin();
    let mut input = stdin.lock();
    let mut output = stdout().lock();
    let mut rng = thread_rng();
    run_quiz(&bank, count, &mut input, &mut output, &mut rng)?;
    Ok(())
}

/// Asks `count` random questions from the bank and prints the results. If
/// the input ends early, the remaining questions count as unanswered.
pub fn run_quiz<R: BufRead, W: Write, G: Rng>(
    bank: &QuestionBank,
    count: usize,
    input: &mut R,
    output: &mut W,
    rng: &mut G,
) -> Fallible<QuizResults> {
    let questions = bank.draw(count, rng)?;
    let mut answers: Vec<BTreeSet<usize>> = Vec::with_capacity(questions.len());
    'questions: for (i, question) in questions.iter().enumerate() {
        writeln!(output)?;
        writeln!(
            output,
            "Question {}/{}: {}",
            i + 1,
            questions.len(),
            question.question
        )?;
        for (j, option) in question.options.iter().enumerate() {
            writeln!(output, "  {}) {}", option_label(j), option.text)?;
        }
        let selected = loop {
            let Some(line) = prompt(input, output, "Answer (one or more letters): ")? else {
                break 'questions;
            };
            match parse_choices(&line, question.options.len()) {
                Ok(choices) if !choices.is_empty() => break choices,
                Ok(_) => writeln!(output, "Pick at least one option.")?,
                Err(e) => writeln!(output, "{e}")?,
            }
        };
        let verdict = question.grade(&selected);
        match verdict {
            Verdict::Correct => writeln!(output, "Correct!")?,
            Verdict::Partial => writeln!(output, "Partially correct.")?,
            Verdict::Wrong => writeln!(output, "Wrong.")?,
        }
        if verdict != Verdict::Correct {
            let correct: Vec<&str> = question
                .options
                .iter()
                .filter(|o| o.is_correct)
                .map(|o| o.text.as_str())
                .collect();
            writeln!(output, "Correct answer: {}", correct.join(", "))?;
        }
        answers.push(selected);
    }

    let results = score(&questions, &answers);
    writeln!(output)?;
    writeln!(
        output,
        "Score: {}/{} ({}%). {} partial, {} wrong.",
        results.correct, results.total, results.percent, results.partial, results.wrong
    )?;
    writeln!(output, "{}", results.grade_label())?;
    Ok(results)
}
