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

//! Multiple-choice quizzes: graded quizzes over a question bank, and the
//! quick quizzes that interrupt a study session.

use std::collections::BTreeSet;
use std::fs::read_to_string;
use std::path::Path;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::card::Card;

/// The number of options in a quick quiz.
pub const QUICK_QUIZ_OPTIONS: usize = 4;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuestionBank {
    pub questions: Vec<Question>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<QuizOption>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct QuizOption {
    pub text: String,
    pub is_correct: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Exactly the correct options were selected.
    Correct,
    /// Some correct option was selected, but not exactly the right set.
    Partial,
    Wrong,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct QuizResults {
    pub correct: usize,
    pub partial: usize,
    pub wrong: usize,
    pub total: usize,
    /// Share of fully correct answers, rounded to a whole percent.
    pub percent: u32,
}

impl QuestionBank {
    pub fn load(path: &Path) -> Fallible<Self> {
        if !path.exists() {
            return fail("question bank does not exist.");
        }
        let content = read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Fallible<Self> {
        let bank: QuestionBank = serde_json::from_str(content)?;
        if bank.questions.is_empty() {
            return fail("question bank is empty.");
        }
        for (i, question) in bank.questions.iter().enumerate() {
            if question.options.is_empty() {
                return fail(format!("question {} has no options.", i + 1));
            }
            if !question.options.iter().any(|o| o.is_correct) {
                return fail(format!("question {} has no correct option.", i + 1));
            }
            if question.options.len() > 26 {
                return fail(format!("question {} has too many options.", i + 1));
            }
        }
        Ok(bank)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Picks `count` random questions, each with its options shuffled.
    pub fn draw<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Fallible<Vec<Question>> {
        if count == 0 || count > self.questions.len() {
            return fail(format!(
                "question count must be between 1 and {}.",
                self.questions.len()
            ));
        }
        let mut questions = self.questions.clone();
        questions.shuffle(rng);
        questions.truncate(count);
        for question in questions.iter_mut() {
            question.options.shuffle(rng);
        }
        Ok(questions)
    }
}

impl Question {
    pub fn correct_set(&self) -> BTreeSet<usize> {
        self.options
            .iter()
            .enumerate()
            .filter(|(_, option)| option.is_correct)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn grade(&self, selected: &BTreeSet<usize>) -> Verdict {
        let correct = self.correct_set();
        if *selected == correct {
            Verdict::Correct
        } else if !selected.is_disjoint(&correct) {
            Verdict::Partial
        } else {
            Verdict::Wrong
        }
    }
}

/// Grades a finished quiz. Missing answers count as empty selections.
pub fn score(questions: &[Question], answers: &[BTreeSet<usize>]) -> QuizResults {
    let empty = BTreeSet::new();
    let mut results = QuizResults {
        correct: 0,
        partial: 0,
        wrong: 0,
        total: questions.len(),
        percent: 0,
    };
    for (i, question) in questions.iter().enumerate() {
        match question.grade(answers.get(i).unwrap_or(&empty)) {
            Verdict::Correct => results.correct += 1,
            Verdict::Partial => results.partial += 1,
            Verdict::Wrong => results.wrong += 1,
        }
    }
    if results.total > 0 {
        results.percent = (results.correct as f64 / results.total as f64 * 100.0).round() as u32;
    }
    results
}

impl QuizResults {
    pub fn grade_label(&self) -> &'static str {
        match self.percent {
            90.. => "Excellent!",
            70.. => "Very good!",
            50.. => "Not bad!",
            _ => "Try again",
        }
    }
}

/// A single-answer question built from flashcards: one card's front as the
/// prompt, its back among the backs of other cards.
#[derive(Debug)]
pub struct QuickQuiz {
    pub question: String,
    pub options: Vec<QuizOption>,
}

impl QuickQuiz {
    /// Returns `None` if there are too few cards to fill the options.
    pub fn generate<R: Rng + ?Sized>(cards: &[&Card], rng: &mut R) -> Option<Self> {
        if cards.len() < QUICK_QUIZ_OPTIONS {
            return None;
        }
        let mut picked: Vec<&Card> = cards
            .choose_multiple(rng, QUICK_QUIZ_OPTIONS)
            .copied()
            .collect();
        picked.shuffle(rng);
        let answer = picked[0];
        let mut options: Vec<QuizOption> = picked
            .iter()
            .enumerate()
            .map(|(i, card)| QuizOption {
                text: card.back().to_string(),
                is_correct: i == 0,
            })
            .collect();
        options.shuffle(rng);
        Some(Self {
            question: answer.front().to_string(),
            options,
        })
    }

    pub fn is_correct(&self, choice: usize) -> bool {
        self.options.get(choice).is_some_and(|o| o.is_correct)
    }
}

/// The letter shown next to the option at `index`.
pub fn option_label(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}

/// Parses an answer like `"a c"` or `"AC"` into option indices.
pub fn parse_choices(input: &str, option_count: usize) -> Fallible<BTreeSet<usize>> {
    let mut choices = BTreeSet::new();
    for c in input.chars() {
        if c.is_whitespace() || c == ',' {
            continue;
        }
        let upper = c.to_ascii_uppercase();
        if !upper.is_ascii_uppercase() {
            return fail(format!("invalid choice: {c}"));
        }
        let index = (upper as u8 - b'A') as usize;
        if index >= option_count {
            return fail(format!("invalid choice: {c}"));
        }
        choices.insert(index);
    }
    Ok(choices)
}
