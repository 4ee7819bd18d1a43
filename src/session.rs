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
use std::collections::VecDeque;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::achievements::AchievementDef;
use crate::achievements::check_achievements;
use crate::error::Fallible;
use crate::error::fail;
use crate::quiz::QUICK_QUIZ_OPTIONS;
use crate::quiz::QuickQuiz;
use crate::scheduler::DueCard;
use crate::scheduler::archive_card;
use crate::scheduler::get_due_cards;
use crate::scheduler::mark_known;
use crate::scheduler::mark_unknown;
use crate::store::ProgressStore;
use crate::store::Storage;
use crate::types::card::Card;
use crate::types::card::CardId;
use crate::types::progress::ProgressState;
use crate::types::timestamp::Timestamp;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Answer {
    Known,
    Unknown,
    Archive,
}

#[derive(Debug)]
pub struct Outcome {
    /// Achievements unlocked by this answer.
    pub unlocked: Vec<&'static AchievementDef>,
    /// Whether a quick quiz should be shown now.
    pub quiz_due: bool,
}

/// A study session over the cards in scope. The session owns the latest
/// progress snapshot and saves it after every answer.
pub struct Session<'a> {
    cards: &'a [Card],
    scope: BTreeSet<CardId>,
    queue: VecDeque<CardId>,
    state: ProgressState,
    answered: usize,
    quiz_every: usize,
    review_all: bool,
}

impl<'a> Session<'a> {
    /// Queues the due cards in scope in random order. If nothing is due,
    /// queues every card in scope that isn't archived.
    pub fn start<R: Rng + ?Sized>(
        state: ProgressState,
        cards: &'a [Card],
        scope: BTreeSet<CardId>,
        quiz_every: usize,
        now: Timestamp,
        rng: &mut R,
    ) -> Self {
        let mut queue: Vec<CardId> = get_due_cards(&state, cards, Some(&scope), now)
            .into_iter()
            .map(|due| due.index)
            .collect();
        let review_all = queue.is_empty();
        if review_all {
            queue = scope
                .iter()
                .copied()
                .filter(|id| *id < cards.len() && !state.archived.contains(id))
                .collect();
            log::debug!("Nothing due; reviewing all {} cards.", queue.len());
        } else {
            log::debug!("{} cards due.", queue.len());
        }
        queue.shuffle(rng);
        Self {
            cards,
            scope,
            queue: queue.into(),
            state,
            answered: 0,
            quiz_every,
            review_all,
        }
    }

    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    pub fn current(&self) -> Option<DueCard<'a>> {
        let index = *self.queue.front()?;
        let card = self.cards.get(index)?;
        Some(DueCard { index, card })
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn answered(&self) -> usize {
        self.answered
    }

    pub fn is_finished(&self) -> bool {
        self.queue.is_empty()
    }

    /// True if the queue holds every active card because none were due.
    pub fn is_review_all(&self) -> bool {
        self.review_all
    }

    /// Applies an answer to the current card and saves the new state. If the
    /// save fails, the session is left as it was.
    pub fn answer<S: Storage>(
        &mut self,
        store: &ProgressStore<S>,
        answer: Answer,
        now: Timestamp,
    ) -> Fallible<Outcome> {
        let Some(&card) = self.queue.front() else {
            return fail("no card to answer.");
        };
        let next = match answer {
            Answer::Known => mark_known(&self.state, card, now),
            Answer::Unknown => mark_unknown(&self.state, card, now),
            Answer::Archive => archive_card(&self.state, card, now),
        };
        let check = check_achievements(&next, now);
        store.save_state(&check.state)?;

        self.state = check.state;
        self.queue.pop_front();
        if answer == Answer::Unknown {
            self.queue.push_back(card);
        }
        self.answered += 1;
        let quiz_due = self.quiz_every > 0
            && self.answered % self.quiz_every == 0
            && self.scope.len() >= QUICK_QUIZ_OPTIONS;
        Ok(Outcome {
            unlocked: check.unlocked,
            quiz_due,
        })
    }

    /// A quick quiz over the cards in scope. Doesn't touch progress.
    pub fn quick_quiz<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<QuickQuiz> {
        let pool: Vec<&Card> = self
            .scope
            .iter()
            .filter_map(|id| self.cards.get(*id))
            .collect();
        QuickQuiz::generate(&pool, rng)
    }
}
