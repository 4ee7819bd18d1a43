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

use chrono::TimeDelta;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;

/// Review delays in days, indexed by level.
pub const INTERVALS: [i64; 7] = [0, 1, 3, 7, 14, 30, 60];

/// A card's mastery rung. Always a valid index into [`INTERVALS`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Level(u8);

impl Level {
    pub const ZERO: Self = Self(0);
    pub const MAX: Self = Self((INTERVALS.len() - 1) as u8);

    pub const fn new(value: u8) -> Option<Self> {
        if value <= Self::MAX.0 {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// The next rung, capped at [`Level::MAX`].
    pub fn promote(self) -> Self {
        Self(self.0.saturating_add(1).min(Self::MAX.0))
    }

    pub fn interval(self) -> TimeDelta {
        TimeDelta::days(INTERVALS[self.0 as usize])
    }
}

impl TryFrom<u8> for Level {
    type Error = ErrorReport;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Level::new(value).ok_or_else(|| ErrorReport::new(format!("invalid level: {value}")))
    }
}

impl From<Level> for u8 {
    fn from(value: Level) -> Self {
        value.0
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
