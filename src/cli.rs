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

use std::path::PathBuf;

use clap::Parser;

use crate::cmd::check::check_collection;
use crate::cmd::quiz::take_quiz;
use crate::cmd::reset::reset;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::print_stats;
use crate::cmd::study::study;
use crate::error::Fallible;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Study the cards that are due.
    Study {
        /// Optional path to the collection directory.
        directory: Option<String>,
        /// Only study cards from this category.
        #[arg(long)]
        category: Option<String>,
    },
    /// Print progress statistics.
    Stats {
        /// Optional path to the collection directory.
        directory: Option<String>,
        /// Only count cards from this category.
        #[arg(long)]
        category: Option<String>,
        /// Output format.
        #[arg(long, default_value_t = StatsFormat::Text)]
        format: StatsFormat,
    },
    /// Check the collection for errors.
    Check {
        /// Optional path to the collection directory.
        directory: Option<String>,
    },
    /// Clear all saved progress.
    Reset {
        /// Optional path to the collection directory.
        directory: Option<String>,
        /// Don't ask for confirmation.
        #[arg(long)]
        yes: bool,
        /// Delete the saved progress instead of emptying it.
        #[arg(long)]
        purge: bool,
    },
    /// Take a multiple-choice quiz.
    Quiz {
        /// Path to the question bank (JSON).
        bank: PathBuf,
        /// Number of questions. Defaults to 10, or fewer if the bank is smaller.
        #[arg(long)]
        count: Option<usize>,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Study {
            directory,
            category,
        } => study(directory, category),
        Command::Stats {
            directory,
            category,
            format,
        } => print_stats(directory, category, format),
        Command::Check { directory } => check_collection(directory),
        Command::Reset {
            directory,
            yes,
            purge,
        } => reset(directory, yes, purge),
        Command::Quiz { bank, count } => take_quiz(bank, count),
    }
}
