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

use crate::cmd::prompt;
use crate::collection::Collection;
use crate::error::Fallible;
use crate::store::ProgressStore;
use crate::store::Storage;

pub fn reset(directory: Option<String>, yes: bool, purge: bool) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    let stdin = stdin();
    let mut input = stdin.lock();
    let mut output = stdout().lock();
    run_reset(&coll.store, yes, purge, &mut input, &mut output)
}

/// Clears saved progress, asking for confirmation unless `yes` is set.
/// With `purge`, the progress slot is deleted rather than emptied.
pub fn run_reset<S: Storage, R: BufRead, W: Write>(
    store: &ProgressStore<S>,
    yes: bool,
    purge: bool,
    input: &mut R,
    output: &mut W,
) -> Fallible<()> {
    if !yes {
        let answer = prompt(input, output, "Reset all progress? [y/N] ")?;
        if !matches!(answer.as_deref(), Some("y" | "Y" | "yes")) {
            writeln!(output, "Aborted.")?;
            return Ok(());
        }
    }
    if purge {
        store.purge()?;
        writeln!(output, "Progress deleted.")?;
    } else {
        store.reset_progress()?;
        writeln!(output, "Progress reset.")?;
    }
    Ok(())
}
