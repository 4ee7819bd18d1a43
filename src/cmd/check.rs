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

use crate::collection::Collection;
use crate::error::Fallible;
use crate::error::fail;

pub fn check_collection(directory: Option<String>) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    if coll.catalog.is_empty() {
        return fail("no cards found.");
    }
    log::debug!(
        "{} cards in {} categories.",
        coll.catalog.len(),
        coll.catalog.categories().len()
    );
    println!("ok");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::tempdir;

    use super::check_collection;
    use crate::error::Fallible;

    #[test]
    fn test_non_existent_directory() {
        assert!(check_collection(Some("./derpherp".to_string())).is_err());
    }

    #[test]
    fn test_directory() -> Fallible<()> {
        let dir = tempdir()?;
        write(dir.path().join("sql.md"), "SELECT? / Query")?;
        assert!(check_collection(Some(dir.path().display().to_string())).is_ok());
        Ok(())
    }

    #[test]
    fn test_empty_directory() -> Fallible<()> {
        let dir = tempdir()?;
        assert!(check_collection(Some(dir.path().display().to_string())).is_err());
        Ok(())
    }

    #[test]
    fn test_bad_config() -> Fallible<()> {
        let dir = tempdir()?;
        write(dir.path().join("sql.md"), "SELECT? / Query")?;
        write(dir.path().join("flashcards.toml"), "quiz_every = \"often\"")?;
        assert!(check_collection(Some(dir.path().display().to_string())).is_err());
        Ok(())
    }
}
