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

use crate::error::Fallible;

pub mod check;
pub mod quiz;
pub mod reset;
pub mod stats;
pub mod study;

/// Writes a prompt and reads one line of input. Returns `None` at end of
/// input.
pub fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    text: &str,
) -> Fallible<Option<String>> {
    write!(output, "{text}")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt() -> Fallible<()> {
        let mut input: &[u8] = b"  yes \nno\n";
        let mut output = Vec::new();
        assert_eq!(prompt(&mut input, &mut output, "? ")?, Some("yes".to_string()));
        assert_eq!(prompt(&mut input, &mut output, "? ")?, Some("no".to_string()));
        assert_eq!(prompt(&mut input, &mut output, "? ")?, None);
        assert_eq!(String::from_utf8_lossy(&output), "? ? ? ");
        Ok(())
    }
}
