// Dotlanth
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Rewrites import locations in contract source into account addresses

use crate::address::Address;
use crate::parser::SourceImport;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How resolved import locations are substituted into the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RewriteStrategy {
    /// Replace the literal of each import declaration by its byte span
    #[default]
    ImportSpans,
    /// Replace the first textual occurrence of each quoted location
    FirstOccurrence,
}

impl fmt::Display for RewriteStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewriteStrategy::ImportSpans => write!(f, "import-spans"),
            RewriteStrategy::FirstOccurrence => write!(f, "first-occurrence"),
        }
    }
}

/// Substitute the literal of every import whose location resolves
///
/// Imports are spliced in span order; unresolved ones keep their text.
pub fn rewrite_import_spans<F>(code: &str, imports: &[SourceImport], resolve: F) -> String
where
    F: Fn(&str) -> Option<Address>,
{
    let mut ordered: Vec<&SourceImport> = imports.iter().collect();
    ordered.sort_by_key(|import| import.span.start.offset);

    let mut output = String::with_capacity(code.len());
    let mut cursor = 0;
    for import in ordered {
        let Some(address) = resolve(&import.location) else {
            continue;
        };
        let range = import.span.range();
        if range.start < cursor || range.end > code.len() {
            continue;
        }
        output.push_str(&code[cursor..range.start]);
        output.push_str(&address.to_hex_literal());
        cursor = range.end;
    }
    output.push_str(&code[cursor..]);
    output
}

/// Replace the first occurrence of `"<location>"` for each pair, in order
pub fn rewrite_first_occurrence<'a, I>(code: &str, replacements: I) -> String
where
    I: IntoIterator<Item = (&'a str, Address)>,
{
    let mut output = code.to_string();
    for (location, address) in replacements {
        let quoted = format!("\"{location}\"");
        output = output.replacen(&quoted, &address.to_hex_literal(), 1);
    }
    output
}
