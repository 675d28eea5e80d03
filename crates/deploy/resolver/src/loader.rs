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

//! Source loading collaborator
//!
//! The resolver never reads files or talks to the network itself; it asks a
//! [`Loader`] for the bytes behind a location.

use std::collections::HashMap;
use std::fmt;

#[cfg(test)]
use mockall::automock;

/// Error type loaders report failures with
pub type LoaderError = Box<dyn std::error::Error + Send + Sync>;

/// Fetches contract source for a location
///
/// Must return the same bytes for a location within one deployment run.
#[cfg_attr(test, automock)]
pub trait Loader {
    fn load(&self, location: &str) -> Result<Vec<u8>, LoaderError>;
}

impl<F> Loader for F
where
    F: Fn(&str) -> Result<Vec<u8>, LoaderError>,
{
    fn load(&self, location: &str) -> Result<Vec<u8>, LoaderError> {
        self(location)
    }
}

/// Returned by [`MemoryLoader`] for unknown locations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceNotFound {
    pub location: String,
}

impl fmt::Display for SourceNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no source registered for {}", self.location)
    }
}

impl std::error::Error for SourceNotFound {}

/// Loader over sources already held in memory
///
/// Useful when sources were fetched up front, for example concurrently, and
/// only need to be handed to the registry.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    sources: HashMap<String, Vec<u8>>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register source for a location, replacing any previous source
    pub fn insert(&mut self, location: impl Into<String>, source: impl Into<Vec<u8>>) -> &mut Self {
        self.sources.insert(location.into(), source.into());
        self
    }

    pub fn with_source(mut self, location: impl Into<String>, source: impl Into<Vec<u8>>) -> Self {
        self.insert(location, source);
        self
    }

    pub fn contains(&self, location: &str) -> bool {
        self.sources.contains_key(location)
    }
}

impl Loader for MemoryLoader {
    fn load(&self, location: &str) -> Result<Vec<u8>, LoaderError> {
        self.sources.get(location).cloned().ok_or_else(|| {
            Box::new(SourceNotFound {
                location: location.to_string(),
            }) as LoaderError
        })
    }
}

impl<K: Into<String>, V: Into<Vec<u8>>> FromIterator<(K, V)> for MemoryLoader {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut loader = MemoryLoader::new();
        for (location, source) in iter {
            loader.insert(location, source);
        }
        loader
    }
}
