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

//! Error handling for contract resolution

use crate::config::ConfigError;
use crate::contract::ContractId;
use crate::loader::LoaderError;
use crate::parser::ParseError;
use std::fmt;
use std::string::FromUtf8Error;
use thiserror::Error;

/// Result type for resolver operations
pub type ContractResult<T> = Result<T, ContractError>;

/// Errors that can occur while registering, resolving and sorting contracts
#[derive(Error, Debug)]
pub enum ContractError {
    // Source errors
    #[error("failed to parse contract {location}: {source}")]
    Parse {
        location: String,
        #[source]
        source: ParseError,
    },

    #[error("the code must declare exactly one contract or contract interface, {location} declares {count}")]
    MultipleDeclarations { location: String, count: usize },

    // Registry errors
    #[error("failed to load contract {location}: {source}")]
    Load {
        location: String,
        #[source]
        source: LoaderError,
    },

    #[error("contract {location} is not valid UTF-8: {source}")]
    InvalidEncoding {
        location: String,
        #[source]
        source: FromUtf8Error,
    },

    #[error("contract location {location} is already registered")]
    DuplicateLocation { location: String },

    // Resolution errors
    #[error("import from {contract} could not be found: {location}, make sure import path is correct")]
    UnresolvedImport { contract: String, location: String },

    #[error(transparent)]
    CyclicImport(#[from] CyclicImportError),

    // Configuration errors
    #[error("invalid address {value:?}: {reason}")]
    InvalidAddress { value: String, reason: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ContractError {
    /// Location of the contract the error is about, when there is one
    pub fn location(&self) -> Option<&str> {
        match self {
            ContractError::Parse { location, .. }
            | ContractError::MultipleDeclarations { location, .. }
            | ContractError::Load { location, .. }
            | ContractError::InvalidEncoding { location, .. }
            | ContractError::DuplicateLocation { location } => Some(location),
            _ => None,
        }
    }
}

/// A contract taking part in an import cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleMember {
    pub id: ContractId,
    pub name: String,
    pub location: String,
}

/// Returned when contracts import each other in a loop, which makes a
/// deployment order impossible
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct CyclicImportError {
    /// Every cycle found, each listing its contracts
    pub cycles: Vec<Vec<CycleMember>>,
}

impl CyclicImportError {
    pub fn new(cycles: Vec<Vec<CycleMember>>) -> Self {
        Self { cycles }
    }

    /// Cycles as lists of contract names
    pub fn contract_names(&self) -> Vec<Vec<String>> {
        self.cycles
            .iter()
            .map(|cycle| cycle.iter().map(|member| member.name.clone()).collect())
            .collect()
    }
}

impl fmt::Display for CyclicImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cycles: Vec<String> = self.contract_names().iter().map(|names| format!("[{}]", names.join(" "))).collect();
        write!(f, "contracts: import cycle(s) detected: [{}]", cycles.join(" "))
    }
}
