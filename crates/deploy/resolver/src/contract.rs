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

//! A contract queued for deployment

use crate::address::Address;
use crate::error::{ContractError, ContractResult};
use crate::parser::{CadenceParser, SourceImport, SourceUnit};
use crate::transpiler::{RewriteStrategy, rewrite_first_occurrence, rewrite_import_spans};
use std::collections::BTreeMap;
use std::fmt;

/// Handle of a contract inside a registry, equal to its registration index
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContractId(usize);

impl ContractId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An import resolved to another contract of the same batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub id: ContractId,
    pub name: String,
    pub target: Address,
}

/// Contract source with its deployment target and resolved imports
#[derive(Debug, Clone)]
pub struct Contract {
    id: ContractId,
    name: String,
    location: String,
    code: String,
    args: Vec<serde_json::Value>,
    target: Address,
    account_name: String,
    imports: Vec<SourceImport>,
    dependencies: BTreeMap<String, Dependency>,
    aliases: BTreeMap<String, Address>,
}

impl Contract {
    /// Parse `code` and build a contract from it
    ///
    /// Fails when the code does not parse or does not declare exactly one
    /// contract or contract interface.
    pub fn new(
        id: ContractId,
        location: impl Into<String>,
        code: impl Into<String>,
        target: Address,
        account_name: impl Into<String>,
        args: Vec<serde_json::Value>,
    ) -> ContractResult<Self> {
        let location = location.into();
        let code = code.into();

        let program = CadenceParser::new().parse_program(&code).map_err(|source| ContractError::Parse {
            source: source.with_context(location.clone()),
            location: location.clone(),
        })?;

        let count = SourceUnit::declaration_count(&program);
        if count != 1 {
            return Err(ContractError::MultipleDeclarations { location, count });
        }

        let unit = SourceUnit::from_program(&program);
        Ok(Self {
            id,
            name: unit.name,
            location,
            code,
            args,
            target,
            account_name: account_name.into(),
            imports: unit.imports,
            dependencies: BTreeMap::new(),
            aliases: BTreeMap::new(),
        })
    }

    pub fn id(&self) -> ContractId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Source as loaded, before any rewrite
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn args(&self) -> &[serde_json::Value] {
        &self.args
    }

    /// Account address the contract deploys to
    pub fn target(&self) -> Address {
        self.target
    }

    pub fn account_name(&self) -> &str {
        &self.account_name
    }

    pub fn imports(&self) -> &[SourceImport] {
        &self.imports
    }

    /// String import locations in declaration order
    pub fn import_locations(&self) -> impl Iterator<Item = &str> {
        self.imports.iter().map(|import| import.location.as_str())
    }

    pub fn has_imports(&self) -> bool {
        !self.imports.is_empty()
    }

    pub fn dependencies(&self) -> &BTreeMap<String, Dependency> {
        &self.dependencies
    }

    pub fn aliases(&self) -> &BTreeMap<String, Address> {
        &self.aliases
    }

    pub(crate) fn add_dependency(&mut self, location: &str, dependency: Dependency) {
        self.aliases.remove(location);
        self.dependencies.insert(location.to_string(), dependency);
    }

    pub(crate) fn add_alias(&mut self, location: &str, address: Address) {
        self.dependencies.remove(location);
        self.aliases.insert(location.to_string(), address);
    }

    /// Address a location was resolved to, if it was
    pub fn resolved_address(&self, location: &str) -> Option<Address> {
        self.dependencies
            .get(location)
            .map(|dependency| dependency.target)
            .or_else(|| self.aliases.get(location).copied())
    }

    /// Source with resolved imports replaced by address literals
    pub fn transpiled_code(&self) -> String {
        self.transpiled_code_with(RewriteStrategy::default())
    }

    pub fn transpiled_code_with(&self, strategy: RewriteStrategy) -> String {
        match strategy {
            RewriteStrategy::ImportSpans => {
                rewrite_import_spans(&self.code, &self.imports, |location| self.resolved_address(location))
            }
            RewriteStrategy::FirstOccurrence => {
                let dependencies = self
                    .dependencies
                    .iter()
                    .map(|(location, dependency)| (location.as_str(), dependency.target));
                let aliases = self.aliases.iter().map(|(location, address)| (location.as_str(), *address));
                rewrite_first_occurrence(&self.code, dependencies.chain(aliases))
            }
        }
    }
}
