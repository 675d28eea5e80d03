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

//! Registry of contracts deployed together
//!
//! Contracts are added one location at a time, their imports are resolved
//! against each other and the alias table, and the registry is then sorted
//! into an order where every contract follows the contracts it imports.

use crate::address::Address;
use crate::config::ResolverConfig;
use crate::contract::{Contract, ContractId, Dependency};
use crate::error::{ContractError, ContractResult};
use crate::graph::sort_contracts;
use crate::loader::Loader;
use crate::plan::DeploymentPlan;
use crate::transpiler::RewriteStrategy;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, instrument, warn};

/// What an import location resolved to
enum Resolution {
    Dependency(Dependency),
    Alias(Address),
}

/// Contracts of one deployment run
#[derive(Debug)]
pub struct Deployments<L> {
    loader: L,
    aliases: BTreeMap<String, Address>,
    rewrite: RewriteStrategy,
    /// Indexed by contract id
    contracts: Vec<Contract>,
    order: Vec<ContractId>,
    by_location: HashMap<String, ContractId>,
}

impl<L: Loader> Deployments<L> {
    /// Registry resolving unknown imports through `aliases`
    ///
    /// Fails with [`ContractError::InvalidAddress`] on a bad alias address.
    pub fn new(loader: L, aliases: HashMap<String, String>) -> ContractResult<Self> {
        Self::with_config(loader, &ResolverConfig::from(aliases))
    }

    pub fn with_config(loader: L, config: &ResolverConfig) -> ContractResult<Self> {
        Ok(Self {
            loader,
            aliases: config.aliases()?,
            rewrite: config.rewrite,
            contracts: Vec::new(),
            order: Vec::new(),
            by_location: HashMap::new(),
        })
    }

    /// Load, parse and register the contract at `location`
    #[instrument(skip(self, args), fields(account = %account_name))]
    pub fn add(
        &mut self,
        location: &str,
        account_address: Address,
        account_name: &str,
        args: Vec<serde_json::Value>,
    ) -> ContractResult<&Contract> {
        if self.by_location.contains_key(location) {
            return Err(ContractError::DuplicateLocation {
                location: location.to_string(),
            });
        }

        let bytes = self.loader.load(location).map_err(|source| ContractError::Load {
            location: location.to_string(),
            source,
        })?;
        let code = String::from_utf8(bytes).map_err(|source| ContractError::InvalidEncoding {
            location: location.to_string(),
            source,
        })?;

        let id = ContractId::new(self.contracts.len());
        let contract = Contract::new(id, location, code, account_address, account_name, args)?;
        debug!(
            id = id.index(),
            name = contract.name(),
            imports = contract.imports().len(),
            "added contract"
        );

        self.by_location.insert(location.to_string(), id);
        self.order.push(id);
        self.contracts.push(contract);
        Ok(&self.contracts[id.index()])
    }

    /// Resolve every import to another registered contract or an alias
    ///
    /// Fails on the first import, in registration then declaration order,
    /// that matches neither. Running it again records the same entries.
    #[instrument(skip(self), fields(contracts = self.contracts.len()))]
    pub fn resolve_imports(&mut self) -> ContractResult<()> {
        let mut resolutions = Vec::new();

        for contract in &self.contracts {
            for location in contract.import_locations() {
                let resolution = if let Some(&id) = self.by_location.get(location) {
                    let imported = &self.contracts[id.index()];
                    Resolution::Dependency(Dependency {
                        id,
                        name: imported.name().to_string(),
                        target: imported.target(),
                    })
                } else if let Some(&address) = self.aliases.get(location) {
                    Resolution::Alias(address)
                } else {
                    warn!(contract = contract.name(), location, "unresolved import");
                    return Err(ContractError::UnresolvedImport {
                        contract: contract.name().to_string(),
                        location: location.to_string(),
                    });
                };
                resolutions.push((contract.id(), location.to_string(), resolution));
            }
        }

        for (id, location, resolution) in resolutions {
            let contract = &mut self.contracts[id.index()];
            match resolution {
                Resolution::Dependency(dependency) => {
                    debug!(contract = contract.name(), location = %location, dependency = %dependency.name, "recorded dependency");
                    contract.add_dependency(&location, dependency);
                }
                Resolution::Alias(address) => {
                    debug!(contract = contract.name(), location = %location, %address, "recorded alias");
                    contract.add_alias(&location, address);
                }
            }
        }

        Ok(())
    }

    /// Resolve imports and put the contracts in deployment order
    ///
    /// On failure the current order is left as it was.
    #[instrument(skip(self), fields(contracts = self.contracts.len()))]
    pub fn sort(&mut self) -> ContractResult<()> {
        self.resolve_imports()?;

        let order = sort_contracts(&self.contracts).map_err(|err| {
            warn!(cycles = err.cycles.len(), "import cycles detected");
            ContractError::CyclicImport(err)
        })?;

        info!(
            order = ?order.iter().map(|id| self.contracts[id.index()].name()).collect::<Vec<_>>(),
            "computed deployment order"
        );
        self.order = order;
        Ok(())
    }

    /// Contracts in current order: registration order until sorted
    pub fn contracts(&self) -> impl Iterator<Item = &Contract> {
        self.order.iter().map(|id| &self.contracts[id.index()])
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    /// Contract registered at `location`
    pub fn contract(&self, location: &str) -> Option<&Contract> {
        self.by_location.get(location).map(|id| &self.contracts[id.index()])
    }

    pub fn get(&self, id: ContractId) -> Option<&Contract> {
        self.contracts.get(id.index())
    }

    pub fn aliases(&self) -> &BTreeMap<String, Address> {
        &self.aliases
    }

    pub fn rewrite_strategy(&self) -> RewriteStrategy {
        self.rewrite
    }

    /// Contracts in current order with their transpiled code
    pub fn plan(&self) -> DeploymentPlan {
        DeploymentPlan::from_contracts(self.contracts(), self.rewrite)
    }
}
