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

//! Serializable deployment plan

use crate::address::Address;
use crate::contract::Contract;
use crate::transpiler::RewriteStrategy;
use serde::{Deserialize, Serialize};

/// One contract ready to deploy, with imports already rewritten
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedContract {
    pub name: String,
    pub location: String,
    pub account_address: Address,
    pub account_name: String,
    pub args: Vec<serde_json::Value>,
    pub code: String,
}

impl PlannedContract {
    pub fn from_contract(contract: &Contract, strategy: RewriteStrategy) -> Self {
        Self {
            name: contract.name().to_string(),
            location: contract.location().to_string(),
            account_address: contract.target(),
            account_name: contract.account_name().to_string(),
            args: contract.args().to_vec(),
            code: contract.transpiled_code_with(strategy),
        }
    }
}

/// Contracts in the order they are to be deployed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentPlan {
    pub contracts: Vec<PlannedContract>,
}

impl DeploymentPlan {
    pub fn from_contracts<'a>(contracts: impl IntoIterator<Item = &'a Contract>, strategy: RewriteStrategy) -> Self {
        Self {
            contracts: contracts
                .into_iter()
                .map(|contract| PlannedContract::from_contract(contract, strategy))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.contracts.iter().map(|contract| contract.name.as_str()).collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
