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

//! Deployment resolver for Cadence contracts
//!
//! Given contracts that import each other by location, the resolver:
//! - parses each contract for its name and string imports
//! - resolves imports to other contracts of the batch or to aliased addresses
//! - orders the batch so every contract follows its dependencies
//! - rewrites import locations into account address literals
//!
//! ```no_run
//! use deploy_resolver::{Address, Deployments, MemoryLoader};
//! use std::collections::HashMap;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let loader = MemoryLoader::new()
//!     .with_source("./A.cdc", "import \"./B.cdc\"\npub contract A {}")
//!     .with_source("./B.cdc", "pub contract B {}");
//!
//! let mut deployments = Deployments::new(loader, HashMap::new())?;
//! let account = Address::from_hex("0xf8d6e0586b0a20c7")?;
//! deployments.add("./A.cdc", account, "emulator-account", Vec::new())?;
//! deployments.add("./B.cdc", account, "emulator-account", Vec::new())?;
//! deployments.sort()?;
//!
//! for contract in deployments.contracts() {
//!     println!("{}: {}", contract.name(), contract.transpiled_code());
//! }
//! # Ok(())
//! # }
//! ```

pub mod address;
pub mod config;
pub mod contract;
pub mod deployments;
pub mod error;
pub mod graph;
pub mod loader;
pub mod parser;
pub mod plan;
pub mod transpiler;

pub use address::Address;
pub use config::{ConfigError, ResolverConfig};
pub use contract::{Contract, ContractId, Dependency};
pub use deployments::Deployments;
pub use error::{ContractError, ContractResult, CycleMember, CyclicImportError};
pub use loader::{Loader, LoaderError, MemoryLoader};
pub use plan::{DeploymentPlan, PlannedContract};
pub use transpiler::RewriteStrategy;
