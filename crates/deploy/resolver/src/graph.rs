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

//! Dependency graph of contracts and deployment ordering

use crate::contract::{Contract, ContractId};
use crate::error::{CycleMember, CyclicImportError};
use petgraph::Direction;
use petgraph::algo::tarjan_scc;
use petgraph::Directed;
use petgraph::graph::{Graph, NodeIndex};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// Edge from a dependency to the contract importing it
#[derive(Debug, Clone, Copy)]
pub struct DepEdge;

/// Dependency graph type alias
pub type DependencyGraph = Graph<ContractId, DepEdge, Directed>;

/// Utility for building dependency graphs
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: DependencyGraph,
    indices: HashMap<ContractId, NodeIndex>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Graph with one node per contract and one edge per recorded dependency
    pub fn from_contracts<'a>(contracts: impl IntoIterator<Item = &'a Contract>) -> Self {
        let mut contracts: Vec<&Contract> = contracts.into_iter().collect();
        contracts.sort_by_key(|contract| contract.id());

        let mut builder = Self::new();
        for contract in &contracts {
            builder.add_node(contract.id());
        }
        for contract in &contracts {
            for dependency in contract.dependencies().values() {
                builder.add_edge(dependency.id, contract.id());
            }
        }
        builder
    }

    /// Add a node if not exists, returns its index
    pub fn add_node(&mut self, id: ContractId) -> NodeIndex {
        if let Some(&idx) = self.indices.get(&id) {
            return idx;
        }
        let idx = self.graph.add_node(id);
        self.indices.insert(id, idx);
        idx
    }

    /// Add an edge meaning `dependency` must deploy before `dependent`
    pub fn add_edge(&mut self, dependency: ContractId, dependent: ContractId) {
        let u = self.add_node(dependency);
        let v = self.add_node(dependent);
        self.graph.add_edge(u, v, DepEdge);
    }

    pub fn build(self) -> DependencyGraph {
        self.graph
    }
}

/// Order nodes so every node follows the nodes with edges into it
///
/// Ties go to the smallest contract id. On failure returns the cycles, each
/// as listed by Tarjan's algorithm, ordered by their smallest member.
pub fn topological_order(graph: &DependencyGraph) -> Result<Vec<ContractId>, Vec<Vec<ContractId>>> {
    let mut in_degree: Vec<usize> = graph
        .node_indices()
        .map(|node| graph.edges_directed(node, Direction::Incoming).count())
        .collect();

    let mut ready: BinaryHeap<Reverse<(ContractId, NodeIndex)>> = graph
        .node_indices()
        .filter(|node| in_degree[node.index()] == 0)
        .map(|node| Reverse((graph[node], node)))
        .collect();

    let mut order = Vec::with_capacity(graph.node_count());
    while let Some(Reverse((id, node))) = ready.pop() {
        order.push(id);
        for next in graph.neighbors_directed(node, Direction::Outgoing) {
            in_degree[next.index()] -= 1;
            if in_degree[next.index()] == 0 {
                ready.push(Reverse((graph[next], next)));
            }
        }
    }

    if order.len() == graph.node_count() {
        return Ok(order);
    }

    let mut cycles: Vec<Vec<ContractId>> = tarjan_scc(graph)
        .into_iter()
        .filter(|component| component.len() > 1 || graph.find_edge(component[0], component[0]).is_some())
        .map(|component| component.into_iter().map(|node| graph[node]).collect())
        .collect();
    cycles.sort_by_key(|cycle: &Vec<ContractId>| cycle.iter().min().copied());
    Err(cycles)
}

/// Deployment order of the contracts, or the import cycles preventing one
///
/// `contracts` must be indexed by contract id.
pub fn sort_contracts(contracts: &[Contract]) -> Result<Vec<ContractId>, CyclicImportError> {
    let graph = GraphBuilder::from_contracts(contracts).build();
    topological_order(&graph).map_err(|cycles| {
        let cycles = cycles
            .into_iter()
            .map(|cycle| {
                cycle
                    .into_iter()
                    .map(|id| {
                        let contract = &contracts[id.index()];
                        CycleMember {
                            id,
                            name: contract.name().to_string(),
                            location: contract.location().to_string(),
                        }
                    })
                    .collect()
            })
            .collect();
        CyclicImportError::new(cycles)
    })
}
