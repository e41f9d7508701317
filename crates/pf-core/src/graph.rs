//! Model reference graph and cycle detection.

use crate::error::{CoreError, CoreResult};
use crate::model_name::ModelName;
use petgraph::algo::{kosaraju_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// A directed graph of references between models.
///
/// Edges run from a model to each model it references. Only references
/// between known models are recorded; references to anything else (external
/// tables, filtered-out nodes) are ignored by [`build`](Self::build).
#[derive(Debug, Default)]
pub struct ModelGraph {
    graph: DiGraph<ModelName, ()>,
    node_map: HashMap<ModelName, NodeIndex>,
}

impl ModelGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a model, returning its index (idempotent).
    pub fn add_model(&mut self, name: &ModelName) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.clone());
        self.node_map.insert(name.clone(), idx);
        idx
    }

    /// Add a reference edge from one model to another.
    pub fn add_reference(&mut self, from: &ModelName, to: &ModelName) {
        let from_idx = self.add_model(from);
        let to_idx = self.add_model(to);
        self.graph.add_edge(from_idx, to_idx, ());
    }

    /// Build the graph from `(model, references)` pairs, keeping only edges
    /// whose target is itself one of the given models.
    pub fn build<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a ModelName, &'a [ModelName])> + Clone,
    {
        let mut graph = Self::new();
        for (name, _) in entries.clone() {
            graph.add_model(name);
        }
        for (name, refs) in entries {
            for target in refs {
                if graph.node_map.contains_key(target) {
                    let from = graph.node_map[name];
                    let to = graph.node_map[target];
                    graph.graph.add_edge(from, to, ());
                }
            }
        }
        graph
    }

    /// Number of models in the graph.
    pub fn model_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Validate that the reference graph has no cycles.
    pub fn validate(&self) -> CoreResult<()> {
        match toposort(&self.graph, None) {
            Ok(_) => Ok(()),
            Err(_) => Err(CoreError::CircularReference {
                cycle: self.describe_cycle(),
            }),
        }
    }

    /// Render one strongly-connected cycle as `a -> b -> a` for the error
    /// message.
    fn describe_cycle(&self) -> String {
        for component in kosaraju_scc(&self.graph) {
            let is_cycle = component.len() > 1
                || component
                    .first()
                    .is_some_and(|&n| self.graph.contains_edge(n, n));
            if is_cycle {
                let mut names: Vec<&str> = component
                    .iter()
                    .map(|&idx| self.graph[idx].as_str())
                    .collect();
                names.sort_unstable();
                let mut path = names.join(" -> ");
                if let Some(first) = names.first() {
                    path.push_str(" -> ");
                    path.push_str(first);
                }
                return path;
            }
        }
        "<unknown>".to_string()
    }
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
