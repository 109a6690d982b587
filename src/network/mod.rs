// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Nodes, links and the per-node information balance.
//!
//! A [`Network`] owns its entities in insertion order. Node quantities are estimated
//! from an ensemble over the node and its neighborhood, link quantities from an
//! ensemble over the two endpoints; both append one value per computed step.
//!
//! The E-value of a node closes the balance
//!
//! ```text
//! ΔH0 = Flow_Sum - E + α₁
//! ```
//!
//! where `Flow_Sum` adds the incoming transfer minus its time-reversed counterpart over
//! every incident link.

pub mod link;
pub mod node;

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{InfoDynError, Result};
pub use link::{DecompositionTerm, Link, LinkQuantity};
pub use node::{Node, NodeQuantity};

/// Names of all nodes and links, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Topology {
    pub nodes: Vec<String>,
    pub links: Vec<(String, String)>,
}

#[derive(Debug, Clone, Default)]
pub struct Network {
    nodes: Vec<Node>,
    links: Vec<Link>,
    node_index: HashMap<String, usize>,
    link_index: HashMap<(String, String), usize>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create one node per name; names must be unique.
    pub fn set_nodes<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        for name in names {
            let name = name.as_ref();
            if self.node_index.contains_key(name) {
                return Err(InfoDynError::Configuration(format!(
                    "node `{name}` already exists"
                )));
            }
            self.node_index.insert(name.to_string(), self.nodes.len());
            self.nodes.push(Node::new(name));
        }
        Ok(())
    }

    /// Store the link `(first, second)` and make each endpoint a neighbor of the other.
    pub fn add_link(&mut self, first: &str, second: &str) -> Result<()> {
        let (Some(&a), Some(&b)) = (self.node_index.get(first), self.node_index.get(second))
        else {
            return Err(InfoDynError::Configuration(format!(
                "link {first}~{second} refers to a missing node"
            )));
        };
        if a == b {
            return Err(InfoDynError::Configuration(format!(
                "self-link on `{first}`"
            )));
        }
        if self.has_link(first, second) || self.has_link(second, first) {
            return Err(InfoDynError::Configuration(format!(
                "link {first}~{second} already exists"
            )));
        }
        self.link_index
            .insert((first.to_string(), second.to_string()), self.links.len());
        self.links.push(Link::new(first, second));
        self.nodes[a].add_neighbor(second);
        self.nodes[b].add_neighbor(first);
        Ok(())
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn node_names(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.name().to_string()).collect()
    }

    pub fn link_keys(&self) -> Vec<(String, String)> {
        self.links
            .iter()
            .map(|l| (l.first().to_string(), l.second().to_string()))
            .collect()
    }

    pub fn topology(&self) -> Topology {
        Topology {
            nodes: self.node_names(),
            links: self.link_keys(),
        }
    }

    pub fn node(&self, name: &str) -> Option<&Node> {
        self.node_index.get(name).map(|&i| &self.nodes[i])
    }

    pub fn node_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.node_index.get(name).map(|&i| &mut self.nodes[i])
    }

    /// The link stored exactly as `(first, second)`.
    pub fn link(&self, first: &str, second: &str) -> Option<&Link> {
        self.link_index
            .get(&(first.to_string(), second.to_string()))
            .map(|&i| &self.links[i])
    }

    pub fn link_mut(&mut self, first: &str, second: &str) -> Option<&mut Link> {
        self.link_index
            .get(&(first.to_string(), second.to_string()))
            .map(|&i| &mut self.links[i])
    }

    pub fn has_link(&self, first: &str, second: &str) -> bool {
        self.link_index
            .contains_key(&(first.to_string(), second.to_string()))
    }

    /// E of `node` at `step`.
    ///
    /// Every incident link contributes `TE - rTE` of the transfer into `node`: direction 1
    /// when stored as `(node, neighbor)`, direction 2 otherwise.
    pub fn estimate_e(&self, node: &str, step: usize) -> Result<f64> {
        let the_node = self
            .node(node)
            .ok_or_else(|| InfoDynError::UnknownVariable(node.to_string()))?;
        let missing = |what: String| {
            InfoDynError::IncompleteEstimation(format!("{what} has no value at step {step}"))
        };
        let node_value = |q: NodeQuantity| {
            the_node
                .value(q, step)
                .ok_or_else(|| missing(format!("node {node} ({})", q.label())))
        };
        let delta_h0 = node_value(NodeQuantity::H0Next)? - node_value(NodeQuantity::H0)?;
        let alpha_1 = node_value(NodeQuantity::Alpha1)?;

        let mut flow_sum = 0.0;
        for neighbor in the_node.neighbors() {
            let (link, te, rte) = match self.link(node, neighbor) {
                Some(link) => (link, LinkQuantity::Te1, LinkQuantity::ReverseTe1),
                None => {
                    let link = self.link(neighbor, node).ok_or_else(|| {
                        InfoDynError::Configuration(format!(
                            "no link between {node} and {neighbor}"
                        ))
                    })?;
                    (link, LinkQuantity::Te2, LinkQuantity::ReverseTe2)
                }
            };
            let value = |q: LinkQuantity| {
                link.value(q, step).ok_or_else(|| {
                    missing(format!("link {}~{} ({})", link.first(), link.second(), q.label()))
                })
            };
            flow_sum += value(te)? - value(rte)?;
        }
        Ok(flow_sum - delta_h0 + alpha_1)
    }

    /// E of `node` at every step it has been estimated for.
    pub fn e_values(&self, node: &str) -> Result<Vec<f64>> {
        let steps = self
            .node(node)
            .ok_or_else(|| InfoDynError::UnknownVariable(node.to_string()))?
            .len();
        (0..steps).map(|t| self.estimate_e(node, t)).collect()
    }
}
