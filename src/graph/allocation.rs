// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for rationing the demand of the nodes of a [`NetworkGraph`], so
//! that no node passes more demand downstream than its limit.

use std::cmp::Reverse;

use petgraph::graph::NodeIndex;
use petgraph::visit::{VisitMap, Visitable};

use crate::{Demand, DownstreamSets, Error, Limit, NetworkGraph, Section};

/// The demand allocated to a section, and the node whose limit bounds it.
#[derive(Debug)]
pub struct Allocation<'a, S>
where
    S: Section,
{
    section: &'a S,
    sequence: u32,
    further_node: &'a S::NodeId,
    dg: f64,
    new_dg: f64,
    limiting_node: &'a S::NodeId,
}

impl<'a, S> Allocation<'a, S>
where
    S: Section,
{
    /// Returns the section.
    pub fn section(&self) -> &'a S {
        self.section
    }

    /// Returns the sequence of the section.
    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    /// Returns the further node of the section, whose demand the section
    /// carries.
    pub fn further_node(&self) -> &'a S::NodeId {
        self.further_node
    }

    /// Returns the demand of the further node, or `0.0` if it has none.
    pub fn dg(&self) -> f64 {
        self.dg
    }

    /// Returns the allocated demand.  It is never above [`dg`][Self::dg].
    pub fn new_dg(&self) -> f64 {
        self.new_dg
    }

    /// Returns the node whose limit bounds the allocated demand.  This is the
    /// further node itself when the demand wasn't reduced.
    pub fn limiting_node(&self) -> &'a S::NodeId {
        self.limiting_node
    }
}

struct Row {
    position: usize,
    sequence: u32,
    further_node: NodeIndex,
    dg: f64,
    new_dg: f64,
    limiting_node: NodeIndex,
}

/// Demand allocation.
impl<'a, S> DownstreamSets<'a, S>
where
    S: Section,
{
    /// Rations the demand of every sequenced section's further node so that
    /// the aggregate demand downstream of any node never exceeds its limit.
    ///
    /// Sections are processed from the farthest to the closest to their
    /// source.  For each of them, the demands downstream of its further node
    /// are scaled by `limit / total demand`, and a scaled value replaces the
    /// allocated demand of a section only when it is lower.  Nodes without a
    /// limit record are unconstrained, and nodes without a demand record
    /// have a demand of `0.0`.
    ///
    /// Allocations are returned in the order the sections were given.
    ///
    /// Returns an error if a record has a negative or non-finite value, or if
    /// a node has more than one demand or limit record.
    pub fn allocate<D, L>(
        &self,
        demands: impl IntoIterator<Item = D>,
        limits: impl IntoIterator<Item = L>,
    ) -> Result<Vec<Allocation<'a, S>>, Error>
    where
        D: Demand<NodeId = S::NodeId>,
        L: Limit<NodeId = S::NodeId>,
    {
        let ng = self.ng;
        let demands = node_values(ng, demands.into_iter().map(|d| (d.node(), d.dg())), "demand")?;
        let limits = node_values(ng, limits.into_iter().map(|l| (l.node(), l.limit())), "limit")?;

        let mut rows = ng
            .sequenced()
            .map(|(position, annotation)| {
                let dg = demands[annotation.further_node.index()].unwrap_or(0.0);
                Row {
                    position,
                    sequence: annotation.sequence,
                    further_node: annotation.further_node,
                    dg,
                    new_dg: dg,
                    limiting_node: annotation.further_node,
                }
            })
            .collect::<Vec<_>>();

        // Stable, so equal sequences keep the section order.
        let mut order = (0..rows.len()).collect::<Vec<_>>();
        order.sort_by_key(|&row| Reverse(rows[row].sequence));

        for row in order {
            let node = rows[row].further_node;
            let Some(limit) = limits[node.index()] else {
                continue;
            };

            let mut downstream = ng.graph.visit_map();
            for &index in self.of(node) {
                downstream.visit(index);
            }

            let total: f64 = rows
                .iter()
                .filter(|r| downstream.is_visited(&r.further_node))
                .map(|r| r.dg)
                .sum();
            if total == 0.0 {
                continue;
            }

            let ratio = limit / total;
            for r in rows
                .iter_mut()
                .filter(|r| downstream.is_visited(&r.further_node))
            {
                let candidate = ratio * r.dg;
                if candidate < r.new_dg {
                    r.new_dg = candidate;
                    r.limiting_node = node;
                }
            }
        }

        let num_limited = rows
            .iter()
            .filter(|r| r.limiting_node != r.further_node)
            .count();
        tracing::debug!(
            "Allocated demand over {} sections, {} of them limited upstream.",
            rows.len(),
            num_limited
        );

        Ok(rows
            .into_iter()
            .map(|r| Allocation {
                section: &ng.sections[r.position],
                sequence: r.sequence,
                further_node: &ng.graph[r.further_node],
                dg: r.dg,
                new_dg: r.new_dg,
                limiting_node: &ng.graph[r.limiting_node],
            })
            .collect())
    }
}

/// Demand allocation over all the nodes.
impl<S> NetworkGraph<S>
where
    S: Section,
{
    /// Resolves the downstream sets of all nodes, and allocates the given
    /// demands under the given limits.
    ///
    /// See [`DownstreamSets::allocate`] for details.
    pub fn allocate_dg<D, L>(
        &self,
        demands: impl IntoIterator<Item = D>,
        limits: impl IntoIterator<Item = L>,
    ) -> Result<Vec<Allocation<'_, S>>, Error>
    where
        D: Demand<NodeId = S::NodeId>,
        L: Limit<NodeId = S::NodeId>,
    {
        self.downstream_sets().allocate(demands, limits)
    }
}

/// Collects per-node values into a vector indexed by `NodeIndex`.
///
/// Records for nodes that are not part of the graph are ignored.
fn node_values<S>(
    ng: &NetworkGraph<S>,
    records: impl Iterator<Item = (S::NodeId, f64)>,
    what: &str,
) -> Result<Vec<Option<f64>>, Error>
where
    S: Section,
{
    let mut values = vec![None; ng.graph.node_count()];
    let mut num_ignored = 0;

    for (node, value) in records {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::invalid_record(format!(
                "Invalid {what} for node {node}: {value}"
            )));
        }
        let Some(&index) = ng.node_indices.get(&node) else {
            num_ignored += 1;
            continue;
        };
        if values[index.index()].replace(value).is_some() {
            return Err(Error::invalid_record(format!(
                "Duplicate {what} record for node {node}."
            )));
        }
    }

    if num_ignored > 0 {
        tracing::debug!(
            "Ignored {} {} records for nodes outside the network.",
            num_ignored,
            what
        );
    }

    Ok(values)
}
