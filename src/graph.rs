// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! A graph representation of the sections of a distribution network, and the
//! nodes they connect.

mod allocation;
mod creation;
mod downstream;
mod reachability;
mod retrieval;
mod sequencing;
mod validation;

pub mod iterators;

#[cfg(test)]
mod test_utils;

use crate::{NetworkGraphConfig, Section};
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::HashMap;

pub use allocation::Allocation;
pub use downstream::DownstreamSets;
pub use reachability::ReachabilityMatrix;

/// Nodes stored in an `UnGraph` instance can be addressed with `NodeIndex`es.
///
/// `NodeIndexMap` stores the corresponding `NodeIndex` for any node id, so
/// that nodes in the `UnGraph` can be retrieved from their ids.
pub(crate) type NodeIndexMap<Id> = HashMap<Id, NodeIndex>;

/// `SectionIndexMap` stores the position of every closed section in the
/// section arena, keyed by section id.
pub(crate) type SectionIndexMap<Id> = HashMap<Id, usize>;

/// The sequence number and further node a section got from the source that
/// reached it first.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct SequenceAnnotation {
    pub(crate) sequence: u32,
    pub(crate) further_node: NodeIndex,
}

/// A graph representation of the closed sections of a distribution network,
/// annotated with their sequence numbers from the source nodes.
pub struct NetworkGraph<S>
where
    S: Section,
{
    /// Undirected multigraph whose edge weights are positions in `sections`.
    graph: UnGraph<S::NodeId, usize>,
    node_indices: NodeIndexMap<S::NodeId>,
    section_indices: SectionIndexMap<S::SectionId>,
    sections: Vec<S>,
    sources: Vec<NodeIndex>,
    /// Parallel to `sections`; `None` for sections no source reaches.
    annotations: Vec<Option<SequenceAnnotation>>,
    config: NetworkGraphConfig,
}
