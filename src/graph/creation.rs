// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for creating [`NetworkGraph`] instances from given sections, open
//! sections and source nodes.

use std::collections::HashSet;

use petgraph::graph::{NodeIndex, UnGraph};

use crate::{Error, NetworkGraphConfig, Section};

use super::{NetworkGraph, NodeIndexMap, SectionIndexMap};

/// `NetworkGraph` instantiation.
impl<S> NetworkGraph<S>
where
    S: Section,
{
    /// Creates a new [`NetworkGraph`] from the given sections, leaving out the
    /// sections whose ids are in `open_sections`, and sequences the remaining
    /// sections from the given `sources`.
    ///
    /// Sources are prioritized in the order they are given: a section reached
    /// by more than one source keeps the sequence from the first of them.
    ///
    /// Returns an error if the network is invalid.
    pub fn try_new<SectionIterator, OpenIterator, SourceIterator>(
        sections: SectionIterator,
        open_sections: OpenIterator,
        sources: SourceIterator,
        config: NetworkGraphConfig,
    ) -> Result<Self, Error>
    where
        SectionIterator: IntoIterator<Item = S>,
        OpenIterator: IntoIterator<Item = S::SectionId>,
        SourceIterator: IntoIterator<Item = S::NodeId>,
    {
        let mut ng = Self::create_graph(sections, open_sections, config)?;
        ng.sources = ng.find_sources(sources)?;
        ng.annotations = ng.sequence_sections();

        ng.validate()?;

        tracing::debug!(
            "Created network graph with {} nodes, {} closed sections and {} sources.",
            ng.graph.node_count(),
            ng.sections.len(),
            ng.sources.len()
        );

        Ok(ng)
    }

    /// Builds the topology from the closed sections.
    ///
    /// Nodes are added in the order they first appear in the sections, and
    /// edges in the order of the sections, so that both can be iterated
    /// deterministically.
    fn create_graph(
        sections: impl IntoIterator<Item = S>,
        open_sections: impl IntoIterator<Item = S::SectionId>,
        config: NetworkGraphConfig,
    ) -> Result<Self, Error> {
        let open_sections: HashSet<S::SectionId> = open_sections.into_iter().collect();

        let mut graph = UnGraph::default();
        let mut node_indices = NodeIndexMap::new();
        let mut section_indices = SectionIndexMap::new();
        let mut section_ids = HashSet::new();
        let mut arena = Vec::new();
        let mut num_open = 0;

        for section in sections {
            let sid = section.section_id();
            let start = section.start();
            let end = section.end();

            if !section_ids.insert(sid.clone()) {
                return Err(Error::invalid_graph(format!(
                    "Duplicate section ID found: {sid}"
                )));
            }
            if start == end {
                return Err(Error::invalid_section(format!(
                    "Section:{sid} Can't connect node {start} to itself."
                )));
            }
            if open_sections.contains(&sid) {
                num_open += 1;
                continue;
            }

            let start_idx = Self::add_node(&mut graph, &mut node_indices, start);
            let end_idx = Self::add_node(&mut graph, &mut node_indices, end);

            let position = arena.len();
            graph.add_edge(start_idx, end_idx, position);
            section_indices.insert(sid, position);
            arena.push(section);
        }

        if num_open < open_sections.len() {
            tracing::debug!(
                "{} open section IDs don't match any section.",
                open_sections.len() - num_open
            );
        }

        Ok(Self {
            graph,
            node_indices,
            section_indices,
            sections: arena,
            sources: Vec::new(),
            annotations: Vec::new(),
            config,
        })
    }

    fn add_node(
        graph: &mut UnGraph<S::NodeId, usize>,
        node_indices: &mut NodeIndexMap<S::NodeId>,
        node: S::NodeId,
    ) -> NodeIndex {
        if let Some(&index) = node_indices.get(&node) {
            return index;
        }
        let index = graph.add_node(node.clone());
        node_indices.insert(node, index);
        index
    }

    /// Resolves the source nodes to node indices, keeping their order.
    fn find_sources(
        &self,
        sources: impl IntoIterator<Item = S::NodeId>,
    ) -> Result<Vec<NodeIndex>, Error> {
        let mut num_given = 0;
        let mut found = Vec::new();

        for source in sources {
            num_given += 1;
            let Some(&index) = self.node_indices.get(&source) else {
                tracing::warn!(
                    "Source node {} is not connected to any closed section, skipping.",
                    source
                );
                continue;
            };
            if !found.contains(&index) {
                found.push(index);
            }
        }

        if num_given == 0 {
            return Err(Error::invalid_graph("No source nodes given."));
        }

        Ok(found)
    }
}
