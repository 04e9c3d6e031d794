// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for retrieving nodes and sections from a [`NetworkGraph`].

use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

use crate::iterators::{AnnotatedSection, AnnotatedSections, Neighbors, Nodes, Sequenced};
use crate::{Error, NetworkGraph, Section};

use super::SequenceAnnotation;

/// Node and section retrieval.
impl<S> NetworkGraph<S>
where
    S: Section,
{
    /// Returns an iterator over the nodes of the closed sections, in the order
    /// they first appear in the sections.
    pub fn nodes(&self) -> Nodes<'_, S::NodeId> {
        Nodes {
            iter: self.graph.raw_nodes().iter(),
        }
    }

    /// Returns an iterator over the source nodes that are part of the graph,
    /// in priority order.
    pub fn sources(&self) -> impl Iterator<Item = &S::NodeId> + '_ {
        self.sources.iter().map(|&index| &self.graph[index])
    }

    /// Returns an iterator over the closed sections and their annotations, in
    /// the order the sections were given.
    pub fn sections(&self) -> AnnotatedSections<'_, S> {
        AnnotatedSections {
            ng: self,
            iter: self.sections.iter().zip(self.annotations.iter()),
        }
    }

    /// Returns the closed section with the given `section_id` and its
    /// annotation.
    pub fn section(&self, section_id: &S::SectionId) -> Result<AnnotatedSection<'_, S>, Error> {
        self.section_indices
            .get(section_id)
            .map(|&position| {
                self.annotate(&self.sections[position], self.annotations[position])
            })
            .ok_or_else(|| {
                Error::section_not_found(format!("Section with id {} not found.", section_id))
            })
    }

    /// Returns an iterator over the neighbors of the node with the given id,
    /// each paired with the section that connects it to the node.
    ///
    /// Neighbors come in the order the sections were given.  A neighbor
    /// connected through parallel sections is returned once per section.
    ///
    /// Returns an error if the given node does not exist.
    pub fn neighbors(&self, node: &S::NodeId) -> Result<Neighbors<'_, S>, Error> {
        let index = self.node_index(node)?;
        Ok(Neighbors {
            ng: self,
            iter: self.adjacent(index).into_iter(),
        })
    }

    pub(crate) fn node_index(&self, node: &S::NodeId) -> Result<NodeIndex, Error> {
        self.node_indices
            .get(node)
            .copied()
            .ok_or_else(|| Error::node_not_found(format!("Node with id {} not found.", node)))
    }

    /// Returns the neighbors of a node, together with the positions of the
    /// connecting sections, sorted by section position.
    ///
    /// Adjacency lists in `petgraph` are ordered newest first, so they are
    /// sorted here to follow the order the sections were given in.
    pub(crate) fn adjacent(&self, node: NodeIndex) -> Vec<(NodeIndex, usize)> {
        let mut adjacent = self
            .graph
            .edges(node)
            .map(|edge| {
                let neighbor = if edge.source() == node {
                    edge.target()
                } else {
                    edge.source()
                };
                (neighbor, *edge.weight())
            })
            .collect::<Vec<_>>();
        adjacent.sort_unstable_by_key(|&(_, position)| position);
        adjacent
    }

    /// Returns the positions and annotations of the sections a source
    /// reaches.
    pub(crate) fn sequenced(&self) -> Sequenced<'_> {
        Sequenced {
            iter: self.annotations.iter().enumerate(),
        }
    }

    pub(crate) fn annotate<'a>(
        &'a self,
        section: &'a S,
        annotation: Option<SequenceAnnotation>,
    ) -> AnnotatedSection<'a, S> {
        AnnotatedSection {
            section,
            sequence: annotation.map_or(0, |a| a.sequence),
            further_node: annotation.map(|a| &self.graph[a.further_node]),
        }
    }
}
