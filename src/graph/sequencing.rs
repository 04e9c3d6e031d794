// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for assigning sequence numbers and further nodes to the sections
//! of a [`NetworkGraph`], by traversing it breadth-first from each source.

use std::collections::VecDeque;

use petgraph::graph::NodeIndex;
use petgraph::visit::{VisitMap, Visitable};

use crate::{NetworkGraph, Section};

use super::SequenceAnnotation;

/// Section sequencing.
impl<S> NetworkGraph<S>
where
    S: Section,
{
    /// Returns the annotation of every section, taken from the first source,
    /// in declaration order, that reaches it.
    ///
    /// A later source never overrides an earlier one, even when it is closer
    /// to the section.
    pub(super) fn sequence_sections(&self) -> Vec<Option<SequenceAnnotation>> {
        let per_source = self
            .sources
            .iter()
            .map(|&source| self.sequence_from(source))
            .collect::<Vec<_>>();

        (0..self.sections.len())
            .map(|position| {
                per_source
                    .iter()
                    .find_map(|annotations| annotations[position])
            })
            .collect()
    }

    /// Traverses the graph breadth-first from `source`, and annotates each
    /// section crossed towards a node that hasn't been expanded yet.
    ///
    /// A node counts as visited once it is dequeued, so a node can be
    /// discovered through several sections, and all of them get annotated.
    fn sequence_from(&self, source: NodeIndex) -> Vec<Option<SequenceAnnotation>> {
        let mut annotations = vec![None; self.sections.len()];
        let mut visited = self.graph.visit_map();
        let mut queue = VecDeque::from([(source, 0u32)]);

        while let Some((node, level)) = queue.pop_front() {
            if !visited.visit(node) {
                continue;
            }
            for (neighbor, position) in self.adjacent(node) {
                if visited.is_visited(&neighbor) {
                    continue;
                }
                annotations[position] = Some(SequenceAnnotation {
                    sequence: level + 1,
                    further_node: neighbor,
                });
                queue.push_back((neighbor, level + 1));
            }
        }

        annotations
    }
}
