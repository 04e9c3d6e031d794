// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for finding the nodes downstream of each node of a
//! [`NetworkGraph`].

use petgraph::graph::NodeIndex;
use petgraph::visit::{VisitMap, Visitable};

use crate::{Error, NetworkGraph, Section};

/// The downstream nodes of every node of a [`NetworkGraph`].
///
/// Each set starts with the node itself, followed by the nodes reachable from
/// it along sections of strictly increasing sequence, without duplicates.
pub struct DownstreamSets<'a, S>
where
    S: Section,
{
    pub(crate) ng: &'a NetworkGraph<S>,
    /// Indexed by `NodeIndex`.
    pub(crate) sets: Vec<Vec<NodeIndex>>,
}

impl<'a, S> DownstreamSets<'a, S>
where
    S: Section,
{
    /// Returns the graph the downstream sets were computed for.
    pub fn graph(&self) -> &'a NetworkGraph<S> {
        self.ng
    }

    /// Returns the downstream nodes of the node with the given id.
    ///
    /// Returns an error if the given node does not exist.
    pub fn get(&self, node: &S::NodeId) -> Result<Vec<&'a S::NodeId>, Error> {
        let index = self.ng.node_index(node)?;
        Ok(self.resolve(index))
    }

    /// Returns `true` if `node` is downstream of `ancestor`.  A node is always
    /// downstream of itself.
    ///
    /// Returns an error if either node does not exist.
    pub fn contains(&self, ancestor: &S::NodeId, node: &S::NodeId) -> Result<bool, Error> {
        let ancestor = self.ng.node_index(ancestor)?;
        let node = self.ng.node_index(node)?;
        Ok(self.of(ancestor).contains(&node))
    }

    /// Returns an iterator over all nodes in graph order, each paired with its
    /// downstream nodes.
    pub fn iter(&self) -> impl Iterator<Item = (&'a S::NodeId, Vec<&'a S::NodeId>)> + '_ {
        let ng = self.ng;
        ng.graph
            .node_indices()
            .map(move |index| (&ng.graph[index], self.resolve(index)))
    }

    pub(crate) fn of(&self, index: NodeIndex) -> &[NodeIndex] {
        &self.sets[index.index()]
    }

    fn resolve(&self, index: NodeIndex) -> Vec<&'a S::NodeId> {
        let ng = self.ng;
        self.of(index).iter().map(|&i| &ng.graph[i]).collect()
    }
}

/// Downstream set resolution.
impl<S> NetworkGraph<S>
where
    S: Section,
{
    /// Returns the nodes downstream of the node with the given id, starting
    /// with the node itself.
    ///
    /// Returns an error if the given node does not exist.
    pub fn downstream_nodes(&self, node: &S::NodeId) -> Result<Vec<&S::NodeId>, Error> {
        let index = self.node_index(node)?;
        Ok(self
            .resolve_downstream(index)
            .into_iter()
            .map(|i| &self.graph[i])
            .collect())
    }

    /// Returns the downstream sets of all the nodes in the graph.
    pub fn downstream_sets(&self) -> DownstreamSets<'_, S> {
        let sets = self
            .graph
            .node_indices()
            .map(|index| self.resolve_downstream(index))
            .collect::<Vec<_>>();

        tracing::debug!("Resolved downstream sets for {} nodes.", sets.len());

        DownstreamSets { ng: self, sets }
    }

    /// Walks away from the sources starting at `start`.
    ///
    /// The walk starts from the sections touching `start` with the highest
    /// sequence, and from every further node reached, continues over the
    /// sections with a strictly higher sequence than the one it arrived by.
    /// Sections are taken in the order they were given, depth first, and each
    /// of them is consumed at most once.
    fn resolve_downstream(&self, start: NodeIndex) -> Vec<NodeIndex> {
        let mut downstream = vec![start];
        let mut in_downstream = self.graph.visit_map();
        in_downstream.visit(start);

        let touching = self
            .adjacent(start)
            .into_iter()
            .filter_map(|(_, position)| self.annotations[position].map(|a| (position, a.sequence)))
            .collect::<Vec<_>>();
        let Some(max_sequence) = touching.iter().map(|&(_, sequence)| sequence).max() else {
            return downstream;
        };

        let mut consumed = vec![false; self.sections.len()];
        let mut worklist = touching
            .iter()
            .rev()
            .filter(|&&(_, sequence)| sequence == max_sequence)
            .map(|&(position, _)| position)
            .collect::<Vec<_>>();

        while let Some(position) = worklist.pop() {
            if std::mem::replace(&mut consumed[position], true) {
                continue;
            }
            let Some(current) = self.annotations[position] else {
                continue;
            };

            if in_downstream.visit(current.further_node) {
                downstream.push(current.further_node);
            }

            worklist.extend(
                self.adjacent(current.further_node)
                    .into_iter()
                    .rev()
                    .filter(|&(_, next)| {
                        !consumed[next]
                            && self.annotations[next]
                                .is_some_and(|a| a.sequence > current.sequence)
                    })
                    .map(|(_, next)| next),
            );
        }

        downstream
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::graph::test_utils::{NetworkBuilder, TestSection};
    use crate::{Error, NetworkGraph, NetworkGraphConfig, Section};

    /// Checks that every node downstream of another is entered, from a node
    /// listed before it, over a section whose sequence is no lower than the
    /// one that entered that earlier node.
    fn assert_sequence_never_decreases(graph: &NetworkGraph<TestSection>) {
        for (node, set) in graph.downstream_sets().iter() {
            let mut entered = HashMap::from([(*node, 0)]);
            for &next in set.iter().skip(1) {
                let sequence = graph
                    .sections()
                    .filter(|s| s.further_node() == Some(next))
                    .find_map(|s| {
                        let section = s.section();
                        let from = if section.end() == *next {
                            section.start()
                        } else {
                            section.end()
                        };
                        entered
                            .get(&from)
                            .filter(|&&previous| s.sequence() >= previous)
                            .map(|_| s.sequence())
                    });
                assert!(
                    sequence.is_some(),
                    "{next} is downstream of {node}, but not over increasing sequences"
                );
                entered.extend(sequence.map(|sequence| (*next, sequence)));
            }
        }
    }

    #[test]
    fn test_branches() -> Result<(), Error> {
        let mut builder = NetworkBuilder::new();
        builder.connect("A", "B");
        builder.connect("B", "C");
        builder.connect("B", "D");
        builder.source("A");
        let graph = builder.build(None)?;

        assert_eq!(graph.downstream_nodes(&"A")?, [&"A", &"B", &"C", &"D"]);
        assert_eq!(graph.downstream_nodes(&"B")?, [&"B", &"C", &"D"]);
        assert_eq!(graph.downstream_nodes(&"C")?, [&"C"]);
        assert_eq!(graph.downstream_nodes(&"D")?, [&"D"]);
        assert!(graph
            .downstream_nodes(&"E")
            .is_err_and(|e| e == Error::node_not_found("Node with id E not found.")));

        Ok(())
    }

    #[test]
    fn test_depth_first_order() -> Result<(), Error> {
        // A - B - C - D, with a side branch B - E - F added last.
        let mut builder = NetworkBuilder::new();
        builder.chain(&["A", "B", "C", "D"]);
        builder.chain(&["B", "E", "F"]);
        builder.source("A");
        let graph = builder.build(None)?;

        assert_eq!(
            graph.downstream_nodes(&"A")?,
            [&"A", &"B", &"C", &"D", &"E", &"F"]
        );
        assert_eq!(graph.downstream_nodes(&"E")?, [&"E", &"F"]);

        Ok(())
    }

    #[test]
    fn test_towards_source_is_excluded() -> Result<(), Error> {
        // The source sits in the middle of the feeder.
        let mut builder = NetworkBuilder::new();
        builder.chain(&["A", "B", "C", "D", "E"]);
        builder.source("C");
        let graph = builder.build(None)?;

        assert_eq!(graph.downstream_nodes(&"C")?, [&"C", &"B", &"A", &"D", &"E"]);
        assert_eq!(graph.downstream_nodes(&"B")?, [&"B", &"A"]);
        assert_eq!(graph.downstream_nodes(&"D")?, [&"D", &"E"]);

        Ok(())
    }

    #[test]
    fn test_cycle() -> Result<(), Error> {
        // A ring A - B - D - C - A.  Both sections into D have sequence 2.
        let mut builder = NetworkBuilder::new();
        builder.connect("A", "B");
        builder.connect("A", "C");
        builder.connect("B", "D");
        builder.connect("C", "D");
        builder.connect("D", "E");
        builder.source("A");
        let graph = builder.build(None)?;

        assert_eq!(
            graph.downstream_nodes(&"A")?,
            [&"A", &"B", &"D", &"E", &"C"]
        );
        assert_eq!(graph.downstream_nodes(&"B")?, [&"B", &"D", &"E"]);
        assert_eq!(graph.downstream_nodes(&"D")?, [&"D", &"E"]);
        assert_eq!(graph.downstream_nodes(&"E")?, [&"E"]);

        Ok(())
    }

    #[test]
    fn test_parallel_sections() -> Result<(), Error> {
        let mut builder = NetworkBuilder::new();
        builder.connect("A", "B");
        builder.connect("A", "B");
        builder.connect("B", "C");
        builder.source("A");
        let graph = builder.build(None)?;

        assert_eq!(graph.downstream_nodes(&"A")?, [&"A", &"B", &"C"]);
        assert_eq!(graph.downstream_nodes(&"B")?, [&"B", &"C"]);

        Ok(())
    }

    #[test]
    fn test_unreachable_nodes() -> Result<(), Error> {
        let mut builder = NetworkBuilder::new();
        builder.connect("A", "B");
        builder.connect("C", "D");
        builder.source("A");
        let graph = builder.build(Some(NetworkGraphConfig {
            allow_unreachable_sections: true,
        }))?;

        assert_eq!(graph.downstream_nodes(&"A")?, [&"A", &"B"]);
        assert_eq!(graph.downstream_nodes(&"C")?, [&"C"]);
        assert_eq!(graph.downstream_nodes(&"D")?, [&"D"]);

        Ok(())
    }

    #[test]
    fn test_downstream_sets() -> Result<(), Error> {
        let mut builder = NetworkBuilder::new();
        builder.chain(&["A", "B", "C"]);
        builder.connect("B", "D");
        builder.source("A");
        let graph = builder.build(None)?;

        let sets = graph.downstream_sets();
        assert_eq!(
            sets.iter().collect::<Vec<_>>(),
            vec![
                (&"A", vec![&"A", &"B", &"C", &"D"]),
                (&"B", vec![&"B", &"C", &"D"]),
                (&"C", vec![&"C"]),
                (&"D", vec![&"D"]),
            ]
        );

        for (node, set) in sets.iter() {
            assert_eq!(set.first(), Some(&node));
            assert_eq!(set, graph.downstream_nodes(node)?);
        }

        assert_eq!(sets.get(&"B")?, [&"B", &"C", &"D"]);
        assert!(sets.contains(&"B", &"D")?);
        assert!(sets.contains(&"C", &"C")?);
        assert!(!sets.contains(&"C", &"B")?);
        assert!(sets
            .contains(&"B", &"X")
            .is_err_and(|e| e == Error::node_not_found("Node with id X not found.")));

        // Recomputing gives identical results.
        assert_eq!(
            graph.downstream_sets().iter().collect::<Vec<_>>(),
            sets.iter().collect::<Vec<_>>()
        );

        Ok(())
    }

    #[test]
    fn test_sequence_never_decreases_downstream() -> Result<(), Error> {
        let mut builder = NetworkBuilder::new();
        builder.connect("A", "B");
        builder.connect("A", "C");
        builder.connect("B", "D");
        builder.connect("C", "D");
        builder.connect("D", "E");
        builder.source("A");
        assert_sequence_never_decreases(&builder.build(None)?);

        let mut builder = NetworkBuilder::new();
        builder.chain(&["A", "B", "C", "D", "E"]);
        builder.source("C");
        assert_sequence_never_decreases(&builder.build(None)?);

        // Two sources, a ring through C and parallel sections into D.
        let mut builder = NetworkBuilder::new();
        builder.connect("S1", "A");
        builder.connect("S1", "B");
        builder.connect("B", "C");
        builder.connect("A", "C");
        builder.connect("C", "S2");
        builder.connect("C", "D");
        builder.connect("C", "D");
        builder.chain(&["D", "E", "F"]);
        builder.source("S1").source("S2");
        let graph = builder.build(None)?;
        assert_eq!(graph.downstream_nodes(&"C")?, [&"C", &"S2", &"D", &"E", &"F"]);
        assert_sequence_never_decreases(&graph);

        Ok(())
    }
}
