// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for building the downstream reachability matrix of a
//! [`NetworkGraph`].

use crate::iterators::Nodes;
use crate::{DownstreamSets, Error, NetworkGraph, Section};

/// A square 0/1 matrix over the nodes of a [`NetworkGraph`].
///
/// The cell at row `d` and column `n` is `1` when `d` is downstream of `n`.
/// Rows and columns follow the node order of the graph.
pub struct ReachabilityMatrix<'a, S>
where
    S: Section,
{
    ng: &'a NetworkGraph<S>,
    /// Row-major.
    cells: Vec<u8>,
}

impl<'a, S> ReachabilityMatrix<'a, S>
where
    S: Section,
{
    /// Returns the nodes labelling the rows and the columns, in order.
    pub fn nodes(&self) -> Nodes<'a, S::NodeId> {
        self.ng.nodes()
    }

    /// Returns the number of rows, which is also the number of columns.
    pub fn len(&self) -> usize {
        self.ng.graph.node_count()
    }

    /// Returns `true` if the matrix has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the cell for the given row and column nodes.
    ///
    /// Returns an error if either node does not exist.
    pub fn get(&self, row: &S::NodeId, column: &S::NodeId) -> Result<u8, Error> {
        let row = self.ng.node_index(row)?.index();
        let column = self.ng.node_index(column)?.index();
        Ok(self.cells[row * self.len() + column])
    }

    /// Returns an iterator over the rows, each paired with its node.
    pub fn rows(&self) -> impl Iterator<Item = (&'a S::NodeId, &[u8])> + '_ {
        let width = self.len().max(1);
        self.nodes().zip(self.cells.chunks(width))
    }
}

/// Reachability matrix creation.
impl<'a, S> DownstreamSets<'a, S>
where
    S: Section,
{
    /// Returns the reachability matrix for these downstream sets.
    pub fn reachability_matrix(&self) -> ReachabilityMatrix<'a, S> {
        let ng = self.graph();
        let size = ng.graph.node_count();
        let mut cells = vec![0; size * size];

        for column in ng.graph.node_indices() {
            for row in self.of(column) {
                cells[row.index() * size + column.index()] = 1;
            }
        }

        ReachabilityMatrix { ng, cells }
    }
}

impl<S> NetworkGraph<S>
where
    S: Section,
{
    /// Resolves the downstream sets of all nodes, and returns the
    /// reachability matrix built from them.
    pub fn node_map(&self) -> ReachabilityMatrix<'_, S> {
        self.downstream_sets().reachability_matrix()
    }
}
