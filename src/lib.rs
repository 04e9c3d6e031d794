// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

/*!
# Distribution Network Graph

This is a library for analyzing a piping or electrical distribution network,
described as sections connecting nodes and fed from one or more source nodes.

For every node, it finds the nodes downstream of it, and from those, it can
ration the demand (`dg`) of the nodes so that no node passes more demand
downstream than its limit, or build a node-by-node reachability matrix.

## The `Section`, `Demand` and `Limit` traits

The main struct is [`NetworkGraph`], instances of which can be created by
passing an iterator of sections, the ids of the open sections and the source
nodes to the [`try_new`][NetworkGraph::try_new] method.

But because this is an independent library, it doesn't know about the types
the input tables are read into, and instead uses traits to interact with them.

Therefore, to be usable with this library, the section, demand and limit types
must implement the [`Section`], [`Demand`] and [`Limit`] traits, respectively.
Check out the documentation for these traits for sample implementations.

## Sequencing

When a [`NetworkGraph`] is created, the open sections are left out, and the
remaining sections are traversed breadth-first from each source node.  Every
section gets a sequence, its hop distance from the source, and a further
node, its end farther from the source.  A section reached from more than one
source keeps the values from the first of those sources, in the order the
sources were given.

By default, a section that no source reaches makes the creation fail.  This can
be relaxed with [`NetworkGraphConfig::allow_unreachable_sections`].

## Analyses

- [`downstream_nodes`][NetworkGraph::downstream_nodes] and
  [`downstream_sets`][NetworkGraph::downstream_sets] find the nodes downstream
  of one node, or of all of them.
- [`DownstreamSets::allocate`] rations the demand of the nodes under their
  limits, and reports the node whose limit was binding for each section.
- [`DownstreamSets::reachability_matrix`] builds the 0/1 matrix of which node
  is downstream of which.

[`allocate_dg`][NetworkGraph::allocate_dg] and
[`node_map`][NetworkGraph::node_map] run the last two end to end.

## Input tables

Reading the input tables is left to the caller, but [`schema::validate_columns`]
can check that a table has the columns required to read it.
*/

mod config;
pub use config::NetworkGraphConfig;

mod graph;
pub use graph::{iterators, Allocation, DownstreamSets, NetworkGraph, ReachabilityMatrix};

mod graph_traits;
pub use graph_traits::{Demand, Label, Limit, Section};

mod error;
pub use error::{Error, ErrorKind};

pub mod schema;
