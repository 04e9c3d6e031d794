// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Iterators over nodes and sections in a `NetworkGraph`.

use std::iter::{Enumerate, Zip};
use std::slice::Iter;
use std::vec::IntoIter;

use petgraph::graph::NodeIndex;

use crate::{NetworkGraph, Section};

use super::SequenceAnnotation;

/// A closed section, together with the sequence number and further node it
/// got from the source that reached it first.
#[derive(Debug)]
pub struct AnnotatedSection<'a, S>
where
    S: Section,
{
    pub(crate) section: &'a S,
    pub(crate) sequence: u32,
    pub(crate) further_node: Option<&'a S::NodeId>,
}

impl<'a, S> AnnotatedSection<'a, S>
where
    S: Section,
{
    /// Returns the section.
    pub fn section(&self) -> &'a S {
        self.section
    }

    /// Returns the hop distance of the section from its source, or `0` if no
    /// source reaches it.
    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    /// Returns the end of the section that is farther from its source, or
    /// `None` if no source reaches it.
    pub fn further_node(&self) -> Option<&'a S::NodeId> {
        self.further_node
    }
}

/// An iterator over the nodes in a `NetworkGraph`.
pub struct Nodes<'a, Id> {
    pub(crate) iter: Iter<'a, petgraph::graph::Node<Id>>,
}

impl<'a, Id> Iterator for Nodes<'a, Id> {
    type Item = &'a Id;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|n| &n.weight)
    }
}

/// An iterator over the closed sections in a `NetworkGraph`, in the order
/// they were given.
pub struct AnnotatedSections<'a, S>
where
    S: Section,
{
    pub(crate) ng: &'a NetworkGraph<S>,
    pub(crate) iter: Zip<Iter<'a, S>, Iter<'a, Option<SequenceAnnotation>>>,
}

impl<'a, S> Iterator for AnnotatedSections<'a, S>
where
    S: Section,
{
    type Item = AnnotatedSection<'a, S>;

    fn next(&mut self) -> Option<Self::Item> {
        let ng = self.ng;
        self.iter
            .next()
            .map(|(section, annotation)| ng.annotate(section, *annotation))
    }
}

/// An iterator over the neighbors of a node in a `NetworkGraph`, paired with
/// the sections connecting them to the node.
pub struct Neighbors<'a, S>
where
    S: Section,
{
    pub(crate) ng: &'a NetworkGraph<S>,
    pub(crate) iter: IntoIter<(NodeIndex, usize)>,
}

impl<'a, S> Iterator for Neighbors<'a, S>
where
    S: Section,
{
    type Item = (&'a S::NodeId, &'a S);

    fn next(&mut self) -> Option<Self::Item> {
        let ng = self.ng;
        self.iter
            .next()
            .map(|(node, position)| (&ng.graph[node], &ng.sections[position]))
    }
}

/// An iterator over the positions and annotations of the sequenced sections,
/// skipping the ones no source reaches.
pub(crate) struct Sequenced<'a> {
    pub(crate) iter: Enumerate<Iter<'a, Option<SequenceAnnotation>>>,
}

impl Iterator for Sequenced<'_> {
    type Item = (usize, SequenceAnnotation);

    fn next(&mut self) -> Option<Self::Item> {
        self.iter
            .by_ref()
            .find_map(|(position, annotation)| annotation.map(|a| (position, a)))
    }
}
