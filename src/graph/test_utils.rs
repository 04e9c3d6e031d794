// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module is only compiled when running unit tests and contains features
//! that are shared by all tests of the `graph` module.
//!
//! - the `TestSection`, `TestDemand` and `TestLimit` types, which implement
//!   the `Section`, `Demand` and `Limit` traits respectively.
//! - the `NetworkBuilder`, which can declaratively build network
//!   configurations for use in tests.

use crate::{Demand, Error, Limit, NetworkGraph, NetworkGraphConfig, Section};

#[derive(Clone, Debug, PartialEq)]
pub(super) struct TestSection(u64, &'static str, &'static str);

impl TestSection {
    pub(super) fn new(id: u64, start: &'static str, end: &'static str) -> Self {
        TestSection(id, start, end)
    }
}

impl Section for TestSection {
    type SectionId = u64;
    type NodeId = &'static str;

    fn section_id(&self) -> u64 {
        self.0
    }

    fn start(&self) -> &'static str {
        self.1
    }

    fn end(&self) -> &'static str {
        self.2
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(super) struct TestDemand(&'static str, f64);

impl TestDemand {
    pub(super) fn new(node: &'static str, dg: f64) -> Self {
        TestDemand(node, dg)
    }
}

impl Demand for TestDemand {
    type NodeId = &'static str;

    fn node(&self) -> &'static str {
        self.0
    }

    fn dg(&self) -> f64 {
        self.1
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(super) struct TestLimit(&'static str, f64);

impl TestLimit {
    pub(super) fn new(node: &'static str, limit: f64) -> Self {
        TestLimit(node, limit)
    }
}

impl Limit for TestLimit {
    type NodeId = &'static str;

    fn node(&self) -> &'static str {
        self.0
    }

    fn limit(&self) -> f64 {
        self.1
    }
}

/// A builder for creating network configurations easily, for use in tests.
///
/// Section ids are handed out in the order the sections are added, starting
/// at 1.
pub(super) struct NetworkBuilder {
    sections: Vec<TestSection>,
    open_sections: Vec<u64>,
    sources: Vec<&'static str>,
    next_id: u64,
}

impl NetworkBuilder {
    /// Creates a new `NetworkBuilder`.
    pub(super) fn new() -> Self {
        NetworkBuilder {
            sections: Vec::new(),
            open_sections: Vec::new(),
            sources: Vec::new(),
            next_id: 1,
        }
    }

    /// Adds a section between the two nodes and returns its id.
    pub(super) fn connect(&mut self, start: &'static str, end: &'static str) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.sections.push(TestSection::new(id, start, end));
        id
    }

    /// Connects consecutive nodes of the given list with sections, and
    /// returns the ids of the new sections.
    pub(super) fn chain(&mut self, nodes: &[&'static str]) -> Vec<u64> {
        nodes
            .windows(2)
            .map(|pair| self.connect(pair[0], pair[1]))
            .collect()
    }

    /// Marks the section with the given id as open.
    pub(super) fn open(&mut self, section_id: u64) -> &mut Self {
        self.open_sections.push(section_id);
        self
    }

    /// Declares a source node.  Sources are prioritized in the order they are
    /// declared.
    pub(super) fn source(&mut self, node: &'static str) -> &mut Self {
        self.sources.push(node);
        self
    }

    /// Builds and returns the network graph from the sections, open sections
    /// and sources added to the builder.
    pub(super) fn build(
        &self,
        config: Option<NetworkGraphConfig>,
    ) -> Result<NetworkGraph<TestSection>, Error> {
        NetworkGraph::try_new(
            self.sections.clone(),
            self.open_sections.clone(),
            self.sources.clone(),
            config.unwrap_or_default(),
        )
    }
}
