// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the traits that need to be implemented by the types
//! that represent sections, demand records and limit records.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// An identifier for a node or a section.
///
/// Input tables label nodes and sections with integers or strings, so any
/// type that can be cloned, compared, hashed and printed can be used.  This
/// trait is implemented automatically for all such types.
pub trait Label: Clone + Eq + Hash + Debug + Display {}

impl<T> Label for T where T: Clone + Eq + Hash + Debug + Display {}

/**
This trait needs to be implemented by the type that represents a section.

Read more about why this is necessary [here][crate#the-section-demand-and-limit-traits].

<details>
<summary>Example implementation for a row of the network table:</summary>

```ignore
struct NetworkRow {
    section: String,
    start: String,
    end: String,
    c: Option<f64>,
}

impl distribution_network_graph::Section for NetworkRow {
    type SectionId = String;
    type NodeId = String;

    fn section_id(&self) -> String {
        self.section.clone()
    }

    fn start(&self) -> String {
        self.start.clone()
    }

    fn end(&self) -> String {
        self.end.clone()
    }
}
```

</details>
*/
pub trait Section {
    /// The type of the section identifiers.
    type SectionId: Label;
    /// The type of the node identifiers.
    type NodeId: Label;

    /// Returns the id of the section.
    fn section_id(&self) -> Self::SectionId;
    /// Returns the node at one end of the section.
    fn start(&self) -> Self::NodeId;
    /// Returns the node at the other end of the section.
    fn end(&self) -> Self::NodeId;
}

/**
This trait needs to be implemented by the type that represents the demand
(`dg`) of a node.

<details>
<summary>Example implementation:</summary>

```ignore
struct DemandRow {
    node: String,
    dg: f64,
}

impl distribution_network_graph::Demand for DemandRow {
    type NodeId = String;

    fn node(&self) -> String {
        self.node.clone()
    }

    fn dg(&self) -> f64 {
        self.dg
    }
}
```

</details>
*/
pub trait Demand {
    /// The type of the node identifiers.
    type NodeId: Label;

    /// Returns the node the demand belongs to.
    fn node(&self) -> Self::NodeId;
    /// Returns the demand at the node.
    fn dg(&self) -> f64;
}

/// This trait needs to be implemented by the type that represents the limit
/// of a node.
///
/// Columns like the limit type or the node coordinates can stay on the
/// implementing type; they are never read here.
pub trait Limit {
    /// The type of the node identifiers.
    type NodeId: Label;

    /// Returns the node the limit belongs to.
    fn node(&self) -> Self::NodeId;
    /// Returns the maximum aggregate demand the node may pass downstream.
    fn limit(&self) -> f64;
}
