// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the configuration options for the `NetworkGraph`.

/// Configuration options for the `NetworkGraph`.
#[derive(Clone, Default, Debug)]
pub struct NetworkGraphConfig {
    /// Whether to allow closed sections that are not reachable from any of
    /// the source nodes.
    ///
    /// When this is `false`, such sections make graph creation fail.  When
    /// it is `true`, they are kept with a sequence of `0` and no further
    /// node, and are left out of the downstream sets and the allocation.
    pub allow_unreachable_sections: bool,
}
