// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module defines the input tables of an analysis and the columns each
//! of them requires, so that readers of those tables can reject incomplete
//! inputs before building a [`NetworkGraph`][crate::NetworkGraph].

use std::collections::BTreeSet;
use std::fmt::Display;

use crate::Error;

/// An input table of an analysis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Table {
    /// The sections of the network.
    Network,
    /// The source nodes, in priority order.
    Source,
    /// The ids of the open sections.
    Open,
    /// The limit of each node.
    Limit,
    /// The demand of each node.
    Demand,
}

impl Table {
    /// Returns the columns the table must have.
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            Table::Network => &["section", "start", "end"],
            Table::Source => &["source"],
            Table::Open => &["section"],
            Table::Limit => &["node", "limit", "type", "x", "y"],
            Table::Demand => &["node", "dg"],
        }
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Table::Network => write!(f, "Network"),
            Table::Source => write!(f, "Source"),
            Table::Open => write!(f, "Open"),
            Table::Limit => write!(f, "Limit"),
            Table::Demand => write!(f, "Demand"),
        }
    }
}

/// Checks that the header `columns` read from `file_name` contain all the
/// columns required by `table`.  Extra columns are allowed.
///
/// Returns an error listing the missing columns in alphabetical order.
pub fn validate_columns<'c>(
    table: Table,
    file_name: &str,
    columns: impl IntoIterator<Item = &'c str>,
) -> Result<(), Error> {
    let present = columns.into_iter().map(str::trim).collect::<BTreeSet<_>>();
    let missing = table
        .required_columns()
        .iter()
        .filter(|column| !present.contains(*column))
        .collect::<BTreeSet<_>>();

    if missing.is_empty() {
        return Ok(());
    }

    Err(Error::missing_columns(format!(
        "{table} table in '{file_name}' is missing the columns {missing:?}."
    )))
}
