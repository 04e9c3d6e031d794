// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module defines the `Error` struct and the `ErrorKind` enum, used to
//! report malformed input tables and topologies that can't be analyzed.

/// A macro for defining the `ErrorKind` enum, the `Display` implementation for
/// it, and the constructors for the `Error` struct.
macro_rules! ErrorKind {
    ($(
        ($kind:ident, $ctor:ident, $doc:literal)
    ),*) => {
        /// The kind of error that occurred.
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub enum ErrorKind {
            $(
                #[doc = $doc]
                $kind,
            )*
        }

        impl std::fmt::Display for ErrorKind {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        Self::$kind => write!(f, "{}", stringify!($kind)),
                    )*
                }
            }
        }

        /// Constructors for [`Error`].
        impl Error {
            $(
                #[doc = concat!(
                    "Creates a new [`Error`] with the `",
                    stringify!($kind),
                    "` kind and the given description."
                )]
                pub(crate) fn $ctor(desc: impl Into<String>) -> crate::Error {
                    Self {
                        kind: ErrorKind::$kind,
                        desc: desc.into(),
                    }
                }
            )*
        }
    };
}

ErrorKind!(
    (
        InvalidGraph,
        invalid_graph,
        "The network as a whole can't be analyzed."
    ),
    (
        InvalidRecord,
        invalid_record,
        "A demand or limit record is malformed."
    ),
    (InvalidSection, invalid_section, "A section is malformed."),
    (
        MissingColumns,
        missing_columns,
        "An input table lacks required columns."
    ),
    (NodeNotFound, node_not_found, "No node has the given id."),
    (
        SectionNotFound,
        section_not_found,
        "No closed section has the given id."
    ),
    (
        UnreachableSection,
        unreachable_section,
        "Some sections can't be reached from any source node."
    )
);

/// An error that can occur during the creation of a
/// [`NetworkGraph`][crate::NetworkGraph], or during any of the analyses run
/// on it.
#[derive(Debug, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    desc: String,
}

impl Error {
    /// Returns the kind of the error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the description of the error.
    pub fn description(&self) -> &str {
        &self.desc
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.desc)
    }
}

impl std::error::Error for Error {}
