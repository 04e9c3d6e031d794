// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for validating a [`NetworkGraph`] after sequencing.

use crate::{Error, NetworkGraph, Section};

impl<S> NetworkGraph<S>
where
    S: Section,
{
    /// Validates that every closed section was reached by at least one
    /// source, unless the config allows unreachable sections.
    pub(super) fn validate(&self) -> Result<(), Error> {
        let unreachable = self
            .sections
            .iter()
            .zip(&self.annotations)
            .filter(|(_, annotation)| annotation.is_none())
            .map(|(section, _)| section.section_id())
            .collect::<Vec<_>>();

        if unreachable.is_empty() {
            return Ok(());
        }

        let ids = unreachable
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        if !self.config.allow_unreachable_sections {
            return Err(Error::unreachable_section(format!(
                "Sections [{ids}] are not reachable from any source node."
            )));
        }

        tracing::warn!(
            "Sections [{}] are not reachable from any source node, they will be ignored.",
            ids
        );
        Ok(())
    }
}
