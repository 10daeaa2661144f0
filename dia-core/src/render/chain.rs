use std::collections::{HashSet, VecDeque};

use crate::foundation::error::{DiaError, DiaResult};
use crate::index::manifest::DependencyIndex;

/// Identifiers to composite for one request, root (bottom layer) first, requested leaf last.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chain {
    ids: Vec<String>,
}

impl Chain {
    /// Bottom-most layer.
    pub fn root(&self) -> &str {
        &self.ids[0]
    }

    /// Requested identifier.
    pub fn leaf(&self) -> &str {
        &self.ids[self.ids.len() - 1]
    }

    /// Layers stacked on top of the root, bottom to top.
    pub fn overlays(&self) -> &[String] {
        &self.ids[1..]
    }

    /// All identifiers, root first.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Always `false`: a resolved chain holds at least the requested identifier.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Consume the chain, returning identifiers root first.
    pub fn into_ids(self) -> Vec<String> {
        self.ids
    }
}

/// Walk `parent_of` links from `start` to its root.
///
/// Only link structure is checked here; whether each identifier has an image mapping is left
/// to the compositor. Revisiting an identifier fails with [`DiaError::Cycle`].
#[tracing::instrument(level = "debug", skip(index))]
pub fn resolve_chain(index: &DependencyIndex, start: &str) -> DiaResult<Chain> {
    let mut visited = HashSet::<&str>::new();
    let mut ids = VecDeque::<String>::new();
    let mut current = Some(start);

    while let Some(id) = current {
        if !visited.insert(id) {
            return Err(DiaError::Cycle { id: id.to_string() });
        }
        ids.push_front(id.to_string());
        current = index.parent_of(id);
    }

    tracing::debug!(depth = ids.len(), root = %ids[0], "resolved chain");
    Ok(Chain {
        ids: Vec::from(ids),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/chain.rs"]
mod tests;
