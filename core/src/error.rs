use thiserror::Error;

use crate::graph::{EdgeId, VertexId};

/// Errors raised by the index and the graph engine.
///
/// Variants fall into three classes: lookups of absent ids (not found),
/// structural violations and rejected edges (domain errors), and internal
/// misconfiguration (invalid state). None of them are retried, and a
/// failure partway through a cascading deletion leaves the graph in an
/// unspecified state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("vertex {0} not found")]
    VertexNotFound(VertexId),

    #[error("edge {0} not found")]
    EdgeNotFound(EdgeId),

    /// An edge was reached through a vertex that is neither of its endpoints.
    #[error("edge {edge} is not incident to vertex {vertex}: adjacency corrupted")]
    NotIncident { edge: EdgeId, vertex: VertexId },

    /// An id-to-position entry or an adjacency list disagrees with storage.
    #[error("graph corrupted: {0}")]
    Corrupt(String),

    #[error("self-loop on vertex {0} rejected by configuration")]
    SelfLoop(VertexId),

    #[error("edge between {src} and {tgt} already exists as edge {existing}")]
    DuplicateEdge {
        src: VertexId,
        tgt: VertexId,
        existing: EdgeId,
    },

    #[error("invalid state: {0}")]
    InvalidState(&'static str),
}

impl GraphError {
    /// True for lookups of ids that are absent from their index.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::VertexNotFound(_) | Self::EdgeNotFound(_))
    }

    /// True for structural violations and edges rejected by policy.
    pub fn is_domain_error(&self) -> bool {
        matches!(
            self,
            Self::NotIncident { .. } | Self::Corrupt(_) | Self::SelfLoop(_) | Self::DuplicateEdge { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(GraphError::VertexNotFound(1).is_not_found());
        assert!(GraphError::EdgeNotFound(1).is_not_found());
        assert!(!GraphError::SelfLoop(1).is_not_found());
        assert!(GraphError::NotIncident { edge: 1, vertex: 2 }.is_domain_error());
        assert!(GraphError::DuplicateEdge { src: 1, tgt: 2, existing: 3 }.is_domain_error());
        assert!(!GraphError::InvalidState("x").is_domain_error());
        assert!(!GraphError::InvalidState("x").is_not_found());
    }

    #[test]
    fn test_display() {
        assert_eq!(GraphError::VertexNotFound(7).to_string(), "vertex 7 not found");
        assert_eq!(
            GraphError::NotIncident { edge: 3, vertex: 9 }.to_string(),
            "edge 3 is not incident to vertex 9: adjacency corrupted"
        );
    }
}
