use serde::Deserialize;

/// What `add_edge` does when both endpoints are the same vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelfLoopPolicy {
    /// Store the loop; its id is appended twice to the vertex's adjacency
    /// list, so it contributes 2 to the degree.
    #[default]
    Allow,
    Reject,
}

/// What `add_edge` does when the two endpoints are already joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParallelEdgePolicy {
    /// Uniqueness is the caller's obligation; no probe is made.
    #[default]
    Allow,
    /// Probe the source's adjacency first (O(degree)) and refuse duplicates.
    Reject,
}

/// Engine settings. Deserializable from TOML, e.g.
///
/// ```toml
/// initial_vertex_capacity = 1024
/// self_loops = "reject"
/// parallel_edges = "reject"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphConfig {
    pub initial_vertex_capacity: usize,
    pub initial_edge_capacity: usize,
    pub self_loops: SelfLoopPolicy,
    pub parallel_edges: ParallelEdgePolicy,
}

impl GraphConfig {
    /// Config that rejects self-loops and parallel edges.
    pub fn strict() -> Self {
        Self {
            self_loops: SelfLoopPolicy::Reject,
            parallel_edges: ParallelEdgePolicy::Reject,
            ..Self::default()
        }
    }

    pub fn with_capacity(mut self, vertices: usize, edges: usize) -> Self {
        self.initial_vertex_capacity = vertices;
        self.initial_edge_capacity = edges;
        self
    }
}
