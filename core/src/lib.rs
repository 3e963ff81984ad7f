//! graph-index-core: In-memory undirected graph over stable ids.
//!
//! Vertices and edges live in dense, swap-compacted vectors. Callers hold
//! permanent `u64` ids; a universal-hashing [`HashIndex`] maps each id to the
//! element's current position and is repaired whenever a deletion moves an
//! element. Traversals (BFS, DFS, connectivity, shortest path) visit
//! neighbors in edge-id order so their output is deterministic.
//!
//! Single-threaded and synchronous. No I/O; the `graph-index` CLI and the
//! bench binary are the file-reading front ends.

mod config;
mod error;
mod graph;
mod hash;
mod index;
mod primes;
mod traversal;

pub use config::{GraphConfig, ParallelEdgePolicy, SelfLoopPolicy};
pub use error::{GraphError, Result};
pub use graph::{Edge, EdgeId, Graph, Vertex, VertexId};
pub use hash::{
    fold_str, mersenne_mod, universal_hash, UniversalHash, HASH_PARAM_A, HASH_PARAM_B,
    MERSENNE_EXPONENT, MERSENNE_PRIME,
};
pub use index::{HashIndex, INITIAL_CAPACITY};
pub use primes::{PrimeTable, DEFAULT_PRIME_BOUND};
pub use traversal::{
    breadth_first_search, degree_centrality, depth_first_search, is_connected, shortest_path,
    DegreeResult,
};
