use crate::config::{GraphConfig, ParallelEdgePolicy, SelfLoopPolicy};
use crate::error::{GraphError, Result};
use crate::index::HashIndex;

/// Permanent vertex handle. Assigned from 1 in insertion order, never reused.
pub type VertexId = u64;

/// Permanent edge handle. Assigned from 1 in insertion order, never reused.
pub type EdgeId = u64;

/// A vertex and its payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex<V> {
    id: VertexId,
    pub data: V,
    /// Reserved for callers; the engine sets it to 0 and never reads it.
    pub tag: i32,
}

impl<V> Vertex<V> {
    pub fn id(&self) -> VertexId {
        self.id
    }
}

/// An undirected edge. `src`/`tgt` only record the order given to `add_edge`.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge<E> {
    id: EdgeId,
    src: VertexId,
    tgt: VertexId,
    pub data: E,
    /// Reserved for callers; the engine sets it to 0 and never reads it.
    pub tag: i32,
}

impl<E> Edge<E> {
    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn src(&self) -> VertexId {
        self.src
    }

    pub fn tgt(&self) -> VertexId {
        self.tgt
    }

    pub fn is_self_loop(&self) -> bool {
        self.src == self.tgt
    }

    /// The endpoint opposite `vertex`, or None if `vertex` is not an endpoint.
    pub fn other_endpoint(&self, vertex: VertexId) -> Option<VertexId> {
        if self.src == vertex {
            Some(self.tgt)
        } else if self.tgt == vertex {
            Some(self.src)
        } else {
            None
        }
    }

    /// True if the edge joins `a` and `b` in either order.
    pub fn connects(&self, a: VertexId, b: VertexId) -> bool {
        (self.src == a && self.tgt == b) || (self.src == b && self.tgt == a)
    }
}

/// In-memory undirected graph: dense vertex/edge stores + id→position indexes
/// + per-vertex adjacency lists of incident edge ids.
///
/// Deletion swap-compacts the dense stores: the last element moves into the
/// freed slot and its index entry is repaired before the deleted id's entry
/// is dropped. `adjacency` is compacted in lockstep with `vertices`, so
/// `adjacency[p]` always belongs to `vertices[p]`.
pub struct Graph<V, E> {
    next_vertex_id: VertexId,
    next_edge_id: EdgeId,
    vertices: Vec<Vertex<V>>,
    edges: Vec<Edge<E>>,
    vertex_index: HashIndex<VertexId, usize>,
    edge_index: HashIndex<EdgeId, usize>,
    adjacency: Vec<Vec<EdgeId>>,
    config: GraphConfig,
}

impl<V, E> Graph<V, E> {
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    /// Pre-allocate for a known graph size.
    pub fn with_capacity(vertex_count: usize, edge_count: usize) -> Self {
        Self::with_config(GraphConfig::default().with_capacity(vertex_count, edge_count))
    }

    pub fn with_config(config: GraphConfig) -> Self {
        let vertex_count = config.initial_vertex_capacity;
        let edge_count = config.initial_edge_capacity;
        Self {
            next_vertex_id: 0,
            next_edge_id: 0,
            vertices: Vec::with_capacity(vertex_count),
            edges: Vec::with_capacity(edge_count),
            vertex_index: HashIndex::with_capacity(2 * vertex_count),
            edge_index: HashIndex::with_capacity(2 * edge_count),
            adjacency: Vec::with_capacity(vertex_count),
            config,
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    fn vertex_pos(&self, id: VertexId) -> Result<usize> {
        self.vertex_index
            .get(&id)
            .copied()
            .ok_or(GraphError::VertexNotFound(id))
    }

    fn edge_pos(&self, id: EdgeId) -> Result<usize> {
        self.edge_index
            .get(&id)
            .copied()
            .ok_or(GraphError::EdgeNotFound(id))
    }

    /// Edge `edge_id` as reached from `vertex`'s adjacency list.
    fn incident_edge(&self, edge_id: EdgeId, vertex: VertexId) -> Result<&Edge<E>> {
        let pos = self.edge_index.get(&edge_id).copied().ok_or_else(|| {
            GraphError::Corrupt(format!(
                "adjacency of vertex {vertex} lists missing edge {edge_id}"
            ))
        })?;
        let edge = &self.edges[pos];
        if edge.other_endpoint(vertex).is_none() {
            return Err(GraphError::NotIncident {
                edge: edge_id,
                vertex,
            });
        }
        Ok(edge)
    }

    /// Neighbor of `vertex` across `edge_id`.
    pub(crate) fn opposite(&self, edge_id: EdgeId, vertex: VertexId) -> Result<VertexId> {
        let edge = self.incident_edge(edge_id, vertex)?;
        edge.other_endpoint(vertex).ok_or(GraphError::NotIncident {
            edge: edge_id,
            vertex,
        })
    }

    /// Add a vertex and return its newly assigned id.
    pub fn add_vertex(&mut self, data: V) -> VertexId {
        self.next_vertex_id += 1;
        let id = self.next_vertex_id;
        let pos = self.vertices.len();

        self.vertices.push(Vertex { id, data, tag: 0 });
        self.vertex_index.insert(id, pos);
        self.adjacency.push(Vec::new());

        tracing::trace!(vertex = id, position = pos, "vertex added");
        id
    }

    pub fn vertex(&self, id: VertexId) -> Result<&Vertex<V>> {
        let pos = self.vertex_pos(id)?;
        Ok(&self.vertices[pos])
    }

    pub fn vertex_mut(&mut self, id: VertexId) -> Result<&mut Vertex<V>> {
        let pos = self.vertex_pos(id)?;
        Ok(&mut self.vertices[pos])
    }

    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertex_index.contains(&id)
    }

    /// Number of incident edge entries; a self-loop counts twice.
    pub fn degree(&self, id: VertexId) -> Result<usize> {
        let pos = self.vertex_pos(id)?;
        Ok(self.adjacency[pos].len())
    }

    /// Incident edge ids in insertion order (a self-loop appears twice).
    pub fn incident_edges(&self, id: VertexId) -> Result<&[EdgeId]> {
        let pos = self.vertex_pos(id)?;
        Ok(&self.adjacency[pos])
    }

    /// Incident edge ids sorted ascending; the traversal tie-break order.
    pub fn incident_edges_sorted(&self, id: VertexId) -> Result<Vec<EdgeId>> {
        let mut ids = self.incident_edges(id)?.to_vec();
        ids.sort_unstable();
        Ok(ids)
    }

    /// `(edge, neighbor)` pairs for every incident edge, in adjacency order.
    pub fn neighbors(&self, id: VertexId) -> Result<Vec<(EdgeId, VertexId)>> {
        self.incident_edges(id)?
            .iter()
            .map(|&edge_id| -> Result<(EdgeId, VertexId)> {
                Ok((edge_id, self.opposite(edge_id, id)?))
            })
            .collect()
    }

    /// Remove a vertex and every edge incident to it (cascade delete).
    ///
    /// The incident list is snapshotted first because each edge deletion
    /// edits it. Expected O(d²) for degree d.
    pub fn delete_vertex(&mut self, id: VertexId) -> Result<Vertex<V>> {
        let pos = self.vertex_pos(id)?;
        let incident = self.adjacency[pos].clone();

        for edge_id in incident {
            // A self-loop is listed twice; the second entry is already gone.
            if self.edge_index.contains(&edge_id) {
                self.delete_edge(edge_id)?;
            }
        }

        if !self.adjacency[pos].is_empty() {
            return Err(GraphError::Corrupt(format!(
                "vertex {id} still has {} adjacency entries after cascade",
                self.adjacency[pos].len()
            )));
        }

        let last = self.vertices.len() - 1;
        let moved = (pos != last).then(|| self.vertices[last].id);
        if let Some(moved_id) = moved {
            let slot = self.vertex_index.get_mut(&moved_id).ok_or_else(|| {
                GraphError::Corrupt(format!("vertex {moved_id} stored but not indexed"))
            })?;
            *slot = pos;
        }

        let removed = self.vertices.swap_remove(pos);
        self.adjacency.swap_remove(pos);
        self.vertex_index.remove(&id);

        tracing::debug!(vertex = id, position = pos, moved = ?moved, "vertex deleted");
        Ok(removed)
    }

    /// Add an undirected edge between two existing vertices.
    ///
    /// The id is pushed onto the adjacency list of both endpoints, twice onto
    /// the same list for a self-loop. Ids are only consumed on success.
    pub fn add_edge(&mut self, src: VertexId, tgt: VertexId, data: E) -> Result<EdgeId> {
        let src_pos = self.vertex_pos(src)?;
        let tgt_pos = self.vertex_pos(tgt)?;

        if src == tgt && self.config.self_loops == SelfLoopPolicy::Reject {
            return Err(GraphError::SelfLoop(src));
        }
        if self.config.parallel_edges == ParallelEdgePolicy::Reject {
            if let Some(existing) = self.probe_edge(src, tgt)? {
                return Err(GraphError::DuplicateEdge { src, tgt, existing });
            }
        }

        self.next_edge_id += 1;
        let id = self.next_edge_id;
        let pos = self.edges.len();

        self.edges.push(Edge {
            id,
            src,
            tgt,
            data,
            tag: 0,
        });
        self.edge_index.insert(id, pos);
        self.adjacency[src_pos].push(id);
        self.adjacency[tgt_pos].push(id);

        tracing::trace!(edge = id, src, tgt, position = pos, "edge added");
        Ok(id)
    }

    pub fn edge(&self, id: EdgeId) -> Result<&Edge<E>> {
        let pos = self.edge_pos(id)?;
        Ok(&self.edges[pos])
    }

    pub fn edge_mut(&mut self, id: EdgeId) -> Result<&mut Edge<E>> {
        let pos = self.edge_pos(id)?;
        Ok(&mut self.edges[pos])
    }

    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.edge_index.contains(&id)
    }

    /// Find an edge joining `src` and `tgt` in either order. O(degree(src)).
    ///
    /// An unknown `tgt` simply yields None.
    pub fn probe_edge(&self, src: VertexId, tgt: VertexId) -> Result<Option<EdgeId>> {
        for &edge_id in self.incident_edges(src)? {
            let edge = self.incident_edge(edge_id, src)?;
            if edge.connects(src, tgt) {
                return Ok(Some(edge_id));
            }
        }
        Ok(None)
    }

    /// Remove one occurrence of `edge_id` from `vertex`'s adjacency list.
    fn detach(&mut self, vertex: VertexId, edge_id: EdgeId) -> Result<()> {
        let pos = self.vertex_pos(vertex).map_err(|_| {
            GraphError::Corrupt(format!("edge {edge_id} refers to missing vertex {vertex}"))
        })?;
        let list = &mut self.adjacency[pos];
        let at = list
            .iter()
            .position(|&e| e == edge_id)
            .ok_or(GraphError::NotIncident {
                edge: edge_id,
                vertex,
            })?;
        list.remove(at);
        Ok(())
    }

    /// Remove an edge, detaching it from both endpoints. O(average degree).
    pub fn delete_edge(&mut self, id: EdgeId) -> Result<Edge<E>> {
        let pos = self.edge_pos(id)?;
        let (src, tgt) = (self.edges[pos].src, self.edges[pos].tgt);

        self.detach(src, id)?;
        self.detach(tgt, id)?;

        let last = self.edges.len() - 1;
        let moved = (pos != last).then(|| self.edges[last].id);
        if let Some(moved_id) = moved {
            let slot = self.edge_index.get_mut(&moved_id).ok_or_else(|| {
                GraphError::Corrupt(format!("edge {moved_id} stored but not indexed"))
            })?;
            *slot = pos;
        }

        let removed = self.edges.swap_remove(pos);
        self.edge_index.remove(&id);

        tracing::debug!(edge = id, src, tgt, position = pos, moved = ?moved, "edge deleted");
        Ok(removed)
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// True when the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertices in storage order. Order changes as deletions compact the store.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex<V>> {
        self.vertices.iter()
    }

    /// Edges in storage order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge<E>> {
        self.edges.iter()
    }

    /// `(id, position)` pairs from the vertex index, sorted by id.
    pub fn vertex_positions(&self) -> Vec<(VertexId, usize)> {
        let mut entries: Vec<_> = self.vertex_index.iter().map(|(&k, &v)| (k, v)).collect();
        entries.sort_unstable();
        entries
    }

    /// `(id, position)` pairs from the edge index, sorted by id.
    pub fn edge_positions(&self) -> Vec<(EdgeId, usize)> {
        let mut entries: Vec<_> = self.edge_index.iter().map(|(&k, &v)| (k, v)).collect();
        entries.sort_unstable();
        entries
    }

    /// Verify that both indexes agree with storage and that every adjacency
    /// list holds exactly its vertex's incident edges. Returns the first
    /// violation found.
    pub fn check_consistency(&self) -> Result<()> {
        let corrupt = |msg: String| Err(GraphError::Corrupt(msg));

        if self.vertex_index.len() != self.vertices.len() {
            return corrupt(format!(
                "vertex index holds {} entries for {} vertices",
                self.vertex_index.len(),
                self.vertices.len()
            ));
        }
        if self.adjacency.len() != self.vertices.len() {
            return corrupt(format!(
                "{} adjacency lists for {} vertices",
                self.adjacency.len(),
                self.vertices.len()
            ));
        }
        if self.edge_index.len() != self.edges.len() {
            return corrupt(format!(
                "edge index holds {} entries for {} edges",
                self.edge_index.len(),
                self.edges.len()
            ));
        }

        for (pos, vertex) in self.vertices.iter().enumerate() {
            if self.vertex_index.get(&vertex.id) != Some(&pos) {
                return corrupt(format!("vertex {} at position {pos} is mis-indexed", vertex.id));
            }
            if vertex.id == 0 || vertex.id > self.next_vertex_id {
                return corrupt(format!("vertex id {} was never issued", vertex.id));
            }
        }
        for (pos, edge) in self.edges.iter().enumerate() {
            if self.edge_index.get(&edge.id) != Some(&pos) {
                return corrupt(format!("edge {} at position {pos} is mis-indexed", edge.id));
            }
        }

        let mut entries = 0;
        for (pos, list) in self.adjacency.iter().enumerate() {
            let owner = self.vertices[pos].id;
            for &edge_id in list {
                self.incident_edge(edge_id, owner)?;
            }
            entries += list.len();
        }
        if entries != 2 * self.edges.len() {
            return corrupt(format!(
                "{entries} adjacency entries for {} edges",
                self.edges.len()
            ));
        }

        for edge in &self.edges {
            let src_pos = self.vertex_pos(edge.src)?;
            let in_src = self.adjacency[src_pos].iter().filter(|&&e| e == edge.id).count();
            let listed_correctly = if edge.is_self_loop() {
                in_src == 2
            } else {
                let tgt_pos = self.vertex_pos(edge.tgt)?;
                let in_tgt = self.adjacency[tgt_pos].iter().filter(|&&e| e == edge.id).count();
                in_src == 1 && in_tgt == 1
            };
            if !listed_correctly {
                return corrupt(format!("edge {} is not listed once per endpoint", edge.id));
            }
        }

        Ok(())
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let vertices_mem = self.vertices.capacity() * size_of::<Vertex<V>>();
        let edges_mem = self.edges.capacity() * size_of::<Edge<E>>();
        let adjacency_mem: usize = self
            .adjacency
            .iter()
            .map(|list| size_of::<Vec<EdgeId>>() + list.capacity() * size_of::<EdgeId>())
            .sum();
        let entry = size_of::<(u64, usize)>();
        let index_mem = (self.vertex_index.len() + self.edge_index.len()) * entry
            + (self.vertex_index.capacity() + self.edge_index.capacity()) * size_of::<Vec<()>>();

        vertices_mem + edges_mem + adjacency_mem + index_mem
    }
}

impl<V, E> Default for Graph<V, E> {
    fn default() -> Self {
        Self::new()
    }
}
