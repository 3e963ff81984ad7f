use std::collections::VecDeque;

use crate::error::Result;
use crate::graph::{Graph, VertexId};
use crate::index::HashIndex;

/// Degree information for a single vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegreeResult {
    pub vertex_id: VertexId,
    /// Incident edge entries; a self-loop counts twice.
    pub degree: usize,
}

/// Neighbors of `vertex` in ascending edge-id order.
///
/// Edge id order, not neighbor id order, is what makes BFS and DFS output
/// deterministic. A self-loop yields `vertex` itself twice.
fn neighbors_by_edge_id<V, E>(graph: &Graph<V, E>, vertex: VertexId) -> Result<Vec<VertexId>> {
    graph
        .incident_edges_sorted(vertex)?
        .into_iter()
        .map(|edge_id| graph.opposite(edge_id, vertex))
        .collect()
}

/// Breadth-first search from `src`.
///
/// Returns every vertex of `src`'s component exactly once, in discovery
/// order, starting with `src`. Vertices are marked when enqueued.
pub fn breadth_first_search<V, E>(graph: &Graph<V, E>, src: VertexId) -> Result<Vec<VertexId>> {
    graph.vertex(src)?;

    let mut visited: HashIndex<VertexId, ()> = HashIndex::new();
    let mut queue: VecDeque<VertexId> = VecDeque::new();
    let mut path = vec![src];

    visited.insert(src, ());
    queue.push_back(src);

    while let Some(current) = queue.pop_front() {
        for next in neighbors_by_edge_id(graph, current)? {
            if visited.insert(next, ()) {
                path.push(next);
                queue.push_back(next);
            }
        }
    }

    Ok(path)
}

/// Iterative depth-first search from `src`.
///
/// A vertex is marked and recorded when popped; stale stack entries for an
/// already visited vertex are skipped. Neighbors are pushed in descending
/// edge-id order so the lowest edge id is explored first, matching the order
/// a recursive DFS would take.
pub fn depth_first_search<V, E>(graph: &Graph<V, E>, src: VertexId) -> Result<Vec<VertexId>> {
    graph.vertex(src)?;

    let mut visited: HashIndex<VertexId, ()> = HashIndex::new();
    let mut stack: Vec<VertexId> = vec![src];
    let mut path = Vec::new();

    while let Some(current) = stack.pop() {
        if !visited.insert(current, ()) {
            continue;
        }
        path.push(current);

        for next in neighbors_by_edge_id(graph, current)?.into_iter().rev() {
            if !visited.contains(&next) {
                stack.push(next);
            }
        }
    }

    Ok(path)
}

/// True if `b` is reachable from `a`. Stops as soon as `b` is discovered.
pub fn is_connected<V, E>(graph: &Graph<V, E>, a: VertexId, b: VertexId) -> Result<bool> {
    graph.vertex(a)?;
    graph.vertex(b)?;
    if a == b {
        return Ok(true);
    }

    let mut visited: HashIndex<VertexId, ()> = HashIndex::new();
    let mut queue: VecDeque<VertexId> = VecDeque::new();
    visited.insert(a, ());
    queue.push_back(a);

    while let Some(current) = queue.pop_front() {
        for next in neighbors_by_edge_id(graph, current)? {
            if next == b {
                return Ok(true);
            }
            if visited.insert(next, ()) {
                queue.push_back(next);
            }
        }
    }

    Ok(false)
}

/// Fewest-hop path from `start` to `target`, both endpoints included.
///
/// Ties between equally short paths follow the BFS edge-id order. Returns
/// `Ok(None)` when `target` is in another component.
pub fn shortest_path<V, E>(
    graph: &Graph<V, E>,
    start: VertexId,
    target: VertexId,
) -> Result<Option<Vec<VertexId>>> {
    graph.vertex(start)?;
    graph.vertex(target)?;
    if start == target {
        return Ok(Some(vec![start]));
    }

    // vertex → parent on the BFS tree; start is its own parent
    let mut parents: HashIndex<VertexId, VertexId> = HashIndex::new();
    let mut queue: VecDeque<VertexId> = VecDeque::new();
    parents.insert(start, start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for next in neighbors_by_edge_id(graph, current)? {
            if !parents.insert(next, current) {
                continue;
            }
            if next == target {
                return Ok(Some(reconstruct_path(&parents, start, target)));
            }
            queue.push_back(next);
        }
    }

    Ok(None)
}

/// Walk parent pointers from `target` back to `start`.
fn reconstruct_path(
    parents: &HashIndex<VertexId, VertexId>,
    start: VertexId,
    target: VertexId,
) -> Vec<VertexId> {
    let mut path = vec![target];
    let mut current = target;
    while current != start {
        match parents.get(&current) {
            Some(&parent) => {
                path.push(parent);
                current = parent;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

/// Return vertices ranked by degree.
///
/// If `top_n` is 0, returns all vertices. Otherwise returns the top N by
/// degree (descending). Ties are broken by vertex id (ascending).
pub fn degree_centrality<V, E>(graph: &Graph<V, E>, top_n: usize) -> Result<Vec<DegreeResult>> {
    let mut results = graph
        .vertices()
        .map(|v| -> Result<DegreeResult> {
            Ok(DegreeResult {
                vertex_id: v.id(),
                degree: graph.degree(v.id())?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    results.sort_by(|a, b| b.degree.cmp(&a.degree).then(a.vertex_id.cmp(&b.vertex_id)));

    if top_n > 0 && top_n < results.len() {
        results.truncate(top_n);
    }

    Ok(results)
}
