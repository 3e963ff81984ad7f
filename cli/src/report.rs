use serde::Serialize;

use graph_index_core::{
    breadth_first_search, depth_first_search, is_connected, EdgeId, VertexId,
};

use crate::load::{CityGraph, LabelIndex};
use crate::rng::FastRng;

#[derive(Debug, Serialize)]
pub struct Report {
    pub vertices: Vec<VertexRow>,
    pub probes: Vec<ProbeRow>,
    pub source: Option<String>,
    pub bfs: Vec<String>,
    pub dfs: Vec<String>,
    pub deletion: Option<DeletionSummary>,
}

/// A vertex with its degree and adjacency list.
#[derive(Debug, Serialize)]
pub struct VertexRow {
    pub id: VertexId,
    pub label: String,
    pub degree: usize,
    pub neighbors: Vec<NeighborRow>,
}

#[derive(Debug, Serialize)]
pub struct NeighborRow {
    pub edge: EdgeId,
    pub label: String,
    pub distance: u32,
}

/// Result of probing a random pair of cities.
#[derive(Debug, Serialize)]
pub struct ProbeRow {
    pub from: String,
    pub to: String,
    /// Distance of a direct edge, if one exists.
    pub distance: Option<u32>,
    pub connected: bool,
}

#[derive(Debug, Serialize)]
pub struct DeletionSummary {
    pub deleted: usize,
    pub remaining_vertices: usize,
    pub remaining_edges: usize,
}

fn label_of(graph: &CityGraph, id: VertexId) -> anyhow::Result<String> {
    Ok(graph.vertex(id)?.data.clone())
}

fn labels_of(graph: &CityGraph, ids: &[VertexId]) -> anyhow::Result<Vec<String>> {
    ids.iter().map(|&id| label_of(graph, id)).collect()
}

/// Adjacency listing in vertex id order.
pub fn adjacency(graph: &CityGraph) -> anyhow::Result<Vec<VertexRow>> {
    let mut ids: Vec<VertexId> = graph.vertices().map(|v| v.id()).collect();
    ids.sort_unstable();

    ids.into_iter()
        .map(|id| -> anyhow::Result<VertexRow> {
            let neighbors = graph
                .neighbors(id)?
                .into_iter()
                .map(|(edge, other)| -> anyhow::Result<NeighborRow> {
                    Ok(NeighborRow {
                        edge,
                        label: label_of(graph, other)?,
                        distance: graph.edge(edge)?.data,
                    })
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            Ok(VertexRow {
                id,
                label: label_of(graph, id)?,
                degree: graph.degree(id)?,
                neighbors,
            })
        })
        .collect()
}

/// Probe `count` random pairs of distinct cities for a direct edge and for
/// connectivity.
pub fn probe_pairs(
    graph: &CityGraph,
    labels: &LabelIndex,
    cities: &[String],
    count: usize,
    rng: &mut FastRng,
) -> anyhow::Result<Vec<ProbeRow>> {
    let mut rows = Vec::new();
    if cities.len() < 2 {
        return Ok(rows);
    }

    for _ in 0..count {
        let i = rng.next(cities.len() as u64) as usize;
        let j = rng.next(cities.len() as u64) as usize;
        if i == j {
            continue;
        }
        let (Some(&a), Some(&b)) = (labels.get(&cities[i]), labels.get(&cities[j])) else {
            anyhow::bail!(
                "probing between vertices that do not exist ({} - {})",
                cities[i],
                cities[j]
            );
        };
        let distance = match graph.probe_edge(a, b)? {
            Some(edge) => Some(graph.edge(edge)?.data),
            None => None,
        };
        rows.push(ProbeRow {
            from: cities[i].clone(),
            to: cities[j].clone(),
            distance,
            connected: is_connected(graph, a, b)?,
        });
    }
    Ok(rows)
}

/// BFS and DFS from `source`, as labels.
pub fn traversals(graph: &CityGraph, source: VertexId) -> anyhow::Result<(Vec<String>, Vec<String>)> {
    let bfs = breadth_first_search(graph, source)?;
    let dfs = depth_first_search(graph, source)?;
    Ok((labels_of(graph, &bfs)?, labels_of(graph, &dfs)?))
}

/// Delete every labelled vertex in random order, checking consistency after
/// each deletion.
pub fn delete_all(
    graph: &mut CityGraph,
    labels: &LabelIndex,
    cities: &[String],
    rng: &mut FastRng,
) -> anyhow::Result<DeletionSummary> {
    let mut order: Vec<&String> = cities.iter().collect();
    rng.shuffle(&mut order);

    let mut deleted = 0;
    for city in order {
        let Some(&id) = labels.get(city.as_str()) else {
            continue;
        };
        if !graph.contains_vertex(id) {
            continue;
        }
        graph.delete_vertex(id)?;
        graph.check_consistency()?;
        deleted += 1;
    }
    tracing::info!(deleted, "vertices deleted");

    Ok(DeletionSummary {
        deleted,
        remaining_vertices: graph.num_vertices(),
        remaining_edges: graph.num_edges(),
    })
}

pub fn print_text(report: &Report) {
    for row in &report.vertices {
        println!("Vertex {} ({}):", row.id, row.label);
        for n in &row.neighbors {
            println!("  -- {} via edge {} ({})", n.label, n.edge, n.distance);
        }
    }
    for row in &report.vertices {
        println!("The degree of vertex {} is:\t{}", row.label, row.degree);
    }

    for p in &report.probes {
        match p.distance {
            Some(d) => println!("The distance between the cities {} and {} is {}", p.from, p.to, d),
            None => println!("No edge exists between the cities {} and {}", p.from, p.to),
        }
        let verdict = if p.connected { "are" } else { "are not" };
        println!("The cities {} and {} {} connected.", p.from, p.to, verdict);
    }

    if let Some(source) = &report.source {
        println!("BFS path from {}: {}", source, report.bfs.join(" "));
        println!("DFS path from {}: {}", source, report.dfs.join(" "));
    }

    if let Some(d) = &report.deletion {
        println!(
            "Deleted {} vertices: {} vertices, {} edges remain",
            d.deleted, d.remaining_vertices, d.remaining_edges
        );
    }
}
