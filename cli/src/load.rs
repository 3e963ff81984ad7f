use std::path::Path;

use anyhow::{bail, Context};
use graph_index_core::{Graph, GraphConfig, HashIndex, VertexId};

/// Graph as loaded by the driver: city labels on vertices, distances on edges.
pub type CityGraph = Graph<String, u32>;

/// Label → vertex id lookup kept beside the graph.
pub type LabelIndex = HashIndex<String, VertexId>;

/// One parsed line of the edge file.
#[derive(Debug, PartialEq, Eq)]
pub struct EdgeLine<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub distance: u32,
}

/// Read a TOML engine config, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<GraphConfig> {
    let Some(path) = path else {
        return Ok(GraphConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = toml::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    tracing::debug!(path = %path.display(), ?config, "config loaded");
    Ok(config)
}

/// Add one vertex per non-blank line. Returns labels in file order.
///
/// A repeated label still gets its own vertex, but the label index keeps
/// pointing at the first one.
pub fn load_vertices(
    text: &str,
    graph: &mut CityGraph,
    labels: &mut LabelIndex,
) -> Vec<String> {
    let mut cities = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let label = line.trim();
        if label.is_empty() {
            continue;
        }
        let id = graph.add_vertex(label.to_string());
        if !labels.insert(label.to_string(), id) {
            tracing::warn!(line = lineno + 1, label, id, "duplicate vertex label; keeping first");
        }
        cities.push(label.to_string());
    }
    tracing::info!(vertices = graph.num_vertices(), "vertices loaded");
    cities
}

/// Parse `<label1> <label2> <distance>`. Blank lines yield None.
pub fn parse_edge_line(line: &str) -> anyhow::Result<Option<EdgeLine<'_>>> {
    let mut fields = line.split_whitespace();
    let Some(from) = fields.next() else {
        return Ok(None);
    };
    let (Some(to), Some(distance)) = (fields.next(), fields.next()) else {
        bail!("expected `<from> <to> <distance>`, got {line:?}");
    };
    let distance = distance
        .parse()
        .with_context(|| format!("invalid distance {distance:?}"))?;
    Ok(Some(EdgeLine { from, to, distance }))
}

/// Add one edge per non-blank line. Returns the number of edges added.
pub fn load_edges(text: &str, graph: &mut CityGraph, labels: &LabelIndex) -> anyhow::Result<usize> {
    let mut added = 0;
    for (lineno, line) in text.lines().enumerate() {
        let lineno = lineno + 1;
        let Some(edge) = parse_edge_line(line).with_context(|| format!("edge file line {lineno}"))?
        else {
            continue;
        };

        let (Some(&src), Some(&tgt)) = (labels.get(edge.from), labels.get(edge.to)) else {
            bail!(
                "edge file line {lineno}: adding edge between vertices that do not exist ({} - {})",
                edge.from,
                edge.to
            );
        };
        let id = graph
            .add_edge(src, tgt, edge.distance)
            .with_context(|| format!("edge file line {lineno}"))?;
        tracing::debug!(edge = id, from = edge.from, to = edge.to, distance = edge.distance, "edge added");
        added += 1;
    }
    tracing::info!(edges = added, "edges loaded");
    Ok(added)
}
