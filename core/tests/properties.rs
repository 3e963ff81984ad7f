use std::collections::HashMap;

use graph_index_core::{breadth_first_search, is_connected, Graph, HashIndex};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    AddVertex,
    AddEdge(usize, usize),
    DeleteVertex(usize),
    DeleteEdge(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::AddVertex),
        4 => (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Op::AddEdge(a, b)),
        1 => any::<usize>().prop_map(Op::DeleteVertex),
        2 => any::<usize>().prop_map(Op::DeleteEdge),
    ]
}

#[derive(Debug, Clone)]
enum IndexOp {
    Insert(u64, u32),
    Remove(u64),
}

fn index_op() -> impl Strategy<Value = IndexOp> {
    prop_oneof![
        3 => (0u64..400, any::<u32>()).prop_map(|(k, v)| IndexOp::Insert(k, v)),
        2 => (0u64..400).prop_map(IndexOp::Remove),
    ]
}

proptest! {
    #[test]
    fn random_mutations_stay_consistent(ops in prop::collection::vec(op(), 1..200)) {
        let mut g: Graph<u32, u32> = Graph::new();
        let mut live_vertices: Vec<u64> = Vec::new();
        let mut live_edges: Vec<u64> = Vec::new();
        let mut last_vertex = 0;
        let mut last_edge = 0;

        for op in ops {
            match op {
                Op::AddVertex => {
                    let id = g.add_vertex(0);
                    prop_assert!(id > last_vertex);
                    last_vertex = id;
                    live_vertices.push(id);
                }
                Op::AddEdge(a, b) if !live_vertices.is_empty() => {
                    let src = live_vertices[a % live_vertices.len()];
                    let tgt = live_vertices[b % live_vertices.len()];
                    let before = g.degree(src).unwrap();
                    let id = g.add_edge(src, tgt, 1).unwrap();
                    prop_assert!(id > last_edge);
                    last_edge = id;
                    live_edges.push(id);
                    prop_assert_eq!(g.degree(src).unwrap(), before + if src == tgt { 2 } else { 1 });
                    prop_assert!(g.probe_edge(tgt, src).unwrap().is_some());
                }
                Op::DeleteVertex(i) if !live_vertices.is_empty() => {
                    let id = live_vertices.swap_remove(i % live_vertices.len());
                    let incident = g.incident_edges(id).unwrap().to_vec();
                    g.delete_vertex(id).unwrap();
                    prop_assert!(g.vertex(id).unwrap_err().is_not_found());
                    for e in incident {
                        prop_assert!(g.edge(e).is_err());
                    }
                    live_edges.retain(|&e| g.contains_edge(e));
                }
                Op::DeleteEdge(i) if !live_edges.is_empty() => {
                    let id = live_edges.swap_remove(i % live_edges.len());
                    g.delete_edge(id).unwrap();
                    prop_assert!(g.edge(id).unwrap_err().is_not_found());
                }
                _ => {}
            }
            g.check_consistency().unwrap();
        }

        prop_assert_eq!(g.num_vertices(), live_vertices.len());
        prop_assert_eq!(g.num_edges(), live_edges.len());
        for &v in &live_vertices {
            prop_assert!(g.vertex(v).is_ok());
        }
    }

    #[test]
    fn bfs_matches_is_connected(ops in prop::collection::vec(op(), 1..120)) {
        let mut g: Graph<(), ()> = Graph::new();
        let mut live: Vec<u64> = Vec::new();
        for op in ops {
            match op {
                Op::AddVertex => live.push(g.add_vertex(())),
                Op::AddEdge(a, b) if !live.is_empty() => {
                    g.add_edge(live[a % live.len()], live[b % live.len()], ()).unwrap();
                }
                Op::DeleteVertex(i) if !live.is_empty() => {
                    let id = live.swap_remove(i % live.len());
                    g.delete_vertex(id).unwrap();
                }
                _ => {}
            }
        }

        if let Some(&src) = live.first() {
            let reached = breadth_first_search(&g, src).unwrap();
            prop_assert_eq!(reached[0], src);
            for &v in &live {
                prop_assert_eq!(is_connected(&g, src, v).unwrap(), reached.contains(&v));
            }
            let mut dedup = reached.clone();
            dedup.sort_unstable();
            dedup.dedup();
            prop_assert_eq!(dedup.len(), reached.len());
        }
    }

    #[test]
    fn hash_index_matches_hashmap(ops in prop::collection::vec(index_op(), 1..600)) {
        let mut index: HashIndex<u64, u32> = HashIndex::new();
        let mut model: HashMap<u64, u32> = HashMap::new();

        for op in ops {
            match op {
                IndexOp::Insert(k, v) => {
                    let fresh = !model.contains_key(&k);
                    if fresh {
                        model.insert(k, v);
                    }
                    prop_assert_eq!(index.insert(k, v), fresh);
                }
                IndexOp::Remove(k) => {
                    prop_assert_eq!(index.remove(&k), model.remove(&k).is_some());
                }
            }
            prop_assert_eq!(index.len(), model.len());
            if !index.is_empty() {
                prop_assert!(2 * index.len() < index.capacity());
            }
        }

        for (k, v) in &model {
            prop_assert_eq!(index.get(k), Some(v));
        }
        let mut keys = index.keys();
        keys.sort_unstable();
        let mut expected: Vec<u64> = model.keys().copied().collect();
        expected.sort_unstable();
        prop_assert_eq!(keys, expected);
    }
}
