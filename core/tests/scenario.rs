use graph_index_core::{
    breadth_first_search, depth_first_search, is_connected, Graph, GraphError,
};

fn abc() -> Graph<&'static str, u32> {
    let mut g = Graph::new();
    assert_eq!(g.add_vertex("A"), 1);
    assert_eq!(g.add_vertex("B"), 2);
    assert_eq!(g.add_vertex("C"), 3);
    assert_eq!(g.add_edge(1, 2, 5).unwrap(), 1);
    assert_eq!(g.add_edge(2, 3, 7).unwrap(), 2);
    g
}

#[test]
fn test_city_scenario() {
    let mut g = abc();
    assert_eq!(g.degree(2).unwrap(), 2);
    assert_eq!(breadth_first_search(&g, 1).unwrap(), vec![1, 2, 3]);

    g.delete_vertex(2).unwrap();

    assert_eq!(g.vertex(2).unwrap_err(), GraphError::VertexNotFound(2));
    assert_eq!(g.edge(1).unwrap_err(), GraphError::EdgeNotFound(1));
    assert_eq!(g.edge(2).unwrap_err(), GraphError::EdgeNotFound(2));
    assert_eq!(g.degree(1).unwrap(), 0);
    assert_eq!(g.degree(3).unwrap(), 0);
    assert_eq!(g.vertex(3).unwrap().data, "C");
    g.check_consistency().unwrap();
}

#[test]
fn test_probe_is_symmetric() {
    let g = abc();
    for a in 1..=3 {
        for b in 1..=3 {
            assert_eq!(g.probe_edge(a, b).unwrap(), g.probe_edge(b, a).unwrap());
        }
    }
    assert_eq!(g.probe_edge(3, 2).unwrap(), Some(2));
    assert_eq!(g.probe_edge(1, 3).unwrap(), None);
}

#[test]
fn test_edge_changes_degree_by_one() {
    let mut g = abc();
    let (d1, d3) = (g.degree(1).unwrap(), g.degree(3).unwrap());
    let e = g.add_edge(1, 3, 9).unwrap();
    assert_eq!(g.degree(1).unwrap(), d1 + 1);
    assert_eq!(g.degree(3).unwrap(), d3 + 1);
    g.delete_edge(e).unwrap();
    assert_eq!(g.degree(1).unwrap(), d1);
    assert_eq!(g.degree(3).unwrap(), d3);
}

#[test]
fn test_ids_strictly_increase_across_deletions() {
    let mut g: Graph<(), ()> = Graph::new();
    let mut last_vertex = 0;
    let mut last_edge = 0;
    for round in 0..20u64 {
        let a = g.add_vertex(());
        let b = g.add_vertex(());
        assert!(a > last_vertex && b > a);
        last_vertex = b;

        let e = g.add_edge(a, b, ()).unwrap();
        assert!(e > last_edge);
        last_edge = e;

        if round % 2 == 0 {
            g.delete_vertex(a).unwrap();
        } else {
            g.delete_edge(e).unwrap();
        }
    }
    g.check_consistency().unwrap();
}

#[test]
fn test_relocated_elements_stay_reachable() {
    let mut g: Graph<u64, u64> = Graph::new();
    let ids: Vec<_> = (0..50).map(|i| g.add_vertex(i * 10)).collect();
    let mut edges = Vec::new();
    for w in ids.windows(2) {
        edges.push(g.add_edge(w[0], w[1], w[0] * 100).unwrap());
    }

    // Deleting from the front forces every deletion to relocate the tail.
    for &id in ids.iter().take(10) {
        g.delete_vertex(id).unwrap();
    }
    for &id in &ids[10..] {
        assert_eq!(g.vertex(id).unwrap().data, (id - 1) * 10);
    }
    for &e in &edges[10..] {
        let edge = g.edge(e).unwrap();
        assert_eq!(edge.data, edge.src() * 100);
    }
    g.check_consistency().unwrap();
}

#[test]
fn test_traversal_determinism() {
    let mut g: Graph<(), ()> = Graph::new();
    for _ in 0..30 {
        g.add_vertex(());
    }
    for i in 1..=30u64 {
        g.add_edge(i, (i * 7) % 30 + 1, ()).unwrap();
        g.add_edge(i, (i * 11) % 30 + 1, ()).unwrap();
    }

    let bfs = breadth_first_search(&g, 1).unwrap();
    let dfs = depth_first_search(&g, 1).unwrap();
    for _ in 0..3 {
        assert_eq!(breadth_first_search(&g, 1).unwrap(), bfs);
        assert_eq!(depth_first_search(&g, 1).unwrap(), dfs);
    }

    let mut bfs_sorted = bfs.clone();
    let mut dfs_sorted = dfs.clone();
    bfs_sorted.sort_unstable();
    dfs_sorted.sort_unstable();
    assert_eq!(bfs_sorted, dfs_sorted);

    for v in 1..=30 {
        assert_eq!(is_connected(&g, 1, v).unwrap(), bfs.contains(&v));
    }
}
