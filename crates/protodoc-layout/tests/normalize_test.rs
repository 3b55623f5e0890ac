use protodoc_layout::graphlib::{Graph, GraphOptions};
use protodoc_layout::normalize;
use protodoc_layout::{EdgeLabel, GraphLabel, NodeLabel, Point};

fn ranked(rank: i32) -> NodeLabel {
    NodeLabel {
        width: 10.0,
        height: 10.0,
        rank: Some(rank),
        ..Default::default()
    }
}

fn new_graph() -> Graph<NodeLabel, EdgeLabel, GraphLabel> {
    let mut g: Graph<NodeLabel, EdgeLabel, GraphLabel> =
        Graph::new(GraphOptions { multigraph: true });
    g.set_graph(GraphLabel::default());
    g
}

#[test]
fn run_leaves_short_edges_alone() {
    let mut g = new_graph();
    g.set_node("a", ranked(0));
    g.set_node("b", ranked(1));
    g.set_edge("a", "b");

    normalize::run(&mut g);

    assert_eq!(g.node_count(), 2);
    assert!(g.has_edge("a", "b", None));
    assert!(g.graph().dummy_chains.is_empty());
}

#[test]
fn run_splits_long_edges_into_dummy_chains() {
    let mut g = new_graph();
    g.set_node("a", ranked(0));
    g.set_node("b", ranked(3));
    g.set_edge_with_label(
        "a",
        "b",
        EdgeLabel {
            weight: 2.0,
            ..Default::default()
        },
    );

    normalize::run(&mut g);

    assert!(!g.has_edge("a", "b", None));
    assert_eq!(g.node_count(), 4);
    assert_eq!(g.edge_count(), 3);
    assert_eq!(g.graph().dummy_chains.len(), 1);

    let mut v = g.graph().dummy_chains[0].clone();
    for expected_rank in 1..3 {
        let node = g.node(&v).cloned().unwrap_or_default();
        assert!(node.dummy);
        assert_eq!(node.rank, Some(expected_rank));
        assert_eq!((node.width, node.height), (0.0, 0.0));
        v = g.successors(&v)[0].to_string();
    }
    assert_eq!(v, "b");
    assert!(g.edges().all(|e| g.edge_by_key(e).is_some_and(|l| l.weight == 2.0)));
}

#[test]
fn undo_restores_the_edge_with_bend_points() {
    let mut g = new_graph();
    g.set_node("a", ranked(0));
    g.set_node("b", ranked(3));
    g.set_edge_named(
        "a",
        "b",
        Some("ref"),
        Some(EdgeLabel {
            minlen: 1,
            ..Default::default()
        }),
    );

    normalize::run(&mut g);
    let mut v = g.graph().dummy_chains[0].clone();
    let mut y = 10.0;
    while let Some(node) = g.node_mut(&v).filter(|n| n.dummy) {
        node.x = Some(5.0);
        node.y = Some(y);
        y += 10.0;
        v = g.successors(&v)[0].to_string();
    }

    normalize::undo(&mut g);

    assert_eq!(g.node_count(), 2);
    assert_eq!(g.edge_count(), 1);
    assert!(g.graph().dummy_chains.is_empty());
    let points = g.edge("a", "b", Some("ref")).map(|l| l.points.clone()).unwrap_or_default();
    assert_eq!(
        points,
        vec![Point { x: 5.0, y: 10.0 }, Point { x: 5.0, y: 20.0 }]
    );
}

#[test]
fn undo_restores_every_chain_and_drops_every_dummy() {
    let mut g = new_graph();
    for (v, rank) in [("a", 0), ("b", 1), ("c", 4), ("d", 6)] {
        g.set_node(v, ranked(rank));
    }
    g.set_edge("a", "b");
    g.set_edge("a", "c");
    g.set_edge("b", "d");
    g.set_edge("a", "d");

    normalize::run(&mut g);
    assert_eq!(g.graph().dummy_chains.len(), 3);
    assert_eq!(g.node_count(), 4 + 3 + 4 + 5);
    let mut y = 0.0;
    g.for_each_node_mut(|_, n| {
        if n.dummy {
            y += 1.0;
            n.x = Some(0.0);
            n.y = Some(y);
        }
    });

    normalize::undo(&mut g);

    assert_eq!(g.node_ids(), vec!["a", "b", "c", "d"]);
    assert!(g.nodes().all(|v| g.node(v).is_some_and(|n| !n.dummy)));
    let edges: Vec<(&str, &str, usize)> = g
        .edges()
        .map(|e| {
            let bends = g.edge_by_key(e).map(|l| l.points.len()).unwrap_or(0);
            (e.v.as_str(), e.w.as_str(), bends)
        })
        .collect();
    assert_eq!(edges, vec![("a", "b", 0), ("a", "c", 3), ("b", "d", 4), ("a", "d", 5)]);
    for e in g.edge_keys() {
        let points = g.edge_by_key(&e).map(|l| l.points.clone()).unwrap_or_default();
        assert!(points.windows(2).all(|p| p[0].y < p[1].y), "{e:?} bends out of order");
    }
}
