use protodoc_layout::graphlib::{Graph, GraphOptions};
use protodoc_layout::util::Rect;
use protodoc_layout::{
    Acyclicer, EdgeLabel, GraphLabel, LayoutResult, NodeLabel, RankDir, layout, layout_result,
};

const EPS: f64 = 1e-9;

fn new_graph(rankdir: RankDir) -> Graph<NodeLabel, EdgeLabel, GraphLabel> {
    let mut g: Graph<NodeLabel, EdgeLabel, GraphLabel> = Graph::new(GraphOptions::default());
    g.set_graph(GraphLabel {
        rankdir,
        ..Default::default()
    });
    g
}

fn graph_of(nodes: &[&str], edges: &[(&str, &str)]) -> Graph<NodeLabel, EdgeLabel, GraphLabel> {
    let mut g = new_graph(RankDir::TB);
    for v in nodes {
        g.set_node(*v, NodeLabel::new(100.0, 40.0));
    }
    for (v, w) in edges {
        g.set_edge(*v, *w);
    }
    g
}

fn assert_no_overlap(result: &LayoutResult) {
    let rects: Vec<(&str, Rect)> = result
        .iter()
        .map(|(id, n)| (id, Rect::from_center(n.x, n.y, n.width, n.height)))
        .collect();
    for (i, (a, ra)) in rects.iter().enumerate() {
        for (b, rb) in &rects[i + 1..] {
            assert!(!ra.intersects(rb), "{a} overlaps {b}");
        }
    }
}

/// A schema-like graph: a spine plus forward references of varying length.
fn dag(node_count: usize) -> Graph<NodeLabel, EdgeLabel, GraphLabel> {
    let mut g = new_graph(RankDir::TB);
    for i in 0..node_count {
        g.set_node(format!("M{i}"), NodeLabel::new(60.0 + (i % 4) as f64 * 25.0, 30.0));
    }
    for i in 0..node_count {
        for step in [1, 3, 7] {
            if i + step < node_count && (i + step) % 5 != 0 {
                g.set_edge(format!("M{i}"), format!("M{}", i + step));
            }
        }
    }
    g
}

#[test]
fn layout_of_an_empty_graph_is_empty() {
    let g = new_graph(RankDir::TB);
    assert!(layout_result(&g).is_empty());
}

#[test]
fn unconnected_records_share_one_layer_in_input_order() {
    let g = graph_of(&["A", "B", "C"], &[]);

    let result = layout_result(&g);

    assert_eq!(result.len(), 3);
    let ids: Vec<&str> = result.iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec!["A", "B", "C"]);
    for (i, (_, n)) in result.iter().enumerate() {
        assert_eq!(n.rank, 0);
        assert_eq!(n.order, i);
        assert_eq!(n.y, 20.0);
    }
    let xs: Vec<f64> = result.iter().map(|(_, n)| n.x).collect();
    assert_eq!(xs, vec![50.0, 200.0, 350.0]);
    assert_no_overlap(&result);
}

#[test]
fn a_chain_gets_one_layer_per_record() {
    let g = graph_of(&["A", "B", "C"], &[("A", "B"), ("B", "C")]);

    let result = layout_result(&g);

    let ranks: Vec<i32> = ["A", "B", "C"]
        .iter()
        .filter_map(|v| result.get(v))
        .map(|n| n.rank)
        .collect();
    assert_eq!(ranks, vec![0, 1, 2]);
    let ys: Vec<f64> = ["A", "B", "C"]
        .iter()
        .filter_map(|v| result.get(v))
        .map(|n| n.y)
        .collect();
    assert_eq!(ys, vec![20.0, 110.0, 200.0]);
    for v in ["A", "B", "C"] {
        assert_eq!(result.get(v).map(|n| n.x), Some(50.0));
    }
}

#[test]
fn a_two_record_cycle_is_layered_and_keeps_both_edges() {
    let mut g = graph_of(&["A", "B"], &[("A", "B"), ("B", "A")]);

    layout(&mut g);

    let a = g.node("A").cloned().unwrap_or_default();
    let b = g.node("B").cloned().unwrap_or_default();
    assert_ne!(a.rank, b.rank);
    assert_ne!(a.y, b.y);
    assert_eq!(g.edge_count(), 2);
    for (v, w) in [("A", "B"), ("B", "A")] {
        let label = g.edge(v, w, None).cloned();
        assert!(label.is_some(), "edge {v} -> {w} is missing");
        assert!(!label.is_some_and(|l| l.reversed));
    }
}

#[test]
fn a_self_reference_does_not_disturb_other_records() {
    let with_loop = graph_of(&["B", "C", "A"], &[("B", "C"), ("A", "A")]);
    let without_loop = graph_of(&["B", "C", "A"], &[("B", "C")]);

    let mut g = with_loop.clone();
    layout(&mut g);
    let expected = layout_result(&without_loop);

    assert_eq!(LayoutResult::from_graph(&g), expected);
    assert!(g.has_edge("A", "A", None));
    assert_eq!(g.node("A").and_then(|n| n.rank), Some(0));
}

#[test]
fn a_fan_in_places_the_shared_record_below_its_referrers() {
    let mut nodes: Vec<String> = (0..9).map(|i| format!("R{i}")).collect();
    nodes.push("Hub".to_string());
    let node_refs: Vec<&str> = nodes.iter().map(String::as_str).collect();
    let edges: Vec<(&str, &str)> = node_refs[..9].iter().map(|v| (*v, "Hub")).collect();
    let g = graph_of(&node_refs, &edges);

    let result = layout_result(&g);
    let again = layout_result(&g);
    assert_eq!(result, again);

    let hub = result.get("Hub").copied().unwrap_or_else(|| panic!("hub not placed"));
    assert_eq!(hub.rank, 1);
    for (i, v) in node_refs[..9].iter().enumerate() {
        let n = result.get(v).copied().unwrap_or_else(|| panic!("{v} not placed"));
        assert_eq!(n.rank, 0);
        assert_eq!(n.order, i);
        assert!(hub.y > n.y);
    }
    let middle = result.get("R4").map(|n| n.x).unwrap_or(f64::NAN);
    assert!((hub.x - middle).abs() < EPS);
    assert_no_overlap(&result);
}

#[test]
fn long_edges_get_bend_points_on_intermediate_layers() {
    let mut g = graph_of(&["A", "B", "C"], &[("A", "B"), ("B", "C"), ("A", "C")]);

    layout(&mut g);

    let points = g.edge("A", "C", None).map(|l| l.points.clone()).unwrap_or_default();
    assert_eq!(points.len(), 1);
    assert_eq!(Some(points[0].y), g.node("B").and_then(|n| n.y));
    assert!(g.edge("A", "B", None).is_some_and(|l| l.points.is_empty()));
}

#[test]
fn reversed_long_edges_report_points_from_source_to_target() {
    let mut g = graph_of(&["A", "B", "C", "D"], &[("A", "B"), ("B", "C"), ("C", "D"), ("D", "A")]);

    layout(&mut g);

    let points = g.edge("D", "A", None).map(|l| l.points.clone()).unwrap_or_default();
    assert_eq!(points.len(), 2);
    assert!(points[0].y > points[1].y);
}

#[test]
fn layout_is_total_non_overlapping_and_forward_pointing_on_dags() {
    let g = dag(40);

    let result = layout_result(&g);

    assert_eq!(result.len(), g.node_count());
    assert_no_overlap(&result);
    for e in g.edges() {
        let v = result.get(&e.v).map(|n| n.y).unwrap_or(f64::NAN);
        let w = result.get(&e.w).map(|n| n.y).unwrap_or(f64::NAN);
        assert!(w > v, "{} -> {} points backwards", e.v, e.w);
    }
}

#[test]
fn layout_is_deterministic() {
    let mut g = dag(30);
    g.set_edge("M20", "M2");
    g.set_edge("M9", "M9");

    assert_eq!(layout_result(&g), layout_result(&g));
}

#[test]
fn greedy_cycle_breaking_places_every_node() {
    let mut g = graph_of(&["A", "B", "C", "D"], &[("A", "B"), ("B", "C"), ("C", "A"), ("C", "D")]);
    g.graph_mut().acyclicer = Acyclicer::Greedy;

    let result = layout_result(&g);

    assert_eq!(result.len(), 4);
    assert_no_overlap(&result);
}

#[test]
fn disconnected_components_are_packed_without_overlap() {
    let g = graph_of(
        &["A", "B", "C", "D", "E"],
        &[("A", "B"), ("C", "D"), ("C", "E")],
    );

    let result = layout_result(&g);

    assert_no_overlap(&result);
    let a = result.get("A").copied().unwrap_or_else(|| panic!("A not placed"));
    let c = result.get("C").copied().unwrap_or_else(|| panic!("C not placed"));
    assert_eq!(a.y, c.y);
    assert!(c.left() >= a.x + a.width / 2.0 + 50.0 - EPS);
}

#[test]
fn degenerate_sizes_fall_back_to_the_minimum() {
    let mut g = new_graph(RankDir::TB);
    g.set_node("A", NodeLabel::new(f64::NAN, -3.0));
    g.set_node("B", NodeLabel::new(0.0, 0.0));
    g.set_edge("A", "B");

    let result = layout_result(&g);

    for v in ["A", "B"] {
        let n = result.get(v).copied().unwrap_or_else(|| panic!("{v} not placed"));
        assert_eq!((n.width, n.height), (1.0, 1.0));
        assert!(n.x.is_finite() && n.y.is_finite());
    }
}

#[test]
fn layout_leaves_the_input_of_layout_result_untouched() {
    let g = graph_of(&["A", "B"], &[("A", "B")]);
    let _ = layout_result(&g);
    assert_eq!(g.node("A").and_then(|n| n.x), None);
}

#[test]
fn deep_graphs_with_long_references_lay_out_quickly() {
    let n = 200;
    let mut g = new_graph(RankDir::TB);
    for i in 0..n {
        g.set_node(format!("M{i}"), NodeLabel::new(200.0, 20.0));
    }
    for i in 1..n {
        g.set_edge(format!("M{}", i - 1), format!("M{i}"));
        if i >= 40 && i % 5 == 0 {
            g.set_edge(format!("M{i}"), format!("M{}", i - 40));
        }
        if i % 7 == 0 && i + 25 < n {
            g.set_edge(format!("M{i}"), format!("M{}", i + 25));
        }
    }

    let started = std::time::Instant::now();
    let mut laid_out = g.clone();
    layout(&mut laid_out);
    let elapsed = started.elapsed();

    assert!(elapsed.as_secs() < 60, "layout took {elapsed:?}");
    assert_eq!(laid_out.node_count(), n);
    assert_eq!(laid_out.edge_count(), g.edge_count());
    let rank = |v: &str| laid_out.node(v).and_then(|l| l.rank).unwrap_or(-1);
    let mut bends = 0;
    for e in laid_out.edges() {
        let points = laid_out.edge_by_key(e).map(|l| l.points.len()).unwrap_or(0);
        let span = (rank(&e.w) - rank(&e.v)).unsigned_abs() as usize;
        assert_eq!(points, span - 1, "{e:?}");
        bends += points;
    }
    assert!(bends > 500, "only {bends} bend points");
    assert_no_overlap(&LayoutResult::from_graph(&laid_out));
}

#[test]
fn very_long_chains_do_not_exhaust_the_stack() {
    let n = 10_000;
    let mut g = new_graph(RankDir::TB);
    for i in 0..n {
        g.set_node(format!("M{i}"), NodeLabel::new(10.0, 10.0));
    }
    for i in 1..n {
        g.set_edge(format!("M{}", i - 1), format!("M{i}"));
    }

    let result = layout_result(&g);

    assert_eq!(result.len(), n);
    let last = result.get("M9999").map(|p| p.rank);
    assert_eq!(last, Some(9999));
}

fn chain_in(rankdir: RankDir) -> LayoutResult {
    let mut g = new_graph(rankdir);
    g.set_node("A", NodeLabel::new(100.0, 40.0));
    g.set_node("B", NodeLabel::new(100.0, 40.0));
    g.set_edge("A", "B");
    layout_result(&g)
}

fn anchor(result: &LayoutResult, v: &str) -> (f64, f64) {
    result.get(v).map(|n| (n.x, n.y)).unwrap_or((f64::NAN, f64::NAN))
}

#[test]
fn bottom_to_top_stacks_layers_upwards() {
    let result = chain_in(RankDir::BT);
    assert_eq!(anchor(&result, "A"), (50.0, 110.0));
    assert_eq!(anchor(&result, "B"), (50.0, 20.0));
}

#[test]
fn left_to_right_stacks_layers_along_x_and_keeps_node_sizes() {
    let result = chain_in(RankDir::LR);
    assert_eq!(anchor(&result, "A"), (50.0, 20.0));
    assert_eq!(anchor(&result, "B"), (200.0, 20.0));
    assert_eq!(result.get("A").map(|n| (n.width, n.height)), Some((100.0, 40.0)));
}

#[test]
fn right_to_left_mirrors_left_to_right() {
    let result = chain_in(RankDir::RL);
    assert_eq!(anchor(&result, "A"), (200.0, 20.0));
    assert_eq!(anchor(&result, "B"), (50.0, 20.0));
}

#[test]
fn rank_dir_parses_short_and_long_names() {
    assert_eq!("tb".parse::<RankDir>(), Ok(RankDir::TB));
    assert_eq!("top-to-bottom".parse::<RankDir>(), Ok(RankDir::TB));
    assert_eq!("Bottom-To-Top".parse::<RankDir>(), Ok(RankDir::BT));
    assert_eq!("LR".parse::<RankDir>(), Ok(RankDir::LR));
    assert_eq!("right-to-left".parse::<RankDir>(), Ok(RankDir::RL));
    assert!("diagonal".parse::<RankDir>().is_err());
}
