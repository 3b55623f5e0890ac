//! Helper algorithms over [`Graph`].

use super::Graph;
use rustc_hash::FxBuildHasher;
use std::collections::VecDeque;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;
type HashSet<T> = hashbrown::HashSet<T, FxBuildHasher>;

/// Weakly connected components.
///
/// Components are listed in the insertion order of their first node, and members are listed in
/// breadth-first discovery order from that node.
pub fn components<N, E, G>(g: &Graph<N, E, G>) -> Vec<Vec<String>>
where
    N: Default,
    E: Default,
    G: Default,
{
    let mut seen: HashSet<&str> = HashSet::default();
    let mut out: Vec<Vec<String>> = Vec::new();

    for start in g.nodes() {
        if !seen.insert(start) {
            continue;
        }
        let mut comp: Vec<String> = Vec::new();
        let mut queue: VecDeque<&str> = VecDeque::new();
        queue.push_back(start);
        while let Some(v) = queue.pop_front() {
            comp.push(v.to_string());
            for n in g.successors(v).into_iter().chain(g.predecessors(v)) {
                if seen.insert(n) {
                    queue.push_back(n);
                }
            }
        }
        out.push(comp);
    }

    out
}

/// Topological order (Kahn's algorithm, ties broken by insertion order).
///
/// Self-loops are ignored. Returns `None` when the graph has a cycle.
pub fn topsort<N, E, G>(g: &Graph<N, E, G>) -> Option<Vec<String>>
where
    N: Default,
    E: Default,
    G: Default,
{
    let mut indegree: HashMap<&str, usize> = g.nodes().map(|v| (v, 0)).collect();
    for e in g.edges() {
        if e.is_self_loop() {
            continue;
        }
        if let Some(d) = indegree.get_mut(e.w.as_str()) {
            *d += 1;
        }
    }

    let mut queue: VecDeque<&str> = g
        .nodes()
        .filter(|v| indegree.get(v).copied().unwrap_or(0) == 0)
        .collect();
    let mut out: Vec<String> = Vec::with_capacity(g.node_count());
    while let Some(v) = queue.pop_front() {
        out.push(v.to_string());
        for e in g.out_edges(v, None) {
            if e.is_self_loop() {
                continue;
            }
            let Some((w, d)) = indegree.get_key_value_mut(e.w.as_str()) else {
                continue;
            };
            *d = d.saturating_sub(1);
            if *d == 0 {
                queue.push_back(*w);
            }
        }
    }

    (out.len() == g.node_count()).then_some(out)
}

/// Strongly connected components that form cycles: SCCs with more than one node, plus nodes
/// with a self-loop.
///
/// Members of each cycle follow insertion order; cycles are ordered by their first member.
/// Tarjan's algorithm, driven by an explicit stack so deep graphs cannot overflow the thread.
pub fn find_cycles<N, E, G>(g: &Graph<N, E, G>) -> Vec<Vec<String>>
where
    N: Default,
    E: Default,
    G: Default,
{
    let mut next_index: usize = 0;
    let mut indices: HashMap<&str, usize> = HashMap::default();
    let mut lowlink: HashMap<&str, usize> = HashMap::default();
    let mut stack: Vec<&str> = Vec::new();
    let mut on_stack: HashSet<&str> = HashSet::default();
    let mut sccs: Vec<Vec<&str>> = Vec::new();
    let mut frames: Vec<(&str, Vec<&str>, usize)> = Vec::new();

    for root in g.nodes() {
        if indices.contains_key(root) {
            continue;
        }
        indices.insert(root, next_index);
        lowlink.insert(root, next_index);
        next_index += 1;
        stack.push(root);
        on_stack.insert(root);
        frames.push((root, g.successors(root), 0));

        while let Some((v, succ, next)) = frames.last_mut() {
            let v: &str = *v;
            if let Some(&w) = succ.get(*next) {
                *next += 1;
                if !indices.contains_key(w) {
                    indices.insert(w, next_index);
                    lowlink.insert(w, next_index);
                    next_index += 1;
                    stack.push(w);
                    on_stack.insert(w);
                    frames.push((w, g.successors(w), 0));
                } else if on_stack.contains(w) {
                    let low = lowlink[v].min(indices[w]);
                    lowlink.insert(v, low);
                }
                continue;
            }

            frames.pop();
            if lowlink[v] == indices[v] {
                let mut scc: Vec<&str> = Vec::new();
                while let Some(w) = stack.pop() {
                    on_stack.remove(w);
                    scc.push(w);
                    if w == v {
                        break;
                    }
                }
                sccs.push(scc);
            }
            if let Some((parent, _, _)) = frames.last() {
                let parent: &str = *parent;
                let low = lowlink[parent].min(lowlink[v]);
                lowlink.insert(parent, low);
            }
        }
    }

    let position = |v: &str| g.node_ix(v).unwrap_or(usize::MAX);
    let mut cycles: Vec<Vec<String>> = Vec::new();
    for mut scc in sccs {
        if scc.len() == 1 && g.out_edges(scc[0], Some(scc[0])).is_empty() {
            continue;
        }
        scc.sort_by_key(|v| position(v));
        cycles.push(scc.into_iter().map(str::to_string).collect());
    }
    cycles.sort_by_key(|c| c.first().map(|v| position(v)));
    cycles
}
