//! Greedy feedback arc set selection (Eades, Lin and Smyth).
//!
//! Sinks and sources are peeled off first; when none remain, the node with the largest
//! `out - in` weight is removed and its still-live incoming edges join the FAS. Queues are FIFO
//! over insertion order so the result is deterministic.

use crate::graphlib::{EdgeKey, Graph};
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use std::collections::VecDeque;
use std::collections::hash_map::Entry;

pub fn greedy_fas<N, E, G>(g: &Graph<N, E, G>) -> Vec<EdgeKey>
where
    N: Default,
    E: Default,
    G: Default,
{
    greedy_fas_with_weight(g, |_| 1)
}

pub fn greedy_fas_with_weight<N, E, G>(
    g: &Graph<N, E, G>,
    weight_fn: impl Fn(&E) -> i64,
) -> Vec<EdgeKey>
where
    N: Default,
    E: Default,
    G: Default,
{
    if g.node_count() <= 1 {
        return Vec::new();
    }

    // Collapse parallel edges into one weighted `(v, w)` pair, keeping first-seen order.
    let node_ids = g.node_ids();
    let mut in_w: HashMap<String, i64> = node_ids.iter().map(|v| (v.clone(), 0)).collect();
    let mut out_w: HashMap<String, i64> = node_ids.iter().map(|v| (v.clone(), 0)).collect();
    let mut pair_w: HashMap<(String, String), i64> = HashMap::default();
    let mut pair_order: Vec<(String, String)> = Vec::new();
    let mut max_in: i64 = 0;
    let mut max_out: i64 = 0;

    for e in g.edges() {
        if e.is_self_loop() {
            continue;
        }
        let w = g.edge_by_key(e).map(&weight_fn).unwrap_or(1);
        let pair = (e.v.clone(), e.w.clone());
        match pair_w.entry(pair.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(w);
                pair_order.push(pair);
            }
            Entry::Occupied(mut slot) => *slot.get_mut() += w,
        }
        let o = out_w.entry(e.v.clone()).or_insert(0);
        *o += w;
        max_out = max_out.max(*o);
        let i = in_w.entry(e.w.clone()).or_insert(0);
        *i += w;
        max_in = max_in.max(*i);
    }

    let mut in_edges: HashMap<String, Vec<(String, i64)>> = HashMap::default();
    let mut out_edges: HashMap<String, Vec<(String, i64)>> = HashMap::default();
    for (v, w) in &pair_order {
        let weight = pair_w[&(v.clone(), w.clone())];
        out_edges
            .entry(v.clone())
            .or_default()
            .push((w.clone(), weight));
        in_edges
            .entry(w.clone())
            .or_default()
            .push((v.clone(), weight));
    }

    let mut state = Buckets {
        buckets: (0..(max_out + max_in + 3).max(3) as usize)
            .map(|_| VecDeque::new())
            .collect(),
        zero_idx: max_in + 1,
        bucket_of: HashMap::default(),
        alive: node_ids.iter().cloned().collect(),
        in_w,
        out_w,
    };
    for v in &node_ids {
        state.assign(v);
    }

    let mut results: Vec<(String, String)> = Vec::new();
    while !state.alive.is_empty() {
        while let Some(v) = state.pop(0) {
            state.remove(&v, &in_edges, &out_edges);
        }
        let last = state.buckets.len() - 1;
        while let Some(v) = state.pop(last) {
            state.remove(&v, &in_edges, &out_edges);
        }
        if state.alive.is_empty() {
            break;
        }

        let picked = (1..last).rev().find_map(|i| state.pop(i));
        let Some(v) = picked else {
            // Unreachable with consistent bucket bookkeeping; drop a node so the loop terminates.
            let Some(v) = node_ids.iter().find(|id| state.alive.contains(*id)).cloned() else {
                break;
            };
            state.remove(&v, &in_edges, &out_edges);
            continue;
        };
        if let Some(ins) = in_edges.get(&v) {
            for (u, _) in ins {
                if state.alive.contains(u) {
                    results.push((u.clone(), v.clone()));
                }
            }
        }
        state.remove(&v, &in_edges, &out_edges);
    }

    results
        .into_iter()
        .flat_map(|(v, w)| g.out_edges(&v, Some(&w)))
        .collect()
}

struct Buckets {
    buckets: Vec<VecDeque<String>>,
    zero_idx: i64,
    bucket_of: HashMap<String, usize>,
    alive: HashSet<String>,
    in_w: HashMap<String, i64>,
    out_w: HashMap<String, i64>,
}

impl Buckets {
    fn pop(&mut self, idx: usize) -> Option<String> {
        while let Some(v) = self.buckets[idx].pop_back() {
            if self.alive.contains(&v) && self.bucket_of.get(&v) == Some(&idx) {
                return Some(v);
            }
        }
        None
    }

    fn assign(&mut self, v: &str) {
        if let Some(prev) = self.bucket_of.get(v).copied() {
            if let Some(pos) = self.buckets[prev].iter().position(|x| x == v) {
                self.buckets[prev].remove(pos);
            }
        }

        let in_v = self.in_w.get(v).copied().unwrap_or(0);
        let out_v = self.out_w.get(v).copied().unwrap_or(0);
        let last = self.buckets.len() - 1;
        let idx = if out_v == 0 {
            0
        } else if in_v == 0 {
            last
        } else {
            (out_v - in_v + self.zero_idx).clamp(0, last as i64) as usize
        };

        self.buckets[idx].push_front(v.to_string());
        self.bucket_of.insert(v.to_string(), idx);
    }

    fn remove(
        &mut self,
        v: &str,
        in_edges: &HashMap<String, Vec<(String, i64)>>,
        out_edges: &HashMap<String, Vec<(String, i64)>>,
    ) {
        if !self.alive.remove(v) {
            return;
        }
        self.bucket_of.remove(v);

        for (u, weight) in in_edges.get(v).into_iter().flatten() {
            if !self.alive.contains(u) {
                continue;
            }
            if let Some(o) = self.out_w.get_mut(u) {
                *o -= *weight;
            }
            self.assign(u);
        }
        for (w, weight) in out_edges.get(v).into_iter().flatten() {
            if !self.alive.contains(w) {
                continue;
            }
            if let Some(i) = self.in_w.get_mut(w) {
                *i -= *weight;
            }
            self.assign(w);
        }
    }
}
