//! Adjacency cache used by [`Graph`](super::Graph).
//!
//! Layout phases query successors / predecessors in tight loops; scanning every edge per query
//! is O(E). The cache is rebuilt lazily after any mutation.

#[derive(Debug, Clone)]
pub(in crate::graph) struct AdjCache {
    pub(in crate::graph) generation: u64,
    pub(in crate::graph) out_offsets: Vec<usize>,
    pub(in crate::graph) out_edges: Vec<usize>,
    pub(in crate::graph) in_offsets: Vec<usize>,
    pub(in crate::graph) in_edges: Vec<usize>,
}

impl AdjCache {
    /// Builds CSR-style adjacency from `(tail_ix, head_ix)` pairs listed in edge order.
    pub(in crate::graph) fn build(
        generation: u64,
        node_count: usize,
        endpoints: impl Iterator<Item = (usize, usize)> + Clone,
    ) -> Self {
        let mut out_offsets = vec![0usize; node_count + 1];
        let mut in_offsets = vec![0usize; node_count + 1];
        for (v_ix, w_ix) in endpoints.clone() {
            out_offsets[v_ix + 1] += 1;
            in_offsets[w_ix + 1] += 1;
        }
        for i in 0..node_count {
            out_offsets[i + 1] += out_offsets[i];
            in_offsets[i + 1] += in_offsets[i];
        }

        let mut out_cursor = out_offsets.clone();
        let mut in_cursor = in_offsets.clone();
        let mut out_edges = vec![0usize; out_offsets[node_count]];
        let mut in_edges = vec![0usize; in_offsets[node_count]];
        for (edge_ix, (v_ix, w_ix)) in endpoints.enumerate() {
            out_edges[out_cursor[v_ix]] = edge_ix;
            out_cursor[v_ix] += 1;
            in_edges[in_cursor[w_ix]] = edge_ix;
            in_cursor[w_ix] += 1;
        }

        Self {
            generation,
            out_offsets,
            out_edges,
            in_offsets,
            in_edges,
        }
    }

    pub(in crate::graph) fn out_edges(&self, v_ix: usize) -> &[usize] {
        &self.out_edges[self.out_offsets[v_ix]..self.out_offsets[v_ix + 1]]
    }

    pub(in crate::graph) fn in_edges(&self, v_ix: usize) -> &[usize] {
        &self.in_edges[self.in_offsets[v_ix]..self.in_offsets[v_ix + 1]]
    }
}
