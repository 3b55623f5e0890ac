//! The core `Graph` container plus helper algorithms re-exported as `protodoc_graphlib::alg`.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use std::cell::RefCell;

mod adj_cache;
pub mod alg;
mod edge_key;

use adj_cache::AdjCache;
use edge_key::EdgeKeyView;
pub use edge_key::EdgeKey;

type NodeMap<N> = IndexMap<String, N, FxBuildHasher>;
type EdgeMap<E> = IndexMap<EdgeKey, E, FxBuildHasher>;

#[derive(Debug, Clone, Copy, Default)]
pub struct GraphOptions {
    /// Allow several edges between the same `(v, w)` pair, told apart by `name`.
    pub multigraph: bool,
}

/// A directed graph with labelled nodes, edges and a graph-level label.
#[derive(Debug, Clone)]
pub struct Graph<N, E, G = ()> {
    options: GraphOptions,
    graph_label: G,
    nodes: NodeMap<N>,
    edges: EdgeMap<E>,

    adj_generation: u64,
    adj_cache: RefCell<Option<AdjCache>>,
}

impl<N, E, G> Graph<N, E, G>
where
    N: Default,
    E: Default,
    G: Default,
{
    pub fn new(options: GraphOptions) -> Self {
        Self {
            options,
            graph_label: G::default(),
            nodes: NodeMap::default(),
            edges: EdgeMap::default(),
            adj_generation: 0,
            adj_cache: RefCell::new(None),
        }
    }

    pub fn options(&self) -> GraphOptions {
        self.options
    }

    pub fn is_multigraph(&self) -> bool {
        self.options.multigraph
    }

    pub fn set_graph(&mut self, label: G) -> &mut Self {
        self.graph_label = label;
        self
    }

    pub fn graph(&self) -> &G {
        &self.graph_label
    }

    pub fn graph_mut(&mut self) -> &mut G {
        &mut self.graph_label
    }

    fn invalidate_adj(&mut self) {
        self.adj_generation = self.adj_generation.wrapping_add(1);
        *self.adj_cache.get_mut() = None;
    }

    fn with_adj<R>(&self, f: impl FnOnce(&AdjCache) -> R) -> R {
        let generation = self.adj_generation;
        let mut cache = self.adj_cache.borrow_mut();
        let stale = cache
            .as_ref()
            .is_none_or(|c| c.generation != generation);
        if stale {
            let endpoints = self.edges.keys().map(|k| {
                let v_ix = self.nodes.get_index_of(k.v.as_str()).unwrap_or_default();
                let w_ix = self.nodes.get_index_of(k.w.as_str()).unwrap_or_default();
                (v_ix, w_ix)
            });
            *cache = Some(AdjCache::build(generation, self.nodes.len(), endpoints));
        }
        match cache.as_ref() {
            Some(c) => f(c),
            None => unreachable!("adjacency cache is populated above"),
        }
    }

    fn view<'a>(&self, v: &'a str, w: &'a str, name: Option<&'a str>) -> EdgeKeyView<'a> {
        let name = if self.options.multigraph { name } else { None };
        EdgeKeyView { v, w, name }
    }

    fn edge_key_at(&self, ix: usize) -> &EdgeKey {
        match self.edges.get_index(ix) {
            Some((k, _)) => k,
            None => unreachable!("adjacency cache only holds live edge indices"),
        }
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Inserts or replaces the label of `id`. New nodes are appended to the iteration order.
    pub fn set_node(&mut self, id: impl Into<String>, label: N) -> &mut Self {
        let id = id.into();
        if let Some(slot) = self.nodes.get_mut(id.as_str()) {
            *slot = label;
            return self;
        }
        self.invalidate_adj();
        self.nodes.insert(id, label);
        self
    }

    pub fn ensure_node(&mut self, id: impl Into<String>) -> &mut Self {
        let id = id.into();
        if self.nodes.contains_key(id.as_str()) {
            return self;
        }
        self.set_node(id, N::default())
    }

    pub fn node(&self, id: &str) -> Option<&N> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut N> {
        self.nodes.get_mut(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    pub fn node_ids(&self) -> Vec<String> {
        self.nodes.keys().cloned().collect()
    }

    /// Position of `id` in insertion order.
    pub fn node_ix(&self, id: &str) -> Option<usize> {
        self.nodes.get_index_of(id)
    }

    /// Removes `id` and every edge incident to it, keeping the order of what remains.
    pub fn remove_node(&mut self, id: &str) -> bool {
        if self.nodes.shift_remove(id).is_none() {
            return false;
        }
        self.invalidate_adj();
        self.edges.retain(|k, _| k.v != id && k.w != id);
        true
    }

    /// Keeps only the nodes for which `keep` returns true, dropping every edge incident to a
    /// removed node. One pass over nodes and edges regardless of how many nodes go away.
    ///
    /// Returns the number of removed nodes.
    pub fn retain_nodes<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&str, &N) -> bool,
    {
        let before = self.nodes.len();
        self.nodes.retain(|id, label| keep(id, label));
        let removed = before - self.nodes.len();
        if removed == 0 {
            return 0;
        }
        let nodes = &self.nodes;
        self.edges
            .retain(|k, _| nodes.contains_key(k.v.as_str()) && nodes.contains_key(k.w.as_str()));
        self.invalidate_adj();
        removed
    }

    pub fn for_each_node_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&str, &mut N),
    {
        for (id, label) in &mut self.nodes {
            f(id, label);
        }
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> impl Iterator<Item = &EdgeKey> {
        self.edges.keys()
    }

    pub fn edge_keys(&self) -> Vec<EdgeKey> {
        self.edges.keys().cloned().collect()
    }

    pub fn for_each_edge_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&EdgeKey, &mut E),
    {
        for (key, label) in &mut self.edges {
            f(key, label);
        }
    }

    pub fn set_edge(&mut self, v: impl Into<String>, w: impl Into<String>) -> &mut Self {
        self.set_edge_named(v, w, None::<String>, None)
    }

    pub fn set_edge_with_label(
        &mut self,
        v: impl Into<String>,
        w: impl Into<String>,
        label: E,
    ) -> &mut Self {
        self.set_edge_named(v, w, None::<String>, Some(label))
    }

    /// Inserts an edge, creating missing endpoints with default labels.
    ///
    /// An existing edge keeps its label unless `label` is `Some`.
    pub fn set_edge_named(
        &mut self,
        v: impl Into<String>,
        w: impl Into<String>,
        name: Option<impl Into<String>>,
        label: Option<E>,
    ) -> &mut Self {
        let v = v.into();
        let w = w.into();
        self.ensure_node(v.as_str());
        self.ensure_node(w.as_str());

        let name = if self.options.multigraph {
            name.map(Into::into)
        } else {
            None
        };
        let key = EdgeKey { v, w, name };

        if let Some(slot) = self.edges.get_mut(&key) {
            if let Some(label) = label {
                *slot = label;
            }
            return self;
        }

        self.invalidate_adj();
        self.edges.insert(key, label.unwrap_or_default());
        self
    }

    pub fn set_path(&mut self, nodes: &[&str]) -> &mut Self {
        for pair in nodes.windows(2) {
            self.set_edge(pair[0], pair[1]);
        }
        self
    }

    pub fn has_edge(&self, v: &str, w: &str, name: Option<&str>) -> bool {
        self.edges.contains_key(&self.view(v, w, name))
    }

    pub fn edge(&self, v: &str, w: &str, name: Option<&str>) -> Option<&E> {
        self.edges.get(&self.view(v, w, name))
    }

    pub fn edge_by_key(&self, key: &EdgeKey) -> Option<&E> {
        self.edge(&key.v, &key.w, key.name.as_deref())
    }

    pub fn edge_mut_by_key(&mut self, key: &EdgeKey) -> Option<&mut E> {
        let view = self.view(&key.v, &key.w, key.name.as_deref());
        self.edges.get_mut(&view)
    }

    pub fn remove_edge_key(&mut self, key: &EdgeKey) -> Option<E> {
        let view = self.view(&key.v, &key.w, key.name.as_deref());
        let removed = self.edges.shift_remove(&view)?;
        self.invalidate_adj();
        Some(removed)
    }

    /// Distinct successors of `v`, in edge insertion order.
    pub fn successors(&self, v: &str) -> Vec<&str> {
        let Some(v_ix) = self.nodes.get_index_of(v) else {
            return Vec::new();
        };
        let edge_ixs: Vec<usize> = self.with_adj(|c| c.out_edges(v_ix).to_vec());
        let mut out: Vec<&str> = Vec::with_capacity(edge_ixs.len());
        for ix in edge_ixs {
            let w = self.edge_key_at(ix).w.as_str();
            if !out.contains(&w) {
                out.push(w);
            }
        }
        out
    }

    /// Distinct predecessors of `v`, in edge insertion order.
    pub fn predecessors(&self, v: &str) -> Vec<&str> {
        let Some(v_ix) = self.nodes.get_index_of(v) else {
            return Vec::new();
        };
        let edge_ixs: Vec<usize> = self.with_adj(|c| c.in_edges(v_ix).to_vec());
        let mut out: Vec<&str> = Vec::with_capacity(edge_ixs.len());
        for ix in edge_ixs {
            let u = self.edge_key_at(ix).v.as_str();
            if !out.contains(&u) {
                out.push(u);
            }
        }
        out
    }

    /// Edges leaving `v`, optionally restricted to those entering `w`.
    pub fn out_edges(&self, v: &str, w: Option<&str>) -> Vec<EdgeKey> {
        let Some(v_ix) = self.nodes.get_index_of(v) else {
            return Vec::new();
        };
        let edge_ixs: Vec<usize> = self.with_adj(|c| c.out_edges(v_ix).to_vec());
        edge_ixs
            .into_iter()
            .map(|ix| self.edge_key_at(ix))
            .filter(|k| w.is_none_or(|w| k.w == w))
            .cloned()
            .collect()
    }

    /// Edges entering `v`, optionally restricted to those leaving `u`.
    pub fn in_edges(&self, v: &str, u: Option<&str>) -> Vec<EdgeKey> {
        let Some(v_ix) = self.nodes.get_index_of(v) else {
            return Vec::new();
        };
        let edge_ixs: Vec<usize> = self.with_adj(|c| c.in_edges(v_ix).to_vec());
        edge_ixs
            .into_iter()
            .map(|ix| self.edge_key_at(ix))
            .filter(|k| u.is_none_or(|u| k.v == u))
            .cloned()
            .collect()
    }

    /// Nodes without incoming edges, in insertion order.
    pub fn sources(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        self.with_adj(|c| {
            for (ix, id) in self.nodes.keys().enumerate() {
                if c.in_edges(ix).is_empty() {
                    out.push(id.as_str());
                }
            }
        });
        out
    }
}
