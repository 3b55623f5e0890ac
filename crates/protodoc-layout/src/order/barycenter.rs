//! Barycenter computation and the stable barycenter sort.

use super::Relationship;
use crate::graphlib::Graph;
use crate::{EdgeLabel, GraphLabel, NodeLabel};
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq)]
pub struct BarycenterEntry {
    pub v: String,
    pub barycenter: Option<f64>,
    pub weight: Option<f64>,
}

/// Weighted mean order of each node's neighbours on the adjacent layer.
///
/// Nodes without neighbours in that direction get no barycenter and keep their slot in [`sort`].
pub fn barycenter(
    g: &Graph<NodeLabel, EdgeLabel, GraphLabel>,
    movable: &[String],
    relationship: Relationship,
) -> Vec<BarycenterEntry> {
    movable
        .iter()
        .map(|v| {
            let edges = match relationship {
                Relationship::InEdges => g.in_edges(v, None),
                Relationship::OutEdges => g.out_edges(v, None),
            };

            let mut sum: f64 = 0.0;
            let mut weight: f64 = 0.0;
            let mut saw_edge = false;
            for e in edges.iter().filter(|e| !e.is_self_loop()) {
                let other = match relationship {
                    Relationship::InEdges => &e.v,
                    Relationship::OutEdges => &e.w,
                };
                let edge_weight = g.edge_by_key(e).map(|l| l.weight).unwrap_or(1.0);
                let order = g.node(other).and_then(|n| n.order).unwrap_or(0) as f64;
                sum += edge_weight * order;
                weight += edge_weight;
                saw_edge = true;
            }

            if !saw_edge || weight == 0.0 {
                return BarycenterEntry {
                    v: v.clone(),
                    barycenter: None,
                    weight: None,
                };
            }
            BarycenterEntry {
                v: v.clone(),
                barycenter: Some(sum / weight),
                weight: Some(weight),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortEntry {
    pub v: String,
    /// Position before sorting.
    pub i: usize,
    pub barycenter: Option<f64>,
}

/// Sorts entries by barycenter while pinning entries without one to their previous index.
///
/// Equal barycenters keep their previous relative order, or the reverse when `bias_right`.
pub fn sort(entries: &[SortEntry], bias_right: bool) -> Vec<String> {
    let (mut sortable, mut unsortable): (Vec<&SortEntry>, Vec<&SortEntry>) =
        entries.iter().partition(|e| e.barycenter.is_some());

    // Popped from the back, so keep the smallest index last.
    unsortable.sort_by(|a, b| b.i.cmp(&a.i));

    sortable.sort_by(|a, b| {
        let a_bc = a.barycenter.unwrap_or(0.0);
        let b_bc = b.barycenter.unwrap_or(0.0);
        match a_bc.partial_cmp(&b_bc).unwrap_or(Ordering::Equal) {
            Ordering::Equal if bias_right => b.i.cmp(&a.i),
            Ordering::Equal => a.i.cmp(&b.i),
            other => other,
        }
    });

    fn consume_unsortable(out: &mut Vec<String>, unsortable: &mut Vec<&SortEntry>) {
        while let Some(last) = unsortable.last() {
            if last.i > out.len() {
                break;
            }
            out.push(last.v.clone());
            unsortable.pop();
        }
    }

    let mut out: Vec<String> = Vec::with_capacity(entries.len());
    consume_unsortable(&mut out, &mut unsortable);
    for entry in sortable {
        out.push(entry.v.clone());
        consume_unsortable(&mut out, &mut unsortable);
    }
    out.extend(unsortable.into_iter().rev().map(|e| e.v.clone()));
    out
}
