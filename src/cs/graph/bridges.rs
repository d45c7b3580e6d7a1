use bitvec::prelude::*;
use std::cmp::min;
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{GraphError, Result};
use crate::graph::multigraph::MultiGraph;

/// Finds the bridges among the edges still present in an undirected multigraph.
///
/// A bridge is an edge whose removal increases the number of connected components.
/// Parallel edges are never bridges, and neither are self-loops.
///
/// # Arguments
/// * `graph` - The undirected multigraph to inspect
///
/// # Returns
/// * `Ok(bridges)` - Each bridge once, as `(u, v)` with `u` declared before `v`,
///   sorted by declaration order
/// * `Err(GraphError)` - If the graph is directed
///
/// # Examples
/// ```
/// use fleury::graph::{bridges, multigraph::MultiGraph};
///
/// // Two triangles joined by the edge 3-4
/// let g = MultiGraph::undirected(
///     vec![1, 2, 3, 4, 5, 6],
///     vec![(1, 2), (2, 3), (3, 1), (3, 4), (4, 5), (5, 6), (6, 4)],
/// )
/// .unwrap();
///
/// assert_eq!(bridges::find_bridges(&g).unwrap(), vec![(3, 4)]);
/// ```
///
/// # Complexity
/// * Time: O(V + E) where V is the number of vertices and E is the number of edges
/// * Space: O(V)
pub fn find_bridges<L>(graph: &MultiGraph<L>) -> Result<Vec<(L, L)>>
where
    L: Clone + Eq + Hash + Debug,
{
    if graph.is_directed() {
        return Err(GraphError::invalid_input(
            "Bridge detection requires an undirected graph",
        ));
    }

    let mut keys: Vec<(usize, usize)> = bridge_set(graph).into_iter().collect();
    keys.sort_unstable();
    Ok(keys
        .into_iter()
        .map(|(u, v)| (graph.label(u).clone(), graph.label(v).clone()))
        .collect())
}

/// Returns whether the edge `(u, v)` is currently a bridge.
///
/// # Errors
/// - [`GraphError::InvalidInput`] if the graph is directed
/// - [`GraphError::UnknownVertex`] if either label is not in the graph
/// - [`GraphError::NoSuchEdge`] if no edge joins `u` and `v`
pub fn is_bridge<L>(graph: &MultiGraph<L>, u: &L, v: &L) -> Result<bool>
where
    L: Clone + Eq + Hash + Debug,
{
    if graph.is_directed() {
        return Err(GraphError::invalid_input(
            "Bridge detection requires an undirected graph",
        ));
    }

    let ui = graph.index_of(u)?;
    let vi = graph.index_of(v)?;
    if !graph.adjacent(ui).contains(&vi) {
        return Err(GraphError::no_such_edge(u, v));
    }
    Ok(bridge_set(graph).contains(&edge_key(ui, vi)))
}

/// Normalised key of an undirected edge between two vertex indices.
pub(crate) fn edge_key(u: usize, v: usize) -> (usize, usize) {
    if u <= v {
        (u, v)
    } else {
        (v, u)
    }
}

/// Bridges of the remaining edges, keyed by [`edge_key`].
pub(crate) fn bridge_set<L>(graph: &MultiGraph<L>) -> HashSet<(usize, usize)>
where
    L: Clone + Eq + Hash + Debug,
{
    let n = graph.vertex_count();
    let mut search = LowLink {
        graph,
        visited: bitvec![0; n],
        disc: vec![0; n],
        low: vec![0; n],
        timer: 0,
        bridges: HashSet::new(),
    };

    for v in 0..n {
        if !search.visited[v] && graph.degree_at(v) > 0 {
            search.visit(v);
        }
    }

    search.bridges
}

/// Discovery times and low-link values of one depth-first search.
struct LowLink<'g, L> {
    graph: &'g MultiGraph<L>,
    visited: BitVec,
    disc: Vec<usize>,
    low: Vec<usize>,
    timer: usize,
    bridges: HashSet<(usize, usize)>,
}

/// A vertex on the explicit DFS stack.
struct Frame {
    v: usize,
    parent: Option<usize>,
    /// Position of the next adjacency entry to examine.
    next: usize,
    skipped_parent: bool,
}

impl Frame {
    fn new(v: usize, parent: Option<usize>) -> Self {
        Self {
            v,
            parent,
            next: 0,
            skipped_parent: false,
        }
    }
}

impl<L> LowLink<'_, L>
where
    L: Clone + Eq + Hash + Debug,
{
    fn enter(&mut self, v: usize) {
        self.visited.set(v, true);
        self.disc[v] = self.timer;
        self.low[v] = self.timer;
        self.timer += 1;
    }

    /// Searches the component of `root` without recursion, so path length is
    /// bounded by the heap rather than the call stack.
    fn visit(&mut self, root: usize) {
        let graph = self.graph;
        self.enter(root);
        let mut stack = vec![Frame::new(root, None)];

        while let Some(frame) = stack.last_mut() {
            let v = frame.v;
            let Some(&w) = graph.adjacent(v).get(frame.next) else {
                // v is finished; fold its low-link into the parent
                let parent = frame.parent;
                stack.pop();
                if let Some(p) = parent {
                    self.low[p] = min(self.low[p], self.low[v]);
                    if self.low[v] > self.disc[p] {
                        self.bridges.insert(edge_key(p, v));
                    }
                }
                continue;
            };
            frame.next += 1;

            // Only the tree edge itself is skipped. Any further edge back to the
            // parent is a parallel edge and counts as a back edge.
            if Some(w) == frame.parent && !frame.skipped_parent {
                frame.skipped_parent = true;
                continue;
            }

            if self.visited[w] {
                self.low[v] = min(self.low[v], self.disc[w]);
            } else {
                self.enter(w);
                stack.push(Frame::new(w, Some(v)));
            }
        }
    }
}
