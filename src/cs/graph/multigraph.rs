//! # Multigraph with duplicate-respecting adjacency
//!
//! A [`MultiGraph`] stores, for every vertex, the ordered list of its neighbours
//! with one entry per parallel edge. It is built once from a vertex list and an
//! edge list and afterwards only changes through [`MultiGraph::remove_edge_instance`],
//! which consumes exactly one multiplicity unit of an edge.
//!
//! Path construction in [`crate::cs::graph::fleury`] drains the graph: once an
//! Eulerian path has been built, every adjacency list is empty and the graph is
//! marked as consumed. Clone the graph beforehand if you still need it.
//!
//! ## Example
//! ```rust
//! use fleury::graph::multigraph::MultiGraph;
//!
//! let mut g = MultiGraph::undirected(vec![1, 2, 3], vec![(1, 2), (1, 2), (2, 3)]).unwrap();
//! assert_eq!(g.degree_of(&2).unwrap(), 3);
//! assert_eq!(g.edge_count(), 3);
//!
//! g.remove_edge_instance(&1, &2).unwrap();
//! assert_eq!(g.degree_of(&1).unwrap(), 1); // one of the two parallel edges is left
//! ```

use std::collections::HashMap;
use std::fmt::{self, Debug, Display};
use std::hash::Hash;

use crate::error::{GraphError, Result};

const FRAME: &str = "*********************************************";

/// An undirected (or, for construction only, directed) multigraph keyed by caller labels.
///
/// Vertices keep the order in which they were declared. That order decides the
/// default start vertex and the order of every vertex scan.
#[derive(Debug, Clone)]
pub struct MultiGraph<L> {
    name: Option<String>,
    labels: Vec<L>,
    index: HashMap<L, usize>,
    /// `adjacency[v]` lists neighbour indices, one entry per edge end.
    adjacency: Vec<Vec<usize>>,
    directed: bool,
    start: usize,
    consumed: bool,
}

impl<L> MultiGraph<L>
where
    L: Clone + Eq + Hash + Debug,
{
    /// Builds a graph from declared vertices and an edge list.
    ///
    /// For each edge `(u, v)` the label `v` is appended to `u`'s adjacency and,
    /// if the graph is undirected, `u` is appended to `v`'s. Repeated edges become
    /// parallel edges; `(u, u)` becomes a self-loop holding two entries in `u`'s list.
    ///
    /// `start` defaults to the first declared vertex.
    ///
    /// # Errors
    /// - [`GraphError::UnknownVertex`] if an edge endpoint or `start` was not declared
    /// - [`GraphError::InvalidInput`] if no vertices are given or a label repeats
    pub fn new<V, E>(vertices: V, edges: E, directed: bool, start: Option<L>) -> Result<Self>
    where
        V: IntoIterator<Item = L>,
        E: IntoIterator<Item = (L, L)>,
    {
        let labels: Vec<L> = vertices.into_iter().collect();
        if labels.is_empty() {
            return Err(GraphError::invalid_input(
                "a graph needs at least one vertex",
            ));
        }

        let mut index = HashMap::with_capacity(labels.len());
        for (i, label) in labels.iter().enumerate() {
            if index.insert(label.clone(), i).is_some() {
                return Err(GraphError::invalid_input(format!(
                    "vertex {label:?} declared more than once"
                )));
            }
        }

        let mut adjacency = vec![Vec::new(); labels.len()];
        for (u, v) in edges {
            let ui = *index.get(&u).ok_or_else(|| GraphError::unknown_vertex(&u))?;
            let vi = *index.get(&v).ok_or_else(|| GraphError::unknown_vertex(&v))?;
            adjacency[ui].push(vi);
            if !directed {
                adjacency[vi].push(ui);
            }
        }

        let start = match start {
            Some(s) => *index.get(&s).ok_or_else(|| GraphError::unknown_vertex(&s))?,
            None => 0,
        };

        Ok(Self {
            name: None,
            labels,
            index,
            adjacency,
            directed,
            start,
            consumed: false,
        })
    }

    /// Shorthand for an undirected graph starting at its first vertex.
    pub fn undirected<V, E>(vertices: V, edges: E) -> Result<Self>
    where
        V: IntoIterator<Item = L>,
        E: IntoIterator<Item = (L, L)>,
    {
        Self::new(vertices, edges, false, None)
    }

    /// Attaches a name used by the textual dump.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// The designated start vertex.
    pub fn start(&self) -> &L {
        &self.labels[self.start]
    }

    /// Vertices in declaration order.
    pub fn vertices(&self) -> impl Iterator<Item = &L> {
        self.labels.iter()
    }

    pub fn vertex_count(&self) -> usize {
        self.labels.len()
    }

    pub fn contains_vertex(&self, label: &L) -> bool {
        self.index.contains_key(label)
    }

    /// Number of edges still present. A self-loop counts once.
    pub fn edge_count(&self) -> usize {
        let ends: usize = self.adjacency.iter().map(Vec::len).sum();
        if self.directed {
            ends
        } else {
            ends / 2
        }
    }

    /// Current degree: the number of remaining adjacency entries of `label`.
    ///
    /// # Errors
    /// [`GraphError::UnknownVertex`] if `label` was never declared.
    pub fn degree_of(&self, label: &L) -> Result<usize> {
        Ok(self.adjacency[self.index_of(label)?].len())
    }

    /// Neighbours of `label` in adjacency order, repeated once per parallel edge.
    ///
    /// # Errors
    /// [`GraphError::UnknownVertex`] if `label` was never declared.
    pub fn neighbors(&self, label: &L) -> Result<impl Iterator<Item = &L> + '_> {
        let v = self.index_of(label)?;
        Ok(self.adjacency[v].iter().map(move |&n| &self.labels[n]))
    }

    /// Removes one instance of the edge `(u, v)`.
    ///
    /// Only the first matching entry is dropped from each side and the order of
    /// the remaining entries is kept, so other parallel edges stay intact.
    ///
    /// # Errors
    /// - [`GraphError::UnknownVertex`] if either label was never declared
    /// - [`GraphError::NoSuchEdge`] if no such edge is left; the graph is unchanged
    pub fn remove_edge_instance(&mut self, u: &L, v: &L) -> Result<()> {
        let ui = self.index_of(u)?;
        let vi = self.index_of(v)?;
        self.remove_edge_at(ui, vi)
    }

    /// Whether a path construction has already drained this graph.
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    pub(crate) fn index_of(&self, label: &L) -> Result<usize> {
        self.index
            .get(label)
            .copied()
            .ok_or_else(|| GraphError::unknown_vertex(label))
    }

    pub(crate) fn label(&self, v: usize) -> &L {
        &self.labels[v]
    }

    pub(crate) fn start_index(&self) -> usize {
        self.start
    }

    pub(crate) fn adjacent(&self, v: usize) -> &[usize] {
        &self.adjacency[v]
    }

    pub(crate) fn degree_at(&self, v: usize) -> usize {
        self.adjacency[v].len()
    }

    pub(crate) fn mark_consumed(&mut self) {
        self.consumed = true;
    }

    /// Index-level removal. Both positions are located before anything is
    /// touched, so a missing entry never leaves half an edge behind.
    pub(crate) fn remove_edge_at(&mut self, u: usize, v: usize) -> Result<()> {
        let missing = || GraphError::no_such_edge(&self.labels[u], &self.labels[v]);

        let forward = self.adjacency[u]
            .iter()
            .position(|&n| n == v)
            .ok_or_else(missing)?;

        if self.directed {
            self.adjacency[u].remove(forward);
            return Ok(());
        }

        if u == v {
            // a self-loop holds two entries in the same list
            let second = self.adjacency[u][forward + 1..]
                .iter()
                .position(|&n| n == u)
                .map(|p| p + forward + 1)
                .ok_or_else(missing)?;
            self.adjacency[u].remove(second);
            self.adjacency[u].remove(forward);
            return Ok(());
        }

        let backward = self.adjacency[v]
            .iter()
            .position(|&n| n == u)
            .ok_or_else(missing)?;
        self.adjacency[u].remove(forward);
        self.adjacency[v].remove(backward);
        Ok(())
    }
}

impl<L: Display> Display for MultiGraph<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{FRAME}")?;
        match &self.name {
            Some(name) => writeln!(f, "Graph name: {name}")?,
            None => writeln!(f, "Graph name: None")?,
        }
        for (label, neighbors) in self.labels.iter().zip(&self.adjacency) {
            write!(f, "Vertex: {label}; Neighbors: [")?;
            for &n in neighbors {
                write!(f, "{}, ", self.labels[n])?;
            }
            writeln!(f, "]")?;
        }
        write!(f, "{FRAME}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn konigsberg() -> MultiGraph<i32> {
        MultiGraph::undirected(
            vec![1, 2, 3, 4],
            vec![(1, 2), (1, 2), (1, 3), (1, 3), (1, 4), (2, 4), (3, 4)],
        )
        .unwrap()
    }

    #[test]
    fn test_parallel_edges_counted_by_multiplicity() {
        let g = konigsberg();
        assert_eq!(g.degree_of(&1).unwrap(), 5);
        assert_eq!(g.degree_of(&2).unwrap(), 3);
        assert_eq!(g.degree_of(&3).unwrap(), 3);
        assert_eq!(g.degree_of(&4).unwrap(), 3);
        assert_eq!(g.edge_count(), 7);
        let to_two = g.neighbors(&1).unwrap().filter(|&&n| n == 2).count();
        assert_eq!(to_two, 2);
    }

    #[test]
    fn test_handshake_lemma() {
        let g = konigsberg();
        let total: usize = g.vertices().map(|v| g.degree_of(v).unwrap()).sum();
        assert_eq!(total, 2 * g.edge_count());
    }

    #[test]
    fn test_adjacency_follows_edge_order() {
        let g = MultiGraph::undirected(vec!['a', 'b', 'c'], vec![('a', 'c'), ('b', 'a')]).unwrap();
        let a: Vec<char> = g.neighbors(&'a').unwrap().copied().collect();
        assert_eq!(a, vec!['c', 'b']);
    }

    #[test]
    fn test_unknown_vertex_in_edge() {
        let err = MultiGraph::undirected(vec![1, 2], vec![(1, 3)]).unwrap_err();
        assert_eq!(err, GraphError::UnknownVertex("3".to_string()));
    }

    #[test]
    fn test_unknown_start() {
        let err = MultiGraph::new(vec![1, 2], vec![(1, 2)], false, Some(9)).unwrap_err();
        assert!(matches!(err, GraphError::UnknownVertex(_)));
    }

    #[test]
    fn test_duplicate_and_empty_vertices_rejected() {
        assert!(matches!(
            MultiGraph::undirected(vec![1, 1], Vec::new()),
            Err(GraphError::InvalidInput(_))
        ));
        assert!(matches!(
            MultiGraph::<i32>::undirected(Vec::new(), Vec::new()),
            Err(GraphError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_default_and_explicit_start() {
        let g = MultiGraph::undirected(vec!["x", "y"], vec![("x", "y")]).unwrap();
        assert_eq!(*g.start(), "x");
        assert!(g.contains_vertex(&"y"));
        assert!(!g.contains_vertex(&"z"));
        let g = MultiGraph::new(vec!["x", "y"], vec![("x", "y")], false, Some("y")).unwrap();
        assert_eq!(*g.start(), "y");
    }

    #[test]
    fn test_remove_one_parallel_instance() {
        let mut g = konigsberg();
        g.remove_edge_instance(&2, &1).unwrap();
        assert_eq!(g.degree_of(&1).unwrap(), 4);
        assert_eq!(g.degree_of(&2).unwrap(), 2);
        assert_eq!(g.neighbors(&1).unwrap().filter(|&&n| n == 2).count(), 1);
        assert_eq!(g.edge_count(), 6);
    }

    #[test]
    fn test_remove_keeps_remaining_order() {
        let mut g = MultiGraph::undirected(vec![1, 2, 3, 4], vec![(1, 2), (1, 3), (1, 2), (1, 4)])
            .unwrap();
        g.remove_edge_instance(&1, &2).unwrap();
        let rest: Vec<i32> = g.neighbors(&1).unwrap().copied().collect();
        assert_eq!(rest, vec![3, 2, 4]);
    }

    #[test]
    fn test_remove_missing_edge_leaves_graph_intact() {
        let mut g = MultiGraph::undirected(vec![1, 2, 3], vec![(1, 2)]).unwrap();
        let err = g.remove_edge_instance(&1, &3).unwrap_err();
        assert_eq!(
            err,
            GraphError::NoSuchEdge {
                from: "1".to_string(),
                to: "3".to_string()
            }
        );
        assert_eq!(g.edge_count(), 1);

        g.remove_edge_instance(&1, &2).unwrap();
        assert!(g.remove_edge_instance(&1, &2).is_err());
        assert_eq!(g.degree_of(&1).unwrap(), 0);
    }

    #[test]
    fn test_self_loop() {
        let mut g = MultiGraph::undirected(vec![1, 2], vec![(1, 1), (1, 2)]).unwrap();
        assert_eq!(g.degree_of(&1).unwrap(), 3);
        assert_eq!(g.edge_count(), 2);
        g.remove_edge_instance(&1, &1).unwrap();
        assert_eq!(g.degree_of(&1).unwrap(), 1);
        assert_eq!(g.edge_count(), 1);
        assert!(g.remove_edge_instance(&1, &1).is_err());
    }

    #[test]
    fn test_directed_keeps_one_side() {
        let mut g = MultiGraph::new(vec![1, 2], vec![(1, 2)], true, None).unwrap();
        assert!(g.is_directed());
        assert_eq!(g.degree_of(&1).unwrap(), 1);
        assert_eq!(g.degree_of(&2).unwrap(), 0);
        assert!(g.remove_edge_instance(&2, &1).is_err());
        g.remove_edge_instance(&1, &2).unwrap();
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_display_dump() {
        let g = MultiGraph::undirected(vec![1, 2, 3], vec![(1, 2), (2, 3)])
            .unwrap()
            .with_name("line");
        let expected = format!(
            "{FRAME}\nGraph name: line\nVertex: 1; Neighbors: [2, ]\n\
             Vertex: 2; Neighbors: [1, 3, ]\nVertex: 3; Neighbors: [2, ]\n{FRAME}"
        );
        assert_eq!(g.to_string(), expected);
    }

    #[test]
    fn test_display_unnamed() {
        let g = MultiGraph::undirected(vec!['a'], Vec::new()).unwrap();
        assert_eq!(g.name(), None);
        assert_eq!(
            g.to_string(),
            format!("{FRAME}\nGraph name: None\nVertex: a; Neighbors: []\n{FRAME}")
        );
        assert_eq!(g.with_name("solo").name(), Some("solo"));
    }
}
