//! # Fleury's Algorithm for Eulerian Paths in Multigraphs
//!
//! This module decides whether an undirected [`MultiGraph`] has an **Eulerian path**
//! (a walk using every edge exactly once) and, on request, walks it.
//!
//! ## Existence
//! By the degree-parity theorem a path can exist only when the number of
//! odd-degree vertices is 0 (the walk is a circuit) or 2 (the walk runs between
//! the two odd vertices). Connectivity is not checked: a graph without edges
//! reports a path of length zero.
//!
//! ## Construction
//! Starting from an odd vertex (or the graph's start vertex when all degrees are
//! even), the walk repeatedly picks an edge out of the current vertex, records it,
//! removes it and moves across. The edge choice is governed by a [`SelectionRule`]:
//! - [`SelectionRule::Bridges`]: never cross a bridge of the remaining edges unless
//!   nothing else is left. This is Fleury's rule proper.
//! - [`SelectionRule::DegreeHeuristic`]: avoid a neighbour whose own degree is 1.
//!   Cheaper, and reproduces the historical walks, but it can strand edges.
//!
//! **Construction is destructive.** Every traversed edge is removed from the graph,
//! which is left empty and marked consumed. Clone the graph first to keep it.
//!
//! ## Example
//! ```rust
//! use fleury::graph::fleury::{build_euler_path, has_euler_path};
//! use fleury::graph::multigraph::MultiGraph;
//!
//! let mut g = MultiGraph::undirected(vec![1, 2, 3], vec![(1, 2), (2, 3)]).unwrap();
//! assert!(has_euler_path(&g));
//!
//! let path = build_euler_path(&mut g).unwrap();
//! assert_eq!(path.to_string(), "(1 -> 2), (2 -> 3), end");
//! assert_eq!(g.edge_count(), 0);
//! ```

use log::{debug, info, trace, warn};
use std::fmt::{self, Debug, Display};
use std::hash::Hash;

use crate::error::{GraphError, Result};
use crate::graph::bridges::{bridge_set, edge_key};
use crate::graph::multigraph::MultiGraph;

/// How the next edge is chosen at each step of the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionRule {
    /// Take the first edge that is not a bridge of the remaining graph,
    /// falling back to the first edge when only bridges are left.
    #[default]
    Bridges,
    /// Take the first neighbour whose own degree is not 1, falling back to the
    /// first neighbour.
    DegreeHeuristic,
}

/// Configuration for [`EulerPathFinder`].
#[derive(Debug, Clone, Default)]
pub struct FleuryConfig {
    /// Edge selection rule used during construction
    pub rule: SelectionRule,
}

/// One traversed edge, in the direction it was walked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TraversalStep<L> {
    pub from: L,
    pub to: L,
}

impl<L: Display> Display for TraversalStep<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} -> {})", self.from, self.to)
    }
}

/// The ordered steps of an Eulerian path or circuit.
///
/// Rendered with `Display` as `(1 -> 2), (2 -> 3), end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EulerPath<L> {
    steps: Vec<TraversalStep<L>>,
}

impl<L> EulerPath<L> {
    pub fn steps(&self) -> &[TraversalStep<L>] {
        &self.steps
    }

    /// Number of traversed edges.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn into_steps(self) -> Vec<TraversalStep<L>> {
        self.steps
    }
}

impl<L: Clone + PartialEq> EulerPath<L> {
    /// The walk as a vertex sequence, one longer than the number of steps.
    /// Empty for an empty path.
    pub fn vertices(&self) -> Vec<L> {
        let Some(first) = self.steps.first() else {
            return Vec::new();
        };
        std::iter::once(first.from.clone())
            .chain(self.steps.iter().map(|s| s.to.clone()))
            .collect()
    }

    /// Whether the walk ends where it started. An empty path is not a circuit.
    pub fn is_circuit(&self) -> bool {
        match (self.steps.first(), self.steps.last()) {
            (Some(first), Some(last)) => first.from == last.to,
            _ => false,
        }
    }
}

impl<L: Display> Display for EulerPath<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            write!(f, "{step}, ")?;
        }
        write!(f, "end")
    }
}

impl<L> IntoIterator for EulerPath<L> {
    type Item = TraversalStep<L>;
    type IntoIter = std::vec::IntoIter<TraversalStep<L>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

/// Result of [`EulerPathFinder::find_euler_path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathOutcome<L> {
    /// The degree sequence rules out an Eulerian path.
    NoPath,
    /// A path exists but construction was not requested; the graph is untouched.
    Exists,
    /// The constructed path; the graph has been consumed.
    Found(EulerPath<L>),
}

impl<L> PathOutcome<L> {
    pub fn exists(&self) -> bool {
        !matches!(self, PathOutcome::NoPath)
    }

    pub fn path(&self) -> Option<&EulerPath<L>> {
        match self {
            PathOutcome::Found(path) => Some(path),
            _ => None,
        }
    }

    pub fn into_path(self) -> Option<EulerPath<L>> {
        match self {
            PathOutcome::Found(path) => Some(path),
            _ => None,
        }
    }
}

/// Decides Eulerian path existence and builds the path with Fleury's algorithm.
#[derive(Debug, Clone, Default)]
pub struct EulerPathFinder {
    config: FleuryConfig,
}

impl EulerPathFinder {
    /// Creates a finder using [`SelectionRule::Bridges`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FleuryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FleuryConfig {
        &self.config
    }

    /// Returns whether the graph has an Eulerian path, without modifying it.
    ///
    /// Always `false` for directed graphs. Otherwise `true` exactly when 0 or 2
    /// vertices have odd degree; connectivity is not checked.
    pub fn has_euler_path<L>(&self, graph: &MultiGraph<L>) -> bool
    where
        L: Clone + Eq + Hash + Debug,
    {
        if graph.is_directed() {
            debug!("Eulerian path search does not support directed graphs");
            return false;
        }
        let odd = odd_indices(graph).len();
        debug!("graph has {odd} vertices with odd degree");
        odd == 0 || odd == 2
    }

    /// Odd-degree vertices in declaration order.
    pub fn odd_vertices<'g, L>(&self, graph: &'g MultiGraph<L>) -> Vec<&'g L>
    where
        L: Clone + Eq + Hash + Debug,
    {
        odd_indices(graph)
            .into_iter()
            .map(|v| graph.label(v))
            .collect()
    }

    /// Walks an Eulerian path, removing every traversed edge from `graph`.
    ///
    /// The walk starts at the first odd-degree vertex if there are two, and at
    /// the graph's start vertex otherwise. An isolated start vertex yields
    /// [`GraphError::Stranded`] when the graph still has edges elsewhere.
    ///
    /// # Errors
    /// - [`GraphError::AlreadyConsumed`] if an earlier construction drained `graph`
    /// - [`GraphError::PreconditionViolation`] if `graph` is directed or its
    ///   odd-degree count is not 0 or 2; the graph is left untouched
    /// - [`GraphError::Stranded`] if the walk ends with edges left over, which
    ///   happens for disconnected graphs or when the degree heuristic misjudges
    ///
    /// On success and on [`GraphError::Stranded`] the graph is marked consumed.
    pub fn build_euler_path<L>(&self, graph: &mut MultiGraph<L>) -> Result<EulerPath<L>>
    where
        L: Clone + Eq + Hash + Debug,
    {
        if graph.is_consumed() {
            return Err(GraphError::AlreadyConsumed);
        }
        if graph.is_directed() {
            return Err(GraphError::PreconditionViolation(
                "Eulerian path construction requires an undirected graph".into(),
            ));
        }

        let odd = odd_indices(graph);
        let start = match odd.as_slice() {
            [] => graph.start_index(),
            [first, _] => *first,
            _ => {
                return Err(GraphError::PreconditionViolation(format!(
                    "{} vertices have odd degree, an Eulerian path needs 0 or 2",
                    odd.len()
                )))
            }
        };
        debug!("starting walk at {:?}", graph.label(start));

        let walked = self.walk(graph, start);
        graph.mark_consumed();
        let steps = walked?;

        let remaining = graph.edge_count();
        if remaining > 0 {
            warn!(
                "walk stopped after {} steps with {remaining} edges left",
                steps.len()
            );
            return Err(GraphError::Stranded { remaining });
        }
        Ok(EulerPath { steps })
    }

    /// Checks for a path and, if `construct` is set, builds it.
    ///
    /// Logs "No path exists" when the degree sequence rules a path out, and the
    /// rendered path when one is built.
    ///
    /// # Errors
    /// Any error from [`EulerPathFinder::build_euler_path`].
    pub fn find_euler_path<L>(
        &self,
        graph: &mut MultiGraph<L>,
        construct: bool,
    ) -> Result<PathOutcome<L>>
    where
        L: Clone + Eq + Hash + Debug + Display,
    {
        if !self.has_euler_path(graph) {
            info!("No path exists");
            return Ok(PathOutcome::NoPath);
        }
        if !construct {
            return Ok(PathOutcome::Exists);
        }

        let path = self.build_euler_path(graph)?;
        info!("{path}");
        Ok(PathOutcome::Found(path))
    }

    fn walk<L>(&self, graph: &mut MultiGraph<L>, start: usize) -> Result<Vec<TraversalStep<L>>>
    where
        L: Clone + Eq + Hash + Debug,
    {
        let mut steps = Vec::with_capacity(graph.edge_count());
        let mut current = start;

        while graph.degree_at(current) > 0 {
            let next = self.select(graph, current);
            trace!(
                "traveling from {:?} to {:?}",
                graph.label(current),
                graph.label(next)
            );
            steps.push(TraversalStep {
                from: graph.label(current).clone(),
                to: graph.label(next).clone(),
            });
            graph.remove_edge_at(current, next)?;
            current = next;
        }

        Ok(steps)
    }

    /// Picks the neighbour to move to. `current` must have at least one edge.
    fn select<L>(&self, graph: &MultiGraph<L>, current: usize) -> usize
    where
        L: Clone + Eq + Hash + Debug,
    {
        let adjacent = graph.adjacent(current);
        let first = adjacent[0];

        match self.config.rule {
            SelectionRule::DegreeHeuristic => adjacent
                .iter()
                .copied()
                .find(|&w| graph.degree_at(w) != 1)
                .unwrap_or(first),
            SelectionRule::Bridges => {
                if adjacent.len() == 1 {
                    return first;
                }
                let bridges = bridge_set(graph);
                adjacent
                    .iter()
                    .copied()
                    .find(|&w| !bridges.contains(&edge_key(current, w)))
                    .unwrap_or(first)
            }
        }
    }
}

/// Returns whether `graph` has an Eulerian path, using the default finder.
pub fn has_euler_path<L>(graph: &MultiGraph<L>) -> bool
where
    L: Clone + Eq + Hash + Debug,
{
    EulerPathFinder::new().has_euler_path(graph)
}

/// Builds an Eulerian path with the default finder, consuming the graph's edges.
///
/// # Errors
/// See [`EulerPathFinder::build_euler_path`].
pub fn build_euler_path<L>(graph: &mut MultiGraph<L>) -> Result<EulerPath<L>>
where
    L: Clone + Eq + Hash + Debug,
{
    EulerPathFinder::new().build_euler_path(graph)
}

fn odd_indices<L>(graph: &MultiGraph<L>) -> Vec<usize>
where
    L: Clone + Eq + Hash + Debug,
{
    (0..graph.vertex_count())
        .filter(|&v| {
            let degree = graph.degree_at(v);
            debug!("{:?} has {degree} neighbors", graph.label(v));
            degree % 2 == 1
        })
        .collect()
}
