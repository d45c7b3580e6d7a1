use thiserror::Error;

/// Errors raised while building a multigraph or walking its Eulerian path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// An edge endpoint or start label was never declared as a vertex.
    #[error("unknown vertex: {0}")]
    UnknownVertex(String),

    /// An edge removal targeted an adjacency entry that does not exist.
    #[error("no edge between {from} and {to}")]
    NoSuchEdge { from: String, to: String },

    /// Path construction was requested on a graph that cannot have one.
    #[error("precondition violated: {0}")]
    PreconditionViolation(String),

    /// The graph's edges were already consumed by an earlier path construction.
    #[error("graph was already consumed by a previous path construction")]
    AlreadyConsumed,

    /// The walk ended while edges were still left in the graph.
    #[error("walk ended with {remaining} edge(s) left untraversed")]
    Stranded { remaining: usize },

    /// The vertex list is empty, repeats a label, or the graph kind is unsupported.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl GraphError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub(crate) fn unknown_vertex<L: std::fmt::Debug>(label: &L) -> Self {
        Self::UnknownVertex(format!("{label:?}"))
    }

    pub(crate) fn no_such_edge<L: std::fmt::Debug>(from: &L, to: &L) -> Self {
        Self::NoSuchEdge {
            from: format!("{from:?}"),
            to: format!("{to:?}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
