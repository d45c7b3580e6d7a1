pub mod bridges;
pub mod fleury;
pub mod multigraph;

pub use bridges::{find_bridges, is_bridge};
pub use fleury::{
    build_euler_path, has_euler_path, EulerPath, EulerPathFinder, FleuryConfig, PathOutcome,
    SelectionRule, TraversalStep,
};
pub use multigraph::MultiGraph;
