use fleury::graph::{EulerPathFinder, MultiGraph, PathOutcome};

fn report(finder: &EulerPathFinder, mut graph: MultiGraph<i32>) {
    println!("{graph}");
    match finder.find_euler_path(&mut graph, true) {
        Ok(PathOutcome::Found(path)) => println!("{path}"),
        Ok(PathOutcome::Exists) => println!("A path exists"),
        Ok(PathOutcome::NoPath) => println!("No path exists"),
        Err(e) => println!("Path construction failed: {e}"),
    }
}

fn main() -> fleury::Result<()> {
    let finder = EulerPathFinder::new();

    let line = MultiGraph::undirected(vec![1, 2, 3], vec![(1, 2), (2, 3)])?;
    report(&finder, line);

    let k5 = MultiGraph::undirected(
        vec![1, 2, 3, 4, 5],
        vec![
            (1, 2),
            (1, 3),
            (1, 4),
            (1, 5),
            (2, 3),
            (2, 4),
            (2, 5),
            (3, 4),
            (3, 5),
            (4, 5),
        ],
    )?
    .with_name("K5");
    report(&finder, k5);

    // Multigraphs work too
    let konigsberg = MultiGraph::undirected(
        vec![1, 2, 3, 4],
        vec![(1, 2), (1, 2), (1, 3), (1, 3), (1, 4), (2, 4), (3, 4)],
    )?
    .with_name("Konigsberg");
    report(&finder, konigsberg);

    Ok(())
}
