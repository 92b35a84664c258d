//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use log::info;

use crate::cli::graph::{build_graph, build_graph_with, find_layer, GraphSpec};
use crate::error::Result;
use crate::layer::{Suite, TraceFixture};
use crate::runner::Runner;

/// Print the resolution order of a layer from a graph description.
pub fn order(graph_path: &Path, layer_name: &str) -> Result<()> {
    info!(
        "Resolving layer {} from {}",
        layer_name,
        graph_path.display()
    );

    let spec = GraphSpec::load(graph_path)?;
    let layers = build_graph(&spec)?;
    let layer = find_layer(&layers, layer_name)?;

    for l in layer.resolution_order() {
        println!("{}", l);
    }

    Ok(())
}

/// Simulate a run: whole-run setup, `tests` per-test cycles, whole-run
/// teardown. Prints the hook invocation trace.
pub fn simulate(graph_path: &Path, layer_name: &str, tests: usize) -> Result<()> {
    info!(
        "Simulating {} test(s) on layer {} from {}",
        tests,
        layer_name,
        graph_path.display()
    );

    let spec = GraphSpec::load(graph_path)?;
    let log = Rc::new(RefCell::new(Vec::new()));
    let layers = build_graph_with(&spec, |_| TraceFixture::with_log(Rc::clone(&log)))?;
    let layer = find_layer(&layers, layer_name)?.clone();

    let mut suite = Suite::new(
        layer_name,
        (1..=tests).map(|i| format!("test_{}", i)),
    );
    suite.attach_layer(&layer);

    let mut runner = Runner::new();
    runner.set_up(&layer)?;
    for test in suite.tests() {
        runner.test_set_up(&layer)?;
        log.borrow_mut().push(format!("run {}", test));
        runner.test_tear_down(&layer)?;
    }
    runner.tear_down()?;

    for line in log.borrow().iter() {
        println!("{}", line);
    }

    Ok(())
}
