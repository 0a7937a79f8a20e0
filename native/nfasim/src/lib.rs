//! Simulation of non-deterministic finite automata with lambda transitions.
//!
//! A [`Graph`] of nodes and single-character (or empty) edges is run against
//! an input one character at a time:
//!
//! ```
//! use nfasim::{Graph, Step, start};
//!
//! let mut builder = Graph::builder();
//! let s = builder.add_start_node("S");
//! let a = builder.add_node("A");
//! let f = builder.add_accept_node("F");
//! builder.add_epsilon_edge(s, a)?;
//! builder.add_edge(a, "a", f)?;
//! let graph = builder.build();
//!
//! let mut state = start(&graph, "a")?;
//! let accepted = loop {
//!     match state.step() {
//!         Step::Continue(next) => state = next,
//!         Step::Accepted => break true,
//!         Step::Rejected(_) => break false,
//!     }
//! };
//! assert!(accepted);
//! # Ok::<(), nfasim::AutomatonError>(())
//! ```

pub mod automaton;

pub use automaton::{
    AutomatonError, Edge, Graph, GraphBuilder, GraphConfig, Node, NodeId, NodeSet, Rejection,
    State, Step, Symbol, Verdict, accepts, run, start, step,
};

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
fn import_submodule<'py>(
    py: Python<'py>,
    m: &Bound<'py, PyModule>,
    package: &str,
    name: &str,
    import_func: impl FnOnce(&Bound<'py, PyModule>) -> PyResult<()>,
) -> PyResult<()> {
    let submodule = PyModule::new(py, name)?;
    import_func(&submodule)?;

    // Make `import nfasim.automaton` work, not just attribute access.
    let sys_modules = PyModule::import(py, "sys")?.getattr("modules")?;
    sys_modules.set_item(format!("{}.{}", package, name), submodule.clone())?;

    m.add_submodule(&submodule)?;
    Ok(())
}

#[cfg(feature = "python")]
#[pymodule]
fn nfasim(m: &Bound<'_, PyModule>) -> PyResult<()> {
    import_submodule(m.py(), m, "nfasim", "automaton", automaton::automaton)?;
    Ok(())
}
