//! PyO3 bindings for the automaton module.
//!
//! Mirrors the step-wise API: `Graph.start(input)` returns a
//! `SimulationState`, and `SimulationState.step()` returns either the next
//! state or the final boolean verdict.

use crate::automaton::config::GraphConfig;
use crate::automaton::error::AutomatonError;
use crate::automaton::graph::{Graph, GraphBuilder};
use crate::automaton::sim::{self, State, Step};
use crate::automaton::state::{NodeId, NodeSet};
use indexmap::IndexMap;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyFrozenSet};
use std::sync::Arc;

impl From<AutomatonError> for PyErr {
    fn from(err: AutomatonError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

/// A mutable graph under construction.
///
/// Simulations run against a frozen snapshot, so editing the graph never
/// affects a run that is already in progress.
#[pyclass(name = "Graph", module = "nfasim.automaton")]
pub struct PyGraph {
    builder: GraphBuilder,
    /// First node registered under each label.
    labels: IndexMap<String, NodeId>,
    snapshot: Option<Arc<Graph>>,
}

impl PyGraph {
    fn snapshot(&mut self) -> Arc<Graph> {
        let builder = &self.builder;
        Arc::clone(
            self.snapshot
                .get_or_insert_with(|| Arc::new(builder.clone().build())),
        )
    }
}

#[pymethods]
impl PyGraph {
    #[new]
    #[pyo3(signature = (cache_epsilon_closures = false))]
    fn new(cache_epsilon_closures: bool) -> Self {
        let config = GraphConfig {
            cache_epsilon_closures,
        };
        Self {
            builder: GraphBuilder::new().with_config(config),
            labels: IndexMap::new(),
            snapshot: None,
        }
    }

    /// Add a node and return its id.
    #[pyo3(signature = (label, start = false, accept = false))]
    fn add_node(&mut self, label: String, start: bool, accept: bool) -> NodeId {
        let id = self.builder.add_node_with(label.clone(), start, accept);
        self.labels.entry(label).or_insert(id);
        self.snapshot = None;
        id
    }

    /// Add an edge. An empty symbol is a lambda transition.
    #[pyo3(signature = (source, symbol, destination))]
    fn add_edge(&mut self, source: NodeId, symbol: String, destination: NodeId) -> PyResult<()> {
        self.builder.add_edge(source, symbol, destination)?;
        self.snapshot = None;
        Ok(())
    }

    /// Look up a node id by label.
    fn node_id(&self, label: &str) -> Option<NodeId> {
        self.labels.get(label).copied()
    }

    fn __len__(&self) -> usize {
        self.builder.len()
    }

    /// Validate the graph and begin a run over `input`.
    fn start(&mut self, input: String) -> PyResult<PySimulationState> {
        let graph = self.snapshot();
        let state = sim::start(&graph, &input)?;
        Ok(PySimulationState::from_state(&graph, Arc::from(input.as_str()), &state))
    }

    /// Run `input` to completion.
    fn accepts(&mut self, input: &str) -> PyResult<bool> {
        let graph = self.snapshot();
        Ok(sim::accepts(&graph, input)?)
    }
}

/// One snapshot of a run.
#[pyclass(name = "SimulationState", module = "nfasim.automaton", frozen)]
pub struct PySimulationState {
    graph: Arc<Graph>,
    input: Arc<str>,
    /// Byte offset of the unread suffix in `input`.
    offset: usize,
    consumed: usize,
    active: NodeSet,
}

impl PySimulationState {
    fn from_state(graph: &Arc<Graph>, input: Arc<str>, state: &State<'_, '_>) -> Self {
        Self {
            graph: Arc::clone(graph),
            offset: input.len() - state.input_left().len(),
            input,
            consumed: state.consumed(),
            active: state.active().clone(),
        }
    }

    fn as_state(&self) -> State<'_, '_> {
        State::from_parts(
            &self.graph,
            self.active.clone(),
            &self.input[self.offset..],
            self.consumed,
        )
    }
}

#[pymethods]
impl PySimulationState {
    /// Ids of the active nodes.
    #[getter]
    fn active<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyFrozenSet>> {
        PyFrozenSet::new(py, self.active.iter())
    }

    #[getter]
    fn input_left(&self) -> &str {
        &self.input[self.offset..]
    }

    #[getter]
    fn consumed(&self) -> usize {
        self.consumed
    }

    /// Advance by one character. Returns the next state, or a bool once the
    /// run is decided.
    fn step(&self, py: Python<'_>) -> PyResult<Py<PyAny>> {
        let verdict = match sim::step(&self.as_state()) {
            Step::Continue(next) => {
                let next = Self::from_state(&self.graph, Arc::clone(&self.input), &next);
                return Ok(Bound::new(py, next)?.into_any().unbind());
            }
            Step::Accepted => true,
            Step::Rejected(_) => false,
        };
        Ok(PyBool::new(py, verdict).to_owned().into_any().unbind())
    }

    fn __repr__(&self) -> String {
        format!(
            "SimulationState(active={:?}, input_left={:?})",
            self.active.to_vec(),
            &self.input[self.offset..]
        )
    }
}

/// Register the automaton submodule.
pub fn automaton(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyGraph>()?;
    m.add_class::<PySimulationState>()?;
    Ok(())
}
