//! Python bindings for the task parser using PyO3

use crate::config::ParserConfig;
use crate::parser::IntentParser;
use crate::registry::InMemoryRegistry;
use crate::similarity::similarity_ratio;
use crate::types::Client;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;
use std::sync::Arc;

/// Similarity ratio between two strings in [0, 1] (Python function)
#[pyfunction]
pub fn py_similarity_ratio(a: &str, b: &str) -> f64 {
    similarity_ratio(a, b)
}

/// Python wrapper around `IntentParser` with a replaceable client list
#[pyclass]
pub struct PyIntentParser {
    config: ParserConfig,
    parser: IntentParser,
}

fn build(config: ParserConfig, clients: Vec<Client>) -> PyResult<IntentParser> {
    let registry = Arc::new(InMemoryRegistry::with_clients(clients));
    IntentParser::new(config, registry).map_err(|e| PyValueError::new_err(e.to_string()))
}

#[pymethods]
impl PyIntentParser {
    /// Thresholds default to the environment, then to 0.85 / 0.70
    #[new]
    #[pyo3(signature = (auto_threshold=None, confirm_threshold=None))]
    fn new(auto_threshold: Option<f64>, confirm_threshold: Option<f64>) -> PyResult<Self> {
        let mut config =
            ParserConfig::from_env().map_err(|e| PyValueError::new_err(e.to_string()))?;
        if let Some(auto) = auto_threshold {
            config.auto_threshold = auto;
        }
        if let Some(confirm) = confirm_threshold {
            config.confirm_threshold = confirm;
        }

        let parser = build(config, Vec::new())?;
        Ok(Self { config, parser })
    }

    /// Replace the client registry with `(id, name)` pairs
    fn set_clients(&mut self, clients: Vec<(i64, String)>) -> PyResult<()> {
        let clients = clients
            .into_iter()
            .map(|(id, name)| Client::new(id, name))
            .collect();
        self.parser = build(self.config, clients)?;
        Ok(())
    }

    /// Parse a sentence; entities are returned as a JSON string
    fn parse<'py>(&self, text: &str, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let result = py.allow_threads(|| self.parser.parse(text));

        let dict = PyDict::new_bound(py);
        dict.set_item("intent", result.intent.as_str())?;
        dict.set_item("confidence", result.confidence)?;
        dict.set_item("original_text", &result.original_text)?;
        let entities_json = serde_json::to_string(&result.entities).map_err(|e| {
            PyValueError::new_err(format!("Failed to serialize entities: {}", e))
        })?;
        dict.set_item("entities", entities_json)?;
        Ok(dict)
    }

    #[getter]
    fn auto_threshold(&self) -> f64 {
        self.config.auto_threshold
    }

    #[getter]
    fn confirm_threshold(&self) -> f64 {
        self.config.confirm_threshold
    }
}
