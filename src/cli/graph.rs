//! Graph description files
//!
//! A JSON description of a layer graph, for driving the CLI without writing
//! code. Bases refer to earlier entries by name:
//!
//! ```json
//! {
//!   "layers": [
//!     {"name": "Database", "module": "app.fixtures"},
//!     {"name": "Server", "bases": ["Database"]}
//!   ]
//! }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StrataError};
use crate::layer::{Fixture, Layer, NoopFixture};

/// A layer graph as described on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSpec {
    pub layers: Vec<LayerSpec>,
}

/// One layer entry in a graph description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerSpec {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,

    /// Names of earlier entries this layer extends, in precedence order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bases: Vec<String>,
}

impl GraphSpec {
    /// Load a graph description from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }
}

/// Build the described layers with no-op fixtures.
pub fn build_graph(spec: &GraphSpec) -> Result<HashMap<String, Layer>> {
    build_graph_with(spec, |_| NoopFixture)
}

/// Build the described layers, asking `fixture_for` for each layer's
/// fixture by name.
///
/// # Errors
/// Fails on duplicate layer names, on a base name with no earlier entry,
/// and on an inconsistent hierarchy.
pub fn build_graph_with<F, X>(spec: &GraphSpec, mut fixture_for: F) -> Result<HashMap<String, Layer>>
where
    F: FnMut(&str) -> X,
    X: Fixture + 'static,
{
    let mut layers: HashMap<String, Layer> = HashMap::with_capacity(spec.layers.len());

    for entry in &spec.layers {
        if layers.contains_key(&entry.name) {
            return Err(StrataError::DuplicateLayer {
                name: entry.name.clone(),
            });
        }

        let mut builder = Layer::builder(&entry.name).fixture(fixture_for(&entry.name));
        if let Some(module) = &entry.module {
            builder = builder.module(module);
        }
        for base_name in &entry.bases {
            let base = layers
                .get(base_name)
                .ok_or_else(|| StrataError::UnknownBase {
                    layer: entry.name.clone(),
                    base: base_name.clone(),
                })?;
            builder = builder.base(base);
        }

        layers.insert(entry.name.clone(), builder.build()?);
    }

    Ok(layers)
}

/// Look up a layer built from a graph description by name.
pub fn find_layer<'a>(layers: &'a HashMap<String, Layer>, name: &str) -> Result<&'a Layer> {
    layers.get(name).ok_or_else(|| StrataError::UnknownLayer {
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::tempdir;

    const DIAMOND: &str = r#"{
        "layers": [
            {"name": "A", "module": "app"},
            {"name": "B1", "bases": ["A"]},
            {"name": "B2", "bases": ["A"]},
            {"name": "D", "bases": ["B1", "B2"]}
        ]
    }"#;

    fn diamond_spec() -> GraphSpec {
        serde_json::from_str(DIAMOND).unwrap()
    }

    #[test]
    fn test_build_graph_resolves_bases_by_name() {
        let layers = build_graph(&diamond_spec()).unwrap();
        let d = find_layer(&layers, "D").unwrap();

        let order = d.resolution_order();
        let names: Vec<&str> = order.iter().map(|l| l.name()).collect();
        assert_eq!(names, vec!["D", "B1", "B2", "A"]);
        assert_eq!(layers["A"].to_string(), "<Layer 'app.A'>");
    }

    #[test]
    fn test_unknown_base_is_an_error() {
        let spec: GraphSpec = serde_json::from_str(
            r#"{"layers": [{"name": "L", "bases": ["Missing"]}]}"#,
        )
        .unwrap();
        assert!(matches!(
            build_graph(&spec),
            Err(StrataError::UnknownBase { .. })
        ));
    }

    #[test]
    fn test_duplicate_name_is_an_error() {
        let spec: GraphSpec =
            serde_json::from_str(r#"{"layers": [{"name": "L"}, {"name": "L"}]}"#).unwrap();
        assert!(matches!(
            build_graph(&spec),
            Err(StrataError::DuplicateLayer { .. })
        ));
    }

    #[test]
    fn test_unknown_layer_lookup_fails() {
        let layers = build_graph(&diamond_spec()).unwrap();
        assert!(matches!(
            find_layer(&layers, "Nope"),
            Err(StrataError::UnknownLayer { .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("graph.json");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(DIAMOND.as_bytes()).unwrap();

        let spec = GraphSpec::load(&path).unwrap();
        assert_eq!(spec.layers.len(), 4);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = GraphSpec::load(Path::new("/nonexistent/graph.json"));
        assert!(matches!(result, Err(StrataError::Io(_))));
    }
}
