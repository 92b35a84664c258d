//! Suite attachment
//!
//! Pure metadata: stamping a layer reference onto a collection of tests so
//! a runner knows which layer to activate before running them. No behavior
//! lives here.

use crate::layer::node::Layer;

/// A named collection of tests plus the layer they require, if any.
#[derive(Clone, Debug)]
pub struct Suite {
    name: String,
    tests: Vec<String>,
    layer: Option<Layer>,
}

impl Suite {
    pub fn new(
        name: impl Into<String>,
        tests: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Suite {
            name: name.into(),
            tests: tests.into_iter().map(Into::into).collect(),
            layer: None,
        }
    }

    /// Stamp a layer onto this suite. A later call replaces an earlier one.
    pub fn attach_layer(&mut self, layer: &Layer) {
        self.layer = Some(layer.clone());
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tests(&self) -> &[String] {
        &self.tests
    }

    /// The layer these tests need, if one has been attached.
    pub fn layer(&self) -> Option<&Layer> {
        self.layer.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suite_starts_without_layer() {
        let suite = Suite::new("unit", ["test_one", "test_two"]);
        assert_eq!(suite.name(), "unit");
        assert_eq!(suite.tests(), ["test_one", "test_two"]);
        assert!(suite.layer().is_none());
    }

    #[test]
    fn test_attach_layer_stamps_reference() {
        let layer = Layer::new("Database");
        let mut suite = Suite::new("db", ["test_query"]);
        suite.attach_layer(&layer);
        assert!(suite.layer().unwrap().ptr_eq(&layer));
    }
}
