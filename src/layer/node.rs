//! Layer nodes
//!
//! A `Layer` is a cheap, clonable handle onto a shared node. Identity is
//! pointer identity: two handles are the same layer exactly when they point
//! at the same node, regardless of name. Names exist for diagnostics and
//! tooling output, not for identity.
//!
//! Base lists are fixed at construction, which makes cyclic graphs
//! unconstructible: a layer can only name bases that already exist. The only
//! way linearization can fail is a genuine ordering contradiction between
//! declared bases, and that surfaces from [`LayerBuilder::build`].

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::error::{Result, StrataError};
use crate::layer::fixture::{Fixture, NoopFixture};
use crate::layer::resources::ResourceStack;
use crate::order;

/// Whole-run lifecycle state of a layer.
///
/// A layer is set up at most once and torn down at most once per run;
/// `TornDown` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayerState {
    /// Created but never set up (default state)
    #[default]
    Unborn,
    /// Whole-run setup has completed
    SetUp,
    /// Whole-run teardown has run; the layer is retired
    TornDown,
}

pub(crate) struct LayerNode {
    name: String,
    module: Option<String>,
    bases: Vec<Layer>,
    /// Resolution order minus the layer itself, computed once at build time.
    order_tail: Vec<Layer>,
    pub(crate) resources: RefCell<HashMap<String, ResourceStack>>,
    pub(crate) state: Cell<LayerState>,
    fixture: Rc<dyn Fixture>,
}

/// A named unit of composable test-fixture setup/teardown.
///
/// Layers declare dependencies by listing other layers as bases; the engine
/// derives a deterministic resolution order from the resulting graph and
/// uses it for resource lookup and lifecycle sequencing.
#[derive(Clone)]
pub struct Layer {
    pub(crate) node: Rc<LayerNode>,
}

impl Layer {
    /// Create a root layer with no bases and the default (no-op) fixture.
    pub fn new(name: impl Into<String>) -> Self {
        Layer {
            node: Rc::new(LayerNode {
                name: name.into(),
                module: None,
                bases: Vec::new(),
                order_tail: Vec::new(),
                resources: RefCell::new(HashMap::new()),
                state: Cell::new(LayerState::Unborn),
                fixture: Rc::new(NoopFixture),
            }),
        }
    }

    /// Start building a layer with bases, a module label, or a fixture.
    pub fn builder(name: impl Into<String>) -> LayerBuilder {
        LayerBuilder {
            name: name.into(),
            module: None,
            bases: Vec::new(),
            fixture: Rc::new(NoopFixture),
        }
    }

    pub fn name(&self) -> &str {
        &self.node.name
    }

    pub fn module(&self) -> Option<&str> {
        self.node.module.as_deref()
    }

    /// The direct bases, in declaration order.
    pub fn bases(&self) -> &[Layer] {
        &self.node.bases
    }

    /// Current whole-run lifecycle state.
    pub fn state(&self) -> LayerState {
        self.node.state.get()
    }

    pub(crate) fn set_state(&self, state: LayerState) {
        self.node.state.set(state);
    }

    pub(crate) fn fixture(&self) -> Rc<dyn Fixture> {
        Rc::clone(&self.node.fixture)
    }

    /// Whether two handles denote the same layer node.
    pub fn ptr_eq(&self, other: &Layer) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }

    /// The resolution order: this layer first, then every base (direct or
    /// transitive) exactly once, dependents always before their bases.
    ///
    /// The order is computed when the layer is built and is identical on
    /// every call.
    pub fn resolution_order(&self) -> Vec<Layer> {
        let mut order = Vec::with_capacity(self.node.order_tail.len() + 1);
        order.push(self.clone());
        order.extend(self.node.order_tail.iter().cloned());
        order
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.node.module {
            Some(module) => write!(f, "<Layer '{}.{}'>", module, self.node.name),
            None => write!(f, "<Layer '{}'>", self.node.name),
        }
    }
}

impl fmt::Debug for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl PartialEq for Layer {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Layer {}

/// Builder for layers with bases, a module label, or a custom fixture.
pub struct LayerBuilder {
    name: String,
    module: Option<String>,
    bases: Vec<Layer>,
    fixture: Rc<dyn Fixture>,
}

impl LayerBuilder {
    /// Set the module label used in diagnostics (`<Layer 'module.Name'>`).
    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    /// Append a direct base. Declaration order matters: earlier bases take
    /// precedence in resource lookup where the graph allows it.
    pub fn base(mut self, base: &Layer) -> Self {
        self.bases.push(base.clone());
        self
    }

    /// Append several direct bases in order.
    pub fn bases<'a>(mut self, bases: impl IntoIterator<Item = &'a Layer>) -> Self {
        self.bases.extend(bases.into_iter().cloned());
        self
    }

    /// Attach the fixture whose hooks run at this layer's lifecycle points.
    pub fn fixture(mut self, fixture: impl Fixture + 'static) -> Self {
        self.fixture = Rc::new(fixture);
        self
    }

    /// Build the layer, linearizing its bases.
    ///
    /// # Errors
    /// Returns `InconsistentHierarchy` if the declared base orderings
    /// contradict each other and no consistent resolution order exists.
    pub fn build(self) -> Result<Layer> {
        let order_tail = order::linearize_bases(&self.bases).ok_or_else(|| {
            StrataError::InconsistentHierarchy {
                layer: display_name(&self.module, &self.name),
            }
        })?;

        let layer = Layer {
            node: Rc::new(LayerNode {
                name: self.name,
                module: self.module,
                bases: self.bases,
                order_tail,
                resources: RefCell::new(HashMap::new()),
                state: Cell::new(LayerState::Unborn),
                fixture: self.fixture,
            }),
        };

        debug!(
            "resolution order for {}: [{}]",
            layer,
            layer
                .resolution_order()
                .iter()
                .map(|l| l.name())
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(layer)
    }
}

fn display_name(module: &Option<String>, name: &str) -> String {
    match module {
        Some(module) => format!("<Layer '{}.{}'>", module, name),
        None => format!("<Layer '{}'>", name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn names(layers: &[Layer]) -> Vec<&str> {
        layers.iter().map(|l| l.name()).collect()
    }

    #[test]
    fn test_root_layer_resolution_order_is_itself() {
        let a = Layer::new("A");
        let order = a.resolution_order();
        assert_eq!(order.len(), 1);
        assert!(order[0].ptr_eq(&a));
    }

    #[test]
    fn test_self_first_and_base_inclusion() {
        let a = Layer::new("A");
        let b = Layer::builder("B").base(&a).build().unwrap();
        let c = Layer::builder("C").base(&b).build().unwrap();

        let order = c.resolution_order();
        assert!(order[0].ptr_eq(&c));
        assert!(order.iter().any(|l| l.ptr_eq(&a)));
        assert!(order.iter().any(|l| l.ptr_eq(&b)));
        assert_eq!(names(&order), vec!["C", "B", "A"]);
    }

    #[test]
    fn test_direct_bases_keep_declaration_order() {
        let a = Layer::new("A");
        let b = Layer::new("B");
        let l = Layer::builder("L").base(&a).base(&b).build().unwrap();
        assert_eq!(names(&l.resolution_order()), vec!["L", "A", "B"]);
    }

    #[test]
    fn test_diamond_resolution_order() {
        let a = Layer::new("A");
        let b1 = Layer::builder("B1").base(&a).build().unwrap();
        let b2 = Layer::builder("B2").base(&a).build().unwrap();
        let d = Layer::builder("D").base(&b1).base(&b2).build().unwrap();
        assert_eq!(names(&d.resolution_order()), vec!["D", "B1", "B2", "A"]);
    }

    #[test]
    fn test_resolution_order_is_deterministic() {
        let a = Layer::new("A");
        let b1 = Layer::builder("B1").base(&a).build().unwrap();
        let b2 = Layer::builder("B2").base(&a).build().unwrap();
        let d = Layer::builder("D").base(&b1).base(&b2).build().unwrap();
        assert_eq!(d.resolution_order(), d.resolution_order());
    }

    #[test]
    fn test_monotonicity_respects_base_orders() {
        // L1 says A before B; a dependent of L1 must never say otherwise.
        let a = Layer::new("A");
        let b = Layer::new("B");
        let l1 = Layer::builder("L1").base(&a).base(&b).build().unwrap();
        let l3 = Layer::builder("L3").base(&l1).build().unwrap();

        let order = l3.resolution_order();
        let pos_a = order.iter().position(|l| l.ptr_eq(&a)).unwrap();
        let pos_b = order.iter().position(|l| l.ptr_eq(&b)).unwrap();
        assert!(pos_a < pos_b);
    }

    #[test]
    fn test_contradictory_base_orders_fail_to_build() {
        let a = Layer::new("A");
        let b = Layer::new("B");
        let l1 = Layer::builder("L1").base(&a).base(&b).build().unwrap();
        let l2 = Layer::builder("L2").base(&b).base(&a).build().unwrap();

        let result = Layer::builder("L3")
            .module("app")
            .base(&l1)
            .base(&l2)
            .build();
        match result {
            Err(StrataError::InconsistentHierarchy { layer }) => {
                assert_eq!(layer, "<Layer 'app.L3'>");
            }
            other => panic!("Expected InconsistentHierarchy, got {:?}", other.map(|l| l.to_string())),
        }
    }

    #[test]
    fn test_identity_is_pointer_identity() {
        let a1 = Layer::new("A");
        let a2 = Layer::new("A");
        assert_ne!(a1, a2);
        assert_eq!(a1, a1.clone());
    }

    #[test]
    fn test_initial_state_is_unborn() {
        assert_eq!(Layer::new("A").state(), LayerState::Unborn);
    }

    #[test_case(Some("app.fixtures"), "Database", "<Layer 'app.fixtures.Database'>" ; "with module")]
    #[test_case(None, "Database", "<Layer 'Database'>" ; "without module")]
    fn test_display(module: Option<&str>, name: &str, expected: &str) {
        let mut builder = Layer::builder(name);
        if let Some(module) = module {
            builder = builder.module(module);
        }
        let layer = builder.build().unwrap();
        assert_eq!(layer.to_string(), expected);
    }
}
