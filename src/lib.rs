//! Strata - Composable Test-Fixture Layers
//!
//! Strata lets independently authored "layers" — units of expensive, shared
//! test setup such as a database, a server, or a configuration tree —
//! declare dependencies on other layers, and guarantees a deterministic,
//! dependency-consistent order in which those layers are set up, torn down,
//! and have resources shared or shadowed between them.
//!
//! # Architecture
//!
//! Three cooperating pieces:
//! - Linearization: a C3-style merge turns a layer's base graph into a
//!   single resolution order (self first, dependents before bases)
//! - Resource store: per-key shadow stacks attached to the defining layer,
//!   so a derived layer can override a base's value for its own lifetime
//!   and restore it on teardown, independently of sibling branches
//! - Runner: drives the four lifecycle hooks (whole-run and per-test
//!   setup/teardown) in resolution-order-derived sequence
//!
//! # Example
//!
//! ```
//! use strata::{Layer, Runner};
//!
//! let database = Layer::new("Database");
//! let server = Layer::builder("Server").base(&database).build()?;
//!
//! database.set("dsn", String::from("postgres://localhost/test"));
//! assert!(server.contains("dsn"));
//!
//! let mut runner = Runner::new();
//! runner.set_up(&server)?;   // Database first, then Server
//! runner.tear_down()?;       // Server first, then Database
//! # Ok::<(), strata::StrataError>(())
//! ```

pub mod cli;
pub mod error;
pub mod layer;
pub mod runner;

mod order;

pub use error::{Result, StrataError};
pub use layer::{
    Fixture, HookError, HookPhase, HookResult, Layer, LayerBuilder, LayerState, NoopFixture,
    Suite, TraceFixture, Value,
};
pub use runner::Runner;
