//! Lifecycle hooks
//!
//! A `Fixture` supplies the behavior behind a layer's four lifecycle hook
//! points. Every hook is a no-op by default; concrete fixtures override the
//! ones they need and communicate with dependent layers exclusively through
//! the resource store on the layer handle they receive.
//!
//! Hook failures propagate to the runner unmodified apart from being tagged
//! with the layer and phase; whether to abort the whole run or just the
//! affected test is the runner's decision, not this crate's.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::layer::node::Layer;

/// Error type for fixture hooks: anything the fixture's own collaborators
/// produce, boxed and passed through unwrapped.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for fixture hooks.
pub type HookResult = std::result::Result<(), HookError>;

/// The four lifecycle hook points of a layer.
///
/// Whole-run hooks (`set_up`/`tear_down`) run at most once per run and hold
/// expensive shared state: a database, a server process, a configuration
/// tree. Per-test hooks (`test_set_up`/`test_tear_down`) run around every
/// individual test that uses the layer: a fresh transaction, a cleared cache.
pub trait Fixture {
    /// Whole-run setup. Bases are guaranteed to be fully set up already.
    fn set_up(&self, layer: &Layer) -> HookResult {
        let _ = layer;
        Ok(())
    }

    /// Whole-run teardown. Runs before any of this layer's bases tear down.
    fn tear_down(&self, layer: &Layer) -> HookResult {
        let _ = layer;
        Ok(())
    }

    /// Per-test setup, base layers first.
    fn test_set_up(&self, layer: &Layer) -> HookResult {
        let _ = layer;
        Ok(())
    }

    /// Per-test teardown, dependent layers first.
    fn test_tear_down(&self, layer: &Layer) -> HookResult {
        let _ = layer;
        Ok(())
    }
}

/// The default fixture: all four hooks are no-ops.
pub struct NoopFixture;

impl Fixture for NoopFixture {}

/// Identifies which hook failed in lifecycle error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookPhase {
    SetUp,
    TearDown,
    TestSetUp,
    TestTearDown,
}

impl fmt::Display for HookPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookPhase::SetUp => write!(f, "setUp"),
            HookPhase::TearDown => write!(f, "tearDown"),
            HookPhase::TestSetUp => write!(f, "testSetUp"),
            HookPhase::TestTearDown => write!(f, "testTearDown"),
        }
    }
}

/// A fixture that records every hook invocation into a shared log.
///
/// Clones share the same log, so one `TraceFixture` per layer (all cloned
/// from a common original, or built over a shared log handle) yields a
/// single interleaved trace of the whole run. Used by the `simulate` CLI
/// command and handy in tests asserting lifecycle ordering.
#[derive(Clone)]
pub struct TraceFixture {
    log: Rc<RefCell<Vec<String>>>,
}

impl TraceFixture {
    pub fn new() -> Self {
        TraceFixture {
            log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Build a fixture recording into an existing log.
    pub fn with_log(log: Rc<RefCell<Vec<String>>>) -> Self {
        TraceFixture { log }
    }

    /// Snapshot of the recorded invocations, oldest first.
    pub fn entries(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    /// The shared log handle.
    pub fn log(&self) -> Rc<RefCell<Vec<String>>> {
        Rc::clone(&self.log)
    }

    fn record(&self, layer: &Layer, phase: HookPhase) {
        self.log
            .borrow_mut()
            .push(format!("{}.{}", layer.name(), phase));
    }
}

impl Default for TraceFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture for TraceFixture {
    fn set_up(&self, layer: &Layer) -> HookResult {
        self.record(layer, HookPhase::SetUp);
        Ok(())
    }

    fn tear_down(&self, layer: &Layer) -> HookResult {
        self.record(layer, HookPhase::TearDown);
        Ok(())
    }

    fn test_set_up(&self, layer: &Layer) -> HookResult {
        self.record(layer, HookPhase::TestSetUp);
        Ok(())
    }

    fn test_tear_down(&self, layer: &Layer) -> HookResult {
        self.record(layer, HookPhase::TestTearDown);
        Ok(())
    }
}
