//! Run Orchestration
//!
//! Sequential, single-threaded driving of layer lifecycle hooks in the
//! orders the resolution order dictates: bases fully set up before their
//! dependents, dependents fully torn down before their bases. Whole-run
//! setup happens at most once per layer; teardown is terminal.
//!
//! Setup aborts on the first failing hook (dependents of a broken base are
//! never attempted). Teardown is best-effort: every layer that completed
//! setup gets its teardown attempted even when an earlier teardown failed,
//! and the first failure is reported afterwards.

use log::debug;

use crate::error::{Result, StrataError};
use crate::layer::{HookPhase, Layer, LayerState};

/// Drives lifecycle hooks for a test run.
///
/// Tracks which layers have been set up, in setup order, so that whole-run
/// teardown can unwind them dependent-first regardless of how many distinct
/// layers the run touched.
#[derive(Default)]
pub struct Runner {
    /// Layers that completed `set_up`, base-first.
    active: Vec<Layer>,
}

impl Runner {
    pub fn new() -> Self {
        Runner { active: Vec::new() }
    }

    /// Layers currently set up, in setup (base-first) order.
    pub fn active(&self) -> &[Layer] {
        &self.active
    }

    /// Run whole-run setup for `layer` and every base not yet set up,
    /// bases first.
    ///
    /// # Errors
    /// Fails on the first hook error, leaving layers that did complete
    /// setup active (tear them down with [`Runner::tear_down`]). Fails with
    /// `LayerRetired` if any required layer has already been torn down.
    pub fn set_up(&mut self, layer: &Layer) -> Result<()> {
        for l in layer.resolution_order().iter().rev() {
            match l.state() {
                LayerState::SetUp => continue,
                LayerState::TornDown => {
                    return Err(StrataError::LayerRetired {
                        layer: l.to_string(),
                    })
                }
                LayerState::Unborn => {}
            }

            debug!("setting up {}", l);
            l.fixture()
                .set_up(l)
                .map_err(|source| StrataError::HookFailed {
                    phase: HookPhase::SetUp,
                    layer: l.to_string(),
                    source,
                })?;
            l.set_state(LayerState::SetUp);
            self.active.push(l.clone());
        }
        Ok(())
    }

    /// Run whole-run teardown for every active layer, dependents first.
    ///
    /// Best-effort: a failing hook does not stop the remaining teardowns.
    ///
    /// # Errors
    /// Reports the first hook failure after all teardowns were attempted.
    pub fn tear_down(&mut self) -> Result<()> {
        let mut first_error = None;

        while let Some(l) = self.active.pop() {
            debug!("tearing down {}", l);
            l.set_state(LayerState::TornDown);
            if let Err(source) = l.fixture().tear_down(&l) {
                first_error.get_or_insert(StrataError::HookFailed {
                    phase: HookPhase::TearDown,
                    layer: l.to_string(),
                    source,
                });
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Run per-test setup for `layer` and all its bases, bases first.
    ///
    /// # Errors
    /// Fails with `NotSetUp` if any layer in the resolution order has not
    /// completed whole-run setup; aborts on the first failing hook.
    pub fn test_set_up(&self, layer: &Layer) -> Result<()> {
        let order = layer.resolution_order();
        for l in order.iter().rev() {
            if l.state() != LayerState::SetUp {
                return Err(StrataError::NotSetUp {
                    layer: l.to_string(),
                });
            }
            l.fixture()
                .test_set_up(l)
                .map_err(|source| StrataError::HookFailed {
                    phase: HookPhase::TestSetUp,
                    layer: l.to_string(),
                    source,
                })?;
        }
        Ok(())
    }

    /// Run per-test teardown for `layer` and all its bases, dependents
    /// first. Best-effort like [`Runner::tear_down`].
    pub fn test_tear_down(&self, layer: &Layer) -> Result<()> {
        let mut first_error = None;

        for l in layer.resolution_order() {
            if let Err(source) = l.fixture().test_tear_down(&l) {
                first_error.get_or_insert(StrataError::HookFailed {
                    phase: HookPhase::TestTearDown,
                    layer: l.to_string(),
                    source,
                });
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
