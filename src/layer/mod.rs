//! Layer Model Module
//!
//! Layer nodes and their three faces:
//! - the node itself: name, bases, identity, resolution order
//! - the stacked resource store shared along the resolution order
//! - the lifecycle hook surface (`Fixture`) and suite metadata

mod fixture;
mod node;
mod resources;
mod suite;

pub use fixture::{Fixture, HookError, HookPhase, HookResult, NoopFixture, TraceFixture};
pub use node::{Layer, LayerBuilder, LayerState};
pub use resources::Value;
pub use suite::Suite;
