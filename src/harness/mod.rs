//! Workload harness — everything around the core that drives a run.
//!
//! The harness places orders on a timed cadence, schedules randomized
//! pickups, and afterwards replays the kitchen's action log into the
//! submission document. The core never sees any of this; it only ever
//! executes one `place` or `pickup` at a time behind the shared guard.

pub mod driver;
pub mod source;

pub use driver::{run, DriverReport};
pub use source::{load_orders, synthetic_orders};
