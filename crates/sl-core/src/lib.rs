//! sl-core: stable foundation for sonolumi.
//!
//! Contains:
//! - units (uom SI types + constructors in the units bubble parameters are quoted in)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)
//! - timing (opt-in wall-clock timers)

pub mod error;
pub mod numeric;
pub mod timing;
pub mod units;

pub use error::{SlError, SlResult};
pub use numeric::*;
pub use units::*;
