#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(coverage_nightly, coverage(off))] // This is all test code, no need to test it.

//! Private helpers for testing and examples in Folo packages.
//!
//! The helpers focus on verifying value lifetimes inside containers:
//!
//! * [`LiveTracker`] and [`Tracked`] count how many tracked values are alive, which exposes
//!   leaks (count too high after cleanup) and double drops (count would go negative).
//! * [`Fuse`] panics on a predetermined invocation, for simulating constructors that fail
//!   partway through a multi-value operation.
//! * [`Volatile`] combines the two: a tracked value whose `Clone` and `Default` tick a fuse.

mod fuse;
mod live_tracker;
mod volatile;

pub use fuse::*;
pub use live_tracker::*;
pub use volatile::*;
