//! Critical Path Method over a sequenced activity network.
//!
//! A forward pass computes earliest times, a backward pass computes latest
//! times from the sink's earliest finish, and the extractor derives slack and
//! one canonical zero-slack chain from source to sink.

mod calculation;
mod extraction;
mod types;

pub use calculation::{backward_pass, forward_pass};
pub use extraction::{canonical_critical_path, compute_slack};
pub use types::TaskTiming;
