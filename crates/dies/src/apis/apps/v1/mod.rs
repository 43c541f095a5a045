//! Dies for the `apps/v1` group.

mod stateful_set;

pub use stateful_set::*;
