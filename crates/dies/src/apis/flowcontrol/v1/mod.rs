//! Dies for the `flowcontrol.apiserver.k8s.io/v1` group.

mod priority_level_configuration;

pub use priority_level_configuration::*;
