//! Typed dies, laid out like the Kubernetes API groups in [`k8s_openapi`].

pub mod core;
pub mod meta;
pub mod resource;

#[cfg(feature = "apps")]
pub mod apps;
#[cfg(feature = "flowcontrol")]
pub mod flowcontrol;
