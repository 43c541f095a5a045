//! Immutable builders ("dies") for Kubernetes resources.
//!
//! Every die wraps exactly one [`k8s_openapi`] record. Setters never modify the die they are
//! called on, they return a new die holding the updated record. Start from the shared blank of a
//! type and release the record when done:
//!
//! ```
//! use dies::apis::core::v1::POD_SPEC_BLANK;
//!
//! let spec = POD_SPEC_BLANK
//!     .service_account_name("web")
//!     .container_die("web", |d| {
//!         d.image("nginx:1.27");
//!     })
//!     .die_release();
//!
//! assert_eq!(spec.containers[0].name, "web");
//! ```
//!
//! See [`die`] for the generic mechanism and its mutability rules.
//!
//! ## Crate Features
//!
//! - `default` enables the `full` feature.
//! - `full` enables all available API groups.
//! - `apps` enables the dies for the `apps/v1` group.
//! - `flowcontrol` enables the dies for the `flowcontrol.apiserver.k8s.io/v1` group.

pub mod apis;
pub mod die;
pub mod logging;
pub mod quantity;

mod macros;

// External re-exports
pub use k8s_openapi;
