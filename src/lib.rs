//! hasprobe - Lazy, memoized runtime capability detection.
//!
//! A host exposes a large and unstable set of optional features. Callers
//! register named probes once and then ask "is capability X available
//! here?" as often as they like; each probe runs at most once, on first use.
//!
//! # Modules
//!
//! - [`store`] - Probe registration, lazy evaluation and memoization
//! - [`host`] - Explicit model of the host environment and host-type checks
//! - [`style`] - Vendor-prefixed style property resolution
//! - [`builtin`] - Core probes shipped with the registry
//! - [`config`] - Configuration loading and schema
//! - [`logging`] - Tracing subscriber setup
//! - [`error`] - Error types and result aliases
//!
//! # Example
//!
//! ```
//! use hasprobe::host::{HostEnvironment, HostObject};
//! use hasprobe::store::ProbeStore;
//!
//! let env = HostEnvironment::presentational(
//!     HostObject::new(),
//!     HostObject::new().with_function("createElement"),
//! )
//! .with_element(HostObject::new(), HostObject::new().with("WebkitTransform", ""));
//!
//! let store = ProbeStore::new(env);
//! store.add("css-transform", |ctx| Ok(ctx.style_supported("transform")?));
//! store.add_value("javascript", true);
//!
//! assert!(store.has("css-transform").unwrap());
//! assert!(store.has("javascript").unwrap());
//! assert!(!store.has("never-registered").unwrap());
//! ```

pub mod builtin;
pub mod config;
pub mod error;
pub mod host;
pub mod logging;
pub mod store;
pub mod style;

pub use error::{HasprobeError, Result};
pub use store::{CapValue, Outcome, ProbeContext, ProbeStore, Registration};
