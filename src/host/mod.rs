//! Explicit model of the host environment probes inspect.
//!
//! # Modules
//!
//! - [`value`] - Host values and type categories
//! - [`object`] - Property bags for host objects
//! - [`element`] - The shared scratch element
//! - [`environment`] - Global, document and element surfaces
//! - [`detection`] - Host-type detection and declarative checks

pub mod detection;
pub mod element;
pub mod environment;
pub mod object;
pub mod value;

pub use detection::{is_host_like, is_host_type, HostCheck};
pub use element::{ScratchElement, ScratchNode};
pub use environment::HostEnvironment;
pub use object::HostObject;
pub use value::{HostValue, TypeCategory};
