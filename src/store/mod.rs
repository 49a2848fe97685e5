//! Capability registration, lazy evaluation and memoization.
//!
//! # Modules
//!
//! - [`registry`] - The [`ProbeStore`] engine
//! - [`record`] - Registrations and record states
//! - [`context`] - The ambient context passed to probes
//! - [`value`] - Capability result values
//! - [`report`] - Enumeration outcomes and audit reports

pub mod context;
pub mod record;
pub mod registry;
pub mod report;
pub mod value;

pub use context::ProbeContext;
pub use record::{ProbeFn, RecordState, Registration};
pub use registry::ProbeStore;
pub use report::{AuditReport, Outcome};
pub use value::CapValue;
