//! Capability records and registrations.

use super::context::ProbeContext;
use super::value::CapValue;

/// A deferred capability probe.
///
/// Runs at most once; it may query other capabilities through the context.
pub type ProbeFn = Box<dyn FnOnce(&ProbeContext<'_>) -> anyhow::Result<CapValue>>;

/// What to store under a capability name.
pub enum Registration {
    /// A probe evaluated lazily (or immediately, if requested).
    Probe(ProbeFn),
    /// An already-resolved value.
    Value(CapValue),
}

impl Registration {
    /// Wrap a probe closure.
    pub fn probe<F, V>(probe: F) -> Self
    where
        F: FnOnce(&ProbeContext<'_>) -> anyhow::Result<V> + 'static,
        V: Into<CapValue>,
    {
        Registration::Probe(Box::new(move |ctx: &ProbeContext<'_>| {
            probe(ctx).map(Into::into)
        }))
    }

    /// Wrap a literal value.
    pub fn value(value: impl Into<CapValue>) -> Self {
        Registration::Value(value.into())
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Registration::Probe(_) => f.write_str("Registration::Probe(..)"),
            Registration::Value(v) => write!(f, "Registration::Value({})", v),
        }
    }
}

impl From<CapValue> for Registration {
    fn from(value: CapValue) -> Self {
        Registration::Value(value)
    }
}

impl From<bool> for Registration {
    fn from(b: bool) -> Self {
        Registration::Value(b.into())
    }
}

impl From<serde_json::Value> for Registration {
    fn from(value: serde_json::Value) -> Self {
        Registration::Value(value.into())
    }
}

/// Stored state for one capability name.
pub(crate) enum Record {
    Pending(ProbeFn),
    /// The probe is running; the token identifies this evaluation.
    Evaluating(u64),
    Resolved(CapValue),
    Failed(String),
}

impl Record {
    /// Move a pending probe out, leaving the record marked as evaluating.
    pub(crate) fn begin(&mut self, token: u64) -> Option<ProbeFn> {
        if !matches!(self, Record::Pending(_)) {
            return None;
        }
        match std::mem::replace(self, Record::Evaluating(token)) {
            Record::Pending(probe) => Some(probe),
            _ => None,
        }
    }

    pub(crate) fn state(&self) -> RecordState {
        match self {
            Record::Pending(_) => RecordState::Pending,
            Record::Evaluating(_) => RecordState::Evaluating,
            Record::Resolved(_) => RecordState::Resolved,
            Record::Failed(_) => RecordState::Failed,
        }
    }
}

/// Observable lifecycle state of a capability record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    /// Registered, probe not yet run.
    Pending,
    /// Probe currently running.
    Evaluating,
    /// Probe ran (or a literal was registered); value memoized.
    Resolved,
    /// Probe ran and failed; the failure is memoized.
    Failed,
}
