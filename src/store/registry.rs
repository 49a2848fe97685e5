//! The probe store: named capability registration, lazy evaluation and
//! memoization.
//!
//! Each capability name maps to one record. A record starts out pending (a
//! probe that has not run) or resolved (a literal value), and a pending
//! record is evaluated the first time it is queried. After that its value,
//! or its failure, is returned for the lifetime of the store.
//!
//! # Example
//!
//! ```
//! use hasprobe::host::{HostEnvironment, HostObject};
//! use hasprobe::store::ProbeStore;
//!
//! let store = ProbeStore::new(HostEnvironment::headless(
//!     HostObject::new().with("JSON", HostObject::new()),
//! ));
//! store.add("json", |ctx| Ok(hasprobe::host::is_host_type(ctx.global(), "JSON")));
//! store.add("json-parse", |ctx| Ok(ctx.has("json")?));
//!
//! assert!(store.has("json-parse").unwrap());
//! assert!(store.query("never-registered").unwrap().is_none());
//! ```
//!
//! # Threading
//!
//! The store is single-threaded (`!Sync`). Its one critical section is the
//! pending -> evaluating -> resolved transition in [`ProbeStore::query`];
//! a concurrent variant must make that transition exclusive per name to keep
//! the at-most-once guarantee.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};

use tracing::{debug, trace, warn};

use super::context::ProbeContext;
use super::record::{ProbeFn, Record, RecordState, Registration};
use super::report::{AuditReport, Outcome};
use super::value::CapValue;
use crate::error::{HasprobeError, Result};
use crate::host::{HostEnvironment, ScratchElement};
use crate::style::VendorResolver;

/// Registry of capability probes and their memoized results.
pub struct ProbeStore {
    records: RefCell<HashMap<String, Record>>,
    environment: HostEnvironment,
    pub(crate) scratch: Option<RefCell<ScratchElement>>,
    resolver: VendorResolver,
    next_token: Cell<u64>,
}

impl ProbeStore {
    /// Create an empty store probing the given host.
    ///
    /// The scratch element exists only if the host document can create
    /// elements.
    pub fn new(environment: HostEnvironment) -> Self {
        let scratch = environment.create_scratch_element().map(RefCell::new);
        Self {
            records: RefCell::new(HashMap::new()),
            environment,
            scratch,
            resolver: VendorResolver::standard(),
            next_token: Cell::new(0),
        }
    }

    pub fn environment(&self) -> &HostEnvironment {
        &self.environment
    }

    pub fn resolver(&self) -> VendorResolver {
        self.resolver
    }

    /// Insert or overwrite the record for `name`.
    ///
    /// Literal values are stored as resolved. A probe is stored pending,
    /// or run immediately when `evaluate_now` is set; an immediate probe
    /// that fails does not fail registration, its failure is memoized and
    /// reported by the next [`query`](Self::query).
    pub fn register(
        &self,
        name: impl Into<String>,
        registration: impl Into<Registration>,
        evaluate_now: bool,
    ) {
        let name = name.into();
        match registration.into() {
            Registration::Value(value) => {
                debug!("Registering literal capability '{}' = {}", name, value);
                self.records.borrow_mut().insert(name, Record::Resolved(value));
            }
            Registration::Probe(probe) if evaluate_now => {
                let token = self.issue_token();
                self.records
                    .borrow_mut()
                    .insert(name.clone(), Record::Evaluating(token));
                if let Err(e) = self.run(&name, token, probe) {
                    warn!("Immediate probe '{}' failed: {}", name, e);
                }
            }
            Registration::Probe(probe) => {
                self.records.borrow_mut().insert(name, Record::Pending(probe));
            }
        }
    }

    /// Register a probe evaluated on first query.
    pub fn add<F, V>(&self, name: impl Into<String>, probe: F)
    where
        F: FnOnce(&ProbeContext<'_>) -> anyhow::Result<V> + 'static,
        V: Into<CapValue>,
    {
        self.register(name, Registration::probe(probe), false);
    }

    /// Register a probe and evaluate it immediately.
    pub fn add_now<F, V>(&self, name: impl Into<String>, probe: F)
    where
        F: FnOnce(&ProbeContext<'_>) -> anyhow::Result<V> + 'static,
        V: Into<CapValue>,
    {
        self.register(name, Registration::probe(probe), true);
    }

    /// Register an already-known value.
    pub fn add_value(&self, name: impl Into<String>, value: impl Into<CapValue>) {
        self.register(name, Registration::value(value), false);
    }

    /// Look up a capability, running its probe on first use.
    ///
    /// Returns `Ok(None)` for names that were never registered. A failing
    /// probe yields [`HasprobeError::ProbeFailed`], now and on every later
    /// query of the same name.
    pub fn query(&self, name: &str) -> Result<Option<CapValue>> {
        let (token, probe) = {
            let mut records = self.records.borrow_mut();
            let Some(record) = records.get_mut(name) else {
                trace!("Capability '{}' is not registered", name);
                return Ok(None);
            };
            match record {
                Record::Resolved(value) => return Ok(Some(value.clone())),
                Record::Failed(message) => {
                    return Err(HasprobeError::ProbeFailed {
                        name: name.to_string(),
                        message: message.clone(),
                    })
                }
                Record::Evaluating(_) => {
                    return Err(HasprobeError::CircularProbe {
                        name: name.to_string(),
                    })
                }
                Record::Pending(_) => {}
            }
            let token = self.issue_token();
            match record.begin(token) {
                Some(probe) => (token, probe),
                None => return Ok(None),
            }
        };

        self.run(name, token, probe).map(Some)
    }

    /// Whether a capability is registered and its value is truthy.
    pub fn has(&self, name: &str) -> Result<bool> {
        Ok(self.query(name)?.is_some_and(|value| value.is_truthy()))
    }

    /// Force every registered probe and snapshot all values.
    ///
    /// Failures are captured per name as [`Outcome::Error`] so one broken
    /// probe cannot hide the others.
    pub fn enumerate_all(&self) -> BTreeMap<String, Outcome> {
        let mut results = BTreeMap::new();
        for name in self.names() {
            match self.query(&name) {
                Ok(Some(value)) => {
                    results.insert(name, Outcome::Value(value));
                }
                // Removed by another probe while enumerating.
                Ok(None) => {}
                Err(e) => {
                    warn!("Capability '{}' failed during enumeration: {}", name, e);
                    results.insert(name, Outcome::from_error(&e));
                }
            }
        }
        results
    }

    /// [`enumerate_all`](Self::enumerate_all), stamped with the current time.
    pub fn audit(&self) -> AuditReport {
        AuditReport::new(self.enumerate_all())
    }

    /// Remove all children from the scratch element.
    ///
    /// Does nothing in non-presentational hosts, or while a probe holds the
    /// element.
    pub fn reset_scratch_element(&self) {
        let Some(cell) = &self.scratch else {
            return;
        };
        match cell.try_borrow_mut() {
            Ok(mut element) => {
                element.clear_children();
            }
            Err(_) => warn!("Scratch element is in use; not resetting"),
        }
    }

    /// A copy of the scratch element's current state.
    pub fn scratch_element(&self) -> Option<ScratchElement> {
        self.scratch
            .as_ref()
            .and_then(|cell| cell.try_borrow().ok().map(|el| el.clone()))
    }

    /// Discard every record.
    pub fn clear(&self) {
        debug!("Clearing all capability records");
        self.records.borrow_mut().clear();
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.borrow().contains_key(name)
    }

    /// Lifecycle state of a record, if registered.
    pub fn state(&self, name: &str) -> Option<RecordState> {
        self.records.borrow().get(name).map(Record::state)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.records.borrow().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    fn issue_token(&self) -> u64 {
        let token = self.next_token.get();
        self.next_token.set(token.wrapping_add(1));
        token
    }

    /// Run a probe with no store borrow held, then settle its record.
    ///
    /// The result is stored only if the record still belongs to this
    /// evaluation; a re-registration or clear in the meantime wins.
    fn run(&self, name: &str, token: u64, probe: ProbeFn) -> Result<CapValue> {
        debug!("Evaluating probe '{}'", name);
        let guard = EvaluationGuard {
            store: self,
            name,
            token,
        };
        let outcome = probe(&ProbeContext::new(self));
        std::mem::forget(guard);

        let mut records = self.records.borrow_mut();
        let current = matches!(records.get(name), Some(Record::Evaluating(t)) if *t == token);

        match outcome {
            Ok(value) => {
                if current {
                    records.insert(name.to_string(), Record::Resolved(value.clone()));
                }
                Ok(value)
            }
            Err(e) => {
                let message = format!("{:#}", e);
                if current {
                    records.insert(name.to_string(), Record::Failed(message.clone()));
                }
                Err(HasprobeError::ProbeFailed {
                    name: name.to_string(),
                    message,
                })
            }
        }
    }
}

/// Marks an evaluation as failed if its probe unwinds, so the record does
/// not stay `Evaluating` and report later queries as circular.
struct EvaluationGuard<'a> {
    store: &'a ProbeStore,
    name: &'a str,
    token: u64,
}

impl Drop for EvaluationGuard<'_> {
    fn drop(&mut self) {
        let Ok(mut records) = self.store.records.try_borrow_mut() else {
            return;
        };
        if matches!(records.get(self.name), Some(Record::Evaluating(t)) if *t == self.token) {
            warn!("Probe '{}' panicked", self.name);
            records.insert(
                self.name.to_string(),
                Record::Failed(PANICKED_MESSAGE.to_string()),
            );
        }
    }
}

const PANICKED_MESSAGE: &str = "probe panicked";

impl Default for ProbeStore {
    fn default() -> Self {
        Self::new(HostEnvironment::default())
    }
}

impl std::fmt::Debug for ProbeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let records = self.records.borrow();
        let mut states: Vec<(&String, RecordState)> =
            records.iter().map(|(name, r)| (name, r.state())).collect();
        states.sort_by(|a, b| a.0.cmp(b.0));
        f.debug_struct("ProbeStore")
            .field("records", &states)
            .field("presentational", &self.environment.is_presentational())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostObject, ScratchNode};
    use std::rc::Rc;

    fn counting_probe(
        counter: &Rc<Cell<u32>>,
        value: bool,
    ) -> impl FnOnce(&ProbeContext<'_>) -> anyhow::Result<bool> {
        let counter = Rc::clone(counter);
        move |_: &ProbeContext<'_>| {
            counter.set(counter.get() + 1);
            Ok(value)
        }
    }

    fn presentational_store() -> ProbeStore {
        ProbeStore::new(
            HostEnvironment::presentational(
                HostObject::new(),
                HostObject::new().with_function("createElement"),
            )
            .with_element(
                HostObject::new(),
                HostObject::new().with("WebkitTransform", ""),
            ),
        )
    }

    #[test]
    fn query_evaluates_probe_once() {
        let store = ProbeStore::default();
        let counter = Rc::new(Cell::new(0));
        store.add("x", counting_probe(&counter, true));

        assert_eq!(store.query("x").unwrap(), Some(CapValue::from(true)));
        assert_eq!(store.query("x").unwrap(), Some(CapValue::from(true)));
        assert_eq!(counter.get(), 1);
    }

    #[test]
    fn registration_is_lazy() {
        let store = ProbeStore::default();
        let counter = Rc::new(Cell::new(0));
        store.add("x", counting_probe(&counter, true));

        assert_eq!(counter.get(), 0);
        assert_eq!(store.state("x"), Some(RecordState::Pending));
    }

    #[test]
    fn add_now_evaluates_immediately() {
        let store = ProbeStore::default();
        let counter = Rc::new(Cell::new(0));
        store.add_now("x", counting_probe(&counter, false));

        assert_eq!(counter.get(), 1);
        assert_eq!(store.state("x"), Some(RecordState::Resolved));
        assert_eq!(store.query("x").unwrap(), Some(CapValue::from(false)));
        assert_eq!(counter.get(), 1);
    }

    #[test]
    fn failing_now_probe_surfaces_on_query() {
        let store = ProbeStore::default();
        store.add_now("broken", |_| -> anyhow::Result<bool> { anyhow::bail!("no host") });

        assert_eq!(store.state("broken"), Some(RecordState::Failed));
        let err = store.query("broken").unwrap_err();
        assert!(err.to_string().contains("no host"));
    }

    #[test]
    fn reregistration_overwrites_resolved_value() {
        let store = ProbeStore::default();
        store.add("x", |_| Ok(true));
        assert!(store.has("x").unwrap());

        store.add("x", |_| Ok(false));
        assert!(!store.has("x").unwrap());
    }

    #[test]
    fn unknown_name_is_none() {
        let store = ProbeStore::default();
        assert_eq!(store.query("does-not-exist").unwrap(), None);
        assert!(!store.has("does-not-exist").unwrap());
    }

    #[test]
    fn literal_registration_resolves_without_probe() {
        let store = ProbeStore::default();
        store.register("flag", true, false);
        assert_eq!(store.state("flag"), Some(RecordState::Resolved));
        assert_eq!(store.query("flag").unwrap(), Some(CapValue::from(true)));
    }

    #[test]
    fn literal_registration_ignores_evaluate_now() {
        let store = ProbeStore::default();
        store.register("flag", serde_json::json!({"level": 2}), true);
        assert!(store.has("flag").unwrap());
    }

    #[test]
    fn probe_failure_propagates_and_is_memoized() {
        let store = ProbeStore::default();
        let counter = Rc::new(Cell::new(0));
        let c = Rc::clone(&counter);
        store.add("broken", move |_| -> anyhow::Result<bool> {
            c.set(c.get() + 1);
            anyhow::bail!("getContext threw")
        });

        let first = store.query("broken").unwrap_err();
        let second = store.query("broken").unwrap_err();
        assert!(matches!(first, HasprobeError::ProbeFailed { .. }));
        assert_eq!(first.to_string(), second.to_string());
        assert_eq!(counter.get(), 1);
    }

    #[test]
    fn probes_can_query_dependencies() {
        let store = ProbeStore::default();
        let counter = Rc::new(Cell::new(0));
        store.add("native-map", counting_probe(&counter, true));
        store.add("es5-array", |ctx| Ok(ctx.has("native-map")?));

        assert!(store.has("es5-array").unwrap());
        assert!(store.has("native-map").unwrap());
        assert_eq!(counter.get(), 1);
    }

    #[test]
    fn unregistered_dependency_reads_as_none() {
        let store = ProbeStore::default();
        store.add("uses-later", |ctx| Ok(ctx.query("not-yet")?.is_none()));
        assert!(store.has("uses-later").unwrap());
    }

    #[test]
    fn self_query_is_circular() {
        let store = ProbeStore::default();
        store.add("loop", |ctx| Ok(ctx.has("loop")?));

        let err = store.query("loop").unwrap_err();
        assert!(err.to_string().contains("Circular"));
        assert_eq!(store.state("loop"), Some(RecordState::Failed));
    }

    #[test]
    fn reregistration_during_evaluation_wins() {
        let store = Rc::new(ProbeStore::default());
        let inner = Rc::clone(&store);
        store.add("x", move |_| {
            inner.add_value("x", "replacement");
            Ok("stale")
        });

        assert_eq!(store.query("x").unwrap(), Some(CapValue::from("stale")));
        assert_eq!(store.query("x").unwrap(), Some(CapValue::from("replacement")));
    }

    #[test]
    fn enumerate_isolates_failures() {
        let store = ProbeStore::default();
        store.add("a", |_| Ok(true));
        store.add("b", |_| -> anyhow::Result<bool> { anyhow::bail!("boom") });
        store.add("c", |_| Ok(false));

        let all = store.enumerate_all();
        assert_eq!(all.len(), 3);
        assert_eq!(all["a"], Outcome::Value(CapValue::from(true)));
        assert_eq!(all["b"].error_message(), Some("boom"));
        assert_eq!(all["c"], Outcome::Value(CapValue::from(false)));
    }

    #[test]
    fn clear_discards_records() {
        let store = ProbeStore::default();
        store.add_value("x", true);
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.query("x").unwrap(), None);
    }

    #[test]
    fn names_are_sorted() {
        let store = ProbeStore::default();
        store.add_value("b", true);
        store.add_value("a", true);
        assert_eq!(store.names(), vec!["a", "b"]);
        assert_eq!(store.len(), 2);
        assert!(store.contains("a"));
    }

    #[test]
    fn headless_store_has_no_scratch() {
        let store = ProbeStore::default();
        store.add("css-transform", |ctx| Ok(ctx.style_supported("transform")?));

        assert!(store.scratch_element().is_none());
        assert!(matches!(
            store.query("css-transform"),
            Err(HasprobeError::ProbeFailed { .. })
        ));
    }

    #[test]
    fn probes_resolve_style_through_scratch() {
        let store = presentational_store();
        store.add("css-transform", |ctx| Ok(ctx.style_supported("transform")?));
        store.add("css-boxshadow", |ctx| Ok(ctx.style_supported("boxShadow")?));

        assert!(store.has("css-transform").unwrap());
        assert!(!store.has("css-boxshadow").unwrap());
    }

    #[test]
    fn nested_scratch_access_is_busy() {
        let store = presentational_store();
        store.add("inner", |ctx| Ok(ctx.with_scratch(|_| true)?));
        store.add("outer", |ctx| {
            let inner = ctx.with_scratch(|_| ctx.has("inner"))?;
            Ok(inner?)
        });

        let err = store.query("outer").unwrap_err();
        assert!(err.to_string().contains("in use"));
    }

    #[test]
    fn reset_scratch_removes_children() {
        let store = presentational_store();
        store.add("leaky", |ctx| {
            Ok(ctx.with_scratch(|el| {
                el.append_child(ScratchNode::Text("left behind".into()));
                true
            })?)
        });
        store.add("sees-empty", |ctx| {
            Ok(ctx.with_scratch(|el| el.children().is_empty())?)
        });

        assert!(store.has("leaky").unwrap());
        store.reset_scratch_element();
        assert!(store.has("sees-empty").unwrap());
        assert!(store.scratch_element().is_some_and(|el| el.is_pristine()));
    }

    #[test]
    fn leaked_children_are_visible_without_reset() {
        let store = presentational_store();
        store.add("leaky", |ctx| {
            Ok(ctx.with_scratch(|el| {
                el.append_child(ScratchNode::Comment("stale".into()));
                true
            })?)
        });
        store.add("sees-empty", |ctx| {
            Ok(ctx.with_scratch(|el| el.children().is_empty())?)
        });

        assert!(store.has("leaky").unwrap());
        assert!(!store.has("sees-empty").unwrap());
    }

    #[test]
    fn panic_during_evaluation_is_recorded_as_failed() {
        let store = ProbeStore::default();
        store.add("explodes", |_| -> anyhow::Result<bool> { panic!("host blew up") });

        let unwound = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            store.query("explodes")
        }));
        assert!(unwound.is_err());
        assert_eq!(store.state("explodes"), Some(RecordState::Failed));

        match store.query("explodes") {
            Err(HasprobeError::ProbeFailed { message, .. }) => {
                assert_eq!(message, PANICKED_MESSAGE)
            }
            other => panic!("expected ProbeFailed, got {:?}", other),
        }
    }

    #[test]
    fn infinite_result_is_truthy() {
        let store = ProbeStore::default();
        store.add("inf", |_| Ok(f64::INFINITY));
        assert!(store.has("inf").unwrap());
    }

    #[test]
    fn debug_lists_record_states() {
        let store = ProbeStore::default();
        store.add_value("x", true);
        let rendered = format!("{:?}", store);
        assert!(rendered.contains("\"x\""));
        assert!(rendered.contains("Resolved"));
    }
}
