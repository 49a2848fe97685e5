//! Core probes shipped with the registry itself.
//!
//! The large probe catalogues live outside this crate; only the baseline
//! `dom` capability, which gates every presentation probe, is defined here.

use crate::host::{is_host_like, is_host_type, HostCheck, TypeCategory};
use crate::store::{ProbeContext, ProbeStore};

/// Names registered by [`register_core`].
pub const CORE_PROBES: &[&str] = &["dom"];

const DOCUMENT_FEATURES: &[&str] = &[
    "documentElement",
    "getElementById",
    "getElementsByName",
    "getElementsByTagName",
    "createComment",
    "createElement",
    "createTextNode",
];

const ELEMENT_FEATURES: &[&str] = &[
    "appendChild",
    "insertBefore",
    "removeChild",
    "getAttribute",
    "setAttribute",
    "removeAttribute",
    "style",
];

/// Register the core probes on a store.
pub fn register_core(store: &ProbeStore) {
    store.add("dom", probe_dom);
}

/// A usable document object model: document and element methods are host
/// types and element styles expose `cssText`.
fn probe_dom(ctx: &ProbeContext<'_>) -> anyhow::Result<bool> {
    let Some(document) = ctx.document() else {
        return Ok(false);
    };
    if !ctx.scratch_available() || !is_host_type(ctx.global(), "location") {
        return Ok(false);
    }
    if !HostCheck::host_types(DOCUMENT_FEATURES).evaluate(document) {
        return Ok(false);
    }

    let element_ok = ctx.with_scratch(|el| {
        ELEMENT_FEATURES.iter().all(|key| is_host_like(&el.get(key)))
            && el.style().category_of("cssText") == TypeCategory::String
    })?;
    Ok(element_ok)
}
