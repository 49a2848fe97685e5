//! Vendor-prefixed style property resolution.
//!
//! A property counts as supported when its slot on a style declaration
//! reports the `string` category, either under the plain name or under any
//! of the fixed vendor-prefixed spellings (`Webkit` + `Transform`, ...).
//! Prefix order only affects how soon the search stops.

use crate::host::{HostObject, ScratchElement, TypeCategory};

/// Vendor prefixes checked for every property.
pub const VENDOR_PREFIXES: [&str; 5] = ["Webkit", "Moz", "O", "ms", "Khtml"];

/// Anything that exposes style property slots.
pub trait StyleSurface {
    /// The category the surface reports for a style slot.
    fn slot_category(&self, property: &str) -> TypeCategory;
}

impl StyleSurface for HostObject {
    fn slot_category(&self, property: &str) -> TypeCategory {
        self.category_of(property)
    }
}

impl StyleSurface for ScratchElement {
    fn slot_category(&self, property: &str) -> TypeCategory {
        self.style().category_of(property)
    }
}

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize(property: &str) -> String {
    let mut chars = property.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Resolves style properties against a fixed prefix list.
#[derive(Debug, Clone, Copy)]
pub struct VendorResolver {
    prefixes: &'static [&'static str],
}

impl VendorResolver {
    /// Resolver over [`VENDOR_PREFIXES`].
    pub const fn standard() -> Self {
        Self {
            prefixes: &VENDOR_PREFIXES,
        }
    }

    pub fn prefixes(&self) -> &'static [&'static str] {
        self.prefixes
    }

    /// Every spelling checked for `property`, unprefixed first.
    pub fn variants(&self, property: &str) -> Vec<String> {
        let capitalized = capitalize(property);
        std::iter::once(property.to_string())
            .chain(
                self.prefixes
                    .iter()
                    .map(|prefix| format!("{}{}", prefix, capitalized)),
            )
            .collect()
    }

    /// The first spelling of `property` the surface recognizes.
    pub fn supported_variant<S>(&self, property: &str, surface: &S) -> Option<String>
    where
        S: StyleSurface + ?Sized,
    {
        self.variants(property)
            .into_iter()
            .find(|name| surface.slot_category(name) == TypeCategory::String)
    }

    /// Whether `property` or any vendor-prefixed spelling is supported.
    pub fn is_supported<S>(&self, property: &str, surface: &S) -> bool
    where
        S: StyleSurface + ?Sized,
    {
        self.supported_variant(property, surface).is_some()
    }
}

impl Default for VendorResolver {
    fn default() -> Self {
        Self::standard()
    }
}

/// Whether `property` is supported on `surface` under any spelling.
pub fn is_supported<S>(property: &str, surface: &S) -> bool
where
    S: StyleSurface + ?Sized,
{
    VendorResolver::standard().is_supported(property, surface)
}
