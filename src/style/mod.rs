//! Style property support detection.
//!
//! - [`prefix`] - Vendor-prefix property resolver

pub mod prefix;

pub use prefix::{capitalize, is_supported, StyleSurface, VendorResolver, VENDOR_PREFIXES};
