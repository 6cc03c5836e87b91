//! Selection of the "origin" product for an event.
//!
//! An event may carry both `origin` and `phase-data` products describing the
//! same solution (same `source_code` identity). The merged list keeps one
//! entry per identity, preferring the most recently updated product and
//! letting `phase-data` win ties.

use std::collections::HashMap;

use serde::Deserialize;

use crate::event::{Product, ProductCollection};

pub const ORIGIN: &str = "origin";
pub const PHASE_DATA: &str = "phase-data";

/// Merge `origin` and `phase-data` products into one list, most preferred
/// first.
///
/// - No `origin` list: empty result.
/// - No `phase-data` list: the `origin` list as delivered.
/// - A `phase-data` product whose identity matches an earlier entry replaces
///   it in place when the entry's `update_time` is not newer. Unmatched
///   `phase-data` products are appended in feed order.
#[must_use]
pub fn reconcile_origin(products: &ProductCollection) -> Vec<&Product> {
    let Some(origins) = products.get(ORIGIN) else {
        return Vec::new();
    };
    let mut merged: Vec<&Product> = origins.iter().collect();

    let Some(phases) = products.get(PHASE_DATA) else {
        return merged;
    };

    // First occurrence of a key wins when the origin list repeats one.
    let mut positions: HashMap<String, usize> = HashMap::new();
    for (i, p) in merged.iter().enumerate() {
        positions.entry(p.identity_key()).or_insert(i);
    }

    for phase in phases {
        let key = phase.identity_key();
        match positions.get(&key) {
            Some(&index) => {
                if merged[index].update_time <= phase.update_time {
                    merged[index] = phase;
                }
            }
            None => {
                positions.insert(key, merged.len());
                merged.push(phase);
            }
        }
    }

    merged
}

/// Reconcile origin products straight from a raw event document.
///
/// Only the `origin` and `phase-data` lists are read. Any structural problem
/// with them (missing `properties.products`, wrong shape, products lacking
/// `source`/`code`/`updateTime`) yields an empty list: "no origin product" is
/// a normal state for callers, not an error. Other product types are never
/// inspected.
#[must_use]
pub fn reconcile_origin_value(event: &serde_json::Value) -> Vec<Product> {
    let Some(raw) = event.get("properties").and_then(|p| p.get("products")) else {
        tracing::debug!("event document has no properties.products");
        return Vec::new();
    };

    let mut products = ProductCollection::new();
    for product_type in [ORIGIN, PHASE_DATA] {
        let Some(list) = raw.get(product_type) else {
            continue;
        };
        match Vec::<Product>::deserialize(list) {
            Ok(list) => products.insert(product_type, list),
            Err(error) => {
                tracing::debug!(%error, product_type, "malformed product list; no origin products");
                return Vec::new();
            }
        }
    }

    reconcile_origin(&products).into_iter().cloned().collect()
}

/// The product used for the origin summary, if any.
#[must_use]
pub fn preferred_origin(products: &ProductCollection) -> Option<&Product> {
    reconcile_origin(products).into_iter().next()
}

#[cfg(test)]
#[path = "origin_test.rs"]
mod tests;
