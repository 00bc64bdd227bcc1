//! Locale-aware label comparison.
//!
//! Sidebar labels are mostly Russian with some Latin. Labels are compared
//! with the ICU collator for `ru`: case and `ё` are secondary differences,
//! `й` is its own letter, and Cyrillic sorts before Latin. Labels the
//! collator considers equal fall back to code point order, so distinct
//! strings never tie.

use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions};
use icu_locid::locale;

thread_local! {
    static COLLATOR: Option<Collator> = match Collator::try_new(&locale!("ru").into(), CollatorOptions::new()) {
        Ok(collator) => Some(collator),
        Err(e) => {
            tracing::warn!(error = %e, "Russian collator unavailable, comparing labels case-insensitively");
            None
        }
    };
}

/// Compare two labels with Russian collation rules.
pub fn compare_labels(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    COLLATOR
        .with(|collator| match collator {
            Some(collator) => collator.compare(a, b),
            None => a.to_lowercase().cmp(&b.to_lowercase()),
        })
        .then_with(|| a.cmp(b))
}
