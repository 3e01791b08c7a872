//! Per-category outcome statistics.
//!
//! Thread-safe counters for probe outcomes, shared across tasks via `Arc`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use strum::IntoEnumIterator;

use super::types::ScanCategory;

/// Thread-safe per-category outcome counters.
///
/// All categories are initialized to zero on creation, so increments never
/// allocate and lookups never miss.
#[derive(Debug)]
pub struct ScanStats {
    categories: HashMap<ScanCategory, AtomicUsize>,
}

impl ScanStats {
    /// Fresh counters, all zero.
    pub fn new() -> Self {
        let mut categories = HashMap::new();
        for category in ScanCategory::iter() {
            categories.insert(category, AtomicUsize::new(0));
        }
        ScanStats { categories }
    }

    /// Increment the counter for a category.
    pub fn record(&self, category: ScanCategory) {
        if let Some(counter) = self.categories.get(&category) {
            counter.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Get the count for a category.
    pub fn count(&self, category: ScanCategory) -> usize {
        self.categories
            .get(&category)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Total count across transport-failure categories.
    pub fn total_failures(&self) -> usize {
        ScanCategory::iter()
            .filter(ScanCategory::is_transport_failure)
            .map(|c| self.count(c))
            .sum()
    }
}

impl Default for ScanStats {
    fn default() -> Self {
        Self::new()
    }
}
