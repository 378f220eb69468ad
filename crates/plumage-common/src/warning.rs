//! Converter warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the HTML transducer and URL helpers to report tolerated anomalies
//! (unknown elements, unresolvable image sources, stack underflow).

use std::collections::HashSet;
use std::sync::Mutex;

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about a tolerated anomaly (prints once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("HTML", "unknown element <table>, treating as paragraph");
/// ```
///
/// # Panics
/// Panics if the global warning set mutex is poisoned.
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    if first_occurrence(key) {
        eprintln!(
            "{}",
            format!("[Plumage {component}] ⚠ {message}").yellow()
        );
    }
}

/// Record a warning key, returning whether it was seen for the first time
/// since the last [`clear_warnings`].
fn first_occurrence(key: String) -> bool {
    WARNED
        .lock()
        .unwrap()
        .get_or_insert_with(HashSet::new)
        .insert(key)
}

/// Clear all recorded warnings (call when starting an unrelated batch of input)
///
/// # Panics
/// Panics if the global warning set mutex is poisoned.
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap();
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test: the dedup set is process-global, so keeping all the
    // assertions in one function avoids parallel-test interleaving.
    #[test]
    fn clearing_resets_deduplication() {
        let key = "[test] dedup marker message";
        assert!(first_occurrence(key.to_string()));
        assert!(!first_occurrence(key.to_string()));

        clear_warnings();
        assert!(first_occurrence(key.to_string()));

        // The printing wrapper tolerates repeats and clears.
        warn_once("test", "repeated warning");
        warn_once("test", "repeated warning");
    }
}
