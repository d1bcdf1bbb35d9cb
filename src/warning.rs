//! One-shot data-quality warnings.
//!
//! Warnings go through the `log` facade so hosts pick the sink. Each distinct
//! message is emitted at most once per process, however many rows trip it.

use std::collections::HashSet;
use std::sync::{Mutex, OnceLock};

static WARNED: OnceLock<Mutex<HashSet<String>>> = OnceLock::new();

/// Emit `message` as a warning unless `valid` holds or it was already emitted.
///
/// Returns true when this call actually logged.
pub fn warning_once(valid: bool, message: &str) -> bool {
    if valid {
        return false;
    }
    let warned = WARNED.get_or_init(|| Mutex::new(HashSet::new()));
    let first = match warned.lock() {
        Ok(mut seen) => seen.insert(message.to_string()),
        // A panic elsewhere while holding the lock leaves the set usable
        Err(poisoned) => poisoned.into_inner().insert(message.to_string()),
    };
    if first {
        log::warn!("{message}");
    }
    first
}

/// Whether `message` has been emitted by [`warning_once`]
pub fn has_warned(message: &str) -> bool {
    WARNED.get().is_some_and(|warned| match warned.lock() {
        Ok(seen) => seen.contains(message),
        Err(poisoned) => poisoned.into_inner().contains(message),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_condition_never_warns() {
        assert!(!warning_once(true, "warning test: valid"));
        assert!(!warning_once(true, "warning test: valid"));
    }

    #[test]
    fn test_warns_once_per_message() {
        assert!(warning_once(false, "warning test: repeated"));
        assert!(!warning_once(false, "warning test: repeated"));
        assert!(warning_once(false, "warning test: another"));
    }

    #[test]
    fn test_has_warned_tracks_emitted_messages() {
        assert!(!has_warned("warning test: never emitted"));
        warning_once(false, "warning test: tracked");
        assert!(has_warned("warning test: tracked"));
    }
}
