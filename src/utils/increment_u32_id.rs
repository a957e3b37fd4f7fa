use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicU32, Ordering};

/// Process-wide call counter, initialized at 0.
static GLOBAL_CALL_ID_COUNTER: Lazy<AtomicU32> = Lazy::new(|| AtomicU32::new(0));

/// Returns the next process-unique call ID.
///
/// IDs wrap around after `u32::MAX`; they only need to be unique among calls
/// that are in flight at the same time, which is what log correlation needs.
#[inline]
pub fn increment_u32_id() -> u32 {
    GLOBAL_CALL_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}
