/// Returns the current timestamp in microseconds since the UNIX epoch.
///
/// Used to measure how long a dispatched call took from acceptance to
/// finalization. Returns `0` if the clock is set before the epoch.
///
/// # Example:
/// ```rust
/// use callflow::utils::now;
/// let timestamp = now(); // Gets the current time in microseconds
/// assert!(timestamp > 0);
/// ```
pub fn now() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_micros()).unwrap_or(0)
}
