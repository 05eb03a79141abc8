use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

/// Time-based key `<prefix>-<millis>` not accepted by `taken`.
///
/// On collision the timestamp is bumped until a free key is found, so the
/// result always has the `<prefix>-<digits>` shape.
pub fn unique_key(prefix: &str, start: u128, taken: impl Fn(&str) -> bool) -> String {
    let mut stamp = start;
    loop {
        let key = format!("{prefix}-{stamp}");
        if !taken(&key) {
            return key;
        }
        stamp += 1;
    }
}
