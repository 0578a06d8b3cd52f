use std::collections::HashSet;
use std::sync::Mutex;

/// Remembers which warnings were already emitted so each is logged once per
/// owner rather than once per record.
#[derive(Debug, Default)]
pub struct WarnOnce {
    seen: Mutex<HashSet<String>>,
}

impl WarnOnce {
    pub fn new() -> Self {
        WarnOnce::default()
    }

    /// Returns `true` the first time `key` is seen.
    pub fn first(&self, key: &str) -> bool {
        match self.seen.lock() {
            Ok(mut seen) => {
                if seen.contains(key) {
                    false
                } else {
                    seen.insert(key.to_owned())
                }
            }
            // a poisoned tracker stays quiet
            Err(_) => false,
        }
    }
}
