//! What the engine asks of the game it runs in.

use std::{path::Path, thread, time::Duration};

/// Log a "still waiting" line every this many polls.
const WAIT_LOG_EVERY: u64 = 50;

/// The host's content cache.
pub trait ContentHost {
    /// Drop any cached copy of `key` so the next load observes the
    /// engine's replacement (or the original, if there is none).
    fn invalidate_cache(&mut self, key: &str);
}

/// A host that only records what it was asked to invalidate.
#[derive(Debug, Default, Clone)]
pub struct RecordingHost {
    pub invalidated: Vec<String>,
}

impl ContentHost for RecordingHost {
    fn invalidate_cache(&mut self, key: &str) {
        self.invalidated.push(key.to_string());
    }
}

/// Block until `path` exists, sleeping `poll_interval` between checks.
///
/// There is no timeout: a file that never appears stalls the caller
/// forever. Returns the number of sleeps taken.
pub fn wait_for_file(path: &Path, poll_interval: Duration) -> u64 {
    let mut polls = 0u64;
    while !path.exists() {
        if polls % WAIT_LOG_EVERY == 0 {
            log::debug!("host: waiting for rendered file {}", path.display());
        }
        thread::sleep(poll_interval);
        polls += 1;
    }
    polls
}
