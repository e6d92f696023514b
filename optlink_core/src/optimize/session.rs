//! Shared native-session resource: log ring and lifecycle
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Messages kept in the ring before the oldest are dropped
const LOG_RING_CAPACITY: usize = 1024;

/// The session shared by solver instances: owns the append-only log ring
/// that collects streamed solver messages, and the lifecycle flag releasing
/// the native resources.
///
/// Disposal is explicit and idempotent; dropping a session disposes it as
/// well, so scoped ownership gives deterministic release without relying on
/// any collector.
#[derive(Debug, Default)]
pub struct Session {
    log: Mutex<VecDeque<String>>,
    disposed: AtomicBool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one streamed message to the log ring.
    ///
    /// Messages arriving on a disposed session are discarded. The ring
    /// drops its oldest entry beyond capacity; log writes are never solve
    /// results.
    pub fn stream(&self, message: &str) {
        if self.is_disposed() {
            return;
        }
        let mut log = self.log.lock().unwrap();
        if log.len() == LOG_RING_CAPACITY {
            log.pop_front();
        }
        log.push_back(message.to_string());
    }

    /// Drain the buffered messages into the sink, in arrival order
    pub fn flush(&self, sink: &mut dyn FnMut(&str)) {
        let drained: Vec<String> = {
            let mut log = self.log.lock().unwrap();
            log.drain(..).collect()
        };
        for message in &drained {
            sink(message);
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    /// Release the session. Safe to call more than once; only the first
    /// call clears the log ring.
    pub fn dispose(&self) {
        if self.disposed.swap(true, Ordering::AcqRel) {
            return;
        }
        self.log.lock().unwrap().clear();
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flush_drains_in_arrival_order() {
        let session = Session::new();
        session.stream("first");
        session.stream("second");

        let mut seen = Vec::new();
        session.flush(&mut |message| seen.push(message.to_string()));
        assert_eq!(seen, vec!["first", "second"]);

        // A flush consumes the ring
        let mut again = Vec::new();
        session.flush(&mut |message| again.push(message.to_string()));
        assert!(again.is_empty());
    }

    #[test]
    fn ring_drops_oldest_beyond_capacity() {
        let session = Session::new();
        for index in 0..(LOG_RING_CAPACITY + 3) {
            session.stream(&format!("message {index}"));
        }
        let mut seen = Vec::new();
        session.flush(&mut |message| seen.push(message.to_string()));
        assert_eq!(seen.len(), LOG_RING_CAPACITY);
        assert_eq!(seen[0], "message 3");
    }

    #[test]
    fn dispose_is_idempotent() {
        let session = Session::new();
        session.stream("kept until dispose");
        session.dispose();
        assert!(session.is_disposed());
        session.dispose();
        assert!(session.is_disposed());

        // Streams after dispose are discarded
        session.stream("late");
        let mut seen = Vec::new();
        session.flush(&mut |message| seen.push(message.to_string()));
        assert!(seen.is_empty());
    }
}
