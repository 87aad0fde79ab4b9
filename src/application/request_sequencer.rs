// Request sequencing - last issued request wins
use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out increasing sequence numbers so a late response to an older
/// request can be recognised and dropped.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next sequence number. The first one issued is 1.
    pub fn issue(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    pub fn is_latest(&self, sequence: u64) -> bool {
        self.latest() == sequence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_is_monotonic() {
        let sequencer = RequestSequencer::new();
        assert_eq!(sequencer.latest(), 0);
        let first = sequencer.issue();
        let second = sequencer.issue();
        assert_eq!((first, second), (1, 2));
        assert!(!sequencer.is_latest(first));
        assert!(sequencer.is_latest(second));
    }
}
