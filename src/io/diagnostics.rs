//! Run summary: elapsed time and the image memory a command allocated

use std::time::Duration;

use tracing::{debug, info};

const BYTES_PER_MEGABYTE: f64 = 1_000_000.0;

/// Running total of the image buffers allocated during a command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryLedger {
    total_bytes: usize,
    allocations: usize,
    largest: usize,
}

impl MemoryLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one buffer
    pub fn record(&mut self, label: &str, bytes: usize) {
        self.total_bytes = self.total_bytes.saturating_add(bytes);
        self.allocations += 1;
        self.largest = self.largest.max(bytes);
        debug!(label, bytes, total = self.total_bytes, "Allocated image buffer");
    }

    /// Bytes recorded so far
    pub const fn total_bytes(&self) -> usize {
        self.total_bytes
    }

    /// Number of buffers recorded
    pub const fn allocations(&self) -> usize {
        self.allocations
    }

    /// Total in decimal megabytes
    pub fn total_megabytes(&self) -> f64 {
        self.total_bytes as f64 / BYTES_PER_MEGABYTE
    }

    /// The closing summary line
    pub fn summary(&self, elapsed: Duration) -> String {
        format!(
            "Time: {:.4} s, Memory: {:.4} MB",
            elapsed.as_secs_f64(),
            self.total_megabytes()
        )
    }

    /// Log the closing summary
    pub fn report(&self, elapsed: Duration) {
        info!(
            allocations = self.allocations,
            largest = self.largest,
            "{}",
            self.summary(elapsed)
        );
    }
}
