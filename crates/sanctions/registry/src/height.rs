use std::sync::atomic::{AtomicU64, Ordering};

use sanctions_types::BlockHeight;

/// Read-only view of the platform's block counter.
///
/// The counter is monotonically non-decreasing and only advances between
/// registry operations, never during one. The registry samples it exactly
/// once per operation.
pub trait HeightProvider: Send + Sync {
    fn current_height(&self) -> BlockHeight;
}

/// Manually advanced height source for tests, local demos, and embedding.
pub struct ManualHeight {
    height: AtomicU64,
}

impl ManualHeight {
    pub fn new(start: u64) -> Self {
        Self {
            height: AtomicU64::new(start),
        }
    }

    /// Advance the counter by `blocks`.
    pub fn advance(&self, blocks: u64) {
        self.height.fetch_add(blocks, Ordering::SeqCst);
    }
}

impl HeightProvider for ManualHeight {
    fn current_height(&self) -> BlockHeight {
        BlockHeight::new(self.height.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_height_advances() {
        let clock = ManualHeight::new(10);
        assert_eq!(clock.current_height(), BlockHeight::new(10));

        clock.advance(5);
        assert_eq!(clock.current_height(), BlockHeight::new(15));
    }
}
