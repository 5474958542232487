use std::sync::atomic::{AtomicU64, Ordering};

/// Correlation id carried in a message header.
pub type MessageId = u64;

static GLOBAL: IdAllocator = IdAllocator::new();

/// Monotonic message id source.
///
/// The first id issued is 1; 0 is never handed out.
#[derive(Debug, Default)]
pub struct IdAllocator {
    last: AtomicU64,
}

impl IdAllocator {
    /// Create an allocator that has issued nothing yet
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
        }
    }

    /// Process-wide allocator shared by every codec that does not bring its own
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Issue the next id
    #[inline]
    pub fn next_id(&self) -> MessageId {
        self.last.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Last id issued, 0 if none
    #[must_use]
    pub fn peek(&self) -> MessageId {
        self.last.load(Ordering::Relaxed)
    }
}
