// Constants module for toast-notifications
// Centralizes magic numbers for better maintainability

// ============================================================================
// Notification Queue Constants
// ============================================================================

/// Initial capacity for a receiver's record collection
pub(crate) const INITIAL_RECORDS_CAPACITY: usize = 16;

// ============================================================================
// Channel and Buffer Constants
// ============================================================================

/// Buffer size for a receiver's inbound message channel
pub(crate) const CHANNEL_BUFFER_SIZE: usize = 100;

/// Buffer size for lifecycle event broadcasts. Slow subscribers lag instead
/// of blocking the receiver.
pub(crate) const EVENT_BUFFER_SIZE: usize = 64;
