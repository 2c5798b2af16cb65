//! Campaign constants.
//!
//! This module contains the fixed tunables of the campaign flows: page and
//! batch sizes matching what the backend RPCs expect, and the soft
//! validation bounds.

/// Board paging configuration.
pub mod paging {
    /// Rows per page of the ticket status RPC.
    pub const STATUS_PAGE_SIZE: i64 = 1000;

    /// Maximum status pages fetched concurrently.
    pub const MAX_CONCURRENT_PAGE_FETCHES: usize = 5;
}

/// Reservation batching configuration.
pub mod batching {
    /// Maximum quota numbers per reserve/release RPC call.
    pub const RESERVE_BATCH_SIZE: usize = 500;
}

/// Grid presentation defaults.
pub mod grid {
    /// Default tickets per display page of the quota grid.
    pub const DEFAULT_GRID_PAGE_SIZE: usize = 100;
}

/// Report defaults.
pub mod reports {
    /// Default number of buyers in the ranking.
    pub const DEFAULT_RANKING_LIMIT: u32 = 10;

    /// Default number of days of sales history.
    pub const DEFAULT_HISTORY_DAYS: u32 = 30;
}

/// Soft validation bounds.
pub mod validation {
    /// Minimum digits of a normalized phone (local landline).
    pub const MIN_PHONE_DIGITS: usize = 10;

    /// Maximum digits of a normalized phone (country code + mobile).
    pub const MAX_PHONE_DIGITS: usize = 13;
}
