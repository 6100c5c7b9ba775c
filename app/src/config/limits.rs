// Auto-mode re-check interval
pub const DEFAULT_RECHECK_INTERVAL_SECS: u64 = 60;
pub const MIN_RECHECK_INTERVAL_SECS: u64 = 1;
pub const MAX_RECHECK_INTERVAL_SECS: u64 = 3600;
