// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod compose;
pub mod config;
pub mod drill;
pub mod hangul;
pub mod pool;
pub mod report;
pub mod runtime;
pub mod scoring;
pub mod sequence;
pub mod session;
pub mod util;

/// Tick interval of the practice loop; doubles as the inactivity poll.
pub const TICK_RATE_MS: u64 = 1000;
