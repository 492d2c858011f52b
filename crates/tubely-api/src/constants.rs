//! Route paths and HTTP-layer constants.

/// Multipart bodies carry boundaries and part headers on top of the file.
pub const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

pub const HEALTH_CHECK_TIMEOUT_SECS: u64 = 5;

/// Lifetime of tokens minted by tooling and tests.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;
