//! Shared crate-wide constants.

/// How long a home/back cascade may wait for the next close notification
/// before the terminal host reports it as stalled.
///
/// Units: milliseconds. Native close animations usually finish well under a
/// second; anything past this points at a lost notification.
pub const DEFAULT_STALL_TIMEOUT_MS: u64 = 2_000;

/// Lines kept by the in-memory log buffer before the oldest are dropped.
pub const DEFAULT_MAX_LOG_LINES: usize = 2_000;

/// Poll interval of the terminal host's event loop.
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Minimum time between two lifecycle events delivered by the terminal host,
/// so each step of a cascade stays visible on screen.
pub const EVENT_STEP_MS: u64 = 180;
