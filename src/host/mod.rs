//! Host-side implementations of the native capabilities.

pub mod simulated;

pub use simulated::{NativeCall, SimulatedHost};
