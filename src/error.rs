//! Error types surfaced by the navigation stack.
//!
//! Policy-level degradations (mismatched pops, bad step counts, ...) are not
//! errors; they are reported as [`StackAnomaly`](crate::window::StackAnomaly)
//! values. Only failures coming out of the native layer travel through these
//! types.

use thiserror::Error;

use crate::native::ContainerId;
use crate::window::WindowId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NativeError {
    #[error("native layer does not know window {0}")]
    UnknownWindow(WindowId),
    #[error("native layer does not know container {0}")]
    UnknownContainer(ContainerId),
    #[error("native layer refused window {window}: {reason}")]
    Refused { window: WindowId, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    #[error(transparent)]
    Native(#[from] NativeError),
}

impl From<NavError> for std::io::Error {
    fn from(err: NavError) -> Self {
        std::io::Error::other(err.to_string())
    }
}
