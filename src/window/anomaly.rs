use std::fmt;

use super::WindowId;

/// Recoverable oddities the stack notices and heals on its own.
///
/// None of these abort an operation. Each one is logged at warn level and
/// queued on the stack so hosts and tests can observe it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackAnomaly {
    /// The handle on top of the stack is not the one whose close fired.
    /// The popped handle was pushed back.
    StaleCloseMismatch { top: WindowId, closed: WindowId },
    /// A close arrived while only the base window was tracked.
    BaseWindowCloseAttempt { closed: WindowId },
    /// `back` was asked for an impossible number of steps; one step was used.
    InvalidStepsBack { requested: usize, depth: usize },
    /// The adapter provides containers but none exists yet; the window was
    /// opened directly.
    MissingContainer { window: WindowId },
    /// `open`/`add` was called with a window that is already tracked.
    DuplicateOpen { window: WindowId },
}

impl fmt::Display for StackAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackAnomaly::StaleCloseMismatch { top, closed } => {
                write!(f, "{closed} closed but {top} is on top; restored {top}")
            }
            StackAnomaly::BaseWindowCloseAttempt { closed } => {
                write!(f, "{closed} closed while only the base window is tracked")
            }
            StackAnomaly::InvalidStepsBack { requested, depth } => {
                write!(
                    f,
                    "cannot go back {requested} steps with {depth} windows; going back one"
                )
            }
            StackAnomaly::MissingContainer { window } => {
                write!(f, "no container for {window}; opened directly")
            }
            StackAnomaly::DuplicateOpen { window } => {
                write!(f, "{window} is already tracked")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_both_windows_on_mismatch() {
        let text = StackAnomaly::StaleCloseMismatch {
            top: WindowId::new(2),
            closed: WindowId::new(1),
        }
        .to_string();
        assert!(text.contains("window#1"));
        assert!(text.contains("window#2"));
    }
}
