//! Notifications the native layer delivers to the navigation stack.

use crate::window::{PendingOpen, WindowId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleEvent {
    /// The native window finished closing, whoever asked for it.
    Closed(WindowId),
    /// Close `target` once `window` has closed.
    RequestCloseOther { window: WindowId, target: WindowId },
    /// Open `target` once `window` has closed.
    RequestOpenOther {
        window: WindowId,
        target: Box<PendingOpen>,
    },
    Swipe {
        window: WindowId,
        direction: SwipeDirection,
    },
    HardwareBack(WindowId),
    HomeIconSelected(WindowId),
}

impl LifecycleEvent {
    /// Window the event was raised on.
    pub fn window(&self) -> WindowId {
        match self {
            LifecycleEvent::Closed(id)
            | LifecycleEvent::HardwareBack(id)
            | LifecycleEvent::HomeIconSelected(id) => *id,
            LifecycleEvent::RequestCloseOther { window, .. }
            | LifecycleEvent::RequestOpenOther { window, .. }
            | LifecycleEvent::Swipe { window, .. } => *window,
        }
    }

    pub fn is_gesture(&self) -> bool {
        matches!(
            self,
            LifecycleEvent::Swipe { .. }
                | LifecycleEvent::HardwareBack(_)
                | LifecycleEvent::HomeIconSelected(_)
        )
    }
}
