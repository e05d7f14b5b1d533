mod anomaly;
mod navigation_stack;

use std::fmt;

use crate::adapter::OpenOptions;

pub use anomaly::StackAnomaly;
pub use navigation_stack::{CascadeKind, EventOutcome, NavigationStack};

/// Opaque reference to a native window or view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(u64);

impl WindowId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

/// What a handle does once its own close has been observed.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Continuation {
    #[default]
    None,
    CloseThen(WindowId),
    OpenThen(Box<PendingOpen>),
}

impl Continuation {
    pub fn is_none(&self) -> bool {
        matches!(self, Continuation::None)
    }
}

/// A window waiting to be opened by a continuation.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingOpen {
    pub handle: WindowHandle,
    pub options: OpenOptions,
}

impl PendingOpen {
    pub fn new(handle: WindowHandle, options: OpenOptions) -> Self {
        Self { handle, options }
    }
}

/// One open screen tracked by the navigation stack.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowHandle {
    id: WindowId,
    title: Option<String>,
    is_base: bool,
    nav_bar_hidden: Option<bool>,
    exit_on_close: bool,
    continuation: Continuation,
}

impl WindowHandle {
    pub fn new(id: WindowId) -> Self {
        Self {
            id,
            title: None,
            is_base: false,
            nav_bar_hidden: None,
            exit_on_close: false,
            continuation: Continuation::None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_nav_bar_hidden(mut self, hidden: bool) -> Self {
        self.nav_bar_hidden = Some(hidden);
        self
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn title_or_default(&self) -> String {
        self.title.clone().unwrap_or_else(|| self.id.to_string())
    }

    pub fn is_base(&self) -> bool {
        self.is_base
    }

    /// Unset reads as `false`; the stack normalises the field on push.
    pub fn nav_bar_hidden(&self) -> bool {
        self.nav_bar_hidden.unwrap_or(false)
    }

    pub fn exit_on_close(&self) -> bool {
        self.exit_on_close
    }

    pub fn continuation(&self) -> &Continuation {
        &self.continuation
    }

    pub(crate) fn mark_base(&mut self) {
        self.is_base = true;
    }

    pub(crate) fn normalize_nav_bar_hidden(&mut self) {
        self.nav_bar_hidden = Some(self.nav_bar_hidden.unwrap_or(false));
    }

    pub(crate) fn set_exit_on_close(&mut self, exit: bool) {
        self.exit_on_close = exit;
    }

    pub(crate) fn set_continuation(&mut self, continuation: Continuation) {
        if !self.continuation.is_none() {
            tracing::debug!(
                window_id = %self.id,
                previous = ?self.continuation,
                "replacing pending continuation"
            );
        }
        self.continuation = continuation;
    }

    pub(crate) fn take_continuation(&mut self) -> Continuation {
        std::mem::take(&mut self.continuation)
    }
}
