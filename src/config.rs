//! Configuration recognised by the stack and its adapters.

use crate::adapter::{Animation, Platform};

/// Options passed to [`NavigationStack::new`](crate::window::NavigationStack::new).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackOptions {
    /// Whether swipe-to-dismiss is permitted on pushed windows.
    pub swipe_back: bool,
    /// Whether closing the base window should terminate the app. `None`
    /// resolves per platform, see [`StackOptions::first_window_exits`].
    pub should_first_window_exit: Option<bool>,
    /// Present windows modally instead of pushing them.
    pub modal: bool,
}

impl Default for StackOptions {
    fn default() -> Self {
        Self {
            swipe_back: true,
            should_first_window_exit: None,
            modal: false,
        }
    }
}

impl StackOptions {
    /// The base window exits the app by default only where no container
    /// wraps it.
    pub fn first_window_exits(&self, provides_container: bool) -> bool {
        self.should_first_window_exit.unwrap_or(!provides_container)
    }

    pub fn with_swipe_back(mut self, enabled: bool) -> Self {
        self.swipe_back = enabled;
        self
    }

    pub fn with_first_window_exit(mut self, exit: bool) -> Self {
        self.should_first_window_exit = Some(exit);
        self
    }

    pub fn with_modal(mut self, modal: bool) -> Self {
        self.modal = modal;
        self
    }
}

/// Adapter-level defaults applied when open options leave a field unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdapterConfig {
    pub swipe_back: bool,
    pub display_home_as_up: bool,
    pub open_animation: Animation,
    pub close_animation: Animation,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            swipe_back: true,
            display_home_as_up: true,
            open_animation: Animation::SlideInFromRight,
            close_animation: Animation::SlideOutToRight,
        }
    }
}

impl AdapterConfig {
    /// Defaults for a platform, with swipe-back taken from the stack options.
    pub fn for_platform(platform: Platform, stack: &StackOptions) -> Self {
        let base = Self {
            swipe_back: stack.swipe_back,
            ..Self::default()
        };
        match platform {
            Platform::Direct => base,
            Platform::Container => Self {
                open_animation: Animation::PlatformDefault,
                close_animation: Animation::PlatformDefault,
                ..base
            },
        }
    }
}
