//! Capabilities the host platform provides to the navigation core.
//!
//! Nothing in this module draws anything. A host (the simulated one in
//! [`crate::host`], or a real mobile bridge) implements these traits and the
//! adapters in [`crate::adapter`] call into them.

use std::fmt;

use crate::adapter::{CloseOptions, OpenOptions};
use crate::error::NativeError;
use crate::window::WindowId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContainerId(u64);

impl ContainerId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "container#{}", self.0)
    }
}

/// Opaque styling/behaviour bag handed to the window factory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowConfig {
    pub title: Option<String>,
    pub nav_bar_hidden: Option<bool>,
}

impl WindowConfig {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            nav_bar_hidden: None,
        }
    }

    pub fn with_nav_bar_hidden(mut self, hidden: bool) -> Self {
        self.nav_bar_hidden = Some(hidden);
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContainerConfig {
    pub swipe_back: bool,
    pub modal: bool,
}

pub trait WindowFactory {
    fn create_window(&mut self, config: &WindowConfig) -> Result<WindowId, NativeError>;
}

/// Direct open/close of top-level windows.
pub trait NativeWindows {
    fn open(&mut self, window: WindowId, options: &OpenOptions) -> Result<(), NativeError>;
    fn close(&mut self, window: WindowId, options: &CloseOptions) -> Result<(), NativeError>;
}

/// A wrapping navigation container that manages nested window transitions.
pub trait NativeContainer: NativeWindows {
    fn create_container(
        &mut self,
        root: WindowId,
        config: &ContainerConfig,
    ) -> Result<ContainerId, NativeError>;

    fn open_container(
        &mut self,
        container: ContainerId,
        options: &OpenOptions,
    ) -> Result<(), NativeError>;

    fn open_nested(
        &mut self,
        container: ContainerId,
        window: WindowId,
        options: &OpenOptions,
    ) -> Result<(), NativeError>;

    fn close_nested(
        &mut self,
        container: ContainerId,
        window: WindowId,
        options: &CloseOptions,
    ) -> Result<(), NativeError>;
}

impl<T: WindowFactory + ?Sized> WindowFactory for &mut T {
    fn create_window(&mut self, config: &WindowConfig) -> Result<WindowId, NativeError> {
        (**self).create_window(config)
    }
}
