//! Per-platform shims between the navigation stack and native windowing.
//!
//! The stack only talks to [`WindowHandleAdapter`]. Which variant backs it is
//! decided once, at start-up, through [`for_platform`]:
//!
//! - [`ContainerAdapter`]: a native navigation container wraps every pushed
//!   window and owns the transitions.
//! - [`DirectAdapter`]: windows are opened and closed one by one and the
//!   adapter wires swipe/back gestures itself.

mod container;
mod direct;

pub use container::ContainerAdapter;
pub use direct::{BackBindings, DirectAdapter};

use crate::config::{AdapterConfig, StackOptions};
use crate::error::NativeError;
use crate::event::LifecycleEvent;
use crate::native::{ContainerId, NativeContainer};
use crate::window::{WindowHandle, WindowId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// A wrapping navigation container is available.
    Container,
    /// Windows are opened directly, without a container.
    Direct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Animation {
    SlideInFromRight,
    SlideOutToRight,
    Fade,
    /// Let the native container pick its own transition.
    PlatformDefault,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenOptions {
    pub animated: Option<bool>,
    pub animation: Option<Animation>,
    pub swipe_back: Option<bool>,
    pub display_home_as_up: Option<bool>,
    pub modal: Option<bool>,
    pub exit_on_close: bool,
}

impl OpenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn animated(mut self, animated: bool) -> Self {
        self.animated = Some(animated);
        self
    }

    pub fn with_animation(mut self, animation: Animation) -> Self {
        self.animation = Some(animation);
        self
    }

    pub fn with_swipe_back(mut self, enabled: bool) -> Self {
        self.swipe_back = Some(enabled);
        self
    }

    pub fn with_display_home_as_up(mut self, enabled: bool) -> Self {
        self.display_home_as_up = Some(enabled);
        self
    }

    pub fn modal(mut self, modal: bool) -> Self {
        self.modal = Some(modal);
        self
    }

    pub fn is_animated(&self) -> bool {
        self.animated != Some(false)
    }

    /// Fill unset fields from adapter defaults. Explicit values win.
    pub(crate) fn resolve(&mut self, config: &AdapterConfig) {
        self.swipe_back.get_or_insert(config.swipe_back);
        self.display_home_as_up.get_or_insert(config.display_home_as_up);
        if self.is_animated() && self.animation.is_none() {
            self.animation = Some(config.open_animation);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloseOptions {
    pub animated: Option<bool>,
    pub animation: Option<Animation>,
}

impl CloseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Used for cascade steps, which must not animate.
    pub fn not_animated() -> Self {
        Self {
            animated: Some(false),
            animation: None,
        }
    }

    pub fn is_animated(&self) -> bool {
        self.animated != Some(false)
    }

    pub(crate) fn resolve(&mut self, config: &AdapterConfig) {
        if self.is_animated() && self.animation.is_none() {
            self.animation = Some(config.close_animation);
        }
    }
}

pub trait WindowHandleAdapter {
    /// Whether this platform wraps windows in a navigation container.
    fn provides_container(&self) -> bool {
        false
    }

    /// Create the container rooted at `root`. Platforms without containers
    /// return `Ok(None)` and the stack opens windows directly.
    fn create_container(
        &mut self,
        _root: &WindowHandle,
        _options: &StackOptions,
    ) -> Result<Option<ContainerId>, NativeError> {
        Ok(None)
    }

    fn open_container(
        &mut self,
        _container: ContainerId,
        root: &WindowHandle,
        options: OpenOptions,
    ) -> Result<(), NativeError> {
        self.open_window(root, options)
    }

    fn open_nested(
        &mut self,
        _container: ContainerId,
        handle: &WindowHandle,
        options: OpenOptions,
    ) -> Result<(), NativeError> {
        self.open_window(handle, options)
    }

    fn close_nested(
        &mut self,
        _container: ContainerId,
        window: WindowId,
        options: CloseOptions,
    ) -> Result<(), NativeError> {
        self.close_window(window, options)
    }

    fn open_window(
        &mut self,
        handle: &WindowHandle,
        options: OpenOptions,
    ) -> Result<(), NativeError>;

    fn close_window(&mut self, window: WindowId, options: CloseOptions) -> Result<(), NativeError>;

    /// Route a swipe/back gesture. Returns `true` when the gesture closed a
    /// window.
    fn handle_gesture(&mut self, _event: &LifecycleEvent) -> Result<bool, NativeError> {
        Ok(false)
    }

    /// Drop any per-window state once the window has closed.
    fn forget(&mut self, _window: WindowId) {}
}

impl<T: WindowHandleAdapter + ?Sized> WindowHandleAdapter for Box<T> {
    fn provides_container(&self) -> bool {
        (**self).provides_container()
    }

    fn create_container(
        &mut self,
        root: &WindowHandle,
        options: &StackOptions,
    ) -> Result<Option<ContainerId>, NativeError> {
        (**self).create_container(root, options)
    }

    fn open_container(
        &mut self,
        container: ContainerId,
        root: &WindowHandle,
        options: OpenOptions,
    ) -> Result<(), NativeError> {
        (**self).open_container(container, root, options)
    }

    fn open_nested(
        &mut self,
        container: ContainerId,
        handle: &WindowHandle,
        options: OpenOptions,
    ) -> Result<(), NativeError> {
        (**self).open_nested(container, handle, options)
    }

    fn close_nested(
        &mut self,
        container: ContainerId,
        window: WindowId,
        options: CloseOptions,
    ) -> Result<(), NativeError> {
        (**self).close_nested(container, window, options)
    }

    fn open_window(
        &mut self,
        handle: &WindowHandle,
        options: OpenOptions,
    ) -> Result<(), NativeError> {
        (**self).open_window(handle, options)
    }

    fn close_window(&mut self, window: WindowId, options: CloseOptions) -> Result<(), NativeError> {
        (**self).close_window(window, options)
    }

    fn handle_gesture(&mut self, event: &LifecycleEvent) -> Result<bool, NativeError> {
        (**self).handle_gesture(event)
    }

    fn forget(&mut self, window: WindowId) {
        (**self).forget(window)
    }
}

/// Pick the adapter for `platform`. The native layer must offer containers
/// even when the direct variant is chosen so one host type serves both.
pub fn for_platform<N>(
    platform: Platform,
    native: N,
    config: AdapterConfig,
) -> Box<dyn WindowHandleAdapter>
where
    N: NativeContainer + 'static,
{
    tracing::debug!(?platform, "selecting window adapter");
    match platform {
        Platform::Container => Box::new(ContainerAdapter::new(native, config)),
        Platform::Direct => Box::new(DirectAdapter::new(native, config)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_options_resolve_keeps_explicit_values() {
        let cfg = AdapterConfig::default();
        let mut opts = OpenOptions::new().with_swipe_back(false);
        opts.resolve(&cfg);
        assert_eq!(opts.swipe_back, Some(false));
        assert_eq!(opts.display_home_as_up, Some(true));
        assert_eq!(opts.animation, Some(Animation::SlideInFromRight));
    }

    #[test]
    fn suppressed_animation_is_not_filled_in() {
        let cfg = AdapterConfig::default();
        let mut opts = OpenOptions::new().animated(false);
        opts.resolve(&cfg);
        assert_eq!(opts.animation, None);

        let mut close = CloseOptions::not_animated();
        close.resolve(&cfg);
        assert_eq!(close.animation, None);

        let mut close = CloseOptions::new();
        close.resolve(&cfg);
        assert_eq!(close.animation, Some(Animation::SlideOutToRight));
    }
}
