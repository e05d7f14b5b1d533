use std::collections::BTreeMap;

use super::{CloseOptions, OpenOptions, WindowHandleAdapter};
use crate::config::AdapterConfig;
use crate::error::NativeError;
use crate::event::{LifecycleEvent, SwipeDirection};
use crate::native::NativeWindows;
use crate::window::{WindowHandle, WindowId};

/// Gestures that close a window opened through [`DirectAdapter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackBindings {
    /// Rightward swipe closes the window.
    pub swipe: bool,
    /// Hardware back and the home/up icon close the window.
    pub back_affordance: bool,
}

/// Adapter for platforms that open every window on its own.
///
/// There is no container to provide swipe-back or an up button, so the
/// adapter records, per window, which gestures should close it and acts on
/// them in [`WindowHandleAdapter::handle_gesture`].
#[derive(Debug)]
pub struct DirectAdapter<N> {
    native: N,
    config: AdapterConfig,
    bindings: BTreeMap<WindowId, BackBindings>,
}

impl<N: NativeWindows> DirectAdapter<N> {
    pub fn new(native: N, config: AdapterConfig) -> Self {
        Self {
            native,
            config,
            bindings: BTreeMap::new(),
        }
    }

    pub fn native(&self) -> &N {
        &self.native
    }

    pub fn native_mut(&mut self) -> &mut N {
        &mut self.native
    }

    pub fn bindings(&self, window: WindowId) -> Option<BackBindings> {
        self.bindings.get(&window).copied()
    }

    fn close_bound(&mut self, window: WindowId, gesture: &str) -> Result<bool, NativeError> {
        tracing::debug!(window_id = %window, gesture, "gesture closes window");
        self.close_window(window, CloseOptions::new())?;
        Ok(true)
    }
}

impl<N: NativeWindows> WindowHandleAdapter for DirectAdapter<N> {
    fn open_window(
        &mut self,
        handle: &WindowHandle,
        mut options: OpenOptions,
    ) -> Result<(), NativeError> {
        options.resolve(&self.config);
        let bindings = BackBindings {
            swipe: options.swipe_back.unwrap_or(false),
            back_affordance: options.display_home_as_up.unwrap_or(false)
                && !handle.nav_bar_hidden(),
        };
        tracing::debug!(
            window_id = %handle.id(),
            swipe = bindings.swipe,
            back = bindings.back_affordance,
            animation = ?options.animation,
            "opening window"
        );
        self.native.open(handle.id(), &options)?;
        self.bindings.insert(handle.id(), bindings);
        Ok(())
    }

    fn close_window(
        &mut self,
        window: WindowId,
        mut options: CloseOptions,
    ) -> Result<(), NativeError> {
        options.resolve(&self.config);
        tracing::debug!(window_id = %window, animation = ?options.animation, "closing window");
        self.native.close(window, &options)
    }

    fn handle_gesture(&mut self, event: &LifecycleEvent) -> Result<bool, NativeError> {
        let window = event.window();
        let Some(bindings) = self.bindings.get(&window).copied() else {
            return Ok(false);
        };
        match event {
            LifecycleEvent::Swipe {
                direction: SwipeDirection::Right,
                ..
            } if bindings.swipe => self.close_bound(window, "swipe"),
            LifecycleEvent::HardwareBack(_) if bindings.back_affordance => {
                self.close_bound(window, "hardware-back")
            }
            LifecycleEvent::HomeIconSelected(_) if bindings.back_affordance => {
                self.close_bound(window, "home-icon")
            }
            _ => Ok(false),
        }
    }

    fn forget(&mut self, window: WindowId) {
        self.bindings.remove(&window);
    }
}
