use super::{CloseOptions, OpenOptions, WindowHandleAdapter};
use crate::config::{AdapterConfig, StackOptions};
use crate::error::NativeError;
use crate::native::{ContainerConfig, ContainerId, NativeContainer};
use crate::window::{WindowHandle, WindowId};

/// Adapter for platforms with a native navigation container.
///
/// Swipe-back and the back button belong to the container, so gestures are
/// never handled here; the resolved `swipe_back` flag is forwarded instead.
#[derive(Debug)]
pub struct ContainerAdapter<N> {
    native: N,
    config: AdapterConfig,
}

impl<N: NativeContainer> ContainerAdapter<N> {
    pub fn new(native: N, config: AdapterConfig) -> Self {
        Self { native, config }
    }

    pub fn native(&self) -> &N {
        &self.native
    }

    pub fn native_mut(&mut self) -> &mut N {
        &mut self.native
    }
}

impl<N: NativeContainer> WindowHandleAdapter for ContainerAdapter<N> {
    fn provides_container(&self) -> bool {
        true
    }

    fn create_container(
        &mut self,
        root: &WindowHandle,
        options: &StackOptions,
    ) -> Result<Option<ContainerId>, NativeError> {
        let config = ContainerConfig {
            swipe_back: options.swipe_back,
            modal: options.modal,
        };
        let container = self.native.create_container(root.id(), &config)?;
        tracing::debug!(container = %container, root = %root.id(), "created container");
        Ok(Some(container))
    }

    fn open_container(
        &mut self,
        container: ContainerId,
        root: &WindowHandle,
        mut options: OpenOptions,
    ) -> Result<(), NativeError> {
        options.resolve(&self.config);
        tracing::debug!(container = %container, root = %root.id(), "opening container");
        self.native.open_container(container, &options)
    }

    fn open_nested(
        &mut self,
        container: ContainerId,
        handle: &WindowHandle,
        mut options: OpenOptions,
    ) -> Result<(), NativeError> {
        options.resolve(&self.config);
        tracing::debug!(container = %container, window_id = %handle.id(), "pushing window");
        self.native.open_nested(container, handle.id(), &options)
    }

    fn close_nested(
        &mut self,
        container: ContainerId,
        window: WindowId,
        mut options: CloseOptions,
    ) -> Result<(), NativeError> {
        options.resolve(&self.config);
        tracing::debug!(container = %container, window_id = %window, "popping window");
        self.native.close_nested(container, window, &options)
    }

    fn open_window(
        &mut self,
        handle: &WindowHandle,
        mut options: OpenOptions,
    ) -> Result<(), NativeError> {
        options.resolve(&self.config);
        self.native.open(handle.id(), &options)
    }

    fn close_window(
        &mut self,
        window: WindowId,
        mut options: CloseOptions,
    ) -> Result<(), NativeError> {
        options.resolve(&self.config);
        self.native.close(window, &options)
    }
}
