//! Application flow: the context object screens are opened through.
//!
//! One `AppFlow` owns the navigation stack and the window factory for the
//! lifetime of the app and is passed to whatever drives screen transitions.

use crate::adapter::{self, OpenOptions, Platform, WindowHandleAdapter};
use crate::config::{AdapterConfig, StackOptions};
use crate::error::NavError;
use crate::event::LifecycleEvent;
use crate::native::{NativeContainer, WindowConfig, WindowFactory};
use crate::window::{EventOutcome, NavigationStack, WindowHandle, WindowId};

pub struct AppFlow<A, F> {
    stack: NavigationStack<A>,
    factory: F,
}

impl<F: WindowFactory> AppFlow<Box<dyn WindowHandleAdapter>, F> {
    /// Build a flow whose adapter is chosen from `platform`.
    pub fn for_platform<N>(
        platform: Platform,
        native: N,
        factory: F,
        options: StackOptions,
    ) -> Self
    where
        N: NativeContainer + 'static,
    {
        let config = AdapterConfig::for_platform(platform, &options);
        let adapter = adapter::for_platform(platform, native, config);
        Self::new(NavigationStack::new(adapter, options), factory)
    }
}

impl<A: WindowHandleAdapter, F: WindowFactory> AppFlow<A, F> {
    pub fn new(stack: NavigationStack<A>, factory: F) -> Self {
        Self { stack, factory }
    }

    pub fn stack(&self) -> &NavigationStack<A> {
        &self.stack
    }

    pub fn stack_mut(&mut self) -> &mut NavigationStack<A> {
        &mut self.stack
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Create a window from `config` and push it.
    pub fn open_screen(
        &mut self,
        config: &WindowConfig,
        options: OpenOptions,
    ) -> Result<WindowId, NavError> {
        let handle = self.create_handle(config)?;
        let id = handle.id();
        self.stack.open(handle, options)?;
        Ok(id)
    }

    /// Create a window and show it right above the base once the current
    /// screens have closed.
    pub fn open_screen_from_home(
        &mut self,
        config: &WindowConfig,
        options: OpenOptions,
    ) -> Result<WindowId, NavError> {
        let handle = self.create_handle(config)?;
        let id = handle.id();
        self.stack.open_from_home(handle, options)?;
        Ok(id)
    }

    pub fn go_back(&mut self, steps: Option<usize>) -> Result<(), NavError> {
        self.stack.back(steps)
    }

    pub fn go_home(&mut self) -> Result<(), NavError> {
        self.stack.home()
    }

    pub fn close_screen(&mut self, window: WindowId) -> Result<(), NavError> {
        self.stack.close(window)
    }

    pub fn dispatch(&mut self, event: LifecycleEvent) -> Result<EventOutcome, NavError> {
        self.stack.handle_event(event)
    }

    fn create_handle(&mut self, config: &WindowConfig) -> Result<WindowHandle, NavError> {
        let id = self.factory.create_window(config)?;
        let mut handle = WindowHandle::new(id);
        if let Some(title) = &config.title {
            handle = handle.with_title(title.clone());
        }
        if let Some(hidden) = config.nav_bar_hidden {
            handle = handle.with_nav_bar_hidden(hidden);
        }
        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{NativeCall, SimulatedHost};

    type SimFlow = AppFlow<Box<dyn WindowHandleAdapter>, SimulatedHost>;

    fn flow(platform: Platform) -> (SimFlow, SimulatedHost) {
        let host = SimulatedHost::new();
        let flow = AppFlow::for_platform(
            platform,
            host.clone(),
            host.clone(),
            StackOptions::default(),
        );
        (flow, host)
    }

    #[test]
    fn open_screen_creates_and_pushes() {
        let (mut flow, host) = flow(Platform::Direct);
        let home = flow
            .open_screen(&WindowConfig::titled("Home"), OpenOptions::new())
            .unwrap();
        let detail = flow
            .open_screen(
                &WindowConfig::titled("Detail").with_nav_bar_hidden(true),
                OpenOptions::new(),
            )
            .unwrap();
        assert_eq!(flow.stack().ids(), vec![home, detail]);
        assert_eq!(flow.stack().top().unwrap().title(), Some("Detail"));
        assert!(flow.stack().top().unwrap().nav_bar_hidden());
        assert_eq!(host.visible(), vec![home, detail]);
    }

    #[test]
    fn go_home_on_container_platform_uses_nested_closes() {
        let (mut flow, host) = flow(Platform::Container);
        for title in ["Home", "List", "Detail"] {
            flow.open_screen(&WindowConfig::titled(title), OpenOptions::new()).unwrap();
        }
        host.take_calls();
        flow.go_home().unwrap();
        host.pump(flow.stack_mut()).unwrap();
        assert_eq!(flow.stack().len(), 1);
        let calls = host.take_calls();
        assert!(calls.iter().all(|c| matches!(c, NativeCall::CloseNested { .. })));
        assert_eq!(calls.len(), 2);
    }

    #[test]
    fn factory_failure_propagates() {
        struct Broken;
        impl WindowFactory for Broken {
            fn create_window(
                &mut self,
                _config: &WindowConfig,
            ) -> Result<WindowId, crate::error::NativeError> {
                Err(crate::error::NativeError::Refused {
                    window: WindowId::new(0),
                    reason: "out of memory".to_string(),
                })
            }
        }
        let host = SimulatedHost::new();
        let mut flow =
            AppFlow::for_platform(Platform::Direct, host, Broken, StackOptions::default());
        let err = flow
            .open_screen(&WindowConfig::default(), OpenOptions::new())
            .unwrap_err();
        assert!(matches!(err, NavError::Native(_)));
        assert!(flow.stack().is_empty());
    }
}
