//! In-memory native layer.
//!
//! Every close the adapters ask for is answered with a queued
//! [`LifecycleEvent::Closed`] that the owner delivers later, one event-loop
//! turn at a time, the same way a device reports a finished close animation.
//! In manual mode closes are parked until [`SimulatedHost::complete_close`]
//! releases them, which makes stalled cascades reproducible.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::rc::Rc;

use crate::adapter::{CloseOptions, OpenOptions, WindowHandleAdapter};
use crate::error::{NativeError, NavError};
use crate::event::LifecycleEvent;
use crate::native::{
    ContainerConfig, ContainerId, NativeContainer, NativeWindows, WindowConfig, WindowFactory,
};
use crate::window::{EventOutcome, NavigationStack, WindowId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeCall {
    CreateWindow(WindowId),
    CreateContainer {
        container: ContainerId,
        root: WindowId,
    },
    OpenContainer(ContainerId),
    OpenNested {
        container: ContainerId,
        window: WindowId,
    },
    CloseNested {
        container: ContainerId,
        window: WindowId,
        animated: bool,
    },
    Open {
        window: WindowId,
        modal: bool,
    },
    Close {
        window: WindowId,
        animated: bool,
    },
}

#[derive(Debug, Default)]
struct HostState {
    next_window: u64,
    next_container: u64,
    windows: BTreeMap<WindowId, WindowConfig>,
    containers: BTreeMap<ContainerId, WindowId>,
    visible: Vec<WindowId>,
    exit_on_close: BTreeSet<WindowId>,
    refused: BTreeSet<WindowId>,
    calls: Vec<NativeCall>,
    events: VecDeque<LifecycleEvent>,
    parked_closes: VecDeque<WindowId>,
    manual_close: bool,
    exit_requested: bool,
}

impl HostState {
    fn check_window(&self, window: WindowId) -> Result<(), NativeError> {
        if !self.windows.contains_key(&window) {
            return Err(NativeError::UnknownWindow(window));
        }
        if self.refused.contains(&window) {
            return Err(NativeError::Refused {
                window,
                reason: "window refused by simulated host".to_string(),
            });
        }
        Ok(())
    }

    fn check_container(&self, container: ContainerId) -> Result<WindowId, NativeError> {
        self.containers
            .get(&container)
            .copied()
            .ok_or(NativeError::UnknownContainer(container))
    }

    fn show(&mut self, window: WindowId, options: &OpenOptions) {
        if !self.visible.contains(&window) {
            self.visible.push(window);
        }
        if options.exit_on_close {
            self.exit_on_close.insert(window);
        }
    }

    fn hide(&mut self, window: WindowId) {
        let Some(index) = self.visible.iter().position(|w| *w == window) else {
            tracing::debug!(window_id = %window, "close for window that is not on screen");
            return;
        };
        self.visible.remove(index);
        if self.exit_on_close.remove(&window) {
            tracing::debug!(window_id = %window, "exit-on-close window closed");
            self.exit_requested = true;
        }
        if self.manual_close {
            self.parked_closes.push_back(window);
        } else {
            self.events.push_back(LifecycleEvent::Closed(window));
        }
    }
}

/// Cloneable handle onto one simulated device. Clones share state, so the
/// adapter can own one while the host keeps another to pump events.
#[derive(Debug, Clone, Default)]
pub struct SimulatedHost {
    state: Rc<RefCell<HostState>>,
}

impl SimulatedHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Park close notifications until [`SimulatedHost::complete_close`].
    pub fn with_manual_close(self, manual: bool) -> Self {
        self.state.borrow_mut().manual_close = manual;
        self
    }

    pub fn manual_close(&self) -> bool {
        self.state.borrow().manual_close
    }

    pub fn calls(&self) -> Vec<NativeCall> {
        self.state.borrow().calls.clone()
    }

    pub fn take_calls(&self) -> Vec<NativeCall> {
        std::mem::take(&mut self.state.borrow_mut().calls)
    }

    /// Windows currently on screen, bottom to top.
    pub fn visible(&self) -> Vec<WindowId> {
        self.state.borrow().visible.clone()
    }

    pub fn title(&self, window: WindowId) -> Option<String> {
        self.state
            .borrow()
            .windows
            .get(&window)
            .and_then(|config| config.title.clone())
    }

    /// True once a window opened with `exit_on_close` has closed.
    pub fn exit_requested(&self) -> bool {
        self.state.borrow().exit_requested
    }

    /// Make every later open/close of `window` fail.
    pub fn refuse(&self, window: WindowId) {
        self.state.borrow_mut().refused.insert(window);
    }

    /// Inject an event as if the device raised it (gestures, user closes).
    pub fn push_event(&self, event: LifecycleEvent) {
        self.state.borrow_mut().events.push_back(event);
    }

    pub fn pending_events(&self) -> usize {
        self.state.borrow().events.len()
    }

    pub fn parked_closes(&self) -> Vec<WindowId> {
        self.state.borrow().parked_closes.iter().copied().collect()
    }

    /// Release the oldest parked close notification.
    pub fn complete_close(&self) -> Option<WindowId> {
        let mut state = self.state.borrow_mut();
        let window = state.parked_closes.pop_front()?;
        state.events.push_back(LifecycleEvent::Closed(window));
        Some(window)
    }

    pub fn next_event(&self) -> Option<LifecycleEvent> {
        self.state.borrow_mut().events.pop_front()
    }

    /// Deliver queued events, including the ones delivery itself queues,
    /// until the device is quiet.
    pub fn pump<A: WindowHandleAdapter>(
        &self,
        stack: &mut NavigationStack<A>,
    ) -> Result<Vec<EventOutcome>, NavError> {
        let mut outcomes = Vec::new();
        // The borrow must end before the stack calls back into the host.
        while let Some(event) = self.next_event() {
            outcomes.push(stack.handle_event(event)?);
        }
        Ok(outcomes)
    }
}

impl WindowFactory for SimulatedHost {
    fn create_window(&mut self, config: &WindowConfig) -> Result<WindowId, NativeError> {
        let mut state = self.state.borrow_mut();
        let window = WindowId::new(state.next_window);
        state.next_window += 1;
        state.windows.insert(window, config.clone());
        state.calls.push(NativeCall::CreateWindow(window));
        Ok(window)
    }
}

impl NativeWindows for SimulatedHost {
    fn open(&mut self, window: WindowId, options: &OpenOptions) -> Result<(), NativeError> {
        let mut state = self.state.borrow_mut();
        state.check_window(window)?;
        state.calls.push(NativeCall::Open {
            window,
            modal: options.modal.unwrap_or(false),
        });
        state.show(window, options);
        Ok(())
    }

    fn close(&mut self, window: WindowId, options: &CloseOptions) -> Result<(), NativeError> {
        let mut state = self.state.borrow_mut();
        state.check_window(window)?;
        state.calls.push(NativeCall::Close {
            window,
            animated: options.is_animated(),
        });
        state.hide(window);
        Ok(())
    }
}

impl NativeContainer for SimulatedHost {
    fn create_container(
        &mut self,
        root: WindowId,
        _config: &ContainerConfig,
    ) -> Result<ContainerId, NativeError> {
        let mut state = self.state.borrow_mut();
        state.check_window(root)?;
        let container = ContainerId::new(state.next_container);
        state.next_container += 1;
        state.containers.insert(container, root);
        state.calls.push(NativeCall::CreateContainer { container, root });
        Ok(container)
    }

    fn open_container(
        &mut self,
        container: ContainerId,
        options: &OpenOptions,
    ) -> Result<(), NativeError> {
        let mut state = self.state.borrow_mut();
        let root = state.check_container(container)?;
        state.calls.push(NativeCall::OpenContainer(container));
        state.show(root, options);
        Ok(())
    }

    fn open_nested(
        &mut self,
        container: ContainerId,
        window: WindowId,
        options: &OpenOptions,
    ) -> Result<(), NativeError> {
        let mut state = self.state.borrow_mut();
        state.check_container(container)?;
        state.check_window(window)?;
        state.calls.push(NativeCall::OpenNested { container, window });
        state.show(window, options);
        Ok(())
    }

    fn close_nested(
        &mut self,
        container: ContainerId,
        window: WindowId,
        options: &CloseOptions,
    ) -> Result<(), NativeError> {
        let mut state = self.state.borrow_mut();
        state.check_container(container)?;
        state.check_window(window)?;
        state.calls.push(NativeCall::CloseNested {
            container,
            window,
            animated: options.is_animated(),
        });
        state.hide(window);
        Ok(())
    }
}
