use std::time::{Duration, Instant};

use super::{Continuation, PendingOpen, StackAnomaly, WindowHandle, WindowId};
use crate::adapter::{CloseOptions, OpenOptions, WindowHandleAdapter};
use crate::config::StackOptions;
use crate::error::NavError;
use crate::event::LifecycleEvent;
use crate::native::ContainerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeKind {
    Home,
    Back(usize),
}

#[derive(Debug, Clone, Copy)]
struct Cascade {
    kind: CascadeKind,
    last_step: Instant,
}

/// What [`NavigationStack::handle_event`] did with a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// The window was on top and has been removed.
    Popped(WindowId),
    /// The close did not match the top of the stack; nothing was removed.
    Restored(StackAnomaly),
    /// Only the base window is tracked; the close was ignored.
    BaseProtected(StackAnomaly),
    /// A close/open continuation was stored on the window.
    ContinuationSet,
    /// The event named a window the stack does not track.
    Untracked,
    GestureHandled,
    GestureUnhandled,
}

/// Open-window history for one app, bottom (base) to top.
///
/// The stack never removes entries on its own initiative. Every pop is
/// driven by a [`LifecycleEvent::Closed`] notification for the window on
/// top; multi-step operations (`home`, `back(n)`, `open_from_home`) store a
/// [`Continuation`] on each window so that its close triggers the next step.
/// Steps therefore run one event-loop turn apart, strictly in order.
pub struct NavigationStack<A> {
    adapter: A,
    options: StackOptions,
    window_stack: Vec<WindowHandle>,
    container: Option<ContainerId>,
    anomalies: Vec<StackAnomaly>,
    cascade: Option<Cascade>,
}

impl<A: WindowHandleAdapter> NavigationStack<A> {
    pub fn new(adapter: A, options: StackOptions) -> Self {
        Self {
            adapter,
            options,
            window_stack: Vec::new(),
            container: None,
            anomalies: Vec::new(),
            cascade: None,
        }
    }

    pub fn options(&self) -> &StackOptions {
        &self.options
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    pub fn len(&self) -> usize {
        self.window_stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window_stack.is_empty()
    }

    pub fn windows(&self) -> &[WindowHandle] {
        &self.window_stack
    }

    pub fn ids(&self) -> Vec<WindowId> {
        self.window_stack.iter().map(WindowHandle::id).collect()
    }

    pub fn base(&self) -> Option<&WindowHandle> {
        self.window_stack.first()
    }

    pub fn top(&self) -> Option<&WindowHandle> {
        self.window_stack.last()
    }

    pub fn contains(&self, window: WindowId) -> bool {
        self.position(window).is_some()
    }

    pub fn container(&self) -> Option<ContainerId> {
        self.container
    }

    /// Drain anomalies recorded since the last call.
    pub fn take_anomalies(&mut self) -> Vec<StackAnomaly> {
        std::mem::take(&mut self.anomalies)
    }

    pub fn cascade(&self) -> Option<CascadeKind> {
        self.cascade.map(|c| c.kind)
    }

    /// True when a `home`/`back` cascade has made no progress for `timeout`.
    ///
    /// A native close that never fires leaves the cascade waiting forever.
    /// The stack only reports the condition; recovering is up to the host.
    pub fn cascade_stalled(&self, now: Instant, timeout: Duration) -> bool {
        self.cascade.is_some_and(|c| now.saturating_duration_since(c.last_step) >= timeout)
    }

    /// Push `handle` and show it.
    ///
    /// The first handle becomes the base. Where the adapter provides a
    /// container it is created here, once, rooted at the base; later
    /// handles are opened inside it.
    pub fn open(
        &mut self,
        handle: WindowHandle,
        mut options: OpenOptions,
    ) -> Result<(), NavError> {
        let Some(index) = self.track(handle) else {
            return Ok(());
        };
        if options.modal.is_none() && self.options.modal {
            options.modal = Some(true);
        }
        options.exit_on_close = self.window_stack[index].exit_on_close();

        let result = self.show(index, options);
        if result.is_err() {
            let id = self.window_stack[index].id();
            tracing::debug!(window_id = %id, "native open failed; untracking window");
            self.window_stack.truncate(index);
        }
        result
    }

    /// Track a handle that is already on screen without opening it.
    pub fn add(&mut self, handle: WindowHandle) {
        self.track(handle);
    }

    /// Ask the native layer to close `window`. Bookkeeping happens when the
    /// matching [`LifecycleEvent::Closed`] arrives.
    pub fn close(&mut self, window: WindowId) -> Result<(), NavError> {
        self.close_with(window, CloseOptions::new())
    }

    /// Collapse the stack down to the base window.
    pub fn home(&mut self) -> Result<(), NavError> {
        let len = self.window_stack.len();
        if len <= 1 {
            tracing::debug!(depth = len, "already home");
            return Ok(());
        }
        self.chain_closes(len - 1);
        self.begin_cascade(CascadeKind::Home);
        let top = self.window_stack[len - 1].id();
        self.close(top)
    }

    /// Close the top `steps_back` windows, one after another.
    ///
    /// `None` means one step. A count of zero, or one that would reach the
    /// base window, degrades to a single step.
    pub fn back(&mut self, steps_back: Option<usize>) -> Result<(), NavError> {
        let len = self.window_stack.len();
        let Some(top) = self.top().map(WindowHandle::id) else {
            tracing::debug!("back on empty stack");
            return Ok(());
        };
        let requested = steps_back.unwrap_or(1);
        let steps = if requested >= 1 && requested < len {
            requested
        } else {
            if requested != 1 {
                self.report(StackAnomaly::InvalidStepsBack {
                    requested,
                    depth: len,
                });
            }
            1
        };
        self.chain_closes(steps);
        self.begin_cascade(CascadeKind::Back(steps));
        self.close(top)
    }

    /// Go home, then open `handle` directly above the base.
    ///
    /// The open is stored on the window right above the base and runs when
    /// that window's close completes, i.e. at the very end of the cascade.
    pub fn open_from_home(
        &mut self,
        handle: WindowHandle,
        options: OpenOptions,
    ) -> Result<(), NavError> {
        if self.window_stack.len() <= 1 {
            return self.open(handle, options);
        }
        let pending = PendingOpen::new(handle, options);
        self.window_stack[1].set_continuation(Continuation::OpenThen(Box::new(pending)));
        self.home()
    }

    /// Feed a native notification into the stack.
    pub fn handle_event(&mut self, event: LifecycleEvent) -> Result<EventOutcome, NavError> {
        match event {
            LifecycleEvent::Closed(window) => self.on_closed(window),
            LifecycleEvent::RequestCloseOther { window, target } => {
                Ok(self.attach(window, Continuation::CloseThen(target)))
            }
            LifecycleEvent::RequestOpenOther { window, target } => {
                Ok(self.attach(window, Continuation::OpenThen(target)))
            }
            gesture => {
                if self.adapter.handle_gesture(&gesture)? {
                    Ok(EventOutcome::GestureHandled)
                } else {
                    Ok(EventOutcome::GestureUnhandled)
                }
            }
        }
    }

    fn position(&self, window: WindowId) -> Option<usize> {
        self.window_stack.iter().position(|h| h.id() == window)
    }

    fn track(&mut self, mut handle: WindowHandle) -> Option<usize> {
        if self.contains(handle.id()) {
            self.report(StackAnomaly::DuplicateOpen {
                window: handle.id(),
            });
            return None;
        }
        handle.normalize_nav_bar_hidden();
        if self.window_stack.is_empty() {
            handle.mark_base();
            if !self.adapter.provides_container() && self.container.is_none() {
                handle.set_exit_on_close(self.options.first_window_exits(false));
            }
        }
        let index = self.window_stack.len();
        tracing::debug!(
            window_id = %handle.id(),
            title = handle.title().unwrap_or(""),
            depth = index + 1,
            base = handle.is_base(),
            "tracking window"
        );
        self.window_stack.push(handle);
        Some(index)
    }

    fn show(&mut self, index: usize, options: OpenOptions) -> Result<(), NavError> {
        if index == 0 && self.container.is_none() {
            let created = self
                .adapter
                .create_container(&self.window_stack[0], &self.options)?;
            if let Some(container) = created {
                // Kept only once the root is on screen, so a failed base
                // open leaves no container behind.
                self.adapter
                    .open_container(container, &self.window_stack[0], options)?;
                self.container = Some(container);
                return Ok(());
            }
        } else if let Some(container) = self.container {
            self.adapter
                .open_nested(container, &self.window_stack[index], options)?;
            return Ok(());
        } else if self.adapter.provides_container() {
            let window = self.window_stack[index].id();
            self.report(StackAnomaly::MissingContainer { window });
        }
        self.adapter.open_window(&self.window_stack[index], options)?;
        Ok(())
    }

    fn close_with(&mut self, window: WindowId, options: CloseOptions) -> Result<(), NavError> {
        match self.container {
            Some(container) => self.adapter.close_nested(container, window, options)?,
            None => self.adapter.close_window(window, options)?,
        }
        Ok(())
    }

    /// Link the top `steps` windows so each one's close closes the one below.
    fn chain_closes(&mut self, steps: usize) {
        let len = self.window_stack.len();
        let lowest = len.saturating_sub(steps).max(1);
        for i in ((lowest + 1)..len).rev() {
            let below = self.window_stack[i - 1].id();
            self.window_stack[i].set_continuation(Continuation::CloseThen(below));
        }
    }

    fn attach(&mut self, window: WindowId, continuation: Continuation) -> EventOutcome {
        match self.position(window) {
            Some(index) => {
                self.window_stack[index].set_continuation(continuation);
                EventOutcome::ContinuationSet
            }
            None => {
                tracing::debug!(window_id = %window, "continuation for untracked window dropped");
                EventOutcome::Untracked
            }
        }
    }

    fn on_closed(&mut self, window: WindowId) -> Result<EventOutcome, NavError> {
        if self.window_stack.len() <= 1 {
            let anomaly = StackAnomaly::BaseWindowCloseAttempt { closed: window };
            self.report(anomaly);
            self.end_cascade();
            return Ok(EventOutcome::BaseProtected(anomaly));
        }
        let Some(mut popped) = self.window_stack.pop() else {
            return Ok(EventOutcome::Untracked);
        };
        if popped.id() != window {
            let anomaly = StackAnomaly::StaleCloseMismatch {
                top: popped.id(),
                closed: window,
            };
            self.window_stack.push(popped);
            self.report(anomaly);
            return Ok(EventOutcome::Restored(anomaly));
        }

        tracing::debug!(window_id = %window, depth = self.window_stack.len(), "popped window");
        self.adapter.forget(window);
        match popped.take_continuation() {
            Continuation::None => self.end_cascade(),
            Continuation::CloseThen(target) => {
                if let Some(cascade) = self.cascade.as_mut() {
                    cascade.last_step = Instant::now();
                }
                tracing::debug!(window_id = %window, next = %target, "cascade: closing next");
                self.close_with(target, CloseOptions::not_animated())?;
            }
            Continuation::OpenThen(pending) => {
                self.end_cascade();
                let PendingOpen { handle, options } = *pending;
                tracing::debug!(window_id = %window, next = %handle.id(), "cascade: opening next");
                self.open(handle, options)?;
            }
        }
        Ok(EventOutcome::Popped(window))
    }

    fn begin_cascade(&mut self, kind: CascadeKind) {
        if let Some(previous) = self.cascade {
            tracing::debug!(previous = ?previous.kind, next = ?kind, "cascade restarted");
        }
        self.cascade = Some(Cascade {
            kind,
            last_step: Instant::now(),
        });
    }

    fn end_cascade(&mut self) {
        if let Some(cascade) = self.cascade.take() {
            tracing::debug!(kind = ?cascade.kind, depth = self.window_stack.len(), "cascade settled");
        }
    }

    fn report(&mut self, anomaly: StackAnomaly) {
        tracing::warn!(%anomaly, "navigation stack anomaly");
        self.anomalies.push(anomaly);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::error::NativeError;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        CreateContainer(WindowId),
        OpenContainer(WindowId),
        OpenNested(WindowId),
        Open(WindowId, OpenOptions),
        CloseNested(WindowId, CloseOptions),
        Close(WindowId, CloseOptions),
    }

    /// Adapter double: records calls and remembers which closes are still
    /// waiting for their native notification.
    #[derive(Default)]
    struct Recording {
        container: bool,
        fail_open: bool,
        fail_open_container: bool,
        calls: Vec<Call>,
        pending: VecDeque<WindowId>,
    }

    impl Recording {
        fn with_container() -> Self {
            Self {
                container: true,
                ..Self::default()
            }
        }
    }

    impl WindowHandleAdapter for Recording {
        fn provides_container(&self) -> bool {
            self.container
        }

        fn create_container(
            &mut self,
            root: &WindowHandle,
            _options: &StackOptions,
        ) -> Result<Option<ContainerId>, NativeError> {
            if !self.container {
                return Ok(None);
            }
            self.calls.push(Call::CreateContainer(root.id()));
            Ok(Some(ContainerId::new(1)))
        }

        fn open_container(
            &mut self,
            _container: ContainerId,
            root: &WindowHandle,
            _options: OpenOptions,
        ) -> Result<(), NativeError> {
            if std::mem::take(&mut self.fail_open_container) {
                return Err(NativeError::Refused {
                    window: root.id(),
                    reason: "container not attached".to_string(),
                });
            }
            self.calls.push(Call::OpenContainer(root.id()));
            Ok(())
        }

        fn open_nested(
            &mut self,
            _container: ContainerId,
            handle: &WindowHandle,
            _options: OpenOptions,
        ) -> Result<(), NativeError> {
            self.calls.push(Call::OpenNested(handle.id()));
            Ok(())
        }

        fn close_nested(
            &mut self,
            _container: ContainerId,
            window: WindowId,
            options: CloseOptions,
        ) -> Result<(), NativeError> {
            self.calls.push(Call::CloseNested(window, options));
            self.pending.push_back(window);
            Ok(())
        }

        fn open_window(
            &mut self,
            handle: &WindowHandle,
            options: OpenOptions,
        ) -> Result<(), NativeError> {
            if self.fail_open {
                return Err(NativeError::Refused {
                    window: handle.id(),
                    reason: "activity destroyed".to_string(),
                });
            }
            self.calls.push(Call::Open(handle.id(), options));
            Ok(())
        }

        fn close_window(
            &mut self,
            window: WindowId,
            options: CloseOptions,
        ) -> Result<(), NativeError> {
            self.calls.push(Call::Close(window, options));
            self.pending.push_back(window);
            Ok(())
        }
    }

    fn id(raw: u64) -> WindowId {
        WindowId::new(raw)
    }

    fn handle(raw: u64) -> WindowHandle {
        WindowHandle::new(id(raw))
    }

    fn stack_of(n: u64) -> NavigationStack<Recording> {
        let mut stack = NavigationStack::new(Recording::default(), StackOptions::default());
        for raw in 0..n {
            stack.open(handle(raw), OpenOptions::new()).unwrap();
        }
        stack
    }

    /// Deliver every pending native close, including the ones each delivery
    /// triggers, in order.
    fn settle(stack: &mut NavigationStack<Recording>) -> Vec<EventOutcome> {
        let mut outcomes = Vec::new();
        while let Some(window) = stack.adapter_mut().pending.pop_front() {
            outcomes.push(stack.handle_event(LifecycleEvent::Closed(window)).unwrap());
        }
        outcomes
    }

    #[test]
    fn first_open_becomes_base_and_exits_on_close() {
        let stack = stack_of(2);
        let base = stack.base().unwrap();
        assert!(base.is_base());
        assert!(base.exit_on_close());
        assert!(!stack.top().unwrap().is_base());
        assert!(!stack.top().unwrap().exit_on_close());
        match &stack.adapter().calls[0] {
            Call::Open(window, options) => {
                assert_eq!(*window, id(0));
                assert!(options.exit_on_close);
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[test]
    fn container_is_created_once_from_first_window() {
        let mut stack = NavigationStack::new(Recording::with_container(), StackOptions::default());
        stack.open(handle(0), OpenOptions::new()).unwrap();
        stack.open(handle(1), OpenOptions::new()).unwrap();
        stack.open(handle(2), OpenOptions::new()).unwrap();
        assert_eq!(stack.container(), Some(ContainerId::new(1)));
        assert_eq!(
            stack.adapter().calls,
            vec![
                Call::CreateContainer(id(0)),
                Call::OpenContainer(id(0)),
                Call::OpenNested(id(1)),
                Call::OpenNested(id(2)),
            ]
        );
        assert!(!stack.base().unwrap().exit_on_close());
    }

    #[test]
    fn add_tracks_without_opening() {
        let mut stack = NavigationStack::new(Recording::default(), StackOptions::default());
        stack.add(handle(0));
        assert_eq!(stack.len(), 1);
        assert!(stack.adapter().calls.is_empty());
        assert!(stack.base().unwrap().exit_on_close());
    }

    #[test]
    fn add_respects_first_window_exit_option() {
        let options = StackOptions::default().with_first_window_exit(false);
        let mut stack = NavigationStack::new(Recording::default(), options);
        stack.add(handle(0));
        assert!(!stack.base().unwrap().exit_on_close());
    }

    #[test]
    fn open_after_add_without_container_falls_back_to_direct_open() {
        let mut stack = NavigationStack::new(Recording::with_container(), StackOptions::default());
        stack.add(handle(0));
        stack.open(handle(1), OpenOptions::new()).unwrap();
        assert!(matches!(stack.adapter().calls[0], Call::Open(w, _) if w == id(1)));
        assert_eq!(
            stack.take_anomalies(),
            vec![StackAnomaly::MissingContainer { window: id(1) }]
        );
    }

    #[test]
    fn duplicate_open_is_ignored() {
        let mut stack = stack_of(2);
        stack.open(handle(1), OpenOptions::new()).unwrap();
        assert_eq!(stack.len(), 2);
        assert_eq!(
            stack.take_anomalies(),
            vec![StackAnomaly::DuplicateOpen { window: id(1) }]
        );
    }

    #[test]
    fn nav_bar_hidden_is_normalised_on_push() {
        let stack = stack_of(1);
        assert_eq!(stack.base().unwrap().nav_bar_hidden, Some(false));
    }

    #[test]
    fn stack_modal_option_applies_when_unset() {
        let options = StackOptions::default().with_modal(true);
        let mut stack = NavigationStack::new(Recording::default(), options);
        stack.open(handle(0), OpenOptions::new()).unwrap();
        stack.open(handle(1), OpenOptions::new().modal(false)).unwrap();
        let modals: Vec<_> = stack
            .adapter()
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Open(_, o) => Some(o.modal),
                _ => None,
            })
            .collect();
        assert_eq!(modals, vec![Some(true), Some(false)]);
    }

    #[test]
    fn close_does_not_touch_the_stack() {
        let mut stack = stack_of(3);
        stack.close(id(2)).unwrap();
        assert_eq!(stack.len(), 3);
        settle(&mut stack);
        assert_eq!(stack.ids(), vec![id(0), id(1)]);
    }

    #[test]
    fn closing_the_base_is_ignored() {
        let mut stack = stack_of(1);
        stack.close(id(0)).unwrap();
        let outcomes = settle(&mut stack);
        let anomaly = StackAnomaly::BaseWindowCloseAttempt { closed: id(0) };
        assert_eq!(outcomes, vec![EventOutcome::BaseProtected(anomaly)]);
        assert_eq!(stack.ids(), vec![id(0)]);
    }

    #[test]
    fn push_pop_symmetry() {
        let mut stack = stack_of(2);
        stack.open(handle(5), OpenOptions::new()).unwrap();
        assert_eq!(stack.len(), 3);
        let outcome = stack.handle_event(LifecycleEvent::Closed(id(5))).unwrap();
        assert_eq!(outcome, EventOutcome::Popped(id(5)));
        assert_eq!(stack.len(), 2);
        assert!(!stack.contains(id(5)));
    }

    #[test]
    fn home_collapses_to_base() {
        for n in 1..=5 {
            let mut stack = stack_of(n);
            stack.home().unwrap();
            settle(&mut stack);
            assert_eq!(stack.ids(), vec![id(0)], "n = {n}");
            assert!(stack.cascade().is_none());
        }
    }

    #[test]
    fn home_cascade_closes_top_down_without_animation() {
        let mut stack = stack_of(4);
        stack.adapter_mut().calls.clear();
        stack.home().unwrap();
        settle(&mut stack);
        assert_eq!(
            stack.adapter().calls,
            vec![
                Call::Close(id(3), CloseOptions::new()),
                Call::Close(id(2), CloseOptions::not_animated()),
                Call::Close(id(1), CloseOptions::not_animated()),
            ]
        );
    }

    #[test]
    fn home_cascade_goes_through_container() {
        let mut stack = NavigationStack::new(Recording::with_container(), StackOptions::default());
        for raw in 0..3 {
            stack.open(handle(raw), OpenOptions::new()).unwrap();
        }
        stack.home().unwrap();
        settle(&mut stack);
        assert_eq!(stack.ids(), vec![id(0)]);
        assert!(
            stack
                .adapter()
                .calls
                .contains(&Call::CloseNested(id(1), CloseOptions::not_animated()))
        );
    }

    #[test]
    fn back_k_removes_exactly_k() {
        let n = 5;
        for k in 1..n {
            let mut stack = stack_of(n as u64);
            stack.back(Some(k)).unwrap();
            settle(&mut stack);
            assert_eq!(stack.len(), n - k, "k = {k}");
            assert!(stack.take_anomalies().is_empty());
        }
    }

    #[test]
    fn back_defaults_to_one_step() {
        let mut stack = stack_of(3);
        stack.back(None).unwrap();
        settle(&mut stack);
        assert_eq!(stack.ids(), vec![id(0), id(1)]);
    }

    #[test]
    fn back_past_the_base_degrades_to_one_step() {
        let mut stack = stack_of(3);
        stack.back(Some(3)).unwrap();
        settle(&mut stack);
        assert_eq!(stack.ids(), vec![id(0), id(1)]);
        assert_eq!(
            stack.take_anomalies(),
            vec![StackAnomaly::InvalidStepsBack {
                requested: 3,
                depth: 3
            }]
        );

        stack.back(Some(0)).unwrap();
        settle(&mut stack);
        assert_eq!(stack.ids(), vec![id(0)]);
    }

    #[test]
    fn back_then_back_scenario() {
        let mut stack = NavigationStack::new(Recording::default(), StackOptions::default());
        stack.open(handle(0).with_title("Base"), OpenOptions::new()).unwrap();
        stack.open(handle(1).with_title("A"), OpenOptions::new()).unwrap();
        stack.open(handle(2).with_title("B"), OpenOptions::new()).unwrap();
        stack.back(Some(2)).unwrap();

        assert_eq!(
            stack.top().unwrap().continuation(),
            &Continuation::CloseThen(id(1))
        );
        let first = stack.adapter_mut().pending.pop_front().unwrap();
        assert_eq!(first, id(2));
        stack.handle_event(LifecycleEvent::Closed(first)).unwrap();
        let second = stack.adapter_mut().pending.pop_front().unwrap();
        assert_eq!(second, id(1));
        stack.handle_event(LifecycleEvent::Closed(second)).unwrap();

        assert_eq!(stack.ids(), vec![id(0)]);
        assert!(stack.adapter().pending.is_empty());
    }

    #[test]
    fn open_from_home_defers_until_cascade_settles() {
        let mut stack = stack_of(3);
        stack.open_from_home(handle(9), OpenOptions::new()).unwrap();
        assert!(!stack.contains(id(9)));
        settle(&mut stack);
        assert_eq!(stack.ids(), vec![id(0), id(9)]);
        assert!(stack.cascade().is_none());
    }

    #[test]
    fn open_from_home_on_base_opens_immediately() {
        let mut stack = stack_of(1);
        stack.open_from_home(handle(9), OpenOptions::new()).unwrap();
        assert_eq!(stack.ids(), vec![id(0), id(9)]);
    }

    #[test]
    fn open_from_home_with_one_screen_above_base() {
        let mut stack = stack_of(2);
        stack.open_from_home(handle(9), OpenOptions::new()).unwrap();
        settle(&mut stack);
        assert_eq!(stack.ids(), vec![id(0), id(9)]);
    }

    #[test]
    fn stale_close_restores_stack() {
        let mut stack = stack_of(3);
        let before = stack.ids();
        let outcome = stack.handle_event(LifecycleEvent::Closed(id(1))).unwrap();
        let anomaly = StackAnomaly::StaleCloseMismatch {
            top: id(2),
            closed: id(1),
        };
        assert_eq!(outcome, EventOutcome::Restored(anomaly));
        assert_eq!(stack.ids(), before);
        assert_eq!(stack.take_anomalies(), vec![anomaly]);
    }

    #[test]
    fn request_events_store_continuations() {
        let mut stack = stack_of(3);
        let outcome = stack
            .handle_event(LifecycleEvent::RequestCloseOther {
                window: id(2),
                target: id(1),
            })
            .unwrap();
        assert_eq!(outcome, EventOutcome::ContinuationSet);
        stack.close(id(2)).unwrap();
        settle(&mut stack);
        assert_eq!(stack.ids(), vec![id(0)]);

        let pending = PendingOpen::new(handle(7), OpenOptions::new());
        let outcome = stack
            .handle_event(LifecycleEvent::RequestOpenOther {
                window: id(42),
                target: Box::new(pending),
            })
            .unwrap();
        assert_eq!(outcome, EventOutcome::Untracked);
    }

    #[test]
    fn request_open_other_opens_after_close() {
        let mut stack = stack_of(2);
        let pending = PendingOpen::new(handle(7), OpenOptions::new());
        stack
            .handle_event(LifecycleEvent::RequestOpenOther {
                window: id(1),
                target: Box::new(pending),
            })
            .unwrap();
        stack.close(id(1)).unwrap();
        settle(&mut stack);
        assert_eq!(stack.ids(), vec![id(0), id(7)]);
    }

    #[test]
    fn stalled_cascade_is_reported_not_repaired() {
        let mut stack = stack_of(3);
        stack.home().unwrap();
        assert_eq!(stack.cascade(), Some(CascadeKind::Home));
        let later = Instant::now() + Duration::from_secs(5);
        assert!(stack.cascade_stalled(later, Duration::from_secs(1)));
        assert_eq!(stack.len(), 3);

        settle(&mut stack);
        assert!(!stack.cascade_stalled(later, Duration::from_secs(1)));
    }

    #[test]
    fn failed_native_open_untracks_window() {
        let mut stack = stack_of(1);
        stack.adapter_mut().fail_open = true;
        let err = stack.open(handle(3), OpenOptions::new()).unwrap_err();
        assert!(matches!(err, NavError::Native(NativeError::Refused { .. })));
        assert_eq!(stack.ids(), vec![id(0)]);
    }

    #[test]
    fn failed_base_open_drops_the_container() {
        let mut stack = NavigationStack::new(Recording::with_container(), StackOptions::default());
        stack.adapter_mut().fail_open_container = true;
        assert!(stack.open(handle(0), OpenOptions::new()).is_err());
        assert!(stack.is_empty());
        assert_eq!(stack.container(), None);

        stack.open(handle(5), OpenOptions::new()).unwrap();
        assert_eq!(stack.container(), Some(ContainerId::new(1)));
        assert!(stack.base().unwrap().is_base());
        assert_eq!(
            stack.adapter().calls,
            vec![
                Call::CreateContainer(id(0)),
                Call::CreateContainer(id(5)),
                Call::OpenContainer(id(5)),
            ]
        );
    }

    #[test]
    fn stack_never_empties() {
        let mut stack = stack_of(3);
        for raw in [2, 1, 0, 0, 1] {
            let _ = stack.handle_event(LifecycleEvent::Closed(id(raw))).unwrap();
            assert!(!stack.is_empty());
        }
        assert_eq!(stack.ids(), vec![id(0)]);
    }
}
