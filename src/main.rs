use std::io;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use crossterm::event::{Event, KeyEvent};

use nav_stack::constants::{DEFAULT_STALL_TIMEOUT_MS, EVENT_STEP_MS, FRAME_INTERVAL_MS};
use nav_stack::debug_log::{DebugLogHandle, install_panic_hook, set_global_debug_log};
use nav_stack::drivers::OutputDriver;
use nav_stack::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use nav_stack::event_loop::{ControlFlow, EventLoop};
use nav_stack::host::SimulatedHost;
use nav_stack::keybindings::{Action, KeyBindings};
use nav_stack::native::WindowConfig;
use nav_stack::ui::{self, DemoView, StackRow};
use nav_stack::window::CascadeKind;
use nav_stack::{
    AppFlow, LifecycleEvent, NavError, OpenOptions, Platform, StackOptions, SwipeDirection,
    WindowHandleAdapter, WindowId, help, tracing_sub,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PlatformArg {
    /// Screens live inside a native navigation container.
    Container,
    /// Screens are opened one by one; gestures are wired per window.
    Direct,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Container => Platform::Container,
            PlatformArg::Direct => Platform::Direct,
        }
    }
}

/// Drive a navigation stack against a simulated device from the terminal.
#[derive(Debug, Parser)]
#[command(name = "nav-stack", version, about)]
struct Cli {
    #[arg(long, value_enum, default_value_t = PlatformArg::Direct)]
    platform: PlatformArg,

    /// Disable swipe-to-go-back on every screen.
    #[arg(long)]
    no_swipe_back: bool,

    /// Open screens modally unless a screen asks otherwise.
    #[arg(long)]
    modal: bool,

    /// Whether closing the base screen exits on the direct platform
    /// (default true). A container handles its own exit.
    #[arg(long)]
    first_window_exit: Option<bool>,

    /// Hold close notifications until `c` is pressed.
    #[arg(long)]
    manual_close: bool,

    #[arg(long, default_value_t = DEFAULT_STALL_TIMEOUT_MS)]
    stall_timeout_ms: u64,

    #[arg(long, default_value = "debug")]
    log_level: tracing::Level,
}

impl Cli {
    fn stack_options(&self) -> StackOptions {
        let options = StackOptions::default()
            .with_swipe_back(!self.no_swipe_back)
            .with_modal(self.modal);
        match self.first_window_exit {
            Some(exit) => options.with_first_window_exit(exit),
            None => options,
        }
    }
}

type Flow = AppFlow<Box<dyn WindowHandleAdapter>, SimulatedHost>;

struct App {
    flow: Flow,
    host: SimulatedHost,
    bindings: KeyBindings,
    log: DebugLogHandle,
    platform: PlatformArg,
    stall_timeout: Duration,
    anomalies: Vec<String>,
    show_log: bool,
    show_help: bool,
    status: String,
    opened: usize,
    last_step: Instant,
    stall_reported: bool,
}

impl App {
    fn new(cli: &Cli, log: DebugLogHandle) -> io::Result<Self> {
        let host = SimulatedHost::new().with_manual_close(cli.manual_close);
        let flow = AppFlow::for_platform(
            cli.platform.into(),
            host.clone(),
            host.clone(),
            cli.stack_options(),
        );
        let mut app = Self {
            flow,
            host,
            bindings: KeyBindings::default(),
            log,
            platform: cli.platform,
            stall_timeout: Duration::from_millis(cli.stall_timeout_ms),
            anomalies: Vec::new(),
            show_log: true,
            show_help: false,
            status: String::new(),
            opened: 0,
            last_step: Instant::now(),
            stall_reported: false,
        };
        app.open_screen(false)?;
        Ok(app)
    }

    /// Deliver at most one lifecycle event, then look for anomalies and stalls.
    fn tick(&mut self) -> ControlFlow {
        let now = Instant::now();
        if now.duration_since(self.last_step) >= Duration::from_millis(EVENT_STEP_MS)
            && let Some(event) = self.host.next_event()
        {
            self.last_step = now;
            match self.flow.dispatch(event) {
                Ok(outcome) => self.status = format!("{outcome:?}"),
                Err(err) => self.report_error(err),
            }
        }
        for anomaly in self.flow.stack_mut().take_anomalies() {
            self.anomalies.push(anomaly.to_string());
        }
        self.check_stall(now);
        if self.host.exit_requested() {
            tracing::info!("base screen closed; exiting");
            return ControlFlow::Quit;
        }
        ControlFlow::Continue
    }

    fn check_stall(&mut self, now: Instant) {
        let stack = self.flow.stack();
        if stack.cascade().is_none() {
            self.stall_reported = false;
            return;
        }
        if !self.stall_reported && stack.cascade_stalled(now, self.stall_timeout) {
            self.stall_reported = true;
            tracing::warn!(
                cascade = ?stack.cascade(),
                depth = stack.len(),
                "cascade stalled waiting for a close notification"
            );
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> ControlFlow {
        let Some(action) = self.bindings.action_for_key(key) else {
            return ControlFlow::Continue;
        };
        if self.show_help {
            if matches!(action, Action::ToggleHelp | Action::HardwareBack) {
                self.show_help = false;
            }
            return ControlFlow::Continue;
        }
        let result = match action {
            Action::Quit => return ControlFlow::Quit,
            Action::ToggleHelp => {
                self.show_help = true;
                Ok(())
            }
            Action::ToggleLog => {
                self.show_log = !self.show_log;
                Ok(())
            }
            Action::OpenScreen => self.open_screen(false),
            Action::OpenModal => self.open_screen(true),
            Action::OpenFromHome => self.open_from_home(),
            Action::Back => self.flow.go_back(None),
            Action::BackSteps(n) => self.flow.go_back(Some(usize::from(n))),
            Action::Home => self.flow.go_home(),
            Action::SwipeBack => {
                self.gesture(|window| LifecycleEvent::Swipe {
                    window,
                    direction: SwipeDirection::Right,
                });
                Ok(())
            }
            Action::HardwareBack => {
                self.gesture(LifecycleEvent::HardwareBack);
                Ok(())
            }
            Action::HomeIcon => {
                self.gesture(LifecycleEvent::HomeIconSelected);
                Ok(())
            }
            Action::CompleteClose => {
                self.status = match self.host.complete_close() {
                    Some(window) => format!("delivering close of {window}"),
                    None => "no parked closes".to_string(),
                };
                Ok(())
            }
            Action::StaleClose => {
                self.stale_close();
                Ok(())
            }
        };
        if let Err(err) = result {
            self.report_error(err);
        }
        ControlFlow::Continue
    }

    fn open_screen(&mut self, modal: bool) -> Result<(), NavError> {
        let config = self.next_config();
        let options = if modal {
            OpenOptions::new().modal(true)
        } else {
            OpenOptions::new()
        };
        let window = self.flow.open_screen(&config, options)?;
        self.status = format!("opened {window}");
        Ok(())
    }

    fn open_from_home(&mut self) -> Result<(), NavError> {
        let config = self.next_config();
        let window = self.flow.open_screen_from_home(&config, OpenOptions::new())?;
        self.status = format!("{window} will open above the base");
        Ok(())
    }

    fn next_config(&mut self) -> WindowConfig {
        let title = if self.flow.stack().is_empty() {
            "Home".to_string()
        } else {
            format!("Screen {}", self.opened)
        };
        self.opened += 1;
        WindowConfig::titled(title)
    }

    /// Raise a gesture on the top screen through the device queue.
    fn gesture(&mut self, make: impl FnOnce(WindowId) -> LifecycleEvent) {
        match self.flow.stack().top() {
            Some(top) => self.host.push_event(make(top.id())),
            None => self.status = "no screen to gesture on".to_string(),
        }
    }

    /// Report the close of a screen that is not on top.
    fn stale_close(&mut self) {
        let windows = self.flow.stack().windows();
        match windows.len().checked_sub(2).map(|i| windows[i].id()) {
            Some(below_top) => {
                self.host.push_event(LifecycleEvent::Closed(below_top));
                self.status = format!("sent stale close for {below_top}");
            }
            None => self.status = "need two screens for a stale close".to_string(),
        }
    }

    fn report_error(&mut self, err: NavError) {
        tracing::error!(error = %err, "navigation failed");
        self.status = format!("error: {err}");
    }

    fn view(&self) -> DemoView {
        let stack = self.flow.stack();
        let platform = match self.platform {
            PlatformArg::Container => "container",
            PlatformArg::Direct => "direct",
        };
        let cascade = stack.cascade().map(|kind| match kind {
            CascadeKind::Home => "home".to_string(),
            CascadeKind::Back(steps) => format!("back {steps}"),
        });
        DemoView {
            platform: platform.to_string(),
            rows: stack.windows().iter().map(StackRow::from_handle).collect(),
            cascade,
            stalled: self.stall_reported,
            parked_closes: self.host.parked_closes().len(),
            anomalies: self.anomalies.clone(),
            log: if self.show_log {
                self.log.tail(200)
            } else {
                Vec::new()
            },
            show_log: self.show_log,
            help: self.show_help.then(|| self.bindings.help_entries()),
            help_text: help::help_text().to_string(),
            status: self.status.clone(),
        }
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let log = DebugLogHandle::default();
    set_global_debug_log(log.clone());
    install_panic_hook();
    tracing_sub::init_default(cli.log_level);

    let mut app = App::new(&cli, log)?;
    let mut output = ConsoleOutputDriver::new()?;
    output.enter()?;
    let mut event_loop = EventLoop::new(
        ConsoleInputDriver::new(),
        Duration::from_millis(FRAME_INTERVAL_MS),
    );

    let result = event_loop.run(|_, event| match event {
        None => {
            let flow = app.tick();
            let view = app.view();
            output.draw(|frame| ui::render(frame, &view))?;
            Ok(flow)
        }
        Some(Event::Key(key)) => Ok(app.handle_key(&key)),
        Some(_) => Ok(ControlFlow::Continue),
    });

    output.exit()?;
    result
}
