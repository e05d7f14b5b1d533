pub mod adapter;
pub mod config;
pub mod constants;
pub mod debug_log;
pub mod drivers;
pub mod error;
pub mod event;
pub mod event_loop;
pub mod flow;
pub mod help;
pub mod host;
pub mod keybindings;
pub mod native;
pub mod theme;
pub mod tracing_sub;
pub mod ui;
pub mod window;

pub use adapter::{CloseOptions, OpenOptions, Platform, WindowHandleAdapter};
pub use config::{AdapterConfig, StackOptions};
pub use error::{NativeError, NavError};
pub use event::{LifecycleEvent, SwipeDirection};
pub use flow::AppFlow;
pub use window::{
    Continuation, EventOutcome, NavigationStack, PendingOpen, StackAnomaly, WindowHandle, WindowId,
};
