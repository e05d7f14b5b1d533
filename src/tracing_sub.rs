use std::io::{self, Write};

use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

use crate::debug_log::global_debug_log;

/// Sends formatted events to the installed log buffer, or to stderr while
/// none is installed.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl<'a> MakeWriter<'a> for LogSink {
    type Writer = Box<dyn Write + 'a>;

    fn make_writer(&'a self) -> Self::Writer {
        match global_debug_log() {
            Some(handle) => Box::new(handle.writer()),
            None => Box::new(io::stderr()),
        }
    }
}

/// Install a compact subscriber at `level`. Later calls are no-ops.
pub fn init_default(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(LogSink)
        .with_target(false)
        .without_time()
        .with_ansi(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug_log::{DebugLogHandle, set_global_debug_log};

    #[test]
    fn sink_writes_into_the_installed_log() {
        set_global_debug_log(DebugLogHandle::new(16));
        let log = global_debug_log().unwrap();
        let sink = LogSink;
        {
            let mut writer = sink.make_writer();
            writer.write_all(b"cascade settled depth=1\n").unwrap();
        }
        assert!(log.tail(16).iter().any(|l| l == "cascade settled depth=1"));
    }
}
