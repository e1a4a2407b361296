use micro_capture::protocol::Snapshot;
use tracing::{Level, debug, error, info, trace, warn};

use crate::converter::Converters;
use crate::render::render;

/// Destination of captured snapshots.
#[cfg_attr(test, mockall::automock)]
pub trait ReportEmitter: Send + Sync {
    fn emit(&self, level: Level, snapshot: &Snapshot, converters: &Converters);
}

/// Renders each snapshot and writes it as a `tracing` event at the requested level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEmitter;

impl ReportEmitter for TracingEmitter {
    fn emit(&self, level: Level, snapshot: &Snapshot, converters: &Converters) {
        let report = render(snapshot, converters);
        let request = snapshot.is_request();
        match level {
            Level::ERROR => error!(request, "{report}"),
            Level::WARN => warn!(request, "{report}"),
            Level::INFO => info!(request, "{report}"),
            Level::DEBUG => debug!(request, "{report}"),
            _ => trace!(request, "{report}"),
        }
    }
}
