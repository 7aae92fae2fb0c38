use super::LoggerService;
use crate::errors::Result;

/// Log channel, used as the `tracing` target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    App,
    Detail,
    Summary,
}

/// Sink that forwards each line to the installed `tracing` subscriber
///
/// Targets are `kplog::app`, `kplog::detail` and `kplog::summary`, so a
/// subscriber can route channels to different outputs with an env-filter.
#[derive(Debug, Clone, Copy)]
pub struct TracingSink {
    channel: Channel,
}

impl TracingSink {
    pub fn new(channel: Channel) -> Self {
        Self { channel }
    }
}

// Targets must be literals, so each channel gets its own arm
macro_rules! emit_line {
    ($level:ident, $channel:expr, $line:expr) => {
        match $channel {
            Channel::App => tracing::$level!(target: "kplog::app", "{}", $line),
            Channel::Detail => tracing::$level!(target: "kplog::detail", "{}", $line),
            Channel::Summary => tracing::$level!(target: "kplog::summary", "{}", $line),
        }
    };
}

impl LoggerService for TracingSink {
    fn info(&self, line: &str) {
        emit_line!(info, self.channel, line);
    }

    fn debug(&self, line: &str) {
        emit_line!(debug, self.channel, line);
    }

    fn error(&self, line: &str) {
        emit_line!(error, self.channel, line);
    }

    fn sync(&self) -> Result<()> {
        Ok(())
    }
}
