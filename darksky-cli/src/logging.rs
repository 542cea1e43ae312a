//! Logging backend for the CLI.

use flexi_logger::{Logger, LoggerHandle};

/// Level used when none is configured.
pub(crate) const DEFAULT_LOG_LEVEL: &str = "warn";

/// Send `log` records at `spec` and above to stderr.
///
/// `spec` accepts anything `flexi_logger` understands, such as `"info"` or
/// `"warn, darksky_core=debug"`. The returned handle must stay alive for the
/// duration of the command.
pub(crate) fn init(spec: &str) -> Result<LoggerHandle, flexi_logger::FlexiLoggerError> {
    Logger::try_with_str(spec)?.log_to_stderr().start()
}
