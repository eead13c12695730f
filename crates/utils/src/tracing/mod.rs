use condo_core::{CONDO_LOG_VAR, Error, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Re-export tracing macros for convenience
pub use tracing::{debug, error, info, instrument, warn};

/// Initialize the tracing system
///
/// The filter comes from `CONDO_LOG`, then `RUST_LOG`, then defaults to
/// `info`. Output goes to stderr so command results on stdout stay clean.
pub fn init() -> Result<()> {
    init_with_default("info")
}

/// Initialize tracing with an explicit fallback directive
pub fn init_with_default(default_directive: &str) -> Result<()> {
    let filter = std::env::var(CONDO_LOG_VAR)
        .ok()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .map_or_else(|| EnvFilter::try_new(default_directive), Ok)
        .map_err(|e| Error::configuration(format!("invalid log filter: {e}")))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(is_tty())
        .compact()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| Error::configuration(format!("failed to install tracing subscriber: {e}")))
}

/// Check if we're running in a TTY environment
fn is_tty() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stderr())
}

/// Emit a structured event when a privileged operation settles
pub fn operation_settled(operation: &str, target_id: &str, duration_ms: u64, success: bool) {
    if success {
        info!(
            operation = %operation,
            target_id = %target_id,
            duration_ms = %duration_ms,
            "super_admin_operation_completed"
        );
    } else {
        warn!(
            operation = %operation,
            target_id = %target_id,
            duration_ms = %duration_ms,
            "super_admin_operation_failed"
        );
    }
}
