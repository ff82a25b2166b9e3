//! For setting up logging.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_error::ErrorLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Flushes logs upon being dropped.
#[derive(Debug)]
pub struct LogGuard {
    _guards: Vec<WorkerGuard>,
}

/// Initializes logging.
///
/// The filter comes from `RUST_LOG`. Set `LOG_FORMAT=json` for structured output.
pub fn init_logging() -> LogGuard {
    let log_level = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "info,tower_http=debug,shopping_cart_service=debug".into());
    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    let (non_blocking_stdout, stdout_guard) = tracing_appender::non_blocking(std::io::stdout());
    let pretty = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(non_blocking_stdout.clone()));
    let structured = json.then(|| {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(non_blocking_stdout)
            .json()
    });

    tracing_subscriber::registry()
        .with(EnvFilter::new(log_level))
        .with(pretty)
        .with(structured)
        .with(ErrorLayer::default())
        .init();

    LogGuard {
        _guards: vec![stdout_guard],
    }
}
