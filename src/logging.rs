//! Console logging.
//!
//! Everything goes through the `log` facade; [`init_logging`] installs a
//! `fern` dispatcher writing timestamped lines to stdout.

use std::sync::Once;

use log::LevelFilter;

static INIT: Once = Once::new();

/// Picks the effective level: `RUST_LOG` wins when it names a plain level,
/// then the configured value, then `info`. Never quieter than `error`, so
/// failure diagnostics always reach the console.
pub fn resolve_level(configured: &str, env: Option<&str>) -> LevelFilter {
    env.and_then(|value| value.trim().parse().ok())
        .or_else(|| configured.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
        .max(LevelFilter::Error)
}

/// Installs the global logger. Later calls are ignored.
pub fn init_logging(configured_level: &str) {
    INIT.call_once(|| {
        let env = std::env::var("RUST_LOG").ok();
        let level = resolve_level(configured_level, env.as_deref());

        let result = fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{} {:<5} {}] {}",
                    chrono::Local::now().format("%H:%M:%S%.3f"),
                    record.level(),
                    record.target(),
                    message
                ))
            })
            .level(level)
            .chain(std::io::stdout())
            .apply();

        match result {
            Ok(()) => log::debug!("logging initialized at {level}"),
            Err(e) => eprintln!("logger already installed: {e}"),
        }
    });
}
