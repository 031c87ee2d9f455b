//! Logger initialisation

use log::LevelFilter;

/// Initialise the `env_logger` backend.
///
/// Logs at `Info`, or `Debug` when `verbose` is set. An explicit `RUST_LOG`
/// overrides both.
pub fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }

    // A second init (tests, repeated CLI setup) is harmless
    let _ = builder.try_init();
}

/// Initialise logging only when `RUST_LOG` is set explicitly.
///
/// Used by the TUI, where stray output would corrupt the alternate screen.
pub fn init_quiet_logger() {
    if std::env::var_os("RUST_LOG").is_some() {
        let _ = env_logger::Builder::from_default_env()
            .format_timestamp(None)
            .try_init();
    }
}
