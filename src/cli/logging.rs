//! Tracing setup for the CLI.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// Filter comes from `RUST_LOG` (e.g. `RUST_LOG=tilemerge=debug`), default
/// `warn`. Output goes to stderr so it never mixes with command output.
pub(crate) fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .compact()
        .try_init();
}

/// Route panics through tracing before the default abort.
pub(crate) fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| info.payload().downcast_ref::<String>().map(String::as_str))
            .unwrap_or("<non-string panic payload>");

        let location = info
            .location()
            .map_or_else(|| "<unknown>".to_string(), |l| format!("{}:{}", l.file(), l.line()));

        tracing::error!(%location, %payload, "panic");
        default_hook(info);
    }));
}
