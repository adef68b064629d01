// Tracing setup for the app.
// Visual: nothing on screen; editor, history and loader events print to the terminal,
// and with --debug the per-stroke and per-snapshot lines show up too.

use tracing_subscriber::EnvFilter;

/// Set up the global tracing subscriber. Release runs log at `info`; with
/// `--debug` the level drops to `debug` and `RUST_LOG` may override it.
pub fn init(debug: bool) {
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::new("info")
    };

    // A second init (tests, embedding) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
