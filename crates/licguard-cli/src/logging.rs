use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Clone, Copy, Debug, Default)]
pub struct LogOptions {
    /// Only errors are logged.
    pub quiet: bool,
    pub no_color: bool,
}

impl LogOptions {
    fn default_level(&self) -> &'static str {
        if self.quiet { "error" } else { "info" }
    }
}

/// Install the stderr log subscriber. `RUST_LOG` takes precedence over `--quiet`.
pub fn init(opts: LogOptions) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(opts.default_level()));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(!opts.no_color)
                .with_target(false),
        )
        .try_init();
}
