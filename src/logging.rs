use std::sync::Once;

use tracing_subscriber::{EnvFilter, util::SubscriberInitExt};

static INIT_ONCE: Once = Once::new();

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "confdiff=warn",
        1 => "confdiff=info",
        _ => "confdiff=debug",
    }
}

/// Sends log output to stderr so it never mixes with the rendered diff.
/// `RUST_LOG` takes precedence over `-v`.
pub fn init(verbosity: u8) {
    INIT_ONCE.call_once(|| {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity))),
            )
            .finish()
            .init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(default_directive(0), "confdiff=warn");
        assert_eq!(default_directive(1), "confdiff=info");
        assert_eq!(default_directive(7), "confdiff=debug");
    }

    #[test]
    fn test_init_idempotent() {
        init(0);
        init(2);
    }
}
