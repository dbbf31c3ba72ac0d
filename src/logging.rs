//! Process-wide logger set-up.
use env_logger::{Builder, Env};
use log::LevelFilter;

/// Crates whose chatter is capped at `warn` unless `RUST_LOG` says otherwise.
const NOISY_CRATES: [&str; 3] = ["wgpu", "naga", "winit"];

/// Initializes the global logger.
///
/// `RUST_LOG` takes precedence. Without it, everything logs at debug level
/// when `verbose` is `true` and at info level otherwise. Returns `false`
/// when a logger was already installed, which tests rely on to call `init`
/// repeatedly.
#[must_use = "`false` means another logger is already installed"]
pub fn init(verbose: bool) -> bool {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::new();
    for name in NOISY_CRATES {
        builder.filter_module(name, LevelFilter::Warn);
    }
    builder.parse_env(env);
    builder.try_init().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_harmless() {
        let _first = init(false);
        assert!(!init(true));
    }
}
