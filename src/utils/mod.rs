pub mod build_info;

use std::{
    env,
    path::{Path, PathBuf},
    sync::Once,
};

use dirs::home_dir;

const DEFAULT_DIR_NAME: &str = ".parkqwik";
const CONFIG_FILE: &str = "config.json";
const LOG_TARGET: &str = "parkqwik";
const DEFAULT_LOG_DIRECTIVE: &str = "parkqwik=info";

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
///
/// Logs go to stderr so that interactive screens on stdout stay readable.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let user = env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
        fmt()
            .with_env_filter(log_filter(&user))
            .with_writer(std::io::stderr)
            .init();
    });
}

/// `RUST_LOG` directives plus `parkqwik=info`, unless the user already set a
/// level for `parkqwik`.
fn log_filter(user: &str) -> tracing_subscriber::EnvFilter {
    let filter = tracing_subscriber::EnvFilter::new(user);
    let names_target = user
        .split(',')
        .any(|directive| directive.trim().starts_with(LOG_TARGET));
    if names_target {
        return filter;
    }
    match DEFAULT_LOG_DIRECTIVE.parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Returns the application directory, defaulting to `~/.parkqwik`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("PARKQWIK_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Path of the configuration file inside `base`.
pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directive_joins_user_filter() {
        let filter = log_filter("warn").to_string();
        assert!(filter.contains("warn"));
        assert!(filter.contains(DEFAULT_LOG_DIRECTIVE));

        assert!(log_filter("").to_string().contains(DEFAULT_LOG_DIRECTIVE));
    }

    #[test]
    fn user_level_for_parkqwik_wins() {
        let filter = log_filter("parkqwik=debug").to_string();
        assert!(filter.contains("parkqwik=debug"));
        assert!(!filter.contains(DEFAULT_LOG_DIRECTIVE));
    }
}
