use std::sync::Once;

use env_logger::{Builder, Env, WriteStyle};

/// Default filter: viewer and engine at `info`, the GPU stack only when it
/// warns.
pub const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// Environment variable read when no filter is configured.
pub const FILTER_ENV: &str = "RUST_LOG";

/// Logger settings. Filters use `env_logger` directive syntax, for example
/// `"vista_viewer=debug,wgpu_core=warn"`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Takes precedence over `RUST_LOG`.
    pub filter: Option<String>,
    pub write_style: WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: None, write_style: WriteStyle::Auto }
    }
}

impl LoggingConfig {
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    fn builder(self) -> Builder {
        let mut builder = match self.filter {
            Some(filter) => {
                let mut b = Builder::new();
                b.parse_filters(&filter);
                b
            }
            None => Builder::from_env(Env::new().filter_or(FILTER_ENV, DEFAULT_FILTER)),
        };
        builder.write_style(self.write_style);
        builder
    }
}

static INIT: Once = Once::new();

/// Installs the global logger on first call; later calls do nothing. A logger
/// installed by someone else (a test harness, an embedding app) is left alone.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        if config.builder().try_init().is_ok() {
            log::debug!("logger installed");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_is_kept() {
        let cfg = LoggingConfig::default().with_filter("vista_viewer=trace");
        assert_eq!(cfg.filter.as_deref(), Some("vista_viewer=trace"));
    }

    #[test]
    fn repeated_init_is_harmless() {
        init_logging(LoggingConfig::default());
        init_logging(LoggingConfig::default().with_filter("off"));
    }
}
