//! Tracing setup
//!
//! The subscriber is installed before configuration is read so config
//! fallback warnings are visible. Until the config file is known the
//! filter comes from `RUST_LOG` (or `info`); afterwards the configured
//! level replaces it unless `RUST_LOG` is set.

use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry};

/// Level used before the config file is read
pub const BOOTSTRAP_LEVEL: &str = "info";

/// Filter directives for our crates and the HTTP trace layer
pub fn filter_for(level: &str) -> EnvFilter {
    EnvFilter::new(format!(
        "chipcheck_server={level},chipcheck_common={level},tower_http={level}"
    ))
}

/// Handle for swapping the log filter once configuration is loaded
pub struct LogHandle {
    handle: reload::Handle<EnvFilter, Registry>,
    from_env: bool,
}

impl LogHandle {
    /// Switch to the configured level; `RUST_LOG` keeps priority
    pub fn apply_level(&self, level: &str) {
        if self.from_env {
            return;
        }
        if let Err(e) = self.handle.reload(filter_for(level)) {
            warn!("Could not apply log level {}: {}", level, e);
        }
    }
}

/// Install the global subscriber
pub fn init_tracing() -> LogHandle {
    let (filter, from_env) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (filter_for(BOOTSTRAP_LEVEL), false),
    };
    let (filter, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    LogHandle { handle, from_env }
}
