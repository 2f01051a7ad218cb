//! Coordinator configuration loading.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use squadboard_error::{ConfigError, ConfigErrorKind};
use std::time::Duration;

/// Runtime settings for the coordinator and sweeper.
///
/// Every external-collaborator call is bounded by one of these timeouts so
/// a stuck delivery or audit backend cannot wedge a request or a sweep
/// pass.
#[derive(Debug, Clone, Serialize, Deserialize, Getters)]
pub struct CoordinatorConfig {
    /// Time budget for rendering/sending a post (seconds). Exceeding it is
    /// treated as a delivery failure and the post is retired.
    #[serde(default = "default_delivery_timeout_secs")]
    delivery_timeout_secs: u64,

    /// Time budget for best-effort side effects: role assignment, audit
    /// notification, delivery removal (seconds).
    #[serde(default = "default_side_effect_timeout_secs")]
    side_effect_timeout_secs: u64,

    /// How often the sweeper scans for expired posts (seconds).
    #[serde(default = "default_sweep_interval_secs")]
    sweep_interval_secs: u64,

    /// Time budget for retiring one expired post during a sweep pass
    /// (seconds); a stuck post must not stall the rest of the batch.
    #[serde(default = "default_sweep_post_timeout_secs")]
    sweep_post_timeout_secs: u64,
}

fn default_delivery_timeout_secs() -> u64 {
    10
}

fn default_side_effect_timeout_secs() -> u64 {
    5
}

fn default_sweep_interval_secs() -> u64 {
    30
}

fn default_sweep_post_timeout_secs() -> u64 {
    5
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            delivery_timeout_secs: default_delivery_timeout_secs(),
            side_effect_timeout_secs: default_side_effect_timeout_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
            sweep_post_timeout_secs: default_sweep_post_timeout_secs(),
        }
    }
}

impl CoordinatorConfig {
    /// Load settings from `squadboard.toml` (optional) with
    /// `SQUADBOARD_`-prefixed environment overrides.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use squadboard::CoordinatorConfig;
    ///
    /// let config = CoordinatorConfig::load().expect("valid configuration");
    /// assert!(config.delivery_timeout().as_secs() > 0);
    /// ```
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let settings = config::Config::builder()
            .add_source(config::File::with_name("squadboard").required(false))
            .add_source(config::Environment::with_prefix("SQUADBOARD"))
            .build()
            .map_err(|e| ConfigError::new(ConfigErrorKind::ReadFailed(e.to_string())))?;

        settings
            .try_deserialize()
            .map_err(|e| ConfigError::new(ConfigErrorKind::InvalidSettings(e.to_string())))
    }

    /// Delivery time budget.
    pub fn delivery_timeout(&self) -> Duration {
        Duration::from_secs(self.delivery_timeout_secs)
    }

    /// Best-effort side-effect time budget.
    pub fn side_effect_timeout(&self) -> Duration {
        Duration::from_secs(self.side_effect_timeout_secs)
    }

    /// Sweep scan interval.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    /// Per-post time budget within a sweep pass.
    pub fn sweep_post_timeout(&self) -> Duration {
        Duration::from_secs(self.sweep_post_timeout_secs)
    }
}
