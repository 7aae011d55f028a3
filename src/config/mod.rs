//! Engine preferences and their JSON persistence.

mod manager;

pub use manager::ConfigManager;

use serde::{Deserialize, Serialize};

use crate::domain::{CategoryDirectory, CategoryInfo};

/// Tunables consumed by budget creation and the budget session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Alert threshold (percent) applied when a new budget does not set one.
    #[serde(default = "Config::default_alert_threshold_value")]
    pub default_alert_threshold: u8,
    /// Lets the session step past the window containing today.
    #[serde(default)]
    pub allow_future_navigation: bool,
    /// Shown for transactions whose category cannot be resolved.
    #[serde(default)]
    pub fallback_category: CategoryInfo,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_alert_threshold: Self::default_alert_threshold_value(),
            allow_future_navigation: false,
            fallback_category: CategoryInfo::other(),
        }
    }
}

impl Config {
    pub fn default_alert_threshold_value() -> u8 {
        80
    }

    /// Empty category directory carrying the configured fallback entry.
    pub fn category_directory(&self) -> CategoryDirectory {
        CategoryDirectory::new().with_fallback(self.fallback_category.clone())
    }
}
