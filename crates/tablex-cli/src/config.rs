//! CLI configuration file
//!
//! ```toml
//! group_moves = "bottom"
//! item_moves = "top"
//! validate = true
//! defer_conflicting_reloads = false
//! ```
//!
//! Every key is optional. Command-line flags override file values, and
//! missing values fall back to the library defaults.

use std::path::Path;

use clap::ValueEnum;
use serde::Deserialize;
use tablex_core::{MoveStrategy, ReconcileConfig};

use crate::snapshot::SnapshotGroup;

/// Move-resolution preference selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MovePreference {
    Top,
    Bottom,
}

impl MovePreference {
    pub fn strategy<T>(self) -> MoveStrategy<T> {
        match self {
            MovePreference::Top => MoveStrategy::TopPreference,
            MovePreference::Bottom => MoveStrategy::BottomPreference,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    pub group_moves: Option<MovePreference>,
    pub item_moves: Option<MovePreference>,
    pub validate: Option<bool>,
    pub defer_conflicting_reloads: Option<bool>,
}

impl CliConfig {
    /// Load a TOML configuration file
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read config {}: {}", path.display(), e))?;
        Self::parse(&text).map_err(|e| format!("invalid config {}: {}", path.display(), e).into())
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Overlay values given on the command line
    pub fn overlay(self, flags: CliConfig) -> Self {
        Self {
            group_moves: flags.group_moves.or(self.group_moves),
            item_moves: flags.item_moves.or(self.item_moves),
            validate: flags.validate.or(self.validate),
            defer_conflicting_reloads: flags.defer_conflicting_reloads.or(self.defer_conflicting_reloads),
        }
    }

    pub fn to_reconcile_config(&self) -> ReconcileConfig<SnapshotGroup> {
        let mut config = ReconcileConfig::default();
        if let Some(preference) = self.group_moves {
            config = config.with_group_move_strategy(preference.strategy());
        }
        if let Some(preference) = self.item_moves {
            config = config.with_item_move_strategy(preference.strategy());
        }
        if let Some(enabled) = self.validate {
            config = config.with_validation(enabled);
        }
        if let Some(enabled) = self.defer_conflicting_reloads {
            config = config.with_deferred_reloads(enabled);
        }
        config
    }
}
