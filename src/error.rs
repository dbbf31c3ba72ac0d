//! Error types surfaced by the simulation.
//!
//! None of these are fatal: purchase failures become player-facing
//! notifications and placement failures skip the affected spawn.

use std::path::PathBuf;

use thiserror::Error;

use crate::economy::ItemKind;

/// Reasons a shop purchase can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PurchaseError {
    /// The player cannot afford the item.
    #[error("insufficient funds: {item} costs {cost}, player has {available}")]
    InsufficientFunds {
        /// Item requested.
        item: ItemKind,
        /// Price of the item.
        cost: u32,
        /// Coins the player holds.
        available: u32,
    },
    /// The player already owns the item.
    #[error("{0} already owned")]
    AlreadyOwned(ItemKind),
    /// The player is not close enough to the vendor.
    #[error("vendor is out of reach")]
    OutOfRange,
    /// The vendor dialogue is not open.
    #[error("vendor dialogue is closed")]
    DialogueClosed,
}

/// A random placement could not find a valid spot within its attempt budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("placement exhausted after {attempts} attempts")]
pub struct PlacementExhausted {
    /// Number of candidate positions rejected.
    pub attempts: u32,
}

/// Failures while loading or validating a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid JSON for the configuration schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value is outside its permitted range.
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
