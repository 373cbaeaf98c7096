//! # Strategy Selection
//!
//! The three pricing policies and how a caller's strategy name maps to one.
//!
//! ## Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  requested name          strategy       fallback                        │
//! │  ──────────────          ────────       ────────                        │
//! │  "default"        ──►    Default        false                           │
//! │  "aggressive"     ──►    Aggressive     false                           │
//! │  "conservative"   ──►    Conservative   false                           │
//! │  anything else    ──►    Default        true   (warn! emitted)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An unknown name is never an error. The selection keeps the requested
//! string so the history record can store it verbatim.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;
use ts_rs::TS;

use crate::calculator;
use crate::error::PricingResult;
use crate::types::{PriceQuote, PricingRequest};

/// A pricing policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Full factor model, clamped to `[cost×1.10, competitor×1.20]`.
    Default,
    /// Higher markup, demand only, clamped to `[cost×1.05, competitor×1.10]`.
    Aggressive,
    /// Lower markup, demand only, clamped to `[cost×1.15, competitor×0.95]`.
    Conservative,
}

impl Strategy {
    /// All strategies, in registry order.
    pub const ALL: [Strategy; 3] = [Strategy::Default, Strategy::Aggressive, Strategy::Conservative];

    /// Name used on the wire and in logs.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Strategy::Default => "default",
            Strategy::Aggressive => "aggressive",
            Strategy::Conservative => "conservative",
        }
    }

    /// Looks up a strategy by exact name.
    pub fn from_name(name: &str) -> Option<Strategy> {
        match name {
            "default" => Some(Strategy::Default),
            "aggressive" => Some(Strategy::Aggressive),
            "conservative" => Some(Strategy::Conservative),
            _ => None,
        }
    }

    /// Resolves a requested name, falling back to [`Strategy::Default`].
    pub fn select(requested: &str) -> StrategySelection {
        match Strategy::from_name(requested) {
            Some(strategy) => StrategySelection {
                requested: requested.to_string(),
                strategy,
                fallback: false,
            },
            None => {
                warn!(requested = %requested, "Unknown pricing strategy, falling back to default");
                StrategySelection {
                    requested: requested.to_string(),
                    strategy: Strategy::Default,
                    fallback: true,
                }
            }
        }
    }

    /// Runs this strategy's calculator.
    pub fn price(&self, request: &PricingRequest) -> PricingResult<PriceQuote> {
        match self {
            Strategy::Default => calculator::default_price(request),
            Strategy::Aggressive => Ok(calculator::aggressive_price(request)),
            Strategy::Conservative => Ok(calculator::conservative_price(request)),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of resolving a requested strategy name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategySelection {
    /// Name exactly as the caller sent it.
    pub requested: String,
    /// Strategy that will run.
    pub strategy: Strategy,
    /// True when `requested` was not recognised.
    pub fallback: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_names() {
        for strategy in Strategy::ALL {
            let selection = Strategy::select(strategy.as_str());
            assert_eq!(selection.strategy, strategy);
            assert!(!selection.fallback);
        }
    }

    #[test]
    fn test_unknown_names_fall_back_to_default() {
        for name in ["", "agressive", "Aggressive", "CONSERVATIVE", " default"] {
            let selection = Strategy::select(name);
            assert_eq!(selection.strategy, Strategy::Default, "name {name:?}");
            assert!(selection.fallback);
            assert_eq!(selection.requested, name);
        }
    }

    #[test]
    fn test_display_matches_wire_name() {
        assert_eq!(Strategy::Aggressive.to_string(), "aggressive");
        assert_eq!(
            serde_json::to_string(&Strategy::Conservative).unwrap(),
            "\"conservative\""
        );
    }
}
