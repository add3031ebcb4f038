//! Preferred direction and display unit metadata.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether an increase in an indicator is good, bad, or neither for the business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferredDirection {
    Up,
    Down,
    #[default]
    Neutral,
}

impl PreferredDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            PreferredDirection::Up => "up",
            PreferredDirection::Down => "down",
            PreferredDirection::Neutral => "neutral",
        }
    }
}

impl fmt::Display for PreferredDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PreferredDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(PreferredDirection::Up),
            "down" => Ok(PreferredDirection::Down),
            "neutral" | "" => Ok(PreferredDirection::Neutral),
            other => Err(format!("unknown preferred direction '{other}'")),
        }
    }
}

/// Display unit of an indicator's values.
///
/// Source files carry the unit as a bare symbol: `$`, `%`, or empty for
/// plain index values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Dollar,
    Percent,
    #[default]
    Index,
}

impl Unit {
    /// Parse the unit symbol used in CSV files. Anything unrecognized is an index.
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol.trim() {
            "$" | "USD" | "usd" => Unit::Dollar,
            "%" => Unit::Percent,
            _ => Unit::Index,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Dollar => "$",
            Unit::Percent => "%",
            Unit::Index => "",
        }
    }

    /// Prefix shown before values on charts and cards.
    pub fn prefix(self) -> &'static str {
        match self {
            Unit::Dollar => "$",
            _ => "",
        }
    }
}
