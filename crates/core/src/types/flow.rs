use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

// =============================================================================
// Order Flow
// =============================================================================

/// Top-level ordering mode. Each flow owns its own navigation container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderFlow {
    #[serde(rename = "delivery")]
    Delivery,
    #[serde(rename = "takeaway")]
    Takeaway,
    #[serde(rename = "dine-in")]
    DineIn,
}

impl OrderFlow {
    /// Wire name used in links, payloads, and the session store.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delivery => "delivery",
            Self::Takeaway => "takeaway",
            Self::DineIn => "dine-in",
        }
    }

    pub fn is_dine_in(&self) -> bool {
        matches!(self, Self::DineIn)
    }

    /// Menu type that mirrors this flow.
    pub fn menu_type(&self) -> MenuType {
        match self {
            Self::Delivery => MenuType::Delivery,
            Self::Takeaway => MenuType::Takeaway,
            Self::DineIn => MenuType::DineIn,
        }
    }
}

impl fmt::Display for OrderFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderFlow {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "delivery" => Ok(Self::Delivery),
            "takeaway" => Ok(Self::Takeaway),
            "dine-in" => Ok(Self::DineIn),
            other => Err(Error::invalid_link(format!("unknown order flow '{}'", other))),
        }
    }
}

// =============================================================================
// Menu Type
// =============================================================================

/// Menu served to the user. Mirrors [`OrderFlow`] today but is carried
/// separately because the backend may send a different value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MenuType {
    #[serde(rename = "delivery")]
    Delivery,
    #[serde(rename = "takeaway")]
    Takeaway,
    #[serde(rename = "dine-in")]
    DineIn,
}

impl MenuType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delivery => "delivery",
            Self::Takeaway => "takeaway",
            Self::DineIn => "dine-in",
        }
    }
}

impl fmt::Display for MenuType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MenuType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<OrderFlow>().map(|flow| flow.menu_type())
    }
}
