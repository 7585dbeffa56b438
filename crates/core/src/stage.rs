//! The asset lifecycle state machine.
//!
//! An asset moves through exactly five stages, strictly in order, one
//! step at a time. [`Stage::Sold`] is terminal. The only transition rule
//! in the system is [`Stage::can_advance_to`]; every mutating operation
//! funnels through it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the five ordered lifecycle stages.
///
/// The derived `Ord` follows declaration order, which is the lifecycle
/// order: `Mined < CutAndPolished < Certified < InRetail < Sold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    Mined,
    CutAndPolished,
    Certified,
    InRetail,
    Sold,
}

impl Stage {
    /// All stages in lifecycle order.
    pub const ALL: [Stage; 5] = [
        Stage::Mined,
        Stage::CutAndPolished,
        Stage::Certified,
        Stage::InRetail,
        Stage::Sold,
    ];

    /// The stage that follows this one, or `None` from the terminal stage.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Mined => Some(Stage::CutAndPolished),
            Stage::CutAndPolished => Some(Stage::Certified),
            Stage::Certified => Some(Stage::InRetail),
            Stage::InRetail => Some(Stage::Sold),
            Stage::Sold => None,
        }
    }

    /// Whether an asset currently in this stage may advance to `target`.
    ///
    /// Only the immediate successor is reachable: no skips, no reversals,
    /// nothing out of `Sold`.
    pub fn can_advance_to(self, target: Stage) -> bool {
        self.next() == Some(target)
    }

    /// Zero-based position in the lifecycle order.
    pub fn index(self) -> u8 {
        match self {
            Stage::Mined => 0,
            Stage::CutAndPolished => 1,
            Stage::Certified => 2,
            Stage::InRetail => 3,
            Stage::Sold => 4,
        }
    }

    /// Canonical display name.
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Mined => "Mined",
            Stage::CutAndPolished => "CutAndPolished",
            Stage::Certified => "Certified",
            Stage::InRetail => "InRetail",
            Stage::Sold => "Sold",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
