//! Classification scales: the GRI's three-way stance and the ACRI's
//! five-level position band.

use serde::{Deserialize, Serialize};

/// Three-way risk stance derived from the GRI and the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stance {
    Aggressive,
    Neutral,
    Defensive,
}

impl Stance {
    pub fn label(&self) -> &'static str {
        match self {
            Stance::Aggressive => "AGGRESSIVE",
            Stance::Neutral => "NEUTRAL",
            Stance::Defensive => "DEFENSIVE",
        }
    }

    /// +1 / 0 / -1 encoding used by the interpreter's voting rule.
    pub fn as_signum(&self) -> i8 {
        match self {
            Stance::Aggressive => 1,
            Stance::Neutral => 0,
            Stance::Defensive => -1,
        }
    }

    pub fn from_signum(signum: i8) -> Self {
        match signum.signum() {
            1 => Stance::Aggressive,
            -1 => Stance::Defensive,
            _ => Stance::Neutral,
        }
    }
}

/// Five-level position scale for asset-class indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionBand {
    VeryOverweight,
    Overweight,
    Neutral,
    Underweight,
    VeryUnderweight,
}

impl PositionBand {
    /// Short ranking-table label.
    pub fn label(&self) -> &'static str {
        match self {
            PositionBand::VeryOverweight => "OW+",
            PositionBand::Overweight => "OW",
            PositionBand::Neutral => "N",
            PositionBand::Underweight => "UW",
            PositionBand::VeryUnderweight => "UW-",
        }
    }

    pub fn full_name(&self) -> &'static str {
        match self {
            PositionBand::VeryOverweight => "Very Overweight",
            PositionBand::Overweight => "Overweight",
            PositionBand::Neutral => "Neutral",
            PositionBand::Underweight => "Underweight",
            PositionBand::VeryUnderweight => "Very Underweight",
        }
    }
}
