// =============================================================================
// preset.rs - Couleurs prédéfinies du menu
// preset.rs - Predefined menu colors
// =============================================================================

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RgbaError};

/// Couleur primaire ou secondaire additive nommée
/// Named additive primary or secondary color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Black,
    White,
    Red,
    Green,
    Blue,
    Cyan,
    Magenta,
    Yellow,
}

impl Preset {
    /// Ordre du menu / Menu order
    pub const ALL: [Preset; 8] = [
        Preset::Black,
        Preset::Blue,
        Preset::Cyan,
        Preset::Green,
        Preset::Magenta,
        Preset::Red,
        Preset::White,
        Preset::Yellow,
    ];

    /// Triplet (r, g, b) de la couleur / Color (r, g, b) triple
    pub fn rgb(self) -> (u8, u8, u8) {
        const MIN: u8 = 0;
        const MAX: u8 = 255;
        match self {
            Preset::Black => (MIN, MIN, MIN),
            Preset::White => (MAX, MAX, MAX),
            Preset::Red => (MAX, MIN, MIN),
            Preset::Green => (MIN, MAX, MIN),
            Preset::Blue => (MIN, MIN, MAX),
            Preset::Cyan => (MIN, MAX, MAX),
            Preset::Magenta => (MAX, MIN, MAX),
            Preset::Yellow => (MAX, MAX, MIN),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::Black => "black",
            Preset::White => "white",
            Preset::Red => "red",
            Preset::Green => "green",
            Preset::Blue => "blue",
            Preset::Cyan => "cyan",
            Preset::Magenta => "magenta",
            Preset::Yellow => "yellow",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = RgbaError;

    fn from_str(s: &str) -> Result<Self> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| RgbaError::UnknownPreset { name: s.to_string() })
    }
}
