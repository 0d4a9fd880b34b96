// =============================================================================
// channel.rs - Canaux du modèle et leurs bornes
// channel.rs - Model channels and their bounds
// =============================================================================

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::{Result, RgbaError};

/// Un canal réglable du modèle
/// An adjustable channel of the model
///
/// Red, green and blue live on 0-255; alpha is a 0-100 percentage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Red,
    Green,
    Blue,
    Alpha,
}

impl Channel {
    /// All channels, in persistence order
    pub const ALL: [Channel; 4] = [Channel::Red, Channel::Green, Channel::Blue, Channel::Alpha];

    /// Nom du canal, aussi utilisé comme clé de préférence
    /// Channel name, also used as the preference key
    pub fn key(self) -> &'static str {
        match self {
            Channel::Red => config::KEY_RED,
            Channel::Green => config::KEY_GREEN,
            Channel::Blue => config::KEY_BLUE,
            Channel::Alpha => config::KEY_ALPHA,
        }
    }

    pub fn min(self) -> i32 {
        match self {
            Channel::Alpha => config::MIN_ALPHA,
            _ => config::MIN_RGB,
        }
    }

    pub fn max(self) -> i32 {
        match self {
            Channel::Alpha => config::MAX_ALPHA,
            _ => config::MAX_RGB,
        }
    }

    /// Value used when nothing has been persisted for this channel
    pub fn default_value(self) -> i32 {
        match self {
            Channel::Red => config::DEFAULT_RED,
            Channel::Green => config::DEFAULT_GREEN,
            Channel::Blue => config::DEFAULT_BLUE,
            Channel::Alpha => config::DEFAULT_ALPHA,
        }
    }

    /// Vérifie qu'une valeur est dans les bornes du canal
    /// Checks that a value lies within the channel bounds
    ///
    /// # Returns
    /// La valeur convertie en `u8` / The value narrowed to `u8`
    pub fn validate(self, value: i32) -> Result<u8> {
        if value < self.min() || value > self.max() {
            return Err(RgbaError::OutOfRange {
                channel: self.key(),
                value,
                min: self.min(),
                max: self.max(),
            });
        }
        // Les bornes tiennent toutes dans un u8
        // Every bound fits in a u8
        Ok(value as u8)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Channel {
    type Err = RgbaError;

    fn from_str(s: &str) -> Result<Self> {
        Channel::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| RgbaError::UnknownChannel { name: s.to_string() })
    }
}
