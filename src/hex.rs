// =============================================================================
// hex.rs - Formatage hexadécimal des couleurs
// hex.rs - Hexadecimal color formatting
// =============================================================================

use crate::channel::Channel;
use crate::error::{Result, RgbaError};

// =============================================================================
// FONCTIONS DE FORMATAGE
// FORMATTING FUNCTIONS
// =============================================================================

/// Formate trois canaux en chaîne hexadécimale majuscule
/// Formats three channels as an uppercase hex string
///
/// # Arguments
/// * `red`, `green`, `blue` - Composantes RGB (0-255) / RGB components (0-255)
///
/// # Returns
/// Chaîne au format "RRGGBB", sans '#' / String in "RRGGBB" format, no '#'
///
/// # Errors
/// `OutOfRange` si un canal sort de 0-255 / if a channel is outside 0-255
pub fn format_hex(red: i32, green: i32, blue: i32) -> Result<String> {
    let r = Channel::Red.validate(red)?;
    let g = Channel::Green.validate(green)?;
    let b = Channel::Blue.validate(blue)?;
    Ok(hex_string(r, g, b))
}

/// Variante infaillible pour des canaux déjà bornés
/// Infallible variant for already bounded channels
#[inline]
pub fn hex_string(r: u8, g: u8, b: u8) -> String {
    format!("{:02X}{:02X}{:02X}", r, g, b)
}

/// Decodes "RRGGBB" (optionally prefixed by '#', any case) back into channels
pub fn parse_hex(input: &str) -> Result<(u8, u8, u8)> {
    let invalid = || RgbaError::InvalidHex {
        input: input.to_string(),
    };

    let hex = input.strip_prefix('#').unwrap_or(input);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).map_err(|_| invalid());
    Ok((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hex() {
        assert_eq!(format_hex(0, 0, 0).unwrap(), "000000");
        assert_eq!(format_hex(255, 255, 255).unwrap(), "FFFFFF");
        assert_eq!(format_hex(255, 178, 85).unwrap(), "FFB255");
    }

    #[test]
    fn test_single_digit_is_padded() {
        assert_eq!(format_hex(1, 10, 15).unwrap(), "010A0F");
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        assert!(matches!(
            format_hex(256, 0, 0),
            Err(RgbaError::OutOfRange { channel: "red", value: 256, .. })
        ));
        assert!(matches!(
            format_hex(0, 0, -1),
            Err(RgbaError::OutOfRange { channel: "blue", value: -1, .. })
        ));
    }

    #[test]
    fn test_every_value_decodes_back() {
        // Balaye chaque valeur sur chaque position
        // Sweep every value through every position
        for v in 0..=255 {
            let hex = format_hex(v, 255 - v, v / 2).unwrap();
            assert_eq!(hex.len(), 6);
            assert!(hex.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
            let (r, g, b) = parse_hex(&hex).unwrap();
            assert_eq!((r as i32, g as i32, b as i32), (v, 255 - v, v / 2));
        }
    }

    #[test]
    fn test_parse_hex_accepts_prefix_and_lowercase() {
        assert_eq!(parse_hex("#ffb255").unwrap(), (255, 178, 85));
        assert_eq!(parse_hex("00FFff").unwrap(), (0, 255, 255));
    }

    #[test]
    fn test_parse_hex_rejects_malformed() {
        assert!(parse_hex("#FFF").is_err());
        assert!(parse_hex("GGGGGG").is_err());
        assert!(parse_hex("#FFB2555").is_err());
        // Un '+' passerait from_str_radix, pas notre contrôle
        // A '+' would pass from_str_radix, not our check
        assert!(parse_hex("+1+1+1").is_err());
    }
}
