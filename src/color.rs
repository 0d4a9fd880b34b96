// =============================================================================
// color.rs - Valeurs dérivées pour l'affichage
// color.rs - Derived display values
// =============================================================================

use bigcolor::BigColor;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::model::{ColorModel, Rgba};

/// Assemble trois canaux en couleur ARGB opaque `0xFFRRGGBB`
/// Packs three channels into an opaque ARGB color `0xFFRRGGBB`
#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    0xFF00_0000 | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Instantané sérialisable du modèle et de ses valeurs dérivées
/// Serializable snapshot of the model and its derived values
///
/// This is the payload sent to the frontend with every `store-updated`
/// event, and returned by `get_store`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ColorView {
    pub red: u8,
    pub green: u8,
    pub blue: u8,

    /// Transparence en pourcentage (0-100)
    /// Transparency as a percentage (0-100)
    pub alpha: u8,

    /// Opacité appliquée à l'aperçu (0.0-1.0)
    /// Opacity applied to the preview (0.0-1.0)
    pub alpha_fraction: f32,

    /// Format "RRGGBB"
    pub hex: String,

    /// Couleur ARGB opaque / Opaque ARGB color
    pub color: u32,

    /// Couleur du texte (complément) / Text color (complement)
    pub text_color: u32,

    /// "Alpha: 0.5 Hex: FFB255"
    pub summary: String,

    /// Si la couleur est sombre
    /// If the colour is dark
    pub is_dark: bool,

    /// Ratio de contraste texte / fond, arrondi à 3 décimales
    /// Text over background contrast ratio, rounded to 3 decimals
    pub text_contrast_ratio: f32,
}

impl ColorView {
    pub fn from_model(model: &ColorModel) -> Self {
        Self::from_rgba(&model.rgba())
    }

    /// Calcule les valeurs dérivées à partir des canaux seuls
    /// Computes the derived values from the channels alone
    pub fn from_rgba(rgba: &Rgba) -> Self {
        let (r, g, b) = (rgba.red(), rgba.green(), rgba.blue());
        let max = config::MAX_RGB as u8;

        let background = BigColor::from_rgb(r, g, b, 1.0);
        let text = BigColor::from_rgb(max - r, max - g, max - b, 1.0);
        let contrast_ratio = text.get_contrast_ratio(&background);

        Self {
            red: r,
            green: g,
            blue: b,
            alpha: rgba.alpha(),
            alpha_fraction: rgba.alpha_fraction(),
            hex: rgba.hex(),
            color: rgba.color(),
            text_color: rgba.text_color(),
            summary: rgba.summary(),
            is_dark: background.is_dark(),
            text_contrast_ratio: (contrast_ratio * config::ROUNDING_FACTOR).round() / config::ROUNDING_FACTOR,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_rgb() {
        assert_eq!(pack_rgb(0, 0, 0), 0xFF00_0000);
        assert_eq!(pack_rgb(255, 255, 255), 0xFFFF_FFFF);
        assert_eq!(pack_rgb(0x12, 0x34, 0x56), 0xFF12_3456);
    }

    #[test]
    fn test_view_mirrors_model() {
        let model = ColorModel::new(255, 178, 85, 25).unwrap();
        let view = ColorView::from_model(&model);

        assert_eq!((view.red, view.green, view.blue, view.alpha), (255, 178, 85, 25));
        assert_eq!(view.hex, "FFB255");
        assert_eq!(view.color, model.color());
        assert_eq!(view.text_color, model.text_color());
        assert_eq!(view.summary, "Alpha: 0.25 Hex: FFB255");
        assert!((view.alpha_fraction - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_dark_and_contrast() {
        // Noir / Black
        let black = ColorView::from_model(&ColorModel::new(0, 0, 0, 100).unwrap());
        assert!(black.is_dark);
        // Texte blanc sur noir: contraste maximal
        // White text over black: maximum contrast
        assert!((black.text_contrast_ratio - 21.0).abs() < 0.01);

        // Blanc / White
        let white = ColorView::from_model(&ColorModel::default());
        assert!(!white.is_dark);
        assert!((white.text_contrast_ratio - 21.0).abs() < 0.01);
    }

    #[test]
    fn test_view_serializes_for_frontend() {
        let view = ColorView::from_model(&ColorModel::default());
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["hex"], "FFFFFF");
        assert_eq!(json["alpha"], 100);
        assert_eq!(json["summary"], "Alpha: 1.0 Hex: FFFFFF");
    }
}
