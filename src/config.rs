//! Configuration constants shared by the model, the preferences and the app layer
//!
//! These values mirror the bounds and defaults of the RGB-A tool.

/// Valeur minimale d'un canal RGB
/// Minimum RGB channel value
pub const MIN_RGB: i32 = 0;

/// Valeur maximale d'un canal RGB
/// Maximum RGB channel value
pub const MAX_RGB: i32 = 255;

/// Transparence minimale (0 = totalement transparent)
/// Minimum alpha (0 = fully transparent)
pub const MIN_ALPHA: i32 = 0;

/// Transparence maximale, en pourcentage (pas sur 0-255)
/// Maximum alpha, as a percentage (not on the 0-255 scale)
pub const MAX_ALPHA: i32 = 100;

/// Default red channel when nothing has been persisted yet
pub const DEFAULT_RED: i32 = MAX_RGB;

/// Default green channel (a cadmium yellow together with red and blue)
pub const DEFAULT_GREEN: i32 = 178;

/// Default blue channel
pub const DEFAULT_BLUE: i32 = 85;

/// Default alpha (fully opaque)
pub const DEFAULT_ALPHA: i32 = MAX_ALPHA;

/// Nom affiché de l'application, utilisé comme espace de stockage privé
/// Application display name, used as the private storage namespace
pub const APP_NAME: &str = "RGB-A Tool";

/// Preference file name inside the namespace directory
pub const PREFERENCES_FILE: &str = "preferences.json";

/// Log file name inside the local data directory
pub const LOG_FILE: &str = "rgba_tool.log";

// Clés de préférences / Preference keys
pub const KEY_RED: &str = "red";
pub const KEY_GREEN: &str = "green";
pub const KEY_BLUE: &str = "blue";
pub const KEY_ALPHA: &str = "alpha";

/// Événement émis vers le frontend à chaque changement du modèle
/// Event emitted to the frontend on every model change
pub const STORE_UPDATED_EVENT: &str = "store-updated";

/// Rounding factor for the contrast ratio (3 decimals)
pub const ROUNDING_FACTOR: f32 = 1000.0;
