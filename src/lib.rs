// =============================================================================
// lib.rs - Outil RGB-A : modèle de couleur, formatage hexadécimal, persistance
// lib.rs - RGB-A tool: color model, hex formatting, persistence
// =============================================================================

// =============================================================================
// MODULES
// =============================================================================

/// Configuration partagée (constantes)
/// Shared configuration (constants)
pub mod config;

/// Type d'erreur unique
/// Single error type
pub mod error;

/// Canaux rouge, vert, bleu, alpha et leurs bornes
/// Red, green, blue, alpha channels and their bounds
pub mod channel;

/// Formatage et lecture "RRGGBB"
/// "RRGGBB" formatting and parsing
pub mod hex;

/// Couleurs prédéfinies du menu
/// Predefined menu colors
pub mod preset;

/// Modèle observable
/// Observable model
pub mod model;

/// Valeurs dérivées pour l'affichage
/// Derived display values
pub mod color;

/// Stockage des préférences
/// Preference storage
pub mod prefs;

/// Journal fichier
/// File logger
pub mod logging;

/// État de l'application et commandes Tauri
/// Application state and Tauri commands
pub mod store;

pub use channel::Channel;
pub use color::ColorView;
pub use error::{Result, RgbaError};
pub use hex::{format_hex, parse_hex};
pub use model::{ColorModel, Rgba, Subscription};
pub use prefs::{JsonPreferences, MemoryPreferences, Preferences};
pub use preset::Preset;
pub use store::AppState;

// =============================================================================
// INITIALISATION
// INITIALIZATION
// =============================================================================

/// Ouvre les préférences de l'application; en cas d'échec, garde les
/// valeurs en mémoire seulement
/// Opens the application preferences; on failure, keeps values in memory only
#[cfg(feature = "app")]
fn open_preferences() -> store::SharedPreferences {
    match JsonPreferences::open_namespace(config::APP_NAME) {
        Ok(prefs) => {
            log::info!("Using preferences at {}", prefs.path().display());
            Box::new(prefs)
        }
        Err(e) => {
            log::error!("Preferences unavailable, changes will not persist: {}", e);
            Box::new(MemoryPreferences::new())
        }
    }
}

#[cfg(feature = "app")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use tauri::{Emitter, Manager};

    // Le journal est facultatif / Logging is optional
    if let Err(e) = logging::init_logger() {
        eprintln!("Failed to initialize logger: {}", e);
    }

    tauri::Builder::default()
        // Initialise l'état global depuis les préférences
        // Initialize global state from preferences
        .manage(AppState::new(open_preferences()))
        .setup(|app| {
            // Émet "store-updated" à chaque changement du modèle
            // Emit "store-updated" on every model change
            let handle = app.handle().clone();
            app.state::<AppState>().subscribe(move |view| {
                let _ = handle.emit(config::STORE_UPDATED_EVENT, view);
            });
            Ok(())
        })
        // Enregistre les commandes
        // Register commands
        .invoke_handler(tauri::generate_handler![
            store::commands::get_store,
            store::commands::set_channel,
            store::commands::set_rgb,
            store::commands::apply_preset,
            store::commands::save_store,
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app, event| {
            // Sauvegarde à la fermeture
            // Save on exit
            if let tauri::RunEvent::Exit = event {
                if let Err(e) = app.state::<AppState>().save() {
                    log::error!("Failed to save preferences: {}", e);
                }
            }
        });
}
