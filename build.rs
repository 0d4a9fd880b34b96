fn main() {
    // Le contexte Tauri n'est généré qu'avec la couche applicative
    // The Tauri context is only generated with the app layer
    #[cfg(feature = "app")]
    tauri_build::build();
}
