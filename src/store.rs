// =============================================================================
// store.rs - État de l'application et commandes Tauri
// store.rs - Application state and Tauri commands
// =============================================================================

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::channel::Channel;
use crate::color::ColorView;
use crate::error::Result;
use crate::model::{ColorModel, Subscription};
use crate::prefs::Preferences;
use crate::preset::Preset;

// =============================================================================
// STORE - État partagé
// STORE - Shared state
// =============================================================================

/// Magasin de préférences partageable entre threads
/// Preference store shareable across threads
pub type SharedPreferences = Box<dyn Preferences + Send>;

/// État de l'application wrappé dans des Mutex pour thread-safety
/// Application state wrapped in Mutexes for thread-safety
///
/// Le modèle est chargé depuis les préférences à la création et sauvegardé
/// par `save` (mise en arrière-plan, fermeture).
/// The model is loaded from preferences on creation and written back by
/// `save` (backgrounding, exit).
pub struct AppState {
    model: Mutex<ColorModel>,
    prefs: Mutex<SharedPreferences>,
    subscription: Mutex<Option<Subscription>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl AppState {
    pub fn new(prefs: SharedPreferences) -> Self {
        let model = ColorModel::load(prefs.as_ref());
        Self {
            model: Mutex::new(model),
            prefs: Mutex::new(prefs),
            subscription: Mutex::new(None),
        }
    }

    /// Abonne la vue unique de l'application; remplace l'abonnement précédent
    /// Subscribes the application's single view; replaces any previous one
    pub fn subscribe<F>(&self, on_change: F)
    where
        F: Fn(ColorView) + Send + 'static,
    {
        let subscription = lock(&self.model).subscribe(move |rgba| on_change(ColorView::from_rgba(rgba)));
        *lock(&self.subscription) = Some(subscription);
    }

    pub fn view(&self) -> ColorView {
        ColorView::from_model(&lock(&self.model))
    }

    pub fn set_channel(&self, channel: Channel, value: i32) -> Result<ColorView> {
        let mut model = lock(&self.model);
        model.set_channel(channel, value)?;
        Ok(ColorView::from_model(&model))
    }

    pub fn set_rgb(&self, red: i32, green: i32, blue: i32) -> Result<ColorView> {
        let mut model = lock(&self.model);
        model.set_rgb(red, green, blue)?;
        Ok(ColorView::from_model(&model))
    }

    pub fn apply_preset(&self, preset: Preset) -> ColorView {
        let mut model = lock(&self.model);
        model.apply(preset);
        ColorView::from_model(&model)
    }

    /// Persiste les quatre canaux / Persists the four channels
    pub fn save(&self) -> Result<()> {
        let model = lock(&self.model);
        let mut prefs = lock(&self.prefs);
        model.save(&mut **prefs)
    }
}

// =============================================================================
// COMMANDES TAURI
// TAURI COMMANDS
// =============================================================================

#[cfg(feature = "app")]
pub mod commands {
    use super::AppState;
    use crate::channel::Channel;
    use crate::color::ColorView;
    use crate::preset::Preset;

    /// Récupère l'état actuel du store
    /// Gets the current store state
    #[tauri::command]
    pub fn get_store(state: tauri::State<AppState>) -> ColorView {
        state.view()
    }

    /// Met à jour un canal (sélecteurs RGB ou curseur alpha)
    /// Updates one channel (RGB pickers or alpha slider)
    #[tauri::command]
    pub fn set_channel(state: tauri::State<AppState>, channel: Channel, value: i32) -> Result<ColorView, String> {
        state.set_channel(channel, value).map_err(|e| e.to_string())
    }

    #[tauri::command]
    pub fn set_rgb(state: tauri::State<AppState>, red: i32, green: i32, blue: i32) -> Result<ColorView, String> {
        state.set_rgb(red, green, blue).map_err(|e| e.to_string())
    }

    /// Applique une couleur du menu / Applies a menu color
    #[tauri::command]
    pub fn apply_preset(state: tauri::State<AppState>, preset: Preset) -> ColorView {
        state.apply_preset(preset)
    }

    /// Sauvegarde immédiate, appelée quand l'application passe en arrière-plan
    /// Immediate save, called when the app goes to the background
    #[tauri::command]
    pub fn save_store(state: tauri::State<AppState>) -> Result<(), String> {
        state.save().map_err(|e| e.to_string())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RgbaError;
    use crate::prefs::MemoryPreferences;
    use std::sync::Arc;

    fn state_with(values: &[(&str, i32)]) -> AppState {
        let mut prefs = MemoryPreferences::new();
        for (key, value) in values {
            prefs.put_int(key, *value);
        }
        AppState::new(Box::new(prefs))
    }

    #[test]
    fn test_starts_from_persisted_values() {
        let state = state_with(&[("red", 1), ("green", 2), ("blue", 3), ("alpha", 4)]);
        let view = state.view();
        assert_eq!((view.red, view.green, view.blue, view.alpha), (1, 2, 3, 4));
    }

    #[test]
    fn test_starts_from_defaults() {
        let view = state_with(&[]).view();
        assert_eq!(view.hex, "FFB255");
        assert_eq!(view.alpha, 100);
    }

    #[test]
    fn test_subscriber_receives_every_change() {
        let state = state_with(&[]);
        let views = Arc::new(Mutex::new(Vec::new()));
        let v = Arc::clone(&views);
        state.subscribe(move |view| v.lock().unwrap().push(view));

        state.set_channel(Channel::Alpha, 50).unwrap();
        state.apply_preset(Preset::Cyan);
        state.set_rgb(16, 32, 64).unwrap();
        assert!(state.set_channel(Channel::Red, 300).is_err());

        let views = views.lock().unwrap();
        assert_eq!(views.len(), 3);
        assert_eq!(views[0].summary, "Alpha: 0.5 Hex: FFB255");
        assert_eq!(views[1].hex, "00FFFF");
        assert_eq!(views[2].hex, "102040");
        assert_eq!(views[2], state.view());
    }

    #[test]
    fn test_resubscribe_replaces_listener() {
        let state = state_with(&[]);
        let first = Arc::new(Mutex::new(0));
        let second = Arc::new(Mutex::new(0));

        let f = Arc::clone(&first);
        state.subscribe(move |_| *f.lock().unwrap() += 1);
        let s = Arc::clone(&second);
        state.subscribe(move |_| *s.lock().unwrap() += 1);

        state.apply_preset(Preset::Black);
        assert_eq!(*first.lock().unwrap(), 0);
        assert_eq!(*second.lock().unwrap(), 1);
    }

    #[test]
    fn test_errors_leave_state_untouched() {
        let state = state_with(&[]);
        let before = state.view();
        assert!(matches!(state.set_rgb(0, 0, 256), Err(RgbaError::OutOfRange { .. })));
        assert_eq!(state.view(), before);
    }

    #[test]
    fn test_save_writes_through() {
        let state = state_with(&[]);
        state.set_rgb(7, 8, 9).unwrap();
        state.set_channel(Channel::Alpha, 10).unwrap();
        state.save().unwrap();

        let prefs = lock(&state.prefs);
        assert_eq!(prefs.get_int("red", -1), 7);
        assert_eq!(prefs.get_int("green", -1), 8);
        assert_eq!(prefs.get_int("blue", -1), 9);
        assert_eq!(prefs.get_int("alpha", -1), 10);
    }
}
