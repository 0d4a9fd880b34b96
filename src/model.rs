// =============================================================================
// model.rs - Modèle RGB-A observable
// model.rs - Observable RGB-A model
// =============================================================================
//
// Le modèle détient quatre entiers bornés et notifie ses abonnés de façon
// synchrone à chaque mutation.
// The model holds four bounded integers and synchronously notifies its
// subscribers on every mutation.
// =============================================================================

use std::collections::HashSet;
use std::fmt;
use std::mem;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use serde::{Deserialize, Serialize};

use crate::channel::Channel;
use crate::color;
use crate::config;
use crate::error::{Result, RgbaError};
use crate::hex;
use crate::prefs::Preferences;
use crate::preset::Preset;

// =============================================================================
// VALEURS
// VALUES
// =============================================================================

/// Copie des quatre canaux, transmise aux abonnés
/// Copy of the four channels, handed to subscribers
///
/// Toujours dans les bornes : `new` et la désérialisation valident chaque canal
/// Always within bounds: `new` and deserialization check every channel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRgba")]
pub struct Rgba {
    red: u8,
    green: u8,
    blue: u8,
    /// Pourcentage 0-100 / Percentage 0-100
    alpha: u8,
}

/// Forme brute lue depuis JSON, avant validation
/// Raw shape read from JSON, before validation
#[derive(Deserialize)]
struct RawRgba {
    red: i32,
    green: i32,
    blue: i32,
    alpha: i32,
}

impl TryFrom<RawRgba> for Rgba {
    type Error = RgbaError;

    fn try_from(raw: RawRgba) -> Result<Self> {
        Rgba::new(raw.red, raw.green, raw.blue, raw.alpha)
    }
}

impl Rgba {
    /// Builds a value after checking every channel against its bounds
    pub fn new(red: i32, green: i32, blue: i32, alpha: i32) -> Result<Self> {
        Ok(Self {
            red: Channel::Red.validate(red)?,
            green: Channel::Green.validate(green)?,
            blue: Channel::Blue.validate(blue)?,
            alpha: Channel::Alpha.validate(alpha)?,
        })
    }

    pub fn red(&self) -> u8 {
        self.red
    }

    pub fn green(&self) -> u8 {
        self.green
    }

    pub fn blue(&self) -> u8 {
        self.blue
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    pub fn get(&self, channel: Channel) -> u8 {
        match channel {
            Channel::Red => self.red,
            Channel::Green => self.green,
            Channel::Blue => self.blue,
            Channel::Alpha => self.alpha,
        }
    }

    /// Couleur ARGB opaque `0xFFRRGGBB`; la transparence est appliquée par l'affichage
    /// Opaque ARGB color `0xFFRRGGBB`; transparency is applied by the consumer
    pub fn color(&self) -> u32 {
        color::pack_rgb(self.red, self.green, self.blue)
    }

    /// Complément canal par canal, pour garder le texte lisible sur `color()`
    /// Channel-wise complement, keeps text legible over `color()`
    pub fn text_color(&self) -> u32 {
        let max = config::MAX_RGB as u8;
        color::pack_rgb(max - self.red, max - self.green, max - self.blue)
    }

    /// Opacité entre 0.0 et 1.0 / Opacity between 0.0 and 1.0
    pub fn alpha_fraction(&self) -> f32 {
        self.alpha as f32 / config::MAX_ALPHA as f32
    }

    pub fn hex(&self) -> String {
        hex::hex_string(self.red, self.green, self.blue)
    }

    /// Légende de l'aperçu, ex. "Alpha: 0.5 Hex: FFB255"
    /// Preview caption, e.g. "Alpha: 0.5 Hex: FFB255"
    pub fn summary(&self) -> String {
        format!("Alpha: {:?} Hex: {}", self.alpha_fraction(), self.hex())
    }
}

// =============================================================================
// ABONNEMENTS
// SUBSCRIPTIONS
// =============================================================================

type Listener = Box<dyn FnMut(&Rgba) + Send>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
    /// Vrai pendant une diffusion, les écouteurs sont alors sortis du registre
    /// True while dispatching; the listeners are then taken out of the registry
    dispatching: bool,
    /// Désabonnements reçus pendant une diffusion
    /// Unsubscriptions received during a dispatch
    cancelled: HashSet<u64>,
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Écouteurs sortis du registre le temps d'une diffusion
/// Listeners taken out of the registry for one dispatch
///
/// Le `Drop` les remet en place, y compris si un écouteur panique
/// `Drop` puts them back, including when a listener panics
struct Dispatch<'a> {
    registry: &'a Mutex<Registry>,
    listeners: Vec<(u64, Listener)>,
}

impl<'a> Dispatch<'a> {
    fn begin(registry: &'a Mutex<Registry>) -> Self {
        let mut guard = lock(registry);
        guard.dispatching = true;
        let listeners = mem::take(&mut guard.listeners);
        Self { registry, listeners }
    }
}

impl Drop for Dispatch<'_> {
    fn drop(&mut self) {
        let mut registry = lock(self.registry);
        let cancelled = mem::take(&mut registry.cancelled);
        let mut listeners = mem::take(&mut self.listeners);
        listeners.retain(|(id, _)| !cancelled.contains(id));
        // Abonnés ajoutés pendant la diffusion, après les anciens
        // Listeners added during dispatch go after the existing ones
        listeners.append(&mut registry.listeners);
        registry.listeners = listeners;
        registry.dispatching = false;
    }
}

/// Poignée d'abonnement; le désabonnement a lieu au `drop`
/// Subscription handle; unsubscribes on drop
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    /// Stops delivery to this listener
    pub fn unsubscribe(self) {
        // Le travail est fait par Drop / Drop does the work
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(shared) = self.registry.upgrade() else {
            return;
        };
        let mut registry = lock(&shared);
        let before = registry.listeners.len();
        registry.listeners.retain(|(id, _)| *id != self.id);
        if registry.listeners.len() == before && registry.dispatching {
            registry.cancelled.insert(self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

// =============================================================================
// MODÈLE
// MODEL
// =============================================================================

/// Modèle de couleur RGB-A
/// RGB-A color model
///
/// RGB channels range over 0-255, alpha over 0-100. Every write is checked:
/// an out-of-range value is rejected, the model is left untouched and no
/// notification is sent.
pub struct ColorModel {
    rgba: Rgba,
    registry: Arc<Mutex<Registry>>,
}

impl Default for ColorModel {
    /// Blanc opaque / Opaque white
    fn default() -> Self {
        Self::from_rgba(Rgba {
            red: 255,
            green: 255,
            blue: 255,
            alpha: 100,
        })
    }
}

impl ColorModel {
    pub fn new(red: i32, green: i32, blue: i32, alpha: i32) -> Result<Self> {
        Ok(Self::from_rgba(Rgba::new(red, green, blue, alpha)?))
    }

    pub fn from_rgba(rgba: Rgba) -> Self {
        Self {
            rgba,
            registry: Arc::new(Mutex::new(Registry::default())),
        }
    }

    // -------------------------------------------------------------------------
    // Persistance / Persistence
    // -------------------------------------------------------------------------

    /// Construit le modèle depuis les préférences, avec les valeurs par défaut
    /// Builds the model from preferences, falling back to defaults
    ///
    /// A persisted value outside its bounds is discarded in favour of the
    /// channel default.
    pub fn load<P: Preferences + ?Sized>(prefs: &P) -> Self {
        let read = |channel: Channel| -> u8 {
            let stored = prefs.get_int(channel.key(), channel.default_value());
            channel.validate(stored).unwrap_or_else(|err| {
                log::warn!("Discarding persisted value: {}", err);
                // Les valeurs par défaut sont dans les bornes
                // Defaults are within bounds
                channel.default_value() as u8
            })
        };

        let rgba = Rgba {
            red: read(Channel::Red),
            green: read(Channel::Green),
            blue: read(Channel::Blue),
            alpha: read(Channel::Alpha),
        };
        log::info!("Loaded model {:?}", rgba);
        Self::from_rgba(rgba)
    }

    /// Writes the four channels and commits them
    pub fn save<P: Preferences + ?Sized>(&self, prefs: &mut P) -> Result<()> {
        for channel in Channel::ALL {
            prefs.put_int(channel.key(), self.rgba.get(channel) as i32);
        }
        prefs.commit()?;
        log::info!("Saved model {}", self);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Lecture / Getters
    // -------------------------------------------------------------------------

    pub fn red(&self) -> u8 {
        self.rgba.red
    }

    pub fn green(&self) -> u8 {
        self.rgba.green
    }

    pub fn blue(&self) -> u8 {
        self.rgba.blue
    }

    pub fn alpha(&self) -> u8 {
        self.rgba.alpha
    }

    pub fn rgba(&self) -> Rgba {
        self.rgba
    }

    pub fn color(&self) -> u32 {
        self.rgba.color()
    }

    pub fn text_color(&self) -> u32 {
        self.rgba.text_color()
    }

    pub fn alpha_fraction(&self) -> f32 {
        self.rgba.alpha_fraction()
    }

    pub fn hex(&self) -> String {
        self.rgba.hex()
    }

    pub fn summary(&self) -> String {
        self.rgba.summary()
    }

    // -------------------------------------------------------------------------
    // Écriture / Setters
    // -------------------------------------------------------------------------

    pub fn set_red(&mut self, red: i32) -> Result<()> {
        self.set_channel(Channel::Red, red)
    }

    pub fn set_green(&mut self, green: i32) -> Result<()> {
        self.set_channel(Channel::Green, green)
    }

    pub fn set_blue(&mut self, blue: i32) -> Result<()> {
        self.set_channel(Channel::Blue, blue)
    }

    pub fn set_alpha(&mut self, alpha: i32) -> Result<()> {
        self.set_channel(Channel::Alpha, alpha)
    }

    /// Remplace un canal puis notifie une fois
    /// Replaces one channel then notifies once
    pub fn set_channel(&mut self, channel: Channel, value: i32) -> Result<()> {
        let value = channel.validate(value)?;
        log::info!("Setting the model's {} value to: {}", channel, value);

        match channel {
            Channel::Red => self.rgba.red = value,
            Channel::Green => self.rgba.green = value,
            Channel::Blue => self.rgba.blue = value,
            Channel::Alpha => self.rgba.alpha = value,
        }
        self.notify();
        Ok(())
    }

    /// Remplace les trois canaux de couleur avec une seule notification
    /// Replaces the three color channels with a single notification
    ///
    /// Nothing changes if any channel is out of range.
    pub fn set_rgb(&mut self, red: i32, green: i32, blue: i32) -> Result<()> {
        let r = Channel::Red.validate(red)?;
        let g = Channel::Green.validate(green)?;
        let b = Channel::Blue.validate(blue)?;
        self.replace_rgb(r, g, b);
        Ok(())
    }

    fn replace_rgb(&mut self, red: u8, green: u8, blue: u8) {
        log::info!("Setting the model's rgb value to: ({}, {}, {})", red, green, blue);
        self.rgba.red = red;
        self.rgba.green = green;
        self.rgba.blue = blue;
        self.notify();
    }

    // -------------------------------------------------------------------------
    // Couleurs prédéfinies / Presets
    // -------------------------------------------------------------------------

    /// Applique une couleur prédéfinie; la transparence est conservée
    /// Applies a preset; alpha is kept
    pub fn apply(&mut self, preset: Preset) {
        let (r, g, b) = preset.rgb();
        self.replace_rgb(r, g, b);
    }

    pub fn as_black(&mut self) {
        self.apply(Preset::Black);
    }

    pub fn as_white(&mut self) {
        self.apply(Preset::White);
    }

    pub fn as_red(&mut self) {
        self.apply(Preset::Red);
    }

    pub fn as_green(&mut self) {
        self.apply(Preset::Green);
    }

    pub fn as_blue(&mut self) {
        self.apply(Preset::Blue);
    }

    pub fn as_cyan(&mut self) {
        self.apply(Preset::Cyan);
    }

    pub fn as_magenta(&mut self) {
        self.apply(Preset::Magenta);
    }

    pub fn as_yellow(&mut self) {
        self.apply(Preset::Yellow);
    }

    // -------------------------------------------------------------------------
    // Notification
    // -------------------------------------------------------------------------

    /// Abonne un écouteur, appelé de façon synchrone après chaque mutation
    /// Subscribes a listener, called synchronously after every mutation
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&Rgba) + Send + 'static,
    {
        let mut registry = lock(&self.registry);
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Box::new(listener)));

        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.registry).listeners.len()
    }

    fn notify(&self) {
        let snapshot = self.rgba;

        // Les écouteurs sont appelés hors du verrou, ils peuvent donc
        // s'abonner ou se désabonner eux-mêmes
        // Listeners run outside the lock so they may (un)subscribe themselves
        let mut dispatch = Dispatch::begin(&self.registry);
        for (_, listener) in dispatch.listeners.iter_mut() {
            listener(&snapshot);
        }
    }
}

impl fmt::Display for ColorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RGB-A [r={} g={} b={} alpha={}]",
            self.rgba.red, self.rgba.green, self.rgba.blue, self.rgba.alpha
        )
    }
}

impl fmt::Debug for ColorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorModel")
            .field("rgba", &self.rgba)
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
