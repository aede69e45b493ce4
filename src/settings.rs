//! Player preferences
//!
//! Held in memory for the page session. A page may embed overrides as JSON
//! in a `<script id="game-settings" type="application/json">` element.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which sprite the catcher wears
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CatcherSkin {
    #[default]
    Taco,
    Wing,
}

impl CatcherSkin {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "taco" => Some(CatcherSkin::Taco),
            "wing" => Some(CatcherSkin::Wing),
            _ => None,
        }
    }

    /// Sprite path relative to the page
    pub fn sprite_path(&self) -> &'static str {
        match self {
            CatcherSkin::Taco => "assets/taco.png",
            CatcherSkin::Wing => "assets/wing.png",
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub skin: CatcherSkin,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    /// Pause when the tab is hidden or the window loses focus
    pub auto_pause: bool,
    /// Skip full-screen flashes (miss overlay, life warning)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            skin: CatcherSkin::Taco,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            auto_pause: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// DOM element holding JSON overrides
    #[cfg(target_arch = "wasm32")]
    const ELEMENT_ID: &'static str = "game-settings";

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        for (name, vol) in [
            ("master_volume", settings.master_volume),
            ("sfx_volume", settings.sfx_volume),
            ("music_volume", settings.music_volume),
        ] {
            if !(0.0..=1.0).contains(&vol) {
                return Err(ConfigError::Invalid(format!("{name} {vol} outside 0..=1")));
            }
        }
        Ok(settings)
    }

    /// Whether full-screen flashes should be drawn
    pub fn effective_flashes(&self) -> bool {
        !self.reduced_motion
    }

    /// Load overrides from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json.map(|j| Self::from_json(&j)) {
            Some(Ok(settings)) => {
                log::info!("Loaded settings from page");
                settings
            }
            Some(Err(e)) => {
                log::warn!("Ignoring page settings: {e}");
                Self::default()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
